// Category directory: the read-only id -> name mapping fetched once at
// startup and consumed by the category menu and tag labeling.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, Copy, Hash, PartialEq, Eq)]
pub struct CategoryId(pub u64);

impl CategoryId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("category {0} not found in directory")]
pub struct NotFoundError(pub CategoryId);

/// Ordered list of categories as served by the catalog endpoint.
/// Built once from the category fetch result, never mutated afterwards.
#[derive(Debug, Default, Clone)]
pub struct CategoryDirectory {
    entries: Vec<Category>,
}

impl CategoryDirectory {
    pub fn from_list(entries: Vec<Category>) -> Self {
        Self { entries }
    }

    pub fn name_of(&self, id: CategoryId) -> Result<&str, NotFoundError> {
        self.entries
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .ok_or(NotFoundError(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
