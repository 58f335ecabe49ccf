// Filter state for the product listing: category selection, free-text
// search and a bounded price range, merged into one query per mutation.
//
// Public API:
//   - FilterCriteria: the combined selection state
//   - PriceRange: validated [min, max] within the slider bounds
//   - FilterStore: owns the criteria, runs the fetches (store.rs)
//   - compose(&criteria) -> ProductQuery (query.rs)
//   - derive_tags(&criteria, &directory) -> Vec<FilterTag> (tags.rs)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CategoryId;

pub mod query;
pub mod store;
pub mod tags;

pub use query::{compose, ProductQuery};
pub use store::FilterStore;
pub use tags::{derive_tags, FilterTag, TagKind};

/// Slider bounds and step, shared by validation and the price widget.
pub const PRICE_MIN: u64 = 0;
pub const PRICE_MAX: u64 = 50_000_000;
pub const PRICE_STEP: u64 = 500_000;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid price range {min} - {max} (expected 0 <= min <= max <= 50000000)")]
pub struct InvalidRangeError {
    pub min: u64,
    pub max: u64,
}

/// Inclusive price window. Only constructible within the slider bounds,
/// so an "empty" or inverted range cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Result<Self, InvalidRangeError> {
        if min > max || max > PRICE_MAX {
            return Err(InvalidRangeError { min, max });
        }
        Ok(Self { min, max })
    }
}

/// Current filter selections. Created empty when the view starts and
/// mutated exclusively through `FilterStore` operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub category_id: Option<CategoryId>,
    pub search_key: String,
    pub price_range: Option<PriceRange>,
}

impl FilterCriteria {
    /// True iff no dimension is active: no category, empty search text,
    /// no price window.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.search_key.is_empty() && self.price_range.is_none()
    }
}
