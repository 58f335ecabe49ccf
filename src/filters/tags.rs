// Active-filter tags derived from the criteria on every frame. Tags are
// plain data; closing one routes its kind back to
// `FilterStore::dismiss`, which clears that dimension only.

use strum::IntoEnumIterator;

use crate::catalog::CategoryDirectory;

use super::FilterCriteria;

/// One removable indicator per active filter dimension. Declaration order
/// is the display order: category, price, search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TagKind {
    Category,
    Price,
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterTag {
    pub kind: TagKind,
    pub label: String,
}

/// Builds the tag list for the current criteria. A category id missing
/// from the directory is labeled by its raw id instead of crashing the
/// render.
pub fn derive_tags(criteria: &FilterCriteria, directory: &CategoryDirectory) -> Vec<FilterTag> {
    let mut out = Vec::new();
    for kind in TagKind::iter() {
        match kind {
            TagKind::Category => {
                if let Some(id) = criteria.category_id {
                    let label = match directory.name_of(id) {
                        Ok(name) => name.to_string(),
                        Err(err) => {
                            log::warn!("tag labeling: {err}, falling back to id");
                            id.get().to_string()
                        }
                    };
                    out.push(FilterTag { kind, label });
                }
            }
            TagKind::Price => {
                if let Some(range) = criteria.price_range {
                    out.push(FilterTag {
                        kind,
                        label: format!("price range from: {} - {}", range.min, range.max),
                    });
                }
            }
            TagKind::Search => {
                if !criteria.search_key.is_empty() {
                    out.push(FilterTag {
                        kind,
                        label: format!("search by keyword: {}", criteria.search_key),
                    });
                }
            }
        }
    }
    out
}
