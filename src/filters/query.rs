// Pure mapping from the current criteria to the listing query. The
// provider interprets absent fields as "unfiltered"; nothing is defaulted
// or normalized here.

use crate::catalog::CategoryId;

use super::{FilterCriteria, PriceRange};

/// Query handed to the product listing provider. Always carries the full
/// current state, never a diff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub price_filter: Option<PriceRange>,
    pub category_id: Option<CategoryId>,
    pub search_key: String,
}

pub fn compose(criteria: &FilterCriteria) -> ProductQuery {
    ProductQuery {
        price_filter: criteria.price_range,
        category_id: criteria.category_id,
        search_key: criteria.search_key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_compose_to_empty_query() {
        let query = compose(&FilterCriteria::default());
        assert_eq!(query, ProductQuery::default());
        assert!(query.price_filter.is_none());
        assert!(query.category_id.is_none());
        assert!(query.search_key.is_empty());
    }

    #[test]
    fn fields_pass_through_unchanged() {
        let criteria = FilterCriteria {
            category_id: Some(CategoryId(3)),
            search_key: "phone".to_string(),
            price_range: Some(PriceRange::new(1_000_000, 20_000_000).unwrap()),
        };
        let query = compose(&criteria);
        assert_eq!(query.category_id, Some(CategoryId(3)));
        assert_eq!(query.search_key, "phone");
        assert_eq!(
            query.price_filter,
            Some(PriceRange::new(1_000_000, 20_000_000).unwrap())
        );
    }

    #[test]
    fn absent_dimensions_stay_absent() {
        let criteria = FilterCriteria {
            search_key: "phone".to_string(),
            ..Default::default()
        };
        let query = compose(&criteria);
        assert!(query.category_id.is_none());
        assert!(query.price_filter.is_none());
    }
}
