use async_trait::async_trait;

use crate::catalog::Category;
use crate::filters::ProductQuery;

use super::{query_params, ApiError, HttpProvider, Product};

/// Listing collaborator: called once per filter mutation with the full
/// current query, never a diff.
#[async_trait]
pub trait ProductListProvider: Send + Sync {
    async fn fetch(&self, query: ProductQuery) -> Result<Vec<Product>, ApiError>;
}

/// Catalog collaborator: called once at startup; the result becomes the
/// read-only category directory.
#[async_trait]
pub trait CategoryListProvider: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Category>, ApiError>;
}

#[async_trait]
impl ProductListProvider for HttpProvider {
    async fn fetch(&self, query: ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products", &query_params(&query)).await
    }
}

#[async_trait]
impl CategoryListProvider for HttpProvider {
    async fn fetch(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories", &[]).await
    }
}
