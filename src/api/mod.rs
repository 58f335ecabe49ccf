// Shop catalog API client: fetch the product listing for a given query and
// the category list.
//
// Public API:
//   - Product: typed listing entry
//   - ApiError: request/decode or server-reported failure
//   - HttpProvider: reqwest-backed implementation of the provider traits
//   - provider::{ProductListProvider, CategoryListProvider}: seams the
//     filter store fetches through
//
// Endpoint sample:
// http://localhost:3000/products?categoryId=3&search=phone&priceMin=0&priceMax=50000000

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::catalog::CategoryId;
use crate::filters::ProductQuery;

pub mod provider;

pub use provider::{CategoryListProvider, ProductListProvider};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::builder()
        .user_agent(concat!("shop-browser/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap();
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("api error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: u64,
    pub category_id: CategoryId,
}

/// Maps a query to request parameters. Absent dimensions produce no
/// parameter at all; the server treats a missing parameter as unfiltered.
fn query_params(query: &ProductQuery) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(id) = query.category_id {
        params.push(("categoryId".into(), id.to_string()));
    }
    if !query.search_key.is_empty() {
        params.push(("search".into(), query.search_key.clone()));
    }
    if let Some(range) = query.price_filter {
        params.push(("priceMin".into(), range.min.to_string()));
        params.push(("priceMax".into(), range.max.to_string()));
    }
    params
}

pub struct HttpProvider {
    base: Url,
}

impl HttpProvider {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Base URL from SHOP_API_BASE, falling back to the localhost default.
    pub fn from_env() -> Self {
        let base = std::env::var("SHOP_API_BASE")
            .ok()
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::warn!("ignoring SHOP_API_BASE {raw:?}: {err}");
                    None
                }
            })
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).unwrap());
        Self::new(base)
    }

    /// GET an endpoint and decode the JSON body. On 429 the request is
    /// retried once after a 1 s delay to avoid hammering the server.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ApiError::Api(format!("bad endpoint url {path:?}: {e}")))?;
        log::debug!("GET {url} params={params:?}");

        let mut raw_resp = CLIENT.get(url.clone()).query(&params).send().await?;

        if raw_resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            log::warn!("GET {url}: 429 Too Many Requests, delaying 1s before retry");
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            raw_resp = CLIENT.get(url).query(&params).send().await?;
        }

        let raw_resp = raw_resp.error_for_status()?;
        match raw_resp.json::<T>().await {
            Ok(v) => Ok(v),
            Err(err) => {
                let text = format!("failed to decode response: {err}");
                log::error!("{}", text);
                Err(ApiError::Api(text))
            }
        }
    }
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider").field("base", &self.base).finish()
    }
}
