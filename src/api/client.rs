//! HTTP client for the HotPepper gourmet search API.

use crate::api::models::decode_page;
use crate::api::{PageQuery, ShopSource};
use crate::domain::{FetchError, GourmetError, Result, Shop};
use crate::infrastructure::credentials::ApiKey;
use futures_util::future::BoxFuture;

/// Production endpoint of the gourmet search API.
pub const DEFAULT_ENDPOINT: &str = "https://webservice.recruit.co.jp/hotpepper/gourmet/v1/";

/// Stateless page fetcher backed by `reqwest`.
///
/// Each call issues a single GET with `key`, `start`, `count`, `keyword` and
/// `format=json`. The key is attached per request and never appears in logs or
/// error messages.
#[derive(Debug, Clone)]
pub struct HotPepperClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
}

impl HotPepperClient {
    /// Builds a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`GourmetError::Config`] if the TLS backend cannot be set up.
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gourmet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GourmetError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    #[tracing::instrument(
        name = "hotpepper_fetch",
        level = "debug",
        skip_all,
        fields(start = query.start, count = query.count, keyword = %query.keyword)
    )]
    async fn fetch(&self, query: &PageQuery) -> std::result::Result<Vec<Shop>, FetchError> {
        let start = query.start.to_string();
        let count = query.count.to_string();

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.expose()),
                ("start", start.as_str()),
                ("count", count.as_str()),
                ("keyword", query.keyword.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(transport_error)?;
        let shops = decode_page(&body)?;

        tracing::debug!(returned = shops.len(), "page decoded");
        Ok(shops)
    }
}

impl ShopSource for HotPepperClient {
    fn fetch_page<'a>(
        &'a self,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, std::result::Result<Vec<Shop>, FetchError>> {
        Box::pin(self.fetch(query))
    }
}

/// The request URL carries the key, so it is stripped before formatting.
fn transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(error.without_url().to_string())
    }
}
