//! Remote shop search.
//!
//! [`ShopSource`] is the seam between pagination and the network: the fetch
//! worker and the headless CLI only see the trait, so tests drive them with
//! in-memory sources while production uses [`HotPepperClient`].

pub mod client;
pub mod models;

pub use client::{HotPepperClient, DEFAULT_ENDPOINT};
pub use models::decode_page;

use crate::domain::{FetchError, Shop};
use futures_util::future::BoxFuture;

/// Number of shops requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Parameters for fetching one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Free-text keyword. Empty means unfiltered.
    pub keyword: String,

    /// 1-based index of the first result.
    pub start: usize,

    /// Page size.
    pub count: u32,
}

impl PageQuery {
    #[must_use]
    pub fn new(keyword: impl Into<String>, start: usize) -> Self {
        Self {
            keyword: keyword.into(),
            start,
            count: PAGE_SIZE,
        }
    }
}

/// Something that can return a page of shops.
///
/// Implementations are stateless with respect to pagination; every call is
/// independent and an empty vector means the end of the result set.
pub trait ShopSource: Send + Sync {
    /// Fetches one page.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why no page could be produced.
    fn fetch_page<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<Vec<Shop>, FetchError>>;
}
