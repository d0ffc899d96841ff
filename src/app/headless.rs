//! Non-interactive search for the `gourmet search` command.
//!
//! Drives the same [`SearchQuery`] and [`apply_page`] as the terminal UI, one
//! page at a time, so the guard and merge rules are identical.

use crate::api::ShopSource;
use crate::app::pagination::{apply_page, PageOutcome, ResultList, SearchQuery};
use crate::domain::{FetchError, Shop};
use crate::storage::FavoriteRecord;
use crate::worker::fetch_with_timeout;
use std::time::Duration;

/// How many pages to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    Pages(usize),
    /// Until the API returns an empty page.
    All,
}

impl PageLimit {
    const fn allows(self, loaded_pages: usize) -> bool {
        match self {
            Self::Pages(max) => loaded_pages < max,
            Self::All => true,
        }
    }
}

/// Summary of a finished headless search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRun {
    pub results: ResultList,
    pub pages: usize,
    pub end_of_results: bool,
    pub error: Option<FetchError>,
}

/// Loads pages for `keyword`, calling `on_page` with each new batch.
///
/// Stops at the page limit, at the first empty page, or at the first
/// failure (which clears the results like the UI does).
pub async fn search_pages<F>(
    source: &dyn ShopSource,
    keyword: &str,
    limit: PageLimit,
    timeout: Duration,
    mut on_page: F,
) -> SearchRun
where
    F: FnMut(&[Shop]),
{
    let mut query = SearchQuery::new(keyword);
    let mut results = ResultList::default();
    let mut pages = 0;
    let mut error = None;

    while limit.allows(pages) {
        let Some(request) = query.begin(results.shops.len(), pages > 0) else {
            break;
        };
        let before = if request.append { results.shops.len() } else { 0 };

        let outcome = fetch_with_timeout(source, &request.query, timeout).await;
        match apply_page(&mut query, &mut results, request.generation, request.append, outcome) {
            PageOutcome::Replaced { .. } | PageOutcome::Appended { .. } => {
                pages += 1;
                on_page(&results.shops[before..]);
            }
            PageOutcome::Failed(e) => {
                error = Some(e);
                break;
            }
            PageOutcome::EndOfResults | PageOutcome::Stale => break,
        }
    }

    tracing::info!(keyword, pages, loaded = results.shops.len(), "headless search finished");

    SearchRun {
        results,
        pages,
        end_of_results: query.end_of_results(),
        error,
    }
}

/// Output for a search result: one line, plus an indented detail line
/// carrying the catch copy and access directions when the API sent either.
///
/// # Examples
///
/// ```
/// use gourmet::app::headless::format_shop_line;
/// use gourmet::domain::{CouponUrls, Shop};
///
/// let shop = Shop::new("J001", "Ramen Taro", "Tokyo", "", CouponUrls::default());
/// assert_eq!(format_shop_line(&shop, true), "★ J001  Ramen Taro  Tokyo");
/// ```
#[must_use]
pub fn format_shop_line(shop: &Shop, is_favorite: bool) -> String {
    let marker = if is_favorite { "★ " } else { "  " };
    let mut line = match &shop.genre {
        Some(genre) => format!("{marker}{}  {}  [{genre}]  {}", shop.id, shop.name, shop.address),
        None => format!("{marker}{}  {}  {}", shop.id, shop.name, shop.address),
    };

    let details: Vec<&str> = [shop.catch.as_deref(), shop.access.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !details.is_empty() {
        line.push_str("\n    ");
        line.push_str(&details.join("  /  "));
    }
    line
}

/// One output line for a stored favorite.
#[must_use]
pub fn format_favorite_line(record: &FavoriteRecord) -> String {
    format!(
        "{}  {}  {}  {}  (added {})",
        record.id,
        record.name,
        record.address,
        record.coupon().unwrap_or("-"),
        crate::domain::time_ago(record.created_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageQuery;
    use crate::domain::CouponUrls;
    use futures_util::future::BoxFuture;
    use std::sync::Mutex;

    /// Serves `total` shops in pages and records every requested start.
    struct PagedSource {
        total: usize,
        fail_at: Option<usize>,
        starts: Mutex<Vec<usize>>,
    }

    impl PagedSource {
        fn new(total: usize) -> Self {
            Self {
                total,
                fail_at: None,
                starts: Mutex::new(vec![]),
            }
        }
    }

    impl ShopSource for PagedSource {
        fn fetch_page<'a>(&'a self, query: &'a PageQuery) -> BoxFuture<'a, Result<Vec<Shop>, FetchError>> {
            self.starts.lock().unwrap().push(query.start);
            let result = if self.fail_at == Some(query.start) {
                Err(FetchError::Status(503))
            } else {
                let first = query.start - 1;
                let last = (first + query.count as usize).min(self.total);
                Ok((first..last)
                    .map(|i| Shop::new(format!("J{i:03}"), format!("Shop {i}"), "Tokyo", "", CouponUrls::default()))
                    .collect())
            };
            Box::pin(std::future::ready(result))
        }
    }

    #[tokio::test]
    async fn loads_requested_page_count() {
        let source = PagedSource::new(100);
        let mut batches = vec![];

        let run = search_pages(&source, "ramen", PageLimit::Pages(2), Duration::from_secs(1), |page| {
            batches.push(page.len());
        })
        .await;

        assert_eq!(batches, [20, 20]);
        assert_eq!(run.results.shops.len(), 40);
        assert_eq!(*source.starts.lock().unwrap(), [1, 21]);
        assert!(!run.end_of_results);
    }

    #[tokio::test]
    async fn all_stops_at_empty_page() {
        let source = PagedSource::new(45);

        let run = search_pages(&source, "", PageLimit::All, Duration::from_secs(1), |_| {}).await;

        assert_eq!(run.pages, 3);
        assert_eq!(run.results.shops.len(), 45);
        assert!(run.end_of_results);
        assert_eq!(*source.starts.lock().unwrap(), [1, 21, 41, 46]);
    }

    #[tokio::test]
    async fn failure_clears_results() {
        let source = PagedSource {
            fail_at: Some(21),
            ..PagedSource::new(100)
        };

        let run = search_pages(&source, "sushi", PageLimit::All, Duration::from_secs(1), |_| {}).await;

        assert_eq!(run.error, Some(FetchError::Status(503)));
        assert!(run.results.shops.is_empty());
        assert_eq!(run.results.status.as_deref(), Some(crate::app::pagination::NO_RESULTS_STATUS));
    }

    #[test]
    fn shop_line_includes_genre() {
        let mut shop = Shop::new("J9", "Udon Ya", "Osaka", "", CouponUrls::default());
        shop.genre = Some("Noodles".to_string());
        assert_eq!(format_shop_line(&shop, false), "  J9  Udon Ya  [Noodles]  Osaka");
    }

    #[test]
    fn shop_line_adds_catch_and_access_detail() {
        let mut shop = Shop::new("J7", "Gyoza Bar", "Kyoto", "", CouponUrls::default());
        shop.catch = Some("Crispy gyoza".to_string());
        shop.access = Some("2 min from Kyoto station".to_string());
        assert_eq!(
            format_shop_line(&shop, true),
            "★ J7  Gyoza Bar  Kyoto\n    Crispy gyoza  /  2 min from Kyoto station"
        );

        shop.catch = None;
        assert_eq!(format_shop_line(&shop, false), "  J7  Gyoza Bar  Kyoto\n    2 min from Kyoto station");
    }
}
