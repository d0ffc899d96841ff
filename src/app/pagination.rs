//! Incremental pagination over the shop search.
//!
//! [`SearchQuery`] owns the keyword and the two flags that gate fetching:
//! `in_flight` (one outstanding request at most) and `end_of_results` (the
//! last page came back empty or the last fetch failed). A request is started
//! with [`SearchQuery::begin`] and completed with [`apply_page`]; every
//! request carries a generation number so a completion that was superseded
//! by a newer search is recognised and dropped.
//!
//! ```text
//!            begin(..)                 apply_page(current generation)
//!   Idle ─────────────────▶ Fetching ──────────────────────────────▶ Idle
//!    ▲                          │
//!    └──── restart(keyword) ────┘  (old generation cancelled)
//! ```

use crate::api::PageQuery;
use crate::domain::{FetchError, Shop};

/// Load the next page when fewer than this many rows remain below the last
/// visible one.
pub const PREFETCH_THRESHOLD: usize = 10;

/// Status line shown after a failed fetch.
pub const NO_RESULTS_STATUS: &str = "no results found";

/// A fetch the runtime should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Tag used to match the completion to this request.
    pub generation: u64,

    /// `true` to append to the loaded list, `false` to replace it.
    pub append: bool,

    pub query: PageQuery,
}

/// Keyword plus fetch gating flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
    in_flight: bool,
    end_of_results: bool,
    generation: u64,
}

impl SearchQuery {
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub const fn end_of_results(&self) -> bool {
        self.end_of_results
    }

    /// Generation of the most recently started request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a fetch if the guards allow it.
    ///
    /// Returns `None` while a request is outstanding, or when appending after
    /// the end of results was reached. A fresh load starts at offset 1, an
    /// append at `loaded_len + 1`.
    pub fn begin(&mut self, loaded_len: usize, append: bool) -> Option<FetchRequest> {
        if self.in_flight {
            tracing::debug!(generation = self.generation, "fetch skipped, request in flight");
            return None;
        }
        if append && self.end_of_results {
            tracing::debug!("append skipped, end of results reached");
            return None;
        }

        let start = if append { loaded_len + 1 } else { 1 };
        Some(self.start_request(start, append))
    }

    /// Replaces the keyword and starts a fresh load unconditionally.
    ///
    /// If a request was outstanding its generation is returned so the runtime
    /// can cancel it; its completion will be ignored either way.
    pub fn restart(&mut self, keyword: impl Into<String>) -> (Option<u64>, FetchRequest) {
        let superseded = self.in_flight.then_some(self.generation);
        self.keyword = keyword.into();
        self.in_flight = false;

        if let Some(generation) = superseded {
            tracing::debug!(generation, "superseding outstanding request");
        }

        (superseded, self.start_request(1, false))
    }

    fn start_request(&mut self, start: usize, append: bool) -> FetchRequest {
        self.generation += 1;
        self.in_flight = true;

        FetchRequest {
            generation: self.generation,
            append,
            query: PageQuery::new(self.keyword.clone(), start),
        }
    }

    /// Whether scrolling has brought the viewport close enough to the end of
    /// the loaded list to fetch the next page.
    ///
    /// `last_visible_index` is the 0-based index of the last rendered row.
    #[must_use]
    pub fn should_prefetch(&self, loaded_len: usize, last_visible_index: usize) -> bool {
        loaded_len > 0
            && !self.in_flight
            && !self.end_of_results
            && loaded_len.saturating_sub(last_visible_index) < PREFETCH_THRESHOLD
    }
}

/// Loaded shops plus the status line derived from the last completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    pub shops: Vec<Shop>,
    pub status: Option<String>,
}

/// What a completion did to the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The list was replaced by a fresh page.
    Replaced { count: usize },

    /// A page was appended.
    Appended { count: usize },

    /// The page was empty; no more pages will be requested.
    EndOfResults,

    /// The fetch failed; the list was cleared.
    Failed(FetchError),

    /// The completion belonged to a superseded request and was dropped.
    Stale,
}

/// Applies a completed fetch to the result list.
///
/// Completions whose generation does not match the query's current
/// outstanding request leave everything untouched. Otherwise `in_flight` is
/// cleared on every path.
pub fn apply_page(
    query: &mut SearchQuery,
    list: &mut ResultList,
    generation: u64,
    append: bool,
    outcome: Result<Vec<Shop>, FetchError>,
) -> PageOutcome {
    if !query.in_flight || generation != query.generation {
        tracing::debug!(
            generation,
            current = query.generation,
            "dropping stale completion"
        );
        return PageOutcome::Stale;
    }

    query.in_flight = false;

    match outcome {
        Ok(shops) => {
            list.status = None;
            let count = shops.len();

            if append {
                list.shops.extend(shops);
            } else {
                list.shops = shops;
                query.end_of_results = false;
            }

            if count == 0 {
                query.end_of_results = true;
                tracing::debug!(loaded = list.shops.len(), "end of results");
                PageOutcome::EndOfResults
            } else if append {
                tracing::debug!(count, loaded = list.shops.len(), "page appended");
                PageOutcome::Appended { count }
            } else {
                tracing::debug!(count, "results replaced");
                PageOutcome::Replaced { count }
            }
        }
        Err(error) => {
            tracing::warn!(error = %error, "fetch failed, clearing results");
            list.shops.clear();
            list.status = Some(NO_RESULTS_STATUS.to_string());
            query.end_of_results = true;
            PageOutcome::Failed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CouponUrls;

    fn page(prefix: &str, n: usize) -> Vec<Shop> {
        (0..n)
            .map(|i| {
                Shop::new(
                    format!("{prefix}{i}"),
                    format!("Shop {i}"),
                    "Tokyo",
                    "",
                    CouponUrls::default(),
                )
            })
            .collect()
    }

    fn loaded(query: &mut SearchQuery, list: &mut ResultList, n: usize) {
        let request = query.begin(list.shops.len(), false).unwrap();
        apply_page(query, list, request.generation, false, Ok(page("J", n)));
    }

    #[test]
    fn fresh_load_starts_at_one() {
        let mut query = SearchQuery::new("ramen");
        let request = query.begin(40, false).unwrap();
        assert_eq!(request.query.start, 1);
        assert_eq!(request.query.keyword, "ramen");
        assert_eq!(request.query.count, 20);
        assert!(!request.append);
        assert!(query.in_flight());
    }

    #[test]
    fn append_starts_after_loaded_rows() {
        let mut query = SearchQuery::new("ramen");
        let request = query.begin(20, true).unwrap();
        assert_eq!(request.query.start, 21);
        assert!(request.append);
    }

    #[test]
    fn begin_while_in_flight_is_noop() {
        let mut query = SearchQuery::new("ramen");
        let mut list = ResultList::default();
        loaded(&mut query, &mut list, 20);

        let first = query.begin(20, true).unwrap();
        let before = (query.clone(), list.clone());

        assert_eq!(query.begin(20, true), None);
        assert_eq!(query.begin(20, false), None);
        assert_eq!((query.clone(), list.clone()), before);
        assert_eq!(query.generation(), first.generation);
    }

    #[test]
    fn search_returns_full_page() {
        let mut query = SearchQuery::new("ramen");
        let mut list = ResultList::default();
        let request = query.begin(0, false).unwrap();

        let outcome = apply_page(&mut query, &mut list, request.generation, false, Ok(page("J", 20)));

        assert_eq!(outcome, PageOutcome::Replaced { count: 20 });
        assert_eq!(list.shops.len(), 20);
        assert!(!query.end_of_results());
        assert!(!query.in_flight());
    }

    #[test]
    fn empty_append_marks_end_and_blocks_further_appends() {
        let mut query = SearchQuery::new("ramen");
        let mut list = ResultList::default();
        loaded(&mut query, &mut list, 20);

        let request = query.begin(list.shops.len(), true).unwrap();
        assert_eq!(request.query.start, 21);
        let outcome = apply_page(&mut query, &mut list, request.generation, true, Ok(vec![]));

        assert_eq!(outcome, PageOutcome::EndOfResults);
        assert_eq!(list.shops.len(), 20);
        assert!(query.end_of_results());
        assert_eq!(query.begin(20, true), None);

        let fresh = query.begin(20, false).unwrap();
        apply_page(&mut query, &mut list, fresh.generation, false, Ok(page("K", 5)));
        assert!(!query.end_of_results());
        assert_eq!(list.shops.len(), 5);
    }

    #[test]
    fn failure_clears_results_and_sets_status() {
        let mut query = SearchQuery::new("ramen");
        let mut list = ResultList::default();
        loaded(&mut query, &mut list, 20);

        let request = query.begin(20, true).unwrap();
        let outcome = apply_page(
            &mut query,
            &mut list,
            request.generation,
            true,
            Err(FetchError::Transport("connection refused".into())),
        );

        assert!(matches!(outcome, PageOutcome::Failed(_)));
        assert!(list.shops.is_empty());
        assert!(query.end_of_results());
        assert!(!query.in_flight());
        assert_eq!(list.status.as_deref(), Some(NO_RESULTS_STATUS));
    }

    #[test]
    fn success_clears_status() {
        let mut query = SearchQuery::new("");
        let mut list = ResultList {
            shops: vec![],
            status: Some(NO_RESULTS_STATUS.to_string()),
        };
        loaded(&mut query, &mut list, 3);
        assert_eq!(list.status, None);
    }

    #[test]
    fn restart_supersedes_outstanding_request() {
        let mut query = SearchQuery::new("ramen");
        let mut list = ResultList::default();
        let old = query.begin(0, false).unwrap();

        let (cancelled, fresh) = query.restart("sushi");
        assert_eq!(cancelled, Some(old.generation));
        assert_eq!(fresh.query.keyword, "sushi");
        assert_eq!(fresh.query.start, 1);
        assert!(fresh.generation > old.generation);

        let stale = apply_page(&mut query, &mut list, old.generation, false, Ok(page("R", 20)));
        assert_eq!(stale, PageOutcome::Stale);
        assert!(list.shops.is_empty());
        assert!(query.in_flight());

        apply_page(&mut query, &mut list, fresh.generation, false, Ok(page("S", 2)));
        assert_eq!(list.shops[0].id, "S0");
        assert!(!query.in_flight());
    }

    #[test]
    fn restart_when_idle_cancels_nothing() {
        let mut query = SearchQuery::new("");
        let (cancelled, request) = query.restart("udon");
        assert_eq!(cancelled, None);
        assert_eq!(request.generation, 1);
    }

    #[test]
    fn completion_after_idle_is_stale() {
        let mut query = SearchQuery::new("");
        let mut list = ResultList::default();
        loaded(&mut query, &mut list, 20);

        let generation = query.generation();
        let outcome = apply_page(&mut query, &mut list, generation, true, Ok(page("X", 20)));
        assert_eq!(outcome, PageOutcome::Stale);
        assert_eq!(list.shops.len(), 20);
    }

    #[test]
    fn prefetch_threshold() {
        let query = SearchQuery::new("");
        assert!(!query.should_prefetch(0, 0));
        assert!(!query.should_prefetch(20, 10));
        assert!(query.should_prefetch(20, 11));
        assert!(query.should_prefetch(20, 19));
    }

    #[test]
    fn prefetch_respects_guards() {
        let mut query = SearchQuery::new("");
        let mut list = ResultList::default();
        loaded(&mut query, &mut list, 20);
        query.begin(20, true).unwrap();
        assert!(!query.should_prefetch(20, 19));

        let generation = query.generation();
        apply_page(&mut query, &mut list, generation, true, Ok(vec![]));
        assert!(!query.should_prefetch(20, 19));
    }
}
