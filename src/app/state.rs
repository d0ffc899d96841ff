//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for transient UI state: the
//! search query and loaded results, a snapshot of the favorites list for the
//! Favorites view, selection, modes and the viewport size. It never owns the
//! favorites store; rendering takes the store as a read-only lookup so the
//! favorite marker is always computed from persisted data.

use super::modes::{InputMode, SearchFocus, ViewMode};
use super::pagination::{ResultList, SearchQuery};
use crate::domain::{time_ago, Shop};
use crate::storage::{FavoriteRecord, FavoritesStore};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel, CHROME_ROWS, MARKER_WIDTH,
    NAME_COLUMN_WIDTH, SEARCH_BAR_ROWS, TAG_COLUMN_WIDTH,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Terminal size assumed until the first resize event.
const DEFAULT_ROWS: usize = 24;
const DEFAULT_COLS: usize = 80;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Keyword and fetch gating flags.
    pub query: SearchQuery,

    /// Loaded shops and the fetch status line.
    pub results: ResultList,

    /// Selected row in `results.shops`.
    pub selected_index: usize,

    /// Keyword being edited in the search bar; committed on submit.
    pub keyword_input: String,

    /// Snapshot of the favorites store, newest first.
    ///
    /// Refreshed by the runtime after every store mutation.
    pub favorites: Vec<FavoriteRecord>,

    /// Favorites matching `favorites_filter`.
    pub filtered_favorites: Vec<FavoriteRecord>,

    /// Selected row in `filtered_favorites`.
    pub favorites_index: usize,

    /// Fuzzy filter for the Favorites view.
    pub favorites_filter: String,

    pub input_mode: InputMode,

    pub view_mode: ViewMode,

    /// Transient message (store errors, missing coupon). Cleared on the next
    /// key press.
    pub notice: Option<String>,

    /// Viewport height in rows.
    pub rows: usize,

    /// Viewport width in columns.
    pub cols: usize,

    pub theme: Theme,
}

impl AppState {
    /// Creates the initial state for `keyword`, showing the Results view.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gourmet::app::AppState;
    /// use gourmet::ui::Theme;
    ///
    /// let state = AppState::new("ramen", Theme::default());
    /// assert_eq!(state.query.keyword(), "ramen");
    /// assert!(state.results.shops.is_empty());
    /// ```
    #[must_use]
    pub fn new(keyword: impl Into<String>, theme: Theme) -> Self {
        let keyword = keyword.into();
        Self {
            query: SearchQuery::new(keyword.clone()),
            results: ResultList::default(),
            selected_index: 0,
            keyword_input: keyword,
            favorites: vec![],
            filtered_favorites: vec![],
            favorites_index: 0,
            favorites_filter: String::new(),
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Results,
            notice: None,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            theme,
        }
    }

    /// Moves the selection down one row.
    ///
    /// Results stop at the last loaded row (more rows arrive by prefetch);
    /// favorites wrap to the top.
    pub fn move_selection_down(&mut self) {
        match self.view_mode {
            ViewMode::Results => {
                if self.selected_index + 1 < self.results.shops.len() {
                    self.selected_index += 1;
                }
            }
            ViewMode::Favorites => {
                if !self.filtered_favorites.is_empty() {
                    self.favorites_index = (self.favorites_index + 1) % self.filtered_favorites.len();
                }
            }
        }
    }

    /// Moves the selection up one row. Favorites wrap to the bottom.
    pub fn move_selection_up(&mut self) {
        match self.view_mode {
            ViewMode::Results => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            ViewMode::Favorites => {
                if self.filtered_favorites.is_empty() {
                    return;
                }
                if self.favorites_index == 0 {
                    self.favorites_index = self.filtered_favorites.len() - 1;
                } else {
                    self.favorites_index -= 1;
                }
            }
        }
    }

    #[must_use]
    pub fn selected_shop(&self) -> Option<&Shop> {
        self.results.shops.get(self.selected_index)
    }

    #[must_use]
    pub fn selected_favorite(&self) -> Option<&FavoriteRecord> {
        self.filtered_favorites.get(self.favorites_index)
    }

    /// Keeps the results selection inside the loaded list.
    pub fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.results.shops.len().saturating_sub(1));
    }

    /// Replaces the favorites snapshot and re-applies the filter.
    pub fn set_favorites(&mut self, favorites: Vec<FavoriteRecord>) {
        self.favorites = favorites;
        self.apply_favorites_filter();
    }

    /// Filters the favorites snapshot by the fuzzy filter.
    ///
    /// Every whitespace-separated token must fuzzy-match the lowercased shop
    /// name. The selection is clamped to the filtered list.
    pub fn apply_favorites_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_favorites_filter",
            total = self.favorites.len(),
            filter_len = self.favorites_filter.chars().count()
        )
        .entered();

        let tokens: Vec<String> = self
            .favorites_filter
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        self.filtered_favorites = if tokens.is_empty() {
            self.favorites.clone()
        } else {
            let matcher = SkimMatcherV2::default();
            self.favorites
                .iter()
                .filter(|record| {
                    let name_lower = record.name.to_lowercase();
                    tokens.iter().all(|token| matcher.fuzzy_match(&name_lower, token).is_some())
                })
                .cloned()
                .collect()
        };

        self.favorites_index = self
            .favorites_index
            .min(self.filtered_favorites.len().saturating_sub(1));

        tracing::debug!(filtered = self.filtered_favorites.len(), "favorites filter applied");
    }

    /// Rows available for the table body.
    #[must_use]
    pub fn available_rows(&self) -> usize {
        let chrome = if self.search_bar_visible() {
            CHROME_ROWS + SEARCH_BAR_ROWS
        } else {
            CHROME_ROWS
        };
        self.rows.saturating_sub(chrome).max(1)
    }

    fn search_bar_visible(&self) -> bool {
        match (self.input_mode, self.view_mode) {
            (InputMode::Search(SearchFocus::Typing), _) => true,
            (InputMode::Search(SearchFocus::Navigating), ViewMode::Favorites) => true,
            _ => false,
        }
    }

    /// The window of rows shown for a list of `len` with `selected` chosen.
    ///
    /// The selection is kept near the middle of the window; near either end
    /// the window is pinned so it stays full. Returns `start..end`.
    #[must_use]
    pub fn visible_range(&self, len: usize, selected: usize) -> std::ops::Range<usize> {
        let available = self.available_rows();

        let mut start = selected.saturating_sub(available / 2);
        let end = (start + available).min(len);

        if end - start.min(end) < available && len >= available {
            start = end.saturating_sub(available);
        }

        start.min(end)..end
    }

    /// Index of the last rendered row of the results list, if any.
    #[must_use]
    pub fn last_visible_result(&self) -> Option<usize> {
        let range = self.visible_range(self.results.shops.len(), self.selected_index);
        range.end.checked_sub(1)
    }

    /// Status line text: a transient notice wins over the fetch status.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.notice.as_deref().or(self.results.status.as_deref())
    }

    /// Computes the view model for the current viewport.
    ///
    /// `favorites` answers the favorite marker for every visible row.
    #[must_use]
    pub fn compute_viewmodel(&self, favorites: &dyn FavoritesStore) -> UIViewModel {
        let (display_items, selected_index, empty_state, tag_title) = match self.view_mode {
            ViewMode::Results => {
                let range = self.visible_range(self.results.shops.len(), self.selected_index);
                let items = self.results.shops[range.clone()]
                    .iter()
                    .enumerate()
                    .map(|(offset, shop)| {
                        let is_selected = range.start + offset == self.selected_index;
                        self.shop_item(shop, is_selected, favorites)
                    })
                    .collect::<Vec<_>>();
                let empty = items.is_empty().then(|| self.results_empty_state());
                (items, self.selected_index.saturating_sub(range.start), empty, "GENRE")
            }
            ViewMode::Favorites => {
                let range = self.visible_range(self.filtered_favorites.len(), self.favorites_index);
                let matcher = (!self.favorites_filter.is_empty()).then(SkimMatcherV2::default);
                let items = self.filtered_favorites[range.clone()]
                    .iter()
                    .enumerate()
                    .map(|(offset, record)| {
                        let is_selected = range.start + offset == self.favorites_index;
                        self.favorite_item(record, is_selected, favorites, matcher.as_ref())
                    })
                    .collect::<Vec<_>>();
                let empty = items.is_empty().then(|| self.favorites_empty_state());
                (items, self.favorites_index.saturating_sub(range.start), empty, "ADDED")
            }
        };

        UIViewModel {
            display_items,
            selected_index,
            header: self.compute_header(),
            tag_title: tag_title.to_string(),
            footer: self.compute_footer(),
            empty_state,
            search_bar: self.compute_search_bar(),
            status: self.status().map(str::to_string),
        }
    }

    fn address_width(&self) -> usize {
        self.cols
            .saturating_sub(MARKER_WIDTH + NAME_COLUMN_WIDTH + 1 + TAG_COLUMN_WIDTH + 1)
    }

    fn shop_item(&self, shop: &Shop, is_selected: bool, favorites: &dyn FavoritesStore) -> DisplayItem {
        DisplayItem {
            name: truncate(&shop.name, NAME_COLUMN_WIDTH),
            tag: truncate(shop.genre.as_deref().unwrap_or_default(), TAG_COLUMN_WIDTH),
            address: truncate(&shop.address, self.address_width()),
            is_selected,
            is_favorite: favorites.is_favorite(&shop.id),
            highlight_ranges: vec![],
        }
    }

    fn favorite_item(
        &self,
        record: &FavoriteRecord,
        is_selected: bool,
        favorites: &dyn FavoritesStore,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&record.name, m));

        DisplayItem {
            name: truncate(&record.name, NAME_COLUMN_WIDTH),
            tag: truncate(&time_ago(record.created_at), TAG_COLUMN_WIDTH),
            address: truncate(&record.address, self.address_width()),
            is_selected,
            is_favorite: favorites.is_favorite(&record.id),
            highlight_ranges,
        }
    }

    /// Coalesces fuzzy match indices into `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.favorites_filter) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Results => {
                let subject = if self.query.keyword().is_empty() {
                    "All shops".to_string()
                } else {
                    format!("\"{}\"", self.query.keyword())
                };
                let suffix = if self.query.in_flight() {
                    ", loading..."
                } else if self.query.end_of_results() && !self.results.shops.is_empty() {
                    ", all loaded"
                } else {
                    ""
                };
                format!(" {subject} ({} shops{suffix}) ", self.results.shops.len())
            }
            ViewMode::Favorites => format!(" Favorites ({}) ", self.filtered_favorites.len()),
        };

        HeaderInfo { title }
    }

    fn results_empty_state(&self) -> EmptyState {
        let (message, subtitle) = if self.query.in_flight() {
            ("Searching...", "Fetching the first page")
        } else if self.results.status.is_some() {
            ("No shops found", "Press r to retry or / to change the keyword")
        } else {
            ("No shops found", "Press / to search")
        };

        EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn favorites_empty_state(&self) -> EmptyState {
        let (message, subtitle) = if self.favorites.is_empty() {
            ("No favorites yet", "Press f on a shop to save it")
        } else {
            ("No favorites match", "Esc clears the filter")
        };

        EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view_mode) {
            (InputMode::Search(SearchFocus::Typing), ViewMode::Results) => {
                "Enter: search  Esc: cancel  Type a keyword"
            }
            (InputMode::Search(SearchFocus::Typing), ViewMode::Favorites) => {
                "Enter: apply  Esc: clear filter  Type to filter"
            }
            (InputMode::Search(SearchFocus::Navigating), ViewMode::Favorites) => {
                "j/k: navigate  /: edit filter  f: remove  Enter: coupon  Esc: clear filter"
            }
            (_, ViewMode::Results) => {
                "j/k: navigate  /: search  r: refresh  f: favorite  Enter: coupon  Tab: favorites  q: quit"
            }
            (InputMode::Normal, ViewMode::Favorites) => {
                "j/k: navigate  /: filter  f: remove  Enter: coupon  Tab: results  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if !self.search_bar_visible() {
            return None;
        }

        Some(match self.view_mode {
            ViewMode::Results => SearchBarInfo {
                label: "Keyword".to_string(),
                query: self.keyword_input.clone(),
            },
            ViewMode::Favorites => SearchBarInfo {
                label: "Filter".to_string(),
                query: self.favorites_filter.clone(),
            },
        })
    }
}
