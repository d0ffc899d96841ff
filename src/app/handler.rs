//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place application state changes. It never
//! performs I/O: fetches, favorites mutations and browser launches come back
//! as [`Action`]s for the runtime. Each call returns whether the screen needs
//! a redraw along with the actions.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `SwitchView`
//! - **Input**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `ExitSearch`
//! - **Commands**: `Refresh`, `ToggleFavorite`, `OpenCoupon`, `Quit`
//! - **System**: `Resize`, `PageLoaded`, `FavoritesLoaded`, `Notice`

use crate::app::modes::{InputMode, SearchFocus, ViewMode};
use crate::app::pagination::{apply_page, PageOutcome};
use crate::app::{Action, AppState};
use crate::domain::{FetchError, Shop};
use crate::storage::FavoriteRecord;

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down one row.
    KeyDown,
    /// Moves the selection up one row.
    KeyUp,

    /// Opens the search bar (keyword in Results, filter in Favorites).
    SearchMode,
    /// Appends a character to the search bar.
    Char(char),
    /// Removes the last character from the search bar.
    Backspace,
    /// Enter in the search bar: run the search or apply the filter.
    SubmitSearch,
    /// Esc: closes the search bar, discarding keyword edits or the filter.
    ExitSearch,

    /// Reloads the first page for the current keyword.
    Refresh,
    /// Toggles the selected shop in favorites (removes in the Favorites view).
    ToggleFavorite,
    /// Opens the selected shop's coupon page.
    OpenCoupon,
    /// Tab: switches between Results and Favorites.
    SwitchView,
    Quit,

    /// The terminal was resized.
    Resize { rows: usize, cols: usize },

    /// A fetch finished.
    PageLoaded {
        generation: u64,
        append: bool,
        result: Result<Vec<Shop>, FetchError>,
    },

    /// Fresh snapshot of the favorites store, newest first.
    FavoritesLoaded(Vec<FavoriteRecord>),

    /// A message for the status line.
    Notice(String),
}

/// Processes `event`, mutating `state`.
///
/// Returns `(should_render, actions)`.
///
/// # Example
///
/// ```rust
/// use gourmet::app::{handle_event, Action, AppState, Event};
/// use gourmet::ui::Theme;
///
/// let mut state = AppState::new("ramen", Theme::default());
/// let (_, actions) = handle_event(&mut state, Event::Refresh);
/// assert!(matches!(actions[0], Action::StartFetch(_)));
/// ```
pub fn handle_event(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(&event)).entered();

    if is_key_event(&event) {
        state.notice = None;
    }

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            (true, prefetch(state).into_iter().collect())
        }
        Event::KeyUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::SearchMode => {
            if state.view_mode == ViewMode::Results {
                state.keyword_input = state.query.keyword().to_string();
            }
            tracing::debug!(view = ?state.view_mode, "entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return (false, vec![]);
            }
            match state.view_mode {
                ViewMode::Results => state.keyword_input.push(c),
                ViewMode::Favorites => {
                    state.favorites_filter.push(c);
                    state.apply_favorites_filter();
                }
            }
            (true, vec![])
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return (false, vec![]);
            }
            match state.view_mode {
                ViewMode::Results => {
                    state.keyword_input.pop();
                }
                ViewMode::Favorites => {
                    state.favorites_filter.pop();
                    state.apply_favorites_filter();
                }
            }
            (true, vec![])
        }
        Event::SubmitSearch => submit_search(state),
        Event::ExitSearch => {
            if state.input_mode == InputMode::Normal {
                return (false, vec![]);
            }
            state.input_mode = InputMode::Normal;
            match state.view_mode {
                ViewMode::Results => {
                    state.keyword_input = state.query.keyword().to_string();
                }
                ViewMode::Favorites => {
                    state.favorites_filter.clear();
                    state.apply_favorites_filter();
                }
            }
            (true, vec![])
        }
        Event::Refresh => {
            if state.view_mode != ViewMode::Results {
                return (false, vec![]);
            }
            match state.query.begin(state.results.shops.len(), false) {
                Some(request) => {
                    tracing::debug!(keyword = %request.query.keyword, "refreshing results");
                    (true, vec![Action::StartFetch(request)])
                }
                None => (false, vec![]),
            }
        }
        Event::ToggleFavorite => match state.view_mode {
            ViewMode::Results => state.selected_shop().map_or((false, vec![]), |shop| {
                tracing::debug!(shop_id = %shop.id, "toggling favorite");
                (false, vec![Action::ToggleFavorite(shop.clone())])
            }),
            ViewMode::Favorites => state.selected_favorite().map_or((false, vec![]), |record| {
                tracing::debug!(shop_id = %record.id, "removing favorite");
                (false, vec![Action::RemoveFavorite { id: record.id.clone() }])
            }),
        },
        Event::OpenCoupon => open_coupon(state),
        Event::SwitchView => {
            state.view_mode = state.view_mode.toggled();
            state.input_mode = match (state.view_mode, state.favorites_filter.is_empty()) {
                (ViewMode::Favorites, false) => InputMode::Search(SearchFocus::Navigating),
                _ => InputMode::Normal,
            };
            state.keyword_input = state.query.keyword().to_string();
            (true, vec![])
        }
        Event::Quit => (false, vec![Action::Quit]),
        Event::Resize { rows, cols } => {
            state.rows = rows;
            state.cols = cols;
            (true, prefetch(state).into_iter().collect())
        }
        Event::PageLoaded {
            generation,
            append,
            result,
        } => {
            let outcome = apply_page(&mut state.query, &mut state.results, generation, append, result);
            match outcome {
                PageOutcome::Stale => return (false, vec![]),
                PageOutcome::Replaced { .. } | PageOutcome::Failed(_) => state.selected_index = 0,
                PageOutcome::Appended { .. } | PageOutcome::EndOfResults => state.clamp_selection(),
            }
            (true, prefetch(state).into_iter().collect())
        }
        Event::FavoritesLoaded(records) => {
            state.set_favorites(records);
            (true, vec![])
        }
        Event::Notice(message) => {
            state.notice = Some(message);
            (true, vec![])
        }
    }
}

fn submit_search(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.input_mode != InputMode::Search(SearchFocus::Typing) {
        return (false, vec![]);
    }

    match state.view_mode {
        ViewMode::Results => {
            state.input_mode = InputMode::Normal;
            let keyword = state.keyword_input.clone();
            let (superseded, request) = state.query.restart(keyword);
            state.keyword_input = state.query.keyword().to_string();
            state.selected_index = 0;

            tracing::debug!(keyword = %request.query.keyword, generation = request.generation, "new search");

            let mut actions = Vec::with_capacity(2);
            if let Some(generation) = superseded {
                actions.push(Action::CancelFetch { generation });
            }
            actions.push(Action::StartFetch(request));
            (true, actions)
        }
        ViewMode::Favorites => {
            state.input_mode = if state.favorites_filter.is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            (true, vec![])
        }
    }
}

fn open_coupon(state: &mut AppState) -> (bool, Vec<Action>) {
    let target = match state.view_mode {
        ViewMode::Results => state
            .selected_shop()
            .map(|shop| (shop.name.clone(), shop.coupon_url().map(str::to_string))),
        ViewMode::Favorites => state
            .selected_favorite()
            .map(|record| (record.name.clone(), record.coupon().map(str::to_string))),
    };

    match target {
        Some((_, Some(url))) => (false, vec![Action::OpenCoupon { url }]),
        Some((name, None)) => {
            state.notice = Some(format!("{name} has no coupon page"));
            (true, vec![])
        }
        None => (false, vec![]),
    }
}

/// Starts an append when the last visible result is near the end of the list.
fn prefetch(state: &mut AppState) -> Option<Action> {
    if state.view_mode != ViewMode::Results {
        return None;
    }

    let last_visible = state.last_visible_result()?;
    let loaded = state.results.shops.len();
    if !state.query.should_prefetch(loaded, last_visible) {
        return None;
    }

    let request = state.query.begin(loaded, true)?;
    tracing::debug!(start = request.query.start, last_visible, "prefetching next page");
    Some(Action::StartFetch(request))
}

const fn is_key_event(event: &Event) -> bool {
    !matches!(
        event,
        Event::Resize { .. } | Event::PageLoaded { .. } | Event::FavoritesLoaded(_) | Event::Notice(_)
    )
}

/// Span label; avoids recording whole result pages in traces.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::SearchMode => "search_mode",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::SubmitSearch => "submit_search",
        Event::ExitSearch => "exit_search",
        Event::Refresh => "refresh",
        Event::ToggleFavorite => "toggle_favorite",
        Event::OpenCoupon => "open_coupon",
        Event::SwitchView => "switch_view",
        Event::Quit => "quit",
        Event::Resize { .. } => "resize",
        Event::PageLoaded { .. } => "page_loaded",
        Event::FavoritesLoaded(_) => "favorites_loaded",
        Event::Notice(_) => "notice",
    }
}
