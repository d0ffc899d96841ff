//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; the favorite
//! marker in particular has already been looked up in the favorites store.

/// Width of the favorite marker column ("★ ").
pub const MARKER_WIDTH: usize = 2;

/// Width of the name column, in terminal columns.
pub const NAME_COLUMN_WIDTH: usize = 30;

/// Width of the genre / "added" column, in terminal columns.
pub const TAG_COLUMN_WIDTH: usize = 14;

/// Rows taken by everything except the table body: blank line, header,
/// border, column headers, status line, border and footer.
pub const CHROME_ROWS: usize = 7;

/// Extra rows taken by the open search bar.
pub const SEARCH_BAR_ROWS: usize = 3;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows in the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    /// Title of the tag column ("GENRE" or "ADDED").
    pub tag_title: String,

    pub footer: FooterInfo,

    /// Shown in place of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while the search bar is open.
    pub search_bar: Option<SearchBarInfo>,

    /// One-line status (fetch failure, favorites error).
    pub status: Option<String>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Shop name, truncated to the name column.
    pub name: String,

    /// Short secondary column: genre for results, "added 3d ago" for favorites.
    pub tag: String,

    /// Address, truncated from the right to the remaining width.
    pub address: String,

    pub is_selected: bool,

    /// Whether the shop is in the favorites store at render time.
    pub is_favorite: bool,

    /// Character ranges of the name to highlight for fuzzy matches.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Keybinding hints for the bottom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown when the list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Label before the query, e.g. "Keyword" or "Filter".
    pub label: String,
    pub query: String,
}
