//! Input and view mode state types.
//!
//! Two views share the screen:
//! - **Results**: the paginated search results
//! - **Favorites**: the locally stored favorites
//!
//! and input is either **Normal** (navigation and commands) or **Search**.
//! In the Results view the search bar edits the keyword; in the Favorites
//! view it edits a fuzzy filter.

/// Focus within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go into the search bar.
    Typing,

    /// A favorites filter is applied and the list has focus again.
    Navigating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search(SearchFocus),
}

/// Which list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Paginated search results. Header shows the keyword and loaded count.
    Results,

    /// Stored favorites, newest first.
    Favorites,
}

impl ViewMode {
    /// The other view, for `Tab`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Results => Self::Favorites,
            Self::Favorites => Self::Results,
        }
    }
}
