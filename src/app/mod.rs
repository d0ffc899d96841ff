//! Application layer coordinating state, events, and actions.
//!
//! The layer follows a unidirectional data flow:
//!
//! ```text
//! Key / Resize → Event → handle_event → AppState mutations → Actions → runtime
//!                  ↑                                                     │
//!                  └──── PageLoaded / FavoritesLoaded / Notice ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: the event state machine
//! - [`headless`]: page-by-page search for the CLI
//! - [`modes`]: input and view modes
//! - [`pagination`]: search query gating, page merging and prefetch policy
//! - [`state`]: state container and view model computation

pub mod actions;
pub mod handler;
pub mod headless;
pub mod modes;
pub mod pagination;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus, ViewMode};
pub use pagination::{apply_page, FetchRequest, PageOutcome, ResultList, SearchQuery};
pub use state::AppState;
