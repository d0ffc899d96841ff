//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI string
//! ```
//!
//! - [`viewmodel`]: display-ready types and layout constants
//! - [`renderer`]: entry point
//! - [`components`]: header, search bar, table, empty state, footer
//! - [`helpers`]: frame buffer, truncation, match highlighting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_frame};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
