//! Top-level rendering coordinator.
//!
//! ```text
//! AppState + FavoritesStore → compute_viewmodel → UIViewModel → render_frame → ANSI string
//! ```

use crate::app::AppState;
use crate::storage::FavoritesStore;
use crate::ui::components;
use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders the current state to an ANSI string sized to the state's viewport.
///
/// Favorite markers are looked up in `favorites` while building the view
/// model, so the output always reflects the store.
#[must_use]
pub fn render(state: &AppState, favorites: &dyn FavoritesStore) -> String {
    let _span = tracing::trace_span!("render", rows = state.rows, cols = state.cols).entered();

    let viewmodel = state.compute_viewmodel(favorites);
    render_frame(&viewmodel, &state.theme, state.rows, state.cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut frame = Frame::new();
    frame.print(CLEAR_SCREEN);
    components::render_layout(&mut frame, vm, theme, cols, rows);
    frame.into_string()
}
