//! Empty state component renderer.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message at `row` and `row + 1`.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::fg(&theme.colors.empty_state_fg));
    frame.print_centered(&empty.message, cols);
    frame.print(Theme::reset());

    frame.position_cursor(row + 1, 1);
    frame.print(Theme::dim());
    frame.print(Theme::fg(&theme.colors.text_dim));
    frame.print_centered(&empty.subtitle, cols);
    frame.print(Theme::reset());

    row + 2
}
