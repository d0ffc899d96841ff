//! Footer and status line renderers.

use crate::ui::helpers::{display_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the dimmed, centered keybinding hints at `row`.
///
/// Hints wider than the terminal are cut so the layout never wraps.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::fg(&theme.colors.text_dim));
    frame.print_centered(&footer.keybindings, cols);
    frame.print(Theme::reset());
    row + 1
}

/// Renders the status line at `row`, or clears it when there is none.
pub fn render_status(frame: &mut Frame, row: usize, status: Option<&str>, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);

    match status {
        Some(text) => {
            let text = truncate(&format!(" {text}"), cols);
            let len = display_width(&text);
            frame.print(Theme::fg(&theme.colors.status_fg));
            frame.print(&text);
            frame.pad(cols.saturating_sub(len));
            frame.print(Theme::reset());
        }
        None => frame.pad(cols),
    }

    row + 1
}
