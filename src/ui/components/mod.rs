//! Composable UI component renderers.
//!
//! - [`header`]: title bar
//! - [`footer`]: keybinding hints and status line
//! - [`search`]: keyword / filter input box
//! - [`table`]: shop list
//! - [`empty`]: message for an empty list
//!
//! [`render_layout`] stacks them:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, only while editing]
//! [Table Headers]
//! [Table Rows or Empty State]
//! [Status]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::{render_footer, render_status};
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::fg(color));
    frame.print("─".repeat(cols));
    frame.print(Theme::reset());
    row + 1
}

/// Renders a full screen for `vm` into `frame`.
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(frame, current_row, search, theme, cols);
    }
    current_row = render_table_headers(frame, current_row, &vm.tag_title, theme);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(frame, current_row + 1, empty, theme, cols);
    } else {
        render_table_rows(frame, current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    render_status(frame, status_row, vm.status.as_deref(), theme, cols);
    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}
