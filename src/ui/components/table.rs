//! Table component renderer.
//!
//! Four columns: favorite marker, NAME, a short tag (genre or when a favorite
//! was added) and ADDRESS filling the rest of the line.

use crate::ui::helpers::{self, display_width, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, MARKER_WIDTH, NAME_COLUMN_WIDTH, TAG_COLUMN_WIDTH};

/// Renders the bold column headers at `row`.
pub fn render_table_headers(frame: &mut Frame, row: usize, tag_title: &str, theme: &Theme) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::bold());
    frame.print(Theme::fg(&theme.colors.header_fg));
    frame.pad(MARKER_WIDTH);
    frame.print(format!(
        "{:<name$} {:<tag$} ADDRESS",
        "NAME",
        tag_title,
        name = NAME_COLUMN_WIDTH,
        tag = TAG_COLUMN_WIDTH
    ));
    frame.print(Theme::reset());
    row + 1
}

/// Renders `items` one per row starting at `row`; returns the next free row.
pub fn render_table_rows(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(frame, current_row, item, theme, cols);
    }
    current_row
}

/// The row is padded to the full width so the selection background spans it.
fn render_table_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    frame.position_cursor(row, 1);
    if item.is_selected {
        frame.print(Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_favorite {
        frame.print(Theme::fg(&theme.colors.favorite_fg));
        frame.print("★ ");
    } else {
        frame.pad(MARKER_WIDTH);
    }
    frame.print(Theme::fg(base_fg));

    helpers::render_highlighted_text(frame, &item.name, &item.highlight_ranges, theme, item.is_selected);
    frame.pad(NAME_COLUMN_WIDTH.saturating_sub(display_width(&item.name)) + 1);

    if !item.is_selected {
        frame.print(Theme::fg(&theme.colors.text_dim));
    }
    frame.print(&item.tag);
    frame.pad(TAG_COLUMN_WIDTH.saturating_sub(display_width(&item.tag)) + 1);

    frame.print(&item.address);

    let line_len = MARKER_WIDTH + NAME_COLUMN_WIDTH + 1 + TAG_COLUMN_WIDTH + 1 + display_width(&item.address);
    frame.pad(cols.saturating_sub(line_len));

    frame.print(Theme::reset());
    row + 1
}
