//! Search bar component renderer.

use crate::ui::helpers::{display_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line bordered input box starting at `row`.
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Keyword: ramen_  │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// Returns the row after the box.
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    frame.position_cursor(row, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.print(&border);
    frame.print(format!("┌{}┐", "─".repeat(inner_width)));
    frame.print(Theme::reset());

    let search_text = truncate(&format!(" {}: {}_", search.label, search.query), inner_width);
    let padding = inner_width.saturating_sub(display_width(&search_text));

    frame.position_cursor(row + 1, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.print(&border);
    frame.print("│");
    frame.print(Theme::fg(&theme.colors.text_normal));
    frame.print(&search_text);
    frame.pad(padding);
    frame.print(&border);
    frame.print("│");
    frame.print(Theme::reset());

    frame.position_cursor(row + 2, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.print(&border);
    frame.print(format!("└{}┘", "─".repeat(inner_width)));
    frame.print(Theme::reset());

    row + 3
}
