//! Shared rendering utilities.
//!
//! All components draw into a [`Frame`], a string buffer of ANSI output that
//! the runtime writes to the terminal in one go. Text is measured in terminal
//! columns, so wide Japanese glyphs count twice and never overflow a row.

use crate::ui::theme::Theme;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Buffered ANSI output for one frame.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed `row`/`col`.
    pub fn position_cursor(&mut self, row: usize, col: usize) {
        let _ = write!(self.buf, "\u{1b}[{row};{col}H");
    }

    /// Appends text or an escape sequence.
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buf.extend(std::iter::repeat(' ').take(count));
    }

    /// Writes `text` centered in `cols`, padding both sides to fill the line.
    pub fn print_centered(&mut self, text: &str, cols: usize) {
        let text = truncate(text, cols);
        let len = display_width(&text);
        let left = cols.saturating_sub(len) / 2;

        self.pad(left);
        self.print(&text);
        self.pad(cols.saturating_sub(left + len));
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Terminal columns occupied by `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max` terminal columns, ending with "..." when cut.
///
/// A wide glyph that would straddle the limit is dropped whole, so the result
/// may be one column short of `max`.
///
/// # Examples
///
/// ```
/// use gourmet::ui::helpers::truncate;
///
/// assert_eq!(truncate("Ramen Taro", 20), "Ramen Taro");
/// assert_eq!(truncate("らーめん太郎本店", 9), "らーめ...");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return take_columns(text, max);
    }

    let mut out = take_columns(text, max - 3);
    out.push_str("...");
    out
}

fn take_columns(text: &str, max: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max
        })
        .collect()
}

/// Writes `text` with highlighted character ranges for fuzzy matches.
///
/// Highlighting is skipped on the selected row so it does not fight with the
/// selection background. Ranges past the end of `text` are ignored.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        frame.print(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.max(current_pos).min(chars.len());
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let normal: String = chars[current_pos..start].iter().collect();
        frame.print(&normal);

        frame.print(Theme::fg(&theme.colors.match_highlight_fg));
        frame.print(Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        frame.print(&highlighted);
        frame.print(Theme::reset());
        frame.print(Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    frame.print(&remaining);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_measures_columns() {
        assert_eq!(truncate("らーめん太郎本店", 16), "らーめん太郎本店");
        assert_eq!(truncate("らーめん太郎本店", 15), "らーめん太郎...");
        assert_eq!(truncate("らーめん太郎本店", 8), "らー...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("焼肉", 3), "焼");
    }

    #[test]
    fn wide_glyphs_count_two_columns() {
        assert_eq!(display_width("Ramen"), 5);
        assert_eq!(display_width("ラーメン"), 8);
        assert!(display_width(&truncate(&"焼肉".repeat(20), 30)) <= 30);
    }

    #[test]
    fn centered_text_fills_line() {
        let mut frame = Frame::new();
        frame.print_centered("abc", 9);
        assert_eq!(frame.as_str(), "   abc   ");
    }

    #[test]
    fn highlight_ignores_out_of_range() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "sushi", &[(0, 1), (7, 9)], &theme, false);
        let plain: String = strip_ansi(frame.as_str());
        assert_eq!(plain, "sushi");
    }

    #[test]
    fn selected_rows_are_not_highlighted() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "udon", &[(0, 2)], &theme, true);
        assert_eq!(frame.as_str(), "udon");
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, 'm' | 'H') => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }
}
