//! Display-width aware line wrapping with hanging indentation.
//!
//! Widths are measured in terminal columns via `unicode-width`, so CJK and
//! other wide characters count as two. Wrapping happens at any character, not
//! at word boundaries: plan output is key/value diff text where preserving the
//! column layout matters more than typography.

use unicode_width::UnicodeWidthChar;

/// Split `text` into lines no wider than `max_width` columns.
///
/// The first line starts with the text itself; each continuation line is
/// prefixed with `hanging_indent` spaces. Escape sequences are carried along
/// with zero width. A `max_width` of zero returns the input unsplit and an
/// empty input yields a single empty line.
///
/// ```
/// use tfscope_core::wrap_text;
///
/// assert_eq!(wrap_text("1234567890", 8, 0), vec!["12345678", "90"]);
/// ```
pub fn wrap_text(text: &str, max_width: usize, hanging_indent: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    if max_width == 0 {
        return vec![text.to_string()];
    }

    // Keep at least one column for content on continuation lines
    let indent = hanging_indent.min(max_width.saturating_sub(1));
    let indent_str = " ".repeat(indent);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    // Width at which the current line holds no content of its own
    let mut line_start_width = 0;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            current.push(ch);
            for next in chars.by_ref() {
                current.push(next);
                if next != '[' && ('\x40'..='\x7e').contains(&next) {
                    break;
                }
            }
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if current_width + w > max_width && current_width > line_start_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(&indent_str);
            current_width = indent;
            line_start_width = indent;
        }
        current.push(ch);
        current_width += w;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Column at which wrapped continuation lines of a diff line should resume.
///
/// This is the line's leading space count, plus two when the content starts
/// with a change marker (`+`, `-`, `~`) so continuation text lines up with the
/// attribute name rather than the marker.
pub fn hanging_indent_for(line: &str) -> usize {
    let leading = line.chars().take_while(|c| *c == ' ').count();
    let trimmed = line.trim_start();
    if trimmed.starts_with(['+', '-', '~']) {
        leading + 2
    } else {
        leading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_basic() {
        let lines = wrap_text("This is a long line that needs wrapping", 10, 0);
        assert_eq!(lines, vec!["This is a ", "long line ", "that needs", " wrapping"]);
    }

    #[test]
    fn test_wrap_with_hanging_indent() {
        let lines = wrap_text("    Attribute = \"Long value that wraps\"", 20, 4);
        assert_eq!(
            lines,
            vec!["    Attribute = \"Lon", "    g value that wra", "    ps\""]
        );
    }

    #[test]
    fn test_wrap_exact_fit() {
        assert_eq!(wrap_text("12345", 5, 0), vec!["12345"]);
        assert_eq!(wrap_text("123456", 5, 0), vec!["12345", "6"]);
    }

    #[test]
    fn test_wrap_degenerate_inputs() {
        assert_eq!(wrap_text("", 10, 0), vec![""]);
        assert_eq!(wrap_text("unchanged", 0, 2), vec!["unchanged"]);
    }

    #[test]
    fn test_wrap_wide_characters_count_double() {
        // Each CJK character is two columns wide
        let lines = wrap_text("漢字漢字", 4, 0);
        assert_eq!(lines, vec!["漢字", "漢字"]);
    }

    #[test]
    fn test_wrap_wide_character_on_narrow_width_makes_progress() {
        let lines = wrap_text("漢字", 1, 0);
        assert_eq!(lines, vec!["漢", "字"]);
    }

    #[test]
    fn test_wrap_indent_clamped_below_width() {
        let lines = wrap_text("abcdefgh", 4, 10);
        assert_eq!(lines, vec!["abcd", "   e", "   f", "   g", "   h"]);
    }

    #[test]
    fn test_wrap_escape_sequences_have_no_width() {
        let lines = wrap_text("\x1b[4mabcd\x1b[24mef", 4, 0);
        assert_eq!(lines, vec!["\x1b[4mabcd\x1b[24m", "ef"]);
    }

    #[test]
    fn test_hanging_indent_for_plain_line() {
        assert_eq!(hanging_indent_for("    key = \"value\""), 4);
        assert_eq!(hanging_indent_for("no indent"), 0);
    }

    #[test]
    fn test_hanging_indent_for_change_markers() {
        assert_eq!(hanging_indent_for("      + ami = \"x\""), 8);
        assert_eq!(hanging_indent_for("  - tags = {}"), 4);
        assert_eq!(hanging_indent_for("~ id = \"a\" -> \"b\""), 2);
    }
}
