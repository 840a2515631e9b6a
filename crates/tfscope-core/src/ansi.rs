//! ANSI escape code handling utilities
//!
//! Two modes are provided:
//! - [`strip_ansi_codes`] removes every escape sequence, used before any
//!   structural matching so colour codes never mask a marker.
//! - [`sanitize_diagnostic_ansi`] drops colours and resets but keeps bold and
//!   underline, so emphasis the tool itself applied inside a diagnostic (for
//!   example underlining the offending token) survives into the model.
//!
//! [`styled_segments`] splits sanitized text back into plain runs for renderers
//! that do not interpret escape codes.

use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for escape sequences removed by a full strip.
///
/// Covers:
/// - CSI sequences: ESC [ params letter (colors, cursor, etc.)
/// - OSC sequences: ESC ] ... BEL or ST (hyperlinks, titles)
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]               # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// SGR (Select Graphic Rendition) sequences only, capturing the parameter list
static SGR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[([0-9;]*)m").expect("SGR regex pattern is valid"));

const SGR_BOLD: u16 = 1;
const SGR_UNDERLINE: u16 = 4;

/// Strip all ANSI escape sequences from a string.
///
/// # Examples
///
/// ```
/// use tfscope_core::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mred text\x1b[0m"), "red text");
/// assert_eq!(strip_ansi_codes("│ Error: boom"), "│ Error: boom");
/// ```
pub fn strip_ansi_codes(input: &str) -> String {
    if !input.contains('\x1b') {
        return input.to_string();
    }
    ANSI_ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Remove colour and reset sequences while keeping bold and underline.
///
/// Compound sequences such as `ESC[1;31m` are rewritten to carry only their
/// bold/underline parameters (`ESC[1m`). Non-SGR escapes are stripped. The
/// output never contains a reset-all code, so callers must end the styled
/// region themselves.
///
/// ```
/// use tfscope_core::sanitize_diagnostic_ansi;
///
/// let out = sanitize_diagnostic_ansi("   3: provider \"aws\" \x1b[4m{\x1b[0m");
/// assert_eq!(out, "   3: provider \"aws\" \x1b[4m{");
/// ```
pub fn sanitize_diagnostic_ansi(input: &str) -> String {
    if !input.contains('\x1b') {
        return input.to_string();
    }

    let kept = SGR_PATTERN.replace_all(input, |caps: &regex::Captures| {
        let params = emphasis_params(&caps[1]);
        if params.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", params.join(";"))
        }
    });

    // Anything left that still starts with ESC is a non-SGR sequence
    ANSI_ESCAPE_PATTERN
        .replace_all(&kept, |caps: &regex::Captures| {
            let seq = &caps[0];
            if is_emphasis_sequence(seq) {
                seq.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Bold/underline parameters of an SGR parameter list, in order.
///
/// Extended colour parameters (`38;5;n`, `38;2;r;g;b` and the `48`/`58`
/// equivalents) are skipped as a unit so their operands are never mistaken for
/// attributes.
fn emphasis_params(params: &str) -> Vec<&'static str> {
    let values: Vec<u16> = params
        .split(';')
        .map(|p| p.parse::<u16>().unwrap_or(0))
        .collect();

    let mut out = Vec::new();
    let mut i = 0;
    while i < values.len() {
        match values[i] {
            38 | 48 | 58 => {
                i += match values.get(i + 1) {
                    Some(5) => 3,
                    Some(2) => 5,
                    _ => 1,
                };
                continue;
            }
            SGR_BOLD if !out.contains(&"1") => out.push("1"),
            SGR_UNDERLINE if !out.contains(&"4") => out.push("4"),
            _ => {}
        }
        i += 1;
    }
    out
}

fn is_emphasis_sequence(seq: &str) -> bool {
    matches!(seq, "\x1b[1m" | "\x1b[4m" | "\x1b[1;4m" | "\x1b[4;1m")
}

/// A run of text sharing one emphasis state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
}

/// Split text containing bold/underline SGR codes into styled runs.
///
/// Emphasis accumulates until the end of the input; every line starts plain.
/// Other escape sequences are dropped.
pub fn styled_segments(input: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut bold = false;
    let mut underline = false;
    let mut last = 0;

    for caps in ANSI_ESCAPE_PATTERN.captures_iter(input) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() > last {
            segments.push(StyledSegment {
                text: input[last..m.start()].to_string(),
                bold,
                underline,
            });
        }
        last = m.end();

        if let Some(sgr) = SGR_PATTERN.captures(m.as_str()) {
            for param in sgr[1].split(';') {
                match param.parse::<u16>().unwrap_or(0) {
                    0 => {
                        bold = false;
                        underline = false;
                    }
                    SGR_BOLD => bold = true,
                    SGR_UNDERLINE => underline = true,
                    22 => bold = false,
                    24 => underline = false,
                    _ => {}
                }
            }
        }
    }

    if last < input.len() {
        segments.push(StyledSegment {
            text: input[last..].to_string(),
            bold,
            underline,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_basic_colors() {
        assert_eq!(strip_ansi_codes("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_ansi_codes("\x1b[1;32mbold green\x1b[0m"), "bold green");
    }

    #[test]
    fn test_strip_cursor_sequences() {
        assert_eq!(strip_ansi_codes("\x1b[2K\x1b[1GPlan: 1 to add"), "Plan: 1 to add");
        assert_eq!(strip_ansi_codes("\x1b[?25lhidden"), "hidden");
    }

    #[test]
    fn test_strip_preserves_box_drawing() {
        let input = "╷ │ ╵ ├────";
        assert_eq!(strip_ansi_codes(input), input);
    }

    #[test]
    fn test_strip_osc_hyperlink() {
        let input = "\x1b]8;;https://example.com\x07link\x1b]8;;\x07";
        assert_eq!(strip_ansi_codes(input), "link");
    }

    #[test]
    fn test_sanitize_keeps_underline_drops_reset() {
        let input = "   3: provider \"aws\" \x1b[4m{\x1b[0m";
        let out = sanitize_diagnostic_ansi(input);
        assert!(out.contains("\x1b[4m"));
        assert!(!out.contains("\x1b[0m"));
    }

    #[test]
    fn test_sanitize_bare_reset_is_removed() {
        assert_eq!(sanitize_diagnostic_ansi("\x1b[0m"), "");
        assert_eq!(sanitize_diagnostic_ansi("\x1b[m"), "");
    }

    #[test]
    fn test_sanitize_compound_keeps_bold_only() {
        let out = sanitize_diagnostic_ansi("\x1b[1;31mError:\x1b[0m boom");
        assert_eq!(out, "\x1b[1mError: boom");
    }

    #[test]
    fn test_sanitize_drops_colors() {
        assert_eq!(sanitize_diagnostic_ansi("\x1b[31mred\x1b[39m"), "red");
    }

    #[test]
    fn test_sanitize_extended_color_operands_not_treated_as_attributes() {
        // 38;2;1;4;5 is an RGB colour whose components happen to be 1 and 4
        assert_eq!(sanitize_diagnostic_ansi("\x1b[38;2;1;4;5mx"), "x");
        assert_eq!(sanitize_diagnostic_ansi("\x1b[38;5;4mx"), "x");
        assert_eq!(sanitize_diagnostic_ansi("\x1b[48;5;1;4mx"), "\x1b[4mx");
    }

    #[test]
    fn test_sanitize_strips_non_sgr() {
        assert_eq!(sanitize_diagnostic_ansi("\x1b[2Ktext"), "text");
    }

    #[test]
    fn test_styled_segments_plain() {
        let segs = styled_segments("plain");
        assert_eq!(segs.len(), 1);
        assert!(!segs[0].bold);
        assert!(!segs[0].underline);
    }

    #[test]
    fn test_styled_segments_underline_region() {
        let segs = styled_segments("  3: provider \x1b[4m{\x1b[24m end");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].text, "  3: provider ");
        assert!(segs[1].underline);
        assert_eq!(segs[1].text, "{");
        assert!(!segs[2].underline);
    }

    #[test]
    fn test_styled_segments_emphasis_runs_to_end() {
        let segs = styled_segments("\x1b[1mbold to the end");
        assert_eq!(segs.len(), 1);
        assert!(segs[0].bold);
        assert_eq!(segs[0].text, "bold to the end");
    }
}
