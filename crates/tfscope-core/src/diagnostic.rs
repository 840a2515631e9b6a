//! Diagnostic block decoder.
//!
//! Turns the lines collected between a `╷` and `╵` marker into a
//! [`Diagnostic`]. The grammar of what the tool puts inside a block is not
//! closed (provider crashes, plugin errors and registry failures all look
//! different), so the decoder never drops a block that has any text in it:
//! without an `Error:`/`Warning:` line the first non-empty line becomes the
//! summary and the severity defaults to error.

use regex::Regex;
use std::sync::LazyLock;

use crate::ansi::strip_ansi_codes;
use crate::types::{Diagnostic, DiagnosticLine, Severity};

/// `Error: <summary>` / `Warning: <summary>` at the start of a line
static SEVERITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Error|Warning):\s*(.+)$").expect("Severity regex pattern is valid")
});

/// Source-location line, e.g. `on main.tf line 10, in resource "x" "y":`
static LOCATION_MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*on \S+ line \d+").expect("Location marker regex pattern is valid")
});

/// Caret/tilde rows pointing at a column in the quoted source
static UNDERLINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[\^~]+\s*$").expect("Underline regex pattern is valid"));

/// Whether a detail line names a source location (rendered bold)
pub fn is_location_marker(line: &str) -> bool {
    LOCATION_MARKER_PATTERN.is_match(&strip_ansi_codes(line))
}

/// Whether a detail line is a caret/tilde underline row
pub fn is_underline_marker(line: &str) -> bool {
    UNDERLINE_PATTERN.is_match(&strip_ansi_codes(line))
}

/// Decode a buffered diagnostic block.
///
/// `lines` are the block's lines with the `│` prefix already removed and
/// colour codes sanitized. Returns `None` only when every line is blank.
pub fn decode_diagnostic_block(lines: &[String]) -> Option<Diagnostic> {
    let first = lines.iter().position(|l| !is_blank(l))?;
    let body = &lines[first..];

    let header = body.iter().enumerate().find_map(|(idx, line)| {
        let plain = strip_ansi_codes(line);
        let caps = SEVERITY_PATTERN.captures(plain.trim())?;
        let severity = if &caps[1] == "Warning" {
            Severity::Warning
        } else {
            Severity::Error
        };
        Some((idx, severity, caps[2].trim_end().to_string()))
    });

    let (summary_idx, severity, summary) = match header {
        Some(found) => found,
        // Unrecognized shape: surface the first line as an error
        None => (0, Severity::Error, strip_ansi_codes(&body[0]).trim().to_string()),
    };

    let mut diagnostic = Diagnostic::new(severity, summary);
    diagnostic.detail = body
        .iter()
        .enumerate()
        .filter(|(idx, line)| *idx != summary_idx && !is_blank(line))
        .map(|(_, line)| {
            let content = line.trim_end().to_string();
            let is_marker = is_location_marker(&content);
            DiagnosticLine::new(content, is_marker)
        })
        .collect();

    Some(diagnostic)
}

fn is_blank(line: &str) -> bool {
    strip_ansi_codes(line).trim().is_empty()
}
