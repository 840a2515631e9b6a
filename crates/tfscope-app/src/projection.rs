//! Virtual line projection.
//!
//! Flattens the collapsible model (resources, diagnostics, logs) into the
//! flat, wrapped list of display lines the viewport scrolls over. The
//! projection is a pure function of its input and is always rebuilt
//! wholesale; nothing here is patched incrementally.

use tfscope_core::{hanging_indent_for, wrap_text, Diagnostic, ResourceChange};

/// Columns reserved on the left of every row for the cursor marker
pub const GUTTER: usize = 2;

/// Extra indent of attribute and detail rows under their header
pub const DETAIL_INDENT: usize = 2;

/// Width of the `▸ ✗ ` marker in front of a diagnostic header
pub const HEADER_MARKER_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ResourceHeader,
    ResourceAttribute,
    DiagnosticHeader,
    DiagnosticDetail,
    Log,
}

/// One display row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    /// Index into the resources
    pub resource: Option<usize>,
    /// Index into the diagnostics
    pub diagnostic: Option<usize>,
    /// Index of the attribute, detail line or log entry this row shows
    pub item: Option<usize>,
    /// Text for this row, already wrapped
    pub content: String,
    /// Second or later row of a wrapped entry
    pub continuation: bool,
}

impl Line {
    fn new(kind: LineKind, content: String) -> Self {
        Self {
            kind,
            resource: None,
            diagnostic: None,
            item: None,
            content,
            continuation: false,
        }
    }

    /// Resource or diagnostic header row, the rows that toggle
    pub fn is_header(&self) -> bool {
        matches!(self.kind, LineKind::ResourceHeader | LineKind::DiagnosticHeader)
    }
}

/// Everything the projection depends on
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput<'a> {
    pub resources: &'a [ResourceChange],
    pub diagnostics: &'a [Diagnostic],
    pub logs: &'a [String],
    /// Terminal width in columns, 0 when unknown
    pub width: usize,
    /// Log view instead of plan view
    pub show_logs: bool,
}

/// Flatten the model into display lines.
///
/// Log view: every log entry, then the diagnostics.
/// Plan view: the diagnostics, then the resources.
pub fn project(input: &ProjectionInput<'_>) -> Vec<Line> {
    let mut lines = Vec::new();

    if input.show_logs {
        let width = content_width(input.width, 0);
        for (i, log) in input.logs.iter().enumerate() {
            push_wrapped(&mut lines, LineKind::Log, log, width, 0, |line| {
                line.item = Some(i);
            });
        }
        project_diagnostics(&mut lines, input);
        return lines;
    }

    project_diagnostics(&mut lines, input);
    project_resources(&mut lines, input);
    lines
}

fn project_diagnostics(lines: &mut Vec<Line>, input: &ProjectionInput<'_>) {
    let header_width = content_width(input.width, HEADER_MARKER_WIDTH);
    let detail_width = content_width(input.width, DETAIL_INDENT);

    for (d, diag) in input.diagnostics.iter().enumerate() {
        let header = format!("{}{}", diag.severity.prefix(), diag.summary);
        push_wrapped(lines, LineKind::DiagnosticHeader, &header, header_width, 0, |line| {
            line.diagnostic = Some(d);
        });

        if !diag.expanded {
            continue;
        }
        for (j, detail) in diag.detail.iter().enumerate() {
            let indent = hanging_indent_for(&detail.content);
            push_wrapped(
                lines,
                LineKind::DiagnosticDetail,
                &detail.content,
                detail_width,
                indent,
                |line| {
                    line.diagnostic = Some(d);
                    line.item = Some(j);
                },
            );
        }
    }
}

fn project_resources(lines: &mut Vec<Line>, input: &ProjectionInput<'_>) {
    let attr_width = content_width(input.width, DETAIL_INDENT);

    for (r, rc) in input.resources.iter().enumerate() {
        let mut header = Line::new(LineKind::ResourceHeader, rc.address.clone());
        header.resource = Some(r);
        lines.push(header);

        if !rc.expanded {
            continue;
        }
        for (j, attr) in rc.attributes.iter().enumerate() {
            let indent = hanging_indent_for(attr);
            push_wrapped(lines, LineKind::ResourceAttribute, attr, attr_width, indent, |line| {
                line.resource = Some(r);
                line.item = Some(j);
            });
        }
    }
}

/// Wrapping width left after the gutter and `extra` columns; 0 disables wrapping
fn content_width(width: usize, extra: usize) -> usize {
    if width == 0 {
        0
    } else {
        width.saturating_sub(GUTTER + extra).max(1)
    }
}

fn push_wrapped(
    lines: &mut Vec<Line>,
    kind: LineKind,
    text: &str,
    width: usize,
    indent: usize,
    tag: impl Fn(&mut Line),
) {
    for (n, row) in wrap_text(text, width, indent).into_iter().enumerate() {
        let mut line = Line::new(kind, row);
        line.continuation = n > 0;
        tag(&mut line);
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfscope_core::{DiagnosticLine, Severity};

    fn resource(address: &str, attrs: &[&str], expanded: bool) -> ResourceChange {
        let mut rc = ResourceChange::new(address, "will be created");
        rc.attributes = attrs.iter().map(|s| s.to_string()).collect();
        rc.expanded = expanded;
        rc
    }

    fn diagnostic(summary: &str, detail: &[&str], expanded: bool) -> Diagnostic {
        let mut diag = Diagnostic::new(Severity::Error, summary);
        diag.detail = detail
            .iter()
            .map(|s| DiagnosticLine::new(*s, false))
            .collect();
        diag.expanded = expanded;
        diag
    }

    fn input<'a>(
        resources: &'a [ResourceChange],
        diagnostics: &'a [Diagnostic],
        logs: &'a [String],
        width: usize,
        show_logs: bool,
    ) -> ProjectionInput<'a> {
        ProjectionInput {
            resources,
            diagnostics,
            logs,
            width,
            show_logs,
        }
    }

    fn kinds(lines: &[Line]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_plan_view_collapsed() {
        let resources = vec![resource("a.b", &["  + x = 1"], false), resource("c.d", &[], false)];
        let lines = project(&input(&resources, &[], &[], 80, false));
        assert_eq!(kinds(&lines), vec![LineKind::ResourceHeader; 2]);
        assert_eq!(lines[0].resource, Some(0));
        assert_eq!(lines[1].resource, Some(1));
        assert_eq!(lines[1].content, "c.d");
    }

    #[test]
    fn test_plan_view_expanded_attributes() {
        let resources = vec![resource("a.b", &["  + x = 1", "  + y = 2"], true)];
        let lines = project(&input(&resources, &[], &[], 80, false));
        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::ResourceHeader,
                LineKind::ResourceAttribute,
                LineKind::ResourceAttribute
            ]
        );
        assert_eq!(lines[2].item, Some(1));
        assert_eq!(lines[2].resource, Some(0));
        assert_eq!(lines[2].content, "  + y = 2");
    }

    #[test]
    fn test_plan_view_diagnostics_first() {
        let resources = vec![resource("a.b", &[], false)];
        let diagnostics = vec![diagnostic("boom", &["detail"], true)];
        let lines = project(&input(&resources, &diagnostics, &[], 80, false));
        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::DiagnosticHeader,
                LineKind::DiagnosticDetail,
                LineKind::ResourceHeader
            ]
        );
        assert_eq!(lines[0].content, "Error: boom");
        assert_eq!(lines[1].diagnostic, Some(0));
    }

    #[test]
    fn test_log_view_logs_then_diagnostics() {
        let logs = vec!["Initializing...".to_string(), "done".to_string()];
        let diagnostics = vec![diagnostic("boom", &["d1"], false)];
        let resources = vec![resource("a.b", &[], true)];
        let lines = project(&input(&resources, &diagnostics, &logs, 80, true));
        assert_eq!(
            kinds(&lines),
            vec![LineKind::Log, LineKind::Log, LineKind::DiagnosticHeader]
        );
        assert_eq!(lines[1].item, Some(1));
    }

    #[test]
    fn test_log_wrapping_uses_gutter() {
        let logs = vec!["1234567890".to_string()];
        let lines = project(&input(&[], &[], &logs, 10, true));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content, "12345678");
        assert_eq!(lines[1].content, "90");
        assert!(!lines[0].continuation);
        assert!(lines[1].continuation);
        assert_eq!(lines[1].item, Some(0));
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        let logs = vec!["x".repeat(500)];
        let lines = project(&input(&[], &[], &logs, 0, true));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_attribute_wrap_hanging_indent() {
        let resources = vec![resource("a.b", &["    + name = \"abcdefghij\""], true)];
        // 2 gutter + 2 detail indent leaves 16 columns
        let lines = project(&input(&resources, &[], &[], 20, false));
        assert_eq!(lines[1].content, "    + name = \"ab");
        assert!(lines[2].content.starts_with("      "));
        assert!(lines.iter().skip(1).all(|l| l.kind == LineKind::ResourceAttribute));
    }

    #[test]
    fn test_empty_log_line_kept() {
        let logs = vec!["a".to_string(), String::new(), "b".to_string()];
        let lines = project(&input(&[], &[], &logs, 80, true));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].content, "");
    }

    #[test]
    fn test_projection_is_pure() {
        let resources = vec![resource("a.b", &["  + x"], true)];
        let diagnostics = vec![diagnostic("boom", &["d"], true)];
        let logs = vec!["log".to_string()];
        let i = input(&resources, &diagnostics, &logs, 40, false);
        assert_eq!(project(&i), project(&i));
    }

    #[test]
    fn test_is_header() {
        let resources = vec![resource("a.b", &["  + x"], true)];
        let lines = project(&input(&resources, &[], &[], 80, false));
        assert!(lines[0].is_header());
        assert!(!lines[1].is_header());
    }
}
