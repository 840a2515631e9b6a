//! Main render/view function (View in TEA pattern)
//!
//! The screen is laid out top to bottom with no borders: header, blank row,
//! optional "more above" indicator, the visible window of projected lines,
//! optional "more below" indicator, the pinned prompt and the footer.
//! [`tfscope_app::viewport`] reserves exactly these rows, so the content
//! window always fits.


use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tfscope_app::{AppState, Line as ViewLine, LineKind, RenderingMode, Status};
use tfscope_core::{is_underline_marker, styled_segments, Action, Severity};

use crate::theme::{palette, styles};

const FORCES_REPLACEMENT: &str = "# forces replacement";

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to the state; the viewport is already clamped by the
/// update step.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if !state.ready {
        frame.render_widget(Paragraph::new("Loading..."), area);
        return;
    }

    let mode = state.rendering_mode;
    let mut rows: Vec<Line<'static>> = Vec::with_capacity(area.height as usize);

    rows.push(header(state));
    rows.push(Line::default());

    let viewport = &state.viewport;
    let (start, end) = viewport.visible_range();

    if start > 0 {
        rows.push(Line::styled(
            format!("  ↑ {} more lines above", start),
            styles::dim(mode),
        ));
    }

    for idx in start..end {
        if let Some(line) = state.lines.get(idx) {
            rows.push(content_row(state, line, idx == viewport.cursor));
        }
    }

    let below = viewport.lines_below();
    if below > 0 {
        rows.push(Line::styled(
            format!("  ↓ {} more lines below", below),
            styles::dim(mode),
        ));
    }

    if let Some(prompt) = &state.prompt {
        rows.push(Line::default());
        rows.push(prompt_row(state, prompt));
    }

    rows.push(Line::default());
    rows.push(footer(state));

    frame.render_widget(Paragraph::new(rows), area);
}

/// Mode badge, status and key hints
fn header(state: &AppState) -> Line<'static> {
    let mode = state.rendering_mode;
    let (badge, bg, subtitle) = if state.input_mode {
        ("INPUT", palette::INPUT_BADGE, "Interactive Mode")
    } else if state.show_logs {
        ("LOGS", palette::LOG_BADGE, "Terraform Output")
    } else {
        ("PLAN", palette::PLAN_BADGE, "Terraform Viewer")
    };

    let status = match state.status() {
        Status::WaitingForInput => Span::styled(
            " ● WAITING FOR INPUT",
            styles::severity(Severity::Warning),
        ),
        Status::Live => Span::styled(" ● Live", styles::dim(mode)),
        Status::Done => Span::styled(" ● Done", styles::dim(mode)),
    };

    let mut controls = String::from(" ↑↓:navigate  q:quit  L:mode");
    if state.is_interactive() {
        controls.push_str(if state.input_mode {
            "  Esc:exit input"
        } else {
            "  i:enter input"
        });
    }

    Line::from(vec![
        Span::styled(format!(" {} ", badge), styles::badge(bg)),
        Span::raw(" "),
        Span::styled(subtitle, styles::dim(mode)),
        status,
        Span::raw("  "),
        Span::styled(controls, styles::dim(mode)),
    ])
}

/// One projected line with its gutter
fn content_row(state: &AppState, line: &ViewLine, selected: bool) -> Line<'static> {
    let mode = state.rendering_mode;
    let body = match line.kind {
        LineKind::ResourceHeader => resource_header(state, line),
        LineKind::ResourceAttribute => attribute_row(state, line),
        LineKind::DiagnosticHeader => diagnostic_header(state, line),
        LineKind::DiagnosticDetail => diagnostic_detail(state, line),
        LineKind::Log => {
            // Continuation rows share the style of the whole entry
            let source = line
                .item
                .and_then(|i| state.logs.get(i))
                .map(String::as_str)
                .unwrap_or(&line.content);
            vec![Span::styled(line.content.clone(), styles::log_line(mode, source))]
        }
    };

    if !selected {
        let mut spans = vec![Span::raw("  ")];
        spans.extend(body);
        return Line::from(spans);
    }

    // Resource headers keep their colors on the selection background;
    // every other row switches to the selection style entirely
    let mut spans = vec![Span::styled("► ", styles::selected())];
    if line.kind == LineKind::ResourceHeader {
        spans.extend(
            body.into_iter()
                .map(|s| s.patch_style(Style::default().bg(palette::SELECTED_BG))),
        );
    } else {
        let text: String = body.iter().map(|s| &*s.content).collect();
        spans.push(Span::styled(text, styles::selected()));
    }
    Line::from(spans)
}

fn expand_icon(expanded: bool) -> &'static str {
    if expanded {
        "▾"
    } else {
        "▸"
    }
}

fn resource_header(state: &AppState, line: &ViewLine) -> Vec<Span<'static>> {
    let mode = state.rendering_mode;
    let Some(rc) = line.resource.and_then(|r| state.resources.get(r)) else {
        return vec![Span::raw(line.content.clone())];
    };

    vec![
        Span::styled(
            format!("{} ", expand_icon(rc.expanded)),
            styles::action(rc.action),
        ),
        Span::styled(rc.action.symbol(), styles::action_symbol(mode, rc.action)),
        Span::styled(format!(" {}", line.content), styles::action(rc.action)),
        Span::styled(format!(" {}", rc.action_text), styles::dim(mode)),
    ]
}

fn attribute_row(state: &AppState, line: &ViewLine) -> Vec<Span<'static>> {
    let mode = state.rendering_mode;
    let source = line
        .resource
        .zip(line.item)
        .and_then(|(r, j)| state.resources.get(r)?.attributes.get(j))
        .map(String::as_str)
        .unwrap_or(&line.content);
    let base = styles::attribute(mode, source);

    let mut spans = vec![Span::raw("  ")];
    match line.content.find(FORCES_REPLACEMENT) {
        Some(pos) => {
            let (before, rest) = line.content.split_at(pos);
            let after = &rest[FORCES_REPLACEMENT.len()..];
            spans.push(Span::styled(before.to_string(), base));
            spans.push(Span::styled(FORCES_REPLACEMENT, styles::forces_replacement()));
            if !after.is_empty() {
                spans.push(Span::styled(after.to_string(), styles::text()));
            }
        }
        None => spans.push(Span::styled(line.content.clone(), base)),
    }
    spans
}

fn diagnostic_header(state: &AppState, line: &ViewLine) -> Vec<Span<'static>> {
    let Some(diag) = line.diagnostic.and_then(|d| state.diagnostics.get(d)) else {
        return vec![Span::raw(line.content.clone())];
    };
    let style = styles::severity(diag.severity);

    if line.continuation {
        return vec![Span::styled(format!("    {}", line.content), style)];
    }

    let symbol = match diag.severity {
        Severity::Error => "✗",
        Severity::Warning => "⚠",
    };
    vec![Span::styled(
        format!("{} {} {}", expand_icon(diag.expanded), symbol, line.content),
        style,
    )]
}

/// Detail rows keep the tool's bold/underline emphasis
fn diagnostic_detail(state: &AppState, line: &ViewLine) -> Vec<Span<'static>> {
    let Some(diag) = line.diagnostic.and_then(|d| state.diagnostics.get(d)) else {
        return vec![Span::raw(line.content.clone())];
    };
    let is_marker = line
        .item
        .and_then(|j| diag.detail.get(j))
        .is_some_and(|detail| detail.is_marker);
    let severity_color = styles::severity(diag.severity).fg.unwrap_or(palette::TEXT);

    let mut base = detail_base(state.rendering_mode);
    if is_marker {
        base = base.add_modifier(Modifier::BOLD);
    }
    if is_underline_marker(&line.content) {
        base = base.fg(severity_color);
    }

    let mut spans = vec![Span::raw("  ")];
    for segment in styled_segments(&line.content) {
        let mut style = base;
        if segment.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if segment.underline {
            style = style.fg(severity_color).add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(segment.text, style));
    }
    spans
}

fn detail_base(mode: RenderingMode) -> Style {
    match mode {
        RenderingMode::Dashboard => styles::text(),
        RenderingMode::HighContrast => styles::text().add_modifier(Modifier::BOLD),
    }
}

fn prompt_row(state: &AppState, prompt: &str) -> Line<'static> {
    let mut spans = vec![Span::styled(format!(">> {}", prompt), styles::prompt())];
    if state.input_mode {
        spans.push(Span::styled(
            format!(" {}", state.user_input),
            styles::action(Action::Create),
        ));
        spans.push(Span::styled("█", styles::dim(state.rendering_mode)));
    }
    Line::from(spans)
}

/// Line count in the log view, change summary in the plan view
fn footer(state: &AppState) -> Line<'static> {
    let mode = state.rendering_mode;
    if state.show_logs {
        return Line::styled(format!("{} lines", state.lines.len()), styles::dim(mode));
    }

    let summary = state.summary();
    let mut parts: Vec<Span<'static>> = Vec::new();
    let mut push = |text: String, style: Style| {
        if !parts.is_empty() {
            parts.push(Span::raw("  "));
        }
        parts.push(Span::styled(text, style));
    };

    if summary.errors > 0 {
        push(
            format!("✗{} error", summary.errors),
            styles::severity(Severity::Error),
        );
    }
    if summary.warnings > 0 {
        push(
            format!("⚠{} warning", summary.warnings),
            styles::severity(Severity::Warning),
        );
    }
    for action in [
        Action::Create,
        Action::Update,
        Action::Destroy,
        Action::Replace,
        Action::Import,
    ] {
        let count = summary.count(action);
        if count > 0 {
            push(
                format!("{}{} {}", action.symbol(), count, action.label()),
                styles::action(action),
            );
        }
    }

    if parts.is_empty() {
        return Line::styled("No changes", styles::dim(mode));
    }
    Line::from(parts)
}
