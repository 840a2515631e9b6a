//! Semantic style builders.
//!
//! Every builder takes the active [`RenderingMode`]. Dashboard keeps
//! secondary text dimmed; high contrast renders it at full brightness and
//! puts action symbols on solid color blocks.

use ratatui::style::{Color, Modifier, Style};
use tfscope_app::RenderingMode;
use tfscope_core::{Action, Severity};

use super::palette;

// --- Text styles ---
pub fn text() -> Style {
    Style::default().fg(palette::TEXT)
}

pub fn dim(mode: RenderingMode) -> Style {
    match mode {
        RenderingMode::Dashboard => Style::default().fg(palette::DIM),
        RenderingMode::HighContrast => Style::default().fg(palette::TEXT),
    }
}

/// Background applied to every span of the selected row
pub fn selected() -> Style {
    Style::default()
        .fg(palette::TEXT)
        .bg(palette::SELECTED_BG)
        .add_modifier(Modifier::BOLD)
}

// --- Header badges ---
pub fn badge(bg: Color) -> Style {
    Style::default()
        .fg(palette::BASE)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

// --- Resource styles ---
pub fn action_color(action: Action) -> Color {
    match action {
        Action::Create => palette::CREATE,
        Action::Update => palette::UPDATE,
        Action::Destroy => palette::DESTROY,
        Action::Replace => palette::REPLACE,
        Action::Import => palette::IMPORT,
        Action::Unknown => palette::TEXT,
    }
}

/// Bold action color used for resource headers and summary counts
pub fn action(action: Action) -> Style {
    Style::default()
        .fg(action_color(action))
        .add_modifier(Modifier::BOLD)
}

pub fn action_symbol(mode: RenderingMode, act: Action) -> Style {
    match mode {
        RenderingMode::Dashboard => action(act),
        RenderingMode::HighContrast => Style::default()
            .fg(palette::BASE)
            .bg(action_color(act))
            .add_modifier(Modifier::BOLD),
    }
}

/// Style for an attribute diff line, by its change marker
pub fn attribute(mode: RenderingMode, attr: &str) -> Style {
    let trimmed = attr.trim_start();
    if trimmed.starts_with('+') {
        Style::default().fg(palette::CREATE)
    } else if trimmed.starts_with('-') {
        Style::default().fg(palette::DESTROY)
    } else if trimmed.starts_with('~') {
        Style::default().fg(palette::UPDATE)
    } else {
        dim(mode)
    }
}

/// `# forces replacement` annotation
pub fn forces_replacement() -> Style {
    Style::default()
        .fg(palette::DESTROY)
        .add_modifier(Modifier::BOLD)
}

// --- Diagnostic styles ---
pub fn severity(severity: Severity) -> Style {
    let color = match severity {
        Severity::Error => palette::ERROR,
        Severity::Warning => palette::WARNING,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn prompt() -> Style {
    Style::default()
        .fg(palette::PROMPT)
        .add_modifier(Modifier::BOLD)
}

/// Style for a raw log line, keyed on well-known tool messages
pub fn log_line(mode: RenderingMode, content: &str) -> Style {
    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    if content.contains("Error:") {
        bold(palette::ERROR)
    } else if content.contains("Warning:") {
        bold(palette::WARNING)
    } else if content.starts_with("Initializing") {
        bold(palette::IMPORT)
    } else if content.contains("Success!")
        || content.contains("Creation complete")
        || content.contains("Complete!")
    {
        bold(palette::CREATE)
    } else if content.contains("Enter a value:") {
        forces_replacement()
    } else if content.contains("Creating...")
        || content.contains("Destroying...")
        || content.contains("Modifying...")
    {
        bold(palette::UPDATE)
    } else {
        match mode {
            RenderingMode::Dashboard => text(),
            RenderingMode::HighContrast => text().add_modifier(Modifier::BOLD),
        }
    }
}
