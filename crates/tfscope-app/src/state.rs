//! Application state (Model in TEA pattern)

use tfscope_core::{Diagnostic, DiagnosticLine, ResourceChange, Severity};

use crate::projection::{project, Line, ProjectionInput};
use crate::summary::Summary;
use crate::viewport::{visible_height, ViewportState};

/// Where the input comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Output piped into stdin
    #[default]
    Pipe,
    /// Command wrapped on a PTY; input can be typed back to it
    Interactive,
}

/// Active colour palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingMode {
    #[default]
    Dashboard,
    HighContrast,
}

impl RenderingMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderingMode::Dashboard => RenderingMode::HighContrast,
            RenderingMode::HighContrast => RenderingMode::Dashboard,
        }
    }
}

/// Header status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A prompt is pending
    WaitingForInput,
    /// Input is still streaming
    Live,
    /// Input finished
    Done,
}

/// Summary of the warning shown when a pipe delivers nothing
pub const EMPTY_INPUT_SUMMARY: &str = "No input received";

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    pub rendering_mode: RenderingMode,

    // Model
    pub resources: Vec<ResourceChange>,
    pub diagnostics: Vec<Diagnostic>,
    pub logs: Vec<String>,

    /// Projected display lines, rebuilt wholesale
    pub lines: Vec<Line>,
    pub viewport: ViewportState,

    /// Terminal size, 0 until the first resize
    pub width: usize,
    pub height: usize,
    /// Terminal size is known
    pub ready: bool,

    /// Log view instead of plan view
    pub show_logs: bool,
    /// Follow the tail as lines arrive
    pub auto_scroll: bool,
    /// Model changed since the last projection
    pub needs_sync: bool,

    /// Input stream finished
    pub done: bool,
    /// The wrapped child exited non-zero
    pub has_error: bool,
    pub exit_code: Option<i32>,

    // Interactive input
    pub input_mode: bool,
    pub user_input: String,
    /// Pending prompt text
    pub prompt: Option<String>,

    should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Mode::Pipe)
    }
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            rendering_mode: RenderingMode::default(),
            resources: Vec::new(),
            diagnostics: Vec::new(),
            logs: Vec::new(),
            lines: Vec::new(),
            viewport: ViewportState::new(),
            width: 0,
            height: 0,
            ready: false,
            show_logs: true,
            auto_scroll: true,
            needs_sync: false,
            done: false,
            has_error: false,
            exit_code: None,
            input_mode: false,
            user_input: String::new(),
            prompt: None,
            should_quit: false,
        }
    }

    /// Start in plan view instead of log view
    pub fn with_log_view(mut self, show_logs: bool) -> Self {
        self.show_logs = show_logs;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == Mode::Interactive
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Any error diagnostic so far
    pub fn has_error_diagnostic(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn status(&self) -> Status {
        if self.prompt.is_some() {
            Status::WaitingForInput
        } else if !self.done {
            Status::Live
        } else {
            Status::Done
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::from_model(&self.resources, &self.diagnostics)
    }

    pub fn selected_line(&self) -> Option<&Line> {
        self.lines.get(self.viewport.cursor)
    }

    /// Content rows for the current terminal height and prompt
    pub fn visible_height(&self) -> usize {
        visible_height(self.height, self.prompt.is_some())
    }

    /// Re-run the projection and re-clamp the viewport
    pub fn rebuild_lines(&mut self) {
        self.lines = project(&ProjectionInput {
            resources: &self.resources,
            diagnostics: &self.diagnostics,
            logs: &self.logs,
            width: self.width,
            show_logs: self.show_logs,
        });
        self.viewport.set_visible_lines(self.visible_height());
        self.viewport.set_total_lines(self.lines.len());
        self.needs_sync = false;
    }

    /// Move the cursor to the last line
    pub fn follow_tail(&mut self) {
        self.viewport.to_bottom();
    }

    /// Flip the expand flag of the header under `line`, if it is one.
    ///
    /// Returns whether anything changed.
    pub fn toggle_expand_at(&mut self, line: usize) -> bool {
        let Some(target) = self.lines.get(line) else {
            return false;
        };
        if !target.is_header() {
            return false;
        }

        let toggled = if let Some(r) = target.resource {
            self.resources
                .get_mut(r)
                .map(|rc| rc.expanded = !rc.expanded)
                .is_some()
        } else if let Some(d) = target.diagnostic {
            self.diagnostics
                .get_mut(d)
                .map(|diag| diag.expanded = !diag.expanded)
                .is_some()
        } else {
            false
        };

        if toggled {
            self.rebuild_lines();
        }
        toggled
    }

    /// Set every resource and diagnostic expanded or collapsed
    pub fn set_all_expanded(&mut self, expanded: bool) {
        for rc in &mut self.resources {
            rc.expanded = expanded;
        }
        for diag in &mut self.diagnostics {
            diag.expanded = expanded;
        }
        self.rebuild_lines();
    }

    /// Warning surfaced when a pipe closes without content
    pub(crate) fn push_empty_input_warning(&mut self) {
        let mut diag = Diagnostic::new(Severity::Warning, EMPTY_INPUT_SUMMARY);
        diag.detail = vec![
            DiagnosticLine::new(
                "The input stream closed before any output arrived.",
                false,
            ),
            DiagnosticLine::new(
                "Terraform writes errors to stderr; redirect it into the pipe:",
                false,
            ),
            DiagnosticLine::new("  terraform plan 2>&1 | tfscope", false),
        ];
        diag.expanded = true;
        self.diagnostics.push(diag);
    }
}
