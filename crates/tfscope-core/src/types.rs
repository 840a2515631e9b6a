//! Core domain type definitions

/// Planned action for a resource, parsed from its header phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    Create,
    Update,
    Destroy,
    Replace,
    Import,
    /// Phrase not in the known table; still displayed, never an error
    #[default]
    Unknown,
}

impl Action {
    /// Map a human action phrase to an action.
    ///
    /// The table is exact: anything else yields [`Action::Unknown`].
    pub fn from_phrase(phrase: &str) -> Self {
        match phrase {
            "will be created" => Action::Create,
            "will be updated in-place" => Action::Update,
            "will be destroyed" => Action::Destroy,
            "must be replaced" => Action::Replace,
            "will be imported" => Action::Import,
            _ => Action::Unknown,
        }
    }

    /// Single-character symbol shown next to the address
    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Create => "+",
            Action::Update => "~",
            Action::Destroy => "-",
            Action::Replace => "±",
            Action::Import => "←",
            Action::Unknown => "·",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Destroy => "destroy",
            Action::Replace => "replace",
            Action::Import => "import",
            Action::Unknown => "unknown",
        }
    }
}

/// One infrastructure object's planned change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    /// Resource address, e.g. `aws_instance.web`
    pub address: String,
    pub action: Action,
    /// Action phrase exactly as the tool printed it
    pub action_text: String,
    /// Raw attribute diff lines, indentation and braces preserved
    pub attributes: Vec<String>,
    pub expanded: bool,
}

impl ResourceChange {
    pub fn new(address: impl Into<String>, action_text: impl Into<String>) -> Self {
        let action_text = action_text.into();
        Self {
            address: address.into(),
            action: Action::from_phrase(&action_text),
            action_text,
            attributes: Vec::new(),
            expanded: false,
        }
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    /// Prefix used when the summary is displayed
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Error => "Error: ",
            Severity::Warning => "Warning: ",
        }
    }
}

/// One detail line of a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLine {
    /// Content with bold/underline escape codes preserved
    pub content: String,
    /// Source-location line (`on <file> line <n>`)
    pub is_marker: bool,
}

impl DiagnosticLine {
    pub fn new(content: impl Into<String>, is_marker: bool) -> Self {
        Self {
            content: content.into(),
            is_marker,
        }
    }
}

/// One error or warning reported by the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// First meaningful line, severity prefix stripped
    pub summary: String,
    pub detail: Vec<DiagnosticLine>,
    pub expanded: bool,
}

impl Diagnostic {
    pub fn new(severity: Severity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: Vec::new(),
            expanded: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Unit of communication between the stream reader and the state reducer.
///
/// Every payload is an owned copy; the reader keeps nothing it has sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    Resource(ResourceChange),
    Diagnostic(Diagnostic),
    Log(String),
    /// Unterminated tail that looks like an interactive prompt
    Prompt(String),
    /// End of input
    Finished { received_content: bool },
}
