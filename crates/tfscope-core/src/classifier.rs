//! Streaming line classifier for plan/apply output.
//!
//! Bytes arrive in arbitrary chunks; [`LineClassifier::feed`] assembles them
//! into lines and runs each through a forward-only state machine that
//! recognises diagnostic blocks (`╷ … ╵`), resource change blocks (a
//! `# <address> <phrase>` header followed by a brace-balanced body) and plain
//! log lines. The unterminated tail is checked separately for interactive
//! prompts, which never end in a newline.
//!
//! Malformed input never fails: invalid UTF-8 is decoded lossily, an
//! unclosed block is emitted when the next one opens or at end of input, and
//! [`LineClassifier::finish`] always ends with
//! [`StreamMessage::Finished`].

use regex::Regex;
use std::sync::LazyLock;

use crate::ansi::{sanitize_diagnostic_ansi, strip_ansi_codes};
use crate::diagnostic::decode_diagnostic_block;
use crate::error::{Error, Result};
use crate::types::{ResourceChange, StreamMessage};

/// Default interactive prompt sentinel
pub const DEFAULT_PROMPT_PATTERN: &str = r"Enter a value:\s*$";

/// Unterminated input longer than this is flushed as a line of its own
const MAX_LINE_BYTES: usize = 1024 * 1024;

const BLOCK_OPEN: char = '╷';
const BLOCK_CLOSE: char = '╵';
const BLOCK_LINE: char = '│';

/// `# <address> <phrase>`; the phrase is mapped by [`crate::Action::from_phrase`].
/// Data sources read at apply time have no action of their own but still
/// carry a body.
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*# (.+?) (will be created|will be destroyed|will be updated in-place|must be replaced|will be imported|will be read during apply)\s*$",
    )
    .expect("Header regex pattern is valid")
});

/// Tokens that open a resource body inside a change block
const BODY_OPENERS: [&str; 2] = [" resource \"", " data \""];

// ─────────────────────────────────────────────────────────────────────────────
// Prompt detection
// ─────────────────────────────────────────────────────────────────────────────

/// Set of patterns deciding whether an unterminated tail is a prompt
#[derive(Debug, Clone)]
pub struct PromptDetector {
    patterns: Vec<Regex>,
}

impl PromptDetector {
    /// Compile prompt patterns, failing on the first invalid one
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| {
                    Error::config(format!("invalid prompt pattern {:?}: {}", p.as_ref(), e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Check an ANSI-stripped tail against every pattern
    pub fn matches(&self, tail: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(tail))
    }
}

impl Default for PromptDetector {
    fn default() -> Self {
        Self {
            patterns: vec![Regex::new(DEFAULT_PROMPT_PATTERN).expect("Prompt regex pattern is valid")],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classifier
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassifierState {
    Normal,
    InsideDiagnostic,
    InsideResource,
}

/// Incremental byte → line → record state machine
#[derive(Debug)]
pub struct LineClassifier {
    state: ClassifierState,

    /// Bytes received after the last newline
    pending: Vec<u8>,

    /// Lines of the open diagnostic block, `│` prefix removed
    diagnostic_lines: Vec<String>,

    /// Resource whose header has been seen but which has not been emitted
    current_resource: Option<ResourceChange>,

    /// Net `{` minus `}` inside the current resource body
    brace_depth: i64,

    prompts: PromptDetector,

    /// Last prompt emitted for the current tail, to avoid repeats
    last_prompt: Option<String>,

    received_content: bool,
    finished: bool,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(PromptDetector::default())
    }
}

impl LineClassifier {
    pub fn new(prompts: PromptDetector) -> Self {
        Self {
            state: ClassifierState::Normal,
            pending: Vec::new(),
            diagnostic_lines: Vec::new(),
            current_resource: None,
            brace_depth: 0,
            prompts,
            last_prompt: None,
            received_content: false,
            finished: false,
        }
    }

    /// Whether any visible (non-whitespace, ANSI-stripped) text has been seen
    pub fn received_content(&self) -> bool {
        self.received_content
    }

    /// Feed a chunk of raw bytes, returning every message it completes
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamMessage> {
        let mut out = Vec::new();
        if self.finished || bytes.is_empty() {
            return out;
        }

        self.pending.extend_from_slice(bytes);

        let mut start = 0;
        while let Some(rel) = self.pending[start..].iter().position(|b| *b == b'\n') {
            let end = start + rel;
            let line = decode_line(&self.pending[start..end]);
            start = end + 1;
            self.last_prompt = None;
            self.process_line(&line, &mut out);
        }
        self.pending.drain(..start);

        if self.pending.len() > MAX_LINE_BYTES {
            tracing::debug!(
                "Flushing {} unterminated bytes as a single line",
                self.pending.len()
            );
            let line = decode_line(&std::mem::take(&mut self.pending));
            self.last_prompt = None;
            self.process_line(&line, &mut out);
        }

        self.check_prompt(&mut out);
        out
    }

    /// Flush all partial state and emit the end-of-stream message.
    ///
    /// Calling this more than once returns nothing after the first call.
    pub fn finish(&mut self) -> Vec<StreamMessage> {
        let mut out = Vec::new();
        if self.finished {
            return out;
        }
        self.finished = true;

        if !self.pending.is_empty() {
            let line = decode_line(&std::mem::take(&mut self.pending));
            self.process_line(&line, &mut out);
        }

        self.flush_diagnostic(&mut out);
        self.flush_resource(&mut out);
        self.state = ClassifierState::Normal;

        out.push(StreamMessage::Finished {
            received_content: self.received_content,
        });
        out
    }

    fn check_prompt(&mut self, out: &mut Vec<StreamMessage>) {
        if self.pending.is_empty() {
            return;
        }
        let tail = strip_ansi_codes(&String::from_utf8_lossy(&self.pending));
        self.note_content(&tail);
        if !self.prompts.matches(&tail) {
            return;
        }
        let prompt = tail.trim().to_string();
        if self.last_prompt.as_deref() != Some(prompt.as_str()) {
            tracing::debug!("Prompt detected: {}", prompt);
            out.push(StreamMessage::Prompt(prompt.clone()));
            self.last_prompt = Some(prompt);
        }
    }

    fn note_content(&mut self, plain: &str) {
        if !self.received_content && !plain.trim().is_empty() {
            self.received_content = true;
        }
    }

    fn process_line(&mut self, raw: &str, out: &mut Vec<StreamMessage>) {
        let plain = strip_ansi_codes(raw);
        self.note_content(&plain);
        let lead = plain.trim_start();

        match self.state {
            ClassifierState::InsideResource => {
                self.resource_body_line(&plain, out);
                return;
            }
            ClassifierState::InsideDiagnostic => {
                if let Some(rest) = lead.strip_prefix(BLOCK_OPEN) {
                    // Missing close marker: the previous block ends here
                    self.flush_diagnostic(out);
                    self.open_diagnostic(rest, out);
                } else if let Some(rest) = lead.strip_prefix(BLOCK_CLOSE) {
                    self.flush_diagnostic(out);
                    self.state = ClassifierState::Normal;
                    emit_log(rest, out);
                } else {
                    let line = strip_block_prefix(&sanitize_diagnostic_ansi(raw));
                    self.diagnostic_lines.push(line);
                }
                return;
            }
            ClassifierState::Normal => {}
        }

        if let Some(rest) = lead.strip_prefix(BLOCK_OPEN) {
            self.open_diagnostic(rest, out);
            return;
        }
        if let Some(rest) = lead.strip_prefix(BLOCK_CLOSE) {
            // Stray close marker; keep any text that follows it
            emit_log(rest, out);
            return;
        }

        if let Some(caps) = HEADER_PATTERN.captures(&plain) {
            self.flush_resource(out);
            self.current_resource = Some(ResourceChange::new(&caps[1], &caps[2]));
            return;
        }

        if self.current_resource.is_some() && BODY_OPENERS.iter().any(|t| plain.contains(t)) {
            self.brace_depth = net_braces(&plain);
            if self.brace_depth > 0 {
                self.state = ClassifierState::InsideResource;
            } else {
                // Empty body on a single line
                self.flush_resource(out);
            }
            return;
        }

        emit_log(&plain, out);
    }

    fn resource_body_line(&mut self, plain: &str, out: &mut Vec<StreamMessage>) {
        self.brace_depth += net_braces(plain);
        if self.brace_depth <= 0 && plain.contains('}') {
            self.flush_resource(out);
            self.state = ClassifierState::Normal;
            return;
        }

        let line = plain.trim_end();
        if line.trim().is_empty() {
            return;
        }
        if let Some(resource) = self.current_resource.as_mut() {
            resource.attributes.push(line.to_string());
        }
    }

    fn open_diagnostic(&mut self, rest_of_marker_line: &str, out: &mut Vec<StreamMessage>) {
        self.diagnostic_lines.clear();
        let rest = rest_of_marker_line.trim_start();

        // `╷╵` on one line is an empty block
        if let Some(after_close) = rest.strip_prefix(BLOCK_CLOSE) {
            self.state = ClassifierState::Normal;
            emit_log(after_close, out);
            return;
        }

        self.state = ClassifierState::InsideDiagnostic;
        if !rest.is_empty() {
            self.diagnostic_lines.push(rest.to_string());
        }
    }

    fn flush_diagnostic(&mut self, out: &mut Vec<StreamMessage>) {
        if self.state != ClassifierState::InsideDiagnostic {
            return;
        }
        let lines = std::mem::take(&mut self.diagnostic_lines);
        if let Some(diagnostic) = decode_diagnostic_block(&lines) {
            out.push(StreamMessage::Diagnostic(diagnostic));
        }
    }

    fn flush_resource(&mut self, out: &mut Vec<StreamMessage>) {
        self.brace_depth = 0;
        if let Some(resource) = self.current_resource.take() {
            out.push(StreamMessage::Resource(resource));
        }
    }
}

/// Classify a complete input in one go
pub fn classify_str(input: &str) -> Vec<StreamMessage> {
    let mut classifier = LineClassifier::default();
    let mut out = classifier.feed(input.as_bytes());
    out.extend(classifier.finish());
    out
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn emit_log(text: &str, out: &mut Vec<StreamMessage>) {
    if !text.trim().is_empty() {
        out.push(StreamMessage::Log(text.trim_end().to_string()));
    }
}

fn net_braces(line: &str) -> i64 {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Remove the `│` block prefix and the single space after it.
///
/// Escape sequences in front of the bar (e.g. a bold code wrapping the whole
/// line) are kept; whitespace in front of it is dropped.
fn strip_block_prefix(line: &str) -> String {
    let mut escapes = String::new();
    let mut idx = 0;

    loop {
        let rest = &line[idx..];
        if let Some(params) = rest.strip_prefix("\x1b[") {
            match params.find(|c: char| ('\x40'..='\x7e').contains(&c)) {
                Some(end) => {
                    let len = 2 + end + 1;
                    escapes.push_str(&rest[..len]);
                    idx += len;
                }
                None => break,
            }
        } else if rest.starts_with([' ', '\t']) {
            idx += 1;
        } else {
            break;
        }
    }

    match line[idx..].strip_prefix(BLOCK_LINE) {
        Some(after) => {
            let after = after.strip_prefix(' ').unwrap_or(after);
            escapes.push_str(after);
            escapes
        }
        None => line.to_string(),
    }
}
