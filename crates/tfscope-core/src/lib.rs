//! # tfscope-core - Plan Output Grammar and Domain Types
//!
//! Foundation crate for tfscope. Turns the human-readable output of
//! `terraform`/`tofu` plan and apply runs into structured records, and holds
//! the shared error and logging infrastructure.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (thiserror, regex, tracing, unicode-width).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ResourceChange`] / [`Action`] - One resource's planned change
//! - [`Diagnostic`] / [`DiagnosticLine`] / [`Severity`] - Errors and warnings
//! - [`StreamMessage`] - Unit passed from the stream reader to the app
//!
//! ### Parsing
//! - [`LineClassifier`] - Incremental byte stream → [`StreamMessage`] state machine
//! - [`PromptDetector`] - Configurable interactive prompt heuristic
//! - [`decode_diagnostic_block()`] - Lines between `╷`/`╵` → [`Diagnostic`]
//!
//! ### Text
//! - [`strip_ansi_codes()`] / [`sanitize_diagnostic_ansi()`] / [`styled_segments()`]
//! - [`wrap_text()`] / [`hanging_indent_for()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum organized by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use tfscope_core::prelude::*;
//! ```

pub mod ansi;
pub mod classifier;
pub mod diagnostic;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;
pub mod wrap;

// Re-export commonly used types at crate root for convenience
pub use ansi::{sanitize_diagnostic_ansi, strip_ansi_codes, styled_segments, StyledSegment};
pub use classifier::{classify_str, LineClassifier, PromptDetector, DEFAULT_PROMPT_PATTERN};
pub use diagnostic::{decode_diagnostic_block, is_location_marker, is_underline_marker};
pub use error::{Error, Result};
pub use types::{
    Action, Diagnostic, DiagnosticLine, ResourceChange, Severity, StreamMessage,
};
pub use wrap::{hanging_indent_for, wrap_text};
