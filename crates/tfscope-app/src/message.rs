//! Message types for the application (TEA pattern)

use crate::input_key::InputKey;
use tfscope_core::StreamMessage;

/// All possible messages/actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Classified output from the stream reader
    Stream(StreamMessage),

    /// The reader's channel closed; treated like `Finished`
    StreamClosed,

    /// Batching tick: re-project if needed and follow the tail
    Tick,

    /// Terminal size changed (also sent once at startup)
    Resize { width: u16, height: u16 },

    /// Force quit (q, Ctrl+C, signal handler)
    Quit,

    /// The wrapped child exited
    ProcessExited { code: Option<i32> },

    // ─────────────────────────────────────────────────────────
    // Navigation Messages
    // ─────────────────────────────────────────────────────────
    /// Move the cursor up n lines
    ScrollUp(usize),
    /// Move the cursor down n lines
    ScrollDown(usize),
    /// Half a screen up
    PageUp,
    /// Half a screen down
    PageDown,
    ScrollToTop,
    /// Jump to the last line and resume following the tail
    ScrollToBottom,

    /// Mouse click on a screen row
    Click { row: u16 },

    // ─────────────────────────────────────────────────────────
    // View Messages
    // ─────────────────────────────────────────────────────────
    /// Toggle the item under the cursor
    ToggleExpand,
    ExpandAll,
    CollapseAll,
    /// Switch between plan view and log view
    ToggleView,
    /// Switch colour palette
    ToggleRenderingMode,

    // ─────────────────────────────────────────────────────────
    // Input Mode Messages (interactive only)
    // ─────────────────────────────────────────────────────────
    EnterInputMode,
    ExitInputMode,
    InputChar(char),
    InputBackspace,
    /// Send the typed line to the child
    SubmitInput,
    /// Forward Ctrl+C to the child, then quit
    Interrupt,
}
