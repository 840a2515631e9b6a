//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key → message mapping for normal and input mode
//! - `scroll`: Cursor movement handlers
//! - `stream`: Stream and process lifecycle handlers
//! - `input`: Interactive input handlers

pub(crate) mod input;
pub(crate) mod keys;
pub(crate) mod scroll;
pub(crate) mod stream;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Write bytes to the wrapped child's terminal
    SendInput(Vec<u8>),

    /// Propagate a terminal resize to the wrapped child
    ResizePty { rows: u16, cols: u16 },

    /// Cancel the stream, stop the child and leave the event loop
    Shutdown,
}

/// Result of processing a message
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
