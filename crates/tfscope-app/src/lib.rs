//! tfscope-app - Application state and reducer for tfscope
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: [`Message`]s from the terminal and from the stream reader go
//! through [`handler::update`], which mutates [`AppState`] and hands
//! [`UpdateAction`]s back to the event loop. It also owns the virtual line
//! projection, the viewport and configuration loading.

pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod projection;
pub mod state;
pub mod summary;
pub mod viewport;

// Re-export primary types
pub use config::Settings;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use process::process_message;
pub use projection::{project, Line, LineKind, ProjectionInput, GUTTER};
pub use state::{AppState, Mode, RenderingMode, Status};
pub use summary::Summary;
pub use viewport::ViewportState;
