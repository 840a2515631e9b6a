//! Stream and process lifecycle handlers

use tfscope_core::prelude::*;
use tfscope_core::StreamMessage;

use crate::state::{AppState, Mode};

use super::UpdateResult;

/// Fold one classified message into the model
pub fn handle_stream_message(state: &mut AppState, msg: StreamMessage) -> UpdateResult {
    match msg {
        StreamMessage::Resource(rc) => {
            trace!("Resource {} ({})", rc.address, rc.action.label());
            state.resources.push(rc);
            // Errors stay in front once seen
            if !state.has_error_diagnostic() && !state.has_error {
                state.show_logs = false;
            }
        }

        StreamMessage::Diagnostic(diag) => {
            debug!("{}{}", diag.severity.prefix(), diag.summary);
            if diag.is_error() {
                state.show_logs = true;
            }
            state.diagnostics.push(diag);
        }

        StreamMessage::Log(line) => {
            state.logs.push(line);
        }

        StreamMessage::Prompt(prompt) => {
            debug!("Prompt detected: {:?}", prompt);
            state.prompt = Some(prompt);
        }

        StreamMessage::Finished { received_content } => {
            info!(
                "Input finished: {} resources, {} diagnostics, {} log lines",
                state.resources.len(),
                state.diagnostics.len(),
                state.logs.len()
            );
            state.done = true;
            // A PTY captures stderr too, so silence there is genuine
            if !received_content && state.mode == Mode::Pipe {
                warn!("Pipe closed without any content");
                state.push_empty_input_warning();
            }
        }
    }

    state.needs_sync = true;
    UpdateResult::none()
}

/// The reader's channel closed
pub fn handle_stream_closed(state: &mut AppState) -> UpdateResult {
    if !state.done {
        debug!("Stream closed before Finished");
        state.done = true;
        state.needs_sync = true;
    }
    UpdateResult::none()
}

/// The wrapped child exited
pub fn handle_process_exited(state: &mut AppState, code: Option<i32>) -> UpdateResult {
    state.exit_code = code;
    state.prompt = None;
    state.input_mode = false;

    if let Some(code) = code.filter(|c| *c != 0) {
        warn!("Process exited with code {}", code);
        state.has_error = true;
        state.show_logs = true;
        state.logs.push(format!("Process exited with code {}", code));
    }

    state.needs_sync = true;
    UpdateResult::none()
}

/// Batching tick: re-project pending changes and follow the tail
pub fn handle_tick(state: &mut AppState) -> UpdateResult {
    if state.needs_sync {
        state.rebuild_lines();
        if state.auto_scroll || !state.ready {
            state.follow_tail();
        }
    }
    UpdateResult::none()
}
