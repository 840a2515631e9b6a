//! Interactive input handlers
//!
//! Only meaningful when a child runs on a PTY; in pipe mode every handler
//! here is a no-op.

use tfscope_core::prelude::*;

use crate::message::Message;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// ETX, what a terminal sends for Ctrl+C
const INTERRUPT_BYTE: u8 = 0x03;

pub fn handle_enter_input_mode(state: &mut AppState) -> UpdateResult {
    if state.is_interactive() {
        state.input_mode = true;
    }
    UpdateResult::none()
}

pub fn handle_exit_input_mode(state: &mut AppState) -> UpdateResult {
    state.input_mode = false;
    UpdateResult::none()
}

pub fn handle_input_char(state: &mut AppState, c: char) -> UpdateResult {
    if state.input_mode {
        state.user_input.push(c);
    }
    UpdateResult::none()
}

pub fn handle_input_backspace(state: &mut AppState) -> UpdateResult {
    if state.input_mode {
        state.user_input.pop();
    }
    UpdateResult::none()
}

/// Send the typed line, clear the prompt and switch to the log view to
/// follow what the child does with it
pub fn handle_submit_input(state: &mut AppState) -> UpdateResult {
    if !state.input_mode || !state.is_interactive() {
        return UpdateResult::none();
    }

    let mut payload = std::mem::take(&mut state.user_input);
    payload.push('\n');
    debug!("Submitting {} bytes of input", payload.len());

    state.prompt = None;
    state.input_mode = false;
    state.show_logs = true;
    state.auto_scroll = true;
    state.rebuild_lines();
    state.follow_tail();

    UpdateResult::action(UpdateAction::SendInput(payload.into_bytes()))
}

/// Ctrl+C while typing: forward the interrupt to the child, then quit
pub fn handle_interrupt(state: &mut AppState) -> UpdateResult {
    if !state.is_interactive() {
        return UpdateResult::message(Message::Quit);
    }
    UpdateResult {
        message: Some(Message::Quit),
        action: Some(UpdateAction::SendInput(vec![INTERRUPT_BYTE])),
    }
}
