//! Main update function - handles state transitions (TEA pattern)

use tfscope_core::prelude::*;

use crate::message::Message;
use crate::state::AppState;

use super::{input, keys::handle_key, scroll, stream, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            info!("Quit requested");
            state.request_quit();
            UpdateResult::action(UpdateAction::Shutdown)
        }

        Message::Key(key) => {
            // Any key press stops following the tail
            state.auto_scroll = false;
            match handle_key(state, key) {
                Some(msg) => UpdateResult::message(msg),
                None => UpdateResult::none(),
            }
        }

        Message::Stream(msg) => stream::handle_stream_message(state, msg),
        Message::StreamClosed => stream::handle_stream_closed(state),
        Message::ProcessExited { code } => stream::handle_process_exited(state, code),
        Message::Tick => stream::handle_tick(state),

        Message::Resize { width, height } => {
            state.width = width as usize;
            state.height = height as usize;
            state.ready = true;
            state.needs_sync = true;
            state.viewport.set_visible_lines(state.visible_height());
            if state.is_interactive() {
                UpdateResult::action(UpdateAction::ResizePty {
                    rows: height,
                    cols: width,
                })
            } else {
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Navigation Messages
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp(n) => scroll::handle_scroll_up(state, n),
        Message::ScrollDown(n) => scroll::handle_scroll_down(state, n),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),
        Message::Click { row } => scroll::handle_click(state, row),

        // ─────────────────────────────────────────────────────────
        // View Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleExpand => {
            let cursor = state.viewport.cursor;
            state.toggle_expand_at(cursor);
            UpdateResult::none()
        }

        Message::ExpandAll => {
            state.set_all_expanded(true);
            UpdateResult::none()
        }

        Message::CollapseAll => {
            state.set_all_expanded(false);
            UpdateResult::none()
        }

        Message::ToggleView => {
            state.show_logs = !state.show_logs;
            state.auto_scroll = false;
            state.rebuild_lines();
            state.viewport.to_top();
            UpdateResult::none()
        }

        Message::ToggleRenderingMode => {
            state.rendering_mode = state.rendering_mode.toggled();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Input Mode Messages
        // ─────────────────────────────────────────────────────────
        Message::EnterInputMode => input::handle_enter_input_mode(state),
        Message::ExitInputMode => input::handle_exit_input_mode(state),
        Message::InputChar(c) => input::handle_input_char(state, c),
        Message::InputBackspace => input::handle_input_backspace(state),
        Message::SubmitInput => input::handle_submit_input(state),
        Message::Interrupt => input::handle_interrupt(state),
    }
}
