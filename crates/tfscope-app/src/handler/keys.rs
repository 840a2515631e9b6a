//! Key event handlers for normal and input mode

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert key events to messages based on the current mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if state.input_mode && state.is_interactive() {
        handle_key_input_mode(key)
    } else {
        handle_key_normal(state, key)
    }
}

/// Typing a reply to the wrapped child
fn handle_key_input_mode(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ExitInputMode),
        // Forwarded to the child before quitting
        InputKey::CharCtrl('c') => Some(Message::Interrupt),
        InputKey::Backspace | InputKey::Delete => Some(Message::InputBackspace),
        InputKey::Enter => Some(Message::SubmitInput),
        InputKey::Char(c) => Some(Message::InputChar(c)),
        _ => None,
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Char('i') if state.is_interactive() => Some(Message::EnterInputMode),

        InputKey::Char('l' | 'L') | InputKey::Tab => Some(Message::ToggleView),
        InputKey::Char('m') => Some(Message::ToggleRenderingMode),

        // Navigation
        InputKey::Up | InputKey::Char('k') => Some(Message::ScrollUp(1)),
        InputKey::Down | InputKey::Char('j') => Some(Message::ScrollDown(1)),
        InputKey::PageUp | InputKey::CharCtrl('u') => Some(Message::PageUp),
        InputKey::PageDown | InputKey::CharCtrl('d') => Some(Message::PageDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::ScrollToTop),
        InputKey::End | InputKey::Char('G') => Some(Message::ScrollToBottom),

        // Expand / collapse
        InputKey::Enter | InputKey::Char(' ') => Some(Message::ToggleExpand),
        InputKey::Char('e') => Some(Message::ExpandAll),
        InputKey::Char('c') => Some(Message::CollapseAll),

        _ => None,
    }
}
