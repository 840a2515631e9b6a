//! Terminal event polling

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Duration;
use tfscope_app::{InputKey, Message};
use tfscope_core::prelude::*;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None, // Unsupported keys ignored
    }
}

/// Wheel scrolls by `scroll_lines`, a left click selects the row under it
pub fn mouse_event_to_message(mouse: MouseEvent, scroll_lines: usize) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Message::ScrollUp(scroll_lines)),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown(scroll_lines)),
        MouseEventKind::Down(MouseButton::Left) => Some(Message::Click { row: mouse.row }),
        _ => None,
    }
}

/// Translate one terminal event
pub fn event_to_message(event: Event, scroll_lines: usize) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        Event::Mouse(mouse) => mouse_event_to_message(mouse, scroll_lines),
        Event::Resize(width, height) => Some(Message::Resize { width, height }),
        _ => None,
    }
}

/// Poll for terminal events with timeout
///
/// A timeout yields [`Message::Tick`], which drives batched re-projection.
pub fn poll(tick_rate: Duration, scroll_lines: usize) -> Result<Option<Message>> {
    if event::poll(tick_rate)? {
        Ok(event_to_message(event::read()?, scroll_lines))
    } else {
        Ok(Some(Message::Tick))
    }
}
