//! Scroll message handlers
//!
//! Every manual movement stops following the tail; only
//! [`handle_scroll_to_bottom`] resumes it.

use crate::state::AppState;

use super::UpdateResult;

/// Handle scroll up message
pub fn handle_scroll_up(state: &mut AppState, n: usize) -> UpdateResult {
    state.auto_scroll = false;
    state.viewport.move_up(n);
    UpdateResult::none()
}

/// Handle scroll down message
pub fn handle_scroll_down(state: &mut AppState, n: usize) -> UpdateResult {
    state.auto_scroll = false;
    state.viewport.move_down(n);
    UpdateResult::none()
}

/// Handle page up message
pub fn handle_page_up(state: &mut AppState) -> UpdateResult {
    state.auto_scroll = false;
    state.viewport.page_up();
    UpdateResult::none()
}

/// Handle page down message
pub fn handle_page_down(state: &mut AppState) -> UpdateResult {
    state.auto_scroll = false;
    state.viewport.page_down();
    UpdateResult::none()
}

/// Handle scroll to top message
pub fn handle_scroll_to_top(state: &mut AppState) -> UpdateResult {
    state.auto_scroll = false;
    state.viewport.to_top();
    UpdateResult::none()
}

/// Handle scroll to bottom message and resume following new lines
pub fn handle_scroll_to_bottom(state: &mut AppState) -> UpdateResult {
    state.auto_scroll = true;
    state.viewport.to_bottom();
    UpdateResult::none()
}

/// Handle a mouse click: select the clicked line, or toggle it when it is
/// already selected
pub fn handle_click(state: &mut AppState, row: u16) -> UpdateResult {
    state.auto_scroll = false;
    let Some(line) = state.viewport.line_at_row(row as usize) else {
        return UpdateResult::none();
    };

    if line == state.viewport.cursor {
        state.toggle_expand_at(line);
    } else {
        state.viewport.cursor = line;
        state.viewport.ensure_cursor_visible();
    }
    UpdateResult::none()
}
