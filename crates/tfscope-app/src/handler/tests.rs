//! Tests for handler module

use super::*;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::process::process_message;
use crate::state::{AppState, Mode, RenderingMode, Status, EMPTY_INPUT_SUMMARY};
use tfscope_core::{Diagnostic, ResourceChange, Severity, StreamMessage};

fn new_state(mode: Mode) -> AppState {
    let mut state = AppState::new(mode);
    update(
        &mut state,
        Message::Resize {
            width: 80,
            height: 30,
        },
    );
    state
}

fn send(state: &mut AppState, msg: StreamMessage) {
    update(state, Message::Stream(msg));
}

fn tick(state: &mut AppState) {
    update(state, Message::Tick);
}

fn press(state: &mut AppState, key: InputKey) -> Vec<UpdateAction> {
    process_message(state, Message::Key(key))
}

fn resource(address: &str, attrs: &[&str]) -> ResourceChange {
    let mut rc = ResourceChange::new(address, "will be created");
    rc.attributes = attrs.iter().map(|s| s.to_string()).collect();
    rc
}

fn diagnostic(severity: Severity, summary: &str) -> Diagnostic {
    Diagnostic::new(severity, summary)
}

fn plan_state(count: usize) -> AppState {
    let mut state = new_state(Mode::Pipe);
    for i in 0..count {
        send(
            &mut state,
            StreamMessage::Resource(resource(&format!("null_resource.r{}", i), &["  + a = 1", "  + b = 2"])),
        );
    }
    tick(&mut state);
    state
}

fn assert_viewport_invariants(state: &AppState) {
    let len = state.lines.len();
    assert_eq!(state.viewport.total_lines, len);
    if len == 0 {
        assert_eq!(state.viewport.cursor, 0);
    } else {
        assert!(state.viewport.cursor < len, "cursor {} len {}", state.viewport.cursor, len);
    }
    assert!(state.viewport.offset <= len.saturating_sub(state.viewport.visible_lines));
}

// ─────────────────────────────────────────────────────────
// Key mapping
// ─────────────────────────────────────────────────────────

#[test]
fn test_q_and_ctrl_c_quit() {
    let state = AppState::new(Mode::Pipe);
    assert_eq!(handle_key(&state, InputKey::Char('q')), Some(Message::Quit));
    assert_eq!(handle_key(&state, InputKey::CharCtrl('c')), Some(Message::Quit));
}

#[test]
fn test_navigation_bindings() {
    let state = AppState::new(Mode::Pipe);
    assert_eq!(handle_key(&state, InputKey::Char('k')), Some(Message::ScrollUp(1)));
    assert_eq!(handle_key(&state, InputKey::Up), Some(Message::ScrollUp(1)));
    assert_eq!(handle_key(&state, InputKey::Char('j')), Some(Message::ScrollDown(1)));
    assert_eq!(handle_key(&state, InputKey::CharCtrl('u')), Some(Message::PageUp));
    assert_eq!(handle_key(&state, InputKey::PageDown), Some(Message::PageDown));
    assert_eq!(handle_key(&state, InputKey::Char('g')), Some(Message::ScrollToTop));
    assert_eq!(handle_key(&state, InputKey::End), Some(Message::ScrollToBottom));
    assert_eq!(handle_key(&state, InputKey::Char(' ')), Some(Message::ToggleExpand));
    assert_eq!(handle_key(&state, InputKey::Char('e')), Some(Message::ExpandAll));
    assert_eq!(handle_key(&state, InputKey::Char('c')), Some(Message::CollapseAll));
    assert_eq!(handle_key(&state, InputKey::Tab), Some(Message::ToggleView));
    assert_eq!(handle_key(&state, InputKey::Char('L')), Some(Message::ToggleView));
    assert_eq!(handle_key(&state, InputKey::Char('m')), Some(Message::ToggleRenderingMode));
}

#[test]
fn test_input_mode_key_only_when_interactive() {
    let pipe = AppState::new(Mode::Pipe);
    assert_eq!(handle_key(&pipe, InputKey::Char('i')), None);

    let pty = AppState::new(Mode::Interactive);
    assert_eq!(handle_key(&pty, InputKey::Char('i')), Some(Message::EnterInputMode));
}

#[test]
fn test_input_mode_captures_letters() {
    let mut state = AppState::new(Mode::Interactive);
    state.input_mode = true;
    assert_eq!(handle_key(&state, InputKey::Char('q')), Some(Message::InputChar('q')));
    assert_eq!(handle_key(&state, InputKey::Char(' ')), Some(Message::InputChar(' ')));
    assert_eq!(handle_key(&state, InputKey::Esc), Some(Message::ExitInputMode));
    assert_eq!(handle_key(&state, InputKey::Enter), Some(Message::SubmitInput));
    assert_eq!(handle_key(&state, InputKey::Backspace), Some(Message::InputBackspace));
    assert_eq!(handle_key(&state, InputKey::CharCtrl('c')), Some(Message::Interrupt));
    assert_eq!(handle_key(&state, InputKey::Up), None);
}

// ─────────────────────────────────────────────────────────
// Stream handling and view switching
// ─────────────────────────────────────────────────────────

#[test]
fn test_starts_in_log_view() {
    let state = new_state(Mode::Pipe);
    assert!(state.show_logs);
}

#[test]
fn test_resource_switches_to_plan_view() {
    let mut state = new_state(Mode::Pipe);
    send(&mut state, StreamMessage::Log("Refreshing state...".into()));
    assert!(state.show_logs);

    send(&mut state, StreamMessage::Resource(resource("a.b", &[])));
    assert!(!state.show_logs);
    assert!(state.needs_sync);
}

#[test]
fn test_error_diagnostic_forces_log_view() {
    let mut state = new_state(Mode::Pipe);
    send(&mut state, StreamMessage::Resource(resource("a.b", &[])));
    assert!(!state.show_logs);

    send(&mut state, StreamMessage::Diagnostic(diagnostic(Severity::Error, "boom")));
    assert!(state.show_logs);

    // Later resources leave the error in view
    send(&mut state, StreamMessage::Resource(resource("c.d", &[])));
    assert!(state.show_logs);
    assert_eq!(state.resources.len(), 2);
}

#[test]
fn test_warning_does_not_switch_view() {
    let mut state = new_state(Mode::Pipe);
    send(&mut state, StreamMessage::Resource(resource("a.b", &[])));
    send(&mut state, StreamMessage::Diagnostic(diagnostic(Severity::Warning, "deprecated")));
    assert!(!state.show_logs);

    send(&mut state, StreamMessage::Resource(resource("c.d", &[])));
    assert!(!state.show_logs);
}

#[test]
fn test_prompt_sets_waiting_status() {
    let mut state = new_state(Mode::Interactive);
    send(&mut state, StreamMessage::Prompt("  Enter a value: ".into()));
    assert_eq!(state.prompt.as_deref(), Some("  Enter a value: "));
    assert_eq!(state.status(), Status::WaitingForInput);
}

#[test]
fn test_empty_pipe_warns() {
    let mut state = new_state(Mode::Pipe);
    send(
        &mut state,
        StreamMessage::Finished {
            received_content: false,
        },
    );
    assert!(state.done);
    assert_eq!(state.diagnostics.len(), 1);
    assert_eq!(state.diagnostics[0].severity, Severity::Warning);
    assert_eq!(state.diagnostics[0].summary, EMPTY_INPUT_SUMMARY);
    assert!(state
        .diagnostics[0]
        .detail
        .iter()
        .any(|d| d.content.contains("2>&1")));
}

#[test]
fn test_empty_pty_does_not_warn() {
    let mut state = new_state(Mode::Interactive);
    send(
        &mut state,
        StreamMessage::Finished {
            received_content: false,
        },
    );
    assert!(state.done);
    assert!(state.diagnostics.is_empty());
}

#[test]
fn test_finished_with_content_does_not_warn() {
    let mut state = new_state(Mode::Pipe);
    send(&mut state, StreamMessage::Log("hello".into()));
    send(
        &mut state,
        StreamMessage::Finished {
            received_content: true,
        },
    );
    assert!(state.diagnostics.is_empty());
    assert_eq!(state.status(), Status::Done);
}

#[test]
fn test_stream_closed_marks_done_once() {
    let mut state = new_state(Mode::Pipe);
    update(&mut state, Message::StreamClosed);
    assert!(state.done);
    assert!(state.diagnostics.is_empty());

    send(
        &mut state,
        StreamMessage::Finished {
            received_content: true,
        },
    );
    update(&mut state, Message::StreamClosed);
    assert!(state.done);
}

#[test]
fn test_nonzero_exit_forces_log_view() {
    let mut state = new_state(Mode::Interactive);
    send(&mut state, StreamMessage::Resource(resource("a.b", &[])));
    send(&mut state, StreamMessage::Prompt("Enter a value:".into()));
    assert!(!state.show_logs);

    update(&mut state, Message::ProcessExited { code: Some(1) });
    assert!(state.has_error);
    assert!(state.show_logs);
    assert_eq!(state.exit_code, Some(1));
    assert!(state.prompt.is_none());
    assert_eq!(state.logs.last().map(String::as_str), Some("Process exited with code 1"));

    send(&mut state, StreamMessage::Resource(resource("c.d", &[])));
    assert!(state.show_logs);
}

#[test]
fn test_zero_exit_is_not_an_error() {
    let mut state = new_state(Mode::Interactive);
    send(&mut state, StreamMessage::Resource(resource("a.b", &[])));
    update(&mut state, Message::ProcessExited { code: Some(0) });
    assert!(!state.has_error);
    assert!(!state.show_logs);
    assert!(state.logs.is_empty());
}

// ─────────────────────────────────────────────────────────
// Tick, auto-scroll and navigation
// ─────────────────────────────────────────────────────────

#[test]
fn test_tick_projects_and_follows_tail() {
    let mut state = new_state(Mode::Pipe);
    for i in 0..50 {
        send(&mut state, StreamMessage::Log(format!("line {}", i)));
    }
    assert!(state.lines.is_empty());

    tick(&mut state);
    assert!(!state.needs_sync);
    assert_eq!(state.lines.len(), 50);
    assert_eq!(state.viewport.cursor, 49);
    assert_eq!(state.viewport.offset, 50 - 24);
}

#[test]
fn test_tick_without_changes_keeps_lines() {
    let mut state = plan_state(3);
    let before = state.lines.clone();
    tick(&mut state);
    assert_eq!(state.lines, before);
}

#[test]
fn test_navigation_stops_following() {
    let mut state = new_state(Mode::Pipe);
    for i in 0..50 {
        send(&mut state, StreamMessage::Log(format!("line {}", i)));
    }
    tick(&mut state);

    press(&mut state, InputKey::Up);
    assert!(!state.auto_scroll);
    assert_eq!(state.viewport.cursor, 48);

    for i in 0..10 {
        send(&mut state, StreamMessage::Log(format!("more {}", i)));
    }
    tick(&mut state);
    assert_eq!(state.viewport.cursor, 48);

    press(&mut state, InputKey::Char('G'));
    assert!(state.auto_scroll);
    assert_eq!(state.viewport.cursor, 59);

    send(&mut state, StreamMessage::Log("tail".into()));
    tick(&mut state);
    assert_eq!(state.viewport.cursor, 60);
}

#[test]
fn test_any_key_disables_auto_scroll() {
    let mut state = new_state(Mode::Pipe);
    assert!(state.auto_scroll);
    press(&mut state, InputKey::Char('m'));
    assert!(!state.auto_scroll);
    assert_eq!(state.rendering_mode, RenderingMode::HighContrast);
}

#[test]
fn test_page_and_home() {
    let mut state = new_state(Mode::Pipe);
    for i in 0..100 {
        send(&mut state, StreamMessage::Log(format!("line {}", i)));
    }
    tick(&mut state);

    press(&mut state, InputKey::Home);
    assert_eq!(state.viewport.cursor, 0);
    assert_eq!(state.viewport.offset, 0);

    press(&mut state, InputKey::PageDown);
    assert_eq!(state.viewport.cursor, 12);
    press(&mut state, InputKey::CharCtrl('u'));
    assert_eq!(state.viewport.cursor, 0);
}

#[test]
fn test_toggle_view_resets_cursor() {
    let mut state = plan_state(40);
    assert!(!state.show_logs);
    assert_eq!(state.viewport.cursor, 39);

    press(&mut state, InputKey::Char('l'));
    assert!(state.show_logs);
    assert_eq!(state.viewport.cursor, 0);
    assert_eq!(state.viewport.offset, 0);
    assert!(!state.auto_scroll);

    press(&mut state, InputKey::Char('L'));
    assert!(!state.show_logs);
    assert_eq!(state.lines.len(), 40);
}

// ─────────────────────────────────────────────────────────
// Expand / collapse
// ─────────────────────────────────────────────────────────

#[test]
fn test_toggle_expand_round_trip() {
    let mut state = plan_state(2);
    let collapsed = state.lines.clone();
    assert_eq!(collapsed.len(), 2);

    press(&mut state, InputKey::Home);
    press(&mut state, InputKey::Enter);
    assert!(state.resources[0].expanded);
    assert_eq!(state.lines.len(), 4);
    assert_eq!(state.viewport.cursor, 0);

    press(&mut state, InputKey::Enter);
    assert!(!state.resources[0].expanded);
    assert_eq!(state.lines, collapsed);
}

#[test]
fn test_expand_all_idempotent() {
    let mut state = plan_state(3);
    let collapsed = state.lines.clone();

    press(&mut state, InputKey::Char('e'));
    let expanded = state.lines.clone();
    assert_eq!(expanded.len(), 9);

    press(&mut state, InputKey::Char('e'));
    assert_eq!(state.lines, expanded);

    press(&mut state, InputKey::Char('c'));
    press(&mut state, InputKey::Char('c'));
    assert_eq!(state.lines, collapsed);
}

#[test]
fn test_collapse_clamps_cursor() {
    let mut state = plan_state(2);
    press(&mut state, InputKey::Char('e'));
    press(&mut state, InputKey::Char('G'));
    assert_eq!(state.viewport.cursor, 5);

    press(&mut state, InputKey::Char('c'));
    assert_eq!(state.viewport.cursor, 1);
    assert_viewport_invariants(&state);
}

#[test]
fn test_toggle_expand_diagnostic() {
    let mut state = new_state(Mode::Pipe);
    let mut diag = diagnostic(Severity::Error, "boom");
    diag.detail = vec![tfscope_core::DiagnosticLine::new("  with a.b,", false)];
    send(&mut state, StreamMessage::Diagnostic(diag));
    tick(&mut state);
    assert_eq!(state.lines.len(), 1);

    update(&mut state, Message::ToggleExpand);
    assert!(state.diagnostics[0].expanded);
    assert_eq!(state.lines.len(), 2);
}

#[test]
fn test_click_selects_then_toggles() {
    let mut state = plan_state(3);
    press(&mut state, InputKey::Home);

    // Header row, blank row, then line 0
    update(&mut state, Message::Click { row: 3 });
    assert_eq!(state.viewport.cursor, 1);
    assert!(!state.resources[1].expanded);

    update(&mut state, Message::Click { row: 3 });
    assert!(state.resources[1].expanded);
    assert_eq!(state.lines.len(), 5);

    update(&mut state, Message::Click { row: 0 });
    assert_eq!(state.viewport.cursor, 1);
}

// ─────────────────────────────────────────────────────────
// Interactive input
// ─────────────────────────────────────────────────────────

#[test]
fn test_input_mode_ignored_in_pipe_mode() {
    let mut state = new_state(Mode::Pipe);
    update(&mut state, Message::EnterInputMode);
    assert!(!state.input_mode);
    assert_eq!(update(&mut state, Message::SubmitInput), UpdateResult::none());
}

#[test]
fn test_typing_and_submitting() {
    let mut state = new_state(Mode::Interactive);
    send(&mut state, StreamMessage::Resource(resource("a.b", &[])));
    send(&mut state, StreamMessage::Prompt("Enter a value:".into()));
    tick(&mut state);

    press(&mut state, InputKey::Char('i'));
    assert!(state.input_mode);
    for c in "yess".chars() {
        press(&mut state, InputKey::Char(c));
    }
    press(&mut state, InputKey::Backspace);
    assert_eq!(state.user_input, "yes");

    let actions = press(&mut state, InputKey::Enter);
    assert_eq!(actions, vec![UpdateAction::SendInput(b"yes\n".to_vec())]);
    assert!(state.user_input.is_empty());
    assert!(state.prompt.is_none());
    assert!(!state.input_mode);
    assert!(state.show_logs);
    assert!(state.auto_scroll);
}

#[test]
fn test_escape_leaves_input_mode_keeping_buffer() {
    let mut state = new_state(Mode::Interactive);
    press(&mut state, InputKey::Char('i'));
    press(&mut state, InputKey::Char('n'));
    press(&mut state, InputKey::Esc);
    assert!(!state.input_mode);
    assert_eq!(state.user_input, "n");

    // Back in normal mode 'q' quits again
    let actions = press(&mut state, InputKey::Char('q'));
    assert_eq!(actions, vec![UpdateAction::Shutdown]);
}

#[test]
fn test_resize_interactive_resizes_pty() {
    let mut state = AppState::new(Mode::Interactive);
    let result = update(
        &mut state,
        Message::Resize {
            width: 120,
            height: 40,
        },
    );
    assert_eq!(
        result.action,
        Some(UpdateAction::ResizePty {
            rows: 40,
            cols: 120
        })
    );
    assert!(state.ready);
    assert_eq!(state.viewport.visible_lines, 34);
}

#[test]
fn test_resize_pipe_has_no_action() {
    let mut state = AppState::new(Mode::Pipe);
    let result = update(
        &mut state,
        Message::Resize {
            width: 120,
            height: 40,
        },
    );
    assert_eq!(result, UpdateResult::none());
}

// ─────────────────────────────────────────────────────────
// Invariants
// ─────────────────────────────────────────────────────────

#[test]
fn test_viewport_invariants_hold_through_session() {
    let mut state = new_state(Mode::Pipe);
    let keys = [
        InputKey::Down,
        InputKey::Char('e'),
        InputKey::PageDown,
        InputKey::Enter,
        InputKey::Char('l'),
        InputKey::End,
        InputKey::Char('c'),
        InputKey::PageUp,
        InputKey::Up,
        InputKey::Char('L'),
    ];

    for step in 0..120 {
        match step % 4 {
            0 => send(
                &mut state,
                StreamMessage::Resource(resource(&format!("r.{}", step), &["  + x = 1"])),
            ),
            1 => send(&mut state, StreamMessage::Log(format!("log {}", step))),
            2 => {
                update(
                    &mut state,
                    Message::Resize {
                        width: 20 + (step % 60) as u16,
                        height: 3 + (step % 40) as u16,
                    },
                );
            }
            _ => {
                press(&mut state, keys[step % keys.len()]);
            }
        }
        tick(&mut state);
        assert_viewport_invariants(&state);
    }
}
