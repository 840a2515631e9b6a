//! Main TUI runner - entry point and event loop
//!
//! Contains the application lifecycle:
//! - `run`: open the input source, start the reader, own the terminal
//! - `run_loop`: drain signals and stream messages, render, poll the terminal
//! - cleanup: restore the terminal, stop the reader, stop the child

use std::time::{Duration, Instant};

use tfscope_app::{process_message, AppState, Message, Mode, Settings, UpdateAction};
use tfscope_core::prelude::*;
use tfscope_core::LineClassifier;
use tfscope_stream::{start_stream, InputSource, StreamHandle};
use tokio::sync::mpsc::{self, error::TryRecvError};

use super::{event, render, signals, terminal};

/// Stream messages folded into the state per loop iteration; keeps the UI
/// responsive under a flood of input
const MAX_STREAM_BATCH: usize = 1000;

/// How long an exited child may keep its PTY open before the exit is
/// reported anyway (grandchildren can hold the slave side)
const EXIT_REPORT_GRACE: Duration = Duration::from_millis(500);

/// Run the viewer over stdin, or over `command` spawned on a PTY
pub async fn run(settings: &Settings, command: &[String]) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let prompts = settings.prompt_detector()?;
    let (cols, rows) = terminal::size_or_default();

    let (mut source, reader) = InputSource::open(command, rows, cols)?;
    let mode = if source.is_interactive() {
        info!("Wrapping {:?} on a PTY ({}x{})", command, cols, rows);
        Mode::Interactive
    } else {
        info!("Reading plan output from stdin");
        Mode::Pipe
    };

    let mut stream = start_stream(
        reader,
        LineClassifier::new(prompts),
        settings.stream.channel_capacity,
        settings.stream.read_buffer_size,
    )?;

    let mut term = match terminal::init() {
        Ok(term) => term,
        Err(e) => {
            stream.close();
            source.shutdown(settings.shutdown_timeout()).await;
            return Err(e);
        }
    };

    let mut state = AppState::new(mode).with_log_view(settings.ui.start_in_log_view);

    // External messages (signal handler)
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(16);
    signals::spawn_signal_handler(msg_tx);

    let result = run_loop(&mut term, &mut state, &mut source, &mut stream, msg_rx, settings);

    // Restore terminal before the possibly slow child shutdown
    terminal::restore();

    if let Some(outcome) = stream.close() {
        debug!("Stream reader finished: {:?}", outcome);
    }
    match source.shutdown(settings.shutdown_timeout()).await {
        Some(code) => info!("Child exited with code {}", code),
        None if state.is_interactive() => warn!("Child exit code unavailable"),
        None => {}
    }

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    source: &mut InputSource,
    stream: &mut StreamHandle,
    mut msg_rx: mpsc::Receiver<Message>,
    settings: &Settings,
) -> Result<()> {
    let tick_rate = settings.tick_rate();
    let scroll_lines = settings.ui.mouse_scroll_lines;

    // Seed the layout; the first frame is drawn at the real size
    let size = terminal.size()?;
    dispatch(
        state,
        Message::Resize {
            width: size.width,
            height: size.height,
        },
        source,
        stream,
    );

    let mut stream_closed = false;
    let mut exit_reported = false;
    let mut exited_at: Option<Instant> = None;

    while !state.should_quit() {
        // Process external messages (from signal handler, etc.)
        while let Ok(msg) = msg_rx.try_recv() {
            dispatch(state, msg, source, stream);
        }

        // Process stream messages (non-blocking, bounded)
        if !stream_closed {
            for _ in 0..MAX_STREAM_BATCH {
                match stream.rx.try_recv() {
                    Ok(msg) => dispatch(state, Message::Stream(msg), source, stream),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        stream_closed = true;
                        dispatch(state, Message::StreamClosed, source, stream);
                        break;
                    }
                }
            }
        }

        // Report the child's exit once its output is drained
        if !exit_reported {
            if let Some(code) = source.session_mut().and_then(|s| s.try_exit_code()) {
                let seen = *exited_at.get_or_insert_with(Instant::now);
                if stream_closed || seen.elapsed() >= EXIT_REPORT_GRACE {
                    exit_reported = true;
                    dispatch(state, Message::ProcessExited { code: Some(code) }, source, stream);
                }
            }
        }

        // Render
        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events
        if let Some(message) = event::poll(tick_rate, scroll_lines)? {
            dispatch(state, message, source, stream);
        }
    }

    Ok(())
}

/// Run a message through the update chain and execute its actions
fn dispatch(
    state: &mut AppState,
    message: Message,
    source: &mut InputSource,
    stream: &StreamHandle,
) {
    for action in process_message(state, message) {
        handle_action(action, source, stream);
    }
}

fn handle_action(action: UpdateAction, source: &mut InputSource, stream: &StreamHandle) {
    match action {
        UpdateAction::SendInput(bytes) => match source.session_mut() {
            Some(session) => session.write_input(&bytes),
            None => debug!("Dropping {} input bytes: no child attached", bytes.len()),
        },
        UpdateAction::ResizePty { rows, cols } => {
            if let Some(session) = source.session_mut() {
                session.resize(rows, cols);
            }
        }
        UpdateAction::Shutdown => {
            debug!("Cancelling stream reader");
            stream.cancel();
        }
    }
}
