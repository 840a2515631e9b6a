//! # tfscope-stream - Input Streams and Child Processes
//!
//! Owns everything that blocks: reading stdin or a PTY master on a dedicated
//! thread, classifying what it reads, and managing the lifecycle of a wrapped
//! child process.
//!
//! ## Public API
//!
//! - [`start_stream()`] / [`StreamHandle`] - Producer thread + bounded channel
//! - [`read_stream()`] - The synchronous read loop, usable without a thread
//! - [`PtySession`] - Child on a pseudo-terminal with graceful shutdown
//! - [`InputSource`] - Where the stream comes from

pub mod pty;
pub mod reader;

pub use pty::PtySession;
pub use reader::{read_stream, spawn_reader, start_stream, ReadOutcome, StreamHandle};

use std::io::Read;

use tfscope_core::prelude::*;

/// Where plan output is read from
#[derive(Debug)]
pub enum InputSource {
    /// Piped standard input
    Stdin,
    /// A command spawned on a pseudo-terminal
    Pty(PtySession),
}

impl InputSource {
    /// Spawn `command` on a PTY, or read stdin when `command` is empty.
    ///
    /// Returns the source together with the reader for the producer thread.
    pub fn open(command: &[String], rows: u16, cols: u16) -> Result<(Self, Box<dyn Read + Send>)> {
        if command.is_empty() {
            return Ok((InputSource::Stdin, Box::new(std::io::stdin())));
        }
        let (session, reader) = PtySession::spawn(command, rows, cols)?;
        Ok((InputSource::Pty(session), reader))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, InputSource::Pty(_))
    }

    pub fn session_mut(&mut self) -> Option<&mut PtySession> {
        match self {
            InputSource::Pty(session) => Some(session),
            InputSource::Stdin => None,
        }
    }

    /// Release the source, stopping the child if there is one
    pub async fn shutdown(self, timeout: std::time::Duration) -> Option<i32> {
        match self {
            InputSource::Pty(session) => session.shutdown(timeout).await,
            InputSource::Stdin => None,
        }
    }
}
