//! Input stream reader.
//!
//! A single producer thread owns the blocking input (stdin or a PTY master),
//! runs the [`LineClassifier`] over it and pushes [`StreamMessage`]s into a
//! bounded channel. The thread holds the only sender, so the channel closes
//! exactly when the producer exits. A full channel blocks the producer,
//! which throttles a fast pipe instead of buffering it all in memory.

use std::io::{self, Read};
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use tfscope_core::prelude::*;
use tfscope_core::{LineClassifier, StreamMessage};

/// How a read loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Input reached end of stream; `Finished` was delivered
    Finished,
    /// Cancellation was observed; nothing further was sent
    Cancelled,
    /// The consumer dropped its receiver
    ConsumerGone,
}

/// Handle held by the consumer side of a running stream
#[derive(Debug)]
pub struct StreamHandle {
    /// Classified messages, in input order
    pub rx: mpsc::Receiver<StreamMessage>,
    cancel_tx: watch::Sender<bool>,
    thread: Option<JoinHandle<ReadOutcome>>,
}

impl StreamHandle {
    /// Ask the producer to stop.
    ///
    /// The producer notices within one read iteration. A producer blocked
    /// in `read` (e.g. on an idle stdin) only notices once the read returns,
    /// so callers shutting down should not wait on it.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    /// Whether the producer thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Cancel, drop the receiver and collect the producer's outcome if it
    /// has already exited.
    pub fn close(mut self) -> Option<ReadOutcome> {
        self.cancel();
        self.rx.close();
        let thread = self.thread.take()?;
        if thread.is_finished() {
            thread.join().ok()
        } else {
            debug!("Stream reader still blocked in read; detaching");
            None
        }
    }
}

/// Start the producer thread over `reader`.
pub fn start_stream(
    reader: Box<dyn Read + Send>,
    classifier: LineClassifier,
    channel_capacity: usize,
    read_buffer_size: usize,
) -> Result<StreamHandle> {
    let (tx, rx) = mpsc::channel(channel_capacity.max(1));
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let thread = spawn_reader(reader, classifier, tx, cancel_rx, read_buffer_size)?;
    Ok(StreamHandle {
        rx,
        cancel_tx,
        thread: Some(thread),
    })
}

/// Spawn the dedicated reader thread.
///
/// The thread owns `tx`; dropping it on exit closes the channel.
pub fn spawn_reader(
    reader: Box<dyn Read + Send>,
    classifier: LineClassifier,
    tx: mpsc::Sender<StreamMessage>,
    cancel: watch::Receiver<bool>,
    read_buffer_size: usize,
) -> Result<JoinHandle<ReadOutcome>> {
    std::thread::Builder::new()
        .name("tfscope-reader".to_string())
        .spawn(move || {
            let outcome = read_stream(reader, classifier, read_buffer_size, &cancel, |msg| {
                tx.blocking_send(msg).is_ok()
            });
            debug!("Stream reader exiting: {:?}", outcome);
            outcome
        })
        .map_err(Error::from)
}

/// Synchronous read → classify → deliver loop.
///
/// `sink` returns `false` once the consumer is gone. Cancellation is checked
/// before every read and before every delivery; once it is observed nothing
/// more is delivered, not even `Finished`.
pub fn read_stream<R, F>(
    mut reader: R,
    mut classifier: LineClassifier,
    read_buffer_size: usize,
    cancel: &watch::Receiver<bool>,
    mut sink: F,
) -> ReadOutcome
where
    R: Read,
    F: FnMut(StreamMessage) -> bool,
{
    let mut buf = vec![0u8; read_buffer_size.max(1)];
    let is_cancelled = || *cancel.borrow();

    loop {
        if is_cancelled() {
            return ReadOutcome::Cancelled;
        }

        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }
            Err(e) if is_pty_hangup(&e) => {
                debug!("Input closed by child exit");
                break;
            }
            Err(e) => {
                warn!("Input read failed, ending stream: {}", e);
                break;
            }
        };

        for msg in classifier.feed(&buf[..n]) {
            if is_cancelled() {
                return ReadOutcome::Cancelled;
            }
            if !sink(msg) {
                return ReadOutcome::ConsumerGone;
            }
        }
    }

    for msg in classifier.finish() {
        if is_cancelled() {
            return ReadOutcome::Cancelled;
        }
        if !sink(msg) {
            return ReadOutcome::ConsumerGone;
        }
    }

    ReadOutcome::Finished
}

/// A PTY master reports `EIO` once the child side has gone away
#[cfg(unix)]
fn is_pty_hangup(e: &io::Error) -> bool {
    e.raw_os_error() == Some(nix::errno::Errno::EIO as i32)
}

#[cfg(not(unix))]
fn is_pty_hangup(_e: &io::Error) -> bool {
    false
}
