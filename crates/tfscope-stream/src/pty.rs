//! Child process under a pseudo-terminal.
//!
//! Interactive mode runs the wrapped command (e.g. `terraform apply`) on a
//! PTY so it behaves as if attached to a real terminal: it keeps colours and
//! asks its confirmation prompts. The master side is split by role: a cloned
//! reader goes to the stream producer thread, the writer stays here and is
//! only used by the consumer to forward typed input.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
use portable_pty::{native_pty_system, ChildKiller, CommandBuilder, MasterPty, PtySize};

use tfscope_core::prelude::*;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A command running on a pseudo-terminal
pub struct PtySession {
    master: Option<Box<dyn MasterPty + Send>>,
    writer: Option<Box<dyn Write + Send>>,
    child: Box<dyn portable_pty::Child + Send + Sync>,
    pid: Option<u32>,
    exit_code: Option<i32>,
}

impl std::fmt::Debug for PtySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtySession")
            .field("pid", &self.pid)
            .field("exit_code", &self.exit_code)
            .finish()
    }
}

impl PtySession {
    /// Spawn `command` (program followed by its arguments) on a new PTY.
    ///
    /// Returns the session and the reader for the producer thread.
    pub fn spawn(command: &[String], rows: u16, cols: u16) -> Result<(Self, Box<dyn Read + Send>)> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::process_spawn("no command given"))?;

        info!("Spawning on PTY: {}", command.join(" "));

        let pair = native_pty_system()
            .openpty(pty_size(rows, cols))
            .map_err(|e| Error::pty(e.to_string()))?;

        let mut builder = CommandBuilder::new(program);
        builder.args(args);
        if let Ok(cwd) = std::env::current_dir() {
            builder.cwd(cwd);
        }
        builder.env("TERM", "xterm-256color");

        let child = pair
            .slave
            .spawn_command(builder)
            .map_err(|e| Error::process_spawn(format!("{}: {}", program, e)))?;

        // The child holds its own copy; keeping ours would stop EOF from ever arriving
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| Error::pty(e.to_string()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| Error::pty(e.to_string()))?;

        let pid = child.process_id();
        info!("Child started with PID: {:?}", pid);

        Ok((
            Self {
                master: Some(pair.master),
                writer: Some(writer),
                child,
                pid,
                exit_code: None,
            },
            reader,
        ))
    }

    /// Forward bytes to the child's input.
    ///
    /// Best effort: a write to a PTY whose child already exited fails, and
    /// that failure is logged and swallowed.
    pub fn write_input(&mut self, bytes: &[u8]) {
        let Some(writer) = self.writer.as_mut() else {
            debug!("Dropping {} input bytes: PTY writer already closed", bytes.len());
            return;
        };
        if let Err(e) = writer.write_all(bytes).and_then(|_| writer.flush()) {
            warn!("Failed to write to PTY: {}", e);
        }
    }

    /// Propagate a terminal resize to the child
    pub fn resize(&self, rows: u16, cols: u16) {
        if let Some(master) = self.master.as_ref() {
            if let Err(e) = master.resize(pty_size(rows, cols)) {
                debug!("PTY resize failed: {}", e);
            }
        }
    }

    /// Non-blocking exit check. Returns the exit code once the child is gone.
    pub fn try_exit_code(&mut self) -> Option<i32> {
        if self.exit_code.is_some() {
            return self.exit_code;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                let code = status.exit_code() as i32;
                info!("Child exited with code {}", code);
                self.exit_code = Some(code);
                self.exit_code
            }
            Ok(None) => None,
            Err(e) => {
                debug!("try_wait failed: {}", e);
                None
            }
        }
    }

    /// Stop the child and release the PTY.
    ///
    /// Sends SIGTERM, waits up to `timeout` for the child to exit, then kills
    /// it. Signal and write failures are logged and ignored since the
    /// teardown is intentional. Returns the exit code if one was observed.
    pub async fn shutdown(mut self, timeout: Duration) -> Option<i32> {
        self.writer = None;

        if self.try_exit_code().is_none() {
            self.request_termination();

            let start = Instant::now();
            while start.elapsed() < timeout {
                if self.try_exit_code().is_some() {
                    break;
                }
                tokio::time::sleep(EXIT_POLL_INTERVAL).await;
            }

            if self.try_exit_code().is_none() {
                warn!("Child did not exit within {:?}, killing", timeout);
                if let Err(e) = self.child.kill() {
                    debug!("Kill failed: {}", e);
                }
                // Reap so the exit code is recorded when available
                for _ in 0..10 {
                    if self.try_exit_code().is_some() {
                        break;
                    }
                    tokio::time::sleep(EXIT_POLL_INTERVAL).await;
                }
            }
        }

        self.master = None;
        debug!("PTY released");
        self.exit_code
    }

    #[cfg(unix)]
    fn request_termination(&mut self) {
        let Some(pid) = self.pid else { return };
        debug!("Sending SIGTERM to {}", pid);
        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            debug!("SIGTERM failed: {}", e);
        }
    }

    #[cfg(not(unix))]
    fn request_termination(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!("Terminate failed: {}", e);
        }
    }
}

fn pty_size(rows: u16, cols: u16) -> PtySize {
    PtySize {
        rows: rows.max(1),
        cols: cols.max(1),
        pixel_width: 0,
        pixel_height: 0,
    }
}
