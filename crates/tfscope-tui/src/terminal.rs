//! Terminal setup and restoration

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tfscope_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter the alternate screen in raw mode with mouse reporting
pub fn init() -> Result<ratatui::DefaultTerminal> {
    let terminal = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    execute!(std::io::stdout(), EnableMouseCapture)
        .map_err(|e| Error::TerminalInit(format!("mouse capture: {}", e)))?;
    Ok(terminal)
}

/// Leave the alternate screen; failures are logged, never fatal
pub fn restore() {
    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
        warn!("Failed to disable mouse capture: {}", e);
    }
    if let Err(e) = ratatui::try_restore() {
        warn!("{}", Error::TerminalRestore(e.to_string()));
    }
}

/// Current terminal size, 80x24 when it cannot be queried
pub fn size_or_default() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or((80, 24))
}
