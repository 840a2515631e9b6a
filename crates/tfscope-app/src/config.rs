//! Settings parser for `<config dir>/tfscope/config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tfscope_core::prelude::*;
use tfscope_core::{PromptDetector, DEFAULT_PROMPT_PATTERN};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "tfscope";

/// Default capacity of the reader → UI channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Default size of each read from the input
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Default time a child gets to exit after SIGTERM before it is killed
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub stream: StreamSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub process: ProcessSettings,
}

/// Input stream settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamSettings {
    /// Capacity of the reader → UI channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Bytes requested per read
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,

    /// Regexes matched against an unterminated tail to detect a prompt
    #[serde(default = "default_prompt_patterns")]
    pub prompt_patterns: Vec<String>,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            read_buffer_size: default_read_buffer_size(),
            prompt_patterns: default_prompt_patterns(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UiSettings {
    /// Batching tick for re-projection and redraw
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Lines moved per mouse wheel notch
    #[serde(default = "default_mouse_scroll_lines")]
    pub mouse_scroll_lines: usize,

    /// Open on the raw log view until the first resource arrives
    #[serde(default = "default_true")]
    pub start_in_log_view: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            mouse_scroll_lines: default_mouse_scroll_lines(),
            start_in_log_view: true,
        }
    }
}

/// Wrapped child process settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessSettings {
    /// Grace period between SIGTERM and a forced kill
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

fn default_prompt_patterns() -> Vec<String> {
    vec![DEFAULT_PROMPT_PATTERN.to_string()]
}

fn default_tick_rate_ms() -> u64 {
    50
}

fn default_mouse_scroll_lines() -> usize {
    3
}

fn default_shutdown_timeout_secs() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Compile the configured prompt patterns
    pub fn prompt_detector(&self) -> Result<PromptDetector> {
        PromptDetector::new(&self.stream.prompt_patterns)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(1))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.process.shutdown_timeout_secs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Default location of the config file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from the default location.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings() -> Settings {
    match default_config_path() {
        Some(path) => load_from_path(&path),
        None => {
            debug!("No config directory on this platform, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from `path`, falling back to defaults on any problem
pub fn load_from_path(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Load settings from a path the user named explicitly.
///
/// Unlike [`load_from_path`], a missing file is an error.
pub fn load_explicit(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::config_not_found(path));
    }
    Ok(load_from_path(path))
}
