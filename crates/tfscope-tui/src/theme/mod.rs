//! Centralized theme system.
//!
//! This module provides:
//! - `palette` - Raw color constants
//! - `styles` - Semantic style builder functions, per rendering mode

pub mod palette;
pub mod styles;
