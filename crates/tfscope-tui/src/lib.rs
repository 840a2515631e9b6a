//! tfscope-tui - Terminal UI for tfscope
//!
//! This crate provides the ratatui-based terminal interface. It owns the
//! terminal, drives the TEA loop from tfscope-app, and wires the input
//! stream from tfscope-stream into it.

pub mod event;
pub mod render;
pub mod runner;
pub mod signals;
pub mod terminal;
pub mod theme;

// Re-export main entry point
pub use runner::run;
