//! Color palette (Catppuccin Mocha based).
//!
//! Both rendering modes share these colors; high-contrast mode differs in
//! how styles apply them, not in the colors themselves.

use ratatui::style::Color;

// --- Background ---
pub const BASE: Color = Color::Rgb(30, 30, 46); // #1e1e2e, badge text
pub const SELECTED_BG: Color = Color::Rgb(69, 71, 90); // #45475a

// --- Text ---
pub const TEXT: Color = Color::Rgb(205, 214, 244); // #cdd6f4
pub const DIM: Color = Color::Rgb(127, 132, 156); // #7f849c

// --- Resource actions ---
pub const CREATE: Color = Color::Rgb(166, 227, 161); // #a6e3a1 green
pub const UPDATE: Color = Color::Rgb(249, 226, 175); // #f9e2af yellow
pub const DESTROY: Color = Color::Rgb(255, 85, 85); // #ff5555 red
pub const REPLACE: Color = Color::Rgb(203, 166, 247); // #cba6f7 mauve
pub const IMPORT: Color = Color::Rgb(137, 220, 235); // #89dceb sky

// --- Diagnostics ---
pub const ERROR: Color = DESTROY;
pub const WARNING: Color = Color::Rgb(250, 179, 135); // #fab387 peach
pub const PROMPT: Color = Color::Rgb(245, 194, 231); // #f5c2e7 pink

// --- Header badges ---
pub const PLAN_BADGE: Color = Color::Rgb(137, 180, 250); // #89b4fa blue
pub const LOG_BADGE: Color = REPLACE;
pub const INPUT_BADGE: Color = CREATE;
