//! Network picker UI for a 128x64 SSD1306 panel and three buttons.
//!
//! Everything here is hardware-agnostic: the display is reached through
//! [`text::TextDisplay`], the buttons through [`input::ButtonLevels`], and the
//! radio and attack subsystems through [`scan::NetworkScanner`] and
//! [`action::AttackLauncher`].

#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod glyph;
pub mod input;
pub mod model;
pub mod network;
pub mod scan;
pub mod text;

#[cfg(test)]
mod testing;

/// Shown once after display bring-up, before the first scan.
pub const SPLASH_MESSAGE: &str = "SMARTBOX.LV\nWIFI\nSTOPPER";

pub use model::{MAX_NETWORKS, SCANNING_MESSAGE, VISIBLE_ROWS};
