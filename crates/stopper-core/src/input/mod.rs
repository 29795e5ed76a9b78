//! Button sampling: debounce, edge detection and long-press timing.
//!
//! Levels arrive already inverted (`true` = pressed) through [`ButtonLevels`];
//! the pin polarity lives in the HAL crate.

mod controller;

pub use controller::{ButtonInputController, InputEvents, PollReport};

/// Hold time that turns a SELECT press into an attack request.
pub const LONG_PRESS_MS: u64 = 800;
/// Delay between button samples in the firmware loop.
pub const POLL_INTERVAL_MS: u64 = 50;

/// One sample of the three buttons, `true` while held.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawButtons {
    pub up: bool,
    pub down: bool,
    pub select: bool,
}

impl RawButtons {
    pub const fn released() -> Self {
        Self {
            up: false,
            down: false,
            select: false,
        }
    }
}

/// Source of pressed/released levels for the navigation buttons.
pub trait ButtonLevels {
    type Error;

    fn read(&mut self) -> Result<RawButtons, Self::Error>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputConfig {
    pub long_press_ms: u64,
    /// Extra consecutive samples a level change must persist; 0 accepts it at once.
    pub debounce_polls: u8,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_MS,
            debounce_polls: 0,
        }
    }
}

impl InputConfig {
    pub const fn with_long_press_ms(mut self, long_press_ms: u64) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }

    pub const fn with_debounce_polls(mut self, debounce_polls: u8) -> Self {
        self.debounce_polls = debounce_polls;
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PressPhase {
    Idle,
    Holding,
    LongPress,
}

/// Phase of a press held for `held_for_ms`; `None` means released.
pub const fn classify_press(held_for_ms: Option<u64>, threshold_ms: u64) -> PressPhase {
    match held_for_ms {
        None => PressPhase::Idle,
        Some(held) if held >= threshold_ms => PressPhase::LongPress,
        Some(_) => PressPhase::Holding,
    }
}

/// Per-button level filter.
///
/// A transition is dated by the first raw sample that showed it, so the
/// filter delay does not shift press timing.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    stable: bool,
    pending: u8,
    required: u8,
    pending_since_ms: u64,
    stable_since_ms: u64,
}

impl Debouncer {
    pub const fn new(required: u8) -> Self {
        Self {
            stable: false,
            pending: 0,
            required,
            pending_since_ms: 0,
            stable_since_ms: 0,
        }
    }

    /// Time of the first raw sample of the current stable level.
    pub const fn stable_since_ms(&self) -> u64 {
        self.stable_since_ms
    }

    /// Feeds one raw sample taken at `now_ms` and returns the filtered level.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> bool {
        if raw == self.stable {
            self.pending = 0;
            return self.stable;
        }

        if self.pending == 0 {
            self.pending_since_ms = now_ms;
        }
        self.pending = self.pending.saturating_add(1);
        if self.pending > self.required {
            self.stable = raw;
            self.stable_since_ms = self.pending_since_ms;
            self.pending = 0;
        }
        self.stable
    }
}
