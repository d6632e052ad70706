//! Day clock for the Ferryman game.
//!
//! The clock cycles through `Dawn -> Day -> Evening` once per game day. It
//! never ticks on its own: each call to [`PhaseClock::advance`] moves it
//! exactly one phase.
//!
//! # Day boundary
//!
//! Leaving `Evening` does three things, in this order:
//!
//! 1. Increment the day and emit `DayChanged`.
//! 2. If the new day is past `max_days` and the end has not been signalled
//!    yet, emit `GameEnded`.
//! 3. Enter `Dawn` and emit `PhaseChanged`.
//!
//! What happens when the game ends is up to the host; the clock keeps
//! advancing if asked and never signals the end a second time.

use ferryman_events::{EventSink, GameEvent};
use ferryman_types::Phase;
use tracing::{debug, info};

use crate::config::ClockConfig;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u32::MAX")]
    DayOverflow,

    /// Invalid clock configuration.
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Outcome of a single [`PhaseClock::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAdvance {
    /// Phase entered by this step.
    pub phase: Phase,
    /// Day number after this step.
    pub day: u32,
    /// Whether this step crossed a day boundary.
    pub day_changed: bool,
    /// Whether this step raised the end-of-game signal.
    pub game_ended: bool,
}

/// Day and phase state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseClock {
    /// Current day number.
    day: u32,
    /// Current phase within the day.
    phase: Phase,
    /// Last playable day.
    max_days: u32,
    /// Whether the end-of-game signal has already fired.
    ended: bool,
}

impl PhaseClock {
    /// Create a clock at `Dawn` of the configured starting day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `max_days` is 0 or the
    /// starting day is already past it.
    pub fn new(config: &ClockConfig) -> Result<Self, ClockError> {
        Self::from_parts(config.starting_day, Phase::Dawn, config.max_days)
    }

    /// Create a clock from explicit parameters (useful for testing and
    /// state restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `max_days` is 0 or `day`
    /// is past `max_days`.
    pub fn from_parts(day: u32, phase: Phase, max_days: u32) -> Result<Self, ClockError> {
        if max_days == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "max_days must be at least 1".to_owned(),
            });
        }
        if day > max_days {
            return Err(ClockError::InvalidConfig {
                reason: format!("day {day} is past max_days {max_days}"),
            });
        }
        Ok(Self {
            day,
            phase,
            max_days,
            ended: false,
        })
    }

    /// Move one phase forward, emitting the resulting events.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the day counter cannot be
    /// incremented. Nothing changes in that case.
    pub fn advance(&mut self, sink: &mut impl EventSink) -> Result<PhaseAdvance, ClockError> {
        let next = self.phase.next();
        let mut game_ended = false;
        let day_changed = self.phase.ends_day();

        if day_changed {
            self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
            info!(day = self.day, "Day started");
            sink.emit(GameEvent::DayChanged { day: self.day });

            if self.day > self.max_days && !self.ended {
                self.ended = true;
                game_ended = true;
                info!(day = self.day, max_days = self.max_days, "Final day passed, game over");
                sink.emit(GameEvent::GameEnded { day: self.day });
            }
        }

        self.phase = next;
        debug!(day = self.day, phase = %next, "Phase changed");
        sink.emit(GameEvent::PhaseChanged { phase: next });

        Ok(PhaseAdvance {
            phase: next,
            day: self.day,
            day_changed,
            game_ended,
        })
    }

    /// Overwrite day and phase from a snapshot.
    ///
    /// Emits `DayChanged` then `PhaseChanged`. A snapshot taken after the
    /// end counts as already ended, so the signal is not raised again.
    pub fn restore(&mut self, day: u32, phase: Phase, sink: &mut impl EventSink) {
        self.day = day;
        self.phase = phase;
        self.ended = day > self.max_days;
        sink.emit(GameEvent::DayChanged { day });
        sink.emit(GameEvent::PhaseChanged { phase });
    }

    /// Return the current day number.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Return the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Return the last playable day.
    pub const fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Return whether the end-of-game signal has fired.
    pub const fn is_over(&self) -> bool {
        self.ended
    }

    /// Return the number of full days left before the end, saturating at 0.
    pub const fn days_remaining(&self) -> u32 {
        self.max_days.saturating_sub(self.day)
    }
}
