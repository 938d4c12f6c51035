//! Played-time accounting and turn bookkeeping.
//!
//! The clock never reads wall time on its own. The host calls
//! [`MatchClock::tick`] (or `update_time_played` with a measured delta) on
//! whatever cadence it likes; the clock only decides whether that time counts.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::types::Color;

/// Cadence at which the host is expected to tick the clock.
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClock {
    /// Full-precision play time; snapshots round it down to milliseconds.
    played: Duration,
    paused: bool,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl MatchClock {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            played: Duration::ZERO,
            paused: false,
            started_at,
            ended_at: None,
        }
    }

    pub(crate) fn restore(
        played_ms: u64,
        paused: bool,
        started_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            played: Duration::from_millis(played_ms),
            paused,
            started_at,
            ended_at,
        }
    }

    /// True while time is being credited.
    pub fn is_running(&self) -> bool {
        !self.paused && self.ended_at.is_none()
    }

    /// Credit `elapsed` to the played time. No-op while paused or after
    /// the game ended. Returns whether anything was credited.
    pub fn update_time_played(&mut self, elapsed: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.played = self.played.saturating_add(elapsed);
        true
    }

    /// One [`TICK`] of play.
    pub fn tick(&mut self) -> bool {
        self.update_time_played(TICK)
    }

    /// Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }

    /// Stamp the end of the game. Only the first call has any effect.
    pub fn end(&mut self, at: DateTime<Utc>) -> bool {
        if self.ended_at.is_some() {
            return false;
        }
        self.ended_at = Some(at);
        true
    }

    pub fn total_time_played(&self) -> Duration {
        self.played
    }

    pub(crate) fn played_ms(&self) -> u64 {
        u64::try_from(self.played.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Format played time as `hh:mm:ss`; hours are not wrapped.
    pub fn format_time_played(&self) -> String {
        let total_secs = self.played.as_secs();
        let hours = total_secs / 3600;
        let mins = (total_secs % 3600) / 60;
        let secs = total_secs % 60;
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    }
}

/// Whose move it is and how many half-moves have been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTracker {
    current_player: Color,
    current_turn: u32,
}

impl Default for TurnTracker {
    fn default() -> Self {
        Self::new(Color::White, 0)
    }
}

impl TurnTracker {
    pub fn new(current_player: Color, current_turn: u32) -> Self {
        Self {
            current_player,
            current_turn,
        }
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Half-moves completed so far; 0 before the first move.
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Move number as shown to players ("MOVE #1" for the first half-move).
    pub fn display_turn(&self) -> u32 {
        self.current_turn.saturating_add(1)
    }

    pub(crate) fn advance(&mut self) {
        self.current_player = self.current_player.other();
        self.current_turn = self.current_turn.saturating_add(1);
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
