//! Pomodoro countdown bound to one study session.
//!
//! # Invariants
//! - `Completed` is emitted at most once per run; the timer stops afterwards.
//! - Rebinding to another session resets and stops the countdown, so an old
//!   ticker can never complete the new session.

use crate::model::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Paused or already finished; nothing happened.
    Idle,
    /// One second elapsed; seconds left.
    Tick(u32),
    /// Countdown reached zero for this session.
    Completed(RecordId),
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    session_id: RecordId,
    initial: u32,
    remaining: u32,
    running: bool,
}

impl PomodoroTimer {
    pub fn new(session_id: RecordId, duration_minutes: u32) -> Self {
        let initial = duration_minutes.saturating_mul(60);
        Self {
            session_id,
            initial,
            remaining: initial,
            running: false,
        }
    }

    pub fn session_id(&self) -> RecordId {
        self.session_id
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.initial;
    }

    /// Switches the timer to another session.
    pub fn rebind(&mut self, session_id: RecordId, duration_minutes: u32) {
        *self = Self::new(session_id, duration_minutes);
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return TimerEvent::Completed(self.session_id);
        }
        TimerEvent::Tick(self.remaining)
    }

    /// Remaining time as `M:SS`.
    pub fn format_remaining(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
