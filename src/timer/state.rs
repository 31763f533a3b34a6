use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    Idle,
    Armed,
    Running,
    Finished,
}

impl Default for TimerPhase {
    fn default() -> Self {
        TimerPhase::Idle
    }
}

/// Pure countdown state. Phase invariants: `remaining_seconds` is zero in
/// `Idle` and `Finished`, positive in `Armed` and `Running`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub phase: TimerPhase,
    pub remaining_seconds: u64,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
        }
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, total_seconds: u64) {
        debug_assert!(total_seconds > 0);
        self.remaining_seconds = total_seconds;
        self.phase = TimerPhase::Armed;
    }

    pub fn begin(&mut self) {
        debug_assert!(self.remaining_seconds > 0);
        self.phase = TimerPhase::Running;
    }

    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Armed;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds (possibly negative) seconds, saturating at zero. Ignored while
    /// `Finished`: alarm acknowledgment is the only exit from that phase.
    pub fn add_seconds(&mut self, delta: i64) {
        if self.phase == TimerPhase::Finished {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_add_signed(delta);
        if self.remaining_seconds == 0 {
            if self.phase != TimerPhase::Running {
                self.phase = TimerPhase::Idle;
            }
        } else if self.phase == TimerPhase::Idle {
            self.phase = TimerPhase::Armed;
        }
    }

    /// One countdown tick. The tick that reaches zero transitions to
    /// `Finished` and returns true, so an armed duration of `d` seconds
    /// finishes after exactly `d` ticks.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Finished;
            true
        } else {
            false
        }
    }

    pub fn acknowledge(&mut self) {
        if self.phase == TimerPhase::Finished {
            *self = Self::default();
        }
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// `MM:SS` with zero-padding; minutes are unbounded rather than wrapped at 60.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
