use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    Idle,
    Counting,
    Complete,
}

impl fmt::Display for CountdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownPhase::Idle => write!(f, "idle"),
            CountdownPhase::Counting => write!(f, "counting"),
            CountdownPhase::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaitingPeriodError {
    #[error("remaining time {remaining} exceeds total time {total}")]
    RemainingExceedsTotal { remaining: u32, total: u32 },

    #[error("a counting period needs time remaining")]
    CountingWithoutTime,

    #[error("an idle period cannot carry time")]
    IdleWithTime,
}

/// Cool-down before the next trade or withdrawal. Times are in minutes and
/// `remaining_time <= total_time` always holds; fields only change through
/// `begin` and `tick`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WaitingPeriodFields")]
pub struct WaitingPeriod {
    is_active: bool,
    remaining_time: u32,
    total_time: u32,
    /// Percent elapsed, 0..=100.
    progress: f64,
    reason: String,
    state: CountdownPhase,
}

/// Wire shape. `is_active` and `progress` are recomputed on load.
#[derive(Deserialize)]
struct WaitingPeriodFields {
    remaining_time: u32,
    total_time: u32,
    #[serde(default)]
    reason: String,
    state: CountdownPhase,
}

impl TryFrom<WaitingPeriodFields> for WaitingPeriod {
    type Error = WaitingPeriodError;

    fn try_from(raw: WaitingPeriodFields) -> Result<Self, Self::Error> {
        if raw.remaining_time > raw.total_time {
            return Err(WaitingPeriodError::RemainingExceedsTotal {
                remaining: raw.remaining_time,
                total: raw.total_time,
            });
        }
        match raw.state {
            CountdownPhase::Counting if raw.remaining_time == 0 => {
                Err(WaitingPeriodError::CountingWithoutTime)
            }
            CountdownPhase::Idle if raw.total_time > 0 => Err(WaitingPeriodError::IdleWithTime),
            CountdownPhase::Idle => Ok(Self::idle()),
            CountdownPhase::Counting => Ok(Self {
                is_active: true,
                remaining_time: raw.remaining_time,
                total_time: raw.total_time,
                progress: compute_progress(raw.total_time, raw.remaining_time),
                reason: raw.reason,
                state: CountdownPhase::Counting,
            }),
            // A finished period has nothing left.
            CountdownPhase::Complete => Ok(Self {
                is_active: false,
                remaining_time: 0,
                total_time: raw.total_time,
                progress: 100.0,
                reason: raw.reason,
                state: CountdownPhase::Complete,
            }),
        }
    }
}

impl Default for WaitingPeriod {
    fn default() -> Self {
        Self::idle()
    }
}

impl WaitingPeriod {
    pub fn idle() -> Self {
        Self {
            is_active: false,
            remaining_time: 0,
            total_time: 0,
            progress: 100.0,
            reason: String::new(),
            state: CountdownPhase::Idle,
        }
    }

    /// Start a new period. A zero-length period is complete on arrival.
    pub fn begin(total_time: u32, reason: impl Into<String>) -> Self {
        let state = if total_time == 0 {
            CountdownPhase::Complete
        } else {
            CountdownPhase::Counting
        };
        Self {
            is_active: total_time > 0,
            remaining_time: total_time,
            total_time,
            progress: compute_progress(total_time, total_time),
            reason: reason.into(),
            state,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub fn total_time(&self) -> u32 {
        self.total_time
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Advance one minute. Returns the phase after the tick; ticking an
    /// idle or finished period is a no-op.
    pub fn tick(&mut self) -> CountdownPhase {
        if self.state != CountdownPhase::Counting {
            return self.state;
        }
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.progress = compute_progress(self.total_time, self.remaining_time);
        if self.remaining_time == 0 {
            self.is_active = false;
            self.state = CountdownPhase::Complete;
        }
        self.state
    }

    pub fn elapsed(&self) -> u32 {
        self.total_time.saturating_sub(self.remaining_time)
    }

    pub fn status_label(&self) -> &'static str {
        match self.phase() {
            CountdownPhase::Counting => "Waiting period active",
            CountdownPhase::Idle | CountdownPhase::Complete => "Waiting period complete",
        }
    }

    /// `"1h 30m remaining"`, `"45m remaining"`, or `"Ready"` once done.
    pub fn remaining_label(&self) -> String {
        if self.remaining_time == 0 {
            return "Ready".to_string();
        }
        let hours = self.remaining_time / 60;
        let minutes = self.remaining_time % 60;
        if hours > 0 {
            format!("{}h {}m remaining", hours, minutes)
        } else {
            format!("{}m remaining", minutes)
        }
    }
}

fn compute_progress(total: u32, remaining: u32) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let elapsed = total.saturating_sub(remaining) as f64;
    (elapsed / total as f64 * 100.0).min(100.0)
}
