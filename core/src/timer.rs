use crate::time::format_clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Idle,
    Tick,
    Expired,
}

/// Per-task countdown, advanced once per second by whoever displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    duration_secs: u64,
    elapsed_secs: u64,
    running: bool,
}

impl Countdown {
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            duration_secs: duration_minutes as u64 * 60,
            elapsed_secs: 0,
            running: true,
        }
    }

    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.duration_secs {
            self.running = false;
            return TimerEvent::Expired;
        }
        TimerEvent::Tick
    }

    /// Back to zero and running again, for redo.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if !self.is_expired() {
            self.running = true;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.elapsed_secs)
    }

    /// Whole minutes, rounded up. This is what gets recorded as actual time.
    pub fn elapsed_minutes(&self) -> u32 {
        self.elapsed_secs.div_ceil(60) as u32
    }

    pub fn progress_percent(&self) -> u16 {
        if self.duration_secs == 0 {
            return 100;
        }
        ((self.elapsed_secs * 100 / self.duration_secs).min(100)) as u16
    }

    pub fn display(&self) -> String {
        format!("{} / {}", format_clock(self.elapsed_secs), format_clock(self.duration_secs))
    }
}
