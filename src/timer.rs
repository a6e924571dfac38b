//! Rest timer countdown between sets.
//!
//! The timer owns no thread. The caller invokes [`RestTimer::tick`] once per
//! second while it is running and reacts to [`TimerEvent::Completed`] with
//! whatever cue the platform offers.

pub const DEFAULT_REST_SECONDS: u32 = 90;
const WARNING_SECONDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Completed,
}

/// Display state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Warning,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECONDS)
    }
}

impl RestTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            duration: seconds,
            remaining: seconds,
            running: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Choose a preset. Stops the countdown.
    pub fn set(&mut self, seconds: u32) {
        self.duration = seconds;
        self.remaining = seconds;
        self.running = false;
    }

    /// Add or remove time, never going below zero. While paused the new
    /// value also becomes the configured duration.
    pub fn adjust(&mut self, delta: i64) {
        let next = (self.remaining as i64 + delta).clamp(0, u32::MAX as i64);
        self.remaining = next as u32;
        if !self.running {
            self.duration = self.remaining;
        }
    }

    /// Start counting down. A finished timer starts over from its duration.
    pub fn start(&mut self) {
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.running = self.remaining > 0;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.duration;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            log::debug!("Rest timer finished");
            return Some(TimerEvent::Completed);
        }
        None
    }

    pub fn phase(&self) -> TimerPhase {
        if self.remaining == 0 {
            TimerPhase::Done
        } else if self.running && self.remaining <= WARNING_SECONDS {
            TimerPhase::Warning
        } else if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    /// `mm:ss` rendering of the remaining time.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_completes_once() {
        let mut t = RestTimer::new(3);
        assert_eq!(t.tick(), None);
        t.start();
        assert_eq!(t.tick(), None);
        assert_eq!(t.tick(), None);
        assert_eq!(t.tick(), Some(TimerEvent::Completed));
        assert_eq!(t.phase(), TimerPhase::Done);
        assert_eq!(t.tick(), None);
        assert!(!t.is_running());
    }

    #[test]
    fn restarting_finished_timer_uses_duration() {
        let mut t = RestTimer::new(1);
        t.start();
        t.tick();
        t.toggle();
        assert!(t.is_running());
        assert_eq!(t.remaining(), 1);
    }

    #[test]
    fn adjust_clamps_and_updates_duration_when_paused() {
        let mut t = RestTimer::default();
        t.adjust(-100);
        assert_eq!(t.remaining(), 0);
        assert_eq!(t.duration(), 0);
        t.adjust(30);
        assert_eq!(t.duration(), 30);

        t.start();
        t.adjust(15);
        assert_eq!(t.remaining(), 45);
        assert_eq!(t.duration(), 30);
        t.reset();
        assert_eq!(t.remaining(), 30);
    }

    #[test]
    fn warning_phase_and_display() {
        let mut t = RestTimer::new(75);
        assert_eq!(t.display(), "01:15");
        assert_eq!(t.phase(), TimerPhase::Idle);
        t.set(11);
        t.start();
        assert_eq!(t.phase(), TimerPhase::Running);
        t.tick();
        assert_eq!(t.phase(), TimerPhase::Warning);
        t.pause();
        assert_eq!(t.phase(), TimerPhase::Idle);
    }
}
