use serde::Serialize;

/// What a single [`CountdownTimer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The clock was stopped, paused or already at zero.
    Idle,
    /// One second elapsed; the remaining seconds are carried.
    Running(u32),
    /// This tick took the clock to zero.
    Expired,
}

/// Match countdown with one-second granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownTimer {
    duration: u32,
    seconds: u32,
    is_running: bool,
    is_paused: bool,
}

impl CountdownTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            seconds: duration,
            is_running: false,
            is_paused: false,
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Seconds played so far.
    pub fn elapsed(&self) -> u32 {
        self.duration - self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_expired(&self) -> bool {
        self.seconds == 0
    }

    /// Start counting down. Returns `false` when the clock is already at
    /// zero, in which case nothing changes until [`reset`](Self::reset).
    pub fn start(&mut self) -> bool {
        if self.is_expired() {
            return false;
        }
        self.is_running = true;
        self.is_paused = false;
        true
    }

    pub fn pause(&mut self) {
        if self.is_running {
            self.is_paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.is_running {
            self.is_paused = false;
        }
    }

    /// Stop without touching the remaining seconds.
    pub fn stop(&mut self) {
        self.is_running = false;
        self.is_paused = false;
    }

    pub fn reset(&mut self) {
        self.seconds = self.duration;
        self.stop();
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.is_running || self.is_paused || self.seconds == 0 {
            return Tick::Idle;
        }
        self.seconds -= 1;
        if self.seconds == 0 {
            self.is_running = false;
            Tick::Expired
        } else {
            Tick::Running(self.seconds)
        }
    }

    /// Minute of play for an event happening now, `ceil(elapsed / 60)`.
    pub fn current_minute(&self) -> u32 {
        self.elapsed().div_ceil(60)
    }
}
