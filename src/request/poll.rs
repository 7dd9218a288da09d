//! Auto-fetch tick counter
//!
//! The host ticks every button once per second. A button with a non-zero
//! interval fires on the first tick and then every `interval` ticks.

/// Counts ticks between automatic fires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoFetch {
    ticks: u32,
}

impl AutoFetch {
    /// Create a counter that fires on its first enabled tick
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick; returns whether the request should fire now.
    ///
    /// An interval of 0 disables fetching and resets the counter.
    pub fn tick(&mut self, interval_secs: u32) -> bool {
        if interval_secs == 0 {
            self.ticks = 0;
            return false;
        }

        let fire = self.ticks % interval_secs == 0;
        if fire {
            self.ticks = 0;
        }
        self.ticks += 1;
        fire
    }

    /// Ticks counted since the last fire
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
