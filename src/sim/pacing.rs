/// Frame pacing for the tick driver.
///
/// Each frame runs tick + render, then sleeps for whatever is left of the
/// frame budget (`1000 / fps` ms). A frame that overruns its budget sleeps
/// zero rather than a negative amount.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    /// `fps` of 0 is treated as 1.
    pub fn from_fps(fps: u32) -> Self {
        FramePacer { budget: Duration::from_secs(1) / fps.max(1) }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sleep owed after a frame that took `elapsed`.
    pub fn sleep_after(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }
}
