//! Frame pacing for the desktop main loop.

use std::time::Duration;

/// Sleeps for `duration`.
///
/// Spin-sleeps for accurate frame pacing while the window is focused, and falls back to a plain
/// thread sleep otherwise to save CPU.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Time left in a frame of length `budget` after `elapsed` has already been spent.
///
/// Returns `None` when the frame is on or behind schedule.
pub fn frame_remaining(budget: Duration, elapsed: Duration) -> Option<Duration> {
    Some(budget.saturating_sub(elapsed)).filter(|remaining| !remaining.is_zero())
}
