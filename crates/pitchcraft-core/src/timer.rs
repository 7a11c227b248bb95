use chrono::{DateTime, Utc};

/// Length of the countdown window in seconds (ten minutes).
pub const COUNTDOWN_SECS: u64 = 600;

/// Remaining time below which the display switches to alert styling.
pub const ALERT_SECS: u64 = 60;

/// Whole seconds elapsed since `start`. Zero if `now` precedes `start`.
///
/// Always derived from the two wall-clock values; there is no retained
/// counter, so a session reset cleanly restarts the computation.
pub fn elapsed_secs(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let ms = now.signed_duration_since(start).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        (ms / 1000) as u64
    }
}

/// Seconds left in the countdown window, clamped at zero.
pub fn remaining_secs(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    COUNTDOWN_SECS.saturating_sub(elapsed_secs(start, now))
}

pub fn is_alert(remaining: u64) -> bool {
    remaining < ALERT_SECS
}

/// "MM:SS", zero-padded.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
