// Small formatting helpers shared by the screens.

use chrono::Utc;

/// Age of a Unix timestamp (seconds) as a single coarse unit: `42s ago`,
/// `3m ago`, `7h ago`, `2d ago`.
pub fn elapsed_since(unix_secs: i64) -> String {
    elapsed_between(unix_secs, Utc::now().timestamp())
}

fn elapsed_between(from_secs: i64, now_secs: i64) -> String {
    let seconds = (now_secs - from_secs).max(0);
    let minutes = seconds / 60;
    let hours = seconds / 3600;
    let days = seconds / 86400;

    if seconds < 60 {
        format!("{seconds}s ago")
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}
