use std::time::{Duration, SystemTime};

/// Formats a retention period for listings, e.g. `1day 2h` or `0s`
#[must_use]
pub fn format_retention(secs: u64) -> String {
    humantime::format_duration(Duration::from_secs(secs)).to_string()
}

/// Formats a modification time in local time
#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats an age rounded down to whole seconds
#[must_use]
pub fn format_age(age: Duration) -> String {
    format_retention(age.as_secs())
}
