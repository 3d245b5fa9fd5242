//! Filesystem-safe timestamps

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// `2024-03-09_14-05-59`: no colons or spaces, sorts lexically
pub const PATH_SAFE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Current local time formatted for use in a file name
#[must_use]
pub fn pathsafenow() -> String {
    pathsafe(&Local::now())
}

/// Format `dt` for use in a file name
pub fn pathsafe<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(PATH_SAFE_FORMAT).to_string()
}
