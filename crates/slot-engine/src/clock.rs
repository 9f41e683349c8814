//! Time-slot labels and the UTC "combine and offset" arithmetic.
//!
//! A [`TimeSlot`] is a bare time-of-day label such as `"7:00 AM"`. It only becomes
//! an instant when combined with a calendar date, and that combination is always
//! interpreted in UTC so the local timezone of the host can never shift the
//! result. Duration offsets are applied to the full instant, so an end time that
//! crosses midnight wraps correctly (`11:45 PM` + 30 min → `12:15 AM`).

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Parse pattern for a date joined to a slot label (`YYYY-MM-DD h:mm A`).
const DATE_SLOT_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// Output pattern for a slot label (`h:mm A`, no leading zero on the hour).
const SLOT_FORMAT: &str = "%-I:%M %p";

/// Heading shown above a slot list (`dddd, d mmm yyyy`).
const HEADING_FORMAT: &str = "%A, %-d %b %Y";

/// A 12-hour clock time-of-day label with an AM/PM suffix, e.g. `"7:00 AM"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The absolute UTC instant of this slot on `date`.
    pub fn on(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        combine(date, self)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for TimeSlot {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl AsRef<str> for TimeSlot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Combine a calendar date and a slot label into a UTC instant.
///
/// The hour may be written with one or two digits (`"7:00 AM"`, `"02:00 PM"`).
///
/// # Errors
/// Returns `SlotError::InvalidTimeSlot` if the label does not parse as `h:mm A`.
pub fn combine(date: NaiveDate, slot: &TimeSlot) -> Result<DateTime<Utc>> {
    let text = format!("{} {}", date.format("%Y-%m-%d"), slot.as_str().trim());
    NaiveDateTime::parse_from_str(&text, DATE_SLOT_FORMAT)
        .map(|ndt| ndt.and_utc())
        .map_err(|_| SlotError::InvalidTimeSlot {
            date,
            slot: slot.as_str().to_string(),
        })
}

/// Format the time-of-day of an instant as a slot label, dropping the date.
pub fn format_slot(instant: DateTime<Utc>) -> TimeSlot {
    TimeSlot(instant.format(SLOT_FORMAT).to_string())
}

/// The slot label `duration_minutes` after `slot` on `date`.
///
/// # Errors
/// Returns `SlotError::InvalidTimeSlot` if `slot` cannot be combined with `date`.
pub fn end_time(date: NaiveDate, slot: &TimeSlot, duration_minutes: u32) -> Result<TimeSlot> {
    let start = combine(date, slot)?;
    Ok(format_slot(start + Duration::minutes(i64::from(duration_minutes))))
}

/// Human-readable date heading, e.g. `Friday, 31 Mar 2017`.
pub fn format_heading(date: NaiveDate) -> String {
    date.format(HEADING_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_digit_hour_is_accepted() {
        let date = NaiveDate::from_ymd_opt(2017, 3, 31).unwrap();
        let instant = combine(date, &TimeSlot::from("02:00 PM")).unwrap();
        assert_eq!(instant.to_rfc3339(), "2017-03-31T14:00:00+00:00");
    }

    #[test]
    fn noon_and_midnight_labels() {
        let date = NaiveDate::from_ymd_opt(2017, 3, 31).unwrap();
        assert_eq!(
            combine(date, &"12:00 PM".into()).unwrap().to_rfc3339(),
            "2017-03-31T12:00:00+00:00"
        );
        assert_eq!(
            combine(date, &"12:00 AM".into()).unwrap().to_rfc3339(),
            "2017-03-31T00:00:00+00:00"
        );
    }
}
