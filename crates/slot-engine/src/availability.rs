//! Availability index: a staff member's open start times keyed by calendar date.
//!
//! Answers the two questions the booking calendar asks: which dates in a range
//! must be disabled (no slots at all), and which slots to offer once a date is
//! chosen. Lookups are by calendar date only. Instants coming from a calendar
//! widget carry a time of day and an offset, which are dropped with
//! [`calendar_date`] before any lookup.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::clock::TimeSlot;
use crate::error::{Result, SlotError};

/// Date → ordered start-time slots for one staff member.
///
/// Present keys always hold at least one slot. Empty sequences are dropped on
/// construction, so an absent key is the only representation of "no slots".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<NaiveDate, Vec<TimeSlot>>",
    into = "BTreeMap<NaiveDate, Vec<TimeSlot>>"
)]
pub struct AvailabilityMap(BTreeMap<NaiveDate, Vec<TimeSlot>>);

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `availableSlots` JSON object such as
    /// `{"2017-03-31": ["02:00 PM"]}`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidAvailability` for malformed JSON or keys that
    /// are not `YYYY-MM-DD` dates.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SlotError::InvalidAvailability(e.to_string()))
    }

    /// Set the slots for `date`. An empty list removes the date.
    pub fn insert(&mut self, date: NaiveDate, slots: Vec<TimeSlot>) {
        if slots.is_empty() {
            self.0.remove(&date);
        } else {
            self.0.insert(date, slots);
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    /// The slots offered on `date`, or an empty list.
    pub fn slots_for_date(&self, date: NaiveDate) -> Vec<TimeSlot> {
        self.0.get(&date).cloned().unwrap_or_default()
    }

    /// The earliest date on or after `date` that has any slots.
    pub fn first_available_on_or_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.0.range(date..).next().map(|(d, _)| *d)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<NaiveDate, Vec<TimeSlot>>> for AvailabilityMap {
    fn from(raw: BTreeMap<NaiveDate, Vec<TimeSlot>>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<AvailabilityMap> for BTreeMap<NaiveDate, Vec<TimeSlot>> {
    fn from(map: AvailabilityMap) -> Self {
        map.0
    }
}

impl FromIterator<(NaiveDate, Vec<TimeSlot>)> for AvailabilityMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Vec<TimeSlot>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (date, slots) in iter {
            map.insert(date, slots);
        }
        map
    }
}

/// The calendar date of an instant, in the instant's own offset.
///
/// Time of day and offset are discarded: `2017-03-31T23:30:00-05:00` is
/// March 31st even though the same instant is April 1st in UTC.
pub fn calendar_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Every date in `[range_start, range_end]` with no slots.
///
/// Returns an empty set when `range_start > range_end`.
pub fn disabled_dates(
    availability: &AvailabilityMap,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> BTreeSet<NaiveDate> {
    range_start
        .iter_days()
        .take_while(|day| *day <= range_end)
        .filter(|day| !availability.contains(*day))
        .collect()
}

/// [`disabled_dates`] for a range given as instants.
///
/// Both ends are normalized with [`calendar_date`] first.
pub fn disabled_dates_between<Tz: TimeZone>(
    availability: &AvailabilityMap,
    range_start: &DateTime<Tz>,
    range_end: &DateTime<Tz>,
) -> BTreeSet<NaiveDate> {
    disabled_dates(
        availability,
        calendar_date(range_start),
        calendar_date(range_end),
    )
}

/// Disabled dates for the calendar month currently on display.
///
/// # Errors
/// Returns `SlotError::InvalidMonth` if `month` is not in `1..=12`.
pub fn disabled_dates_in_month(
    availability: &AvailabilityMap,
    year: i32,
    month: u32,
) -> Result<BTreeSet<NaiveDate>> {
    let invalid = || SlotError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    Ok(disabled_dates(availability, first, last))
}

/// The slots offered on `date`, or an empty list if the date is absent.
pub fn slots_for_date(availability: &AvailabilityMap, date: NaiveDate) -> Vec<TimeSlot> {
    availability.slots_for_date(date)
}
