//! Error types for slot-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// A time slot could not be combined with its date under `YYYY-MM-DD h:mm A`.
    #[error("Invalid time slot '{slot}' on {date}")]
    InvalidTimeSlot { date: NaiveDate, slot: String },

    /// A click referenced a position outside the displayed slot list.
    #[error("Slot index {index} out of range for {len} slots")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("End-time phase reached without a chosen start time")]
    MissingStartTime,

    /// The active navigation surface is not showing a slot list.
    #[error("No active slot selection")]
    NoActiveSelection,

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid availability: {0}")]
    InvalidAvailability(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
