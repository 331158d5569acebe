//! Error types for slot-engine operations.
//!
//! The engine's computations never fail; these errors come from strict rule
//! constructors and from converting backend wire records.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid window: start {start} must be before end {end}")]
    InvalidWindow { start: u32, end: u32 },

    #[error("Invalid slot length: {0} minutes")]
    InvalidSlotLength(u32),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid weekday index: {0} (expected 0 = Sunday through 6 = Saturday)")]
    InvalidWeekday(u8),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
