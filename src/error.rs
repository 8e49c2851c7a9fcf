use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// The input a [`CalendarError::OutOfRange`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
    #[display(fmt = "instant")]
    Instant,
    #[display(fmt = "fixed day")]
    FixedDay,
    #[display(fmt = "months")]
    Months,
    #[display(fmt = "years")]
    Years,
    #[display(fmt = "two-digit year max")]
    TwoDigitYearMax,
    #[display(fmt = "hijri adjustment")]
    HijriAdjustment,
}

/// Error type for every calendar operation.
///
/// Validation runs era, then year, then month, then day; the first failing
/// stage decides which error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CalendarError {
    /// The era number is not known to the calendar.
    #[error("Invalid era: {era}")]
    InvalidEra { era: i32 },

    /// A field, instant or argument lies outside the calendar's supported bounds.
    #[error("Value out of range: {field} = {value}")]
    OutOfRange { field: DateField, value: i64 },
}

impl CalendarError {
    pub(crate) fn out_of_range(field: DateField, value: impl Into<i64>) -> Self {
        Self::OutOfRange {
            field,
            value: value.into(),
        }
    }
}

/// Fails with [`CalendarError::OutOfRange`] unless `min <= value <= max`.
pub(crate) fn ensure_in_range(
    field: DateField,
    value: impl Into<i64>,
    min: impl Into<i64>,
    max: impl Into<i64>,
) -> Result<(), CalendarError> {
    let value = value.into();
    if value < min.into() || value > max.into() {
        return Err(CalendarError::OutOfRange { field, value });
    }
    Ok(())
}

/// Error type for building a custom [`EraTable`](crate::EraTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EraTableError {
    /// A table needs at least one era.
    #[error("Era table has no eras")]
    Empty,

    /// Era number 0 stands for "current era" and cannot name an interval.
    #[error("Era number 0 is reserved for the current era")]
    ReservedEra,

    /// Two intervals share an era number.
    #[error("Era {era} appears more than once")]
    DuplicateEra { era: i32 },

    /// An interval ends before it starts.
    #[error("Era {era} ends ({end}) before it starts ({start})")]
    InvertedInterval { era: i32, start: i64, end: i64 },

    /// Two intervals share at least one day.
    #[error("Eras {first} and {second} overlap")]
    Overlap { first: i32, second: i32 },
}
