use crate::gregorian;
use crate::types::Instant;

/// Midnight of a proleptic Gregorian date.
pub fn gregorian_instant(year: i32, month: i32, day: i32) -> Instant {
    gregorian::fixed_from_ymd(year, month, day).to_instant()
}
