use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_DAY;
use crate::error::{CalendarError, DateField, ensure_in_range};
use crate::prelude::*;
use crate::rata_die::RataDie;
use crate::types::Instant;

/// An inclusive span of fixed days.
/// The start day must be less than or equal to the end day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start}..={end}")]
pub struct DayRange {
    start: RataDie,
    end:   RataDie,
}

impl DayRange {
    /// Creates a new span, or `None` if start > end.
    pub fn new(start: RataDie, end: RataDie) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Creates a span without checking the order of its ends.
    pub(crate) const fn new_unchecked(start: RataDie, end: RataDie) -> Self {
        Self { start, end }
    }

    /// Returns the first day of the span
    pub const fn start(&self) -> RataDie {
        self.start
    }

    /// Returns the last day of the span (inclusive)
    pub const fn end(&self) -> RataDie {
        self.end
    }

    /// Checks if the span contains a given day
    pub fn contains(&self, day: RataDie) -> bool {
        self.start <= day && day <= self.end
    }

    /// Checks if this span shares at least one day with another span
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days in the span
    pub fn len(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Always `false`: construction rejects `end < start`, so a span holds at
    /// least its start day.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// The bounds a calendar validates every input against.
///
/// `min_year..=max_year` applies to the calendar's current era; `days` bounds
/// every instant the calendar reads or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupportedRange {
    pub min_year: i32,
    pub max_year: i32,
    pub days:     DayRange,
}

impl SupportedRange {
    pub(crate) const fn new(min_year: i32, max_year: i32, first_day: i64, last_day: i64) -> Self {
        Self {
            min_year,
            max_year,
            days: DayRange::new_unchecked(RataDie::new(first_day), RataDie::new(last_day)),
        }
    }

    /// Fails unless `year` lies in `min_year..=max_year`
    pub fn check_year(&self, year: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::Year, year, self.min_year, self.max_year)
    }

    /// Returns the day containing `instant`, failing if it is outside the span.
    pub fn check_instant(&self, instant: Instant) -> Result<RataDie, CalendarError> {
        let day = RataDie::from_instant(instant);
        if !self.days.contains(day) {
            return Err(CalendarError::out_of_range(DateField::Instant, instant.ticks()));
        }
        Ok(day)
    }

    /// Earliest supported instant: midnight of the first day
    pub const fn min_instant(&self) -> Instant {
        self.days.start().to_instant()
    }

    /// Latest supported instant: the last tick of the last day
    pub const fn max_instant(&self) -> Instant {
        Instant::from_ticks(self.days.end().to_instant().ticks() + TICKS_PER_DAY - 1)
    }
}
