use serde::{Deserialize, Serialize};

use crate::consts::{
    DAYS_PER_WEEK, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use crate::math::{floor_mod, narrow};
use crate::prelude::*;
use crate::rata_die::RataDie;

/// An absolute point in time: 100 ns ticks since 0001-01-01T00:00 (proleptic Gregorian).
///
/// This is the only value exchanged with callers; every calendar reads its
/// fields from an `Instant` and builds one back from fields.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{_0}")]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    /// Creates an instant from raw ticks
    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count
    #[inline]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Combines a fixed day with ticks elapsed since its midnight.
    pub const fn from_day_and_time(day: RataDie, time_of_day: i64) -> Self {
        Self((day.get() - 1) * TICKS_PER_DAY + time_of_day)
    }

    /// Ticks elapsed since midnight, always in `0..TICKS_PER_DAY`
    pub const fn time_of_day(self) -> i64 {
        floor_mod(self.0, TICKS_PER_DAY)
    }

    /// Hour of the day, `0..=23`
    pub fn hour(self) -> i32 {
        narrow(self.time_of_day() / TICKS_PER_HOUR)
    }

    /// Minute of the hour, `0..=59`
    pub fn minute(self) -> i32 {
        narrow(self.time_of_day() / TICKS_PER_MINUTE % 60)
    }

    /// Second of the minute, `0..=59`
    pub fn second(self) -> i32 {
        narrow(self.time_of_day() / TICKS_PER_SECOND % 60)
    }

    /// Millisecond of the second, `0..=999`
    pub fn millisecond(self) -> i32 {
        narrow(self.time_of_day() / TICKS_PER_MILLISECOND % 1_000)
    }

    /// Adds `ticks`, returning `None` on overflow
    pub const fn checked_add_ticks(self, ticks: i64) -> Option<Self> {
        match self.0.checked_add(ticks) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

/// Day of the week, numbered from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Maps any integer onto a weekday using floored modulo 7
    pub const fn from_index(index: i64) -> Self {
        match floor_mod(index, DAYS_PER_WEEK) {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        }
    }

    /// Returns the weekday number, Sunday = 0 through Saturday = 6
    #[inline]
    pub const fn index(self) -> i64 {
        self as i64
    }
}

/// How the first week of a year is chosen by `week_of_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekRule {
    /// Week 1 is the week containing the first day of the year.
    FirstDay,
    /// Week 1 is the first week that lies entirely in the year.
    FirstFullWeek,
    /// Week 1 is the first week with at least four days in the year.
    FirstFourDayWeek,
}

impl WeekRule {
    /// First day of week 2 for a year starting on `year_start`.
    pub const fn first_day_of_second_week(self, year_start: RataDie, first_day: DayOfWeek) -> RataDie {
        match self {
            Self::FirstDay => year_start.kday_after(first_day),
            Self::FirstFullWeek => RataDie::new(year_start.kday_on_or_after(first_day).get() + DAYS_PER_WEEK),
            Self::FirstFourDayWeek => RataDie::new(year_start.kday_nearest(first_day).get() + DAYS_PER_WEEK),
        }
    }
}

/// Broad family of the algorithm behind a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmType {
    /// Tracks the solar year
    Solar,
    /// Tracks lunations only
    Lunar,
    /// Tracks lunations, with intercalary months to follow the solar year
    Lunisolar,
}

/// Fields of one day in some calendar. Month and day numbering are calendar specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year:04}-{month:02}-{day:02} (era {era})")]
pub struct CalendarDate {
    pub year:  i32,
    pub month: i32,
    pub day:   i32,
    pub era:   i32,
}

impl CalendarDate {
    /// Bundles the four fields
    pub const fn new(year: i32, month: i32, day: i32, era: i32) -> Self {
        Self { year, month, day, era }
    }
}
