//! The fixed day axis every calendar converts through.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, TICKS_PER_DAY};
use crate::math::floor_div;
use crate::prelude::*;
use crate::types::{DayOfWeek, Instant};

/// A fixed day number. Day 1 is 0001-01-01 in the proleptic Gregorian calendar.
///
/// Monotonic with [`Instant`]: every 24 hour period since the instant epoch
/// maps to exactly one `RataDie`, regardless of time of day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[display(fmt = "RD {_0}")]
#[serde(transparent)]
pub struct RataDie(i64);

impl RataDie {
    /// Wraps a raw fixed day number
    #[inline]
    pub const fn new(day: i64) -> Self {
        Self(day)
    }

    /// Returns the raw fixed day number
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The day containing `instant`. Negative instants floor toward earlier days.
    pub const fn from_instant(instant: Instant) -> Self {
        Self(floor_div(instant.ticks(), TICKS_PER_DAY) + 1)
    }

    /// Midnight at the start of this day.
    pub const fn to_instant(self) -> Instant {
        Instant::from_ticks((self.0 - 1) * TICKS_PER_DAY)
    }

    /// Weekday of this day; day 1 is a Monday.
    pub const fn day_of_week(self) -> DayOfWeek {
        DayOfWeek::from_index(self.0)
    }

    /// Latest day on or before `self` that falls on `k`.
    pub const fn kday_on_or_before(self, k: DayOfWeek) -> Self {
        let shifted = Self(self.0 - k.index());
        Self(self.0 - shifted.day_of_week().index())
    }

    /// Earliest day on or after `self` that falls on `k`.
    pub const fn kday_on_or_after(self, k: DayOfWeek) -> Self {
        Self(self.0 + 6).kday_on_or_before(k)
    }

    /// Day falling on `k` closest to `self`.
    pub const fn kday_nearest(self, k: DayOfWeek) -> Self {
        Self(self.0 + 3).kday_on_or_before(k)
    }

    /// Earliest day strictly after `self` that falls on `k`.
    pub const fn kday_after(self, k: DayOfWeek) -> Self {
        Self(self.0 + DAYS_PER_WEEK).kday_on_or_before(k)
    }

    /// Latest day strictly before `self` that falls on `k`.
    pub const fn kday_before(self, k: DayOfWeek) -> Self {
        Self(self.0 - 1).kday_on_or_before(k)
    }
}

impl Add<i64> for RataDie {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        Self(self.0 + days)
    }
}

impl Sub<i64> for RataDie {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        Self(self.0 - days)
    }
}

impl Sub for RataDie {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICKS_PER_HOUR;
    use crate::gregorian;

    #[test]
    fn test_day_one_is_monday() {
        assert_eq!(RataDie::new(1).day_of_week(), DayOfWeek::Monday);
        assert_eq!(RataDie::new(0).day_of_week(), DayOfWeek::Sunday);
    }

    #[test]
    fn test_known_weekdays() {
        // 2000-01-01 was a Saturday, 1970-01-01 a Thursday
        assert_eq!(gregorian::fixed_from_ymd(2000, 1, 1).day_of_week(), DayOfWeek::Saturday);
        assert_eq!(gregorian::fixed_from_ymd(1970, 1, 1).day_of_week(), DayOfWeek::Thursday);
    }

    #[test]
    fn test_day_of_week_has_period_seven() {
        for n in -30..30 {
            let day = RataDie::new(n);
            assert_eq!(day.day_of_week(), (day + 7).day_of_week());
            assert_ne!(day.day_of_week(), (day + 1).day_of_week());
        }
    }

    #[test]
    fn test_instant_round_trip_floors_negative_ticks() {
        assert_eq!(RataDie::from_instant(Instant::from_ticks(0)), RataDie::new(1));
        assert_eq!(RataDie::from_instant(Instant::from_ticks(TICKS_PER_DAY - 1)), RataDie::new(1));
        assert_eq!(RataDie::from_instant(Instant::from_ticks(TICKS_PER_DAY)), RataDie::new(2));
        assert_eq!(RataDie::from_instant(Instant::from_ticks(-1)), RataDie::new(0));
        assert_eq!(RataDie::from_instant(Instant::from_ticks(-TICKS_PER_DAY)), RataDie::new(0));
        assert_eq!(
            RataDie::from_instant(Instant::from_ticks(-TICKS_PER_DAY - TICKS_PER_HOUR)),
            RataDie::new(-1)
        );

        for n in [-400, -1, 0, 1, 730_120, 3_652_059] {
            let day = RataDie::new(n);
            assert_eq!(RataDie::from_instant(day.to_instant()), day);
        }
    }

    #[test]
    fn test_kday_searches() {
        // 2000-01-01 is a Saturday
        let saturday = gregorian::fixed_from_ymd(2000, 1, 1);
        let sunday = DayOfWeek::Sunday;

        assert_eq!(saturday.kday_on_or_before(DayOfWeek::Saturday), saturday);
        assert_eq!(saturday.kday_on_or_after(DayOfWeek::Saturday), saturday);
        assert_eq!(saturday.kday_after(DayOfWeek::Saturday), saturday + 7);
        assert_eq!(saturday.kday_before(DayOfWeek::Saturday), saturday - 7);

        assert_eq!(saturday.kday_on_or_before(sunday), saturday - 6);
        assert_eq!(saturday.kday_on_or_after(sunday), saturday + 1);
        assert_eq!(saturday.kday_after(sunday), saturday + 1);
        assert_eq!(saturday.kday_before(sunday), saturday - 6);

        // Nearest Wednesday to a Saturday is three days back, nearest Tuesday three days forward
        assert_eq!(saturday.kday_nearest(DayOfWeek::Wednesday), saturday - 3);
        assert_eq!(saturday.kday_nearest(DayOfWeek::Tuesday), saturday + 3);
    }

    #[test]
    fn test_kday_results_fall_on_requested_weekday() {
        let base = RataDie::new(738_000);
        for offset in 0..7 {
            let date = base + offset;
            for k in 0..7 {
                let k = DayOfWeek::from_index(k);
                assert_eq!(date.kday_on_or_before(k).day_of_week(), k);
                assert_eq!(date.kday_on_or_after(k).day_of_week(), k);
                assert_eq!(date.kday_nearest(k).day_of_week(), k);
                assert!((date - date.kday_nearest(k)).abs() <= 3);
                assert!(date.kday_after(k) > date);
                assert!(date.kday_before(k) < date);
            }
        }
    }

    #[test]
    fn test_display_and_serde() {
        let day = RataDie::new(730_120);
        assert_eq!(day.to_string(), "RD 730120");
        let json = serde_json::to_string(&day).expect("failed to serialize fixed day");
        assert_eq!(json, "730120");
    }
}
