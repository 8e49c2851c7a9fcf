//! The proleptic Gregorian calendar, also the reference axis for era-based calendars.

use serde::Serialize;

use crate::any::CalendarKind;
use crate::calendar::{Calendar, CalendarOptions};
use crate::consts::{
    CURRENT_ERA, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_TWO_DIGIT_YEAR_MAX, MARCH, MAX_FIXED_DAY,
    MAX_YEAR, MIN_FIXED_DAY,
};
use crate::error::CalendarError;
use crate::math::{div_mod, floor_div, narrow};
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate};

/// The only Gregorian era (Anno Domini)
pub const AD: i32 = 1;

const DAYS_PER_400_YEARS: i64 = 146_097;
const DAYS_PER_100_YEARS: i64 = 36_524;
const DAYS_PER_4_YEARS: i64 = 1_461;
const DAYS_PER_YEAR: i64 = 365;

const RANGE: SupportedRange = SupportedRange::new(1, MAX_YEAR, MIN_FIXED_DAY, MAX_FIXED_DAY);

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` of `year`.
///
/// # Panics
/// Panics if `month` is negative or greater than 12. Use [`Calendar::days_in_month`] for unvalidated input.
pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Fixed day of a Gregorian date. Fields are not validated.
pub const fn fixed_from_ymd(year: i32, month: i32, day: i32) -> RataDie {
    let prior = year as i64 - 1;
    let month_offset = floor_div(367 * month as i64 - 362, 12);
    let february_correction = if month <= FEBRUARY {
        0
    } else if is_leap_year(year) {
        -1
    } else {
        -2
    };
    RataDie::new(
        DAYS_PER_YEAR * prior + floor_div(prior, 4) - floor_div(prior, 100)
            + floor_div(prior, 400)
            + month_offset
            + february_correction
            + day as i64,
    )
}

/// Gregorian year containing `day`.
pub fn year_from_fixed(day: RataDie) -> i32 {
    let (n400, d1) = div_mod(day.get() - 1, DAYS_PER_400_YEARS);
    let (n100, d2) = div_mod(d1, DAYS_PER_100_YEARS);
    let (n4, d3) = div_mod(d2, DAYS_PER_4_YEARS);
    let n1 = floor_div(d3, DAYS_PER_YEAR);
    let year = 400 * n400 + 100 * n100 + 4 * n4 + n1;
    // The last day of a 4- or 400-year cycle
    if n100 == 4 || n1 == 4 { narrow(year) } else { narrow(year + 1) }
}

/// Year, month and day of `day`.
pub fn ymd_from_fixed(day: RataDie) -> (i32, i32, i32) {
    let year = year_from_fixed(day);
    let prior_days = day - fixed_from_ymd(year, 1, 1);
    let correction = if day < fixed_from_ymd(year, MARCH, 1) {
        0
    } else if is_leap_year(year) {
        1
    } else {
        2
    };
    let month = narrow(floor_div(12 * (prior_days + correction) + 373, 367));
    let day_of_month = narrow(day - fixed_from_ymd(year, month, 1) + 1);
    (year, month, day_of_month)
}

/// Gregorian calendar covering 0001-01-01 through 9999-12-31 in a single era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GregorianCalendar {
    options: CalendarOptions,
}

impl GregorianCalendar {
    pub const fn new() -> Self {
        Self {
            options: CalendarOptions::new(GREGORIAN_TWO_DIGIT_YEAR_MAX),
        }
    }
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for GregorianCalendar {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Gregorian
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Solar
    }

    fn eras(&self) -> Vec<i32> {
        vec![AD]
    }

    fn range(&self) -> SupportedRange {
        RANGE
    }

    fn options(&self) -> &CalendarOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut CalendarOptions {
        &mut self.options
    }

    fn resolve_era(&self, era: i32) -> Result<i32, CalendarError> {
        match era {
            CURRENT_ERA | AD => Ok(AD),
            _ => Err(CalendarError::InvalidEra { era }),
        }
    }

    fn fixed_from_date(&self, year: i32, month: i32, day: i32, _era: i32) -> RataDie {
        fixed_from_ymd(year, month, day)
    }

    fn date_from_fixed(&self, day: RataDie) -> Result<CalendarDate, CalendarError> {
        let (year, month, day) = ymd_from_fixed(day);
        Ok(CalendarDate::new(year, month, day, AD))
    }

    fn days_in_month_unchecked(&self, year: i32, month: i32, _era: i32) -> i32 {
        days_in_month(year, month)
    }

    fn days_in_year_unchecked(&self, year: i32, _era: i32) -> i32 {
        days_in_year(year)
    }

    fn is_leap_year_unchecked(&self, year: i32, _era: i32) -> bool {
        is_leap_year(year)
    }

    fn is_leap_day_unchecked(&self, year: i32, month: i32, day: i32, _era: i32) -> bool {
        is_leap_year(year) && month == FEBRUARY && day == FEBRUARY_DAYS_LEAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DateField;
    use crate::test_utils::gregorian_instant;

    #[test]
    fn test_is_leap_year() {
        struct TestCase {
            year:     i32,
            expected: bool,
        }

        let cases = [
            TestCase { year: 2000, expected: true },
            TestCase { year: 1900, expected: false },
            TestCase { year: 2004, expected: true },
            TestCase { year: 2023, expected: false },
            TestCase { year: 2100, expected: false },
            TestCase { year: 2400, expected: true },
        ];

        for case in &cases {
            assert_eq!(is_leap_year(case.year), case.expected, "year {}", case.year);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_days_in_month_panics_on_bad_month() {
        let _ = days_in_month(2024, 13);
    }

    #[test]
    fn test_checked_days_in_month_rejects_bad_month() {
        let calendar = GregorianCalendar::new();
        assert_eq!(calendar.days_in_month(2024, 2, AD), Ok(29));
        assert_eq!(
            calendar.days_in_month(2024, 13, AD),
            Err(CalendarError::OutOfRange {
                field: DateField::Month,
                value: 13,
            })
        );
    }

    #[test]
    fn test_known_fixed_days() {
        assert_eq!(fixed_from_ymd(1, 1, 1), RataDie::new(1));
        assert_eq!(fixed_from_ymd(2000, 1, 1), RataDie::new(730_120));
        assert_eq!(fixed_from_ymd(2000, 12, 31), RataDie::new(730_485));
        assert_eq!(fixed_from_ymd(9999, 12, 31), RataDie::new(MAX_FIXED_DAY));
        assert_eq!(fixed_from_ymd(1, 1, 0), RataDie::new(0));
    }

    #[test]
    fn test_year_end_boundaries() {
        // Last day of a 400-year cycle and of a 4-year cycle
        assert_eq!(year_from_fixed(fixed_from_ymd(2000, 12, 31)), 2000);
        assert_eq!(year_from_fixed(fixed_from_ymd(2004, 12, 31)), 2004);
        assert_eq!(year_from_fixed(fixed_from_ymd(2001, 1, 1)), 2001);
        assert_eq!(ymd_from_fixed(fixed_from_ymd(1900, 3, 1)), (1900, 3, 1));
        assert_eq!(ymd_from_fixed(fixed_from_ymd(2024, 2, 29)), (2024, 2, 29));
    }

    #[test]
    fn test_round_trip_whole_range() {
        let mut expected = (1, 1, 1);
        for n in MIN_FIXED_DAY..=MAX_FIXED_DAY {
            let day = RataDie::new(n);
            let fields = ymd_from_fixed(day);
            assert_eq!(fields, expected, "fields of {day}");
            assert_eq!(fixed_from_ymd(fields.0, fields.1, fields.2), day);

            let (year, month, day_of_month) = fields;
            expected = if day_of_month < days_in_month(year, month) {
                (year, month, day_of_month + 1)
            } else if month < 12 {
                (year, month + 1, 1)
            } else {
                (year + 1, 1, 1)
            };
        }
    }

    #[test]
    fn test_calendar_fields_and_eras() {
        let calendar = GregorianCalendar::new();
        let instant = gregorian_instant(2024, 2, 29);
        let date = calendar.date(instant).expect("failed to read date");
        assert_eq!(date, CalendarDate::new(2024, 2, 29, AD));
        assert_eq!(calendar.eras(), vec![AD]);
        assert_eq!(calendar.era(instant), Ok(AD));
        assert_eq!(calendar.day_of_year(instant), Ok(60));
        assert_eq!(calendar.is_leap_day(2024, 2, 29, CURRENT_ERA), Ok(true));
        assert_eq!(calendar.is_leap_day(2024, 2, 28, AD), Ok(false));
        assert_eq!(calendar.days_in_year(2023, AD), Ok(365));
        assert_eq!(calendar.leap_month(2024, AD), Ok(0));
        assert_eq!(calendar.is_leap_month(2024, 2, AD), Ok(false));
        assert_eq!(calendar.algorithm_type(), AlgorithmType::Solar);
        assert_eq!(calendar.resolve_era(2), Err(CalendarError::InvalidEra { era: 2 }));
    }

    #[test]
    fn test_range_ends() {
        let calendar = GregorianCalendar::new();
        assert_eq!(calendar.min_supported().ticks(), 0);
        assert_eq!(
            calendar.date(calendar.max_supported()),
            Ok(CalendarDate::new(9999, 12, 31, AD))
        );
        assert_eq!(
            calendar.is_leap_year(10_000, AD),
            Err(CalendarError::OutOfRange {
                field: DateField::Year,
                value: 10_000,
            })
        );
    }
}
