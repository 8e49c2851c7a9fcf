//! The Julian calendar: Gregorian months with a leap year every fourth year.
//!
//! Years are astronomical in the arithmetic (no year 0 in the historical
//! numbering), but the supported range only ever exposes years 1 through 9999.

use serde::Serialize;

use crate::any::CalendarKind;
use crate::calendar::{Calendar, CalendarOptions};
use crate::consts::{
    CURRENT_ERA, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_TWO_DIGIT_YEAR_MAX, MARCH, MAX_FIXED_DAY,
    MAX_YEAR, OCTOBER,
};
use crate::error::{CalendarError, DateField, ensure_in_range};
use crate::math::{floor_div, floor_mod, narrow};
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate};

/// The only Julian era
pub const AD: i32 = 1;

/// Fixed day of Julian 0001-01-01 (Gregorian 0000-12-30)
pub const EPOCH: i64 = -1;

/// Julian 9999-10-19 is Gregorian 9999-12-31
const LAST_DAY_OF_LAST_MONTH: i32 = 19;

const RANGE: SupportedRange = SupportedRange::new(1, MAX_YEAR, EPOCH, MAX_FIXED_DAY);

pub const fn is_leap_year(year: i32) -> bool {
    floor_mod(year as i64, 4) == if year > 0 { 0 } else { 3 }
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

pub const fn fixed_from_ymd(year: i32, month: i32, day: i32) -> RataDie {
    let correction = if month <= FEBRUARY {
        0
    } else if is_leap_year(year) {
        -1
    } else {
        -2
    };
    // No year 0: 1 BCE is followed directly by 1 CE
    let year = if year < 0 { year as i64 + 1 } else { year as i64 };
    RataDie::new(
        EPOCH - 1 + 365 * (year - 1) + floor_div(year - 1, 4) + floor_div(367 * month as i64 - 362, 12)
            + correction
            + day as i64,
    )
}

pub fn year_from_fixed(day: RataDie) -> i32 {
    let approx = floor_div(4 * (day.get() - EPOCH) + 1464, 1461);
    narrow(if approx <= 0 { approx - 1 } else { approx })
}

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

/// Julian calendar from Julian 0001-01-01 through Julian 9999-10-19.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JulianCalendar {
    options: CalendarOptions,
}

impl JulianCalendar {
    pub const fn new() -> Self {
        Self {
            options: CalendarOptions::new(GREGORIAN_TWO_DIGIT_YEAR_MAX),
        }
    }
}

impl Default for JulianCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for JulianCalendar {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Julian
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

    fn check_month(&self, year: i32, month: i32, _era: i32) -> Result<(), CalendarError> {
        let last = if year == MAX_YEAR { OCTOBER } else { 12 };
        ensure_in_range(DateField::Month, month, 1, last)
    }

    fn check_day(&self, year: i32, month: i32, day: i32, _era: i32) -> Result<(), CalendarError> {
        let last = if year == MAX_YEAR && month == OCTOBER {
            LAST_DAY_OF_LAST_MONTH
        } else {
            days_in_month(year, month)
        };
        ensure_in_range(DateField::Day, day, 1, last)
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
        if is_leap_year(year) { 366 } else { 365 }
    }

    fn is_leap_year_unchecked(&self, year: i32, _era: i32) -> bool {
        is_leap_year(year)
    }

    fn is_leap_day_unchecked(&self, year: i32, month: i32, day: i32, _era: i32) -> bool {
        is_leap_year(year) && month == FEBRUARY && day == FEBRUARY_DAYS_LEAP
    }
}
