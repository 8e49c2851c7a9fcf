//! The arithmetic Persian (Solar Hijri) calendar using the 33-year leap rule.

use serde::Serialize;

use crate::any::CalendarKind;
use crate::calendar::{Calendar, CalendarOptions};
use crate::consts::{CURRENT_ERA, MAX_FIXED_DAY, OCTOBER, PERSIAN_TWO_DIGIT_YEAR_MAX};
use crate::error::{CalendarError, DateField, ensure_in_range};
use crate::math::{floor_div, floor_mod, narrow};
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate};

/// The only Persian era (Anno Persico)
pub const AP: i32 = 1;

/// Fixed day of 1 Farvardin AP 1
pub const EPOCH: i64 = 226_895;

pub const MAX_YEAR: i32 = 9378;

/// 9378-10-10 is Gregorian 9999-12-31; month 10 is Dey
const LAST_MONTH_OF_LAST_YEAR: i32 = OCTOBER;
const LAST_DAY_OF_LAST_YEAR: i32 = 10;

const ESFAND: i32 = 12;

/// Days before month 7 begins; the first six months have 31 days
const DAYS_IN_FIRST_HALF: i64 = 186;

const RANGE: SupportedRange = SupportedRange::new(1, MAX_YEAR, EPOCH, MAX_FIXED_DAY);

pub const fn is_leap_year(year: i32) -> bool {
    floor_mod(25 * year as i64 + 11, 33) < 8
}

pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month <= 6 {
        31
    } else if month < ESFAND || is_leap_year(year) {
        30
    } else {
        29
    }
}

pub const fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Days in the year before the first of `month`.
const fn days_before_month(month: i32) -> i64 {
    let month = month as i64;
    if month <= 7 { 31 * (month - 1) } else { 30 * (month - 1) + 6 }
}

pub const fn fixed_from_ymd(year: i32, month: i32, day: i32) -> RataDie {
    let year = year as i64;
    RataDie::new(
        EPOCH - 1 + 365 * (year - 1) + floor_div(8 * year + 21, 33) + days_before_month(month as i32) + day as i64,
    )
}

pub fn year_from_fixed(day: RataDie) -> i32 {
    let estimate = narrow(1 + floor_div(33 * (day.get() - EPOCH) + 3, 12_053));
    if day < fixed_from_ymd(estimate, 1, 1) {
        estimate - 1
    } else if day >= fixed_from_ymd(estimate + 1, 1, 1) {
        estimate + 1
    } else {
        estimate
    }
}

pub fn ymd_from_fixed(day: RataDie) -> (i32, i32, i32) {
    let year = year_from_fixed(day);
    let day_of_year = day - fixed_from_ymd(year, 1, 1);
    let month = if day_of_year < DAYS_IN_FIRST_HALF {
        day_of_year / 31 + 1
    } else {
        (day_of_year - 6) / 30 + 1
    };
    let month = narrow(month);
    let day_of_month = narrow(day_of_year - days_before_month(month) + 1);
    (year, month, day_of_month)
}

/// Persian calendar from 1 Farvardin 1 through 10 Dey 9378.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersianCalendar {
    options: CalendarOptions,
}

impl PersianCalendar {
    pub const fn new() -> Self {
        Self {
            options: CalendarOptions::new(PERSIAN_TWO_DIGIT_YEAR_MAX),
        }
    }
}

impl Default for PersianCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for PersianCalendar {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Persian
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Solar
    }

    fn eras(&self) -> Vec<i32> {
        vec![AP]
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
            CURRENT_ERA | AP => Ok(AP),
            _ => Err(CalendarError::InvalidEra { era }),
        }
    }

    fn check_month(&self, year: i32, month: i32, _era: i32) -> Result<(), CalendarError> {
        let last = if year == MAX_YEAR { LAST_MONTH_OF_LAST_YEAR } else { ESFAND };
        ensure_in_range(DateField::Month, month, 1, last)
    }

    fn check_day(&self, year: i32, month: i32, day: i32, _era: i32) -> Result<(), CalendarError> {
        let last = if year == MAX_YEAR && month == LAST_MONTH_OF_LAST_YEAR {
            LAST_DAY_OF_LAST_YEAR
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
        Ok(CalendarDate::new(year, month, day, AP))
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
        is_leap_year(year) && month == ESFAND && day == 30
    }
}
