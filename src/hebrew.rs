//! The arithmetic Hebrew calendar.
//!
//! Months are numbered in civil order, starting from Tishri: 1 Tishri, 2 Heshvan,
//! 3 Kislev, 4 Tevet, 5 Shevat, 6 Adar (Adar I in leap years), then in leap
//! years 7 Adar II, and the remaining months Nisan through Elul.
//! Month lengths follow the ecclesiastical numbering (Nisan = 1, Tishri = 7,
//! Adar II = 13), so both numberings appear below.

use serde::Serialize;

use crate::any::CalendarKind;
use crate::calendar::{Calendar, CalendarOptions};
use crate::consts::{CURRENT_ERA, HEBREW_TWO_DIGIT_YEAR_MAX};
use crate::error::CalendarError;
use crate::math::{floor_div, floor_mod, narrow};
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate};

/// The only Hebrew era (Anno Mundi)
pub const AM: i32 = 1;

/// Fixed day of 1 Tishri AM 1 (Julian 3761 BCE October 7)
pub const EPOCH: i64 = -1_373_427;

pub const MIN_YEAR: i32 = 5343;
pub const MAX_YEAR: i32 = 6000;

/// Civil number of the intercalary month (Adar II) in leap years
pub const LEAP_MONTH: i32 = 7;

const ADAR: i32 = 12;
const ADAR_II: i32 = 13;

const RANGE: SupportedRange = SupportedRange::new(
    MIN_YEAR,
    MAX_YEAR,
    new_year(MIN_YEAR).get(),
    new_year(MAX_YEAR + 1).get() - 1,
);

pub const fn is_leap_year(year: i32) -> bool {
    floor_mod(7 * year as i64 + 1, 19) < 7
}

pub const fn months_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 13 } else { 12 }
}

/// Days from the epoch to the molad of Tishri, postponed when it falls on Sunday, Wednesday or Friday.
const fn elapsed_days(year: i32) -> i64 {
    let months_elapsed = floor_div(235 * year as i64 - 234, 19);
    let parts_elapsed = 12_084 + 13_753 * months_elapsed;
    let day = 29 * months_elapsed + floor_div(parts_elapsed, 25_920);
    if floor_mod(3 * (day + 1), 7) < 3 { day + 1 } else { day }
}

/// Extra postponement keeping every year length in the allowed set.
const fn new_year_delay(year: i32) -> i64 {
    let current = elapsed_days(year);
    if elapsed_days(year + 1) - current == 356 {
        2
    } else if current - elapsed_days(year - 1) == 382 {
        1
    } else {
        0
    }
}

/// Fixed day of 1 Tishri of `year`
pub const fn new_year(year: i32) -> RataDie {
    RataDie::new(EPOCH + elapsed_days(year) + new_year_delay(year))
}

pub const fn days_in_year(year: i32) -> i32 {
    (new_year(year + 1).get() - new_year(year).get()) as i32
}

/// Ecclesiastical month number (Nisan = 1) of a civil month.
pub const fn civil_to_ecclesiastical(year: i32, month: i32) -> i32 {
    if month <= 6 {
        month + 6
    } else if is_leap_year(year) {
        if month == LEAP_MONTH { ADAR_II } else { month - 7 }
    } else {
        month - 6
    }
}

/// Civil month number (Tishri = 1) of an ecclesiastical month.
pub const fn ecclesiastical_to_civil(year: i32, month: i32) -> i32 {
    if month == ADAR_II {
        LEAP_MONTH
    } else if month >= 7 {
        month - 6
    } else if is_leap_year(year) {
        month + 7
    } else {
        month + 6
    }
}

/// Length of a month given the year's shape.
const fn month_length(ecclesiastical: i32, year_length: i32, leap: bool) -> i32 {
    let short = match ecclesiastical {
        2 | 4 | 6 | 10 | ADAR_II => true,
        ADAR => !leap,
        // Heshvan has 30 days only in complete years
        8 => year_length % 10 != 5,
        // Kislev has 29 days only in deficient years
        9 => year_length % 10 == 3,
        _ => false,
    };
    if short { 29 } else { 30 }
}

pub const fn days_in_month(year: i32, month: i32) -> i32 {
    month_length(civil_to_ecclesiastical(year, month), days_in_year(year), is_leap_year(year))
}

/// Fixed day of a civil-numbered date. Fields are not validated.
pub fn fixed_from_ymd(year: i32, month: i32, day: i32) -> RataDie {
    let year_length = days_in_year(year);
    let leap = is_leap_year(year);
    let preceding: i64 = (1..month)
        .map(|m| i64::from(month_length(civil_to_ecclesiastical(year, m), year_length, leap)))
        .sum();
    new_year(year) + preceding + i64::from(day) - 1
}

pub fn year_from_fixed(day: RataDie) -> i32 {
    let approx = floor_div((day.get() - EPOCH) * 98_496, 35_975_351) + 1;
    let mut year = narrow(approx - 1);
    while new_year(year + 1) <= day {
        year += 1;
    }
    year
}

/// Civil year, month and day of `day`.
pub fn ymd_from_fixed(day: RataDie) -> (i32, i32, i32) {
    let year = year_from_fixed(day);
    let year_length = days_in_year(year);
    let leap = is_leap_year(year);
    let mut remaining = day - new_year(year);
    let mut month = 1;
    loop {
        let length = i64::from(month_length(civil_to_ecclesiastical(year, month), year_length, leap));
        if remaining < length || month == months_in_year(year) {
            break;
        }
        remaining -= length;
        month += 1;
    }
    (year, month, narrow(remaining + 1))
}

/// Hebrew calendar for years 5343 through 6000 AM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HebrewCalendar {
    options: CalendarOptions,
}

impl HebrewCalendar {
    pub const fn new() -> Self {
        Self {
            options: CalendarOptions::new(HEBREW_TWO_DIGIT_YEAR_MAX),
        }
    }
}

impl Default for HebrewCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for HebrewCalendar {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Hebrew
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Lunisolar
    }

    fn eras(&self) -> Vec<i32> {
        vec![AM]
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
            CURRENT_ERA | AM => Ok(AM),
            _ => Err(CalendarError::InvalidEra { era }),
        }
    }

    fn fixed_from_date(&self, year: i32, month: i32, day: i32, _era: i32) -> RataDie {
        fixed_from_ymd(year, month, day)
    }

    fn date_from_fixed(&self, day: RataDie) -> Result<CalendarDate, CalendarError> {
        let (year, month, day) = ymd_from_fixed(day);
        Ok(CalendarDate::new(year, month, day, AM))
    }

    fn months_in_year_unchecked(&self, year: i32, _era: i32) -> i32 {
        months_in_year(year)
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

    fn is_leap_month_unchecked(&self, year: i32, month: i32, _era: i32) -> bool {
        is_leap_year(year) && month == LEAP_MONTH
    }

    fn is_leap_day_unchecked(&self, year: i32, month: i32, day: i32, _era: i32) -> bool {
        // Adar II and the 30th of Adar I only exist in leap years
        is_leap_year(year) && (month == LEAP_MONTH || (month == LEAP_MONTH - 1 && day == 30))
    }

    fn leap_month_unchecked(&self, year: i32, _era: i32) -> i32 {
        if is_leap_year(year) { LEAP_MONTH } else { 0 }
    }

    fn offset_months(&self, year: i32, month: i32, months: i32, _era: i32) -> (i32, i32) {
        let mut year = year;
        let mut month = month + months;
        while month > months_in_year(year) {
            month -= months_in_year(year);
            year += 1;
        }
        while month < 1 {
            year -= 1;
            month += months_in_year(year);
        }
        (year, month)
    }
}
