//! The contract every calendar variant honors.
//!
//! A variant supplies the *hooks*: era resolution, per-stage range checks and
//! the raw algorithm (fixed day <-> fields, month and year lengths). The
//! provided methods build the full operation set on top of them, so every
//! variant validates in the same order: era, year, month, day.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::any::CalendarKind;
use crate::consts::{
    CURRENT_ERA, DAYS_PER_WEEK, JANUARY, MAX_MONTHS_DELTA, MAX_YEARS_DELTA, MIN_TWO_DIGIT_YEAR_MAX,
    MONTHS_PER_YEAR, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};
use crate::error::{CalendarError, DateField, ensure_in_range};
use crate::math::{div_mod, floor_div, narrow};
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate, DayOfWeek, Instant, WeekRule};

/// Mutable settings shared by all calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarOptions {
    /// Last year of the 100-year window two-digit years expand into.
    pub two_digit_year_max: i32,
}

impl CalendarOptions {
    pub(crate) const fn new(two_digit_year_max: i32) -> Self {
        Self { two_digit_year_max }
    }
}

/// Operations common to every calendar.
///
/// Methods ending in `_unchecked` and the `check_*` methods are hooks: they
/// assume the earlier validation stages already passed and are not meant to
/// be called with unvalidated input.
pub trait Calendar {
    /// Which calendar this is
    fn kind(&self) -> CalendarKind;

    /// Algorithm family of the calendar
    fn algorithm_type(&self) -> AlgorithmType;

    /// Era numbers known to the calendar, newest first
    fn eras(&self) -> Vec<i32>;

    /// Year and day bounds of the calendar
    fn range(&self) -> SupportedRange;

    /// Current settings
    fn options(&self) -> &CalendarOptions;

    /// Settings for update. Use the validating setters instead of writing directly.
    fn options_mut(&mut self) -> &mut CalendarOptions;

    /// Maps an era argument to a concrete era, resolving [`CURRENT_ERA`].
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEra` for eras the calendar does not know.
    fn resolve_era(&self, era: i32) -> Result<i32, CalendarError>;

    /// Checks `year` against the resolved `era`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is unsupported.
    fn check_year(&self, year: i32, _era: i32) -> Result<(), CalendarError> {
        self.range().check_year(year)
    }

    /// Checks `month` in an already validated year.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the month is unsupported.
    fn check_month(&self, year: i32, month: i32, era: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::Month, month, 1, self.months_in_year_unchecked(year, era))
    }

    /// Checks `day` in an already validated year and month.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day is unsupported.
    fn check_day(&self, year: i32, month: i32, day: i32, era: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::Day, day, 1, self.days_in_month_unchecked(year, month, era))
    }

    /// Fixed day of a validated date.
    fn fixed_from_date(&self, year: i32, month: i32, day: i32, era: i32) -> RataDie;

    /// Fields of a fixed day inside [`Calendar::range`].
    ///
    /// # Errors
    /// Era-based calendars return `CalendarError::OutOfRange` for days no era covers.
    fn date_from_fixed(&self, day: RataDie) -> Result<CalendarDate, CalendarError>;

    fn months_in_year_unchecked(&self, _year: i32, _era: i32) -> i32 {
        MONTHS_PER_YEAR
    }

    fn days_in_month_unchecked(&self, year: i32, month: i32, era: i32) -> i32;

    fn days_in_year_unchecked(&self, year: i32, era: i32) -> i32;

    fn is_leap_year_unchecked(&self, year: i32, era: i32) -> bool;

    fn is_leap_month_unchecked(&self, _year: i32, _month: i32, _era: i32) -> bool {
        false
    }

    fn is_leap_day_unchecked(&self, year: i32, month: i32, day: i32, era: i32) -> bool;

    /// Number of the intercalary month of `year`, or 0 when it has none.
    fn leap_month_unchecked(&self, _year: i32, _era: i32) -> i32 {
        0
    }

    /// Year and month `months` months after the given ones.
    fn offset_months(&self, year: i32, month: i32, months: i32, _era: i32) -> (i32, i32) {
        shift_months(year, month, months)
    }

    /// Year and month `years` years after the given ones.
    fn offset_years(&self, year: i32, month: i32, years: i32, era: i32) -> (i32, i32) {
        let year = year + years;
        (year, month.min(self.months_in_year_unchecked(year, era)))
    }

    /// Returns the two-digit year pivot
    fn two_digit_year_max(&self) -> i32 {
        self.options().two_digit_year_max
    }

    /// Sets the two-digit year pivot.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` unless the pivot is a supported year
    /// and at least 99.
    fn set_two_digit_year_max(&mut self, value: i32) -> Result<(), CalendarError> {
        check_two_digit_year_max(&self.range(), value)?;
        debug!(calendar = %self.kind(), value, "two-digit year pivot updated");
        self.options_mut().two_digit_year_max = value;
        Ok(())
    }

    /// Earliest instant the calendar accepts
    fn min_supported(&self) -> Instant {
        self.range().min_instant()
    }

    /// Latest instant the calendar accepts
    fn max_supported(&self) -> Instant {
        self.range().max_instant()
    }

    /// Runs the era and year stages, returning the resolved era.
    ///
    /// # Errors
    /// Returns the error of the first failing stage.
    fn validate_year(&self, year: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.resolve_era(era)?;
        self.check_year(year, era)?;
        Ok(era)
    }

    /// Runs the era, year and month stages, returning the resolved era.
    ///
    /// # Errors
    /// Returns the error of the first failing stage.
    fn validate_month(&self, year: i32, month: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.validate_year(year, era)?;
        self.check_month(year, month, era)?;
        Ok(era)
    }

    /// Runs all four stages, returning the resolved era.
    ///
    /// # Errors
    /// Returns the error of the first failing stage.
    fn validate_date(&self, year: i32, month: i32, day: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.validate_month(year, month, era)?;
        self.check_day(year, month, day, era)?;
        Ok(era)
    }

    /// Fixed day of `instant`, checked against the supported span.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for instants outside [`Calendar::range`].
    fn fixed_from_instant(&self, instant: Instant) -> Result<RataDie, CalendarError> {
        self.range().check_instant(instant)
    }

    /// All fields of `instant`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn date(&self, instant: Instant) -> Result<CalendarDate, CalendarError> {
        let day = self.fixed_from_instant(instant)?;
        self.date_from_fixed(day)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn year(&self, instant: Instant) -> Result<i32, CalendarError> {
        Ok(self.date(instant)?.year)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn month(&self, instant: Instant) -> Result<i32, CalendarError> {
        Ok(self.date(instant)?.month)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn day_of_month(&self, instant: Instant) -> Result<i32, CalendarError> {
        Ok(self.date(instant)?.day)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn era(&self, instant: Instant) -> Result<i32, CalendarError> {
        Ok(self.date(instant)?.era)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn day_of_week(&self, instant: Instant) -> Result<DayOfWeek, CalendarError> {
        Ok(self.fixed_from_instant(instant)?.day_of_week())
    }

    /// Day of the year, starting at 1.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn day_of_year(&self, instant: Instant) -> Result<i32, CalendarError> {
        let day = self.fixed_from_instant(instant)?;
        let date = self.date_from_fixed(day)?;
        let year_start = self.fixed_from_date(date.year, JANUARY, 1, date.era);
        Ok(narrow(day - year_start + 1))
    }

    fn hour(&self, instant: Instant) -> i32 {
        instant.hour()
    }

    fn minute(&self, instant: Instant) -> i32 {
        instant.minute()
    }

    fn second(&self, instant: Instant) -> i32 {
        instant.second()
    }

    fn milliseconds(&self, instant: Instant) -> i32 {
        instant.millisecond()
    }

    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn days_in_month(&self, year: i32, month: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.validate_month(year, month, era)?;
        Ok(self.days_in_month_unchecked(year, month, era))
    }

    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn days_in_year(&self, year: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.validate_year(year, era)?;
        Ok(self.days_in_year_unchecked(year, era))
    }

    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn months_in_year(&self, year: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.validate_year(year, era)?;
        Ok(self.months_in_year_unchecked(year, era))
    }

    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn is_leap_year(&self, year: i32, era: i32) -> Result<bool, CalendarError> {
        let era = self.validate_year(year, era)?;
        Ok(self.is_leap_year_unchecked(year, era))
    }

    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn is_leap_month(&self, year: i32, month: i32, era: i32) -> Result<bool, CalendarError> {
        let era = self.validate_month(year, month, era)?;
        Ok(self.is_leap_month_unchecked(year, month, era))
    }

    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn is_leap_day(&self, year: i32, month: i32, day: i32, era: i32) -> Result<bool, CalendarError> {
        let era = self.validate_date(year, month, day, era)?;
        Ok(self.is_leap_day_unchecked(year, month, day, era))
    }

    /// Intercalary month of `year`, 0 when there is none.
    ///
    /// # Errors
    /// Returns the error of the first failing validation stage.
    fn leap_month(&self, year: i32, era: i32) -> Result<i32, CalendarError> {
        let era = self.validate_year(year, era)?;
        Ok(self.leap_month_unchecked(year, era))
    }

    /// Builds an instant from calendar fields and a time of day.
    ///
    /// # Errors
    /// Date fields are validated first (era, year, month, day), then the time of day.
    #[allow(clippy::too_many_arguments)]
    fn to_instant(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
        era: i32,
    ) -> Result<Instant, CalendarError> {
        let era = self.validate_date(year, month, day, era)?;
        let time_of_day = time_to_ticks(hour, minute, second, millisecond)?;
        let fixed = self.fixed_from_date(year, month, day, era);
        if !self.range().days.contains(fixed) {
            return Err(CalendarError::out_of_range(DateField::Day, day));
        }
        Ok(Instant::from_day_and_time(fixed, time_of_day))
    }

    /// Moves `instant` by whole months, clamping the day to the target month.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `months` exceeds ±120000 or the
    /// result leaves the supported range.
    fn add_months(&self, instant: Instant, months: i32) -> Result<Instant, CalendarError> {
        ensure_in_range(DateField::Months, months, -MAX_MONTHS_DELTA, MAX_MONTHS_DELTA)?;
        let date = self.date(instant)?;
        let (year, month) = self.offset_months(date.year, date.month, months, date.era);
        recombine(self, instant, year, month, date.day, date.era)
    }

    /// Moves `instant` by whole years, clamping month and day when needed.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `years` exceeds ±10000 or the
    /// result leaves the supported range.
    fn add_years(&self, instant: Instant, years: i32) -> Result<Instant, CalendarError> {
        ensure_in_range(DateField::Years, years, -MAX_YEARS_DELTA, MAX_YEARS_DELTA)?;
        let date = self.date(instant)?;
        let (year, month) = self.offset_years(date.year, date.month, years, date.era);
        recombine(self, instant, year, month, date.day, date.era)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    fn add_days(&self, instant: Instant, days: i32) -> Result<Instant, CalendarError> {
        offset_instant(self, instant, i64::from(days), TICKS_PER_DAY)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    fn add_weeks(&self, instant: Instant, weeks: i32) -> Result<Instant, CalendarError> {
        offset_instant(self, instant, i64::from(weeks), DAYS_PER_WEEK * TICKS_PER_DAY)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    fn add_hours(&self, instant: Instant, hours: i32) -> Result<Instant, CalendarError> {
        offset_instant(self, instant, i64::from(hours), TICKS_PER_HOUR)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    fn add_minutes(&self, instant: Instant, minutes: i32) -> Result<Instant, CalendarError> {
        offset_instant(self, instant, i64::from(minutes), TICKS_PER_MINUTE)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    fn add_seconds(&self, instant: Instant, seconds: i32) -> Result<Instant, CalendarError> {
        offset_instant(self, instant, i64::from(seconds), TICKS_PER_SECOND)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported range.
    fn add_milliseconds(&self, instant: Instant, milliseconds: i64) -> Result<Instant, CalendarError> {
        offset_instant(self, instant, milliseconds, TICKS_PER_MILLISECOND)
    }

    /// Week number of `instant` within its year.
    ///
    /// Finds the first day of week 2 under `rule`; dates more than a week
    /// before it belong to the previous year, which is then tried instead.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for unsupported instants.
    fn week_of_year(&self, instant: Instant, rule: WeekRule, first_day: DayOfWeek) -> Result<i32, CalendarError> {
        let day = self.fixed_from_instant(instant)?;
        let date = self.date_from_fixed(day)?;
        let mut year = date.year;
        loop {
            let year_start = self.fixed_from_date(year, JANUARY, 1, date.era);
            let second_week = rule.first_day_of_second_week(year_start, first_day);
            let offset = day - second_week;
            if offset >= -DAYS_PER_WEEK {
                return Ok(narrow(floor_div(offset, DAYS_PER_WEEK) + 2));
            }
            trace!(year, offset, "date precedes week 1, retrying previous year");
            year -= 1;
        }
    }

    /// Expands a two-digit year using [`Calendar::two_digit_year_max`].
    ///
    /// Years of 100 and above pass through unchanged.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for negative input or a result that
    /// is not a valid year of the current era.
    fn to_four_digit_year(&self, year: i32) -> Result<i32, CalendarError> {
        if year < 0 {
            return Err(CalendarError::out_of_range(DateField::Year, year));
        }
        let expanded = if year < 100 {
            let pivot = self.two_digit_year_max();
            let (century, in_century) = div_mod(i64::from(pivot), 100);
            let base = century * 100;
            if i64::from(year) <= in_century {
                narrow(base + i64::from(year))
            } else {
                narrow(base + i64::from(year) - 100)
            }
        } else {
            year
        };
        self.validate_year(expanded, CURRENT_ERA)?;
        Ok(expanded)
    }
}

/// Fails unless `value` lies in `max(99, min_year)..=max_year` of `range`.
pub(crate) fn check_two_digit_year_max(range: &SupportedRange, value: i32) -> Result<(), CalendarError> {
    ensure_in_range(
        DateField::TwoDigitYearMax,
        value,
        MIN_TWO_DIGIT_YEAR_MAX.max(range.min_year),
        range.max_year,
    )
}

/// Carries month overflow into the year with floored arithmetic.
pub(crate) fn shift_months(year: i32, month: i32, months: i32) -> (i32, i32) {
    let total = i64::from(year) * i64::from(MONTHS_PER_YEAR) + i64::from(month - 1) + i64::from(months);
    let (year, month) = div_mod(total, i64::from(MONTHS_PER_YEAR));
    (narrow(year), narrow(month + 1))
}

/// Converts a time of day to ticks after midnight.
pub(crate) fn time_to_ticks(hour: i32, minute: i32, second: i32, millisecond: i32) -> Result<i64, CalendarError> {
    ensure_in_range(DateField::Hour, hour, 0, 23)?;
    ensure_in_range(DateField::Minute, minute, 0, 59)?;
    ensure_in_range(DateField::Second, second, 0, 59)?;
    ensure_in_range(DateField::Millisecond, millisecond, 0, 999)?;
    Ok(i64::from(hour) * TICKS_PER_HOUR
        + i64::from(minute) * TICKS_PER_MINUTE
        + i64::from(second) * TICKS_PER_SECOND
        + i64::from(millisecond) * TICKS_PER_MILLISECOND)
}

/// Rebuilds an instant after month or year arithmetic, keeping its time of day.
fn recombine<C: Calendar + ?Sized>(
    calendar: &C,
    instant: Instant,
    year: i32,
    month: i32,
    day: i32,
    era: i32,
) -> Result<Instant, CalendarError> {
    let era = calendar.validate_month(year, month, era)?;
    let day = day.min(calendar.days_in_month_unchecked(year, month, era));
    calendar.check_day(year, month, day, era)?;
    let fixed = calendar.fixed_from_date(year, month, day, era);
    if !calendar.range().days.contains(fixed) {
        return Err(CalendarError::out_of_range(DateField::Instant, instant.ticks()));
    }
    Ok(Instant::from_day_and_time(fixed, instant.time_of_day()))
}

fn offset_instant<C: Calendar + ?Sized>(
    calendar: &C,
    instant: Instant,
    amount: i64,
    unit_ticks: i64,
) -> Result<Instant, CalendarError> {
    let shifted = amount
        .checked_mul(unit_ticks)
        .and_then(|delta| instant.checked_add_ticks(delta))
        .ok_or_else(|| CalendarError::out_of_range(DateField::Instant, instant.ticks()))?;
    calendar.fixed_from_instant(shifted)?;
    Ok(shifted)
}
