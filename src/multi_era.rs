//! Gregorian-based calendars that count years per era.

use serde::Serialize;
use tracing::debug;

use crate::any::CalendarKind;
use crate::calendar::{Calendar, CalendarOptions, check_two_digit_year_max, shift_months};
use crate::consts::{
    CURRENT_ERA, FEBRUARY, FEBRUARY_DAYS_LEAP, KOREAN_TWO_DIGIT_YEAR_MAX, MAX_MONTHS_DELTA, MAX_YEAR,
    MAX_YEARS_DELTA, MIN_TWO_DIGIT_YEAR_MAX, THAI_BUDDHIST_TWO_DIGIT_YEAR_MAX,
};
use crate::era::EraTable;
use crate::error::{CalendarError, DateField, ensure_in_range};
use crate::gregorian;
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate, Instant};

/// A Gregorian calendar whose years are numbered within the eras of an [`EraTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EraCalendar {
    kind:    CalendarKind,
    table:   EraTable,
    options: CalendarOptions,
}

impl EraCalendar {
    /// Japanese calendar, Meiji through Reiwa
    pub fn japanese() -> Self {
        Self::with_pivot(CalendarKind::Japanese, EraTable::japanese(), MIN_TWO_DIGIT_YEAR_MAX)
    }

    /// Taiwan (Minguo) calendar
    pub fn taiwan() -> Self {
        Self::with_pivot(CalendarKind::Taiwan, EraTable::taiwan(), MIN_TWO_DIGIT_YEAR_MAX)
    }

    /// Korean (Dangi) calendar
    pub fn korean() -> Self {
        Self::with_pivot(CalendarKind::Korean, EraTable::korean(), KOREAN_TWO_DIGIT_YEAR_MAX)
    }

    /// Thai solar (Buddhist era) calendar
    pub fn thai_buddhist() -> Self {
        Self::with_pivot(
            CalendarKind::ThaiBuddhist,
            EraTable::thai_buddhist(),
            THAI_BUDDHIST_TWO_DIGIT_YEAR_MAX,
        )
    }

    /// Builds a calendar over any validated table.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `two_digit_year_max` is not a
    /// valid pivot for the table's current era.
    pub fn from_table(kind: CalendarKind, table: EraTable, two_digit_year_max: i32) -> Result<Self, CalendarError> {
        let calendar = Self::with_pivot(kind, table, two_digit_year_max);
        check_two_digit_year_max(&calendar.range(), two_digit_year_max)?;
        Ok(calendar)
    }

    const fn with_pivot(kind: CalendarKind, table: EraTable, two_digit_year_max: i32) -> Self {
        Self {
            kind,
            table,
            options: CalendarOptions::new(two_digit_year_max),
        }
    }

    pub const fn table(&self) -> &EraTable {
        &self.table
    }

    /// Gregorian year of an already validated era year.
    fn gregorian_year_unchecked(&self, year: i32, era: i32) -> i32 {
        self.table
            .interval(era)
            .map_or(year, |interval| interval.to_gregorian_year(year))
    }

    /// Rebuilds an instant from a Gregorian date, keeping the time of day.
    fn recombine(&self, instant: Instant, year: i32, month: i32, day: i32) -> Result<Instant, CalendarError> {
        ensure_in_range(DateField::Year, year, 1, MAX_YEAR)?;
        let day = day.min(gregorian::days_in_month(year, month));
        let fixed = gregorian::fixed_from_ymd(year, month, day);
        self.table.resolve(fixed)?;
        Ok(Instant::from_day_and_time(fixed, instant.time_of_day()))
    }
}

impl Calendar for EraCalendar {
    fn kind(&self) -> CalendarKind {
        self.kind
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Solar
    }

    fn eras(&self) -> Vec<i32> {
        self.table.eras()
    }

    fn range(&self) -> SupportedRange {
        let current = self.table.current();
        let span = self.table.span();
        SupportedRange::new(
            current.min_year(),
            current.max_year(),
            span.start().get(),
            span.end().get(),
        )
    }

    fn options(&self) -> &CalendarOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut CalendarOptions {
        &mut self.options
    }

    fn resolve_era(&self, era: i32) -> Result<i32, CalendarError> {
        if era == CURRENT_ERA {
            return Ok(self.table.current_era());
        }
        if self.table.contains(era) {
            return Ok(era);
        }
        debug!(calendar = %self.kind, era, "unknown era");
        Err(CalendarError::InvalidEra { era })
    }

    fn check_year(&self, year: i32, era: i32) -> Result<(), CalendarError> {
        let gregorian_year = self.table.gregorian_year(era, year)?;
        if !(1..=MAX_YEAR).contains(&gregorian_year) {
            return Err(CalendarError::out_of_range(DateField::Year, year));
        }
        Ok(())
    }

    /// Days outside the named era are rejected even when the era year exists.
    fn check_day(&self, year: i32, month: i32, day: i32, era: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::Day, day, 1, self.days_in_month_unchecked(year, month, era))?;
        let fixed = self.fixed_from_date(year, month, day, era);
        let inside = self
            .table
            .interval(era)
            .is_some_and(|interval| interval.range().contains(fixed));
        if !inside {
            return Err(CalendarError::out_of_range(DateField::Day, day));
        }
        Ok(())
    }

    fn fixed_from_date(&self, year: i32, month: i32, day: i32, era: i32) -> RataDie {
        gregorian::fixed_from_ymd(self.gregorian_year_unchecked(year, era), month, day)
    }

    fn date_from_fixed(&self, day: RataDie) -> Result<CalendarDate, CalendarError> {
        let (era, year) = self.table.resolve(day)?;
        let (_, month, day_of_month) = gregorian::ymd_from_fixed(day);
        Ok(CalendarDate::new(year, month, day_of_month, era))
    }

    fn days_in_month_unchecked(&self, year: i32, month: i32, era: i32) -> i32 {
        gregorian::days_in_month(self.gregorian_year_unchecked(year, era), month)
    }

    fn days_in_year_unchecked(&self, year: i32, era: i32) -> i32 {
        gregorian::days_in_year(self.gregorian_year_unchecked(year, era))
    }

    fn is_leap_year_unchecked(&self, year: i32, era: i32) -> bool {
        gregorian::is_leap_year(self.gregorian_year_unchecked(year, era))
    }

    fn is_leap_day_unchecked(&self, year: i32, month: i32, day: i32, era: i32) -> bool {
        self.is_leap_year_unchecked(year, era) && month == FEBRUARY && day == FEBRUARY_DAYS_LEAP
    }

    /// Month arithmetic runs on the Gregorian date, so results may land in another era.
    fn add_months(&self, instant: Instant, months: i32) -> Result<Instant, CalendarError> {
        ensure_in_range(DateField::Months, months, -MAX_MONTHS_DELTA, MAX_MONTHS_DELTA)?;
        let (year, month, day) = gregorian::ymd_from_fixed(self.fixed_from_instant(instant)?);
        let (year, month) = shift_months(year, month, months);
        self.recombine(instant, year, month, day)
    }

    fn add_years(&self, instant: Instant, years: i32) -> Result<Instant, CalendarError> {
        ensure_in_range(DateField::Years, years, -MAX_YEARS_DELTA, MAX_YEARS_DELTA)?;
        let (year, month, day) = gregorian::ymd_from_fixed(self.fixed_from_instant(instant)?);
        self.recombine(instant, year + years, month, day)
    }
}
