//! The tabular (arithmetic) Islamic calendar with a configurable day adjustment.

use serde::Serialize;
use tracing::debug;

use crate::any::CalendarKind;
use crate::calendar::{Calendar, CalendarOptions};
use crate::consts::{CURRENT_ERA, HIJRI_TWO_DIGIT_YEAR_MAX, MAX_FIXED_DAY};
use crate::error::{CalendarError, DateField, ensure_in_range};
use crate::math::{floor_div, floor_mod, narrow};
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate};

/// The only Hijri era (Anno Hegirae)
pub const AH: i32 = 1;

/// Fixed day of 1 Muharram AH 1 (Julian 622-07-16)
pub const EPOCH: i64 = 227_015;

pub const MAX_YEAR: i32 = 9666;

/// Largest accepted adjustment, in days, either way
pub const MAX_ADJUSTMENT: i32 = 3;

const LAST_MONTH: i32 = 12;

pub const fn is_leap_year(year: i32) -> bool {
    floor_mod(14 + 11 * year as i64, 30) < 11
}

/// Odd months have 30 days, even months 29; the last month gains a day in leap years.
pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month % 2 == 1 || (month == LAST_MONTH && is_leap_year(year)) { 30 } else { 29 }
}

pub const fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 355 } else { 354 }
}

/// Unadjusted fixed day of a Hijri date.
pub const fn fixed_from_ymd(year: i32, month: i32, day: i32) -> RataDie {
    let year = year as i64;
    RataDie::new(
        EPOCH - 1 + 354 * (year - 1) + floor_div(3 + 11 * year, 30) + floor_div(59 * (month as i64 - 1) + 1, 2)
            + day as i64,
    )
}

pub fn year_from_fixed(day: RataDie) -> i32 {
    narrow(floor_div(30 * (day.get() - EPOCH) + 10_646, 10_631))
}

/// Year, month and day of an unadjusted fixed day.
pub fn ymd_from_fixed(day: RataDie) -> (i32, i32, i32) {
    let year = year_from_fixed(day);
    let elapsed = day - fixed_from_ymd(year, 1, 1) - 29;
    // 1 + ceil(elapsed / 29.5)
    let month = narrow(1 - floor_div(-2 * elapsed, 59)).min(LAST_MONTH);
    let day_of_month = narrow(day - fixed_from_ymd(year, month, 1) + 1);
    (year, month, day_of_month)
}

/// Hijri calendar for years 1 through 9666 AH.
///
/// The adjustment moves every conversion by whole days: a Hijri date maps to
/// the tabular fixed day plus the adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HijriCalendar {
    options:    CalendarOptions,
    adjustment: i32,
}

impl HijriCalendar {
    pub const fn new() -> Self {
        Self {
            options:    CalendarOptions::new(HIJRI_TWO_DIGIT_YEAR_MAX),
            adjustment: 0,
        }
    }

    /// Returns the day adjustment
    pub const fn adjustment(&self) -> i32 {
        self.adjustment
    }

    /// Sets the day adjustment.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` unless `-3 <= adjustment <= 3`.
    pub fn set_adjustment(&mut self, adjustment: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::HijriAdjustment, adjustment, -MAX_ADJUSTMENT, MAX_ADJUSTMENT)?;
        debug!(adjustment, "hijri adjustment updated");
        self.adjustment = adjustment;
        Ok(())
    }

    /// Last tabular fixed day representable under the current adjustment.
    const fn last_day(&self) -> RataDie {
        RataDie::new(MAX_FIXED_DAY - self.adjustment as i64)
    }
}

impl Default for HijriCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for HijriCalendar {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Hijri
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Lunar
    }

    fn eras(&self) -> Vec<i32> {
        vec![AH]
    }

    fn range(&self) -> SupportedRange {
        SupportedRange::new(1, MAX_YEAR, EPOCH + i64::from(self.adjustment), MAX_FIXED_DAY)
    }

    fn options(&self) -> &CalendarOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut CalendarOptions {
        &mut self.options
    }

    fn resolve_era(&self, era: i32) -> Result<i32, CalendarError> {
        match era {
            CURRENT_ERA | AH => Ok(AH),
            _ => Err(CalendarError::InvalidEra { era }),
        }
    }

    fn check_month(&self, year: i32, month: i32, _era: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::Month, month, 1, LAST_MONTH)?;
        if year == MAX_YEAR && fixed_from_ymd(year, month, 1) > self.last_day() {
            return Err(CalendarError::out_of_range(DateField::Month, month));
        }
        Ok(())
    }

    fn check_day(&self, year: i32, month: i32, day: i32, _era: i32) -> Result<(), CalendarError> {
        ensure_in_range(DateField::Day, day, 1, days_in_month(year, month))?;
        if year == MAX_YEAR && fixed_from_ymd(year, month, day) > self.last_day() {
            return Err(CalendarError::out_of_range(DateField::Day, day));
        }
        Ok(())
    }

    fn fixed_from_date(&self, year: i32, month: i32, day: i32, _era: i32) -> RataDie {
        fixed_from_ymd(year, month, day) + i64::from(self.adjustment)
    }

    fn date_from_fixed(&self, day: RataDie) -> Result<CalendarDate, CalendarError> {
        let (year, month, day) = ymd_from_fixed(day - i64::from(self.adjustment));
        Ok(CalendarDate::new(year, month, day, AH))
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
        is_leap_year(year) && month == LAST_MONTH && day == 30
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gregorian;
    use crate::test_utils::gregorian_instant;

    #[test]
    fn test_leap_cycle() {
        let leap_positions = [2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29];
        for year in 1..=30 {
            assert_eq!(is_leap_year(year), leap_positions.contains(&year), "year {year}");
            assert_eq!(is_leap_year(year), is_leap_year(year + 30 * 47), "year {year} cycle");
        }
    }

    #[test]
    fn test_year_lengths_match_months() {
        for year in 1..=60 {
            let sum: i32 = (1..=12).map(|m| days_in_month(year, m)).sum();
            assert_eq!(sum, days_in_year(year), "year {year}");
            assert_eq!(
                fixed_from_ymd(year + 1, 1, 1) - fixed_from_ymd(year, 1, 1),
                i64::from(days_in_year(year))
            );
        }
    }

    #[test]
    fn test_anchors() {
        assert_eq!(fixed_from_ymd(1, 1, 1), RataDie::new(EPOCH));
        assert_eq!(fixed_from_ymd(1446, 1, 1), gregorian::fixed_from_ymd(2024, 7, 8));
        assert_eq!(fixed_from_ymd(MAX_YEAR, 4, 2), RataDie::new(MAX_FIXED_DAY));
    }

    #[test]
    fn test_round_trip_whole_range() {
        let mut expected = (1, 1, 1);
        for n in EPOCH..=MAX_FIXED_DAY {
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
    fn test_set_adjustment() {
        let mut calendar = HijriCalendar::new();
        for adjustment in -3..=3 {
            assert!(calendar.set_adjustment(adjustment).is_ok());
            assert_eq!(calendar.adjustment(), adjustment);
        }
        assert_eq!(
            calendar.set_adjustment(4),
            Err(CalendarError::OutOfRange {
                field: DateField::HijriAdjustment,
                value: 4,
            })
        );
        assert_eq!(calendar.adjustment(), 3);
    }

    #[test]
    fn test_adjustment_shifts_conversions() {
        let mut calendar = HijriCalendar::new();
        let instant = gregorian_instant(2024, 7, 8);
        assert_eq!(calendar.date(instant), Ok(CalendarDate::new(1446, 1, 1, AH)));

        calendar.set_adjustment(-1).expect("failed to set adjustment");
        assert_eq!(
            calendar.date(gregorian_instant(2024, 7, 7)),
            Ok(CalendarDate::new(1446, 1, 1, AH))
        );
        let built = calendar.to_instant(1446, 1, 1, 0, 0, 0, 0, AH).expect("failed to build date");
        assert_eq!(built, gregorian_instant(2024, 7, 7));
    }

    #[test]
    fn test_last_year_ceiling_follows_adjustment() {
        struct TestCase {
            adjustment: i32,
            last:       (i32, i32),
        }

        let cases = [
            TestCase { adjustment: 0, last: (4, 2) },
            TestCase { adjustment: -1, last: (4, 3) },
            TestCase { adjustment: 2, last: (3, 30) },
        ];

        for case in &cases {
            let mut calendar = HijriCalendar::new();
            calendar.set_adjustment(case.adjustment).expect("failed to set adjustment");
            let (month, day) = case.last;
            assert!(
                calendar.validate_date(MAX_YEAR, month, day, AH).is_ok(),
                "adjustment {}",
                case.adjustment
            );
            assert_eq!(
                calendar.date(calendar.max_supported()),
                Ok(CalendarDate::new(MAX_YEAR, month, day, AH))
            );
            assert_eq!(
                calendar.date(calendar.min_supported()),
                Ok(CalendarDate::new(1, 1, 1, AH))
            );
        }

        let calendar = HijriCalendar::new();
        assert_eq!(
            calendar.validate_date(MAX_YEAR, 5, 1, AH),
            Err(CalendarError::OutOfRange {
                field: DateField::Month,
                value: 5,
            })
        );
        assert_eq!(
            calendar.validate_date(MAX_YEAR, 4, 3, AH),
            Err(CalendarError::OutOfRange {
                field: DateField::Day,
                value: 3,
            })
        );
    }

    #[test]
    fn test_leap_day_and_type() {
        let calendar = HijriCalendar::new();
        assert_eq!(calendar.is_leap_day(2, 12, 30, AH), Ok(true));
        assert_eq!(calendar.is_leap_day(2, 12, 29, AH), Ok(false));
        assert_eq!(
            calendar.is_leap_day(1, 12, 30, AH),
            Err(CalendarError::OutOfRange {
                field: DateField::Day,
                value: 30,
            })
        );
        assert_eq!(calendar.algorithm_type(), AlgorithmType::Lunar);
        assert_eq!(calendar.two_digit_year_max(), 1451);
    }

    #[test]
    fn test_add_then_subtract_is_identity_without_clamping() {
        for adjustment in [-2, 0, 3] {
            let mut calendar = HijriCalendar::new();
            calendar.set_adjustment(adjustment).expect("failed to set adjustment");
            let start = calendar.to_instant(1445, 3, 15, 18, 0, 0, 0, AH).expect("failed to build date");
            for months in [-700, -12, -1, 1, 11, 30] {
                let there = calendar.add_months(start, months).expect("failed to add months");
                let back = calendar.add_months(there, -months).expect("failed to subtract months");
                assert_eq!(back, start, "{months} months, adjustment {adjustment}");
            }
            for years in [-1_400, -1, 1, 30, 5_000] {
                let there = calendar.add_years(start, years).expect("failed to add years");
                let back = calendar.add_years(there, -years).expect("failed to subtract years");
                assert_eq!(back, start, "{years} years, adjustment {adjustment}");
            }
        }
    }
}
