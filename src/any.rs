//! Runtime selection of a calendar, from code or from configuration.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::{Calendar, CalendarOptions};
use crate::error::CalendarError;
use crate::gregorian::GregorianCalendar;
use crate::hebrew::HebrewCalendar;
use crate::hijri::HijriCalendar;
use crate::julian::JulianCalendar;
use crate::multi_era::EraCalendar;
use crate::persian::PersianCalendar;
use crate::prelude::*;
use crate::range::SupportedRange;
use crate::rata_die::RataDie;
use crate::types::{AlgorithmType, CalendarDate, Instant};

/// Every calendar this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    #[display(fmt = "Gregorian")]
    Gregorian,
    #[display(fmt = "Julian")]
    Julian,
    #[display(fmt = "Hebrew")]
    Hebrew,
    #[display(fmt = "Hijri")]
    Hijri,
    #[display(fmt = "Persian")]
    Persian,
    #[display(fmt = "Japanese")]
    Japanese,
    #[display(fmt = "Taiwan")]
    Taiwan,
    #[display(fmt = "Korean")]
    Korean,
    #[display(fmt = "Thai Buddhist")]
    ThaiBuddhist,
}

impl CalendarKind {
    pub const ALL: [Self; 9] = [
        Self::Gregorian,
        Self::Julian,
        Self::Hebrew,
        Self::Hijri,
        Self::Persian,
        Self::Japanese,
        Self::Taiwan,
        Self::Korean,
        Self::ThaiBuddhist,
    ];
}

/// Serializable description of a calendar and its settings.
///
/// ```json
/// { "kind": "hijri", "two_digit_year_max": 1450, "hijri_adjustment": -1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    pub kind:               CalendarKind,
    /// Overrides the calendar's default two-digit year pivot
    #[serde(default)]
    pub two_digit_year_max: Option<i32>,
    /// Only meaningful for [`CalendarKind::Hijri`]
    #[serde(default)]
    pub hijri_adjustment:   i32,
}

impl CalendarConfig {
    /// Default settings for `kind`
    pub const fn new(kind: CalendarKind) -> Self {
        Self {
            kind,
            two_digit_year_max: None,
            hijri_adjustment: 0,
        }
    }
}

/// Any supported calendar behind a single type.
#[derive(Debug, Clone, PartialEq, Eq, From, Serialize)]
pub enum AnyCalendar {
    Gregorian(GregorianCalendar),
    Julian(JulianCalendar),
    Hebrew(HebrewCalendar),
    Hijri(HijriCalendar),
    Persian(PersianCalendar),
    Era(EraCalendar),
}

impl AnyCalendar {
    /// A calendar of `kind` with default settings
    pub fn new(kind: CalendarKind) -> Self {
        match kind {
            CalendarKind::Gregorian => GregorianCalendar::new().into(),
            CalendarKind::Julian => JulianCalendar::new().into(),
            CalendarKind::Hebrew => HebrewCalendar::new().into(),
            CalendarKind::Hijri => HijriCalendar::new().into(),
            CalendarKind::Persian => PersianCalendar::new().into(),
            CalendarKind::Japanese => EraCalendar::japanese().into(),
            CalendarKind::Taiwan => EraCalendar::taiwan().into(),
            CalendarKind::Korean => EraCalendar::korean().into(),
            CalendarKind::ThaiBuddhist => EraCalendar::thai_buddhist().into(),
        }
    }

    /// Builds a calendar, applying settings through the validating setters.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for an invalid pivot or Hijri adjustment.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, CalendarError> {
        let mut calendar = Self::new(config.kind);
        if config.hijri_adjustment != 0 {
            if let Self::Hijri(hijri) = &mut calendar {
                hijri.set_adjustment(config.hijri_adjustment)?;
            } else {
                warn!(
                    calendar = %config.kind,
                    adjustment = config.hijri_adjustment,
                    "hijri adjustment ignored"
                );
            }
        }
        if let Some(pivot) = config.two_digit_year_max {
            calendar.set_two_digit_year_max(pivot)?;
        }
        debug!(calendar = %config.kind, "calendar built from config");
        Ok(calendar)
    }
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            AnyCalendar::Gregorian($inner) => $body,
            AnyCalendar::Julian($inner) => $body,
            AnyCalendar::Hebrew($inner) => $body,
            AnyCalendar::Hijri($inner) => $body,
            AnyCalendar::Persian($inner) => $body,
            AnyCalendar::Era($inner) => $body,
        }
    };
}

impl Calendar for AnyCalendar {
    fn kind(&self) -> CalendarKind {
        dispatch!(self, c => c.kind())
    }

    fn algorithm_type(&self) -> AlgorithmType {
        dispatch!(self, c => c.algorithm_type())
    }

    fn eras(&self) -> Vec<i32> {
        dispatch!(self, c => c.eras())
    }

    fn range(&self) -> SupportedRange {
        dispatch!(self, c => c.range())
    }

    fn options(&self) -> &CalendarOptions {
        dispatch!(self, c => c.options())
    }

    fn options_mut(&mut self) -> &mut CalendarOptions {
        dispatch!(self, c => c.options_mut())
    }

    fn resolve_era(&self, era: i32) -> Result<i32, CalendarError> {
        dispatch!(self, c => c.resolve_era(era))
    }

    fn check_year(&self, year: i32, era: i32) -> Result<(), CalendarError> {
        dispatch!(self, c => c.check_year(year, era))
    }

    fn check_month(&self, year: i32, month: i32, era: i32) -> Result<(), CalendarError> {
        dispatch!(self, c => c.check_month(year, month, era))
    }

    fn check_day(&self, year: i32, month: i32, day: i32, era: i32) -> Result<(), CalendarError> {
        dispatch!(self, c => c.check_day(year, month, day, era))
    }

    fn fixed_from_date(&self, year: i32, month: i32, day: i32, era: i32) -> RataDie {
        dispatch!(self, c => c.fixed_from_date(year, month, day, era))
    }

    fn date_from_fixed(&self, day: RataDie) -> Result<CalendarDate, CalendarError> {
        dispatch!(self, c => c.date_from_fixed(day))
    }

    fn months_in_year_unchecked(&self, year: i32, era: i32) -> i32 {
        dispatch!(self, c => c.months_in_year_unchecked(year, era))
    }

    fn days_in_month_unchecked(&self, year: i32, month: i32, era: i32) -> i32 {
        dispatch!(self, c => c.days_in_month_unchecked(year, month, era))
    }

    fn days_in_year_unchecked(&self, year: i32, era: i32) -> i32 {
        dispatch!(self, c => c.days_in_year_unchecked(year, era))
    }

    fn is_leap_year_unchecked(&self, year: i32, era: i32) -> bool {
        dispatch!(self, c => c.is_leap_year_unchecked(year, era))
    }

    fn is_leap_month_unchecked(&self, year: i32, month: i32, era: i32) -> bool {
        dispatch!(self, c => c.is_leap_month_unchecked(year, month, era))
    }

    fn is_leap_day_unchecked(&self, year: i32, month: i32, day: i32, era: i32) -> bool {
        dispatch!(self, c => c.is_leap_day_unchecked(year, month, day, era))
    }

    fn leap_month_unchecked(&self, year: i32, era: i32) -> i32 {
        dispatch!(self, c => c.leap_month_unchecked(year, era))
    }

    fn offset_months(&self, year: i32, month: i32, months: i32, era: i32) -> (i32, i32) {
        dispatch!(self, c => c.offset_months(year, month, months, era))
    }

    fn offset_years(&self, year: i32, month: i32, years: i32, era: i32) -> (i32, i32) {
        dispatch!(self, c => c.offset_years(year, month, years, era))
    }

    fn add_months(&self, instant: Instant, months: i32) -> Result<Instant, CalendarError> {
        dispatch!(self, c => c.add_months(instant, months))
    }

    fn add_years(&self, instant: Instant, years: i32) -> Result<Instant, CalendarError> {
        dispatch!(self, c => c.add_years(instant, years))
    }
}
