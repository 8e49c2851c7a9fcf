//! Conversions between absolute instants and the fields of several calendars.
//!
//! Every calendar reads and writes the same [`Instant`] (100 ns ticks since
//! 0001-01-01) and converts through a shared fixed day number, [`RataDie`].
//! The [`Calendar`] trait carries the full operation set; the concrete types
//! supply only the arithmetic.
//!
//! ```
//! use calends::{Calendar, CalendarDate, HebrewCalendar, GregorianCalendar, CURRENT_ERA};
//!
//! let gregorian = GregorianCalendar::new();
//! let instant = gregorian.to_instant(2023, 9, 16, 0, 0, 0, 0, CURRENT_ERA)?;
//!
//! let hebrew = HebrewCalendar::new();
//! assert_eq!(hebrew.date(instant)?, CalendarDate::new(5784, 1, 1, 1));
//! # Ok::<(), calends::CalendarError>(())
//! ```

mod consts;
mod prelude;

mod any;
mod calendar;
mod error;
mod math;
mod multi_era;
mod range;
mod rata_die;
mod types;

pub mod era;
pub mod gregorian;
pub mod hebrew;
pub mod hijri;
pub mod julian;
pub mod persian;

#[cfg(test)]
mod test_utils;

pub use any::{AnyCalendar, CalendarConfig, CalendarKind};
pub use calendar::{Calendar, CalendarOptions};
pub use consts::*;
pub use era::{EraInterval, EraTable, HEISEI, MEIJI, REIWA, SHOWA, TAISHO};
pub use error::{CalendarError, DateField, EraTableError};
pub use gregorian::GregorianCalendar;
pub use hebrew::HebrewCalendar;
pub use hijri::HijriCalendar;
pub use julian::JulianCalendar;
pub use math::{adjusted_mod, div_mod, floor_div, floor_mod};
pub use multi_era::EraCalendar;
pub use persian::PersianCalendar;
pub use range::{DayRange, SupportedRange};
pub use rata_die::RataDie;
pub use types::{AlgorithmType, CalendarDate, DayOfWeek, Instant, WeekRule};
