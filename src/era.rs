//! Era tables: disjoint spans of Gregorian days, each counting its own years.

use serde::Serialize;
use tracing::debug;

use crate::consts::{MAX_FIXED_DAY, MIN_FIXED_DAY};
use crate::error::{CalendarError, DateField, EraTableError};
use crate::gregorian;
use crate::range::DayRange;
use crate::rata_die::RataDie;

/// Era number of Meiji in the Japanese table
pub const MEIJI: i32 = 1;
pub const TAISHO: i32 = 2;
pub const SHOWA: i32 = 3;
pub const HEISEI: i32 = 4;
pub const REIWA: i32 = 5;

/// One era: a span of days whose first Gregorian year counts as year 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EraInterval {
    number:                  i32,
    range:                   DayRange,
    gregorian_year_at_start: i32,
    max_year:                i32,
}

impl EraInterval {
    /// Creates an era spanning `start..=end`.
    ///
    /// `gregorian_year_at_start` is the Gregorian year counted as year 1 of the
    /// era; it may lie before `start` when the era's count began earlier.
    ///
    /// # Errors
    /// Returns `EraTableError::InvertedInterval` if `end` precedes `start`.
    pub fn new(
        number: i32,
        start: RataDie,
        end: RataDie,
        gregorian_year_at_start: i32,
    ) -> Result<Self, EraTableError> {
        let range = DayRange::new(start, end).ok_or(EraTableError::InvertedInterval {
            era:   number,
            start: start.get(),
            end:   end.get(),
        })?;
        Ok(Self::from_range(number, range, gregorian_year_at_start))
    }

    fn from_range(number: i32, range: DayRange, gregorian_year_at_start: i32) -> Self {
        let max_year = gregorian::year_from_fixed(range.end()) - gregorian_year_at_start + 1;
        Self {
            number,
            range,
            gregorian_year_at_start,
            max_year,
        }
    }

    #[inline]
    pub const fn number(&self) -> i32 {
        self.number
    }

    #[inline]
    pub const fn range(&self) -> DayRange {
        self.range
    }

    #[inline]
    pub const fn gregorian_year_at_start(&self) -> i32 {
        self.gregorian_year_at_start
    }

    /// Era year of the interval's last day
    #[inline]
    pub const fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Era year of the interval's first day
    pub fn min_year(&self) -> i32 {
        self.year_of(self.range.start())
    }

    /// Era year containing `day`. The day is not checked against the interval.
    pub fn year_of(&self, day: RataDie) -> i32 {
        gregorian::year_from_fixed(day) - self.gregorian_year_at_start + 1
    }

    /// Gregorian year of an era year. The year is not range checked.
    pub const fn to_gregorian_year(&self, year: i32) -> i32 {
        year + self.gregorian_year_at_start - 1
    }
}

/// An ordered set of non-overlapping eras.
///
/// Only serializable: tables are read back through [`EraTable::new`] so
/// they are always validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EraTable {
    /// Sorted by start day
    intervals: Vec<EraInterval>,
}

impl EraTable {
    /// Builds a table from arbitrary intervals.
    ///
    /// # Errors
    /// Fails if the list is empty, uses era 0, repeats an era number or holds
    /// overlapping intervals.
    pub fn new(mut intervals: Vec<EraInterval>) -> Result<Self, EraTableError> {
        if intervals.is_empty() {
            return Err(EraTableError::Empty);
        }
        if intervals.iter().any(|interval| interval.number == 0) {
            return Err(EraTableError::ReservedEra);
        }

        let mut numbers: Vec<i32> = intervals.iter().map(EraInterval::number).collect();
        numbers.sort_unstable();
        if let Some(pair) = numbers.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(EraTableError::DuplicateEra { era: pair[0] });
        }

        intervals.sort_by_key(|interval| interval.range.start());
        if let Some(pair) = intervals.windows(2).find(|pair| pair[0].range.overlaps(&pair[1].range)) {
            return Err(EraTableError::Overlap {
                first:  pair[0].number,
                second: pair[1].number,
            });
        }

        Ok(Self { intervals })
    }

    /// Built-in tables skip validation outside debug builds.
    fn trusted(intervals: Vec<EraInterval>) -> Self {
        debug_assert!(Self::new(intervals.clone()).is_ok(), "built-in era table is malformed");
        Self { intervals }
    }

    /// Meiji through Reiwa, starting 1868-09-08.
    pub fn japanese() -> Self {
        let boundaries = [
            (MEIJI, (1868, 9, 8), 1868),
            (TAISHO, (1912, 7, 30), 1912),
            (SHOWA, (1926, 12, 25), 1926),
            (HEISEI, (1989, 1, 8), 1989),
            (REIWA, (2019, 5, 1), 2019),
        ];

        let mut intervals = Vec::with_capacity(boundaries.len());
        for (index, &(number, (y, m, d), gregorian_year_at_start)) in boundaries.iter().enumerate() {
            let start = gregorian::fixed_from_ymd(y, m, d);
            let end = boundaries.get(index + 1).map_or(RataDie::new(MAX_FIXED_DAY), |&(_, (y, m, d), _)| {
                gregorian::fixed_from_ymd(y, m, d) - 1
            });
            intervals.push(EraInterval::from_range(
                number,
                DayRange::new_unchecked(start, end),
                gregorian_year_at_start,
            ));
        }
        Self::trusted(intervals)
    }

    /// Minguo era: year 1 is 1912.
    pub fn taiwan() -> Self {
        Self::single(gregorian::fixed_from_ymd(1912, 1, 1), 1912)
    }

    /// Dangi era: year 1 is 2333 BCE.
    pub fn korean() -> Self {
        Self::single(RataDie::new(MIN_FIXED_DAY), -2332)
    }

    /// Buddhist era: year 1 is 543 BCE.
    pub fn thai_buddhist() -> Self {
        Self::single(RataDie::new(MIN_FIXED_DAY), -542)
    }

    fn single(start: RataDie, gregorian_year_at_start: i32) -> Self {
        let range = DayRange::new_unchecked(start, RataDie::new(MAX_FIXED_DAY));
        Self::trusted(vec![EraInterval::from_range(1, range, gregorian_year_at_start)])
    }

    /// Era and era year of `day`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if no era contains the day.
    pub fn resolve(&self, day: RataDie) -> Result<(i32, i32), CalendarError> {
        let Some(interval) = self.intervals.iter().rev().find(|interval| interval.range.contains(day)) else {
            debug!(%day, "no era contains day");
            return Err(CalendarError::out_of_range(DateField::FixedDay, day.get()));
        };
        Ok((interval.number, interval.year_of(day)))
    }

    /// Gregorian year of `year` in `era`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEra` for unknown eras and
    /// `CalendarError::OutOfRange` unless `1 <= year <= max_year`.
    pub fn gregorian_year(&self, era: i32, year: i32) -> Result<i32, CalendarError> {
        let interval = self.interval(era).ok_or(CalendarError::InvalidEra { era })?;
        if year < 1 || year > interval.max_year {
            return Err(CalendarError::out_of_range(DateField::Year, year));
        }
        Ok(interval.to_gregorian_year(year))
    }

    /// The latest era
    pub fn current_era(&self) -> i32 {
        self.current().number
    }

    pub(crate) fn current(&self) -> &EraInterval {
        // Tables are never empty
        &self.intervals[self.intervals.len() - 1]
    }

    /// Era numbers, newest first
    pub fn eras(&self) -> Vec<i32> {
        self.intervals.iter().rev().map(EraInterval::number).collect()
    }

    pub fn contains(&self, era: i32) -> bool {
        self.interval(era).is_some()
    }

    pub fn interval(&self, era: i32) -> Option<&EraInterval> {
        self.intervals.iter().find(|interval| interval.number == era)
    }

    /// Intervals in chronological order
    pub fn intervals(&self) -> &[EraInterval] {
        &self.intervals
    }

    /// From the first day of the oldest era to the last day of the newest.
    pub fn span(&self) -> DayRange {
        DayRange::new_unchecked(self.intervals[0].range.start(), self.current().range.end())
    }
}
