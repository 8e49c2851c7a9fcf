/// Ticks (100 ns units) per millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Ticks per second
pub const TICKS_PER_SECOND: i64 = TICKS_PER_MILLISECOND * 1_000;
/// Ticks per minute
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
/// Ticks per hour
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
/// Ticks per day
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

/// Days in a week
pub const DAYS_PER_WEEK: i64 = 7;

/// Fixed day number of 0001-01-01, the first supported Gregorian day
pub const MIN_FIXED_DAY: i64 = 1;
/// Fixed day number of 9999-12-31, the last supported day of every calendar
pub const MAX_FIXED_DAY: i64 = 3_652_059;

/// Maximum valid Gregorian year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Months in a solar year
pub const MONTHS_PER_YEAR: i32 = 12;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for March
pub const MARCH: i32 = 3;
/// Month number for October
pub const OCTOBER: i32 = 10;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Days in each month of the Gregorian and Julian calendars (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Era value that always resolves to the calendar's current era
pub const CURRENT_ERA: i32 = 0;

/// Largest month offset accepted by `add_months`
pub const MAX_MONTHS_DELTA: i32 = 120_000;
/// Largest year offset accepted by `add_years`
pub const MAX_YEARS_DELTA: i32 = 10_000;

/// Smallest accepted two-digit year pivot
pub const MIN_TWO_DIGIT_YEAR_MAX: i32 = 99;

/// Default pivot of the Gregorian and Julian calendars
pub const GREGORIAN_TWO_DIGIT_YEAR_MAX: i32 = 2029;
/// Default pivot of the Hebrew calendar
pub const HEBREW_TWO_DIGIT_YEAR_MAX: i32 = 5790;
/// Default pivot of the Hijri calendar
pub const HIJRI_TWO_DIGIT_YEAR_MAX: i32 = 1451;
/// Default pivot of the Persian calendar
pub const PERSIAN_TWO_DIGIT_YEAR_MAX: i32 = 1410;
/// Default pivot of the Korean calendar
pub const KOREAN_TWO_DIGIT_YEAR_MAX: i32 = 4362;
/// Default pivot of the Thai Buddhist calendar
pub const THAI_BUDDHIST_TWO_DIGIT_YEAR_MAX: i32 = 2572;
