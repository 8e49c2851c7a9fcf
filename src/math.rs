//! Floored integer arithmetic shared by every calendar algorithm.
//!
//! Calendar units are 1-based and day counts routinely go negative before an
//! epoch, so truncating `/` and `%` are never used directly on day numbers.

/// Division rounding toward negative infinity.
#[inline]
pub const fn floor_div(x: i64, y: i64) -> i64 {
    let q = x / y;
    if x % y != 0 && ((x < 0) != (y < 0)) { q - 1 } else { q }
}

/// Remainder whose sign follows the divisor: `x - y * floor_div(x, y)`.
#[inline]
pub const fn floor_mod(x: i64, y: i64) -> i64 {
    x - y * floor_div(x, y)
}

/// Like [`floor_mod`], but yields `y` instead of `0`.
///
/// Used where a unit is numbered `1..=y`, e.g. "day 30 of a 30-day month".
#[inline]
pub const fn adjusted_mod(x: i64, y: i64) -> i64 {
    let r = floor_mod(x, y);
    if r == 0 { y } else { r }
}

/// Quotient and remainder of a floored division in one step.
#[inline]
pub const fn div_mod(x: i64, y: i64) -> (i64, i64) {
    let q = floor_div(x, y);
    (q, x - y * q)
}

/// Narrows a wide intermediate back to field width, saturating at the ends.
///
/// Field values reaching this point have already been range checked.
#[inline]
pub fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_cases() {
        struct TestCase {
            x:        i64,
            y:        i64,
            expected: i64,
        }

        let cases = [
            TestCase { x: 7, y: 2, expected: 3 },
            TestCase { x: -7, y: 2, expected: -4 },
            TestCase { x: 7, y: -2, expected: -4 },
            TestCase { x: -7, y: -2, expected: 3 },
            TestCase { x: -8, y: 2, expected: -4 },
            TestCase { x: 0, y: 5, expected: 0 },
        ];

        for case in &cases {
            assert_eq!(floor_div(case.x, case.y), case.expected, "floor_div({}, {})", case.x, case.y);
        }
    }

    #[test]
    fn test_floor_mod_sign_follows_divisor() {
        assert_eq!(floor_mod(-7, 2), 1);
        assert_eq!(floor_mod(7, -2), -1);
        assert_eq!(floor_mod(-1, 7), 6);
        assert_eq!(floor_mod(14, 7), 0);
    }

    #[test]
    fn test_adjusted_mod_replaces_zero() {
        assert_eq!(adjusted_mod(14, 7), 7);
        assert_eq!(adjusted_mod(15, 7), 1);
        assert_eq!(adjusted_mod(0, 12), 12);
        assert_eq!(adjusted_mod(-1, 12), 11);
    }

    #[test]
    fn test_div_mod_recombines() {
        for x in -50..50 {
            for y in [3, 7, 12, 30] {
                let (q, r) = div_mod(x, y);
                assert_eq!(q * y + r, x);
                assert!((0..y).contains(&r), "remainder {r} out of 0..{y}");
            }
        }
    }

    #[test]
    fn test_narrow_saturates() {
        assert_eq!(narrow(42), 42);
        assert_eq!(narrow(i64::MAX), i32::MAX);
        assert_eq!(narrow(i64::MIN), i32::MIN);
    }
}
