//! Score display formatting
//!
//! Scores are always shown as exactly four zero-padded digits. Anything that
//! doesn't carry a non-negative numeric value is shown as `NaN` instead of
//! failing.

/// Width of every score readout
pub const SCORE_WIDTH: usize = 4;

/// Sentinel shown for inputs that are not a usable score
pub const NAN_SCORE: &str = "NaN";

/// Values past this wrap; only the low four digits are ever shown
const SCORE_MODULUS: u64 = 10_000;

/// A value that may be displayed as a score
pub trait ScoreValue {
    /// The integer score, or `None` if the value is not a non-negative number
    ///
    /// Values too large for `u64` may be returned reduced modulo 10000.
    fn score(&self) -> Option<u64>;
}

impl ScoreValue for u16 {
    fn score(&self) -> Option<u64> {
        Some(u64::from(*self))
    }
}

impl ScoreValue for u32 {
    fn score(&self) -> Option<u64> {
        Some(u64::from(*self))
    }
}

impl ScoreValue for u64 {
    fn score(&self) -> Option<u64> {
        Some(*self)
    }
}

impl ScoreValue for usize {
    fn score(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

impl ScoreValue for i64 {
    fn score(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

impl ScoreValue for f64 {
    fn score(&self) -> Option<u64> {
        // Fractions are dropped; NaN, infinities and negatives have no score
        if self.is_finite() && *self >= 0.0 {
            // Reduce first so huge values don't saturate the cast
            Some((self.trunc() % SCORE_MODULUS as f64) as u64)
        } else {
            None
        }
    }
}

impl ScoreValue for str {
    fn score(&self) -> Option<u64> {
        let trimmed = self.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Some(value);
        }
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            // Too long for u64; the last four digits are the score
            let tail = &trimmed[trimmed.len().saturating_sub(SCORE_WIDTH)..];
            return tail.parse().ok();
        }
        trimmed.parse::<f64>().ok().and_then(|value| value.score())
    }
}

impl ScoreValue for String {
    fn score(&self) -> Option<u64> {
        self.as_str().score()
    }
}

impl<T: ScoreValue + ?Sized> ScoreValue for &T {
    fn score(&self) -> Option<u64> {
        (**self).score()
    }
}

/// Format a score as its last four decimal digits, zero padded
///
/// `12` becomes `"0012"`, `99999` becomes `"9999"`, and non-numeric input
/// becomes `"NaN"`.
pub fn to_score_string<T: ScoreValue + ?Sized>(score: &T) -> String {
    match score.score() {
        Some(value) => {
            let digits = format!("{:0width$}", value, width = SCORE_WIDTH);
            digits[digits.len() - SCORE_WIDTH..].to_string()
        }
        None => NAN_SCORE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pads_to_four_digits() {
        assert_eq!(to_score_string(&12u32), "0012");
        assert_eq!(to_score_string(&0u32), "0000");
        assert_eq!(to_score_string(&1234u32), "1234");
    }

    #[test]
    fn test_keeps_last_four_digits() {
        assert_eq!(to_score_string(&99999u32), "9999");
        assert_eq!(to_score_string(&12345u64), "2345");
        assert_eq!(to_score_string(&10000u32), "0000");
    }

    #[test]
    fn test_non_numeric_is_nan() {
        assert_eq!(to_score_string("abc"), "NaN");
        assert_eq!(to_score_string(""), "NaN");
        assert_eq!(to_score_string(&f64::NAN), "NaN");
        assert_eq!(to_score_string(&f64::INFINITY), "NaN");
    }

    #[test]
    fn test_numeric_text_and_floats() {
        assert_eq!(to_score_string("42"), "0042");
        assert_eq!(to_score_string(" 7 "), "0007");
        assert_eq!(to_score_string(&150.9f64), "0150");
    }

    #[test]
    fn test_oversized_values_keep_last_four_digits() {
        assert_eq!(to_score_string("99999999999999999999999"), "9999");
        assert_eq!(to_score_string("123456789012345678901234"), "1234");
        assert_eq!(to_score_string(&1e20f64), "0000");
        assert_eq!(to_score_string(&u64::MAX), "1615");
    }

    #[test]
    fn test_negative_has_no_score() {
        assert_eq!(to_score_string(&-5i64), "NaN");
        assert_eq!(to_score_string(&-1.0f64), "NaN");
    }

    proptest! {
        #[test]
        fn prop_round_trips_below_ten_thousand(n in 0u32..10_000) {
            let s = to_score_string(&n);
            prop_assert_eq!(s.len(), SCORE_WIDTH);
            prop_assert_eq!(s.parse::<u32>().unwrap(), n);
        }

        #[test]
        fn prop_always_four_wide(n in any::<u64>()) {
            let s = to_score_string(&n);
            prop_assert_eq!(s.len(), SCORE_WIDTH);
            prop_assert_eq!(s.parse::<u64>().unwrap(), n % 10_000);
        }

        #[test]
        fn prop_long_digit_text_keeps_tail(digits in "[0-9]{20,40}") {
            let expected = &digits[digits.len() - SCORE_WIDTH..];
            prop_assert_eq!(to_score_string(digits.as_str()), expected);
        }

        #[test]
        fn prop_alphabetic_text_is_nan(text in "[a-zA-Z]{1,12}") {
            // "inf"/"nan" spellings parse as floats but are not finite
            prop_assert_eq!(to_score_string(text.as_str()), NAN_SCORE);
        }
    }
}
