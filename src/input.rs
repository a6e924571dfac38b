//! Forgiving numeric parsing for values typed in mid-workout.
//!
//! Raw text is scanned for a leading number the same way a browser number
//! field would read it: `"12 reps"` is 12, `"abc"` is 0. Negative and
//! non-finite values collapse to 0 so no caller ever sees an error.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid number regex")
});

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid integer regex"));

/// Parse a decimal quantity such as a weight, duration or calorie count.
pub fn parse_amount(raw: &str) -> f64 {
    LEADING_NUMBER
        .captures(raw)
        .and_then(|c| c[1].parse::<f64>().ok())
        .map(clamp_amount)
        .unwrap_or(0.0)
}

/// Parse a whole count such as reps. Fractions are truncated.
pub fn parse_count(raw: &str) -> u32 {
    LEADING_INTEGER
        .captures(raw)
        .and_then(|c| c[1].parse::<i64>().ok())
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

/// Clamp an already numeric value to a usable non-negative amount.
pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_amount("135"), 135.0);
        assert!((parse_amount("102.5") - 102.5).abs() < 1e-9);
        assert!((parse_amount(".5") - 0.5).abs() < 1e-9);
        assert_eq!(parse_count("10"), 10);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_amount("  45lbs"), 45.0);
        assert_eq!(parse_count("12 reps"), 12);
        assert_eq!(parse_count("8.7"), 8);
    }

    #[test]
    fn malformed_or_negative_input_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("heavy"), 0.0);
        assert_eq!(parse_amount("-20"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("x5"), 0);
    }

    #[test]
    fn clamp_amount_rejects_nan() {
        assert_eq!(clamp_amount(f64::NAN), 0.0);
        assert_eq!(clamp_amount(f64::INFINITY), 0.0);
        assert_eq!(clamp_amount(3.5), 3.5);
    }
}
