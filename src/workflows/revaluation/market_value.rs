//! Illustrative market values for demo fixtures.
//!
//! The synthesized figure is the collateral value scaled by a random factor.
//! It is placeholder data for the front-end and is not a valuation model.

use super::domain::FieldValue;
use rand::{Rng, RngCore};

/// Inclusive bounds of the random scaling factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueJitter {
    min: f64,
    max: f64,
}

impl ValueJitter {
    /// Bounds are swapped if given out of order.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn synthesize(&self, collateral_value: Option<f64>, rng: &mut dyn RngCore) -> Option<f64> {
        let value = collateral_value?;
        let factor = if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        };
        Some(value * factor)
    }
}

impl Default for ValueJitter {
    fn default() -> Self {
        Self { min: 0.8, max: 1.2 }
    }
}

/// Reads a numeric cell. Strings may carry grouping spaces and a decimal
/// comma ("1 250 000,50"). Returns `None` instead of failing.
pub fn parse_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Integer(number) => Some(*number as f64),
        FieldValue::Decimal(number) if number.is_finite() => Some(*number),
        FieldValue::Text(text) => parse_number_str(text),
        _ => None,
    }
}

pub fn parse_number_str(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();

    let digits = normalized.strip_prefix('-').unwrap_or(&normalized);
    let well_formed = !digits.is_empty()
        && digits.chars().any(|ch| ch.is_ascii_digit())
        && digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_numbers_leniently() {
        assert_eq!(parse_number_str("1 250 000,50"), Some(1_250_000.5));
        assert_eq!(parse_number_str("1\u{a0}000"), Some(1000.0));
        assert_eq!(parse_number_str("-12.5"), Some(-12.5));
        assert_eq!(parse_number_str("42"), Some(42.0));
        assert_eq!(parse_number(&FieldValue::Integer(7)), Some(7.0));
        assert_eq!(parse_number(&FieldValue::Decimal(0.5)), Some(0.5));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(parse_number_str(""), None);
        assert_eq!(parse_number_str("n/a"), None);
        assert_eq!(parse_number_str("1.2.3"), None);
        assert_eq!(parse_number_str("1e9"), None);
        assert_eq!(parse_number_str("inf"), None);
        assert_eq!(parse_number_str("."), None);
        assert_eq!(parse_number(&FieldValue::Flag(true)), None);
    }

    #[test]
    fn synthesized_value_stays_within_jitter() {
        let jitter = ValueJitter::default();
        let mut rng = StdRng::seed_from_u64(130);

        for _ in 0..1_000 {
            let value = jitter
                .synthesize(Some(1_000_000.0), &mut rng)
                .expect("value synthesized");
            assert!((800_000.0..=1_200_000.0).contains(&value), "{value}");
        }
    }

    #[test]
    fn missing_value_stays_missing() {
        let jitter = ValueJitter::default();
        let mut rng = StdRng::seed_from_u64(130);
        assert_eq!(jitter.synthesize(None, &mut rng), None);
    }

    #[test]
    fn degenerate_jitter_is_exact() {
        let jitter = ValueJitter::new(1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(jitter.synthesize(Some(250.0), &mut rng), Some(250.0));
    }
}
