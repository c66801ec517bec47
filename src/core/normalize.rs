//! Statistic reading and min-max normalization
//!
//! Scraped values are best-effort: anything missing or unreadable falls back
//! to a fixed default instead of failing the race.

use crate::models::StatValue;

/// 2-place / 3-place rates below this are a data-quality floor, not a rate
pub const RATE_FLOOR: f64 = 5.0;

/// Fallback values when a statistic is missing
pub mod defaults {
    pub const AVG_ST: f64 = 0.18;
    pub const NATIONAL_WIN: f64 = 5.0;
    pub const LOCAL_WIN: f64 = 4.8;
    pub const NATIONAL_2R: f64 = 33.0;
    pub const LOCAL_2R: f64 = 32.0;
    pub const MOTOR_2R: f64 = 30.0;
    pub const BOAT_2R: f64 = 30.0;
    pub const NATIONAL_3R: f64 = 50.0;
    pub const LOCAL_3R: f64 = 48.0;
    pub const MOTOR_3R: f64 = 45.0;
    pub const BOAT_3R: f64 = 45.0;

    pub const EXHIBIT_TIME: f64 = 7.00;
    pub const TILT: f64 = 0.0;
    pub const DISPLAY_ST: f64 = 0.20;
    pub const ADJUST_WEIGHT: f64 = 0.0;
}

/// Read a statistic, substituting `default` when missing or unparseable
pub fn read_stat(value: Option<&StatValue>, default: f64) -> f64 {
    value.and_then(StatValue::parse).unwrap_or(default)
}

/// Read a placement rate; implausibly low values count as missing
pub fn read_rate(value: Option<&StatValue>, default: f64) -> f64 {
    match value.and_then(StatValue::parse) {
        Some(v) if v >= RATE_FLOOR => v,
        _ => default,
    }
}

/// Normalization range of one statistic across a race
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub lo: f64,
    pub hi: f64,
}

impl Range {
    /// Min/max of `values`. A zero-width range is widened by `|lo|`
    /// (or by 1.0 when `lo` is 0) so a lone value does not collapse.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self { lo: 0.0, hi: 1.0 };
        }

        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if lo == hi {
            hi = lo + if lo != 0.0 { lo.abs() } else { 1.0 };
        }

        Self { lo, hi }
    }

    /// Higher raw value is better
    pub fn direct(&self, x: f64) -> f64 {
        if self.hi == self.lo {
            return 0.5;
        }
        ((x - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)
    }

    /// Lower raw value is better
    pub fn inverse(&self, x: f64) -> f64 {
        if self.hi == self.lo {
            return 0.5;
        }
        ((self.hi - x) / (self.hi - self.lo)).clamp(0.0, 1.0)
    }
}

/// Round to `digits` decimal places
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_stat_defaults() {
        assert_eq!(read_stat(None, 0.18), 0.18);
        assert_eq!(read_stat(Some(&StatValue::from("")), 0.18), 0.18);
        assert_eq!(read_stat(Some(&StatValue::from("0.14")), 0.18), 0.14);
        assert_eq!(read_stat(Some(&StatValue::from(2.0)), 0.18), 2.0);
    }

    #[test]
    fn test_read_rate_floor() {
        assert_eq!(read_rate(Some(&StatValue::from(0.0)), 33.0), 33.0);
        assert_eq!(read_rate(Some(&StatValue::from("4.99")), 33.0), 33.0);
        assert_eq!(read_rate(Some(&StatValue::from("5.0")), 33.0), 5.0);
        assert_eq!(read_rate(Some(&StatValue::from("41.2%")), 33.0), 41.2);
        assert_eq!(read_rate(None, 30.0), 30.0);
    }

    #[test]
    fn test_range_of() {
        let range = Range::of(&[3.0, 1.0, 2.0]);
        assert_eq!(range, Range { lo: 1.0, hi: 3.0 });

        let empty = Range::of(&[]);
        assert_eq!(empty, Range { lo: 0.0, hi: 1.0 });
    }

    #[test]
    fn test_range_widens_single_value() {
        let range = Range::of(&[6.0, 6.0, 6.0]);
        assert_eq!(range, Range { lo: 6.0, hi: 12.0 });
        assert_eq!(range.direct(6.0), 0.0);
        assert_eq!(range.inverse(6.0), 1.0);

        let zero = Range::of(&[0.0]);
        assert_eq!(zero, Range { lo: 0.0, hi: 1.0 });

        let negative = Range::of(&[-2.0, -2.0]);
        assert_eq!(negative, Range { lo: -2.0, hi: 0.0 });
    }

    #[test]
    fn test_zero_width_range_is_midpoint() {
        let range = Range { lo: 1.0, hi: 1.0 };
        assert_eq!(range.direct(1.0), 0.5);
        assert_eq!(range.inverse(1.0), 0.5);
    }

    #[test]
    fn test_direct_and_inverse() {
        let range = Range::of(&[0.10, 0.20]);
        assert!((range.direct(0.15) - 0.5).abs() < 1e-9);
        assert!((range.inverse(0.10) - 1.0).abs() < 1e-9);
        assert!((range.inverse(0.20) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(1.00456, 4), 1.0046);
    }
}
