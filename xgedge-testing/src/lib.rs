//! Testing helpers.

use std::ops::Range;

use assert_float_eq::*;
use tinyrand::Rand;

pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_f64_near!(expected, actual, distance);
        }
    }
}

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_absolute_eq!(expected, actual, epsilon);
        }
    }
}

/// Draws a uniformly distributed value from `range`. The end is inclusive: it is returned when
/// `rand` yields `u64::MAX`, and may also be reached by rounding near it.
pub fn uniform(rand: &mut impl Rand, range: Range<f64>) -> f64 {
    let unit = rand.next_u64() as f64 / u64::MAX as f64;
    range.start + unit * (range.end - range.start)
}

/// Poisson probability of exactly `k` events at rate `lambda`, evaluated directly from
/// `λ^k · e^(−λ) / k!`.
pub fn poisson_pmf(k: u8, lambda: f64) -> f64 {
    assert!(k <= 34, "{k}! overflows");
    let factorial = (2..=k as u128).product::<u128>() as f64;
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial
}
