//! The Poisson goal model: the probability of a team scoring exactly `k` goals, given its
//! expected-goal rate `λ`.

use crate::factorial::{Calculator, Factorial};

/// Raw Poisson mass function `λ^k·e^(−λ)/k!`. The caller is responsible for supplying a
/// meaningful `lambda`; see [`pmf`] for the guarded variant.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get(k)
}

/// Probability of exactly `k` goals at rate `lambda`.
///
/// A rate that is not a finite, non-negative number yields `0.0` instead of an error, so that a
/// single bad input degrades the result rather than aborting it. Likewise, a non-finite
/// intermediate (an astronomically large `k` or `lambda`) yields `0.0`.
#[inline]
pub fn pmf(k: u8, lambda: f64) -> f64 {
    pmf_with(k, lambda, &Calculator)
}

#[inline]
pub fn pmf_with(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    if !is_valid_rate(lambda) {
        return 0.0;
    }
    let prob = univariate(k, lambda, factorial);
    if prob.is_finite() {
        prob
    } else {
        0.0
    }
}

/// Whether `lambda` can serve as the mean of a Poisson distribution.
#[inline]
pub fn is_valid_rate(lambda: f64) -> bool {
    lambda.is_finite() && lambda >= 0.0
}
