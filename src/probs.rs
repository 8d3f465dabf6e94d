//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn invert(&self) -> impl Iterator<Item = f64> + '_;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Scales the elements so that they sum to `target`, returning the sum prior to scaling.
    /// A slice summing to zero is left untouched.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        if sum != 0.0 {
            self.scale(target / sum);
        }
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn invert(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|value| 1.0 / value)
    }
}

/// The share of `part` in `total`, expressed as a percentage. Zero when `total` is not positive.
#[inline]
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * part / total
    } else {
        0.0
    }
}
