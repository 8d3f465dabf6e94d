//! Factorials of goal counts, in floating point.
//!
//! Goal counts are small, but the Poisson mass function places no cap on them, so factorials
//! are carried as `f64`. Beyond 170! the result is `+∞`, which drives the mass to zero rather
//! than overflowing.

pub trait Factorial {
    fn get(&self, n: u8) -> f64;
}

#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn get(&self, n: u8) -> f64 {
        let mut product = 1.0;
        for i in 2..=n {
            product *= i as f64;
        }
        product
    }
}

const MAX_ENTRIES: usize = 21;

/// Precomputed factorials for the goal counts that a scoregrid typically spans. Requests outside
/// the table fall back to [`Calculator`].
pub struct Lookup {
    entries: [f64; MAX_ENTRIES],
}
impl Factorial for Lookup {
    #[inline]
    fn get(&self, n: u8) -> f64 {
        match self.entries.get(n as usize) {
            Some(&entry) => entry,
            None => Calculator.get(n),
        }
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut entries = [1.0; MAX_ENTRIES];
        for i in 2..MAX_ENTRIES {
            entries[i] = i as f64 * entries[i - 1];
        }
        Self { entries }
    }
}
