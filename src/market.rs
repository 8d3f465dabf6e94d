//! Implied probabilities of a set of user-entered prices for one market.

use crate::probs::SliceExt;

pub trait MarketPrice {
    fn decimal(&self) -> f64;
}

impl MarketPrice for f64 {
    fn decimal(&self) -> f64 {
        *self
    }
}

/// The bookmaker's margin on a market, under the multiplicative method: the factor by which the
/// implied probabilities exceed the fair sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Overround {
    pub value: f64,
}
impl Overround {
    /// Margin expressed as a percentage, e.g. `5.0` for a booksum of 1.05.
    pub fn margin_percent(&self) -> f64 {
        (self.value - 1.0) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    /// Implied probabilities with the overround removed; sum to the fair sum.
    pub probs: Vec<f64>,
    pub prices: Vec<f64>,
    pub overround: Overround,
}
impl Market {
    /// Fits a market to decimal `prices` whose outcomes are mutually exclusive and exhaustive
    /// when `fair_sum` is 1.
    pub fn fit(prices: &[impl MarketPrice], fair_sum: f64) -> Self {
        let prices: Vec<_> = prices.iter().map(MarketPrice::decimal).collect();
        let mut probs: Vec<_> = prices.invert().collect();
        let overround = probs.normalise(fair_sum) / fair_sum;
        Self {
            probs,
            prices,
            overround: Overround { value: overround },
        }
    }

    /// Implied probabilities as percentages.
    pub fn percentages(&self) -> impl Iterator<Item = f64> + '_ {
        self.probs.iter().map(|prob| prob * 100.0)
    }
}
