//! Fair odds and expected value.
//!
//! A modelled probability implies a break-even ("fair") decimal price. A user-supplied price
//! above the fair price offers positive expected value. The flag is a strict comparison only;
//! nothing here weighs risk or stake.

use crate::domain::Outcome;
use crate::scoregrid::ScorelineSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAssessment {
    /// Break-even decimal price; zero when the modelled probability is not positive.
    pub fair_price: f64,
    pub has_value: bool,
    /// Percentage edge of the user's price over the fair price.
    pub ev_percent: Option<f64>,
}

/// The decimal price implied by `probability_percent`, or zero where none is defined.
#[inline]
pub fn fair_price(probability_percent: f64) -> f64 {
    if probability_percent > 0.0 && probability_percent.is_finite() {
        100.0 / probability_percent
    } else {
        0.0
    }
}

pub fn assess(probability_percent: f64, user_price: Option<f64>) -> ValueAssessment {
    let fair_price = fair_price(probability_percent);
    let ev_percent = match user_price {
        Some(user_price) if fair_price > 0.0 => Some((user_price / fair_price - 1.0) * 100.0),
        _ => None,
    };
    let has_value = match user_price {
        Some(user_price) => fair_price > 0.0 && user_price > fair_price,
        None => false,
    };
    ValueAssessment {
        fair_price,
        has_value,
        ev_percent,
    }
}

/// Assesses `outcome` against a scoreline summary.
pub fn assess_outcome(
    summary: &ScorelineSummary,
    outcome: &Outcome,
    user_price: Option<f64>,
) -> ValueAssessment {
    assess(summary.probability(outcome), user_price)
}
