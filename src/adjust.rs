//! Situational adjustments to a fixture's base expected-goal rates.
//!
//! Each factor is a plain multiplier. The documented ranges are advisory: [`Adjustments::apply`]
//! accepts any multiplier as given, and callers that source factors from user input may enforce
//! the ranges with [`Adjustments::validate`].

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ExpectedGoals;

pub const MUST_WIN_RANGE: RangeInclusive<f64> = 0.6..=1.5;
pub const MISSING_PLAYERS_RANGE: RangeInclusive<f64> = 0.5..=1.0;
pub const HOME_ADVANTAGE_RANGE: RangeInclusive<f64> = 0.8..=1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub must_win_home: f64,
    pub must_win_away: f64,
    pub missing_players_home: f64,
    pub missing_players_away: f64,
    /// Applies to the home side only.
    pub home_advantage: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            must_win_home: 1.0,
            must_win_away: 1.0,
            missing_players_home: 1.0,
            missing_players_away: 1.0,
            home_advantage: 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("{factor} of {value} outside of {}..={}", .range.start(), .range.end())]
pub struct AdjustmentError {
    pub factor: &'static str,
    pub value: f64,
    pub range: RangeInclusive<f64>,
}

impl Adjustments {
    pub fn apply(&self, base: &ExpectedGoals) -> ExpectedGoals {
        ExpectedGoals {
            home: base.home * self.must_win_home * self.missing_players_home * self.home_advantage,
            away: base.away * self.must_win_away * self.missing_players_away,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), AdjustmentError> {
        check("must-win (home)", self.must_win_home, MUST_WIN_RANGE)?;
        check("must-win (away)", self.must_win_away, MUST_WIN_RANGE)?;
        check("missing players (home)", self.missing_players_home, MISSING_PLAYERS_RANGE)?;
        check("missing players (away)", self.missing_players_away, MISSING_PLAYERS_RANGE)?;
        check("home advantage", self.home_advantage, HOME_ADVANTAGE_RANGE)?;
        Ok(())
    }
}

fn check(factor: &'static str, value: f64, range: RangeInclusive<f64>) -> Result<(), AdjustmentError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AdjustmentError { factor, value, range })
    }
}
