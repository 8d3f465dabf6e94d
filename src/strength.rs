//! The team-strength model: base expected-goal rates for a fixture from each side's attack and
//! defense multipliers, relative to the league's average scoring.
//!
//! For a home side `H` and an away side `A`,
//!
//! ```text
//! λ_home = H.attack_home × A.defense_away × league.home
//! λ_away = A.attack_away × H.defense_home × league.away
//! ```
//!
//! where the league averages are taken from the home side's rating for the selected period.
//! Ratings are immutable snapshots; see [`fit`] for deriving them from historical results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::domain::{ExpectedGoals, Period};

pub mod fit;

/// Multipliers for one team over one period, alongside the league baseline they are relative to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub attack_home: f64,
    pub attack_away: f64,
    pub defense_home: f64,
    pub defense_away: f64,
    /// Average goals scored by home sides in the league.
    pub league_home: f64,
    /// Average goals scored by away sides in the league.
    pub league_away: f64,
}
impl Coefficients {
    /// A league-average team.
    pub fn neutral(league_home: f64, league_away: f64) -> Self {
        Self {
            attack_home: 1.0,
            attack_away: 1.0,
            defense_home: 1.0,
            defense_away: 1.0,
            league_home,
            league_away,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub team: String,
    pub full_time: Coefficients,
    pub first_half: Coefficients,
}
impl TeamRating {
    pub fn coefficients(&self, period: Period) -> &Coefficients {
        match period {
            Period::FullTime => &self.full_time,
            Period::FirstHalf => &self.first_half,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StrengthError {
    #[error("cannot rate {0} against itself")]
    IdenticalTeams(String),

    #[error("no rating for {0}")]
    MissingRating(String),
}

pub fn expected_goals(
    home: &TeamRating,
    away: &TeamRating,
    period: Period,
) -> Result<ExpectedGoals, StrengthError> {
    if home.team == away.team {
        return Err(StrengthError::IdenticalTeams(home.team.clone()));
    }
    let (home_cf, away_cf) = (home.coefficients(period), away.coefficients(period));
    let expected = ExpectedGoals {
        home: home_cf.attack_home * away_cf.defense_away * home_cf.league_home,
        away: away_cf.attack_away * home_cf.defense_home * home_cf.league_away,
    };
    trace!("{} v {} ({period}): {expected:?}", home.team, away.team);
    Ok(expected)
}

/// Ratings indexed by team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TeamRating>", into = "Vec<TeamRating>")]
pub struct RatingTable {
    ratings: FxHashMap<String, TeamRating>,
}
impl RatingTable {
    pub fn get(&self, team: &str) -> Option<&TeamRating> {
        self.ratings.get(team)
    }

    pub fn insert(&mut self, rating: TeamRating) -> Option<TeamRating> {
        self.ratings.insert(rating.team.clone(), rating)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Ratings in ascending order of team name.
    pub fn sorted(&self) -> Vec<&TeamRating> {
        let mut sorted: Vec<_> = self.ratings.values().collect();
        sorted.sort_by(|a, b| a.team.cmp(&b.team));
        sorted
    }

    pub fn expected_goals(
        &self,
        home: &str,
        away: &str,
        period: Period,
    ) -> Result<ExpectedGoals, StrengthError> {
        let home = self
            .get(home)
            .ok_or_else(|| StrengthError::MissingRating(home.to_string()))?;
        let away = self
            .get(away)
            .ok_or_else(|| StrengthError::MissingRating(away.to_string()))?;
        expected_goals(home, away, period)
    }
}

impl FromIterator<TeamRating> for RatingTable {
    fn from_iter<T: IntoIterator<Item = TeamRating>>(iter: T) -> Self {
        Self {
            ratings: iter
                .into_iter()
                .map(|rating| (rating.team.clone(), rating))
                .collect(),
        }
    }
}

impl From<Vec<TeamRating>> for RatingTable {
    fn from(ratings: Vec<TeamRating>) -> Self {
        ratings.into_iter().collect()
    }
}

impl From<RatingTable> for Vec<TeamRating> {
    fn from(table: RatingTable) -> Self {
        let mut ratings: Vec<_> = table.ratings.into_values().collect();
        ratings.sort_by(|a, b| a.team.cmp(&b.team));
        ratings
    }
}
