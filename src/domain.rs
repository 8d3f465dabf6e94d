use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// A total-goals line, expressed as the whole number below the half-goal: `Over(2)` reads as
/// "over 2.5 goals".
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Over(pub u8);

impl Display for Over {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.5", self.0)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Period {
    #[default]
    FullTime,
    FirstHalf,
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::FullTime => write!(f, "full time"),
            Period::FirstHalf => write!(f, "first half"),
        }
    }
}

/// The priced outcomes that a scoregrid can answer for.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
    GoalsUnder(u8),
    GoalsOver(u8),
    CorrectScore(Score),
}
impl Outcome {
    /// The 1/X/2 outcomes, in conventional order.
    pub fn head_to_head() -> [Outcome; 3] {
        [Outcome::Win(Side::Home), Outcome::Draw, Outcome::Win(Side::Away)]
    }

    /// The over/under pair for `line`. `GoalsUnder` is exclusive, so the under side of a `x.5`
    /// line is `x + 1`.
    pub fn total_goals(line: Over) -> [Outcome; 2] {
        [Outcome::GoalsOver(line.0), Outcome::GoalsUnder(line.0.saturating_add(1))]
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(Side::Home) => write!(f, "1"),
            Outcome::Draw => write!(f, "X"),
            Outcome::Win(Side::Away) => write!(f, "2"),
            Outcome::GoalsOver(goals) => write!(f, "Over {goals}.5"),
            Outcome::GoalsUnder(goals) => write!(f, "Under {}.5", goals.saturating_sub(1)),
            Outcome::CorrectScore(score) => write!(f, "{score}"),
        }
    }
}

/// A pair of expected-goal rates (λ) for one fixture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}
impl ExpectedGoals {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    pub fn is_valid(&self) -> bool {
        crate::poisson::is_valid_rate(self.home) && crate::poisson::is_valid_rate(self.away)
    }

    pub fn swap(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }
}
