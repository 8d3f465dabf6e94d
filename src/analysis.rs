//! Analysis of a single fixture: base rates, through the situational adjustments, into a
//! scoreline summary, against which user prices are assessed.
//!
//! The summary is held between calls and recomputed only when the rates it depends on change.
//! Assessing a user price never touches the scoregrid.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::adjust::Adjustments;
use crate::domain::{ExpectedGoals, Outcome, Period};
use crate::fixture::{Fixture, FixtureError};
use crate::scoregrid::{GridConfig, ScorelineSummary};
use crate::strength::{RatingTable, StrengthError};
use crate::{scoregrid, value};
use crate::value::ValueAssessment;

/// User-entered decimal prices, by outcome.
pub type UserPrices = FxHashMap<Outcome, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketValue {
    pub outcome: Outcome,
    pub probability: f64,
    pub user_price: Option<f64>,
    pub assessment: ValueAssessment,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    base: ExpectedGoals,
    adjustments: Adjustments,
    config: GridConfig,
    rates: ExpectedGoals,
    summary: ScorelineSummary,
}
impl Analysis {
    pub fn new(base: ExpectedGoals) -> Self {
        Self::with_config(base, Adjustments::default(), GridConfig::default())
    }

    pub fn with_config(base: ExpectedGoals, adjustments: Adjustments, config: GridConfig) -> Self {
        let rates = adjustments.apply(&base);
        let summary = scoregrid::compute_with(rates.home, rates.away, &config);
        Self {
            base,
            adjustments,
            config,
            rates,
            summary,
        }
    }

    pub fn for_fixture(fixture: &Fixture, period: Period) -> Result<Self, FixtureError> {
        let base = fixture.validated_rates(period)?;
        debug!("{} v {} ({period}): base {base:?}", fixture.home_team, fixture.away_team);
        Ok(Self::new(base))
    }

    pub fn from_ratings(
        ratings: &RatingTable,
        home: &str,
        away: &str,
        period: Period,
    ) -> Result<Self, StrengthError> {
        let base = ratings.expected_goals(home, away, period)?;
        debug!("{home} v {away} ({period}): rated base {base:?}");
        Ok(Self::new(base))
    }

    pub fn base(&self) -> &ExpectedGoals {
        &self.base
    }

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    /// The adjusted rates that the summary was computed from.
    pub fn rates(&self) -> &ExpectedGoals {
        &self.rates
    }

    pub fn summary(&self) -> &ScorelineSummary {
        &self.summary
    }

    /// Replaces the adjustments, returning `true` if the summary had to be recomputed.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) -> bool {
        if !adjustments.is_neutral() {
            debug!("applying {adjustments:?}");
        }
        self.adjustments = adjustments;
        self.refresh()
    }

    /// Replaces the base rates (e.g., on switching period), returning `true` if the summary had
    /// to be recomputed.
    pub fn set_base(&mut self, base: ExpectedGoals) -> bool {
        self.base = base;
        self.refresh()
    }

    fn refresh(&mut self) -> bool {
        let rates = self.adjustments.apply(&self.base);
        if rates == self.rates {
            return false;
        }
        debug!("rates changed from {:?} to {rates:?}", self.rates);
        self.rates = rates;
        self.summary = scoregrid::compute_with(rates.home, rates.away, &self.config);
        trace!("scoregrid:\n{}", self.summary.grid.verbose());
        true
    }

    pub fn assess(&self, outcome: &Outcome, user_price: Option<f64>) -> ValueAssessment {
        value::assess_outcome(&self.summary, outcome, user_price)
    }

    /// The 1/X/2 and over/under markets, each assessed against any matching user price.
    pub fn markets(&self, user_prices: &UserPrices) -> Vec<MarketValue> {
        Outcome::head_to_head()
            .into_iter()
            .chain(Outcome::total_goals(self.summary.goals_line))
            .map(|outcome| {
                let user_price = user_prices.get(&outcome).copied();
                MarketValue {
                    probability: self.summary.probability(&outcome),
                    assessment: self.assess(&outcome, user_price),
                    user_price,
                    outcome,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::domain::Side;
    use crate::strength::{Coefficients, TeamRating};

    #[test]
    fn neutral_analysis_matches_scoregrid() {
        let analysis = Analysis::new(ExpectedGoals::new(1.8, 1.2));
        assert_eq!(&ExpectedGoals::new(1.8, 1.2), analysis.rates());
        assert_eq!(&scoregrid::compute(1.8, 1.2), analysis.summary());
    }

    #[test]
    fn adjustments_recompute_only_on_change() {
        let mut analysis = Analysis::new(ExpectedGoals::new(1.4, 1.1));
        assert!(!analysis.set_adjustments(Adjustments::default()));

        let adjustments = Adjustments {
            home_advantage: 1.2,
            missing_players_away: 0.9,
            ..Adjustments::default()
        };
        assert!(analysis.set_adjustments(adjustments.clone()));
        assert_float_relative_eq!(1.4 * 1.2, analysis.rates().home, 1e-12);
        assert_float_relative_eq!(1.1 * 0.9, analysis.rates().away, 1e-12);
        assert_eq!(
            &scoregrid::compute(analysis.rates().home, analysis.rates().away),
            analysis.summary()
        );
        assert!(!analysis.set_adjustments(adjustments));
    }

    #[test]
    fn assessing_prices_leaves_summary_intact() {
        let analysis = Analysis::new(ExpectedGoals::new(1.8, 1.2));
        let before = analysis.summary().clone();
        let assessment = analysis.assess(&Outcome::Win(Side::Home), Some(2.2));
        assert!(assessment.has_value);
        assert_eq!(&before, analysis.summary());
    }

    #[test]
    fn markets() {
        let analysis = Analysis::new(ExpectedGoals::new(1.8, 1.2));
        let user_prices = UserPrices::from_iter([(Outcome::Draw, 4.5), (Outcome::GoalsOver(2), 1.6)]);
        let markets = analysis.markets(&user_prices);
        let outcomes: Vec<_> = markets.iter().map(|market| market.outcome.to_string()).collect();
        assert_eq!(vec!["1", "X", "2", "Over 2.5", "Under 2.5"], outcomes);

        let draw = &markets[1];
        assert_eq!(Some(4.5), draw.user_price);
        assert_eq!(analysis.summary().draw, draw.probability);
        assert!(draw.assessment.has_value);

        let over = &markets[3];
        assert!(!over.assessment.has_value);

        let home = &markets[0];
        assert_eq!(None, home.user_price);
        assert_eq!(None, home.assessment.ev_percent);
    }

    #[test]
    fn for_fixture() {
        let fixture = Fixture {
            id: "m1".into(),
            home_team: "Rovers".into(),
            away_team: "United".into(),
            competition: "PL".into(),
            kickoff: None,
            full_time: Some(ExpectedGoals::new(1.8, 1.2)),
            first_half: Some(ExpectedGoals::new(0.8, 0.5)),
        };
        let analysis = Analysis::for_fixture(&fixture, Period::FirstHalf).unwrap();
        assert_eq!(&ExpectedGoals::new(0.8, 0.5), analysis.base());

        let mut unrated = fixture.clone();
        unrated.first_half = None;
        assert!(Analysis::for_fixture(&unrated, Period::FirstHalf).is_err());
    }

    #[test]
    fn from_ratings() {
        let neutral = |team: &str| TeamRating {
            team: team.into(),
            full_time: Coefficients::neutral(1.5, 1.1),
            first_half: Coefficients::neutral(0.7, 0.5),
        };
        let ratings: RatingTable = [neutral("Rovers"), neutral("United")].into_iter().collect();
        let analysis = Analysis::from_ratings(&ratings, "Rovers", "United", Period::FullTime).unwrap();
        assert_eq!(&ExpectedGoals::new(1.5, 1.1), analysis.rates());
        assert_eq!(
            Err(StrengthError::IdenticalTeams("Rovers".into())),
            Analysis::from_ratings(&ratings, "Rovers", "Rovers", Period::FullTime).map(|_| ())
        );
    }
}
