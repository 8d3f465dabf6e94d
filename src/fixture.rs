//! Fixture records supplied by the host, and the competition-name table used to label them.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{ExpectedGoals, Period};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub competition: String,
    /// Display only.
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    #[serde(default)]
    pub full_time: Option<ExpectedGoals>,
    #[serde(default)]
    pub first_half: Option<ExpectedGoals>,
}

#[derive(Debug, Error, PartialEq)]
pub enum FixtureError {
    #[error("fixture {0} pits a team against itself")]
    IdenticalTeams(String),

    #[error("fixture {id} has no {period} rates")]
    MissingRates { id: String, period: Period },

    #[error("fixture {id} has invalid {period} rates {rates:?}")]
    InvalidRates {
        id: String,
        period: Period,
        rates: ExpectedGoals,
    },
}

impl Fixture {
    pub fn expected_goals(&self, period: Period) -> Option<&ExpectedGoals> {
        match period {
            Period::FullTime => self.full_time.as_ref(),
            Period::FirstHalf => self.first_half.as_ref(),
        }
    }

    /// The base rates for `period`, provided the fixture is well-formed and the rates are usable.
    pub fn validated_rates(&self, period: Period) -> Result<ExpectedGoals, FixtureError> {
        if self.home_team == self.away_team {
            return Err(FixtureError::IdenticalTeams(self.id.clone()));
        }
        let rates = self
            .expected_goals(period)
            .ok_or_else(|| FixtureError::MissingRates {
                id: self.id.clone(),
                period,
            })?;
        if !rates.is_valid() {
            return Err(FixtureError::InvalidRates {
                id: self.id.clone(),
                period,
                rates: *rates,
            });
        }
        Ok(*rates)
    }
}

/// The fixtures that can be analysed for `period`, in ascending order of kickoff. Fixtures without
/// a kickoff time follow the scheduled ones, in their original order.
pub fn analysable(fixtures: impl IntoIterator<Item = Fixture>, period: Period) -> Vec<Fixture> {
    let mut selected: Vec<_> = fixtures
        .into_iter()
        .filter(|fixture| match fixture.validated_rates(period) {
            Ok(_) => true,
            Err(err) => {
                debug!("skipping: {err}");
                false
            }
        })
        .collect();
    selected.sort_by_key(|fixture| (fixture.kickoff.is_none(), fixture.kickoff));
    selected
}

/// Display names of competitions, keyed by competition code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Competitions(FxHashMap<String, String>);
impl Competitions {
    /// The display name of `code`, or the code itself where no name is known.
    pub fn name<'a>(&'a self, code: &'a str) -> &'a str {
        self.0.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.0.insert(code.into(), name.into());
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for Competitions {
    fn from_iter<T: IntoIterator<Item = (C, N)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixture(id: &str, kickoff_hour: Option<u32>, full_time: Option<(f64, f64)>) -> Fixture {
        Fixture {
            id: id.into(),
            home_team: format!("{id}-home"),
            away_team: format!("{id}-away"),
            competition: "PL".into(),
            kickoff: kickoff_hour.map(|hour| Utc.with_ymd_and_hms(2024, 8, 17, hour, 0, 0).unwrap()),
            full_time: full_time.map(|(home, away)| ExpectedGoals::new(home, away)),
            first_half: None,
        }
    }

    #[test]
    fn validated_rates() {
        assert_eq!(
            Ok(ExpectedGoals::new(1.8, 1.2)),
            fixture("a", None, Some((1.8, 1.2))).validated_rates(Period::FullTime)
        );
        assert_eq!(
            Err(FixtureError::MissingRates {
                id: "a".into(),
                period: Period::FirstHalf
            }),
            fixture("a", None, Some((1.8, 1.2))).validated_rates(Period::FirstHalf)
        );
        assert!(matches!(
            fixture("a", None, Some((f64::NAN, 1.2))).validated_rates(Period::FullTime),
            Err(FixtureError::InvalidRates { .. })
        ));

        let mut same_teams = fixture("a", None, Some((1.8, 1.2)));
        same_teams.away_team = same_teams.home_team.clone();
        assert_eq!(
            Err(FixtureError::IdenticalTeams("a".into())),
            same_teams.validated_rates(Period::FullTime)
        );
    }

    #[test]
    fn analysable_filters_and_orders() {
        let fixtures = vec![
            fixture("late", Some(19), Some((1.1, 0.9))),
            fixture("unscheduled", None, Some((1.3, 1.0))),
            fixture("no-rates", Some(12), None),
            fixture("early", Some(14), Some((2.0, 0.7))),
            fixture("bad-rates", Some(15), Some((-1.0, 0.7))),
        ];
        let ids: Vec<_> = analysable(fixtures, Period::FullTime)
            .into_iter()
            .map(|fixture| fixture.id)
            .collect();
        assert_eq!(vec!["early", "late", "unscheduled"], ids);
    }

    #[test]
    fn from_json() {
        let json = r#"[
            {
                "id": "m1",
                "home_team": "Rovers",
                "away_team": "United",
                "competition": "PL",
                "kickoff": "2024-08-17T14:00:00Z",
                "full_time": {"home": 1.8, "away": 1.2},
                "first_half": {"home": 0.8, "away": 0.5}
            },
            {"id": "m2", "home_team": "City", "away_team": "Town", "competition": "ELC"}
        ]"#;
        let fixtures: Vec<Fixture> = serde_json::from_str(json).unwrap();
        assert_eq!(2, fixtures.len());
        assert_eq!(Some(&ExpectedGoals::new(0.8, 0.5)), fixtures[0].expected_goals(Period::FirstHalf));
        assert_eq!(Some(Utc.with_ymd_and_hms(2024, 8, 17, 14, 0, 0).unwrap()), fixtures[0].kickoff);
        assert_eq!(None, fixtures[1].full_time);
        assert_eq!(1, analysable(fixtures, Period::FullTime).len());
    }

    #[test]
    fn competition_names() {
        let competitions: Competitions = [("PL", "Premier League"), ("BSA", "Brasileirão Série A")]
            .into_iter()
            .collect();
        assert_eq!("Premier League", competitions.name("PL"));
        assert_eq!("ELC", competitions.name("ELC"));

        let parsed: Competitions = serde_json::from_str(r#"{"PL": "Premier League"}"#).unwrap();
        assert_eq!("Premier League", parsed.name("PL"));
    }
}
