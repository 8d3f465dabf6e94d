//! Derivation of [`TeamRating`]s from historical results.
//!
//! A team's home attack is its average goals scored at home divided by the league's average home
//! goals; its home defense is its average goals conceded at home divided by the league's average
//! away goals. The away multipliers mirror these. A team without games at a venue, or a league
//! average of zero, yields a neutral multiplier of 1.

use std::io::BufRead;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::csv::CsvReader;
use crate::domain::{Period, Score};
use crate::strength::{Coefficients, RatingTable, TeamRating};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home: String,
    pub away: String,
    pub full_time: Score,
    pub first_half: Score,
}
impl MatchResult {
    /// Parses a `home,away,home_goals,away_goals,home_goals_h1,away_goals_h1` record.
    pub fn from_record(record: &[impl AsRef<str>]) -> Result<Self, RecordError> {
        if record.len() != RESULT_FIELDS {
            return Err(RecordError::FieldCount(record.len()));
        }
        let goals = |index: usize| {
            let field = record[index].as_ref();
            field
                .parse::<u8>()
                .map_err(|_| RecordError::InvalidGoals(field.to_string()))
        };
        Ok(Self {
            home: record[0].as_ref().to_string(),
            away: record[1].as_ref().to_string(),
            full_time: Score::new(goals(2)?, goals(3)?),
            first_half: Score::new(goals(4)?, goals(5)?),
        })
    }

    fn score(&self, period: Period) -> &Score {
        match period {
            Period::FullTime => &self.full_time,
            Period::FirstHalf => &self.first_half,
        }
    }
}

const RESULT_FIELDS: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("expected 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid goal count '{0}'")]
    InvalidGoals(String),
}

/// Reads results in CSV form, skipping the header row and any blank lines.
pub fn read_results(reader: impl BufRead) -> anyhow::Result<Vec<MatchResult>> {
    let mut results = vec![];
    for (line, record) in CsvReader::new(reader).enumerate().skip(1) {
        let record = record?;
        if record.iter().all(String::is_empty) {
            continue;
        }
        let result = MatchResult::from_record(&record)
            .map_err(|err| anyhow::anyhow!("line {}: {err}", line + 1))?;
        results.push(result);
    }
    debug!("read {} results", results.len());
    Ok(results)
}

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("no results to fit")]
    NoResults,

    #[error("result {index} pits {team} against itself")]
    SelfFixture { index: usize, team: String },
}

#[derive(Debug, Default)]
struct Tally {
    games: u32,
    scored: u32,
    conceded: u32,
}
impl Tally {
    fn record(&mut self, scored: u8, conceded: u8) {
        self.games += 1;
        self.scored += scored as u32;
        self.conceded += conceded as u32;
    }

    fn mean_scored(&self) -> Option<f64> {
        (self.games > 0).then(|| self.scored as f64 / self.games as f64)
    }

    fn mean_conceded(&self) -> Option<f64> {
        (self.games > 0).then(|| self.conceded as f64 / self.games as f64)
    }
}

#[derive(Debug, Default)]
struct Venues {
    home: Tally,
    away: Tally,
}

pub fn fit_ratings(results: &[MatchResult]) -> Result<RatingTable, FitError> {
    if results.is_empty() {
        return Err(FitError::NoResults);
    }
    if let Some((index, result)) = results.iter().enumerate().find(|(_, result)| result.home == result.away) {
        return Err(FitError::SelfFixture {
            index,
            team: result.home.clone(),
        });
    }

    let full_time = fit_period(results, Period::FullTime);
    let mut first_half = fit_period(results, Period::FirstHalf);
    let table: RatingTable = full_time
        .into_iter()
        .map(|(team, full_time)| {
            let first_half = first_half.remove(&team).unwrap_or_else(|| Coefficients::neutral(0.0, 0.0));
            TeamRating {
                team,
                full_time,
                first_half,
            }
        })
        .collect();
    debug!("fitted {} teams from {} results", table.len(), results.len());
    Ok(table)
}

fn fit_period(results: &[MatchResult], period: Period) -> FxHashMap<String, Coefficients> {
    let mut tallies: FxHashMap<&str, Venues> = FxHashMap::default();
    let (mut league_home_goals, mut league_away_goals) = (0u32, 0u32);
    for result in results {
        let score = result.score(period);
        league_home_goals += score.home as u32;
        league_away_goals += score.away as u32;
        tallies
            .entry(result.home.as_str())
            .or_default()
            .home
            .record(score.home, score.away);
        tallies
            .entry(result.away.as_str())
            .or_default()
            .away
            .record(score.away, score.home);
    }
    let league_home = league_home_goals as f64 / results.len() as f64;
    let league_away = league_away_goals as f64 / results.len() as f64;
    debug!("{period} league averages: home {league_home:.3}, away {league_away:.3}");

    tallies
        .into_iter()
        .map(|(team, venues)| {
            let coefficients = Coefficients {
                attack_home: relative(venues.home.mean_scored(), league_home),
                attack_away: relative(venues.away.mean_scored(), league_away),
                defense_home: relative(venues.home.mean_conceded(), league_away),
                defense_away: relative(venues.away.mean_conceded(), league_home),
                league_home,
                league_away,
            };
            (team.to_string(), coefficients)
        })
        .collect()
}

fn relative(mean: Option<f64>, league_mean: f64) -> f64 {
    match mean {
        Some(mean) if league_mean > 0.0 => mean / league_mean,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::strength::expected_goals;

    fn result(home: &str, away: &str, full_time: (u8, u8), first_half: (u8, u8)) -> MatchResult {
        MatchResult {
            home: home.into(),
            away: away.into(),
            full_time: Score::new(full_time.0, full_time.1),
            first_half: Score::new(first_half.0, first_half.1),
        }
    }

    fn sample_results() -> Vec<MatchResult> {
        vec![
            result("Rovers", "United", (2, 1), (1, 0)),
            result("United", "City", (0, 0), (0, 0)),
            result("City", "Rovers", (3, 1), (1, 1)),
            result("United", "Rovers", (1, 2), (0, 1)),
        ]
    }

    #[test]
    fn league_averages() {
        let table = fit_ratings(&sample_results()).unwrap();
        assert_eq!(3, table.len());
        let rovers = table.get("Rovers").unwrap();
        // home goals 2 + 0 + 3 + 1 = 6 over 4 games; away goals 1 + 0 + 1 + 2 = 4
        assert_float_relative_eq!(1.5, rovers.full_time.league_home, 1e-12);
        assert_float_relative_eq!(1.0, rovers.full_time.league_away, 1e-12);
        assert_float_relative_eq!(0.5, rovers.first_half.league_home, 1e-12);
        assert_float_relative_eq!(0.5, rovers.first_half.league_away, 1e-12);
    }

    #[test]
    fn multipliers() {
        let table = fit_ratings(&sample_results()).unwrap();

        // Rovers: home 2-1 (1 game); away 1-3, 2-1 (2 games)
        let rovers = &table.get("Rovers").unwrap().full_time;
        assert_float_relative_eq!(2.0 / 1.5, rovers.attack_home, 1e-12);
        assert_float_relative_eq!(1.0 / 1.0, rovers.defense_home, 1e-12);
        assert_float_relative_eq!(1.5 / 1.0, rovers.attack_away, 1e-12);
        assert_float_relative_eq!(2.0 / 1.5, rovers.defense_away, 1e-12);

        // United: home 0-0, 1-2 (2 games); away 1-2 (1 game)
        let united = &table.get("United").unwrap().full_time;
        assert_float_relative_eq!(0.5 / 1.5, united.attack_home, 1e-12);
        assert_float_relative_eq!(1.0 / 1.0, united.defense_home, 1e-12);
        assert_float_relative_eq!(1.0 / 1.0, united.attack_away, 1e-12);
        assert_float_relative_eq!(2.0 / 1.5, united.defense_away, 1e-12);
    }

    #[test]
    fn missing_venue_is_neutral() {
        let table = fit_ratings(&[result("Rovers", "United", (2, 1), (0, 0))]).unwrap();
        let rovers = table.get("Rovers").unwrap();
        assert_eq!(1.0, rovers.full_time.attack_away);
        assert_eq!(1.0, rovers.full_time.defense_away);
        assert_eq!(1.0, rovers.full_time.attack_home);

        // nil-nil first halves leave a zero league average
        assert_eq!(0.0, rovers.first_half.league_home);
        assert_eq!(1.0, rovers.first_half.attack_home);
        let expected = expected_goals(rovers, table.get("United").unwrap(), Period::FirstHalf).unwrap();
        assert_eq!(0.0, expected.home);
        assert_eq!(0.0, expected.away);
    }

    #[test]
    fn fitted_ratings_reproduce_averages() {
        let table = fit_ratings(&[
            result("Rovers", "United", (2, 1), (1, 0)),
            result("United", "Rovers", (2, 1), (1, 0)),
        ])
        .unwrap();
        let rovers = table.get("Rovers").unwrap();
        let united = table.get("United").unwrap();
        let expected = expected_goals(rovers, united, Period::FullTime).unwrap();
        assert_float_relative_eq!(2.0, expected.home, 1e-12);
        assert_float_relative_eq!(1.0, expected.away, 1e-12);
    }

    #[test]
    fn parse_results() {
        let data = "home,away,home_goals,away_goals,home_goals_h1,away_goals_h1
Rovers,United,2,1,1,0

United, City ,0,0,0,0
";
        let results = read_results(data.as_bytes()).unwrap();
        assert_eq!(
            vec![
                result("Rovers", "United", (2, 1), (1, 0)),
                result("United", "City", (0, 0), (0, 0))
            ],
            results
        );
    }

    #[test]
    fn parse_bad_records() {
        assert_eq!(
            Err(RecordError::FieldCount(3)),
            MatchResult::from_record(&["Rovers", "United", "2"])
        );
        assert_eq!(
            Err(RecordError::InvalidGoals("two".into())),
            MatchResult::from_record(&["Rovers", "United", "two", "1", "0", "0"])
        );

        let data = "header\nRovers,United,2,1,1\n";
        let err = read_results(data.as_bytes()).unwrap_err();
        assert_eq!("line 2: expected 6 fields, got 5", err.to_string());
    }

    #[test]
    fn empty_results() {
        assert_eq!(Err(FitError::NoResults), fit_ratings(&[]));
    }

    #[test]
    fn self_fixture() {
        let mut results = sample_results();
        results.push(result("City", "City", (1, 1), (0, 0)));
        assert_eq!(
            Err(FitError::SelfFixture {
                index: 4,
                team: "City".into()
            }),
            fit_ratings(&results)
        );
    }
}
