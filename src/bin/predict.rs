use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use scorecast::adjust::Adjustments;
use scorecast::analysis::{Analysis, UserPrices};
use scorecast::domain::{Outcome, Period, Side};
use scorecast::file::FromJsonFile;
use scorecast::fixture::{Competitions, Fixture};
use scorecast::market::Market;
use scorecast::print;
use scorecast::scoregrid::GOALS_LINE;
use scorecast::strength::RatingTable;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON file of fixtures with expected-goal rates
    #[clap(short = 'f', long)]
    fixtures: Option<PathBuf>,

    /// JSON file of team ratings
    #[clap(short = 'r', long)]
    ratings: Option<PathBuf>,

    /// home team, when rating a fixture
    #[clap(long)]
    home: Option<String>,

    /// away team, when rating a fixture
    #[clap(long)]
    away: Option<String>,

    /// JSON file of competition names by code
    #[clap(short = 'c', long)]
    competitions: Option<PathBuf>,

    /// period to analyse (full-time or first-half); both if omitted
    #[clap(short = 'p', long)]
    period: Option<Period>,

    #[clap(long = "must-win-home", default_value_t = 1.0)]
    must_win_home: f64,

    #[clap(long = "must-win-away", default_value_t = 1.0)]
    must_win_away: f64,

    #[clap(long = "missing-home", default_value_t = 1.0)]
    missing_players_home: f64,

    #[clap(long = "missing-away", default_value_t = 1.0)]
    missing_players_away: f64,

    #[clap(long = "home-advantage", default_value_t = 1.0)]
    home_advantage: f64,

    /// offered price for the home win
    #[clap(long = "odds-home")]
    odds_home: Option<f64>,

    /// offered price for the draw
    #[clap(long = "odds-draw")]
    odds_draw: Option<f64>,

    /// offered price for the away win
    #[clap(long = "odds-away")]
    odds_away: Option<f64>,

    /// offered price for over 2.5 goals
    #[clap(long = "odds-over")]
    odds_over: Option<f64>,

    /// offered price for under 2.5 goals
    #[clap(long = "odds-under")]
    odds_under: Option<f64>,

    /// print the scoreline grid
    #[clap(long)]
    grid: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.fixtures.is_none() && self.ratings.is_none()
            || self.fixtures.is_some() && self.ratings.is_some()
        {
            bail!("either the -f or the -r flag must be specified");
        }
        if self.ratings.is_some() && (self.home.is_none() || self.away.is_none()) {
            bail!("--home and --away must accompany the -r flag");
        }
        self.adjustments().validate()?;
        for price in self.user_prices().values() {
            if !price.is_finite() || *price <= 1.0 {
                bail!("offered price {price} must exceed 1.0");
            }
        }
        Ok(())
    }

    fn adjustments(&self) -> Adjustments {
        Adjustments {
            must_win_home: self.must_win_home,
            must_win_away: self.must_win_away,
            missing_players_home: self.missing_players_home,
            missing_players_away: self.missing_players_away,
            home_advantage: self.home_advantage,
        }
    }

    fn user_prices(&self) -> UserPrices {
        let [over, under] = Outcome::total_goals(GOALS_LINE);
        [
            (Outcome::Win(Side::Home), self.odds_home),
            (Outcome::Draw, self.odds_draw),
            (Outcome::Win(Side::Away), self.odds_away),
            (over, self.odds_over),
            (under, self.odds_under),
        ]
        .into_iter()
        .filter_map(|(outcome, price)| price.map(|price| (outcome, price)))
        .collect()
    }

    fn periods(&self) -> Vec<Period> {
        match self.period {
            None => Period::iter().collect(),
            Some(period) => vec![period],
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let adjustments = args.adjustments();
    let user_prices = args.user_prices();
    let competitions = match &args.competitions {
        None => Competitions::default(),
        Some(path) => Competitions::from_json_file(path)?,
    };

    if let Some(path) = &args.fixtures {
        let fixtures = Vec::<Fixture>::from_json_file(path)?;
        info!("read {} fixtures from {}", fixtures.len(), path.display());
        for period in args.periods() {
            let analysable = scorecast::fixture::analysable(fixtures.iter().cloned(), period);
            if analysable.is_empty() {
                warn!("no fixtures carry {period} rates");
            }
            for fixture in analysable {
                let mut analysis = Analysis::for_fixture(&fixture, period)?;
                analysis.set_adjustments(adjustments.clone());
                let kickoff = fixture
                    .kickoff
                    .map(|kickoff| kickoff.format(" %Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                info!(
                    "{}: {} v {}{kickoff} ({period})",
                    competitions.name(&fixture.competition),
                    fixture.home_team,
                    fixture.away_team
                );
                report(&analysis, &user_prices, args.grid);
            }
        }
    } else if let (Some(path), Some(home), Some(away)) = (&args.ratings, &args.home, &args.away) {
        let ratings = RatingTable::from_json_file(path)?;
        info!("read {} team ratings from {}", ratings.len(), path.display());
        for period in args.periods() {
            let mut analysis = Analysis::from_ratings(&ratings, home, away, period)?;
            analysis.set_adjustments(adjustments.clone());
            info!("{home} v {away} ({period})");
            report(&analysis, &user_prices, args.grid);
        }
    }

    let head_to_head: Vec<_> = Outcome::head_to_head()
        .iter()
        .filter_map(|outcome| user_prices.get(outcome).copied())
        .collect();
    if head_to_head.len() == 3 {
        let market = Market::fit(&head_to_head, 1.0);
        let labels: Vec<_> = Outcome::head_to_head().iter().map(ToString::to_string).collect();
        info!(
            "Offered 1/X/2 market:\n{}",
            Console::default().render(&print::tabulate_overround(&labels, &market))
        );
    }

    Ok(())
}

fn report(analysis: &Analysis, user_prices: &UserPrices, grid: bool) {
    let summary = analysis.summary();
    if summary.is_degenerate() {
        warn!("insufficient data for rates {:?}", analysis.rates());
        return;
    }
    let rates = analysis.rates();
    debug!("adjusted rates: home {:.3}, away {:.3}", rates.home, rates.away);
    if let Some((score, probability)) = summary.most_likely() {
        info!("most likely score {score} ({probability:.2}%)");
    }
    info!(
        "Markets:\n{}",
        Console::default().render(&print::tabulate_markets(&analysis.markets(user_prices)))
    );
    if grid {
        info!(
            "Scoreline grid (%):\n{}",
            Console::default().render(&print::tabulate_grid(&summary.grid))
        );
    }
}
