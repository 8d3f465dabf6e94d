//! The scoreline model: a joint probability grid over (home goals, away goals), built from two
//! independent Poisson rates, and the match markets derived from it.
//!
//! The grid is truncated at [`MAX_GOALS`] per side. Goal counts above the cap are not modelled,
//! so the raw grid carries slightly less than unit mass; every derived probability is
//! renormalised over the modelled space. The omitted tail is negligible for typical football
//! rates (λ below ~3) but grows with λ: at λ = 4 roughly a fifth of one side's mass lies above
//! five goals, and the renormalised figures overstate the low-scoring outcomes accordingly.

use crate::domain::{ExpectedGoals, Outcome, Over, Score, Side};
use crate::factorial;
use crate::linear::Matrix;
use crate::poisson;
use crate::probs::{percentage, SliceExt};

/// Maximum goals modelled per side; the grid is `(MAX_GOALS + 1)²`.
pub const MAX_GOALS: u8 = 5;

/// The over/under line reported by [`compute`]: 2.5 goals.
pub const GOALS_LINE: Over = Over(2);

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub max_goals: u8,
    pub goals_line: Over,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_goals: MAX_GOALS,
            goals_line: GOALS_LINE,
        }
    }
}

/// Populates `scoregrid` with the product of two independent Poisson mass functions. Cells are
/// raw probabilities; an invalid rate zeroes its side of the grid.
pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, scoregrid: &mut Matrix<f64>) {
    let factorial = factorial::Lookup::default();
    let home_probs: Vec<_> = (0..scoregrid.rows())
        .map(|goals| poisson::pmf_with(goals as u8, home_rate, &factorial))
        .collect();
    let away_probs: Vec<_> = (0..scoregrid.cols())
        .map(|goals| poisson::pmf_with(goals as u8, away_rate, &factorial))
        .collect();
    for (home_goals, home_prob) in home_probs.iter().enumerate() {
        for (away_goals, away_prob) in away_probs.iter().enumerate() {
            scoregrid[(home_goals, away_goals)] = home_prob * away_prob;
        }
    }
}

pub fn home_away_expectations(scoregrid: &Matrix<f64>) -> (f64, f64) {
    let (mut home_expectation, mut away_expectation) = (0.0, 0.0);

    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            home_expectation += home_goals as f64 * prob;
            away_expectation += away_goals as f64 * prob;
        }
    }

    (home_expectation, away_expectation)
}

/// Outcome percentages for one fixture. The grid holds the percentage probability of each exact
/// scoreline within the modelled space and sums to 100, as does the 1/X/2 triple and the
/// over/under pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorelineSummary {
    pub grid: Matrix<f64>,
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub over: f64,
    pub under: f64,
    pub goals_line: Over,
}
impl ScorelineSummary {
    /// The all-zero result with an empty grid, standing for "insufficient data".
    pub fn degenerate(goals_line: Over) -> Self {
        Self {
            grid: Matrix::empty(),
            home_win: 0.0,
            draw: 0.0,
            away_win: 0.0,
            over: 0.0,
            under: 0.0,
            goals_line,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.grid.is_empty()
    }

    /// Percentage probability of `outcome`. Correct scores outside the grid, and any outcome of a
    /// degenerate summary, are zero.
    pub fn probability(&self, outcome: &Outcome) -> f64 {
        match outcome {
            Outcome::Win(Side::Home) => self.home_win,
            Outcome::Draw => self.draw,
            Outcome::Win(Side::Away) => self.away_win,
            Outcome::GoalsOver(goals) if *goals == self.goals_line.0 => self.over,
            Outcome::GoalsUnder(goals) if *goals == self.goals_line.0.saturating_add(1) => self.under,
            _ => outcome.gather(&self.grid),
        }
    }

    /// The modal scoreline and its percentage probability.
    pub fn most_likely(&self) -> Option<(Score, f64)> {
        let mut most_likely: Option<(Score, f64)> = None;
        for home_goals in 0..self.grid.rows() {
            for (away_goals, &prob) in self.grid.row_slice(home_goals).iter().enumerate() {
                if most_likely.as_ref().map_or(true, |(_, best)| prob > *best) {
                    most_likely = Some((Score::new(home_goals as u8, away_goals as u8), prob));
                }
            }
        }
        most_likely
    }

    /// Mean goals per side, conditioned on the modelled space.
    pub fn expectations(&self) -> ExpectedGoals {
        let (home, away) = home_away_expectations(&self.grid);
        ExpectedGoals::new(home / 100.0, away / 100.0)
    }
}

/// Scoreline summary at the default goal cap and over/under line.
pub fn compute(home_rate: f64, away_rate: f64) -> ScorelineSummary {
    compute_with(home_rate, away_rate, &GridConfig::default())
}

pub fn compute_with(home_rate: f64, away_rate: f64, config: &GridConfig) -> ScorelineSummary {
    let dim = config.max_goals as usize + 1;
    let mut grid = Matrix::allocate(dim, dim);
    from_univariate_poisson(home_rate, away_rate, &mut grid);

    let home_win = Outcome::Win(Side::Home).gather(&grid);
    let draw = Outcome::Draw.gather(&grid);
    let away_win = Outcome::Win(Side::Away).gather(&grid);
    let result_total = home_win + draw + away_win;
    if result_total == 0.0 || result_total.is_nan() {
        return ScorelineSummary::degenerate(config.goals_line);
    }

    // each partition is normalised by its own total
    let [over_outcome, under_outcome] = Outcome::total_goals(config.goals_line);
    let over = over_outcome.gather(&grid);
    let under = under_outcome.gather(&grid);
    let goals_total = over + under;

    grid.flatten_mut().scale(100.0 / result_total);
    debug_assert!((grid.flatten().sum() - 100.0).abs() < 1e-6);

    ScorelineSummary {
        grid,
        home_win: percentage(home_win, result_total),
        draw: percentage(draw, result_total),
        away_win: percentage(away_win, result_total),
        over: percentage(over, goals_total),
        under: percentage(under, goals_total),
        goals_line: config.goals_line,
    }
}

impl Outcome {
    pub fn gather(&self, scoregrid: &Matrix<f64>) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::GoalsUnder(goals) => Self::gather_goals_under(*goals, scoregrid),
            Outcome::GoalsOver(goals) => Self::gather_goals_over(*goals, scoregrid),
            Outcome::CorrectScore(score) => Self::gather_correct_score(score, scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..usize::min(row, scoregrid.cols()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..usize::min(col, scoregrid.rows()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        for index in 0..usize::min(scoregrid.rows(), scoregrid.cols()) {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_goals_over(goals: u8, scoregrid: &Matrix<f64>) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u8, scoregrid: &Matrix<f64>) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_correct_score(score: &Score, scoregrid: &Matrix<f64>) -> f64 {
        let (home, away) = (score.home as usize, score.away as usize);
        if home < scoregrid.rows() && away < scoregrid.cols() {
            scoregrid[(home, away)]
        } else {
            0.0
        }
    }
}
