use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::analysis::MarketValue;
use crate::domain::Period;
use crate::linear::Matrix;
use crate::market::Market;
use crate::strength::RatingTable;

const BLANK: &str = "-";

pub fn tabulate_markets(markets: &[MarketValue]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Market".into(),
                "Prob %".into(),
                "Fair".into(),
                "Odds".into(),
                "Value".into(),
                "EV %".into(),
            ],
        ));
    for market in markets {
        let assessment = &market.assessment;
        table.push_row(Row::new(
            Styles::default(),
            vec![
                market.outcome.to_string().into(),
                format!("{:.2}", market.probability).into(),
                if assessment.fair_price > 0.0 {
                    format!("{:.2}", assessment.fair_price)
                } else {
                    BLANK.to_string()
                }
                .into(),
                market
                    .user_price
                    .map(|price| format!("{price:.2}"))
                    .unwrap_or_else(|| BLANK.to_string())
                    .into(),
                if assessment.has_value { "✓" } else { "" }.into(),
                assessment
                    .ev_percent
                    .map(|ev| format!("{ev:+.2}"))
                    .unwrap_or_else(|| BLANK.to_string())
                    .into(),
            ],
        ));
    }
    table
}

/// Scoreline percentages, home goals down and away goals across.
pub fn tabulate_grid(grid: &Matrix<f64>) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(5))
                    .with(HAlign::Centred),
            )];
            for _ in 0..grid.cols() {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(6)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row({
            let mut header_cells = vec!["H \\ A".into()];
            for away_goals in 0..grid.cols() {
                header_cells.push(format!("{away_goals}").into());
            }
            Row::new(
                Styles::default().with(Header(true)).with(Separator(true)),
                header_cells,
            )
        });

    for home_goals in 0..grid.rows() {
        let mut row_cells = vec![format!("{home_goals}").into()];
        for away_goals in 0..grid.cols() {
            row_cells.push(format!("{:.2}", grid[(home_goals, away_goals)]).into());
        }
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

pub fn tabulate_overround(labels: &[String], market: &Market) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Outcome".into(), "Odds".into(), "Implied %".into()],
        ));
    for ((label, price), percentage) in labels.iter().zip(&market.prices).zip(market.percentages()) {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                label.clone().into(),
                format!("{price:.2}").into(),
                format!("{percentage:.2}").into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Margin".into(),
            "".into(),
            format!("{:.2}", market.overround.margin_percent()).into(),
        ],
    ));
    table
}

pub fn tabulate_ratings(ratings: &RatingTable, period: Period) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Team".into(),
                "Att H".into(),
                "Att A".into(),
                "Def H".into(),
                "Def A".into(),
            ],
        ));
    for rating in ratings.sorted() {
        let coefficients = rating.coefficients(period);
        table.push_row(Row::new(
            Styles::default(),
            vec![
                rating.team.clone().into(),
                format!("{:.3}", coefficients.attack_home).into(),
                format!("{:.3}", coefficients.attack_away).into(),
                format!("{:.3}", coefficients.defense_home).into(),
                format!("{:.3}", coefficients.defense_away).into(),
            ],
        ));
    }
    table
}
