use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use xgedge::linear::matrix::Matrix;

use crate::domain::error::UndefinedOdds;
use crate::league::{League, DEFAULT_BASE_GOAL_RATE};
use crate::model::{Projection, ValueReport};
use crate::scoregrid::ProbableScore;
use crate::strength::Strength;
use crate::value;

/// Goals shown for either side in the correct-score table.
pub const SCOREGRID_WINDOW: usize = 6;

fn label_col() -> Col {
    Col::new(Styles::default().with(MinWidth(10)).with(Left))
}

fn value_col() -> Col {
    Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right))
}

fn format_price(price: &Result<f64, UndefinedOdds>) -> String {
    match price {
        Ok(price) => format!("{price:.3}"),
        Err(_) => "undefined".into(),
    }
}

pub fn tabulate_leagues(leagues: &[League]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![label_col(), value_col(), value_col(), value_col()])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "League".into(),
                "Home adv.".into(),
                "Base rate".into(),
                "Rho".into(),
            ],
        ));
    for league in leagues {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                league.name.clone().into(),
                format!("{:.2}", league.home_advantage).into(),
                match league.base_goal_rate {
                    Some(base_goal_rate) => format!("{base_goal_rate:.2}"),
                    None => format!("({DEFAULT_BASE_GOAL_RATE:.2})"),
                }
                .into(),
                match league.rho {
                    Some(rho) => format!("{rho:.2}"),
                    None => "-".into(),
                }
                .into(),
            ],
        ));
    }
    table
}

pub fn tabulate_strengths(strengths: &[(&str, Strength)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![label_col(), value_col(), value_col()])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Team".into(), "Strength".into(), "Defence".into()],
        ));
    for (team, strength) in strengths {
        let (strength, defence) = match strength {
            Strength::Scalar(strength) => (format!("{strength:.4}"), String::new()),
            Strength::Pair(pair) => (format!("{:.4}", pair.attack), format!("{:.4}", pair.defence)),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![(*team).into(), strength.into(), defence.into()],
        ));
    }
    table
}

pub fn tabulate_projection(projection: &Projection) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            label_col(),
            value_col(),
            value_col(),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(10))
                    .with(HAlign::Right),
            ),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Goals".into(),
                "Probability".into(),
                "Fair price".into(),
            ],
        ));
    let goals = [
        format!("{:.3}", projection.goal_rates.home),
        "".into(),
        format!("{:.3}", projection.goal_rates.away),
    ];
    for ((outcome, prob), goals) in projection.probs.iter().zip(goals) {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome.to_string().into(),
                goals.into(),
                format!("{prob:.4}").into(),
                format_price(projection.fair_prices.get(outcome)).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Total".into(),
            "".into(),
            format!("{:.4}", projection.probs.sum()).into(),
            "".into(),
        ],
    ));
    table
}

/// Correct-score probabilities for up to [`SCOREGRID_WINDOW`] goals per side, with home goals
/// down the rows.
pub fn tabulate_scoregrid(scoregrid: &Matrix<f64>) -> Table {
    let rows = usize::min(SCOREGRID_WINDOW, scoregrid.rows());
    let cols = usize::min(SCOREGRID_WINDOW, scoregrid.cols());
    let mut table = Table::default()
        .with_cols({
            let mut cols_styles = vec![Col::new(
                Styles::default()
                    .with(MinWidth(6))
                    .with(HAlign::Centred)
                    .with(Separator(true)),
            )];
            for _ in 0..cols {
                cols_styles.push(Col::new(
                    Styles::default().with(MinWidth(8)).with(HAlign::Right),
                ));
            }
            cols_styles
        })
        .with_row({
            let mut header_cells = vec!["H \\ A".into()];
            for away_goals in 0..cols {
                header_cells.push(format!("{away_goals}").into());
            }
            Row::new(Styles::default().with(Header(true)), header_cells)
        });
    for home_goals in 0..rows {
        let mut row_cells = vec![format!("{home_goals}").into()];
        for away_goals in 0..cols {
            row_cells.push(format!("{:.4}", scoregrid[(home_goals, away_goals)]).into());
        }
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

pub fn tabulate_scores(scores: &[ProbableScore]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![label_col(), value_col(), value_col()])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Score".into(), "Probability".into(), "Fair price".into()],
        ));
    for scored in scores {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                scored.score.to_string().into(),
                format!("{:.4}", scored.prob).into(),
                format_price(&value::fair_price(scored.prob)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_value(report: &ValueReport) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            label_col(),
            value_col(),
            value_col(),
            value_col(),
            value_col(),
            value_col(),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Price".into(),
                "Market".into(),
                "Model".into(),
                "Edge".into(),
                "EV".into(),
            ],
        ));
    for (index, (outcome, &market_prob)) in report.market_probs.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome.to_string().into(),
                format!("{:.2}", report.market.prices[index]).into(),
                format!("{market_prob:.4}").into(),
                format!("{:.4}", report.projection.probs[outcome]).into(),
                format!("{:+.4}", report.edges[outcome]).into(),
                format!("{:+.4}", report.expected_values[outcome]).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Overround".into(),
            format!("{:.4}", report.market.overround.value).into(),
            "Margin".into(),
            format!("{:.2}%", report.market.overround.margin() * 100.0).into(),
            "".into(),
            "".into(),
        ],
    ));
    table
}
