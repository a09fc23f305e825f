//! The joint distribution of full-time scores, held as a dense matrix with home goals along the
//! rows and away goals along the columns.

use std::cmp::Ordering;

use xgedge::linear::matrix::Matrix;
use xgedge::poisson;
use xgedge::probs::SliceExt;

use crate::domain::{ByOutcome, Outcome, Score, Side};
use crate::goal_rate::GoalRates;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbableScore {
    pub score: Score,
    pub prob: f64,
}

/// A zeroed grid spanning `0..=max_goals` for each side.
pub fn allocate(max_goals: u8) -> Matrix<f64> {
    let dim = max_goals as usize + 1;
    Matrix::allocate(dim, dim)
}

/// Fills the grid with the product of two independent Poisson distributions.
pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, scoregrid: &mut Matrix<f64>) {
    let mut home_probs = vec![0.0; scoregrid.rows()];
    let mut away_probs = vec![0.0; scoregrid.cols()];
    poisson::fill_series(home_rate, &mut home_probs);
    poisson::fill_series(away_rate, &mut away_probs);
    for (home_goals, &home_prob) in home_probs.iter().enumerate() {
        for (away_goals, &away_prob) in away_probs.iter().enumerate() {
            scoregrid[(home_goals, away_goals)] = home_prob * away_prob;
        }
    }
}

/// Applies the simplified Dixon-Coles low-score correction. Only the 0-0, 1-1, 0-1 and 1-0 cells
/// are touched, and only those that fall within the grid; the grid is not renormalised.
pub fn apply_dixon_coles(rho: f64, scoregrid: &mut Matrix<f64>) {
    for (home_goals, away_goals, factor) in [
        (0, 0, 1.0 - rho),
        (1, 1, 1.0 - rho),
        (0, 1, 1.0 + rho),
        (1, 0, 1.0 + rho),
    ] {
        if home_goals < scoregrid.rows() && away_goals < scoregrid.cols() {
            scoregrid[(home_goals, away_goals)] *= factor;
        }
    }
}

/// Builds a `(max_goals + 1)`-square grid from the expected goals of either side, optionally
/// applying the low-score correction.
pub fn build(goal_rates: &GoalRates, max_goals: u8, rho: Option<f64>) -> Matrix<f64> {
    let mut scoregrid = allocate(max_goals);
    from_univariate_poisson(goal_rates.home, goal_rates.away, &mut scoregrid);
    if let Some(rho) = rho {
        apply_dixon_coles(rho, &mut scoregrid);
    }
    scoregrid
}

/// Sum over the entire grid. Less than 1 by the uncaptured tail.
pub fn total_mass(scoregrid: &Matrix<f64>) -> f64 {
    scoregrid.flatten().sum()
}

pub fn outcome_probs(scoregrid: &Matrix<f64>) -> ByOutcome<f64> {
    ByOutcome::new(
        Outcome::Home.gather(scoregrid),
        Outcome::Draw.gather(scoregrid),
        Outcome::Away.gather(scoregrid),
    )
}

pub fn home_away_expectations(scoregrid: &Matrix<f64>) -> (f64, f64) {
    let (mut home_expectation, mut away_expectation) = (0.0, 0.0);
    for (home_goals, away_goals, &prob) in scoregrid.cells() {
        home_expectation += home_goals as f64 * prob;
        away_expectation += away_goals as f64 * prob;
    }
    (home_expectation, away_expectation)
}

/// Probability that the total goals exceed `line`.
pub fn goals_over(line: u8, scoregrid: &Matrix<f64>) -> f64 {
    let line = line as usize;
    scoregrid
        .cells()
        .filter(|(home_goals, away_goals, _)| home_goals + away_goals > line)
        .map(|(_, _, prob)| prob)
        .sum()
}

/// Probability that the total goals fall short of `line`.
pub fn goals_under(line: u8, scoregrid: &Matrix<f64>) -> f64 {
    let line = line as usize;
    scoregrid
        .cells()
        .filter(|(home_goals, away_goals, _)| home_goals + away_goals < line)
        .map(|(_, _, prob)| prob)
        .sum()
}

pub fn both_score(scoregrid: &Matrix<f64>) -> f64 {
    scoregrid
        .cells()
        .filter(|&(home_goals, away_goals, _)| home_goals > 0 && away_goals > 0)
        .map(|(_, _, prob)| prob)
        .sum()
}

pub fn correct_score(score: &Score, scoregrid: &Matrix<f64>) -> f64 {
    let (row, col) = (score.home as usize, score.away as usize);
    if row < scoregrid.rows() && col < scoregrid.cols() {
        scoregrid[(row, col)]
    } else {
        0.0
    }
}

/// The `n` most probable scores, in descending order of probability. Ties are broken in favour
/// of the score appearing first in row-major order.
pub fn most_likely(n: usize, scoregrid: &Matrix<f64>) -> Vec<ProbableScore> {
    let mut scores: Vec<_> = scoregrid
        .cells()
        .map(|(home_goals, away_goals, &prob)| ProbableScore {
            score: Score::new(home_goals as u8, away_goals as u8),
            prob,
        })
        .collect();
    scores.sort_by(|a, b| b.prob.partial_cmp(&a.prob).unwrap_or(Ordering::Equal));
    scores.truncate(n);
    scores
}

impl Outcome {
    /// Sums the cells of the grid in which this outcome occurs.
    pub fn gather(&self, scoregrid: &Matrix<f64>) -> f64 {
        match self {
            Outcome::Home => Self::gather_win(Side::Home, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::Away => Self::gather_win(Side::Away, scoregrid),
        }
    }

    fn gather_win(side: Side, scoregrid: &Matrix<f64>) -> f64 {
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
}
