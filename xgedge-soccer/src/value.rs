//! Fair prices, market de-margining and the detection of value.

use std::fmt::{Display, Formatter};

use xgedge::market::{Market, OverroundMethod};

use crate::domain::error::UndefinedOdds;
use crate::domain::{ByOutcome, Outcome};

/// The reciprocal of `prob`, defined only for finite, strictly positive probabilities.
pub fn fair_price(prob: f64) -> Result<f64, UndefinedOdds> {
    if prob.is_finite() && prob > 0.0 {
        Ok(1.0 / prob)
    } else {
        Err(UndefinedOdds { prob })
    }
}

pub fn fair_prices(probs: &ByOutcome<f64>) -> ByOutcome<Result<f64, UndefinedOdds>> {
    probs.map(|&prob| fair_price(prob))
}

/// Fits a market to the quoted head-to-head `prices`, recovering probabilities that sum to 1.
pub fn demargin(prices: &ByOutcome<f64>, method: &OverroundMethod) -> Market {
    Market::fit(method, prices.to_vec(), 1.0)
}

/// The fitted probabilities of a head-to-head market, as returned by [`demargin`].
pub fn market_probs(market: &Market) -> ByOutcome<f64> {
    debug_assert_eq!(3, market.probs.len());
    ByOutcome::new(market.probs[0], market.probs[1], market.probs[2])
}

/// Model probability less the de-margined market probability.
pub fn edges(model_probs: &ByOutcome<f64>, market_probs: &ByOutcome<f64>) -> ByOutcome<f64> {
    model_probs.zip_with(market_probs, |model, market| model - market)
}

/// Expected return per unit staked at `price`, where the true probability is `prob`.
#[inline]
pub fn expected_value(prob: f64, price: f64) -> f64 {
    prob * price - 1.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    Back { outcome: Outcome, edge: f64 },
    NoValue,
}
impl Recommendation {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Recommendation::Back { outcome, .. } => Some(*outcome),
            Recommendation::NoValue => None,
        }
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Back { outcome, .. } => write!(f, "{outcome}"),
            Recommendation::NoValue => write!(f, "No value detected"),
        }
    }
}

/// Selects the outcome with the greatest edge, provided that edge is strictly positive. Equal
/// edges resolve to the earlier outcome in home, draw, away order.
pub fn recommend(edges: &ByOutcome<f64>) -> Recommendation {
    let mut best: Option<(Outcome, f64)> = None;
    for (outcome, &edge) in edges.iter() {
        match best {
            Some((_, best_edge)) if edge <= best_edge => {}
            _ => best = Some((outcome, edge)),
        }
    }
    match best {
        Some((outcome, edge)) if edge > 0.0 => Recommendation::Back { outcome, edge },
        _ => Recommendation::NoValue,
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use tinyrand::StdRand;
    use xgedge_testing::{assert_slice_f64_relative, uniform};

    use super::*;

    #[test]
    fn fair_price_inverts_prob() {
        assert_float_relative_eq!(2.0, fair_price(0.5).unwrap());
        assert_float_relative_eq!(4.0, fair_price(0.25).unwrap());
        assert_eq!(1.0, fair_price(1.0).unwrap());
    }

    #[test]
    fn fair_price_round_trip() {
        let mut rand = StdRand::default();
        for _ in 0..1_000 {
            let prob = uniform(&mut rand, 1e-6..1.0);
            assert_float_relative_eq!(prob, 1.0 / fair_price(prob).unwrap(), 1e-12);
        }
    }

    #[test]
    fn fair_price_undefined() {
        assert_eq!(Err(UndefinedOdds { prob: 0.0 }), fair_price(0.0));
        assert_eq!(Err(UndefinedOdds { prob: -0.1 }), fair_price(-0.1));
        assert!(fair_price(f64::NAN).is_err());
        assert!(fair_price(f64::INFINITY).is_err());
        assert_eq!(
            "fair price undefined for probability 0",
            fair_price(0.0).unwrap_err().to_string()
        );
    }

    #[test]
    fn fair_prices_per_outcome() {
        let prices = fair_prices(&ByOutcome::new(0.5, 0.5, 0.0));
        assert_eq!(Ok(2.0), prices.home);
        assert_eq!(Ok(2.0), prices.draw);
        assert_eq!(Err(UndefinedOdds { prob: 0.0 }), prices.away);
    }

    #[test]
    fn demargin_multiplicative() {
        let market = demargin(&ByOutcome::new(1.9, 3.6, 4.2), &OverroundMethod::Multiplicative);
        let probs = market_probs(&market);
        assert_slice_f64_relative(
            &[0.5050100200400801, 0.2665330661322645, 0.2284569138276553],
            &probs.to_vec(),
            1e-9,
        );
        assert_float_relative_eq!(1.0421888053467, market.overround.value, 1e-9);
        assert_float_absolute_eq!(1.0, probs.sum(), 1e-9);
    }

    #[test]
    fn demargin_sums_to_one() {
        let mut rand = StdRand::default();
        for method in [OverroundMethod::Multiplicative, OverroundMethod::Power] {
            for _ in 0..1_000 {
                let prices = ByOutcome::new(
                    uniform(&mut rand, 1.01..20.0),
                    uniform(&mut rand, 1.01..20.0),
                    uniform(&mut rand, 1.01..20.0),
                );
                let probs = market_probs(&demargin(&prices, &method));
                assert_float_absolute_eq!(1.0, probs.sum(), 1e-9);
            }
        }
    }

    #[test]
    fn edges_subtract_market_from_model() {
        let model = ByOutcome::new(0.5, 0.25, 0.25);
        let market = ByOutcome::new(0.45, 0.3, 0.25);
        let edges = edges(&model, &market);
        assert_float_absolute_eq!(0.05, edges.home);
        assert_float_absolute_eq!(-0.05, edges.draw);
        assert_eq!(0.0, edges.away);
    }

    #[test]
    fn value_scenario() {
        let model = ByOutcome::new(0.50, 0.25, 0.25);
        let market = demargin(&ByOutcome::new(2.50, 3.80, 4.00), &OverroundMethod::Multiplicative);
        assert_float_relative_eq!(0.9131578947368422, market.overround.value, 1e-9);

        let market_probs = market_probs(&market);
        assert_float_absolute_eq!(0.4380403458213256, market_probs.home, 1e-9);
        assert_float_absolute_eq!(0.28818443804034577, market_probs.draw, 1e-9);
        assert_float_absolute_eq!(0.2737752161383285, market_probs.away, 1e-9);

        let edges = edges(&model, &market_probs);
        assert_float_absolute_eq!(0.061959654178674384, edges.home, 1e-9);
        assert!(edges.draw < 0.0);
        assert!(edges.away < 0.0);

        let recommendation = recommend(&edges);
        assert_eq!(Some(Outcome::Home), recommendation.outcome());
        assert_eq!("Home", recommendation.to_string());
    }

    #[test]
    fn recommend_requires_positive_edge() {
        assert_eq!(
            Recommendation::NoValue,
            recommend(&ByOutcome::new(-0.01, -0.02, -0.03))
        );
        assert_eq!(Recommendation::NoValue, recommend(&ByOutcome::new(0.0, 0.0, 0.0)));
        assert_eq!(
            "No value detected",
            recommend(&ByOutcome::new(0.0, -0.1, 0.0)).to_string()
        );
    }

    #[test]
    fn recommend_greatest_edge() {
        assert_eq!(
            Recommendation::Back {
                outcome: Outcome::Away,
                edge: 0.04
            },
            recommend(&ByOutcome::new(0.01, -0.05, 0.04))
        );
        assert_eq!(
            Some(Outcome::Draw),
            recommend(&ByOutcome::new(-0.02, 0.03, -0.01)).outcome()
        );
    }

    #[test]
    fn recommend_tie_prefers_earlier_outcome() {
        assert_eq!(
            Some(Outcome::Draw),
            recommend(&ByOutcome::new(-0.01, 0.02, 0.02)).outcome()
        );
    }

    #[test]
    fn expected_value_of_fair_bet_is_nil() {
        assert_eq!(0.0, expected_value(0.5, 2.0));
        assert_float_relative_eq!(0.25, expected_value(0.5, 2.5));
        assert_float_relative_eq!(-0.2, expected_value(0.2, 4.0));
    }
}
