//! Bookmaker markets: recovering fair probabilities from quoted decimal prices.

use std::ops::RangeInclusive;

use crate::probs::SliceExt;

pub type PriceBounds = RangeInclusive<f64>;

/// Prices accepted from a bookmaker, in decimal odds.
pub const DECIMAL_PRICE_BOUNDS: PriceBounds = 1.01..=f64::INFINITY;

const POWER_MAX_ITERATIONS: usize = 200;
const POWER_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Overround {
    pub method: OverroundMethod,
    pub value: f64,
}
impl Overround {
    /// The bookmaker's margin as a fraction of the fair book.
    pub fn margin(&self) -> f64 {
        self.value - 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverroundMethod {
    /// Implied probabilities are divided by their sum.
    Multiplicative,

    /// Implied probabilities are raised to the common exponent that restores the fair sum.
    Power,
}

#[derive(Debug, Clone)]
pub struct Market {
    pub probs: Vec<f64>,
    pub prices: Vec<f64>,
    pub overround: Overround,
}
impl Market {
    /// Fits a market to the quoted `prices`, such that the derived probabilities sum to `fair_sum`.
    /// The prices are expected to be strictly greater than 1.
    pub fn fit(method: &OverroundMethod, prices: Vec<f64>, fair_sum: f64) -> Self {
        match method {
            OverroundMethod::Multiplicative => Self::fit_multiplicative(prices, fair_sum),
            OverroundMethod::Power => Self::fit_power(prices, fair_sum),
        }
    }

    fn fit_multiplicative(prices: Vec<f64>, fair_sum: f64) -> Self {
        let mut probs: Vec<_> = prices.invert().collect();
        let overround = probs.normalise(fair_sum) / fair_sum;
        Self {
            probs,
            prices,
            overround: Overround {
                method: OverroundMethod::Multiplicative,
                value: overround,
            },
        }
    }

    fn fit_power(prices: Vec<f64>, fair_sum: f64) -> Self {
        let implied: Vec<_> = prices.invert().collect();
        let overround = implied.sum() / fair_sum;
        let booksum = |exponent: f64| implied.iter().map(|prob| prob.powf(exponent)).sum::<f64>();

        let (mut low, mut high) = (0.0, 1.0);
        for _ in 0..POWER_MAX_ITERATIONS {
            if booksum(high) <= fair_sum {
                break;
            }
            low = high;
            high *= 2.0;
        }
        for _ in 0..POWER_MAX_ITERATIONS {
            let mid = (low + high) / 2.0;
            if booksum(mid) > fair_sum {
                low = mid;
            } else {
                high = mid;
            }
            if high - low < POWER_TOLERANCE {
                break;
            }
        }

        let exponent = (low + high) / 2.0;
        let probs = implied.iter().map(|prob| prob.powf(exponent)).collect();
        Self {
            probs,
            prices,
            overround: Overround {
                method: OverroundMethod::Power,
                value: overround,
            },
        }
    }
}
