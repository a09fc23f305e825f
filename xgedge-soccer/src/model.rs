use std::ops::RangeInclusive;

use anyhow::anyhow;
use tracing::debug;

use xgedge::linear::matrix::Matrix;
use xgedge::market::{Market, OverroundMethod, DECIMAL_PRICE_BOUNDS};

use crate::domain::error::{
    Field, InvalidAttribute, ModelError, Subject, UndefinedOdds, ValidationError,
};
use crate::domain::{ByOutcome, Side, TeamAttributes};
use crate::goal_rate::GoalRates;
use crate::league::{League, Registry};
use crate::scoregrid::ProbableScore;
use crate::strength::{Strength, StrengthModel};
use crate::value::Recommendation;
use crate::{goal_rate, scoregrid, value};

pub const MAX_GOALS_RANGE: RangeInclusive<u8> = 1..=30;

#[derive(Debug, Clone)]
pub struct Config {
    pub strength: StrengthModel,
    pub goal_rates: goal_rate::Config,

    /// The score grid spans `0..=max_goals` for each side.
    pub max_goals: u8,

    /// Applies the league's low-score correction, where the league specifies one.
    pub dixon_coles: bool,

    pub overround_method: OverroundMethod,
}
impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !MAX_GOALS_RANGE.contains(&self.max_goals) {
            return Err(anyhow!(
                "max goals ({}) outside of allowable range {MAX_GOALS_RANGE:?}",
                self.max_goals
            )
            .into());
        }
        self.strength.validate()?;
        self.goal_rates.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strength: StrengthModel::default(),
            goal_rates: goal_rate::Config::default(),
            max_goals: 10,
            dixon_coles: false,
            overround_method: OverroundMethod::Multiplicative,
        }
    }
}

/// The projected outcome of a single match.
#[derive(Debug, Clone)]
pub struct Projection {
    pub league: League,
    pub home_strength: Strength,
    pub away_strength: Strength,

    /// Present only under the scalar strength model.
    pub supremacy: Option<f64>,

    pub goal_rates: GoalRates,

    /// The low-score correlation applied to the grid, if any.
    pub rho: Option<f64>,

    pub scoregrid: Matrix<f64>,
    pub probs: ByOutcome<f64>,
    pub fair_prices: ByOutcome<Result<f64, UndefinedOdds>>,
}
impl Projection {
    pub fn most_likely_scores(&self, n: usize) -> Vec<ProbableScore> {
        scoregrid::most_likely(n, &self.scoregrid)
    }

    pub fn total_mass(&self) -> f64 {
        scoregrid::total_mass(&self.scoregrid)
    }

    pub fn expectations(&self) -> (f64, f64) {
        scoregrid::home_away_expectations(&self.scoregrid)
    }

    pub fn goals_over(&self, line: u8) -> f64 {
        scoregrid::goals_over(line, &self.scoregrid)
    }

    pub fn both_score(&self) -> f64 {
        scoregrid::both_score(&self.scoregrid)
    }
}

/// A projection set against the quoted prices of a head-to-head market.
#[derive(Debug, Clone)]
pub struct ValueReport {
    pub projection: Projection,
    pub market: Market,
    pub market_probs: ByOutcome<f64>,
    pub edges: ByOutcome<f64>,
    pub expected_values: ByOutcome<f64>,
    pub recommendation: Recommendation,
}

/// Computations over a validated configuration and league registry. Every operation is a pure
/// function of its arguments and the model's immutable state.
#[derive(Debug)]
pub struct Model {
    config: Config,
    registry: Registry,
}
impl Model {
    pub fn with_registry(config: Config, registry: Registry) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn list_leagues(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    pub fn strength(
        &self,
        attributes: &TeamAttributes,
        league_name: &str,
    ) -> Result<Strength, ModelError> {
        let league = self.registry.lookup(league_name)?;
        attributes.validate()?;
        let strength = self.config.strength.estimate(attributes, league);
        debug!("strength {strength:?} in {league_name}");
        Ok(strength)
    }

    pub fn project(
        &self,
        home: &TeamAttributes,
        away: &TeamAttributes,
        league_name: &str,
    ) -> Result<Projection, ModelError> {
        let league = self.registry.lookup(league_name)?;
        validate_team(home, Side::Home)?;
        validate_team(away, Side::Away)?;

        let (home_strength, away_strength, supremacy, goal_rates) = match &self.config.strength {
            StrengthModel::Scalar(config) => {
                let (home_strength, away_strength) =
                    (config.estimate(home), config.estimate(away));
                let supremacy = goal_rate::supremacy(home_strength, away_strength, league);
                let goal_rates = goal_rate::from_supremacy(supremacy, &self.config.goal_rates);
                (
                    Strength::Scalar(home_strength),
                    Strength::Scalar(away_strength),
                    Some(supremacy),
                    goal_rates,
                )
            }
            StrengthModel::AttackDefence(config) => {
                let (home_strength, away_strength) =
                    (config.estimate(home, league), config.estimate(away, league));
                let goal_rates = goal_rate::from_attack_defence(
                    &home_strength,
                    &away_strength,
                    league,
                    &self.config.goal_rates,
                );
                (
                    Strength::Pair(home_strength),
                    Strength::Pair(away_strength),
                    None,
                    goal_rates,
                )
            }
        };
        debug!(
            "strengths: home {home_strength:?}, away {away_strength:?}, supremacy: {supremacy:?}"
        );
        debug!("goal rates: {goal_rates:?}");

        let rho = if self.config.dixon_coles {
            league.rho
        } else {
            None
        };
        let scoregrid = scoregrid::build(&goal_rates, self.config.max_goals, rho);
        let probs = scoregrid::outcome_probs(&scoregrid);
        debug!(
            "probs: {probs:?}, captured mass: {:.6}, rho: {rho:?}",
            scoregrid::total_mass(&scoregrid)
        );
        let fair_prices = value::fair_prices(&probs);

        Ok(Projection {
            league: league.clone(),
            home_strength,
            away_strength,
            supremacy,
            goal_rates,
            rho,
            scoregrid,
            probs,
            fair_prices,
        })
    }

    pub fn value(
        &self,
        home: &TeamAttributes,
        away: &TeamAttributes,
        league_name: &str,
        prices: &ByOutcome<f64>,
    ) -> Result<ValueReport, ModelError> {
        for (outcome, &price) in prices.iter() {
            InvalidAttribute::check(
                Subject::Market,
                Field::Price(outcome),
                price,
                &DECIMAL_PRICE_BOUNDS,
            )?;
        }
        let projection = self.project(home, away, league_name)?;
        let market = value::demargin(prices, &self.config.overround_method);
        let market_probs = value::market_probs(&market);
        debug!(
            "market probs: {market_probs:?}, overround: {:.4}",
            market.overround.value
        );
        let edges = value::edges(&projection.probs, &market_probs);
        let expected_values = projection
            .probs
            .zip_with(prices, |&prob, &price| value::expected_value(prob, price));
        let recommendation = value::recommend(&edges);
        debug!("edges: {edges:?}, recommendation: {recommendation}");

        Ok(ValueReport {
            projection,
            market,
            market_probs,
            edges,
            expected_values,
            recommendation,
        })
    }
}

impl TryFrom<Config> for Model {
    type Error = ValidationError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Self::with_registry(config, Registry::builtin()?)
    }
}

fn validate_team(attributes: &TeamAttributes, side: Side) -> Result<(), InvalidAttribute> {
    attributes.validate().map_err(|err| err.on_side(side))
}
