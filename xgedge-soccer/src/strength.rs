//! Reduction of a team's raw attributes to a strength rating.
//!
//! Two parameterisations are supported. The [`ScalarConfig`] model collapses a team to a single
//! number, which is later differenced against the opponent's. The [`AttackDefenceConfig`] model
//! produces a pair of multipliers, each centred on 1.0 for a league-average side, where higher
//! values are stronger for both attack and defence.

use std::ops::RangeInclusive;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::{TeamAttributes, MANAGER_RATING_BOUNDS, PITCH_RANK_BOUNDS, SQUAD_RATING_BOUNDS};
use crate::league::League;

const WEIGHT_RANGE: RangeInclusive<f64> = 0.0..=1.0;
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrengthModel {
    Scalar(ScalarConfig),
    AttackDefence(AttackDefenceConfig),
}
impl StrengthModel {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            StrengthModel::Scalar(config) => config.validate(),
            StrengthModel::AttackDefence(config) => config.validate(),
        }
    }

    pub fn estimate(&self, attributes: &TeamAttributes, league: &League) -> Strength {
        match self {
            StrengthModel::Scalar(config) => Strength::Scalar(config.estimate(attributes)),
            StrengthModel::AttackDefence(config) => {
                Strength::Pair(config.estimate(attributes, league))
            }
        }
    }
}

impl Default for StrengthModel {
    fn default() -> Self {
        StrengthModel::Scalar(ScalarConfig::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Strength {
    Scalar(f64),
    Pair(AttackDefence),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackDefence {
    pub attack: f64,
    pub defence: f64,
}
impl AttackDefence {
    /// Factor applied to the opponent's expected goals; the reciprocal of defensive strength.
    pub fn concession(&self) -> f64 {
        1.0 / self.defence
    }
}

/// Blend of the subjective ratings into a prior in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorConfig {
    pub squad_weight: f64,
    pub manager_weight: f64,
}
impl PriorConfig {
    pub fn estimate(&self, attributes: &TeamAttributes) -> f64 {
        self.squad_weight * attributes.squad_rating / SQUAD_RATING_BOUNDS.end()
            + self.manager_weight * attributes.manager_rating / MANAGER_RATING_BOUNDS.end()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_weights("prior", &[self.squad_weight, self.manager_weight])
    }
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            squad_weight: 0.6,
            manager_weight: 0.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarConfig {
    /// Weight of the xG-for to xG-against ratio.
    pub objective_weight: f64,

    /// Weight of the pitch rank, normalised by its upper bound.
    pub tactical_weight: f64,

    /// Weight of the subjective prior.
    pub prior_weight: f64,

    pub prior: PriorConfig,

    /// Substituted for an xG-against of exactly zero.
    pub xg_against_substitute: f64,
}
impl ScalarConfig {
    pub fn estimate(&self, attributes: &TeamAttributes) -> f64 {
        let objective = attributes.xg_for
            / substitute_zero(attributes.xg_against, self.xg_against_substitute);
        let tactical = attributes.pitch_rank / PITCH_RANK_BOUNDS.end();
        let prior = self.prior.estimate(attributes);
        self.objective_weight * objective + self.tactical_weight * tactical + self.prior_weight * prior
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_weights(
            "scalar strength",
            &[self.objective_weight, self.tactical_weight, self.prior_weight],
        )?;
        check_substitute(self.xg_against_substitute)?;
        self.prior.validate()
    }
}

impl Default for ScalarConfig {
    fn default() -> Self {
        Self {
            objective_weight: 0.5,
            tactical_weight: 0.3,
            prior_weight: 0.2,
            prior: PriorConfig::default(),
            xg_against_substitute: 0.01,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackDefenceConfig {
    /// Weight of the xG rate relative to the league's base rate.
    pub objective_weight: f64,

    /// Weight of the subjective prior, rescaled so that a prior of 0.5 maps to 1.0.
    pub prior_weight: f64,

    pub prior: PriorConfig,

    /// Proportion of a raw rating's deviation from 1.0 that is retained.
    pub shrink_factor: f64,

    /// Substituted for an xG-against of exactly zero.
    pub xg_against_substitute: f64,
}
impl AttackDefenceConfig {
    pub fn estimate(&self, attributes: &TeamAttributes, league: &League) -> AttackDefence {
        let base_goal_rate = league.effective_base_goal_rate();
        let prior = 2.0 * self.prior.estimate(attributes);
        let raw_attack =
            self.objective_weight * attributes.xg_for / base_goal_rate + self.prior_weight * prior;
        let raw_defence = self.objective_weight * base_goal_rate
            / substitute_zero(attributes.xg_against, self.xg_against_substitute)
            + self.prior_weight * prior;
        AttackDefence {
            attack: shrink(raw_attack, self.shrink_factor),
            defence: shrink(raw_defence, self.shrink_factor),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_weights("attack/defence strength", &[self.objective_weight, self.prior_weight])?;
        check_substitute(self.xg_against_substitute)?;
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(anyhow!(
                "shrink factor ({}) must lie in (0, 1)",
                self.shrink_factor
            )
            .into());
        }
        self.prior.validate()
    }
}

impl Default for AttackDefenceConfig {
    fn default() -> Self {
        Self {
            objective_weight: 0.7,
            prior_weight: 0.3,
            prior: PriorConfig::default(),
            shrink_factor: 0.6,
            xg_against_substitute: 0.01,
        }
    }
}

/// Pulls a rating towards 1.0, retaining `factor` of its deviation.
#[inline]
pub fn shrink(raw: f64, factor: f64) -> f64 {
    1.0 + factor * (raw - 1.0)
}

#[inline]
fn substitute_zero(value: f64, substitute: f64) -> f64 {
    if value == 0.0 {
        substitute
    } else {
        value
    }
}

fn check_weights(name: &str, weights: &[f64]) -> Result<(), ValidationError> {
    if let Some(weight) = weights.iter().find(|&&weight| !WEIGHT_RANGE.contains(&weight)) {
        return Err(anyhow!(
            "{name} weight ({weight}) outside of allowable range {WEIGHT_RANGE:?}"
        )
        .into());
    }
    let sum = weights.iter().sum::<f64>();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(anyhow!("{name} weights sum to {sum}, expected 1").into());
    }
    Ok(())
}

fn check_substitute(substitute: f64) -> Result<(), ValidationError> {
    if !substitute.is_finite() || substitute <= 0.0 {
        return Err(anyhow!("xG against substitute ({substitute}) must be positive").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use tinyrand::StdRand;
    use xgedge_testing::uniform;

    use super::*;

    fn strong_side() -> TeamAttributes {
        TeamAttributes {
            xg_for: 2.0,
            xg_against: 1.0,
            pitch_rank: 1.5,
            squad_rating: 70.0,
            manager_rating: 7.0,
        }
    }

    fn weak_side() -> TeamAttributes {
        TeamAttributes {
            xg_for: 1.0,
            xg_against: 1.5,
            pitch_rank: 1.0,
            squad_rating: 40.0,
            manager_rating: 5.0,
        }
    }

    fn random_attributes(rand: &mut StdRand) -> TeamAttributes {
        TeamAttributes {
            xg_for: uniform(rand, 0.0..4.0),
            xg_against: uniform(rand, 0.2..4.0),
            pitch_rank: uniform(rand, 0.35..3.39),
            squad_rating: uniform(rand, 0.0..100.0),
            manager_rating: uniform(rand, 1.0..10.0),
        }
    }

    #[test]
    fn prior() {
        let prior = PriorConfig::default();
        assert_float_relative_eq!(0.6 * 0.7 + 0.4 * 0.7, prior.estimate(&strong_side()));
        assert_float_relative_eq!(0.6 * 0.4 + 0.4 * 0.5, prior.estimate(&weak_side()));
    }

    #[test]
    fn scalar_strength() {
        let config = ScalarConfig::default();
        let expected = 0.5 * 2.0 + 0.3 * 1.5 / 3.39 + 0.2 * (0.6 * 0.7 + 0.4 * 0.7);
        assert_float_relative_eq!(expected, config.estimate(&strong_side()));
        let expected = 0.5 * (1.0 / 1.5) + 0.3 * 1.0 / 3.39 + 0.2 * (0.6 * 0.4 + 0.4 * 0.5);
        assert_float_relative_eq!(expected, config.estimate(&weak_side()));
        assert!(config.estimate(&strong_side()) > config.estimate(&weak_side()));
    }

    #[test]
    fn scalar_strength_zero_xg_against() {
        let config = ScalarConfig::default();
        let attributes = TeamAttributes {
            xg_against: 0.0,
            ..strong_side()
        };
        let strength = config.estimate(&attributes);
        assert!(strength.is_finite());
        let expected = 0.5 * 2.0 / 0.01 + 0.3 * 1.5 / 3.39 + 0.2 * 0.7;
        assert_float_relative_eq!(expected, strength);
    }

    #[test]
    fn scalar_strength_monotonic_in_xg_for() {
        let config = ScalarConfig::default();
        let mut rand = StdRand::default();
        for _ in 0..1_000 {
            let attributes = random_attributes(&mut rand);
            let improved = TeamAttributes {
                xg_for: attributes.xg_for + uniform(&mut rand, 0.0..1.0),
                ..attributes.clone()
            };
            assert!(config.estimate(&improved) >= config.estimate(&attributes));
        }
    }

    #[test]
    fn attack_defence_of_average_side() {
        let config = AttackDefenceConfig::default();
        let league = League::new("Test", 0.25).with_base_goal_rate(1.5);
        let average = TeamAttributes {
            xg_for: 1.5,
            xg_against: 1.5,
            pitch_rank: 1.0,
            squad_rating: 50.0,
            manager_rating: 5.0,
        };
        let strength = config.estimate(&average, &league);
        assert_float_relative_eq!(1.0, strength.attack);
        assert_float_relative_eq!(1.0, strength.defence);
        assert_float_relative_eq!(1.0, strength.concession());
    }

    #[test]
    fn attack_defence_shrinks_towards_one() {
        let config = AttackDefenceConfig::default();
        let league = League::new("Test", 0.25).with_base_goal_rate(1.5);
        let strength = config.estimate(&strong_side(), &league);
        let prior = 2.0 * (0.6 * 0.7 + 0.4 * 0.7);
        let raw_attack = 0.7 * 2.0 / 1.5 + 0.3 * prior;
        let raw_defence = 0.7 * 1.5 / 1.0 + 0.3 * prior;
        assert_float_relative_eq!(1.0 + 0.6 * (raw_attack - 1.0), strength.attack);
        assert_float_relative_eq!(1.0 + 0.6 * (raw_defence - 1.0), strength.defence);
        assert!(strength.attack < raw_attack);
        assert!(strength.defence < raw_defence);
    }

    #[test]
    fn attack_defence_never_collapses() {
        let config = AttackDefenceConfig::default();
        let league = League::new("Test", 0.0);
        let hopeless = TeamAttributes {
            xg_for: 0.0,
            xg_against: 0.0,
            pitch_rank: 0.35,
            squad_rating: 0.0,
            manager_rating: 1.0,
        };
        let strength = config.estimate(&hopeless, &league);
        assert!(strength.attack >= 1.0 - config.shrink_factor);
        assert!(strength.defence.is_finite());
    }

    #[test]
    fn attack_defence_monotonic_in_xg_for() {
        let config = AttackDefenceConfig::default();
        let league = League::new("Test", 0.25);
        let mut rand = StdRand::default();
        for _ in 0..1_000 {
            let attributes = random_attributes(&mut rand);
            let improved = TeamAttributes {
                xg_for: attributes.xg_for + uniform(&mut rand, 0.0..1.0),
                ..attributes.clone()
            };
            let (before, after) = (
                config.estimate(&attributes, &league),
                config.estimate(&improved, &league),
            );
            assert!(after.attack >= before.attack);
            assert_eq!(before.defence, after.defence);
        }
    }

    #[test]
    fn shrink_preserves_unity() {
        assert_eq!(1.0, shrink(1.0, 0.6));
        assert_float_relative_eq!(1.6, shrink(2.0, 0.6));
        assert_float_relative_eq!(0.7, shrink(0.5, 0.6));
    }

    #[test]
    fn model_dispatch() {
        let league = League::new("Test", 0.25);
        let scalar = StrengthModel::default();
        assert!(matches!(scalar.estimate(&strong_side(), &league), Strength::Scalar(_)));
        let pair = StrengthModel::AttackDefence(AttackDefenceConfig::default());
        assert!(matches!(pair.estimate(&strong_side(), &league), Strength::Pair(_)));
    }

    #[test]
    fn validate_defaults() {
        StrengthModel::default().validate().unwrap();
        StrengthModel::AttackDefence(AttackDefenceConfig::default()).validate().unwrap();
    }

    #[test]
    fn validate_weight_sum() {
        let model = StrengthModel::Scalar(ScalarConfig {
            objective_weight: 0.5,
            tactical_weight: 0.3,
            prior_weight: 0.3,
            ..ScalarConfig::default()
        });
        let err = model.validate().unwrap_err().to_string();
        assert!(err.starts_with("scalar strength weights sum to 1.1"), "{err}");
    }

    #[test]
    fn validate_weight_range() {
        let model = StrengthModel::Scalar(ScalarConfig {
            objective_weight: 1.2,
            tactical_weight: -0.2,
            prior_weight: 0.0,
            ..ScalarConfig::default()
        });
        assert_eq!(
            "scalar strength weight (1.2) outside of allowable range 0.0..=1.0",
            model.validate().unwrap_err().to_string()
        );
    }

    #[test]
    fn validate_shrink_factor() {
        for shrink_factor in [0.0, 1.0, -0.5] {
            let model = StrengthModel::AttackDefence(AttackDefenceConfig {
                shrink_factor,
                ..AttackDefenceConfig::default()
            });
            assert!(model.validate().is_err(), "{shrink_factor} should be rejected");
        }
    }

    #[test]
    fn validate_prior_weights() {
        let model = StrengthModel::Scalar(ScalarConfig {
            prior: PriorConfig {
                squad_weight: 0.6,
                manager_weight: 0.6,
            },
            ..ScalarConfig::default()
        });
        assert!(model.validate().is_err());
    }

    #[test]
    fn validate_substitute() {
        let model = StrengthModel::Scalar(ScalarConfig {
            xg_against_substitute: 0.0,
            ..ScalarConfig::default()
        });
        assert!(model.validate().is_err());
    }
}
