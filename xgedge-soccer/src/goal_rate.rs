//! Mapping of team strengths to the expected goals of each side.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::league::League;
use crate::strength::AttackDefence;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Expected goals of either side when the supremacy is nil.
    pub base_goal_rate: f64,

    /// Goals gained by one side (and lost by the other) per unit of supremacy.
    pub goals_per_supremacy: f64,

    /// Lower bound on the expected goals of either side.
    pub min_goal_rate: f64,

    /// Upper bound on the expected goals of either side.
    pub max_goal_rate: f64,
}
impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("base goal rate", self.base_goal_rate),
            ("goals per supremacy", self.goals_per_supremacy),
            ("min goal rate", self.min_goal_rate),
            ("max goal rate", self.max_goal_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(anyhow!("{name} ({value}) must be positive").into());
            }
        }
        if self.min_goal_rate > self.base_goal_rate {
            return Err(anyhow!(
                "min goal rate ({}) cannot exceed the base goal rate ({})",
                self.min_goal_rate,
                self.base_goal_rate
            )
            .into());
        }
        if self.max_goal_rate < self.base_goal_rate {
            return Err(anyhow!(
                "max goal rate ({}) cannot be below the base goal rate ({})",
                self.max_goal_rate,
                self.base_goal_rate
            )
            .into());
        }
        Ok(())
    }

    #[inline]
    fn clamp(&self, goal_rate: f64) -> f64 {
        f64::max(self.min_goal_rate, f64::min(self.max_goal_rate, goal_rate))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_goal_rate: 1.45,
            goals_per_supremacy: 0.60,
            min_goal_rate: 0.10,
            max_goal_rate: 6.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRates {
    pub home: f64,
    pub away: f64,
}
impl GoalRates {
    pub fn flip(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }
}

/// Net strength of the home side over the away side, inclusive of the home advantage.
#[inline]
pub fn supremacy(home_strength: f64, away_strength: f64, league: &League) -> f64 {
    home_strength - away_strength + league.home_advantage
}

pub fn from_supremacy(supremacy: f64, config: &Config) -> GoalRates {
    let shift = supremacy * config.goals_per_supremacy;
    GoalRates {
        home: config.clamp(config.base_goal_rate + shift),
        away: config.clamp(config.base_goal_rate - shift),
    }
}

/// Combines the attack of each side with the concession of its opponent, scaled by the league's
/// base rate. Only the home side receives the home advantage.
pub fn from_attack_defence(
    home: &AttackDefence,
    away: &AttackDefence,
    league: &League,
    config: &Config,
) -> GoalRates {
    let base_goal_rate = league.effective_base_goal_rate();
    let home_rate =
        base_goal_rate * home.attack * away.concession() * league.home_advantage_multiplier();
    let away_rate = base_goal_rate * away.attack * home.concession();
    GoalRates {
        home: config.clamp(home_rate),
        away: config.clamp(away_rate),
    }
}
