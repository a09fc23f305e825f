//! The registry of competitions and their calibration constants.

use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::anyhow;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use xgedge::file;

use crate::domain::error::{RegistryError, UnknownLeague, ValidationError};

/// Goals per team per match assumed when a league does not specify its own rate.
pub const DEFAULT_BASE_GOAL_RATE: f64 = 1.45;

const RHO_RANGE: RangeInclusive<f64> = -1.0..=1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub name: String,

    /// Home-field advantage in goals-equivalent units; zero for a neutral venue.
    pub home_advantage: f64,

    /// Expected goals per team per match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_goal_rate: Option<f64>,

    /// Dixon-Coles low-score correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho: Option<f64>,
}
impl League {
    pub fn new(name: impl Into<String>, home_advantage: f64) -> Self {
        Self {
            name: name.into(),
            home_advantage,
            base_goal_rate: None,
            rho: None,
        }
    }

    pub fn with_base_goal_rate(self, base_goal_rate: f64) -> Self {
        Self {
            base_goal_rate: Some(base_goal_rate),
            ..self
        }
    }

    pub fn with_rho(self, rho: f64) -> Self {
        Self {
            rho: Some(rho),
            ..self
        }
    }

    pub fn effective_base_goal_rate(&self) -> f64 {
        self.base_goal_rate.unwrap_or(DEFAULT_BASE_GOAL_RATE)
    }

    /// Home advantage restated as a factor on the home side's expected goals.
    pub fn home_advantage_multiplier(&self) -> f64 {
        let base_goal_rate = self.effective_base_goal_rate();
        (base_goal_rate + self.home_advantage) / base_goal_rate
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("league name cannot be blank").into());
        }
        if !self.home_advantage.is_finite() || self.home_advantage < 0.0 {
            return Err(anyhow!(
                "home advantage ({}) of '{}' must be a non-negative number",
                self.home_advantage,
                self.name
            )
            .into());
        }
        if let Some(base_goal_rate) = self.base_goal_rate {
            if !base_goal_rate.is_finite() || base_goal_rate <= 0.0 {
                return Err(anyhow!(
                    "base goal rate ({base_goal_rate}) of '{}' must be positive",
                    self.name
                )
                .into());
            }
        }
        if let Some(rho) = self.rho {
            if !RHO_RANGE.contains(&rho) {
                return Err(anyhow!(
                    "rho ({rho}) of '{}' outside of allowable range {RHO_RANGE:?}",
                    self.name
                )
                .into());
            }
        }
        Ok(())
    }
}

/// An ordered, immutable set of leagues, keyed by name.
#[derive(Clone, Debug)]
pub struct Registry {
    leagues: Vec<League>,
    name_to_index: FxHashMap<String, usize>,
}
impl Registry {
    /// A registry of the [`builtin_leagues`].
    pub fn builtin() -> Result<Self, ValidationError> {
        Self::try_from(builtin_leagues())
    }

    pub fn lookup(&self, name: &str) -> Result<&League, UnknownLeague> {
        self.name_to_index
            .get(name)
            .map(|&index| &self.leagues[index])
            .ok_or_else(|| UnknownLeague { name: name.into() })
    }

    /// League names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.leagues.iter().map(|league| league.name.as_str())
    }

    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    pub fn len(&self) -> usize {
        self.leagues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }

    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let leagues: Vec<League> = file::read_json(path)?;
        debug!("read {} leagues from {}", leagues.len(), path.display());
        Ok(Self::try_from(leagues)?)
    }

    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), io::Error> {
        file::write_json(path, &self.leagues)
    }
}

impl TryFrom<Vec<League>> for Registry {
    type Error = ValidationError;

    fn try_from(leagues: Vec<League>) -> Result<Self, Self::Error> {
        if leagues.is_empty() {
            return Err(anyhow!("registry must contain at least one league").into());
        }
        let mut name_to_index =
            FxHashMap::with_capacity_and_hasher(leagues.len(), Default::default());
        for (index, league) in leagues.iter().enumerate() {
            league.validate()?;
            if let Some(existing_index) = name_to_index.insert(league.name.clone(), index) {
                return Err(anyhow!(
                    "duplicate league '{}' at index {index}, previously at {existing_index}",
                    league.name
                )
                .into());
            }
        }
        Ok(Self {
            leagues,
            name_to_index,
        })
    }
}

/// Leagues with their published calibration constants.
pub fn builtin_leagues() -> Vec<League> {
    vec![
        League::new("Premier League", 0.25).with_base_goal_rate(1.42).with_rho(-0.08),
        League::new("La Liga", 0.30).with_base_goal_rate(1.30).with_rho(-0.11),
        League::new("Serie A", 0.35).with_base_goal_rate(1.35).with_rho(-0.10),
        League::new("Bundesliga", 0.22).with_base_goal_rate(1.58).with_rho(-0.06),
        League::new("Ligue 1", 0.33).with_base_goal_rate(1.36).with_rho(-0.10),
        League::new("Champions League", 0.30).with_base_goal_rate(1.50).with_rho(-0.07),
        League::new("Europa League", 0.30).with_base_goal_rate(1.43).with_rho(-0.07),
        League::new("Neutral Venue", 0.00).with_base_goal_rate(1.35).with_rho(-0.08),
    ]
}
