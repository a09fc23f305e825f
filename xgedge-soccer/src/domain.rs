use std::fmt::{Display, Formatter};
use std::ops::{Index, RangeInclusive};

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter};

use crate::domain::error::{Field, InvalidAttribute, Subject};

pub mod error;

pub const EXPECTED_GOALS_BOUNDS: RangeInclusive<f64> = 0.0..=f64::INFINITY;
pub const PITCH_RANK_BOUNDS: RangeInclusive<f64> = 0.35..=3.39;
pub const SQUAD_RATING_BOUNDS: RangeInclusive<f64> = 0.0..=100.0;
pub const MANAGER_RATING_BOUNDS: RangeInclusive<f64> = 1.0..=10.0;

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// The three outcomes of a full-time head-to-head market.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Ordinal,
    EnumCount,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}
impl Outcome {
    pub fn win(side: Side) -> Self {
        match side {
            Side::Home => Outcome::Home,
            Side::Away => Outcome::Away,
        }
    }

    pub fn flip(&self) -> Self {
        match self {
            Outcome::Home => Outcome::Away,
            Outcome::Draw => Outcome::Draw,
            Outcome::Away => Outcome::Home,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Home => write!(f, "Home"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Away => write!(f, "Away"),
        }
    }
}

/// A value held for each head-to-head [`Outcome`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ByOutcome<T> {
    pub home: T,
    pub draw: T,
    pub away: T,
}
impl<T> ByOutcome<T> {
    pub fn new(home: T, draw: T, away: T) -> Self {
        Self { home, draw, away }
    }

    pub fn get(&self, outcome: Outcome) -> &T {
        match outcome {
            Outcome::Home => &self.home,
            Outcome::Draw => &self.draw,
            Outcome::Away => &self.away,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ByOutcome<U> {
        ByOutcome {
            home: f(&self.home),
            draw: f(&self.draw),
            away: f(&self.away),
        }
    }

    pub fn zip_with<U, V>(&self, other: &ByOutcome<U>, mut f: impl FnMut(&T, &U) -> V) -> ByOutcome<V> {
        ByOutcome {
            home: f(&self.home, &other.home),
            draw: f(&self.draw, &other.draw),
            away: f(&self.away, &other.away),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Outcome, &T)> {
        Outcome::iter().map(|outcome| (outcome, self.get(outcome)))
    }

    /// Exchanges the home and away values.
    pub fn flip(self) -> Self {
        Self {
            home: self.away,
            draw: self.draw,
            away: self.home,
        }
    }
}

impl ByOutcome<f64> {
    pub fn sum(&self) -> f64 {
        self.home + self.draw + self.away
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.home, self.draw, self.away]
    }
}

impl<T> Index<Outcome> for ByOutcome<T> {
    type Output = T;

    fn index(&self, outcome: Outcome) -> &Self::Output {
        self.get(outcome)
    }
}

impl<T> From<[T; 3]> for ByOutcome<T> {
    fn from([home, draw, away]: [T; 3]) -> Self {
        Self { home, draw, away }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }

    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::Home,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Away,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// The raw per-team inputs to the model, as collected by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamAttributes {
    /// Expected goals scored per 90 minutes.
    pub xg_for: f64,

    /// Expected goals conceded per 90 minutes.
    pub xg_against: f64,

    /// Tactical/pitch rank within [`PITCH_RANK_BOUNDS`].
    pub pitch_rank: f64,

    /// Squad value rating within [`SQUAD_RATING_BOUNDS`].
    pub squad_rating: f64,

    /// Manager rating within [`MANAGER_RATING_BOUNDS`].
    pub manager_rating: f64,
}
impl TeamAttributes {
    pub fn validate(&self) -> Result<(), InvalidAttribute> {
        let subject = Subject::Team(None);
        InvalidAttribute::check(subject, Field::XgFor, self.xg_for, &EXPECTED_GOALS_BOUNDS)?;
        InvalidAttribute::check(subject, Field::XgAgainst, self.xg_against, &EXPECTED_GOALS_BOUNDS)?;
        InvalidAttribute::check(subject, Field::PitchRank, self.pitch_rank, &PITCH_RANK_BOUNDS)?;
        InvalidAttribute::check(subject, Field::SquadRating, self.squad_rating, &SQUAD_RATING_BOUNDS)?;
        InvalidAttribute::check(
            subject,
            Field::ManagerRating,
            self.manager_rating,
            &MANAGER_RATING_BOUNDS,
        )?;
        Ok(())
    }
}
