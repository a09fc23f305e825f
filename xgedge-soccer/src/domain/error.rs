use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::domain::{Outcome, Side};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    UnknownLeague(#[from] UnknownLeague),

    #[error("{0}")]
    InvalidAttribute(#[from] InvalidAttribute),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown league '{name}'")]
pub struct UnknownLeague {
    pub name: String,
}

/// What an [`InvalidAttribute`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Team(Option<Side>),
    Market,
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Team(None) => write!(f, "team"),
            Subject::Team(Some(side)) => write!(f, "{side} team"),
            Subject::Market => write!(f, "market"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    XgFor,
    XgAgainst,
    PitchRank,
    SquadRating,
    ManagerRating,
    Price(Outcome),
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::XgFor => write!(f, "xG for"),
            Field::XgAgainst => write!(f, "xG against"),
            Field::PitchRank => write!(f, "pitch rank"),
            Field::SquadRating => write!(f, "squad rating"),
            Field::ManagerRating => write!(f, "manager rating"),
            Field::Price(outcome) => write!(f, "{} price", outcome.to_string().to_lowercase()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{subject} {field} of {value} outside of {bounds:?}")]
pub struct InvalidAttribute {
    pub subject: Subject,
    pub field: Field,
    pub value: f64,
    pub bounds: RangeInclusive<f64>,
}
impl InvalidAttribute {
    /// Non-finite values are rejected regardless of `bounds`.
    pub fn check(
        subject: Subject,
        field: Field,
        value: f64,
        bounds: &RangeInclusive<f64>,
    ) -> Result<(), InvalidAttribute> {
        if value.is_finite() && bounds.contains(&value) {
            Ok(())
        } else {
            Err(InvalidAttribute {
                subject,
                field,
                value,
                bounds: bounds.clone(),
            })
        }
    }

    pub fn on_side(self, side: Side) -> Self {
        Self {
            subject: Subject::Team(Some(side)),
            ..self
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("fair price undefined for probability {prob}")]
pub struct UndefinedOdds {
    pub prob: f64,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValidationError(#[from] pub Box<dyn Error + Send + Sync>);

impl From<anyhow::Error> for ValidationError {
    fn from(value: anyhow::Error) -> Self {
        ValidationError(value.into())
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Invalid(#[from] ValidationError),
}
