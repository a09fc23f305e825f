//! A soccer match model: team attributes are reduced to strengths, strengths to expected goals,
//! and expected goals to a grid of full-time score probabilities. Head-to-head probabilities,
//! fair prices and edges against a bookmaker's market are read from the grid.

pub mod domain;
pub mod goal_rate;
pub mod league;
pub mod model;
pub mod print;
pub mod scoregrid;
pub mod strength;
pub mod value;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
