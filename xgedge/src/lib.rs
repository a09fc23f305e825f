//! Probability primitives for sports pricing: count distributions, dense score grids and
//! bookmaker market de-margining.

pub mod file;
pub mod linear;
pub mod market;
pub mod poisson;
pub mod probs;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
