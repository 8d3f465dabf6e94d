//! Football scoreline prediction with independent Poisson goal models. Derives 1/X/2 and
//! over/under probabilities from a pair of expected-goal rates, adjusts those rates for match
//! situations, rates teams by attack and defense, and compares model-implied fair odds with
//! offered prices.

pub mod adjust;
pub mod analysis;
pub mod csv;
pub mod domain;
pub mod factorial;
pub mod file;
pub mod fixture;
pub mod linear;
pub mod market;
pub mod poisson;
pub mod print;
pub mod probs;
pub mod scoregrid;
pub mod strength;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
