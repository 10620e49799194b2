// src/services/mod.rs

//! Scoring, statistics and the quiz lifecycle. Scoring and statistics are
//! pure functions over their inputs and safe to call from any request.

pub mod lifecycle;
pub mod scoring;
pub mod statistics;

#[cfg(test)]
pub(crate) mod test_support;
