//! Character-level n-gram language modelling.
//!
//! Trains a fixed-order Markov model over a character stream, normalizes the
//! observed counts into cumulative distributions, and extends seed text by
//! inverse-CDF sampling from the distribution keyed by the trailing window.

pub mod core;
pub mod schema;
