//! # Engine Module
//!
//! The stateful logic core of the library: the bounded polling client that
//! drives the external structure predictor, the composite position scorer,
//! the ranking step, and the error and progress types shared by all of them.

pub mod config;
pub mod error;
pub mod prediction;
pub mod progress;
pub mod ranking;
pub mod scoring;
