//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent the
//! inputs and outputs of the ranking pipeline.
//!
//! ## Key Components
//!
//! - [`alignment`] - Residue sequences and the reference-plus-homologs alignment
//! - [`profile`] - Per-position residue-frequency (conservation) profiles
//! - [`prediction`] - Secondary-structure labels and accessibility values from the predictor
//! - [`scored`] - Scored positions with their supporting evidence

pub mod alignment;
pub mod prediction;
pub mod profile;
pub mod scored;
