//! # Core Module
//!
//! Stateless foundation of the MutaGuide library: the data models shared by every
//! stage of the pipeline and the pure analysis routines that operate on them.
//!
//! ## Key Components
//!
//! - [`models`] - Alignments, conservation profiles, predictor outputs, and scored positions
//! - [`analysis`] - Residue scanning and conservation profiling over an alignment

pub mod analysis;
pub mod models;
