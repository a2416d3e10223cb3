//! # Workflows Module
//!
//! The public, highest-level API: complete procedures that tie the analysis
//! and engine layers together. Callers construct an [`crate::core::models::alignment::Alignment`],
//! pick a transport and a delay, and get back a ranked result.

pub mod rank;
