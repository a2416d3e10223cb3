//! # MutaGuide Core Library
//!
//! A library for ranking candidate amino-acid positions in a protein sequence
//! for mutagenesis, combining three signals: cross-species conservation over a
//! multiple sequence alignment, secondary-structure context from an external
//! predictor, and relative solvent accessibility.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Alignment`,
//!   `ConservationProfile`, `Prediction`, `ScoredPosition`) and pure analysis
//!   routines (residue scanning, conservation profiling).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer orchestrates the ranking
//!   process. It includes the polling client that drives the asynchronous external
//!   predictor through a bounded submit/poll/fetch cycle, the composite position
//!   scorer, and the ranking step.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute the complete ranking
//!   procedure, from alignment to a descending-ranked list of scored positions.

pub mod core;
pub mod engine;
pub mod workflows;
