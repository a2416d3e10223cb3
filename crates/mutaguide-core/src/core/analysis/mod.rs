//! # Analysis Module
//!
//! Pure, side-effect-free analysis over an alignment: locating candidate
//! positions of a target residue and profiling how conserved each position is
//! across the homolog rows.

pub mod conservation;
pub mod scanner;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    #[error("Cannot scan an empty sequence")]
    EmptySequence,

    #[error("Conservation analysis requires at least one homolog row")]
    EmptyHomologSet,

    #[error("Position {position} is outside the alignment columns (length {length})")]
    OutOfBounds { position: usize, length: usize },
}
