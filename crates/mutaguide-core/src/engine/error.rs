use thiserror::Error;

use crate::core::analysis::AnalysisError;
use crate::core::models::alignment::AlignmentError;
use crate::engine::prediction::TransportError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid alignment: {source}")]
    InvalidAlignment {
        #[from]
        source: AlignmentError,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Prediction transport failure: {source}")]
    Transport {
        #[from]
        source: TransportError,
    },

    #[error("Predictor did not complete within {checks} status checks")]
    PredictionTimeout { checks: u32 },

    #[error("Prediction wait cancelled by the caller")]
    Cancelled,

    #[error("Predictor returned {field} of length {found} for a sequence of length {expected}")]
    MalformedPrediction {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Position {position} is outside the prediction arrays (length {length})")]
    InvalidPosition { position: usize, length: usize },
}
