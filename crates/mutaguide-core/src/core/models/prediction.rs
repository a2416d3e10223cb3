use serde::Serialize;

/// A per-residue secondary-structure classification from the external
/// predictor.
///
/// The code set is owned by the predictor and passed through opaquely, except
/// that helix (`H`) and strand (`E`) are treated as *ordered* structure by the
/// scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructureLabel(char);

impl StructureLabel {
    pub const HELIX: char = 'H';
    pub const STRAND: char = 'E';

    pub fn new(code: char) -> Self {
        Self(code)
    }

    pub fn code(&self) -> char {
        self.0
    }

    /// True exactly for helix and strand codes.
    pub fn is_ordered(&self) -> bool {
        matches!(self.0, Self::HELIX | Self::STRAND)
    }
}

/// The predictor's output for one sequence: a structure label and a relative
/// solvent accessibility value per residue, both indexed by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub structure: Vec<StructureLabel>,
    pub accessibility: Vec<f64>,
}

impl Prediction {
    pub fn new(structure: Vec<StructureLabel>, accessibility: Vec<f64>) -> Self {
        Self {
            structure,
            accessibility,
        }
    }

    /// Builds a prediction from the predictor's raw per-residue code string
    /// and accessibility values.
    pub fn from_codes(structure_codes: &str, accessibility: Vec<f64>) -> Self {
        Self {
            structure: structure_codes.chars().map(StructureLabel::new).collect(),
            accessibility,
        }
    }
}
