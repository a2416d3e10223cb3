use serde::Serialize;

/// The evidence behind one position's composite score.
///
/// Every field is recorded for traceability regardless of whether it
/// contributed to the score (e.g. `accessibility` is kept even when surface
/// scoring is disabled).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionEvidence {
    /// How conserved the reference's own residue is across homologs, in percent.
    pub conservation_percent: f64,
    /// The position itself carries a helix or strand label.
    pub in_secondary_structure: bool,
    /// The 20-residue window around the position contains ordered structure.
    pub near_secondary_structure: bool,
    /// Raw relative solvent accessibility from the predictor.
    pub accessibility: f64,
}

/// A candidate position with its composite score and supporting evidence.
/// Immutable once created by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredPosition {
    pub position: usize,
    pub composite_score: f64,
    pub evidence: PositionEvidence,
}
