use super::AnalysisError;
use crate::core::models::alignment::Sequence;

/// Returns every index of `sequence` whose residue equals `target_residue`,
/// in ascending order. Matching is exact, case-sensitive character equality.
///
/// The result may be empty; an empty input sequence is rejected.
pub fn find_positions(
    sequence: &Sequence,
    target_residue: char,
) -> Result<Vec<usize>, AnalysisError> {
    if sequence.is_empty() {
        return Err(AnalysisError::EmptySequence);
    }

    Ok(sequence
        .residues()
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r == target_residue)
        .map(|(i, _)| i)
        .collect())
}
