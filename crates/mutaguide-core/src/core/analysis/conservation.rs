use super::AnalysisError;
use crate::core::models::alignment::Alignment;
use crate::core::models::profile::ConservationProfile;
use std::collections::BTreeMap;

/// Computes, for each requested position, the residue-frequency distribution
/// across all homolog rows of the alignment. The reference row (row 0) is
/// excluded from both the counts and the denominator.
///
/// Fails with [`AnalysisError::EmptyHomologSet`] rather than dividing by zero
/// when the alignment carries no homolog rows, and with
/// [`AnalysisError::OutOfBounds`] when a position falls outside the alignment
/// columns.
pub fn analyze_conservation(
    alignment: &Alignment,
    positions: &[usize],
) -> Result<BTreeMap<usize, ConservationProfile>, AnalysisError> {
    let homolog_count = alignment.homolog_count();
    if homolog_count == 0 {
        return Err(AnalysisError::EmptyHomologSet);
    }

    let columns = alignment.columns();
    let mut profiles = BTreeMap::new();

    for &position in positions {
        if position >= columns {
            return Err(AnalysisError::OutOfBounds {
                position,
                length: columns,
            });
        }

        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for homolog in alignment.homologs() {
            // Row lengths are validated at alignment construction.
            if let Some(residue) = homolog.residue(position) {
                *counts.entry(residue).or_insert(0) += 1;
            }
        }

        profiles.insert(
            position,
            ConservationProfile::from_counts(&counts, homolog_count),
        );
    }

    Ok(profiles)
}
