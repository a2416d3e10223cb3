use std::collections::BTreeMap;

use crate::core::models::alignment::Sequence;
use crate::core::models::prediction::Prediction;
use crate::core::models::profile::ConservationProfile;
use crate::core::models::scored::{PositionEvidence, ScoredPosition};
use crate::engine::error::EngineError;

const SECONDARY_STRUCTURE_PENALTY: f64 = 2.0;
const IDF_PENALTY: f64 = 1.0;
const IDF_FLANK: usize = 10;

/// Fuses conservation, secondary structure, flanking-structure context, and
/// surface accessibility into one composite score per candidate position.
///
/// Output order matches input order; sorting happens downstream in
/// [`crate::engine::ranking::rank`].
///
/// Scoring per position `i`, starting from 0.0:
/// - helix or strand at `i`: −2.0 (structured positions are poor targets);
/// - full 20-residue window `[i−10, i+10)` in bounds and containing a helix
///   or strand: −1.0 (position flanks ordered structure); positions within
///   10 residues of either end never receive this penalty;
/// - `+ (100 − conserved) / 100`, where `conserved` is the profile percentage
///   of the reference's own residue at `i`. A position with no matching
///   record is treated as 0% conserved and gets the full 1.0 bonus; this
///   mirrors the historical behavior and inflates the bonus for positions
///   that simply lack data.
/// - `prefer_surface_exposure`: `+ accessibility[i]`, raw and unnormalized.
pub fn score_positions(
    reference: &Sequence,
    positions: &[usize],
    prediction: &Prediction,
    profiles: &BTreeMap<usize, ConservationProfile>,
    prefer_surface_exposure: bool,
) -> Result<Vec<ScoredPosition>, EngineError> {
    let structure = &prediction.structure;
    let mut scored = Vec::with_capacity(positions.len());

    for &position in positions {
        let label = structure
            .get(position)
            .ok_or(EngineError::InvalidPosition {
                position,
                length: structure.len(),
            })?;
        let accessibility = *prediction.accessibility.get(position).ok_or(
            EngineError::InvalidPosition {
                position,
                length: prediction.accessibility.len(),
            },
        )?;
        let residue = reference
            .residue(position)
            .ok_or(EngineError::InvalidPosition {
                position,
                length: reference.len(),
            })?;

        let mut score = 0.0;

        let in_secondary_structure = label.is_ordered();
        if in_secondary_structure {
            score -= SECONDARY_STRUCTURE_PENALTY;
        }

        let near_secondary_structure = flanking_window(position, structure.len())
            .map(|(lower, upper)| structure[lower..upper].iter().any(|l| l.is_ordered()))
            .unwrap_or(false);
        if near_secondary_structure {
            score -= IDF_PENALTY;
        }

        let conservation_percent = profiles
            .get(&position)
            .and_then(|p| p.percent_of(residue))
            .unwrap_or(0.0);
        score += (100.0 - conservation_percent) / 100.0;

        if prefer_surface_exposure {
            score += accessibility;
        }

        scored.push(ScoredPosition {
            position,
            composite_score: score,
            evidence: PositionEvidence {
                conservation_percent,
                in_secondary_structure,
                near_secondary_structure,
                accessibility,
            },
        });
    }

    Ok(scored)
}

/// The half-open window `[position − 10, position + 10)`, or `None` when the
/// window does not fit entirely within the sequence.
fn flanking_window(position: usize, length: usize) -> Option<(usize, usize)> {
    let lower = position.checked_sub(IDF_FLANK)?;
    let upper = position + IDF_FLANK;
    (upper < length).then_some((lower, upper))
}
