use crate::core::models::scored::ScoredPosition;
use std::cmp::Ordering;

/// Sorts scored positions by composite score, highest first.
///
/// The sort is stable: positions with equal scores keep their relative input
/// order. NaN scores are treated as equal to everything and therefore also
/// keep their input position.
pub fn rank(mut scored: Vec<ScoredPosition>) -> Vec<ScoredPosition> {
    scored.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
    });
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::scored::PositionEvidence;

    fn scored(position: usize, score: f64) -> ScoredPosition {
        ScoredPosition {
            position,
            composite_score: score,
            evidence: PositionEvidence {
                conservation_percent: 0.0,
                in_secondary_structure: false,
                near_secondary_structure: false,
                accessibility: 0.0,
            },
        }
    }

    #[test]
    fn sorts_descending_by_score() {
        let ranked = rank(vec![scored(0, 1.0), scored(1, 3.5), scored(2, -2.0)]);
        let order: Vec<usize> = ranked.iter().map(|s| s.position).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert!(
            ranked
                .windows(2)
                .all(|w| w[0].composite_score >= w[1].composite_score)
        );
    }

    #[test]
    fn ties_preserve_input_order() {
        let ranked = rank(vec![
            scored(7, 1.0),
            scored(3, 2.0),
            scored(9, 1.0),
            scored(1, 1.0),
        ]);
        let order: Vec<usize> = ranked.iter().map(|s| s.position).collect();
        assert_eq!(order, vec![3, 7, 9, 1]);
    }

    #[test]
    fn empty_input_ranks_to_empty_output() {
        assert!(rank(Vec::new()).is_empty());
    }
}
