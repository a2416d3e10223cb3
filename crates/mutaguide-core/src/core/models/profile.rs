use serde::Serialize;
use std::collections::BTreeMap;

/// One residue's share of the homolog rows at a position, as a percentage in
/// `0.0..=100.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueFrequency {
    pub residue: char,
    pub percent: f64,
}

/// The residue-frequency distribution across all homologs at one alignment
/// position. The reference row never participates.
///
/// Entries are sorted by residue character so that identical inputs always
/// produce identical profiles, including presentation order. Percentages sum
/// to 100.0 within floating tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConservationProfile {
    entries: Vec<ResidueFrequency>,
}

impl ConservationProfile {
    /// Builds a profile from per-residue occurrence counts over `homolog_count`
    /// homolog rows. The `BTreeMap` key order gives the sorted entry order.
    ///
    /// Callers must guarantee `homolog_count > 0`; the analysis layer guards
    /// this before counting.
    pub(crate) fn from_counts(counts: &BTreeMap<char, usize>, homolog_count: usize) -> Self {
        let entries = counts
            .iter()
            .map(|(&residue, &count)| ResidueFrequency {
                residue,
                percent: (count as f64 / homolog_count as f64) * 100.0,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ResidueFrequency] {
        &self.entries
    }

    /// The percentage recorded for `residue`, if any homolog carries it.
    pub fn percent_of(&self, residue: char) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.residue == residue)
            .map(|e| e.percent)
    }

    pub fn total_percent(&self) -> f64 {
        self.entries.iter().map(|e| e.percent).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(char, usize)]) -> BTreeMap<char, usize> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn percentages_are_over_homolog_count() {
        let profile = ConservationProfile::from_counts(&counts(&[('A', 2), ('G', 1)]), 3);
        let a = profile.percent_of('A').unwrap();
        let g = profile.percent_of('G').unwrap();
        assert!((a - 66.666_666_666_666_67).abs() < 1e-9);
        assert!((g - 33.333_333_333_333_336).abs() < 1e-9);
    }

    #[test]
    fn entries_are_sorted_by_residue() {
        let profile = ConservationProfile::from_counts(&counts(&[('V', 1), ('A', 1), ('L', 1)]), 3);
        let order: Vec<char> = profile.entries().iter().map(|e| e.residue).collect();
        assert_eq!(order, vec!['A', 'L', 'V']);
    }

    #[test]
    fn missing_residue_yields_none() {
        let profile = ConservationProfile::from_counts(&counts(&[('A', 3)]), 3);
        assert_eq!(profile.percent_of('W'), None);
    }

    #[test]
    fn totals_sum_to_one_hundred() {
        let profile =
            ConservationProfile::from_counts(&counts(&[('A', 1), ('C', 2), ('D', 4)]), 7);
        assert!((profile.total_percent() - 100.0).abs() < 1e-6);
    }
}
