use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AlignmentError {
    #[error("Alignment needs a reference sequence and at least one homolog, got {0} row(s)")]
    TooFewRows(usize),

    #[error("Alignment row {row} has length {found}, expected {expected} to match the reference")]
    UnequalLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// An ordered run of residue characters. Index 0 is the first residue.
///
/// Residue comparison throughout the library is exact, case-sensitive `char`
/// equality; no alphabet validation is performed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    residues: Vec<char>,
}

impl Sequence {
    pub fn new(residues: &str) -> Self {
        Self {
            residues: residues.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residue(&self, position: usize) -> Option<char> {
        self.residues.get(position).copied()
    }

    pub fn residues(&self) -> &[char] {
        &self.residues
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.residues {
            write!(f, "{}", r)?;
        }
        Ok(())
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A multiple sequence alignment: row 0 is the *reference* sequence, rows 1..N
/// are *homologs*. All rows have equal length.
///
/// The equal-length and minimum-row invariants are enforced once, in
/// [`Alignment::new`]; downstream analysis assumes a valid alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    rows: Vec<Sequence>,
}

impl Alignment {
    /// Builds an alignment from its rows, validating that there are at least
    /// two (one reference, one homolog) and that every row matches the
    /// reference length.
    pub fn new(rows: Vec<Sequence>) -> Result<Self, AlignmentError> {
        if rows.len() < 2 {
            return Err(AlignmentError::TooFewRows(rows.len()));
        }
        let expected = rows[0].len();
        for (row, seq) in rows.iter().enumerate().skip(1) {
            if seq.len() != expected {
                return Err(AlignmentError::UnequalLength {
                    row,
                    expected,
                    found: seq.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Builds an alignment without validating the row invariants.
    ///
    /// Intended for callers that have already validated their rows, and for
    /// exercising the defensive guards in the analysis layer against
    /// degenerate inputs.
    pub fn from_rows_unchecked(rows: Vec<Sequence>) -> Self {
        Self { rows }
    }

    pub fn reference(&self) -> &Sequence {
        &self.rows[0]
    }

    pub fn homologs(&self) -> &[Sequence] {
        &self.rows[1..]
    }

    pub fn homolog_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Number of columns, i.e. the reference length.
    pub fn columns(&self) -> usize {
        self.rows[0].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_indexing_is_zero_based() {
        let seq = Sequence::new("ACDE");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.residue(0), Some('A'));
        assert_eq!(seq.residue(3), Some('E'));
        assert_eq!(seq.residue(4), None);
    }

    #[test]
    fn sequence_display_round_trips() {
        let seq = Sequence::new("MKLV");
        assert_eq!(seq.to_string(), "MKLV");
    }

    #[test]
    fn alignment_accepts_reference_and_homologs() {
        let alignment = Alignment::new(vec![
            Sequence::new("ACDE"),
            Sequence::new("ACDD"),
            Sequence::new("ACAE"),
        ])
        .unwrap();

        assert_eq!(alignment.reference().to_string(), "ACDE");
        assert_eq!(alignment.homolog_count(), 2);
        assert_eq!(alignment.columns(), 4);
    }

    #[test]
    fn alignment_rejects_single_row() {
        let result = Alignment::new(vec![Sequence::new("ACDE")]);
        assert_eq!(result.unwrap_err(), AlignmentError::TooFewRows(1));
    }

    #[test]
    fn alignment_rejects_unequal_lengths() {
        let result = Alignment::new(vec![Sequence::new("ACDE"), Sequence::new("ACD")]);
        assert_eq!(
            result.unwrap_err(),
            AlignmentError::UnequalLength {
                row: 1,
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn unchecked_constructor_skips_validation() {
        let alignment = Alignment::from_rows_unchecked(vec![Sequence::new("ACDE")]);
        assert_eq!(alignment.homolog_count(), 0);
    }
}
