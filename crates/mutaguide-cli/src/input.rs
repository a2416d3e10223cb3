use crate::error::{CliError, Result};
use mutaguide::core::models::alignment::{Alignment, Sequence};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reads an alignment from a Phyre2 FASTA output file.
///
/// Every non-header line is one alignment row; the first row is the user's
/// reference sequence, the rest are homologs. Phyre2 pads rows with
/// whitespace, so all whitespace inside a line is stripped.
pub fn read_alignment(path: &Path) -> Result<Alignment> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('>') {
            continue;
        }
        let residues: String = line.split_whitespace().collect();
        if residues.is_empty() {
            continue;
        }
        rows.push(Sequence::new(&residues));
    }

    debug!(rows = rows.len(), "Read alignment rows from {:?}.", path);
    Alignment::new(rows).map_err(|source| CliError::AlignmentFile {
        path: path.to_path_buf(),
        source,
    })
}
