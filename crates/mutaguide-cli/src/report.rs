use crate::error::Result;
use mutaguide::workflows::rank::RankResult;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Renders the ranked table plus the per-position conservation breakdown.
///
/// Positions are shown 1-based throughout; internally everything is 0-based.
pub fn render_report(result: &RankResult) -> String {
    let mut out = String::new();
    out.push_str(&render_table(result));
    out.push('\n');
    out.push_str(&render_profiles(result));
    out
}

/// The ranked table, best candidates first.
pub fn render_table(result: &RankResult) -> String {
    let mut out = String::new();
    out.push_str("Position\tHomology\tSecondary Structure\tIDF\tSurface Area\tScore\n");
    for scored in &result.ranked {
        let e = &scored.evidence;
        let _ = writeln!(
            out,
            "{}\t\t{:.2}%\t\t{}\t\t\t{}\t{:.2}\t\t{:.4}",
            scored.position + 1,
            e.conservation_percent,
            e.in_secondary_structure,
            e.near_secondary_structure,
            e.accessibility,
            scored.composite_score,
        );
    }
    out
}

/// The raw conservation data backing the table, one block per position.
pub fn render_profiles(result: &RankResult) -> String {
    let mut out = String::new();
    for (&position, profile) in &result.profiles {
        let _ = writeln!(out, "Position {}", position + 1);
        for entry in profile.entries() {
            let _ = writeln!(out, "Percentage of {} is: {:.2}", entry.residue, entry.percent);
        }
        out.push('\n');
    }
    out
}

/// Writes the full report to an explicit output path. The working directory
/// is never changed.
pub fn write_report(path: &Path, result: &RankResult) -> Result<()> {
    fs::write(path, render_report(result))?;
    info!("Report written to {:?}.", path);
    Ok(())
}
