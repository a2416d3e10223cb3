use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::core::analysis::conservation::analyze_conservation;
use crate::core::analysis::scanner::find_positions;
use crate::core::models::alignment::Alignment;
use crate::core::models::profile::ConservationProfile;
use crate::core::models::scored::ScoredPosition;
use crate::engine::config::RankConfig;
use crate::engine::error::EngineError;
use crate::engine::prediction::{Delay, PredictionClient, PredictionTransport};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::ranking;
use crate::engine::scoring::score_positions;

/// Everything one ranking run produces: the candidate positions in sequence
/// order, their conservation profiles, and the scored positions in descending
/// score order.
#[derive(Debug, Clone)]
pub struct RankResult {
    pub positions: Vec<usize>,
    pub profiles: BTreeMap<usize, ConservationProfile>,
    pub ranked: Vec<ScoredPosition>,
}

/// Runs the full ranking procedure over `alignment` for the configured target
/// residue: scan, conservation profiling, external prediction, scoring,
/// ranking.
///
/// The prediction step blocks for up to the configured poll budget; the
/// caller can abort it early through the `delay`'s cancellation mechanism.
#[instrument(skip_all, name = "rank_workflow")]
pub fn run<T: PredictionTransport, D: Delay>(
    alignment: &Alignment,
    transport: &T,
    delay: &D,
    config: &RankConfig,
    reporter: &ProgressReporter,
) -> Result<RankResult, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Scan" });
    let positions = find_positions(alignment.reference(), config.target_residue)?;
    info!(
        residue = %config.target_residue,
        count = positions.len(),
        "Located candidate positions."
    );
    reporter.report(Progress::PhaseFinish);

    if positions.is_empty() {
        info!("No candidate positions; skipping prediction and scoring.");
        return Ok(RankResult {
            positions,
            profiles: BTreeMap::new(),
            ranked: Vec::new(),
        });
    }

    reporter.report(Progress::PhaseStart {
        name: "Conservation",
    });
    let profiles = analyze_conservation(alignment, &positions)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Prediction" });
    let client = PredictionClient::new(transport, delay, config.polling);
    let prediction = client.fetch_predictions(alignment.reference(), reporter)?;
    info!("Received structure and accessibility predictions.");
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Scoring" });
    let scored = score_positions(
        alignment.reference(),
        &positions,
        &prediction,
        &profiles,
        config.prefer_surface_exposure,
    )?;
    let ranked = ranking::rank(scored);
    reporter.report(Progress::PhaseFinish);

    info!(candidates = ranked.len(), "Ranking complete.");
    Ok(RankResult {
        positions,
        profiles,
        ranked,
    })
}
