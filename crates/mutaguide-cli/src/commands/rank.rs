use crate::cli::RankArgs;
use crate::config::{FileConfig, Settings};
use crate::error::{CliError, Result};
use crate::{input, report, sable};
use indicatif::{ProgressBar, ProgressStyle};
use mutaguide::engine::config::RankConfigBuilder;
use mutaguide::engine::prediction::{CancelFlag, CancellableDelay};
use mutaguide::engine::progress::{Progress, ProgressReporter};
use mutaguide::workflows;
use std::time::Duration;
use tracing::info;

pub fn run(args: RankArgs) -> Result<()> {
    if !args.target_residue.is_ascii_alphabetic() {
        return Err(CliError::Argument(format!(
            "Target residue must be a letter, got '{}'",
            args.target_residue
        )));
    }

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, &file_config);
    info!("Resolved settings: {:?}", &settings);

    let alignment = input::read_alignment(&args.input)?;
    info!(
        homologs = alignment.homolog_count(),
        columns = alignment.columns(),
        "Alignment loaded."
    );

    let config = RankConfigBuilder::new()
        .target_residue(args.target_residue.to_ascii_uppercase())
        .prefer_surface_exposure(settings.prefer_surface_exposure)
        .polling(settings.polling)
        .build()
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let transport = sable::SableTransport::new(settings.predictor_url.clone())
        .map_err(mutaguide::engine::error::EngineError::from)?;
    let delay = CancellableDelay::new(CancelFlag::new());

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .map_err(|e| CliError::Other(anyhow::anyhow!("Invalid progress template: {}", e)))?;
    pb.set_style(style);
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr_with_hz(2));
    pb.enable_steady_tick(Duration::from_millis(120));

    let progress_callback = |progress: Progress| match progress {
        Progress::PhaseStart { name } => {
            pb.set_message(format!("{}...", name));
        }
        Progress::PhaseFinish => {}
        Progress::PollCheck { check, max_checks } => {
            pb.set_message(format!(
                "Waiting for predictor (status check {}/{})...",
                check, max_checks
            ));
        }
        Progress::Message(msg) => {
            pb.set_message(msg);
        }
    };
    let reporter = ProgressReporter::with_callback(Box::new(progress_callback));

    let result = workflows::rank::run(&alignment, &transport, &delay, &config, &reporter);
    drop(reporter);
    match &result {
        Ok(_) => pb.finish_and_clear(),
        Err(_) => pb.finish_with_message("✗ Ranking failed."),
    }
    let result = result?;

    if result.ranked.is_empty() {
        println!(
            "No positions of residue '{}' found in the reference sequence.",
            config.target_residue
        );
        return Ok(());
    }

    print!("{}", report::render_table(&result));

    if let Some(path) = &args.output {
        report::write_report(path, &result)?;
        println!("Report saved to {}.", path.display());
    }

    Ok(())
}
