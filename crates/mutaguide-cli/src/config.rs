use crate::cli::RankArgs;
use crate::error::{CliError, Result};
use crate::sable;
use mutaguide::engine::prediction::PollConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Optional TOML configuration file. Every field has a built-in default and
/// can be overridden by a CLI flag.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "predictor-url")]
    pub predictor_url: Option<String>,

    #[serde(rename = "poll-interval-secs")]
    pub poll_interval_secs: Option<u64>,

    #[serde(rename = "max-status-checks")]
    pub max_status_checks: Option<u32>,

    #[serde(rename = "prefer-surface-exposure")]
    pub prefer_surface_exposure: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Cannot parse '{}': {}", path.display(), e))
        })?;
        debug!("Loaded configuration file: {:?}", &config);
        Ok(config)
    }
}

/// Settings for one invocation, resolved with precedence
/// CLI flag > config file > default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub predictor_url: String,
    pub prefer_surface_exposure: bool,
    pub polling: PollConfig,
}

impl Settings {
    pub fn resolve(args: &RankArgs, file: &FileConfig) -> Self {
        let defaults = PollConfig::default();

        let predictor_url = args
            .predictor_url
            .clone()
            .or_else(|| file.predictor_url.clone())
            .unwrap_or_else(|| sable::DEFAULT_SABLE_URL.to_string());

        let interval = args
            .poll_interval
            .or(file.poll_interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.interval);

        let max_checks = args
            .max_checks
            .or(file.max_status_checks)
            .unwrap_or(defaults.max_checks);

        // --no-surface beats the file setting; the file beats the default (true).
        let prefer_surface_exposure = if args.no_surface {
            false
        } else {
            file.prefer_surface_exposure.unwrap_or(true)
        };

        Self {
            predictor_url,
            prefer_surface_exposure,
            polling: PollConfig {
                interval,
                max_checks,
            },
        }
    }
}
