use crate::engine::prediction::PollConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Settings for one ranking run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankConfig {
    /// The residue letter whose positions in the reference sequence are
    /// candidates for replacement.
    pub target_residue: char,
    /// When true, raw accessibility is added to each position's score so
    /// surface-exposed positions rank higher.
    pub prefer_surface_exposure: bool,
    pub polling: PollConfig,
}

#[derive(Default)]
pub struct RankConfigBuilder {
    target_residue: Option<char>,
    prefer_surface_exposure: Option<bool>,
    polling: Option<PollConfig>,
}

impl RankConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_residue(mut self, residue: char) -> Self {
        self.target_residue = Some(residue);
        self
    }

    pub fn prefer_surface_exposure(mut self, prefer: bool) -> Self {
        self.prefer_surface_exposure = Some(prefer);
        self
    }

    pub fn polling(mut self, polling: PollConfig) -> Self {
        self.polling = Some(polling);
        self
    }

    pub fn build(self) -> Result<RankConfig, ConfigError> {
        Ok(RankConfig {
            target_residue: self
                .target_residue
                .ok_or(ConfigError::MissingParameter("target_residue"))?,
            prefer_surface_exposure: self.prefer_surface_exposure.unwrap_or(true),
            polling: self.polling.unwrap_or_default(),
        })
    }
}
