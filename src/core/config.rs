use crate::core::rbo::validate_p;
use crate::utils::parallel::{resolve_threads, validate_threads};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_P: f64 = 0.75;
pub const DEFAULT_DEPTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub performance: PerformanceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// RBO persistence in (0, 1); higher values weigh deeper ranks more
    pub p: f64,
    /// Keep only the first `k` ranks of every list (0 = no truncation)
    pub k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Worker pool size; unset means all available cores
    pub threads: Option<usize>,
    pub show_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// "csv" or "json"
    pub format: String,
    /// Appended to the output path for the score matrix
    pub matrix_suffix: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            p: DEFAULT_P,
            k: DEFAULT_DEPTH,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            threads: None,
            show_progress: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
            matrix_suffix: ".matrix".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            performance: PerformanceConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validated parameters for a prediction run.
    pub fn scoring_params(&self) -> Result<ScoringParams, crate::PhirboError> {
        ScoringParams::new(
            self.scoring.p,
            self.scoring.k,
            resolve_threads(self.performance.threads),
        )
    }
}

/// Parameters consumed by the scoring core, checked before any work starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    pub p: f64,
    pub k: usize,
    pub threads: usize,
}

impl ScoringParams {
    pub fn new(p: f64, k: usize, threads: usize) -> Result<Self, crate::PhirboError> {
        Ok(Self {
            p: validate_p(p)?,
            k,
            threads: validate_threads(threads)?,
        })
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            p: DEFAULT_P,
            k: DEFAULT_DEPTH,
            threads: resolve_threads(None),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::PhirboError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::PhirboError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::PhirboError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::PhirboError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
