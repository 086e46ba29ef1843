//! Run configuration, loaded from an optional YAML file.

use crate::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheSettings,
    pub analysis: AnalysisSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Disable to force recomputation on every run.
    pub enabled: bool,
    pub dir: String,
    /// Entries older than this are deleted on read.
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "cache".to_string(),
            ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Maximum example texts retained per category.
    pub max_examples: usize,
    /// Trend change rates within +/- this bound classify as stable.
    pub trend_threshold: f64,
    /// Correlations at or below this strength are discarded.
    pub correlation_min_strength: f64,
    /// Strength above this classifies a correlation as positive.
    pub correlation_positive_threshold: f64,
    /// Optional cap on the number of reviews analyzed.
    pub sample_limit: Option<usize>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_examples: 3,
            trend_threshold: 0.1,
            correlation_min_strength: 0.1,
            correlation_positive_threshold: 0.3,
            sample_limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub output_dir: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: "reports".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: Config = serde_yaml::from_str(&content)?;
    info!("Configuration loaded from {:?}", path.as_ref());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.analysis.max_examples, 3);
        assert_eq!(config.report.output_dir, "reports");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config: Config = serde_yaml::from_str("cache:\n  ttl_secs: 60\n").unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
        assert!(config.cache.enabled);
        assert_eq!(config.analysis.max_examples, 3);
    }
}
