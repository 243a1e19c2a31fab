//! Engine configuration
//!
//! Every threshold the analyzers use lives here so that tuning does not
//! require a rebuild.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/stackwise/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Minimum data required before recommendations count as confident advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub min_journal_days: usize,
    pub min_check_ins: usize,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            min_journal_days: 7,
            min_check_ins: 14,
        }
    }
}

/// Supplement-vs-metric association thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Days with a check-in required before a pair is scored
    pub min_days_with: usize,
    /// Days without a check-in required before a pair is scored
    pub min_days_without: usize,
    pub normalization_divisor: f64,
    pub direction_threshold: f64,
    pub full_confidence_samples: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_days_with: 5,
            min_days_without: 3,
            normalization_divisor: 3.0,
            direction_threshold: 0.2,
            full_confidence_samples: 30,
        }
    }
}

/// Timing optimizer thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub min_confidence: f64,
    pub min_improvement: f64,
    pub high_priority_improvement: f64,
    pub full_confidence_samples: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            min_improvement: 0.05,
            high_priority_improvement: 0.15,
            full_confidence_samples: 30,
        }
    }
}

/// Lifestyle pattern thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifestyleConfig {
    pub good_sleep_hours: f64,
    pub bad_sleep_hours: f64,
    pub min_bucket_size: usize,
    pub min_difference: f64,
    pub trend_min_days: usize,
    pub trend_window_days: usize,
    pub full_confidence_samples: usize,
}

impl Default for LifestyleConfig {
    fn default() -> Self {
        Self {
            good_sleep_hours: 7.0,
            bad_sleep_hours: 4.0,
            min_bucket_size: 3,
            min_difference: 1.0,
            trend_min_days: 14,
            trend_window_days: 7,
            full_confidence_samples: 20,
        }
    }
}

/// Stack-wide warning limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningConfig {
    /// Stacks larger than this trigger a warning
    pub max_stack_size: usize,
    pub dopaminergic_limit: usize,
    pub serotonergic_limit: usize,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            max_stack_size: 15,
            dopaminergic_limit: 3,
            serotonergic_limit: 2,
        }
    }
}

/// All engine thresholds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub readiness: ReadinessConfig,
    pub correlation: CorrelationConfig,
    pub timing: TimingConfig,
    pub lifestyle: LifestyleConfig,
    pub warnings: WarningConfig,
}

impl EngineConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path, falling back to embedded defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Render as TOML (used by `stackwise config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("stackwise").join("config").join("engine.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading engine config override");
            fs::read_to_string(&path)?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [readiness]
            min_journal_days = 10

            [warnings]
            max_stack_size = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.readiness.min_journal_days, 10);
        assert_eq!(config.readiness.min_check_ins, 14);
        assert_eq!(config.warnings.max_stack_size, 8);
        assert_eq!(config.correlation, CorrelationConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[readiness\nmin_journal_days = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nmin_confidence = 0.5").unwrap();

        let config = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(config.timing.min_confidence, 0.5);
        assert_eq!(config.timing.min_improvement, 0.05);
    }

    #[test]
    fn test_missing_override_uses_embedded() {
        let config = EngineConfig::load_from(Path::new("/nonexistent/engine.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let rendered = EngineConfig::default().to_toml().unwrap();
        assert_eq!(parse_config(&rendered).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_unreadable_override_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
