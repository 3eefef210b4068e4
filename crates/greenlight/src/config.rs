use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::affinity::AffinitySettings;
use crate::forecast::ForecastSettings;
use crate::similarity::{BaselineWeights, PrecisionWeights, WeightProfile};
use crate::{GreenlightError, Result};

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
  /// Maximum comparables kept per pass
  #[serde(default = "default_top_k")]
  pub top_k: usize,
  /// First-pass comparables must score strictly above this
  #[serde(default = "default_baseline_threshold")]
  pub baseline_threshold: u8,
  /// Layered-pass comparables must score strictly above this
  #[serde(default = "default_precision_threshold")]
  pub precision_threshold: u8,
  /// Dimensions below this are reported as differentiators
  #[serde(default = "default_low_score_threshold")]
  pub low_score_threshold: u8,
  #[serde(default)]
  pub baseline_weights: BaselineWeights,
  #[serde(default)]
  pub precision_weights: PrecisionWeights,
  #[serde(default)]
  pub forecast: ForecastSettings,
  #[serde(default)]
  pub affinity: AffinitySettings,
}

fn default_top_k() -> usize {
  5
}

fn default_baseline_threshold() -> u8 {
  25
}

fn default_precision_threshold() -> u8 {
  30
}

fn default_low_score_threshold() -> u8 {
  40
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      top_k: default_top_k(),
      baseline_threshold: default_baseline_threshold(),
      precision_threshold: default_precision_threshold(),
      low_score_threshold: default_low_score_threshold(),
      baseline_weights: BaselineWeights::default(),
      precision_weights: PrecisionWeights::default(),
      forecast: ForecastSettings::default(),
      affinity: AffinitySettings::default(),
    }
  }
}

impl EngineConfig {
  /// Load configuration from a JSON file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Candidate config locations, most specific first
  pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".greenlight.json"), PathBuf::from("greenlight.json")];
    if let Some(dir) = dirs::config_dir() {
      paths.push(dir.join("greenlight").join("config.json"));
    }
    paths
  }

  /// Load configuration from the current directory, the user config dir, or defaults
  pub fn load() -> Result<Self> {
    for path in Self::search_paths() {
      if path.exists() {
        tracing::debug!(path = %path.display(), "loading engine config");
        return Self::load_from_file(&path);
      }
    }

    Ok(EngineConfig::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  pub fn validate(&self) -> Result<()> {
    if self.top_k == 0 {
      return Err(GreenlightError::InvalidConfig("top_k must be at least 1".to_string()));
    }
    for (name, value) in [
      ("baseline_threshold", self.baseline_threshold),
      ("precision_threshold", self.precision_threshold),
      ("low_score_threshold", self.low_score_threshold),
    ] {
      if value > 100 {
        return Err(GreenlightError::InvalidConfig(format!("{name} must be at most 100, got {value}")));
      }
    }
    self.baseline_weights.validate("baseline")?;
    self.precision_weights.validate("precision")?;
    self.forecast.validate()?;
    self.affinity.validate()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn test_config_default() {
    let config = EngineConfig::default();
    assert_eq!(config.top_k, 5);
    assert_eq!(config.baseline_threshold, 25);
    assert_eq!(config.precision_threshold, 30);
    assert_eq!(config.low_score_threshold, 40);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_config_load_nonexistent_file() {
    let result = EngineConfig::load_from_file(Path::new("nonexistent.json"));
    assert!(result.is_err());
  }

  #[test]
  fn test_config_load_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("greenlight.json");

    let config_content = r#"{
            "top_k": 3,
            "baseline_threshold": 35,
            "baseline_weights": {
                "genre": 0.30,
                "narrative": 0.20,
                "tone": 0.15,
                "theme": 0.15,
                "format": 0.10,
                "market": 0.05,
                "analogy": 0.05
            },
            "affinity": { "min_score": 60 }
        }"#;

    fs::write(&config_path, config_content).unwrap();

    let config = EngineConfig::load_from_file(&config_path).unwrap();
    assert_eq!(config.top_k, 3);
    assert_eq!(config.baseline_threshold, 35);
    assert_eq!(config.baseline_weights.genre, 0.30);
    assert_eq!(config.affinity.min_score, 60);
    assert_eq!(config.affinity.talent_top_n, 8);
  }

  #[test]
  fn test_config_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.json");

    fs::write(&config_path, "{ invalid json }").unwrap();

    let result = EngineConfig::load_from_file(&config_path);
    assert!(matches!(result, Err(GreenlightError::Json(_))));
  }

  #[test]
  fn test_config_load_partial_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("partial.json");

    fs::write(&config_path, r#"{ "precision_threshold": 45 }"#).unwrap();

    let config = EngineConfig::load_from_file(&config_path).unwrap();
    assert_eq!(config.precision_threshold, 45);
    assert_eq!(config.top_k, 5);
    assert_eq!(config.baseline_weights, BaselineWeights::default());
    assert_eq!(config.forecast, ForecastSettings::default());
  }

  #[test]
  fn test_config_rejects_weights_not_summing_to_one() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("weights.json");

    fs::write(&config_path, r#"{ "precision_weights": { "narrative_dna": 0.9 } }"#).unwrap();

    let result = EngineConfig::load_from_file(&config_path);
    assert!(matches!(result, Err(GreenlightError::InvalidConfig(_))));
  }

  #[test]
  fn test_config_rejects_zero_top_k() {
    let config = EngineConfig { top_k: 0, ..EngineConfig::default() };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_config_rejects_threshold_over_100() {
    let config = EngineConfig { baseline_threshold: 120, ..EngineConfig::default() };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_search_paths_prefer_local_files() {
    let paths = EngineConfig::search_paths();
    assert_eq!(paths[0], PathBuf::from(".greenlight.json"));
    assert_eq!(paths[1], PathBuf::from("greenlight.json"));
  }

  #[test]
  fn test_config_load_and_save() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.json");

    let mut original_config = EngineConfig { top_k: 8, low_score_threshold: 35, ..EngineConfig::default() };
    original_config.affinity.franchise_top_n = 2;

    original_config.save_to_file(&config_path).unwrap();
    let loaded_config = EngineConfig::load_from_file(&config_path).unwrap();

    assert_eq!(original_config, loaded_config);
  }
}
