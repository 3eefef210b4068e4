//! Box office forecasting from ranked comparables
//!
//! Each comparable contributes with weight `(overall / 100) ^ exponent`, so
//! close matches dominate. Fields missing on a comparable are skipped for
//! that field only. With no usable comparables the forecast falls back to a
//! static per-genre baseline and reports low confidence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::concept::BudgetTier;
use crate::data::{self, GENRE_BASELINES_YAML};
use crate::similarity::MatchResult;
use crate::{GreenlightError, Result};

/// Comparables beyond this count no longer raise confidence
pub const CONFIDENCE_COUNT_CAP: usize = 5;

fn default_micro() -> f64 {
  0.3
}

fn default_low() -> f64 {
  0.6
}

fn default_medium() -> f64 {
  1.0
}

fn default_high() -> f64 {
  1.8
}

fn default_blockbuster() -> f64 {
  3.0
}

/// Scale applied to money projections per budget tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetMultipliers {
  #[serde(default = "default_micro")]
  pub micro: f64,
  #[serde(default = "default_low")]
  pub low: f64,
  #[serde(default = "default_medium")]
  pub medium: f64,
  #[serde(default = "default_high")]
  pub high: f64,
  #[serde(default = "default_blockbuster")]
  pub blockbuster: f64,
}

impl Default for BudgetMultipliers {
  fn default() -> Self {
    Self {
      micro: default_micro(),
      low: default_low(),
      medium: default_medium(),
      high: default_high(),
      blockbuster: default_blockbuster(),
    }
  }
}

impl BudgetMultipliers {
  /// Multiplier for a tier; an undeclared budget is treated as medium
  pub fn for_tier(&self, tier: Option<BudgetTier>) -> f64 {
    match tier {
      Some(BudgetTier::Micro) => self.micro,
      Some(BudgetTier::Low) => self.low,
      Some(BudgetTier::Medium) | None => self.medium,
      Some(BudgetTier::High) => self.high,
      Some(BudgetTier::Blockbuster) => self.blockbuster,
    }
  }

  fn values(&self) -> [f64; 5] {
    [self.micro, self.low, self.medium, self.high, self.blockbuster]
  }
}

fn default_weight_exponent() -> f64 {
  2.0
}

fn default_variance() -> f64 {
  0.4
}

fn default_min_variance() -> f64 {
  0.2
}

fn default_max_variance() -> f64 {
  0.6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
  /// Exponent applied to `overall / 100` when weighting a comparable
  #[serde(default = "default_weight_exponent")]
  pub weight_exponent: f64,
  /// Variance used when fewer than two comparables carry domestic data
  #[serde(default = "default_variance")]
  pub default_variance: f64,
  #[serde(default = "default_min_variance")]
  pub min_variance: f64,
  #[serde(default = "default_max_variance")]
  pub max_variance: f64,
  #[serde(default)]
  pub budget_multipliers: BudgetMultipliers,
}

impl Default for ForecastSettings {
  fn default() -> Self {
    Self {
      weight_exponent: default_weight_exponent(),
      default_variance: default_variance(),
      min_variance: default_min_variance(),
      max_variance: default_max_variance(),
      budget_multipliers: BudgetMultipliers::default(),
    }
  }
}

impl ForecastSettings {
  pub fn validate(&self) -> Result<()> {
    if !(self.weight_exponent.is_finite() && self.weight_exponent > 0.0) {
      return Err(GreenlightError::InvalidConfig("forecast weight exponent must be positive".to_string()));
    }
    if !(0.0 <= self.min_variance && self.min_variance <= self.max_variance && self.max_variance < 1.0) {
      return Err(GreenlightError::InvalidConfig(format!(
        "variance bounds must satisfy 0 <= min ({}) <= max ({}) < 1",
        self.min_variance, self.max_variance
      )));
    }
    if !(self.min_variance..=self.max_variance).contains(&self.default_variance) {
      return Err(GreenlightError::InvalidConfig("default variance must lie within the variance bounds".to_string()));
    }
    if self.budget_multipliers.values().iter().any(|m| !(m.is_finite() && *m > 0.0)) {
      return Err(GreenlightError::InvalidConfig("budget multipliers must be positive".to_string()));
    }
    Ok(())
  }
}

/// Low / most likely / high money values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
  pub low: f64,
  pub likely: f64,
  pub high: f64,
}

impl Projection {
  fn around(likely: f64, variance: f64) -> Self {
    Self {
      low: round2(likely * (1.0 - variance)),
      likely: round2(likely),
      high: round2(likely * (1.0 + variance)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
  High,
  Medium,
  Low,
}

impl ConfidenceLabel {
  pub fn from_score(score: u8) -> Self {
    if score >= 75 {
      ConfidenceLabel::High
    } else if score >= 50 {
      ConfidenceLabel::Medium
    } else {
      ConfidenceLabel::Low
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ConfidenceLabel::High => "High",
      ConfidenceLabel::Medium => "Medium",
      ConfidenceLabel::Low => "Low",
    }
  }
}

impl fmt::Display for ConfidenceLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
  pub domestic: Projection,
  pub worldwide: Projection,
  pub roi_estimate: f64,
  pub confidence: u8,
  pub label: ConfidenceLabel,
  pub variance: f64,
  pub comparables_used: Vec<String>,
  pub used_fallback: bool,
  pub rationale: String,
}

/// Confidence from the usable comparable count and their mean match score.
/// Non-decreasing in both arguments.
pub fn confidence_score(count: usize, average_match: f64) -> u8 {
  let count = count.min(CONFIDENCE_COUNT_CAP) as f64;
  let average = if average_match.is_finite() { average_match.clamp(0.0, 100.0) } else { 0.0 };
  crate::similarity::clamp_score(20.0 + 8.0 * count + 0.4 * average)
}

fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

/// Weighted mean over `(weight, value)` pairs; plain mean if every weight is zero
fn weighted_mean(pairs: &[(f64, f64)]) -> Option<f64> {
  if pairs.is_empty() {
    return None;
  }
  let total: f64 = pairs.iter().map(|(w, _)| w).sum();
  if total > 0.0 {
    Some(pairs.iter().map(|(w, v)| w * v).sum::<f64>() / total)
  } else {
    Some(pairs.iter().map(|(_, v)| v).sum::<f64>() / pairs.len() as f64)
  }
}

/// Population coefficient of variation
fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
  let n = values.len() as f64;
  let mean = values.iter().sum::<f64>() / n;
  if !(mean > 0.0) {
    return None;
  }
  let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
  Some(variance.sqrt() / mean)
}

/// Static outcome for one genre at a medium budget, USD millions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenreBaseline {
  pub domestic: f64,
  pub worldwide: f64,
  pub roi: f64,
}

impl GenreBaseline {
  /// Worldwide gross per domestic dollar
  pub fn worldwide_ratio(&self) -> f64 {
    if self.domestic > 0.0 {
      self.worldwide / self.domestic
    } else {
      1.0
    }
  }
}

impl Default for GenreBaseline {
  fn default() -> Self {
    Self { domestic: 45.0, worldwide: 100.0, roi: 2.5 }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreBaselines {
  #[serde(default)]
  pub default: GenreBaseline,
  #[serde(default)]
  pub genres: BTreeMap<String, GenreBaseline>,
}

impl GenreBaselines {
  pub fn embedded() -> Result<Self> {
    data::parse_yaml("genre_baselines", GENRE_BASELINES_YAML)
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    data::load_yaml_file(path)
  }

  /// Row for a genre, or the default row
  pub fn row(&self, genre: Option<&str>) -> &GenreBaseline {
    genre
      .and_then(|g| self.genres.iter().find(|(name, _)| name.eq_ignore_ascii_case(g.trim())))
      .map_or(&self.default, |(_, row)| row)
  }
}

pub struct Forecaster<'a> {
  pub baselines: &'a GenreBaselines,
  pub settings: &'a ForecastSettings,
}

impl<'a> Forecaster<'a> {
  pub fn new(baselines: &'a GenreBaselines, settings: &'a ForecastSettings) -> Self {
    Self { baselines, settings }
  }

  fn weight(&self, overall: u8) -> f64 {
    (overall as f64 / 100.0).powf(self.settings.weight_exponent)
  }

  fn clamp_variance(&self, variance: f64) -> f64 {
    variance.clamp(self.settings.min_variance, self.settings.max_variance)
  }

  /// Forecast from ranked matches. Never fails: no usable comparables means
  /// the genre baseline is used instead.
  pub fn forecast(&self, matches: &[MatchResult], budget: Option<BudgetTier>, genre: Option<&str>) -> ForecastResult {
    let usable: Vec<&MatchResult> = matches.iter().filter(|m| m.comparable.outcome.has_financials()).collect();

    if usable.is_empty() {
      return self.fallback(budget, genre);
    }

    let baseline = self.baselines.row(genre);
    let multiplier = self.settings.budget_multipliers.for_tier(budget);

    let mut domestic = Vec::new();
    let mut worldwide = Vec::new();
    let mut roi = Vec::new();
    for m in &usable {
      let weight = self.weight(m.overall);
      let outcome = &m.comparable.outcome;
      if let Some(value) = outcome.domestic {
        domestic.push((weight, value));
      }
      if let Some(value) = outcome.worldwide {
        worldwide.push((weight, value));
      }
      if let Some(value) = outcome.roi() {
        roi.push((weight, value));
      }
    }

    let ratio = baseline.worldwide_ratio();
    let (domestic_avg, worldwide_avg) = match (weighted_mean(&domestic), weighted_mean(&worldwide)) {
      (Some(d), Some(w)) => (d, w),
      (Some(d), None) => (d, d * ratio),
      (None, Some(w)) => (w / ratio, w),
      (None, None) => (baseline.domestic, baseline.worldwide),
    };
    let roi_estimate = weighted_mean(&roi).unwrap_or(baseline.roi);

    let domestic_values: Vec<f64> = domestic.iter().map(|(_, v)| *v).collect();
    let variance = if domestic_values.len() < 2 {
      self.settings.default_variance
    } else {
      coefficient_of_variation(&domestic_values)
        .map_or(self.settings.default_variance, |cv| self.clamp_variance(cv))
    };

    let average_match = usable.iter().map(|m| m.overall as f64).sum::<f64>() / usable.len() as f64;
    let confidence = confidence_score(usable.len(), average_match);
    let label = ConfidenceLabel::from_score(confidence);
    let comparables_used: Vec<String> = usable.iter().map(|m| m.comparable.title.clone()).collect();

    let rationale = format!(
      "Weighted from {} comparable{} (average match {:.0}) at a {:.1}x budget multiplier; variance {:.0}%",
      usable.len(),
      if usable.len() == 1 { "" } else { "s" },
      average_match,
      multiplier,
      variance * 100.0
    );

    tracing::debug!(comparables = usable.len(), confidence, variance, "forecast from comparables");

    ForecastResult {
      domestic: Projection::around(domestic_avg * multiplier, variance),
      worldwide: Projection::around(worldwide_avg * multiplier, variance),
      roi_estimate: round2(roi_estimate),
      confidence,
      label,
      variance: round2(variance),
      comparables_used,
      used_fallback: false,
      rationale,
    }
  }

  /// Genre baseline forecast, always low confidence
  pub fn fallback(&self, budget: Option<BudgetTier>, genre: Option<&str>) -> ForecastResult {
    let baseline = self.baselines.row(genre);
    let multiplier = self.settings.budget_multipliers.for_tier(budget);
    let variance = self.settings.default_variance;
    let confidence = confidence_score(0, 0.0).min(49);

    tracing::warn!(genre = genre.unwrap_or("unknown"), "no usable comparables, using genre baseline");

    ForecastResult {
      domestic: Projection::around(baseline.domestic * multiplier, variance),
      worldwide: Projection::around(baseline.worldwide * multiplier, variance),
      roi_estimate: round2(baseline.roi),
      confidence,
      label: ConfidenceLabel::Low,
      variance: round2(variance),
      comparables_used: Vec::new(),
      used_fallback: true,
      rationale: format!(
        "No comparable cleared the inclusion threshold; using the {} genre baseline",
        genre.unwrap_or("default")
      ),
    }
  }
}
