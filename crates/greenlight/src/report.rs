//! The evaluation report returned for every analysis

use serde::{Deserialize, Serialize};

use crate::affinity::AffinityResult;
use crate::analogy::ParsedAnalogy;
use crate::concept::ConceptInput;
use crate::forecast::ForecastResult;
use crate::layered::DeepAnalysis;
use crate::logline::LoglineQuality;
use crate::profile::NarrativeFeatureProfile;
use crate::similarity::MatchResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
  pub concept: ConceptInput,
  pub corpus_version: String,
  pub profile: NarrativeFeatureProfile,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub analogy: Option<ParsedAnalogy>,
  /// Baseline matches, best first
  pub comparables: Vec<MatchResult>,
  pub forecast: ForecastResult,
  pub distribution_partners: Vec<AffinityResult>,
  pub talent: Vec<AffinityResult>,
  pub franchise: Vec<AffinityResult>,
  pub logline: LoglineQuality,
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub deep: Option<DeepAnalysis>,
}

impl Report {
  pub fn best_match(&self) -> Option<&MatchResult> {
    self.comparables.first()
  }

  /// Every 0-100 score the report carries
  pub fn scores(&self) -> Vec<u8> {
    let mut scores = Vec::new();
    for matched in self.comparables.iter().chain(self.deep.iter().flat_map(|d| &d.precision_matches)) {
      scores.push(matched.overall);
      scores.extend(matched.dimensions.iter().map(|d| d.score));
    }
    scores.push(self.forecast.confidence);
    for affinity in self.distribution_partners.iter().chain(&self.talent).chain(&self.franchise) {
      scores.push(affinity.score);
    }
    let logline = &self.logline;
    scores.extend([
      logline.hook_strength,
      logline.clarity,
      logline.emotional_hook,
      logline.marketability,
      logline.overall,
    ]);
    if let Some(deep) = &self.deep {
      scores.extend([
        deep.empathy,
        deep.thematic_depth,
        deep.structural_integrity,
        deep.word_of_mouth,
        deep.cultural_relevance,
        deep.precision_forecast.confidence,
        deep.overall,
      ]);
    }
    scores
  }

  pub fn to_json(&self) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}
