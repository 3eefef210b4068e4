//! Layered (deep pass) re-scoring
//!
//! Re-extracts the concept with the deep vocabulary (arcs, wounds, conflict
//! types, universal truths, cultural timing), re-runs scoring, ranking and
//! forecasting with the precision weights, then blends everything into one
//! score and a verdict.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::concept::ConceptInput;
use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::extractor::{all_matches, first_match};
use crate::forecast::{ConfidenceLabel, ForecastResult, Forecaster, GenreBaselines};
use crate::logline::LoglineQuality;
use crate::profile::{DeepFeatureProfile, NarrativeFeatureProfile};
use crate::ranker;
use crate::similarity::{clamp_score, ConceptSignals, MatchResult, PrecisionScorer};
use crate::text::TextSignal;
use crate::vocabulary::{
  CONFLICT_TYPES, CULTURAL_FLAGS, DEEP_ARCHETYPES, EMPATHY_TRAITS, STORY_BEAT_COUNT, UNIVERSAL_TRUTHS, WOUNDS,
};

pub const EMPATHY_BASE: i32 = 60;
pub const MIN_OVERALL: f64 = 35.0;
pub const MAX_OVERALL: f64 = 98.0;
pub const GREEN_FLAG_POINTS: f64 = 2.0;
pub const RED_FLAG_POINTS: f64 = 3.0;

/// Blend weights; the six analysis scores plus the logline overall
const EMPATHY_WEIGHT: f64 = 0.15;
const THEMATIC_WEIGHT: f64 = 0.10;
const STRUCTURE_WEIGHT: f64 = 0.15;
const WORD_OF_MOUTH_WEIGHT: f64 = 0.15;
const CULTURAL_WEIGHT: f64 = 0.10;
const PRECISION_WEIGHT: f64 = 0.15;
const LOGLINE_WEIGHT: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
  #[serde(rename = "Greenlight")]
  Greenlight,
  #[serde(rename = "Strong Consider")]
  StrongConsider,
  #[serde(rename = "Consider")]
  Consider,
  #[serde(rename = "Develop Further")]
  DevelopFurther,
  #[serde(rename = "Pass")]
  Pass,
}

impl Verdict {
  pub fn from_score(score: u8) -> Self {
    match score {
      s if s >= 85 => Verdict::Greenlight,
      s if s >= 75 => Verdict::StrongConsider,
      s if s >= 60 => Verdict::Consider,
      s if s >= 45 => Verdict::DevelopFurther,
      _ => Verdict::Pass,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Verdict::Greenlight => "Greenlight",
      Verdict::StrongConsider => "Strong Consider",
      Verdict::Consider => "Consider",
      Verdict::DevelopFurther => "Develop Further",
      Verdict::Pass => "Pass",
    }
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepAnalysis {
  pub profile: DeepFeatureProfile,
  pub empathy: u8,
  pub thematic_depth: u8,
  pub structural_integrity: u8,
  pub word_of_mouth: u8,
  pub cultural_relevance: u8,
  pub precision_matches: Vec<MatchResult>,
  pub precision_forecast: ForecastResult,
  pub green_flags: Vec<String>,
  pub red_flags: Vec<String>,
  pub overall: u8,
  pub verdict: Verdict,
  pub rationale: String,
}

/// Deep features from free text
pub fn extract_deep(text: &str) -> DeepFeatureProfile {
  let signal = TextSignal::new(text);
  let empathy_traits = EMPATHY_TRAITS
    .iter()
    .filter(|(_, _, keywords)| signal.contains_any(keywords))
    .map(|(name, _, _)| name.to_string())
    .collect();

  DeepFeatureProfile {
    archetype: first_match(&signal, DEEP_ARCHETYPES),
    wound: first_match(&signal, WOUNDS),
    conflict_type: first_match(&signal, CONFLICT_TYPES),
    universal_truths: all_matches(&signal, UNIVERSAL_TRUTHS),
    cultural_flags: all_matches(&signal, CULTURAL_FLAGS),
    empathy_traits,
  }
}

/// Base 60 moved by each detected protagonist trait
pub fn empathy_score(deep: &DeepFeatureProfile) -> u8 {
  let delta: i32 = EMPATHY_TRAITS
    .iter()
    .filter(|(name, _, _)| deep.empathy_traits.iter().any(|t| t.as_str() == *name))
    .map(|(_, points, _)| points)
    .sum();
  clamp_score((EMPATHY_BASE + delta) as f64)
}

/// 30 plus 70 scaled by story-beat coverage
pub fn structural_integrity(profile: &NarrativeFeatureProfile) -> u8 {
  let coverage = profile.story_beats.len().min(STORY_BEAT_COUNT) as f64 / STORY_BEAT_COUNT as f64;
  clamp_score(30.0 + 70.0 * coverage)
}

pub fn thematic_depth(profile: &NarrativeFeatureProfile, deep: &DeepFeatureProfile) -> u8 {
  let mut score = 25.0;
  score += 10.0 * profile.themes.len().min(4) as f64;
  score += 12.0 * deep.universal_truths.len().min(3) as f64;
  if deep.archetype.is_set() {
    score += 9.0;
  }
  clamp_score(score)
}

pub fn word_of_mouth(profile: &NarrativeFeatureProfile, deep: &DeepFeatureProfile, empathy: u8) -> u8 {
  let mut score = 30.0 + 25.0 * profile.emotional_intensity;
  score += 8.0 * profile.emotional_tones.len().min(2) as f64;
  if profile.story_beats.iter().any(|b| b == "midpoint twist") {
    score += 12.0;
  }
  if deep.archetype.is_set() {
    score += 8.0;
  }
  if empathy >= 70 {
    score += 10.0;
  }
  clamp_score(score)
}

pub fn cultural_relevance(deep: &DeepFeatureProfile) -> u8 {
  let mut score = 35.0 + 15.0 * deep.cultural_flags.len().min(3) as f64;
  if !deep.universal_truths.is_empty() {
    score += 10.0;
  }
  clamp_score(score)
}

/// Scores feeding the final blend
struct Components {
  empathy: u8,
  thematic_depth: u8,
  structural_integrity: u8,
  word_of_mouth: u8,
  cultural_relevance: u8,
  precision_average: f64,
  logline: u8,
}

impl Components {
  fn blend(&self, green_flags: usize, red_flags: usize) -> u8 {
    let weighted = EMPATHY_WEIGHT * self.empathy as f64
      + THEMATIC_WEIGHT * self.thematic_depth as f64
      + STRUCTURE_WEIGHT * self.structural_integrity as f64
      + WORD_OF_MOUTH_WEIGHT * self.word_of_mouth as f64
      + CULTURAL_WEIGHT * self.cultural_relevance as f64
      + PRECISION_WEIGHT * self.precision_average
      + LOGLINE_WEIGHT * self.logline as f64;
    let adjusted = weighted + GREEN_FLAG_POINTS * green_flags as f64 - RED_FLAG_POINTS * red_flags as f64;
    clamp_score(adjusted.clamp(MIN_OVERALL, MAX_OVERALL))
  }
}

fn executive_flags(
  components: &Components,
  matches: &[MatchResult],
  forecast: &ForecastResult,
) -> (Vec<String>, Vec<String>) {
  let mut green = Vec::new();
  let mut red = Vec::new();

  if components.empathy >= 75 {
    green.push("Protagonist is easy to root for".to_string());
  } else if components.empathy < 50 {
    red.push("Protagonist may alienate audiences".to_string());
  }

  if components.structural_integrity >= 70 {
    green.push("Story beats are well covered".to_string());
  } else if components.structural_integrity < 45 {
    red.push("Story structure is thin".to_string());
  }

  if components.cultural_relevance >= 65 {
    green.push("Taps into current cultural conversation".to_string());
  }

  if components.word_of_mouth >= 70 {
    green.push("High word-of-mouth potential".to_string());
  } else if components.word_of_mouth < 45 {
    red.push("Little to talk about after viewing".to_string());
  }

  match matches.first() {
    Some(best) if best.overall >= 70 => {
      green.push(format!("Strong precedent in {}", best.comparable.display_name()));
    }
    Some(_) => {}
    None => red.push("No close precedent in the corpus".to_string()),
  }

  if forecast.used_fallback {
    red.push("Forecast rests on genre averages only".to_string());
  } else if forecast.label == ConfidenceLabel::High {
    green.push("Comparable performance supports the forecast".to_string());
  }
  if forecast.roi_estimate >= 3.0 {
    green.push(format!("Comparables returned {:.1}x", forecast.roi_estimate));
  }

  if components.logline >= 75 {
    green.push("Logline sells the concept".to_string());
  } else if components.logline < 50 {
    red.push("Logline needs work".to_string());
  }

  (green, red)
}

/// Second pass over the corpus at the deep vocabulary's resolution
pub struct LayeredRescorer<'a> {
  pub corpus: &'a Corpus,
  pub baselines: &'a GenreBaselines,
  pub config: &'a EngineConfig,
}

impl LayeredRescorer<'_> {
  pub fn analyze(
    &self,
    concept: &ConceptInput,
    profile: &NarrativeFeatureProfile,
    signals: &ConceptSignals,
    logline: &LoglineQuality,
  ) -> DeepAnalysis {
    let deep = extract_deep(&concept.analysis_text());

    let scorer = PrecisionScorer {
      profile,
      deep: &deep,
      signals,
      weights: &self.config.precision_weights,
      low_score_threshold: self.config.low_score_threshold,
    };
    let precision_matches =
      ranker::top_matches(self.corpus, &scorer, self.config.precision_threshold, self.config.top_k);

    let forecaster = Forecaster::new(self.baselines, &self.config.forecast);
    let precision_forecast = forecaster.forecast(&precision_matches, signals.budget_tier, signals.primary_genre());

    let empathy = empathy_score(&deep);
    let precision_average = if precision_matches.is_empty() {
      0.0
    } else {
      precision_matches.iter().map(|m| m.overall as f64).sum::<f64>() / precision_matches.len() as f64
    };

    let components = Components {
      empathy,
      thematic_depth: thematic_depth(profile, &deep),
      structural_integrity: structural_integrity(profile),
      word_of_mouth: word_of_mouth(profile, &deep, empathy),
      cultural_relevance: cultural_relevance(&deep),
      precision_average,
      logline: logline.overall,
    };

    let (green_flags, red_flags) = executive_flags(&components, &precision_matches, &precision_forecast);
    let overall = components.blend(green_flags.len(), red_flags.len());
    let verdict = Verdict::from_score(overall);

    let mut rationale = format!("{verdict} at {overall}/100.");
    match (deep.archetype.get(), deep.wound.get()) {
      (Some(arc), Some(wound)) => rationale.push_str(&format!(" Reads as a {arc} driven by {wound}.")),
      (Some(arc), None) => rationale.push_str(&format!(" Reads as a {arc}.")),
      _ => {}
    }
    if !green_flags.is_empty() {
      rationale.push_str(&format!(" Working: {}.", green_flags.join("; ")));
    }
    if !red_flags.is_empty() {
      rationale.push_str(&format!(" Concerns: {}.", red_flags.join("; ")));
    }

    tracing::debug!(
      overall,
      verdict = verdict.label(),
      green = green_flags.len(),
      red = red_flags.len(),
      "layered pass complete"
    );

    DeepAnalysis {
      profile: deep,
      empathy,
      thematic_depth: components.thematic_depth,
      structural_integrity: components.structural_integrity,
      word_of_mouth: components.word_of_mouth,
      cultural_relevance: components.cultural_relevance,
      precision_matches,
      precision_forecast,
      green_flags,
      red_flags,
      overall,
      verdict,
      rationale,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::profile::Tag;

  const DETECTIVE_LOGLINE: &str = "A disgraced detective investigates a string of occult murders in a small town before the killer strikes again";

  #[test]
  fn test_extract_deep_detective() {
    let deep = extract_deep(DETECTIVE_LOGLINE);
    assert_eq!(deep.archetype, Tag::known("Redemption Arc"));
    assert_eq!(deep.wound, Tag::known("guilt"));
    assert_eq!(deep.conflict_type, Tag::known("Person vs Supernatural"));
    assert!(deep.universal_truths.contains(&"The past cannot be outrun".to_string()));
    assert!(deep.universal_truths.contains(&"Justice has a cost".to_string()));
    assert!(deep.cultural_flags.contains(&"true crime appetite".to_string()));
    assert_eq!(deep.empathy_traits, vec!["wounded"]);
  }

  #[test]
  fn test_extract_deep_empty_text_is_unset() {
    let deep = extract_deep("");
    assert_eq!(deep, DeepFeatureProfile::default());
  }

  #[test]
  fn test_empathy_score() {
    let mut deep = DeepFeatureProfile::default();
    assert_eq!(empathy_score(&deep), 60);

    deep.empathy_traits = vec!["family protector".into(), "underdog".into()];
    assert_eq!(empathy_score(&deep), 87);

    deep.empathy_traits = vec!["villainous".into(), "selfish".into()];
    assert_eq!(empathy_score(&deep), 35);
  }

  #[test]
  fn test_structural_integrity_scales_with_beats() {
    let mut profile = NarrativeFeatureProfile::unset();
    assert_eq!(structural_integrity(&profile), 30);

    profile.story_beats = vec!["inciting incident".into(), "midpoint twist".into(), "climax".into()];
    assert_eq!(structural_integrity(&profile), 65);

    profile.story_beats.extend(["call to adventure", "dark night", "resolution"].map(String::from));
    assert_eq!(structural_integrity(&profile), 100);
  }

  #[test]
  fn test_verdict_bands() {
    assert_eq!(Verdict::from_score(98), Verdict::Greenlight);
    assert_eq!(Verdict::from_score(85), Verdict::Greenlight);
    assert_eq!(Verdict::from_score(84), Verdict::StrongConsider);
    assert_eq!(Verdict::from_score(75), Verdict::StrongConsider);
    assert_eq!(Verdict::from_score(60), Verdict::Consider);
    assert_eq!(Verdict::from_score(45), Verdict::DevelopFurther);
    assert_eq!(Verdict::from_score(44), Verdict::Pass);
    assert_eq!(Verdict::StrongConsider.to_string(), "Strong Consider");
  }

  #[test]
  fn test_blend_is_clamped() {
    let weak = Components {
      empathy: 0,
      thematic_depth: 0,
      structural_integrity: 0,
      word_of_mouth: 0,
      cultural_relevance: 0,
      precision_average: 0.0,
      logline: 0,
    };
    assert_eq!(weak.blend(0, 6), 35);

    let strong = Components {
      empathy: 100,
      thematic_depth: 100,
      structural_integrity: 100,
      word_of_mouth: 100,
      cultural_relevance: 100,
      precision_average: 100.0,
      logline: 100,
    };
    assert_eq!(strong.blend(8, 0), 98);
  }

  #[test]
  fn test_blend_applies_flag_points() {
    let components = Components {
      empathy: 60,
      thematic_depth: 60,
      structural_integrity: 60,
      word_of_mouth: 60,
      cultural_relevance: 60,
      precision_average: 60.0,
      logline: 60,
    };
    assert_eq!(components.blend(0, 0), 60);
    assert_eq!(components.blend(2, 0), 64);
    assert_eq!(components.blend(0, 2), 54);
  }
}
