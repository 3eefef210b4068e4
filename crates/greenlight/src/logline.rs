//! Logline quality breakdown
//!
//! Scores the pitch sentence itself: how it hooks, how clearly it states who
//! wants what, how much feeling it carries and how easy it is to sell.

use serde::{Deserialize, Serialize};

use crate::concept::ConceptInput;
use crate::profile::NarrativeFeatureProfile;
use crate::similarity::clamp_score;
use crate::text::TextSignal;

/// Connectors that set up irony or reversal
const CONTRAST_CONNECTORS: &[&str] =
  &["but", "until", "only to", "when", "despite", "yet", "while", "unless", "after", "must"];

/// Genres that travel well without stars
const COMMERCIAL_GENRES: &[&str] =
  &["horror", "thriller", "action", "sci-fi", "comedy", "crime", "fantasy", "animation", "mystery"];

const IDEAL_WORDS: std::ops::RangeInclusive<usize> = 20..=40;
const ACCEPTABLE_WORDS: std::ops::RangeInclusive<usize> = 12..=55;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoglineQuality {
  pub hook_strength: u8,
  pub clarity: u8,
  pub emotional_hook: u8,
  pub marketability: u8,
  pub overall: u8,
  pub word_count: usize,
  pub strengths: Vec<String>,
  pub improvements: Vec<String>,
}

fn hook_strength(signal: &TextSignal, profile: &NarrativeFeatureProfile) -> f64 {
  let mut score = 30.0;
  if signal.contains_any(CONTRAST_CONNECTORS) {
    score += 15.0;
  }
  score += match profile.stakes_level.get() {
    Some("global") => 20.0,
    Some(_) => 15.0,
    None => 0.0,
  };
  if profile.narrative_archetype.is_set() {
    score += 10.0;
  }
  if profile.structure_type.get() == Some("countdown") {
    score += 10.0;
  }
  score + profile.emotional_intensity * 20.0
}

fn clarity(signal: &TextSignal, profile: &NarrativeFeatureProfile, sentences: usize) -> f64 {
  let words = signal.word_count();
  let mut score = 40.0;
  if IDEAL_WORDS.contains(&words) {
    score += 30.0;
  } else if ACCEPTABLE_WORDS.contains(&words) {
    score += 15.0;
  }
  if profile.protagonist_type.is_set() {
    score += 15.0;
  }
  if profile.central_conflict.is_set() {
    score += 15.0;
  }
  if sentences > 2 {
    score -= 10.0;
  }
  if words == 0 {
    score = 0.0;
  }
  score
}

fn emotional_hook(profile: &NarrativeFeatureProfile) -> f64 {
  let mut score = 30.0 + 15.0 * profile.emotional_tones.len().min(2) as f64;
  score += profile.emotional_intensity * 30.0;
  if matches!(profile.stakes_level.get(), Some("personal") | Some("internal")) {
    score += 10.0;
  }
  score
}

fn marketability(concept: &ConceptInput, profile: &NarrativeFeatureProfile) -> f64 {
  let mut score = 35.0;
  if concept.primary_genre().is_some_and(|g| COMMERCIAL_GENRES.contains(&g.as_str())) {
    score += 20.0;
  }
  if concept.comparable_text().is_some() {
    score += 15.0;
  }
  if profile.genre_markers.len() >= 2 {
    score += 10.0;
  }
  if profile.themes.len() >= 2 {
    score += 10.0;
  }
  if profile.setting.is_set() {
    score += 5.0;
  }
  if !profile.emotional_tones.is_empty() {
    score += 5.0;
  }
  score
}

fn sentence_count(text: &str) -> usize {
  text.split(['.', '!', '?']).filter(|s| !s.trim().is_empty()).count()
}

/// Score a concept's logline against its extracted features
pub fn evaluate(concept: &ConceptInput, profile: &NarrativeFeatureProfile) -> LoglineQuality {
  let signal = TextSignal::new(&concept.logline);
  let words = signal.word_count();

  let hook_strength = clamp_score(hook_strength(&signal, profile));
  let clarity = clamp_score(clarity(&signal, profile, sentence_count(&concept.logline)));
  let emotional_hook = clamp_score(emotional_hook(profile));
  let marketability = clamp_score(marketability(concept, profile));
  let overall = clamp_score(
    0.30 * hook_strength as f64 + 0.25 * clarity as f64 + 0.25 * emotional_hook as f64 + 0.20 * marketability as f64,
  );

  let mut strengths = Vec::new();
  let mut improvements = Vec::new();

  for (label, score) in [
    ("hook", hook_strength),
    ("clarity", clarity),
    ("emotional pull", emotional_hook),
    ("marketability", marketability),
  ] {
    if score >= 70 {
      strengths.push(format!("Strong {label} ({score})"));
    }
  }

  if words == 0 {
    improvements.push("Write a one or two sentence logline".to_string());
  } else if words > *ACCEPTABLE_WORDS.end() {
    improvements.push(format!("Tighten to under {} words (currently {words})", IDEAL_WORDS.end()));
  } else if words < *ACCEPTABLE_WORDS.start() {
    improvements.push("Add what the protagonist stands to lose".to_string());
  }
  if !profile.protagonist_type.is_set() {
    improvements.push("Name the protagonist by role or defining flaw".to_string());
  }
  if !profile.central_conflict.is_set() {
    improvements.push("Make the central conflict explicit".to_string());
  }
  if !profile.stakes_level.is_set() {
    improvements.push("State the stakes if the protagonist fails".to_string());
  }
  if hook_strength < 50 && words > 0 {
    improvements.push("Add an ironic turn or a ticking clock".to_string());
  }
  if concept.comparable_text().is_none() {
    improvements.push("Offer a comparable (\"X meets Y\") to anchor the pitch".to_string());
  }

  LoglineQuality {
    hook_strength,
    clarity,
    emotional_hook,
    marketability,
    overall,
    word_count: words,
    strengths,
    improvements,
  }
}
