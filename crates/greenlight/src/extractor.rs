//! Feature extraction
//!
//! Converts free text into a [`NarrativeFeatureProfile`]. Extraction never
//! fails: a dimension with no signal is left unset.
//!
//! Single-valued dimensions are first-match-wins over the ordered tables in
//! [`crate::vocabulary`]. Multi-valued dimensions collect every category with
//! a keyword present.

use crate::concept::ConceptInput;
use crate::profile::{NarrativeFeatureProfile, Tag};
use crate::text::{push_unique, TextSignal};
use crate::vocabulary::{
  KeywordTable, CENTRAL_CONFLICTS, GENRE_MARKERS, INTENSIFIERS, MIN_INTENSITY,
  NARRATIVE_ARCHETYPES, PROTAGONIST_TYPES, SETTINGS, STAKES_LEVELS, STORY_BEATS, STRUCTURE_TYPES,
  THEMES, TONES,
};

/// Caller-declared values merged into the extracted multi-valued sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionHints {
  pub tones: Vec<String>,
  pub genres: Vec<String>,
}

impl ExtractionHints {
  pub fn from_concept(concept: &ConceptInput) -> Self {
    Self { tones: concept.tone_hints(), genres: concept.genres() }
  }
}

/// First category in table order with a keyword present in the text
pub fn first_match(signal: &TextSignal, table: KeywordTable) -> Tag {
  table
    .iter()
    .find(|(_, keywords)| signal.contains_any(keywords))
    .map(|(category, _)| Tag::known(*category))
    .unwrap_or(Tag::Unset)
}

/// Every category with a keyword present, in table order
pub fn all_matches(signal: &TextSignal, table: KeywordTable) -> Vec<String> {
  let mut matches = Vec::new();
  for (category, keywords) in table {
    if signal.contains_any(keywords) {
      push_unique(&mut matches, category);
    }
  }
  matches
}

/// Fraction of intensifier words present, floored at [`MIN_INTENSITY`]
pub fn emotional_intensity(signal: &TextSignal) -> f64 {
  let present = signal.count_present(INTENSIFIERS) as f64;
  (present / INTENSIFIERS.len() as f64).clamp(MIN_INTENSITY, 1.0)
}

/// Extract a feature profile from text, then union in any hints
pub fn extract(text: &str, hints: &ExtractionHints) -> NarrativeFeatureProfile {
  let signal = TextSignal::new(text);

  let mut profile = NarrativeFeatureProfile {
    protagonist_type: first_match(&signal, PROTAGONIST_TYPES),
    central_conflict: first_match(&signal, CENTRAL_CONFLICTS),
    setting: first_match(&signal, SETTINGS),
    narrative_archetype: first_match(&signal, NARRATIVE_ARCHETYPES),
    stakes_level: first_match(&signal, STAKES_LEVELS),
    structure_type: first_match(&signal, STRUCTURE_TYPES),
    themes: all_matches(&signal, THEMES),
    genre_markers: all_matches(&signal, GENRE_MARKERS),
    story_beats: all_matches(&signal, STORY_BEATS),
    emotional_tones: all_matches(&signal, TONES),
    emotional_intensity: emotional_intensity(&signal),
  };

  for tone in &hints.tones {
    push_unique(&mut profile.emotional_tones, tone);
  }
  for genre in &hints.genres {
    push_unique(&mut profile.genre_markers, genre);
  }

  tracing::debug!(
    recognized = profile.recognized_count(),
    themes = profile.themes.len(),
    tones = profile.emotional_tones.len(),
    "extracted narrative features"
  );

  profile
}

/// Extract from a concept's logline and synopsis with its declared hints
pub fn extract_concept(concept: &ConceptInput) -> NarrativeFeatureProfile {
  extract(&concept.analysis_text(), &ExtractionHints::from_concept(concept))
}
