//! Narrative feature profiles
//!
//! Structured tag sets extracted from free text. Single-valued dimensions
//! hold a [`Tag`], which is either a recognized category or explicitly
//! unset; multi-valued dimensions are ordered, duplicate-free lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A categorical value that is either a recognized tag or explicitly unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tag {
  #[default]
  Unset,
  Known(String),
}

impl Tag {
  pub const UNSET_LABEL: &'static str = "unset";

  pub fn known(value: impl Into<String>) -> Self {
    Tag::from(value.into())
  }

  pub fn is_set(&self) -> bool {
    matches!(self, Tag::Known(_))
  }

  pub fn get(&self) -> Option<&str> {
    match self {
      Tag::Known(value) => Some(value),
      Tag::Unset => None,
    }
  }

  pub fn as_str(&self) -> &str {
    self.get().unwrap_or(Self::UNSET_LABEL)
  }

  /// Two tags match only when both are set and equal ignoring case
  pub fn matches(&self, other: &Tag) -> bool {
    match (self.get(), other.get()) {
      (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
      _ => false,
    }
  }
}

impl From<String> for Tag {
  fn from(value: String) -> Self {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Tag::UNSET_LABEL) {
      Tag::Unset
    } else {
      Tag::Known(trimmed.to_string())
    }
  }
}

impl From<&str> for Tag {
  fn from(value: &str) -> Self {
    Tag::from(value.to_string())
  }
}

impl From<Tag> for String {
  fn from(tag: Tag) -> Self {
    tag.as_str().to_string()
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Surface-level features of a concept, used by the first-pass scorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeFeatureProfile {
  pub protagonist_type: Tag,
  pub central_conflict: Tag,
  pub setting: Tag,
  pub narrative_archetype: Tag,
  pub stakes_level: Tag,
  pub structure_type: Tag,
  pub themes: Vec<String>,
  pub genre_markers: Vec<String>,
  pub story_beats: Vec<String>,
  pub emotional_tones: Vec<String>,
  /// Fraction of intensifier words present, in [0.1, 1.0]
  pub emotional_intensity: f64,
}

impl NarrativeFeatureProfile {
  /// Profile with every categorical field unset and every set empty
  pub fn unset() -> Self {
    Self { emotional_intensity: crate::vocabulary::MIN_INTENSITY, ..Default::default() }
  }

  pub fn categorical_fields(&self) -> [(&'static str, &Tag); 6] {
    [
      ("protagonist", &self.protagonist_type),
      ("conflict", &self.central_conflict),
      ("setting", &self.setting),
      ("archetype", &self.narrative_archetype),
      ("stakes", &self.stakes_level),
      ("structure", &self.structure_type),
    ]
  }

  /// Number of categorical fields that carry a recognized tag
  pub fn recognized_count(&self) -> usize {
    self.categorical_fields().iter().filter(|(_, tag)| tag.is_set()).count()
  }

  pub fn is_unset(&self) -> bool {
    self.recognized_count() == 0
      && self.themes.is_empty()
      && self.genre_markers.is_empty()
      && self.story_beats.is_empty()
      && self.emotional_tones.is_empty()
  }
}

/// Higher-resolution features used by the layered (precision) pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepFeatureProfile {
  pub archetype: Tag,
  pub wound: Tag,
  pub conflict_type: Tag,
  pub universal_truths: Vec<String>,
  pub cultural_flags: Vec<String>,
  pub empathy_traits: Vec<String>,
}
