//! Reference corpus
//!
//! A static, versioned collection of comparable prior works. Each entry
//! carries the same tag shape as a feature profile plus known outcome data.
//! The corpus is loaded once and never mutated.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::concept::{BudgetTier, Format};
use crate::data::{self, CORPUS_YAML};
use crate::profile::Tag;
use crate::Result;

/// Known outcome data; money values are USD millions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub budget: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub domestic: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub worldwide: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub roi: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub critic_score: Option<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub audience_score: Option<u8>,
}

impl Outcome {
  /// Recorded ROI, or worldwide gross over budget when both are known
  pub fn roi(&self) -> Option<f64> {
    self.roi.or_else(|| match (self.worldwide, self.budget) {
      (Some(worldwide), Some(budget)) if budget > 0.0 => Some(worldwide / budget),
      _ => None,
    })
  }

  pub fn has_financials(&self) -> bool {
    self.domestic.is_some() || self.worldwide.is_some() || self.roi().is_some()
  }
}

/// Tags used only by the layered precision pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepTags {
  pub archetype: Tag,
  pub wound: Tag,
  pub conflict_type: Tag,
  pub universal_truths: Vec<String>,
  pub cultural_flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableEntry {
  pub title: String,
  pub year: u16,
  pub distributor: String,
  pub format: Format,
  #[serde(default)]
  pub genres: Vec<String>,
  #[serde(default)]
  pub budget_tier: Option<BudgetTier>,
  #[serde(default)]
  pub audiences: Vec<String>,

  #[serde(default)]
  pub protagonist_type: Tag,
  #[serde(default)]
  pub central_conflict: Tag,
  #[serde(default)]
  pub setting: Tag,
  #[serde(default)]
  pub narrative_archetype: Tag,
  #[serde(default)]
  pub stakes_level: Tag,
  #[serde(default)]
  pub structure_type: Tag,
  #[serde(default)]
  pub themes: Vec<String>,
  #[serde(default)]
  pub genre_markers: Vec<String>,
  #[serde(default)]
  pub story_beats: Vec<String>,
  #[serde(default)]
  pub tones: Vec<String>,

  #[serde(default)]
  pub deep: DeepTags,
  #[serde(default)]
  pub outcome: Outcome,
}

impl ComparableEntry {
  pub fn primary_genre(&self) -> Option<&str> {
    self.genres.first().map(String::as_str)
  }

  pub fn display_name(&self) -> String {
    format!("{} ({})", self.title, self.year)
  }

  /// Every descriptive tag used for loose keyword overlap
  pub fn descriptive_tags(&self) -> Vec<String> {
    let mut tags = Vec::new();
    for tag in self.themes.iter().chain(&self.genre_markers).chain(&self.tones).chain(&self.genres) {
      crate::text::push_unique(&mut tags, tag);
    }
    tags
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
  pub version: String,
  pub entries: Vec<ComparableEntry>,
}

impl Corpus {
  /// Corpus shipped with the crate
  pub fn embedded() -> Result<Self> {
    Self::from_yaml_str("corpus", CORPUS_YAML)
  }

  pub fn from_yaml_str(table: &str, content: &str) -> Result<Self> {
    data::parse_yaml(table, content)
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    data::load_yaml_file(path)
  }

  pub fn from_entries(version: impl Into<String>, entries: Vec<ComparableEntry>) -> Self {
    Self { version: version.into(), entries }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ComparableEntry> {
    self.entries.iter()
  }

  /// Case-insensitive title lookup
  pub fn find_by_title(&self, title: &str) -> Option<&ComparableEntry> {
    let title = title.trim();
    self.entries.iter().find(|entry| entry.title.eq_ignore_ascii_case(title))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SMALL_CORPUS: &str = r#"
version: "test-1"
entries:
  - title: Night Shift
    year: 2020
    distributor: Test Pictures
    format: Feature Film
    genres: [horror, thriller]
    budget_tier: low
    protagonist_type: detective
    themes: [mortality]
    outcome:
      budget: 10
      domestic: 40
      worldwide: 90
  - title: Harbor Lights
    year: 2022
    distributor: Streamer
    format: Limited Series
    genres: [drama]
"#;

  #[test]
  fn test_embedded_corpus_loads() {
    let corpus = Corpus::embedded().unwrap();
    assert!(!corpus.version.is_empty());
    assert!(corpus.len() >= 40);
  }

  #[test]
  fn test_embedded_corpus_titles_are_unique() {
    let corpus = Corpus::embedded().unwrap();
    let mut titles: Vec<String> = corpus.iter().map(|e| e.title.to_lowercase()).collect();
    titles.sort();
    let before = titles.len();
    titles.dedup();
    assert_eq!(before, titles.len());
  }

  #[test]
  fn test_embedded_corpus_entries_are_tagged() {
    let corpus = Corpus::embedded().unwrap();
    for entry in corpus.iter() {
      assert!(!entry.genres.is_empty(), "{} has no genres", entry.title);
      assert!(entry.protagonist_type.is_set(), "{} has no protagonist", entry.title);
      assert!(entry.deep.archetype.is_set(), "{} has no deep archetype", entry.title);
    }
  }

  #[test]
  fn test_small_corpus_defaults() {
    let corpus = Corpus::from_yaml_str("small", SMALL_CORPUS).unwrap();
    assert_eq!(corpus.version, "test-1");

    let series = &corpus.entries[1];
    assert_eq!(series.format, Format::LimitedSeries);
    assert_eq!(series.protagonist_type, Tag::Unset);
    assert!(series.outcome.domestic.is_none());
    assert!(!series.outcome.has_financials());
  }

  #[test]
  fn test_outcome_roi_derivation() {
    let corpus = Corpus::from_yaml_str("small", SMALL_CORPUS).unwrap();
    let film = corpus.find_by_title("night shift").unwrap();
    assert_eq!(film.outcome.roi(), Some(9.0));

    let recorded = Outcome { roi: Some(2.5), worldwide: Some(100.0), budget: Some(10.0), ..Default::default() };
    assert_eq!(recorded.roi(), Some(2.5));

    let zero_budget = Outcome { worldwide: Some(100.0), budget: Some(0.0), ..Default::default() };
    assert_eq!(zero_budget.roi(), None);
  }

  #[test]
  fn test_find_by_title_missing() {
    let corpus = Corpus::from_yaml_str("small", SMALL_CORPUS).unwrap();
    assert!(corpus.find_by_title("Unknown Film").is_none());
  }

  #[test]
  fn test_malformed_corpus_is_error() {
    let result = Corpus::from_yaml_str("broken", "version: 1\nentries: [ { title: ");
    assert!(result.is_err());
  }
}
