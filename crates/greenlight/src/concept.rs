//! Concept input payload
//!
//! The flat key/value request an external caller sends for one analysis.
//! Required fields are plain strings; optional fields are `Option`s. Format
//! and budget tier stay as raw text and are parsed leniently on demand so a
//! malformed payload still produces a (low information) report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::text::TextSignal;
use crate::vocabulary::AUDIENCE_SEGMENTS;

/// Release format of a concept or comparable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
  #[serde(rename = "Feature Film")]
  FeatureFilm,
  #[serde(rename = "Series")]
  Series,
  #[serde(rename = "Limited Series")]
  LimitedSeries,
}

impl Format {
  /// Lenient parse of user-supplied format text
  pub fn parse(value: &str) -> Option<Self> {
    let normalized = value.trim().to_lowercase().replace(['-', '_'], " ");
    match normalized.as_str() {
      "feature film" | "feature" | "film" | "movie" | "motion picture" => Some(Format::FeatureFilm),
      "series" | "tv series" | "television series" | "tv" | "ongoing series" => Some(Format::Series),
      "limited series" | "miniseries" | "mini series" | "limited" => Some(Format::LimitedSeries),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Format::FeatureFilm => "Feature Film",
      Format::Series => "Series",
      Format::LimitedSeries => "Limited Series",
    }
  }

  pub fn is_episodic(&self) -> bool {
    matches!(self, Format::Series | Format::LimitedSeries)
  }
}

impl fmt::Display for Format {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Production budget band, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
  Micro,
  Low,
  Medium,
  High,
  #[serde(alias = "tentpole")]
  Blockbuster,
}

impl BudgetTier {
  pub const ALL: [BudgetTier; 5] =
    [BudgetTier::Micro, BudgetTier::Low, BudgetTier::Medium, BudgetTier::High, BudgetTier::Blockbuster];

  /// Lenient parse of user-supplied budget text
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_lowercase().as_str() {
      "micro" | "micro budget" | "micro-budget" => Some(BudgetTier::Micro),
      "low" | "low budget" | "indie" => Some(BudgetTier::Low),
      "medium" | "mid" | "mid budget" | "mid-budget" => Some(BudgetTier::Medium),
      "high" | "high budget" | "studio" => Some(BudgetTier::High),
      "blockbuster" | "tentpole" => Some(BudgetTier::Blockbuster),
      _ => None,
    }
  }

  /// Position on the budget ladder, micro = 0
  pub fn rank(&self) -> u8 {
    *self as u8
  }

  /// Number of ladder steps between two tiers
  pub fn distance(&self, other: &BudgetTier) -> u8 {
    self.rank().abs_diff(other.rank())
  }

  pub fn label(&self) -> &'static str {
    match self {
      BudgetTier::Micro => "micro",
      BudgetTier::Low => "low",
      BudgetTier::Medium => "medium",
      BudgetTier::High => "high",
      BudgetTier::Blockbuster => "blockbuster",
    }
  }
}

impl fmt::Display for BudgetTier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Normalize a genre name to the vocabulary used by the corpus
pub fn normalize_genre(genre: &str) -> String {
  let lowered = genre.trim().to_lowercase();
  match lowered.as_str() {
    "science fiction" | "scifi" | "sci fi" | "sf" => "sci-fi".to_string(),
    "rom-com" | "romcom" | "romantic comedy" => "romance".to_string(),
    "suspense" => "thriller".to_string(),
    "animated" => "animation".to_string(),
    "doc" | "documentaries" => "documentary".to_string(),
    _ => lowered,
  }
}

/// One analysis request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConceptInput {
  pub logline: String,
  pub genre: String,
  pub format: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub secondary_genre: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tone: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_audience: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub budget_tier: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub synopsis: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_supplied_comparable: Option<String>,
}

/// Treat blank optional text as absent
fn non_blank(value: Option<&String>) -> Option<&str> {
  value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ConceptInput {
  pub fn new(logline: impl Into<String>, genre: impl Into<String>, format: impl Into<String>) -> Self {
    Self { logline: logline.into(), genre: genre.into(), format: format.into(), ..Default::default() }
  }

  pub fn with_secondary_genre(mut self, genre: impl Into<String>) -> Self {
    self.secondary_genre = Some(genre.into());
    self
  }

  pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
    self.tone = Some(tone.into());
    self
  }

  pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
    self.target_audience = Some(audience.into());
    self
  }

  pub fn with_budget_tier(mut self, tier: impl Into<String>) -> Self {
    self.budget_tier = Some(tier.into());
    self
  }

  pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
    self.synopsis = Some(synopsis.into());
    self
  }

  pub fn with_comparable(mut self, comparable: impl Into<String>) -> Self {
    self.user_supplied_comparable = Some(comparable.into());
    self
  }

  /// Build a concept from flat key/value pairs (camelCase or snake_case keys).
  /// Unknown keys are ignored.
  pub fn from_pairs<'a, I>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (&'a str, &'a str)>,
  {
    let mut concept = ConceptInput::default();
    for (key, value) in pairs {
      let value = value.to_string();
      match key.trim() {
        "logline" => concept.logline = value,
        "genre" => concept.genre = value,
        "format" => concept.format = value,
        "secondaryGenre" | "secondary_genre" => concept.secondary_genre = Some(value),
        "tone" => concept.tone = Some(value),
        "targetAudience" | "target_audience" => concept.target_audience = Some(value),
        "budgetTier" | "budget_tier" => concept.budget_tier = Some(value),
        "synopsis" => concept.synopsis = Some(value),
        "userSuppliedComparable" | "user_supplied_comparable" => {
          concept.user_supplied_comparable = Some(value)
        }
        _ => {}
      }
    }
    concept
  }

  pub fn parsed_format(&self) -> Option<Format> {
    Format::parse(&self.format)
  }

  pub fn parsed_budget_tier(&self) -> Option<BudgetTier> {
    non_blank(self.budget_tier.as_ref()).and_then(BudgetTier::parse)
  }

  pub fn primary_genre(&self) -> Option<String> {
    let genre = normalize_genre(&self.genre);
    (!genre.is_empty()).then_some(genre)
  }

  pub fn secondary_genre(&self) -> Option<String> {
    non_blank(self.secondary_genre.as_ref()).map(normalize_genre)
  }

  /// Normalized primary then secondary genre, without duplicates
  pub fn genres(&self) -> Vec<String> {
    let mut genres = Vec::new();
    for genre in [self.primary_genre(), self.secondary_genre()].into_iter().flatten() {
      if !genres.contains(&genre) {
        genres.push(genre);
      }
    }
    genres
  }

  /// User-declared tones split on commas, slashes and "and"
  pub fn tone_hints(&self) -> Vec<String> {
    let Some(tone) = non_blank(self.tone.as_ref()) else {
      return Vec::new();
    };

    let tone = tone.to_lowercase();
    tone
      .split([',', '/', '&', '+'])
      .flat_map(|part| part.split(" and "))
      .map(|part| part.trim().to_string())
      .filter(|part| !part.is_empty())
      .collect()
  }

  /// Audience segment named by the target audience text, if recognizable
  pub fn audience_segment(&self) -> Option<String> {
    let audience = non_blank(self.target_audience.as_ref())?;
    let signal = TextSignal::new(audience);
    AUDIENCE_SEGMENTS
      .iter()
      .find(|(_, keywords)| signal.contains_any(keywords))
      .map(|(segment, _)| segment.to_string())
  }

  pub fn comparable_text(&self) -> Option<&str> {
    non_blank(self.user_supplied_comparable.as_ref())
  }

  /// All free text the extractor reads: logline then synopsis
  pub fn analysis_text(&self) -> String {
    match non_blank(self.synopsis.as_ref()) {
      Some(synopsis) => format!("{} {}", self.logline.trim(), synopsis),
      None => self.logline.trim().to_string(),
    }
  }
}
