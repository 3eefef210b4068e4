//! Similarity scoring between a concept and one comparable
//!
//! Every dimension yields an integer in [0, 100]. Categorical dimensions award
//! a full bonus on an exact tag match and a partial bonus when the tags are
//! listed as related; set-overlap dimensions award a capped per-match bonus.
//! The overall score is a weighted sum under a [`WeightProfile`].

use serde::{Deserialize, Serialize};

use crate::analogy::ParsedAnalogy;
use crate::concept::{BudgetTier, ConceptInput, Format};
use crate::corpus::ComparableEntry;
use crate::profile::{DeepFeatureProfile, NarrativeFeatureProfile, Tag};
use crate::text::{contains_ignore_case, shared};
use crate::vocabulary::are_related;
use crate::{GreenlightError, Result};

/// Score every dimension reports when the concept declares nothing to compare
pub const NEUTRAL_SCORE: u8 = 50;

/// Round and clamp a raw score into [0, 100]
pub fn clamp_score(value: f64) -> u8 {
  if value.is_nan() {
    return 0;
  }
  value.round().clamp(0.0, 100.0) as u8
}

fn capped(count: usize, cap: usize, points: u32) -> u32 {
  count.min(cap) as u32 * points
}

/// Exact, related or no bonus for a categorical pair
fn categorical_bonus(concept: &Tag, entry: &Tag, exact: u32, related: u32) -> u32 {
  match (concept.get(), entry.get()) {
    (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => exact,
    (Some(a), Some(b)) if are_related(a, b) => related,
    _ => 0,
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
  pub name: String,
  pub score: u8,
}

impl DimensionScore {
  pub fn new(name: &str, score: u32) -> Self {
    Self { name: name.to_string(), score: clamp_score(score as f64) }
  }
}

/// One scored comparable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
  pub comparable: ComparableEntry,
  pub dimensions: Vec<DimensionScore>,
  pub overall: u8,
  /// Dimension with the single highest score
  pub primary_reason: String,
  /// Dimensions scoring below the low-score threshold
  pub differentiators: Vec<String>,
  pub rationale: String,
}

impl MatchResult {
  pub fn dimension(&self, name: &str) -> Option<u8> {
    self.dimensions.iter().find(|d| d.name == name).map(|d| d.score)
  }

  fn build(
    comparable: &ComparableEntry,
    dimensions: Vec<DimensionScore>,
    weights: &impl WeightProfile,
    low_score_threshold: u8,
    highlights: Vec<String>,
  ) -> Self {
    let overall = weights.overall(&dimensions);

    // First dimension wins ties so the reason is stable across runs
    let primary_reason = dimensions
      .iter()
      .fold(None::<&DimensionScore>, |best, d| match best {
        Some(b) if b.score >= d.score => Some(b),
        _ => Some(d),
      })
      .map(|d| d.name.clone())
      .unwrap_or_default();

    let differentiators: Vec<String> =
      dimensions.iter().filter(|d| d.score < low_score_threshold).map(|d| d.name.clone()).collect();

    let rationale = rationale_text(comparable, &dimensions, &primary_reason, &differentiators, &highlights);

    Self { comparable: comparable.clone(), dimensions, overall, primary_reason, differentiators, rationale }
  }
}

fn rationale_text(
  comparable: &ComparableEntry,
  dimensions: &[DimensionScore],
  primary_reason: &str,
  differentiators: &[String],
  highlights: &[String],
) -> String {
  let primary_score = dimensions.iter().find(|d| d.name == primary_reason).map_or(0, |d| d.score);
  let mut parts = vec![format!(
    "{} matches most strongly on {} ({})",
    comparable.display_name(),
    primary_reason.replace('_', " "),
    primary_score
  )];

  parts.extend(highlights.iter().cloned());

  if !differentiators.is_empty() {
    let names: Vec<String> = differentiators.iter().map(|d| d.replace('_', " ")).collect();
    parts.push(format!("differs on {}", names.join(", ")));
  }

  parts.join("; ")
}

/// A named weight vector combining dimension scores into an overall score
pub trait WeightProfile {
  fn pairs(&self) -> Vec<(&'static str, f64)>;

  fn sum(&self) -> f64 {
    self.pairs().iter().map(|(_, weight)| weight).sum()
  }

  fn weight(&self, name: &str) -> f64 {
    self.pairs().into_iter().find(|(n, _)| *n == name).map_or(0.0, |(_, weight)| weight)
  }

  /// Weights must be non-negative and sum to 1.0
  fn validate(&self, label: &str) -> Result<()> {
    if self.pairs().iter().any(|(_, weight)| *weight < 0.0 || !weight.is_finite()) {
      return Err(GreenlightError::InvalidConfig(format!("{label} weights must be non-negative")));
    }
    let sum = self.sum();
    if (sum - 1.0).abs() > 1e-6 {
      return Err(GreenlightError::InvalidConfig(format!("{label} weights sum to {sum:.4}, expected 1.0")));
    }
    Ok(())
  }

  fn overall(&self, dimensions: &[DimensionScore]) -> u8 {
    let total: f64 = dimensions.iter().map(|d| d.score as f64 * self.weight(&d.name)).sum();
    clamp_score(total)
  }
}

fn default_genre_weight() -> f64 {
  0.25
}

fn default_narrative_weight() -> f64 {
  0.25
}

fn default_tone_weight() -> f64 {
  0.15
}

fn default_theme_weight() -> f64 {
  0.15
}

fn default_format_weight() -> f64 {
  0.10
}

fn default_market_weight() -> f64 {
  0.05
}

fn default_analogy_weight() -> f64 {
  0.05
}

/// First-pass weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineWeights {
  #[serde(default = "default_genre_weight")]
  pub genre: f64,
  #[serde(default = "default_narrative_weight")]
  pub narrative: f64,
  #[serde(default = "default_tone_weight")]
  pub tone: f64,
  #[serde(default = "default_theme_weight")]
  pub theme: f64,
  #[serde(default = "default_format_weight")]
  pub format: f64,
  #[serde(default = "default_market_weight")]
  pub market: f64,
  #[serde(default = "default_analogy_weight")]
  pub analogy: f64,
}

impl Default for BaselineWeights {
  fn default() -> Self {
    Self {
      genre: default_genre_weight(),
      narrative: default_narrative_weight(),
      tone: default_tone_weight(),
      theme: default_theme_weight(),
      format: default_format_weight(),
      market: default_market_weight(),
      analogy: default_analogy_weight(),
    }
  }
}

impl WeightProfile for BaselineWeights {
  fn pairs(&self) -> Vec<(&'static str, f64)> {
    vec![
      ("genre", self.genre),
      ("narrative", self.narrative),
      ("tone", self.tone),
      ("theme", self.theme),
      ("format", self.format),
      ("market", self.market),
      ("analogy", self.analogy),
    ]
  }
}

fn default_narrative_dna_weight() -> f64 {
  0.35
}

fn default_precision_tone_weight() -> f64 {
  0.25
}

fn default_precision_market_weight() -> f64 {
  0.25
}

fn default_audience_weight() -> f64 {
  0.15
}

/// Layered-pass weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionWeights {
  #[serde(default = "default_narrative_dna_weight")]
  pub narrative_dna: f64,
  #[serde(default = "default_precision_tone_weight")]
  pub tone: f64,
  #[serde(default = "default_precision_market_weight")]
  pub market: f64,
  #[serde(default = "default_audience_weight")]
  pub audience: f64,
}

impl Default for PrecisionWeights {
  fn default() -> Self {
    Self {
      narrative_dna: default_narrative_dna_weight(),
      tone: default_precision_tone_weight(),
      market: default_precision_market_weight(),
      audience: default_audience_weight(),
    }
  }
}

impl WeightProfile for PrecisionWeights {
  fn pairs(&self) -> Vec<(&'static str, f64)> {
    vec![
      ("narrative_dna", self.narrative_dna),
      ("tone", self.tone),
      ("market", self.market),
      ("audience", self.audience),
    ]
  }
}

/// Declared (non-extracted) facts about a concept used by the scorers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConceptSignals {
  /// Normalized genres, primary first
  pub genres: Vec<String>,
  pub format: Option<Format>,
  pub budget_tier: Option<BudgetTier>,
  pub audience: Option<String>,
  pub analogy_titles: Vec<String>,
  pub inferred_elements: Vec<String>,
}

impl ConceptSignals {
  pub fn from_concept(concept: &ConceptInput, analogy: Option<&ParsedAnalogy>, inferred_elements: Vec<String>) -> Self {
    Self {
      genres: concept.genres(),
      format: concept.parsed_format(),
      budget_tier: concept.parsed_budget_tier(),
      audience: concept.audience_segment(),
      analogy_titles: analogy.map(|a| a.titles.clone()).unwrap_or_default(),
      inferred_elements,
    }
  }

  pub fn primary_genre(&self) -> Option<&str> {
    self.genres.first().map(String::as_str)
  }

  pub fn secondary_genre(&self) -> Option<&str> {
    self.genres.get(1).map(String::as_str)
  }

  pub fn has_analogy(&self) -> bool {
    !self.analogy_titles.is_empty()
  }
}

/// Anything that scores a single comparable; shared across threads
pub trait Scorer: Sync {
  fn score(&self, entry: &ComparableEntry) -> MatchResult;
}

// -- Shared dimension rules --------------------------------------------------

/// Neutral when the concept has no tones, else 20 + 27 per shared tone (max 3)
pub fn tone_score(concept_tones: &[String], entry_tones: &[String]) -> u32 {
  if concept_tones.is_empty() {
    return NEUTRAL_SCORE as u32;
  }
  20 + capped(shared(concept_tones, entry_tones).len(), 3, 27)
}

pub fn format_score(concept: Option<Format>, entry: Format) -> u32 {
  match concept {
    None => NEUTRAL_SCORE as u32,
    Some(format) if format == entry => 100,
    Some(format) if format.is_episodic() && entry.is_episodic() => 70,
    Some(_) => 25,
  }
}

pub fn market_score(concept: Option<BudgetTier>, entry: Option<BudgetTier>) -> u32 {
  match (concept, entry) {
    (Some(a), Some(b)) => match a.distance(&b) {
      0 => 100,
      1 => 70,
      2 => 40,
      3 => 20,
      _ => 10,
    },
    _ => NEUTRAL_SCORE as u32,
  }
}

// -- Baseline ----------------------------------------------------------------

/// First-pass scorer over the surface feature profile
pub struct BaselineScorer<'a> {
  pub profile: &'a NarrativeFeatureProfile,
  pub signals: &'a ConceptSignals,
  pub weights: &'a BaselineWeights,
  pub low_score_threshold: u8,
}

impl BaselineScorer<'_> {
  pub fn genre(&self, entry: &ComparableEntry) -> u32 {
    let mut score = 20;
    if let Some(primary) = self.signals.primary_genre() {
      if entry.primary_genre().is_some_and(|g| g.eq_ignore_ascii_case(primary)) {
        score += 50;
      } else if contains_ignore_case(&entry.genres, primary) {
        score += 35;
      }
    }
    if let Some(secondary) = self.signals.secondary_genre() {
      if contains_ignore_case(&entry.genres, secondary) {
        score += 15;
      }
    }
    score + capped(shared(&self.profile.genre_markers, &entry.genre_markers).len(), 3, 10)
  }

  pub fn narrative(&self, entry: &ComparableEntry) -> u32 {
    let p = self.profile;
    10 + categorical_bonus(&p.protagonist_type, &entry.protagonist_type, 15, 7)
      + categorical_bonus(&p.central_conflict, &entry.central_conflict, 20, 10)
      + categorical_bonus(&p.setting, &entry.setting, 10, 5)
      + categorical_bonus(&p.narrative_archetype, &entry.narrative_archetype, 20, 10)
      + categorical_bonus(&p.stakes_level, &entry.stakes_level, 10, 5)
      + categorical_bonus(&p.structure_type, &entry.structure_type, 5, 2)
      + capped(shared(&p.story_beats, &entry.story_beats).len(), 2, 5)
  }

  pub fn theme(&self, entry: &ComparableEntry) -> u32 {
    15 + capped(shared(&self.profile.themes, &entry.themes).len(), 3, 28)
  }

  pub fn analogy(&self, entry: &ComparableEntry) -> u32 {
    if !self.signals.has_analogy() {
      return NEUTRAL_SCORE as u32;
    }
    if contains_ignore_case(&self.signals.analogy_titles, &entry.title) {
      return 100;
    }
    10 + capped(shared(&self.signals.inferred_elements, &entry.descriptive_tags()).len(), 4, 20)
  }

  fn highlights(&self, entry: &ComparableEntry) -> Vec<String> {
    let mut highlights = Vec::new();
    let themes = shared(&self.profile.themes, &entry.themes);
    if !themes.is_empty() {
      highlights.push(format!("shared themes: {}", themes.join(", ")));
    }
    let tones = shared(&self.profile.emotional_tones, &entry.tones);
    if !tones.is_empty() {
      highlights.push(format!("shared tone: {}", tones.join(", ")));
    }
    highlights
  }
}

impl Scorer for BaselineScorer<'_> {
  fn score(&self, entry: &ComparableEntry) -> MatchResult {
    let dimensions = vec![
      DimensionScore::new("genre", self.genre(entry)),
      DimensionScore::new("narrative", self.narrative(entry)),
      DimensionScore::new("tone", tone_score(&self.profile.emotional_tones, &entry.tones)),
      DimensionScore::new("theme", self.theme(entry)),
      DimensionScore::new("format", format_score(self.signals.format, entry.format)),
      DimensionScore::new("market", market_score(self.signals.budget_tier, entry.budget_tier)),
      DimensionScore::new("analogy", self.analogy(entry)),
    ];
    MatchResult::build(entry, dimensions, self.weights, self.low_score_threshold, self.highlights(entry))
  }
}

// -- Precision ---------------------------------------------------------------

/// Layered-pass scorer over the deep feature profile
pub struct PrecisionScorer<'a> {
  pub profile: &'a NarrativeFeatureProfile,
  pub deep: &'a DeepFeatureProfile,
  pub signals: &'a ConceptSignals,
  pub weights: &'a PrecisionWeights,
  pub low_score_threshold: u8,
}

impl PrecisionScorer<'_> {
  pub fn narrative_dna(&self, entry: &ComparableEntry) -> u32 {
    let deep = self.deep;
    10 + categorical_bonus(&deep.archetype, &entry.deep.archetype, 25, 12)
      + categorical_bonus(&deep.wound, &entry.deep.wound, 15, 7)
      + categorical_bonus(&deep.conflict_type, &entry.deep.conflict_type, 20, 10)
      + capped(shared(&deep.universal_truths, &entry.deep.universal_truths).len(), 2, 10)
      + capped(shared(&self.profile.themes, &entry.themes).len(), 3, 5)
  }

  pub fn market(&self, entry: &ComparableEntry) -> u32 {
    let mut score = 10;

    if let Some(primary) = self.signals.primary_genre() {
      if entry.primary_genre().is_some_and(|g| g.eq_ignore_ascii_case(primary)) {
        score += 40;
      } else if contains_ignore_case(&entry.genres, primary) {
        score += 25;
      }
    }

    score += match self.signals.format {
      Some(format) if format == entry.format => 25,
      Some(format) if format.is_episodic() && entry.format.is_episodic() => 15,
      _ => 0,
    };

    score += match (self.signals.budget_tier, entry.budget_tier) {
      (Some(a), Some(b)) => match a.distance(&b) {
        0 => 25,
        1 => 18,
        2 => 10,
        3 => 5,
        _ => 0,
      },
      _ => 12,
    };

    score
  }

  pub fn audience(&self, entry: &ComparableEntry) -> u32 {
    let flags = capped(shared(&self.deep.cultural_flags, &entry.deep.cultural_flags).len(), 2, 8);
    let base = match &self.signals.audience {
      None => NEUTRAL_SCORE as u32,
      Some(audience) if contains_ignore_case(&entry.audiences, audience) => 85,
      Some(audience) if entry.audiences.iter().any(|a| are_related(a, audience)) => 60,
      Some(_) => 25,
    };
    base + flags
  }

  fn highlights(&self, entry: &ComparableEntry) -> Vec<String> {
    let mut highlights = Vec::new();
    if self.deep.archetype.matches(&entry.deep.archetype) {
      highlights.push(format!("same arc: {}", entry.deep.archetype));
    }
    let truths = shared(&self.deep.universal_truths, &entry.deep.universal_truths);
    if !truths.is_empty() {
      highlights.push(format!("shared truth: {}", truths.join(", ")));
    }
    highlights
  }
}

impl Scorer for PrecisionScorer<'_> {
  fn score(&self, entry: &ComparableEntry) -> MatchResult {
    let dimensions = vec![
      DimensionScore::new("narrative_dna", self.narrative_dna(entry)),
      DimensionScore::new("tone", tone_score(&self.profile.emotional_tones, &entry.tones)),
      DimensionScore::new("market", self.market(entry)),
      DimensionScore::new("audience", self.audience(entry)),
    ];
    MatchResult::build(entry, dimensions, self.weights, self.low_score_threshold, self.highlights(entry))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::corpus::{DeepTags, Outcome};

  fn entry() -> ComparableEntry {
    ComparableEntry {
      title: "Night Shift".into(),
      year: 2020,
      distributor: "Test Pictures".into(),
      format: Format::FeatureFilm,
      genres: vec!["horror".into(), "thriller".into()],
      budget_tier: Some(BudgetTier::Low),
      audiences: vec!["adults".into()],
      protagonist_type: Tag::known("detective"),
      central_conflict: Tag::known("discovery"),
      setting: Tag::known("small town"),
      narrative_archetype: Tag::known("Overcoming the Monster"),
      stakes_level: Tag::known("societal"),
      structure_type: Tag::known("countdown"),
      themes: vec!["mortality".into(), "faith".into(), "family".into()],
      genre_markers: vec!["horror".into(), "crime".into(), "mystery".into()],
      story_beats: vec!["inciting incident".into(), "climax".into()],
      tones: vec!["dark".into(), "suspenseful".into()],
      deep: DeepTags {
        archetype: Tag::known("Redemption Arc"),
        wound: Tag::known("guilt"),
        conflict_type: Tag::known("Person vs Supernatural"),
        universal_truths: vec!["The past cannot be outrun".into()],
        cultural_flags: vec!["true crime appetite".into()],
      },
      outcome: Outcome::default(),
    }
  }

  fn profile() -> NarrativeFeatureProfile {
    NarrativeFeatureProfile {
      protagonist_type: Tag::known("detective"),
      central_conflict: Tag::known("discovery"),
      setting: Tag::known("small town"),
      narrative_archetype: Tag::known("Overcoming the Monster"),
      stakes_level: Tag::known("societal"),
      structure_type: Tag::known("countdown"),
      themes: vec!["mortality".into(), "faith".into(), "redemption".into()],
      genre_markers: vec!["crime".into(), "horror".into(), "thriller".into(), "mystery".into()],
      story_beats: vec!["climax".into()],
      emotional_tones: vec!["dark".into(), "suspenseful".into()],
      emotional_intensity: 0.25,
    }
  }

  fn signals() -> ConceptSignals {
    ConceptSignals {
      genres: vec!["horror".into(), "thriller".into()],
      format: Some(Format::FeatureFilm),
      budget_tier: Some(BudgetTier::Low),
      ..Default::default()
    }
  }

  #[test]
  fn test_default_weights_validate() {
    assert!(BaselineWeights::default().validate("baseline").is_ok());
    assert!(PrecisionWeights::default().validate("precision").is_ok());
  }

  #[test]
  fn test_weights_must_sum_to_one() {
    let weights = BaselineWeights { genre: 0.5, ..Default::default() };
    assert!(matches!(weights.validate("baseline"), Err(GreenlightError::InvalidConfig(_))));

    let negative = PrecisionWeights { narrative_dna: 0.7, tone: -0.1, market: 0.25, audience: 0.15 };
    assert!(negative.validate("precision").is_err());
  }

  #[test]
  fn test_baseline_strong_match() {
    let (profile, signals, weights) = (profile(), signals(), BaselineWeights::default());
    let scorer = BaselineScorer { profile: &profile, signals: &signals, weights: &weights, low_score_threshold: 40 };
    let result = scorer.score(&entry());

    // 20 + 50 primary + 15 secondary + 3 markers capped at 30
    assert_eq!(result.dimension("genre"), Some(100));
    // 10 + 80 categorical + 5 for one shared beat
    assert_eq!(result.dimension("narrative"), Some(95));
    assert_eq!(result.dimension("tone"), Some(74));
    assert_eq!(result.dimension("theme"), Some(71));
    assert_eq!(result.dimension("format"), Some(100));
    assert_eq!(result.dimension("market"), Some(100));
    assert_eq!(result.dimension("analogy"), Some(50));
    assert_eq!(result.primary_reason, "genre");
    assert!(result.differentiators.is_empty());
    assert!(result.overall >= 85);
  }

  #[test]
  fn test_baseline_unset_profile_stays_in_bounds() {
    let profile = NarrativeFeatureProfile::unset();
    let signals = ConceptSignals::default();
    let weights = BaselineWeights::default();
    let scorer = BaselineScorer { profile: &profile, signals: &signals, weights: &weights, low_score_threshold: 40 };
    let result = scorer.score(&entry());

    assert_eq!(result.dimension("genre"), Some(20));
    assert_eq!(result.dimension("narrative"), Some(10));
    assert_eq!(result.dimension("tone"), Some(NEUTRAL_SCORE));
    assert_eq!(result.dimension("format"), Some(NEUTRAL_SCORE));
    assert!(result.overall <= 100);
    assert!(result.differentiators.contains(&"genre".to_string()));
    assert!(result.differentiators.contains(&"narrative".to_string()));
  }

  #[test]
  fn test_related_categories_earn_partial_bonus() {
    let mut profile = NarrativeFeatureProfile::unset();
    profile.setting = Tag::known("suburbs");
    let signals = ConceptSignals::default();
    let weights = BaselineWeights::default();
    let scorer = BaselineScorer { profile: &profile, signals: &signals, weights: &weights, low_score_threshold: 40 };

    // suburbs is related to small town
    assert_eq!(scorer.narrative(&entry()), 15);
  }

  #[test]
  fn test_analogy_dimension() {
    let profile = profile();
    let weights = BaselineWeights::default();

    let by_title = ConceptSignals { analogy_titles: vec!["night shift".into()], ..signals() };
    let scorer = BaselineScorer { profile: &profile, signals: &by_title, weights: &weights, low_score_threshold: 40 };
    assert_eq!(scorer.analogy(&entry()), 100);

    let by_tags = ConceptSignals {
      analogy_titles: vec!["Jaws".into()],
      inferred_elements: vec!["horror".into(), "suspenseful".into(), "romance".into()],
      ..signals()
    };
    let scorer = BaselineScorer { profile: &profile, signals: &by_tags, weights: &weights, low_score_threshold: 40 };
    assert_eq!(scorer.analogy(&entry()), 50);
  }

  #[test]
  fn test_format_and_market_rules() {
    assert_eq!(format_score(Some(Format::Series), Format::LimitedSeries), 70);
    assert_eq!(format_score(Some(Format::Series), Format::FeatureFilm), 25);
    assert_eq!(market_score(Some(BudgetTier::Micro), Some(BudgetTier::Blockbuster)), 10);
    assert_eq!(market_score(Some(BudgetTier::Micro), Some(BudgetTier::Low)), 70);
    assert_eq!(market_score(None, Some(BudgetTier::Low)), 50);
  }

  #[test]
  fn test_tone_score_caps_at_100() {
    let tones: Vec<String> = ["dark", "gritty", "suspenseful", "epic"].iter().map(|s| s.to_string()).collect();
    assert_eq!(clamp_score(tone_score(&tones, &tones) as f64), 100);
  }

  #[test]
  fn test_precision_scores() {
    let profile = profile();
    let deep = DeepFeatureProfile {
      archetype: Tag::known("Redemption Arc"),
      wound: Tag::known("loss"),
      conflict_type: Tag::known("Person vs Supernatural"),
      universal_truths: vec!["The past cannot be outrun".into()],
      cultural_flags: vec!["true crime appetite".into()],
      empathy_traits: vec![],
    };
    let signals = ConceptSignals { audience: Some("young adults".into()), ..signals() };
    let weights = PrecisionWeights::default();
    let scorer = PrecisionScorer {
      profile: &profile,
      deep: &deep,
      signals: &signals,
      weights: &weights,
      low_score_threshold: 40,
    };

    // 10 + 25 archetype + 7 related wound + 20 conflict + 10 truth + 10 themes
    assert_eq!(scorer.narrative_dna(&entry()), 82);
    assert_eq!(scorer.market(&entry()), 100);
    // young adults is related to adults, plus one shared flag
    assert_eq!(scorer.audience(&entry()), 68);

    let result = scorer.score(&entry());
    assert_eq!(result.dimensions.len(), 4);
    assert!(result.rationale.contains("same arc: Redemption Arc"));
  }

  #[test]
  fn test_clamp_score() {
    assert_eq!(clamp_score(-4.0), 0);
    assert_eq!(clamp_score(150.0), 100);
    assert_eq!(clamp_score(49.5), 50);
    assert_eq!(clamp_score(f64::NAN), 0);
  }
}
