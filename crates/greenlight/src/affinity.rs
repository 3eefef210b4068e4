//! Partner, talent and franchise affinity scoring
//!
//! One criteria-weighted matcher serves all three lists. Each list kind has
//! its own weight table, base score and list length. A profile scores its base
//! plus a fixed increment for every criterion the concept satisfies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::concept::{BudgetTier, ConceptInput, Format};
use crate::data::{self, DISTRIBUTORS_YAML, FRANCHISE_YAML, TALENT_YAML};
use crate::profile::{NarrativeFeatureProfile, Tag};
use crate::similarity::{clamp_score, ConceptSignals};
use crate::text::{contains_ignore_case, TextSignal};
use crate::{GreenlightError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffinityKind {
  Distribution,
  Talent,
  Franchise,
}

impl AffinityKind {
  pub const ALL: [AffinityKind; 3] = [AffinityKind::Distribution, AffinityKind::Talent, AffinityKind::Franchise];

  pub fn label(&self) -> &'static str {
    match self {
      AffinityKind::Distribution => "Distribution Partners",
      AffinityKind::Talent => "Talent",
      AffinityKind::Franchise => "Franchise Potential",
    }
  }
}

impl fmt::Display for AffinityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Points per satisfied criterion for one list kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityWeights {
  pub base: u32,
  pub genre: u32,
  pub secondary_genre: u32,
  pub format: u32,
  pub tone: u32,
  pub theme: u32,
  pub budget: u32,
  pub audience: u32,
  pub protagonist: u32,
  pub setting: u32,
  pub structure: u32,
  pub priority: u32,
  /// Most matches counted for each multi-valued criterion
  pub per_criterion_cap: usize,
}

impl AffinityWeights {
  /// Partners care most about genre, format and audience
  pub fn distribution() -> Self {
    Self {
      base: 45,
      genre: 25,
      secondary_genre: 10,
      format: 15,
      tone: 5,
      theme: 6,
      budget: 5,
      audience: 10,
      protagonist: 0,
      setting: 0,
      structure: 0,
      priority: 10,
      per_criterion_cap: 2,
    }
  }

  /// Talent follows character and tone as much as genre
  pub fn talent() -> Self {
    Self {
      base: 40,
      genre: 20,
      secondary_genre: 8,
      format: 8,
      tone: 8,
      theme: 8,
      budget: 5,
      audience: 0,
      protagonist: 20,
      setting: 6,
      structure: 6,
      priority: 10,
      per_criterion_cap: 2,
    }
  }

  /// Franchise dimensions hinge on world and structure
  pub fn franchise() -> Self {
    Self {
      base: 40,
      genre: 15,
      secondary_genre: 5,
      format: 8,
      tone: 5,
      theme: 8,
      budget: 5,
      audience: 10,
      protagonist: 10,
      setting: 15,
      structure: 15,
      priority: 10,
      per_criterion_cap: 2,
    }
  }

  pub fn for_kind(kind: AffinityKind) -> Self {
    match kind {
      AffinityKind::Distribution => Self::distribution(),
      AffinityKind::Talent => Self::talent(),
      AffinityKind::Franchise => Self::franchise(),
    }
  }

  pub fn points(&self, criterion: &Criterion) -> u32 {
    match criterion {
      Criterion::Genre(_) => self.genre,
      Criterion::SecondaryGenre(_) => self.secondary_genre,
      Criterion::Format(_) => self.format,
      Criterion::Tone(_) => self.tone,
      Criterion::Theme(_) => self.theme,
      Criterion::Budget(_) => self.budget,
      Criterion::Audience(_) => self.audience,
      Criterion::Protagonist(_) => self.protagonist,
      Criterion::Setting(_) => self.setting,
      Criterion::Structure(_) => self.structure,
      Criterion::Priority(_) => self.priority,
    }
  }
}

fn default_min_score() -> u8 {
  50
}

fn default_distribution_top_n() -> usize {
  6
}

fn default_talent_top_n() -> usize {
  8
}

fn default_franchise_top_n() -> usize {
  5
}

/// Filtering and list length for the affinity lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinitySettings {
  #[serde(default = "default_min_score")]
  pub min_score: u8,
  #[serde(default = "default_distribution_top_n")]
  pub distribution_top_n: usize,
  #[serde(default = "default_talent_top_n")]
  pub talent_top_n: usize,
  #[serde(default = "default_franchise_top_n")]
  pub franchise_top_n: usize,
}

impl Default for AffinitySettings {
  fn default() -> Self {
    Self {
      min_score: default_min_score(),
      distribution_top_n: default_distribution_top_n(),
      talent_top_n: default_talent_top_n(),
      franchise_top_n: default_franchise_top_n(),
    }
  }
}

impl AffinitySettings {
  pub fn top_n(&self, kind: AffinityKind) -> usize {
    match kind {
      AffinityKind::Distribution => self.distribution_top_n,
      AffinityKind::Talent => self.talent_top_n,
      AffinityKind::Franchise => self.franchise_top_n,
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.min_score > 100 {
      return Err(GreenlightError::InvalidConfig("affinity minimum score must be at most 100".to_string()));
    }
    if AffinityKind::ALL.iter().any(|kind| self.top_n(*kind) == 0) {
      return Err(GreenlightError::InvalidConfig("affinity list lengths must be positive".to_string()));
    }
    Ok(())
  }
}

/// One partner, talent or franchise-dimension profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffinityProfile {
  pub name: String,
  pub role: String,
  pub genres: Vec<String>,
  pub formats: Vec<Format>,
  pub tones: Vec<String>,
  pub themes: Vec<String>,
  pub budget_tiers: Vec<BudgetTier>,
  pub audiences: Vec<String>,
  pub protagonist_types: Vec<String>,
  pub settings: Vec<String>,
  pub structures: Vec<String>,
  /// Free-text current needs, matched as phrases
  pub priorities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDatabase {
  pub profiles: Vec<AffinityProfile>,
}

impl ProfileDatabase {
  pub fn from_yaml_str(table: &str, content: &str) -> Result<Self> {
    data::parse_yaml(table, content)
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    data::load_yaml_file(path)
  }

  pub fn len(&self) -> usize {
    self.profiles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.profiles.is_empty()
  }
}

/// The three databases the orchestrator scores against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDatabases {
  pub distributors: ProfileDatabase,
  pub talent: ProfileDatabase,
  pub franchise: ProfileDatabase,
}

impl ProfileDatabases {
  pub fn embedded() -> Result<Self> {
    Ok(Self {
      distributors: ProfileDatabase::from_yaml_str("distributors", DISTRIBUTORS_YAML)?,
      talent: ProfileDatabase::from_yaml_str("talent", TALENT_YAML)?,
      franchise: ProfileDatabase::from_yaml_str("franchise", FRANCHISE_YAML)?,
    })
  }

  /// Load `distributors.yaml`, `talent.yaml` and `franchise.yaml` from a directory
  pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
    let dir = dir.as_ref();
    Ok(Self {
      distributors: ProfileDatabase::load_from_file(dir.join("distributors.yaml"))?,
      talent: ProfileDatabase::load_from_file(dir.join("talent.yaml"))?,
      franchise: ProfileDatabase::load_from_file(dir.join("franchise.yaml"))?,
    })
  }

  pub fn get(&self, kind: AffinityKind) -> &ProfileDatabase {
    match kind {
      AffinityKind::Distribution => &self.distributors,
      AffinityKind::Talent => &self.talent,
      AffinityKind::Franchise => &self.franchise,
    }
  }
}

/// A satisfied criterion and the value that satisfied it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "criterion", content = "value", rename_all = "snake_case")]
pub enum Criterion {
  Genre(String),
  SecondaryGenre(String),
  Format(Format),
  Tone(String),
  Theme(String),
  Budget(BudgetTier),
  Audience(String),
  Protagonist(String),
  Setting(String),
  Structure(String),
  Priority(String),
}

impl Criterion {
  /// Human-readable rationale clause
  pub fn clause(&self) -> String {
    match self {
      Criterion::Genre(genre) => format!("{genre} is a core genre"),
      Criterion::SecondaryGenre(genre) => format!("also works in {genre}"),
      Criterion::Format(format) => format!("active in {format}"),
      Criterion::Tone(tone) => format!("{tone} tone fits"),
      Criterion::Theme(theme) => format!("drawn to {theme}"),
      Criterion::Budget(tier) => format!("{tier} budgets are in range"),
      Criterion::Audience(audience) => format!("reaches {audience}"),
      Criterion::Protagonist(kind) => format!("suited to a {kind} lead"),
      Criterion::Setting(setting) => format!("{setting} setting fits"),
      Criterion::Structure(structure) => format!("{structure} structure fits"),
      Criterion::Priority(priority) => format!("current priority: {priority}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityResult {
  pub name: String,
  pub role: String,
  pub score: u8,
  pub matched: Vec<Criterion>,
  pub rationale: String,
}

/// Everything about a concept an affinity profile can match against
pub struct AffinityContext<'a> {
  pub signals: &'a ConceptSignals,
  pub profile: &'a NarrativeFeatureProfile,
  text: TextSignal,
}

impl<'a> AffinityContext<'a> {
  pub fn new(concept: &ConceptInput, signals: &'a ConceptSignals, profile: &'a NarrativeFeatureProfile) -> Self {
    let mut text = concept.analysis_text();
    for tag in signals
      .genres
      .iter()
      .chain(&profile.themes)
      .chain(&profile.emotional_tones)
      .chain(&profile.genre_markers)
    {
      text.push_str(" | ");
      text.push_str(tag);
    }
    Self { signals, profile, text: TextSignal::new(&text) }
  }

  fn tag_in(tag: &Tag, values: &[String]) -> Option<String> {
    tag.get().filter(|value| contains_ignore_case(values, value)).map(str::to_string)
  }
}

pub struct CriteriaMatcher {
  pub kind: AffinityKind,
  pub weights: AffinityWeights,
  pub min_score: u8,
  pub top_n: usize,
}

impl CriteriaMatcher {
  pub fn new(kind: AffinityKind, settings: &AffinitySettings) -> Self {
    Self {
      kind,
      weights: AffinityWeights::for_kind(kind),
      min_score: settings.min_score,
      top_n: settings.top_n(kind),
    }
  }

  /// Criteria the concept satisfies for one profile, in a fixed order
  pub fn matched_criteria(&self, context: &AffinityContext, profile: &AffinityProfile) -> Vec<Criterion> {
    let cap = self.weights.per_criterion_cap;
    let signals = context.signals;
    let mut matched = Vec::new();

    if let Some(primary) = signals.primary_genre().filter(|g| contains_ignore_case(&profile.genres, g)) {
      matched.push(Criterion::Genre(primary.to_string()));
    }
    if let Some(secondary) = signals.secondary_genre().filter(|g| contains_ignore_case(&profile.genres, g)) {
      matched.push(Criterion::SecondaryGenre(secondary.to_string()));
    }
    if let Some(format) = signals.format.filter(|f| profile.formats.contains(f)) {
      matched.push(Criterion::Format(format));
    }

    let tones = context.profile.emotional_tones.iter().filter(|t| contains_ignore_case(&profile.tones, t));
    matched.extend(tones.take(cap).map(|t| Criterion::Tone(t.clone())));

    let themes = context.profile.themes.iter().filter(|t| contains_ignore_case(&profile.themes, t));
    matched.extend(themes.take(cap).map(|t| Criterion::Theme(t.clone())));

    if let Some(tier) = signals.budget_tier.filter(|t| profile.budget_tiers.contains(t)) {
      matched.push(Criterion::Budget(tier));
    }
    if let Some(audience) = signals.audience.as_ref().filter(|a| contains_ignore_case(&profile.audiences, a)) {
      matched.push(Criterion::Audience(audience.clone()));
    }
    if let Some(kind) = AffinityContext::tag_in(&context.profile.protagonist_type, &profile.protagonist_types) {
      matched.push(Criterion::Protagonist(kind));
    }
    if let Some(setting) = AffinityContext::tag_in(&context.profile.setting, &profile.settings) {
      matched.push(Criterion::Setting(setting));
    }
    if let Some(structure) = AffinityContext::tag_in(&context.profile.structure_type, &profile.structures) {
      matched.push(Criterion::Structure(structure));
    }

    let priorities = profile.priorities.iter().filter(|p| context.text.contains(p));
    matched.extend(priorities.take(cap).map(|p| Criterion::Priority(p.clone())));

    matched
  }

  pub fn score_one(&self, context: &AffinityContext, profile: &AffinityProfile) -> AffinityResult {
    let matched = self.matched_criteria(context, profile);
    let raw = self.weights.base + matched.iter().map(|c| self.weights.points(c)).sum::<u32>();
    let score = clamp_score(raw as f64);

    let clauses: Vec<String> =
      matched.iter().filter(|c| self.weights.points(c) > 0).map(Criterion::clause).collect();
    let rationale = if clauses.is_empty() {
      format!("{} ({}): no specific overlap", profile.name, profile.role)
    } else {
      format!("{} ({}): {}", profile.name, profile.role, clauses.join("; "))
    };

    AffinityResult { name: profile.name.clone(), role: profile.role.clone(), score, matched, rationale }
  }

  /// Score every profile, keep those at or above the bar, best first
  pub fn score(&self, context: &AffinityContext, database: &ProfileDatabase) -> Vec<AffinityResult> {
    let mut results: Vec<AffinityResult> = database
      .profiles
      .iter()
      .map(|profile| self.score_one(context, profile))
      .filter(|result| result.score >= self.min_score)
      .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(self.top_n);

    tracing::debug!(kind = %self.kind, profiles = database.len(), kept = results.len(), "scored affinities");

    results
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::extractor::extract_concept;

  fn concept() -> ConceptInput {
    ConceptInput::new(
      "A grieving mother uncovers an occult ritual haunting her family home",
      "horror",
      "Feature Film",
    )
    .with_secondary_genre("drama")
    .with_budget_tier("low")
    .with_target_audience("adults")
  }

  fn run(kind: AffinityKind, database: &ProfileDatabase) -> Vec<AffinityResult> {
    let concept = concept();
    let profile = extract_concept(&concept);
    let signals = ConceptSignals::from_concept(&concept, None, Vec::new());
    let context = AffinityContext::new(&concept, &signals, &profile);
    CriteriaMatcher::new(kind, &AffinitySettings::default()).score(&context, database)
  }

  #[test]
  fn test_weight_presets_match_list_bases() {
    assert_eq!(AffinityWeights::distribution().base, 45);
    assert_eq!(AffinityWeights::talent().base, 40);
    assert_eq!(AffinityWeights::franchise().base, 40);
  }

  #[test]
  fn test_embedded_databases_load() {
    let databases = ProfileDatabases::embedded().unwrap();
    assert!(databases.distributors.len() >= 10);
    assert!(databases.talent.len() >= 10);
    assert!(databases.franchise.len() >= 6);
  }

  #[test]
  fn test_matched_criteria_are_recorded() {
    let database = ProfileDatabase {
      profiles: vec![AffinityProfile {
        name: "Night Owl".into(),
        role: "distributor".into(),
        genres: vec!["horror".into(), "drama".into()],
        formats: vec![Format::FeatureFilm],
        budget_tiers: vec![BudgetTier::Low],
        audiences: vec!["adults".into()],
        priorities: vec!["grieving".into(), "space opera".into()],
        ..Default::default()
      }],
    };

    let results = run(AffinityKind::Distribution, &database);
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(
      result.matched,
      vec![
        Criterion::Genre("horror".into()),
        Criterion::SecondaryGenre("drama".into()),
        Criterion::Format(Format::FeatureFilm),
        Criterion::Budget(BudgetTier::Low),
        Criterion::Audience("adults".into()),
        Criterion::Priority("grieving".into()),
      ]
    );
    // 45 + 25 + 10 + 15 + 5 + 10 + 10, clamped
    assert_eq!(result.score, 100);
    assert!(result.rationale.contains("current priority: grieving"));
  }

  #[test]
  fn test_profiles_below_bar_are_dropped() {
    let database = ProfileDatabase {
      profiles: vec![
        AffinityProfile { name: "Unrelated".into(), genres: vec!["western".into()], ..Default::default() },
        AffinityProfile { name: "Genre Only".into(), genres: vec!["horror".into()], ..Default::default() },
      ],
    };

    let results = run(AffinityKind::Talent, &database);
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    // talent base 40 alone misses the bar; 40 + 20 for genre clears it
    assert_eq!(names, vec!["Genre Only"]);
  }

  #[test]
  fn test_lists_respect_bar_and_length() {
    let databases = ProfileDatabases::embedded().unwrap();
    let settings = AffinitySettings::default();
    for kind in AffinityKind::ALL {
      let results = run(kind, databases.get(kind));
      assert!(results.len() <= settings.top_n(kind));
      assert!(results.iter().all(|r| r.score >= settings.min_score));
      assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }
  }

  #[test]
  fn test_settings_validation() {
    assert!(AffinitySettings::default().validate().is_ok());
    let empty = AffinitySettings { talent_top_n: 0, ..Default::default() };
    assert!(empty.validate().is_err());
  }
}
