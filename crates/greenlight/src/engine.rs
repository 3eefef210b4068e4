//! Pipeline orchestration
//!
//! An [`Engine`] owns the reference data and configuration, loaded once, and
//! turns each [`ConceptInput`] into a [`Report`]. It holds no mutable state,
//! so a single engine can serve any number of threads.

use std::path::Path;

use crate::affinity::{AffinityContext, AffinityKind, CriteriaMatcher, ProfileDatabases};
use crate::analogy::{parse_comparable, AnalogyTable};
use crate::concept::ConceptInput;
use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::extractor::extract_concept;
use crate::forecast::{Forecaster, GenreBaselines};
use crate::layered::LayeredRescorer;
use crate::logline;
use crate::ranker;
use crate::report::Report;
use crate::similarity::{BaselineScorer, ConceptSignals};
use crate::Result;

/// Per-request switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
  /// Run the layered re-scoring pass and produce a verdict
  pub deep: bool,
  /// Override the configured number of comparables
  pub top_k: Option<usize>,
}

impl AnalysisOptions {
  pub fn deep() -> Self {
    Self { deep: true, top_k: None }
  }
}

pub struct Engine {
  corpus: Corpus,
  databases: ProfileDatabases,
  analogy_table: AnalogyTable,
  baselines: GenreBaselines,
  config: EngineConfig,
}

impl Engine {
  pub fn new(
    corpus: Corpus,
    databases: ProfileDatabases,
    analogy_table: AnalogyTable,
    baselines: GenreBaselines,
    config: EngineConfig,
  ) -> Result<Self> {
    config.validate()?;
    tracing::debug!(
      corpus_version = %corpus.version,
      entries = corpus.len(),
      distributors = databases.distributors.len(),
      talent = databases.talent.len(),
      franchise = databases.franchise.len(),
      "engine ready"
    );
    Ok(Self { corpus, databases, analogy_table, baselines, config })
  }

  /// Engine over the built-in data tables and default configuration
  pub fn embedded() -> Result<Self> {
    Self::with_config(EngineConfig::default())
  }

  /// Engine over the built-in data tables
  pub fn with_config(config: EngineConfig) -> Result<Self> {
    Self::new(
      Corpus::embedded()?,
      ProfileDatabases::embedded()?,
      AnalogyTable::embedded()?,
      GenreBaselines::embedded()?,
      config,
    )
  }

  /// Engine whose tables are read from a directory laid out like the
  /// built-in `data/` directory
  pub fn load_from_dir<P: AsRef<Path>>(dir: P, config: EngineConfig) -> Result<Self> {
    let dir = dir.as_ref();
    Self::new(
      Corpus::load_from_file(dir.join("corpus.yaml"))?,
      ProfileDatabases::load_from_dir(dir)?,
      AnalogyTable::load_from_file(dir.join("analogy_titles.yaml"))?,
      GenreBaselines::load_from_file(dir.join("genre_baselines.yaml"))?,
      config,
    )
  }

  pub fn corpus(&self) -> &Corpus {
    &self.corpus
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  /// Baseline analysis
  pub fn analyze(&self, concept: &ConceptInput) -> Report {
    self.analyze_with(concept, &AnalysisOptions::default())
  }

  pub fn analyze_with(&self, concept: &ConceptInput, options: &AnalysisOptions) -> Report {
    let profile = extract_concept(concept);
    tracing::debug!(recognized = profile.recognized_count(), "extracted feature profile");

    let analogy = concept.comparable_text().and_then(parse_comparable);
    let inferred = analogy
      .as_ref()
      .map(|parsed| self.analogy_table.inferred_elements(parsed, &self.corpus))
      .unwrap_or_default();
    if let Some(parsed) = &analogy {
      tracing::debug!(
        analogy_format = parsed.format.label(),
        titles = parsed.titles.len(),
        inferred = inferred.len(),
        "parsed analogy"
      );
    }

    let signals = ConceptSignals::from_concept(concept, analogy.as_ref(), inferred);
    let top_k = options.top_k.unwrap_or(self.config.top_k).max(1);

    let scorer = BaselineScorer {
      profile: &profile,
      signals: &signals,
      weights: &self.config.baseline_weights,
      low_score_threshold: self.config.low_score_threshold,
    };
    let comparables = ranker::top_matches(&self.corpus, &scorer, self.config.baseline_threshold, top_k);

    let forecaster = Forecaster::new(&self.baselines, &self.config.forecast);
    let forecast = forecaster.forecast(&comparables, signals.budget_tier, signals.primary_genre());

    let context = AffinityContext::new(concept, &signals, &profile);
    let affinity = |kind: AffinityKind| {
      CriteriaMatcher::new(kind, &self.config.affinity).score(&context, self.databases.get(kind))
    };
    let distribution_partners = affinity(AffinityKind::Distribution);
    let talent = affinity(AffinityKind::Talent);
    let franchise = affinity(AffinityKind::Franchise);

    let logline = logline::evaluate(concept, &profile);

    let deep = options.deep.then(|| {
      let config = EngineConfig { top_k, ..self.config.clone() };
      let rescorer = LayeredRescorer { corpus: &self.corpus, baselines: &self.baselines, config: &config };
      rescorer.analyze(concept, &profile, &signals, &logline)
    });

    Report {
      concept: concept.clone(),
      corpus_version: self.corpus.version.clone(),
      profile,
      analogy,
      comparables,
      forecast,
      distribution_partners,
      talent,
      franchise,
      logline,
      deep,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn engine() -> Engine {
    Engine::embedded().unwrap()
  }

  fn detective() -> ConceptInput {
    ConceptInput::new(
      "A disgraced detective investigates a string of occult murders in a small town before the killer strikes again",
      "horror",
      "Feature Film",
    )
    .with_secondary_genre("thriller")
    .with_tone("dark, atmospheric")
    .with_budget_tier("low")
    .with_comparable("True Detective meets Hereditary")
  }

  #[test]
  fn test_engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
  }

  #[test]
  fn test_embedded_engine_loads() {
    let engine = engine();
    assert!(engine.corpus().len() >= 40);
    assert_eq!(engine.config(), &EngineConfig::default());
  }

  #[test]
  fn test_invalid_config_is_rejected() {
    let config = EngineConfig { top_k: 0, ..EngineConfig::default() };
    assert!(Engine::with_config(config).is_err());
  }

  #[test]
  fn test_analyze_detective_pitch() {
    let report = engine().analyze(&detective());

    assert_eq!(report.profile.protagonist_type.as_str(), "detective");
    assert!(!report.comparables.is_empty());
    assert!(report.comparables.len() <= 5);
    assert!(report.comparables.iter().all(|m| m.overall > 25));
    let analogy = report.analogy.as_ref().unwrap();
    assert_eq!(analogy.title1(), Some("True Detective"));
    assert_eq!(analogy.title2(), Some("Hereditary"));
    assert!(report.deep.is_none());
  }

  #[test]
  fn test_top_k_override() {
    let options = AnalysisOptions { deep: false, top_k: Some(2) };
    let report = engine().analyze_with(&detective(), &options);
    assert!(report.comparables.len() <= 2);
  }

  #[test]
  fn test_deep_option_adds_verdict() {
    let report = engine().analyze_with(&detective(), &AnalysisOptions::deep());
    let deep = report.deep.unwrap();
    assert!((35..=98).contains(&deep.overall));
    assert!(deep.precision_matches.iter().all(|m| m.overall > 30));
  }

  #[test]
  fn test_empty_concept_still_reports() {
    let report = engine().analyze_with(&ConceptInput::default(), &AnalysisOptions::deep());
    assert!(report.analogy.is_none());
    assert!(report.forecast.domestic.low <= report.forecast.domestic.high);
    assert!(report.scores().iter().all(|s| *s <= 100));
  }

  #[test]
  fn test_repeated_analysis_is_identical() {
    let engine = engine();
    let first = engine.analyze_with(&detective(), &AnalysisOptions::deep());
    let second = engine.analyze_with(&detective(), &AnalysisOptions::deep());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
  }
}
