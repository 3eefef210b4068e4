//! Greenlight - Creative Concept Evaluation Engine
//!
//! Turns a short pitch (logline, genre, format and optional context) into a
//! structured evaluation report: the closest comparables from a curated
//! reference corpus, a variance-aware box office forecast, ranked partner,
//! talent and franchise affinities, a logline quality breakdown and, on
//! request, a deeper layered re-scoring that ends in a verdict.
//!
//! Every analysis is a pure function of the concept and the loaded reference
//! data. Loading data or configuration can fail; analysing cannot.

pub mod affinity;
pub mod analogy;
pub mod concept;
pub mod config;
pub mod corpus;
pub mod data;
pub mod display;
pub mod engine;
pub mod extractor;
pub mod forecast;
pub mod layered;
pub mod logline;
pub mod profile;
pub mod ranker;
pub mod report;
pub mod similarity;
pub mod text;
pub mod vocabulary;

pub use concept::{BudgetTier, ConceptInput, Format};
pub use config::EngineConfig;
pub use engine::{AnalysisOptions, Engine};
pub use report::Report;

use thiserror::Error;

/// Errors raised while loading reference data or configuration
#[derive(Error, Debug)]
pub enum GreenlightError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Failed to parse data table '{table}': {source}")]
  Yaml {
    table: String,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GreenlightError>;
