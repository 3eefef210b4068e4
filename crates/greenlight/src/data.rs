//! Embedded reference tables and YAML loading helpers

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::{GreenlightError, Result};

pub const CORPUS_YAML: &str = include_str!("../data/corpus.yaml");
pub const DISTRIBUTORS_YAML: &str = include_str!("../data/distributors.yaml");
pub const TALENT_YAML: &str = include_str!("../data/talent.yaml");
pub const FRANCHISE_YAML: &str = include_str!("../data/franchise.yaml");
pub const GENRE_BASELINES_YAML: &str = include_str!("../data/genre_baselines.yaml");
pub const ANALOGY_TITLES_YAML: &str = include_str!("../data/analogy_titles.yaml");

/// Parse a named YAML table
pub fn parse_yaml<T: DeserializeOwned>(table: &str, content: &str) -> Result<T> {
  serde_yaml::from_str(content)
    .map_err(|source| GreenlightError::Yaml { table: table.to_string(), source })
}

/// Read and parse a YAML table from disk; the file name labels errors
pub fn load_yaml_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
  let path = path.as_ref();
  let content = std::fs::read_to_string(path)?;
  parse_yaml(&path.display().to_string(), &content)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::BTreeMap;

  #[test]
  fn test_parse_yaml_reports_table_name() {
    let result: Result<BTreeMap<String, u32>> = parse_yaml("scores", "a: [not a number");
    match result {
      Err(GreenlightError::Yaml { table, .. }) => assert_eq!(table, "scores"),
      other => panic!("expected yaml error, got {other:?}"),
    }
  }

  #[test]
  fn test_load_yaml_file_missing_is_io_error() {
    let result: Result<BTreeMap<String, u32>> = load_yaml_file("does/not/exist.yaml");
    assert!(matches!(result, Err(GreenlightError::Io(_))));
  }

  #[test]
  fn test_load_yaml_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("table.yaml");
    std::fs::write(&path, "alpha: 1\nbeta: 2\n").unwrap();

    let table: BTreeMap<String, u32> = load_yaml_file(&path).unwrap();
    assert_eq!(table.get("beta"), Some(&2));
  }
}
