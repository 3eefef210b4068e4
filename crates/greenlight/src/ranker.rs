//! Filtering and ordering of scored comparables

use rayon::prelude::*;

use crate::corpus::Corpus;
use crate::similarity::{MatchResult, Scorer};

/// Score every corpus entry in parallel; output keeps corpus order
pub fn score_corpus<S: Scorer>(corpus: &Corpus, scorer: &S) -> Vec<MatchResult> {
  corpus.entries.par_iter().map(|entry| scorer.score(entry)).collect()
}

/// Keep matches whose overall score is strictly above `threshold`
pub fn filter_above(matches: Vec<MatchResult>, threshold: u8) -> Vec<MatchResult> {
  matches.into_iter().filter(|m| m.overall > threshold).collect()
}

/// Sort by overall score descending and keep at most `k`.
/// The sort is stable, so ties keep corpus order.
pub fn rank(mut matches: Vec<MatchResult>, k: usize) -> Vec<MatchResult> {
  matches.sort_by(|a, b| b.overall.cmp(&a.overall));
  matches.truncate(k);
  matches
}

/// Score, filter and rank in one pass
pub fn top_matches<S: Scorer>(corpus: &Corpus, scorer: &S, threshold: u8, k: usize) -> Vec<MatchResult> {
  let scored = score_corpus(corpus, scorer);
  let total = scored.len();
  let kept = filter_above(scored, threshold);

  tracing::debug!(total, above_threshold = kept.len(), threshold, "scored corpus");

  rank(kept, k)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::corpus::ComparableEntry;
  use crate::similarity::DimensionScore;

  const CORPUS: &str = r#"
version: "t"
entries:
  - { title: A, year: 2001, distributor: X, format: Feature Film }
  - { title: B, year: 2002, distributor: X, format: Feature Film }
  - { title: C, year: 2003, distributor: X, format: Series }
  - { title: D, year: 2004, distributor: X, format: Feature Film }
"#;

  /// Scores entries from a fixed title -> score table
  struct FixedScorer(Vec<(&'static str, u8)>);

  impl Scorer for FixedScorer {
    fn score(&self, entry: &ComparableEntry) -> MatchResult {
      let overall = self.0.iter().find(|(t, _)| *t == entry.title).map_or(0, |(_, s)| *s);
      MatchResult {
        comparable: entry.clone(),
        dimensions: vec![DimensionScore::new("fixed", overall as u32)],
        overall,
        primary_reason: "fixed".into(),
        differentiators: vec![],
        rationale: String::new(),
      }
    }
  }

  fn titles(matches: &[MatchResult]) -> Vec<&str> {
    matches.iter().map(|m| m.comparable.title.as_str()).collect()
  }

  #[test]
  fn test_score_corpus_preserves_order() {
    let corpus = Corpus::from_yaml_str("t", CORPUS).unwrap();
    let scorer = FixedScorer(vec![("A", 10), ("B", 90), ("C", 50), ("D", 70)]);
    assert_eq!(titles(&score_corpus(&corpus, &scorer)), vec!["A", "B", "C", "D"]);
  }

  #[test]
  fn test_filter_is_strictly_above() {
    let corpus = Corpus::from_yaml_str("t", CORPUS).unwrap();
    let scorer = FixedScorer(vec![("A", 25), ("B", 26), ("C", 24), ("D", 100)]);
    let kept = filter_above(score_corpus(&corpus, &scorer), 25);
    assert_eq!(titles(&kept), vec!["B", "D"]);
  }

  #[test]
  fn test_rank_sorts_descending_with_stable_ties() {
    let corpus = Corpus::from_yaml_str("t", CORPUS).unwrap();
    let scorer = FixedScorer(vec![("A", 60), ("B", 80), ("C", 60), ("D", 80)]);
    let ranked = rank(score_corpus(&corpus, &scorer), 3);
    assert_eq!(titles(&ranked), vec!["B", "D", "A"]);
  }

  #[test]
  fn test_top_matches_empty_when_nothing_qualifies() {
    let corpus = Corpus::from_yaml_str("t", CORPUS).unwrap();
    let scorer = FixedScorer(vec![]);
    assert!(top_matches(&corpus, &scorer, 25, 5).is_empty());
  }
}
