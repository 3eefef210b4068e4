//! User-supplied analogy parsing ("X meets Y")
//!
//! Pitches often name existing titles as a shorthand. The text is split into
//! up to three titles following a small fixed grammar, and each known title
//! seeds extra descriptive tags used by the analogy scoring dimension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::corpus::Corpus;
use crate::data::{self, ANALOGY_TITLES_YAML};
use crate::text::push_unique;
use crate::Result;

/// Most titles kept from a list-style analogy
pub const MAX_TITLES: usize = 3;

/// Which grammar rule produced a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalogyFormat {
  #[serde(rename = "X meets Y")]
  Meets,
  #[serde(rename = "X and Y")]
  And,
  #[serde(rename = "X with Y")]
  With,
  #[serde(rename = "multiple titles")]
  Multiple,
  #[serde(rename = "single title")]
  Single,
}

impl AnalogyFormat {
  pub fn label(&self) -> &'static str {
    match self {
      AnalogyFormat::Meets => "X meets Y",
      AnalogyFormat::And => "X and Y",
      AnalogyFormat::With => "X with Y",
      AnalogyFormat::Multiple => "multiple titles",
      AnalogyFormat::Single => "single title",
    }
  }
}

impl fmt::Display for AnalogyFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnalogy {
  pub titles: Vec<String>,
  pub format: AnalogyFormat,
}

impl ParsedAnalogy {
  pub fn title1(&self) -> Option<&str> {
    self.titles.first().map(String::as_str)
  }

  pub fn title2(&self) -> Option<&str> {
    self.titles.get(1).map(String::as_str)
  }
}

/// Case-insensitive split on the first occurrence of `separator`
fn split_once_ignore_case<'a>(text: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
  // ASCII folding keeps byte offsets aligned with the original text
  let index = text.to_ascii_lowercase().find(separator)?;
  Some((&text[..index], &text[index + separator.len()..]))
}

fn clean_title(title: &str) -> String {
  title.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '.').trim().to_string()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> &'a str {
  match text.get(..prefix.len()) {
    Some(head) if head.eq_ignore_ascii_case(prefix) => &text[prefix.len()..],
    _ => text,
  }
}

fn pair(left: &str, right: &str, format: AnalogyFormat) -> Option<ParsedAnalogy> {
  let titles: Vec<String> =
    [clean_title(left), clean_title(right)].into_iter().filter(|t| !t.is_empty()).collect();
  match titles.len() {
    0 => None,
    1 => Some(ParsedAnalogy { titles, format: AnalogyFormat::Single }),
    _ => Some(ParsedAnalogy { titles, format }),
  }
}

/// Parse free-text analogy. Blank input yields `None`.
///
/// Rules, first match wins:
/// 1. `" meets "` splits into two titles
/// 2. `" + "` or `" and "` splits into two titles, unless the text is a list
/// 3. `" with "` splits, dropping a leading "elements of" on the right side
/// 4. `,` or `/` splits into up to three titles
/// 5. otherwise the whole text is one title
pub fn parse_comparable(text: &str) -> Option<ParsedAnalogy> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }

  let is_list = text.contains(',') || text.contains('/');

  if let Some((left, right)) = split_once_ignore_case(text, " meets ") {
    return pair(left, right, AnalogyFormat::Meets);
  }

  if !is_list {
    let split = split_once_ignore_case(text, " + ").or_else(|| split_once_ignore_case(text, " and "));
    if let Some((left, right)) = split {
      return pair(left, right, AnalogyFormat::And);
    }
  }

  if let Some((left, right)) = split_once_ignore_case(text, " with ") {
    let right = strip_prefix_ignore_case(right.trim(), "elements of ");
    return pair(left, right, AnalogyFormat::With);
  }

  if is_list {
    let titles: Vec<String> = text
      .split([',', '/'])
      .map(|piece| clean_title(strip_prefix_ignore_case(piece.trim(), "and ")))
      .filter(|title| !title.is_empty())
      .take(MAX_TITLES)
      .collect();

    return match titles.len() {
      0 => None,
      1 => Some(ParsedAnalogy { titles, format: AnalogyFormat::Single }),
      _ => Some(ParsedAnalogy { titles, format: AnalogyFormat::Multiple }),
    };
  }

  Some(ParsedAnalogy { titles: vec![clean_title(text)], format: AnalogyFormat::Single })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyTitle {
  pub title: String,
  #[serde(default)]
  pub tags: Vec<String>,
}

/// Static title -> tags lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogyTable {
  pub titles: Vec<AnalogyTitle>,
}

impl AnalogyTable {
  pub fn embedded() -> Result<Self> {
    data::parse_yaml("analogy_titles", ANALOGY_TITLES_YAML)
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    data::load_yaml_file(path)
  }

  pub fn tags_for(&self, title: &str) -> Option<&[String]> {
    let title = title.trim();
    self
      .titles
      .iter()
      .find(|entry| entry.title.eq_ignore_ascii_case(title))
      .map(|entry| entry.tags.as_slice())
  }

  /// Tags seeded by every title in the analogy. Titles missing from the
  /// table fall back to the corpus entry of the same name; unknown titles
  /// add nothing.
  pub fn inferred_elements(&self, parsed: &ParsedAnalogy, corpus: &Corpus) -> Vec<String> {
    let mut elements = Vec::new();
    for title in &parsed.titles {
      if let Some(tags) = self.tags_for(title) {
        for tag in tags {
          push_unique(&mut elements, tag);
        }
      } else if let Some(entry) = corpus.find_by_title(title) {
        for tag in entry.themes.iter().chain(&entry.tones).chain(&entry.genre_markers) {
          push_unique(&mut elements, tag);
        }
      }
    }
    elements
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(text: &str) -> ParsedAnalogy {
    parse_comparable(text).unwrap()
  }

  #[test]
  fn test_meets() {
    let parsed = parse("Parasite meets Knives Out");
    assert_eq!(parsed.title1(), Some("Parasite"));
    assert_eq!(parsed.title2(), Some("Knives Out"));
    assert_eq!(parsed.format, AnalogyFormat::Meets);
    assert_eq!(parsed.format.label(), "X meets Y");
  }

  #[test]
  fn test_non_ascii_titles_split_cleanly() {
    let parsed = parse("İstanbul meets Jaws");
    assert_eq!(parsed.format, AnalogyFormat::Meets);
    assert_eq!(parsed.titles, vec!["İstanbul", "Jaws"]);

    let parsed = parse("Amélie AND Der Untergang");
    assert_eq!(parsed.format, AnalogyFormat::And);
    assert_eq!(parsed.titles, vec!["Amélie", "Der Untergang"]);
  }

  #[test]
  fn test_meets_wins_over_and() {
    let parsed = parse("Pride and Prejudice meets Die Hard");
    assert_eq!(parsed.format, AnalogyFormat::Meets);
    assert_eq!(parsed.titles, vec!["Pride and Prejudice", "Die Hard"]);
  }

  #[test]
  fn test_plus_and_and() {
    let plus = parse("Jaws + The Office");
    assert_eq!(plus.format, AnalogyFormat::And);
    assert_eq!(plus.titles, vec!["Jaws", "The Office"]);

    let and = parse("Fargo and Twin Peaks");
    assert_eq!(and.format, AnalogyFormat::And);
    assert_eq!(and.title2(), Some("Twin Peaks"));
  }

  #[test]
  fn test_with_strips_elements_of() {
    let parsed = parse("Alien with elements of Succession");
    assert_eq!(parsed.format, AnalogyFormat::With);
    assert_eq!(parsed.titles, vec!["Alien", "Succession"]);
  }

  #[test]
  fn test_comma_list() {
    let parsed = parse("Get Out, Hereditary, and The Witch");
    assert_eq!(parsed.format, AnalogyFormat::Multiple);
    assert_eq!(parsed.titles, vec!["Get Out", "Hereditary", "The Witch"]);
  }

  #[test]
  fn test_slash_list_keeps_three() {
    let parsed = parse("Jaws / Alien / Die Hard / Speed");
    assert_eq!(parsed.format, AnalogyFormat::Multiple);
    assert_eq!(parsed.titles.len(), MAX_TITLES);
    assert_eq!(parsed.titles[2], "Die Hard");
  }

  #[test]
  fn test_single_title() {
    let parsed = parse("  Chernobyl ");
    assert_eq!(parsed.format, AnalogyFormat::Single);
    assert_eq!(parsed.titles, vec!["Chernobyl"]);
    assert_eq!(parsed.title2(), None);
  }

  #[test]
  fn test_blank_is_none() {
    assert!(parse_comparable("").is_none());
    assert!(parse_comparable("   ").is_none());
    assert!(parse_comparable(" , / ").is_none());
  }

  #[test]
  fn test_format_serializes_to_label() {
    let json = serde_json::to_string(&AnalogyFormat::Multiple).unwrap();
    assert_eq!(json, "\"multiple titles\"");
  }

  #[test]
  fn test_inferred_elements_table_and_corpus_fallback() {
    let table = AnalogyTable {
      titles: vec![AnalogyTitle { title: "Jaws".into(), tags: vec!["horror".into(), "survival".into()] }],
    };
    let corpus = Corpus::embedded().unwrap();

    let parsed = parse("Jaws meets Chernobyl");
    let elements = table.inferred_elements(&parsed, &corpus);
    assert_eq!(&elements[..2], &["horror".to_string(), "survival".to_string()]);
    // Chernobyl comes from the corpus entry
    assert!(elements.contains(&"justice".to_string()));
  }

  #[test]
  fn test_unknown_titles_add_nothing() {
    let table = AnalogyTable::embedded().unwrap();
    let corpus = Corpus::embedded().unwrap();
    let parsed = parse("Some Film Nobody Made");
    assert!(table.inferred_elements(&parsed, &corpus).is_empty());
  }

  #[test]
  fn test_embedded_table_lookup_is_case_insensitive() {
    let table = AnalogyTable::embedded().unwrap();
    assert!(table.tags_for("parasite").is_some());
    assert!(table.tags_for("PARASITE").is_some());
  }
}
