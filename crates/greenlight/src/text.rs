//! Text normalization and keyword matching shared by every extractor.

/// Suffixes a text token may carry and still match a keyword
const SHORT_INFLECTIONS: &[&str] = &["s", "es"];
const LONG_INFLECTIONS: &[&str] = &["s", "es", "ed", "ing", "er", "ers"];
/// Suffixes for longer keywords ending in a silent "e" ("survive" -> "survived")
const SILENT_E_INFLECTIONS: &[&str] = &["d", "r", "rs", "s"];

/// Split text into lowercase alphanumeric tokens, dropping apostrophes
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .to_lowercase()
    .replace(['\'', '’'], "")
    .split(|c: char| !c.is_alphanumeric())
    .filter(|token| !token.is_empty())
    .map(str::to_string)
    .collect()
}

/// Whether a single text token matches a single keyword token
pub fn token_matches(token: &str, keyword: &str) -> bool {
  if token == keyword {
    return true;
  }

  let inflections = match keyword.len() {
    0..=2 => return false,
    3 => SHORT_INFLECTIONS,
    _ => LONG_INFLECTIONS,
  };

  if token.strip_prefix(keyword).is_some_and(|rest| inflections.contains(&rest)) {
    return true;
  }

  match keyword.strip_suffix('e') {
    Some(stem) if keyword.len() > 3 => match token.strip_prefix(stem) {
      Some("ing") => true,
      Some(rest) => rest.strip_prefix('e').is_some_and(|rest| SILENT_E_INFLECTIONS.contains(&rest)),
      None => false,
    },
    _ => false,
  }
}

/// Tokenized, lowercased view of a piece of free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSignal {
  tokens: Vec<String>,
}

impl TextSignal {
  pub fn new(text: &str) -> Self {
    Self { tokens: tokenize(text) }
  }

  pub fn tokens(&self) -> &[String] {
    &self.tokens
  }

  pub fn word_count(&self) -> usize {
    self.tokens.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  /// True when every token of `keyword` occurs contiguously in the text
  pub fn contains(&self, keyword: &str) -> bool {
    let needle = tokenize(keyword);
    if needle.is_empty() || needle.len() > self.tokens.len() {
      return false;
    }

    self.tokens.windows(needle.len()).any(|window| {
      window.iter().zip(&needle).all(|(token, keyword)| token_matches(token, keyword))
    })
  }

  /// First keyword from the list found in the text
  pub fn first_present<'k>(&self, keywords: &[&'k str]) -> Option<&'k str> {
    keywords.iter().copied().find(|keyword| self.contains(keyword))
  }

  pub fn contains_any(&self, keywords: &[&str]) -> bool {
    self.first_present(keywords).is_some()
  }

  /// Number of distinct keywords from the list found in the text
  pub fn count_present(&self, keywords: &[&str]) -> usize {
    keywords.iter().filter(|keyword| self.contains(keyword)).count()
  }
}

/// Case-insensitive membership test
pub fn contains_ignore_case(values: &[String], needle: &str) -> bool {
  values.iter().any(|value| value.eq_ignore_ascii_case(needle.trim()))
}

/// Push `value` unless an equal (case-insensitive) value is already present
pub fn push_unique(values: &mut Vec<String>, value: &str) {
  let trimmed = value.trim();
  if !trimmed.is_empty() && !contains_ignore_case(values, trimmed) {
    values.push(trimmed.to_string());
  }
}

/// Values of `left` also present in `right`, in `left` order, case-insensitive
pub fn shared(left: &[String], right: &[String]) -> Vec<String> {
  let mut result = Vec::new();
  for value in left {
    if contains_ignore_case(right, value) {
      push_unique(&mut result, value);
    }
  }
  result
}
