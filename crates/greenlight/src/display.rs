//! Human-readable report rendering
//!
//! Builds the terminal view of a [`Report`] as a string so the binary can
//! print it and tests can inspect it.

use colored::*;
use std::fmt::Write;

use crate::affinity::AffinityResult;
use crate::forecast::{ConfidenceLabel, ForecastResult, Projection};
use crate::report::Report;
use crate::similarity::MatchResult;

const WIDTH: usize = 80;
const METER_WIDTH: usize = 20;

/// Word wrap a paragraph to `width` columns
pub fn wrap(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();

  for word in text.split_whitespace() {
    if !current.is_empty() && current.len() + word.len() + 1 > width {
      lines.push(std::mem::take(&mut current));
    }
    if !current.is_empty() {
      current.push(' ');
    }
    current.push_str(word);
  }

  if !current.is_empty() {
    lines.push(current);
  }
  lines
}

fn money(value: f64) -> String {
  if value >= 1000.0 {
    format!("${:.2}B", value / 1000.0)
  } else {
    format!("${value:.1}M")
  }
}

fn projection(projection: &Projection) -> String {
  format!(
    "{} / {} / {}",
    money(projection.low),
    money(projection.likely).bold(),
    money(projection.high)
  )
}

fn confidence(label: ConfidenceLabel) -> ColoredString {
  match label {
    ConfidenceLabel::High => label.label().green(),
    ConfidenceLabel::Medium => label.label().yellow(),
    ConfidenceLabel::Low => label.label().red(),
  }
}

fn score_line(out: &mut String, label: &str, score: u8) {
  let _ = writeln!(out, "  {label:<22} {}", marquee::meter(score, METER_WIDTH));
}

fn paragraph(out: &mut String, text: &str, indent: &str) {
  for line in wrap(text, WIDTH - indent.len()) {
    let _ = writeln!(out, "{indent}{}", line.dimmed());
  }
}

fn render_match(out: &mut String, rank: usize, matched: &MatchResult) {
  let _ = writeln!(
    out,
    "{:>2}. {:<40} {}",
    rank,
    matched.comparable.display_name().bold(),
    marquee::meter(matched.overall, METER_WIDTH)
  );
  let dims: Vec<String> = matched.dimensions.iter().map(|d| format!("{} {}", d.name, d.score)).collect();
  let _ = writeln!(out, "    {}", dims.join(" | "));
  paragraph(out, &matched.rationale, "    ");
}

fn render_forecast(out: &mut String, forecast: &ForecastResult) {
  let _ = writeln!(out, "  {:<22} {}", "Domestic", projection(&forecast.domestic));
  let _ = writeln!(out, "  {:<22} {}", "Worldwide", projection(&forecast.worldwide));
  let _ = writeln!(out, "  {:<22} {:.2}x", "ROI", forecast.roi_estimate);
  let _ = writeln!(
    out,
    "  {:<22} {} ({}/100, variance {:.0}%)",
    "Confidence",
    confidence(forecast.label),
    forecast.confidence,
    forecast.variance * 100.0
  );
  paragraph(out, &forecast.rationale, "  ");
}

fn render_affinities(out: &mut String, title: &str, results: &[AffinityResult]) {
  let _ = writeln!(out, "\n{}", marquee::headline(title));
  if results.is_empty() {
    let _ = writeln!(out, "  {}", "No profile clears the bar".dimmed());
    return;
  }
  for result in results {
    let _ = writeln!(out, "  {:<30} {}", result.name, marquee::meter(result.score, METER_WIDTH));
    paragraph(out, &result.rationale, "    ");
  }
}

fn bullet_list(out: &mut String, title: &str, items: &[String], color: Color) {
  if items.is_empty() {
    return;
  }
  let _ = writeln!(out, "  {}", title.bold());
  for item in items {
    let _ = writeln!(out, "    {} {item}", "•".color(color));
  }
}

/// Render the whole report
pub fn render_report(report: &Report) -> String {
  let mut out = String::new();
  let concept = &report.concept;

  for line in marquee::banner(&concept.logline, WIDTH, '=') {
    let _ = writeln!(out, "{}", line.bold());
  }
  let mut facts = vec![concept.genre.clone(), concept.format.clone()];
  facts.extend(concept.budget_tier.clone());
  facts.retain(|f| !f.trim().is_empty());
  let _ = writeln!(out, "{}  (corpus {})", facts.join(" · "), report.corpus_version);

  if let Some(analogy) = &report.analogy {
    let _ = writeln!(out, "Analogy: {} [{}]", analogy.titles.join(" / "), analogy.format.label());
  }

  let profile = &report.profile;
  let _ = writeln!(out, "\n{}", marquee::headline("Feature Profile"));
  for (label, tag) in [
    ("Protagonist", &profile.protagonist_type),
    ("Conflict", &profile.central_conflict),
    ("Setting", &profile.setting),
    ("Archetype", &profile.narrative_archetype),
    ("Stakes", &profile.stakes_level),
    ("Structure", &profile.structure_type),
  ] {
    let _ = writeln!(out, "  {label:<22} {}", tag.as_str());
  }
  for (label, values) in [
    ("Themes", &profile.themes),
    ("Genre markers", &profile.genre_markers),
    ("Tones", &profile.emotional_tones),
  ] {
    let _ = writeln!(out, "  {label:<22} {}", values.join(", "));
  }

  let _ = writeln!(out, "\n{}", marquee::headline("Comparables"));
  if report.comparables.is_empty() {
    let _ = writeln!(out, "  {}", "No comparable clears the inclusion threshold".dimmed());
  }
  for (i, matched) in report.comparables.iter().enumerate() {
    render_match(&mut out, i + 1, matched);
  }

  let _ = writeln!(out, "\n{}", marquee::headline("Forecast"));
  render_forecast(&mut out, &report.forecast);

  render_affinities(&mut out, "Distribution Partners", &report.distribution_partners);
  render_affinities(&mut out, "Talent", &report.talent);
  render_affinities(&mut out, "Franchise Potential", &report.franchise);

  let logline = &report.logline;
  let _ = writeln!(out, "\n{}", marquee::headline("Logline"));
  score_line(&mut out, "Hook", logline.hook_strength);
  score_line(&mut out, "Clarity", logline.clarity);
  score_line(&mut out, "Emotional hook", logline.emotional_hook);
  score_line(&mut out, "Marketability", logline.marketability);
  score_line(&mut out, "Overall", logline.overall);
  bullet_list(&mut out, "Strengths", &logline.strengths, Color::Green);
  bullet_list(&mut out, "Improvements", &logline.improvements, Color::Yellow);

  if let Some(deep) = &report.deep {
    let _ = writeln!(out, "\n{}", marquee::headline("Deep Analysis"));
    score_line(&mut out, "Empathy", deep.empathy);
    score_line(&mut out, "Thematic depth", deep.thematic_depth);
    score_line(&mut out, "Structural integrity", deep.structural_integrity);
    score_line(&mut out, "Word of mouth", deep.word_of_mouth);
    score_line(&mut out, "Cultural relevance", deep.cultural_relevance);
    bullet_list(&mut out, "Green flags", &deep.green_flags, Color::Green);
    bullet_list(&mut out, "Red flags", &deep.red_flags, Color::Red);

    if !deep.precision_matches.is_empty() {
      let _ = writeln!(out, "  {}", "Precision comparables".bold());
      for matched in &deep.precision_matches {
        let _ = writeln!(out, "    {:<40} {:>3}", matched.comparable.display_name(), matched.overall);
      }
    }

    let verdict = format!("{}  {}/100", deep.verdict.label().to_uppercase(), deep.overall);
    let _ = writeln!(out);
    for line in marquee::banner(&verdict, WIDTH, '*') {
      let _ = writeln!(out, "{}", line.color(marquee::score_color(deep.overall)).bold());
    }
    paragraph(&mut out, &deep.rationale, "");
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wrap_respects_width() {
    let lines = wrap("one two three four five six seven", 10);
    assert!(lines.iter().all(|l| l.len() <= 10));
    assert_eq!(lines.join(" "), "one two three four five six seven");
  }

  #[test]
  fn test_wrap_keeps_long_words_whole() {
    let lines = wrap("antidisestablishmentarianism is long", 10);
    assert_eq!(lines[0], "antidisestablishmentarianism");
  }

  #[test]
  fn test_wrap_empty() {
    assert!(wrap("   ", 20).is_empty());
  }

  #[test]
  fn test_money_formatting() {
    assert_eq!(money(45.0), "$45.0M");
    assert_eq!(money(1250.0), "$1.25B");
  }

  #[test]
  fn test_render_report_sections() {
    colored::control::set_override(false);
    let engine = crate::Engine::embedded().unwrap();
    let concept = crate::ConceptInput::new(
      "A grieving mother uncovers an occult ritual haunting her family home",
      "horror",
      "Feature Film",
    )
    .with_comparable("Hereditary meets The Witch");
    let report = engine.analyze_with(&concept, &crate::AnalysisOptions::deep());
    let text = render_report(&report);

    for section in ["Feature Profile", "Comparables", "Forecast", "Logline", "Deep Analysis"] {
      assert!(text.contains(section), "missing {section}");
    }
    assert!(text.contains("X meets Y"));
    assert!(text.contains(report.deep.as_ref().unwrap().verdict.label().to_uppercase().as_str()));
  }
}
