use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use greenlight::analogy::parse_comparable;
use greenlight::display::render_report;
use greenlight::{AnalysisOptions, ConceptInput, Engine, EngineConfig};

#[derive(Parser)]
#[command(name = "greenlight")]
#[command(
  about = "Greenlight - Creative Concept Evaluation\nComparable matching, box office forecasting and partner affinity for story pitches"
)]
#[command(version)]
struct Cli {
  /// Engine configuration file (JSON)
  #[arg(long, global = true, env = "GREENLIGHT_CONFIG")]
  config: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
  Pretty,
  Json,
}

/// Concept fields given on the command line
#[derive(Args)]
struct ConceptArgs {
  /// Concept file (JSON or YAML, camelCase keys)
  #[arg(short, long)]
  input: Option<PathBuf>,
  /// One or two sentence pitch
  #[arg(short, long)]
  logline: Option<String>,
  /// Primary genre
  #[arg(short, long)]
  genre: Option<String>,
  /// "Feature Film", "Series" or "Limited Series"
  #[arg(short, long)]
  format: Option<String>,
  #[arg(long)]
  secondary_genre: Option<String>,
  /// Comma separated tones
  #[arg(long)]
  tone: Option<String>,
  #[arg(long)]
  audience: Option<String>,
  /// micro, low, medium, high or blockbuster
  #[arg(long)]
  budget: Option<String>,
  #[arg(long)]
  synopsis: Option<String>,
  /// Analogy such as "Parasite meets Knives Out"
  #[arg(long)]
  comparable: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a concept
  Analyze {
    #[command(flatten)]
    concept: ConceptArgs,
    /// Run the layered deep pass and produce a verdict
    #[arg(long)]
    deep: bool,
    /// Number of comparables to keep
    #[arg(long)]
    top: Option<usize>,
    #[arg(short, long, value_enum, default_value = "pretty")]
    output: OutputFormat,
  },
  /// Parse an analogy such as "X meets Y"
  ParseComp {
    text: String,
    #[arg(long)]
    json: bool,
  },
  /// List the reference corpus
  Corpus,
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("greenlight=debug,warn")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("greenlight=info,warn"))
  };

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
  marquee::set_verbose(verbose);
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
  match path {
    Some(path) => {
      marquee::debug!("Using config {}", path.display());
      EngineConfig::load_from_file(path).with_context(|| format!("Failed to load config from {}", path.display()))
    }
    None => {
      marquee::debug!("Using default config search path");
      Ok(EngineConfig::load()?)
    }
  }
}

fn read_concept_file(path: &Path) -> Result<ConceptInput> {
  let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let is_yaml = path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "yaml" || e == "yml");

  let concept = if is_yaml {
    serde_yaml::from_str(&content).with_context(|| format!("Invalid concept YAML in {}", path.display()))?
  } else {
    serde_json::from_str(&content).with_context(|| format!("Invalid concept JSON in {}", path.display()))?
  };
  Ok(concept)
}

/// File fields first, then any flags given on top
fn build_concept(args: ConceptArgs) -> Result<ConceptInput> {
  let mut concept = match &args.input {
    Some(path) => read_concept_file(path)?,
    None => ConceptInput::default(),
  };

  if let Some(logline) = args.logline {
    concept.logline = logline;
  }
  if let Some(genre) = args.genre {
    concept.genre = genre;
  }
  if let Some(format) = args.format {
    concept.format = format;
  }
  concept.secondary_genre = args.secondary_genre.or(concept.secondary_genre);
  concept.tone = args.tone.or(concept.tone);
  concept.target_audience = args.audience.or(concept.target_audience);
  concept.budget_tier = args.budget.or(concept.budget_tier);
  concept.synopsis = args.synopsis.or(concept.synopsis);
  concept.user_supplied_comparable = args.comparable.or(concept.user_supplied_comparable);

  if concept.logline.trim().is_empty() {
    bail!("A logline is required (use --logline or --input)");
  }
  if concept.genre.trim().is_empty() {
    marquee::warn("No genre given; genre scoring will be neutral");
  }
  if concept.parsed_format().is_none() {
    marquee::warn!("Unrecognized format '{}'; expected Feature Film, Series or Limited Series", concept.format);
  }
  Ok(concept)
}

fn analyze(engine: &Engine, concept: ConceptArgs, deep: bool, top: Option<usize>, output: OutputFormat) -> Result<()> {
  let concept = build_concept(concept)?;
  let options = AnalysisOptions { deep, top_k: top };

  marquee::verbose!("Analyzing against corpus {} ({} entries)", engine.corpus().version, engine.corpus().len());
  if deep && output == OutputFormat::Pretty {
    marquee::info!("Running layered deep pass over the top {} comparables", top.unwrap_or(engine.config().top_k));
  }
  let report = engine.analyze_with(&concept, &options);

  match output {
    OutputFormat::Json => println!("{}", report.to_json()?),
    OutputFormat::Pretty => {
      print!("{}", render_report(&report));
      marquee::success!("Matched {} comparables", report.comparables.len());
    }
  }
  Ok(())
}

fn parse_comp(text: &str, json: bool) -> Result<()> {
  let Some(parsed) = parse_comparable(text) else {
    bail!("Nothing to parse in '{text}'");
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&parsed)?);
  } else {
    println!("{} {}", "Format:".bold(), parsed.format.label());
    for (i, title) in parsed.titles.iter().enumerate() {
      println!("{} {title}", format!("Title {}:", i + 1).bold());
    }
  }
  Ok(())
}

fn list_corpus(engine: &Engine) {
  let corpus = engine.corpus();
  println!("{}", marquee::headline(&format!("Reference corpus {} ({} entries)", corpus.version, corpus.len())));
  for entry in corpus.iter() {
    println!(
      "  {:<40} {:<16} {:<26} {}",
      entry.display_name(),
      entry.format.label(),
      entry.distributor,
      entry.genres.join(", ").dimmed()
    );
  }
}

fn load_engine(config: Option<&Path>) -> Result<Engine> {
  let config = load_config(config)?;
  Engine::with_config(config).context("Failed to load reference data")
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Analyze { concept, deep, top, output } => {
      let engine = load_engine(cli.config.as_deref())?;
      analyze(&engine, concept, deep, top, output)
    }
    Commands::ParseComp { text, json } => parse_comp(&text, json),
    Commands::Corpus => {
      list_corpus(&load_engine(cli.config.as_deref())?);
      Ok(())
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      marquee::error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}
