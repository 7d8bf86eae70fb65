use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use explaincheck::config::{Config, ConfidenceMode};
use explaincheck::server::{run_server, Engine};
use explaincheck::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name="explaincheck", version)]
struct Cli {
  #[command(subcommand)]
  cmd: Cmd,
  /// Config file (defaults to ./explaincheck.toml when present)
  #[arg(long)] config: Option<PathBuf>,
  /// Scoring policy: enhanced | legacy
  #[arg(long)] policy: Option<Policy>,
  /// Pin confidence draws to the band midpoint
  #[arg(long)] midpoint: bool,
  /// Seed confidence draws for reproducible output
  #[arg(long)] seed: Option<u64>,
}

#[derive(Subcommand)]
enum Cmd {
  /// Serve the HTTP API
  Serve { #[arg(long)] bind: Option<String> },
  /// Verify one explanation and print the report as JSON
  Check { #[arg(long)] text: Option<String>, #[arg(long)] input_file: Option<PathBuf>, #[arg(long)] domain: Option<String>, #[arg(long, default_value_t=false)] similar: bool },
  /// List demo scenarios similar to the given text
  Similar { #[arg(long)] text: String, #[arg(long)] threshold: Option<f64> },
  /// Print the demo scenario corpus
  Examples { #[arg(long)] random: bool },
}

fn init_tracing() {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("explaincheck=info,tower_http=info")))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();
  let mut cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;
  if let Some(p) = cli.policy { cfg.policy = p; }
  if let Some(seed) = cli.seed { cfg.seed = seed; cfg.confidence = ConfidenceMode::Seeded; }
  if cli.midpoint { cfg.confidence = ConfidenceMode::Midpoint; }

  let verifier = Verifier::new(cfg.policy, cfg.confidence_source())?;

  match cli.cmd {
    Cmd::Serve { bind } => {
      let addr = bind.unwrap_or_else(|| cfg.bind.clone());
      info!(policy = ?cfg.policy, confidence = ?cfg.confidence, "starting ExplainCheck API");
      let engine = Engine {
        verifier,
        default_domain: cfg.default_domain.clone(),
        similarity_threshold: cfg.similarity_threshold,
        batch_concurrency: cfg.batch_concurrency,
      };
      run_server(engine, &addr).await?;
    }
    Cmd::Check { text, input_file, domain, similar } => {
      let text = match (text, input_file) {
        (Some(t), _) => t,
        (None, Some(path)) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
        (None, None) => bail!("pass --text or --input-file"),
      };
      let explanation = Explanation { text, domain: domain.unwrap_or_else(|| cfg.default_domain.clone()) };
      let report = verifier.verify_explanation(&explanation)?;
      let mut out = serde_json::to_value(&report)?;
      if similar {
        out["similar_scenarios"] = serde_json::to_value(corpus::find_similar(&explanation.text, cfg.similarity_threshold))?;
      }
      println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Cmd::Similar { text, threshold } => {
      let hits = corpus::find_similar(&text, threshold.unwrap_or(cfg.similarity_threshold));
      println!("{}", serde_json::to_string_pretty(&hits)?);
    }
    Cmd::Examples { random } => {
      if random {
        println!("{}", serde_json::to_string_pretty(&corpus::random_scenario())?);
      } else {
        println!("{}", serde_json::to_string_pretty(corpus::scenarios())?);
      }
    }
  }
  Ok(())
}

