//! `pawmatch` command-line entry point.
//!
//! Ranks a JSON file of found-dog reports against a JSON query and prints the
//! ranked matches as JSON, or validates a deployment configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pawmatch::{
    active_only, query_attributes, to_ranked, traced_engine_from_config, Candidate, Extraction,
    PawmatchConfig, Query,
};

/// Pawmatch CLI.
#[derive(Parser)]
#[command(name = "pawmatch")]
#[command(about = "Rank found-dog reports against a lost-dog search")]
#[command(version)]
struct Cli {
    /// YAML configuration file; library defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidates against a query
    Rank {
        /// JSON array of candidate records
        #[arg(long)]
        candidates: PathBuf,

        /// JSON query object
        #[arg(long)]
        query: PathBuf,

        /// JSON extractor outcome used as the query attributes
        #[arg(long)]
        extraction: Option<PathBuf>,

        /// Override the query limit
        #[arg(long)]
        limit: Option<usize>,

        /// Override the query radius in kilometres
        #[arg(long)]
        radius_km: Option<f64>,
    },

    /// Validate a configuration file and print the effective settings
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Commands::Rank {
            candidates,
            query,
            extraction,
            limit,
            radius_km,
        } => run_rank(&config, &candidates, &query, extraction.as_deref(), limit, radius_km),
        Commands::CheckConfig => {
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PawmatchConfig> {
    let mut config = match path {
        Some(path) => PawmatchConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PawmatchConfig::default(),
    };
    config
        .apply_process_env()
        .context("applying PAWMATCH_* environment overrides")?;
    Ok(config)
}

fn init_tracing(config: &PawmatchConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_rank(
    config: &PawmatchConfig,
    candidates_path: &Path,
    query_path: &Path,
    extraction_path: Option<&Path>,
    limit: Option<usize>,
    radius_km: Option<f64>,
) -> Result<()> {
    let records: Vec<Candidate> = read_json(candidates_path)?;
    let total = records.len();
    let candidates = active_only(records);
    tracing::info!(
        total,
        active = candidates.len(),
        "loaded candidates"
    );

    let mut query: Query = read_json(query_path)?;
    if let Some(path) = extraction_path {
        let extraction: Extraction = read_json(path)?;
        match query_attributes(extraction, config) {
            Some(attributes) => query.attributes = Some(attributes),
            None => tracing::warn!("extraction rejected or below confidence threshold"),
        }
    }
    if let Some(limit) = limit {
        query.limit = limit;
    }
    if let Some(radius_km) = radius_km {
        query.radius_km = Some(radius_km);
    }

    let engine = traced_engine_from_config(config)?;
    query.validate(engine.config()).context("invalid query")?;

    let hits = engine.rank(&candidates, &query);
    let ranked = to_ranked(&hits);
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
