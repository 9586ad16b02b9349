//! moment-cli
//!
//! Run critical moment extraction over saved match and timeline JSON files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moment_core::{EngineConfig, FrameStream, MatchInfo, MomentExtractor, MomentReport, ScoringWeights};

#[derive(Parser)]
#[command(name = "moment-cli", version)]
#[command(about = "Extract ranked critical moments from a match timeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract moments for one player
    Extract {
        /// Match metadata JSON file
        #[arg(long = "match")]
        match_file: PathBuf,

        /// Timeline JSON file
        #[arg(long)]
        timeline: PathBuf,

        /// Tracked player's puuid
        #[arg(long)]
        puuid: String,

        /// Engine config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scoring preset, overrides the config's weights
        #[arg(long)]
        preset: Option<String>,

        /// Report output path; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the report JSON schema
    Schema,

    /// Print the default engine config as YAML
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(output) = run(cli.command)? {
        println!("{}", output);
    }
    Ok(())
}

/// Execute a command; returns text for stdout, if any.
fn run(command: Commands) -> Result<Option<String>> {
    match command {
        Commands::Extract { match_file, timeline, puuid, config, preset, out } => {
            let config = load_config(config, preset)?;
            let report = extract(&match_file, &timeline, &puuid, config)?;

            if report.moments.is_empty() {
                tracing::warn!("No moments extracted for {}", puuid);
            }

            match out {
                Some(path) => {
                    moment_core::report::save_report_json(&report, &path)
                        .with_context(|| format!("writing report to {}", path.display()))?;
                    tracing::info!("Wrote {} moments to {}", report.moments.len(), path.display());
                    Ok(None)
                }
                None => Ok(Some(report.to_json_pretty()?)),
            }
        }
        Commands::Schema => Ok(Some(serde_json::to_string_pretty(&MomentReport::json_schema())?)),
        Commands::Config => Ok(Some(EngineConfig::default().to_yaml()?)),
    }
}

fn load_config(path: Option<PathBuf>, preset: Option<String>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            EngineConfig::load(&path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(name) = preset {
        config.scoring = ScoringWeights::preset(&name);
    }
    Ok(config)
}

fn extract(match_file: &Path, timeline: &Path, puuid: &str, config: EngineConfig) -> Result<MomentReport> {
    let match_json = std::fs::read_to_string(match_file)
        .with_context(|| format!("reading match file {}", match_file.display()))?;
    let timeline_json = std::fs::read_to_string(timeline)
        .with_context(|| format!("reading timeline file {}", timeline.display()))?;

    let match_info = MatchInfo::from_json(&match_json).context("parsing match record")?;
    let frames = FrameStream::from_json(&timeline_json).context("parsing timeline")?;
    tracing::info!(
        "Match {}: {} participants, {} frames, {} events",
        match_info.match_id,
        match_info.participants.len(),
        frames.len(),
        frames.event_count()
    );

    Ok(MomentExtractor::new(config).report(&match_info, &frames, puuid))
}
