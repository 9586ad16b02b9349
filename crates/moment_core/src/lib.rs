//! # moment_core - Critical Moment Extraction Engine
//!
//! Turns one match's metadata and frame timeline into a short, ranked list
//! of the moments that mattered most to a single player.
//!
//! ## Pipeline
//! - Resolve the tracked player against the roster ([`registry`])
//! - Parse frames into typed events ([`frames`], [`models`])
//! - Classify and score kills, objectives and structures ([`analysis::classifier`])
//! - Cluster kills into team fights ([`analysis::team_fight`])
//! - Deduplicate and keep the top entries ([`analysis::ranker`])
//!
//! Extraction is synchronous and holds no state between calls.

pub mod analysis;
pub mod config;
pub mod context;
pub mod cooldown;
pub mod error;
pub mod frames;
pub mod models;
pub mod registry;
pub mod report;
pub mod spatial;

pub use analysis::{EventClassifier, MomentExtractor, TeamFightDetector};
pub use config::{EngineConfig, ScoringWeights};
pub use context::NarrationContext;
pub use error::{MomentError, Result};
pub use frames::FrameStream;
pub use models::{CriticalMoment, GameEvent, MatchInfo, MomentKind, PlayerProfile};
pub use registry::ParticipantRegistry;
pub use report::MomentReport;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract with the default configuration from parsed match and timeline
/// documents.
pub fn extract_critical_moments(
    match_doc: &serde_json::Value,
    timeline_doc: &serde_json::Value,
    target_puuid: &str,
) -> Result<Vec<CriticalMoment>> {
    let match_info = MatchInfo::from_value(match_doc)?;
    let frames = FrameStream::from_value(timeline_doc)?;
    Ok(MomentExtractor::default().extract(&match_info, &frames, target_puuid))
}

/// JSON in, JSON report out.
pub fn extract_report_json(
    match_json: &str,
    timeline_json: &str,
    target_puuid: &str,
    config: EngineConfig,
) -> Result<String> {
    let match_info = MatchInfo::from_json(match_json)?;
    let frames = FrameStream::from_json(timeline_json)?;
    MomentExtractor::new(config).report(&match_info, &frames, target_puuid).to_json_pretty()
}
