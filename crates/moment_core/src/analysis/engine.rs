//! Extraction pipeline for a single match.
//!
//! Resolve the tracked player, classify every event frame by frame, detect
//! team fights over the whole timeline, then rank. Each call builds its own
//! registry and cooldown state, so one extractor can serve many matches
//! (including concurrently).

use crate::analysis::classifier::EventClassifier;
use crate::analysis::ranker::rank;
use crate::analysis::team_fight::TeamFightDetector;
use crate::config::{EngineConfig, PhaseThresholds};
use crate::cooldown::CooldownState;
use crate::error::{MomentError, Result};
use crate::frames::FrameStream;
use crate::models::{moment_id, CriticalMoment, GamePhase, MatchInfo, PlayerProfile};
use crate::registry::ParticipantRegistry;
use crate::report::MomentReport;

#[derive(Debug, Clone, Default)]
pub struct MomentExtractor {
    config: EngineConfig,
}

impl MomentExtractor {
    /// An invalid config is replaced by the defaults.
    pub fn new(config: EngineConfig) -> Self {
        match config.validate() {
            Ok(()) => Self { config },
            Err(e) => {
                log::warn!("Rejected engine config ({}), using defaults", e);
                Self { config: EngineConfig::default() }
            }
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Top moments for `target_puuid`, highest impact first.
    ///
    /// A player missing from the match yields an empty list, not an error.
    pub fn extract(&self, match_info: &MatchInfo, frames: &FrameStream, target_puuid: &str) -> Vec<CriticalMoment> {
        match self.try_extract(match_info, frames, target_puuid) {
            Ok(moments) => moments,
            Err(MomentError::TargetNotFound(puuid)) => {
                log::warn!("Player {} not found in match {}, no moments extracted", puuid, match_info.match_id);
                Vec::new()
            }
            Err(e) => {
                log::error!("Extraction failed for match {}: {}", match_info.match_id, e);
                Vec::new()
            }
        }
    }

    /// Like [`extract`](Self::extract) but surfaces target resolution failures.
    pub fn try_extract(
        &self,
        match_info: &MatchInfo,
        frames: &FrameStream,
        target_puuid: &str,
    ) -> Result<Vec<CriticalMoment>> {
        let registry = ParticipantRegistry::resolve(match_info, target_puuid)?;
        let cooldowns = CooldownState::for_participant(registry.target(), &self.config.cooldowns);

        let classifier = EventClassifier::new(&registry, &self.config, &cooldowns);
        let mut moments: Vec<CriticalMoment> =
            frames.frames().iter().flat_map(|frame| classifier.classify_frame(frame)).collect();
        let event_moments = moments.len();

        let fights = TeamFightDetector::new(&registry, &self.config, &cooldowns).detect(frames);
        let fight_count = fights.len();
        moments.extend(fights);

        if let Some(limit) = match_info.duration_minutes() {
            clamp_to_duration(&mut moments, limit, &self.config.phases);
        }

        let ranked = rank(moments, self.config.max_moments);
        log::info!(
            "Match {}: {} event moments, {} team fights, kept {}",
            match_info.match_id,
            event_moments,
            fight_count,
            ranked.len()
        );

        Ok(ranked)
    }

    /// Extract and wrap the result with the player profile. A player missing
    /// from the match gets a report with no profile and no moments.
    pub fn report(&self, match_info: &MatchInfo, frames: &FrameStream, target_puuid: &str) -> MomentReport {
        let player = match ParticipantRegistry::resolve(match_info, target_puuid) {
            Ok(registry) => Some(PlayerProfile::from(registry.target())),
            Err(e) => {
                log::warn!("No profile for match {}: {}", match_info.match_id, e);
                None
            }
        };
        let moments = match player {
            Some(_) => self.extract(match_info, frames, target_puuid),
            None => Vec::new(),
        };
        MomentReport::new(match_info.match_id.clone(), target_puuid.to_string(), player, moments)
    }
}

/// Event timestamps past the recorded game length are pulled back to it,
/// along with the phase and id derived from them.
fn clamp_to_duration(moments: &mut [CriticalMoment], duration_minutes: f64, phases: &PhaseThresholds) {
    for moment in moments.iter_mut().filter(|m| m.timestamp_minutes > duration_minutes) {
        log::debug!(
            "Clamping {} at {:.2}m to match end {:.2}m",
            moment.id,
            moment.timestamp_minutes,
            duration_minutes
        );
        moment.timestamp_minutes = duration_minutes;
        moment.game_phase = GamePhase::at(duration_minutes, phases);
        moment.id = moment_id(moment.kind, duration_minutes);
    }
}
