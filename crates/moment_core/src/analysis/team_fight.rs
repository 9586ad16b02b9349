//! Team fight detection.
//!
//! Kills are clustered greedily in time. A cluster opens at the earliest
//! unclustered kill and absorbs every later kill within the configured
//! window of that first kill; the anchor never moves. Only clusters with
//! enough kills, enough distinct champions and the tracked player in at
//! least one kill become moments.

use std::collections::BTreeSet;

use crate::analysis::classifier::{clamp_score, moment_context};
use crate::config::EngineConfig;
use crate::cooldown::CooldownState;
use crate::frames::FrameStream;
use crate::models::{
    moment_id, CriticalMoment, EliminationEvent, FightOutcome, Frame, GameEvent, GamePhase, MomentDetails,
    MomentKind, Position,
};
use crate::registry::ParticipantRegistry;
use crate::spatial::MapRegion;

/// A kill paired with the frame it was reported in.
#[derive(Debug, Clone, Copy)]
pub struct TimedKill<'a> {
    pub kill: &'a EliminationEvent,
    pub frame: &'a Frame,
    /// Event timestamp, else the frame's
    pub timestamp_ms: u64,
}

impl TimedKill<'_> {
    pub fn timestamp_minutes(&self) -> f64 {
        self.timestamp_ms as f64 / 60_000.0
    }
}

/// Every elimination in the timeline, chronologically.
pub fn collect_kills(frames: &FrameStream) -> Vec<TimedKill<'_>> {
    let mut kills: Vec<TimedKill<'_>> = frames
        .frames()
        .iter()
        .flat_map(|frame| {
            frame.events.iter().filter_map(move |event| match event {
                GameEvent::Elimination(kill) => Some(TimedKill {
                    kill,
                    frame,
                    timestamp_ms: kill.timestamp_ms.unwrap_or(frame.timestamp_ms),
                }),
                _ => None,
            })
        })
        .collect();

    kills.sort_by_key(|k| k.timestamp_ms);
    kills
}

/// Split chronologically sorted kills into fixed-anchor windows.
///
/// Every cluster holds at least its anchor kill; a non-positive window
/// yields one cluster per distinct timestamp.
pub fn cluster_kills<'a, 'k>(kills: &'k [TimedKill<'a>], window_minutes: f64) -> Vec<&'k [TimedKill<'a>]> {
    let window_ms = window_minutes.max(0.0) * 60_000.0;
    let mut clusters = Vec::new();
    let mut start = 0;

    while start < kills.len() {
        let anchor = kills[start].timestamp_ms;
        let end = kills[start + 1..]
            .iter()
            .position(|k| k.timestamp_ms.saturating_sub(anchor) as f64 > window_ms)
            .map(|offset| start + 1 + offset)
            .unwrap_or(kills.len());

        clusters.push(&kills[start..end]);
        start = end;
    }

    clusters
}

/// Distinct participant ids named by any kill in the cluster.
pub fn cluster_participants(cluster: &[TimedKill<'_>]) -> BTreeSet<u32> {
    cluster.iter().flat_map(|k| k.kill.participant_ids()).collect()
}

pub struct TeamFightDetector<'a> {
    registry: &'a ParticipantRegistry,
    config: &'a EngineConfig,
    cooldowns: &'a CooldownState,
}

impl<'a> TeamFightDetector<'a> {
    pub fn new(registry: &'a ParticipantRegistry, config: &'a EngineConfig, cooldowns: &'a CooldownState) -> Self {
        Self { registry, config, cooldowns }
    }

    pub fn detect(&self, frames: &FrameStream) -> Vec<CriticalMoment> {
        let kills = collect_kills(frames);
        cluster_kills(&kills, self.config.team_fight.window_minutes)
            .into_iter()
            .filter_map(|cluster| self.evaluate(cluster))
            .collect()
    }

    /// A moment for `cluster`, or `None` when it doesn't qualify.
    pub fn evaluate(&self, cluster: &[TimedKill<'_>]) -> Option<CriticalMoment> {
        let settings = &self.config.team_fight;
        let (first, last) = (cluster.first()?, cluster.last()?);

        if cluster.len() < settings.min_kills {
            return None;
        }
        let participants = cluster_participants(cluster);
        if participants.len() < settings.min_participants {
            return None;
        }
        let target_id = self.registry.target_id();
        if !cluster.iter().any(|k| k.kill.involves(target_id)) {
            log::debug!(
                "Skipping {}-kill fight at {:.1}m without the tracked player",
                cluster.len(),
                first.timestamp_minutes()
            );
            return None;
        }

        let player_team_kills = cluster.iter().filter(|k| self.registry.is_target_team(k.kill.killer_id)).count();
        let enemy_team_kills = cluster.len() - player_team_kills;

        let positions: Vec<Position> = cluster.iter().filter_map(|k| k.kill.position).collect();
        let position = Position::average(&positions).unwrap_or(Position::CENTER);

        let weights = &self.config.scoring;
        let raw_score = weights.team_fight_base + weights.team_fight_per_kill * cluster.len() as i64;
        let duration_seconds = ((last.timestamp_ms - first.timestamp_ms) / 1000) as u32;
        let timestamp_minutes = first.timestamp_minutes();

        log::debug!(
            "Team fight at {:.1}m: {} kills, {} participants, {}-{}",
            timestamp_minutes,
            cluster.len(),
            participants.len(),
            player_team_kills,
            enemy_team_kills
        );

        Some(CriticalMoment {
            id: moment_id(MomentKind::TeamFight, timestamp_minutes),
            kind: MomentKind::TeamFight,
            timestamp_minutes,
            impact_score: clamp_score(raw_score),
            game_phase: GamePhase::at(timestamp_minutes, &self.config.phases),
            details: MomentDetails::TeamFight {
                kills_count: cluster.len(),
                participants_count: participants.len(),
                player_team_kills,
                enemy_team_kills,
                outcome: FightOutcome::from_kills(player_team_kills, enemy_team_kills),
                duration_seconds,
                position,
                region: MapRegion::classify(&position),
            },
            context: moment_context(
                first.frame,
                self.registry,
                self.config,
                self.cooldowns,
                &position,
                timestamp_minutes,
            ),
        })
    }
}
