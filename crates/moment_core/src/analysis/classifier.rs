//! Per-event classification and impact scoring.
//!
//! Each critical event in a frame is checked for relevance to the tracked
//! player, scored from the configured weights, and wrapped into a
//! [`CriticalMoment`] together with gold, position and cooldown context.

use crate::config::{EngineConfig, ScoringWeights};
use crate::cooldown::CooldownState;
use crate::models::{
    moment_id, CriticalMoment, EliminationEvent, Frame, GameEvent, GamePhase, GoldState, MomentContext,
    MomentDetails, MomentKind, MonsterEvent, PlayerRole, Position, StructureEvent, TeamSide,
};
use crate::registry::ParticipantRegistry;
use crate::spatial::{player_location, MapRegion};

/// Impact scores are non-negative; a misconfigured table can't push one below zero.
pub fn clamp_score(raw: i64) -> u32 {
    if raw < 0 {
        log::warn!("Negative impact score {} clamped to 0", raw);
        0
    } else {
        raw.min(u32::MAX as i64) as u32
    }
}

/// Role of the tracked player in a kill.
pub fn player_role(kill: &EliminationEvent, target_id: u32) -> PlayerRole {
    if kill.killer_id == target_id {
        PlayerRole::Killer
    } else if kill.victim_id == target_id {
        PlayerRole::Victim
    } else if kill.assisting_ids.contains(&target_id) {
        PlayerRole::Assistant
    } else {
        PlayerRole::TeamInvolved
    }
}

pub fn score_elimination(kill: &EliminationEvent, target_id: u32, weights: &ScoringWeights) -> i64 {
    let mut score = weights.elimination_base;
    if kill.assisting_ids.len() >= weights.many_assists_threshold {
        score += weights.many_assists_bonus;
    }
    if kill.bounty > weights.bounty_threshold {
        score += weights.bounty_bonus;
    }
    if kill.killer_id == target_id {
        score += weights.killer_bonus;
    } else if kill.victim_id == target_id {
        score += weights.victim_bonus;
    }
    score
}

/// Signed team gold difference at `frame`; positive means the tracked
/// player's team is ahead.
pub fn gold_difference(frame: &Frame, registry: &ParticipantRegistry) -> i64 {
    frame
        .participant_frames
        .iter()
        .map(|(id, pf)| match registry.team_of(*id) {
            Some(team) if team == registry.target_team() => pf.total_gold,
            Some(_) => -pf.total_gold,
            None => 0,
        })
        .sum()
}

/// Gold, location and cooldown context for a moment at `frame`.
pub fn moment_context(
    frame: &Frame,
    registry: &ParticipantRegistry,
    config: &EngineConfig,
    cooldowns: &CooldownState,
    event_position: &Position,
    timestamp_minutes: f64,
) -> MomentContext {
    let gold_difference = gold_difference(frame, registry);
    MomentContext {
        gold_difference,
        gold_state: GoldState::from_difference(gold_difference, config.gold_state_threshold),
        player_location: player_location(frame, registry.target_id(), event_position),
        summoner_spells: cooldowns.snapshot(&config.cooldowns, timestamp_minutes),
    }
}

pub struct EventClassifier<'a> {
    registry: &'a ParticipantRegistry,
    config: &'a EngineConfig,
    cooldowns: &'a CooldownState,
}

impl<'a> EventClassifier<'a> {
    pub fn new(registry: &'a ParticipantRegistry, config: &'a EngineConfig, cooldowns: &'a CooldownState) -> Self {
        Self { registry, config, cooldowns }
    }

    /// Classify every event of a frame, in timestamp order.
    pub fn classify_frame(&self, frame: &Frame) -> Vec<CriticalMoment> {
        frame.events.iter().filter_map(|event| self.classify(event, frame)).collect()
    }

    /// `None` when the event isn't critical or isn't relevant to the tracked player.
    pub fn classify(&self, event: &GameEvent, frame: &Frame) -> Option<CriticalMoment> {
        let (kind, raw_score, details) = match event {
            GameEvent::Elimination(kill) => self.elimination(kill)?,
            GameEvent::EliteMonsterTakedown(monster) => self.objective(monster),
            GameEvent::StructureTakedown(structure) => self.structure(structure),
            GameEvent::Other { .. } => return None,
        };

        let timestamp_minutes = event.timestamp_ms().unwrap_or(frame.timestamp_ms) as f64 / 60_000.0;
        let event_position = event.position().unwrap_or(Position::CENTER);

        Some(CriticalMoment {
            id: moment_id(kind, timestamp_minutes),
            kind,
            timestamp_minutes,
            impact_score: clamp_score(raw_score),
            game_phase: GamePhase::at(timestamp_minutes, &self.config.phases),
            details,
            context: moment_context(
                frame,
                self.registry,
                self.config,
                self.cooldowns,
                &event_position,
                timestamp_minutes,
            ),
        })
    }

    fn elimination(&self, kill: &EliminationEvent) -> Option<(MomentKind, i64, MomentDetails)> {
        let target_id = self.registry.target_id();

        // Kills not involving the player only count when the player's team got them
        if !kill.involves(target_id) && !self.registry.is_target_team(kill.killer_id) {
            return None;
        }

        let position = kill.position.unwrap_or(Position::CENTER);
        let details = MomentDetails::Elimination {
            killer: self.registry.champion(kill.killer_id),
            killer_name: self.registry.display_name(kill.killer_id),
            victim: self.registry.champion(kill.victim_id),
            victim_name: self.registry.display_name(kill.victim_id),
            assistants: kill.assisting_ids.iter().filter_map(|id| self.registry.champion(*id)).collect(),
            bounty: kill.bounty,
            position,
            region: MapRegion::classify(&position),
            player_role: player_role(kill, target_id),
        };

        Some((MomentKind::Elimination, score_elimination(kill, target_id, &self.config.scoring), details))
    }

    fn objective(&self, monster: &MonsterEvent) -> (MomentKind, i64, MomentDetails) {
        let securing_team = monster
            .killer_team_id
            .or_else(|| monster.killer_id.and_then(|id| self.registry.team_of(id)));
        let is_player_team = securing_team == Some(self.registry.target_team());

        let weights = &self.config.scoring;
        let bonus = if is_player_team { weights.objective_own_team_bonus } else { weights.objective_enemy_team_bonus };
        let score = self.config.objective_values.monster_value(&monster.monster_type) + bonus;

        let position = monster.position.unwrap_or(Position::CENTER);
        let details = MomentDetails::Objective {
            monster_type: monster.monster_type.as_str().to_string(),
            monster_sub_type: monster.monster_sub_type.clone(),
            securing_team: TeamSide::from_is_player_team(is_player_team),
            killer_id: monster.killer_id,
            position,
            region: MapRegion::classify(&position),
        };

        (MomentKind::Objective, score, details)
    }

    /// Destroying team: explicit killer team, else the side opposite the
    /// building's owner, else the killer's team.
    fn structure_destroyed_by_player_team(&self, structure: &StructureEvent) -> bool {
        let target_team = self.registry.target_team();
        if let Some(team) = structure.killer_team_id {
            return team == target_team;
        }
        if let Some(owner) = structure.owner_team_id {
            return owner != target_team;
        }
        structure.killer_id.map(|id| self.registry.is_target_team(id)).unwrap_or(false)
    }

    fn structure(&self, structure: &StructureEvent) -> (MomentKind, i64, MomentDetails) {
        let is_player_team = self.structure_destroyed_by_player_team(structure);

        let weights = &self.config.scoring;
        let bonus = if is_player_team { weights.structure_own_team_bonus } else { weights.structure_enemy_team_bonus };
        let score = self.config.objective_values.structure_value(structure) + bonus;

        let position = structure.position.unwrap_or(Position::CENTER);
        let details = MomentDetails::Structure {
            structure_type: structure.building_type.clone(),
            lane: structure.lane.clone(),
            tower_type: structure.tower_type.clone(),
            destroying_team: TeamSide::from_is_player_team(is_player_team),
            position,
            region: MapRegion::classify(&position),
        };

        (MomentKind::Structure, score, details)
    }
}
