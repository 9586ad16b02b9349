//! Timeline frames and the closed set of game events they carry.
//!
//! Raw events arrive as loosely-typed JSON objects keyed by a `type` string.
//! They are resolved exactly once, here, into [`GameEvent`]; everything
//! downstream matches on the enum.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::position::Position;
use crate::error::{MomentError, Result};

pub const CHAMPION_KILL: &str = "CHAMPION_KILL";
pub const ELITE_MONSTER_KILL: &str = "ELITE_MONSTER_KILL";
pub const BUILDING_KILL: &str = "BUILDING_KILL";

/// Elite monster categories with distinct objective values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MonsterType {
    Dragon,
    BaronNashor,
    RiftHerald,
    /// Voidgrubs
    Horde,
    Other(String),
}

impl MonsterType {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "DRAGON" => MonsterType::Dragon,
            "BARON_NASHOR" => MonsterType::BaronNashor,
            "RIFTHERALD" => MonsterType::RiftHerald,
            "HORDE" => MonsterType::Horde,
            other => MonsterType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MonsterType::Dragon => "DRAGON",
            MonsterType::BaronNashor => "BARON_NASHOR",
            MonsterType::RiftHerald => "RIFTHERALD",
            MonsterType::Horde => "HORDE",
            MonsterType::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EliminationEvent {
    pub timestamp_ms: Option<u64>,
    /// 0 when the kill was executed by a minion or turret
    pub killer_id: u32,
    pub victim_id: u32,
    pub assisting_ids: Vec<u32>,
    pub bounty: u32,
    pub shutdown_bounty: u32,
    pub position: Option<Position>,
}

impl EliminationEvent {
    /// Killer, victim or assistant.
    pub fn involves(&self, participant_id: u32) -> bool {
        self.killer_id == participant_id
            || self.victim_id == participant_id
            || self.assisting_ids.contains(&participant_id)
    }

    /// Every participant id named by the kill, excluding the id-0 executor.
    pub fn participant_ids(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::once(self.killer_id)
            .chain(std::iter::once(self.victim_id))
            .chain(self.assisting_ids.iter().copied())
            .filter(|id| *id != 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonsterEvent {
    pub timestamp_ms: Option<u64>,
    pub monster_type: MonsterType,
    pub monster_sub_type: Option<String>,
    pub killer_id: Option<u32>,
    pub killer_team_id: Option<u32>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureEvent {
    pub timestamp_ms: Option<u64>,
    pub building_type: String,
    pub lane: String,
    pub tower_type: Option<String>,
    pub killer_id: Option<u32>,
    pub killer_team_id: Option<u32>,
    /// Team that owned the destroyed building
    pub owner_team_id: Option<u32>,
    pub position: Option<Position>,
}

impl StructureEvent {
    pub fn is_inhibitor(&self) -> bool {
        self.building_type.contains("INHIBITOR")
    }
}

/// A timeline event resolved into its closed variant.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Elimination(EliminationEvent),
    EliteMonsterTakedown(MonsterEvent),
    StructureTakedown(StructureEvent),
    Other { event_type: String, timestamp_ms: Option<u64> },
}

impl GameEvent {
    pub fn timestamp_ms(&self) -> Option<u64> {
        match self {
            GameEvent::Elimination(e) => e.timestamp_ms,
            GameEvent::EliteMonsterTakedown(e) => e.timestamp_ms,
            GameEvent::StructureTakedown(e) => e.timestamp_ms,
            GameEvent::Other { timestamp_ms, .. } => *timestamp_ms,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            GameEvent::Elimination(e) => e.position,
            GameEvent::EliteMonsterTakedown(e) => e.position,
            GameEvent::StructureTakedown(e) => e.position,
            GameEvent::Other { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: Option<String>,
    timestamp: Option<u64>,
    killer_id: Option<u32>,
    victim_id: Option<u32>,
    assisting_participant_ids: Option<Vec<u32>>,
    bounty: Option<u32>,
    shutdown_bounty: Option<u32>,
    position: Option<Position>,
    monster_type: Option<String>,
    monster_sub_type: Option<String>,
    killer_team_id: Option<u32>,
    team_id: Option<u32>,
    building_type: Option<String>,
    lane_type: Option<String>,
    tower_type: Option<String>,
}

fn missing(field: &str, event_type: &str) -> MomentError {
    MomentError::MalformedInput(format!("{} event without {}", event_type, field))
}

impl TryFrom<RawEvent> for GameEvent {
    type Error = MomentError;

    fn try_from(raw: RawEvent) -> Result<Self> {
        let event_type =
            raw.event_type.ok_or_else(|| MomentError::MalformedInput("event without type".into()))?;

        let event = match event_type.as_str() {
            CHAMPION_KILL => GameEvent::Elimination(EliminationEvent {
                timestamp_ms: raw.timestamp,
                killer_id: raw.killer_id.ok_or_else(|| missing("killerId", CHAMPION_KILL))?,
                victim_id: raw.victim_id.ok_or_else(|| missing("victimId", CHAMPION_KILL))?,
                assisting_ids: raw.assisting_participant_ids.unwrap_or_default(),
                bounty: raw.bounty.unwrap_or(0),
                shutdown_bounty: raw.shutdown_bounty.unwrap_or(0),
                position: raw.position,
            }),
            ELITE_MONSTER_KILL => {
                let monster_type =
                    raw.monster_type.ok_or_else(|| missing("monsterType", ELITE_MONSTER_KILL))?;
                GameEvent::EliteMonsterTakedown(MonsterEvent {
                    timestamp_ms: raw.timestamp,
                    monster_type: MonsterType::from_wire(&monster_type),
                    monster_sub_type: raw.monster_sub_type,
                    killer_id: raw.killer_id,
                    killer_team_id: raw.killer_team_id,
                    position: raw.position,
                })
            }
            BUILDING_KILL => GameEvent::StructureTakedown(StructureEvent {
                timestamp_ms: raw.timestamp,
                building_type: raw.building_type.ok_or_else(|| missing("buildingType", BUILDING_KILL))?,
                lane: raw.lane_type.unwrap_or_else(|| "UNKNOWN".to_string()),
                tower_type: raw.tower_type,
                killer_id: raw.killer_id,
                killer_team_id: raw.killer_team_id,
                owner_team_id: raw.team_id,
                position: raw.position,
            }),
            _ => GameEvent::Other { event_type, timestamp_ms: raw.timestamp },
        };

        Ok(event)
    }
}

impl GameEvent {
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw: RawEvent = serde_json::from_value(value.clone())?;
        GameEvent::try_from(raw)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChampionStats {
    pub health: f64,
    pub health_max: f64,
    pub armor: f64,
    pub magic_resist: f64,
    pub attack_damage: f64,
    pub ability_power: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DamageStats {
    pub total_damage_done: f64,
    pub total_damage_taken: f64,
}

/// Per-participant snapshot inside a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticipantFrame {
    pub participant_id: Option<u32>,
    pub position: Option<Position>,
    pub total_gold: i64,
    pub current_gold: i64,
    pub level: u32,
    pub xp: i64,
    pub minions_killed: u32,
    pub jungle_minions_killed: u32,
    pub champion_stats: ChampionStats,
    pub damage_stats: DamageStats,
}

/// Immutable game-state snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub timestamp_ms: u64,
    pub events: Vec<GameEvent>,
    pub participant_frames: BTreeMap<u32, ParticipantFrame>,
}

impl Frame {
    pub fn timestamp_minutes(&self) -> f64 {
        self.timestamp_ms as f64 / 60_000.0
    }

    pub fn participant(&self, participant_id: u32) -> Option<&ParticipantFrame> {
        self.participant_frames.get(&participant_id)
    }

    /// Parse one frame. Bad events and participant frames are dropped
    /// individually; only a missing frame timestamp rejects the frame.
    pub fn from_value(value: &Value) -> Result<Self> {
        let timestamp_ms = value
            .get("timestamp")
            .and_then(Value::as_u64)
            .ok_or_else(|| MomentError::MalformedInput("frame without timestamp".into()))?;

        let mut events = Vec::new();
        if let Some(raw_events) = value.get("events").and_then(Value::as_array) {
            for raw in raw_events {
                match GameEvent::from_value(raw) {
                    Ok(event) => events.push(event),
                    Err(e) => log::warn!("Skipping event in frame at {}ms: {}", timestamp_ms, e),
                }
            }
        }
        events.sort_by_key(|e| e.timestamp_ms().unwrap_or(timestamp_ms));

        let mut participant_frames = BTreeMap::new();
        if let Some(raw_frames) = value.get("participantFrames").and_then(Value::as_object) {
            for (key, raw) in raw_frames {
                let parsed: std::result::Result<ParticipantFrame, _> =
                    serde_json::from_value(raw.clone());
                let pf = match parsed {
                    Ok(pf) => pf,
                    Err(e) => {
                        log::warn!("Skipping participant frame {} at {}ms: {}", key, timestamp_ms, e);
                        continue;
                    }
                };
                match key.parse::<u32>().ok().or(pf.participant_id) {
                    Some(id) => {
                        participant_frames.insert(id, pf);
                    }
                    None => log::warn!("Participant frame key {:?} is not an id", key),
                }
            }
        }

        Ok(Frame { timestamp_ms, events, participant_frames })
    }
}
