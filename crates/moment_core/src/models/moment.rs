//! The engine's output record and its labels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::config::PhaseThresholds;
use crate::cooldown::CooldownSnapshot;
use crate::spatial::{MapRegion, PlayerLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MomentKind {
    #[serde(rename = "KILL")]
    Elimination,
    #[serde(rename = "OBJECTIVE")]
    Objective,
    #[serde(rename = "STRUCTURE")]
    Structure,
    #[serde(rename = "TEAMFIGHT")]
    TeamFight,
}

impl MomentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentKind::Elimination => "KILL",
            MomentKind::Objective => "OBJECTIVE",
            MomentKind::Structure => "STRUCTURE",
            MomentKind::TeamFight => "TEAMFIGHT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

impl GamePhase {
    pub fn at(minutes: f64, thresholds: &PhaseThresholds) -> Self {
        if minutes < thresholds.early_until_minutes {
            GamePhase::Early
        } else if minutes < thresholds.mid_until_minutes {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GoldState {
    Ahead,
    Behind,
    Even,
}

impl GoldState {
    /// `difference` is signed so that positive means the tracked team leads.
    pub fn from_difference(difference: i64, threshold: i64) -> Self {
        if difference > threshold {
            GoldState::Ahead
        } else if difference < -threshold {
            GoldState::Behind
        } else {
            GoldState::Even
        }
    }
}

/// Which side, relative to the tracked player, performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamSide {
    PlayerTeam,
    EnemyTeam,
}

impl TeamSide {
    pub fn from_is_player_team(is_player_team: bool) -> Self {
        if is_player_team {
            TeamSide::PlayerTeam
        } else {
            TeamSide::EnemyTeam
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Killer,
    Victim,
    Assistant,
    TeamInvolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FightOutcome {
    Won,
    Lost,
    Even,
}

impl FightOutcome {
    pub fn from_kills(player_team_kills: usize, enemy_team_kills: usize) -> Self {
        match player_team_kills.cmp(&enemy_team_kills) {
            std::cmp::Ordering::Greater => FightOutcome::Won,
            std::cmp::Ordering::Less => FightOutcome::Lost,
            std::cmp::Ordering::Equal => FightOutcome::Even,
        }
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MomentDetails {
    Elimination {
        killer: Option<String>,
        killer_name: Option<String>,
        victim: Option<String>,
        victim_name: Option<String>,
        assistants: Vec<String>,
        bounty: u32,
        position: Position,
        region: MapRegion,
        player_role: PlayerRole,
    },
    Objective {
        monster_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        monster_sub_type: Option<String>,
        securing_team: TeamSide,
        #[serde(skip_serializing_if = "Option::is_none")]
        killer_id: Option<u32>,
        position: Position,
        region: MapRegion,
    },
    Structure {
        structure_type: String,
        lane: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tower_type: Option<String>,
        destroying_team: TeamSide,
        position: Position,
        region: MapRegion,
    },
    TeamFight {
        kills_count: usize,
        participants_count: usize,
        player_team_kills: usize,
        enemy_team_kills: usize,
        outcome: FightOutcome,
        duration_seconds: u32,
        /// Mean of the kill positions in the cluster
        position: Position,
        region: MapRegion,
    },
}

impl MomentDetails {
    /// Where the moment happened; the cluster centroid for team fights.
    pub fn position(&self) -> Position {
        match self {
            MomentDetails::Elimination { position, .. }
            | MomentDetails::Objective { position, .. }
            | MomentDetails::Structure { position, .. }
            | MomentDetails::TeamFight { position, .. } => *position,
        }
    }

    pub fn region(&self) -> MapRegion {
        match self {
            MomentDetails::Elimination { region, .. }
            | MomentDetails::Objective { region, .. }
            | MomentDetails::Structure { region, .. }
            | MomentDetails::TeamFight { region, .. } => *region,
        }
    }
}

/// Game-state snapshot attached to every moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MomentContext {
    pub gold_difference: i64,
    pub gold_state: GoldState,
    pub player_location: Option<PlayerLocation>,
    pub summoner_spells: CooldownSnapshot,
}

/// One extracted, scored and contextualised event or event cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CriticalMoment {
    pub id: String,
    pub kind: MomentKind,
    pub timestamp_minutes: f64,
    pub impact_score: u32,
    pub game_phase: GamePhase,
    pub details: MomentDetails,
    pub context: MomentContext,
}

/// Structural identity used to drop near-duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MomentFingerprint {
    /// Timestamp rounded to the nearest tenth of a minute, in tenths
    pub tenth_minute: i64,
    pub kind: MomentKind,
    pub discriminant: Option<String>,
}

impl CriticalMoment {
    pub fn fingerprint(&self) -> MomentFingerprint {
        let discriminant = match &self.details {
            MomentDetails::Objective { monster_type, .. } => Some(monster_type.clone()),
            MomentDetails::Structure { structure_type, lane, .. } => {
                Some(format!("{}:{}", structure_type, lane))
            }
            MomentDetails::Elimination { .. } | MomentDetails::TeamFight { .. } => None,
        };

        MomentFingerprint {
            tenth_minute: (self.timestamp_minutes * 10.0).round() as i64,
            kind: self.kind,
            discriminant,
        }
    }
}

/// `KILL_12.3_1a2b3c4d` style identifier.
pub fn moment_id(kind: MomentKind, timestamp_minutes: f64) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{:.1}_{}", kind.as_str(), timestamp_minutes, &suffix[..8])
}
