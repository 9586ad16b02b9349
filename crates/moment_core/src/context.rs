//! Per-moment game state for the narration stage.
//!
//! None of this feeds back into scoring or ranking. It looks up the frame
//! nearest a moment and summarises the tracked player, both teams and the
//! player's distance to the action.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::frames::FrameStream;
use crate::models::{CriticalMoment, Frame, GoldState, Position};
use crate::registry::ParticipantRegistry;
use crate::spatial::{MapRegion, ProximityBucket};

/// Rough creep score expected per minute of game time
pub const EXPECTED_CS_PER_MINUTE: f64 = 4.0;
/// CS lead or deficit beyond which the lane counts as won or lost
pub const LANE_CS_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerFrameStats {
    pub level: u32,
    pub total_gold: i64,
    pub current_gold: i64,
    /// Lane plus jungle minions
    pub creep_score: u32,
    pub health_percent: u32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub position: Option<Position>,
}

pub fn player_frame_stats(frame: &Frame, participant_id: u32) -> Option<PlayerFrameStats> {
    let pf = frame.participant(participant_id)?;
    let health = &pf.champion_stats;

    Some(PlayerFrameStats {
        level: pf.level,
        total_gold: pf.total_gold,
        current_gold: pf.current_gold,
        creep_score: pf.minions_killed + pf.jungle_minions_killed,
        health_percent: (health.health / health.health_max.max(1.0) * 100.0).clamp(0.0, 100.0) as u32,
        damage_dealt: pf.damage_stats.total_damage_done,
        damage_taken: pf.damage_stats.total_damage_taken,
        position: pf.position,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamStats {
    pub team_id: u32,
    pub total_gold: i64,
    pub average_level: f64,
    pub member_count: usize,
}

/// Totals over every rostered member of `team_id`. Members without a frame
/// entry count as zero gold and level 0.
pub fn team_stats(frame: &Frame, registry: &ParticipantRegistry, team_id: u32) -> TeamStats {
    let (member_count, total_gold, level_sum) =
        registry.team_members(team_id).fold((0usize, 0i64, 0u32), |(n, gold, levels), p| {
            match frame.participant(p.participant_id) {
                Some(pf) => (n + 1, gold + pf.total_gold, levels + pf.level),
                None => (n + 1, gold, levels),
            }
        });

    TeamStats {
        team_id,
        total_gold,
        average_level: level_sum as f64 / member_count.max(1) as f64,
        member_count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationContext {
    pub player_position: Position,
    pub event_position: Position,
    pub distance: f64,
    pub proximity: ProximityBucket,
    pub event_region: MapRegion,
}

pub fn location_context(player_position: &Position, event_position: &Position) -> LocationContext {
    let distance = player_position.distance_to(event_position);
    LocationContext {
        player_position: *player_position,
        event_position: *event_position,
        distance,
        proximity: ProximityBucket::from_distance(distance),
        event_region: MapRegion::classify(event_position),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LaneState {
    AheadInLane,
    BehindInLane,
    EvenInLane,
}

impl LaneState {
    pub fn from_creep_score(creep_score: u32, minutes: f64) -> Self {
        let diff = creep_score as f64 - minutes * EXPECTED_CS_PER_MINUTE;
        if diff > LANE_CS_MARGIN {
            LaneState::AheadInLane
        } else if diff < -LANE_CS_MARGIN {
            LaneState::BehindInLane
        } else {
            LaneState::EvenInLane
        }
    }
}

/// Everything the narrator gets about one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NarrationContext {
    pub moment_id: String,
    pub frame_index: usize,
    pub frame_timestamp_minutes: f64,
    pub player: Option<PlayerFrameStats>,
    pub player_team: TeamStats,
    pub enemy_team: TeamStats,
    pub gold_difference: i64,
    /// Average level difference, rounded to one decimal
    pub level_difference: f64,
    pub gold_state: GoldState,
    pub lane_state: Option<LaneState>,
    pub location: Option<LocationContext>,
}

impl NarrationContext {
    /// `None` when the timeline has no frames.
    pub fn build(
        moment: &CriticalMoment,
        frames: &FrameStream,
        registry: &ParticipantRegistry,
        config: &EngineConfig,
    ) -> Option<Self> {
        let (frame_index, frame) = frames.nearest(moment.timestamp_minutes)?;

        let own_team = registry.target_team();
        let enemy_team_id = registry
            .participants()
            .map(|p| p.team_id)
            .find(|team| *team != own_team)
            .unwrap_or(0);

        let player_team = team_stats(frame, registry, own_team);
        let enemy_team = team_stats(frame, registry, enemy_team_id);
        let gold_difference = player_team.total_gold - enemy_team.total_gold;
        let level_difference = ((player_team.average_level - enemy_team.average_level) * 10.0).round() / 10.0;

        let player = player_frame_stats(frame, registry.target_id());
        let lane_state = player
            .as_ref()
            .map(|p| LaneState::from_creep_score(p.creep_score, moment.timestamp_minutes));
        let location = player
            .as_ref()
            .and_then(|p| p.position)
            .map(|pos| location_context(&pos, &moment.details.position()));

        Some(NarrationContext {
            moment_id: moment.id.clone(),
            frame_index,
            frame_timestamp_minutes: frame.timestamp_minutes(),
            player,
            player_team,
            enemy_team,
            gold_difference,
            level_difference,
            gold_state: GoldState::from_difference(gold_difference, config.gold_state_threshold),
            lane_state,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MomentExtractor;
    use crate::models::MatchInfo;
    use serde_json::json;

    fn fixture() -> (MatchInfo, FrameStream) {
        let participants: Vec<_> = (1..=4)
            .map(|id| json!({"participantId": id, "puuid": format!("p{}", id), "teamId": if id <= 2 { 100 } else { 200 }}))
            .collect();
        let info = MatchInfo::from_value(&json!({"info": {"participants": participants}})).unwrap();

        let pf = |gold: i64, level: u32, x: f64| {
            json!({
                "totalGold": gold, "currentGold": 300, "level": level,
                "minionsKilled": 40, "jungleMinionsKilled": 8,
                "position": {"x": x, "y": 2000.0},
                "championStats": {"health": 450.0, "healthMax": 900.0},
                "damageStats": {"totalDamageDone": 5200.0, "totalDamageTaken": 3100.0}
            })
        };
        let frames = FrameStream::from_value(&json!({"info": {"frames": [
            {"timestamp": 0, "participantFrames": {}},
            {"timestamp": 600000, "participantFrames": {
                "1": pf(4000, 9, 2000.0), "2": pf(3500, 8, 3000.0),
                "3": pf(3000, 8, 9000.0), "4": pf(2000, 7, 9500.0)
            }, "events": [
                {"type": "CHAMPION_KILL", "timestamp": 590000, "killerId": 1, "victimId": 3,
                 "position": {"x": 3000, "y": 2000}}
            ]}
        ]}}))
        .unwrap();
        (info, frames)
    }

    #[test]
    fn test_player_frame_stats() {
        let (_, frames) = fixture();
        let stats = player_frame_stats(&frames.frames()[1], 1).unwrap();
        assert_eq!(stats.creep_score, 48);
        assert_eq!(stats.health_percent, 50);
        assert_eq!(stats.damage_dealt, 5200.0);
        assert!(player_frame_stats(&frames.frames()[0], 1).is_none());
    }

    #[test]
    fn test_team_stats() {
        let (info, frames) = fixture();
        let registry = ParticipantRegistry::resolve(&info, "p1").unwrap();
        let stats = team_stats(&frames.frames()[1], &registry, 200);
        assert_eq!(stats.total_gold, 5000);
        assert_eq!(stats.average_level, 7.5);
        assert_eq!(stats.member_count, 2);

        let empty = team_stats(&frames.frames()[0], &registry, 100);
        assert_eq!((empty.total_gold, empty.average_level), (0, 0.0));
    }

    #[test]
    fn test_location_context() {
        let ctx = location_context(&Position::new(0.0, 0.0), &Position::new(3000.0, 4000.0));
        assert_eq!(ctx.distance, 5000.0);
        assert_eq!(ctx.proximity, ProximityBucket::Far);
        assert_eq!(ctx.event_region, MapRegion::BotLane);
    }

    #[test]
    fn test_lane_state() {
        assert_eq!(LaneState::from_creep_score(60, 10.0), LaneState::AheadInLane);
        assert_eq!(LaneState::from_creep_score(29, 10.0), LaneState::BehindInLane);
        assert_eq!(LaneState::from_creep_score(45, 10.0), LaneState::EvenInLane);
    }

    #[test]
    fn test_narration_context_for_extracted_moment() {
        let (info, frames) = fixture();
        let config = EngineConfig::default();
        let moments = MomentExtractor::new(config.clone()).extract(&info, &frames, "p1");
        assert_eq!(moments.len(), 1);

        let registry = ParticipantRegistry::resolve(&info, "p1").unwrap();
        let ctx = NarrationContext::build(&moments[0], &frames, &registry, &config).unwrap();
        assert_eq!(ctx.frame_index, 1);
        assert_eq!(ctx.gold_difference, 2500);
        assert_eq!(ctx.gold_state, GoldState::Ahead);
        assert_eq!(ctx.level_difference, 1.0);
        assert_eq!(ctx.lane_state, Some(LaneState::EvenInLane));

        let location = ctx.location.unwrap();
        assert_eq!(location.distance, 1000.0);
        assert_eq!(location.proximity, ProximityBucket::Immediate);
    }
}
