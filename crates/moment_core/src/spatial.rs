//! Spatial context: coarse map regions, proximity buckets and where the
//! tracked player stood relative to an event.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{Frame, Position};

/// x below this is bottom side
pub const REGION_X_LOW: f64 = 4800.0;
/// x above this is top side
pub const REGION_X_HIGH: f64 = 9600.0;
/// Inside the middle x band, y above this is the top jungle
pub const REGION_Y_HIGH: f64 = 8400.0;
/// Inside the middle x band, y below this is the bottom jungle
pub const REGION_Y_LOW: f64 = 6000.0;

pub const PROXIMITY_IMMEDIATE: f64 = 1500.0;
pub const PROXIMITY_CLOSE: f64 = 3000.0;
pub const PROXIMITY_MEDIUM: f64 = 5000.0;
pub const PROXIMITY_FAR: f64 = 8000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapRegion {
    TopLane,
    TopJungle,
    Mid,
    BotJungle,
    BotLane,
}

impl MapRegion {
    /// Deterministic partition of the map into five regions.
    pub fn classify(position: &Position) -> Self {
        if position.x < REGION_X_LOW {
            MapRegion::BotLane
        } else if position.x > REGION_X_HIGH {
            MapRegion::TopLane
        } else if position.y > REGION_Y_HIGH {
            MapRegion::TopJungle
        } else if position.y < REGION_Y_LOW {
            MapRegion::BotJungle
        } else {
            MapRegion::Mid
        }
    }

    pub fn is_top_side(&self) -> bool {
        matches!(self, MapRegion::TopLane | MapRegion::TopJungle)
    }

    pub fn is_bot_side(&self) -> bool {
        matches!(self, MapRegion::BotLane | MapRegion::BotJungle)
    }
}

/// Ordered distance buckets, nearest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProximityBucket {
    Immediate,
    Close,
    Medium,
    Far,
    VeryFar,
}

impl ProximityBucket {
    pub fn from_distance(distance: f64) -> Self {
        if distance < PROXIMITY_IMMEDIATE {
            ProximityBucket::Immediate
        } else if distance < PROXIMITY_CLOSE {
            ProximityBucket::Close
        } else if distance < PROXIMITY_MEDIUM {
            ProximityBucket::Medium
        } else if distance < PROXIMITY_FAR {
            ProximityBucket::Far
        } else {
            ProximityBucket::VeryFar
        }
    }
}

pub fn distance(a: &Position, b: &Position) -> f64 {
    a.distance_to(b)
}

/// Where a participant was relative to a reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerLocation {
    pub position: Position,
    pub region: MapRegion,
    pub distance_to_event: f64,
    pub proximity: ProximityBucket,
}

/// Position, region and distance of `participant_id` at `frame` relative to
/// `reference`. `None` when the frame has no position for the participant.
pub fn player_location(frame: &Frame, participant_id: u32, reference: &Position) -> Option<PlayerLocation> {
    let position = frame.participant(participant_id)?.position?;
    let distance_to_event = position.distance_to(reference);

    Some(PlayerLocation {
        position,
        region: MapRegion::classify(&position),
        distance_to_event,
        proximity: ProximityBucket::from_distance(distance_to_event),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticipantFrame;
    use proptest::prelude::*;

    #[test]
    fn test_region_examples() {
        assert_eq!(MapRegion::classify(&Position::new(2000.0, 2000.0)), MapRegion::BotLane);
        assert_eq!(MapRegion::classify(&Position::new(12000.0, 12000.0)), MapRegion::TopLane);
        assert_eq!(MapRegion::classify(&Position::new(7200.0, 7200.0)), MapRegion::Mid);
        assert_eq!(MapRegion::classify(&Position::new(7200.0, 11000.0)), MapRegion::TopJungle);
        assert_eq!(MapRegion::classify(&Position::new(7200.0, 3000.0)), MapRegion::BotJungle);
    }

    #[test]
    fn test_region_boundaries() {
        // thresholds are strict
        assert_eq!(MapRegion::classify(&Position::new(4800.0, 7200.0)), MapRegion::Mid);
        assert_eq!(MapRegion::classify(&Position::new(9600.0, 7200.0)), MapRegion::Mid);
        assert_eq!(MapRegion::classify(&Position::new(7200.0, 8400.0)), MapRegion::Mid);
        assert_eq!(MapRegion::classify(&Position::new(7200.0, 6000.0)), MapRegion::Mid);
        assert!(MapRegion::TopJungle.is_top_side());
        assert!(MapRegion::BotLane.is_bot_side());
    }

    #[test]
    fn test_proximity_buckets() {
        assert_eq!(ProximityBucket::from_distance(0.0), ProximityBucket::Immediate);
        assert_eq!(ProximityBucket::from_distance(1499.9), ProximityBucket::Immediate);
        assert_eq!(ProximityBucket::from_distance(1500.0), ProximityBucket::Close);
        assert_eq!(ProximityBucket::from_distance(2999.0), ProximityBucket::Close);
        assert_eq!(ProximityBucket::from_distance(3000.0), ProximityBucket::Medium);
        assert_eq!(ProximityBucket::from_distance(5000.0), ProximityBucket::Far);
        assert_eq!(ProximityBucket::from_distance(8000.0), ProximityBucket::VeryFar);
        assert!(ProximityBucket::Immediate < ProximityBucket::VeryFar);
    }

    #[test]
    fn test_player_location() {
        let mut frame = Frame { timestamp_ms: 60_000, ..Default::default() };
        frame.participant_frames.insert(
            3,
            ParticipantFrame { position: Some(Position::new(1000.0, 1000.0)), ..Default::default() },
        );
        frame.participant_frames.insert(4, ParticipantFrame::default());

        let loc = player_location(&frame, 3, &Position::new(4000.0, 5000.0)).unwrap();
        assert_eq!(loc.distance_to_event, 5000.0);
        assert_eq!(loc.proximity, ProximityBucket::Far);
        assert_eq!(loc.region, MapRegion::BotLane);

        assert!(player_location(&frame, 4, &Position::CENTER).is_none());
        assert!(player_location(&frame, 9, &Position::CENTER).is_none());
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric_and_non_negative(
            ax in 0.0f64..14400.0, ay in 0.0f64..14400.0,
            bx in 0.0f64..14400.0, by in 0.0f64..14400.0
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert!(distance(&a, &b) >= 0.0);
            prop_assert!((distance(&a, &b) - distance(&b, &a)).abs() < 1e-9);
        }

        #[test]
        fn prop_region_side_matches_x_band(x in 0.0f64..14400.0, y in 0.0f64..14400.0) {
            let region = MapRegion::classify(&Position::new(x, y));
            if x < REGION_X_LOW {
                prop_assert_eq!(region, MapRegion::BotLane);
            } else if x > REGION_X_HIGH {
                prop_assert_eq!(region, MapRegion::TopLane);
            } else {
                prop_assert!(matches!(region, MapRegion::TopJungle | MapRegion::Mid | MapRegion::BotJungle));
            }
        }
    }
}
