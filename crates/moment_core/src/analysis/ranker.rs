//! Deduplication and top-K ranking of extracted moments.

use std::collections::HashSet;

use crate::models::CriticalMoment;

/// Drop moments whose fingerprint was already seen; the first one wins.
pub fn deduplicate(moments: Vec<CriticalMoment>) -> Vec<CriticalMoment> {
    let mut seen = HashSet::new();
    let before = moments.len();

    let unique: Vec<CriticalMoment> = moments.into_iter().filter(|m| seen.insert(m.fingerprint())).collect();

    if unique.len() < before {
        log::debug!("Dropped {} duplicate moments", before - unique.len());
    }
    unique
}

/// Deduplicate, sort by impact descending (ties keep discovery order) and
/// keep at most `max_moments`.
pub fn rank(moments: Vec<CriticalMoment>, max_moments: usize) -> Vec<CriticalMoment> {
    let mut ranked = deduplicate(moments);
    ranked.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
    ranked.truncate(max_moments);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooldown::{CooldownSnapshot, SpellCooldown};
    use crate::models::{
        GamePhase, GoldState, MomentContext, MomentDetails, MomentKind, PlayerRole, Position, TeamSide,
    };
    use crate::spatial::MapRegion;
    use proptest::prelude::*;

    fn context() -> MomentContext {
        let ready = |spell: &str| SpellCooldown { spell: spell.to_string(), remaining_seconds: 0 };
        MomentContext {
            gold_difference: 0,
            gold_state: GoldState::Even,
            player_location: None,
            summoner_spells: CooldownSnapshot {
                slot1: ready("SummonerFlash"),
                slot2: ready("SummonerIgnite"),
                teleport_ready: false,
            },
        }
    }

    fn kill(id: &str, ts: f64, score: u32) -> CriticalMoment {
        CriticalMoment {
            id: id.to_string(),
            kind: MomentKind::Elimination,
            timestamp_minutes: ts,
            impact_score: score,
            game_phase: GamePhase::Early,
            details: MomentDetails::Elimination {
                killer: None,
                killer_name: None,
                victim: None,
                victim_name: None,
                assistants: vec![],
                bounty: 0,
                position: Position::CENTER,
                region: MapRegion::Mid,
                player_role: PlayerRole::Killer,
            },
            context: context(),
        }
    }

    fn objective(id: &str, ts: f64, monster: &str, score: u32) -> CriticalMoment {
        CriticalMoment {
            id: id.to_string(),
            kind: MomentKind::Objective,
            timestamp_minutes: ts,
            impact_score: score,
            game_phase: GamePhase::Mid,
            details: MomentDetails::Objective {
                monster_type: monster.to_string(),
                monster_sub_type: None,
                securing_team: TeamSide::PlayerTeam,
                killer_id: None,
                position: Position::CENTER,
                region: MapRegion::Mid,
            },
            context: context(),
        }
    }

    fn ids(moments: &[CriticalMoment]) -> Vec<&str> {
        moments.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_same_tenth_minute_kills_collapse() {
        // 10.02 and 10.04 both round to 10.0
        let ranked = rank(vec![kill("a", 10.02, 70), kill("b", 10.04, 120), kill("c", 10.2, 50)], 15);
        assert_eq!(ids(&ranked), vec!["a", "c"]);
    }

    #[test]
    fn test_discriminant_keeps_distinct_objectives() {
        let ranked = rank(
            vec![
                objective("dragon", 20.0, "DRAGON", 1030),
                objective("herald", 20.0, "RIFTHERALD", 1550),
                objective("dragon2", 20.01, "DRAGON", 1050),
            ],
            15,
        );
        assert_eq!(ids(&ranked), vec!["herald", "dragon"]);
    }

    #[test]
    fn test_ties_keep_discovery_order_and_truncate() {
        let moments = (0..20).map(|i| kill(&format!("k{}", i), i as f64, 100)).collect();
        let ranked = rank(moments, 15);
        assert_eq!(ranked.len(), 15);
        assert_eq!(ranked[0].id, "k0");
        assert_eq!(ranked[14].id, "k14");
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(vec![], 15).is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranked_output_invariants(
            entries in prop::collection::vec((0u32..600, 0u32..5000), 0..60),
            max in 1usize..20
        ) {
            let moments: Vec<CriticalMoment> = entries
                .iter()
                .enumerate()
                .map(|(i, (tenths, score))| kill(&i.to_string(), *tenths as f64 / 10.0, *score))
                .collect();
            let ranked = rank(moments, max);

            prop_assert!(ranked.len() <= max);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].impact_score >= pair[1].impact_score);
            }
            let fingerprints: HashSet<_> = ranked.iter().map(|m| m.fingerprint()).collect();
            prop_assert_eq!(fingerprints.len(), ranked.len());
        }
    }
}
