//! Summoner spell cooldown estimation for the tracked player.
//!
//! The timeline never records spell casts, so the estimator only knows the
//! two equipped spells and a "last used" time that starts far in the past.
//! With no casts observed every spell reads as ready; the snapshot exists so
//! the narrator gets the spell names and a uniform shape. State is a plain
//! value: [`CooldownState::mark_used`] returns a new state instead of
//! mutating.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::Participant;

/// "Last used" for a spell never seen cast, in match minutes.
pub const NEVER_USED_MINUTES: f64 = -1000.0;

pub const TELEPORT: &str = "SummonerTeleport";
pub const UNKNOWN_SPELL: &str = "Unknown";

/// Spell durations and the numeric id → name mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCooldownTable {
    pub durations_seconds: BTreeMap<String, u32>,
    /// Duration for spells missing from `durations_seconds`
    pub default_seconds: u32,
    pub spell_ids: BTreeMap<u32, String>,
}

impl Default for SpellCooldownTable {
    fn default() -> Self {
        let durations_seconds = [
            ("SummonerFlash", 300),
            ("SummonerTeleport", 360),
            ("SummonerIgnite", 180),
            ("SummonerHeal", 240),
            ("SummonerBarrier", 180),
            ("SummonerExhaust", 210),
            ("SummonerSmite", 90),
            ("SummonerGhost", 180),
            ("SummonerCleanse", 210),
        ]
        .into_iter()
        .map(|(name, secs)| (name.to_string(), secs))
        .collect();

        let spell_ids = [
            (4, "SummonerFlash"),
            (12, "SummonerTeleport"),
            (14, "SummonerIgnite"),
            (7, "SummonerHeal"),
            (21, "SummonerBarrier"),
            (3, "SummonerExhaust"),
            (11, "SummonerSmite"),
            (6, "SummonerGhost"),
            (1, "SummonerCleanse"),
        ]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();

        Self { durations_seconds, default_seconds: 300, spell_ids }
    }
}

impl SpellCooldownTable {
    pub fn duration_seconds(&self, spell: &str) -> u32 {
        self.durations_seconds.get(spell).copied().unwrap_or(self.default_seconds)
    }

    pub fn spell_name(&self, id: Option<u32>) -> String {
        id.and_then(|id| self.spell_ids.get(&id))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SPELL.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpellSlot {
    pub spell: String,
    pub last_used_minutes: f64,
}

/// Two-slot cooldown state for one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownState {
    pub slots: [SpellSlot; 2],
}

impl CooldownState {
    pub fn new(spell1: impl Into<String>, spell2: impl Into<String>) -> Self {
        Self {
            slots: [
                SpellSlot { spell: spell1.into(), last_used_minutes: NEVER_USED_MINUTES },
                SpellSlot { spell: spell2.into(), last_used_minutes: NEVER_USED_MINUTES },
            ],
        }
    }

    pub fn for_participant(participant: &Participant, table: &SpellCooldownTable) -> Self {
        Self::new(table.spell_name(participant.summoner1_id), table.spell_name(participant.summoner2_id))
    }

    /// State after a cast in `slot` (0 or 1) at `at_minutes`. Out-of-range
    /// slots leave the state unchanged.
    pub fn mark_used(&self, slot: usize, at_minutes: f64) -> Self {
        let mut next = self.clone();
        if let Some(s) = next.slots.get_mut(slot) {
            s.last_used_minutes = at_minutes;
        }
        next
    }

    pub fn remaining_seconds(&self, slot: usize, table: &SpellCooldownTable, at_minutes: f64) -> u32 {
        let Some(s) = self.slots.get(slot) else {
            return 0;
        };
        let elapsed_seconds = (at_minutes - s.last_used_minutes) * 60.0;
        let remaining = table.duration_seconds(&s.spell) as f64 - elapsed_seconds;
        remaining.max(0.0) as u32
    }

    pub fn snapshot(&self, table: &SpellCooldownTable, at_minutes: f64) -> CooldownSnapshot {
        let slot = |idx: usize| SpellCooldown {
            spell: self.slots[idx].spell.clone(),
            remaining_seconds: self.remaining_seconds(idx, table, at_minutes),
        };
        let slot1 = slot(0);
        let slot2 = slot(1);
        let teleport_ready = [&slot1, &slot2]
            .iter()
            .any(|s| s.spell == TELEPORT && s.remaining_seconds == 0);

        CooldownSnapshot { slot1, slot2, teleport_ready }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpellCooldown {
    pub spell: String,
    pub remaining_seconds: u32,
}

/// Cooldowns at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CooldownSnapshot {
    pub slot1: SpellCooldown,
    pub slot2: SpellCooldown,
    /// Teleport equipped and off cooldown
    pub teleport_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_always_ready() {
        let table = SpellCooldownTable::default();
        let state = CooldownState::new("SummonerFlash", "SummonerTeleport");

        for minute in [0.0, 0.5, 12.0, 45.0] {
            let snap = state.snapshot(&table, minute);
            assert_eq!(snap.slot1.remaining_seconds, 0);
            assert_eq!(snap.slot2.remaining_seconds, 0);
            assert!(snap.teleport_ready);
        }
    }

    #[test]
    fn test_mark_used_is_pure() {
        let table = SpellCooldownTable::default();
        let state = CooldownState::new("SummonerFlash", "SummonerIgnite");
        let used = state.mark_used(0, 10.0);

        assert_eq!(state.remaining_seconds(0, &table, 11.0), 0);
        // 300s flash, 60s elapsed
        assert_eq!(used.remaining_seconds(0, &table, 11.0), 240);
        assert_eq!(used.remaining_seconds(1, &table, 11.0), 0);
        assert_eq!(used.remaining_seconds(0, &table, 15.0), 0);
        assert_eq!(used.mark_used(5, 1.0), used);
    }

    #[test]
    fn test_teleport_on_cooldown_not_ready() {
        let table = SpellCooldownTable::default();
        let state = CooldownState::new("SummonerFlash", "SummonerTeleport").mark_used(1, 20.0);
        let snap = state.snapshot(&table, 21.0);
        assert_eq!(snap.slot2.remaining_seconds, 300);
        assert!(!snap.teleport_ready);
    }

    #[test]
    fn test_no_teleport_equipped() {
        let table = SpellCooldownTable::default();
        let snap = CooldownState::new("SummonerFlash", "SummonerIgnite").snapshot(&table, 5.0);
        assert!(!snap.teleport_ready);
    }

    #[test]
    fn test_unknown_spells_default_duration() {
        let table = SpellCooldownTable::default();
        assert_eq!(table.spell_name(Some(99)), UNKNOWN_SPELL);
        assert_eq!(table.spell_name(None), UNKNOWN_SPELL);
        assert_eq!(table.spell_name(Some(12)), TELEPORT);
        assert_eq!(table.duration_seconds(UNKNOWN_SPELL), 300);
        assert_eq!(table.duration_seconds("SummonerSmite"), 90);
    }
}
