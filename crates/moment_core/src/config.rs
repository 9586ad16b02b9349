//! Engine configuration: scoring weights and lookup tables.
//!
//! Every heuristic constant the engine uses lives here so that variants can
//! be selected deliberately (see [`ScoringWeights::preset`]) and tuned from a
//! YAML or JSON file without code changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cooldown::SpellCooldownTable;
use crate::error::{MomentError, Result};
use crate::models::{MonsterType, StructureEvent};

/// Score weights for single events and team fights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub elimination_base: i64,
    /// Assist count at which a kill counts as a group kill
    pub many_assists_threshold: usize,
    pub many_assists_bonus: i64,
    /// Bounty strictly above this earns `bounty_bonus`
    pub bounty_threshold: u32,
    pub bounty_bonus: i64,
    pub killer_bonus: i64,
    pub victim_bonus: i64,
    pub objective_own_team_bonus: i64,
    pub objective_enemy_team_bonus: i64,
    pub structure_own_team_bonus: i64,
    pub structure_enemy_team_bonus: i64,
    pub team_fight_base: i64,
    pub team_fight_per_kill: i64,
}

impl ScoringWeights {
    /// Bounty bonus +20, team fight `150 + 50 * kills`.
    pub fn standard() -> Self {
        Self {
            elimination_base: 50,
            many_assists_threshold: 3,
            many_assists_bonus: 30,
            bounty_threshold: 500,
            bounty_bonus: 20,
            killer_bonus: 20,
            victim_bonus: 25,
            objective_own_team_bonus: 50,
            objective_enemy_team_bonus: 30,
            structure_own_team_bonus: 40,
            structure_enemy_team_bonus: 25,
            team_fight_base: 150,
            team_fight_per_kill: 50,
        }
    }

    /// Bounty bonus +100, team fight `100 + 20 * kills`.
    pub fn legacy() -> Self {
        Self {
            bounty_bonus: 100,
            team_fight_base: 100,
            team_fight_per_kill: 20,
            ..Self::standard()
        }
    }

    /// Resolve a preset by name. Unknown names fall back to "standard".
    pub fn preset(name: &str) -> Self {
        match name {
            "standard" => Self::standard(),
            "legacy" => Self::legacy(),
            other => {
                log::warn!("Unknown scoring preset {:?}, using standard", other);
                Self::standard()
            }
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Base values for objectives and structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveValues {
    pub dragon: i64,
    pub baron_nashor: i64,
    pub rift_herald: i64,
    pub horde: i64,
    pub unknown_monster: i64,
    pub inhibitor: i64,
    pub outer_turret: i64,
    pub inner_turret: i64,
    pub base_turret: i64,
    pub nexus_turret: i64,
    pub unknown_structure: i64,
}

impl Default for ObjectiveValues {
    fn default() -> Self {
        Self {
            dragon: 1000,
            baron_nashor: 3000,
            rift_herald: 1500,
            horde: 500,
            unknown_monster: 500,
            inhibitor: 1500,
            outer_turret: 800,
            inner_turret: 1000,
            base_turret: 1200,
            nexus_turret: 1500,
            unknown_structure: 800,
        }
    }
}

impl ObjectiveValues {
    pub fn monster_value(&self, monster: &MonsterType) -> i64 {
        match monster {
            MonsterType::Dragon => self.dragon,
            MonsterType::BaronNashor => self.baron_nashor,
            MonsterType::RiftHerald => self.rift_herald,
            MonsterType::Horde => self.horde,
            MonsterType::Other(_) => self.unknown_monster,
        }
    }

    pub fn structure_value(&self, structure: &StructureEvent) -> i64 {
        if structure.is_inhibitor() {
            return self.inhibitor;
        }
        match structure.tower_type.as_deref() {
            Some("OUTER_TURRET") => self.outer_turret,
            Some("INNER_TURRET") => self.inner_turret,
            Some("BASE_TURRET") => self.base_turret,
            Some("NEXUS_TURRET") => self.nexus_turret,
            _ => self.unknown_structure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamFightConfig {
    /// Cluster window measured from the cluster's first kill
    pub window_minutes: f64,
    pub min_kills: usize,
    /// Distinct champions named by the cluster's kills; id 0 (turret or
    /// minion executions) never counts
    pub min_participants: usize,
}

impl Default for TeamFightConfig {
    fn default() -> Self {
        Self { window_minutes: 0.5, min_kills: 3, min_participants: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    pub early_until_minutes: f64,
    pub mid_until_minutes: f64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self { early_until_minutes: 15.0, mid_until_minutes: 25.0 }
    }
}

/// Immutable configuration handed to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringWeights,
    pub objective_values: ObjectiveValues,
    pub cooldowns: SpellCooldownTable,
    pub team_fight: TeamFightConfig,
    pub phases: PhaseThresholds,
    pub gold_state_threshold: i64,
    pub max_moments: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringWeights::default(),
            objective_values: ObjectiveValues::default(),
            cooldowns: SpellCooldownTable::default(),
            team_fight: TeamFightConfig::default(),
            phases: PhaseThresholds::default(),
            gold_state_threshold: 1000,
            max_moments: 15,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| MomentError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");

        let config = if is_json { Self::from_json_str(&contents)? } else { Self::from_yaml_str(&contents)? };
        log::debug!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MomentError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.team_fight.window_minutes > 0.0) {
            return Err(MomentError::InvalidConfig(format!(
                "team_fight.window_minutes must be positive, got {}",
                self.team_fight.window_minutes
            )));
        }
        if self.team_fight.min_kills == 0 {
            return Err(MomentError::InvalidConfig("team_fight.min_kills must be at least 1".into()));
        }
        if self.max_moments == 0 {
            return Err(MomentError::InvalidConfig("max_moments must be at least 1".into()));
        }
        if self.phases.early_until_minutes > self.phases.mid_until_minutes {
            return Err(MomentError::InvalidConfig(format!(
                "phases out of order: early {} > mid {}",
                self.phases.early_until_minutes, self.phases.mid_until_minutes
            )));
        }
        if self.gold_state_threshold < 0 {
            return Err(MomentError::InvalidConfig("gold_state_threshold must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn structure(building: &str, tower: Option<&str>) -> StructureEvent {
        StructureEvent {
            timestamp_ms: None,
            building_type: building.to_string(),
            lane: "MID_LANE".to_string(),
            tower_type: tower.map(str::to_string),
            killer_id: None,
            killer_team_id: None,
            owner_team_id: None,
            position: None,
        }
    }

    #[test]
    fn test_presets() {
        let standard = ScoringWeights::preset("standard");
        assert_eq!(standard.bounty_bonus, 20);
        assert_eq!((standard.team_fight_base, standard.team_fight_per_kill), (150, 50));

        let legacy = ScoringWeights::preset("legacy");
        assert_eq!(legacy.bounty_bonus, 100);
        assert_eq!((legacy.team_fight_base, legacy.team_fight_per_kill), (100, 20));
        assert_eq!(legacy.victim_bonus, standard.victim_bonus);

        assert_eq!(ScoringWeights::preset("bogus"), standard);
    }

    #[test]
    fn test_monster_values() {
        let values = ObjectiveValues::default();
        assert_eq!(values.monster_value(&MonsterType::Dragon), 1000);
        assert_eq!(values.monster_value(&MonsterType::BaronNashor), 3000);
        assert_eq!(values.monster_value(&MonsterType::RiftHerald), 1500);
        assert_eq!(values.monster_value(&MonsterType::Horde), 500);
        assert_eq!(values.monster_value(&MonsterType::Other("ATAKHAN".into())), 500);
    }

    #[test]
    fn test_structure_values() {
        let values = ObjectiveValues::default();
        assert_eq!(values.structure_value(&structure("INHIBITOR_BUILDING", None)), 1500);
        assert_eq!(values.structure_value(&structure("TOWER_BUILDING", Some("OUTER_TURRET"))), 800);
        assert_eq!(values.structure_value(&structure("TOWER_BUILDING", Some("INNER_TURRET"))), 1000);
        assert_eq!(values.structure_value(&structure("TOWER_BUILDING", Some("NEXUS_TURRET"))), 1500);
        assert_eq!(values.structure_value(&structure("TOWER_BUILDING", None)), 800);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "max_moments: 5\nscoring:\n  bounty_bonus: 100\nteam_fight:\n  min_kills: 4\n";
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.max_moments, 5);
        assert_eq!(config.scoring.bounty_bonus, 100);
        assert_eq!(config.scoring.elimination_base, 50);
        assert_eq!(config.team_fight.min_kills, 4);
        assert_eq!(config.team_fight.min_participants, 6);
        assert_eq!(config.objective_values.baron_nashor, 3000);
    }

    #[test]
    fn test_json_config() {
        let config = EngineConfig::from_json_str(r#"{"gold_state_threshold": 500}"#).unwrap();
        assert_eq!(config.gold_state_threshold, 500);
        assert_eq!(config.max_moments, 15);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_yaml_str("max_moments: 0"),
            Err(MomentError::InvalidConfig(_))
        ));
        assert!(EngineConfig::from_yaml_str("team_fight:\n  window_minutes: 0.0").is_err());
        assert!(EngineConfig::from_yaml_str("phases:\n  early_until_minutes: 30.0").is_err());
        assert!(EngineConfig::from_json_str("{\"max_moments\": \"many\"}").is_err());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("engine.yaml");
        let mut f = std::fs::File::create(&yaml_path).unwrap();
        writeln!(f, "max_moments: 7").unwrap();
        assert_eq!(EngineConfig::load(&yaml_path).unwrap().max_moments, 7);

        let json_path = dir.path().join("engine.json");
        std::fs::write(&json_path, r#"{"max_moments": 9}"#).unwrap();
        assert_eq!(EngineConfig::load(&json_path).unwrap().max_moments, 9);

        assert!(matches!(
            EngineConfig::load(dir.path().join("missing.yaml")),
            Err(MomentError::Io(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = EngineConfig::default().to_yaml().unwrap();
        assert_eq!(EngineConfig::from_yaml_str(&yaml).unwrap(), EngineConfig::default());
    }
}
