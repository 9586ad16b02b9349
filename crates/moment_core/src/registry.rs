//! Participant lookup and target resolution for one match.

use std::collections::BTreeMap;

use crate::error::{MomentError, Result};
use crate::models::{MatchInfo, Participant};

/// Per-match roster keyed by participant id, with the tracked player resolved.
#[derive(Debug, Clone)]
pub struct ParticipantRegistry {
    participants: BTreeMap<u32, Participant>,
    target_id: u32,
    target_team: u32,
}

impl ParticipantRegistry {
    /// Build the roster and resolve `target_puuid`.
    pub fn resolve(match_info: &MatchInfo, target_puuid: &str) -> Result<Self> {
        let participants: BTreeMap<u32, Participant> = match_info
            .participants
            .iter()
            .map(|p| (p.participant_id, p.clone()))
            .collect();

        let target = participants
            .values()
            .find(|p| p.puuid == target_puuid)
            .ok_or_else(|| MomentError::TargetNotFound(target_puuid.to_string()))?;

        let target_id = target.participant_id;
        let target_team = target.team_id;

        Ok(Self { participants, target_id, target_team })
    }

    pub fn target_id(&self) -> u32 {
        self.target_id
    }

    pub fn target_team(&self) -> u32 {
        self.target_team
    }

    pub fn target(&self) -> &Participant {
        // resolve() only succeeds when the target is in the map
        &self.participants[&self.target_id]
    }

    pub fn get(&self, participant_id: u32) -> Option<&Participant> {
        self.participants.get(&participant_id)
    }

    pub fn team_of(&self, participant_id: u32) -> Option<u32> {
        self.get(participant_id).map(|p| p.team_id)
    }

    pub fn champion(&self, participant_id: u32) -> Option<String> {
        self.get(participant_id).map(|p| p.champion.clone())
    }

    pub fn display_name(&self, participant_id: u32) -> Option<String> {
        self.get(participant_id).map(|p| p.game_name.clone())
    }

    pub fn is_target_team(&self, participant_id: u32) -> bool {
        self.team_of(participant_id) == Some(self.target_team)
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn team_members(&self, team_id: u32) -> impl Iterator<Item = &Participant> {
        self.participants.values().filter(move |p| p.team_id == team_id)
    }
}
