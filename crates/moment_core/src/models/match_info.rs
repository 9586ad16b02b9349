//! Match metadata: the participant roster and overall duration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MomentError, Result};

/// One of the ten players in a match. Built once, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    /// Per-match participant id (1..=10)
    pub participant_id: u32,
    /// Match-scoped external player identifier
    pub puuid: String,
    pub game_name: String,
    pub tagline: String,
    pub champion: String,
    /// 100 or 200
    pub team_id: u32,
    /// Role/lane label as reported by the match record (e.g. "MIDDLE")
    pub team_position: String,
    pub lane: String,
    pub role: String,
    pub summoner1_id: Option<u32>,
    pub summoner2_id: Option<u32>,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
}

impl Participant {
    pub fn final_kda(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }
}

/// Wire shape of a participant; everything optional so one bad entry can be
/// rejected on its own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParticipant {
    participant_id: Option<u32>,
    puuid: Option<String>,
    riot_id_game_name: Option<String>,
    riot_id_tagline: Option<String>,
    champion_name: Option<String>,
    team_id: Option<u32>,
    team_position: Option<String>,
    lane: Option<String>,
    role: Option<String>,
    summoner1_id: Option<u32>,
    summoner2_id: Option<u32>,
    #[serde(default)]
    kills: u32,
    #[serde(default)]
    deaths: u32,
    #[serde(default)]
    assists: u32,
    #[serde(default)]
    win: bool,
}

impl TryFrom<RawParticipant> for Participant {
    type Error = MomentError;

    fn try_from(raw: RawParticipant) -> Result<Self> {
        let participant_id = raw
            .participant_id
            .ok_or_else(|| MomentError::MalformedInput("participant without participantId".into()))?;
        let team_id = raw.team_id.ok_or_else(|| {
            MomentError::MalformedInput(format!("participant {} without teamId", participant_id))
        })?;

        Ok(Participant {
            participant_id,
            puuid: raw.puuid.unwrap_or_default(),
            game_name: raw.riot_id_game_name.unwrap_or_else(|| "Unknown".to_string()),
            tagline: raw.riot_id_tagline.unwrap_or_else(|| "Unknown".to_string()),
            champion: raw.champion_name.unwrap_or_else(|| "Unknown".to_string()),
            team_id,
            team_position: raw.team_position.unwrap_or_else(|| "UNKNOWN".to_string()),
            lane: raw.lane.unwrap_or_else(|| "UNKNOWN".to_string()),
            role: raw.role.unwrap_or_else(|| "SOLO".to_string()),
            summoner1_id: raw.summoner1_id,
            summoner2_id: raw.summoner2_id,
            kills: raw.kills,
            deaths: raw.deaths,
            assists: raw.assists,
            win: raw.win,
        })
    }
}

/// Match metadata record consumed by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchInfo {
    pub match_id: String,
    /// Total game length in seconds, when the record carries it
    pub duration_seconds: Option<u64>,
    pub participants: Vec<Participant>,
}

impl MatchInfo {
    /// Parse a match record (`{"metadata": {...}, "info": {...}}`).
    ///
    /// Participants missing required fields are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(MomentError::MalformedInput("match record is not an object".into()));
        }
        let info = value.get("info").unwrap_or(value);

        let match_id = value
            .pointer("/metadata/matchId")
            .or_else(|| info.get("gameId"))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();

        let duration_seconds = info.get("gameDuration").and_then(Value::as_u64);

        let mut participants = Vec::new();
        for (idx, raw) in info
            .get("participants")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .enumerate()
        {
            let parsed = serde_json::from_value::<RawParticipant>(raw.clone())
                .map_err(MomentError::from)
                .and_then(Participant::try_from);
            match parsed {
                Ok(p) => participants.push(p),
                Err(e) => log::warn!("Skipping participant #{}: {}", idx, e),
            }
        }

        Ok(MatchInfo { match_id, duration_seconds, participants })
    }

    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration_seconds.map(|s| s as f64 / 60.0)
    }
}

/// Summary of the tracked player, attached to reports for the narrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PlayerProfile {
    pub participant_id: u32,
    pub champion: String,
    pub position: String,
    pub lane: String,
    pub role: String,
    pub team_id: u32,
    pub summoner_name: String,
    pub summoner_tag: String,
}

impl From<&Participant> for PlayerProfile {
    fn from(p: &Participant) -> Self {
        PlayerProfile {
            participant_id: p.participant_id,
            champion: p.champion.clone(),
            position: p.team_position.clone(),
            lane: p.lane.clone(),
            role: p.role.clone(),
            team_id: p.team_id,
            summoner_name: p.game_name.clone(),
            summoner_tag: p.tagline.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_match_record() {
        let doc = json!({
            "metadata": {"matchId": "NA1_123"},
            "info": {
                "gameDuration": 1860,
                "participants": [
                    {"participantId": 1, "puuid": "p1", "championName": "Ahri", "teamId": 100,
                     "teamPosition": "MIDDLE", "riotIdGameName": "Foo", "riotIdTagline": "NA1",
                     "summoner1Id": 4, "summoner2Id": 12, "kills": 7, "deaths": 2, "assists": 9, "win": true},
                    {"participantId": 6, "puuid": "p6", "championName": "Zed", "teamId": 200}
                ]
            }
        });

        let info = MatchInfo::from_value(&doc).unwrap();
        assert_eq!(info.match_id, "NA1_123");
        assert_eq!(info.duration_seconds, Some(1860));
        assert_eq!(info.duration_minutes(), Some(31.0));
        assert_eq!(info.participants.len(), 2);

        let ahri = &info.participants[0];
        assert_eq!(ahri.champion, "Ahri");
        assert_eq!(ahri.summoner1_id, Some(4));
        assert_eq!(ahri.final_kda(), "7/2/9");

        let zed = &info.participants[1];
        assert_eq!(zed.game_name, "Unknown");
        assert_eq!(zed.team_position, "UNKNOWN");
    }

    #[test]
    fn test_malformed_participant_skipped() {
        let doc = json!({
            "info": {
                "participants": [
                    {"puuid": "no-id", "teamId": 100},
                    {"participantId": 2, "puuid": "no-team"},
                    {"participantId": 3, "puuid": "ok", "teamId": 100},
                    {"participantId": "three", "teamId": 100}
                ]
            }
        });

        let info = MatchInfo::from_value(&doc).unwrap();
        assert_eq!(info.participants.len(), 1);
        assert_eq!(info.participants[0].puuid, "ok");
        assert_eq!(info.duration_seconds, None);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(MatchInfo::from_json("[1, 2]").is_err());
        assert!(MatchInfo::from_json("not json").is_err());
    }

    #[test]
    fn test_player_profile_from_participant() {
        let doc = json!({"info": {"participants": [
            {"participantId": 4, "puuid": "x", "championName": "Jinx", "teamId": 200,
             "teamPosition": "BOTTOM", "lane": "BOTTOM", "role": "CARRY",
             "riotIdGameName": "Bar", "riotIdTagline": "EUW"}
        ]}});
        let info = MatchInfo::from_value(&doc).unwrap();
        let profile = PlayerProfile::from(&info.participants[0]);
        assert_eq!(profile.champion, "Jinx");
        assert_eq!(profile.team_id, 200);
        assert_eq!(profile.summoner_tag, "EUW");
    }
}
