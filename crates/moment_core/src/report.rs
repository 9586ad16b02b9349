//! Serializable extraction result handed to storage and narration.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{MomentError, Result};
use crate::models::{CriticalMoment, PlayerProfile};

pub const REPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MomentReport {
    pub version: String,
    pub match_id: String,
    pub puuid: String,
    /// `None` when the player isn't in the match
    pub player: Option<PlayerProfile>,
    /// RFC 3339 creation time
    pub generated_at: String,
    pub moments: Vec<CriticalMoment>,
}

impl MomentReport {
    pub fn new(
        match_id: String,
        puuid: String,
        player: Option<PlayerProfile>,
        moments: Vec<CriticalMoment>,
    ) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            match_id,
            puuid,
            player,
            generated_at: chrono::Utc::now().to_rfc3339(),
            moments,
        }
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(MomentReport)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MomentError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Highest-impact moment, if any.
    pub fn top_moment(&self) -> Option<&CriticalMoment> {
        self.moments.first()
    }
}

pub fn save_report_json<P: AsRef<Path>>(report: &MomentReport, path: P) -> Result<()> {
    std::fs::write(path.as_ref(), report.to_json_pretty()?)?;
    log::debug!("Wrote {} moments to {:?}", report.moments.len(), path.as_ref());
    Ok(())
}

pub fn load_report_json<P: AsRef<Path>>(path: P) -> Result<MomentReport> {
    let json = std::fs::read_to_string(path)?;
    MomentReport::from_json(&json)
}
