use thiserror::Error;

/// Errors surfaced by parsing, configuration and registry lookups.
///
/// Extraction itself never returns these: per-item problems are logged and
/// skipped, and a missing target degrades to an empty result.
#[derive(Error, Debug)]
pub enum MomentError {
    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("target player not found: {0}")]
    TargetNotFound(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MomentError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            MomentError::MalformedInput(err.to_string())
        } else {
            MomentError::InvalidJson(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for MomentError {
    fn from(err: serde_yaml::Error) -> Self {
        MomentError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MomentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_maps_to_invalid_json() {
        let err: MomentError = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err().into();
        assert!(matches!(err, MomentError::InvalidJson(_)));
    }

    #[test]
    fn test_data_error_maps_to_malformed_input() {
        let err: MomentError = serde_json::from_str::<u32>("\"text\"").unwrap_err().into();
        assert!(matches!(err, MomentError::MalformedInput(_)));
    }

    #[test]
    fn test_display_messages() {
        let err = MomentError::TargetNotFound("abc".to_string());
        assert_eq!(err.to_string(), "target player not found: abc");
    }
}
