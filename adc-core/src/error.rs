use thiserror::Error;

/// Unified error type for the adc codec layer.
#[derive(Error, Debug)]
pub enum AdcError {
    #[error("Malformed value: {0}")]
    MalformedValue(String),

    #[error("Malformed upstream node {key:?}: {reason}")]
    MalformedNode { key: String, reason: String },

    #[error("Invalid identifier: id is not a string, input: {0}")]
    InvalidIdentifier(String),

    #[error("Empty payload")]
    EmptyPayload,

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AdcError>;

impl AdcError {
    pub(crate) fn malformed_node(key: &str, reason: impl Into<String>) -> Self {
        AdcError::MalformedNode {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// First non-whitespace byte of a payload, or `EmptyPayload`.
pub(crate) fn leading_byte(p: &[u8]) -> Result<u8> {
    p.iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
        .ok_or(AdcError::EmptyPayload)
}
