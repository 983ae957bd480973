use crate::resource::Labels;
use serde::{Deserialize, Serialize};

/// SSL certificate bundle — APISIX-compatible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ssl {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    /// SNI hostnames this cert applies to.
    #[serde(default)]
    pub snis: Vec<String>,

    /// PEM-encoded certificate.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cert: String,

    /// PEM-encoded private key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
}
