use crate::plugin::Plugins;
use crate::resource::Labels;
use serde::{Deserialize, Serialize};

/// Consumer definition — APISIX-compatible.
/// Represents an API consumer with authentication credentials; the username is
/// its identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consumer {
    pub username: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,

    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    /// Plugins with consumer-specific config (e.g. key-auth key).
    #[serde(default, skip_serializing_if = "Plugins::is_empty")]
    pub plugins: Plugins,

    /// Consumer group this consumer belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}
