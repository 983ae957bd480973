use crate::plugin::Plugins;
use crate::resource::Labels;
use serde::{Deserialize, Serialize};

/// Reusable plugin config set — APISIX-compatible.
/// Can be referenced by multiple routes to share plugin configurations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,

    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    #[serde(default)]
    pub plugins: Plugins,
}
