use crate::plugin::Plugins;
use crate::resource::Labels;
use serde::{Deserialize, Serialize};

/// Plugins shared by a group of consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerGroup {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,

    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    #[serde(default)]
    pub plugins: Plugins,
}
