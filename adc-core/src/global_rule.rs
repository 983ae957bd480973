use crate::plugin::Plugins;
use serde::{Deserialize, Serialize};

/// Plugins applied to every request — APISIX global_rule object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalRule {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub plugins: Plugins,
}
