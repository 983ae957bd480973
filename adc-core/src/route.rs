use crate::plugin::Plugins;
use crate::resource::Labels;
use crate::string_or_list::StringOrList;
use crate::upstream::Timeout;
use serde::{Deserialize, Serialize};

/// Route match expressions: each entry is `[var, operator, value]`, where any
/// element may be a string or a list of strings.
pub type Vars = Vec<Vec<StringOrList>>;

/// A Route defines how incoming requests are matched and handled.
/// Modeled after APISIX Route object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Unique route identifier
    #[serde(default)]
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    #[serde(default, rename = "desc", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Host header matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Additional host patterns (OR match)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Priority (higher = matched first, default 0)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub priority: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Timeout>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vars,

    /// Additional URI patterns (OR match)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uris: Vec<String>,

    /// Allowed HTTP methods (empty = all methods)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<HttpMethod>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enable_websocket: bool,

    /// Remote address CIDR matching
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remote_addrs: Vec<String>,

    /// Reference to a named upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_id: Option<String>,

    /// Reference to a named service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    /// Plugin chain configuration: plugin_name -> config
    #[serde(default, skip_serializing_if = "Plugins::is_empty")]
    pub plugins: Plugins,

    /// Plugin config reference ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_config_id: Option<String>,

    /// Lua function source used as an extra match predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_func: Option<String>,
}

/// HTTP methods supported by routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Connect,
    Trace,
    Purge,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}
