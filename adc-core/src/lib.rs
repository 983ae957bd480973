pub mod bundle;
pub mod config;
pub mod consumer;
pub mod consumer_group;
pub mod error;
pub mod global_rule;
pub mod plugin;
pub mod plugin_config;
pub mod plugin_metadata;
pub mod resource;
pub mod route;
pub mod service;
pub mod ssl;
pub mod string_or_list;
pub mod upstream;

pub use bundle::Configuration;
pub use config::AdcConfig;
pub use error::{AdcError, Result};
pub use plugin::{NoDefaults, PluginDefaults, PluginRecord, Plugins};
pub use plugin_metadata::PluginMetadata;
pub use resource::{Resource, ResourceKind};
pub use string_or_list::StringOrList;
pub use upstream::{Node, Nodes, Upstream};
