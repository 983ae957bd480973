use crate::consumer::Consumer;
use crate::consumer_group::ConsumerGroup;
use crate::error::{AdcError, Result, leading_byte};
use crate::global_rule::GlobalRule;
use crate::plugin::PluginDefaults;
use crate::plugin_config::PluginConfig;
use crate::plugin_metadata::PluginMetadata;
use crate::resource::{Resource, ResourceKind};
use crate::route::Route;
use crate::service::Service;
use crate::ssl::Ssl;
use serde::{Deserialize, Serialize};

/// The full set of gateway resources described by one configuration source.
///
/// Every sequence keeps declaration order. A malformed field anywhere aborts
/// the whole decode; there is no partial bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumers: Vec<Consumer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssls: Vec<Ssl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_rules: Vec<GlobalRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_configs: Vec<PluginConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumer_groups: Vec<ConsumerGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_metadatas: Vec<PluginMetadata>,
}

impl Configuration {
    /// Decode a JSON bundle and merge plugin defaults.
    pub fn from_json(p: &[u8], defaults: &dyn PluginDefaults) -> Result<Self> {
        leading_byte(p)?;
        let mut config: Configuration = serde_json::from_slice(p)?;
        config.apply_defaults(defaults);
        config.log_loaded("json");
        Ok(config)
    }

    /// Decode a YAML configuration source and merge plugin defaults.
    pub fn from_yaml(text: &str, defaults: &dyn PluginDefaults) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(AdcError::EmptyPayload);
        }
        let mut config: Configuration = serde_yaml::from_str(text)?;
        config.apply_defaults(defaults);
        config.log_loaded("yaml");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Merge every plugin map in the bundle with its schema defaults.
    pub fn apply_defaults(&mut self, defaults: &dyn PluginDefaults) {
        apply_all(&mut self.services, defaults);
        apply_all(&mut self.routes, defaults);
        apply_all(&mut self.consumers, defaults);
        apply_all(&mut self.global_rules, defaults);
        apply_all(&mut self.plugin_configs, defaults);
        apply_all(&mut self.consumer_groups, defaults);
    }

    /// Number of resources of one kind.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Route => self.routes.len(),
            ResourceKind::Service => self.services.len(),
            ResourceKind::Consumer => self.consumers.len(),
            ResourceKind::Ssl => self.ssls.len(),
            ResourceKind::GlobalRule => self.global_rules.len(),
            ResourceKind::PluginConfig => self.plugin_configs.len(),
            ResourceKind::ConsumerGroup => self.consumer_groups.len(),
            ResourceKind::PluginMetadata => self.plugin_metadatas.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        ResourceKind::all().iter().all(|k| self.count(*k) == 0)
    }

    fn log_loaded(&self, format: &str) {
        tracing::debug!(
            format,
            name = %self.name,
            routes = self.routes.len(),
            services = self.services.len(),
            consumers = self.consumers.len(),
            ssls = self.ssls.len(),
            global_rules = self.global_rules.len(),
            plugin_configs = self.plugin_configs.len(),
            consumer_groups = self.consumer_groups.len(),
            plugin_metadatas = self.plugin_metadatas.len(),
            "decoded resource bundle"
        );
    }
}

fn apply_all<T: Resource>(resources: &mut [T], defaults: &dyn PluginDefaults) {
    for r in resources {
        r.apply_defaults(defaults);
    }
}
