use crate::merge::merge_defaults;
use adc_core::{AdcError, PluginDefaults, PluginRecord, Result};
use std::collections::HashMap;

/// Plugin schema defaults, keyed by plugin name.
///
/// Built once, immutable thereafter. Share it behind an `Arc` (or by
/// reference) across concurrent decodes; lookups take no locks.
pub struct DefaultsRegistry {
    plugins: HashMap<String, PluginRecord>,
}

impl DefaultsRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Build from a `{plugin_name: {field: default}}` document.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(entries) = value else {
            return Err(AdcError::MalformedValue(
                "plugin defaults must be an object keyed by plugin name".into(),
            ));
        };
        let mut registry = Self::new();
        for (name, defaults) in entries {
            match defaults {
                serde_json::Value::Object(record) => registry.register(name, record),
                other => {
                    return Err(AdcError::MalformedValue(format!(
                        "defaults for plugin {name} must be an object, got {other}"
                    )));
                }
            }
        }
        Ok(registry)
    }

    /// Build from the YAML form of the `from_value` document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(text)?;
        Self::from_value(value)
    }

    /// Register the schema defaults of one plugin.
    pub fn register(&mut self, name: impl Into<String>, defaults: PluginRecord) {
        let name = name.into();
        tracing::debug!(plugin = %name, fields = defaults.len(), "Registered plugin defaults");
        self.plugins.insert(name, defaults);
    }

    /// Get a plugin's defaults by name.
    pub fn get(&self, name: &str) -> Option<&PluginRecord> {
        self.plugins.get(name)
    }

    /// List all registered plugin names.
    pub fn list(&self) -> Vec<&str> {
        self.plugins.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for DefaultsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginDefaults for DefaultsRegistry {
    fn defaults(&self, name: &str, supplied: PluginRecord) -> PluginRecord {
        match self.plugins.get(name) {
            Some(defaults) => merge_defaults(defaults, supplied),
            None => supplied,
        }
    }
}
