use crate::error::{AdcError, Result, leading_byte};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plugin-specific configuration. Its shape is defined by the plugin schema.
pub type PluginRecord = serde_json::Map<String, serde_json::Value>;

/// Supplies a plugin's schema defaults for merging with user configuration.
///
/// Implementations must be pure: the same `(name, supplied)` always yields the
/// same record, and an unknown `name` returns `supplied` unchanged.
pub trait PluginDefaults: Send + Sync {
    fn defaults(&self, name: &str, supplied: PluginRecord) -> PluginRecord;
}

impl<F> PluginDefaults for F
where
    F: Fn(&str, PluginRecord) -> PluginRecord + Send + Sync,
{
    fn defaults(&self, name: &str, supplied: PluginRecord) -> PluginRecord {
        self(name, supplied)
    }
}

/// Provider that leaves every record as supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl PluginDefaults for NoDefaults {
    fn defaults(&self, _name: &str, supplied: PluginRecord) -> PluginRecord {
        supplied
    }
}

/// Plugin chain configuration: plugin name → plugin record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plugins(HashMap<String, PluginRecord>);

impl Plugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a plugin map and merge each record with its schema defaults.
    pub fn decode(p: &[u8], defaults: &dyn PluginDefaults) -> Result<Self> {
        if leading_byte(p)? != b'{' {
            return Err(AdcError::MalformedValue(format!(
                "plugins must be an object, input: {}",
                String::from_utf8_lossy(p)
            )));
        }
        let raw: HashMap<String, PluginRecord> = serde_json::from_slice(p)
            .map_err(|e| AdcError::MalformedValue(format!("plugins: {e}")))?;
        let mut plugins = Plugins(raw);
        plugins.apply_defaults(defaults);
        Ok(plugins)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Merge every record with the provider's defaults, in place.
    pub fn apply_defaults(&mut self, defaults: &dyn PluginDefaults) {
        for (name, record) in self.0.iter_mut() {
            let supplied = std::mem::take(record);
            *record = defaults.defaults(name, supplied);
            tracing::trace!(plugin = %name, "applied plugin defaults");
        }
    }

    /// Fully independent duplicate, safe to hand to another thread and mutate.
    pub fn deep_copy(&self) -> Self {
        Plugins(
            self.0
                .iter()
                .map(|(name, record)| (name.clone(), record.clone()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&PluginRecord> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PluginRecord> {
        self.0.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: PluginRecord) -> Option<PluginRecord> {
        self.0.insert(name.into(), record)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PluginRecord)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PluginRecord)> for Plugins {
    fn from_iter<I: IntoIterator<Item = (String, PluginRecord)>>(iter: I) -> Self {
        Plugins(iter.into_iter().collect())
    }
}
