//! Per-kind byte boundary between the resource model and the transport layer.
//!
//! The transport hands over raw admin API bytes for one resource kind; these
//! helpers turn them into model values (plugin defaults applied) and back.

use crate::consumer::Consumer;
use crate::consumer_group::ConsumerGroup;
use crate::error::{Result, leading_byte};
use crate::global_rule::GlobalRule;
use crate::plugin::{PluginDefaults, Plugins};
use crate::plugin_config::PluginConfig;
use crate::plugin_metadata::PluginMetadata;
use crate::route::Route;
use crate::service::Service;
use crate::ssl::Ssl;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;

/// Resource classification labels.
pub type Labels = HashMap<String, String>;

/// Admin API resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Route,
    Service,
    Consumer,
    Ssl,
    GlobalRule,
    PluginConfig,
    ConsumerGroup,
    PluginMetadata,
}

impl ResourceKind {
    /// Collection name as used in admin API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Route => "routes",
            ResourceKind::Service => "services",
            ResourceKind::Consumer => "consumers",
            ResourceKind::Ssl => "ssls",
            ResourceKind::GlobalRule => "global_rules",
            ResourceKind::PluginConfig => "plugin_configs",
            ResourceKind::ConsumerGroup => "consumer_groups",
            ResourceKind::PluginMetadata => "plugin_metadata",
        }
    }

    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Route,
            ResourceKind::Service,
            ResourceKind::Consumer,
            ResourceKind::Ssl,
            ResourceKind::GlobalRule,
            ResourceKind::PluginConfig,
            ResourceKind::ConsumerGroup,
            ResourceKind::PluginMetadata,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A gateway entity exchanged with the admin API.
pub trait Resource: Serialize + DeserializeOwned {
    const KIND: ResourceKind;

    /// Identifier, unique per kind within a bundle.
    fn id(&self) -> &str;

    /// Plugin map carried by this resource, if the kind has one.
    fn plugins_mut(&mut self) -> Option<&mut Plugins> {
        None
    }

    /// Merge every plugin record with its schema defaults.
    fn apply_defaults(&mut self, defaults: &dyn PluginDefaults) {
        if let Some(plugins) = self.plugins_mut() {
            plugins.apply_defaults(defaults);
        }
    }
}

macro_rules! impl_resource {
    ($ty:ty, $kind:expr, $id:ident, plugins) => {
        impl Resource for $ty {
            const KIND: ResourceKind = $kind;

            fn id(&self) -> &str {
                &self.$id
            }

            fn plugins_mut(&mut self) -> Option<&mut Plugins> {
                Some(&mut self.plugins)
            }
        }
    };
    ($ty:ty, $kind:expr, $id:ident) => {
        impl Resource for $ty {
            const KIND: ResourceKind = $kind;

            fn id(&self) -> &str {
                &self.$id
            }
        }
    };
}

impl_resource!(Route, ResourceKind::Route, id, plugins);
impl_resource!(Service, ResourceKind::Service, id, plugins);
impl_resource!(Consumer, ResourceKind::Consumer, username, plugins);
impl_resource!(Ssl, ResourceKind::Ssl, id);
impl_resource!(GlobalRule, ResourceKind::GlobalRule, id, plugins);
impl_resource!(PluginConfig, ResourceKind::PluginConfig, id, plugins);
impl_resource!(ConsumerGroup, ResourceKind::ConsumerGroup, id, plugins);
impl_resource!(PluginMetadata, ResourceKind::PluginMetadata, id);

/// Decode one resource from admin API bytes and apply plugin defaults.
pub fn decode<T: Resource>(p: &[u8], defaults: &dyn PluginDefaults) -> Result<T> {
    leading_byte(p)?;
    let mut resource: T = serde_json::from_slice(p)?;
    resource.apply_defaults(defaults);
    let kind = T::KIND;
    tracing::debug!(%kind, id = %resource.id(), "decoded resource");
    Ok(resource)
}

/// Encode one resource as an admin API request body.
pub fn encode<T: Resource>(resource: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(resource)?)
}
