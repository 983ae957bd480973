use crate::plugin::Plugins;
use crate::resource::Labels;
use crate::upstream::Upstream;
use serde::{Deserialize, Serialize};

/// Service definition — APISIX-compatible.
/// A service is a reusable bundle of upstream + plugins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "desc", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Labels are used for resource classification and indexing.
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,

    /// HTTP hosts for this service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    /// Plugins applied to routes using this service.
    #[serde(default, skip_serializing_if = "Plugins::is_empty")]
    pub plugins: Plugins,

    /// Inline upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<Upstream>,

    /// Upstream reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_id: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enable_websocket: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::Node;

    #[test]
    fn minimal_service_deserializes() {
        let json = r#"{"id": "svc1"}"#;
        let svc: Service = serde_json::from_str(json).unwrap();
        assert_eq!(svc.id, "svc1");
        assert!(svc.name.is_empty());
        assert!(svc.upstream_id.is_none());
        assert!(svc.plugins.is_empty());
    }

    #[test]
    fn service_with_inline_upstream_map_nodes() {
        let json = serde_json::json!({
            "id": "svc2",
            "upstream": {
                "nodes": { "10.0.0.1:8080": 1 },
                "type": "roundrobin"
            }
        });
        let svc: Service = serde_json::from_value(json).unwrap();
        let ups = svc.upstream.as_ref().unwrap();
        assert_eq!(ups.nodes[0], Node::new("10.0.0.1", 8080, 1));

        // re-encoded in the record-array shape
        let out = serde_json::to_value(&svc).unwrap();
        assert_eq!(
            out["upstream"]["nodes"],
            serde_json::json!([{"host": "10.0.0.1", "port": 8080, "weight": 1}])
        );
    }

    #[test]
    fn empty_node_object_from_admin_api() {
        let json = r#"{"id":"svc3","upstream":{"nodes":{},"type":"roundrobin"}}"#;
        let svc: Service = serde_json::from_str(json).unwrap();
        assert!(svc.upstream.unwrap().nodes.is_empty());
    }
}
