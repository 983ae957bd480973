use crate::error::{AdcError, Result, leading_byte};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Port assumed when a compact node key carries none.
pub const DEFAULT_NODE_PORT: u16 = 80;

/// Weight used for distribution when a node does not specify one.
pub const DEFAULT_NODE_WEIGHT: u32 = 1;

/// Upstream target definition — APISIX-compatible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Load balancer type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub lb_type: Option<LoadBalancerType>,

    /// Hash input for `chash`: vars, header, cookie, consumer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthCheck>,

    /// Backend nodes. Accepts both the record array and the `"host:port" → weight` map.
    #[serde(default)]
    pub nodes: Nodes,

    /// Scheme: "http", "https", "grpc", "grpcs".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Timeout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ClientTls>,

    #[serde(default, alias = "passhost", skip_serializing_if = "Option::is_none")]
    pub pass_host: Option<PassHostMode>,

    /// Upstream host header (used when pass_host = "rewrite").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_host: Option<String>,

    // Service discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_type: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub discovery_args: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancerType {
    #[default]
    Roundrobin,
    Chash,
    Ewma,
    LeastConn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassHostMode {
    #[default]
    Pass,
    Node,
    Rewrite,
}

/// Active and/or passive health checking of upstream nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveHealthCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive: Option<PassiveHealthCheck>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveHealthCheck {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_path: Option<String>,
    #[serde(default, rename = "https_verify_certificate", skip_serializing_if = "Option::is_none")]
    pub https_verify_cert: Option<bool>,
    #[serde(default, rename = "req_headers", skip_serializing_if = "Vec::is_empty")]
    pub request_headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<ActiveHealthy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy: Option<ActiveUnhealthy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveHealthCheck {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<PassiveHealthy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy: Option<PassiveUnhealthy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveHealthy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_statuses: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveUnhealthy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_statuses: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_failures: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_failures: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<u32>,
}

/// Passive thresholds plus the probe interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveHealthy {
    #[serde(flatten)]
    pub thresholds: PassiveHealthy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveUnhealthy {
    #[serde(flatten)]
    pub thresholds: PassiveUnhealthy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
}

/// Client certificate used for mTLS towards the upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTls {
    #[serde(default, rename = "client_cert", skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(default, rename = "client_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Timeout settings (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeout {
    pub connect: f64,
    pub send: f64,
    pub read: f64,
}

/// One backend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl Node {
    pub fn new(host: impl Into<String>, port: u16, weight: u32) -> Self {
        Self {
            host: host.into(),
            port: Some(port),
            weight: Some(weight),
        }
    }

    /// Weight to use for load distribution.
    pub fn effective_weight(&self) -> u32 {
        self.weight.unwrap_or(DEFAULT_NODE_WEIGHT)
    }

    /// Build a node from one entry of the compact `"host[:port]" → weight` map.
    pub fn from_map_entry(key: &str, weight: f64) -> Result<Self> {
        let (host, port) = match key.split(':').collect::<Vec<_>>().as_slice() {
            [host] => (*host, DEFAULT_NODE_PORT),
            [host, port] => {
                let port = port
                    .parse::<u16>()
                    .map_err(|e| AdcError::malformed_node(key, format!("invalid port: {e}")))?;
                (*host, port)
            }
            _ => return Err(AdcError::malformed_node(key, "more than one ':' in node key")),
        };
        if host.is_empty() {
            return Err(AdcError::malformed_node(key, "empty host"));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(AdcError::malformed_node(key, format!("invalid weight {weight}")));
        }
        let weight = weight.trunc();
        if weight > f64::from(u32::MAX) {
            return Err(AdcError::malformed_node(key, format!("weight {weight} out of range")));
        }
        Ok(Node::new(host, port, weight as u32))
    }
}

/// Ordered node list of an upstream.
///
/// The admin API encodes an empty list as `{}` and also accepts the shorthand
/// `{"host:port": weight}` map. Both decode into this one type; map-origin nodes
/// are sorted by host then port so repeated decodes compare equal. Encoding
/// always produces the record array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nodes(Vec<Node>);

impl Nodes {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    /// Decode a single JSON field payload in either shape.
    pub fn decode(p: &[u8]) -> Result<Self> {
        match leading_byte(p)? {
            b'{' => {
                let map: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(p)
                    .map_err(|e| AdcError::MalformedValue(format!("upstream nodes: {e}")))?;
                let mut nodes = Vec::with_capacity(map.len());
                for (key, value) in &map {
                    let weight = value
                        .as_f64()
                        .ok_or_else(|| AdcError::malformed_node(key, "weight is not a number"))?;
                    nodes.push(Node::from_map_entry(key, weight)?);
                }
                Ok(Self::from_map_nodes(nodes))
            }
            b'[' => serde_json::from_slice::<Vec<Node>>(p)
                .map(Nodes)
                .map_err(|e| AdcError::MalformedValue(format!("upstream nodes: {e}"))),
            _ => Err(AdcError::MalformedValue(format!(
                "upstream nodes must be an array or an object, input: {}",
                String::from_utf8_lossy(p)
            ))),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn from_map_nodes(mut nodes: Vec<Node>) -> Self {
        nodes.sort_by(|a, b| (a.host.as_str(), a.port).cmp(&(b.host.as_str(), b.port)));
        tracing::trace!(count = nodes.len(), "normalized map-shaped upstream nodes");
        Self(nodes)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, node: Node) {
        self.0.push(node);
    }

    pub fn into_inner(self) -> Vec<Node> {
        self.0
    }
}

impl From<Vec<Node>> for Nodes {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

impl std::ops::Index<usize> for Nodes {
    type Output = Node;

    fn index(&self, i: usize) -> &Node {
        &self.0[i]
    }
}

impl<'a> IntoIterator for &'a Nodes {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Nodes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

struct NodesVisitor;

impl<'de> Visitor<'de> for NodesVisitor {
    type Value = Nodes;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of upstream nodes or a map of \"host:port\" to weight")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Nodes, A::Error> {
        let mut nodes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(node) = seq.next_element::<Node>()? {
            nodes.push(node);
        }
        Ok(Nodes(nodes))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Nodes, A::Error> {
        let mut nodes = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, weight)) = map.next_entry::<String, f64>()? {
            nodes.push(Node::from_map_entry(&key, weight).map_err(de::Error::custom)?);
        }
        Ok(Nodes::from_map_nodes(nodes))
    }
}

impl<'de> Deserialize<'de> for Nodes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodesVisitor)
    }
}
