use crate::error::{AdcError, Result, leading_byte};
use crate::plugin::PluginRecord;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ID_FIELD: &str = "id";

/// Plugin metadata — APISIX-compatible.
///
/// The identifier (the plugin name) travels as a sibling `"id"` field next to
/// the plugin-defined settings; in memory it is kept out of `config`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginMetadata {
    pub id: String,
    pub config: PluginRecord,
}

impl PluginMetadata {
    pub fn new(id: impl Into<String>, config: PluginRecord) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    pub fn decode(p: &[u8]) -> Result<Self> {
        leading_byte(p)?;
        let config: PluginRecord = serde_json::from_slice(p)
            .map_err(|e| AdcError::MalformedValue(format!("plugin metadata: {e}")))?;
        Self::from_record(config).map_err(|_| {
            AdcError::InvalidIdentifier(String::from_utf8_lossy(p).into_owned())
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Split the `"id"` field out of a raw record.
    ///
    /// On a non-string id the untouched record is handed back as the error.
    pub fn from_record(mut config: PluginRecord) -> std::result::Result<Self, PluginRecord> {
        let id = match config.remove(ID_FIELD) {
            None => String::new(),
            Some(serde_json::Value::String(id)) => id,
            Some(other) => {
                config.insert(ID_FIELD.to_string(), other);
                return Err(config);
            }
        };
        tracing::trace!(id = %id, "extracted plugin metadata id");
        Ok(Self { id, config })
    }

    /// The wire record: a copy of `config` with the id put back.
    pub fn to_record(&self) -> PluginRecord {
        let mut record = self.config.clone();
        record.insert(ID_FIELD.to_string(), serde_json::Value::String(self.id.clone()));
        record
    }
}

impl Serialize for PluginMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = self.config.iter().filter(|(k, _)| k.as_str() != ID_FIELD);
        let mut map = serializer.serialize_map(Some(extra.clone().count() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (k, v) in extra {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PluginMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = PluginRecord::deserialize(deserializer)?;
        PluginMetadata::from_record(record).map_err(|record| {
            let input = serde_json::Value::Object(record).to_string();
            serde::de::Error::custom(AdcError::InvalidIdentifier(input))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_extracts_id() {
        let md = PluginMetadata::decode(br#"{"id":"abc","x":1}"#).unwrap();
        assert_eq!(md.id, "abc");
        assert_eq!(serde_json::Value::Object(md.config.clone()), json!({"x": 1}));
    }

    #[test]
    fn decode_without_id_gives_empty_identifier() {
        let md = PluginMetadata::decode(br#"{"x":1}"#).unwrap();
        assert_eq!(md.id, "");
        assert_eq!(serde_json::Value::Object(md.config), json!({"x": 1}));
    }

    #[test]
    fn decode_rejects_non_string_id() {
        let err = PluginMetadata::decode(br#"{"id":42}"#).unwrap_err();
        match err {
            AdcError::InvalidIdentifier(input) => assert!(input.contains("42")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_rejects_non_object_and_empty() {
        assert!(matches!(PluginMetadata::decode(b"[]"), Err(AdcError::MalformedValue(_))));
        assert!(matches!(PluginMetadata::decode(b""), Err(AdcError::EmptyPayload)));
        assert!(matches!(PluginMetadata::decode(b"   "), Err(AdcError::EmptyPayload)));
    }

    #[test]
    fn encode_puts_id_back_without_mutating() {
        let md = PluginMetadata::decode(br#"{"id":"abc","x":1}"#).unwrap();
        let before = md.clone();
        let encoded: serde_json::Value = serde_json::from_slice(&md.encode().unwrap()).unwrap();
        assert_eq!(encoded, json!({"id": "abc", "x": 1}));
        assert_eq!(md, before);
        assert!(!md.config.contains_key("id"));
    }

    #[test]
    fn encode_never_duplicates_id() {
        let mut config = PluginRecord::new();
        config.insert("id".into(), json!("stale"));
        config.insert("log_format".into(), json!({"host": "$host"}));
        let md = PluginMetadata::new("http-logger", config);
        let text = String::from_utf8(md.encode().unwrap()).unwrap();
        assert_eq!(text.matches("\"id\"").count(), 1);
        let back = PluginMetadata::decode(text.as_bytes()).unwrap();
        assert_eq!(back.id, "http-logger");
        assert_eq!(md.to_record()["id"], "http-logger");
    }

    #[test]
    fn deserialize_inside_a_list() {
        let list: Vec<PluginMetadata> =
            serde_json::from_str(r#"[{"id":"a","k":"v"},{"id":"b"}]"#).unwrap();
        assert_eq!(list[0].id, "a");
        assert_eq!(list[0].config["k"], "v");
        assert!(list[1].config.is_empty());

        let err = serde_json::from_str::<Vec<PluginMetadata>>(r#"[{"id":true}]"#).unwrap_err();
        assert!(err.to_string().contains("Invalid identifier"));
    }

    #[test]
    fn yaml_source_maps_onto_same_shape() {
        let md: PluginMetadata = serde_yaml::from_str("id: syslog\nhost: 127.0.0.1\nport: 514\n").unwrap();
        assert_eq!(md.id, "syslog");
        assert_eq!(md.config["port"], 514);
    }
}
