use crate::error::{AdcError, Result, leading_byte};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A field the admin API sends either as a bare string or as a list of strings.
///
/// The two shapes are kept apart: a one-element list stays a list on encode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringOrList {
    Scalar(String),
    List(Vec<String>),
}

impl StringOrList {
    /// Decode a single JSON field payload.
    pub fn decode(p: &[u8]) -> Result<Self> {
        let shape = if leading_byte(p)? == b'[' {
            serde_json::from_slice::<Vec<String>>(p).map(StringOrList::List)
        } else {
            serde_json::from_slice::<String>(p).map(StringOrList::Scalar)
        };
        shape.map_err(|e| {
            AdcError::MalformedValue(format!(
                "expected a string or a list of strings, input: {}: {e}",
                String::from_utf8_lossy(p)
            ))
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, StringOrList::List(_))
    }
}

impl From<&str> for StringOrList {
    fn from(s: &str) -> Self {
        StringOrList::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for StringOrList {
    fn from(l: Vec<String>) -> Self {
        StringOrList::List(l)
    }
}

impl Serialize for StringOrList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StringOrList::Scalar(s) => serializer.serialize_str(s),
            StringOrList::List(l) => l.serialize(serializer),
        }
    }
}

struct StringOrListVisitor;

impl<'de> Visitor<'de> for StringOrListVisitor {
    type Value = StringOrList;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a list of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(StringOrList::Scalar(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(StringOrList::Scalar(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        Ok(StringOrList::List(items))
    }
}

impl<'de> Deserialize<'de> for StringOrList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(StringOrListVisitor)
    }
}
