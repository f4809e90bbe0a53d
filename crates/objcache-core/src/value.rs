//! Stored value type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value held by the cache
///
/// Closed set of shapes so that encoding and decoding are exhaustive.
/// Composite values (`List`, `Map`) are owned trees: every read hands out
/// an independent clone, so mutating what a `get` returned never touches
/// what the cache holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CacheValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<CacheValue>),
    Map(BTreeMap<String, CacheValue>),
}

impl CacheValue {
    /// Short name of the variant, for logging
    pub fn type_name(&self) -> &'static str {
        match self {
            CacheValue::Null => "null",
            CacheValue::Bool(_) => "bool",
            CacheValue::Int(_) => "int",
            CacheValue::Float(_) => "float",
            CacheValue::String(_) => "string",
            CacheValue::Bytes(_) => "bytes",
            CacheValue::List(_) => "list",
            CacheValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CacheValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CacheValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CacheValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<CacheValue>> {
        match self {
            CacheValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, CacheValue>> {
        match self {
            CacheValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for CacheValue {
    fn from(v: bool) -> Self {
        CacheValue::Bool(v)
    }
}

impl From<i64> for CacheValue {
    fn from(v: i64) -> Self {
        CacheValue::Int(v)
    }
}

impl From<i32> for CacheValue {
    fn from(v: i32) -> Self {
        CacheValue::Int(v.into())
    }
}

impl From<u32> for CacheValue {
    fn from(v: u32) -> Self {
        CacheValue::Int(v.into())
    }
}

impl From<f64> for CacheValue {
    fn from(v: f64) -> Self {
        CacheValue::Float(v)
    }
}

impl From<String> for CacheValue {
    fn from(v: String) -> Self {
        CacheValue::String(v)
    }
}

impl From<&str> for CacheValue {
    fn from(v: &str) -> Self {
        CacheValue::String(v.to_string())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(v: Vec<u8>) -> Self {
        CacheValue::Bytes(v)
    }
}

impl From<Vec<CacheValue>> for CacheValue {
    fn from(v: Vec<CacheValue>) -> Self {
        CacheValue::List(v)
    }
}

impl From<BTreeMap<String, CacheValue>> for CacheValue {
    fn from(v: BTreeMap<String, CacheValue>) -> Self {
        CacheValue::Map(v)
    }
}

impl<T: Into<CacheValue>> From<Option<T>> for CacheValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CacheValue::Null, Into::into)
    }
}
