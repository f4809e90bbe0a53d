//! Value encoding for the external store
//!
//! Integers are written as bare decimal text. That is the form the store's
//! atomic `INCRBY`/`DECRBY` understand, and it is what those commands leave
//! behind, so a counter written by `set` can be incremented server-side and
//! read back as an integer. Every other shape goes through a [`Serializer`].
//!
//! Values that some serializer cannot read back are refused at encode time:
//! non-finite floats (JSON writes them as `null`) and composites nested
//! deeper than [`MAX_NESTING`] (serde_json's recursion limit).

use crate::{CacheError, CacheValue, Result};

/// Encode/decode pair between [`CacheValue`] and the store's wire bytes
///
/// `decode(encode(v))` must equal `v` for every value shape.
pub trait ValueCodec: Send + Sync + 'static {
    fn encode(&self, value: &CacheValue) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<CacheValue>;
}

/// Pluggable serialization format for non-integer values
///
/// Built-in implementations: JSON, MessagePack, Bincode.
pub trait Serializer: Send + Sync + Clone + 'static {
    /// Name of the serializer (for debugging/metrics)
    fn name(&self) -> &str;

    fn serialize(&self, value: &CacheValue) -> Result<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> Result<CacheValue>;
}

/// JSON serializer (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, value: &CacheValue) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<CacheValue> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Deserialization(e.to_string()))
    }
}

/// MessagePack serializer
///
/// Enable with `msgpack` feature.
#[cfg(feature = "msgpack")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackSerializer;

#[cfg(feature = "msgpack")]
impl Serializer for MsgPackSerializer {
    fn name(&self) -> &str {
        "msgpack"
    }

    fn serialize(&self, value: &CacheValue) -> Result<Vec<u8>> {
        rmp_serde::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<CacheValue> {
        rmp_serde::from_slice(bytes).map_err(|e| CacheError::Deserialization(e.to_string()))
    }
}

/// Bincode serializer
///
/// Enable with `bincode` feature.
#[cfg(feature = "bincode")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeSerializer;

#[cfg(feature = "bincode")]
impl Serializer for BincodeSerializer {
    fn name(&self) -> &str {
        "bincode"
    }

    fn serialize(&self, value: &CacheValue) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<CacheValue> {
        let (val, _len) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| CacheError::Deserialization(e.to_string()))?;
        Ok(val)
    }
}

/// Default codec: bare integers, everything else via `S`
#[derive(Debug, Clone, Copy, Default)]
pub struct WireCodec<S = JsonSerializer> {
    serializer: S,
}

impl<S: Serializer> WireCodec<S> {
    pub fn new(serializer: S) -> Self {
        Self { serializer }
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }
}

/// Deepest `List`/`Map` nesting the codec accepts
///
/// Each level costs two JSON containers in the tagged form, so this keeps
/// well inside serde_json's recursion limit of 128.
pub const MAX_NESTING: usize = 32;

/// Refuse values whose encoding would not decode back to the same value
fn check_encodable(value: &CacheValue, depth: usize) -> Result<()> {
    let mut children: Box<dyn Iterator<Item = &CacheValue>> = match value {
        CacheValue::Float(f) if !f.is_finite() => {
            return Err(CacheError::Serialization(format!(
                "float {f} has no stable wire form"
            )));
        }
        CacheValue::List(items) => Box::new(items.iter()),
        CacheValue::Map(map) => Box::new(map.values()),
        _ => return Ok(()),
    };
    if depth >= MAX_NESTING {
        return Err(CacheError::Serialization(format!(
            "value nested deeper than {MAX_NESTING} levels"
        )));
    }
    children.try_for_each(|child| check_encodable(child, depth + 1))
}

/// Parse the bare-integer wire form
///
/// None of the serializers can produce a payload made only of ASCII digits
/// for a non-integer value, so this never misreads a serialized value.
fn parse_integer(bytes: &[u8]) -> Option<i64> {
    let digits = bytes.strip_prefix(b"-").unwrap_or(bytes);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

impl<S: Serializer> ValueCodec for WireCodec<S> {
    fn encode(&self, value: &CacheValue) -> Result<Vec<u8>> {
        match value {
            CacheValue::Int(n) => Ok(n.to_string().into_bytes()),
            other => {
                check_encodable(other, 0)?;
                self.serializer.serialize(other)
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<CacheValue> {
        match parse_integer(bytes) {
            Some(n) => Ok(CacheValue::Int(n)),
            None => self.serializer.deserialize(bytes),
        }
    }
}
