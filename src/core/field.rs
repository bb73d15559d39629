//! Structured log fields
//!
//! This module provides:
//! - `FieldValue`: the typed value carried by a field
//! - `Field`: a key/value pair in one of four flavors (eager, custom, lazy,
//!   wrapped) plus the `Skip` sentinel that every consumer drops silently
//! - `EncodedField`: the flat representation handed to the output sinks
//!
//! `Field::value()` is the single dispatch point. Eager, custom and wrapped
//! fields always return the same value; lazy fields run their thunk on every
//! call, so renderers read each field exactly once per log call.

use super::error::{LoggerError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uintptr(usize),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Time(DateTime<Utc>),
    Duration(Duration),
    Error(String),
    Stringer(String),
    ByteString(Vec<u8>),
    Binary(Vec<u8>),
    Namespace,
    Array(Vec<FieldValue>),
    Json(serde_json::Value),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) | FieldValue::Stringer(s) => {
                write!(f, "{}", s)
            }
            FieldValue::Int8(i) => write!(f, "{}", i),
            FieldValue::Int16(i) => write!(f, "{}", i),
            FieldValue::Int32(i) => write!(f, "{}", i),
            FieldValue::Int64(i) => write!(f, "{}", i),
            FieldValue::Uint8(u) => write!(f, "{}", u),
            FieldValue::Uint16(u) => write!(f, "{}", u),
            FieldValue::Uint32(u) => write!(f, "{}", u),
            FieldValue::Uint64(u) => write!(f, "{}", u),
            FieldValue::Uintptr(u) => write!(f, "{:#x}", u),
            FieldValue::Float32(fl) => write!(f, "{}", fl),
            FieldValue::Float64(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Time(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::ByteString(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            FieldValue::Binary(bytes) => write!(f, "{:?}", bytes),
            FieldValue::Namespace => write!(f, "{{}}"),
            FieldValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            FieldValue::Json(serde_json::Value::String(s)) => write!(f, "{}", s),
            FieldValue::Json(v) => write!(f, "{}", v),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            FieldValue::String(s) | FieldValue::Error(s) | FieldValue::Stringer(s) => {
                Value::String(s.clone())
            }
            FieldValue::Int8(i) => Value::from(*i),
            FieldValue::Int16(i) => Value::from(*i),
            FieldValue::Int32(i) => Value::from(*i),
            FieldValue::Int64(i) => Value::from(*i),
            FieldValue::Uint8(u) => Value::from(*u),
            FieldValue::Uint16(u) => Value::from(*u),
            FieldValue::Uint32(u) => Value::from(*u),
            FieldValue::Uint64(u) => Value::from(*u),
            FieldValue::Uintptr(u) => Value::from(*u as u64),
            FieldValue::Float32(f) => float_json(f64::from(*f)),
            FieldValue::Float64(f) => float_json(*f),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Time(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            FieldValue::Duration(d) => float_json(d.as_secs_f64()),
            FieldValue::ByteString(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
            FieldValue::Binary(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
            FieldValue::Namespace => Value::Object(serde_json::Map::new()),
            FieldValue::Array(items) => Value::Array(items.iter().map(FieldValue::to_json_value).collect()),
            FieldValue::Json(v) => v.clone(),
            FieldValue::Null => Value::Null,
        }
    }

    /// Pick the most specific typed value for an arbitrary JSON value
    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Uint64(u)
                } else {
                    n.as_f64().map(FieldValue::Float64).unwrap_or(FieldValue::Null)
                }
            }
            other => FieldValue::Json(other),
        }
    }

    /// Rebuild a typed value from its sink representation
    ///
    /// Integers and floats travel through `EncodedField::integer` as raw bit
    /// patterns, so every width comes back exactly as it went in.
    #[must_use]
    pub fn from_encoded(encoded: &EncodedField) -> Self {
        let integer = encoded.integer;
        match encoded.kind {
            FieldKind::String => FieldValue::String(encoded.string.clone()),
            FieldKind::Int8 => FieldValue::Int8(integer as i8),
            FieldKind::Int16 => FieldValue::Int16(integer as i16),
            FieldKind::Int32 => FieldValue::Int32(integer as i32),
            FieldKind::Int64 => FieldValue::Int64(integer),
            FieldKind::Uint8 => FieldValue::Uint8(integer as u8),
            FieldKind::Uint16 => FieldValue::Uint16(integer as u16),
            FieldKind::Uint32 => FieldValue::Uint32(integer as u32),
            FieldKind::Uint64 => FieldValue::Uint64(integer as u64),
            FieldKind::Uintptr => FieldValue::Uintptr(integer as u64 as usize),
            FieldKind::Float32 => FieldValue::Float32(f32::from_bits(integer as u32)),
            FieldKind::Float64 => FieldValue::Float64(f64::from_bits(integer as u64)),
            FieldKind::Bool => FieldValue::Bool(integer == 1),
            FieldKind::Time => DateTime::parse_from_rfc3339(&encoded.string)
                .map(|t| FieldValue::Time(t.with_timezone(&Utc)))
                .unwrap_or_else(|_| FieldValue::String(encoded.string.clone())),
            FieldKind::Duration => FieldValue::Duration(Duration::from_nanos(integer as u64)),
            FieldKind::Error => FieldValue::Error(encoded.string.clone()),
            FieldKind::Stringer => FieldValue::Stringer(encoded.string.clone()),
            FieldKind::ByteString => FieldValue::ByteString(encoded.bytes.clone()),
            FieldKind::Binary => FieldValue::Binary(encoded.bytes.clone()),
            FieldKind::Namespace => FieldValue::Namespace,
            FieldKind::Array => match &encoded.json {
                Some(serde_json::Value::Array(items)) => {
                    FieldValue::Array(items.iter().cloned().map(FieldValue::from_json).collect())
                }
                _ => FieldValue::Array(Vec::new()),
            },
            FieldKind::Json => encoded.json.clone().map(FieldValue::Json).unwrap_or(FieldValue::Null),
            FieldKind::Skip => FieldValue::Null,
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Int8(_) => FieldKind::Int8,
            FieldValue::Int16(_) => FieldKind::Int16,
            FieldValue::Int32(_) => FieldKind::Int32,
            FieldValue::Int64(_) => FieldKind::Int64,
            FieldValue::Uint8(_) => FieldKind::Uint8,
            FieldValue::Uint16(_) => FieldKind::Uint16,
            FieldValue::Uint32(_) => FieldKind::Uint32,
            FieldValue::Uint64(_) => FieldKind::Uint64,
            FieldValue::Uintptr(_) => FieldKind::Uintptr,
            FieldValue::Float32(_) => FieldKind::Float32,
            FieldValue::Float64(_) => FieldKind::Float64,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Time(_) => FieldKind::Time,
            FieldValue::Duration(_) => FieldKind::Duration,
            FieldValue::Error(_) => FieldKind::Error,
            FieldValue::Stringer(_) => FieldKind::Stringer,
            FieldValue::ByteString(_) => FieldKind::ByteString,
            FieldValue::Binary(_) => FieldKind::Binary,
            FieldValue::Namespace => FieldKind::Namespace,
            FieldValue::Array(_) => FieldKind::Array,
            FieldValue::Json(_) | FieldValue::Null => FieldKind::Json,
        }
    }

    fn encode(&self, key: &str) -> EncodedField {
        let mut encoded = EncodedField::empty(key, self.kind());
        match self {
            FieldValue::String(s) | FieldValue::Error(s) | FieldValue::Stringer(s) => {
                encoded.string = s.clone();
            }
            FieldValue::Int8(i) => encoded.integer = i64::from(*i),
            FieldValue::Int16(i) => encoded.integer = i64::from(*i),
            FieldValue::Int32(i) => encoded.integer = i64::from(*i),
            FieldValue::Int64(i) => encoded.integer = *i,
            FieldValue::Uint8(u) => encoded.integer = i64::from(*u),
            FieldValue::Uint16(u) => encoded.integer = i64::from(*u),
            FieldValue::Uint32(u) => encoded.integer = i64::from(*u),
            FieldValue::Uint64(u) => encoded.integer = *u as i64,
            FieldValue::Uintptr(u) => encoded.integer = *u as u64 as i64,
            FieldValue::Float32(f) => encoded.integer = i64::from(f.to_bits()),
            FieldValue::Float64(f) => encoded.integer = f.to_bits() as i64,
            FieldValue::Bool(b) => encoded.integer = i64::from(*b),
            FieldValue::Time(t) => {
                encoded.string = t.to_rfc3339_opts(SecondsFormat::Nanos, true);
            }
            FieldValue::Duration(d) => {
                encoded.integer = i64::try_from(d.as_nanos()).unwrap_or(i64::MAX);
            }
            FieldValue::ByteString(bytes) | FieldValue::Binary(bytes) => {
                encoded.bytes = bytes.clone();
            }
            FieldValue::Namespace => {}
            FieldValue::Array(_) | FieldValue::Json(_) | FieldValue::Null => {
                encoded.json = Some(self.to_json_value());
            }
        }
        encoded
    }
}

fn float_json(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(f.to_string()))
}

macro_rules! impl_from_for_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    FieldValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_field_value! {
    String => String,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uintptr,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    DateTime<Utc> => Time,
    Duration => Duration,
    serde_json::Value => Json,
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

/// Type tag of an encoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Bool,
    Time,
    Duration,
    Error,
    Stringer,
    ByteString,
    Binary,
    Namespace,
    Array,
    Json,
    Skip,
}

/// Flat field representation consumed by the output sinks
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedField {
    pub key: String,
    pub kind: FieldKind,
    pub integer: i64,
    pub string: String,
    pub bytes: Vec<u8>,
    pub json: Option<serde_json::Value>,
}

impl EncodedField {
    fn empty(key: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            kind,
            integer: 0,
            string: String::new(),
            bytes: Vec::new(),
            json: None,
        }
    }
}

type Thunk = Arc<dyn Fn() -> FieldValue + Send + Sync>;

/// A named, typed log datum
#[derive(Clone)]
pub enum Field {
    /// Typed value captured at construction
    Eager { key: String, value: FieldValue },
    /// Opaque caller value, kept as serialized JSON
    Custom { key: String, value: serde_json::Value },
    /// Value computed every time it is read
    Lazy { key: String, thunk: Thunk },
    /// A field already in sink form
    Wrapped(EncodedField),
    /// Sentinel that every consumer drops
    Skip,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Eager { key, value } => f.debug_struct("Eager").field("key", key).field("value", value).finish(),
            Field::Custom { key, value } => f.debug_struct("Custom").field("key", key).field("value", value).finish(),
            Field::Lazy { key, .. } => f.debug_struct("Lazy").field("key", key).finish_non_exhaustive(),
            Field::Wrapped(encoded) => f.debug_tuple("Wrapped").field(encoded).finish(),
            Field::Skip => write!(f, "Skip"),
        }
    }
}

impl Field {
    fn eager(key: impl Into<String>, value: FieldValue) -> Self {
        Field::Eager {
            key: key.into(),
            value,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::eager(key, FieldValue::String(value.into()))
    }

    pub fn int8(key: impl Into<String>, value: i8) -> Self {
        Self::eager(key, FieldValue::Int8(value))
    }

    pub fn int16(key: impl Into<String>, value: i16) -> Self {
        Self::eager(key, FieldValue::Int16(value))
    }

    pub fn int32(key: impl Into<String>, value: i32) -> Self {
        Self::eager(key, FieldValue::Int32(value))
    }

    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::eager(key, FieldValue::Int64(value))
    }

    /// Platform-width signed integer, stored as 64 bits
    pub fn int(key: impl Into<String>, value: isize) -> Self {
        Self::eager(key, FieldValue::Int64(value as i64))
    }

    pub fn uint8(key: impl Into<String>, value: u8) -> Self {
        Self::eager(key, FieldValue::Uint8(value))
    }

    pub fn uint16(key: impl Into<String>, value: u16) -> Self {
        Self::eager(key, FieldValue::Uint16(value))
    }

    pub fn uint32(key: impl Into<String>, value: u32) -> Self {
        Self::eager(key, FieldValue::Uint32(value))
    }

    pub fn uint64(key: impl Into<String>, value: u64) -> Self {
        Self::eager(key, FieldValue::Uint64(value))
    }

    pub fn uint(key: impl Into<String>, value: usize) -> Self {
        Self::eager(key, FieldValue::Uint64(value as u64))
    }

    pub fn uintptr(key: impl Into<String>, value: usize) -> Self {
        Self::eager(key, FieldValue::Uintptr(value))
    }

    pub fn float32(key: impl Into<String>, value: f32) -> Self {
        Self::eager(key, FieldValue::Float32(value))
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::eager(key, FieldValue::Float64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::eager(key, FieldValue::Bool(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::eager(key, FieldValue::Time(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::eager(key, FieldValue::Duration(value))
    }

    /// Error field under the conventional `error` key
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::named_error("error", err)
    }

    pub fn named_error(key: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Self::eager(key, FieldValue::Error(err.to_string()))
    }

    pub fn stringer(key: impl Into<String>, value: &dyn fmt::Display) -> Self {
        Self::eager(key, FieldValue::Stringer(value.to_string()))
    }

    pub fn byte_string(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::eager(key, FieldValue::ByteString(value.into()))
    }

    pub fn binary(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::eager(key, FieldValue::Binary(value.into()))
    }

    /// Marker opening a nested namespace for the following fields
    pub fn namespace(key: impl Into<String>) -> Self {
        Self::eager(key, FieldValue::Namespace)
    }

    pub fn array<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        Self::eager(key, FieldValue::Array(values.into_iter().map(Into::into).collect()))
    }

    /// Serializable object; serialization failures are recorded as an error value
    pub fn object<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Self::eager(key, FieldValue::Json(json)),
            Err(e) => Self::eager(key, FieldValue::Error(e.to_string())),
        }
    }

    /// Any serializable value, stored with the most specific type available
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Self::eager(key, FieldValue::from_json(json)),
            Err(e) => Self::eager(key, FieldValue::Error(e.to_string())),
        }
    }

    /// Opaque value kept verbatim as JSON
    pub fn custom<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| serde_json::Value::String(e.to_string()));
        Field::Custom {
            key: key.into(),
            value,
        }
    }

    /// Field whose value is computed on every read
    pub fn lazy<F>(key: impl Into<String>, thunk: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        Field::Lazy {
            key: key.into(),
            thunk: Arc::new(thunk),
        }
    }

    /// Field only when `condition` holds, `Skip` otherwise
    pub fn conditional(condition: bool, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        if condition {
            Self::eager(key, value.into())
        } else {
            Field::Skip
        }
    }

    /// Field for a present value, `Skip` for `None`
    pub fn nullable<V: Into<FieldValue>>(key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => Self::eager(key, v.into()),
            None => Field::Skip,
        }
    }

    /// Wrap a field that is already in sink form
    pub fn wrap(encoded: EncodedField) -> Self {
        Field::Wrapped(encoded)
    }

    pub fn skip() -> Self {
        Field::Skip
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Field::Skip)
    }

    /// Field key; empty for `Skip`
    pub fn key(&self) -> &str {
        match self {
            Field::Eager { key, .. } | Field::Custom { key, .. } | Field::Lazy { key, .. } => key,
            Field::Wrapped(encoded) => &encoded.key,
            Field::Skip => "",
        }
    }

    /// Current value; forces lazy fields
    pub fn value(&self) -> FieldValue {
        match self {
            Field::Eager { value, .. } => value.clone(),
            Field::Custom { value, .. } => FieldValue::Json(value.clone()),
            Field::Lazy { thunk, .. } => thunk(),
            Field::Wrapped(encoded) => FieldValue::from_encoded(encoded),
            Field::Skip => FieldValue::Null,
        }
    }

    /// Convert to the sink representation
    pub fn to_encoded(&self) -> EncodedField {
        match self {
            Field::Wrapped(encoded) => encoded.clone(),
            Field::Skip => EncodedField::empty("", FieldKind::Skip),
            other => other.value().encode(other.key()),
        }
    }
}

/// Merge two field sets; `overrides` win on key collisions and `Skip` fields are dropped
pub fn merge_fields(base: &[Field], overrides: &[Field]) -> Vec<Field> {
    let mut merged: Vec<Field> = Vec::with_capacity(base.len() + overrides.len());
    for field in base.iter().chain(overrides) {
        if field.is_skip() {
            continue;
        }
        match merged.iter_mut().find(|existing| existing.key() == field.key()) {
            Some(existing) => *existing = field.clone(),
            None => merged.push(field.clone()),
        }
    }
    merged
}

/// Reject fields that no sink can render
pub fn validate_field(field: &Field) -> Result<()> {
    if field.is_skip() {
        return Ok(());
    }
    if field.key().trim().is_empty() {
        return Err(LoggerError::InvalidField("field key must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_eager_value_is_stable() {
        let field = Field::string("user", "alice");
        assert_eq!(field.key(), "user");
        assert_eq!(field.value(), FieldValue::String("alice".to_string()));
        assert_eq!(field.value(), field.value());
    }

    #[test]
    fn test_lazy_value_recomputes() {
        let counter = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&counter);
        let field = Field::lazy("tick", move || FieldValue::Uint64(c.fetch_add(1, Ordering::SeqCst)));

        assert_eq!(field.value(), FieldValue::Uint64(0));
        assert_eq!(field.value(), FieldValue::Uint64(1));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_conditional_and_nullable() {
        assert!(Field::conditional(false, "debug", true).is_skip());
        assert!(!Field::conditional(true, "debug", true).is_skip());
        assert!(Field::nullable::<i64>("count", None).is_skip());
        assert_eq!(Field::nullable("count", Some(3_i64)).value(), FieldValue::Int64(3));
    }

    #[test]
    fn test_encoded_roundtrip_keeps_width() {
        let field = Field::int16("temp", -12345);
        let encoded = field.to_encoded();
        assert_eq!(encoded.kind, FieldKind::Int16);
        assert_eq!(FieldValue::from_encoded(&encoded), FieldValue::Int16(-12345));

        let field = Field::uint64("big", u64::MAX);
        assert_eq!(Field::wrap(field.to_encoded()).value(), FieldValue::Uint64(u64::MAX));
    }

    #[test]
    fn test_encoded_roundtrip_keeps_float_bits() {
        let value = f32::from_bits(0x7fc0_0001);
        let decoded = FieldValue::from_encoded(&Field::float32("nan", value).to_encoded());
        match decoded {
            FieldValue::Float32(f) => assert_eq!(f.to_bits(), 0x7fc0_0001),
            other => panic!("Expected Float32, got {:?}", other),
        }

        let decoded = FieldValue::from_encoded(&Field::float64("neg_zero", -0.0).to_encoded());
        match decoded {
            FieldValue::Float64(f) => assert_eq!(f.to_bits(), (-0.0_f64).to_bits()),
            other => panic!("Expected Float64, got {:?}", other),
        }
    }

    #[test]
    fn test_encoded_time_and_duration() {
        let now = Utc::now();
        let decoded = Field::wrap(Field::time("at", now).to_encoded()).value();
        assert_eq!(decoded, FieldValue::Time(now));

        let elapsed = Duration::from_millis(1500);
        let decoded = Field::wrap(Field::duration("elapsed", elapsed).to_encoded()).value();
        assert_eq!(decoded, FieldValue::Duration(elapsed));
    }

    #[test]
    fn test_any_picks_specific_type() {
        assert_eq!(Field::any("n", &42).value(), FieldValue::Int64(42));
        assert_eq!(Field::any("s", "x").value(), FieldValue::String("x".to_string()));
        assert!(matches!(Field::any("v", &vec![1, 2]).value(), FieldValue::Json(_)));
    }

    #[test]
    fn test_merge_fields_override_and_skip() {
        let base = vec![Field::string("a", "1"), Field::string("b", "2"), Field::Skip];
        let overrides = vec![Field::string("b", "3"), Field::conditional(false, "c", "4")];

        let merged = merge_fields(&base, &overrides);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].value(), FieldValue::String("3".to_string()));
        assert!(merged.iter().all(|f| f.key() != "c"));
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(FieldValue::Duration(Duration::from_millis(1500)).to_string(), "1.5s");
        assert_eq!(
            FieldValue::Array(vec![FieldValue::Int32(1), FieldValue::from("x")]).to_string(),
            "[1, x]"
        );
        assert_eq!(FieldValue::ByteString(b"raw".to_vec()).to_string(), "raw");
    }

    #[test]
    fn test_validate_field() {
        assert!(validate_field(&Field::string("ok", "v")).is_ok());
        assert!(validate_field(&Field::Skip).is_ok());
        assert!(matches!(
            validate_field(&Field::string("", "v")),
            Err(LoggerError::InvalidField(_))
        ));
    }
}
