//! Wire encodings for typed record fields.
//!
//! The Table API sends most primitives as quoted strings (`"true"`, `"3"`,
//! `"2024-01-31 08:15:00"`). These wrappers accept both the quoted and the
//! native JSON form and always serialize back to the quoted form.

use chrono::NaiveDateTime;
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Timestamp layout used by the Table API
pub const SN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Boolean field, usually transmitted as `"true"` / `"false"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnBool(pub bool);

/// Integer field, usually transmitted as a quoted decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnInt(pub i64);

/// Date-time field in instance-local `YYYY-MM-DD HH:MM:SS` form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnTime(pub NaiveDateTime);

impl From<SnBool> for bool {
    fn from(value: SnBool) -> Self {
        value.0
    }
}

impl From<SnInt> for i64 {
    fn from(value: SnInt) -> Self {
        value.0
    }
}

impl From<SnTime> for NaiveDateTime {
    fn from(value: SnTime) -> Self {
        value.0
    }
}

struct SnBoolVisitor;

impl<'de> Visitor<'de> for SnBoolVisitor {
    type Value = SnBool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean or a quoted \"true\"/\"false\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SnBool, E> {
        Ok(SnBool(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SnBool, E> {
        match v {
            "true" => Ok(SnBool(true)),
            "false" => Ok(SnBool(false)),
            other => Err(E::custom(format!("invalid boolean value {:?}", other))),
        }
    }
}

impl<'de> Deserialize<'de> for SnBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnBoolVisitor)
    }
}

impl Serialize for SnBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.0 { "true" } else { "false" })
    }
}

struct SnIntVisitor;

impl<'de> Visitor<'de> for SnIntVisitor {
    type Value = SnInt;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a quoted decimal integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SnInt, E> {
        Ok(SnInt(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SnInt, E> {
        i64::try_from(v)
            .map(SnInt)
            .map_err(|_| E::custom(format!("invalid integer value {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SnInt, E> {
        v.trim()
            .parse::<i64>()
            .map(SnInt)
            .map_err(|_| E::custom(format!("invalid integer value {:?}", v)))
    }
}

impl<'de> Deserialize<'de> for SnInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnIntVisitor)
    }
}

impl Serialize for SnInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for SnTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, SN_TIME_FORMAT)
            .map(SnTime)
            .map_err(|e| de::Error::custom(format!("invalid date-time value {:?}: {}", raw, e)))
    }
}

impl Serialize for SnTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(SN_TIME_FORMAT))
    }
}

/// Decode an optional field where `null`, a missing key and `""` all mean absent
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}
