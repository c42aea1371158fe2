//! Shape type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point (accepts integral values)
//! - bool: Boolean
//! - datetime: ISO-8601 string, seconds precision, no timezone
//! - object: Nested object with field shape
//! - array: Homogeneous array with element type
//! - map: Record with typed identifier keys and a single value type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// Identifier kinds allowed as map keys.
///
/// The store addresses records by opaque identifiers: `uid` comes from
/// the external auth provider, `id` is minted by the store, `datetime`
/// is an ISO-8601 timestamp whose lexicographic order is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKey {
    /// Auth-provider user id
    Uid,
    /// Store-minted id
    Id,
    /// ISO-8601 timestamp key
    DateTime,
}

impl MapKey {
    /// Returns the key kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            MapKey::Uid => "uid key",
            MapKey::Id => "id key",
            MapKey::DateTime => "datetime key",
        }
    }

    /// Checks a raw map key against this kind.
    pub fn accepts(&self, key: &str) -> bool {
        match self {
            MapKey::Uid | MapKey::Id => !key.is_empty(),
            MapKey::DateTime => parse_datetime(key).is_some(),
        }
    }
}

/// Parses a store datetime string.
///
/// The store writes `YYYY-MM-DDTHH:MM:SS` (UTC, no timezone suffix) but
/// reads tolerate fractional seconds and an explicit offset.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Supported field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// ISO-8601 timestamp string
    DateTime,
    /// Nested object with its own field shape
    Object {
        /// Nested field definitions
        fields: BTreeMap<String, FieldDef>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element: Box<FieldType>,
    },
    /// Record keyed by typed identifiers, all values of one type
    Map {
        /// Key kind
        key: MapKey,
        /// Value type
        value: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::DateTime => "datetime",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
            FieldType::Map { .. } => "map",
        }
    }
}

/// Field definition: a type plus a presence requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create a required field of any type
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
        }
    }

    /// Create an optional field of any type
    pub fn optional(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::required(FieldType::String)
    }

    /// Create a required int field
    pub fn required_int() -> Self {
        Self::required(FieldType::Int)
    }

    /// Create a required float field
    pub fn required_float() -> Self {
        Self::required(FieldType::Float)
    }

    /// Create a required datetime field
    pub fn required_datetime() -> Self {
        Self::required(FieldType::DateTime)
    }

    /// Create a required object field
    pub fn required_object(fields: BTreeMap<String, FieldDef>) -> Self {
        Self::required(FieldType::Object { fields })
    }

    /// Create a required array field
    pub fn required_array(element: FieldType) -> Self {
        Self::required(FieldType::Array {
            element: Box::new(element),
        })
    }

    /// Create a required map field
    pub fn required_map(key: MapKey, value: FieldType) -> Self {
        Self::required(FieldType::Map {
            key,
            value: Box::new(value),
        })
    }

    /// Create an optional map field
    pub fn optional_map(key: MapKey, value: FieldType) -> Self {
        Self::optional(FieldType::Map {
            key,
            value: Box::new(value),
        })
    }
}

/// Complete shape descriptor for one path template.
///
/// Most nodes are objects, but some (the per-mode game history) are bare
/// maps, so the root of a shape is a full field type rather than a field
/// table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name, used in error context
    pub name: String,
    /// The structure a value at this path must have
    pub root: FieldType,
}

impl Shape {
    /// Create an object shape from its field table
    pub fn object(name: impl Into<String>, fields: BTreeMap<String, FieldDef>) -> Self {
        Self {
            name: name.into(),
            root: FieldType::Object { fields },
        }
    }

    /// Create a bare map shape
    pub fn map(name: impl Into<String>, key: MapKey, value: FieldType) -> Self {
        Self {
            name: name.into(),
            root: FieldType::Map {
                key,
                value: Box::new(value),
            },
        }
    }
}
