//! The dynamic value tree: the universal representation on both sides of the
//! engine. Untyped input (request data, decoded JSON, config maps) arrives as
//! a `Value`, and flattened output leaves as one.
//!
//! Unlike `serde_json::Value`, this sum also carries the three typed object
//! kinds the coercer understands — constructed instances, enum members, and
//! date/time instants — so a hydrated graph is still a `Value` tree.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

/// Ordered string-keyed mapping. Insertion order is load-bearing: member
/// declaration order and positional constructor calls both ride on it.
pub type ValueMap = IndexMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(ValueMap),
    /// A constructed value object (product of hydration).
    Object(Instance),
    /// A resolved enumeration member.
    Enum(EnumValue),
    /// A date/time instant with a fixed UTC offset.
    DateTime(DateTime<FixedOffset>),
}

impl Value {
    /// Short shape name used in error messages (`cannot coerce seq to int`).
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Enum(_) => "enum",
            Value::DateTime(_) => "datetime",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(xs) => Some(xs),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}
impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Float(f) }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}
impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self { Value::Seq(xs) }
}
impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self { Value::Map(m) }
}
impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self { Value::DateTime(dt) }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPED OBJECT KINDS
// ————————————————————————————————————————————————————————————————————————————

/// A constructed value object: type name plus ordered member values.
///
/// The engine never mutates an `Instance` after construction; the field map
/// order is the member declaration order of the descriptor that built it.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    type_name: String,
    fields: ValueMap,
}

impl Instance {
    pub fn new(type_name: impl Into<String>, fields: ValueMap) -> Self {
        Self { type_name: type_name.into(), fields }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &ValueMap {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// The primitive backing a value-backed enum member carries.
#[derive(Clone, Debug, PartialEq)]
pub enum Backing {
    Int(i64),
    Str(String),
}

/// A resolved enumeration member. `backing` is `Some` for value-backed enums
/// and `None` for plain (name-only) enums.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    type_name: String,
    member: String,
    backing: Option<Backing>,
}

impl EnumValue {
    pub fn new(type_name: impl Into<String>, member: impl Into<String>, backing: Option<Backing>) -> Self {
        Self { type_name: type_name.into(), member: member.into(), backing }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn backing(&self) -> Option<&Backing> {
        self.backing.as_ref()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    #[test]
    fn kind_names_cover_every_shape() {
        let dt = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap();
        let cases: Vec<(Value, &str)> = vec![
            (Value::Null, "null"),
            (Value::from(true), "bool"),
            (Value::from(1i64), "int"),
            (Value::from(1.5f64), "float"),
            (Value::from("x"), "string"),
            (Value::Seq(vec![]), "seq"),
            (Value::Map(ValueMap::new()), "map"),
            (Value::Object(Instance::new("T", ValueMap::new())), "object"),
            (Value::Enum(EnumValue::new("E", "A", None)), "enum"),
            (Value::DateTime(dt), "datetime"),
        ];
        for (v, k) in cases {
            assert_eq!(v.kind(), k);
        }
    }

    #[test]
    fn instance_preserves_field_order() {
        let inst = Instance::new("Point", indexmap! {
            "x".to_string() => Value::from(1i64),
            "y".to_string() => Value::from(2i64),
        });
        let names: Vec<&str> = inst.fields().keys().map(|s| s.as_str()).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(inst.get("y"), Some(&Value::Int(2)));
    }
}
