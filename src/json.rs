//! serde_json interop: feed decoded JSON straight into the hydrator and emit
//! flattened output as JSON. Object key order is preserved in both
//! directions (`preserve_order` / `IndexMap`).

use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use crate::flatten;
use crate::value::{Backing, Value, ValueMap};

pub fn json_to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(xs) => Value::Seq(xs.iter().map(json_to_value).collect()),
        Json::Object(m) => {
            Value::Map(m.iter().map(|(k, v)| (k.clone(), json_to_value(v))).collect())
        }
    }
}

/// Typed-object kinds leave in their canonical flat encodings: instances as
/// objects, enums as backing value or name, datetimes as canonical strings.
/// Non-finite floats have no JSON form and emit as null.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::Str(s) => Json::String(s.clone()),
        Value::Seq(xs) => Json::Array(xs.iter().map(value_to_json).collect()),
        Value::Map(m) => {
            Json::Object(m.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect())
        }
        Value::Object(inst) => value_to_json(&Value::Map(flatten::flatten(inst))),
        Value::Enum(ev) => match ev.backing() {
            Some(Backing::Int(i)) => Json::from(*i),
            Some(Backing::Str(s)) => Json::String(s.clone()),
            None => Json::String(ev.member().to_string()),
        },
        Value::DateTime(dt) => Json::String(crate::coerce::temporal::render(dt)),
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        json_to_value(&json)
    }
}

impl From<&Value> for Json {
    fn from(value: &Value) -> Self {
        value_to_json(value)
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        value_to_json(self).serialize(serializer)
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Decode a JSON document into a dynamic map ready for hydration. Fails on
/// non-object top levels.
pub fn map_from_json_str(src: &str) -> Result<ValueMap, String> {
    let json: Json = from_str_with_path(src)?;
    match json_to_value(&json) {
        Value::Map(m) => Ok(m),
        other => Err(format!("expected a JSON object at the top level, got {}", other.kind())),
    }
}
