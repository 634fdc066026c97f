//! The object flattener: the inverse of hydration. Walks an instance's
//! members in declaration order and produces a plain key/value map with
//! canonical scalar encodings for enums and date/time values.

use crate::coerce::temporal;
use crate::value::{Backing, Instance, Value, ValueMap};

/// The exposed "to map" capability: every nested instance flattens through
/// the same function. Pure; `instance` is not mutated.
pub fn flatten(instance: &Instance) -> ValueMap {
    let mut out = ValueMap::with_capacity(instance.fields().len());
    for (name, value) in instance.fields() {
        out.insert(name.clone(), flatten_value(value));
    }
    out
}

fn flatten_value(value: &Value) -> Value {
    match value {
        Value::Object(inst) => Value::Map(flatten(inst)),
        Value::Seq(xs) => Value::Seq(xs.iter().map(flatten_value).collect()),
        Value::Map(m) => {
            Value::Map(m.iter().map(|(k, v)| (k.clone(), flatten_value(v))).collect())
        }
        // value-backed enums flatten to their backing value, plain enums to
        // their member name
        Value::Enum(ev) => match ev.backing() {
            Some(Backing::Int(i)) => Value::Int(*i),
            Some(Backing::Str(s)) => Value::Str(s.clone()),
            None => Value::Str(ev.member().to_string()),
        },
        Value::DateTime(dt) => Value::Str(temporal::render(dt)),
        other => other.clone(),
    }
}
