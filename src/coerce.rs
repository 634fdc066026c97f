//! The value coercer: convert one dynamic value to one declared type.
//!
//! Dispatch is by type-expression shape. Unions resolve alternatives in
//! declared order with local error capture; builtins route through the named
//! fail-soft casts in [`scalar`]; class-like names go through the registry
//! (enum lookup, date/time construction, or recursive hydration).

pub mod scalar;
pub mod temporal;

use log::trace;

use crate::descriptor::{DateTimeKind, TypeExpr};
use crate::error::BindError;
use crate::hydrate;
use crate::registry::{Registry, TypeEntry};
use crate::value::Value;

/// Nested hydration/coercion deeper than this fails with
/// `RecursionLimitExceeded` instead of overflowing the stack.
pub const MAX_DEPTH: usize = 64;

/// Coerce `value` to `ty`. Pure; neither input is mutated.
pub fn coerce(value: &Value, ty: &TypeExpr, registry: &Registry) -> Result<Value, BindError> {
    coerce_at(value, ty, registry, 0)
}

pub(crate) fn coerce_at(
    value: &Value,
    ty: &TypeExpr,
    registry: &Registry,
    depth: usize,
) -> Result<Value, BindError> {
    if depth > MAX_DEPTH {
        return Err(BindError::RecursionLimitExceeded { limit: MAX_DEPTH });
    }
    match ty {
        // no declared type / unsupported shape: pass through, no validation
        TypeExpr::Unknown | TypeExpr::Other => Ok(value.clone()),

        // Ordered alternatives: first success wins; per-alternative failures
        // are captured locally and never propagate. Exhaustion falls back to
        // the ORIGINAL value unchanged — deliberately permissive, and callers
        // rely on it (a wrong-typed value can land in a member this way).
        // The recursion guard is the one failure local capture must not eat.
        TypeExpr::Union(alternatives) => {
            for alt in alternatives {
                match coerce_at(value, alt, registry, depth) {
                    Ok(coerced) => return Ok(coerced),
                    Err(err @ BindError::RecursionLimitExceeded { .. }) => return Err(err),
                    Err(_) => continue,
                }
            }
            Ok(value.clone())
        }

        TypeExpr::Named(name) => coerce_named(value, name, registry, depth),
    }
}

fn coerce_named(
    value: &Value,
    name: &str,
    registry: &Registry,
    depth: usize,
) -> Result<Value, BindError> {
    if value.is_null() {
        return if name == "null" || name == "mixed" {
            Ok(Value::Null)
        } else {
            Err(BindError::NonNullableNull { to: name.to_string() })
        };
    }
    match name {
        "null" => Err(unsupported(value, name)),
        "int" => Ok(Value::Int(scalar::to_int_lossy(value))),
        "float" => Ok(Value::Float(scalar::to_float_lossy(value))),
        "string" => scalar::stringify(value)
            .map(Value::Str)
            .ok_or_else(|| unsupported(value, name)),
        "bool" => Ok(Value::Bool(scalar::truthy(value))),
        "array" => Ok(to_array(value)),
        "mixed" => Ok(value.clone()),
        "object" => match value {
            Value::Map(_) | Value::Object(_) => Ok(value.clone()),
            _ => Err(unsupported(value, name)),
        },
        class_name => coerce_class(value, class_name, registry, depth),
    }
}

/// Array cast: containers pass through, an instance exposes its field map,
/// anything scalar wraps into a one-element sequence.
fn to_array(value: &Value) -> Value {
    match value {
        Value::Seq(_) | Value::Map(_) => value.clone(),
        Value::Object(inst) => Value::Map(inst.fields().clone()),
        other => Value::Seq(vec![other.clone()]),
    }
}

fn coerce_class(
    value: &Value,
    class_name: &str,
    registry: &Registry,
    depth: usize,
) -> Result<Value, BindError> {
    // already satisfies the target type
    match value {
        Value::Object(inst) if inst.type_name() == class_name => return Ok(value.clone()),
        Value::Enum(ev) if ev.type_name() == class_name => return Ok(value.clone()),
        _ => {}
    }
    trace!("class coercion: {} -> `{class_name}`", value.kind());
    match registry.get(class_name) {
        None => Err(BindError::UnknownType(class_name.to_string())),
        Some(TypeEntry::Enum(desc)) => {
            if desc.is_backed() {
                desc.from_backing(value).map(Value::Enum).ok_or_else(|| {
                    BindError::InvalidEnumValue {
                        enum_name: desc.name().to_string(),
                        value: scalar::stringify(value).unwrap_or_else(|| value.kind().to_string()),
                    }
                })
            } else {
                match value {
                    Value::Str(name) => {
                        desc.member_named(name).map(Value::Enum).ok_or_else(|| {
                            BindError::UnknownEnumMember {
                                enum_name: desc.name().to_string(),
                                name: name.clone(),
                            }
                        })
                    }
                    _ => Err(unsupported(value, class_name)),
                }
            }
        }
        Some(TypeEntry::DateTime(kind)) => coerce_datetime(value, class_name, *kind),
        Some(TypeEntry::Object(desc)) => match value {
            Value::Map(data) => {
                hydrate::hydrate_at(data, desc, registry, depth + 1).map(Value::Object)
            }
            _ => Err(unsupported(value, class_name)),
        },
    }
}

fn coerce_datetime(
    value: &Value,
    class_name: &str,
    kind: DateTimeKind,
) -> Result<Value, BindError> {
    match value {
        // already an instant; representation conversion preserves it as-is
        Value::DateTime(_) => Ok(value.clone()),
        Value::Int(secs) => temporal::from_unix_seconds(*secs)
            .map(Value::DateTime)
            .ok_or_else(|| unsupported(value, class_name)),
        Value::Float(secs) => temporal::from_unix_seconds_f64(*secs)
            .map(Value::DateTime)
            .ok_or_else(|| unsupported(value, class_name)),
        Value::Str(s) => {
            let parsed = match kind {
                DateTimeKind::Rich => temporal::parse_flexible(s),
                DateTimeKind::Plain => temporal::parse_strict(s),
            };
            parsed
                .map(Value::DateTime)
                .ok_or_else(|| unsupported(value, class_name))
        }
        _ => Err(unsupported(value, class_name)),
    }
}

fn unsupported(value: &Value, to: &str) -> BindError {
    BindError::UnsupportedCoercion { from: value.kind().to_string(), to: to.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumDescriptor, MemberDescriptor, TypeDescriptor};
    use crate::value::Backing;
    use indexmap::indexmap;

    fn status_registry() -> Registry {
        Registry::new().with_enum(EnumDescriptor::backed("Status", vec![
            ("Active", Backing::Str("active".into())),
            ("Inactive", Backing::Str("inactive".into())),
        ]))
    }

    #[test]
    fn unknown_and_other_pass_through() {
        let registry = Registry::new();
        let v = Value::Seq(vec![Value::from(1i64)]);
        assert_eq!(coerce(&v, &TypeExpr::Unknown, &registry).unwrap(), v);
        assert_eq!(coerce(&v, &TypeExpr::Other, &registry).unwrap(), v);
    }

    #[test]
    fn null_rules() {
        let registry = Registry::new();
        assert_eq!(
            coerce(&Value::Null, &TypeExpr::named("mixed"), &registry).unwrap(),
            Value::Null
        );
        assert_eq!(
            coerce(&Value::Null, &TypeExpr::named("int"), &registry).unwrap_err(),
            BindError::NonNullableNull { to: "int".to_string() }
        );
        // nullable union admits null through its null alternative
        let opt_int = TypeExpr::optional(TypeExpr::named("int"));
        assert_eq!(coerce(&Value::Null, &opt_int, &registry).unwrap(), Value::Null);
    }

    #[test]
    fn primitive_dispatch() {
        let registry = Registry::new();
        assert_eq!(
            coerce(&Value::from("41"), &TypeExpr::named("int"), &registry).unwrap(),
            Value::Int(41)
        );
        assert_eq!(
            coerce(&Value::from(7i64), &TypeExpr::named("string"), &registry).unwrap(),
            Value::from("7")
        );
        assert_eq!(
            coerce(&Value::from("yes"), &TypeExpr::named("bool"), &registry).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            coerce(&Value::from(3i64), &TypeExpr::named("array"), &registry).unwrap(),
            Value::Seq(vec![Value::Int(3)])
        );
        assert_eq!(
            coerce(&Value::Seq(vec![]), &TypeExpr::named("string"), &registry).unwrap_err(),
            BindError::UnsupportedCoercion { from: "seq".into(), to: "string".into() }
        );
    }

    #[test]
    fn union_first_success_wins() {
        let registry = status_registry();
        let ty = TypeExpr::union([TypeExpr::named("Status"), TypeExpr::named("int")]);
        // "active" resolves through the Status alternative
        assert!(matches!(
            coerce(&Value::from("active"), &ty, &registry).unwrap(),
            Value::Enum(ev) if ev.member() == "Active"
        ));
        // 42 is rejected by Status and falls through to int
        assert_eq!(coerce(&Value::from(42i64), &ty, &registry).unwrap(), Value::Int(42));
    }

    #[test]
    fn union_exhaustion_returns_original_value() {
        let registry = status_registry();
        let ty = TypeExpr::union([TypeExpr::named("Status"), TypeExpr::named("object")]);
        // rejected by every alternative: the original value comes back
        // unchanged, wrong type and all
        let v = Value::from(42i64);
        assert_eq!(coerce(&v, &ty, &registry).unwrap(), v);
    }

    #[test]
    fn backed_enum_coercion() {
        let registry = status_registry();
        let ty = TypeExpr::named("Status");
        assert!(matches!(
            coerce(&Value::from("active"), &ty, &registry).unwrap(),
            Value::Enum(ev) if ev.member() == "Active"
        ));
        assert_eq!(
            coerce(&Value::from("bogus"), &ty, &registry).unwrap_err(),
            BindError::InvalidEnumValue { enum_name: "Status".into(), value: "bogus".into() }
        );
    }

    #[test]
    fn plain_enum_coercion() {
        let registry = Registry::new()
            .with_enum(EnumDescriptor::plain("Suit", vec!["Hearts", "Spades"]));
        let ty = TypeExpr::named("Suit");
        assert!(matches!(
            coerce(&Value::from("Hearts"), &ty, &registry).unwrap(),
            Value::Enum(ev) if ev.member() == "Hearts" && ev.backing().is_none()
        ));
        assert_eq!(
            coerce(&Value::from("Clubs"), &ty, &registry).unwrap_err(),
            BindError::UnknownEnumMember { enum_name: "Suit".into(), name: "Clubs".into() }
        );
    }

    #[test]
    fn datetime_coercion_paths() {
        let registry = Registry::new()
            .with_datetime("Timestamp", DateTimeKind::Rich)
            .with_datetime("PlainDate", DateTimeKind::Plain);

        let rich = TypeExpr::named("Timestamp");
        let from_int = coerce(&Value::from(0i64), &rich, &registry).unwrap();
        assert!(matches!(from_int, Value::DateTime(_)));

        let from_str = coerce(&Value::from("2024-05-01T00:00:00Z"), &rich, &registry).unwrap();
        assert!(matches!(from_str, Value::DateTime(_)));

        // plain targets refuse timestamp-looking strings
        let plain = TypeExpr::named("PlainDate");
        assert!(coerce(&Value::from("1700000000"), &plain, &registry).is_err());
        // but numbers are still unix seconds
        assert!(coerce(&Value::from(1700000000i64), &plain, &registry).is_ok());
    }

    #[test]
    fn unregistered_class_name() {
        let registry = Registry::new();
        assert_eq!(
            coerce(&Value::Map(indexmap! {}), &TypeExpr::named("Ghost"), &registry).unwrap_err(),
            BindError::UnknownType("Ghost".to_string())
        );
    }

    #[test]
    fn already_satisfying_values_pass_unchanged() {
        let registry = status_registry().with_object(TypeDescriptor::field_set("User", vec![
            MemberDescriptor::required("name", TypeExpr::named("string")),
        ]));
        let ev = Value::Enum(crate::value::EnumValue::new(
            "Status",
            "Active",
            Some(Backing::Str("active".into())),
        ));
        assert_eq!(coerce(&ev, &TypeExpr::named("Status"), &registry).unwrap(), ev);

        let inst = Value::Object(crate::value::Instance::new(
            "User",
            indexmap! { "name".to_string() => Value::from("Ann") },
        ));
        assert_eq!(coerce(&inst, &TypeExpr::named("User"), &registry).unwrap(), inst);
    }
}
