//! The object hydrator: one input record + one descriptor → one instance.
//!
//! Member resolution follows a three-way rule, in declaration order:
//! present → coerce; absent with a default → the default verbatim (defaults
//! are trusted, never coerced); absent but nullable → null; otherwise the
//! member is missing and hydration fails.

use log::trace;

use crate::coerce::{self, MAX_DEPTH};
use crate::descriptor::{ConstructionMode, MemberDescriptor, TypeDescriptor};
use crate::error::BindError;
use crate::keys;
use crate::registry::Registry;
use crate::value::{Instance, Value, ValueMap};

/// Front API: a registry view with `hydrate` as its entry point. Cheap to
/// construct per call; holds no state of its own.
pub struct Hydrator<'r> {
    registry: &'r Registry,
}

impl<'r> Hydrator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn hydrate(&self, data: &ValueMap, type_name: &str) -> Result<Instance, BindError> {
        let descriptor = self.registry.descriptor(type_name)?;
        hydrate_at(data, descriptor, self.registry, 0)
    }
}

pub(crate) fn hydrate_at(
    data: &ValueMap,
    descriptor: &TypeDescriptor,
    registry: &Registry,
    depth: usize,
) -> Result<Instance, BindError> {
    if depth > MAX_DEPTH {
        return Err(BindError::RecursionLimitExceeded { limit: MAX_DEPTH });
    }
    trace!(
        "hydrating `{}` ({} members, depth {depth})",
        descriptor.name(),
        descriptor.members().len()
    );

    // key normalization is applied once, before any member is resolved
    let normalized;
    let data = if descriptor.normalize_keys() {
        normalized = keys::normalize_keys(data);
        &normalized
    } else {
        data
    };

    let mut fields = ValueMap::with_capacity(descriptor.members().len());
    match descriptor.mode() {
        ConstructionMode::FieldSet => {
            for member in descriptor.members() {
                let value = resolve_member(data, member, registry, depth)?;
                fields.insert(member.name().to_string(), value);
            }
        }
        ConstructionMode::Constructor => {
            // positional call: collect the full argument list first, in
            // parameter order, then construct in one step
            let mut args = Vec::with_capacity(descriptor.members().len());
            for member in descriptor.members() {
                args.push(resolve_parameter(data, member, registry, depth)?);
            }
            for (member, value) in descriptor.members().iter().zip(args) {
                fields.insert(member.name().to_string(), value);
            }
        }
    }
    Ok(Instance::new(descriptor.name(), fields))
}

fn resolve_member(
    data: &ValueMap,
    member: &MemberDescriptor,
    registry: &Registry,
    depth: usize,
) -> Result<Value, BindError> {
    resolve_value(data, member, registry, depth)
}

/// Constructor-parameter resolution. Same rule as field resolution; kept as
/// its own entry point because constructor failures surface per-parameter.
pub(crate) fn resolve_parameter(
    data: &ValueMap,
    member: &MemberDescriptor,
    registry: &Registry,
    depth: usize,
) -> Result<Value, BindError> {
    resolve_value(data, member, registry, depth)
}

fn resolve_value(
    data: &ValueMap,
    member: &MemberDescriptor,
    registry: &Registry,
    depth: usize,
) -> Result<Value, BindError> {
    if let Some(value) = data.get(member.name()) {
        return coerce::coerce_at(value, member.ty(), registry, depth);
    }
    if let Some(default) = member.default() {
        return Ok(default.clone());
    }
    if member.nullable() {
        return Ok(Value::Null);
    }
    Err(BindError::MissingRequiredMember(member.name().to_string()))
}
