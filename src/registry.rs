//! Name → shape lookup. The registry is the engine's stand-in for runtime
//! reflection: every class-like name the coercer can target is registered
//! here ahead of time, and hydration only ever reads it.

use indexmap::IndexMap;

use crate::descriptor::{DateTimeKind, EnumDescriptor, TypeDescriptor};
use crate::error::BindError;

/// What a class-like name resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeEntry {
    Object(TypeDescriptor),
    Enum(EnumDescriptor),
    DateTime(DateTimeKind),
}

/// Immutable-after-build table of target types. Build it once, share it
/// read-only across hydration calls (it is `Sync` as long as nothing writes).
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, TypeEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, descriptor: TypeDescriptor) -> Self {
        self.entries.insert(descriptor.name().to_string(), TypeEntry::Object(descriptor));
        self
    }

    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.entries.insert(descriptor.name().to_string(), TypeEntry::Enum(descriptor));
        self
    }

    pub fn with_datetime(mut self, name: impl Into<String>, kind: DateTimeKind) -> Self {
        self.entries.insert(name.into(), TypeEntry::DateTime(kind));
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.entries.get(name)
    }

    /// Object descriptor lookup for hydration entry points.
    pub fn descriptor(&self, name: &str) -> Result<&TypeDescriptor, BindError> {
        match self.entries.get(name) {
            Some(TypeEntry::Object(d)) => Ok(d),
            _ => Err(BindError::UnknownType(name.to_string())),
        }
    }
}
