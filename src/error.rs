//! Typed failure taxonomy. Every hydration/coercion failure is one of these;
//! nothing panics and no partial instance escapes on error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// Input lacks a required, non-nullable, no-default member.
    #[error("missing required member `{0}`")]
    MissingRequiredMember(String),

    /// Null supplied where the declared type does not admit it.
    #[error("null supplied for non-nullable type `{to}`")]
    NonNullableNull { to: String },

    /// No member of a value-backed enum carries the supplied backing value.
    #[error("no member of enum `{enum_name}` is backed by `{value}`")]
    InvalidEnumValue { enum_name: String, value: String },

    /// No member of a plain enum has the supplied name.
    #[error("enum `{enum_name}` has no member named `{name}`")]
    UnknownEnumMember { enum_name: String, name: String },

    /// No coercion path between the value's shape and the declared type.
    #[error("cannot coerce {from} to `{to}`")]
    UnsupportedCoercion { from: String, to: String },

    /// A class-like name with no registry entry.
    #[error("unknown target type `{0}`")]
    UnknownType(String),

    /// Nested hydration ran deeper than the guard allows. Mutually recursive
    /// descriptors fed pathological input fail here instead of overflowing.
    #[error("recursion limit of {limit} exceeded while hydrating nested objects")]
    RecursionLimitExceeded { limit: usize },
}
