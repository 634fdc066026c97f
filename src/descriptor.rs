//! Static type descriptors: the constructible shape of a target type.
//!
//! There is no runtime reflection here: everything is explicit data built
//! once (by hand or by codegen) and looked up through the
//! [`crate::registry`]. The engine only ever reads these.

use crate::value::{Backing, EnumValue, Value};

/// A declared type, as written on a member. `Named` covers both builtins
/// (`int`, `float`, `string`, `bool`, `array`, `mixed`, `object`, `null`)
/// and class-like names resolved through the registry.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    /// A builtin primitive or a class-like name.
    Named(String),
    /// Ordered alternatives (`A|B|C`); resolution order is declaration order.
    Union(Vec<TypeExpr>),
    /// No declared type at all.
    Unknown,
    /// A shape the engine cannot model (e.g. intersections). Pass-through.
    Other,
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn union(alternatives: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Union(alternatives.into_iter().collect())
    }

    /// The `null` type, usable as a union alternative.
    pub fn null() -> Self {
        TypeExpr::Named("null".to_string())
    }

    /// `?T` sugar: `T|null`.
    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Union(vec![inner, TypeExpr::null()])
    }

    /// Whether this expression admits null. `Unknown`/`Other` are permissive
    /// and admit anything; a union admits null if any alternative does.
    pub fn nullable(&self) -> bool {
        match self {
            TypeExpr::Named(name) => name == "null" || name == "mixed",
            TypeExpr::Union(alts) => alts.iter().any(TypeExpr::nullable),
            TypeExpr::Unknown | TypeExpr::Other => true,
        }
    }
}

/// How instances of a type are assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructionMode {
    /// Positional: members are constructor parameters, in parameter order.
    Constructor,
    /// Nominal: no (or zero-parameter) constructor; members set by name.
    FieldSet,
}

/// One named, typed slot within a type: a constructor parameter or a field.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDescriptor {
    name: String,
    ty: TypeExpr,
    default: Option<Value>,
}

impl MemberDescriptor {
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self { name: name.into(), ty, default: None }
    }

    pub fn with_default(name: impl Into<String>, ty: TypeExpr, default: Value) -> Self {
        Self { name: name.into(), ty, default: Some(default) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Derived from the declared type; a member with a `?T`/`mixed`/untyped
    /// declaration may be absent from the input without failing hydration.
    pub fn nullable(&self) -> bool {
        self.ty.nullable()
    }
}

/// The constructible shape of one target type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    mode: ConstructionMode,
    members: Vec<MemberDescriptor>,
    normalize_keys: bool,
}

impl TypeDescriptor {
    pub fn constructor(name: impl Into<String>, members: Vec<MemberDescriptor>) -> Self {
        Self { name: name.into(), mode: ConstructionMode::Constructor, members, normalize_keys: false }
    }

    pub fn field_set(name: impl Into<String>, members: Vec<MemberDescriptor>) -> Self {
        Self { name: name.into(), mode: ConstructionMode::FieldSet, members, normalize_keys: false }
    }

    /// Opt-in marker: rewrite snake_case input keys to camelCase before
    /// member resolution. Checked once per hydration call.
    pub fn with_key_normalization(mut self) -> Self {
        self.normalize_keys = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ConstructionMode {
        self.mode
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    pub fn normalize_keys(&self) -> bool {
        self.normalize_keys
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENUM DESCRIPTORS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    name: String,
    backing: Option<Backing>,
}

/// The member table of an enumeration type. Either every member carries a
/// backing value (value-backed) or none does (plain).
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDescriptor {
    name: String,
    backed: bool,
    members: Vec<EnumMember>,
}

impl EnumDescriptor {
    pub fn backed(name: impl Into<String>, members: Vec<(&str, Backing)>) -> Self {
        Self {
            name: name.into(),
            backed: true,
            members: members
                .into_iter()
                .map(|(n, b)| EnumMember { name: n.to_string(), backing: Some(b) })
                .collect(),
        }
    }

    pub fn plain(name: impl Into<String>, members: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            backed: false,
            members: members
                .into_iter()
                .map(|n| EnumMember { name: n.to_string(), backing: None })
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_backed(&self) -> bool {
        self.backed
    }

    /// `from(backingValue)`: resolve a member by its backing primitive.
    pub fn from_backing(&self, value: &Value) -> Option<EnumValue> {
        let wanted = match value {
            Value::Int(i) => Backing::Int(*i),
            Value::Str(s) => Backing::Str(s.clone()),
            _ => return None,
        };
        self.members
            .iter()
            .find(|m| m.backing.as_ref() == Some(&wanted))
            .map(|m| EnumValue::new(&self.name, &m.name, m.backing.clone()))
    }

    /// Resolve a member by its exact name (plain-enum lookup).
    pub fn member_named(&self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| EnumValue::new(&self.name, &m.name, m.backing.clone()))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DATE/TIME KINDS
// ————————————————————————————————————————————————————————————————————————————

/// How a registered date/time type parses strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateTimeKind {
    /// Rich type: general-purpose parser with format auto-detection.
    Rich,
    /// Plain type: the target's own constructor-from-string (strict forms).
    Plain,
}
