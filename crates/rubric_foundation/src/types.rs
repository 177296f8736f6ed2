//! Type descriptors for directive attributes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type descriptor for a directive attribute.
///
/// Used to declare attribute types on directive schemas and to check that
/// explicit values, defaults, and override sources are compatible.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Type {
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Symbolic name (enum constant, group marker, type reference).
    Symbol,
    /// Homogeneous list type.
    List(Box<Type>),
    /// Any type (accepts any value).
    Any,
}

impl Type {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Returns true if this type is `Any`.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns true for the numeric types.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Checks if a value type is accepted by this type.
    ///
    /// - `Any` accepts all types
    /// - `Float` accepts `Int` (numeric promotion)
    /// - Lists check element types recursively; a list whose element type is
    ///   `Any` (e.g. an empty literal) is accepted by every list type
    #[must_use]
    pub fn accepts(&self, value_type: &Type) -> bool {
        if self.is_any() {
            return true;
        }

        match (self, value_type) {
            (Self::Bool, Self::Bool)
            | (Self::Int | Self::Float, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::String, Self::String)
            | (Self::Symbol, Self::Symbol) => true,

            (Self::List(expected), Self::List(actual)) => {
                actual.is_any() || expected.accepts(actual)
            }

            _ => false,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Symbol => write!(f, "symbol"),
            Self::List(t) => write!(f, "list<{t:?}>"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
