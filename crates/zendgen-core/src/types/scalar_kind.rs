//! Scalar type kinds and their engine type codes.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::TypeMask;

/// Built-in (non-class) type kinds a declaration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Bool,
    Array,
    Object,
    Callable,
    Mixed,
    Void,
    Null,
}

impl ScalarKind {
    /// Every kind, in canonical order.
    pub const ALL: [ScalarKind; 10] = [
        ScalarKind::String,
        ScalarKind::Int,
        ScalarKind::Float,
        ScalarKind::Bool,
        ScalarKind::Array,
        ScalarKind::Object,
        ScalarKind::Callable,
        ScalarKind::Mixed,
        ScalarKind::Void,
        ScalarKind::Null,
    ];

    /// Source-level spelling of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::Array => "array",
            ScalarKind::Object => "object",
            ScalarKind::Callable => "callable",
            ScalarKind::Mixed => "mixed",
            ScalarKind::Void => "void",
            ScalarKind::Null => "null",
        }
    }

    /// Parse a source-level spelling (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Engine type code used in single-type argument-info macros.
    pub const fn type_code(self) -> TypeCode {
        match self {
            ScalarKind::String => TypeCode::String,
            ScalarKind::Int => TypeCode::Long,
            ScalarKind::Float => TypeCode::Double,
            ScalarKind::Bool => TypeCode::Bool,
            ScalarKind::Array => TypeCode::Array,
            ScalarKind::Object => TypeCode::Object,
            ScalarKind::Callable => TypeCode::Callable,
            ScalarKind::Mixed => TypeCode::Mixed,
            ScalarKind::Void => TypeCode::Void,
            ScalarKind::Null => TypeCode::Null,
        }
    }

    /// `MAY_BE_*` bits accepted by this kind.
    pub fn mask(self) -> TypeMask {
        match self {
            ScalarKind::Bool => TypeMask::BOOL,
            ScalarKind::Mixed => TypeMask::ANY,
            other => TypeMask::from_code(other.type_code()),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Engine `zval` type codes (`IS_*` constants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum TypeCode {
    Null = 1,
    False = 2,
    True = 3,
    Long = 4,
    Double = 5,
    String = 6,
    Array = 7,
    Object = 8,
    Resource = 9,
    Callable = 12,
    Void = 14,
    Mixed = 16,
    Bool = 18,
}

impl TypeCode {
    /// C macro spelling of this code.
    pub const fn macro_name(self) -> &'static str {
        match self {
            TypeCode::Null => "IS_NULL",
            TypeCode::False => "IS_FALSE",
            TypeCode::True => "IS_TRUE",
            TypeCode::Long => "IS_LONG",
            TypeCode::Double => "IS_DOUBLE",
            TypeCode::String => "IS_STRING",
            TypeCode::Array => "IS_ARRAY",
            TypeCode::Object => "IS_OBJECT",
            TypeCode::Resource => "IS_RESOURCE",
            TypeCode::Callable => "IS_CALLABLE",
            TypeCode::Void => "IS_VOID",
            TypeCode::Mixed => "IS_MIXED",
            TypeCode::Bool => "_IS_BOOL",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.macro_name())
    }
}
