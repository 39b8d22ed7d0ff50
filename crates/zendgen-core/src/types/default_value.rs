//! Default values for parameters and properties.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::QualifiedName;

use super::ScalarKind;

/// A compile-time default value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
    /// `[]`
    ArrayEmpty,
    /// `Foo::BAR`, resolved by the runtime.
    ClassConstant {
        class: QualifiedName,
        constant: String,
    },
}

impl DefaultValue {
    /// Shorthand for a float default.
    pub fn float(value: f64) -> Self {
        DefaultValue::Float(OrderedFloat(value))
    }

    /// Shorthand for a string default.
    pub fn string(value: impl Into<String>) -> Self {
        DefaultValue::String(value.into())
    }

    /// Shorthand for a class-constant default.
    pub fn class_constant(class: impl Into<QualifiedName>, constant: impl Into<String>) -> Self {
        DefaultValue::ClassConstant {
            class: class.into(),
            constant: constant.into(),
        }
    }

    /// Runtime kind of the value, or `None` when only the runtime knows it.
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            DefaultValue::Null => Some(ScalarKind::Null),
            DefaultValue::Bool(_) => Some(ScalarKind::Bool),
            DefaultValue::Int(_) => Some(ScalarKind::Int),
            DefaultValue::Float(_) => Some(ScalarKind::Float),
            DefaultValue::String(_) => Some(ScalarKind::String),
            DefaultValue::ArrayEmpty => Some(ScalarKind::Array),
            DefaultValue::ClassConstant { .. } => None,
        }
    }

    /// Class referenced by a class-constant default.
    pub fn class_ref(&self) -> Option<&QualifiedName> {
        match self {
            DefaultValue::ClassConstant { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Source-level literal, as the runtime evaluates it for argument defaults.
    pub fn php_literal(&self) -> String {
        match self {
            DefaultValue::Null => "null".to_string(),
            DefaultValue::Bool(value) => value.to_string(),
            DefaultValue::Int(value) => value.to_string(),
            DefaultValue::Float(value) => format_float(value.0),
            DefaultValue::String(value) => {
                let escaped = value
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace('$', "\\$")
                    .replace('\n', "\\n");
                format!("\"{escaped}\"")
            }
            DefaultValue::ArrayEmpty => "[]".to_string(),
            DefaultValue::ClassConstant { class, constant } => format!("{class}::{constant}"),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.php_literal())
    }
}

/// Format a float so it always reads back as a float: `1.0` and `1e20`,
/// never `1` or `100000000000000000000`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NAN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        // Debug output always carries a `.` or an exponent.
        format!("{value:?}")
    }
}
