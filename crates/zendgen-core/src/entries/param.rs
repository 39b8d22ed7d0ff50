//! Function and method parameters.

use crate::{DefaultValue, Type};

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name, without the `$` sigil.
    pub name: String,
    /// Declared type (`None` = untyped).
    pub ty: Option<Type>,
    /// Passed by reference.
    pub by_ref: bool,
    /// Collects all remaining arguments.
    pub variadic: bool,
    /// Default value, making the parameter optional.
    pub default: Option<DefaultValue>,
}

impl Parameter {
    /// Create an untyped, required parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            by_ref: false,
            variadic: false,
            default: None,
        }
    }

    /// Create a typed, required parameter.
    pub fn typed(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self::new(name).with_type(ty)
    }

    // === Builder Methods ===

    /// Set the declared type.
    pub fn with_type(mut self, ty: impl Into<Type>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark as passed by reference.
    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    /// Mark as variadic.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    // === Query Methods ===

    /// A parameter the caller may omit.
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.variadic
    }
}
