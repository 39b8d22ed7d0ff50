//! Property declarations.

use crate::{DefaultValue, Type, Visibility};

/// A declared class property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Property name, without the `$` sigil.
    pub name: String,
    /// Declared type (`None` = untyped).
    pub ty: Option<Type>,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Property visibility.
    pub visibility: Visibility,
    /// Static property.
    pub is_static: bool,
}

impl PropertyDecl {
    /// Create a public, untyped, instance property with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
            visibility: Visibility::Public,
            is_static: false,
        }
    }

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

    /// Set visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}
