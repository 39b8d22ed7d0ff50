//! Method declarations.

use bitflags::bitflags;

use crate::{QualifiedName, Type, Visibility};

use super::{Parameter, Signature};

bitflags! {
    /// Modifiers on a method besides its visibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodFlags: u8 {
        const STATIC = 1 << 0;
        const FINAL = 1 << 1;
        const ABSTRACT = 1 << 2;
    }
}

/// A method of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name.
    pub name: String,
    /// Owning class, filled in by [`ClassDecl::with_method`](super::ClassDecl::with_method).
    pub class: QualifiedName,
    /// Parameters and return type.
    pub signature: Signature,
    /// Visibility.
    pub visibility: Visibility,
    /// Static/final/abstract modifiers.
    pub flags: MethodFlags,
}

impl MethodDecl {
    /// Create a public method with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: QualifiedName::global(""),
            signature: Signature::default(),
            visibility: Visibility::Public,
            flags: MethodFlags::empty(),
        }
    }

    // === Builder Methods ===

    /// Add a parameter.
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.signature.params.push(param);
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: impl Into<Type>) -> Self {
        self.signature.return_type = Some(ty.into());
        self
    }

    /// Mark as returning by reference.
    pub fn returns_ref(mut self) -> Self {
        self.signature.returns_ref = true;
        self
    }

    /// Set visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static.
    pub fn as_static(mut self) -> Self {
        self.flags |= MethodFlags::STATIC;
        self
    }

    /// Mark as final.
    pub fn as_final(mut self) -> Self {
        self.flags |= MethodFlags::FINAL;
        self
    }

    /// Mark as abstract.
    pub fn as_abstract(mut self) -> Self {
        self.flags |= MethodFlags::ABSTRACT;
        self
    }

    // === Query Methods ===

    /// Parameters in declaration order.
    pub fn params(&self) -> &[Parameter] {
        &self.signature.params
    }

    /// Number of required arguments.
    pub fn required_args(&self) -> usize {
        self.signature.required_args()
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(MethodFlags::FINAL)
    }
}
