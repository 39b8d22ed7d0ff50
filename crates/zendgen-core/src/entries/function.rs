//! Function declarations and the signature shape shared with methods.

use crate::{QualifiedName, Type};

use super::Parameter;

/// Parameters and return type of a function or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    /// Parameters in declaration order.
    pub params: Vec<Parameter>,
    /// Declared return type (`None` = untyped).
    pub return_type: Option<Type>,
    /// Returns by reference.
    pub returns_ref: bool,
}

impl Signature {
    /// Number of parameters before the first optional one.
    pub fn required_args(&self) -> usize {
        self.params
            .iter()
            .position(Parameter::is_optional)
            .unwrap_or(self.params.len())
    }
}

/// A namespace-level function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Fully qualified name.
    pub name: QualifiedName,
    /// Parameters and return type.
    pub signature: Signature,
}

impl FunctionDecl {
    /// Create a function with no parameters and no declared return type.
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            signature: Signature::default(),
        }
    }

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

    /// Parameters in declaration order.
    pub fn params(&self) -> &[Parameter] {
        &self.signature.params
    }

    /// Number of required arguments.
    pub fn required_args(&self) -> usize {
        self.signature.required_args()
    }
}
