//! Error types for building, validating and emitting an extension.
//!
//! ## Error Hierarchy
//!
//! ```text
//! SpecErrors     - every SpecError found by the validator, reported together
//! └── SpecError  - one violation (SpecErrorKind + Location + message)
//! InternalError  - an invariant broken inside the generator itself
//! ```
//!
//! A [`SpecError`] is fixable by changing the input declarations. An
//! [`InternalError`] is a generator bug and is never attributed to the input.

use std::fmt;

use thiserror::Error;

use crate::QualifiedName;

// ============================================================================
// Spec Errors
// ============================================================================

/// Categories of specification errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecErrorKind {
    // Duplicates
    /// Two functions share a (case-insensitive) name in one namespace.
    DuplicateFunction,
    /// Two methods share a (case-insensitive) name in one class.
    DuplicateMethod,
    /// Two classes share a (case-insensitive) name.
    DuplicateClass,
    /// Two properties share a name in one class.
    DuplicateProperty,
    /// Two parameters share a name in one signature.
    DuplicateParameter,

    // Parameters
    /// A required parameter follows an optional one.
    ParameterOrder,
    /// A variadic parameter is not the last one.
    VariadicNotLast,
    /// A variadic parameter has a default value.
    VariadicDefault,

    // Defaults
    /// A default value is not a permitted member of the declared type.
    DefaultTypeMismatch,
    /// A default value cannot be emitted in this position.
    UnsupportedDefault,

    // Types
    /// A union with no members.
    EmptyUnion,
    /// A class listed twice in one union.
    DuplicateUnionMember,
    /// A member that cannot appear in a union (`void`, `mixed`).
    InvalidUnionMember,
    /// A type used where it is not allowed (`void` outside a return).
    InvalidTypePosition,
    /// A class reference with no local declaration.
    UnresolvedReference,

    // Names and structure
    /// A name that is not a valid C identifier fragment.
    InvalidName,
    /// Two distinct symbols mangle to the same identifier.
    ManglingCollision,
    /// A class inherits from itself, directly or indirectly.
    InheritanceCycle,
    /// Contradictory or misplaced modifiers.
    InvalidFlags,
}

impl SpecErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecErrorKind::DuplicateFunction => "duplicate function",
            SpecErrorKind::DuplicateMethod => "duplicate method",
            SpecErrorKind::DuplicateClass => "duplicate class",
            SpecErrorKind::DuplicateProperty => "duplicate property",
            SpecErrorKind::DuplicateParameter => "duplicate parameter",
            SpecErrorKind::ParameterOrder => "parameter order",
            SpecErrorKind::VariadicNotLast => "variadic not last",
            SpecErrorKind::VariadicDefault => "variadic default",
            SpecErrorKind::DefaultTypeMismatch => "default/type mismatch",
            SpecErrorKind::UnsupportedDefault => "unsupported default",
            SpecErrorKind::EmptyUnion => "empty union",
            SpecErrorKind::DuplicateUnionMember => "duplicate union member",
            SpecErrorKind::InvalidUnionMember => "invalid union member",
            SpecErrorKind::InvalidTypePosition => "invalid type position",
            SpecErrorKind::UnresolvedReference => "unresolved reference",
            SpecErrorKind::InvalidName => "invalid name",
            SpecErrorKind::ManglingCollision => "mangling collision",
            SpecErrorKind::InheritanceCycle => "inheritance cycle",
            SpecErrorKind::InvalidFlags => "invalid flags",
        }
    }
}

impl fmt::Display for SpecErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where in the extension a declaration lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// The extension as a whole.
    Extension,
    Function(QualifiedName),
    Class(QualifiedName),
    Method {
        class: QualifiedName,
        method: String,
    },
    Property {
        class: QualifiedName,
        property: String,
    },
    /// A parameter of a function or method.
    Parameter {
        owner: Box<Location>,
        param: String,
    },
}

impl Location {
    pub fn method(class: &QualifiedName, method: &str) -> Self {
        Location::Method {
            class: class.clone(),
            method: method.to_string(),
        }
    }

    pub fn property(class: &QualifiedName, property: &str) -> Self {
        Location::Property {
            class: class.clone(),
            property: property.to_string(),
        }
    }

    /// A parameter of the function or method at `self`.
    pub fn param(&self, param: &str) -> Self {
        Location::Parameter {
            owner: Box::new(self.clone()),
            param: param.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Extension => write!(f, "extension"),
            Location::Function(name) => write!(f, "function {name}"),
            Location::Class(name) => write!(f, "class {name}"),
            Location::Method { class, method } => write!(f, "method {class}::{method}"),
            Location::Property { class, property } => write!(f, "property {class}::${property}"),
            Location::Parameter { owner, param } => write!(f, "parameter ${param} of {owner}"),
        }
    }
}

/// A specification error with location and context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} in {location}: {message}")]
pub struct SpecError {
    /// The category of this error.
    pub kind: SpecErrorKind,
    /// The declaration the error belongs to.
    pub location: Location,
    /// A detailed error message.
    pub message: String,
}

impl SpecError {
    /// Create a new spec error.
    pub fn new(kind: SpecErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }
}

/// A collection of spec errors.
///
/// Validation runs to completion and every violation ends up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecErrors {
    errors: Vec<SpecError>,
}

impl SpecErrors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: SpecError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &SpecError> {
        self.errors.iter()
    }

    /// Check whether any error has the given kind.
    pub fn contains_kind(&self, kind: SpecErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// `Ok(())` if empty, otherwise `Err(self)` carrying every error.
    pub fn into_result(self) -> Result<(), SpecErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for SpecErrors {
    type Item = SpecError;
    type IntoIter = std::vec::IntoIter<SpecError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpecErrors {
    type Item = &'a SpecError;
    type IntoIter = std::slice::Iter<'a, SpecError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl Extend<SpecError> for SpecErrors {
    fn extend<T: IntoIterator<Item = SpecError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl From<SpecError> for SpecErrors {
    fn from(error: SpecError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for SpecErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SpecErrors {}

// ============================================================================
// Internal Errors
// ============================================================================

/// An invariant violated inside the generator. Always fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternalError {
    /// A class-registration routine acquired and released handles unevenly.
    #[error("unbalanced ownership in {routine}: {detail}")]
    UnbalancedOwnership { routine: String, detail: String },

    /// Two emissions of the same input differed.
    #[error("non-deterministic output: {0}")]
    NonDeterministic(String),

    /// Emission met a declaration the validator should have rejected.
    #[error("unvalidated input reached the emitter: {0}")]
    Unvalidated(String),
}
