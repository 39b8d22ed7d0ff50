//! Core types for zendgen.
//!
//! This crate holds everything the later stages share:
//!
//! - [`types`]: the type model ([`Type`], [`UnionType`], [`ScalarKind`],
//!   [`TypeMask`], [`DefaultValue`], [`Visibility`])
//! - [`entries`]: declarations ([`Extension`], [`FunctionDecl`], [`ClassDecl`],
//!   [`MethodDecl`], [`PropertyDecl`], [`Parameter`])
//! - [`mangle`]: flat C identifiers for namespaced symbols
//! - [`intern`]: the build-scoped intern table
//! - [`signature_hash`]: deterministic keys for sharing argument-info blocks
//! - [`error`]: spec and internal errors

pub mod entries;
pub mod error;
pub mod intern;
pub mod mangle;
mod qualified_name;
pub mod signature_hash;
pub mod types;

pub use entries::{
    ClassDecl, ClassFlags, Extension, FunctionDecl, MethodDecl, MethodFlags, Parameter,
    PropertyDecl, Signature,
};
pub use error::{InternalError, Location, SpecError, SpecErrorKind, SpecErrors};
pub use intern::{InternTable, Symbol};
pub use mangle::Identifier;
pub use qualified_name::{NAMESPACE_SEPARATOR, QualifiedName};
pub use signature_hash::SignatureHash;
pub use types::{DefaultValue, ScalarKind, Type, TypeCode, TypeMask, UnionType, Visibility};
