//! zendgen - Zend engine declaration generator.
//!
//! Describe an extension's functions and classes with the builder API and
//! generate the argument-info blocks, function-entry tables, method tables and
//! class-registration routines the engine expects.
//!
//! # Example
//!
//! ```
//! use zendgen::prelude::*;
//!
//! let builder = ExtensionBuilder::new("Complex").function(
//!     FunctionDecl::new("Complex\\say_hello")
//!         .with_param(Parameter::typed("name", ScalarKind::String))
//!         .returns(ScalarKind::String),
//! );
//!
//! let header = zendgen::generate(builder, GeneratorConfig::default()).unwrap();
//! assert!(header.text.contains("ZEND_ARG_TYPE_INFO(0, name, IS_STRING, 0)"));
//! ```
//!
//! # Pipeline
//!
//! 1. [`ExtensionBuilder::build`] freezes declarations into a symbol table.
//! 2. Validation collects every problem into [`SpecErrors`]. Unresolved class
//!    references are warnings unless [`ValidationMode::ClosedWorld`] is set.
//! 3. The emitter writes the text; each class-registration routine checks its
//!    ownership ledger before its text is accepted.
//!
//! Nothing is written to disk unless all three steps succeed.

mod config;
mod error;
mod generator;
mod output;

pub use config::{GeneratorConfig, ValidationMode};
pub use error::{GenerateError, GenerateResult};
pub use generator::{GeneratedHeader, Generator, generate};
pub use output::{generate_to_file, write_header};

pub use zendgen_core::{InternalError, SpecError, SpecErrorKind, SpecErrors};
pub use zendgen_registry::ExtensionBuilder;

/// Everything needed to describe an extension and generate its header.
pub mod prelude {
    pub use crate::{ExtensionBuilder, GeneratedHeader, GeneratorConfig, ValidationMode};
    pub use zendgen_core::{
        ClassDecl, ClassFlags, DefaultValue, FunctionDecl, MethodDecl, Parameter, PropertyDecl,
        QualifiedName, ScalarKind, Type, UnionType, Visibility,
    };
}
