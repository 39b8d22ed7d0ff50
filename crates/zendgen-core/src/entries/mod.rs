//! Declaration entry types.
//!
//! - [`Extension`] - root of one extension's declarations
//! - [`FunctionDecl`] - namespace-level functions
//! - [`ClassDecl`] - classes, with [`MethodDecl`] and [`PropertyDecl`] members
//!
//! Supporting types:
//! - [`Signature`], [`Parameter`] - shared function/method shape
//! - [`ClassFlags`], [`MethodFlags`] - modifiers

mod class;
mod extension;
mod function;
mod method;
mod param;
mod property;

pub use class::{ClassDecl, ClassFlags};
pub use extension::Extension;
pub use function::{FunctionDecl, Signature};
pub use method::{MethodDecl, MethodFlags};
pub use param::Parameter;
pub use property::PropertyDecl;
