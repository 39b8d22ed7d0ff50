//! Symbol table and validation for zendgen.
//!
//! [`ExtensionBuilder`] collects declarations, [`SymbolTable`] indexes them,
//! and [`validate`] checks the whole extension before anything is emitted.

mod class_graph;
mod symbol_table;
mod validation;

pub use class_graph::{ClassEdge, ClassGraph, ClassNode};
pub use symbol_table::{ClassReference, ExtensionBuilder, SymbolTable};
pub use validation::{ValidationMode, ValidationReport, validate};
