//! The root declaration of one extension.

use super::{ClassDecl, FunctionDecl};

/// Everything one extension declares.
///
/// Read-only once the symbol table is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extension {
    /// The extension's own namespace (empty = global).
    pub namespace: Vec<String>,
    /// Functions in declaration order.
    pub functions: Vec<FunctionDecl>,
    /// Classes in declaration order.
    pub classes: Vec<ClassDecl>,
}

impl Extension {
    /// Create an empty extension in `namespace`.
    pub fn new(namespace: Vec<String>) -> Self {
        Self {
            namespace,
            functions: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// The namespace as a joined string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join("\\")
    }
}
