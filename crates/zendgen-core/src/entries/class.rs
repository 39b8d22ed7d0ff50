//! Class declarations.

use bitflags::bitflags;

use crate::QualifiedName;

use super::{MethodDecl, PropertyDecl};

bitflags! {
    /// Class-level flags applied after registration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassFlags: u8 {
        const FINAL = 1 << 0;
        const ABSTRACT = 1 << 1;
        const NO_DYNAMIC_PROPERTIES = 1 << 2;
    }
}

/// A declared class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Fully qualified name.
    pub name: QualifiedName,

    // === Inheritance ===
    /// Parent class (single inheritance).
    pub parent: Option<QualifiedName>,
    /// Implemented interfaces, in declaration order.
    pub interfaces: Vec<QualifiedName>,

    // === Members ===
    /// Methods in declaration order.
    pub methods: Vec<MethodDecl>,
    /// Properties in declaration order.
    pub properties: Vec<PropertyDecl>,

    // === Modifiers ===
    pub flags: ClassFlags,
}

impl ClassDecl {
    /// Create an empty class.
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            flags: ClassFlags::empty(),
        }
    }

    // === Builder Methods ===

    /// Set the parent class.
    pub fn extends(mut self, parent: impl Into<QualifiedName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add an implemented interface.
    pub fn implements(mut self, interface: impl Into<QualifiedName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a method, recording this class as its owner.
    pub fn with_method(mut self, mut method: MethodDecl) -> Self {
        method.class = self.name.clone();
        self.methods.push(method);
        self
    }

    /// Add a property.
    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    /// Add class flags.
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Parent and interfaces, in that order.
    pub fn supertypes(&self) -> impl Iterator<Item = &QualifiedName> {
        self.parent.iter().chain(self.interfaces.iter())
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }
}
