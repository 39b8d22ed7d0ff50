//! SymbolTable - the immutable view of one extension's declarations.
//!
//! [`ExtensionBuilder`] collects functions and classes in declaration order and
//! [`ExtensionBuilder::build`] freezes them into a [`SymbolTable`]. Building never
//! fails: structural problems (duplicates, bad parameter order, ...) are left
//! in place for the validator, which reports all of them at once.
//!
//! # Storage Model
//!
//! - **Declarations**: the [`Extension`] value, untouched after build.
//! - **Class index**: case-folded qualified name -> position in `classes`.
//!   The first declaration of a name wins; later duplicates stay reachable
//!   through [`SymbolTable::classes`] only.
//! - **Function namespaces**: every namespace that declares a function, in
//!   first-appearance order. One function-entry table is emitted per entry.
//! - **References**: every class name used by a type, default value or
//!   inheritance clause, in declaration order, with where it was used.
//! - **Intern table**: every class name and namespace string, interned once for
//!   this build.
//!
//! # Example
//!
//! ```
//! use zendgen_core::{ClassDecl, FunctionDecl, Parameter, ScalarKind};
//! use zendgen_registry::ExtensionBuilder;
//!
//! let table = ExtensionBuilder::new("Complex")
//!     .function(
//!         FunctionDecl::new("Complex\\say_hello")
//!             .with_param(Parameter::typed("name", ScalarKind::String))
//!             .returns(ScalarKind::String),
//!     )
//!     .class(ClassDecl::new("Complex\\Foo"))
//!     .build();
//!
//! assert_eq!(table.functions().len(), 1);
//! assert!(table.find_class(&"complex\\foo".into()).is_some());
//! ```

use rustc_hash::FxHashMap;

use zendgen_core::{
    ClassDecl, Extension, FunctionDecl, InternTable, Location, QualifiedName, Signature, Symbol,
    Type,
};

use crate::class_graph::ClassGraph;

/// A use of a class name somewhere in the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReference {
    /// The referenced class.
    pub name: QualifiedName,
    /// Interned handle of the referenced name.
    pub symbol: Symbol,
    /// The declaration containing the reference.
    pub location: Location,
}

/// Collects declarations for one extension.
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    extension: Extension,
}

impl ExtensionBuilder {
    /// Start an extension in `namespace` (`""` for global, `A\B` for nested).
    pub fn new(namespace: &str) -> Self {
        let namespace = namespace
            .split(zendgen_core::NAMESPACE_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            extension: Extension::new(namespace),
        }
    }

    /// Qualify a simple name with the extension's namespace.
    pub fn qualify(&self, name: &str) -> QualifiedName {
        QualifiedName::in_namespace(&self.extension.namespace, name)
    }

    /// Add a function.
    pub fn function(mut self, function: FunctionDecl) -> Self {
        self.add_function(function);
        self
    }

    /// Add a class.
    pub fn class(mut self, class: ClassDecl) -> Self {
        self.add_class(class);
        self
    }

    /// Add a function in place.
    pub fn add_function(&mut self, function: FunctionDecl) {
        self.extension.functions.push(function);
    }

    /// Add a class in place.
    pub fn add_class(&mut self, class: ClassDecl) {
        self.extension.classes.push(class);
    }

    /// Freeze the declarations into a symbol table.
    pub fn build(self) -> SymbolTable {
        SymbolTable::from_extension(self.extension)
    }
}

/// Immutable collection of an extension's functions and classes.
#[derive(Debug)]
pub struct SymbolTable {
    extension: Extension,
    interner: InternTable,
    classes_by_name: FxHashMap<String, usize>,
    function_namespaces: Vec<Vec<String>>,
    references: Vec<ClassReference>,
    graph: ClassGraph,
}

impl SymbolTable {
    /// Build the indexes for an extension.
    pub fn from_extension(extension: Extension) -> Self {
        let mut interner = InternTable::new();
        let mut classes_by_name = FxHashMap::default();
        let mut function_namespaces: Vec<Vec<String>> = Vec::new();

        interner.intern(&extension.namespace_string());

        for (index, class) in extension.classes.iter().enumerate() {
            interner.intern(&class.name.to_string());
            classes_by_name.entry(class.name.folded()).or_insert(index);
        }

        for function in &extension.functions {
            if !function_namespaces.contains(&function.name.namespace) {
                interner.intern(&function.name.namespace_string());
                function_namespaces.push(function.name.namespace.clone());
            }
        }

        let references = collect_references(&extension, &mut interner);
        let graph = ClassGraph::from_classes(&extension.classes);

        Self {
            extension,
            interner,
            classes_by_name,
            function_namespaces,
            references,
            graph,
        }
    }

    // ==========================================================================
    // Declarations
    // ==========================================================================

    /// The underlying declarations.
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    /// The extension's own namespace.
    pub fn namespace(&self) -> &[String] {
        &self.extension.namespace
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> &[FunctionDecl] {
        &self.extension.functions
    }

    /// Classes in declaration order.
    pub fn classes(&self) -> &[ClassDecl] {
        &self.extension.classes
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Find a class by name, ignoring case.
    pub fn find_class(&self, name: &QualifiedName) -> Option<&ClassDecl> {
        self.classes_by_name
            .get(&name.folded())
            .map(|&index| &self.extension.classes[index])
    }

    /// Check whether a class is declared by this extension.
    pub fn is_declared_class(&self, name: &QualifiedName) -> bool {
        self.classes_by_name.contains_key(&name.folded())
    }

    /// Namespaces that declare functions, in first-appearance order.
    pub fn function_namespaces(&self) -> &[Vec<String>] {
        &self.function_namespaces
    }

    /// Functions declared in `namespace`, in declaration order.
    pub fn functions_in<'a>(
        &'a self,
        namespace: &'a [String],
    ) -> impl Iterator<Item = &'a FunctionDecl> + 'a {
        self.extension
            .functions
            .iter()
            .filter(move |f| f.name.namespace == namespace)
    }

    /// Every class reference, in declaration order.
    pub fn references(&self) -> &[ClassReference] {
        &self.references
    }

    /// References to classes this extension does not declare.
    pub fn unresolved_references(&self) -> impl Iterator<Item = &ClassReference> {
        self.references
            .iter()
            .filter(|r| !self.is_declared_class(&r.name))
    }

    /// The intern table for this build.
    pub fn interner(&self) -> &InternTable {
        &self.interner
    }

    /// Inheritance graph over declared classes.
    pub fn class_graph(&self) -> &ClassGraph {
        &self.graph
    }
}

fn collect_references(extension: &Extension, interner: &mut InternTable) -> Vec<ClassReference> {
    let mut refs = Vec::new();
    let mut push = |name: &QualifiedName, location: &Location| {
        let symbol = interner.intern(&name.to_string());
        refs.push(ClassReference {
            name: name.clone(),
            symbol,
            location: location.clone(),
        });
    };

    for function in &extension.functions {
        let location = Location::Function(function.name.clone());
        signature_refs(&function.signature, &location, &mut push);
    }

    for class in &extension.classes {
        let location = Location::Class(class.name.clone());
        for supertype in class.supertypes() {
            push(supertype, &location);
        }
        for method in &class.methods {
            let location = Location::method(&class.name, &method.name);
            signature_refs(&method.signature, &location, &mut push);
        }
        for property in &class.properties {
            let location = Location::property(&class.name, &property.name);
            type_refs(property.ty.as_ref(), &location, &mut push);
            if let Some(class_ref) = property.default.as_ref().and_then(|d| d.class_ref()) {
                push(class_ref, &location);
            }
        }
    }

    refs
}

fn signature_refs(
    signature: &Signature,
    location: &Location,
    push: &mut impl FnMut(&QualifiedName, &Location),
) {
    for param in &signature.params {
        let param_location = location.param(&param.name);
        type_refs(param.ty.as_ref(), &param_location, push);
        if let Some(class_ref) = param.default.as_ref().and_then(|d| d.class_ref()) {
            push(class_ref, &param_location);
        }
    }
    type_refs(signature.return_type.as_ref(), location, push);
}

fn type_refs(
    ty: Option<&Type>,
    location: &Location,
    push: &mut impl FnMut(&QualifiedName, &Location),
) {
    if let Some(ty) = ty {
        for class in ty.class_refs() {
            push(class, location);
        }
    }
}
