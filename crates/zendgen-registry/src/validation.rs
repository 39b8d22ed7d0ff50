//! Validation of a built [`SymbolTable`].
//!
//! Every check runs to completion and every violation is collected, so one run
//! reports all problems in the input. Errors come out in declaration order:
//! extension-wide checks last.
//!
//! # Checks
//!
//! | Area       | Errors |
//! |------------|--------|
//! | Names      | `InvalidName`, `Duplicate*`, `ManglingCollision` |
//! | Parameters | `ParameterOrder`, `VariadicNotLast`, `VariadicDefault` |
//! | Types      | `EmptyUnion`, `DuplicateUnionMember`, `InvalidUnionMember`, `InvalidTypePosition` |
//! | Defaults   | `DefaultTypeMismatch`, `UnsupportedDefault` |
//! | Classes    | `InheritanceCycle`, `InvalidFlags`, `UnresolvedReference` |

use rustc_hash::{FxHashMap, FxHashSet};

use zendgen_core::mangle::{self, Identifier};
use zendgen_core::{
    ClassDecl, Location, QualifiedName, ScalarKind, Signature, SpecError, SpecErrorKind,
    SpecErrors, Type, TypeMask,
};

use crate::SymbolTable;

/// How references to undeclared classes are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Undeclared classes are assumed to exist in the engine or another
    /// extension. Each one is reported as a warning.
    #[default]
    Lenient,
    /// Every referenced class must be declared by this extension.
    ClosedWorld,
}

/// Result of validating one extension.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Violations that block generation.
    pub errors: SpecErrors,
    /// Findings that do not block generation.
    pub warnings: Vec<SpecError>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The warnings if there were no errors, otherwise every error.
    pub fn into_result(self) -> Result<Vec<SpecError>, SpecErrors> {
        self.errors.into_result()?;
        Ok(self.warnings)
    }
}

/// Validate a symbol table.
pub fn validate(table: &SymbolTable, mode: ValidationMode) -> ValidationReport {
    let mut validator = Validator::new(table, mode);
    validator.run();
    validator.finish()
}

/// Where a type appears; decides which members are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypePosition {
    Return,
    Parameter,
    Property,
}

/// Owner key for mangling checks. Two entries with the same key are the same
/// symbol (and already reported as a duplicate), not a collision.
type Owner = (String, Location);

struct Validator<'a> {
    table: &'a SymbolTable,
    mode: ValidationMode,
    report: ValidationReport,
}

impl<'a> Validator<'a> {
    fn new(table: &'a SymbolTable, mode: ValidationMode) -> Self {
        Self {
            table,
            mode,
            report: ValidationReport::default(),
        }
    }

    fn finish(self) -> ValidationReport {
        tracing::debug!(
            errors = self.report.errors.len(),
            warnings = self.report.warnings.len(),
            "validation finished"
        );
        self.report
    }

    fn error(&mut self, kind: SpecErrorKind, location: Location, message: impl Into<String>) {
        let error = SpecError::new(kind, location, message);
        tracing::trace!(%error, "spec error");
        self.report.errors.push(error);
    }

    fn run(&mut self) {
        self.check_namespace();
        self.check_functions();
        self.check_classes();
        self.check_inheritance();
        self.check_references();
        self.check_mangling();
    }

    // ==========================================================================
    // Names
    // ==========================================================================

    fn check_namespace(&mut self) {
        for segment in self.table.namespace() {
            if !mangle::is_valid_identifier(segment) {
                self.error(
                    SpecErrorKind::InvalidName,
                    Location::Extension,
                    format!("namespace segment '{segment}' is not a valid identifier"),
                );
            }
        }
    }

    fn check_qualified_name(&mut self, name: &QualifiedName, location: &Location) {
        for segment in name.namespace_path() {
            if !mangle::is_valid_identifier(segment) {
                self.error(
                    SpecErrorKind::InvalidName,
                    location.clone(),
                    format!("namespace segment '{segment}' is not a valid identifier"),
                );
            }
        }
        self.check_name(name.simple_name(), location);
    }

    fn check_name(&mut self, name: &str, location: &Location) {
        if !mangle::is_valid_identifier(name) {
            self.error(
                SpecErrorKind::InvalidName,
                location.clone(),
                format!("'{name}' is not a valid identifier"),
            );
        }
    }

    // ==========================================================================
    // Functions
    // ==========================================================================

    fn check_functions(&mut self) {
        let table = self.table;
        let mut seen = FxHashSet::default();

        for function in table.functions() {
            let location = Location::Function(function.name.clone());
            self.check_qualified_name(&function.name, &location);

            if !seen.insert(function.name.folded()) {
                self.error(
                    SpecErrorKind::DuplicateFunction,
                    location.clone(),
                    format!("function '{}' is declared more than once", function.name),
                );
            }

            self.check_signature(&function.signature, &location);
        }
    }

    fn check_signature(&mut self, signature: &Signature, location: &Location) {
        let mut names = FxHashSet::default();
        let mut seen_optional = false;
        let last = signature.params.len().saturating_sub(1);

        for (i, param) in signature.params.iter().enumerate() {
            let param_location = location.param(&param.name);
            self.check_name(&param.name, &param_location);

            if !names.insert(param.name.as_str()) {
                self.error(
                    SpecErrorKind::DuplicateParameter,
                    param_location.clone(),
                    format!("parameter ${} is declared more than once", param.name),
                );
            }

            if param.variadic {
                if i != last {
                    self.error(
                        SpecErrorKind::VariadicNotLast,
                        param_location.clone(),
                        "a variadic parameter must be the last parameter",
                    );
                }
                if param.default.is_some() {
                    self.error(
                        SpecErrorKind::VariadicDefault,
                        param_location.clone(),
                        "a variadic parameter cannot have a default value",
                    );
                }
            } else if param.default.is_some() {
                seen_optional = true;
            } else if seen_optional {
                self.error(
                    SpecErrorKind::ParameterOrder,
                    param_location.clone(),
                    "required parameter follows an optional parameter",
                );
            }

            if let Some(ty) = &param.ty {
                self.check_type(ty, TypePosition::Parameter, &param_location);
            }

            if let (Some(ty), Some(default)) = (&param.ty, &param.default) {
                if !ty.permits_default(default) {
                    self.error(
                        SpecErrorKind::DefaultTypeMismatch,
                        param_location.clone(),
                        format!("default {} is not a value of type {ty}", default.php_literal()),
                    );
                }
            }
        }

        if let Some(ty) = &signature.return_type {
            self.check_type(ty, TypePosition::Return, location);
        }
    }

    // ==========================================================================
    // Types
    // ==========================================================================

    fn check_type(&mut self, ty: &Type, position: TypePosition, location: &Location) {
        match ty {
            Type::Scalar(ScalarKind::Void) if position != TypePosition::Return => {
                self.error(
                    SpecErrorKind::InvalidTypePosition,
                    location.clone(),
                    "void is only allowed as a return type",
                );
            }
            Type::Scalar(ScalarKind::Callable) if position == TypePosition::Property => {
                self.error(
                    SpecErrorKind::InvalidTypePosition,
                    location.clone(),
                    "callable is not allowed as a property type",
                );
            }
            Type::Scalar(_) | Type::ClassRef(_) => {}
            Type::Union(union) => {
                if union.is_empty() {
                    self.error(
                        SpecErrorKind::EmptyUnion,
                        location.clone(),
                        "union type has no members",
                    );
                    return;
                }

                let mut seen = FxHashSet::default();
                let mut mangled: FxHashMap<Identifier, &QualifiedName> = FxHashMap::default();
                for class in union.classes() {
                    if !seen.insert(class.folded()) {
                        self.error(
                            SpecErrorKind::DuplicateUnionMember,
                            location.clone(),
                            format!("class {class} appears more than once in {ty}"),
                        );
                        continue;
                    }
                    // Each member gets a local handle named after its mangled form.
                    match mangled.get(&mangle::mangle_name(class)) {
                        Some(first) => self.error(
                            SpecErrorKind::ManglingCollision,
                            location.clone(),
                            format!(
                                "classes {first} and {class} in {ty} mangle to the same identifier"
                            ),
                        ),
                        None => {
                            mangled.insert(mangle::mangle_name(class), class);
                        }
                    }
                }

                let mask = union.full_mask();
                if mask.contains(TypeMask::VOID) {
                    self.error(
                        SpecErrorKind::InvalidUnionMember,
                        location.clone(),
                        "void cannot be part of a union type",
                    );
                }
                if mask.contains(TypeMask::ANY) && union.class_count() > 0 {
                    self.error(
                        SpecErrorKind::InvalidUnionMember,
                        location.clone(),
                        "mixed cannot be part of a union type",
                    );
                }
                if position == TypePosition::Property && mask.contains(TypeMask::CALLABLE) {
                    self.error(
                        SpecErrorKind::InvalidTypePosition,
                        location.clone(),
                        "callable is not allowed as a property type",
                    );
                }
            }
        }
    }

    // ==========================================================================
    // Classes
    // ==========================================================================

    fn check_classes(&mut self) {
        let table = self.table;
        let mut seen = FxHashSet::default();

        for class in table.classes() {
            let location = Location::Class(class.name.clone());
            self.check_qualified_name(&class.name, &location);

            if !seen.insert(class.name.folded()) {
                self.error(
                    SpecErrorKind::DuplicateClass,
                    location.clone(),
                    format!("class '{}' is declared more than once", class.name),
                );
            }

            if class.is_abstract() && class.is_final() {
                self.error(
                    SpecErrorKind::InvalidFlags,
                    location.clone(),
                    "a class cannot be both abstract and final",
                );
            }

            self.check_methods(class);
            self.check_properties(class);
        }
    }

    fn check_methods(&mut self, class: &ClassDecl) {
        let mut seen = FxHashSet::default();

        for method in &class.methods {
            let location = Location::method(&class.name, &method.name);
            self.check_name(&method.name, &location);

            if !seen.insert(method.name.to_ascii_lowercase()) {
                self.error(
                    SpecErrorKind::DuplicateMethod,
                    location.clone(),
                    format!("method '{}' is declared more than once", method.name),
                );
            }

            if method.is_abstract() && method.is_final() {
                self.error(
                    SpecErrorKind::InvalidFlags,
                    location.clone(),
                    "a method cannot be both abstract and final",
                );
            }
            if method.is_abstract() && !class.is_abstract() {
                self.error(
                    SpecErrorKind::InvalidFlags,
                    location.clone(),
                    format!("abstract method in non-abstract class {}", class.name),
                );
            }

            self.check_signature(&method.signature, &location);
        }
    }

    fn check_properties(&mut self, class: &ClassDecl) {
        let mut seen = FxHashSet::default();

        for property in &class.properties {
            let location = Location::property(&class.name, &property.name);
            self.check_name(&property.name, &location);

            if !seen.insert(property.name.as_str()) {
                self.error(
                    SpecErrorKind::DuplicateProperty,
                    location.clone(),
                    format!("property ${} is declared more than once", property.name),
                );
            }

            if let Some(ty) = &property.ty {
                self.check_type(ty, TypePosition::Property, &location);
            }

            let Some(default) = &property.default else {
                continue;
            };
            if default.class_ref().is_some() {
                self.error(
                    SpecErrorKind::UnsupportedDefault,
                    location.clone(),
                    format!(
                        "class constant {} cannot be a property default",
                        default.php_literal()
                    ),
                );
            } else if let Some(ty) = &property.ty {
                if !ty.permits_default(default) {
                    self.error(
                        SpecErrorKind::DefaultTypeMismatch,
                        location.clone(),
                        format!("default {} is not a value of type {ty}", default.php_literal()),
                    );
                }
            }
        }
    }

    fn check_inheritance(&mut self) {
        let table = self.table;
        let graph = table.class_graph();

        for cycle in graph.cycles() {
            let members: Vec<String> = cycle.iter().map(|n| n.to_string()).collect();
            self.error(
                SpecErrorKind::InheritanceCycle,
                Location::Class(cycle[0].clone()),
                format!("inheritance cycle through {}", members.join(" -> ")),
            );
        }

        for class in table.classes() {
            if let Some(parent) = graph.parent(&class.name) {
                if parent.local && parent.is_final {
                    self.error(
                        SpecErrorKind::InvalidFlags,
                        Location::Class(class.name.clone()),
                        format!("cannot extend final class {}", parent.name),
                    );
                }
            }
        }
    }

    fn check_references(&mut self) {
        let table = self.table;

        for reference in table.unresolved_references() {
            let name = table.interner().resolve(reference.symbol);
            let message = format!("class {name} is not declared by this extension");
            match self.mode {
                ValidationMode::ClosedWorld => self.error(
                    SpecErrorKind::UnresolvedReference,
                    reference.location.clone(),
                    message,
                ),
                ValidationMode::Lenient => {
                    tracing::debug!(class = name, "treating class as external");
                    self.report.warnings.push(SpecError::new(
                        SpecErrorKind::UnresolvedReference,
                        reference.location.clone(),
                        message,
                    ));
                }
            }
        }
    }

    // ==========================================================================
    // Mangling
    // ==========================================================================

    /// Distinct symbols must not mangle to the same C identifier.
    ///
    /// Function and class names share the flat mangled namespace. Argument-info
    /// variables of functions and methods share another, function tables a
    /// third. A class's parent and interfaces must also stay apart, since each
    /// becomes a parameter of its registration routine.
    fn check_mangling(&mut self) {
        let table = self.table;
        let mut symbols: FxHashMap<Identifier, Owner> = FxHashMap::default();
        let mut arginfo: FxHashMap<Identifier, Owner> = FxHashMap::default();
        let mut tables: FxHashMap<Identifier, Owner> = FxHashMap::default();

        for namespace in table.function_namespaces() {
            let id = mangle::functions_table(namespace, table.namespace());
            let owner = (
                format!("namespace:{}", namespace.join("\\")),
                Location::Extension,
            );
            self.claim(&mut tables, id, owner);
        }

        for function in table.functions() {
            let owner = (
                format!("function:{}", function.name.folded()),
                Location::Function(function.name.clone()),
            );
            self.claim(&mut symbols, mangle::mangle_name(&function.name), owner.clone());
            self.claim(&mut arginfo, mangle::function_arginfo(&function.name), owner);
        }

        for class in table.classes() {
            let owner = (
                format!("class:{}", class.name.folded()),
                Location::Class(class.name.clone()),
            );
            self.claim(&mut symbols, mangle::mangle_name(&class.name), owner);

            // Parents and interfaces become routine parameters.
            let mut params: FxHashMap<Identifier, Owner> = FxHashMap::default();
            for supertype in class.supertypes() {
                let owner = (
                    format!("supertype:{}", supertype.folded()),
                    Location::Class(class.name.clone()),
                );
                self.claim(&mut params, mangle::class_entry_var(supertype), owner);
            }

            for method in &class.methods {
                let owner = (
                    format!(
                        "method:{}::{}",
                        class.name.folded(),
                        method.name.to_ascii_lowercase()
                    ),
                    Location::method(&class.name, &method.name),
                );
                self.claim(
                    &mut arginfo,
                    mangle::method_arginfo(&class.name, &method.name),
                    owner,
                );
            }
        }
    }

    fn claim(&mut self, map: &mut FxHashMap<Identifier, Owner>, id: Identifier, owner: Owner) {
        match map.get(&id) {
            Some((key, _)) if *key == owner.0 => {}
            Some((_, first)) => {
                let message = format!("identifier {id} is already used by {first}");
                self.error(SpecErrorKind::ManglingCollision, owner.1, message);
            }
            None => {
                map.insert(id, owner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtensionBuilder;
    use zendgen_core::{
        ClassFlags, DefaultValue, FunctionDecl, MethodDecl, Parameter, PropertyDecl, UnionType,
    };

    fn errors_of(builder: ExtensionBuilder) -> SpecErrors {
        validate(&builder.build(), ValidationMode::Lenient).errors
    }

    fn kinds(errors: &SpecErrors) -> Vec<SpecErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn valid_extension_passes() {
        let builder = ExtensionBuilder::new("Complex")
            .function(
                FunctionDecl::new("Complex\\say_hello")
                    .with_param(Parameter::typed("name", ScalarKind::String))
                    .returns(ScalarKind::String),
            )
            .class(
                ClassDecl::new("Complex\\Foo")
                    .with_method(MethodDecl::new("getFoo").returns(ScalarKind::String))
                    .with_property(
                        PropertyDecl::new("foo")
                            .with_type(ScalarKind::String)
                            .with_default(DefaultValue::string("100")),
                    ),
            );
        let report = validate(&builder.build(), ValidationMode::ClosedWorld);
        assert!(report.is_ok(), "{}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn duplicates_ignore_case() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("hello"))
                .function(FunctionDecl::new("HELLO"))
                .class(ClassDecl::new("Foo"))
                .class(
                    ClassDecl::new("foo")
                        .with_method(MethodDecl::new("run"))
                        .with_method(MethodDecl::new("Run")),
                ),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::DuplicateFunction,
                SpecErrorKind::DuplicateClass,
                SpecErrorKind::DuplicateMethod,
            ]
        );
    }

    #[test]
    fn duplicate_properties_and_parameters() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(
                    FunctionDecl::new("f")
                        .with_param(Parameter::new("a"))
                        .with_param(Parameter::new("a")),
                )
                .class(
                    ClassDecl::new("Foo")
                        .with_property(PropertyDecl::new("x"))
                        .with_property(PropertyDecl::new("x")),
                ),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::DuplicateParameter,
                SpecErrorKind::DuplicateProperty,
            ]
        );
    }

    #[test]
    fn parameter_order_rules() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(
                    FunctionDecl::new("order")
                        .with_param(Parameter::new("a").with_default(DefaultValue::Int(1)))
                        .with_param(Parameter::new("b")),
                )
                .function(
                    FunctionDecl::new("spread")
                        .with_param(Parameter::new("rest").variadic())
                        .with_param(Parameter::new("tail")),
                )
                .function(
                    FunctionDecl::new("spread_default").with_param(
                        Parameter::new("rest")
                            .variadic()
                            .with_default(DefaultValue::ArrayEmpty),
                    ),
                ),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::ParameterOrder,
                SpecErrorKind::VariadicNotLast,
                SpecErrorKind::VariadicDefault,
            ]
        );
    }

    #[test]
    fn optional_then_variadic_is_fine() {
        let errors = errors_of(
            ExtensionBuilder::new("").function(
                FunctionDecl::new("f")
                    .with_param(Parameter::new("a").with_default(DefaultValue::Null))
                    .with_param(Parameter::new("rest").variadic()),
            ),
        );
        assert!(errors.is_empty(), "{errors}");
    }

    #[test]
    fn defaults_must_match_declared_type() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(
                    FunctionDecl::new("widen").with_param(
                        Parameter::typed("x", ScalarKind::Float).with_default(DefaultValue::Int(1)),
                    ),
                )
                .function(
                    FunctionDecl::new("nullable").with_param(
                        Parameter::typed("x", Type::nullable(ScalarKind::Int.into()))
                            .with_default(DefaultValue::Null),
                    ),
                )
                .function(
                    FunctionDecl::new("constant").with_param(
                        Parameter::typed("x", ScalarKind::Int)
                            .with_default(DefaultValue::class_constant("Modes", "FAST")),
                    ),
                ),
        );
        assert_eq!(kinds(&errors), vec![SpecErrorKind::DefaultTypeMismatch]);
        assert_eq!(
            errors.iter().next().unwrap().location,
            Location::Function("widen".into()).param("x")
        );
    }

    #[test]
    fn property_defaults() {
        let errors = errors_of(
            ExtensionBuilder::new("").class(
                ClassDecl::new("Foo")
                    .with_property(
                        PropertyDecl::new("mode")
                            .with_type(ScalarKind::Int)
                            .with_default(DefaultValue::class_constant("Modes", "FAST")),
                    )
                    .with_property(
                        PropertyDecl::new("flag")
                            .with_type(ScalarKind::Bool)
                            .with_default(DefaultValue::string("yes")),
                    )
                    .with_property(
                        PropertyDecl::new("untyped").with_default(DefaultValue::Int(3)),
                    ),
            ),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::UnsupportedDefault,
                SpecErrorKind::DefaultTypeMismatch,
            ]
        );
    }

    #[test]
    fn union_member_rules() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("empty").returns(UnionType::new()))
                .function(
                    FunctionDecl::new("dup").with_param(Parameter::typed(
                        "x",
                        UnionType::new().with_class("Foo").with_class("FOO"),
                    )),
                )
                .function(FunctionDecl::new("void_union").returns(
                    UnionType::new()
                        .with_scalar(ScalarKind::Void)
                        .with_scalar(ScalarKind::Int),
                ))
                .function(FunctionDecl::new("mixed_union").returns(
                    UnionType::new()
                        .with_scalar(ScalarKind::Mixed)
                        .with_class("Foo"),
                )),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::EmptyUnion,
                SpecErrorKind::DuplicateUnionMember,
                SpecErrorKind::InvalidUnionMember,
                SpecErrorKind::InvalidUnionMember,
            ]
        );
    }

    #[test]
    fn nullable_mixed_alone_is_not_a_union_error() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("f").returns(Type::nullable(ScalarKind::Mixed.into()))),
        );
        assert!(errors.is_empty(), "{errors}");
    }

    #[test]
    fn void_only_in_return_position() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("ok").returns(ScalarKind::Void))
                .function(
                    FunctionDecl::new("bad").with_param(Parameter::typed("v", ScalarKind::Void)),
                )
                .class(
                    ClassDecl::new("Foo")
                        .with_property(PropertyDecl::new("v").with_type(ScalarKind::Void))
                        .with_property(PropertyDecl::new("c").with_type(ScalarKind::Callable)),
                ),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::InvalidTypePosition,
                SpecErrorKind::InvalidTypePosition,
                SpecErrorKind::InvalidTypePosition,
            ]
        );
    }

    #[test]
    fn invalid_names() {
        let errors = errors_of(
            ExtensionBuilder::new("My-Ext")
                .function(FunctionDecl::new("9lives"))
                .class(
                    ClassDecl::new("Foo")
                        .with_method(MethodDecl::new("do it"))
                        .with_property(PropertyDecl::new("")),
                ),
        );
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.kind == SpecErrorKind::InvalidName));
        assert_eq!(errors.iter().next().unwrap().location, Location::Extension);
    }

    #[test]
    fn union_members_that_mangle_alike() {
        let errors = errors_of(
            ExtensionBuilder::new("").class(
                ClassDecl::new("Foo").with_property(
                    PropertyDecl::new("v").with_type(
                        UnionType::new()
                            .with_class("A_B\\C")
                            .with_class("A\\B_C")
                            .with_scalar(ScalarKind::Int),
                    ),
                ),
            ),
        );
        assert_eq!(kinds(&errors), vec![SpecErrorKind::ManglingCollision]);
        assert!(errors.iter().next().unwrap().message.contains("A_B\\C and A\\B_C"));
    }

    #[test]
    fn supertypes_that_mangle_alike() {
        let errors = errors_of(
            ExtensionBuilder::new("").class(
                ClassDecl::new("Foo")
                    .extends("A_B\\C")
                    .implements("A\\B_C"),
            ),
        );
        assert_eq!(kinds(&errors), vec![SpecErrorKind::ManglingCollision]);
    }

    #[test]
    fn function_tables_that_mangle_alike() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("A_B\\f"))
                .function(FunctionDecl::new("A\\B\\g")),
        );
        assert_eq!(kinds(&errors), vec![SpecErrorKind::ManglingCollision]);
        assert_eq!(errors.iter().next().unwrap().location, Location::Extension);
    }

    #[test]
    fn mangling_collisions_between_distinct_symbols() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("A\\b_c"))
                .function(FunctionDecl::new("A_b\\c"))
                .function(FunctionDecl::new("class_Foo_bar"))
                .class(ClassDecl::new("Foo").with_method(MethodDecl::new("bar"))),
        );
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::ManglingCollision,
                SpecErrorKind::ManglingCollision,
                SpecErrorKind::ManglingCollision,
            ]
        );
    }

    #[test]
    fn exact_duplicates_are_not_also_collisions() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("f"))
                .function(FunctionDecl::new("f")),
        );
        assert_eq!(kinds(&errors), vec![SpecErrorKind::DuplicateFunction]);
    }

    #[test]
    fn inheritance_cycles_and_final_parents() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .class(ClassDecl::new("A").extends("B"))
                .class(ClassDecl::new("B").extends("A"))
                .class(ClassDecl::new("Sealed").with_flags(ClassFlags::FINAL))
                .class(ClassDecl::new("Child").extends("Sealed")),
        );
        assert_eq!(
            kinds(&errors),
            vec![SpecErrorKind::InheritanceCycle, SpecErrorKind::InvalidFlags]
        );
        assert!(errors.iter().next().unwrap().message.contains("A -> B"));
    }

    #[test]
    fn contradictory_modifiers() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .class(ClassDecl::new("Both").with_flags(ClassFlags::ABSTRACT | ClassFlags::FINAL))
                .class(
                    ClassDecl::new("Concrete")
                        .with_method(MethodDecl::new("run").as_abstract())
                        .with_method(MethodDecl::new("stop").as_abstract().as_final()),
                ),
        );
        // "stop" breaks both rules.
        assert_eq!(
            kinds(&errors),
            vec![
                SpecErrorKind::InvalidFlags,
                SpecErrorKind::InvalidFlags,
                SpecErrorKind::InvalidFlags,
                SpecErrorKind::InvalidFlags,
            ]
        );
    }

    #[test]
    fn unresolved_references_depend_on_mode() {
        let table = ExtensionBuilder::new("Complex")
            .class(ClassDecl::new("Complex\\Foo").implements("ArrayAccess"))
            .build();

        let lenient = validate(&table, ValidationMode::Lenient);
        assert!(lenient.is_ok());
        assert_eq!(lenient.warnings.len(), 1);
        assert_eq!(lenient.warnings[0].kind, SpecErrorKind::UnresolvedReference);
        assert_eq!(lenient.clone().into_result().unwrap().len(), 1);

        let closed = validate(&table, ValidationMode::ClosedWorld);
        assert!(closed.warnings.is_empty());
        assert_eq!(kinds(&closed.errors), vec![SpecErrorKind::UnresolvedReference]);
        assert!(closed.into_result().is_err());
    }

    #[test]
    fn all_errors_are_reported_together() {
        let errors = errors_of(
            ExtensionBuilder::new("")
                .function(FunctionDecl::new("f"))
                .function(FunctionDecl::new("F"))
                .function(
                    FunctionDecl::new("g")
                        .with_param(Parameter::new("a").variadic())
                        .with_param(Parameter::new("b")),
                )
                .class(ClassDecl::new("X").extends("X")),
        );
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_kind(SpecErrorKind::DuplicateFunction));
        assert!(errors.contains_kind(SpecErrorKind::VariadicNotLast));
        assert!(errors.contains_kind(SpecErrorKind::InheritanceCycle));
    }
}
