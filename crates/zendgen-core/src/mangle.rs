//! Name mangling from namespaced symbols to flat C identifiers.
//!
//! Namespace separators collapse to [`JOINER`], so `Complex\say_hello` becomes
//! `Complex_say_hello`. The mapping is deterministic but not injective in
//! general (`A_B\c` and `A\B_c` both give `A_B_c`); the validator rejects
//! extensions where two symbols collide.

use std::fmt;

use crate::QualifiedName;

/// Character joining namespace segments in mangled identifiers.
pub const JOINER: char = '_';

/// A flat, namespace-free C identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap an already-flat identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Identifier(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Mangle a symbol declared in `namespace`.
pub fn mangle(namespace: &[String], symbol: &str) -> Identifier {
    let mut out = String::new();
    for segment in namespace {
        out.push_str(segment);
        out.push(JOINER);
    }
    out.push_str(symbol);
    Identifier(out)
}

/// Mangle a qualified name.
pub fn mangle_name(name: &QualifiedName) -> Identifier {
    mangle(&name.namespace, &name.name)
}

/// Argument-info variable backing a function's signature.
pub fn function_arginfo(function: &QualifiedName) -> Identifier {
    Identifier(format!("arginfo_{}", mangle_name(function)))
}

/// Argument-info variable backing a method's signature.
pub fn method_arginfo(class: &QualifiedName, method: &str) -> Identifier {
    Identifier(format!("arginfo_class_{}_{}", mangle_name(class), method))
}

/// Method-entry table of a class.
pub fn methods_table(class: &QualifiedName) -> Identifier {
    Identifier(format!("class_{}_methods", mangle_name(class)))
}

/// Registration routine of a class.
pub fn register_class_fn(class: &QualifiedName) -> Identifier {
    Identifier(format!("register_class_{}", mangle_name(class)))
}

/// Parameter holding a registered class handle (parents and interfaces).
pub fn class_entry_var(class: &QualifiedName) -> Identifier {
    Identifier(format!("class_entry_{}", mangle_name(class)))
}

/// Table listing the extension's own functions.
pub const EXTENSION_FUNCTIONS_TABLE: &str = "ext_functions";

/// Function-entry table for functions declared in `namespace`.
///
/// Functions in the extension's own namespace go to
/// [`EXTENSION_FUNCTIONS_TABLE`]; every other namespace gets
/// `ext_{mangled}_functions` (`ext_global_functions` for the global one).
pub fn functions_table(namespace: &[String], extension_namespace: &[String]) -> Identifier {
    if namespace == extension_namespace {
        Identifier::new(EXTENSION_FUNCTIONS_TABLE)
    } else if namespace.is_empty() {
        Identifier::new("ext_global_functions")
    } else {
        let joined = namespace.join(JOINER.to_string().as_str());
        Identifier(format!("ext_{joined}_functions"))
    }
}

/// Check that `name` is usable as a C identifier fragment.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_tables_per_namespace() {
        let ext = vec!["Complex".to_string()];
        assert_eq!(functions_table(&ext, &ext).as_str(), "ext_functions");
        assert_eq!(
            functions_table(&["Other".to_string(), "Util".to_string()], &ext).as_str(),
            "ext_Other_Util_functions"
        );
        assert_eq!(functions_table(&[], &ext).as_str(), "ext_global_functions");
        assert_eq!(functions_table(&[], &[]).as_str(), "ext_functions");
    }

    #[test]
    fn namespaces_collapse_to_joiner() {
        let name = QualifiedName::from("Complex\\say_hello");
        assert_eq!(mangle_name(&name).as_str(), "Complex_say_hello");

        let nested = QualifiedName::from("A\\B\\Foo");
        assert_eq!(mangle_name(&nested).as_str(), "A_B_Foo");

        let global = QualifiedName::global("strlen");
        assert_eq!(mangle_name(&global).as_str(), "strlen");
    }

    #[test]
    fn mangling_is_deterministic() {
        let name = QualifiedName::from("Complex\\Foo");
        assert_eq!(mangle_name(&name), mangle_name(&name.clone()));
    }

    #[test]
    fn distinct_symbols_can_collide() {
        let a = QualifiedName::from("A_B\\c");
        let b = QualifiedName::from("A\\B_c");
        assert_ne!(a, b);
        assert_eq!(mangle_name(&a), mangle_name(&b));
    }

    #[test]
    fn declaration_names() {
        let func = QualifiedName::from("Complex\\say_hello");
        let class = QualifiedName::from("Complex\\Foo");
        assert_eq!(function_arginfo(&func).as_str(), "arginfo_Complex_say_hello");
        assert_eq!(
            method_arginfo(&class, "setFoo").as_str(),
            "arginfo_class_Complex_Foo_setFoo"
        );
        assert_eq!(methods_table(&class).as_str(), "class_Complex_Foo_methods");
        assert_eq!(register_class_fn(&class).as_str(), "register_class_Complex_Foo");
        assert_eq!(class_entry_var(&class).as_str(), "class_entry_Complex_Foo");
    }

    #[test]
    fn identifier_validity() {
        assert!(is_valid_identifier("say_hello"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("1x"));
        assert!(!is_valid_identifier("a-b"));
        assert!(!is_valid_identifier(""));
    }
}
