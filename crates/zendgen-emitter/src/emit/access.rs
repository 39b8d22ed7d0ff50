//! `ZEND_ACC_*` flag sets.

use bitflags::bitflags;

use zendgen_core::{ClassDecl, ClassFlags, MethodDecl, PropertyDecl, Visibility};

bitflags! {
    /// Engine access and modifier flags, as written into entry tables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        const EXPLICIT_ABSTRACT_CLASS = 1 << 6;
        const NO_DYNAMIC_PROPERTIES = 1 << 7;
    }
}

/// Emission order of the flag names.
const FLAG_NAMES: [(AccessFlags, &str); 8] = [
    (AccessFlags::PUBLIC, "ZEND_ACC_PUBLIC"),
    (AccessFlags::PROTECTED, "ZEND_ACC_PROTECTED"),
    (AccessFlags::PRIVATE, "ZEND_ACC_PRIVATE"),
    (AccessFlags::STATIC, "ZEND_ACC_STATIC"),
    (AccessFlags::FINAL, "ZEND_ACC_FINAL"),
    (AccessFlags::ABSTRACT, "ZEND_ACC_ABSTRACT"),
    (
        AccessFlags::EXPLICIT_ABSTRACT_CLASS,
        "ZEND_ACC_EXPLICIT_ABSTRACT_CLASS",
    ),
    (
        AccessFlags::NO_DYNAMIC_PROPERTIES,
        "ZEND_ACC_NO_DYNAMIC_PROPERTIES",
    ),
];

impl AccessFlags {
    fn visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => AccessFlags::PUBLIC,
            Visibility::Protected => AccessFlags::PROTECTED,
            Visibility::Private => AccessFlags::PRIVATE,
        }
    }

    pub fn of_method(method: &MethodDecl) -> Self {
        let mut flags = Self::visibility(method.visibility);
        flags.set(AccessFlags::STATIC, method.is_static());
        flags.set(AccessFlags::FINAL, method.is_final());
        flags.set(AccessFlags::ABSTRACT, method.is_abstract());
        flags
    }

    pub fn of_property(property: &PropertyDecl) -> Self {
        let mut flags = Self::visibility(property.visibility);
        flags.set(AccessFlags::STATIC, property.is_static);
        flags
    }

    /// Flags OR-ed into `ce_flags` after registration.
    pub fn of_class(class: &ClassDecl) -> Self {
        let mut flags = AccessFlags::empty();
        flags.set(AccessFlags::FINAL, class.flags.contains(ClassFlags::FINAL));
        flags.set(
            AccessFlags::EXPLICIT_ABSTRACT_CLASS,
            class.flags.contains(ClassFlags::ABSTRACT),
        );
        flags.set(
            AccessFlags::NO_DYNAMIC_PROPERTIES,
            class.flags.contains(ClassFlags::NO_DYNAMIC_PROPERTIES),
        );
        flags
    }

    /// `ZEND_ACC_A|ZEND_ACC_B`, or `0` when empty.
    pub fn to_c_expr(self) -> String {
        let names: Vec<&str> = FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            "0".to_string()
        } else {
            names.join("|")
        }
    }
}
