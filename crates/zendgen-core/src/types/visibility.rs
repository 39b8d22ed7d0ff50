//! Visibility modifiers for class members.

use std::fmt;

/// Visibility modifier for methods and properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Access flag macro for this visibility.
    pub const fn acc_flag(self) -> &'static str {
        match self {
            Visibility::Public => "ZEND_ACC_PUBLIC",
            Visibility::Protected => "ZEND_ACC_PROTECTED",
            Visibility::Private => "ZEND_ACC_PRIVATE",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}
