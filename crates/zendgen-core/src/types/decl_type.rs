//! Declarable types.
//!
//! [`Type`] is a closed variant over scalar kinds, single class references and
//! unions. Nullability only exists on unions: `?int` is a one-member union with
//! the nullable flag set.

use std::fmt;

use crate::QualifiedName;

use super::{DefaultValue, ScalarKind, TypeMask};

/// A parameter, return or property type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A single built-in kind.
    Scalar(ScalarKind),
    /// A single class or interface, by fully qualified name.
    ClassRef(QualifiedName),
    /// Classes and/or scalar kinds, optionally nullable.
    Union(UnionType),
}

impl Type {
    /// Shorthand for a class reference.
    pub fn class(name: impl Into<QualifiedName>) -> Self {
        Type::ClassRef(name.into())
    }

    /// Make `inner` nullable (`?T`).
    pub fn nullable(inner: Type) -> Self {
        let union = match inner {
            Type::Scalar(kind) => UnionType::new().with_scalar(kind),
            Type::ClassRef(name) => UnionType::new().with_class(name),
            Type::Union(union) => union,
        };
        Type::Union(union.nullable())
    }

    /// Whether `null` is an accepted value.
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Scalar(kind) => matches!(kind, ScalarKind::Null | ScalarKind::Mixed),
            Type::ClassRef(_) => false,
            Type::Union(union) => union.is_nullable(),
        }
    }

    /// Whether this is exactly `mixed`.
    pub fn is_mixed(&self) -> bool {
        matches!(self, Type::Scalar(ScalarKind::Mixed))
    }

    /// Whether this is exactly `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Scalar(ScalarKind::Void))
    }

    /// Class members, in declaration order.
    pub fn class_refs(&self) -> &[QualifiedName] {
        match self {
            Type::Scalar(_) => &[],
            Type::ClassRef(name) => std::slice::from_ref(name),
            Type::Union(union) => union.classes(),
        }
    }

    /// Scalar `MAY_BE_*` bits, including `MAY_BE_NULL` when nullable.
    pub fn mask(&self) -> TypeMask {
        match self {
            Type::Scalar(kind) => kind.mask(),
            Type::ClassRef(_) => TypeMask::empty(),
            Type::Union(union) => union.full_mask(),
        }
    }

    /// Check whether a default value's kind is a permitted member of this type.
    ///
    /// Class-constant defaults are resolved by the runtime and always pass.
    pub fn permits_default(&self, default: &DefaultValue) -> bool {
        let Some(kind) = default.kind() else {
            return true;
        };
        match self {
            Type::Scalar(ScalarKind::Mixed) => true,
            Type::Scalar(own) => *own == kind,
            Type::ClassRef(_) => false,
            Type::Union(union) => match kind {
                ScalarKind::Null => union.is_nullable(),
                other => union.scalar_mask().contains(other.mask()),
            },
        }
    }
}

impl From<ScalarKind> for Type {
    fn from(kind: ScalarKind) -> Self {
        Type::Scalar(kind)
    }
}

impl From<UnionType> for Type {
    fn from(union: UnionType) -> Self {
        Type::Union(union)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Scalar(kind) => write!(f, "{kind}"),
            Type::ClassRef(name) => write!(f, "{name}"),
            Type::Union(union) => write!(f, "{union}"),
        }
    }
}

/// Union of class references and scalar kinds.
///
/// Class members keep their declaration order (it decides type-list indices);
/// scalar members collapse into a [`TypeMask`]. Adding `null` sets the nullable
/// flag instead of a mask bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UnionType {
    classes: Vec<QualifiedName>,
    scalars: TypeMask,
    nullable: bool,
}

impl UnionType {
    /// Create an empty union.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class member.
    pub fn with_class(mut self, name: impl Into<QualifiedName>) -> Self {
        self.classes.push(name.into());
        self
    }

    /// Add a scalar member.
    pub fn with_scalar(mut self, kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Null => self.nullable = true,
            ScalarKind::Mixed => {
                self.scalars |= TypeMask::ANY;
                self.nullable = true;
            }
            other => self.scalars |= other.mask(),
        }
        self
    }

    /// Mark the union as accepting `null`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Class members, in declaration order.
    pub fn classes(&self) -> &[QualifiedName] {
        &self.classes
    }

    /// Scalar members, without the null bit.
    pub fn scalar_mask(&self) -> TypeMask {
        self.scalars.difference(TypeMask::NULL)
    }

    /// Scalar members plus `MAY_BE_NULL` when nullable.
    pub fn full_mask(&self) -> TypeMask {
        if self.nullable {
            self.scalars | TypeMask::NULL
        } else {
            self.scalars
        }
    }

    /// Whether `null` is accepted.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Number of class members (the type-list size).
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// A union with no members at all.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.scalars.is_empty() && !self.nullable
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members: Vec<String> = self.classes.iter().map(|c| c.to_string()).collect();
        if self.scalars.contains(TypeMask::ANY) {
            members.push("mixed".to_string());
        } else {
            members.extend(
                self.scalar_mask()
                    .scalar_kinds()
                    .into_iter()
                    .map(|k| k.name().to_string()),
            );
            if self.nullable {
                members.push("null".to_string());
            }
        }
        write!(f, "{}", members.join("|"))
    }
}
