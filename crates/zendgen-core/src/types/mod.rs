//! Type model: scalar kinds, masks, declarable types and default values.

mod decl_type;
mod default_value;
mod scalar_kind;
mod type_mask;
mod visibility;

pub use decl_type::{Type, UnionType};
pub use default_value::{DefaultValue, format_float};
pub use scalar_kind::{ScalarKind, TypeCode};
pub use type_mask::TypeMask;
pub use visibility::Visibility;
