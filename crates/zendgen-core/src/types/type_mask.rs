//! `MAY_BE_*` scalar type masks.

use bitflags::bitflags;

use super::{ScalarKind, TypeCode};

bitflags! {
    /// Set of scalar kinds accepted by a type, as the engine's `MAY_BE_*` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeMask: u32 {
        const NULL = 1 << 1;
        const FALSE = 1 << 2;
        const TRUE = 1 << 3;
        const LONG = 1 << 4;
        const DOUBLE = 1 << 5;
        const STRING = 1 << 6;
        const ARRAY = 1 << 7;
        const OBJECT = 1 << 8;
        const RESOURCE = 1 << 9;
        const CALLABLE = 1 << 12;
        const VOID = 1 << 14;
        const BOOL = Self::FALSE.bits() | Self::TRUE.bits();
        const ANY = Self::NULL.bits()
            | Self::BOOL.bits()
            | Self::LONG.bits()
            | Self::DOUBLE.bits()
            | Self::STRING.bits()
            | Self::ARRAY.bits()
            | Self::OBJECT.bits()
            | Self::RESOURCE.bits();
    }
}

/// Emission order of the individual mask names.
const MASK_NAMES: [(TypeMask, &str); 10] = [
    (TypeMask::CALLABLE, "MAY_BE_CALLABLE"),
    (TypeMask::OBJECT, "MAY_BE_OBJECT"),
    (TypeMask::ARRAY, "MAY_BE_ARRAY"),
    (TypeMask::STRING, "MAY_BE_STRING"),
    (TypeMask::LONG, "MAY_BE_LONG"),
    (TypeMask::DOUBLE, "MAY_BE_DOUBLE"),
    (TypeMask::BOOL, "MAY_BE_BOOL"),
    (TypeMask::FALSE, "MAY_BE_FALSE"),
    (TypeMask::TRUE, "MAY_BE_TRUE"),
    (TypeMask::NULL, "MAY_BE_NULL"),
];

impl Default for TypeMask {
    fn default() -> Self {
        TypeMask::empty()
    }
}

impl TypeMask {
    /// Mask bit for a single engine type code.
    pub fn from_code(code: TypeCode) -> Self {
        Self::from_bits_retain(1u32 << u8::from(code))
    }

    /// Scalar kinds fully covered by this mask, in canonical order.
    ///
    /// `Mixed` is reported alone when the mask covers [`TypeMask::ANY`].
    pub fn scalar_kinds(self) -> Vec<ScalarKind> {
        if self.contains(TypeMask::ANY) {
            return vec![ScalarKind::Mixed];
        }
        ScalarKind::ALL
            .into_iter()
            .filter(|kind| *kind != ScalarKind::Mixed && self.contains(kind.mask()))
            .collect()
    }

    /// Render as a C expression (`MAY_BE_STRING|MAY_BE_NULL`), or `0` when empty.
    pub fn to_c_expr(self) -> String {
        if self.is_empty() {
            return "0".to_string();
        }

        let mut parts = Vec::new();
        let mut rest = self;
        if rest.contains(TypeMask::ANY) {
            parts.push("MAY_BE_ANY");
            rest.remove(TypeMask::ANY);
        }
        for (bits, name) in MASK_NAMES {
            if rest.contains(bits) {
                parts.push(name);
                rest.remove(bits);
            }
        }
        if rest.contains(TypeMask::VOID) {
            parts.push("MAY_BE_VOID");
        }
        parts.join("|")
    }
}
