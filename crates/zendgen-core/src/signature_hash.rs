//! Deterministic hashing of argument-info signatures.
//!
//! Two signatures that would produce the same argument-info block hash to the
//! same [`SignatureHash`]. The hash is a lookup key only: the emitter still
//! compares signatures structurally before sharing a block, so a collision can
//! never merge two different signatures.
//!
//! # Examples
//!
//! ```
//! use zendgen_core::{Parameter, ScalarKind, Signature, SignatureHash};
//!
//! let mut a = Signature::default();
//! a.params.push(Parameter::typed("name", ScalarKind::String));
//! let b = a.clone();
//! assert_eq!(SignatureHash::of(&a), SignatureHash::of(&b));
//!
//! let mut c = a.clone();
//! c.params[0].by_ref = true;
//! assert_ne!(SignatureHash::of(&a), SignatureHash::of(&c));
//! ```

use std::fmt;

use xxhash_rust::xxh64::xxh64;

use crate::{Parameter, Signature, Type};

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant between parameters.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for signature hashes.
    pub const SIGNATURE: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for the return-type component.
    pub const RETURN: u64 = 0x7d3c8b4a92e15f6d;

    /// Parameter position mixing constants, so that parameter order matters.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];
}

/// A deterministic 64-bit hash of an argument-info signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SignatureHash(pub u64);

impl SignatureHash {
    /// Hash everything an argument-info block encodes: return type, return
    /// by-reference, and each parameter's name, type, flags and default.
    pub fn of(signature: &Signature) -> Self {
        let ret = type_key(signature.return_type.as_ref());
        let mut hash = hash_constants::SIGNATURE
            ^ hash_constants::RETURN.wrapping_mul(xxh64(ret.as_bytes(), 0))
            ^ u64::from(signature.returns_ref);
        for (i, param) in signature.params.iter().enumerate() {
            let marker = hash_constants::PARAM_MARKERS
                .get(i)
                .copied()
                .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
            let param_hash = xxh64(param_key(param).as_bytes(), 0);
            hash = hash
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(marker ^ param_hash);
        }
        SignatureHash(hash)
    }
}

fn type_key(ty: Option<&Type>) -> String {
    ty.map_or_else(|| "_".to_string(), Type::to_string)
}

fn param_key(param: &Parameter) -> String {
    format!(
        "{}:{}:{}:{}:{}",
        param.name,
        type_key(param.ty.as_ref()),
        u8::from(param.by_ref),
        u8::from(param.variadic),
        param
            .default
            .as_ref()
            .map_or_else(|| "-".to_string(), |d| d.php_literal()),
    )
}

impl fmt::Debug for SignatureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureHash({:#018x})", self.0)
    }
}
