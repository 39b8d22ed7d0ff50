//! C declaration emitter for zendgen.
//!
//! Takes a validated [`SymbolTable`](zendgen_registry::SymbolTable) and writes
//! argument-info blocks, function and method tables, and class-registration
//! routines. See [`emit`] for the section layout.

pub mod emit;

pub use emit::{
    AccessFlags, EmitOptions, Emitter, GENERATED_BANNER, OwnershipEvent, OwnershipLedger,
};
