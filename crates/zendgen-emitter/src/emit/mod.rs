//! Header emitter.
//!
//! The [`Emitter`] turns a validated [`SymbolTable`] into the text of one
//! argument-info header. Sections come out in a fixed order, and within each
//! section declarations keep their input order:
//!
//! 1. argument-info blocks (functions, then each class's methods)
//! 2. `ZEND_FUNCTION` / `ZEND_METHOD` forward declarations
//! 3. one function table per namespace: `ext_functions` for the
//!    extension's own, `ext_{namespace}_functions` for any other
//! 4. one method table per class
//! 5. one registration routine per class
//!
//! # Example
//!
//! ```
//! use zendgen_core::{FunctionDecl, Parameter, ScalarKind};
//! use zendgen_emitter::{EmitOptions, Emitter};
//! use zendgen_registry::ExtensionBuilder;
//!
//! let table = ExtensionBuilder::new("Complex")
//!     .function(
//!         FunctionDecl::new("Complex\\say_hello")
//!             .with_param(Parameter::typed("name", ScalarKind::String))
//!             .returns(ScalarKind::String),
//!     )
//!     .build();
//!
//! let text = Emitter::new(&table, EmitOptions::default()).emit().unwrap();
//! assert!(text.contains("ZEND_FUNCTION(Complex_say_hello);"));
//! ```

mod access;
mod arginfo;
mod class_registration;
mod function_table;
mod ledger;
mod method_table;
mod writer;

pub use access::AccessFlags;
pub use ledger::{OwnershipEvent, OwnershipLedger};

use zendgen_core::{InternalError, mangle};
use zendgen_registry::SymbolTable;

use arginfo::ArginfoEmitter;
use writer::CWriter;

/// Banner written at the top of every header.
pub const GENERATED_BANNER: &str =
    "/* This is a generated file, edit the extension declarations instead. */";

/// Output options for the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Alias structurally identical argument-info blocks with `#define`.
    pub share_arginfo: bool,
    /// Start the output with [`GENERATED_BANNER`].
    pub header_comment: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            share_arginfo: true,
            header_comment: true,
        }
    }
}

/// Emits the declaration text for one symbol table.
///
/// Emission is a pure function of the table and options: the same input
/// always produces byte-identical output.
pub struct Emitter<'a> {
    table: &'a SymbolTable,
    options: EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(table: &'a SymbolTable, options: EmitOptions) -> Self {
        Self { table, options }
    }

    /// Emit every section and join them with blank lines.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit(&self) -> Result<String, InternalError> {
        let mut blocks: Vec<String> = Vec::new();

        if self.options.header_comment {
            blocks.push(format!("{GENERATED_BANNER}\n"));
        }

        self.arginfo_blocks(&mut blocks);

        let forward = self.forward_declarations();
        if !forward.is_empty() {
            blocks.push(forward);
        }

        self.function_tables(&mut blocks);

        for class in self.table.classes() {
            let mut w = CWriter::new();
            method_table::write_method_table(&mut w, class);
            blocks.push(w.finish());
        }

        for class in self.table.classes() {
            blocks.push(class_registration::emit_class_registration(
                class,
                self.table.interner(),
            )?);
        }

        let mut out = CWriter::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                out.blank();
            }
            out.append(block);
        }

        tracing::debug!(
            functions = self.table.functions().len(),
            classes = self.table.classes().len(),
            sections = blocks.len(),
            "emitted header"
        );
        Ok(out.finish())
    }

    fn arginfo_blocks(&self, blocks: &mut Vec<String>) {
        let mut arginfo = ArginfoEmitter::new(self.options.share_arginfo);

        for function in self.table.functions() {
            blocks.push(arginfo.emit(
                mangle::function_arginfo(&function.name),
                &function.signature,
            ));
        }
        for class in self.table.classes() {
            for method in &class.methods {
                blocks.push(arginfo.emit(
                    mangle::method_arginfo(&class.name, &method.name),
                    &method.signature,
                ));
            }
        }

        tracing::debug!(
            blocks = arginfo.blocks(),
            aliases = arginfo.aliases(),
            "argument info"
        );
    }

    /// The extension's own table first, even when empty, then one table per
    /// other namespace in first-appearance order.
    fn function_tables(&self, blocks: &mut Vec<String>) {
        let own = self.table.namespace();
        let others = self
            .table
            .function_namespaces()
            .iter()
            .filter(|ns| ns.as_slice() != own);

        for namespace in std::iter::once(own).chain(others.map(Vec::as_slice)) {
            let name = mangle::functions_table(namespace, own);
            let mut w = CWriter::new();
            function_table::write_function_table(
                &mut w,
                &name,
                self.table.functions_in(namespace),
            );
            blocks.push(w.finish());
        }
    }

    fn forward_declarations(&self) -> String {
        let mut w = CWriter::new();
        for function in self.table.functions() {
            w.line(function_table::forward_declaration(function));
        }
        for class in self.table.classes() {
            for method in &class.methods {
                if let Some(line) = method_table::forward_declaration(class, method) {
                    w.line(line);
                }
            }
        }
        w.finish()
    }
}
