//! Argument-info blocks.
//!
//! One block per function or method signature:
//!
//! ```text
//! ZEND_BEGIN_ARG_WITH_RETURN_TYPE_INFO_EX(arginfo_Complex_say_hello, 0, 1, IS_STRING, 0)
//! 	ZEND_ARG_TYPE_INFO(0, name, IS_STRING, 0)
//! ZEND_END_ARG_INFO()
//! ```
//!
//! The header macro is chosen from the return type and the argument macro from
//! each parameter's type: a single scalar uses the `TYPE_INFO` forms, a single
//! class the `OBJ_INFO` forms, scalar unions `TYPE_MASK` and unions with classes
//! `OBJ_TYPE_MASK`. Variadic parameters use the `VARIADIC_` variants.

use rustc_hash::FxHashMap;

use zendgen_core::{
    DefaultValue, Identifier, Parameter, QualifiedName, ScalarKind, Signature, SignatureHash, Type,
    TypeMask, UnionType,
};

use super::writer::{CWriter, c_string_literal};

/// How a declared type maps onto the argument-info macro families.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ArgType {
    /// No declared type.
    Untyped,
    /// One engine type code, optionally nullable.
    Code { code: &'static str, nullable: bool },
    /// One class, optionally nullable.
    Object { class: String, nullable: bool },
    /// Scalar union.
    Mask(TypeMask),
    /// Classes plus scalar bits.
    ObjectMask { classes: String, mask: TypeMask },
}

impl ArgType {
    fn of(ty: Option<&Type>) -> Self {
        match ty {
            None => ArgType::Untyped,
            Some(Type::Scalar(kind)) => ArgType::Code {
                code: kind.type_code().macro_name(),
                nullable: false,
            },
            Some(Type::ClassRef(class)) => ArgType::Object {
                class: arg_class_name(class),
                nullable: false,
            },
            Some(Type::Union(union)) => Self::of_union(union),
        }
    }

    fn of_union(union: &UnionType) -> Self {
        let nullable = union.is_nullable();
        let scalars = union.scalar_mask();

        if union.class_count() == 0 {
            if union.full_mask().contains(TypeMask::ANY) {
                return ArgType::Code {
                    code: ScalarKind::Mixed.type_code().macro_name(),
                    nullable: false,
                };
            }
            return match scalars.scalar_kinds().as_slice() {
                [kind] if kind.mask() == scalars => ArgType::Code {
                    code: kind.type_code().macro_name(),
                    nullable,
                },
                _ => ArgType::Mask(union.full_mask()),
            };
        }

        if union.class_count() == 1 && scalars.is_empty() {
            return ArgType::Object {
                class: arg_class_name(&union.classes()[0]),
                nullable,
            };
        }

        let classes: Vec<String> = union.classes().iter().map(arg_class_name).collect();
        ArgType::ObjectMask {
            classes: classes.join("|"),
            mask: union.full_mask(),
        }
    }
}

/// Class names inside argument-info macros are stringified by the
/// preprocessor, so namespace separators are written doubled.
fn arg_class_name(class: &QualifiedName) -> String {
    class.to_string().replace('\\', "\\\\")
}

fn default_literal(default: Option<&DefaultValue>) -> Option<String> {
    default.map(|d| c_string_literal(&d.php_literal()))
}

/// Write the `ZEND_BEGIN_ARG_*` header line.
fn header(name: &Identifier, signature: &Signature) -> String {
    let by_ref = u8::from(signature.returns_ref);
    let required = signature.required_args();

    match ArgType::of(signature.return_type.as_ref()) {
        ArgType::Untyped => format!("ZEND_BEGIN_ARG_INFO_EX({name}, 0, {by_ref}, {required})"),
        ArgType::Code { code, nullable } => format!(
            "ZEND_BEGIN_ARG_WITH_RETURN_TYPE_INFO_EX({name}, {by_ref}, {required}, {code}, {})",
            u8::from(nullable)
        ),
        ArgType::Object { class, nullable } => format!(
            "ZEND_BEGIN_ARG_WITH_RETURN_OBJ_INFO_EX({name}, {by_ref}, {required}, {class}, {})",
            u8::from(nullable)
        ),
        ArgType::Mask(mask) => format!(
            "ZEND_BEGIN_ARG_WITH_RETURN_TYPE_MASK_EX({name}, {by_ref}, {required}, {})",
            mask.to_c_expr()
        ),
        ArgType::ObjectMask { classes, mask } => format!(
            "ZEND_BEGIN_ARG_WITH_RETURN_OBJ_TYPE_MASK_EX({name}, {by_ref}, {required}, {classes}, {})",
            mask.to_c_expr()
        ),
    }
}

/// Write one `ZEND_ARG_*` line.
fn argument(param: &Parameter) -> String {
    let by_ref = u8::from(param.by_ref);
    let name = &param.name;
    let prefix = if param.variadic { "ZEND_ARG_VARIADIC" } else { "ZEND_ARG" };
    let default = default_literal(param.default.as_ref());

    match (ArgType::of(param.ty.as_ref()), default) {
        (ArgType::Untyped, None) => format!("{prefix}_INFO({by_ref}, {name})"),
        (ArgType::Untyped, Some(value)) => {
            format!("{prefix}_INFO_WITH_DEFAULT_VALUE({by_ref}, {name}, {value})")
        }
        (ArgType::Code { code, nullable }, None) => format!(
            "{prefix}_TYPE_INFO({by_ref}, {name}, {code}, {})",
            u8::from(nullable)
        ),
        (ArgType::Code { code, nullable }, Some(value)) => format!(
            "{prefix}_TYPE_INFO_WITH_DEFAULT_VALUE({by_ref}, {name}, {code}, {}, {value})",
            u8::from(nullable)
        ),
        (ArgType::Object { class, nullable }, None) => format!(
            "{prefix}_OBJ_INFO({by_ref}, {name}, {class}, {})",
            u8::from(nullable)
        ),
        (ArgType::Object { class, nullable }, Some(value)) => format!(
            "{prefix}_OBJ_INFO_WITH_DEFAULT_VALUE({by_ref}, {name}, {class}, {}, {value})",
            u8::from(nullable)
        ),
        (ArgType::Mask(mask), value) => format!(
            "{prefix}_TYPE_MASK({by_ref}, {name}, {}, {})",
            mask.to_c_expr(),
            value.as_deref().unwrap_or("NULL")
        ),
        (ArgType::ObjectMask { classes, mask }, value) => format!(
            "{prefix}_OBJ_TYPE_MASK({by_ref}, {name}, {classes}, {}, {})",
            mask.to_c_expr(),
            value.as_deref().unwrap_or("NULL")
        ),
    }
}

/// Write a complete block for `signature` under `name`.
pub fn write_block(w: &mut CWriter, name: &Identifier, signature: &Signature) {
    w.line(header(name, signature));
    w.indent();
    for param in &signature.params {
        w.line(argument(param));
    }
    w.dedent();
    w.line("ZEND_END_ARG_INFO()");
}

/// Emits argument-info blocks, sharing identical signatures.
///
/// The first declaration with a given signature owns the block; later ones
/// become `#define` aliases of it.
pub struct ArginfoEmitter<'a> {
    share: bool,
    owners: FxHashMap<SignatureHash, Vec<(Identifier, &'a Signature)>>,
    blocks: usize,
    aliases: usize,
}

impl<'a> ArginfoEmitter<'a> {
    pub fn new(share: bool) -> Self {
        Self {
            share,
            owners: FxHashMap::default(),
            blocks: 0,
            aliases: 0,
        }
    }

    /// The block (or alias) for one declaration.
    pub fn emit(&mut self, name: Identifier, signature: &'a Signature) -> String {
        if self.share {
            let hash = SignatureHash::of(signature);
            let candidates = self.owners.entry(hash).or_default();
            if let Some((owner, _)) = candidates.iter().find(|(_, s)| *s == signature) {
                tracing::trace!(alias = %name, owner = %owner, "sharing argument info");
                self.aliases += 1;
                return format!("#define {name} {owner}\n");
            }
            candidates.push((name.clone(), signature));
        }

        tracing::trace!(arginfo = %name, "argument info block");
        let mut w = CWriter::new();
        write_block(&mut w, &name, signature);
        self.blocks += 1;
        w.finish()
    }

    /// Number of full blocks written.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Number of `#define` aliases written.
    pub fn aliases(&self) -> usize {
        self.aliases
    }
}
