//! Class-registration routines.
//!
//! Each class gets one `register_class_*` routine that initializes the class
//! entry, registers it with its parent, applies class flags, attaches
//! interfaces and declares every property:
//!
//! ```text
//! zval property_foo_default_value;
//! ZVAL_LONG(&property_foo_default_value, 100);
//! zend_string *property_foo_name = zend_string_init("foo", sizeof("foo") - 1, 1);
//! zend_string *property_foo_class_ArrayAccess = zend_string_init(...);
//! zend_type_list *property_foo_type_list = malloc(ZEND_TYPE_LIST_SIZE(1));
//! ...
//! zend_declare_typed_property(class_entry, property_foo_name, ...);
//! zend_string_release(property_foo_name);
//! zend_string_release(property_foo_class_ArrayAccess);
//! ```
//!
//! Class-name literals come from the build's [`InternTable`]. Every handle the
//! routine creates goes through an [`OwnershipLedger`], and the routine's text
//! is only returned once the ledger balances.

use zendgen_core::{
    ClassDecl, DefaultValue, InternTable, InternalError, PropertyDecl, QualifiedName, Type,
    mangle, types::format_float,
};

use super::access::AccessFlags;
use super::ledger::OwnershipLedger;
use super::writer::{CWriter, c_string_literal};

const DECLARE_PROPERTY: &str = "zend_declare_typed_property";

/// `zend_string_init(literal, sizeof(literal) - 1, 1)` for a persistent string.
fn string_init(value: &str) -> String {
    let literal = c_string_literal(value);
    format!("zend_string_init({literal}, sizeof({literal}) - 1, 1)")
}

/// Class handles the routine receives, in parameter order: parent, then
/// interfaces not already listed.
fn handle_params(class: &ClassDecl) -> Vec<&QualifiedName> {
    let mut params: Vec<&QualifiedName> = Vec::new();
    for supertype in class.supertypes() {
        if !params.iter().any(|p| p.folded() == supertype.folded()) {
            params.push(supertype);
        }
    }
    params
}

/// Write the registration routine for `class`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn emit_class_registration(
    class: &ClassDecl,
    interner: &InternTable,
) -> Result<String, InternalError> {
    let routine = mangle::register_class_fn(&class.name);
    let mut ledger = OwnershipLedger::new(routine.as_str());
    let mut w = CWriter::new();

    let params = handle_params(class);
    let param_list = if params.is_empty() {
        "void".to_string()
    } else {
        params
            .iter()
            .map(|p| format!("zend_class_entry *{}", mangle::class_entry_var(p)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    w.line(format!("static zend_class_entry *{routine}({param_list})"));
    w.line("{");
    w.indent();
    w.line("zend_class_entry ce, *class_entry;");
    w.blank();

    let methods = mangle::methods_table(&class.name);
    let short_name = c_string_literal(class.name.simple_name());
    if class.name.is_global() {
        w.line(format!("INIT_CLASS_ENTRY(ce, {short_name}, {methods});"));
    } else {
        let namespace = c_string_literal(&class.name.namespace_string());
        w.line(format!(
            "INIT_NS_CLASS_ENTRY(ce, {namespace}, {short_name}, {methods});"
        ));
    }

    let parent = class
        .parent
        .as_ref()
        .map_or_else(|| "NULL".to_string(), |p| mangle::class_entry_var(p).to_string());
    w.line(format!(
        "class_entry = zend_register_internal_class_ex(&ce, {parent});"
    ));

    let flags = AccessFlags::of_class(class);
    if !flags.is_empty() {
        w.line(format!("class_entry->ce_flags |= {};", flags.to_c_expr()));
    }

    if !class.interfaces.is_empty() {
        let interfaces: Vec<String> = class
            .interfaces
            .iter()
            .map(|i| mangle::class_entry_var(i).to_string())
            .collect();
        w.line(format!(
            "zend_class_implements(class_entry, {}, {});",
            interfaces.len(),
            interfaces.join(", ")
        ));
    }
    w.blank();

    for property in &class.properties {
        tracing::trace!(class = %class.name, property = %property.name, "declaring property");
        emit_property(&mut w, &mut ledger, interner, property)?;
        w.blank();
    }

    w.line("return class_entry;");
    w.dedent();
    w.line("}");

    ledger.check()?;
    tracing::trace!(
        routine = %routine,
        events = ledger.events().len(),
        acquired = ledger.acquired(),
        released = ledger.released(),
        "ownership balanced"
    );
    Ok(w.finish())
}

fn emit_property(
    w: &mut CWriter,
    ledger: &mut OwnershipLedger,
    interner: &InternTable,
    property: &PropertyDecl,
) -> Result<(), InternalError> {
    let prefix = format!("property_{}", property.name);
    let default_var = format!("{prefix}_default_value");
    let name_var = format!("{prefix}_name");
    let type_var = format!("{prefix}_type");

    // Default value.
    w.line(format!("zval {default_var};"));
    match &property.default {
        None if property.ty.is_some() => w.line(format!("ZVAL_UNDEF(&{default_var});")),
        None | Some(DefaultValue::Null) => w.line(format!("ZVAL_NULL(&{default_var});")),
        Some(DefaultValue::Bool(true)) => w.line(format!("ZVAL_TRUE(&{default_var});")),
        Some(DefaultValue::Bool(false)) => w.line(format!("ZVAL_FALSE(&{default_var});")),
        Some(DefaultValue::Int(value)) => w.line(format!(
            "ZVAL_LONG(&{default_var}, {});",
            c_long(*value)
        )),
        Some(DefaultValue::Float(value)) => w.line(format!(
            "ZVAL_DOUBLE(&{default_var}, {});",
            c_double(value.0)
        )),
        Some(DefaultValue::ArrayEmpty) => w.line(format!("ZVAL_EMPTY_ARRAY(&{default_var});")),
        Some(DefaultValue::String(value)) => {
            let str_var = format!("{default_var}_str");
            w.line(format!("zend_string *{str_var} = {};", string_init(value)));
            ledger.alloc(&str_var);
            w.line(format!("ZVAL_STR(&{default_var}, {str_var});"));
            ledger.transfer(&str_var, &default_var);
        }
        Some(DefaultValue::ClassConstant { class, constant }) => {
            return Err(InternalError::Unvalidated(format!(
                "property ${} has class-constant default {class}::{constant}",
                property.name
            )));
        }
    }

    // Name handle.
    w.line(format!(
        "zend_string *{name_var} = {};",
        string_init(&property.name)
    ));
    ledger.acquire(&name_var);

    // Type.
    let class_vars = emit_property_type(
        w,
        ledger,
        interner,
        &prefix,
        &type_var,
        property.ty.as_ref(),
    )?;

    // Declaration.
    w.line(format!(
        "{DECLARE_PROPERTY}(class_entry, {name_var}, &{default_var}, {}, NULL, {type_var});",
        AccessFlags::of_property(property).to_c_expr()
    ));
    ledger.consume(&name_var, DECLARE_PROPERTY);

    w.line(format!("zend_string_release({name_var});"));
    ledger.release(&name_var);
    for class_var in &class_vars {
        w.line(format!("zend_string_release({class_var});"));
        ledger.release(class_var);
    }

    Ok(())
}

/// Write the `zend_type` for a property. Returns the class-name handles that
/// must be released after the declaration.
fn emit_property_type(
    w: &mut CWriter,
    ledger: &mut OwnershipLedger,
    interner: &InternTable,
    prefix: &str,
    type_var: &str,
    ty: Option<&Type>,
) -> Result<Vec<String>, InternalError> {
    let Some(ty) = ty else {
        w.line(format!("zend_type {type_var} = (zend_type) ZEND_TYPE_INIT_NONE(0);"));
        return Ok(Vec::new());
    };

    let classes = ty.class_refs();
    let mut class_vars = Vec::with_capacity(classes.len());
    for class in classes {
        let name = class.to_string();
        let symbol = interner.get(&name).ok_or_else(|| {
            InternalError::Unvalidated(format!("class {name} was never interned"))
        })?;
        let class_var = format!("{prefix}_class_{}", mangle::mangle_name(class));
        w.line(format!(
            "zend_string *{class_var} = {};",
            string_init(interner.resolve(symbol))
        ));
        ledger.acquire(&class_var);
        class_vars.push(class_var);
    }

    match ty {
        Type::Scalar(_) => {
            w.line(format!(
                "zend_type {type_var} = (zend_type) ZEND_TYPE_INIT_MASK({});",
                ty.mask().to_c_expr()
            ));
        }
        Type::ClassRef(_) => {
            let class_var = &class_vars[0];
            w.line(format!(
                "zend_type {type_var} = (zend_type) ZEND_TYPE_INIT_CLASS(zend_string_copy({class_var}), 0, 0);"
            ));
            ledger.consume(class_var, "ZEND_TYPE_INIT_CLASS");
        }
        Type::Union(union) if union.is_empty() => {
            return Err(InternalError::Unvalidated(format!(
                "empty union type on {prefix}"
            )));
        }
        Type::Union(union) if union.class_count() == 0 => {
            w.line(format!(
                "zend_type {type_var} = (zend_type) ZEND_TYPE_INIT_MASK({});",
                union.full_mask().to_c_expr()
            ));
        }
        Type::Union(union) => {
            let list_var = format!("{prefix}_type_list");
            let count = union.class_count();
            w.line(format!(
                "zend_type_list *{list_var} = malloc(ZEND_TYPE_LIST_SIZE({count}));"
            ));
            ledger.alloc(&list_var);
            w.line(format!("{list_var}->num_types = {count};"));
            for (index, class_var) in class_vars.iter().enumerate() {
                w.line(format!(
                    "{list_var}->types[{index}] = (zend_type) ZEND_TYPE_INIT_CLASS(zend_string_copy({class_var}), 0, 0);"
                ));
                ledger.consume(class_var, "ZEND_TYPE_INIT_CLASS");
            }
            w.line(format!(
                "zend_type {type_var} = ZEND_TYPE_INIT_UNION({list_var}, {});",
                union.full_mask().to_c_expr()
            ));
            ledger.transfer(&list_var, type_var);
        }
    }

    Ok(class_vars)
}

/// A C `zend_long` expression for `value`. The most negative value has no
/// literal form in C.
fn c_long(value: i64) -> String {
    if value == i64::MIN {
        "ZEND_LONG_MIN".to_string()
    } else {
        value.to_string()
    }
}

/// A C `double` expression for `value`.
fn c_double(value: f64) -> String {
    if value.is_nan() {
        "ZEND_NAN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "ZEND_INFINITY".to_string()
        } else {
            "-ZEND_INFINITY".to_string()
        }
    } else {
        format_float(value)
    }
}
