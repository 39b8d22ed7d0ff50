//! Method forward declarations and per-class method-entry tables.

use zendgen_core::{ClassDecl, MethodDecl, mangle};

use super::access::AccessFlags;
use super::writer::CWriter;

/// `ZEND_METHOD(Complex_Foo, setFoo);`, or `None` for abstract methods, which
/// have no implementation.
pub fn forward_declaration(class: &ClassDecl, method: &MethodDecl) -> Option<String> {
    (!method.is_abstract()).then(|| {
        format!(
            "ZEND_METHOD({}, {});",
            mangle::mangle_name(&class.name),
            method.name
        )
    })
}

/// One table row.
pub fn entry(class: &ClassDecl, method: &MethodDecl) -> String {
    let class_id = mangle::mangle_name(&class.name);
    let arginfo = mangle::method_arginfo(&class.name, &method.name);
    let flags = AccessFlags::of_method(method).to_c_expr();
    if method.is_abstract() {
        format!(
            "ZEND_ABSTRACT_ME_WITH_FLAGS({class_id}, {}, {arginfo}, {flags})",
            method.name
        )
    } else {
        format!("ZEND_ME({class_id}, {}, {arginfo}, {flags})", method.name)
    }
}

/// Write `class_*_methods` for one class.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn write_method_table(w: &mut CWriter, class: &ClassDecl) {
    w.line(format!(
        "static const zend_function_entry {}[] = {{",
        mangle::methods_table(&class.name)
    ));
    w.indent();
    for method in &class.methods {
        w.line(entry(class, method));
    }
    w.line("ZEND_FE_END");
    w.dedent();
    w.line("};");
}
