//! Function forward declarations and the per-namespace function-entry tables.

use zendgen_core::{FunctionDecl, Identifier, mangle};

use super::writer::{CWriter, c_string_literal};

/// `ZEND_FUNCTION(Complex_say_hello);`
pub fn forward_declaration(function: &FunctionDecl) -> String {
    format!("ZEND_FUNCTION({});", mangle::mangle_name(&function.name))
}

/// One table row: `ZEND_NS_FALIAS` for namespaced functions, `ZEND_FE` for
/// global ones.
pub fn entry(function: &FunctionDecl) -> String {
    let arginfo = mangle::function_arginfo(&function.name);
    if function.name.is_global() {
        format!("ZEND_FE({}, {arginfo})", function.name.simple_name())
    } else {
        format!(
            "ZEND_NS_FALIAS({}, {}, {}, {arginfo})",
            c_string_literal(&function.name.namespace_string()),
            function.name.simple_name(),
            mangle::mangle_name(&function.name),
        )
    }
}

/// Write the table `name`, listing `functions` in declaration order.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn write_function_table<'a>(
    w: &mut CWriter,
    name: &Identifier,
    functions: impl IntoIterator<Item = &'a FunctionDecl>,
) {
    w.line(format!("static const zend_function_entry {name}[] = {{"));
    w.indent();
    for function in functions {
        w.line(entry(function));
    }
    w.line("ZEND_FE_END");
    w.dedent();
    w.line("};");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_and_global_entries() {
        let namespaced = FunctionDecl::new("Complex\\say_hello");
        let global = FunctionDecl::new("hello");
        let nested = FunctionDecl::new("A\\B\\run");

        assert_eq!(forward_declaration(&namespaced), "ZEND_FUNCTION(Complex_say_hello);");
        assert_eq!(
            entry(&namespaced),
            "ZEND_NS_FALIAS(\"Complex\", say_hello, Complex_say_hello, arginfo_Complex_say_hello)"
        );
        assert_eq!(entry(&global), "ZEND_FE(hello, arginfo_hello)");
        assert_eq!(
            entry(&nested),
            "ZEND_NS_FALIAS(\"A\\\\B\", run, A_B_run, arginfo_A_B_run)"
        );
    }

    #[test]
    fn table_keeps_declaration_order() {
        let functions = [
            FunctionDecl::new("Complex\\say_hello"),
            FunctionDecl::new("Complex\\throw_exception"),
        ];
        let mut w = CWriter::new();
        write_function_table(&mut w, &Identifier::new("ext_functions"), &functions);
        assert_eq!(
            w.finish(),
            "static const zend_function_entry ext_functions[] = {\n\
             \tZEND_NS_FALIAS(\"Complex\", say_hello, Complex_say_hello, arginfo_Complex_say_hello)\n\
             \tZEND_NS_FALIAS(\"Complex\", throw_exception, Complex_throw_exception, arginfo_Complex_throw_exception)\n\
             \tZEND_FE_END\n\
             };\n"
        );
    }

    #[test]
    fn empty_table_still_terminates() {
        let mut w = CWriter::new();
        write_function_table(&mut w, &Identifier::new("ext_functions"), &[]);
        assert_eq!(
            w.finish(),
            "static const zend_function_entry ext_functions[] = {\n\tZEND_FE_END\n};\n"
        );
    }
}
