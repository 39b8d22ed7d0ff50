// tests/generation_tests.rs
//! End-to-end tests for header generation.
//!
//! These tests run the whole pipeline and check the emitted C text: exact
//! output for the reference extensions, plus structural properties that must
//! hold for any input (ordering, type-list sizes, handle balance).

use zendgen::prelude::*;
use zendgen::{GeneratorConfig, generate};

/// Expected C text written with four-space indents; converts them to tabs.
fn c_text(text: &str) -> String {
    let mut out = String::new();
    for line in text.strip_prefix('\n').unwrap_or(text).lines() {
        let body = line.trim_start_matches("    ");
        let depth = (line.len() - body.len()) / 4;
        out.push_str(&"\t".repeat(depth));
        out.push_str(body);
        out.push('\n');
    }
    out
}

fn plain() -> GeneratorConfig {
    GeneratorConfig::new().header_comment(false)
}

fn generate_text(builder: ExtensionBuilder) -> String {
    generate(builder, plain())
        .unwrap_or_else(|e| panic!("generation failed: {e}"))
        .text
}

fn say_hello() -> FunctionDecl {
    FunctionDecl::new("Complex\\say_hello")
        .with_param(Parameter::typed("name", ScalarKind::String))
        .returns(ScalarKind::String)
}

fn foo_class() -> ClassDecl {
    ClassDecl::new("Complex\\Foo")
        .with_flags(ClassFlags::NO_DYNAMIC_PROPERTIES)
        .with_method(MethodDecl::new("getFoo").returns(ScalarKind::String))
        .with_method(
            MethodDecl::new("setFoo")
                .with_param(Parameter::typed("foo", ScalarKind::String))
                .returns(ScalarKind::Void),
        )
        .with_property(
            PropertyDecl::new("foo")
                .with_type(
                    UnionType::new()
                        .with_class("JsonSerializable")
                        .with_class("ArrayAccess")
                        .with_scalar(ScalarKind::Int),
                )
                .with_default(DefaultValue::Int(100))
                .with_visibility(Visibility::Private),
        )
}

/// A class with one property per type shape.
fn property_zoo() -> ClassDecl {
    ClassDecl::new("Zoo\\Pen")
        .with_property(PropertyDecl::new("plain"))
        .with_property(PropertyDecl::new("count").with_type(ScalarKind::Int))
        .with_property(
            PropertyDecl::new("label")
                .with_type(ScalarKind::String)
                .with_default(DefaultValue::string("pen")),
        )
        .with_property(PropertyDecl::new("owner").with_type(Type::class("Zoo\\Keeper")))
        .with_property(
            PropertyDecl::new("mate")
                .with_type(Type::nullable(Type::class("Zoo\\Pen")))
                .with_default(DefaultValue::Null),
        )
        .with_property(
            PropertyDecl::new("feed").with_type(
                UnionType::new()
                    .with_class("Zoo\\Hay")
                    .with_class("Zoo\\Meat")
                    .with_class("Zoo\\Fish")
                    .with_scalar(ScalarKind::String)
                    .nullable(),
            ),
        )
}

// ============================================================================
// Reference outputs
// ============================================================================

#[test]
fn test_say_hello_function() {
    let text = generate_text(ExtensionBuilder::new("Complex").function(say_hello()));

    let expected = c_text(
        r#"
ZEND_BEGIN_ARG_WITH_RETURN_TYPE_INFO_EX(arginfo_Complex_say_hello, 0, 1, IS_STRING, 0)
    ZEND_ARG_TYPE_INFO(0, name, IS_STRING, 0)
ZEND_END_ARG_INFO()

ZEND_FUNCTION(Complex_say_hello);

static const zend_function_entry ext_functions[] = {
    ZEND_NS_FALIAS("Complex", say_hello, Complex_say_hello, arginfo_Complex_say_hello)
    ZEND_FE_END
};
"#,
    );
    assert_eq!(text, expected);
}

#[test]
fn test_union_property_class() {
    let text = generate_text(ExtensionBuilder::new("Complex").class(foo_class()));

    let expected = c_text(
        r#"
ZEND_BEGIN_ARG_WITH_RETURN_TYPE_INFO_EX(arginfo_class_Complex_Foo_getFoo, 0, 0, IS_STRING, 0)
ZEND_END_ARG_INFO()

ZEND_BEGIN_ARG_WITH_RETURN_TYPE_INFO_EX(arginfo_class_Complex_Foo_setFoo, 0, 1, IS_VOID, 0)
    ZEND_ARG_TYPE_INFO(0, foo, IS_STRING, 0)
ZEND_END_ARG_INFO()

ZEND_METHOD(Complex_Foo, getFoo);
ZEND_METHOD(Complex_Foo, setFoo);

static const zend_function_entry ext_functions[] = {
    ZEND_FE_END
};

static const zend_function_entry class_Complex_Foo_methods[] = {
    ZEND_ME(Complex_Foo, getFoo, arginfo_class_Complex_Foo_getFoo, ZEND_ACC_PUBLIC)
    ZEND_ME(Complex_Foo, setFoo, arginfo_class_Complex_Foo_setFoo, ZEND_ACC_PUBLIC)
    ZEND_FE_END
};

static zend_class_entry *register_class_Complex_Foo(void)
{
    zend_class_entry ce, *class_entry;

    INIT_NS_CLASS_ENTRY(ce, "Complex", "Foo", class_Complex_Foo_methods);
    class_entry = zend_register_internal_class_ex(&ce, NULL);
    class_entry->ce_flags |= ZEND_ACC_NO_DYNAMIC_PROPERTIES;

    zval property_foo_default_value;
    ZVAL_LONG(&property_foo_default_value, 100);
    zend_string *property_foo_name = zend_string_init("foo", sizeof("foo") - 1, 1);
    zend_string *property_foo_class_JsonSerializable = zend_string_init("JsonSerializable", sizeof("JsonSerializable") - 1, 1);
    zend_string *property_foo_class_ArrayAccess = zend_string_init("ArrayAccess", sizeof("ArrayAccess") - 1, 1);
    zend_type_list *property_foo_type_list = malloc(ZEND_TYPE_LIST_SIZE(2));
    property_foo_type_list->num_types = 2;
    property_foo_type_list->types[0] = (zend_type) ZEND_TYPE_INIT_CLASS(zend_string_copy(property_foo_class_JsonSerializable), 0, 0);
    property_foo_type_list->types[1] = (zend_type) ZEND_TYPE_INIT_CLASS(zend_string_copy(property_foo_class_ArrayAccess), 0, 0);
    zend_type property_foo_type = ZEND_TYPE_INIT_UNION(property_foo_type_list, MAY_BE_LONG);
    zend_declare_typed_property(class_entry, property_foo_name, &property_foo_default_value, ZEND_ACC_PRIVATE, NULL, property_foo_type);
    zend_string_release(property_foo_name);
    zend_string_release(property_foo_class_JsonSerializable);
    zend_string_release(property_foo_class_ArrayAccess);

    return class_entry;
}
"#,
    );
    assert_eq!(text, expected);
}

#[test]
fn test_scalar_bits_kept_beside_class_list() {
    // The scalar part of a union never changes the type-list size, and the
    // class list never drops the scalar bits.
    let class = ClassDecl::new("Complex\\Foo").with_property(
        PropertyDecl::new("foo").with_type(
            UnionType::new()
                .with_class("JsonSerializable")
                .with_scalar(ScalarKind::Int)
                .with_scalar(ScalarKind::String)
                .nullable(),
        ),
    );
    let text = generate_text(ExtensionBuilder::new("Complex").class(class));

    assert!(text.contains("malloc(ZEND_TYPE_LIST_SIZE(1));"));
    assert!(text.contains("property_foo_type_list->num_types = 1;"));
    assert!(text.contains(
        "ZEND_TYPE_INIT_UNION(property_foo_type_list, MAY_BE_STRING|MAY_BE_LONG|MAY_BE_NULL);"
    ));
}

// ============================================================================
// Structural properties
// ============================================================================

#[test]
fn test_union_list_size_matches_class_count() {
    let names = ["A", "B", "C", "D"];
    for count in 1..=names.len() {
        let mut union = UnionType::new().with_scalar(ScalarKind::Float);
        for name in &names[..count] {
            union = union.with_class(*name);
        }
        let class = ClassDecl::new("Holder").with_property(PropertyDecl::new("v").with_type(union));
        let text = generate_text(ExtensionBuilder::new("").class(class));

        assert!(text.contains(&format!("malloc(ZEND_TYPE_LIST_SIZE({count}));")));
        assert!(text.contains(&format!("property_v_type_list->num_types = {count};")));
        let slots = text.matches("property_v_type_list->types[").count();
        assert_eq!(slots, count, "type-list slots for {count} classes");
        for (index, name) in names[..count].iter().enumerate() {
            assert!(text.contains(&format!(
                "property_v_type_list->types[{index}] = (zend_type) ZEND_TYPE_INIT_CLASS(zend_string_copy(property_v_class_{name}), 0, 0);"
            )));
        }
    }
}

#[test]
fn test_every_handle_released_once_after_declaration() {
    let text = generate_text(ExtensionBuilder::new("Zoo").class(property_zoo()));

    let acquired: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("zend_string *") && !l.contains("_default_value_str"))
        .filter_map(|l| l.strip_prefix("zend_string *")?.split(' ').next())
        .collect();
    let released = text.matches("zend_string_release(").count();
    assert_eq!(acquired.len(), released);
    assert_eq!(acquired.len(), 6 + 1 + 1 + 3);

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    for handle in &acquired {
        let property = handle
            .strip_prefix("property_")
            .and_then(|rest| rest.split('_').next())
            .unwrap();
        let declare = lines
            .iter()
            .position(|l| {
                l.starts_with("zend_declare_typed_property(")
                    && l.contains(&format!("property_{property}_name,"))
            })
            .unwrap();
        let release_line = format!("zend_string_release({handle});");
        let releases: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == release_line)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(releases.len(), 1, "{handle} released once");
        assert!(releases[0] > declare, "{handle} released after declaration");
    }
}

#[test]
fn test_output_follows_declaration_order() {
    let builder = ExtensionBuilder::new("Order")
        .function(FunctionDecl::new("Order\\zeta"))
        .function(FunctionDecl::new("Order\\alpha"))
        .function(FunctionDecl::new("mu"))
        .class(ClassDecl::new("Order\\Second").with_method(MethodDecl::new("b")))
        .class(ClassDecl::new("Order\\First").with_method(MethodDecl::new("a")));
    let text = generate_text(builder);

    let order = |needles: &[&str]| {
        let positions: Vec<usize> = needles
            .iter()
            .map(|n| text.find(n).unwrap_or_else(|| panic!("missing {n}")))
            .collect();
        positions.windows(2).all(|w| w[0] < w[1])
    };

    assert!(order(&[
        "ZEND_FUNCTION(Order_zeta);",
        "ZEND_FUNCTION(Order_alpha);",
        "ZEND_FUNCTION(mu);",
    ]));
    assert!(order(&[
        "ZEND_NS_FALIAS(\"Order\", zeta,",
        "ZEND_NS_FALIAS(\"Order\", alpha,",
        "ZEND_FE(mu, arginfo_mu)",
    ]));
    assert!(order(&[
        "class_Order_Second_methods[] = {",
        "class_Order_First_methods[] = {",
        "register_class_Order_Second(void)",
        "register_class_Order_First(void)",
    ]));
}

#[test]
fn test_swapping_independent_declarations_swaps_their_blocks() {
    let greet = || {
        FunctionDecl::new("Shop\\greet")
            .with_param(Parameter::typed("name", ScalarKind::String))
            .returns(ScalarKind::String)
    };
    let total = || {
        FunctionDecl::new("Shop\\total")
            .with_param(Parameter::typed("items", ScalarKind::Array))
            .returns(ScalarKind::Float)
    };
    let cart = || {
        ClassDecl::new("Shop\\Cart")
            .with_method(MethodDecl::new("count").returns(ScalarKind::Int))
            .with_property(PropertyDecl::new("items").with_type(ScalarKind::Array))
    };
    let item = || {
        ClassDecl::new("Shop\\Item")
            .with_property(PropertyDecl::new("price").with_type(ScalarKind::Float))
    };

    let forward = generate_text(
        ExtensionBuilder::new("Shop")
            .function(greet())
            .function(total())
            .class(cart())
            .class(item()),
    );
    let swapped = generate_text(
        ExtensionBuilder::new("Shop")
            .function(total())
            .function(greet())
            .class(item())
            .class(cart()),
    );

    fn sorted_lines(text: &str) -> Vec<&str> {
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        lines
    }
    assert_ne!(forward, swapped);
    assert_eq!(sorted_lines(&forward), sorted_lines(&swapped));

    for needles in [
        ["arginfo_Shop_greet,", "arginfo_Shop_total,"],
        ["ZEND_FUNCTION(Shop_greet);", "ZEND_FUNCTION(Shop_total);"],
        ["ZEND_NS_FALIAS(\"Shop\", greet,", "ZEND_NS_FALIAS(\"Shop\", total,"],
        ["class_Shop_Cart_methods[] = {", "class_Shop_Item_methods[] = {"],
        ["register_class_Shop_Cart(void)", "register_class_Shop_Item(void)"],
    ] {
        let [first, second] = needles;
        assert!(forward.find(first).unwrap() < forward.find(second).unwrap());
        assert!(swapped.find(first).unwrap() > swapped.find(second).unwrap());
    }
}

#[test]
fn test_identical_signatures_share_arginfo() {
    let builder = ExtensionBuilder::new("Complex")
        .function(say_hello())
        .function(
            FunctionDecl::new("Complex\\say_goodbye")
                .with_param(Parameter::typed("name", ScalarKind::String))
                .returns(ScalarKind::String),
        );

    let shared = generate_text(builder.clone());
    assert!(shared.contains("#define arginfo_Complex_say_goodbye arginfo_Complex_say_hello\n"));

    let unshared = generate(builder, plain().share_arginfo(false)).unwrap().text;
    assert!(!unshared.contains("#define"));
    assert_eq!(unshared.matches("ZEND_END_ARG_INFO()").count(), 2);
}

#[test]
fn test_generation_is_deterministic() {
    let build = || {
        ExtensionBuilder::new("Zoo")
            .function(say_hello())
            .class(foo_class())
            .class(property_zoo())
    };

    let first = generate_text(build());
    let second = generate_text(build());
    assert_eq!(first, second);

    let verified = generate(build(), plain().verify_determinism(true)).unwrap();
    assert_eq!(verified.text, first);
}

#[test]
fn test_banner_is_optional() {
    let with = generate(ExtensionBuilder::new(""), GeneratorConfig::default())
        .unwrap()
        .text;
    let without = generate_text(ExtensionBuilder::new(""));
    assert!(with.starts_with("/* This is a generated file"));
    assert!(with.ends_with(&without));
}
