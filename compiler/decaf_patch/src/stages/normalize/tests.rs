use super::*;
use crate::options::Options;
use crate::runner::run_stage;
use pretty_assertions::assert_eq;

fn normalize(source: &str) -> String {
    let parsed = decaf_parse::parse(source).unwrap_or_else(|e| panic!("{e}"));
    run_stage::<NormalizeStage>(source, &parsed, &Options::default())
        .unwrap_or_else(|e| panic!("{e}"))
        .code
}

#[test]
fn test_passthrough_leaves_text_alone() {
    let source = "a = b(c)\nif a then b else c\n";
    assert_eq!(normalize(source), source);
}

#[test]
fn test_postfix_conditionals_become_prefix() {
    assert_eq!(normalize("a() if b\n"), "if b then a()\n");
    assert_eq!(normalize("a = 1 unless b"), "unless b then a = 1");
    assert_eq!(normalize("return a if b"), "if b then return a");
    assert_eq!(normalize("(a) if b"), "if b then (a)");
}

#[test]
fn test_postfix_loops_become_prefix() {
    assert_eq!(normalize("a() while b"), "while b then a()");
    assert_eq!(normalize("a() until b"), "until b then a()");
}

#[test]
fn test_nested_postfix_forms_unwind_outward() {
    assert_eq!(normalize("a if b if c"), "if c then if b then a");
}

#[test]
fn test_loop_becomes_while_true() {
    assert_eq!(normalize("loop\n  a()\n"), "while true\n  a()\n");
}

#[test]
fn test_soaked_member_access() {
    assert_eq!(normalize("x?.a.b"), "(if x? then x.a.b)");
    assert_eq!(normalize("x?[i]"), "(if x? then x[i])");
}

#[test]
fn test_soaked_call_checks_for_a_function() {
    assert_eq!(
        normalize("f?(a)"),
        "(if typeof f is 'function' then f(a))"
    );
}

#[test]
fn test_non_repeatable_base_is_captured() {
    assert_eq!(normalize("f()?.a"), "(if (ref = f())? then ref.a)");
}

#[test]
fn test_temporaries_avoid_existing_names() {
    assert_eq!(
        normalize("ref = 1\nf()?.a"),
        "ref = 1\n(if (ref1 = f())? then ref1.a)"
    );
}

#[test]
fn test_sibling_soaks_claim_distinct_temporaries() {
    assert_eq!(
        normalize("f()?.a\ng()?.b"),
        "(if (ref = f())? then ref.a)\n(if (ref1 = g())? then ref1.b)"
    );
}

#[test]
fn test_chained_soaks_nest() {
    assert_eq!(
        normalize("a?.b?.c"),
        "(if (ref = (if a? then a.b))? then ref.c)"
    );
}

#[test]
fn test_soaks_inside_arguments() {
    assert_eq!(
        normalize("f?(a?.b)"),
        "(if typeof f is 'function' then f((if a? then a.b)))"
    );
}

#[test]
fn test_soak_inside_postfix_body() {
    assert_eq!(normalize("a?.b if c"), "if c then (if a? then a.b)");
}

#[test]
fn test_this_shorthand_is_repeatable() {
    assert_eq!(normalize("@x?.y"), "(if @x? then @x.y)");
}
