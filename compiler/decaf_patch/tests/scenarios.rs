//! End-to-end transpile scenarios.
//!
//! Each case runs the full pipeline, normalize then main, over a complete
//! program and compares the rendered JavaScript.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use decaf_patch::{transpile, ModuleFormat, Options, Suggestion};
use pretty_assertions::assert_eq;

fn js(source: &str) -> String {
    js_with(source, &Options::default())
}

fn js_with(source: &str, options: &Options) -> String {
    match transpile(source, options) {
        Ok(output) => output.code,
        Err(err) => panic!("transpile failed:\n{}", err.render()),
    }
}

#[test]
fn statement_assignment_declares_in_place() {
    assert_eq!(js("a = 1"), "let a = 1;");
}

#[test]
fn name_read_before_assignment_is_declared_before_the_read() {
    assert_eq!(js("x?\nx = 1"), "let x;\nx != null;\nx = 1;");
    assert_eq!(js("n = n + 1"), "let n;\nn = n + 1;");
    assert_eq!(
        js("f = ->\n  log(n)\n  n = 1\n  n"),
        "let f = function() {\n  let n;\n  log(n);\n  n = 1;\n  return n;\n};"
    );
}

#[test]
fn assignment_used_as_argument_is_hoisted() {
    assert_eq!(js("a(b = 1)"), "let b;\na(b = 1);");
}

#[test]
fn chained_comparison_evaluates_middle_once() {
    assert_eq!(
        js("a < b() < c"),
        "let middle;\na < (middle = b()) && middle < c;"
    );
}

#[test]
fn postfix_forms_come_out_condition_first() {
    assert_eq!(js("a() if b"), "if (b) { a(); }");
    assert_eq!(js("a() until b"), "while (!b) { a(); }");
    assert_eq!(
        js("f = ->\n  return 1 if a\n  2"),
        "let f = function() {\n  if (a) { return 1; }\n  return 2;\n};"
    );
}

#[test]
fn sibling_temporaries_get_distinct_names() {
    assert_eq!(
        js("a < f() < c\nd < f() < e"),
        "let middle;\na < (middle = f()) && middle < c;\nlet middle1;\nd < (middle1 = f()) && middle1 < e;"
    );
}

#[test]
fn soaked_call_on_a_temporary() {
    assert_eq!(
        js("x = f()?.a"),
        "let ref;\nlet x = ((ref = f()) != null ? ref.a : undefined);"
    );
}

#[test]
fn class_style_constructor_function() {
    let source = "\
Point = (@x, @y) ->
  @length = Math.sqrt(@x * @x + @y * @y)
";
    let expected = "\
let Point = function(x, y) {
  this.x = x;
  this.y = y;
  return this.length = Math.sqrt(this.x * this.x + this.y * this.y);
};
";
    assert_eq!(js(source), expected);
}

#[test]
fn this_parameter_renamed_around_outer_reference() {
    assert_eq!(
        js("x = 1\nf = (@x) -> x"),
        "let x = 1;\nlet f = function(x1) { this.x = x1; return x; };"
    );
}

#[test]
fn module_program_with_helpers() {
    let options = Options::default().with_module_format(ModuleFormat::Esm);
    let source = "\
lib = require('lib')
wrap = (n, size) -> n %% size
module.exports = wrap
";
    let output = js_with(source, &options);
    assert!(output.starts_with(
        "import lib from 'lib';\nlet wrap = function(n, size) { return __mod__(n, size); };\nexport default wrap;\n"
    ));
    assert_eq!(output.matches("function __mod__").count(), 1);
}

#[test]
fn suggestions_are_reported_once() {
    let output = transpile("f = -> a\ng = -> b\nc = d?", &Options::default())
        .unwrap_or_else(|e| panic!("{}", e.render()));
    assert_eq!(
        output.suggestions,
        vec![Suggestion::ImplicitReturns, Suggestion::NullChecks]
    );
    assert_eq!(output.suggestions[0].code(), "DS102");
}
