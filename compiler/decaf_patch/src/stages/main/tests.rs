use super::*;
use crate::error::PatchError;
use crate::helpers::{IN_HELPER, MOD_HELPER};
use crate::options::{ModuleFormat, Options};
use crate::runner::{run_stage, StageOutput};
use pretty_assertions::assert_eq;

fn run(source: &str, options: &Options) -> Result<StageOutput, PatchError> {
    let parsed = decaf_parse::parse(source).unwrap_or_else(|e| panic!("{e}"));
    run_stage::<MainStage>(source, &parsed, options)
}

fn js(source: &str) -> String {
    run(source, &Options::default())
        .unwrap_or_else(|e| panic!("{e}"))
        .code
}

fn js_with(source: &str, options: &Options) -> String {
    run(source, options).unwrap_or_else(|e| panic!("{e}")).code
}

fn suggestions(source: &str) -> Vec<Suggestion> {
    run(source, &Options::default())
        .unwrap_or_else(|e| panic!("{e}"))
        .suggestions
}

fn error(source: &str) -> PatchError {
    match run(source, &Options::default()) {
        Ok(output) => panic!("expected an error, got {:?}", output.code),
        Err(err) => err,
    }
}

// Declarations

#[test]
fn test_top_level_assignment_declares_inline() {
    assert_eq!(js("a = 1"), "let a = 1;");
    assert_eq!(js("a = 1\na = 2"), "let a = 1;\na = 2;");
}

#[test]
fn test_assignment_in_expression_is_hoisted() {
    assert_eq!(js("a(b = 1)"), "let b;\na(b = 1);");
    assert_eq!(suggestions("a(b = 1)"), vec![Suggestion::InlineAssignments]);
}

#[test]
fn test_assignment_in_nested_block_is_hoisted() {
    assert_eq!(js("if x\n  a = 1"), "let a;\nif (x) {\n  a = 1;\n}");
}

#[test]
fn test_compound_assignment_declaration_is_hoisted() {
    assert_eq!(js("a += 1"), "let a;\na += 1;");
}

// Statements

#[test]
fn test_separators_become_terminators() {
    assert_eq!(js("a(); b()"), "a(); b();");
    assert_eq!(js("a()\nb()\n"), "a();\nb();\n");
}

#[test]
fn test_object_literal_statement_is_parenthesized() {
    assert_eq!(js("{a: 1}"), "({a: 1});");
}

#[test]
fn test_return_and_throw_pass_through() {
    assert_eq!(js("throw new Error('x')"), "throw new Error('x');");
    assert_eq!(
        js("f = ->\n  return 1"),
        "let f = function() {\n  return 1;\n};"
    );
}

// Conditionals

#[test]
fn test_inline_if() {
    assert_eq!(js("if a then b()"), "if (a) { b(); }");
}

#[test]
fn test_block_if_else() {
    assert_eq!(
        js("if a\n  b()\nelse\n  c()"),
        "if (a) {\n  b();\n} else {\n  c();\n}"
    );
}

#[test]
fn test_else_if_chain() {
    assert_eq!(
        js("if a then b() else if c then d() else e()"),
        "if (a) { b(); } else if (c) { d(); } else { e(); }"
    );
}

#[test]
fn test_unless_negates_condition() {
    assert_eq!(js("unless a then b()"), "if (!a) { b(); }");
    assert_eq!(js("unless a and b then c()"), "if (!(a && b)) { c(); }");
}

#[test]
fn test_parenthesized_condition_keeps_its_parens() {
    assert_eq!(js("if (a) then b()"), "if (a) { b(); }");
}

#[test]
fn test_conditional_expression() {
    assert_eq!(js("x = if a then b else c"), "let x = (a ? b : c);");
    assert_eq!(js("x = if a then b"), "let x = (a ? b : undefined);");
}

#[test]
fn test_parenthesized_conditional_statement_is_an_expression() {
    assert_eq!(js("(if a then b)"), "(a ? b : undefined);");
}

#[test]
fn test_multi_statement_conditional_expression_is_an_error() {
    let err = error("x = if a\n  b\n  c");
    assert_eq!(err.code(), decaf_diagnostic::ErrorCode::E9001);
}

// Loops

#[test]
fn test_while_loops() {
    assert_eq!(js("while a then b()"), "while (a) { b(); }");
    assert_eq!(js("until a\n  b()"), "while (!a) {\n  b();\n}");
    assert_eq!(js("while true\n  b()"), "while (true) {\n  b();\n}");
}

#[test]
fn test_loop_as_value_is_an_error() {
    assert!(matches!(
        error("x = while a then b"),
        PatchError::Unsupported { .. }
    ));
    assert!(matches!(
        error("f = ->\n  while a\n    b()"),
        PatchError::Unsupported { .. }
    ));
}

#[test]
fn test_soak_reaching_main_is_an_error() {
    assert!(matches!(error("a?.b"), PatchError::Unsupported { .. }));
}

// Functions

#[test]
fn test_function_headers() {
    assert_eq!(js("f = -> 1"), "let f = function() { return 1; };");
    assert_eq!(js("f = (a) => a"), "let f = (a) => { return a; };");
    assert_eq!(js("f = ->"), "let f = function() {};");
}

#[test]
fn test_block_function() {
    assert_eq!(
        js("f = (a, b) ->\n  a + b"),
        "let f = function(a, b) {\n  return a + b;\n};"
    );
    assert_eq!(suggestions("f = -> 1"), vec![Suggestion::ImplicitReturns]);
}

#[test]
fn test_bound_function_without_parameters() {
    assert_eq!(js("f = =>\n  @x"), "let f = () => {\n  return this.x;\n};");
}

#[test]
fn test_function_statement_is_parenthesized() {
    assert_eq!(js("-> a"), "(function() { return a; });");
}

#[test]
fn test_implicit_return_through_conditional() {
    assert_eq!(
        js("f = ->\n  if a\n    b\n  else\n    c"),
        "let f = function() {\n  if (a) {\n    return b;\n  } else {\n    return c;\n  }\n};"
    );
}

#[test]
fn test_function_body_declarations() {
    assert_eq!(
        js("f = ->\n  a = 1\n  a"),
        "let f = function() {\n  let a = 1;\n  return a;\n};"
    );
    assert_eq!(
        js("f = -> a = 1"),
        "let f = function() { let a; return a = 1; };"
    );
}

#[test]
fn test_this_parameters() {
    assert_eq!(js("f = (@a) ->"), "let f = function(a) { this.a = a; };");
    assert_eq!(
        js("f = (@a) -> @a"),
        "let f = function(a) { this.a = a; return this.a; };"
    );
    assert_eq!(
        js("f = (@a) ->\n  b()"),
        "let f = function(a) {\n  this.a = a;\n  return b();\n};"
    );
}

#[test]
fn test_this_parameter_avoids_captured_names() {
    assert_eq!(
        js("f = (@a) -> a"),
        "let f = function(a1) { this.a = a1; return a; };"
    );
}

#[test]
fn test_default_parameters() {
    assert_eq!(
        js("f = (a = 1) -> a"),
        "let f = function(a) { if (a == null) { a = 1; } return a; };"
    );
    let loose = Options::default().with_loose_default_params(true);
    assert_eq!(
        js_with("f = (a = 1) -> a", &loose),
        "let f = function(a = 1) { return a; };"
    );
}

#[test]
fn test_defaults_come_before_this_assignments() {
    assert_eq!(
        js("f = (@a, b = 2) ->"),
        "let f = function(a, b) { if (b == null) { b = 2; } this.a = a; };"
    );
}

#[test]
fn test_parenthesized_conditional_as_return_value() {
    assert_eq!(
        js("f = (a) -> (if a? then a.b)"),
        "let f = function(a) { return (a != null ? a.b : undefined); };"
    );
}

// Operators

#[test]
fn test_chained_comparison_with_temporary() {
    assert_eq!(
        js("a < b() < c"),
        "let middle;\na < (middle = b()) && middle < c;"
    );
}

#[test]
fn test_chained_comparison_of_repeatable_operand() {
    assert_eq!(js("a < b < c"), "a < b && b < c;");
    assert_eq!(js("a is b is c"), "a === b && b === c;");
}

#[test]
fn test_word_operators() {
    assert_eq!(
        js("a = 1\nb = a is 2 and a isnt 3 or not a"),
        "let a = 1;\nlet b = a === 2 && a !== 3 || !a;"
    );
    assert_eq!(js("x = a == b"), "let x = a === b;");
}

#[test]
fn test_literal_spellings() {
    assert_eq!(js("x = yes; y = off"), "let x = true; let y = false;");
    assert_eq!(js("x = @"), "let x = this;");
    assert_eq!(js("x = @y"), "let x = this.y;");
}

#[test]
fn test_helper_operators() {
    assert_eq!(
        js("x = a %% b"),
        format!("let x = __mod__(a, b);\n\n{}\n", MOD_HELPER.1)
    );
    assert_eq!(
        js("x = a in b"),
        format!("let x = __in__(a, b);\n\n{}\n", IN_HELPER.1)
    );
}

#[test]
fn test_helper_is_emitted_once() {
    assert_eq!(
        js("x = a %% b\ny = c %% d\n"),
        format!(
            "let x = __mod__(a, b);\nlet y = __mod__(c, d);\n\n{}\n",
            MOD_HELPER.1
        )
    );
}

#[test]
fn test_exists_operator() {
    assert_eq!(js("a = 1\nb = a?"), "let a = 1;\nlet b = a != null;");
    assert_eq!(
        js("b = a?"),
        "let b = typeof a !== 'undefined' && a !== null;"
    );
    assert_eq!(js("a = 1\nb = not a?"), "let a = 1;\nlet b = !(a != null);");
    assert_eq!(suggestions("a = 1\nb = a?"), vec![Suggestion::NullChecks]);
}

#[test]
fn test_existential_operator() {
    assert_eq!(
        js("a = 1\nb = a ? c"),
        "let a = 1;\nlet b = a != null ? a : c;"
    );
    assert_eq!(
        js("b = a ? c"),
        "let b = typeof a !== 'undefined' && a !== null ? a : c;"
    );
    assert_eq!(
        js("b = f() ? c"),
        "let left;\nlet b = (left = f()) != null ? left : c;"
    );
}

// Logical assignment

#[test]
fn test_logical_assignment_statements() {
    assert_eq!(js("a = 1\na ||= b"), "let a = 1;\nif (!a) { a = b; }");
    assert_eq!(js("a = 1\na &&= b"), "let a = 1;\nif (a) { a = b; }");
    assert_eq!(js("a = 1\na ?= b"), "let a = 1;\nif (a == null) { a = b; }");
    assert_eq!(js("a ||= b"), "let a;\nif (!a) { a = b; }");
}

#[test]
fn test_logical_assignment_expressions() {
    assert_eq!(
        js("a = 1\nx = (a ||= b)"),
        "let a = 1;\nlet x = (a || (a = b));"
    );
    assert_eq!(
        js("a = 1\nf(a ?= b)"),
        "let a = 1;\nf(a != null ? a : (a = b));"
    );
}

#[test]
fn test_logical_assignment_to_members() {
    assert_eq!(
        js("f().b ||= c"),
        "let base;\nif (!(base = f()).b) { base.b = c; }"
    );
    assert_eq!(js("@a ||= b"), "if (!this.a) { this.a = b; }");
}

// Collections

#[test]
fn test_missing_commas_are_inserted() {
    assert_eq!(js("x = [\n  1\n  2\n]"), "let x = [\n  1,\n  2\n];");
    assert_eq!(
        js("x = {\n  a: 1\n  b: 2\n}"),
        "let x = {\n  a: 1,\n  b: 2\n};"
    );
    assert_eq!(js("f(\n  a\n  b\n)"), "f(\n  a,\n  b\n);");
}

#[test]
fn test_new_expression() {
    assert_eq!(js("x = new Foo(1)"), "let x = new Foo(1);");
}

// Trivia

#[test]
fn test_comments_are_rewritten() {
    assert_eq!(js("# hi\na = 1 # there"), "// hi\nlet a = 1; // there");
    assert_eq!(js("###\nblock\n###\na = 1"), "/*\nblock\n*/\nlet a = 1;");
}

#[test]
fn test_continuations_are_removed() {
    assert_eq!(js("a = 1 + \\\n  2"), "let a = 1 + \n  2;");
}

// Modules

#[test]
fn test_module_rewrites() {
    let esm = Options::default().with_module_format(ModuleFormat::Esm);
    assert_eq!(
        js_with("a = require('b')\nmodule.exports = a", &esm),
        "import a from 'b';\nexport default a;"
    );
    assert_eq!(js("a = require('b')"), "let a = require('b');");
}

#[test]
fn test_blocks_ending_in_parenthesized_statements_close_after_the_parens() {
    assert_eq!(js("f = -> (a)"), "let f = function() { return (a); };");
    assert_eq!(js("f = ->\n  (a)"), "let f = function() {\n  return (a);\n};");
    assert_eq!(js("if a then (b)"), "if (a) { (b); }");
    assert_eq!(js("while a then (b)"), "while (a) { (b); }");
    assert_eq!(
        js("if a\n  (b)\nelse\n  c"),
        "if (a) {\n  (b);\n} else {\n  c;\n}"
    );
}

#[test]
fn test_early_reads_declare_at_the_first_reading_statement() {
    assert_eq!(js("a = 0\nf(b)\ng(b)\nb = a"), "let a = 0;\nlet b;\nf(b);\ng(b);\nb = a;");
    assert_eq!(js("if c then f(b)\nb = 1"), "let b;\nif (c) { f(b); }\nb = 1;");
}
