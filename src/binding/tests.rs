use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::{
    binder::{bind_global_scope, BoundGlobalScope},
    bound_tree::{BoundExpression, BoundStatement},
    operators::{BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind},
    scope::ScopeTree,
};
use crate::{
    ast::ast::SyntaxTree,
    lexer::tokens::TokenKind,
    symbols::{
        builtins,
        symbols::{SymbolKind, TypeSymbol, VariableSymbol},
    },
};

fn bind(source: &str) -> BoundGlobalScope {
    bind_after(None, source)
}

fn bind_after(previous: Option<&Arc<BoundGlobalScope>>, source: &str) -> BoundGlobalScope {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics.is_empty(), "syntax errors in {:?}: {:?}", source, tree.diagnostics);
    bind_global_scope(previous, &tree.root)
}

fn messages(source: &str) -> Vec<String> {
    bind(source).diagnostics.iter().map(|d| d.to_string()).collect()
}

fn expression_type(source: &str) -> TypeSymbol {
    match bind(source).statement {
        BoundStatement::Expression(expression) => expression.ty(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_scope_declare_and_lookup() {
    let mut scopes = ScopeTree::new();
    let root = scopes.root();
    let x = VariableSymbol::new("x", TypeSymbol::Int, false);

    assert!(scopes.declare_variable(root, x.clone()));
    assert!(!scopes.declare_variable(root, VariableSymbol::new("x", TypeSymbol::Bool, false)));
    assert_eq!(scopes.lookup_variable(root, "x"), Some(&x));
    assert_eq!(scopes.lookup_variable(root, "y"), None);
}

#[test]
fn test_scope_shadowing_resolves_innermost() {
    let mut scopes = ScopeTree::new();
    let root = scopes.root();
    let outer = VariableSymbol::new("x", TypeSymbol::Int, false);
    let inner = VariableSymbol::new("x", TypeSymbol::Bool, false);

    scopes.declare_variable(root, outer.clone());
    let child = scopes.push(root);
    let grandchild = scopes.push(child);

    assert!(scopes.declare_variable(child, inner.clone()));
    assert_eq!(scopes.lookup_variable(grandchild, "x"), Some(&inner));
    assert_eq!(scopes.lookup_variable(root, "x"), Some(&outer));
    assert_eq!(scopes.get(grandchild).and_then(|s| s.parent()), Some(child));

    assert_eq!(scopes.pop(), Some(child));
    assert_eq!(scopes.pop(), Some(root));
    assert_eq!(scopes.pop(), None);
    assert_eq!(scopes.len(), 1);
}

#[test]
fn test_scope_functions_are_a_separate_namespace() {
    let mut scopes = ScopeTree::new();
    let root = scopes.root();

    assert!(scopes.declare_function(root, builtins::PRINT.clone()));
    assert!(!scopes.declare_function(root, builtins::PRINT.clone()));
    assert!(scopes.declare_variable(root, VariableSymbol::new("print", TypeSymbol::Int, false)));

    let child = scopes.push(root);
    assert_eq!(scopes.lookup_function(child, "print"), Some(&*builtins::PRINT));
    assert_eq!(scopes.declared_functions(root).len(), 1);
    assert_eq!(scopes.declared_variables(root).len(), 1);
    assert!(scopes.declared_variables(child).is_empty());
}

#[test]
fn test_unary_operator_table() {
    let negation = BoundUnaryOperator::bind(TokenKind::Dash, TypeSymbol::Int).unwrap();
    assert_eq!(negation.kind, BoundUnaryOperatorKind::Negation);
    assert_eq!(negation.result_type, TypeSymbol::Int);

    assert!(BoundUnaryOperator::bind(TokenKind::Not, TypeSymbol::Bool).is_some());
    assert!(BoundUnaryOperator::bind(TokenKind::Not, TypeSymbol::Int).is_none());
    assert!(BoundUnaryOperator::bind(TokenKind::Tilde, TypeSymbol::Bool).is_none());
}

#[test]
fn test_bitwise_operators_resolve_for_both_types() {
    for ty in [TypeSymbol::Int, TypeSymbol::Bool] {
        for kind in [TokenKind::Ampersand, TokenKind::Pipe, TokenKind::Hat] {
            let operator = BoundBinaryOperator::bind(kind, ty, ty).unwrap();
            assert_eq!(operator.result_type, ty);
        }
    }

    let and = BoundBinaryOperator::bind(TokenKind::Ampersand, TypeSymbol::Bool, TypeSymbol::Bool).unwrap();
    assert_eq!(and.kind, BoundBinaryOperatorKind::BitwiseAnd);
    assert!(BoundBinaryOperator::bind(TokenKind::Ampersand, TypeSymbol::Int, TypeSymbol::Bool).is_none());
}

#[test]
fn test_comparison_operators_produce_bool() {
    let less = BoundBinaryOperator::bind(TokenKind::Less, TypeSymbol::Int, TypeSymbol::Int).unwrap();
    assert_eq!(less.result_type, TypeSymbol::Bool);

    let equals = BoundBinaryOperator::bind(TokenKind::Equals, TypeSymbol::String, TypeSymbol::String).unwrap();
    assert_eq!(equals.result_type, TypeSymbol::Bool);

    assert!(BoundBinaryOperator::bind(TokenKind::Less, TypeSymbol::Bool, TypeSymbol::Bool).is_none());
    assert!(BoundBinaryOperator::bind(TokenKind::Plus, TypeSymbol::String, TypeSymbol::String).is_none());
}

#[test]
fn test_bind_expression_types() {
    assert_eq!(expression_type("1 + 2"), TypeSymbol::Int);
    assert_eq!(expression_type("1 < 2"), TypeSymbol::Bool);
    assert_eq!(expression_type("true & false"), TypeSymbol::Bool);
    assert_eq!(expression_type("\"a\" == \"b\""), TypeSymbol::Bool);
    assert_eq!(expression_type("input()"), TypeSymbol::String);
    assert_eq!(expression_type("print(\"hi\")"), TypeSymbol::Void);
}

#[test]
fn test_undefined_name() {
    assert_eq!(messages("x * 2"), vec!["Variable 'x' doesn't exist."]);
    // Placeholder is an int, so int arithmetic does not cascade
    assert_eq!(expression_type("x * 2"), TypeSymbol::Int);
}

#[test]
fn test_redeclaration_reports_once() {
    assert_eq!(
        messages("{ var a = 1 var a = 2 }"),
        vec!["Variable 'a' is already declared."]
    );
}

#[test]
fn test_shadowing_in_nested_block_is_legal() {
    assert!(messages("{ var a = 1 { var a = true a = false } a = 2 }").is_empty());
}

#[test]
fn test_block_declarations_do_not_leak() {
    assert_eq!(
        messages("{ { var a = 1 } a + 1 }"),
        vec!["Variable 'a' doesn't exist."]
    );
    assert_eq!(
        messages("{ if true var b = 1 b }"),
        vec!["Variable 'b' doesn't exist."]
    );
}

#[test]
fn test_operator_type_errors() {
    assert_eq!(messages("-true"), vec!["Unary operator - is not defined for type bool."]);
    assert_eq!(
        messages("1 + true"),
        vec!["Binary operator + is not defined for type int and bool."]
    );
    assert_eq!(
        messages("\"a\" < \"b\""),
        vec!["Binary operator < is not defined for type string and string."]
    );
}

#[test]
fn test_error_operands_do_not_cascade() {
    // Only the innermost problem is reported
    assert_eq!(
        messages("(1 + true) * 2 - 3"),
        vec!["Binary operator + is not defined for type int and bool."]
    );
    assert_eq!(messages("-(print(\"x\"))"), vec!["Expression must have a value."]);
}

#[test]
fn test_condition_must_be_bool() {
    assert_eq!(messages("if 1 2"), vec!["Cannot convert type 'int' to type bool."]);
    assert_eq!(messages("while 0 { }"), vec!["Cannot convert type 'int' to type bool."]);
    assert_eq!(
        messages("for i = true to 10 { }"),
        vec!["Cannot convert type 'bool' to type int."]
    );
}

#[test]
fn test_assignment_declares_on_first_use() {
    let global = bind("(a = 10) * a");

    assert!(global.diagnostics.is_empty());
    assert_eq!(global.variables.len(), 1);
    assert_eq!(global.variables[0].name(), "a");
    assert_eq!(global.variables[0].ty(), TypeSymbol::Int);
    assert!(!global.variables[0].is_read_only());
}

#[test]
fn test_assignment_enforces_declared_type() {
    assert_eq!(
        messages("{ var a = 1 a = true }"),
        vec!["Cannot convert type 'bool' to type int."]
    );
}

#[test]
fn test_read_only_variables() {
    assert_eq!(
        messages("{ let a = 1 a = 2 }"),
        vec!["Variable 'a' is read-only and cannot be assigned to."]
    );
    assert_eq!(
        messages("for i = 1 to 3 i = 5"),
        vec!["Variable 'i' is read-only and cannot be assigned to."]
    );
}

#[test]
fn test_call_checks() {
    assert_eq!(messages("foo(1)"), vec!["Function 'foo' doesn't exist."]);
    assert_eq!(
        messages("rnd(1, 2)"),
        vec!["Function 'rnd' requires 1 arguments but was given 2."]
    );
    assert_eq!(messages("print(1)"), vec!["Cannot convert type 'int' to type string."]);
    assert_eq!(messages("var x = print(\"a\")"), vec!["Expression must have a value."]);
    assert!(messages("print(input())").is_empty());
}

#[test]
fn test_call_binds_to_builtin_identity() {
    let BoundStatement::Expression(BoundExpression::Call { function, arguments }) = bind("rnd(6)").statement else {
        panic!("expected a call");
    };

    assert_eq!(function, *builtins::RND);
    assert_eq!(arguments.len(), 1);
}

#[test]
fn test_for_variable_is_scoped_to_loop() {
    assert_eq!(
        messages("{ for i = 1 to 2 { } i }"),
        vec!["Variable 'i' doesn't exist."]
    );
}

#[test]
fn test_chained_submissions_see_earlier_globals() {
    let first = Arc::new(bind("var a = 10"));
    let second = Arc::new(bind_after(Some(&first), "var b = a + 5"));
    let third = bind_after(Some(&second), "a + b");

    assert!(third.diagnostics.is_empty());
    assert_eq!(third.variables.len(), 0);

    let BoundStatement::Expression(BoundExpression::Binary { left, right, .. }) = &third.statement else {
        panic!("expected a binary expression");
    };
    assert_eq!(**left, BoundExpression::Variable { variable: first.variables[0].clone() });
    assert_eq!(**right, BoundExpression::Variable { variable: second.variables[0].clone() });
}

#[test]
fn test_later_submission_may_redeclare_global() {
    let first = Arc::new(bind("var a = 10"));
    let second = bind_after(Some(&first), "var a = true");

    assert!(second.diagnostics.is_empty());
    assert_ne!(second.variables[0], first.variables[0]);
    assert_eq!(second.variables[0].ty(), TypeSymbol::Bool);
}

#[test]
fn test_global_scope_symbols() {
    let first = Arc::new(bind("var b = 1"));
    let second = bind_after(Some(&first), "var a = \"x\"");

    let symbols = second.symbols();
    let names: Vec<&str> = symbols.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["print", "input", "rnd", "b", "a"]);
    assert_eq!(symbols[0].kind(), SymbolKind::Function);
    assert_eq!(symbols[4].to_string(), "a: string");
}
