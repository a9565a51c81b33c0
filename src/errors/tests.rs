//! Unit tests for diagnostics and evaluation faults.

use crate::errors::errors::{Diagnostic, DiagnosticBag, DiagnosticKind, EvaluationError};
use crate::lexer::tokens::TokenKind;
use crate::symbols::symbols::TypeSymbol;
use crate::Span;

#[test]
fn test_diagnostic_creation() {
    let diagnostic = Diagnostic::new(
        DiagnosticKind::BadCharacter { character: '@' },
        Span::new(10, 11),
    );

    assert_eq!(diagnostic.get_error_name(), "BadCharacter");
    assert_eq!(diagnostic.get_span(), Span::new(10, 11));
}

#[test]
fn test_undefined_name_message() {
    let mut bag = DiagnosticBag::new();
    bag.report_undefined_name(Span::new(0, 1), "x");

    assert_eq!(bag.len(), 1);
    assert_eq!(bag.iter().next().unwrap().to_string(), "Variable 'x' doesn't exist.");
}

#[test]
fn test_already_declared_message() {
    let mut bag = DiagnosticBag::new();
    bag.report_variable_already_declared(Span::new(4, 5), "x");

    assert_eq!(
        bag.into_vec()[0].to_string(),
        "Variable 'x' is already declared."
    );
}

#[test]
fn test_operator_messages() {
    let mut bag = DiagnosticBag::new();
    bag.report_undefined_unary_operator(Span::new(0, 1), "-", TypeSymbol::Bool);
    bag.report_undefined_binary_operator(Span::new(5, 6), "+", TypeSymbol::Int, TypeSymbol::Bool);

    let messages = bag.iter().map(|d| d.to_string()).collect::<Vec<String>>();
    assert_eq!(messages[0], "Unary operator - is not defined for type bool.");
    assert_eq!(messages[1], "Binary operator + is not defined for type int and bool.");
}

#[test]
fn test_cannot_convert_message() {
    let mut bag = DiagnosticBag::new();
    bag.report_cannot_convert(Span::new(0, 4), TypeSymbol::Bool, TypeSymbol::Int);

    assert_eq!(
        bag.into_vec()[0].to_string(),
        "Cannot convert type 'bool' to type int."
    );
}

#[test]
fn test_unexpected_token_message() {
    let mut bag = DiagnosticBag::new();
    bag.report_unexpected_token(Span::empty(3), TokenKind::EOF, TokenKind::CloseParen);

    let diagnostic = bag.into_vec().remove(0);
    assert_eq!(diagnostic.to_string(), "Unexpected token <EOF>, expected <CloseParen>.");
    assert!(diagnostic.is_unexpected_end_of_file());
}

#[test]
fn test_bad_character_span_covers_character() {
    let mut bag = DiagnosticBag::new();
    bag.report_bad_character(2, 'é');

    let diagnostic = bag.into_vec().remove(0);
    assert_eq!(diagnostic.get_span(), Span::new(2, 4));
    assert_eq!(diagnostic.to_string(), "Bad character input: 'é'.");
}

#[test]
fn test_extend_preserves_order() {
    let mut first = DiagnosticBag::new();
    first.report_undefined_name(Span::new(0, 1), "a");

    let mut second = DiagnosticBag::new();
    second.report_undefined_function(Span::new(2, 3), "f");
    second.report_wrong_argument_count(Span::new(2, 6), "f", 1, 0);

    first.extend(second);

    let names = first.iter().map(|d| d.get_error_name()).collect::<Vec<&str>>();
    assert_eq!(names, vec!["UndefinedName", "UndefinedFunction", "WrongArgumentCount"]);
}

#[test]
fn test_evaluation_error_display() {
    let error = EvaluationError::UnresolvedLabel { label: String::from("Label1") };
    assert_eq!(error.to_string(), "jump to unresolved label Label1");

    let error = EvaluationError::DivisionByZero;
    assert_eq!(error.to_string(), "division by zero");
}
