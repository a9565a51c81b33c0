use std::{
    fmt::Display,
    slice::Iter,
    vec::IntoIter,
};

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, symbols::symbols::TypeSymbol, Span};

/// A recoverable, user-facing problem found while lexing, parsing or binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { kind, span }
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            DiagnosticKind::BadCharacter { .. } => "BadCharacter",
            DiagnosticKind::InvalidNumber { .. } => "InvalidNumber",
            DiagnosticKind::UnterminatedString => "UnterminatedString",
            DiagnosticKind::UnexpectedToken { .. } => "UnexpectedToken",
            DiagnosticKind::UndefinedName { .. } => "UndefinedName",
            DiagnosticKind::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            DiagnosticKind::UndefinedUnaryOperator { .. } => "UndefinedUnaryOperator",
            DiagnosticKind::UndefinedBinaryOperator { .. } => "UndefinedBinaryOperator",
            DiagnosticKind::CannotConvert { .. } => "CannotConvert",
            DiagnosticKind::CannotAssign { .. } => "CannotAssign",
            DiagnosticKind::UndefinedFunction { .. } => "UndefinedFunction",
            DiagnosticKind::WrongArgumentCount { .. } => "WrongArgumentCount",
            DiagnosticKind::ExpressionMustHaveValue => "ExpressionMustHaveValue",
        }
    }

    /// True when the problem is running out of input, which the REPL uses
    /// to keep reading lines instead of reporting.
    pub fn is_unexpected_end_of_file(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::UnexpectedToken { actual: TokenKind::EOF, .. }
        )
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

// The message texts are matched verbatim by tooling, keep them stable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("Bad character input: '{character}'.")]
    BadCharacter { character: char },
    #[error("The number {text} isn't valid {ty}.")]
    InvalidNumber { text: String, ty: TypeSymbol },
    #[error("Unterminated string literal.")]
    UnterminatedString,
    #[error("Unexpected token <{actual}>, expected <{expected}>.")]
    UnexpectedToken { actual: TokenKind, expected: TokenKind },
    #[error("Variable '{name}' doesn't exist.")]
    UndefinedName { name: String },
    #[error("Variable '{name}' is already declared.")]
    VariableAlreadyDeclared { name: String },
    #[error("Unary operator {operator} is not defined for type {operand}.")]
    UndefinedUnaryOperator { operator: String, operand: TypeSymbol },
    #[error("Binary operator {operator} is not defined for type {left} and {right}.")]
    UndefinedBinaryOperator {
        operator: String,
        left: TypeSymbol,
        right: TypeSymbol,
    },
    #[error("Cannot convert type '{from}' to type {to}.")]
    CannotConvert { from: TypeSymbol, to: TypeSymbol },
    #[error("Variable '{name}' is read-only and cannot be assigned to.")]
    CannotAssign { name: String },
    #[error("Function '{name}' doesn't exist.")]
    UndefinedFunction { name: String },
    #[error("Function '{name}' requires {expected} arguments but was given {actual}.")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Expression must have a value.")]
    ExpressionMustHaveValue,
}

/// Ordered accumulator for diagnostics.
///
/// Stages append to it and keep going; nothing ever inspects existing
/// entries to decide what to do next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    fn report(&mut self, span: Span, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(kind, span));
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn report_bad_character(&mut self, position: usize, character: char) {
        let span = Span::new(position, position + character.len_utf8());
        self.report(span, DiagnosticKind::BadCharacter { character });
    }

    pub fn report_invalid_number(&mut self, span: Span, text: &str, ty: TypeSymbol) {
        self.report(span, DiagnosticKind::InvalidNumber { text: text.to_string(), ty });
    }

    pub fn report_unterminated_string(&mut self, span: Span) {
        self.report(span, DiagnosticKind::UnterminatedString);
    }

    pub fn report_unexpected_token(&mut self, span: Span, actual: TokenKind, expected: TokenKind) {
        self.report(span, DiagnosticKind::UnexpectedToken { actual, expected });
    }

    pub fn report_undefined_name(&mut self, span: Span, name: &str) {
        self.report(span, DiagnosticKind::UndefinedName { name: name.to_string() });
    }

    pub fn report_variable_already_declared(&mut self, span: Span, name: &str) {
        self.report(span, DiagnosticKind::VariableAlreadyDeclared { name: name.to_string() });
    }

    pub fn report_undefined_unary_operator(&mut self, span: Span, operator: &str, operand: TypeSymbol) {
        self.report(
            span,
            DiagnosticKind::UndefinedUnaryOperator { operator: operator.to_string(), operand },
        );
    }

    pub fn report_undefined_binary_operator(
        &mut self,
        span: Span,
        operator: &str,
        left: TypeSymbol,
        right: TypeSymbol,
    ) {
        self.report(
            span,
            DiagnosticKind::UndefinedBinaryOperator { operator: operator.to_string(), left, right },
        );
    }

    pub fn report_cannot_convert(&mut self, span: Span, from: TypeSymbol, to: TypeSymbol) {
        self.report(span, DiagnosticKind::CannotConvert { from, to });
    }

    pub fn report_cannot_assign(&mut self, span: Span, name: &str) {
        self.report(span, DiagnosticKind::CannotAssign { name: name.to_string() });
    }

    pub fn report_undefined_function(&mut self, span: Span, name: &str) {
        self.report(span, DiagnosticKind::UndefinedFunction { name: name.to_string() });
    }

    pub fn report_wrong_argument_count(&mut self, span: Span, name: &str, expected: usize, actual: usize) {
        self.report(
            span,
            DiagnosticKind::WrongArgumentCount { name: name.to_string(), expected, actual },
        );
    }

    pub fn report_expression_must_have_value(&mut self, span: Span) {
        self.report(span, DiagnosticKind::ExpressionMustHaveValue);
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

/// Faults raised while evaluating a lowered program.
///
/// Apart from the arithmetic faults these mean the binder or lowerer broke
/// one of their invariants; they are never shown as ordinary diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("jump to unresolved label {label}")]
    UnresolvedLabel { label: String },
    #[error("variable {name:?} has no value in the variable store")]
    MissingVariable { name: String },
    #[error("operator {operator} cannot be applied to {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("{statement} statement reached the evaluator without being lowered")]
    UnloweredStatement { statement: &'static str },
    #[error("function {name:?} has no native implementation")]
    UnknownFunction { name: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operator}")]
    Overflow { operator: String },
}
