use std::fmt::Display;

use lazy_static::lazy_static;

use crate::{lexer::tokens::TokenKind, symbols::symbols::TypeSymbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Equals,
    NotEquals,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

/// A resolved prefix operator: which token, on which operand type, giving
/// which result type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub syntax_kind: TokenKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(syntax_kind: TokenKind, kind: BoundUnaryOperatorKind, operand_type: TypeSymbol) -> Self {
        BoundUnaryOperator {
            syntax_kind,
            kind,
            operand_type,
            result_type: operand_type,
        }
    }

    pub fn bind(syntax_kind: TokenKind, operand_type: TypeSymbol) -> Option<BoundUnaryOperator> {
        UNARY_OPERATORS
            .iter()
            .find(|op| op.syntax_kind == syntax_kind && op.operand_type == operand_type)
            .copied()
    }
}

/// A resolved binary operator. The bitwise operators have one row per
/// operand type, and `result_type` tells the evaluator which semantics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub syntax_kind: TokenKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundBinaryOperator {
    pub(crate) const fn new(syntax_kind: TokenKind, kind: BoundBinaryOperatorKind, ty: TypeSymbol) -> Self {
        Self::with_result(syntax_kind, kind, ty, ty)
    }

    pub(crate) const fn with_result(
        syntax_kind: TokenKind,
        kind: BoundBinaryOperatorKind,
        operand_type: TypeSymbol,
        result_type: TypeSymbol,
    ) -> Self {
        BoundBinaryOperator {
            syntax_kind,
            kind,
            left_type: operand_type,
            right_type: operand_type,
            result_type,
        }
    }

    pub fn bind(syntax_kind: TokenKind, left_type: TypeSymbol, right_type: TypeSymbol) -> Option<BoundBinaryOperator> {
        BINARY_OPERATORS
            .iter()
            .find(|op| op.syntax_kind == syntax_kind && op.left_type == left_type && op.right_type == right_type)
            .copied()
    }
}

lazy_static! {
    static ref UNARY_OPERATORS: Vec<BoundUnaryOperator> = {
        use BoundUnaryOperatorKind::*;

        vec![
            BoundUnaryOperator::new(TokenKind::Not, LogicalNegation, TypeSymbol::Bool),
            BoundUnaryOperator::new(TokenKind::Plus, Identity, TypeSymbol::Int),
            BoundUnaryOperator::new(TokenKind::Dash, Negation, TypeSymbol::Int),
            BoundUnaryOperator::new(TokenKind::Tilde, OnesComplement, TypeSymbol::Int),
        ]
    };

    static ref BINARY_OPERATORS: Vec<BoundBinaryOperator> = {
        use BoundBinaryOperatorKind::*;

        let int = TypeSymbol::Int;
        let boolean = TypeSymbol::Bool;
        let string = TypeSymbol::String;

        vec![
            BoundBinaryOperator::new(TokenKind::Plus, Addition, int),
            BoundBinaryOperator::new(TokenKind::Dash, Subtraction, int),
            BoundBinaryOperator::new(TokenKind::Star, Multiplication, int),
            BoundBinaryOperator::new(TokenKind::Slash, Division, int),
            BoundBinaryOperator::new(TokenKind::Ampersand, BitwiseAnd, int),
            BoundBinaryOperator::new(TokenKind::Pipe, BitwiseOr, int),
            BoundBinaryOperator::new(TokenKind::Hat, BitwiseXor, int),
            BoundBinaryOperator::with_result(TokenKind::Equals, Equals, int, boolean),
            BoundBinaryOperator::with_result(TokenKind::NotEquals, NotEquals, int, boolean),
            BoundBinaryOperator::with_result(TokenKind::Less, Less, int, boolean),
            BoundBinaryOperator::with_result(TokenKind::LessEquals, LessOrEqual, int, boolean),
            BoundBinaryOperator::with_result(TokenKind::Greater, Greater, int, boolean),
            BoundBinaryOperator::with_result(TokenKind::GreaterEquals, GreaterOrEqual, int, boolean),

            BoundBinaryOperator::new(TokenKind::And, LogicalAnd, boolean),
            BoundBinaryOperator::new(TokenKind::Or, LogicalOr, boolean),
            BoundBinaryOperator::new(TokenKind::Ampersand, BitwiseAnd, boolean),
            BoundBinaryOperator::new(TokenKind::Pipe, BitwiseOr, boolean),
            BoundBinaryOperator::new(TokenKind::Hat, BitwiseXor, boolean),
            BoundBinaryOperator::new(TokenKind::Equals, Equals, boolean),
            BoundBinaryOperator::new(TokenKind::NotEquals, NotEquals, boolean),

            BoundBinaryOperator::with_result(TokenKind::Equals, Equals, string, boolean),
            BoundBinaryOperator::with_result(TokenKind::NotEquals, NotEquals, string, boolean),
        ]
    };
}

impl Display for BoundUnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.syntax_kind.fixed_text().unwrap_or("?"))
    }
}

impl Display for BoundBinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.syntax_kind.fixed_text().unwrap_or("?"))
    }
}
