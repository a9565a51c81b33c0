use std::collections::HashMap;

use crate::{
    ast::{expressions::ExprSyntax, statements::StmtSyntax},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator binding powers, weakest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default = 0,
    Disjunction = 1,
    Conjunction = 2,
    Relational = 3,
    Additive = 4,
    Multiplicative = 5,
    Unary = 6,
    Primary = 7,
}

pub type StmtHandler = fn(&mut Parser) -> StmtSyntax;
pub type NUDHandler = fn(&mut Parser) -> ExprSyntax;
pub type LEDHandler = fn(&mut Parser, ExprSyntax, BindingPower) -> ExprSyntax;

/// Binding power of `kind` when it appears between two operands.
pub fn binary_binding_power(kind: TokenKind) -> Option<BindingPower> {
    match kind {
        TokenKind::Pipe | TokenKind::Or | TokenKind::Hat => Some(BindingPower::Disjunction),
        TokenKind::Ampersand | TokenKind::And => Some(BindingPower::Conjunction),
        TokenKind::Equals
        | TokenKind::NotEquals
        | TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals => Some(BindingPower::Relational),
        TokenKind::Plus | TokenKind::Dash => Some(BindingPower::Additive),
        TokenKind::Star | TokenKind::Slash => Some(BindingPower::Multiplicative),
        _ => None,
    }
}

/// Precedence of a binary operator, 0 if `kind` is not one.
pub fn binary_operator_precedence(kind: TokenKind) -> u8 {
    binary_binding_power(kind).map_or(0, |bp| bp as u8)
}

/// Precedence of a prefix operator, 0 if `kind` is not one. Always higher
/// than any binary precedence.
pub fn unary_operator_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Plus | TokenKind::Dash | TokenKind::Not | TokenKind::Tilde => BindingPower::Unary as u8,
        _ => 0,
    }
}

pub fn binary_operators() -> Vec<TokenKind> {
    vec![
        TokenKind::Pipe,
        TokenKind::Or,
        TokenKind::Hat,
        TokenKind::Ampersand,
        TokenKind::And,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Less,
        TokenKind::LessEquals,
        TokenKind::Greater,
        TokenKind::GreaterEquals,
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Star,
        TokenKind::Slash,
    ]
}

pub fn create_token_lookups(parser: &mut Parser) {
    for kind in binary_operators() {
        if let Some(bp) = binary_binding_power(kind) {
            parser.led(kind, bp, parse_binary_expr);
        }
    }

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_literal_expr);
    parser.nud(TokenKind::String, parse_literal_expr);
    parser.nud(TokenKind::True, parse_literal_expr);
    parser.nud(TokenKind::False, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_name_or_call_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Prefix
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Tilde, parse_prefix_expr);

    // Statements
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Var, parse_var_decl_stmt);
    parser.stmt(TokenKind::Let, parse_var_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
