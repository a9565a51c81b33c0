//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser keeps lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use crate::{
    ast::ast::CompilationUnit,
    errors::errors::DiagnosticBag,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token stream, always terminated by EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    diagnostics: DiagnosticBag,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::missing(TokenKind::EOF, end));
        }

        Parser {
            tokens,
            pos: 0,
            diagnostics: DiagnosticBag::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Token `offset` places ahead, clamped to the trailing EOF.
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of `expected_kind`. On a mismatch the problem is
    /// reported and a zero-width stand-in is returned without consuming
    /// anything.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Token {
        if self.current_token_kind() == expected_kind {
            return self.advance();
        }

        let current = self.current_token();
        let (span, actual) = (current.span, current.kind);
        self.diagnostics.report_unexpected_token(span, actual, expected_kind);

        Token::missing(expected_kind, span.start)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a token stream into a compilation unit: one statement followed by
/// end of file.
///
/// Never fails. Syntax errors are returned as diagnostics alongside a tree
/// in which missing tokens have been synthesised.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>) -> (CompilationUnit, DiagnosticBag) {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let statement = parse_stmt(&mut parser);
    let end_of_file = parser.expect(TokenKind::EOF);

    tracing::debug!(diagnostics = parser.diagnostics.len(), "parsed compilation unit");

    (CompilationUnit { statement, end_of_file }, parser.diagnostics)
}

