//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `CompilationUnit`. It uses a Pratt parser for expressions
//! with operator precedence driven by binding powers and handles:
//!
//! - Statement parsing (blocks, declarations, control flow)
//! - Expression parsing (assignment, binary and unary operators, calls, literals)
//! - Error recovery: missing tokens are reported and synthesised, so parsing
//!   always produces a tree
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
