use std::fmt::Write;

use crate::{
    errors::errors::DiagnosticBag,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    Span,
};

use super::{expressions::ExprSyntax, statements::StmtSyntax};

/// Borrowed view of any node, used to walk the tree generically.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'a> {
    Token(&'a Token),
    Expr(&'a ExprSyntax),
    Stmt(&'a StmtSyntax),
}

impl<'a> SyntaxNode<'a> {
    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::Token(token) => token.span,
            SyntaxNode::Expr(expr) => expr.span(),
            SyntaxNode::Stmt(stmt) => stmt.span(),
        }
    }

    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        match self {
            SyntaxNode::Token(_) => vec![],
            SyntaxNode::Expr(expr) => expr.children(),
            SyntaxNode::Stmt(stmt) => stmt.children(),
        }
    }

    fn label(&self) -> String {
        match self {
            SyntaxNode::Token(token) if token.is_missing => format!("{} (missing)", token.kind),
            SyntaxNode::Token(token) => match &token.literal {
                Some(value) => format!("{} {}", token.kind, value),
                None => token.to_string(),
            },
            SyntaxNode::Expr(expr) => expr.name().to_string(),
            SyntaxNode::Stmt(stmt) => stmt.name().to_string(),
        }
    }

    fn write_tree(&self, out: &mut String, indent: &str, is_last: bool) {
        let marker = if is_last { "└──" } else { "├──" };
        let _ = writeln!(out, "{}{}{}", indent, marker, self.label());

        let indent = format!("{}{}", indent, if is_last { "   " } else { "│  " });
        let children = self.children();
        let count = children.len();

        for (i, child) in children.iter().enumerate() {
            child.write_tree(out, &indent, i + 1 == count);
        }
    }
}

/// Root of a parsed submission: exactly one statement followed by EOF.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub statement: StmtSyntax,
    pub end_of_file: Token,
}

impl CompilationUnit {
    pub fn span(&self) -> Span {
        self.statement.span().to(self.end_of_file.span)
    }

    pub fn children(&self) -> Vec<SyntaxNode<'_>> {
        vec![SyntaxNode::Stmt(&self.statement), SyntaxNode::Token(&self.end_of_file)]
    }
}

/// A parsed submission together with its source and the lexer and parser
/// diagnostics, in source order.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub text: String,
    pub root: CompilationUnit,
    pub diagnostics: DiagnosticBag,
}

impl SyntaxTree {
    /// Tokenizes and parses `text`. Never fails; problems end up in
    /// `diagnostics`.
    pub fn parse(text: &str) -> SyntaxTree {
        let (tokens, mut diagnostics) = tokenize(text);
        let (root, parse_diagnostics) = parse(tokens);
        diagnostics.extend(parse_diagnostics);

        SyntaxTree {
            text: text.to_string(),
            root,
            diagnostics,
        }
    }

    /// True when the only problems are a premature end of input, meaning
    /// more lines could still complete the submission.
    pub fn is_incomplete(&self) -> bool {
        !self.diagnostics.is_empty() && self.diagnostics.iter().all(|d| d.is_unexpected_end_of_file())
    }

    /// Renders the tree one node per line with box-drawing guides.
    pub fn print_tree(&self) -> String {
        let mut out = String::from("CompilationUnit\n");
        let children = self.root.children();
        let count = children.len();

        for (i, child) in children.iter().enumerate() {
            child.write_tree(&mut out, "", i + 1 == count);
        }

        out
    }
}
