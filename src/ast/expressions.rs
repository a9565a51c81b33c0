use crate::{lexer::tokens::Token, value::Value, Span};

use super::ast::SyntaxNode;

/// Literal Expression
/// A number, string or boolean literal. `value` is absent when the literal
/// could not be parsed (an out of range number for example).
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub token: Token,
    pub value: Option<Value>,
}

/// Name Expression
/// A bare reference to a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct NameExpr {
    pub identifier: Token,
}

/// Assignment Expression
/// `name = value`, right associative.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub identifier: Token,
    pub equals: Token,
    pub value: Box<ExprSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<ExprSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<ExprSyntax>,
    pub operator: Token,
    pub right: Box<ExprSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpr {
    pub open: Token,
    pub expression: Box<ExprSyntax>,
    pub close: Token,
}

/// Call Expression
/// `name(arg, ...)`. Only built-in functions can be called.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub identifier: Token,
    pub open: Token,
    pub arguments: Vec<ExprSyntax>,
    pub close: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprSyntax {
    Literal(LiteralExpr),
    Name(NameExpr),
    Assignment(AssignmentExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Parenthesized(ParenthesizedExpr),
    Call(CallExpr),
}

impl ExprSyntax {
    pub fn span(&self) -> Span {
        match self {
            ExprSyntax::Literal(literal) => literal.token.span,
            ExprSyntax::Name(name) => name.identifier.span,
            ExprSyntax::Assignment(assignment) => assignment.identifier.span.to(assignment.value.span()),
            ExprSyntax::Unary(unary) => unary.operator.span.to(unary.operand.span()),
            ExprSyntax::Binary(binary) => binary.left.span().to(binary.right.span()),
            ExprSyntax::Parenthesized(parenthesized) => parenthesized.open.span.to(parenthesized.close.span),
            ExprSyntax::Call(call) => call.identifier.span.to(call.close.span),
        }
    }

    /// Node name used when printing the tree.
    pub fn name(&self) -> &'static str {
        match self {
            ExprSyntax::Literal(_) => "LiteralExpression",
            ExprSyntax::Name(_) => "NameExpression",
            ExprSyntax::Assignment(_) => "AssignmentExpression",
            ExprSyntax::Unary(_) => "UnaryExpression",
            ExprSyntax::Binary(_) => "BinaryExpression",
            ExprSyntax::Parenthesized(_) => "ParenthesizedExpression",
            ExprSyntax::Call(_) => "CallExpression",
        }
    }

    pub fn children(&self) -> Vec<SyntaxNode<'_>> {
        match self {
            ExprSyntax::Literal(literal) => vec![SyntaxNode::Token(&literal.token)],
            ExprSyntax::Name(name) => vec![SyntaxNode::Token(&name.identifier)],
            ExprSyntax::Assignment(assignment) => vec![
                SyntaxNode::Token(&assignment.identifier),
                SyntaxNode::Token(&assignment.equals),
                SyntaxNode::Expr(&assignment.value),
            ],
            ExprSyntax::Unary(unary) => vec![SyntaxNode::Token(&unary.operator), SyntaxNode::Expr(&unary.operand)],
            ExprSyntax::Binary(binary) => vec![
                SyntaxNode::Expr(&binary.left),
                SyntaxNode::Token(&binary.operator),
                SyntaxNode::Expr(&binary.right),
            ],
            ExprSyntax::Parenthesized(parenthesized) => vec![
                SyntaxNode::Token(&parenthesized.open),
                SyntaxNode::Expr(&parenthesized.expression),
                SyntaxNode::Token(&parenthesized.close),
            ],
            ExprSyntax::Call(call) => {
                let mut children = vec![SyntaxNode::Token(&call.identifier), SyntaxNode::Token(&call.open)];
                children.extend(call.arguments.iter().map(SyntaxNode::Expr));
                children.push(SyntaxNode::Token(&call.close));
                children
            }
        }
    }
}
