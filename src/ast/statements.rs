use crate::{lexer::tokens::Token, Span};

use super::{ast::SyntaxNode, expressions::ExprSyntax};

/// Block Statement
/// `{ ... }`, introduces a nested scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub open: Token,
    pub statements: Vec<StmtSyntax>,
    pub close: Token,
}

/// Variable Declaration Statement
/// `var name = value` declares a writable variable, `let name = value` a
/// read-only one.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub keyword: Token,
    pub identifier: Token,
    pub equals: Token,
    pub initializer: ExprSyntax,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    pub keyword: Token,
    pub statement: Box<StmtSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: ExprSyntax,
    pub then_statement: Box<StmtSyntax>,
    pub else_clause: Option<ElseClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: ExprSyntax,
    pub body: Box<StmtSyntax>,
}

/// For Statement
/// `for name = lower to upper body`, both bounds inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Token,
    pub identifier: Token,
    pub equals: Token,
    pub lower_bound: ExprSyntax,
    pub to_keyword: Token,
    pub upper_bound: ExprSyntax,
    pub body: Box<StmtSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: ExprSyntax,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtSyntax {
    Block(BlockStmt),
    VariableDeclaration(VarDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Expression(ExpressionStmt),
}

impl StmtSyntax {
    pub fn span(&self) -> Span {
        match self {
            StmtSyntax::Block(block) => block.open.span.to(block.close.span),
            StmtSyntax::VariableDeclaration(declaration) => declaration.keyword.span.to(declaration.initializer.span()),
            StmtSyntax::If(if_stmt) => {
                let end = match &if_stmt.else_clause {
                    Some(else_clause) => else_clause.statement.span(),
                    None => if_stmt.then_statement.span(),
                };
                if_stmt.keyword.span.to(end)
            }
            StmtSyntax::While(while_stmt) => while_stmt.keyword.span.to(while_stmt.body.span()),
            StmtSyntax::For(for_stmt) => for_stmt.keyword.span.to(for_stmt.body.span()),
            StmtSyntax::Expression(expression) => expression.expression.span(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StmtSyntax::Block(_) => "BlockStatement",
            StmtSyntax::VariableDeclaration(_) => "VariableDeclaration",
            StmtSyntax::If(_) => "IfStatement",
            StmtSyntax::While(_) => "WhileStatement",
            StmtSyntax::For(_) => "ForStatement",
            StmtSyntax::Expression(_) => "ExpressionStatement",
        }
    }

    pub fn children(&self) -> Vec<SyntaxNode<'_>> {
        match self {
            StmtSyntax::Block(block) => {
                let mut children = vec![SyntaxNode::Token(&block.open)];
                children.extend(block.statements.iter().map(SyntaxNode::Stmt));
                children.push(SyntaxNode::Token(&block.close));
                children
            }
            StmtSyntax::VariableDeclaration(declaration) => vec![
                SyntaxNode::Token(&declaration.keyword),
                SyntaxNode::Token(&declaration.identifier),
                SyntaxNode::Token(&declaration.equals),
                SyntaxNode::Expr(&declaration.initializer),
            ],
            StmtSyntax::If(if_stmt) => {
                let mut children = vec![
                    SyntaxNode::Token(&if_stmt.keyword),
                    SyntaxNode::Expr(&if_stmt.condition),
                    SyntaxNode::Stmt(&if_stmt.then_statement),
                ];
                if let Some(else_clause) = &if_stmt.else_clause {
                    children.push(SyntaxNode::Token(&else_clause.keyword));
                    children.push(SyntaxNode::Stmt(&else_clause.statement));
                }
                children
            }
            StmtSyntax::While(while_stmt) => vec![
                SyntaxNode::Token(&while_stmt.keyword),
                SyntaxNode::Expr(&while_stmt.condition),
                SyntaxNode::Stmt(&while_stmt.body),
            ],
            StmtSyntax::For(for_stmt) => vec![
                SyntaxNode::Token(&for_stmt.keyword),
                SyntaxNode::Token(&for_stmt.identifier),
                SyntaxNode::Token(&for_stmt.equals),
                SyntaxNode::Expr(&for_stmt.lower_bound),
                SyntaxNode::Token(&for_stmt.to_keyword),
                SyntaxNode::Expr(&for_stmt.upper_bound),
                SyntaxNode::Stmt(&for_stmt.body),
            ],
            StmtSyntax::Expression(expression) => vec![SyntaxNode::Expr(&expression.expression)],
        }
    }
}
