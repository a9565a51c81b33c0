use crate::{
    ast::statements::{BlockStmt, ElseClause, ExpressionStmt, ForStmt, IfStmt, StmtSyntax, VarDeclStmt, WhileStmt},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expression, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> StmtSyntax {
    let handler = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    StmtSyntax::Expression(ExpressionStmt {
        expression: parse_expression(parser),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> StmtSyntax {
    let open = parser.expect(TokenKind::OpenCurly);

    let mut statements = Vec::new();
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        let start = parser.position();
        statements.push(parse_stmt(parser));

        // A statement that consumed nothing would loop forever, skip the culprit
        if parser.position() == start {
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseCurly);

    StmtSyntax::Block(BlockStmt {
        open,
        statements,
        close,
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> StmtSyntax {
    let keyword = parser.advance();
    let identifier = parser.expect(TokenKind::Identifier);
    let equals = parser.expect(TokenKind::Assignment);
    let initializer = parse_expression(parser);

    StmtSyntax::VariableDeclaration(VarDeclStmt {
        keyword,
        identifier,
        equals,
        initializer,
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> StmtSyntax {
    let keyword = parser.advance();
    let condition = parse_expression(parser);
    let then_statement = parse_stmt(parser);

    let else_clause = if parser.current_token_kind() == TokenKind::Else {
        let keyword = parser.advance();
        Some(ElseClause {
            keyword,
            statement: Box::new(parse_stmt(parser)),
        })
    } else {
        None
    };

    StmtSyntax::If(IfStmt {
        keyword,
        condition,
        then_statement: Box::new(then_statement),
        else_clause,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> StmtSyntax {
    let keyword = parser.advance();
    let condition = parse_expression(parser);
    let body = parse_stmt(parser);

    StmtSyntax::While(WhileStmt {
        keyword,
        condition,
        body: Box::new(body),
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> StmtSyntax {
    let keyword = parser.advance();
    let identifier = parser.expect(TokenKind::Identifier);
    let equals = parser.expect(TokenKind::Assignment);
    let lower_bound = parse_expression(parser);
    let to_keyword = parser.expect(TokenKind::To);
    let upper_bound = parse_expression(parser);
    let body = parse_stmt(parser);

    StmtSyntax::For(ForStmt {
        keyword,
        identifier,
        equals,
        lower_bound,
        to_keyword,
        upper_bound,
        body: Box::new(body),
    })
}
