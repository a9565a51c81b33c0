use crate::{
    ast::expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, ExprSyntax, LiteralExpr, NameExpr, ParenthesizedExpr, UnaryExpr,
    },
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses a full expression, including assignment.
pub fn parse_expression(parser: &mut Parser) -> ExprSyntax {
    if parser.current_token_kind() == TokenKind::Identifier && parser.peek(1).kind == TokenKind::Assignment {
        return parse_assignment_expr(parser);
    }

    parse_expr(parser, BindingPower::Default)
}

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> ExprSyntax {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = parser.get_nud_lookup().get(&token_kind).copied();
    let mut left = match nud {
        Some(nud) => nud(parser),
        // Nothing can start an expression here: report it against a name
        None => ExprSyntax::Name(NameExpr {
            identifier: parser.expect(TokenKind::Identifier),
        }),
    };

    // While the next operator binds tighter than the current context, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = match parser.get_bp_lookup().get(&token_kind).copied() {
            Some(next_bp) if next_bp > bp => next_bp,
            _ => break,
        };

        let led = parser.get_led_lookup().get(&token_kind).copied();
        let Some(led) = led else {
            break;
        };

        left = led(parser, left, next_bp);
    }

    left
}

pub fn parse_literal_expr(parser: &mut Parser) -> ExprSyntax {
    let token = parser.advance();

    ExprSyntax::Literal(LiteralExpr {
        value: token.literal.clone(),
        token,
    })
}

pub fn parse_name_or_call_expr(parser: &mut Parser) -> ExprSyntax {
    if parser.peek(1).kind == TokenKind::OpenParen {
        return parse_call_expr(parser);
    }

    ExprSyntax::Name(NameExpr {
        identifier: parser.advance(),
    })
}

pub fn parse_binary_expr(parser: &mut Parser, left: ExprSyntax, bp: BindingPower) -> ExprSyntax {
    let operator = parser.advance();
    let right = parse_expr(parser, bp);

    ExprSyntax::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> ExprSyntax {
    let operator = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary);

    ExprSyntax::Unary(UnaryExpr {
        operator,
        operand: Box::new(operand),
    })
}

pub fn parse_assignment_expr(parser: &mut Parser) -> ExprSyntax {
    let identifier = parser.expect(TokenKind::Identifier);
    let equals = parser.expect(TokenKind::Assignment);
    // Right associative: `a = b = 1` assigns `b` first
    let value = parse_expression(parser);

    ExprSyntax::Assignment(AssignmentExpr {
        identifier,
        equals,
        value: Box::new(value),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> ExprSyntax {
    let open = parser.advance();
    let expression = parse_expression(parser);
    let close = parser.expect(TokenKind::CloseParen);

    ExprSyntax::Parenthesized(ParenthesizedExpr {
        open,
        expression: Box::new(expression),
        close,
    })
}

pub fn parse_call_expr(parser: &mut Parser) -> ExprSyntax {
    let identifier = parser.expect(TokenKind::Identifier);
    let open = parser.expect(TokenKind::OpenParen);

    let mut arguments = vec![];

    if !matches!(parser.current_token_kind(), TokenKind::CloseParen | TokenKind::EOF) {
        arguments.push(parse_expression(parser));

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            arguments.push(parse_expression(parser));
        }
    }

    let close = parser.expect(TokenKind::CloseParen);

    ExprSyntax::Call(CallExpr {
        identifier,
        open,
        arguments,
        close,
    })
}
