use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::DiagnosticBag, symbols::symbols::TypeSymbol, value::Value, Span,
    MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(&format!("^(?:{})", source))
            .expect("lexer patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    // First match wins, so longer operators come before their prefixes
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("[0-9]+", number_handler),
        pattern("\\s+", skip_handler),
        pattern(r#""(?:[^"\\]|\\.)*""#, string_handler),
        pattern(r#""(?:[^"\\]|\\.)*"#, unterminated_string_handler),
        pattern("//[^\n]*", skip_handler),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("\\^", MK_DEFAULT_HANDLER!(TokenKind::Hat, "^")),
        pattern("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    diagnostics: DiagnosticBag,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            diagnostics: DiagnosticBag::new(),
            source: source.to_string(),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Text matched by `regex` at the current position.
    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = Span::new(lexer.pos, lexer.pos + matched.len());

    let literal = match matched.parse::<i32>() {
        Ok(value) => Some(Value::Int(value)),
        Err(_) => {
            lexer.diagnostics.report_invalid_number(span, &matched, TypeSymbol::Int);
            None
        }
    };

    lexer.push(MK_TOKEN!(TokenKind::Number, matched.clone(), span, literal));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = Span::new(lexer.pos, lexer.pos + matched.len());
    let contents = unescape(&matched[1..matched.len() - 1]);

    lexer.push(MK_TOKEN!(TokenKind::String, matched.clone(), span, Some(Value::String(contents))));
    lexer.advance_n(matched.len());
}

fn unterminated_string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = Span::new(lexer.pos, lexer.pos + matched.len());
    let contents = unescape(&matched[1..]);

    lexer.diagnostics.report_unterminated_string(span);
    lexer.push(MK_TOKEN!(TokenKind::String, matched.clone(), span, Some(Value::String(contents))));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = Span::new(lexer.pos, lexer.pos + matched.len());

    let token = match RESERVED_LOOKUP.get(matched.as_str()) {
        Some(TokenKind::True) => MK_TOKEN!(TokenKind::True, matched.clone(), span, Some(Value::Bool(true))),
        Some(TokenKind::False) => MK_TOKEN!(TokenKind::False, matched.clone(), span, Some(Value::Bool(false))),
        Some(kind) => MK_TOKEN!(*kind, matched.clone(), span),
        None => MK_TOKEN!(TokenKind::Identifier, matched.clone(), span),
    };

    lexer.push(token);
    lexer.advance_n(matched.len());
}

fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('\\') => {
                result.push('\\');
                chars.next();
            }
            Some('"') => {
                result.push('"');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some('x') => {
                chars.next();

                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(digit) if digit.is_ascii_hexdigit() => {
                            hex.push(*digit);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    // Not an escape after all, keep the text as written
                    Err(_) => {
                        result.push('\\');
                        result.push('x');
                    }
                }
            }
            // Keep the backslash
            _ => result.push(ch),
        }
    }

    result
}

/// Splits `source` into tokens.
///
/// Never fails: unrecognised characters and malformed literals are reported
/// and skipped. The returned stream always ends with a single EOF token.
pub fn tokenize(source: &str) -> (Vec<Token>, DiagnosticBag) {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        match PATTERNS.iter().find(|pattern| pattern.regex.is_match(lex.remainder())) {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                if let Some(character) = lex.at() {
                    lex.diagnostics.report_bad_character(lex.pos, character);
                    lex.advance_n(character.len_utf8());
                }
            }
        }
    }

    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), Span::empty(lex.pos)));
    tracing::trace!(tokens = lex.tokens.len(), "tokenized source");

    (lex.tokens, lex.diagnostics)
}
