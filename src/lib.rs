#![allow(clippy::module_inception)]

pub mod ast;
pub mod binding;
pub mod compilation;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod lowering;
pub mod macros;
pub mod parser;
pub mod symbols;
pub mod value;

extern crate regex;

/// A half-open byte range `[start, end)` into the submitted source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Zero-width span, used for synthesised tokens.
    pub fn empty(position: usize) -> Self {
        Span { start: position, end: position }
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line text (including its newline if
/// any) and the offset of `position` within that line. Positions at or past
/// the end of the text resolve to the last line.
pub fn get_line_at_position(text: &str, position: usize) -> (usize, String, usize) {
    let pos = position.min(text.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in text.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    // Position sits at the very end: report against the final line
    match text.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => (line_number - 1, line.to_string(), line.len()),
        _ => (line_number, String::new(), 0),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let text = "Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(text, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(text, 30);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_text() {
        let (line_number, line, line_pos) = super::get_line_at_position("var a = 1\nvar", 13);
        assert_eq!(line_number, 2);
        assert_eq!(line, "var");
        assert_eq!(line_pos, 3);

        let (line_number, line, line_pos) = super::get_line_at_position("", 0);
        assert_eq!(line_number, 1);
        assert_eq!(line, "");
        assert_eq!(line_pos, 0);
    }

    #[test]
    fn test_span_to() {
        let span = super::Span::new(4, 6).to(super::Span::new(1, 2));
        assert_eq!(span, super::Span::new(1, 6));
        assert_eq!(span.length(), 5);
    }
}
