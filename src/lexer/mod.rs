//! Lexical analysis.
//!
//! Turns submission text into a stream of tokens using an ordered table of
//! anchored regex patterns. Problems are reported to a diagnostic bag and the
//! offending text skipped, so tokenizing never fails.

pub mod lexer;
pub mod tokens;
