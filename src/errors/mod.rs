//! Error types and diagnostic reporting.
//!
//! Two disjoint classes live here:
//!
//! - `Diagnostic`/`DiagnosticBag`: user-facing problems found by the lexer,
//!   parser and binder, accumulated rather than returned early
//! - `EvaluationError`: internal consistency faults raised by the evaluator

pub mod errors;

#[cfg(test)]
mod tests;
