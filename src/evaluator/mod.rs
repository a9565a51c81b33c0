//! Execution of lowered programs.
//!
//! The evaluator walks a flat statement list with an instruction pointer,
//! resolving jumps through a label table built up front. Built-in functions
//! reach the outside world through the `Console` trait.

pub mod console;
pub mod evaluator;

#[cfg(test)]
mod tests;
