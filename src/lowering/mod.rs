//! Control-flow lowering.
//!
//! Rewrites `if`, `while` and `for` into labels and jumps and flattens the
//! result into a single block the evaluator can index.

pub mod lowerer;
