//! Semantic analysis.
//!
//! The binder resolves names against a tree of scopes, assigns static types,
//! resolves operators and produces the bound tree. Problems are accumulated
//! as diagnostics; binding always yields a complete tree.

pub mod binder;
pub mod bound_tree;
pub mod operators;
pub mod scope;

#[cfg(test)]
mod tests;
