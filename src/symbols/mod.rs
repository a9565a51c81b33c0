//! Symbol and type model.
//!
//! Immutable descriptors for types, variables, functions, parameters and
//! jump labels. Variables, functions and labels compare by identity.

pub mod builtins;
pub mod symbols;

#[cfg(test)]
mod tests;
