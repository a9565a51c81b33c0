//! Submission-level coordination.
//!
//! A `Compilation` owns one parsed submission, binds it on first use and
//! chains onto the compilation that came before it in a session.

pub mod compilation;
