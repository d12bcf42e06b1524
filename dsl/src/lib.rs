//! Shared vocabulary for the expression compiler.
//!
//! This crate defines the objects that every stage of the pipeline speaks:
//! source spans, diagnostics, the arena-allocated syntax tree and the
//! symbol context that expressions are resolved against.

// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

pub mod ast;
pub mod builtins;
pub mod context;
pub mod core;
pub mod diagnostic;
