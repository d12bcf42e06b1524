//! Code generation for the expression compiler.
//!
//! [`compile`] walks the optimized tree and drives an [`Emitter`], the
//! abstract capability any backend satisfies: virtual double-precision
//! registers, loads and stores against the caller's data record, scalar
//! arithmetic, comparisons yielding 0.0/1.0, and calls to native
//! functions. The crate ships one backend, [`ProgramEmitter`], which
//! finalizes into a portable register [`Program`]; a native assembler
//! would implement the same trait and finalize into an executable page.

mod compile;
mod emit;
mod program;

pub use compile::compile;
pub use emit::{BinOp, CodegenError, Emitter, Reg, UnOp};
pub use program::{Program, ProgramEmitter};
