//! The backend-agnostic emitter capability.
//!
//! The lowering walk knows nothing about the backend; it allocates
//! virtual registers and issues instructions through this trait. A
//! backend maps virtual registers to whatever it has (machine registers
//! with spilling, or slots in a register file) and finalizes into its
//! own compiled artifact.

use thiserror::Error;

use mathjit_dsl::context::NativeFn;

/// A virtual register holding one `f64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reg(pub u16);

/// Unary machine operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    /// Flip the sign bit.
    Neg,
    /// Compare equal to 0.0, yielding 1.0 or 0.0.
    Not,
}

/// Binary machine operations. Power and remainder are not here: they
/// lower to calls of the native `pow`/`fmod` functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    CmpEq,
    CmpNe,
    CmpLt,
    CmpLe,
    CmpGt,
    CmpGe,
    /// Both operands evaluated; yields 1.0 when both are non-zero.
    And,
    /// Both operands evaluated; yields 1.0 when either is non-zero.
    Or,
}

/// Errors during code generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("virtual register file exhausted")]
    RegisterOverflow,
    #[error("constant pool exhausted")]
    ConstantPoolOverflow,
    #[error("cannot lower node: {0}")]
    Unsupported(String),
}

/// The capability a backend provides to the lowering walk.
pub trait Emitter {
    /// The compiled artifact the backend produces.
    type Code;

    /// Allocates a virtual register.
    fn alloc_reg(&mut self) -> Result<Reg, CodegenError>;

    /// Returns a register to the pool. The register may be handed out
    /// again by the next `alloc_reg`; instructions already emitted with
    /// it are unaffected.
    fn release_reg(&mut self, reg: Reg);

    /// Materializes a compile-time constant into `dst`.
    fn emit_const(&mut self, dst: Reg, value: f64);

    /// Loads the `f64` at slot `slot` of the data record into `dst`.
    fn emit_load(&mut self, dst: Reg, slot: u16);

    /// Stores `src` to slot `slot` of the data record.
    fn emit_store(&mut self, slot: u16, src: Reg);

    fn emit_unop(&mut self, op: UnOp, dst: Reg, src: Reg);

    /// `dst` may alias an operand; operands are read before `dst` is
    /// written.
    fn emit_binop(&mut self, op: BinOp, dst: Reg, lhs: Reg, rhs: Reg);

    /// Calls a native function with arguments marshaled from `args`,
    /// placing the result in `dst`. The name is for listings only.
    fn emit_call(&mut self, dst: Reg, name: &str, func: NativeFn, args: &[Reg]);

    /// Ends the program, returning the value in `src`.
    fn emit_ret(&mut self, src: Reg);

    /// Finalizes the emitted instructions into the compiled artifact.
    fn finalize(self) -> Result<Self::Code, CodegenError>;
}
