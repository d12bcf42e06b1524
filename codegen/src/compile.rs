//! Lowers the syntax tree into emitter instructions.
//!
//! A straightforward tree walk: children first, left to right, parent op
//! after its children. Operand registers are released before the result
//! register is allocated, so register pressure is bounded by tree depth
//! and a result may reuse an operand's register.

use log::debug;

use mathjit_dsl::ast::{Ast, BinaryOp, NodeId, NodeKind, UnaryOp};
use mathjit_dsl::context::NativeFn;

use crate::emit::{BinOp, CodegenError, Emitter, Reg, UnOp};

fn native_pow(x: f64, y: f64) -> f64 {
    x.powf(y)
}

fn native_fmod(x: f64, y: f64) -> f64 {
    x % y
}

/// `^` lowers to a call of this function.
const POW: NativeFn = NativeFn::F2(native_pow);

/// `%` lowers to a call of this function.
const FMOD: NativeFn = NativeFn::F2(native_fmod);

/// Lowers a tree through the emitter and finalizes the backend's
/// compiled artifact.
pub fn compile<E: Emitter>(ast: &Ast, mut emitter: E) -> Result<E::Code, CodegenError> {
    let result = gen(ast, &mut emitter, ast.root)?;
    emitter.emit_ret(result);
    debug!("lowered {} arena nodes", ast.arena.len());
    emitter.finalize()
}

fn gen<E: Emitter>(ast: &Ast, emitter: &mut E, id: NodeId) -> Result<Reg, CodegenError> {
    match &ast.arena.node(id).kind {
        NodeKind::Immediate(value) => {
            let dst = emitter.alloc_reg()?;
            emitter.emit_const(dst, *value);
            Ok(dst)
        }
        NodeKind::Variable { slot, .. } => {
            let dst = emitter.alloc_reg()?;
            emitter.emit_load(dst, *slot);
            Ok(dst)
        }
        NodeKind::Unary { op, child } => {
            let src = gen(ast, emitter, *child)?;
            emitter.release_reg(src);
            let dst = emitter.alloc_reg()?;
            let op = match op {
                UnaryOp::Negate => UnOp::Neg,
                UnaryOp::Not => UnOp::Not,
            };
            emitter.emit_unop(op, dst, src);
            Ok(dst)
        }
        NodeKind::Binary { op, left, right } => gen_binary(ast, emitter, *op, *left, *right),
        NodeKind::Call { name, func, args } => {
            let mut arg_regs = Vec::with_capacity(args.len());
            for &arg in args {
                arg_regs.push(gen(ast, emitter, arg)?);
            }
            for &reg in &arg_regs {
                emitter.release_reg(reg);
            }
            let dst = emitter.alloc_reg()?;
            emitter.emit_call(dst, name, *func, &arg_regs);
            Ok(dst)
        }
        NodeKind::Block { children } => {
            let mut result = None;
            for (index, &child) in children.iter().enumerate() {
                let reg = gen(ast, emitter, child)?;
                if index + 1 == children.len() {
                    result = Some(reg);
                } else {
                    emitter.release_reg(reg);
                }
            }
            result.ok_or_else(|| CodegenError::Unsupported("empty block".to_string()))
        }
    }
}

fn gen_binary<E: Emitter>(
    ast: &Ast,
    emitter: &mut E,
    op: BinaryOp,
    left: NodeId,
    right: NodeId,
) -> Result<Reg, CodegenError> {
    // Assignment: evaluate the right side, store it through the left
    // variable's slot and yield the stored value.
    if op == BinaryOp::Assign {
        let slot = match &ast.arena.node(left).kind {
            NodeKind::Variable { slot, .. } => *slot,
            other => {
                return Err(CodegenError::Unsupported(format!(
                    "assignment to non-variable node: {other:?}"
                )))
            }
        };
        let value = gen(ast, emitter, right)?;
        emitter.emit_store(slot, value);
        return Ok(value);
    }

    // Power and remainder lower to native calls.
    if let Some((name, func)) = match op {
        BinaryOp::Pow => Some(("pow", POW)),
        BinaryOp::Mod => Some(("fmod", FMOD)),
        _ => None,
    } {
        let lhs = gen(ast, emitter, left)?;
        let rhs = gen(ast, emitter, right)?;
        emitter.release_reg(lhs);
        emitter.release_reg(rhs);
        let dst = emitter.alloc_reg()?;
        emitter.emit_call(dst, name, func, &[lhs, rhs]);
        return Ok(dst);
    }

    let machine_op = match op {
        BinaryOp::Add => BinOp::Add,
        BinaryOp::Sub => BinOp::Sub,
        BinaryOp::Mul => BinOp::Mul,
        BinaryOp::Div => BinOp::Div,
        BinaryOp::Eq => BinOp::CmpEq,
        BinaryOp::Ne => BinOp::CmpNe,
        BinaryOp::Lt => BinOp::CmpLt,
        BinaryOp::Le => BinOp::CmpLe,
        BinaryOp::Gt => BinOp::CmpGt,
        BinaryOp::Ge => BinOp::CmpGe,
        BinaryOp::And => BinOp::And,
        BinaryOp::Or => BinOp::Or,
        BinaryOp::Mod | BinaryOp::Pow | BinaryOp::Assign => unreachable!("handled above"),
    };

    let lhs = gen(ast, emitter, left)?;
    let rhs = gen(ast, emitter, right)?;
    emitter.release_reg(lhs);
    emitter.release_reg(rhs);
    let dst = emitter.alloc_reg()?;
    emitter.emit_binop(machine_op, dst, lhs, rhs);
    Ok(dst)
}
