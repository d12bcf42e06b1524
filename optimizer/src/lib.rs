//! Optimizer for the expression compiler.
//!
//! A single bottom-up pass rewrites the tree in place inside the arena:
//! constant folding, double-negation elimination and re-association of
//! commutative chains to bring constants together. The pass never adds
//! or removes assignments.

mod xform_fold_constants;

use mathjit_dsl::ast::Ast;

/// Simplifies the tree in place.
pub fn optimize(ast: &mut Ast) {
    xform_fold_constants::apply(ast);
}
