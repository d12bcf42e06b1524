//! Bottom-up constant folding and re-association.
//!
//! Children are visited before their parent, so by the time a node is
//! inspected everything reducible below it is already an immediate. Only
//! explicit immediates count as constant.
//!
//! Rewrites orphan replaced nodes inside the arena; parent back-edges of
//! live nodes are kept current throughout.

use log::debug;
use mathjit_dsl::ast::{Arena, Ast, BinaryOp, NodeId, NodeKind, UnaryOp};
use mathjit_dsl::context::NativeFn;

pub fn apply(ast: &mut Ast) {
    let root = on_node(&mut ast.arena, ast.root);
    ast.arena.set_parent(root, None);
    ast.root = root;
}

/// Visits one node and returns its (possibly new) id. The caller rewires
/// its own child slot when the id changed.
fn on_node(arena: &mut Arena, id: NodeId) -> NodeId {
    match &arena.node(id).kind {
        NodeKind::Immediate(_) | NodeKind::Variable { .. } => id,
        NodeKind::Block { children } => {
            let children = children.clone();
            on_block(arena, id, &children)
        }
        NodeKind::Unary { op, child } => {
            let (op, child) = (*op, *child);
            on_unary(arena, id, op, child)
        }
        NodeKind::Binary { op, left, right } => {
            let (op, left, right) = (*op, *left, *right);
            on_binary(arena, id, op, left, right)
        }
        NodeKind::Call { func, args, .. } => {
            let func = *func;
            let args = args.clone();
            on_call(arena, id, func, &args)
        }
    }
}

fn on_block(arena: &mut Arena, id: NodeId, children: &[NodeId]) -> NodeId {
    for &child in children {
        visit_child(arena, id, child);
    }
    id
}

fn on_unary(arena: &mut Arena, id: NodeId, op: UnaryOp, child: NodeId) -> NodeId {
    let child = visit_child(arena, id, child);

    if let Some(value) = arena.immediate_value(child) {
        return replace_with_immediate(arena, id, op.apply(value));
    }

    // "-(-x)" simplifies to "x". "!!x" simplifies to "x" only when x is
    // already boolean-valued; for a plain double the double-not is a
    // normalization to 0/1 and must stay.
    if let NodeKind::Unary {
        op: inner,
        child: grandchild,
    } = arena.node(child).kind
    {
        let collapses = match (op, inner) {
            (UnaryOp::Negate, UnaryOp::Negate) => true,
            (UnaryOp::Not, UnaryOp::Not) => is_boolean_valued(arena, grandchild),
            _ => false,
        };
        if collapses {
            let parent = arena.node(id).parent;
            arena.set_parent(grandchild, parent);
            return grandchild;
        }
    }

    id
}

fn on_binary(arena: &mut Arena, id: NodeId, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
    let left = visit_child(arena, id, left);
    let right = visit_child(arena, id, right);

    let left_value = arena.immediate_value(left);
    let right_value = arena.immediate_value(right);

    match (left_value, right_value) {
        (Some(l), Some(r)) => {
            // Assign has a side effect and reports None; its left child
            // is a variable anyway, so this arm never sees it.
            if let Some(value) = op.apply(l, r) {
                return replace_with_immediate(arena, id, value);
            }
        }
        (Some(_), None) if reassociable(op) => join_deep_constant(arena, op, left, right),
        (None, Some(_)) if reassociable(op) => join_deep_constant(arena, op, right, left),
        _ => {}
    }

    id
}

fn on_call(arena: &mut Arena, id: NodeId, func: NativeFn, args: &[NodeId]) -> NodeId {
    let mut values = Vec::with_capacity(args.len());
    let mut all_constant = true;
    for &arg in args {
        let arg = visit_child(arena, id, arg);
        match arena.immediate_value(arg) {
            Some(value) => values.push(value),
            None => all_constant = false,
        }
    }

    if all_constant {
        return replace_with_immediate(arena, id, func.invoke(&values));
    }

    id
}

/// Recurses into a child and rewires the parent's slot when the child
/// was replaced. Returns the current child id.
fn visit_child(arena: &mut Arena, parent: NodeId, child: NodeId) -> NodeId {
    let new = on_node(arena, child);
    if new != child {
        arena.replace_child(parent, child, new);
    }
    new
}

fn replace_with_immediate(arena: &mut Arena, old: NodeId, value: f64) -> NodeId {
    debug!("folding {old} to {value}");
    let span = arena.node(old).span.clone();
    let parent = arena.node(old).parent;
    let imm = arena.alloc(NodeKind::Immediate(value), span);
    arena.set_parent(imm, parent);
    imm
}

/// Only `+` and `*` may be re-associated.
fn reassociable(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Add | BinaryOp::Mul)
}

/// One side of the node is the immediate `constant`, the other side is
/// `chain`. If the chain is built from the same operator and holds an
/// immediate somewhere inside, fold that immediate into `constant` and
/// splice it out of the chain. At most one constant is joined per visit;
/// the bottom-up walk has already combined anything deeper.
fn join_deep_constant(arena: &mut Arena, op: BinaryOp, constant: NodeId, chain: NodeId) {
    let Some(deep) = find_constant(arena, chain, op) else {
        return;
    };

    let parent = arena.node(deep).parent.expect("chain constant has a parent");
    let (left, right) = match &arena.node(parent).kind {
        NodeKind::Binary { left, right, .. } => (*left, *right),
        _ => unreachable!("chain interior is a binary node"),
    };
    let keep = if right == deep { left } else { right };

    // Splice: the parent collapses into the sibling we keep.
    let grandparent = arena
        .node(parent)
        .parent
        .expect("chain interior has a parent");
    arena.replace_child(grandparent, parent, keep);

    let near = arena.immediate_value(constant).expect("joined node is an immediate");
    let far = arena.immediate_value(deep).expect("found node is an immediate");
    let combined = op.apply(near, far).expect("operator is pure");
    debug!(
        "joining constants {near} {} {far} across the chain",
        op.symbol()
    );
    arena.node_mut(constant).kind = NodeKind::Immediate(combined);
}

/// Finds an immediate inside a chain of binary nodes that all use `op`.
/// Shallower finds win; left before right, as the evaluation order goes.
fn find_constant(arena: &Arena, id: NodeId, op: BinaryOp) -> Option<NodeId> {
    match &arena.node(id).kind {
        NodeKind::Binary {
            op: node_op,
            left,
            right,
        } if *node_op == op => {
            let (left, right) = (*left, *right);
            if arena.is_immediate(left) {
                return Some(left);
            }
            if arena.is_immediate(right) {
                return Some(right);
            }
            find_constant(arena, left, op).or_else(|| find_constant(arena, right, op))
        }
        _ => None,
    }
}

fn is_boolean_valued(arena: &Arena, id: NodeId) -> bool {
    matches!(
        &arena.node(id).kind,
        NodeKind::Unary {
            op: UnaryOp::Not,
            ..
        } | NodeKind::Binary {
            op: BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or,
            ..
        }
    )
}
