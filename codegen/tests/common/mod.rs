//! Shared helpers for the code generation integration tests.
#![allow(dead_code)]

use mathjit_codegen::{compile, Program, ProgramEmitter};
use mathjit_dsl::context::Context;
use mathjit_optimizer::optimize;
use mathjit_parser::{parse, tokenize};

/// A context with variables `x`, `y`, `z` at slots 0, 1, 2 and the
/// built-ins registered.
pub fn test_context() -> Context {
    let mut ctx = Context::new();
    ctx.add_variable("x", 0).unwrap();
    ctx.add_variable("y", 8).unwrap();
    ctx.add_variable("z", 16).unwrap();
    ctx.add_builtins();
    ctx
}

/// Runs the full pipeline and returns the compiled program.
pub fn compile_source(source: &str) -> Program {
    let ctx = test_context();
    let (tokens, diagnostics) = tokenize(source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let mut ast = parse(&tokens, &ctx).unwrap();
    optimize(&mut ast);
    compile(&ast, ProgramEmitter::new()).unwrap()
}

/// Compiles and evaluates in one step.
pub fn evaluate(source: &str, data: &mut [f64]) -> f64 {
    compile_source(source).evaluate(data)
}
