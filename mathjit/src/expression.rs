//! A compiled expression and the pipeline that produces it.

use log::debug;

use mathjit_codegen::{compile as lower, Program, ProgramEmitter};
use mathjit_dsl::ast::{Ast, BinaryOp, NodeId, NodeKind};
use mathjit_dsl::context::Context;
use mathjit_dsl::core::line_col;
use mathjit_dsl::diagnostic::{Diagnostic, Label};
use mathjit_optimizer::optimize;
use mathjit_parser::{parse, tokenize};
use mathjit_problems::Problem;

use crate::options::Options;
use crate::output::{MessageKind, OutputLog};

/// A compiled expression.
///
/// Compilation replaces the held program only on success: after an error
/// the expression keeps evaluating whatever it held before, or returns
/// NaN when nothing compiled yet.
#[derive(Debug, Default)]
pub struct Expression {
    program: Option<Program>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `source` against the context.
    ///
    /// The context is only read during this call; the compiled program
    /// holds no reference to it. On any error besides `NoExpression` the
    /// output log (when given) receives an error message with its source
    /// position.
    pub fn compile(
        &mut self,
        ctx: &Context,
        source: &str,
        options: Options,
        mut log: Option<&mut dyn OutputLog>,
    ) -> Result<(), Diagnostic> {
        match build(ctx, source, options, &mut log) {
            Ok(program) => {
                self.program = Some(program);
                Ok(())
            }
            Err(diagnostic) => {
                // An empty source is a status, not an error worth logging.
                if !diagnostic.is_problem(Problem::NoExpression) {
                    emit(
                        &mut log,
                        MessageKind::Error,
                        diagnostic.primary.line,
                        diagnostic.primary.column,
                        &diagnostic.message(),
                    );
                }
                Err(diagnostic)
            }
        }
    }

    /// Evaluates the compiled program against a data record. Variable
    /// slots are read and written through `data`. Returns NaN when
    /// nothing is compiled.
    pub fn evaluate(&self, data: &mut [f64]) -> f64 {
        match &self.program {
            Some(program) => program.evaluate(data),
            None => f64::NAN,
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.program.is_some()
    }
}

/// The pipeline as individual stages: tokenize, parse, optimize, lower.
fn build(
    ctx: &Context,
    source: &str,
    options: Options,
    log: &mut Option<&mut dyn OutputLog>,
) -> Result<Program, Diagnostic> {
    let (tokens, mut diagnostics) = tokenize(source);
    if !diagnostics.is_empty() {
        return Err(diagnostics.remove(0));
    }
    debug!("tokenized {} tokens", tokens.len());

    let mut ast = parse(&tokens, ctx)?;
    if options.contains(Options::DEBUG_AST) {
        emit(log, MessageKind::AstInitial, 0, 0, &ast.dump());
    }
    if options.contains(Options::VERBOSE) {
        warn_unused_statements(&ast, source, log);
    }

    optimize(&mut ast);
    if options.contains(Options::DEBUG_AST) {
        emit(log, MessageKind::AstFinal, 0, 0, &ast.dump());
    }

    let program = lower(&ast, ProgramEmitter::new())
        .map_err(|e| Diagnostic::problem(Problem::JitFailure, Label::context_free(e.to_string())))?;
    debug!("compiled into a {}-slot program", program.slot_count());

    if options.contains(Options::DEBUG_MACHINE_CODE) {
        emit(log, MessageKind::MachineCode, 0, 0, &program.disassemble());
    }

    Ok(program)
}

fn emit(
    log: &mut Option<&mut dyn OutputLog>,
    kind: MessageKind,
    line: usize,
    column: usize,
    message: &str,
) {
    if let Some(log) = log.as_deref_mut() {
        log.log(kind, line, column, message);
    }
}

/// A statement other than the last one computes a value nobody reads;
/// unless it assigns somewhere, it is almost certainly a mistake.
fn warn_unused_statements(ast: &Ast, source: &str, log: &mut Option<&mut dyn OutputLog>) {
    let NodeKind::Block { children } = &ast.arena.node(ast.root).kind else {
        return;
    };
    for &stmt in &children[..children.len() - 1] {
        if !contains_assignment(ast, stmt) {
            let (line, column) = line_col(source, ast.arena.node(stmt).span.start);
            emit(
                log,
                MessageKind::Warning,
                line,
                column,
                Problem::UnusedValue.message(),
            );
        }
    }
}

fn contains_assignment(ast: &Ast, id: NodeId) -> bool {
    let kind = &ast.arena.node(id).kind;
    if matches!(
        kind,
        NodeKind::Binary {
            op: BinaryOp::Assign,
            ..
        }
    ) {
        return true;
    }
    kind.children()
        .iter()
        .any(|child| contains_assignment(ast, *child))
}
