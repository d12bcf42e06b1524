//! Boundary behaviors and error reporting through the public API.

mod common;

use common::{context, RecordingLog};
use mathjit::{Expression, MessageKind, Options, Problem};

#[test]
fn compile_when_empty_source_then_no_expression_and_no_log_error() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    let err = exp
        .compile(&ctx, "", Options::NONE, Some(&mut log))
        .unwrap_err();

    assert!(err.is_problem(Problem::NoExpression));
    assert!(log.entries.is_empty());
    assert!(!exp.is_compiled());
    assert!(exp.evaluate(&mut []).is_nan());
}

#[test]
fn compile_when_whitespace_only_then_no_expression() {
    let ctx = context();
    let mut exp = Expression::new();
    let err = exp
        .compile(&ctx, "  \t\n  // nothing here\n", Options::NONE, None)
        .unwrap_err();
    assert!(err.is_problem(Problem::NoExpression));
}

#[test]
fn compile_when_unterminated_block_comment_then_invalid_syntax() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    let err = exp
        .compile(&ctx, "x + /* oops", Options::NONE, Some(&mut log))
        .unwrap_err();

    assert!(err.is_problem(Problem::InvalidSyntax));
    let errors = log.messages_of(MessageKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("unterminated"), "{}", errors[0]);
}

#[test]
fn compile_when_unknown_character_then_invalid_syntax_with_position() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    let err = exp
        .compile(&ctx, "1 + $", Options::NONE, Some(&mut log))
        .unwrap_err();

    assert!(err.is_problem(Problem::InvalidSyntax));
    assert_eq!(err.primary.line, 1);
    assert_eq!(err.primary.column, 5);
}

#[test]
fn compile_when_unresolved_symbol_then_error_logged_with_position() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    let err = exp
        .compile(&ctx, "x +\n  missing", Options::NONE, Some(&mut log))
        .unwrap_err();

    assert!(err.is_problem(Problem::UnresolvedSymbol));
    let (kind, line, column, message) = &log.entries[0];
    assert_eq!(*kind, MessageKind::Error);
    assert_eq!(*line, 2);
    assert_eq!(*column, 3);
    assert!(message.contains("missing"), "{message}");
}

#[test]
fn compile_when_arity_mismatch_then_invalid_arity() {
    let ctx = context();
    let mut exp = Expression::new();
    let err = exp
        .compile(&ctx, "atan2(x)", Options::NONE, None)
        .unwrap_err();
    assert!(err.is_problem(Problem::InvalidArity));
}

#[test]
fn compile_when_assignment_to_constant_then_invalid_assignment() {
    let ctx = context();
    let mut exp = Expression::new();
    let err = exp
        .compile(&ctx, "PI = 3", Options::NONE, None)
        .unwrap_err();
    assert!(err.is_problem(Problem::InvalidAssignment));
}

#[test]
fn compile_when_recompile_fails_then_previous_program_survives() {
    let ctx = context();
    let mut exp = Expression::new();
    exp.compile(&ctx, "x + 1", Options::NONE, None).unwrap();

    let err = exp.compile(&ctx, "x +", Options::NONE, None).unwrap_err();
    assert!(err.is_problem(Problem::InvalidSyntax));

    // The expression still evaluates the previously compiled program.
    assert!(exp.is_compiled());
    let mut data = [41.0, 0.0, 0.0];
    assert_eq!(exp.evaluate(&mut data), 42.0);
}

#[test]
fn add_variable_when_misaligned_offset_then_invalid_argument() {
    let mut ctx = context();
    let err = ctx.add_variable("w", 4).unwrap_err();
    assert!(err.is_problem(Problem::InvalidArgument));
}

#[test]
fn add_constant_when_name_taken_then_already_exists() {
    let mut ctx = context();
    let err = ctx.add_constant("x", 1.0).unwrap_err();
    assert!(err.is_problem(Problem::AlreadyExists));
}
