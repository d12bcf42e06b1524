//! The output log channels driven by the option bits.

mod common;

use common::{context, RecordingLog};
use mathjit::{Expression, MessageKind, Options, Problem};

#[test]
fn compile_when_debug_ast_then_initial_and_final_dumps() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    exp.compile(&ctx, "1+2*3", Options::DEBUG_AST, Some(&mut log))
        .unwrap();

    let initial = log.messages_of(MessageKind::AstInitial);
    let after = log.messages_of(MessageKind::AstFinal);
    assert_eq!(initial.len(), 1);
    assert_eq!(after.len(), 1);
    assert!(initial[0].contains("Binary(+)"), "{}", initial[0]);
    assert!(initial[0].contains("Immediate(2)"), "{}", initial[0]);
    assert!(after[0].contains("Immediate(7)"), "{}", after[0]);
    assert!(!after[0].contains("Binary"), "{}", after[0]);
}

#[test]
fn compile_when_debug_machine_code_then_listing_emitted() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    exp.compile(
        &ctx,
        "x + y",
        Options::DEBUG_MACHINE_CODE,
        Some(&mut log),
    )
    .unwrap();

    let listings = log.messages_of(MessageKind::MachineCode);
    assert_eq!(listings.len(), 1);
    assert!(listings[0].contains("load"), "{}", listings[0]);
    assert!(listings[0].contains("ret"), "{}", listings[0]);
}

#[test]
fn compile_when_no_options_then_log_stays_silent_on_success() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    exp.compile(&ctx, "x + 1; x", Options::NONE, Some(&mut log))
        .unwrap();

    assert!(log.entries.is_empty());
}

#[test]
fn compile_when_verbose_then_unused_statement_warned() {
    let ctx = context();
    let mut log = RecordingLog::new();
    let mut exp = Expression::new();

    exp.compile(
        &ctx,
        "x + 1; x = 2; x",
        Options::VERBOSE,
        Some(&mut log),
    )
    .unwrap();

    let (kind, line, column, message) = &log.entries[0];
    assert_eq!(*kind, MessageKind::Warning);
    assert_eq!((*line, *column), (1, 1));
    assert_eq!(message.as_str(), Problem::UnusedValue.message());
    // The assignment and the final statement are not warned about.
    assert_eq!(log.entries.len(), 1);
}

#[test]
fn compile_when_unknown_option_bits_then_ignored() {
    let ctx = context();
    let mut exp = Expression::new();
    exp.compile(&ctx, "x", Options::from_bits(0xABC0), None)
        .unwrap();
    assert!(exp.is_compiled());
}
