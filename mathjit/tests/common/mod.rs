//! Shared helpers for the public API integration tests.
#![allow(dead_code)]

use mathjit::{Context, Expression, MessageKind, Options, OutputLog};

/// A context with variables `x`, `y`, `z` at slots 0, 1, 2 and the
/// built-ins registered.
pub fn context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut ctx = Context::new();
    ctx.add_variable("x", 0).unwrap();
    ctx.add_variable("y", 8).unwrap();
    ctx.add_variable("z", 16).unwrap();
    ctx.add_builtins();
    ctx
}

/// Compiles with no options and panics on failure.
pub fn compiled(source: &str) -> Expression {
    let ctx = context();
    let mut exp = Expression::new();
    exp.compile(&ctx, source, Options::NONE, None)
        .unwrap_or_else(|e| panic!("{source:?} failed to compile: {}", e.message()));
    exp
}

/// An output log that records everything it receives.
#[derive(Default)]
pub struct RecordingLog {
    pub entries: Vec<(MessageKind, usize, usize, String)>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages_of(&self, kind: MessageKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _, _, _)| *k == kind)
            .map(|(_, _, _, m)| m.as_str())
            .collect()
    }
}

impl OutputLog for RecordingLog {
    fn log(&mut self, kind: MessageKind, line: usize, column: usize, message: &str) {
        self.entries.push((kind, line, column, message.to_string()));
    }
}
