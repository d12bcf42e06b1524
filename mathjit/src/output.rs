//! The output log capability.
//!
//! The compiler reports errors, warnings and debug dumps through this
//! trait; the embedder decides where they go. This channel is for the
//! user of the library, distinct from the `log` crate facade the
//! pipeline uses for its own tracing.

/// What a logged message is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// The compilation failed; the message says why.
    Error,
    /// Something is suspect but compilation continues.
    Warning,
    /// The syntax tree as parsed.
    AstInitial,
    /// The syntax tree after optimization.
    AstFinal,
    /// The compiled program listing.
    MachineCode,
}

/// Receives messages from the compiler.
///
/// Line and column are 1-indexed and refer to the compiled source text;
/// both are 0 for messages about the compilation as a whole (the debug
/// dumps in particular).
pub trait OutputLog {
    fn log(&mut self, kind: MessageKind, line: usize, column: usize, message: &str);
}
