//! Provides definitions for diagnostics, which are normally errors and
//! warnings associated with compilation.

use mathjit_problems::Problem;

use crate::core::SourceSpan;

/// A label that refers to some range in the source text together with a
/// message related to that range.
///
/// Normally this indicates the location of an error or warning along with
/// text describing what was found at that position.
#[derive(Debug)]
pub struct Label {
    /// The position of the label.
    pub span: SourceSpan,

    /// Line of the start of the span (1-indexed).
    pub line: usize,

    /// Column of the start of the span (1-indexed).
    pub column: usize,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn position(
        span: SourceSpan,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            span,
            line,
            column,
            message: message.into(),
        }
    }

    /// A label that refers to the compilation as a whole rather than a
    /// particular position in the source text.
    pub fn context_free(message: impl Into<String>) -> Self {
        Self {
            span: SourceSpan::default(),
            line: 0,
            column: 0,
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostics have a code that is indicative of the
/// category and a primary location in the source text.
#[derive(Debug)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    /// The primary position for the diagnostic.
    pub primary: Label,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code with the specified label.
    ///
    /// The label associates the problem with a particular position in the
    /// compiled expression.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            primary,
        }
    }

    /// Returns the constant description for the diagnostic's problem.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the full human-readable message: the problem description
    /// followed by the position-specific detail.
    pub fn message(&self) -> String {
        if self.primary.message.is_empty() {
            self.description.clone()
        } else {
            format!("{}: {}", self.description, self.primary.message)
        }
    }

    /// Returns true if this diagnostic matches the problem.
    pub fn is_problem(&self, problem: Problem) -> bool {
        self.code == problem.code()
    }
}
