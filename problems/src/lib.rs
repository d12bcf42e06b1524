//! Stable problem codes for compiler diagnostics.
//!
//! The codes are defined in `resources/problem-codes.csv` and turned into
//! the `Problem` enumeration by the build script. Error codes begin with
//! `E`, warning codes with `W`.

include!(concat!(env!("OUT_DIR"), "/problems.rs"));

impl Problem {
    /// Returns true if this problem is a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        self.code().starts_with('W')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_when_no_expression_then_stable_value() {
        assert_eq!(Problem::NoExpression.code(), "E0001");
    }

    #[test]
    fn is_warning_when_unused_value_then_true() {
        assert!(Problem::UnusedValue.is_warning());
        assert!(!Problem::InvalidSyntax.is_warning());
    }
}
