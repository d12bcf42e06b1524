//! Common items for locating language elements in source text.

/// Location in the source text of a language element instance.
///
/// The location is defined by byte indices into the compiled string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSpan {
    /// The position of the starting byte (0-indexed).
    pub start: usize,
    /// The position one past the ending byte (0-indexed).
    pub end: usize,
}

impl SourceSpan {
    pub fn range(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Joins two spans into the smallest span covering both.
    pub fn join(start: &SourceSpan, end: &SourceSpan) -> Self {
        Self {
            start: start.start,
            end: end.end,
        }
    }
}

/// Returns the 1-indexed line and column of a byte offset in the source.
///
/// Offsets past the end of the source report the position just after the
/// final character.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut line_start = 0;
    for (index, byte) in source.bytes().enumerate() {
        if index >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            line_start = index + 1;
        }
    }
    (line, offset.min(source.len()) - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_when_first_byte_then_line_one_column_one() {
        assert_eq!(line_col("x + y", 0), (1, 1));
    }

    #[test]
    fn line_col_when_after_newline_then_next_line() {
        assert_eq!(line_col("x;\ny", 3), (2, 1));
    }

    #[test]
    fn line_col_when_past_end_then_clamped() {
        assert_eq!(line_col("xy", 10), (1, 3));
    }
}
