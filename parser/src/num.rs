//! Conversion of numeric literals to `f64` values.
//!
//! The lexer guarantees the shape of a literal; this module turns the
//! matched text into a value. Rust's float parser is locale-independent
//! and correctly rounded (ties to even) on every platform, so it is the
//! decimal-to-double converter here. The decimal point is always `.`.

use core::fmt;

/// Why a lexically-valid literal failed to convert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberError {
    /// The text is not a number at all. The lexer makes this unreachable
    /// for literals it matched, but the module accepts arbitrary text.
    Malformed,
    /// The literal is finite in source but rounds to infinity.
    Overflow,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::Malformed => write!(f, "malformed numeric literal"),
            NumberError::Overflow => write!(f, "numeric literal is too large"),
        }
    }
}

/// Parses a numeric literal.
///
/// Overflow to infinity is an error because the source spelled a finite
/// value; underflow to zero is accepted.
pub fn parse_number(text: &str) -> Result<f64, NumberError> {
    let value: f64 = text.parse().map_err(|_| NumberError::Malformed)?;
    if value.is_infinite() {
        return Err(NumberError::Overflow);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_number_when_simple_forms_then_exact_values() {
        assert_eq!(parse_number("0"), Ok(0.0));
        assert_eq!(parse_number("42"), Ok(42.0));
        assert_eq!(parse_number("1."), Ok(1.0));
        assert_eq!(parse_number(".5"), Ok(0.5));
        assert_eq!(parse_number("1e3"), Ok(1000.0));
        assert_eq!(parse_number("2.5E-1"), Ok(0.25));
    }

    #[test]
    fn parse_number_when_tenth_then_known_bit_pattern() {
        assert_eq!(parse_number("0.1").unwrap().to_bits(), 0x3FB999999999999A);
    }

    #[test]
    fn parse_number_when_halfway_case_then_ties_to_even() {
        // 1 + 2^-53 is exactly halfway between 1.0 and the next float;
        // correct rounding picks the even neighbor 1.0.
        let halfway = "1.00000000000000011102230246251565404236316680908203125";
        assert_eq!(parse_number(halfway), Ok(1.0));
    }

    #[test]
    fn parse_number_when_overflows_to_infinity_then_error() {
        assert_eq!(parse_number("1e400"), Err(NumberError::Overflow));
    }

    #[test]
    fn parse_number_when_underflows_to_zero_then_zero() {
        assert_eq!(parse_number("1e-400"), Ok(0.0));
    }

    #[test]
    fn parse_number_when_not_a_number_then_malformed() {
        assert_eq!(parse_number("abc"), Err(NumberError::Malformed));
        assert_eq!(parse_number(""), Err(NumberError::Malformed));
    }

    proptest! {
        #[test]
        fn parse_number_when_formatted_finite_value_then_bitwise_roundtrip(
            value in any::<f64>()
        ) {
            prop_assume!(value.is_finite());
            let value = value.abs();
            let text = format!("{value:?}");
            let parsed = parse_number(&text).unwrap();
            prop_assert_eq!(parsed.to_bits(), value.to_bits());
        }
    }
}
