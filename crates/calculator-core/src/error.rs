//! Error types for the calculator.
//!
//! Every rejection the calculator can produce (unparseable operands,
//! non-numeric operands, division by zero, results that do not fit) is the
//! same kind of error: bad input. The message tells the caller which.

use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Message for an operand token that is not a numeric literal.
pub const NOT_A_NUMBER: &str = "Operator cannot be converted to number";

/// Message for an operand that is not numeric.
pub const NOT_NUMERIC: &str = "Parameters must be numbers";

/// Message for a zero divisor.
pub const DIVISION_BY_ZERO: &str = "Division by zero is not possible";

/// Message for a result outside the representable range.
pub const OUT_OF_RANGE: &str = "Result is out of range";

/// Message for a power with no real result.
pub const NOT_REAL: &str = "Result is not a real number";

/// The error type for calculator operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// An operand was rejected, either while parsing or while computing.
    #[error("{message}")]
    InvalidOperand {
        /// Human-readable reason, safe to return to clients.
        message: String,
    },
}

impl CalcError {
    /// Creates an invalid operand error.
    #[must_use]
    pub fn invalid_operand(message: impl Into<String>) -> Self {
        Self::InvalidOperand {
            message: message.into(),
        }
    }

    /// Creates the error for a token that does not parse as a number.
    #[must_use]
    pub fn not_a_number() -> Self {
        Self::invalid_operand(NOT_A_NUMBER)
    }

    /// Creates the error for an operand that is not numeric.
    #[must_use]
    pub fn not_numeric() -> Self {
        Self::invalid_operand(NOT_NUMERIC)
    }

    /// Creates a division by zero error.
    #[must_use]
    pub fn division_by_zero() -> Self {
        Self::invalid_operand(DIVISION_BY_ZERO)
    }

    /// Creates an out of range error.
    #[must_use]
    pub fn out_of_range() -> Self {
        Self::invalid_operand(OUT_OF_RANGE)
    }

    /// Creates the error for a power without a real result.
    #[must_use]
    pub fn not_real() -> Self {
        Self::invalid_operand(NOT_REAL)
    }

    /// The human-readable message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidOperand { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_bare_message() {
        let err = CalcError::division_by_zero();
        assert_eq!(err.to_string(), "Division by zero is not possible");
        assert_eq!(err.message(), DIVISION_BY_ZERO);
    }

    #[test]
    fn test_custom_message() {
        let err = CalcError::invalid_operand("Unsupported operation: modulo");
        assert!(err.to_string().contains("modulo"));
    }
}
