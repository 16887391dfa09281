// ============================================================================
// Decimal Errors
// Error types for 96-bit decimal arithmetic operations
// ============================================================================

use std::fmt;

/// Errors that can occur during decimal arithmetic and conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalError {
    /// Result cannot be represented: the scale would drop below zero or the
    /// mantissa exceeds 96 bits even at scale zero
    Overflow,
    /// A non-digit character was encountered while parsing
    InvalidCharacter,
    /// Attempted division by zero
    DivideByZero,
    /// Internal scale bookkeeping left its expected range
    Internal,
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Overflow => {
                write!(f, "arithmetic overflow: value not representable in 96 bits")
            },
            DecimalError::InvalidCharacter => {
                write!(f, "invalid character: expected a decimal digit")
            },
            DecimalError::DivideByZero => write!(f, "division by zero"),
            DecimalError::Internal => {
                write!(f, "internal error: scale adjustment out of expected range")
            },
        }
    }
}

impl std::error::Error for DecimalError {}

/// Result type alias for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DecimalError::Overflow.to_string(),
            "arithmetic overflow: value not representable in 96 bits"
        );
        assert_eq!(DecimalError::DivideByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(DecimalError::Overflow, DecimalError::Overflow);
        assert_ne!(DecimalError::Overflow, DecimalError::InvalidCharacter);
    }
}
