//! Error types for Q96 liquidity math
//!
//! Every failure in this crate is a precondition violation on the inputs.
//! Nothing is retried and no partial result is produced.

use thiserror::Error;

/// Result alias used by every fallible calculation in the crate
pub type MathResult<T> = Result<T, DomainError>;

/// Domain or arithmetic precondition violated by a caller-supplied value
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DomainError {
    /// Logarithm of a price at or below zero
    #[error("Price must be positive, got {price}")]
    NonPositivePrice { price: f64 },

    /// Square root of a negative price
    #[error("Price must be non-negative, got {price}")]
    NegativePrice { price: f64 },

    /// NaN or infinite price
    #[error("Price is not finite: {price}")]
    NonFinitePrice { price: f64 },

    /// Range with identical bounds used as a divisor
    #[error("Price range has zero width")]
    ZeroWidthRange,

    /// Zero sqrt price used as a divisor
    #[error("Price range bound is zero")]
    ZeroBound,

    /// Result or intermediate product exceeds the integer width
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DomainError::NonPositivePrice { price: -1.0 }.to_string(),
            "Price must be positive, got -1"
        );
        assert_eq!(
            DomainError::Overflow {
                operation: "liquidity_from_amount0"
            }
            .to_string(),
            "Arithmetic overflow in liquidity_from_amount0"
        );
        assert_eq!(DomainError::ZeroWidthRange.to_string(), "Price range has zero width");
    }
}
