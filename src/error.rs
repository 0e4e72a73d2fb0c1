//! Error types for field construction and arithmetic.

use thiserror::Error;

/// Errors raised while constructing fields or operating on their elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A binary operation mixed elements of two different fields.
    #[error("elements belong to different fields")]
    FieldMismatch,

    /// Inversion or division by zero, or a polynomial division by a
    /// divisor whose leading coefficient has no inverse.
    #[error("division by zero is undefined")]
    DivisionUndefined,

    /// The extension degree must be at least 1.
    #[error("extension degree must be positive")]
    InvalidExtensionDegree,

    /// The characteristic must be at least 2 and fit in an `i64`.
    #[error("modulus {p} is out of range")]
    InvalidModulus { p: u64 },

    /// An extension field was requested without an irreducible polynomial.
    #[error("extension field of degree {m} requires an irreducible polynomial")]
    MissingIrreducible { m: usize },

    /// The irreducible polynomial does not have the extension degree.
    #[error("irreducible polynomial has wrong degree: expected {expected}, got {got:?}")]
    IrreducibleDegree { expected: usize, got: Option<usize> },

    /// Checked construction found a composite characteristic.
    #[error("{p} is not prime")]
    NotPrime { p: u64 },

    /// Checked construction found a reducible modulus polynomial.
    #[error("modulus polynomial is reducible")]
    Reducible,

    /// A polynomial of positive degree has no representative in a prime field.
    #[error("polynomial of degree {degree} does not fit in a prime field")]
    PrimeFieldNoFit { degree: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FieldError>;
