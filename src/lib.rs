#![doc = include_str!(concat!(env!("OUT_DIR"), "/README-rustdocified.md"))]
#![deny(missing_docs)]

use std::fmt;

use num::Zero;

pub use num::bigint::BigUint;

pub use crate::{reed_solomon::ReedSolomon, share::Share};

#[cfg(test)]
mod test_util;

mod berlekamp_welch;
mod reed_solomon;
mod share;

pub mod field;
pub mod matrix;
pub mod poly;

// ======================================================================
// Error - PUBLIC

/// Represents all possible errors that can occur in this library.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Matrix constructor was given rows of unequal length.
    ColSizeMismatch {
        /// Length of the first row.
        cols: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// Matrix shapes conflict for the attempted operation: column
    /// count on the left vs row count on the right for a product, row
    /// counts for an augment, and sequence lengths for interpolation.
    DimensionMismatch {
        /// Size on the left side.
        left: usize,
        /// Size on the right side.
        right: usize,
    },

    /// Polynomial division by the zero polynomial.
    DivideByZero,

    /// Matrix column count must be non-zero, and column ranges must
    /// stay within the matrix.
    InvalidColSize,

    /// Codec parameters must satisfy `1 <= required <= total`.
    InvalidParams {
        /// Given number of shares required for recovery.
        required: usize,
        /// Given total number of shares.
        total: usize,
    },

    /// Matrix row count must be non-zero, and row indexes must stay
    /// within the matrix.
    InvalidRowSize,

    /// Share number is outside `[0, total)`.
    InvalidShare {
        /// Configured total number of shares.
        total: usize,
        /// Given invalid share number.
        number: usize,
    },

    /// Field element has no multiplicative inverse modulo p.
    NoInverse,

    /// Inversion was attempted on a non-square matrix.
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Matrix is singular and has no inverse.
    Singular,

    /// Fewer shares than the required count were given.
    TooFewShards {
        /// Configured number of shares required for recovery.
        required: usize,
        /// Number of shares given.
        got: usize,
    },

    /// Error correction exhausted every candidate error count without
    /// finding a consistent decoding.
    TooManyErrors,
}

// ======================================================================
// Error - IMPL DISPLAY

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ColSizeMismatch { cols, got } => {
                write!(
                    f,
                    "column size is not the same for all rows: expected {}, got {}",
                    cols, got
                )
            }

            Error::DimensionMismatch { left, right } => {
                write!(f, "matrix dimensions do not match: {} vs {}", left, right)
            }

            Error::DivideByZero => {
                write!(f, "polynomial division by zero")
            }

            Error::InvalidColSize => {
                write!(f, "invalid column size")
            }

            Error::InvalidParams { required, total } => {
                write!(
                    f,
                    "invalid codec parameters: required {} of total {}",
                    required, total
                )
            }

            Error::InvalidRowSize => {
                write!(f, "invalid row size")
            }

            Error::InvalidShare { total, number } => {
                write!(f, "invalid share number: {} >= total {}", number, total)
            }

            Error::NoInverse => {
                write!(f, "no modular inverse exists")
            }

            Error::NotSquare { rows, cols } => {
                write!(f, "matrix is not square: {}x{}", rows, cols)
            }

            Error::Singular => {
                write!(f, "matrix is singular")
            }

            Error::TooFewShards { required, got } => {
                write!(
                    f,
                    "too few shards: got {} while required is {}",
                    got, required
                )
            }

            Error::TooManyErrors => {
                write!(f, "too many errors to correct")
            }
        }
    }
}

// ======================================================================
// Error - IMPL ERROR

impl std::error::Error for Error {}

// ======================================================================
// FUNCTIONS - PUBLIC

/// Encodes in one go using [`ReedSolomon`], returning the full set of
/// `total` shares.
///
/// See [simple usage](crate#simple-usage) for the codec-based API,
/// which avoids rebuilding the generator matrix on every call.
pub fn encode(
    required: usize,
    total: usize,
    modulus: BigUint,
    inputs: &[BigUint],
) -> Result<Vec<Share>, Error> {
    ReedSolomon::new(required, total, modulus)?.encode(inputs)
}

/// Rebuilds in one go using [`ReedSolomon`], returning the recovered
/// symbols ordered by input index.
///
/// The given shares must be correct; run [`ReedSolomon::correct`]
/// first when silent corruption is possible.
pub fn decode(
    required: usize,
    total: usize,
    modulus: BigUint,
    shares: &[Share],
) -> Result<Vec<BigUint>, Error> {
    let rs = ReedSolomon::new(required, total, modulus)?;
    let mut outputs = vec![BigUint::zero(); required];
    rs.rebuild(shares, |share| outputs[share.number] = share.data)?;
    Ok(outputs)
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{big, bigs};

    // ============================================================
    // ROUNDTRIP

    #[test]
    fn roundtrip() {
        let inputs = bigs(&[1, 2, 3]);
        let shares = encode(3, 5, big(29), &inputs).unwrap();

        assert_eq!(shares.len(), 5);

        let restored = decode(3, 5, big(29), &shares[2..]).unwrap();
        assert_eq!(restored, inputs);
    }

    // ============================================================
    // encode

    mod encode {
        use super::super::*;
        use crate::test_util::{big, bigs};

        #[test]
        fn invalid_params() {
            assert_eq!(
                encode(0, 1, big(29), &[]),
                Err(Error::InvalidParams {
                    required: 0,
                    total: 1
                })
            );
        }

        #[test]
        fn too_few_shards() {
            assert_eq!(
                encode(3, 5, big(29), &bigs(&[1])),
                Err(Error::TooFewShards {
                    required: 3,
                    got: 1
                })
            );
        }
    }

    // ============================================================
    // decode

    mod decode {
        use super::super::*;
        use crate::test_util::{big, bigs};

        #[test]
        fn too_few_shards() {
            let shares = encode(3, 5, big(29), &bigs(&[1, 2, 3])).unwrap();
            assert_eq!(
                decode(3, 5, big(29), &shares[..2]),
                Err(Error::TooFewShards {
                    required: 3,
                    got: 2
                })
            );
        }
    }

    // ============================================================
    // Error - Display

    #[test]
    fn error_display() {
        assert_eq!(
            Error::TooFewShards {
                required: 3,
                got: 2
            }
            .to_string(),
            "too few shards: got 2 while required is 3"
        );
        assert_eq!(Error::TooManyErrors.to_string(), "too many errors to correct");
        assert_eq!(Error::Singular.to_string(), "matrix is singular");
    }
}
