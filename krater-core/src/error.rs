//! Error types for Krater cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
///
/// No variant carries secret-dependent information: lengths and states are
/// public, and encoding failures are reported without the offending value or
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid ciphertext length.
    InvalidCiphertextLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid length of a seed, entropy, or output buffer.
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Encoding or decoding error: an out-of-range coefficient field, or an
    /// embedded key hash that does not match the encoded key material.
    EncodingError,

    /// Install attempted on a key that already holds key material.
    ImmutableKey,

    /// The operation requires key material the key does not hold.
    MissingKeyMaterial,

    /// A symmetric primitive reported failure.
    OracleFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidCiphertextLength { expected, actual } => {
                write!(
                    f,
                    "invalid ciphertext length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidLength { expected, actual } => {
                write!(f, "invalid buffer length: expected {expected}, got {actual}")
            }
            Error::EncodingError => write!(f, "encoding or decoding error"),
            Error::ImmutableKey => write!(f, "key material is already installed"),
            Error::MissingKeyMaterial => write!(f, "key does not hold the required material"),
            Error::OracleFailure => write!(f, "symmetric primitive failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
