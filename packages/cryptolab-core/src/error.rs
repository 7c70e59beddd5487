//! # Error Handling
//!
//! This module provides the error type shared by every part of CryptoLab Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key & Arithmetic Errors                                           │
//! │  │   ├── InvalidKey            - Key fails a structural precondition   │
//! │  │   ├── SingularMatrix        - Determinant has no inverse mod m      │
//! │  │   ├── NoInverse             - Scalar has no inverse mod m           │
//! │  │   ├── UnsupportedSize       - Matrix is not 2x2 or 3x3              │
//! │  │   └── UnknownCipher         - Cipher tag not recognized             │
//! │  │                                                                      │
//! │  ├── Input Errors                                                      │
//! │  │   ├── InvalidInput          - Text has the wrong shape              │
//! │  │   ├── SymbolNotInTable      - Playfair lookup miss                  │
//! │  │   └── Encoding              - Malformed base64 / hex / UTF-8        │
//! │  │                                                                      │
//! │  ├── Protection Errors                                                 │
//! │  │   ├── UnknownDefense        - Metadata names an unknown defense     │
//! │  │   ├── Integrity             - HMAC mismatch (tampering)             │
//! │  │   └── KeyDerivationFailed   - Argon2 / PBKDF2 rejected parameters   │
//! │  │                                                                      │
//! │  ├── Attack Errors                                                     │
//! │  │   └── InsufficientData      - Too few letters for the attack        │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      ├── Serialization         - JSON encode / decode failure          │
//! │      └── InvalidConfig         - Configuration value out of range      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expected negative outcomes (an attack that does not find the key, an
//! interception that fails to decrypt) are *not* errors. They are reported
//! as ordinary values carrying a `success` flag.

use thiserror::Error;

/// Result type alias for CryptoLab Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CryptoLab Core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Key & Arithmetic Errors (100-199)
    // ========================================================================

    /// The key fails a structural precondition
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Matrix determinant is not invertible under the modulus
    #[error("Matrix is not invertible mod {modulus} (determinant {determinant})")]
    SingularMatrix {
        /// Determinant reduced mod `modulus`
        determinant: i64,
        /// Working modulus
        modulus: i64,
    },

    /// Scalar modular inverse does not exist
    #[error("No modular inverse exists for {value} mod {modulus}")]
    NoInverse {
        /// Value whose inverse was requested
        value: i64,
        /// Working modulus
        modulus: i64,
    },

    /// Matrix size other than 2x2 or 3x3
    #[error("Unsupported matrix size: {rows}x{cols}")]
    UnsupportedSize {
        /// Number of rows
        rows: usize,
        /// Number of columns in the first row
        cols: usize,
    },

    /// Cipher tag not recognized
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    // ========================================================================
    // Input Errors (200-299)
    // ========================================================================

    /// Text has a shape the operation cannot process
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Character missing from a Playfair table
    #[error("Character '{0}' is not in the Playfair table")]
    SymbolNotInTable(char),

    /// Malformed base64, hex or UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    // ========================================================================
    // Protection Errors (300-399)
    // ========================================================================

    /// Protection metadata names a defense this layer does not know
    #[error("Unknown defense method: {0}")]
    UnknownDefense(String),

    /// HMAC verification failed
    #[error("HMAC verification failed - possible tampering!")]
    Integrity,

    /// Key derivation rejected its parameters
    #[error("Failed to derive key: {0}")]
    KeyDerivationFailed(String),

    // ========================================================================
    // Attack Errors (400-499)
    // ========================================================================

    /// Not enough aligned letters for the attack
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Get the error code for the dispatcher
    ///
    /// Error codes are organized by category:
    /// - 100-199: Keys and modular arithmetic
    /// - 200-299: Input shape and encodings
    /// - 300-399: Protection layer
    /// - 400-499: Attacks
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Key & arithmetic (100-199)
            Error::InvalidKey(_) => 100,
            Error::SingularMatrix { .. } => 101,
            Error::NoInverse { .. } => 102,
            Error::UnsupportedSize { .. } => 103,
            Error::UnknownCipher(_) => 104,

            // Input (200-299)
            Error::InvalidInput(_) => 200,
            Error::SymbolNotInTable(_) => 201,
            Error::Encoding(_) => 202,

            // Protection (300-399)
            Error::UnknownDefense(_) => 300,
            Error::Integrity => 301,
            Error::KeyDerivationFailed(_) => 302,

            // Attacks (400-499)
            Error::InsufficientData(_) => 400,

            // Internal (900-999)
            Error::Serialization(_) => 900,
            Error::InvalidConfig(_) => 901,
        }
    }

    /// Check if this error signals possible tampering
    ///
    /// Only the MITM defense can detect an active attacker; every other
    /// failure is a caller mistake or a wrong key.
    pub fn is_tampering(&self) -> bool {
        matches!(self, Error::Integrity)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Encoding(format!("invalid hex: {}", err))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Encoding(format!("invalid base64: {}", err))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_grouped() {
        assert_eq!(Error::InvalidKey("x".into()).code(), 100);
        assert_eq!(
            Error::SingularMatrix { determinant: 2, modulus: 26 }.code(),
            101
        );
        assert_eq!(Error::Encoding("x".into()).code(), 202);
        assert_eq!(Error::Integrity.code(), 301);
        assert_eq!(Error::InsufficientData("x".into()).code(), 400);
    }

    #[test]
    fn test_only_integrity_is_tampering() {
        assert!(Error::Integrity.is_tampering());
        assert!(!Error::UnknownDefense("rot13".into()).is_tampering());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::NoInverse { value: 13, modulus: 26 };
        assert_eq!(err.to_string(), "No modular inverse exists for 13 mod 26");

        let err = Error::UnsupportedSize { rows: 4, cols: 4 };
        assert_eq!(err.to_string(), "Unsupported matrix size: 4x4");
    }

    #[test]
    fn test_from_hex_error() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert_eq!(err.code(), 202);
    }
}
