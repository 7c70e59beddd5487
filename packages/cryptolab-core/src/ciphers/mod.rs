//! # Classical Ciphers
//!
//! Caesar, Affine, Hill and Playfair over the 26-letter alphabet.
//!
//! ## Dispatch
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CIPHER DISPATCH                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  CipherKey ──────────────┬──► Caesar   { shift }                        │
//! │  (carries its own kind)  ├──► Affine   { a, b }                         │
//! │                          ├──► Hill     (Matrix | Text)                  │
//! │                          └──► Playfair { keyword }                      │
//! │                                                                         │
//! │  encrypt(key, text, show_steps) ──► CipherOutput { text, steps? }      │
//! │  decrypt(key, text, show_steps) ──► CipherOutput { text, steps? }      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every cipher is a pure function of `(text, key)`. The step trace is
//! presentational only and never changes the result.

mod affine;
mod caesar;
mod hill;
mod playfair;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::Matrix;

pub use affine::AffineCipher;
pub use caesar::CaesarCipher;
pub use hill::{derive_matrix_from_text, HillCipher};
pub use playfair::{prepare_text as prepare_playfair_text, PairRule, PlayfairCipher, PlayfairTable};

// ============================================================================
// CIPHER KIND & KEYS
// ============================================================================

/// The four classical ciphers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherKind {
    /// Shift cipher
    Caesar,
    /// `ax + b` substitution
    Affine,
    /// Matrix block cipher
    Hill,
    /// 5x5 digraph cipher
    Playfair,
}

impl CipherKind {
    /// All kinds, in display order
    pub const ALL: [CipherKind; 4] = [
        CipherKind::Caesar,
        CipherKind::Affine,
        CipherKind::Hill,
        CipherKind::Playfair,
    ];

    /// String tag used by the web layer
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherKind::Caesar => "caesar",
            CipherKind::Affine => "affine",
            CipherKind::Hill => "hill",
            CipherKind::Playfair => "playfair",
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caesar" => Ok(CipherKind::Caesar),
            "affine" => Ok(CipherKind::Affine),
            "hill" => Ok(CipherKind::Hill),
            "playfair" => Ok(CipherKind::Playfair),
            other => Err(Error::UnknownCipher(other.to_string())),
        }
    }
}

/// Hill key: an explicit matrix or a keyword the matrix is derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HillKey {
    /// n x n integer matrix (n ∈ {2, 3})
    Matrix(Matrix),
    /// Keyword; size is 2 for up to four letters, 3 otherwise
    TextKey(String),
}

/// A key for one of the classical ciphers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherKey {
    /// Caesar shift (any integer, reduced mod 26)
    Caesar {
        /// Shift amount
        shift: i64,
    },
    /// Affine key; `a` must be coprime with 26
    Affine {
        /// Multiplier
        a: i64,
        /// Offset
        b: i64,
    },
    /// Hill key
    Hill(HillKey),
    /// Playfair keyword
    Playfair {
        /// Keyword the 5x5 table is built from
        keyword: String,
    },
}

impl CipherKey {
    /// Which cipher this key belongs to
    pub fn kind(&self) -> CipherKind {
        match self {
            CipherKey::Caesar { .. } => CipherKind::Caesar,
            CipherKey::Affine { .. } => CipherKind::Affine,
            CipherKey::Hill(_) => CipherKind::Hill,
            CipherKey::Playfair { .. } => CipherKind::Playfair,
        }
    }
}

// ============================================================================
// OUTPUT & STEP TRACE
// ============================================================================

/// Result of one encrypt/decrypt call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherOutput {
    /// Ciphertext (after encryption) or plaintext (after decryption)
    pub text: String,
    /// Human-readable narration, present only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

/// Collects step-trace lines when enabled; a no-op otherwise
#[derive(Debug, Default)]
pub struct StepTrace {
    lines: Option<Vec<String>>,
}

impl StepTrace {
    /// Create a trace that records only if `enabled`
    pub fn new(enabled: bool) -> Self {
        Self {
            lines: enabled.then(Vec::new),
        }
    }

    /// Whether lines are being recorded
    pub fn enabled(&self) -> bool {
        self.lines.is_some()
    }

    /// Record a line; the closure only runs when tracing is enabled
    pub fn push(&mut self, line: impl FnOnce() -> String) {
        if let Some(lines) = self.lines.as_mut() {
            lines.push(line());
        }
    }

    /// Append lines produced by a nested trace
    pub fn extend(&mut self, other: Option<Vec<String>>) {
        if let (Some(lines), Some(other)) = (self.lines.as_mut(), other) {
            lines.extend(other);
        }
    }

    /// Finish the trace
    pub fn finish(self) -> Option<Vec<String>> {
        self.lines
    }

    /// Finish the trace and wrap it with the output text
    pub fn into_output(self, text: String) -> CipherOutput {
        CipherOutput {
            text,
            steps: self.finish(),
        }
    }
}

// ============================================================================
// LETTER HELPERS
// ============================================================================

/// Map a letter to 0..26, keeping whether it was uppercase
pub(crate) fn letter_index(c: char) -> Option<(i64, bool)> {
    if c.is_ascii_uppercase() {
        Some(((c as u8 - b'A') as i64, true))
    } else if c.is_ascii_lowercase() {
        Some(((c as u8 - b'a') as i64, false))
    } else {
        None
    }
}

/// Map 0..26 back to a letter of the requested case
pub(crate) fn index_letter(index: i64, upper: bool) -> char {
    let base = if upper { b'A' } else { b'a' };
    (base + index.rem_euclid(26) as u8) as char
}

// ============================================================================
// UNIFORM ENTRY POINTS
// ============================================================================

/// Encrypt `plaintext` with whichever cipher `key` belongs to
pub fn encrypt(key: &CipherKey, plaintext: &str, show_steps: bool) -> Result<CipherOutput> {
    tracing::debug!(cipher = %key.kind(), len = plaintext.len(), "Encrypting");
    match key {
        CipherKey::Caesar { shift } => Ok(CaesarCipher::encrypt(plaintext, *shift, show_steps)),
        CipherKey::Affine { a, b } => AffineCipher::encrypt(plaintext, *a, *b, show_steps),
        CipherKey::Hill(hill_key) => HillCipher::encrypt(plaintext, hill_key, show_steps),
        CipherKey::Playfair { keyword } => PlayfairCipher::encrypt(plaintext, keyword, show_steps),
    }
}

/// Decrypt `ciphertext` with whichever cipher `key` belongs to
pub fn decrypt(key: &CipherKey, ciphertext: &str, show_steps: bool) -> Result<CipherOutput> {
    tracing::debug!(cipher = %key.kind(), len = ciphertext.len(), "Decrypting");
    match key {
        CipherKey::Caesar { shift } => Ok(CaesarCipher::decrypt(ciphertext, *shift, show_steps)),
        CipherKey::Affine { a, b } => AffineCipher::decrypt(ciphertext, *a, *b, show_steps),
        CipherKey::Hill(hill_key) => HillCipher::decrypt(ciphertext, hill_key, show_steps),
        CipherKey::Playfair { keyword } => PlayfairCipher::decrypt(ciphertext, keyword, show_steps),
    }
}

// ============================================================================
// CIPHER INFO
// ============================================================================

/// Static description of a cipher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CipherInfo {
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// What a key looks like
    pub key_type: &'static str,
    /// Known weaknesses
    pub weaknesses: Vec<&'static str>,
    /// How to do better
    pub protection: Vec<&'static str>,
}

/// Describe a cipher for the UI
pub fn cipher_info(kind: CipherKind) -> CipherInfo {
    match kind {
        CipherKind::Caesar => CipherInfo {
            name: "Caesar Cipher",
            description: "A substitution cipher that shifts each letter by a fixed number of positions.",
            key_type: "integer (0-25)",
            weaknesses: vec![
                "Only 26 possible keys - easily brute forced",
                "Vulnerable to frequency analysis",
                "Preserves word patterns and lengths",
            ],
            protection: vec![
                "Use more complex ciphers like Vigenère",
                "Combine with transposition",
                "Use modern encryption algorithms",
            ],
        },
        CipherKind::Affine => CipherInfo {
            name: "Affine Cipher",
            description: "A substitution cipher using the formula E(x) = (ax + b) mod 26",
            key_type: "two integers: 'a' (coprime with 26) and 'b' (0-25)",
            weaknesses: vec![
                "Limited keyspace (312 valid keys)",
                "Vulnerable to frequency analysis",
                "Known-plaintext attack with 2 character pairs",
            ],
            protection: vec![
                "Use polyalphabetic ciphers",
                "Increase alphabet size",
                "Use modern cryptographic algorithms",
            ],
        },
        CipherKind::Hill => CipherInfo {
            name: "Hill Cipher (2x2 or 3x3)",
            description: "A polygraphic substitution cipher using linear algebra and matrix multiplication",
            key_type: "2x2 or 3x3 invertible matrix (modulo 26)",
            weaknesses: vec![
                "Vulnerable to known-plaintext attack",
                "Matrix must be invertible (determinant coprime with 26)",
                "Requires exact multiple of block size",
                "Linear algebraic structure can be exploited",
            ],
            protection: vec![
                "Use larger matrices (4x4, 5x5)",
                "Combine with transposition",
                "Use modern block ciphers like AES",
            ],
        },
        CipherKind::Playfair => CipherInfo {
            name: "Playfair Cipher",
            description: "A digraph substitution cipher using a 5x5 matrix",
            key_type: "keyword or phrase",
            weaknesses: vec![
                "Frequency analysis on digraphs",
                "Known-plaintext attack possible",
                "I and J are treated as same letter",
            ],
            protection: vec![
                "Use larger matrices (6x6 with full alphabet)",
                "Use modern encryption",
                "Combine with other techniques",
            ],
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("caesar".parse::<CipherKind>().unwrap(), CipherKind::Caesar);
        assert_eq!(" Hill ".parse::<CipherKind>().unwrap(), CipherKind::Hill);
        assert!(matches!(
            "vigenere".parse::<CipherKind>(),
            Err(Error::UnknownCipher(_))
        ));
    }

    #[test]
    fn test_key_json_shape() {
        let key: CipherKey = serde_json::from_str(r#"{"caesar":{"shift":3}}"#).unwrap();
        assert_eq!(key, CipherKey::Caesar { shift: 3 });

        let key: CipherKey =
            serde_json::from_str(r#"{"hill":{"matrix":[[3,3],[2,5]]}}"#).unwrap();
        assert_eq!(key.kind(), CipherKind::Hill);

        let key: CipherKey = serde_json::from_str(r#"{"hill":{"text_key":"HILL"}}"#).unwrap();
        assert_eq!(key, CipherKey::Hill(HillKey::TextKey("HILL".into())));
    }

    #[test]
    fn test_uniform_round_trip() {
        let keys = [
            CipherKey::Caesar { shift: 7 },
            CipherKey::Affine { a: 5, b: 8 },
            CipherKey::Hill(HillKey::Matrix(vec![vec![3, 3], vec![2, 5]])),
            CipherKey::Playfair { keyword: "MONARCHY".into() },
        ];
        for key in &keys {
            let ct = encrypt(key, "ATTACKATDAWN", false).unwrap();
            let pt = decrypt(key, &ct.text, false).unwrap();
            assert_eq!(pt.text, "ATTACKATDAWN", "round trip failed for {}", key.kind());
            assert!(ct.steps.is_none());
        }
    }

    #[test]
    fn test_step_trace_disabled_skips_closure() {
        let mut trace = StepTrace::new(false);
        trace.push(|| panic!("closure must not run"));
        assert!(trace.finish().is_none());
    }

    #[test]
    fn test_cipher_info_names() {
        for kind in CipherKind::ALL {
            assert!(!cipher_info(kind).weaknesses.is_empty());
        }
        assert_eq!(cipher_info(CipherKind::Hill).name, "Hill Cipher (2x2 or 3x3)");
    }
}
