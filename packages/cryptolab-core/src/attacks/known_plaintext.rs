//! Known-plaintext key recovery for the 2x2 Hill cipher.
//!
//! With the first four letters written as column pairs,
//!
//! ```text
//! P = ┌ p0 p2 ┐    C = ┌ c0 c2 ┐    C = K · P  (mod 26)
//!     └ p1 p3 ┘        └ c1 c3 ┘    K = C · P⁻¹ (mod 26)
//! ```
//!
//! The recovered key is checked by re-encrypting the whole plaintext.

use serde::{Deserialize, Serialize};

use crate::ciphers::{HillCipher, HillKey};
use crate::error::{Error, Result};
use crate::math::{mat_mul_mod, matrix_mod_inverse, Matrix, ALPHABET_MODULUS};

/// Letters needed for a 2x2 recovery
const REQUIRED_LETTERS: usize = 4;

/// Re-encryption check of a recovered key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// The ciphertext supplied to the attack (letters only)
    pub original_ciphertext: String,
    /// The plaintext encrypted under the recovered key
    pub encrypted_with_key: String,
    /// Whether the two agree
    #[serde(rename = "match")]
    pub matches: bool,
}

/// Outcome of a known-plaintext attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownPlaintextResult {
    /// The recovered key reproduces the ciphertext
    pub success: bool,
    /// Recovered 2x2 key
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recovered_key: Option<Matrix>,
    /// Re-encryption check
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verification: Option<Verification>,
    /// Why the attack could not run
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl KnownPlaintextResult {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            recovered_key: None,
            verification: None,
            error: Some(message),
        }
    }
}

fn clean(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn column_pairs(letters: &str) -> Matrix {
    let n: Vec<i64> = letters
        .bytes()
        .take(REQUIRED_LETTERS)
        .map(|b| (b - b'A') as i64)
        .collect();
    vec![vec![n[0], n[2]], vec![n[1], n[3]]]
}

/// Solve for the key matrix, failing on short, mismatched or singular input
pub fn try_recover_hill_key(plaintext: &str, ciphertext: &str) -> Result<Matrix> {
    let plain = clean(plaintext);
    let cipher = clean(ciphertext);

    if plain.len() < REQUIRED_LETTERS || cipher.len() < REQUIRED_LETTERS {
        return Err(Error::InsufficientData(
            "Need at least 4 characters of plaintext and ciphertext".into(),
        ));
    }
    if plain.len() != cipher.len() {
        return Err(Error::InvalidInput(
            "Plaintext and ciphertext must be same length".into(),
        ));
    }

    let p_inv = matrix_mod_inverse(&column_pairs(&plain), ALPHABET_MODULUS)?;
    Ok(mat_mul_mod(&column_pairs(&cipher), &p_inv, ALPHABET_MODULUS))
}

/// Run the attack and report the outcome as a value
pub fn recover_hill_key(plaintext: &str, ciphertext: &str) -> KnownPlaintextResult {
    let key = match try_recover_hill_key(plaintext, ciphertext) {
        Ok(key) => key,
        Err(Error::InsufficientData(msg)) | Err(Error::InvalidInput(msg)) => {
            return KnownPlaintextResult::failure(msg);
        }
        Err(err) => {
            tracing::debug!(error = %err, "Known-plaintext attack failed");
            return KnownPlaintextResult::failure(format!("Attack failed: {}", err));
        }
    };

    let original_ciphertext = clean(ciphertext);
    let encrypted_with_key =
        match HillCipher::encrypt(plaintext, &HillKey::Matrix(key.clone()), false) {
            Ok(out) => out.text,
            Err(err) => return KnownPlaintextResult::failure(format!("Attack failed: {}", err)),
        };
    let matches = encrypted_with_key == original_ciphertext;

    tracing::info!(success = matches, key = ?key, "Known-plaintext attack complete");

    KnownPlaintextResult {
        success: matches,
        recovered_key: Some(key),
        verification: Some(Verification {
            original_ciphertext,
            encrypted_with_key,
            matches,
        }),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_key() {
        let key = vec![vec![3, 3], vec![2, 5]];
        let plaintext = "FRIDAY";
        let ciphertext = HillCipher::encrypt(plaintext, &HillKey::Matrix(key.clone()), false)
            .unwrap()
            .text;

        let result = recover_hill_key(plaintext, &ciphertext);
        assert!(result.success);
        assert_eq!(result.recovered_key, Some(key));
        let verification = result.verification.unwrap();
        assert!(verification.matches);
        assert_eq!(verification.encrypted_with_key, ciphertext);
    }

    #[test]
    fn test_too_short() {
        let result = recover_hill_key("abc", "xyz");
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Need at least 4 characters of plaintext and ciphertext")
        );
        assert!(matches!(
            try_recover_hill_key("abc", "xyz"),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let result = recover_hill_key("HELPME", "HIAT");
        assert_eq!(
            result.error.as_deref(),
            Some("Plaintext and ciphertext must be same length")
        );
    }

    #[test]
    fn test_singular_plaintext_block() {
        // "AAAA" gives an all-zero P
        let result = recover_hill_key("AAAA", "HIAT");
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Attack failed:"));
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let result = recover_hill_key("he-lp", "H I A T");
        assert!(result.success);
        assert_eq!(result.recovered_key, Some(vec![vec![3, 3], vec![2, 5]]));
    }

    #[test]
    fn test_json_shape() {
        let result = recover_hill_key("HELP", "HIAT");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["verification"]["match"], true);
        assert!(json.get("error").is_none());
    }
}
