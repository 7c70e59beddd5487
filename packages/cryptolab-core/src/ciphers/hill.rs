//! # Hill Cipher
//!
//! Polygraphic substitution with an n x n key matrix (n ∈ {2, 3}).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         HILL BLOCK ENCRYPTION                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  "HELP" → [7, 4, 11, 15] → blocks [7,4] [11,15]                         │
//! │                                                                         │
//! │  ┌ 3 3 ┐   ┌ 7 ┐   ┌ 33 ┐          ┌ 7 ┐                                │
//! │  │     │ × │   │ = │    │ mod 26 = │   │ → "HI"                         │
//! │  └ 2 5 ┘   └ 4 ┘   └ 34 ┘          └ 8 ┘                                │
//! │                                                                         │
//! │  Decryption multiplies by K⁻¹ mod 26.                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use super::{index_letter, CipherOutput, HillKey, StepTrace};
use crate::error::{Error, Result};
use crate::math::{
    determinant, format_matrix, gcd, mat_vec_mod, matrix_mod_inverse, mod_inverse, Matrix,
    ALPHABET_MODULUS,
};

/// Padding letter appended to the last block ('X')
const PAD_VALUE: i64 = 23;

/// Hill cipher
pub struct HillCipher;

/// Derive an invertible matrix from a keyword
///
/// The keyword is reduced to its letters (A=0 … Z=25). Missing slots at
/// absolute index `i` are filled with `(last + i + 1) mod 26`; extra letters
/// are dropped. If the determinant is not coprime with 26 the top-left entry
/// is bumped by 1..25 until it is.
///
/// Returns the matrix and the derivation narrative.
pub fn derive_matrix_from_text(key: &str, size: usize) -> Result<(Matrix, Vec<String>)> {
    let mut steps = Vec::new();
    steps.push(format!("=== Generating {}x{} Matrix from Key ===", size, size));
    steps.push(format!("1. Key text: '{}'", key));

    let cleaned: String = key
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    steps.push(format!("2. Cleaned key: '{}'", cleaned));

    let mut numbers: Vec<i64> = cleaned.bytes().map(|b| (b - b'A') as i64).collect();
    steps.push(format!("3. Convert to numbers (A=0, B=1, ...): {:?}", numbers));

    let needed = size * size;
    if numbers.len() < needed {
        let last = numbers.last().copied().unwrap_or(0);
        for i in numbers.len()..needed {
            numbers.push((last + i as i64 + 1) % ALPHABET_MODULUS);
        }
        steps.push(format!("4. Padded to {} numbers: {:?}", needed, numbers));
    } else if numbers.len() > needed {
        numbers.truncate(needed);
        steps.push(format!("4. Trimmed to {} numbers: {:?}", needed, numbers));
    } else {
        steps.push(format!("4. Already have {} numbers", needed));
    }

    let mut matrix: Matrix = numbers.chunks(size).map(<[i64]>::to_vec).collect();
    steps.push(format!("5. Form {}x{} matrix:\n{}", size, size, format_matrix(&matrix)));

    let det = determinant(&matrix)?;
    let det_mod = det.rem_euclid(ALPHABET_MODULUS);
    steps.push(format!("6. Calculate determinant: {} (mod 26 = {})", det, det_mod));

    let g = gcd(det_mod, ALPHABET_MODULUS);
    steps.push(format!("7. Check gcd({}, 26) = {}", det_mod, g));

    if g == 1 {
        steps.push("✓ Matrix is invertible!".to_string());
        return Ok((matrix, steps));
    }

    steps.push("⚠️ Matrix not invertible! gcd ≠ 1".to_string());
    steps.push("8. Adjusting matrix to make it invertible...".to_string());

    let original = matrix[0][0];
    for adjustment in 1..ALPHABET_MODULUS {
        matrix[0][0] = (original + adjustment) % ALPHABET_MODULUS;
        let test_det = determinant(&matrix)?;
        let test_mod = test_det.rem_euclid(ALPHABET_MODULUS);
        if gcd(test_mod, ALPHABET_MODULUS) == 1 {
            tracing::debug!(adjustment, "Adjusted Hill key matrix to be invertible");
            steps.push(format!("   Adjusted matrix[0,0] by +{}", adjustment));
            steps.push(format!("   New matrix:\n{}", format_matrix(&matrix)));
            steps.push(format!("   New determinant: {} (mod 26 = {})", test_det, test_mod));
            steps.push(format!("   gcd({}, 26) = 1 ✓", test_mod));
            return Ok((matrix, steps));
        }
    }

    Err(Error::InvalidKey(format!(
        "no invertible {}x{} matrix can be derived from key '{}'",
        size, size, key
    )))
}

/// Resolve a `HillKey` to a validated matrix plus any derivation narrative
///
/// Explicit matrices are reduced entry-wise mod 26.
fn resolve_key(key: &HillKey) -> Result<(Matrix, Option<Vec<String>>)> {
    match key {
        HillKey::Matrix(matrix) => {
            let n = matrix.len();
            if !(n == 2 || n == 3) || matrix.iter().any(|row| row.len() != n) {
                let cols = matrix.first().map(Vec::len).unwrap_or(0);
                return Err(Error::InvalidKey(format!(
                    "Key matrix must be 2x2 or 3x3, got {}x{}",
                    n, cols
                )));
            }
            let reduced = matrix
                .iter()
                .map(|row| row.iter().map(|v| v.rem_euclid(ALPHABET_MODULUS)).collect())
                .collect();
            Ok((reduced, None))
        }
        HillKey::TextKey(text) => {
            let letters = text.chars().filter(char::is_ascii_alphabetic).count();
            let size = if letters <= 4 { 2 } else { 3 };
            let (matrix, steps) = derive_matrix_from_text(text, size)?;
            Ok((matrix, Some(steps)))
        }
    }
}

fn text_to_numbers(text: &str) -> Vec<i64> {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| (c.to_ascii_uppercase() as u8 - b'A') as i64)
        .collect()
}

fn numbers_to_text(numbers: &[i64]) -> String {
    numbers.iter().map(|&n| index_letter(n, true)).collect()
}

impl HillCipher {
    /// Encrypt letters of `plaintext`, padding the last block with 'X'
    pub fn encrypt(plaintext: &str, key: &HillKey, show_steps: bool) -> Result<CipherOutput> {
        let mut trace = StepTrace::new(show_steps);
        let (matrix, derivation) = resolve_key(key)?;
        let size = matrix.len();

        if derivation.is_some() {
            trace.push(|| "=== Step 1: Generate Matrix from Text Key ===".to_string());
            trace.extend(derivation.clone());
            trace.push(|| "\n=== Step 2: Encryption Process ===".to_string());
        } else {
            trace.push(|| format!("1. Key Matrix ({}x{}):\n{}", size, size, format_matrix(&matrix)));
        }

        let mut numbers = text_to_numbers(plaintext);
        let original_len = numbers.len();
        while numbers.len() % size != 0 {
            numbers.push(PAD_VALUE);
        }

        trace.push(|| format!("2. Plaintext: {}", plaintext));
        trace.push(|| format!("3. Convert to numbers (A=0, B=1, ...): {:?}", numbers));
        if numbers.len() > original_len {
            trace.push(|| {
                format!("4. Padded with 'X' (23) to multiple of {}: {:?}", size, numbers)
            });
        }

        let encrypted = Self::apply_blocks(&matrix, &numbers, "Plaintext", "Ciphertext", &mut trace);
        let ciphertext = numbers_to_text(&encrypted);

        trace.push(|| format!("\nFinal ciphertext: {}", ciphertext));
        Ok(trace.into_output(ciphertext))
    }

    /// Decrypt letters of `ciphertext` with the inverse key matrix
    pub fn decrypt(ciphertext: &str, key: &HillKey, show_steps: bool) -> Result<CipherOutput> {
        let mut trace = StepTrace::new(show_steps);
        let (matrix, derivation) = resolve_key(key)?;
        let size = matrix.len();

        let inverse = matrix_mod_inverse(&matrix, ALPHABET_MODULUS)?;

        if derivation.is_some() {
            trace.push(|| "=== Step 1: Generate Matrix from Text Key ===".to_string());
            trace.extend(derivation.clone());
            trace.push(|| "\n=== Step 2: Calculate Inverse Matrix ===".to_string());
        } else {
            trace.push(|| format!("1. Key Matrix ({}x{}):\n{}", size, size, format_matrix(&matrix)));
        }

        if trace.enabled() {
            let det_mod = determinant(&matrix)?.rem_euclid(ALPHABET_MODULUS);
            let det_inv = mod_inverse(det_mod, ALPHABET_MODULUS)?;
            trace.push(|| format!("Inverse Key Matrix:\n{}", format_matrix(&inverse)));
            trace.push(|| format!("Determinant mod 26 = {}", det_mod));
            trace.push(|| format!("Determinant inverse: {}", det_inv));
            trace.push(|| {
                format!(
                    "Verification: ({} × {}) mod 26 = {}",
                    det_mod,
                    det_inv,
                    (det_mod * det_inv) % ALPHABET_MODULUS
                )
            });
            trace.push(|| "\n=== Step 3: Decryption Process ===".to_string());
            trace.push(|| format!("Ciphertext: {}", ciphertext));
        }

        let numbers = text_to_numbers(ciphertext);
        if numbers.len() % size != 0 {
            return Err(Error::InvalidInput(format!(
                "ciphertext has {} letters, not a multiple of block size {}",
                numbers.len(),
                size
            )));
        }
        trace.push(|| format!("Convert to numbers: {:?}", numbers));

        let decrypted = Self::apply_blocks(&inverse, &numbers, "Ciphertext", "Plaintext", &mut trace);
        let plaintext = numbers_to_text(&decrypted);

        trace.push(|| format!("\nFinal plaintext: {}", plaintext));
        Ok(trace.into_output(plaintext))
    }

    fn apply_blocks(
        matrix: &[Vec<i64>],
        numbers: &[i64],
        input_label: &str,
        output_label: &str,
        trace: &mut StepTrace,
    ) -> Vec<i64> {
        let size = matrix.len();
        let mut out = Vec::with_capacity(numbers.len());

        for (index, block) in numbers.chunks(size).enumerate() {
            let result = mat_vec_mod(matrix, block, ALPHABET_MODULUS);
            trace.push(|| format!("\nBlock {}:", index + 1));
            trace.push(|| {
                format!(
                    "  {} block: {:?} = '{}'",
                    input_label,
                    block,
                    numbers_to_text(block)
                )
            });
            trace.push(|| format!("  Matrix multiplication:\n{} × {:?}", format_matrix(matrix), block));
            trace.push(|| format!("  Mod 26: {:?}", result));
            trace.push(|| format!("  {} block: '{}'", output_label, numbers_to_text(&result)));
            out.extend(result);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_2x2() -> HillKey {
        HillKey::Matrix(vec![vec![3, 3], vec![2, 5]])
    }

    #[test]
    fn test_help_round_trip() {
        let ct = HillCipher::encrypt("HELP", &key_2x2(), false).unwrap();
        assert_eq!(ct.text, "HIAT");
        let pt = HillCipher::decrypt(&ct.text, &key_2x2(), false).unwrap();
        assert_eq!(pt.text, "HELP");
    }

    #[test]
    fn test_pads_with_x() {
        let ct = HillCipher::encrypt("hel", &key_2x2(), false).unwrap();
        assert_eq!(ct.text.len(), 4);
        let pt = HillCipher::decrypt(&ct.text, &key_2x2(), false).unwrap();
        assert_eq!(pt.text, "HELX");
    }

    #[test]
    fn test_3x3_round_trip() {
        let key = HillKey::Matrix(vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]]);
        let ct = HillCipher::encrypt("ACT", &key, false).unwrap();
        assert_eq!(ct.text, "POH");
        let pt = HillCipher::decrypt("POH", &key, false).unwrap();
        assert_eq!(pt.text, "ACT");
    }

    #[test]
    fn test_large_entries_act_as_residues() {
        let big = 26 * 300_000_000_000_000_000;
        let key = HillKey::Matrix(vec![vec![3 + big, 3 - big], vec![i64::MIN + 20, 5]]);
        // i64::MIN + 20 ≡ 18 + 20 ≡ 12, so compare against the reduced matrix
        let reduced = HillKey::Matrix(vec![vec![3, 3], vec![12, 5]]);

        let ct = HillCipher::encrypt("HELP", &key, false).unwrap();
        assert_eq!(ct.text, HillCipher::encrypt("HELP", &reduced, false).unwrap().text);
        assert_eq!(HillCipher::decrypt(&ct.text, &key, false).unwrap().text, "HELP");

        let key = HillKey::Matrix(vec![vec![3 + big, 3], vec![2, 5 - big]]);
        assert_eq!(HillCipher::encrypt("HELP", &key, false).unwrap().text, "HIAT");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let key = HillKey::Matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert!(matches!(
            HillCipher::encrypt("HELP", &key, false),
            Err(Error::InvalidKey(_))
        ));

        let key = HillKey::Matrix(vec![vec![1; 4]; 4]);
        assert!(matches!(
            HillCipher::encrypt("HELP", &key, false),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_singular_key_cannot_decrypt() {
        let key = HillKey::Matrix(vec![vec![2, 4], vec![1, 3]]);
        assert!(matches!(
            HillCipher::decrypt("ABCD", &key, false),
            Err(Error::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_odd_ciphertext_rejected() {
        assert!(matches!(
            HillCipher::decrypt("ABC", &key_2x2(), false),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_matrix_from_text_padding() {
        // "B" → [1], slot i gets (1 + i + 1)
        let (matrix, _) = derive_matrix_from_text("B", 2).unwrap();
        assert_eq!(matrix, vec![vec![1, 3], vec![4, 5]]);

        // Empty key pads from zero: [[1, 2], [3, 4]], det = 4·a - 6 stays even
        assert!(matches!(
            derive_matrix_from_text("", 2),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_matrix_from_text_adjusts_determinant() {
        // "HILL" → [[7, 8], [11, 11]], det = -11 ≡ 15 (coprime): unchanged
        let (matrix, _) = derive_matrix_from_text("HILL", 2).unwrap();
        assert_eq!(matrix, vec![vec![7, 8], vec![11, 11]]);

        // "BBBB" → [[1, 1], [1, 1]], det 0; bump top-left until det is odd and ≠ 13
        let (matrix, steps) = derive_matrix_from_text("BBBB", 2).unwrap();
        assert_eq!(matrix, vec![vec![2, 1], vec![1, 1]]);
        assert!(steps.iter().any(|s| s.contains("Adjusted matrix[0,0] by +1")));
    }

    #[test]
    fn test_text_key_selects_size() {
        let short = HillKey::TextKey("HILL".into());
        let long = HillKey::TextKey("CRYPTO".into());

        let ct = HillCipher::encrypt("ATTACK", &short, false).unwrap();
        assert_eq!(HillCipher::decrypt(&ct.text, &short, false).unwrap().text, "ATTACK");

        let ct = HillCipher::encrypt("ATTACK", &long, true).unwrap();
        assert!(ct.steps.unwrap()[1].contains("3x3"));
        assert_eq!(HillCipher::decrypt(&ct.text, &long, false).unwrap().text, "ATTACK");
    }
}
