//! Caesar cipher: `E(x) = (x + k) mod 26`.

use super::{index_letter, letter_index, CipherOutput, StepTrace};

/// Caesar (shift) cipher
pub struct CaesarCipher;

impl CaesarCipher {
    /// Encrypt by shifting every letter forward by `shift`
    ///
    /// The shift is reduced mod 26 first, so negative and large shifts act
    /// as their residue. Non-letters pass through; case is preserved.
    pub fn encrypt(plaintext: &str, shift: i64, show_steps: bool) -> CipherOutput {
        let normalized = shift.rem_euclid(26);
        let mut trace = StepTrace::new(show_steps);

        trace.push(|| format!("1. Plaintext: {}", plaintext));
        trace.push(|| format!("2. Shift key: {} (normalized to {})", shift, normalized));
        trace.push(|| format!("3. Encryption formula: E(x) = (x + {}) mod 26", normalized));
        trace.push(|| "\n4. Character-by-character encryption:".to_string());

        let ciphertext = Self::shift_text(plaintext, normalized, &mut trace);

        trace.push(|| format!("\n5. Final ciphertext: {}", ciphertext));
        trace.into_output(ciphertext)
    }

    /// Decrypt by shifting every letter back by `shift`
    pub fn decrypt(ciphertext: &str, shift: i64, show_steps: bool) -> CipherOutput {
        let normalized = (26 - shift.rem_euclid(26)) % 26;
        let mut trace = StepTrace::new(show_steps);

        trace.push(|| format!("1. Ciphertext: {}", ciphertext));
        trace.push(|| format!("2. Shift key: {} (inverse shift {})", shift, normalized));
        trace.push(|| format!("3. Decryption formula: D(x) = (x - {}) mod 26", shift));
        trace.push(|| "\n4. Character-by-character decryption:".to_string());

        let plaintext = Self::shift_text(ciphertext, normalized, &mut trace);

        trace.push(|| format!("\n5. Final plaintext: {}", plaintext));
        trace.into_output(plaintext)
    }

    fn shift_text(text: &str, shift: i64, trace: &mut StepTrace) -> String {
        text.chars()
            .map(|c| match letter_index(c) {
                Some((pos, upper)) => {
                    let new_pos = (pos + shift) % 26;
                    let out = index_letter(new_pos, upper);
                    trace.push(|| {
                        format!(
                            "   '{}' (pos {}) → ({} + {}) mod 26 = {} → '{}'",
                            c, pos, pos, shift, new_pos, out
                        )
                    });
                    out
                }
                None => {
                    trace.push(|| format!("   '{}' → '{}' (unchanged)", c, c));
                    c
                }
            })
            .collect()
    }
}
