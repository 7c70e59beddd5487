//! Affine cipher: `E(x) = (a·x + b) mod 26`, `D(y) = a⁻¹·(y − b) mod 26`.

use super::{index_letter, letter_index, CipherOutput, StepTrace};
use crate::error::{Error, Result};
use crate::math::{gcd, mod_inverse, ALPHABET_MODULUS};

/// Affine cipher
pub struct AffineCipher;

impl AffineCipher {
    fn check_key(a: i64) -> Result<()> {
        if gcd(a.rem_euclid(ALPHABET_MODULUS), ALPHABET_MODULUS) != 1 {
            return Err(Error::InvalidKey(format!(
                "Key 'a' ({}) must be coprime with 26",
                a
            )));
        }
        Ok(())
    }

    /// Both key parts as residues in `[0, 26)`
    fn reduce(a: i64, b: i64) -> (i64, i64) {
        (a.rem_euclid(ALPHABET_MODULUS), b.rem_euclid(ALPHABET_MODULUS))
    }

    /// Encrypt with key `(a, b)`; fails with `InvalidKey` if gcd(a, 26) ≠ 1
    pub fn encrypt(plaintext: &str, a: i64, b: i64, show_steps: bool) -> Result<CipherOutput> {
        Self::check_key(a)?;
        let (a, b) = Self::reduce(a, b);

        let mut trace = StepTrace::new(show_steps);
        trace.push(|| format!("1. Plaintext: {}", plaintext));
        trace.push(|| format!("2. Key: a={}, b={}", a, b));
        trace.push(|| format!("3. Encryption formula: E(x) = ({}x + {}) mod 26", a, b));
        trace.push(|| "\n4. Character-by-character encryption:".to_string());

        let ciphertext: String = plaintext
            .chars()
            .map(|c| match letter_index(c) {
                Some((x, upper)) => {
                    let encrypted = (a * x + b).rem_euclid(ALPHABET_MODULUS);
                    let out = index_letter(encrypted, upper);
                    trace.push(|| {
                        format!(
                            "   '{}' (x={}) → ({}×{} + {}) mod 26 = {} → '{}'",
                            c, x, a, x, b, encrypted, out
                        )
                    });
                    out
                }
                None => {
                    trace.push(|| format!("   '{}' → '{}' (unchanged)", c, c));
                    c
                }
            })
            .collect();

        trace.push(|| format!("\n5. Final ciphertext: {}", ciphertext));
        Ok(trace.into_output(ciphertext))
    }

    /// Decrypt with key `(a, b)` using the inverse of `a` mod 26
    pub fn decrypt(ciphertext: &str, a: i64, b: i64, show_steps: bool) -> Result<CipherOutput> {
        Self::check_key(a)?;
        let (a, b) = Self::reduce(a, b);
        let a_inv = mod_inverse(a, ALPHABET_MODULUS)?;

        let mut trace = StepTrace::new(show_steps);
        trace.push(|| format!("1. Ciphertext: {}", ciphertext));
        trace.push(|| format!("2. Key: a={}, b={}", a, b));
        trace.push(|| format!("3. Calculate a^(-1) mod 26: {}", a_inv));
        trace.push(|| format!("4. Decryption formula: D(y) = {}(y - {}) mod 26", a_inv, b));
        trace.push(|| "\n5. Character-by-character decryption:".to_string());

        let plaintext: String = ciphertext
            .chars()
            .map(|c| match letter_index(c) {
                Some((y, upper)) => {
                    let decrypted = (a_inv * (y - b)).rem_euclid(ALPHABET_MODULUS);
                    let out = index_letter(decrypted, upper);
                    trace.push(|| {
                        format!(
                            "   '{}' (y={}) → {}×({} - {}) mod 26 = {} → '{}'",
                            c, y, a_inv, y, b, decrypted, out
                        )
                    });
                    out
                }
                None => {
                    trace.push(|| format!("   '{}' → '{}' (unchanged)", c, c));
                    c
                }
            })
            .collect();

        trace.push(|| format!("\n6. Final plaintext: {}", plaintext));
        Ok(trace.into_output(plaintext))
    }
}
