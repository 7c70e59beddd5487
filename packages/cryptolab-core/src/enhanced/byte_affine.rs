//! Byte-wise affine cipher with ciphertext chaining and a one-byte IV.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::decode_utf8_ignoring_errors;
use crate::config::LabConfig;
use crate::error::{Error, Result};
use crate::math::{mod_inverse, BYTE_MODULUS};
use crate::protection::{self, ProtectionMetadata};

/// Default number of affine rounds
pub const DEFAULT_ROUNDS: usize = 2;

/// Algorithm tag carried in the ciphertext metadata
pub const ALGORITHM: &str = "enhanced_affine";

/// Algorithm tag for the protected variant
pub const PROTECTED_ALGORITHM: &str = "enhanced_affine_protected";

/// One round `x → (multiplier·x + constant) mod 256`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct RoundKey {
    /// Odd multiplier, so it is invertible mod 256
    pub multiplier: u8,
    /// Additive constant
    pub constant: u8,
}

/// Ciphertext plus the parameters needed to interpret it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedCiphertext {
    /// base64(IV ‖ chained bytes)
    pub ciphertext: String,
    /// IV as two hex digits
    pub iv: String,
    /// Number of rounds used
    pub rounds: usize,
    /// Always `enhanced_affine`
    pub algorithm: String,
}

/// Affine ciphertext with a protection defense layered on top
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedCiphertext {
    /// Hex text produced by the protection layer
    pub ciphertext: String,
    /// Metadata of the inner affine encryption
    pub cipher_meta: EnhancedCiphertext,
    /// Metadata needed to remove the protection
    pub protection_meta: ProtectionMetadata,
    /// Always `enhanced_affine_protected`
    pub algorithm: String,
}

/// Byte-wise affine cipher keyed by a passphrase
///
/// Round keys come from a ChaCha20 generator seeded with SHA-256 of the
/// passphrase. Anyone who knows the passphrase can regenerate them, and
/// the construction is linear within a block, so this is not a secure
/// cipher.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EnhancedAffineCipher {
    rounds: Vec<RoundKey>,
}

impl EnhancedAffineCipher {
    /// Derive `rounds` round keys from `passphrase`
    pub fn new(passphrase: &str, rounds: usize) -> Result<Self> {
        if rounds == 0 {
            return Err(Error::InvalidKey("at least one round is required".into()));
        }
        Ok(Self::derive(passphrase, rounds))
    }

    /// Derive the default two rounds from `passphrase`
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::derive(passphrase, DEFAULT_ROUNDS)
    }

    fn derive(passphrase: &str, count: usize) -> Self {
        let mut seed: [u8; 32] = Sha256::digest(passphrase.as_bytes()).into();
        let mut rng = ChaCha20Rng::from_seed(seed);
        seed.zeroize();

        let rounds = (0..count)
            .map(|_| RoundKey {
                multiplier: rng.gen_range(0u8..128) * 2 + 1,
                constant: rng.gen(),
            })
            .collect();

        Self { rounds }
    }

    /// Use the round count from `config`
    pub fn with_config(passphrase: &str, config: &LabConfig) -> Result<Self> {
        Self::new(passphrase, config.byte_cipher_rounds)
    }

    /// The derived round keys
    pub fn round_keys(&self) -> &[RoundKey] {
        &self.rounds
    }

    /// Encrypt with a random IV from the thread RNG
    pub fn encrypt(&self, message: &str) -> EnhancedCiphertext {
        self.encrypt_with_rng(message, &mut rand::thread_rng())
    }

    /// Encrypt with an IV drawn from `rng`
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        message: &str,
        rng: &mut R,
    ) -> EnhancedCiphertext {
        self.encrypt_with_iv(message, rng.gen())
    }

    /// Encrypt with an explicit IV
    pub fn encrypt_with_iv(&self, message: &str, iv: u8) -> EnhancedCiphertext {
        let bytes = message.as_bytes();
        let mut full = Vec::with_capacity(bytes.len() + 1);
        full.push(iv);

        let mut prev = iv;
        for &byte in bytes {
            let mut value = byte ^ prev;
            for round in &self.rounds {
                value = round.multiplier.wrapping_mul(value).wrapping_add(round.constant);
            }
            full.push(value);
            prev = value;
        }

        tracing::debug!(len = bytes.len(), rounds = self.rounds.len(), "Enhanced affine encrypt");

        EnhancedCiphertext {
            ciphertext: BASE64.encode(&full),
            iv: hex::encode([iv]),
            rounds: self.rounds.len(),
            algorithm: ALGORITHM.to_string(),
        }
    }

    /// Decrypt to raw bytes
    pub fn decrypt_bytes(&self, ciphertext_b64: &str) -> Result<Vec<u8>> {
        let full = BASE64.decode(ciphertext_b64.trim())?;
        let (&iv, body) = full
            .split_first()
            .ok_or_else(|| Error::Encoding("ciphertext is missing its IV byte".into()))?;

        let inverses = self
            .rounds
            .iter()
            .map(|r| mod_inverse(r.multiplier as i64, BYTE_MODULUS).map(|inv| inv as u8))
            .collect::<Result<Vec<u8>>>()?;

        let mut out = Vec::with_capacity(body.len());
        let mut prev = iv;
        for &value in body {
            let mut tmp = value;
            for (round, &inv) in self.rounds.iter().zip(&inverses).rev() {
                tmp = inv.wrapping_mul(tmp.wrapping_sub(round.constant));
            }
            out.push(tmp ^ prev);
            prev = value;
        }
        Ok(out)
    }

    /// Decrypt, dropping bytes that do not form valid UTF-8
    pub fn decrypt(&self, ciphertext_b64: &str) -> Result<String> {
        let bytes = self.decrypt_bytes(ciphertext_b64)?;
        Ok(decode_utf8_ignoring_errors(&bytes))
    }

    /// Encrypt, then apply the defense for `attack` to the base64 output
    pub fn encrypt_with_protection(
        &self,
        plaintext: &str,
        attack: &str,
        config: &LabConfig,
    ) -> Result<ProtectedCiphertext> {
        let cipher_meta = self.encrypt(plaintext);
        let (ciphertext, protection_meta) =
            protection::apply_protection(&cipher_meta.ciphertext, attack, config)?;

        tracing::info!(
            attack,
            defense = %protection_meta.defense(),
            "Encrypted with protection"
        );

        Ok(ProtectedCiphertext {
            ciphertext,
            cipher_meta,
            protection_meta,
            algorithm: PROTECTED_ALGORITHM.to_string(),
        })
    }

    /// Remove the protection layer, then decrypt
    pub fn decrypt_with_protection(&self, protected: &ProtectedCiphertext) -> Result<String> {
        let inner = protection::remove_protection(&protected.ciphertext, &protected.protection_meta)?;
        self.decrypt(&inner)
    }
}
