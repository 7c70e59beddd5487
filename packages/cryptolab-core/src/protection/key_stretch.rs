//! Key-stretching defense: salted Argon2id (or PBKDF2) keystream XOR.
//!
//! ```text
//! salt     = 12 random bytes
//! internal = hex(8 random bytes)
//!
//! for r in 0..rounds:
//!     key_r = KDF(internal ‖ ":" ‖ r, salt) → 32 bytes
//!     data  = data XOR key_r (repeating)
//! ```
//!
//! Removal derives the same keys and XORs them in reverse round order.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::xor_with_key;
use crate::config::{KdfAlgorithm, KeyStretchConfig};
use crate::error::{Error, Result};

/// Salt length in bytes
const SALT_LEN: usize = 12;

/// Length of the random internal secret before hex encoding
const INTERNAL_SECRET_LEN: usize = 8;

/// Output length of each derived key
const DERIVED_KEY_LEN: usize = 32;

/// PBKDF2 iteration count
const PBKDF2_ITERATIONS: u32 = 100_000;

/// A derived 32-byte key, wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; DERIVED_KEY_LEN]);

impl DerivedKey {
    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.0
    }
}

/// Parameters stored alongside key-stretched data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStretchMetadata {
    /// Hex-encoded salt
    pub salt: String,
    /// Number of XOR rounds
    pub rounds: u32,
    /// Hex-encoded internal secret (the KDF password prefix)
    pub internal: String,
    /// Argon2 time cost
    pub time_cost: u32,
    /// Argon2 memory cost in KiB
    pub memory_cost_kib: u32,
    /// Argon2 lanes
    pub parallelism: u32,
    /// KDF that produced the keys
    #[serde(default)]
    pub kdf: KdfAlgorithm,
}

impl KeyStretchMetadata {
    fn params(&self) -> KeyStretchConfig {
        KeyStretchConfig {
            rounds: self.rounds,
            time_cost: self.time_cost,
            memory_cost_kib: self.memory_cost_kib,
            parallelism: self.parallelism,
            kdf: self.kdf,
        }
    }
}

/// Derive a 32-byte key from `passphrase` and `salt`
pub fn derive_key(
    passphrase: &str,
    salt: &[u8],
    params: &KeyStretchConfig,
) -> Result<DerivedKey> {
    let mut output = [0u8; DERIVED_KEY_LEN];

    match params.kdf {
        KdfAlgorithm::Argon2id => {
            let argon_params = Params::new(
                params.memory_cost_kib,
                params.time_cost,
                params.parallelism,
                Some(DERIVED_KEY_LEN),
            )
            .map_err(|e| Error::KeyDerivationFailed(format!("invalid Argon2 params: {}", e)))?;

            Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params)
                .hash_password_into(passphrase.as_bytes(), salt, &mut output)
                .map_err(|e| Error::KeyDerivationFailed(format!("Argon2 failed: {}", e)))?;
        }
        KdfAlgorithm::Pbkdf2Sha256 => {
            pbkdf2::pbkdf2_hmac::<Sha256>(
                passphrase.as_bytes(),
                salt,
                PBKDF2_ITERATIONS,
                &mut output,
            );
        }
    }

    let key = DerivedKey(output);
    output.zeroize();
    Ok(key)
}

fn apply_rounds(
    data: &[u8],
    internal: &str,
    salt: &[u8],
    params: &KeyStretchConfig,
    rounds: impl Iterator<Item = u32>,
) -> Result<Vec<u8>> {
    let mut out = data.to_vec();
    for r in rounds {
        let key = derive_key(&format!("{}:{}", internal, r), salt, params)?;
        out = xor_with_key(&out, key.as_bytes());
    }
    Ok(out)
}

pub(super) fn wrap<R: RngCore + CryptoRng>(
    data: &[u8],
    params: &KeyStretchConfig,
    rng: &mut R,
) -> Result<(Vec<u8>, KeyStretchMetadata)> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut secret = [0u8; INTERNAL_SECRET_LEN];
    rng.fill_bytes(&mut secret);
    let internal = hex::encode(secret);
    secret.zeroize();

    let out = apply_rounds(data, &internal, &salt, params, 0..params.rounds)?;

    tracing::debug!(rounds = params.rounds, kdf = ?params.kdf, "Key-stretched data");

    let meta = KeyStretchMetadata {
        salt: hex::encode(salt),
        rounds: params.rounds,
        internal,
        time_cost: params.time_cost,
        memory_cost_kib: params.memory_cost_kib,
        parallelism: params.parallelism,
        kdf: params.kdf,
    };
    Ok((out, meta))
}

/// Costs in the metadata are bounded before any KDF runs
pub(super) fn unwrap(data: &[u8], meta: &KeyStretchMetadata) -> Result<Vec<u8>> {
    let params = meta.params();
    params
        .validate()
        .map_err(|e| Error::InvalidInput(format!("key-stretch metadata rejected: {}", e)))?;

    let salt = hex::decode(&meta.salt)?;
    apply_rounds(data, &meta.internal, &salt, &params, (0..meta.rounds).rev())
}
