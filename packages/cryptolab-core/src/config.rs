//! # Configuration
//!
//! Tunable parameters for the byte ciphers and the protection layer.
//!
//! Every field has a default, so a partial TOML or JSON document only needs
//! to name the values it overrides:
//!
//! ```toml
//! noise_ratio = 0.1
//!
//! [key_stretch]
//! kdf = "pbkdf2_sha256"
//! rounds = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Key derivation function used by the key-stretching defense
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KdfAlgorithm {
    /// Argon2id (memory-hard)
    #[default]
    Argon2id,
    /// PBKDF2-HMAC-SHA256 with a fixed iteration count
    Pbkdf2Sha256,
}

/// Upper bound on derive-and-XOR rounds
pub const MAX_KEY_STRETCH_ROUNDS: u32 = 64;

/// Upper bound on the Argon2 time cost
pub const MAX_TIME_COST: u32 = 16;

/// Upper bound on the Argon2 memory cost (256 MiB)
pub const MAX_MEMORY_COST_KIB: u32 = 256 * 1024;

/// Upper bound on Argon2 lanes
pub const MAX_PARALLELISM: u32 = 16;

/// Key-stretching parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyStretchConfig {
    /// Number of derive-and-XOR rounds
    pub rounds: u32,
    /// Argon2 time cost (iterations)
    pub time_cost: u32,
    /// Argon2 memory cost in KiB
    pub memory_cost_kib: u32,
    /// Argon2 lanes
    pub parallelism: u32,
    /// Which KDF to run
    pub kdf: KdfAlgorithm,
}

impl Default for KeyStretchConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            time_cost: 2,
            memory_cost_kib: 1024,
            parallelism: 1,
            kdf: KdfAlgorithm::Argon2id,
        }
    }
}

impl KeyStretchConfig {
    /// Reject zero values and costs above the `MAX_*` bounds
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("key_stretch.rounds", self.rounds, MAX_KEY_STRETCH_ROUNDS),
            ("key_stretch.time_cost", self.time_cost, MAX_TIME_COST),
            ("key_stretch.memory_cost_kib", self.memory_cost_kib, MAX_MEMORY_COST_KIB),
            ("key_stretch.parallelism", self.parallelism, MAX_PARALLELISM),
        ];

        for (name, value, max) in fields {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be at least 1", name)));
            }
            if value > max {
                return Err(Error::InvalidConfig(format!(
                    "{} must be at most {}, got {}",
                    name, max, value
                )));
            }
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Key-stretching defense parameters
    pub key_stretch: KeyStretchConfig,
    /// Probability of inserting a noise byte after each data byte
    pub noise_ratio: f64,
    /// Rounds of the byte-wise affine cipher
    pub byte_cipher_rounds: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            key_stretch: KeyStretchConfig::default(),
            noise_ratio: 0.25,
            byte_cipher_rounds: 2,
        }
    }
}

impl LabConfig {
    /// Reject values the protection layer cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.noise_ratio) {
            return Err(Error::InvalidConfig(format!(
                "noise_ratio must be within [0, 1], got {}",
                self.noise_ratio
            )));
        }
        if self.byte_cipher_rounds == 0 {
            return Err(Error::InvalidConfig(
                "byte_cipher_rounds must be at least 1".into(),
            ));
        }
        self.key_stretch.validate()
    }
}
