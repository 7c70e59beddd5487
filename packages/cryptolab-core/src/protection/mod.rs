//! # Protection Layer
//!
//! Defenses wrapped around an already-encrypted string, each chosen to
//! counter one class of attack.
//!
//! ## Attack → Defense Mapping
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ATTACK → DEFENSE MAPPING                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  bruteforce ─┐                                                          │
//! │  dictionary ─┼──► key_stretch_argon2   salt + internal secret,         │
//! │  (unknown) ──┘                         Argon2id / PBKDF2 → XOR          │
//! │                                                                         │
//! │  frequency ─────► noise                random A-Z bytes at recorded    │
//! │                                        positions                       │
//! │                                                                         │
//! │  mitm ──────────► dh_xor_hmac          toy DH (p = 2357) → SHA-256     │
//! │                                        → XOR, HMAC-SHA256 tag          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//!
//! Protected text is lowercase hex. Everything needed to undo the defense
//! travels in a [`ProtectionMetadata`] value (JSON object tagged by
//! `defense`). Removal without metadata is not possible.
//!
//! ## Security Notes
//!
//! These defenses are teaching material. The DH group is tiny and the
//! shared secret is stored in the metadata, the key-stretching secret is
//! stored next to the data, and the noise positions are public.

mod dh_hmac;
mod key_stretch;
mod noise;

use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::LabConfig;
use crate::error::{Error, Result};

pub use dh_hmac::{dh_public, dh_shared, DhMetadata, DH_G, DH_P};
pub use key_stretch::{derive_key, DerivedKey, KeyStretchMetadata};
pub use noise::NoiseMetadata;

// ============================================================================
// ATTACK & DEFENSE TAGS
// ============================================================================

/// Attack class a caller wants protection against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    /// Exhaustive key search
    #[serde(rename = "bruteforce")]
    BruteForce,
    /// Guessing keys from a word list
    Dictionary,
    /// Statistical analysis of letter frequencies
    Frequency,
    /// Man-in-the-middle interception
    Mitm,
}

impl AttackType {
    /// String tag
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackType::BruteForce => "bruteforce",
            AttackType::Dictionary => "dictionary",
            AttackType::Frequency => "frequency",
            AttackType::Mitm => "mitm",
        }
    }

    /// Defense that counters this attack
    pub fn defense(&self) -> Defense {
        match self {
            AttackType::BruteForce | AttackType::Dictionary => Defense::KeyStretch,
            AttackType::Frequency => Defense::Noise,
            AttackType::Mitm => Defense::DhXorHmac,
        }
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bruteforce" => Ok(AttackType::BruteForce),
            "dictionary" => Ok(AttackType::Dictionary),
            "frequency" => Ok(AttackType::Frequency),
            "mitm" => Ok(AttackType::Mitm),
            other => Err(Error::InvalidInput(format!("unknown attack type: {}", other))),
        }
    }
}

/// The three defenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defense {
    /// Salted key stretching with XOR
    #[serde(rename = "key_stretch_argon2")]
    KeyStretch,
    /// Random noise bytes
    #[serde(rename = "noise")]
    Noise,
    /// Diffie-Hellman derived XOR key plus HMAC tag
    #[serde(rename = "dh_xor_hmac")]
    DhXorHmac,
}

impl Defense {
    /// Metadata tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Defense::KeyStretch => "key_stretch_argon2",
            Defense::Noise => "noise",
            Defense::DhXorHmac => "dh_xor_hmac",
        }
    }

    /// Resolve an attack tag, falling back to key stretching
    pub fn for_attack_tag(tag: &str) -> Defense {
        match tag.parse::<AttackType>() {
            Ok(attack) => attack.defense(),
            Err(_) => {
                tracing::warn!(attack = tag, "Unknown attack type, using key stretching");
                Defense::KeyStretch
            }
        }
    }
}

impl fmt::Display for Defense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Everything needed to remove a defense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "defense")]
pub enum ProtectionMetadata {
    /// Key stretching parameters
    #[serde(rename = "key_stretch_argon2")]
    KeyStretch(KeyStretchMetadata),
    /// Noise positions
    #[serde(rename = "noise")]
    Noise(NoiseMetadata),
    /// DH values and HMAC tag
    #[serde(rename = "dh_xor_hmac")]
    DhXorHmac(DhMetadata),
}

impl ProtectionMetadata {
    /// Which defense produced this metadata
    pub fn defense(&self) -> Defense {
        match self {
            ProtectionMetadata::KeyStretch(_) => Defense::KeyStretch,
            ProtectionMetadata::Noise(_) => Defense::Noise,
            ProtectionMetadata::DhXorHmac(_) => Defense::DhXorHmac,
        }
    }

    /// Parse metadata from a JSON value
    ///
    /// A missing or unrecognized `defense` tag is reported as
    /// `UnknownDefense` rather than a generic deserialization error.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let tag = value
            .get("defense")
            .and_then(|d| d.as_str())
            .map(str::to_string);

        match tag.as_deref() {
            Some("key_stretch_argon2") | Some("noise") | Some("dh_xor_hmac") => {
                Ok(serde_json::from_value(value)?)
            }
            Some(other) => Err(Error::UnknownDefense(other.to_string())),
            None => Err(Error::UnknownDefense("None".to_string())),
        }
    }

    /// Parse metadata from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ============================================================================
// APPLY / REMOVE
// ============================================================================

/// XOR `data` with `key`, repeating the key as needed
pub(crate) fn xor_with_key(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

/// Apply the defense for `attack` to raw bytes
pub fn protect_bytes_with_rng<R: RngCore + CryptoRng>(
    data: &[u8],
    defense: Defense,
    config: &LabConfig,
    rng: &mut R,
) -> Result<(Vec<u8>, ProtectionMetadata)> {
    config.validate()?;

    let (out, meta) = match defense {
        Defense::KeyStretch => {
            let (out, meta) = key_stretch::wrap(data, &config.key_stretch, rng)?;
            (out, ProtectionMetadata::KeyStretch(meta))
        }
        Defense::Noise => {
            let (out, meta) = noise::wrap(data, config.noise_ratio, rng);
            (out, ProtectionMetadata::Noise(meta))
        }
        Defense::DhXorHmac => {
            let (out, meta) = dh_hmac::wrap(data, rng)?;
            (out, ProtectionMetadata::DhXorHmac(meta))
        }
    };

    tracing::info!(
        defense = %defense,
        input_len = data.len(),
        output_len = out.len(),
        "Applied protection"
    );
    Ok((out, meta))
}

/// Apply the defense for `attack` to raw bytes using the thread RNG
pub fn protect_bytes(
    data: &[u8],
    attack: &str,
    config: &LabConfig,
) -> Result<(Vec<u8>, ProtectionMetadata)> {
    let defense = Defense::for_attack_tag(attack);
    protect_bytes_with_rng(data, defense, config, &mut rand::thread_rng())
}

/// Undo a defense on raw bytes
pub fn unprotect_bytes(data: &[u8], meta: &ProtectionMetadata) -> Result<Vec<u8>> {
    let out = match meta {
        ProtectionMetadata::KeyStretch(m) => key_stretch::unwrap(data, m)?,
        ProtectionMetadata::Noise(m) => noise::unwrap(data, m),
        ProtectionMetadata::DhXorHmac(m) => dh_hmac::unwrap(data, m)?,
    };
    tracing::debug!(defense = %meta.defense(), len = out.len(), "Removed protection");
    Ok(out)
}

/// Protect a string; returns lowercase hex plus metadata
///
/// Unknown attack tags fall back to key stretching.
pub fn apply_protection(
    text: &str,
    attack: &str,
    config: &LabConfig,
) -> Result<(String, ProtectionMetadata)> {
    let (bytes, meta) = protect_bytes(text.as_bytes(), attack, config)?;
    Ok((hex::encode(bytes), meta))
}

/// Deterministic variant of [`apply_protection`]
pub fn apply_protection_with_rng<R: RngCore + CryptoRng>(
    text: &str,
    defense: Defense,
    config: &LabConfig,
    rng: &mut R,
) -> Result<(String, ProtectionMetadata)> {
    let (bytes, meta) = protect_bytes_with_rng(text.as_bytes(), defense, config, rng)?;
    Ok((hex::encode(bytes), meta))
}

/// Remove protection from hex text produced by [`apply_protection`]
pub fn remove_protection(hex_text: &str, meta: &ProtectionMetadata) -> Result<String> {
    let data = hex::decode(hex_text.trim())?;
    let plain = unprotect_bytes(&data, meta)?;
    String::from_utf8(plain)
        .map_err(|e| Error::Encoding(format!("protected data is not UTF-8: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================
