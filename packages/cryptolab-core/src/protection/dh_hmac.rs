//! # Diffie-Hellman + XOR + HMAC
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    DH → XOR → HMAC (toy parameters)                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   Alice                                         Bob                    │
//! │   a ∈ [2, p-2]                                  b ∈ [2, p-2]           │
//! │   A = g^a mod p  ─────────── A ──────────────►                         │
//! │                  ◄────────── B ───────────────  B = g^b mod p          │
//! │   s = B^a mod p                                 s = A^b mod p          │
//! │                                                                         │
//! │   sym = SHA-256(decimal(s))                                            │
//! │   ct  = data XOR sym                                                   │
//! │   tag = HMAC-SHA256(sym, ct)                                           │
//! │                                                                         │
//! │   p = 2357, g = 2                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Removal recomputes the tag and compares it in constant time before
//! touching the ciphertext.

use hmac::{Hmac, Mac};
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::xor_with_key;
use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// DH prime modulus
pub const DH_P: u64 = 2357;

/// DH generator
pub const DH_G: u64 = 2;

/// DH values and integrity tag stored with the ciphertext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhMetadata {
    /// Shared secret (stored in the clear; this is a demonstration)
    pub shared: u64,
    /// Hex HMAC-SHA256 of the ciphertext
    pub hmac: String,
    /// Alice's public value
    #[serde(rename = "A_pub")]
    pub a_pub: u64,
    /// Bob's public value
    #[serde(rename = "B_pub")]
    pub b_pub: u64,
}

/// Symmetric key derived from the shared secret
#[derive(Zeroize, ZeroizeOnDrop)]
struct SymmetricKey([u8; 32]);

impl SymmetricKey {
    fn from_shared(shared: u64) -> Self {
        Self(Sha256::digest(shared.to_string().as_bytes()).into())
    }

    fn mac(&self) -> Result<HmacSha256> {
        <HmacSha256 as Mac>::new_from_slice(&self.0)
            .map_err(|e| Error::KeyDerivationFailed(format!("HMAC key rejected: {}", e)))
    }
}

/// `base^exp mod modulus` by square-and-multiply
fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1u64;
    let mut base = base % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    result
}

/// Public value `g^private mod p`
pub fn dh_public(private: u64) -> u64 {
    mod_pow(DH_G, private, DH_P)
}

/// Shared secret `public^private mod p`
pub fn dh_shared(public: u64, private: u64) -> u64 {
    mod_pow(public, private, DH_P)
}

fn private_key<R: RngCore + CryptoRng>(rng: &mut R) -> u64 {
    rng.gen_range(2..=DH_P - 2)
}

pub(super) fn wrap<R: RngCore + CryptoRng>(
    data: &[u8],
    rng: &mut R,
) -> Result<(Vec<u8>, DhMetadata)> {
    let a = private_key(rng);
    let b = private_key(rng);
    let a_pub = dh_public(a);
    let b_pub = dh_public(b);
    let shared = dh_shared(b_pub, a);

    let sym = SymmetricKey::from_shared(shared);
    let ct = xor_with_key(data, &sym.0);

    let mut mac = sym.mac()?;
    mac.update(&ct);
    let tag = hex::encode(mac.finalize().into_bytes());

    tracing::debug!(a_pub, b_pub, "DH exchange complete");

    Ok((
        ct,
        DhMetadata {
            shared,
            hmac: tag,
            a_pub,
            b_pub,
        },
    ))
}

pub(super) fn unwrap(data: &[u8], meta: &DhMetadata) -> Result<Vec<u8>> {
    let sym = SymmetricKey::from_shared(meta.shared);

    let expected = hex::decode(&meta.hmac).map_err(|_| {
        tracing::warn!("HMAC tag is not valid hex");
        Error::Integrity
    })?;

    let mut mac = sym.mac()?;
    mac.update(data);
    if mac.verify_slice(&expected).is_err() {
        tracing::warn!(len = data.len(), "HMAC verification failed");
        return Err(Error::Integrity);
    }

    Ok(xor_with_key(data, &sym.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_mod_pow() {
        assert_eq!(mod_pow(2, 10, 2357), 1024);
        assert_eq!(mod_pow(2, 11, 2357), 2048 % 2357);
        assert_eq!(mod_pow(2, 12, 2357), 4096 % 2357);
        assert_eq!(mod_pow(5, 0, 2357), 1);
    }

    #[test]
    fn test_both_sides_agree() {
        let (a, b) = (123, 456);
        let shared_a = dh_shared(dh_public(b), a);
        let shared_b = dh_shared(dh_public(a), b);
        assert_eq!(shared_a, shared_b);
    }

    #[test]
    fn test_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let (ct, meta) = wrap(b"meet at noon", &mut rng).unwrap();
        assert_eq!(meta.hmac.len(), 64);
        assert!(meta.shared > 0 && meta.shared < DH_P);
        assert_eq!(unwrap(&ct, &meta).unwrap(), b"meet at noon");
    }

    #[test]
    fn test_tampered_ciphertext_detected() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let (mut ct, meta) = wrap(b"transfer 100", &mut rng).unwrap();
        ct[0] ^= 0x01;
        let err = unwrap(&ct, &meta).unwrap_err();
        assert!(err.is_tampering());
    }

    #[test]
    fn test_tampered_tag_detected() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let (ct, mut meta) = wrap(b"hello", &mut rng).unwrap();
        meta.hmac = "00".repeat(32);
        assert_eq!(unwrap(&ct, &meta).unwrap_err(), Error::Integrity);

        meta.hmac = "not hex".into();
        assert_eq!(unwrap(&ct, &meta).unwrap_err(), Error::Integrity);
    }

    #[test]
    fn test_metadata_field_names() {
        let meta = DhMetadata {
            shared: 1,
            hmac: "ab".into(),
            a_pub: 2,
            b_pub: 3,
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["A_pub"], 2);
        assert_eq!(value["B_pub"], 3);
    }
}
