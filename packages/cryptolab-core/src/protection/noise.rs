//! Frequency-noise defense: random uppercase letters interleaved with data.

use std::collections::HashSet;

use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Output indices of inserted noise bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseMetadata {
    /// Indices into the protected byte string, ascending
    #[serde(default)]
    pub noise_pos: Vec<usize>,
}

pub(super) fn wrap<R: RngCore + CryptoRng>(
    data: &[u8],
    ratio: f64,
    rng: &mut R,
) -> (Vec<u8>, NoiseMetadata) {
    let mut out = Vec::with_capacity(data.len() + data.len() / 3);
    let mut noise_pos = Vec::new();

    for &byte in data {
        out.push(byte);
        if rng.gen::<f64>() < ratio {
            noise_pos.push(out.len());
            out.push(rng.gen_range(b'A'..=b'Z'));
        }
    }

    tracing::debug!(inserted = noise_pos.len(), ratio, "Inserted noise");
    (out, NoiseMetadata { noise_pos })
}

pub(super) fn unwrap(data: &[u8], meta: &NoiseMetadata) -> Vec<u8> {
    let positions: HashSet<usize> = meta.noise_pos.iter().copied().collect();
    data.iter()
        .enumerate()
        .filter(|(i, _)| !positions.contains(i))
        .map(|(_, &b)| b)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_zero_ratio_is_identity() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let (out, meta) = wrap(b"attack at dawn", 0.0, &mut rng);
        assert_eq!(out, b"attack at dawn");
        assert!(meta.noise_pos.is_empty());
    }

    #[test]
    fn test_full_ratio_doubles_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let (out, meta) = wrap(b"abc", 1.0, &mut rng);
        assert_eq!(out.len(), 6);
        assert_eq!(meta.noise_pos, vec![1, 3, 5]);
        assert!(meta.noise_pos.iter().all(|&p| out[p].is_ascii_uppercase()));
        assert_eq!(unwrap(&out, &meta), b"abc");
    }

    #[test]
    fn test_round_trip_default_ratio() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let data: Vec<u8> = (0..=255).collect();
        let (out, meta) = wrap(&data, 0.25, &mut rng);
        assert_eq!(out.len(), data.len() + meta.noise_pos.len());
        assert_eq!(unwrap(&out, &meta), data);
    }

    #[test]
    fn test_unwrap_drops_exactly_recorded_positions() {
        let meta = NoiseMetadata { noise_pos: vec![0, 2] };
        assert_eq!(unwrap(b"XaYb", &meta), b"ab");
    }
}
