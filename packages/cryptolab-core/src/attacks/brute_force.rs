//! Exhaustive Caesar key search ranked by closeness to English.

use serde::{Deserialize, Serialize};

use super::{count_letters, english_frequency};
use crate::ciphers::CaesarCipher;

/// One decryption attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BruteForceCandidate {
    /// Shift tried
    pub shift: u8,
    /// Decryption under that shift
    pub decrypted_text: String,
    /// Closeness to English; higher is better, 0 means no letters
    pub score: f64,
}

/// `−Σ |observed% − English%|` over the letters present in `text`
pub fn score_english(text: &str) -> f64 {
    let (counts, total) = count_letters(text);
    if total == 0 {
        return 0.0;
    }

    counts
        .iter()
        .map(|&(letter, count)| {
            let observed = count as f64 / total as f64 * 100.0;
            -(observed - english_frequency(letter)).abs()
        })
        .sum()
}

/// Try all 26 shifts, best-scoring first
///
/// Equal scores keep ascending shift order.
pub fn brute_force_caesar(ciphertext: &str) -> Vec<BruteForceCandidate> {
    let mut candidates: Vec<BruteForceCandidate> = (0..26u8)
        .map(|shift| {
            let decrypted_text = CaesarCipher::decrypt(ciphertext, shift as i64, false).text;
            let score = score_english(&decrypted_text);
            BruteForceCandidate {
                shift,
                decrypted_text,
                score,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    if let Some(best) = candidates.first() {
        tracing::info!(shift = best.shift, score = best.score, "Brute force complete");
    }
    candidates
}
