//! # Attack Engine
//!
//! Cryptanalysis against the classical ciphers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ATTACK ENGINE                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ciphertext ──┬──► brute_force_caesar ──► 26 candidates, best first     │
//! │               │                                                         │
//! │               └──► analyze_frequency  ──► FrequencyReport               │
//! │                                           (χ² vs. English)              │
//! │                                                                         │
//! │  plaintext  ─┐                                                          │
//! │  ciphertext ─┴──► recover_hill_key    ──► K = C · P⁻¹ mod 26            │
//! │                                                                         │
//! │  cipher kind ───► attack_recommendations                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An attack that does not find the key is a normal outcome, reported in
//! the result value. Only malformed arguments are errors.

mod brute_force;
mod frequency;
mod known_plaintext;
mod recommendations;

pub use brute_force::{brute_force_caesar, score_english, BruteForceCandidate};
pub use frequency::{analyze_frequency, FrequencyReport, LetterComparison, LetterCount};
pub use known_plaintext::{
    recover_hill_key, try_recover_hill_key, KnownPlaintextResult, Verification,
};
pub use recommendations::{
    attack_recommendations, recommendations_for, AttackStrategy, Recommendations,
};

/// Standard English letter frequencies, in percent
pub const ENGLISH_FREQUENCIES: [(char, f64); 26] = [
    ('E', 12.70),
    ('T', 9.06),
    ('A', 8.17),
    ('O', 7.51),
    ('I', 6.97),
    ('N', 6.75),
    ('S', 6.33),
    ('H', 6.09),
    ('R', 5.99),
    ('D', 4.25),
    ('L', 4.03),
    ('C', 2.78),
    ('U', 2.76),
    ('M', 2.41),
    ('W', 2.36),
    ('F', 2.23),
    ('G', 2.02),
    ('Y', 1.97),
    ('P', 1.93),
    ('B', 1.29),
    ('V', 0.98),
    ('K', 0.77),
    ('J', 0.15),
    ('X', 0.15),
    ('Q', 0.10),
    ('Z', 0.07),
];

/// Expected percentage for an uppercase letter (0 for anything else)
pub fn english_frequency(letter: char) -> f64 {
    ENGLISH_FREQUENCIES
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, f)| *f)
        .unwrap_or(0.0)
}

/// Count ASCII letters (case-folded), in order of first appearance
pub(crate) fn count_letters(text: &str) -> (Vec<(char, usize)>, usize) {
    let mut counts: Vec<(char, usize)> = Vec::new();
    let mut total = 0;

    for c in text.chars().filter(char::is_ascii_alphabetic) {
        let upper = c.to_ascii_uppercase();
        total += 1;
        match counts.iter_mut().find(|(l, _)| *l == upper) {
            Some((_, n)) => *n += 1,
            None => counts.push((upper, 1)),
        }
    }
    (counts, total)
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
