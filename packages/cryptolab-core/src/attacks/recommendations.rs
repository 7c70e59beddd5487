//! Static attack and protection advice per cipher.

use serde::Serialize;

use crate::ciphers::CipherKind;

/// One attack that works against a cipher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackStrategy {
    /// Attack name
    pub name: &'static str,
    /// Easy / Medium / Hard
    pub difficulty: &'static str,
    /// How it works
    pub description: &'static str,
    /// Work factor
    pub time_complexity: &'static str,
    /// What the attacker needs
    pub requirements: &'static str,
}

/// Attacks and countermeasures for one cipher
///
/// Serializes to `{}` for an unknown cipher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    /// Applicable attacks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attacks: Vec<AttackStrategy>,
    /// Countermeasures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protection: Vec<&'static str>,
}

const fn strategy(
    name: &'static str,
    difficulty: &'static str,
    description: &'static str,
    time_complexity: &'static str,
    requirements: &'static str,
) -> AttackStrategy {
    AttackStrategy {
        name,
        difficulty,
        description,
        time_complexity,
        requirements,
    }
}

/// Recommendations for a known cipher
pub fn recommendations_for(kind: CipherKind) -> Recommendations {
    match kind {
        CipherKind::Caesar => Recommendations {
            attacks: vec![
                strategy(
                    "Brute Force",
                    "Easy",
                    "Try all 26 possible shifts",
                    "O(n)",
                    "Only ciphertext needed",
                ),
                strategy(
                    "Frequency Analysis",
                    "Easy",
                    "Compare letter frequencies with English",
                    "O(n)",
                    "Ciphertext of reasonable length",
                ),
            ],
            protection: vec![
                "Use longer keys (Vigenère)",
                "Use polyalphabetic substitution",
                "Use modern encryption",
            ],
        },
        CipherKind::Affine => Recommendations {
            attacks: vec![
                strategy(
                    "Brute Force",
                    "Easy",
                    "Try all 312 valid key pairs",
                    "O(n)",
                    "Only ciphertext needed",
                ),
                strategy(
                    "Frequency Analysis",
                    "Medium",
                    "Use frequency to narrow down keys",
                    "O(n)",
                    "Ciphertext of reasonable length",
                ),
                strategy(
                    "Known Plaintext (2 chars)",
                    "Easy",
                    "Solve linear equations with 2 known pairs",
                    "O(1)",
                    "2 plaintext-ciphertext pairs",
                ),
            ],
            protection: vec![
                "Use larger alphabet",
                "Use polyalphabetic substitution",
                "Combine with transposition",
            ],
        },
        CipherKind::Hill => Recommendations {
            attacks: vec![
                strategy(
                    "Known Plaintext",
                    "Medium",
                    "Recover key matrix from known pairs",
                    "O(n³)",
                    "4 plaintext-ciphertext pairs for 2x2",
                ),
                strategy(
                    "Frequency Analysis (limited)",
                    "Hard",
                    "Works on digraphs, not single letters",
                    "O(n²)",
                    "Large amount of ciphertext",
                ),
            ],
            protection: vec![
                "Use larger matrices (3x3, 4x4)",
                "Change keys frequently",
                "Combine with other ciphers",
            ],
        },
        CipherKind::Playfair => Recommendations {
            attacks: vec![
                strategy(
                    "Frequency Analysis (digraphs)",
                    "Hard",
                    "Analyze digraph frequencies",
                    "O(n²)",
                    "Large amount of ciphertext",
                ),
                strategy(
                    "Known Plaintext",
                    "Medium",
                    "Reconstruct matrix from known pairs",
                    "O(n²)",
                    "Several plaintext-ciphertext pairs",
                ),
            ],
            protection: vec![
                "Use 6x6 matrix (full alphabet)",
                "Change keys frequently",
                "Use modern encryption",
            ],
        },
    }
}

/// Recommendations by cipher tag; empty for an unknown tag
pub fn attack_recommendations(cipher: &str) -> Recommendations {
    cipher
        .parse::<CipherKind>()
        .map(recommendations_for)
        .unwrap_or_default()
}
