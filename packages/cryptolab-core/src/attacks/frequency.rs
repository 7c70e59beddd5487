//! Letter-frequency statistics and a chi-squared fit against English.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{count_letters, english_frequency, round2, ENGLISH_FREQUENCIES};

/// Number of entries in `most_common`
const TOP_LETTERS: usize = 10;

/// A letter and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterCount {
    /// Uppercase letter
    pub letter: char,
    /// Occurrences
    pub count: usize,
    /// Percentage of all letters
    pub frequency: f64,
}

/// Observed vs. expected frequency for one letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterComparison {
    /// Observed percentage
    pub text_freq: f64,
    /// English percentage
    pub english_freq: f64,
    /// Absolute difference
    pub difference: f64,
}

/// Full frequency analysis of a text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    /// Percentage per letter present
    pub letter_frequencies: BTreeMap<char, f64>,
    /// Up to ten most frequent letters; ties keep first appearance
    pub most_common: Vec<LetterCount>,
    /// Number of letters analysed
    pub total_letters: usize,
    /// Comparison for each letter present
    pub english_comparison: BTreeMap<char, LetterComparison>,
    /// `Σ (observed − expected)² / expected` over all 26 letters; absent
    /// when the text has no letters
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chi_squared: Option<f64>,
}

/// Analyse the letter distribution of `text`
///
/// Text without letters yields an empty report.
pub fn analyze_frequency(text: &str) -> FrequencyReport {
    let (counts, total) = count_letters(text);
    if total == 0 {
        return FrequencyReport::default();
    }

    let percent = |count: usize| count as f64 / total as f64 * 100.0;

    let mut letter_frequencies = BTreeMap::new();
    let mut english_comparison = BTreeMap::new();
    for &(letter, count) in &counts {
        let observed = percent(count);
        let expected = english_frequency(letter);
        letter_frequencies.insert(letter, round2(observed));
        english_comparison.insert(
            letter,
            LetterComparison {
                text_freq: round2(observed),
                english_freq: expected,
                difference: round2((observed - expected).abs()),
            },
        );
    }

    // Stable sort keeps first-appearance order among equal counts.
    let mut ranked = counts.clone();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let most_common = ranked
        .into_iter()
        .take(TOP_LETTERS)
        .map(|(letter, count)| LetterCount {
            letter,
            count,
            frequency: round2(percent(count)),
        })
        .collect();

    let chi_squared = ENGLISH_FREQUENCIES
        .iter()
        .map(|&(letter, expected)| {
            let observed = counts
                .iter()
                .find(|(l, _)| *l == letter)
                .map(|&(_, c)| percent(c))
                .unwrap_or(0.0);
            (observed - expected).powi(2) / expected
        })
        .sum::<f64>();

    tracing::debug!(total, distinct = counts.len(), chi_squared, "Frequency analysis");

    FrequencyReport {
        letter_frequencies,
        most_common,
        total_letters: total,
        english_comparison,
        chi_squared: Some(round2(chi_squared)),
    }
}
