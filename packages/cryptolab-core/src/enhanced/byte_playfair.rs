//! Lowercase Playfair with last-letter padding and filler removal on decrypt.

use crate::ciphers::{CipherOutput, PlayfairTable, StepTrace};
use crate::error::Result;

const FILLER: char = 'x';

/// Playfair over lowercase letters
///
/// Differs from [`PlayfairCipher`](crate::ciphers::PlayfairCipher) in how
/// digraphs are formed (a lone last letter and each doubled letter get an
/// `x`) and in stripping those fillers again after decryption.
///
/// Pairs are substituted through the shared [`PlayfairTable`], whose
/// position index gives the same row/column result as scanning the grid.
pub struct EnhancedPlayfairCipher;

fn lower_letters(text: &str) -> Vec<char> {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| match c.to_ascii_lowercase() {
            'j' => 'i',
            other => other,
        })
        .collect()
}

fn digraphs(letters: &[char]) -> Vec<(char, char)> {
    let mut pairs = Vec::with_capacity(letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        match letters.get(i + 1) {
            None => {
                pairs.push((letters[i], FILLER));
                i += 1;
            }
            Some(&next) if next == letters[i] => {
                pairs.push((letters[i], FILLER));
                i += 1;
            }
            Some(&next) => {
                pairs.push((letters[i], next));
                i += 2;
            }
        }
    }
    pairs
}

/// Drop an `x` sitting between two equal letters, and a trailing `x`
fn strip_fillers(text: &[char]) -> String {
    let last = text.len().saturating_sub(1);
    text.iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != FILLER {
                return true;
            }
            let between_equal = i > 0 && i < last && text[i - 1] == text[i + 1];
            let trailing = i == last;
            !(between_equal || trailing)
        })
        .map(|(_, &c)| c)
        .collect()
}

fn format_pairs(pairs: &[(char, char)]) -> String {
    let quoted: Vec<String> = pairs.iter().map(|(a, b)| format!("'{}{}'", a, b)).collect();
    format!("[{}]", quoted.join(", "))
}

impl EnhancedPlayfairCipher {
    /// Encrypt; output is lowercase letters
    pub fn encrypt(plaintext: &str, keyword: &str, show_steps: bool) -> Result<CipherOutput> {
        let table = PlayfairTable::from_keyword(keyword);
        let mut trace = StepTrace::new(show_steps);

        trace.push(|| format!("1. Keyword: {}", keyword));
        trace.push(|| format!("2. Plaintext: {}", plaintext));
        trace.push(|| format!("3. Matrix:\n{}", table.rows().join("\n").to_lowercase()));

        let pairs = digraphs(&lower_letters(plaintext));
        trace.push(|| format!("4. Digraphs: {}", format_pairs(&pairs)));

        let mut ciphertext = String::with_capacity(pairs.len() * 2);
        for &(a, b) in &pairs {
            let (x, y, _) = table.encrypt_pair(a, b)?;
            ciphertext.push(x.to_ascii_lowercase());
            ciphertext.push(y.to_ascii_lowercase());
        }

        trace.push(|| format!("5. Ciphertext: {}", ciphertext));
        Ok(trace.into_output(ciphertext))
    }

    /// Decrypt and strip filler letters; a dangling odd letter is ignored
    pub fn decrypt(ciphertext: &str, keyword: &str, show_steps: bool) -> Result<CipherOutput> {
        let table = PlayfairTable::from_keyword(keyword);
        let mut trace = StepTrace::new(show_steps);

        trace.push(|| format!("1. Keyword: {}", keyword));
        trace.push(|| format!("2. Ciphertext: {}", ciphertext));

        let letters = lower_letters(ciphertext);
        let mut raw = Vec::with_capacity(letters.len());
        for pair in letters.chunks_exact(2) {
            let (x, y, _) = table.decrypt_pair(pair[0], pair[1])?;
            raw.push(x.to_ascii_lowercase());
            raw.push(y.to_ascii_lowercase());
        }

        let plaintext = strip_fillers(&raw);
        trace.push(|| format!("3. Plaintext: {}", plaintext));
        Ok(trace.into_output(plaintext))
    }
}
