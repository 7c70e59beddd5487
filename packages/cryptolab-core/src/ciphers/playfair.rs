//! # Playfair Cipher
//!
//! Digraph substitution over a 5x5 table built from a keyword (J merged into I).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PLAYFAIR DIGRAPH RULES                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Keyword "MONARCHY":        M O N A R                                   │
//! │                             C H Y B D                                   │
//! │                             E F G I K                                   │
//! │                             L P Q S T                                   │
//! │                             U V W X Z                                   │
//! │                                                                         │
//! │  Same row     → take the letter to the right (wrapping)                │
//! │  Same column  → take the letter below (wrapping)                       │
//! │  Rectangle    → swap columns                                           │
//! │                                                                         │
//! │  Decryption moves left / up instead; rectangle is its own inverse.     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use super::{CipherOutput, StepTrace};
use crate::error::{Error, Result};

/// Side length of the table
const TABLE_SIZE: usize = 5;

/// Filler letter for doubled letters and odd lengths
const FILLER: char = 'X';

/// Which rule transformed a digraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRule {
    /// Both letters in one row
    SameRow,
    /// Both letters in one column
    SameColumn,
    /// Opposite corners of a rectangle
    Rectangle,
}

impl fmt::Display for PairRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PairRule::SameRow => "same row",
            PairRule::SameColumn => "same column",
            PairRule::Rectangle => "rectangle",
        })
    }
}

/// 5x5 Playfair table with a reverse lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfairTable {
    grid: [[char; TABLE_SIZE]; TABLE_SIZE],
    positions: [Option<(usize, usize)>; 26],
}

impl PlayfairTable {
    /// Build the table: first occurrence of each keyword letter, then the
    /// rest of the alphabet, skipping J.
    pub fn from_keyword(keyword: &str) -> Self {
        let mut order: Vec<char> = Vec::with_capacity(25);
        let candidates = keyword
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| normalize(c.to_ascii_uppercase()))
            .chain(('A'..='Z').filter(|&c| c != 'J'));

        for c in candidates {
            if !order.contains(&c) {
                order.push(c);
            }
        }

        let mut grid = [['A'; TABLE_SIZE]; TABLE_SIZE];
        let mut positions = [None; 26];
        for (i, &c) in order.iter().enumerate() {
            let (row, col) = (i / TABLE_SIZE, i % TABLE_SIZE);
            grid[row][col] = c;
            positions[(c as u8 - b'A') as usize] = Some((row, col));
        }

        Self { grid, positions }
    }

    /// Row and column of a letter (J resolves to I's cell)
    pub fn position(&self, c: char) -> Result<(usize, usize)> {
        let upper = normalize(c.to_ascii_uppercase());
        if !upper.is_ascii_uppercase() {
            return Err(Error::SymbolNotInTable(c));
        }
        self.positions[(upper as u8 - b'A') as usize].ok_or(Error::SymbolNotInTable(c))
    }

    /// Letter at a cell
    pub fn at(&self, row: usize, col: usize) -> char {
        self.grid[row % TABLE_SIZE][col % TABLE_SIZE]
    }

    /// Rows rendered as space-separated letters
    pub fn rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Encrypt one digraph
    pub fn encrypt_pair(&self, a: char, b: char) -> Result<(char, char, PairRule)> {
        self.transform_pair(a, b, 1)
    }

    /// Decrypt one digraph
    pub fn decrypt_pair(&self, a: char, b: char) -> Result<(char, char, PairRule)> {
        self.transform_pair(a, b, TABLE_SIZE - 1)
    }

    fn transform_pair(&self, a: char, b: char, step: usize) -> Result<(char, char, PairRule)> {
        let (r1, c1) = self.position(a)?;
        let (r2, c2) = self.position(b)?;

        Ok(if r1 == r2 {
            (self.at(r1, c1 + step), self.at(r2, c2 + step), PairRule::SameRow)
        } else if c1 == c2 {
            (self.at(r1 + step, c1), self.at(r2 + step, c2), PairRule::SameColumn)
        } else {
            (self.at(r1, c2), self.at(r2, c1), PairRule::Rectangle)
        })
    }
}

fn normalize(c: char) -> char {
    if c == 'J' {
        'I'
    } else {
        c
    }
}

/// Uppercase, map J → I and keep only letters
fn clean_letters(text: &str) -> Vec<char> {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| normalize(c.to_ascii_uppercase()))
        .collect()
}

/// Split text into encryptable digraphs
///
/// Doubled letters within a pair get an `X` between them; the second letter
/// then starts the next pair. An odd result is padded with `X`.
pub fn prepare_text(text: &str) -> String {
    let letters = clean_letters(text);
    let mut prepared = String::with_capacity(letters.len() + 2);

    let mut i = 0;
    while i < letters.len() {
        prepared.push(letters[i]);
        match letters.get(i + 1) {
            Some(&next) if next == letters[i] => {
                prepared.push(FILLER);
                i += 1;
            }
            Some(&next) => {
                prepared.push(next);
                i += 2;
            }
            None => i += 1,
        }
    }

    if prepared.len() % 2 != 0 {
        prepared.push(FILLER);
    }
    prepared
}

/// Playfair cipher
pub struct PlayfairCipher;

impl PlayfairCipher {
    /// Encrypt letters of `plaintext` (output is uppercase, even length)
    pub fn encrypt(plaintext: &str, keyword: &str, show_steps: bool) -> Result<CipherOutput> {
        let table = PlayfairTable::from_keyword(keyword);
        let text = prepare_text(plaintext);

        let mut trace = StepTrace::new(show_steps);
        Self::trace_header(&mut trace, keyword, &table);
        trace.push(|| format!("\n3. Prepared text: {}", text));
        trace.push(|| "\n4. Digraph encryption:".to_string());

        let letters: Vec<char> = text.chars().collect();
        let ciphertext = Self::process(&letters, &mut trace, |a, b| table.encrypt_pair(a, b))?;

        trace.push(|| format!("\n5. Final ciphertext: {}", ciphertext));
        Ok(trace.into_output(ciphertext))
    }

    /// Decrypt letters of `ciphertext`; filler letters are left in place
    pub fn decrypt(ciphertext: &str, keyword: &str, show_steps: bool) -> Result<CipherOutput> {
        let table = PlayfairTable::from_keyword(keyword);
        let letters = clean_letters(ciphertext);
        if letters.len() % 2 != 0 {
            return Err(Error::InvalidInput(format!(
                "Playfair ciphertext must have an even number of letters, got {}",
                letters.len()
            )));
        }

        let mut trace = StepTrace::new(show_steps);
        Self::trace_header(&mut trace, keyword, &table);
        trace.push(|| format!("\n3. Ciphertext: {}", letters.iter().collect::<String>()));
        trace.push(|| "\n4. Digraph decryption:".to_string());

        let plaintext = Self::process(&letters, &mut trace, |a, b| table.decrypt_pair(a, b))?;

        trace.push(|| format!("\n5. Final plaintext: {}", plaintext));
        Ok(trace.into_output(plaintext))
    }

    fn trace_header(trace: &mut StepTrace, keyword: &str, table: &PlayfairTable) {
        trace.push(|| format!("1. Key: {}", keyword));
        trace.push(|| "2. Playfair matrix:".to_string());
        if trace.enabled() {
            for row in table.rows() {
                trace.push(|| format!("   {}", row));
            }
        }
    }

    fn process<F>(letters: &[char], trace: &mut StepTrace, mut f: F) -> Result<String>
    where
        F: FnMut(char, char) -> Result<(char, char, PairRule)>,
    {
        let mut out = String::with_capacity(letters.len());
        for pair in letters.chunks_exact(2) {
            let (x, y, rule) = f(pair[0], pair[1])?;
            trace.push(|| format!("   {}{} ({}) → {}{}", pair[0], pair[1], rule, x, y));
            out.push(x);
            out.push(y);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let table = PlayfairTable::from_keyword("MONARCHY");
        assert_eq!(
            table.rows(),
            vec!["M O N A R", "C H Y B D", "E F G I K", "L P Q S T", "U V W X Z"]
        );
        assert_eq!(table.position('J').unwrap(), table.position('I').unwrap());
        assert!(matches!(table.position('3'), Err(Error::SymbolNotInTable('3'))));
    }

    #[test]
    fn test_prepare_text() {
        assert_eq!(prepare_text("instruments"), "INSTRUMENTSX");
        assert_eq!(prepare_text("balloon"), "BALXLOON");
        assert_eq!(prepare_text("jam"), "IAMX");
        assert_eq!(prepare_text(""), "");
    }

    #[test]
    fn test_known_ciphertext() {
        let ct = PlayfairCipher::encrypt("instruments", "MONARCHY", false).unwrap();
        assert_eq!(ct.text, "GATLMZCLRQXA");

        let pt = PlayfairCipher::decrypt(&ct.text, "MONARCHY", false).unwrap();
        assert_eq!(pt.text, "INSTRUMENTSX");
    }

    #[test]
    fn test_all_three_rules() {
        let table = PlayfairTable::from_keyword("MONARCHY");
        assert_eq!(table.encrypt_pair('M', 'O').unwrap(), ('O', 'N', PairRule::SameRow));
        assert_eq!(table.encrypt_pair('M', 'U').unwrap(), ('C', 'M', PairRule::SameColumn));
        assert_eq!(table.encrypt_pair('I', 'N').unwrap(), ('G', 'A', PairRule::Rectangle));

        assert_eq!(table.decrypt_pair('O', 'N').unwrap(), ('M', 'O', PairRule::SameRow));
        assert_eq!(table.decrypt_pair('C', 'M').unwrap(), ('M', 'U', PairRule::SameColumn));
    }

    #[test]
    fn test_odd_ciphertext_rejected() {
        assert!(matches!(
            PlayfairCipher::decrypt("ABC", "KEY", false),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_steps_name_rules() {
        let out = PlayfairCipher::encrypt("instruments", "MONARCHY", true).unwrap();
        let steps = out.steps.unwrap();
        assert_eq!(steps[2], "   M O N A R");
        assert!(steps.iter().any(|s| s == "   IN (rectangle) → GA"));
        assert!(steps.iter().any(|s| s.contains("(same column)")));
    }
}
