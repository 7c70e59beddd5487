//! # Enhanced Byte Ciphers
//!
//! Variants of the classical ciphers that work on raw bytes or lowercase
//! text and compose with the [`protection`](crate::protection) layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  ENHANCED AFFINE (chained, T rounds)                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  passphrase ──► SHA-256 ──► ChaCha20 ──► [(a₀,b₀), (a₁,b₁), ...]        │
//! │                                           a odd, b any byte             │
//! │                                                                         │
//! │  prev = IV                                                              │
//! │  for byte in UTF-8(plaintext):                                          │
//! │      v = byte XOR prev                                                  │
//! │      for (a, b) in rounds: v = (a·v + b) mod 256                        │
//! │      emit v; prev = v                                                   │
//! │                                                                         │
//! │  output = base64(IV ‖ emitted bytes)                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The round keys depend only on the passphrase, so equal passphrases give
//! equal round keys. The random IV is what makes two encryptions of the
//! same message differ.

mod byte_affine;
mod byte_playfair;

pub use byte_affine::{EnhancedAffineCipher, EnhancedCiphertext, ProtectedCiphertext, RoundKey};
pub use byte_playfair::EnhancedPlayfairCipher;

/// Decode UTF-8, dropping invalid sequences instead of replacing them
pub fn decode_utf8_ignoring_errors(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                match err.error_len() {
                    Some(len) => rest = &after[len..],
                    None => break,
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_utf8_ignoring_errors("héllo ✓".as_bytes()), "héllo ✓");
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        assert_eq!(decode_utf8_ignoring_errors(b"ab\xffcd"), "abcd");
        assert_eq!(decode_utf8_ignoring_errors(b"\xc3"), "");
        assert_eq!(decode_utf8_ignoring_errors(b"ok\xe2\x9c"), "ok");
        assert_eq!(decode_utf8_ignoring_errors(b"\x80\x80x"), "x");
    }
}
