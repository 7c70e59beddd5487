//! # Classical Cipher Demo
//!
//! This example walks one message through each classical cipher:
//! 1. Caesar and Affine substitution
//! 2. Hill with an explicit matrix and with a derived one
//! 3. Playfair with its step narration
//!
//! ## Run
//!
//! ```bash
//! cargo run --example classical_demo
//! ```

use cryptolab_core::ciphers::{self, cipher_info, derive_matrix_from_text, CipherKey, HillKey};
use cryptolab_core::math::format_matrix;

fn main() {
    println!("=================================================");
    println!("          CRYPTOLAB CLASSICAL CIPHER DEMO");
    println!("=================================================\n");

    let message = "Meet me at the usual place";

    // =========================================================================
    // STEP 1: Substitution ciphers
    // =========================================================================
    println!("1. Substitution ciphers\n");

    let keys = [
        CipherKey::Caesar { shift: 3 },
        CipherKey::Affine { a: 5, b: 8 },
    ];
    for key in &keys {
        let enc = ciphers::encrypt(key, message, false).expect("encrypt failed");
        let dec = ciphers::decrypt(key, &enc.text, false).expect("decrypt failed");
        println!("   {:<8} {}", key.kind(), enc.text);
        println!("   {:<8} {}", "back", dec.text);
    }
    println!();

    // =========================================================================
    // STEP 2: Hill cipher
    // =========================================================================
    println!("2. Hill cipher\n");

    let key = CipherKey::Hill(HillKey::Matrix(vec![vec![3, 3], vec![2, 5]]));
    let enc = ciphers::encrypt(&key, "HELP", false).expect("encrypt failed");
    println!("   [[3,3],[2,5]]  HELP -> {}", enc.text);

    let (matrix, steps) = derive_matrix_from_text("CRYPTO", 3).expect("derive failed");
    for line in &steps {
        println!("   {}", line);
    }
    println!("   Derived key:\n{}", format_matrix(&matrix));

    let key = CipherKey::Hill(HillKey::TextKey("CRYPTO".into()));
    let enc = ciphers::encrypt(&key, message, false).expect("encrypt failed");
    let dec = ciphers::decrypt(&key, &enc.text, false).expect("decrypt failed");
    println!("   Ciphertext: {}", enc.text);
    println!("   Decrypted:  {}", dec.text);
    println!();

    // =========================================================================
    // STEP 3: Playfair with narration
    // =========================================================================
    println!("3. Playfair (keyword MONARCHY)\n");

    let key = CipherKey::Playfair {
        keyword: "MONARCHY".into(),
    };
    let enc = ciphers::encrypt(&key, "instruments", true).expect("encrypt failed");
    for line in enc.steps.unwrap_or_default() {
        println!("   {}", line);
    }
    println!();

    let info = cipher_info(key.kind());
    println!("   {} weaknesses:", info.name);
    for weakness in info.weaknesses {
        println!("     - {}", weakness);
    }
    println!();

    println!("=== Example Complete ===");
}
