//! # Protection Demo
//!
//! This example shows each defense and the byte-level cipher:
//! 1. Apply and remove the defense for every attack type
//! 2. Detect tampering through the HMAC
//! 3. Enhanced affine encryption with a protection layer
//!
//! ## Run
//!
//! ```bash
//! cargo run --example protection_demo
//! ```

use cryptolab_core::enhanced::EnhancedAffineCipher;
use cryptolab_core::protection::{apply_protection, remove_protection, AttackType};
use cryptolab_core::LabConfig;

fn main() {
    println!("=================================================");
    println!("           CRYPTOLAB PROTECTION DEMO");
    println!("=================================================\n");

    let config = LabConfig::default();
    let message = "Wire the funds on Friday";

    // =========================================================================
    // STEP 1: One defense per attack
    // =========================================================================
    println!("1. Defenses by attack type\n");

    for attack in [
        AttackType::BruteForce,
        AttackType::Dictionary,
        AttackType::Frequency,
        AttackType::Mitm,
    ] {
        let (protected, meta) =
            apply_protection(message, attack.as_str(), &config).expect("protect failed");
        let restored = remove_protection(&protected, &meta).expect("unprotect failed");

        println!("   {:<10} -> {}", attack.as_str(), meta.defense());
        println!("      protected: {}...", &protected[..protected.len().min(32)]);
        if restored == message {
            println!("      [OK] restored");
        } else {
            println!("      [FAILED] restored {:?}", restored);
        }
    }
    println!();

    // =========================================================================
    // STEP 2: Tamper detection
    // =========================================================================
    println!("2. Tamper detection (DH + XOR + HMAC)\n");

    let (protected, meta) = apply_protection(message, "mitm", &config).expect("protect failed");
    let mut tampered = protected.into_bytes();
    tampered[0] = if tampered[0] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(tampered).expect("hex is ASCII");

    match remove_protection(&tampered, &meta) {
        Ok(_) => println!("   [FAILED] Tampered message was accepted!"),
        Err(e) => println!("   [OK] Rejected: {}", e),
    }
    println!();

    // =========================================================================
    // STEP 3: Enhanced affine
    // =========================================================================
    println!("3. Enhanced affine cipher\n");

    let cipher = EnhancedAffineCipher::with_config("correct horse", &config)
        .expect("cipher setup failed");
    for (i, round) in cipher.round_keys().iter().enumerate() {
        println!(
            "   round {}: a = {:>3}, b = {:>3}",
            i + 1,
            round.multiplier,
            round.constant
        );
    }

    let sealed = cipher.encrypt(message);
    println!("   IV: {}  ciphertext: {}", sealed.iv, sealed.ciphertext);
    println!(
        "   Decrypted: {}",
        cipher.decrypt(&sealed.ciphertext).expect("decrypt failed")
    );

    let protected = cipher
        .encrypt_with_protection(message, "frequency", &config)
        .expect("protect failed");
    println!(
        "   With {} layer: {}",
        protected.protection_meta.defense(),
        cipher
            .decrypt_with_protection(&protected)
            .expect("decrypt failed")
    );
    println!();

    println!("=== Example Complete ===");
}
