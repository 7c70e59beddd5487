//! # Attack Demo
//!
//! This example breaks the classical ciphers:
//! 1. Brute-force a Caesar ciphertext
//! 2. Frequency analysis against English
//! 3. Recover a Hill key from four known letters
//! 4. Man-in-the-middle interception with a forged reply
//!
//! ## Run
//!
//! ```bash
//! cargo run --example attack_demo
//! ```

use cryptolab_core::attacks::{analyze_frequency, brute_force_caesar, recover_hill_key};
use cryptolab_core::ciphers::{self, CipherKey, HillKey};
use cryptolab_core::interception::{intercept, InterceptionRequest};

fn main() {
    println!("=================================================");
    println!("             CRYPTOLAB ATTACK DEMO");
    println!("=================================================\n");

    // =========================================================================
    // STEP 1: Brute force
    // =========================================================================
    println!("1. Brute-forcing a Caesar ciphertext...\n");

    let secret = CipherKey::Caesar { shift: 11 };
    let plaintext = "Meet me at the secret entrance at ten";
    let ciphertext = ciphers::encrypt(&secret, plaintext, false)
        .expect("encrypt failed")
        .text;
    println!("   Ciphertext: {}", ciphertext);

    for candidate in brute_force_caesar(&ciphertext).iter().take(3) {
        println!(
            "   shift {:>2}  score {:>8.2}  {}",
            candidate.shift, candidate.score, candidate.decrypted_text
        );
    }
    println!();

    // =========================================================================
    // STEP 2: Frequency analysis
    // =========================================================================
    println!("2. Frequency analysis...\n");

    let report = analyze_frequency(&ciphertext);
    println!("   Letters: {}", report.total_letters);
    for entry in &report.most_common {
        println!("   {}  {:>5.2}%", entry.letter, entry.frequency);
    }
    if let Some(chi) = report.chi_squared {
        println!("   Chi-squared vs English: {:.2}", chi);
    }
    println!();

    // =========================================================================
    // STEP 3: Hill known-plaintext
    // =========================================================================
    println!("3. Hill known-plaintext attack...\n");

    let key = HillKey::Matrix(vec![vec![3, 3], vec![2, 5]]);
    let known = "FRIDAY";
    let ciphertext = ciphers::encrypt(&CipherKey::Hill(key), known, false)
        .expect("encrypt failed")
        .text;

    let result = recover_hill_key(known, &ciphertext);
    println!("   {} -> {}", known, ciphertext);
    println!("   Recovered key: {:?}", result.recovered_key);
    println!("   Verified: {}", result.success);
    println!();

    // =========================================================================
    // STEP 4: Interception
    // =========================================================================
    println!("4. Man-in-the-middle...\n");

    let actual_key = CipherKey::Affine { a: 5, b: 8 };
    let original = "Pay Bob ten dollars";
    let request = InterceptionRequest {
        ciphertext: ciphers::encrypt(&actual_key, original, false)
            .expect("encrypt failed")
            .text,
        original_plaintext: original.into(),
        actual_key: actual_key.clone(),
        attacker_key: actual_key,
        modified_plaintext: Some("Pay Eve ten thousand".into()),
        sender: Some("Alice".into()),
        show_steps: true,
    };

    let report = intercept(&request).expect("interception failed");
    for line in report.attack_steps.unwrap_or_default() {
        println!("   {}", line);
    }
    println!();

    println!("=== Example Complete ===");
}
