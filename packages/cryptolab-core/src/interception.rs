//! # Man-in-the-Middle Simulation
//!
//! An attacker intercepts a classical ciphertext, tries to read it with a
//! guessed key and may forward a forged message encrypted under the real
//! shared key.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         INTERCEPTION FLOW                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   Alice ──── ciphertext ────►  Mallory  ──── (forged) ciphertext ──► Bob │
//! │                                  │                                      │
//! │                                  ├─ decrypt(attacker_key)               │
//! │                                  │     success ⇔ matches original       │
//! │                                  │     (case-insensitive)               │
//! │                                  │                                      │
//! │                                  └─ encrypt(modified, actual_key)       │
//! │                                        only if a forgery is supplied    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed decryption is a result, not an error: the report carries
//! `success = false` and `decrypted_plaintext = "FAILED: <reason>"`.

use serde::{Deserialize, Serialize};

use crate::ciphers::{self, CipherKey, StepTrace};
use crate::error::{Error, Result};

/// Everything the attacker sees and guesses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionRequest {
    /// Intercepted ciphertext
    pub ciphertext: String,
    /// What the sender actually wrote (used only to score the attempt)
    pub original_plaintext: String,
    /// Key the two parties share
    pub actual_key: CipherKey,
    /// Attacker's guess; must be for the same cipher
    pub attacker_key: CipherKey,
    /// Forged message to forward, if any
    #[serde(default)]
    pub modified_plaintext: Option<String>,
    /// Sender name for the narrative
    #[serde(default)]
    pub sender: Option<String>,
    /// Record the narrative
    #[serde(default = "default_show_steps")]
    pub show_steps: bool,
}

fn default_show_steps() -> bool {
    true
}

/// Outcome of an interception
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionReport {
    /// Key the attacker used
    pub attacker_key: CipherKey,
    /// What the attacker read, or `FAILED: <reason>`
    pub decrypted_plaintext: String,
    /// Forged plaintext, if one was supplied and encrypted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_plaintext: Option<String>,
    /// Forged ciphertext under the actual key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_ciphertext: Option<String>,
    /// Narrative, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_steps: Option<Vec<String>>,
    /// The attacker read the original message
    pub success: bool,
}

fn key_json(key: &CipherKey) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("{:?}", key))
}

/// Run the interception
///
/// Fails only when the two keys belong to different ciphers.
pub fn intercept(request: &InterceptionRequest) -> Result<InterceptionReport> {
    let kind = request.actual_key.kind();
    if request.attacker_key.kind() != kind {
        return Err(Error::InvalidKey(format!(
            "attacker key is for {}, message was encrypted with {}",
            request.attacker_key.kind(),
            kind
        )));
    }

    let show_steps = request.show_steps;
    let mut trace = StepTrace::new(show_steps);

    trace.push(|| "=== MAN-IN-THE-MIDDLE ATTACK ===".to_string());
    if let Some(sender) = &request.sender {
        trace.push(|| format!("Intercepted message from {}", sender));
    }
    trace.push(|| format!("Ciphertext: {}", request.ciphertext));
    trace.push(|| format!("Cipher type: {}", kind));
    trace.push(|| format!("\nAttacker's key: {}", key_json(&request.attacker_key)));
    trace.push(|| format!("Actual shared key: {}", key_json(&request.actual_key)));

    match attempt(request, &mut trace) {
        Ok((decrypted_plaintext, success, modified_ciphertext)) => {
            tracing::info!(cipher = %kind, success, "Interception attempt");
            Ok(InterceptionReport {
                attacker_key: request.attacker_key.clone(),
                decrypted_plaintext,
                modified_plaintext: modified_ciphertext
                    .as_ref()
                    .and(request.modified_plaintext.clone()),
                modified_ciphertext,
                attack_steps: trace.finish(),
                success,
            })
        }
        Err(err) => {
            tracing::info!(cipher = %kind, error = %err, "Interception failed to decrypt");
            trace.push(|| "\n=== DECRYPTION FAILED ===".to_string());
            trace.push(|| format!("Error: {}", err));
            Ok(InterceptionReport {
                attacker_key: request.attacker_key.clone(),
                decrypted_plaintext: format!("FAILED: {}", err),
                modified_plaintext: None,
                modified_ciphertext: None,
                attack_steps: trace.finish(),
                success: false,
            })
        }
    }
}

fn attempt(
    request: &InterceptionRequest,
    trace: &mut StepTrace,
) -> Result<(String, bool, Option<String>)> {
    let show_steps = trace.enabled();

    let decrypted = ciphers::decrypt(&request.attacker_key, &request.ciphertext, show_steps)?;
    trace.push(|| "\n=== DECRYPTION ATTEMPT ===".to_string());
    trace.extend(decrypted.steps);

    let plaintext = decrypted.text;
    let success = plaintext.to_uppercase() == request.original_plaintext.to_uppercase();

    trace.push(|| "\n=== RESULT ===".to_string());
    trace.push(|| format!("Decrypted: {}", plaintext));
    trace.push(|| format!("Original: {}", request.original_plaintext));
    trace.push(|| format!("Success: {}", if success { "True" } else { "False" }));

    let modified_ciphertext = match request.modified_plaintext.as_deref() {
        Some(forged) if !forged.is_empty() => {
            let out = ciphers::encrypt(&request.actual_key, forged, show_steps)?;
            trace.push(|| "\n=== RE-ENCRYPTION (with actual key) ===".to_string());
            trace.push(|| format!("Modified message: {}", forged));
            trace.extend(out.steps);
            trace.push(|| format!("New ciphertext: {}", out.text));
            Some(out.text)
        }
        _ => None,
    };

    Ok((plaintext, success, modified_ciphertext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphers::HillKey;

    fn request(attacker: CipherKey) -> InterceptionRequest {
        let actual = CipherKey::Caesar { shift: 3 };
        let ciphertext = ciphers::encrypt(&actual, "Hello Bob", false).unwrap().text;
        InterceptionRequest {
            ciphertext,
            original_plaintext: "Hello Bob".into(),
            actual_key: actual,
            attacker_key: attacker,
            modified_plaintext: None,
            sender: Some("alice".into()),
            show_steps: true,
        }
    }

    #[test]
    fn test_correct_guess_succeeds() {
        let report = intercept(&request(CipherKey::Caesar { shift: 3 })).unwrap();
        assert!(report.success);
        assert_eq!(report.decrypted_plaintext, "Hello Bob");

        let steps = report.attack_steps.unwrap();
        assert_eq!(steps[0], "=== MAN-IN-THE-MIDDLE ATTACK ===");
        assert_eq!(steps[1], "Intercepted message from alice");
        assert!(steps.contains(&"Success: True".to_string()));
    }

    #[test]
    fn test_wrong_guess_fails_quietly() {
        let report = intercept(&request(CipherKey::Caesar { shift: 4 })).unwrap();
        assert!(!report.success);
        assert!(!report.decrypted_plaintext.starts_with("FAILED"));
    }

    #[test]
    fn test_forgery_uses_actual_key() {
        let mut req = request(CipherKey::Caesar { shift: 0 });
        req.modified_plaintext = Some("Send money".into());
        req.show_steps = false;

        let report = intercept(&req).unwrap();
        assert_eq!(report.modified_ciphertext.as_deref(), Some("Vhqg prqhb"));
        assert_eq!(report.modified_plaintext.as_deref(), Some("Send money"));
        assert!(report.attack_steps.is_none());
    }

    #[test]
    fn test_decryption_error_is_reported() {
        let actual = CipherKey::Hill(HillKey::Matrix(vec![vec![3, 3], vec![2, 5]]));
        let req = InterceptionRequest {
            ciphertext: "HIAT".into(),
            original_plaintext: "HELP".into(),
            actual_key: actual,
            attacker_key: CipherKey::Hill(HillKey::Matrix(vec![vec![2, 4], vec![1, 3]])),
            modified_plaintext: None,
            sender: None,
            show_steps: true,
        };

        let report = intercept(&req).unwrap();
        assert!(!report.success);
        assert!(report.decrypted_plaintext.starts_with("FAILED: "));
        assert!(report
            .attack_steps
            .unwrap()
            .contains(&"\n=== DECRYPTION FAILED ===".to_string()));
    }

    #[test]
    fn test_mismatched_kinds_rejected() {
        let req = request(CipherKey::Affine { a: 5, b: 8 });
        assert!(matches!(intercept(&req), Err(Error::InvalidKey(_))));
    }
}
