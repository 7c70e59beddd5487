//! Method routing and shared argument helpers.
//!
//! Returns `Ok(json_string)` on success, `Err((error_code, message))` on failure.

use serde_json::Value;

use crate::ciphers::{CipherKey, CipherKind, HillKey};
use crate::config::LabConfig;
use crate::error::Error;
use crate::math::Matrix;

/// `Ok(json)` or `Err((code, message))`
pub type DResult = Result<String, (i32, String)>;

// ============================================================================
// HELPERS  (pub(super) so domain modules can use them)
// ============================================================================

pub(super) fn err(code: i32, msg: impl ToString) -> (i32, String) {
    (code, msg.to_string())
}

pub(super) fn core_err(e: Error) -> (i32, String) {
    err(e.code(), e)
}

pub(super) fn json_parse(args: &str) -> Result<Value, (i32, String)> {
    serde_json::from_str(args).map_err(|e| err(1, format!("Invalid JSON: {}", e)))
}

pub(super) fn require_str<'a>(data: &'a Value, field: &str) -> Result<&'a str, (i32, String)> {
    data[field].as_str().ok_or_else(|| err(2, format!("Missing {}", field)))
}

pub(super) fn require<'a>(data: &'a Value, field: &str) -> Result<&'a Value, (i32, String)> {
    match data.get(field) {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(err(2, format!("Missing {}", field))),
    }
}

pub(super) fn opt_bool(data: &Value, field: &str, default: bool) -> bool {
    data[field].as_bool().unwrap_or(default)
}

pub(super) fn ok_json(v: Value) -> DResult {
    Ok(v.to_string())
}

pub(super) fn ok_serialize<T: serde::Serialize>(v: &T) -> DResult {
    serde_json::to_string(v).map_err(|e| core_err(e.into()))
}

/// Integer field that may arrive as a number or a numeric string
fn int_field(key: &Value, field: &str, default: i64) -> Result<i64, (i32, String)> {
    match &key[field] {
        Value::Null => Ok(default),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| err(100, format!("{} must be an integer", field))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| err(100, format!("{} must be an integer, got '{}'", field, s))),
        other => Err(err(100, format!("{} must be an integer, got {}", field, other))),
    }
}

fn matrix_field(value: &Value) -> Result<Matrix, (i32, String)> {
    serde_json::from_value(value.clone())
        .map_err(|e| err(100, format!("matrix must be a list of integer rows: {}", e)))
}

/// Build a key the way the web forms send it, with per-field defaults
///
/// Caesar `shift` 0, Affine `a` 1 / `b` 0, Hill identity matrix (or
/// `text_key`), Playfair keyword `SECRET`.
pub(super) fn key_from_args(kind: CipherKind, key: &Value) -> Result<CipherKey, (i32, String)> {
    Ok(match kind {
        CipherKind::Caesar => CipherKey::Caesar {
            shift: int_field(key, "shift", 0)?,
        },
        CipherKind::Affine => CipherKey::Affine {
            a: int_field(key, "a", 1)?,
            b: int_field(key, "b", 0)?,
        },
        CipherKind::Hill => {
            let hill = match (key["text_key"].as_str(), key.get("matrix")) {
                (Some(text), _) if !text.trim().is_empty() => HillKey::TextKey(text.to_string()),
                (_, Some(m)) if !m.is_null() => HillKey::Matrix(matrix_field(m)?),
                _ => HillKey::Matrix(vec![vec![1, 0], vec![0, 1]]),
            };
            CipherKey::Hill(hill)
        }
        CipherKind::Playfair => CipherKey::Playfair {
            keyword: key["keyword"].as_str().unwrap_or("SECRET").to_string(),
        },
    })
}

pub(super) fn cipher_kind(data: &Value) -> Result<CipherKind, (i32, String)> {
    require_str(data, "cipher_type")?
        .parse::<CipherKind>()
        .map_err(core_err)
}

// ============================================================================
// MAIN DISPATCHER
// ============================================================================

use super::dispatch_attacks;
use super::dispatch_ciphers;
use super::dispatch_protection;

/// Route `method` with default configuration
pub fn dispatch(method: &str, args: &str) -> DResult {
    dispatch_with_config(method, args, &LabConfig::default())
}

/// Route `method` using `config` for the byte ciphers and protection layer
pub fn dispatch_with_config(method: &str, args: &str, config: &LabConfig) -> DResult {
    tracing::debug!(method, "Dispatching");

    match method {
        // ── Classical ciphers ───────────────────────────────────────
        "cipher_encrypt" => dispatch_ciphers::cipher_encrypt(args),
        "cipher_decrypt" => dispatch_ciphers::cipher_decrypt(args),
        "cipher_info" => dispatch_ciphers::cipher_info(args),

        // ── Enhanced ciphers ────────────────────────────────────────
        "enhanced_affine_encrypt" => dispatch_ciphers::enhanced_affine_encrypt(args, config),
        "enhanced_affine_decrypt" => dispatch_ciphers::enhanced_affine_decrypt(args, config),
        "enhanced_playfair_encrypt" => dispatch_ciphers::enhanced_playfair_encrypt(args),
        "enhanced_playfair_decrypt" => dispatch_ciphers::enhanced_playfair_decrypt(args),

        // ── Attacks ─────────────────────────────────────────────────
        "attack_bruteforce" => dispatch_attacks::attack_bruteforce(args),
        "attack_frequency" => dispatch_attacks::attack_frequency(args),
        "attack_hill_known_plaintext" => dispatch_attacks::attack_hill_known_plaintext(args),
        "attack_recommendations" => dispatch_attacks::attack_recommendations(args),
        "mitm_intercept" => dispatch_attacks::mitm_intercept(args),

        // ── Protection ──────────────────────────────────────────────
        "protection_apply" => dispatch_protection::protection_apply(args, config),
        "protection_remove" => dispatch_protection::protection_remove(args),

        _ => Err(err(404, format!("Unknown method: {}", method))),
    }
}
