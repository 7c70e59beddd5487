//! Cipher dispatch handlers: classical `cipher_*` and byte-level `enhanced_*`.

use super::dispatcher::{
    cipher_kind, core_err, json_parse, key_from_args, ok_serialize, opt_bool, require_str,
    DResult,
};
use crate::ciphers;
use crate::config::LabConfig;
use crate::enhanced::{EnhancedAffineCipher, EnhancedPlayfairCipher, ProtectedCiphertext};

// ── Classical ───────────────────────────────────────────────────────────────

/// `{cipher_type, text, key?, show_steps?}` → `{text, steps?}`
pub fn cipher_encrypt(args: &str) -> DResult {
    let data = json_parse(args)?;
    let kind = cipher_kind(&data)?;
    let text = require_str(&data, "text")?;
    let key = key_from_args(kind, &data["key"])?;
    let show_steps = opt_bool(&data, "show_steps", false);

    match ciphers::encrypt(&key, text, show_steps) {
        Ok(out) => ok_serialize(&out),
        Err(e) => Err(core_err(e)),
    }
}

/// `{cipher_type, text, key?, show_steps?}` → `{text, steps?}`
pub fn cipher_decrypt(args: &str) -> DResult {
    let data = json_parse(args)?;
    let kind = cipher_kind(&data)?;
    let text = require_str(&data, "text")?;
    let key = key_from_args(kind, &data["key"])?;
    let show_steps = opt_bool(&data, "show_steps", false);

    match ciphers::decrypt(&key, text, show_steps) {
        Ok(out) => ok_serialize(&out),
        Err(e) => Err(core_err(e)),
    }
}

/// `{cipher_type}` → static cipher description
pub fn cipher_info(args: &str) -> DResult {
    let data = json_parse(args)?;
    let kind = cipher_kind(&data)?;
    ok_serialize(&ciphers::cipher_info(kind))
}

// ── Enhanced affine ─────────────────────────────────────────────────────────

/// `{passphrase, plaintext, attack_type?}`
///
/// Without `attack_type` the result is the plain envelope; with it the
/// output is wrapped by the matching defense.
pub fn enhanced_affine_encrypt(args: &str, config: &LabConfig) -> DResult {
    let data = json_parse(args)?;
    let passphrase = require_str(&data, "passphrase")?;
    let plaintext = require_str(&data, "plaintext")?;
    let cipher = EnhancedAffineCipher::with_config(passphrase, config).map_err(core_err)?;

    match data["attack_type"].as_str() {
        Some(attack) => match cipher.encrypt_with_protection(plaintext, attack, config) {
            Ok(protected) => ok_serialize(&protected),
            Err(e) => Err(core_err(e)),
        },
        None => ok_serialize(&cipher.encrypt(plaintext)),
    }
}

/// `{passphrase, ciphertext}` or `{passphrase, protected: {...}}` → `{plaintext}`
pub fn enhanced_affine_decrypt(args: &str, config: &LabConfig) -> DResult {
    let data = json_parse(args)?;
    let passphrase = require_str(&data, "passphrase")?;
    let cipher = EnhancedAffineCipher::with_config(passphrase, config).map_err(core_err)?;

    let plaintext = if let Some(protected) = data.get("protected").filter(|v| !v.is_null()) {
        let protected: ProtectedCiphertext =
            serde_json::from_value(protected.clone()).map_err(|e| core_err(e.into()))?;
        cipher.decrypt_with_protection(&protected)
    } else {
        cipher.decrypt(require_str(&data, "ciphertext")?)
    };

    match plaintext {
        Ok(plaintext) => ok_serialize(&serde_json::json!({ "plaintext": plaintext })),
        Err(e) => Err(core_err(e)),
    }
}

// ── Enhanced playfair ───────────────────────────────────────────────────────

/// `{keyword, text, show_steps?}` → `{text, steps?}`
pub fn enhanced_playfair_encrypt(args: &str) -> DResult {
    let data = json_parse(args)?;
    let keyword = require_str(&data, "keyword")?;
    let text = require_str(&data, "text")?;
    let show_steps = opt_bool(&data, "show_steps", false);

    match EnhancedPlayfairCipher::encrypt(text, keyword, show_steps) {
        Ok(out) => ok_serialize(&out),
        Err(e) => Err(core_err(e)),
    }
}

/// `{keyword, text, show_steps?}` → `{text, steps?}`
pub fn enhanced_playfair_decrypt(args: &str) -> DResult {
    let data = json_parse(args)?;
    let keyword = require_str(&data, "keyword")?;
    let text = require_str(&data, "text")?;
    let show_steps = opt_bool(&data, "show_steps", false);

    match EnhancedPlayfairCipher::decrypt(text, keyword, show_steps) {
        Ok(out) => ok_serialize(&out),
        Err(e) => Err(core_err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::dispatcher::{dispatch, dispatch_with_config};
    use crate::config::LabConfig;
    use serde_json::{json, Value};

    fn call(method: &str, args: Value) -> Value {
        let out = dispatch(method, &args.to_string()).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_caesar_roundtrip() {
        let enc = call(
            "cipher_encrypt",
            json!({"cipher_type": "caesar", "text": "Send money", "key": {"shift": 3}}),
        );
        assert_eq!(enc["text"], "Vhqg prqhb");
        assert!(enc.get("steps").is_none());

        let dec = call(
            "cipher_decrypt",
            json!({"cipher_type": "caesar", "text": "Vhqg prqhb", "key": {"shift": "3"}}),
        );
        assert_eq!(dec["text"], "Send money");
    }

    #[test]
    fn test_hill_text_key_and_steps() {
        let enc = call(
            "cipher_encrypt",
            json!({"cipher_type": "hill", "text": "HELP", "key": {"matrix": [[3, 3], [2, 5]]}, "show_steps": true}),
        );
        assert_eq!(enc["text"], "HIAT");
        assert!(enc["steps"].as_array().is_some());
    }

    #[test]
    fn test_missing_fields() {
        let (code, msg) = dispatch("cipher_encrypt", r#"{"text":"hi"}"#).unwrap_err();
        assert_eq!(code, 2);
        assert_eq!(msg, "Missing cipher_type");

        let (code, _) =
            dispatch("cipher_encrypt", r#"{"cipher_type":"enigma","text":"hi"}"#).unwrap_err();
        assert_eq!(code, 104);
    }

    #[test]
    fn test_extreme_integer_keys() {
        let dec = call(
            "cipher_decrypt",
            json!({"cipher_type": "caesar", "text": "STU", "key": {"shift": i64::MIN}}),
        );
        assert_eq!(dec["text"], "ABC");

        let enc = call(
            "cipher_encrypt",
            json!({"cipher_type": "affine", "text": "HELLO", "key": {"a": 5 + 26 * 300_000_000_000_000_000i64, "b": "8"}}),
        );
        assert_eq!(enc["text"], "RCLLA");

        let enc = call(
            "cipher_encrypt",
            json!({"cipher_type": "hill", "text": "HELP", "key": {"matrix": [[3 + 26 * 300_000_000_000_000_000i64, 3], [2, 5]]}}),
        );
        assert_eq!(enc["text"], "HIAT");
    }

    #[test]
    fn test_bad_affine_key_code() {
        let (code, _) = dispatch(
            "cipher_encrypt",
            r#"{"cipher_type":"affine","text":"hi","key":{"a":13,"b":2}}"#,
        )
        .unwrap_err();
        assert_eq!(code, 100);
    }

    #[test]
    fn test_cipher_info() {
        let info = call("cipher_info", json!({"cipher_type": "playfair"}));
        assert_eq!(info["name"], "Playfair Cipher");
    }

    #[test]
    fn test_enhanced_affine_roundtrip() {
        let enc = call(
            "enhanced_affine_encrypt",
            json!({"passphrase": "hunter2", "plaintext": "héllo wörld"}),
        );
        assert_eq!(enc["algorithm"], "enhanced_affine");

        let dec = call(
            "enhanced_affine_decrypt",
            json!({"passphrase": "hunter2", "ciphertext": enc["ciphertext"]}),
        );
        assert_eq!(dec["plaintext"], "héllo wörld");
    }

    #[test]
    fn test_enhanced_affine_protected_roundtrip() {
        let config = LabConfig::default();
        let args = json!({"passphrase": "pw", "plaintext": "attack at dawn", "attack_type": "mitm"});
        let enc = dispatch_with_config("enhanced_affine_encrypt", &args.to_string(), &config)
            .unwrap();
        let enc: Value = serde_json::from_str(&enc).unwrap();
        assert_eq!(enc["protection_meta"]["defense"], "dh_xor_hmac");

        let args = json!({"passphrase": "pw", "protected": enc});
        let dec = dispatch_with_config("enhanced_affine_decrypt", &args.to_string(), &config)
            .unwrap();
        let dec: Value = serde_json::from_str(&dec).unwrap();
        assert_eq!(dec["plaintext"], "attack at dawn");
    }

    #[test]
    fn test_enhanced_playfair_roundtrip() {
        let enc = call(
            "enhanced_playfair_encrypt",
            json!({"keyword": "monarchy", "text": "instruments"}),
        );
        let dec = call(
            "enhanced_playfair_decrypt",
            json!({"keyword": "monarchy", "text": enc["text"]}),
        );
        assert_eq!(dec["text"], "instruments");
    }
}
