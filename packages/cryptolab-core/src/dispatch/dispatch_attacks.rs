//! Attack dispatch handlers: attack_* and mitm_intercept.

use super::dispatcher::{
    cipher_kind, core_err, json_parse, key_from_args, ok_serialize, opt_bool, require,
    require_str, DResult,
};
use crate::attacks;
use crate::interception::{self, InterceptionRequest};

/// `{ciphertext}` → 26 candidates, best first
pub fn attack_bruteforce(args: &str) -> DResult {
    let data = json_parse(args)?;
    let ciphertext = require_str(&data, "ciphertext")?;
    ok_serialize(&attacks::brute_force_caesar(ciphertext))
}

/// `{text}` → frequency report
pub fn attack_frequency(args: &str) -> DResult {
    let data = json_parse(args)?;
    let text = require_str(&data, "text")?;
    ok_serialize(&attacks::analyze_frequency(text))
}

/// `{plaintext, ciphertext}` → recovered 2x2 key or an `error` message
pub fn attack_hill_known_plaintext(args: &str) -> DResult {
    let data = json_parse(args)?;
    let plaintext = require_str(&data, "plaintext")?;
    let ciphertext = require_str(&data, "ciphertext")?;
    ok_serialize(&attacks::recover_hill_key(plaintext, ciphertext))
}

/// `{cipher_type}` → attacks and countermeasures; `{}` for an unknown cipher
pub fn attack_recommendations(args: &str) -> DResult {
    let data = json_parse(args)?;
    let cipher = require_str(&data, "cipher_type")?;
    ok_serialize(&attacks::attack_recommendations(cipher))
}

/// `{cipher_type, ciphertext, original_plaintext, actual_key, attacker_key,
///   modified_plaintext?, sender?, show_steps?}`
pub fn mitm_intercept(args: &str) -> DResult {
    let data = json_parse(args)?;
    let kind = cipher_kind(&data)?;

    let request = InterceptionRequest {
        ciphertext: require_str(&data, "ciphertext")?.to_string(),
        original_plaintext: require_str(&data, "original_plaintext")?.to_string(),
        actual_key: key_from_args(kind, require(&data, "actual_key")?)?,
        attacker_key: key_from_args(kind, require(&data, "attacker_key")?)?,
        modified_plaintext: data["modified_plaintext"].as_str().map(str::to_string),
        sender: data["sender"].as_str().map(str::to_string),
        show_steps: opt_bool(&data, "show_steps", true),
    };

    match interception::intercept(&request) {
        Ok(report) => ok_serialize(&report),
        Err(e) => Err(core_err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::dispatcher::dispatch;
    use serde_json::{json, Value};

    fn call(method: &str, args: Value) -> Value {
        let out = dispatch(method, &args.to_string()).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_bruteforce_ranks_real_shift_first() {
        let out = call(
            "attack_bruteforce",
            json!({"ciphertext": "Phhw ph dw wkh vhfuhw hqwudqfh dw whq"}),
        );
        let candidates = out.as_array().unwrap();
        assert_eq!(candidates.len(), 26);
        assert_eq!(candidates[0]["shift"], 3);
    }

    #[test]
    fn test_frequency_empty_text() {
        let out = call("attack_frequency", json!({"text": "1234"}));
        assert_eq!(out["total_letters"], 0);
        assert!(out.get("chi_squared").is_none());
    }

    #[test]
    fn test_hill_known_plaintext() {
        let out = call(
            "attack_hill_known_plaintext",
            json!({"plaintext": "HELP", "ciphertext": "HIAT"}),
        );
        assert_eq!(out["success"], true);
        assert_eq!(out["recovered_key"], json!([[3, 3], [2, 5]]));

        let out = call(
            "attack_hill_known_plaintext",
            json!({"plaintext": "HE", "ciphertext": "HI"}),
        );
        assert_eq!(out["success"], false);
        assert!(out["error"].is_string());
    }

    #[test]
    fn test_recommendations_unknown_is_empty() {
        let out = dispatch("attack_recommendations", r#"{"cipher_type":"enigma"}"#).unwrap();
        assert_eq!(out, "{}");
    }

    #[test]
    fn test_mitm_intercept() {
        let out = call(
            "mitm_intercept",
            json!({
                "cipher_type": "caesar",
                "ciphertext": "Khoor Ere",
                "original_plaintext": "Hello Bob",
                "actual_key": {"shift": 3},
                "attacker_key": {"shift": 3},
                "modified_plaintext": "Send money",
                "sender": "alice"
            }),
        );
        assert_eq!(out["success"], true);
        assert_eq!(out["decrypted_plaintext"], "Hello Bob");
        assert_eq!(out["modified_ciphertext"], "Vhqg prqhb");
        assert!(out["attack_steps"].as_array().unwrap().len() > 5);
    }

    #[test]
    fn test_mitm_requires_keys() {
        let (code, msg) = dispatch(
            "mitm_intercept",
            r#"{"cipher_type":"caesar","ciphertext":"x","original_plaintext":"x","actual_key":{}}"#,
        )
        .unwrap_err();
        assert_eq!(code, 2);
        assert_eq!(msg, "Missing attacker_key");
    }
}
