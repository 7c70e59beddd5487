//! Protection dispatch handlers: protection_* methods.

use serde_json::json;

use super::dispatcher::{core_err, json_parse, ok_json, require, require_str, DResult};
use crate::config::LabConfig;
use crate::protection::{self, ProtectionMetadata};

/// `{text, attack_type}` → `{protected, metadata}`
///
/// `protected` is lowercase hex. Unknown attack types fall back to key
/// stretching.
pub fn protection_apply(args: &str, config: &LabConfig) -> DResult {
    let data = json_parse(args)?;
    let text = require_str(&data, "text")?;
    let attack = require_str(&data, "attack_type")?;

    let (protected, meta) =
        protection::apply_protection(text, attack, config).map_err(core_err)?;
    let metadata = meta.to_value().map_err(core_err)?;

    ok_json(json!({
        "protected": protected,
        "metadata": metadata,
    }))
}

/// `{protected, metadata}` → `{text}`
pub fn protection_remove(args: &str) -> DResult {
    let data = json_parse(args)?;
    let protected = require_str(&data, "protected")?;
    let meta = ProtectionMetadata::from_value(require(&data, "metadata")?.clone())
        .map_err(core_err)?;

    match protection::remove_protection(protected, &meta) {
        Ok(text) => ok_json(json!({ "text": text })),
        Err(e) => Err(core_err(e)),
    }
}
