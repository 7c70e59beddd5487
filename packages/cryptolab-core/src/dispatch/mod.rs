//! # Dispatcher
//!
//! String-method, JSON-argument entry point for front ends that cannot
//! call the typed API directly (a web layer, the `cryptolab call` command).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           DISPATCH FLOW                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  dispatch("cipher_encrypt", r#"{"cipher_type":"caesar", ...}"#)         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatcher.rs ──┬──► dispatch_ciphers    cipher_*, enhanced_*          │
//! │                  ├──► dispatch_attacks    attack_*, mitm_intercept      │
//! │                  └──► dispatch_protection protection_*                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Ok(json) │ Err((code, message))                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 1    | Arguments are not valid JSON |
//! | 2    | Required field missing |
//! | 404  | Unknown method |
//! | other | [`Error::code`](crate::Error::code) of the failing operation |

mod dispatch_attacks;
mod dispatch_ciphers;
mod dispatch_protection;
mod dispatcher;

pub use dispatcher::{dispatch, dispatch_with_config, DResult};
