//! # CryptoLab Core
//!
//! A teaching engine for classical ciphers and the attacks that break them,
//! plus a small protection layer that shows how each attack is countered.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CRYPTOLAB CORE MODULES                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │   Ciphers   │  │  Enhanced   │  │   Attacks   │  │ Interception │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - Caesar    │  │ - Byte      │  │ - Brute     │  │ - MITM       │   │
//! │  │ - Affine    │  │   affine    │  │   force     │  │   narrative  │   │
//! │  │ - Hill      │  │ - Lowercase │  │ - Frequency │  │ - Forgery    │   │
//! │  │ - Playfair  │  │   playfair  │  │ - Hill KPA  │  │              │   │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘   │
//! │         │                │                │                │           │
//! │         └────────────────┴────────────────┴────────────────┘           │
//! │                                   │                                     │
//! │  ┌─────────────┐  ┌─────────────┐ │ ┌─────────────────────────────────┐│
//! │  │    Math     │  │ Protection  │ │ │           Dispatch              ││
//! │  │             │  │             │ │ │                                 ││
//! │  │ - gcd / inv │  │ - Argon2id  │◄┘ │ - method + JSON args            ││
//! │  │ - det / adj │  │ - Noise     │   │ - (code, message) errors        ││
//! │  │ - mat inv   │  │ - DH + HMAC │   │                                 ││
//! │  └─────────────┘  └─────────────┘   └─────────────────────────────────┘│
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Tunables for key stretching, noise and the byte cipher
//! - [`math`] - Modular arithmetic and small integer matrices
//! - [`ciphers`] - Caesar, Affine, Hill and Playfair with step narration
//! - [`enhanced`] - Byte-level affine and lowercase Playfair variants
//! - [`protection`] - Defenses keyed by attack type
//! - [`attacks`] - Brute force, frequency analysis, Hill known-plaintext
//! - [`interception`] - Man-in-the-middle simulation
//! - [`dispatch`] - String-method JSON entry point
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           SECURITY NOTES                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  The classical ciphers and the byte cipher are deliberately weak.       │
//! │  They exist to be broken by the attacks in this crate.                  │
//! │                                                                         │
//! │  The protection layer uses real primitives (Argon2id, HMAC-SHA256)      │
//! │  but stores every secret it needs in the returned metadata, and the     │
//! │  Diffie-Hellman group is tiny. It demonstrates the *shape* of each      │
//! │  defense, not a secure construction.                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod attacks;
pub mod ciphers;
pub mod config;
pub mod dispatch;
pub mod enhanced;
pub mod error;
pub mod interception;
pub mod math;
pub mod protection;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ciphers::{CipherKey, CipherKind, CipherOutput, HillKey};
pub use config::{KdfAlgorithm, KeyStretchConfig, LabConfig};
pub use dispatch::{dispatch, dispatch_with_config};
pub use enhanced::{EnhancedAffineCipher, EnhancedPlayfairCipher};
pub use error::{Error, Result};
pub use interception::{intercept, InterceptionReport, InterceptionRequest};
pub use protection::{apply_protection, remove_protection, Defense, ProtectionMetadata};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of CryptoLab Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns build information for debugging
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    }
}

/// Build information for debugging
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Crate version
    pub version: &'static str,
    /// Build profile (debug/release)
    pub profile: &'static str,
}

// ============================================================================
// TESTS
// ============================================================================
