//! CryptoLab command line
//!
//! Thin front end over `cryptolab-core`. Every command prints pretty JSON
//! on stdout; logs go to stderr and are filtered with `RUST_LOG`.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use serde_json::{json, Value};

use cryptolab_core::attacks::{
    analyze_frequency, attack_recommendations, brute_force_caesar, recover_hill_key,
};
use cryptolab_core::ciphers::{cipher_info, CipherKind};
use cryptolab_core::protection::{apply_protection, remove_protection, ProtectionMetadata};
use cryptolab_core::{dispatch_with_config, LabConfig};

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cryptolab", version, about = "Classical ciphers, attacks and protections")]
struct Args {
    /// TOML file with key stretching, noise and byte cipher settings
    #[arg(short, long, global = true, env = "CRYPTOLAB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt text with a classical cipher
    Encrypt {
        /// caesar, affine, hill or playfair
        #[arg(long)]
        cipher: String,
        /// Key as JSON, e.g. '{"shift":3}' or '{"text_key":"HILL"}'
        #[arg(long, default_value = "{}")]
        key: String,
        /// Include the step-by-step narration
        #[arg(long)]
        steps: bool,
        /// Text to encrypt; read from stdin when omitted
        text: Option<String>,
    },
    /// Decrypt text with a classical cipher
    Decrypt {
        /// caesar, affine, hill or playfair
        #[arg(long)]
        cipher: String,
        /// Key as JSON
        #[arg(long, default_value = "{}")]
        key: String,
        /// Include the step-by-step narration
        #[arg(long)]
        steps: bool,
        /// Text to decrypt; read from stdin when omitted
        text: Option<String>,
    },
    /// Try every Caesar shift and rank by closeness to English
    BruteForce {
        /// Ciphertext; read from stdin when omitted
        ciphertext: Option<String>,
    },
    /// Letter frequency analysis against English
    Frequency {
        /// Text; read from stdin when omitted
        text: Option<String>,
    },
    /// Recover a 2x2 Hill key from matching plaintext and ciphertext
    HillKpa {
        /// Known plaintext
        #[arg(long)]
        plaintext: String,
        /// Matching ciphertext
        #[arg(long)]
        ciphertext: String,
    },
    /// Apply the defense matching an attack type
    Protect {
        /// bruteforce, dictionary, frequency or mitm
        #[arg(long)]
        attack: String,
        /// Text to protect; read from stdin when omitted
        text: Option<String>,
    },
    /// Remove a protection layer
    Unprotect {
        /// Metadata JSON printed by `protect`
        #[arg(long)]
        meta: String,
        /// Protected hex; read from stdin when omitted
        protected: Option<String>,
    },
    /// Describe a cipher
    Info {
        /// caesar, affine, hill or playfair
        cipher: String,
    },
    /// Attacks and countermeasures for a cipher
    Recommend {
        /// Cipher tag
        cipher: String,
    },
    /// Call the dispatcher directly
    Call {
        /// Method name, e.g. cipher_encrypt
        method: String,
        /// JSON arguments
        #[arg(default_value = "{}")]
        args: String,
    },
}

// ── Entry Point ───────────────────────────────────────────────────────────────

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptolab=info,cryptolab_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let output = run(args.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> color_eyre::Result<LabConfig> {
    let Some(path) = path else {
        return Ok(LabConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    let config: LabConfig =
        toml::from_str(&raw).wrap_err_with(|| format!("parsing config {}", path.display()))?;
    config.validate()?;

    tracing::info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Positional text, or all of stdin with the trailing newline removed
fn text_or_stdin(text: Option<String>) -> color_eyre::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("reading stdin")?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn call(method: &str, args: &Value, config: &LabConfig) -> color_eyre::Result<Value> {
    let out = dispatch_with_config(method, &args.to_string(), config)
        .map_err(|(code, message)| eyre!("{} failed ({}): {}", method, code, message))?;
    Ok(serde_json::from_str(&out)?)
}

fn parse_json(label: &str, raw: &str) -> color_eyre::Result<Value> {
    serde_json::from_str(raw).wrap_err_with(|| format!("{} is not valid JSON", label))
}

fn run(command: Command, config: &LabConfig) -> color_eyre::Result<Value> {
    match command {
        Command::Encrypt {
            cipher,
            key,
            steps,
            text,
        } => {
            let args = json!({
                "cipher_type": cipher,
                "key": parse_json("--key", &key)?,
                "text": text_or_stdin(text)?,
                "show_steps": steps,
            });
            call("cipher_encrypt", &args, config)
        }
        Command::Decrypt {
            cipher,
            key,
            steps,
            text,
        } => {
            let args = json!({
                "cipher_type": cipher,
                "key": parse_json("--key", &key)?,
                "text": text_or_stdin(text)?,
                "show_steps": steps,
            });
            call("cipher_decrypt", &args, config)
        }
        Command::BruteForce { ciphertext } => {
            let ciphertext = text_or_stdin(ciphertext)?;
            Ok(serde_json::to_value(brute_force_caesar(&ciphertext))?)
        }
        Command::Frequency { text } => {
            let text = text_or_stdin(text)?;
            Ok(serde_json::to_value(analyze_frequency(&text))?)
        }
        Command::HillKpa {
            plaintext,
            ciphertext,
        } => Ok(serde_json::to_value(recover_hill_key(
            &plaintext,
            &ciphertext,
        ))?),
        Command::Protect { attack, text } => {
            let text = text_or_stdin(text)?;
            let (protected, meta) = apply_protection(&text, &attack, config)?;
            Ok(json!({
                "protected": protected,
                "metadata": meta.to_value()?,
            }))
        }
        Command::Unprotect { meta, protected } => {
            let meta = ProtectionMetadata::from_json(&meta)?;
            let protected = text_or_stdin(protected)?;
            Ok(json!({ "text": remove_protection(&protected, &meta)? }))
        }
        Command::Info { cipher } => {
            let kind: CipherKind = cipher.parse()?;
            Ok(serde_json::to_value(cipher_info(kind))?)
        }
        Command::Recommend { cipher } => {
            Ok(serde_json::to_value(attack_recommendations(&cipher))?)
        }
        Command::Call { method, args } => {
            let args = parse_json("args", &args)?;
            call(&method, &args, config)
        }
    }
}
