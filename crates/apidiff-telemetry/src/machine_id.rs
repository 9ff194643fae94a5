//! Anonymous machine identifier
//!
//! A stable per-installation id: a salted SHA-256 hash of the primary MAC
//! address (hostname as fallback), cached on disk so repeat invocations
//! agree. The salt is random per installation, which keeps the id
//! unlinkable across machines even when they share hardware identifiers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Resolve the per-installation machine id.
///
/// Callers substitute the `"na"` sentinel on error; failures here must
/// never block the CLI.
pub fn get_machine_id() -> Result<String> {
    let state_dir = telemetry_state_dir()?;
    let id_path = state_dir.join("machine_id");

    if let Ok(cached) = fs::read_to_string(&id_path) {
        let cached = cached.trim();
        if !cached.is_empty() {
            return Ok(cached.to_string());
        }
    }

    let id = generate_machine_id(&state_dir)?;
    fs::write(&id_path, &id).context("failed to cache machine id")?;

    Ok(id)
}

/// Salted SHA-256 over the hardware identifier, hex-encoded (64 chars).
fn generate_machine_id(state_dir: &Path) -> Result<String> {
    let identifier = hardware_identifier();
    let salt = get_or_create_salt(state_dir)?;

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(identifier.as_bytes());

    Ok(format!("{:x}", hasher.finalize()))
}

/// Most stable identifier available: MAC address, then hostname, then a
/// one-off random id (anonymous, but not stable across runs).
fn hardware_identifier() -> String {
    if let Ok(Some(mac)) = mac_address::get_mac_address() {
        return mac.to_string();
    }

    if let Ok(name) = hostname::get() {
        if let Some(name) = name.to_str() {
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }

    Uuid::new_v4().to_string()
}

fn get_or_create_salt(state_dir: &Path) -> Result<String> {
    let salt_path = state_dir.join("salt");

    if let Ok(salt) = fs::read_to_string(&salt_path) {
        let salt = salt.trim();
        if !salt.is_empty() {
            return Ok(salt.to_string());
        }
    }

    let salt = Uuid::new_v4().to_string();
    fs::write(&salt_path, &salt).context("failed to write salt file")?;

    Ok(salt)
}

/// Telemetry state directory (`~/.apidiff/telemetry`), created on demand.
fn telemetry_state_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let dir = home.join(".apidiff").join("telemetry");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
