//! `passvault vault update` — rotate the active vault's key.
//!
//! Decrypts all accounts with the old key, generates a new salt,
//! re-derives the master key from the new key string, re-encrypts the
//! full account set, and replaces the blob atomically.  At no point is
//! the account data persisted without a key.

use crate::cli::{load_settings, output, Cli};
use crate::errors::Result;

/// Execute the `vault update` command.
pub fn execute(cli: &Cli, old_key: &str, new_key: &str) -> Result<()> {
    let settings = load_settings()?;
    let mut registry = super::load_registry(cli)?;

    registry.update_key(
        old_key.as_bytes(),
        new_key.as_bytes(),
        Some(&settings.argon2_params()),
    )?;

    let name = registry.active_name().unwrap_or("?").to_string();
    output::success(&format!("Rotated key for vault '{name}'"));
    Ok(())
}
