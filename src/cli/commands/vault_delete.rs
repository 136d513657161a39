//! `passvault vault delete` — delete a vault irreversibly.

use crate::cli::{output, validate_vault_name, Cli};
use crate::errors::Result;

/// Execute the `vault delete` command.
pub fn execute(cli: &Cli, name: &str, key: &str) -> Result<()> {
    validate_vault_name(name)?;

    let mut registry = super::load_registry(cli)?;
    registry.delete_vault(name, key.as_bytes())?;

    output::success(&format!("Deleted vault '{name}'"));
    Ok(())
}
