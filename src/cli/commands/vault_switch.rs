//! `passvault vault switch` — change the active vault.

use crate::cli::{output, validate_vault_name, Cli};
use crate::errors::Result;

/// Execute the `vault switch` command.
pub fn execute(cli: &Cli, name: &str, key: &str) -> Result<()> {
    validate_vault_name(name)?;

    let mut registry = super::load_registry(cli)?;
    registry.switch(name, key.as_bytes())?;

    output::success(&format!("Switched to vault '{name}'"));
    Ok(())
}
