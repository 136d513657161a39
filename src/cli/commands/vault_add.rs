//! `passvault vault add` — create a new vault.

use crate::cli::{load_settings, output, validate_vault_name, Cli};
use crate::errors::Result;

/// Execute the `vault add` command.
pub fn execute(cli: &Cli, name: &str, key: &str) -> Result<()> {
    validate_vault_name(name)?;

    let settings = load_settings()?;
    let mut registry = super::load_registry(cli)?;

    registry.add_vault(name, key.as_bytes(), Some(&settings.argon2_params()))?;

    output::success(&format!("Created vault '{name}'"));
    Ok(())
}
