//! `passvault add` — add a new account to the active vault.
//!
//! If no vault exists yet, a `default` vault is created on the fly,
//! keyed by the key presented to this command, so a first-time user
//! can add an account without an explicit `vault add` step.

use std::path::Path;

use crate::cli::{load_settings, output, Cli};
use crate::errors::Result;
use crate::vault::{read_account_source, VaultStore};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    tag: &str,
    key: &str,
    username: Option<&str>,
    password: Option<&str>,
    file: Option<&str>,
) -> Result<()> {
    let mut registry = super::load_registry(cli)?;

    if registry.is_empty() {
        // Everything that can fail is checked before the implicit
        // default vault is created, so a failing add leaves the data
        // directory exactly as it was.
        VaultStore::validate_tag(tag)?;
        let source = match file {
            Some(path) => Some(read_account_source(Path::new(path))?),
            None => None,
        };

        let settings = load_settings()?;
        registry.add_vault("default", key.as_bytes(), Some(&settings.argon2_params()))?;
        output::info("No vault existed yet — created vault 'default'.");

        let mut store = registry.open_active(key.as_bytes())?;
        match (source, username, password) {
            (Some(src), _, _) => {
                store.add_account(tag, &src.username, &src.password, Some(&src.note))?
            }
            (None, Some(un), Some(pw)) => store.add_account(tag, un, pw, None)?,
            // No details at all: an account holding just the tag.
            _ => store.add_account(tag, "", "", None)?,
        }
        store.save()?;
    } else {
        let mut store = registry.open_active(key.as_bytes())?;
        match (file, username, password) {
            (Some(path), _, _) => store.add_from_source(tag, Path::new(path))?,
            (None, Some(un), Some(pw)) => store.add_account(tag, un, pw, None)?,
            _ => store.add_account(tag, "", "", None)?,
        }
        store.save()?;
    }

    output::success(&format!("Added account '{tag}'"));
    Ok(())
}
