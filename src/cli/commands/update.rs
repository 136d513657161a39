//! `passvault update` — modify or delete one account in the active vault.

use std::path::Path;

use crate::cli::{output, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::AccountField;

/// What an `update` invocation should do to the account.
pub enum UpdateAction<'a> {
    SetField(AccountField, &'a str),
    FromFile(&'a str),
    Delete,
}

/// Execute the `update` command.
pub fn execute(cli: &Cli, tag: &str, key: &str, action: UpdateAction) -> Result<()> {
    let registry = super::load_registry(cli)?;
    let mut store = registry.open_active(key.as_bytes())?;

    match action {
        UpdateAction::SetField(field, value) => {
            store.update_field(tag, field, value)?;
            store.save()?;
            output::success(&format!("Updated account '{tag}'"));
        }
        UpdateAction::FromFile(path) => {
            store.update_from_source(tag, Path::new(path))?;
            store.save()?;
            output::success(&format!("Updated account '{tag}' from file"));
        }
        UpdateAction::Delete => {
            store.delete_account(tag)?;
            store.save()?;
            output::success(&format!("Deleted account '{tag}'"));
        }
    }

    Ok(())
}

/// Translate the clap flags into an `UpdateAction`.
///
/// Exactly one change flag must be present (clap enforces the group);
/// reaching the fallthrough means no flag was given at all.
pub fn resolve_action<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
    note: Option<&'a str>,
    file: Option<&'a str>,
    delete: bool,
) -> Result<UpdateAction<'a>> {
    if let Some(v) = username {
        Ok(UpdateAction::SetField(AccountField::Username, v))
    } else if let Some(v) = password {
        Ok(UpdateAction::SetField(AccountField::Password, v))
    } else if let Some(v) = note {
        Ok(UpdateAction::SetField(AccountField::Note, v))
    } else if let Some(path) = file {
        Ok(UpdateAction::FromFile(path))
    } else if delete {
        Ok(UpdateAction::Delete)
    } else {
        Err(PassVaultError::CommandFailed(
            "update requires one of --username, --password, --note, --file, or --delete".into(),
        ))
    }
}
