//! `passvault clip` — copy an account field to the OS clipboard.
//!
//! Prints nothing on success, so stdout stays clean for callers.  The
//! clipboard write itself is bounded; see `crate::clipboard`.

use crate::cli::{load_settings, Cli};
use crate::clipboard::copy_to_clipboard;
use crate::errors::{PassVaultError, Result};

/// Execute the `clip` command.
pub fn execute(cli: &Cli, tag: &str, key: &str, username: bool, password: bool) -> Result<()> {
    if !username && !password {
        return Err(PassVaultError::CommandFailed(
            "clip requires --username or --password".into(),
        ));
    }

    let settings = load_settings()?;
    let registry = super::load_registry(cli)?;
    let store = registry.open_active(key.as_bytes())?;
    let account = store.get(tag)?;

    let value = if username {
        &account.username
    } else {
        &account.password
    };

    copy_to_clipboard(value, settings.clipboard_timeout_ms)
}
