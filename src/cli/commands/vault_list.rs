//! `passvault vault list` — list vault names, or the active vault's accounts.
//!
//! Without a key, lists vault names (active first, then newest first).
//! With a key, authenticates against the active vault and lists its
//! account tags newest first; `--info` renders a detail table instead.
//! The name and tag listings are plain lines on stdout so callers can
//! assert on them verbatim.

use crate::cli::{output, Cli};
use crate::errors::Result;

/// Execute the `vault list` command.
pub fn execute(cli: &Cli, key: Option<&str>, info: bool) -> Result<()> {
    let registry = super::load_registry(cli)?;

    let Some(key) = key else {
        for name in registry.list_vaults() {
            println!("{name}");
        }
        return Ok(());
    };

    let store = registry.open_active(key.as_bytes())?;

    if info {
        output::print_accounts_table(store.accounts_newest_first());
    } else {
        for tag in store.list_tags() {
            println!("{tag}");
        }
    }

    Ok(())
}
