//! `passvault print` — print account information to stdout.
//!
//! With a field flag, prints only that field's value.  With no flag,
//! prints the full record in the fixed assertable shape:
//!
//! ```text
//! un=<username>
//! pw=<password>
//! note=<note>
//! ```

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `print` command.
pub fn execute(
    cli: &Cli,
    tag: &str,
    key: &str,
    username: bool,
    password: bool,
    note: bool,
) -> Result<()> {
    let registry = super::load_registry(cli)?;
    let store = registry.open_active(key.as_bytes())?;
    let account = store.get(tag)?;

    if username {
        println!("{}", account.username);
    } else if password {
        println!("{}", account.password);
    } else if note {
        println!("{}", account.note);
    } else {
        println!("un={}", account.username);
        println!("pw={}", account.password);
        println!("note={}", account.note);
    }

    Ok(())
}
