//! Colored terminal output helpers.
//!
//! Human-facing status messages go through these functions so styling
//! stays consistent.  Result data (tags, account fields, vault names)
//! is printed with plain `println!` by the commands themselves, so
//! stdout stays machine-assertable; diagnostics always go to stderr.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Account;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message to stderr: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning to stderr: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a table of account details (passwords are never shown).
pub fn print_accounts_table<'a>(accounts: impl Iterator<Item = &'a Account>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tag", "Username", "Note"]);

    let mut empty = true;
    for account in accounts {
        empty = false;
        table.add_row(vec![
            account.tag.clone(),
            account.username.clone(),
            account.note.clone(),
        ]);
    }

    if empty {
        info("No accounts in this vault yet.");
        return;
    }

    println!("{table}");
}
