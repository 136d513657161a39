//! Parsing of external account source files.
//!
//! A source file describes one account's details in plain text:
//! line 1 is the username, line 2 the password, and every remaining
//! line belongs to the note (joined verbatim, so multi-line notes
//! survive).  Any read or shape problem maps to `SourceUnavailable`
//! so callers can guarantee the vault is left untouched.

use std::fs;
use std::path::Path;

use crate::errors::{PassVaultError, Result};

/// Account details read from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSource {
    pub username: String,
    pub password: String,
    pub note: String,
}

/// Read and parse an account source file.
///
/// Fails with `SourceUnavailable` if the file cannot be read or does
/// not contain at least a username and a password line.
pub fn read_account_source(path: &Path) -> Result<AccountSource> {
    let contents =
        fs::read_to_string(path).map_err(|_| PassVaultError::SourceUnavailable(path.into()))?;

    let mut lines = contents.lines();

    let username = lines
        .next()
        .ok_or_else(|| PassVaultError::SourceUnavailable(path.into()))?
        .to_string();
    let password = lines
        .next()
        .ok_or_else(|| PassVaultError::SourceUnavailable(path.into()))?
        .to_string();

    // Everything after the second line is the note, newlines preserved.
    let note = lines.collect::<Vec<_>>().join("\n");

    Ok(AccountSource {
        username,
        password,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_source(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("account.txt");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn parses_username_password_and_note() {
        let (_dir, path) = write_source("alice\nhunter2\nfirst note line\nsecond note line\n");
        let source = read_account_source(&path).unwrap();

        assert_eq!(source.username, "alice");
        assert_eq!(source.password, "hunter2");
        assert_eq!(source.note, "first note line\nsecond note line");
    }

    #[test]
    fn note_is_empty_when_absent() {
        let (_dir, path) = write_source("bob\npw\n");
        let source = read_account_source(&path).unwrap();
        assert_eq!(source.note, "");
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_account_source(&dir.path().join("nope.txt"));
        assert!(matches!(
            result,
            Err(PassVaultError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn file_with_only_username_is_source_unavailable() {
        let (_dir, path) = write_source("just-a-username");
        let result = read_account_source(&path);
        assert!(matches!(
            result,
            Err(PassVaultError::SourceUnavailable(_))
        ));
    }
}
