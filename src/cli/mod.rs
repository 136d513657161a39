//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::errors::{PassVaultError, Result};

/// PassVault CLI: encrypted multi-vault password manager.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted multi-vault password manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: from `.passvault.toml`, else .passvault)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Manage vaults (add, switch, update, delete, list)
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// Add a new account to the active vault
    Add {
        /// Account tag (unique within the vault)
        tag: String,
        /// Vault key of the active vault
        key: String,
        /// Account username
        #[arg(long, requires = "password")]
        username: Option<String>,
        /// Account password
        #[arg(long, requires = "username")]
        password: Option<String>,
        /// Read username, password, and note from a file instead
        #[arg(long, conflicts_with_all = ["username", "password"])]
        file: Option<String>,
    },

    /// Update one account in the active vault
    Update {
        /// Account tag
        tag: String,
        /// Vault key of the active vault
        key: String,
        /// New username
        #[arg(long, group = "change")]
        username: Option<String>,
        /// New password
        #[arg(long, group = "change")]
        password: Option<String>,
        /// New note
        #[arg(long, group = "change")]
        note: Option<String>,
        /// Replace username, password, and note from a file
        #[arg(long, group = "change")]
        file: Option<String>,
        /// Delete the account instead
        #[arg(long, group = "change")]
        delete: bool,
    },

    /// Print account information from the active vault
    Print {
        /// Account tag
        tag: String,
        /// Vault key of the active vault
        key: String,
        /// Print only the username
        #[arg(long, group = "field")]
        username: bool,
        /// Print only the password
        #[arg(long, group = "field")]
        password: bool,
        /// Print only the note
        #[arg(long, group = "field")]
        note: bool,
    },

    /// Copy an account field to the OS clipboard
    Clip {
        /// Account tag
        tag: String,
        /// Vault key of the active vault
        key: String,
        /// Copy the username
        #[arg(long, group = "field")]
        username: bool,
        /// Copy the password
        #[arg(long, group = "field")]
        password: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Vault subcommands for whole-vault lifecycle operations.
#[derive(clap::Subcommand)]
pub enum VaultAction {
    /// Create a new vault
    Add {
        /// Vault name
        name: String,
        /// Vault key protecting the new vault
        key: String,
    },

    /// Switch the active vault
    Switch {
        /// Vault name to switch to
        name: String,
        /// That vault's key
        key: String,
    },

    /// Rotate the active vault's key
    Update {
        /// Current vault key
        old_key: String,
        /// New vault key
        new_key: String,
    },

    /// Delete a vault (cannot be the active vault)
    Delete {
        /// Vault name to delete
        name: String,
        /// That vault's key
        key: String,
    },

    /// List vault names, or the active vault's accounts when a key is given
    List {
        /// Vault key of the active vault
        key: Option<String>,
        /// Show account details instead of tags only
        #[arg(long)]
        info: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the data directory for this invocation.
///
/// An explicit `--data-dir` flag wins; otherwise the `data_dir` field
/// of `.passvault.toml` applies, falling back to `.passvault`.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => load_settings()?.data_dir,
    };
    Ok(cwd.join(dir))
}

/// Load settings from the working directory's `.passvault.toml`.
pub fn load_settings() -> Result<crate::config::Settings> {
    let cwd = std::env::current_dir()?;
    crate::config::Settings::load(&cwd)
}

/// Validate that a vault name is safe to use as a file name.
///
/// Allowed: ASCII letters, digits, hyphens, underscores. Must not be
/// empty. Max length 64 characters. This keeps vault names from
/// escaping the vaults directory or colliding with temp files.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "vault name cannot be empty".into(),
        ));
    }

    if name.len() > 64 {
        return Err(PassVaultError::CommandFailed(
            "vault name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PassVaultError::CommandFailed(format!(
            "vault name '{name}' is invalid — only ASCII letters, digits, hyphens, and underscores are allowed"
        )));
    }

    Ok(())
}
