use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("The provided vault key is incorrect")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("No vault named '{0}' exists")]
    VaultNotFound(String),

    #[error("A vault named '{0}' already exists")]
    VaultAlreadyExists(String),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("No active vault — create one with `passvault vault add <name> <key>`")]
    NoActiveVault,

    #[error("Cannot delete '{0}' while it is the active vault")]
    CannotDeleteActive(String),

    // --- Account errors ---
    #[error("No account with tag '{0}' exists in the active vault")]
    AccountNotFound(String),

    #[error("An account with tag '{0}' already exists")]
    DuplicateTag(String),

    #[error("Account source file {0} is unreadable or malformed")]
    SourceUnavailable(PathBuf),

    // --- Clipboard errors ---
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Clipboard write timed out after {0} ms")]
    ClipboardTimeout(u64),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
