//! Vault module — encrypted account storage.
//!
//! This module provides:
//! - The `Account` record type and its length-delimited binary codec (`account`)
//! - External account source file parsing (`source`)
//! - Binary vault file format with HMAC integrity (`format`)
//! - High-level `VaultStore` for creating, opening, and managing vaults (`store`)

pub mod account;
pub mod format;
pub mod source;
pub mod store;

// Re-export the most commonly used items.
pub use account::{Account, AccountField};
pub use format::{StoredArgon2Params, VaultHeader};
pub use source::{read_account_source, AccountSource};
pub use store::VaultStore;
