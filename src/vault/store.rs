//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` owns the decrypted account collection for one vault
//! and wraps the binary format layer and the crypto layer, so the rest
//! of the application can work with simple calls like
//! `store.add_account("gmail", "alice", "hunter2", None)`.
//!
//! Accounts are kept in insertion order; every mutating call is
//! followed by a `save()` from the command layer, which re-encrypts
//! the **entire** collection under a fresh nonce and atomically
//! replaces the blob on disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_master_key, generate_salt, Argon2Params};
use crate::crypto::keys::VaultKey;
use crate::errors::{PassVaultError, Result};

use super::account::{self, Account, AccountField};
use super::format::{self, StoredArgon2Params, VaultHeader, CURRENT_VERSION};
use super::source::read_account_source;

/// The main vault handle.  Create one with `VaultStore::create` or
/// `VaultStore::open`, then use its methods to manage accounts.
pub struct VaultStore {
    /// Path to the `.vault` file on disk.
    path: PathBuf,

    /// Header metadata (version, salt, KDF params, creation time).
    header: VaultHeader,

    /// Decrypted accounts in insertion order (oldest first).
    accounts: Vec<Account>,

    /// The derived master key (zeroized on drop).
    master_key: VaultKey,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new empty vault file at `path`.
    ///
    /// Generates a random salt, derives the master key from the vault
    /// key string, and writes an empty encrypted vault to disk.
    ///
    /// Pass `None` for `argon2_params` to use sensible defaults.
    pub fn create(path: &Path, vault_key: &[u8], argon2_params: Option<&Argon2Params>) -> Result<Self> {
        if path.exists() {
            return Err(PassVaultError::VaultAlreadyExists(
                path.file_stem().unwrap_or_default().to_string_lossy().into_owned(),
            ));
        }

        let salt = generate_salt();
        let effective_params = argon2_params.copied().unwrap_or_default();

        let mut master_bytes = derive_master_key(vault_key, &salt, &effective_params)?;
        let master_key = VaultKey::new(master_bytes);
        master_bytes.zeroize();

        let header = VaultHeader {
            version: CURRENT_VERSION,
            salt: salt.to_vec(),
            created_at: Utc::now(),
            argon2_params: StoredArgon2Params {
                memory_kib: effective_params.memory_kib,
                iterations: effective_params.iterations,
                parallelism: effective_params.parallelism,
            },
        };

        let mut store = Self {
            path: path.to_path_buf(),
            header,
            accounts: Vec::new(),
            master_key,
        };

        // Persist the empty vault so the file exists (and authenticates)
        // from the moment of creation.
        store.save()?;

        Ok(store)
    }

    /// Open an existing vault file, authenticating the vault key.
    ///
    /// Reads the binary file, derives the master key from the key
    /// string + stored salt (using stored Argon2 params), verifies the
    /// HMAC **over the original bytes from disk**, and only then
    /// decrypts and decodes the account collection.  A wrong key or a
    /// tampered file fails with `AuthenticationFailed`.
    pub fn open(path: &Path, vault_key: &[u8]) -> Result<Self> {
        let raw = format::read_vault(path)?;

        let params = Argon2Params {
            memory_kib: raw.header.argon2_params.memory_kib,
            iterations: raw.header.argon2_params.iterations,
            parallelism: raw.header.argon2_params.parallelism,
        };
        let mut master_bytes = derive_master_key(vault_key, &raw.header.salt, &params)?;
        let master_key = VaultKey::new(master_bytes);
        master_bytes.zeroize();

        // Verify the HMAC before any decryption.
        let mut hmac_key = master_key.derive_hmac_key()?;
        format::verify_hmac(&hmac_key, &raw.header_bytes, &raw.payload, &raw.stored_hmac)?;
        hmac_key.zeroize();

        // Decrypt and decode the account collection.
        let mut cipher_key = master_key.derive_cipher_key()?;
        let mut plaintext = decrypt(&cipher_key, &raw.payload)?;
        cipher_key.zeroize();

        let accounts = account::decode_all(&plaintext);
        plaintext.zeroize();

        Ok(Self {
            path: path.to_path_buf(),
            header: raw.header,
            accounts: accounts?,
            master_key,
        })
    }

    // ------------------------------------------------------------------
    // Account operations
    // ------------------------------------------------------------------

    /// Add a new account with the given details.
    ///
    /// Fails with `DuplicateTag` if the tag is already taken; the
    /// existing account is untouched.
    pub fn add_account(
        &mut self,
        tag: &str,
        username: &str,
        password: &str,
        note: Option<&str>,
    ) -> Result<()> {
        Self::validate_tag(tag)?;
        if self.exists(tag) {
            return Err(PassVaultError::DuplicateTag(tag.to_string()));
        }

        let mut account = Account::with_credentials(tag, username, password);
        if let Some(n) = note {
            account.note = n.to_string();
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Add a new account whose details are read from a source file.
    ///
    /// The file is read **before** anything is inserted, so a failed
    /// read (`SourceUnavailable`) leaves the vault byte-identical to
    /// before the call.
    pub fn add_from_source(&mut self, tag: &str, source_path: &Path) -> Result<()> {
        Self::validate_tag(tag)?;
        if self.exists(tag) {
            return Err(PassVaultError::DuplicateTag(tag.to_string()));
        }

        let source = read_account_source(source_path)?;

        self.accounts.push(Account {
            tag: tag.to_string(),
            username: source.username,
            password: source.password,
            note: source.note,
        });
        Ok(())
    }

    /// Overwrite exactly one detail field of an existing account.
    pub fn update_field(&mut self, tag: &str, field: AccountField, value: &str) -> Result<()> {
        let account = self.get_mut(tag)?;
        match field {
            AccountField::Username => account.username = value.to_string(),
            AccountField::Password => account.password = value.to_string(),
            AccountField::Note => account.note = value.to_string(),
        }
        Ok(())
    }

    /// Replace username, password, and note together from a source file.
    ///
    /// The file is read **before** the account is touched, so a failed
    /// read leaves the vault unmodified.  The account keeps its
    /// position in the collection.
    pub fn update_from_source(&mut self, tag: &str, source_path: &Path) -> Result<()> {
        if !self.exists(tag) {
            return Err(PassVaultError::AccountNotFound(tag.to_string()));
        }

        let source = read_account_source(source_path)?;

        let account = self.get_mut(tag)?;
        account.username = source.username;
        account.password = source.password;
        account.note = source.note;
        Ok(())
    }

    /// Remove an account from the vault.
    pub fn delete_account(&mut self, tag: &str) -> Result<()> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.tag == tag)
            .ok_or_else(|| PassVaultError::AccountNotFound(tag.to_string()))?;
        self.accounts.remove(index);
        Ok(())
    }

    /// Look up an account by tag.
    pub fn get(&self, tag: &str) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|a| a.tag == tag)
            .ok_or_else(|| PassVaultError::AccountNotFound(tag.to_string()))
    }

    /// List all tags, newest-added first.
    pub fn list_tags(&self) -> Vec<String> {
        self.accounts.iter().rev().map(|a| a.tag.clone()).collect()
    }

    /// All accounts, newest-added first (for `vault list --info`).
    pub fn accounts_newest_first(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().rev()
    }

    /// Returns `true` if an account with the given tag exists.
    pub fn exists(&self, tag: &str) -> bool {
        self.accounts.iter().any(|a| a.tag == tag)
    }

    /// Returns the number of accounts in the vault.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    // ------------------------------------------------------------------
    // Key rotation
    // ------------------------------------------------------------------

    /// Replace this vault's key in place.
    ///
    /// Generates a fresh salt, derives a new master key from
    /// `new_vault_key`, and re-encrypts the full account collection
    /// under it.  The accounts are never persisted without a key: the
    /// old blob stays on disk until the new one atomically replaces it.
    pub fn rotate_key(
        &mut self,
        new_vault_key: &[u8],
        argon2_params: Option<&Argon2Params>,
    ) -> Result<()> {
        let salt = generate_salt();
        let effective_params = argon2_params.copied().unwrap_or_default();

        let mut master_bytes = derive_master_key(new_vault_key, &salt, &effective_params)?;
        self.master_key = VaultKey::new(master_bytes);
        master_bytes.zeroize();

        self.header.salt = salt.to_vec();
        self.header.argon2_params = StoredArgon2Params {
            memory_kib: effective_params.memory_kib,
            iterations: effective_params.iterations,
            parallelism: effective_params.parallelism,
        };

        self.save()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the account collection and write it to disk atomically.
    ///
    /// Encodes every account into one plaintext buffer, encrypts it
    /// with a fresh random nonce, and writes the full binary envelope
    /// via temp-file + rename.  Either the new blob fully replaces the
    /// old one, or (on any failure) the old blob is left intact.
    pub fn save(&mut self) -> Result<()> {
        let mut plaintext = account::encode_all(&self.accounts);

        let mut cipher_key = self.master_key.derive_cipher_key()?;
        let payload = encrypt(&cipher_key, &plaintext);
        cipher_key.zeroize();
        plaintext.zeroize();
        let payload = payload?;

        let mut hmac_key = self.master_key.derive_hmac_key()?;
        let result = format::write_vault(&self.path, &self.header, &payload, &hmac_key);
        hmac_key.zeroize();

        result
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the vault creation timestamp.
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.header.created_at
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    fn get_mut(&mut self, tag: &str) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.tag == tag)
            .ok_or_else(|| PassVaultError::AccountNotFound(tag.to_string()))
    }

    /// Validate that a tag is usable as an account label.
    ///
    /// Tags are data, not file names, so any content is allowed; only
    /// emptiness and absurd length are rejected.
    pub(crate) fn validate_tag(tag: &str) -> Result<()> {
        if tag.is_empty() {
            return Err(PassVaultError::CommandFailed(
                "account tag cannot be empty".into(),
            ));
        }
        if tag.len() > 256 {
            return Err(PassVaultError::CommandFailed(
                "account tag cannot exceed 256 characters".into(),
            ));
        }
        Ok(())
    }
}
