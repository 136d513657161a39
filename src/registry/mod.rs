//! Vault registry — the process-wide set of vaults and the active pointer.
//!
//! The registry owns a data directory with this layout:
//!
//! ```text
//! <data_dir>/registry.json     — vault records + name of the active vault
//! <data_dir>/vaults/<name>.vault — one encrypted blob per vault
//! ```
//!
//! `registry.json` holds no secrets: vault names, creation times, and
//! the active pointer only.  Authentication always goes through the
//! vault blob itself (HMAC + AEAD), never through stored key material.
//! The metadata file is written with the same temp-file + rename
//! discipline as the vault blobs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::Argon2Params;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultStore;

/// File name of the registry metadata inside the data directory.
const REGISTRY_FILE: &str = "registry.json";

/// Subdirectory holding the encrypted vault blobs.
const VAULTS_DIR: &str = "vaults";

/// One vault's metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The persisted shape of `registry.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RegistryState {
    /// Vault records in creation order (oldest first).
    vaults: Vec<VaultRecord>,
    /// Name of the active vault, if any.
    active: Option<String>,
}

/// Handle to the vault registry rooted at one data directory.
pub struct VaultRegistry {
    data_dir: PathBuf,
    state: RegistryState,
}

impl VaultRegistry {
    // ------------------------------------------------------------------
    // Construction and persistence
    // ------------------------------------------------------------------

    /// Load the registry from `data_dir`, lazily creating the directory
    /// tree and an empty metadata file on first use.
    pub fn load(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir.join(VAULTS_DIR))?;

        let path = data_dir.join(REGISTRY_FILE);
        let state = if path.exists() {
            let bytes = fs::read(&path)?;
            serde_json::from_slice(&bytes)
                .map_err(|e| PassVaultError::SerializationError(format!("registry: {e}")))?
        } else {
            RegistryState::default()
        };

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            state,
        })
    }

    /// Write the metadata file atomically (temp file + rename).
    fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.state)
            .map_err(|e| PassVaultError::SerializationError(format!("registry: {e}")))?;

        let path = self.data_dir.join(REGISTRY_FILE);
        let tmp_path = self.data_dir.join(format!(".{REGISTRY_FILE}.tmp"));
        fs::write(&tmp_path, &bytes)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Path of the encrypted blob for a vault name.
    pub fn vault_blob_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(VAULTS_DIR).join(format!("{name}.vault"))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns `true` if no vault has been created yet.
    pub fn is_empty(&self) -> bool {
        self.state.vaults.is_empty()
    }

    /// Name of the active vault, if one is set.
    pub fn active_name(&self) -> Option<&str> {
        self.state.active.as_deref()
    }

    fn contains(&self, name: &str) -> bool {
        self.state.vaults.iter().any(|v| v.name == name)
    }

    /// List vault names: the active vault first, then the rest
    /// most-recently-added first.
    pub fn list_vaults(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .vaults
            .iter()
            .rev()
            .map(|v| v.name.clone())
            .filter(|n| Some(n.as_str()) != self.state.active.as_deref())
            .collect();

        if let Some(active) = &self.state.active {
            names.insert(0, active.clone());
        }
        names
    }

    // ------------------------------------------------------------------
    // Vault lifecycle
    // ------------------------------------------------------------------

    /// Create a new empty vault keyed by `vault_key`.
    ///
    /// Fails with `VaultAlreadyExists` if the name is taken.  The
    /// first vault ever created becomes active; otherwise the active
    /// pointer is untouched.
    pub fn add_vault(
        &mut self,
        name: &str,
        vault_key: &[u8],
        argon2_params: Option<&Argon2Params>,
    ) -> Result<()> {
        if self.contains(name) {
            return Err(PassVaultError::VaultAlreadyExists(name.to_string()));
        }

        // A blob with no registry record is an orphan from an
        // interrupted delete; the registry is authoritative, so the
        // stale blob is replaced.
        let blob = self.vault_blob_path(name);
        if blob.exists() {
            fs::remove_file(&blob)?;
        }

        let store = VaultStore::create(&blob, vault_key, argon2_params)?;

        self.state.vaults.push(VaultRecord {
            name: name.to_string(),
            created_at: store.created_at(),
        });
        if self.state.active.is_none() {
            self.state.active = Some(name.to_string());
        }
        self.save()
    }

    /// Make `name` the active vault after authenticating `vault_key`
    /// against its blob.
    ///
    /// Switching to the already-active vault with the correct key is a
    /// successful no-op.  On a wrong key the active vault is unchanged.
    /// Any in-memory state of the previous active vault is simply
    /// dropped; whatever was last persisted stays as written.
    pub fn switch(&mut self, name: &str, vault_key: &[u8]) -> Result<()> {
        if !self.contains(name) {
            return Err(PassVaultError::VaultNotFound(name.to_string()));
        }

        // Authentication is the ability to open the blob.
        VaultStore::open(&self.vault_blob_path(name), vault_key)?;

        self.state.active = Some(name.to_string());
        self.save()
    }

    /// Rotate the active vault's key from `old_key` to `new_key`.
    ///
    /// Decrypts all accounts under the old key and re-encrypts them
    /// under the new one, atomically replacing the stored blob.
    pub fn update_key(
        &mut self,
        old_key: &[u8],
        new_key: &[u8],
        argon2_params: Option<&Argon2Params>,
    ) -> Result<()> {
        let active = self
            .state
            .active
            .clone()
            .ok_or(PassVaultError::NoActiveVault)?;

        let mut store = VaultStore::open(&self.vault_blob_path(&active), old_key)?;
        store.rotate_key(new_key, argon2_params)
    }

    /// Delete a vault irreversibly.
    ///
    /// The active vault can never be deleted; this is checked before
    /// authentication so the error is stable regardless of the key.
    pub fn delete_vault(&mut self, name: &str, vault_key: &[u8]) -> Result<()> {
        if Some(name) == self.state.active.as_deref() {
            return Err(PassVaultError::CannotDeleteActive(name.to_string()));
        }
        if !self.contains(name) {
            return Err(PassVaultError::VaultNotFound(name.to_string()));
        }

        // Proof of key ownership before destroying data.
        VaultStore::open(&self.vault_blob_path(name), vault_key)?;

        self.state.vaults.retain(|v| v.name != name);
        self.save()?;
        // If this removal fails the blob is left orphaned; `add_vault`
        // replaces orphans, so the name stays reusable.
        fs::remove_file(self.vault_blob_path(name))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Active-vault resolution
    // ------------------------------------------------------------------

    /// Open the active vault, authenticating `vault_key` against it.
    ///
    /// Account operations always target the active vault; a key is
    /// never used to search across vaults, since that would turn key
    /// lookup into a brute-force oracle.
    pub fn open_active(&self, vault_key: &[u8]) -> Result<VaultStore> {
        let active = self.state.active.as_deref().ok_or(PassVaultError::NoActiveVault)?;
        VaultStore::open(&self.vault_blob_path(active), vault_key)
    }
}
