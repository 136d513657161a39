//! Binary vault file format and HMAC integrity verification.
//!
//! A `.vault` file has this layout:
//!
//! ```text
//! [PVLT: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON][payload][HMAC-SHA256: 32 bytes]
//! ```
//!
//! - **Magic** (`PVLT`): identifies the file as a PassVault vault.
//! - **Version**: format version (currently `1`).
//! - **Header length**: little-endian u32 telling us where the header
//!   JSON ends and the encrypted payload begins.
//! - **Header JSON**: serialized `VaultHeader` (salt, KDF params).
//! - **Payload**: the AES-256-GCM blob (nonce || ciphertext) holding
//!   the entire encoded account collection.
//! - **HMAC-SHA256**: 32-byte tag computed over header + payload bytes
//!   with a key derived from the vault key, so a wrong key or a
//!   tampered file is rejected before decryption.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::errors::{PassVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
const MAGIC: &[u8; 4] = b"PVLT";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Size of the HMAC tag appended to the file (SHA-256 = 32 bytes).
const HMAC_LEN: usize = 32;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

// ---------------------------------------------------------------------------
// VaultHeader
// ---------------------------------------------------------------------------

/// Argon2 parameters stored in the vault header so the exact same
/// KDF settings are used when re-opening.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoredArgon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for StoredArgon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Metadata stored at the beginning of a vault file.
///
/// Nothing here is secret: the salt and KDF parameters are exactly the
/// values an attacker is assumed to know.  Account data never appears
/// in the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultHeader {
    /// Format version.
    pub version: u8,

    /// The salt used for Argon2id key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// When this vault was first created.
    pub created_at: DateTime<Utc>,

    /// Argon2 params used at vault creation (stored so open uses the same).
    pub argon2_params: StoredArgon2Params,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Write a vault file to disk **atomically**.
///
/// 1. Serialize the header to JSON.
/// 2. Compute HMAC over header + payload bytes.
/// 3. Write to a temp file in the same directory.
/// 4. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file: either
/// the new blob fully replaces the old one, or the old one survives.
pub fn write_vault(path: &Path, header: &VaultHeader, payload: &[u8], hmac_key: &[u8]) -> Result<()> {
    let header_bytes = serde_json::to_vec(header)
        .map_err(|e| PassVaultError::SerializationError(format!("header: {e}")))?;

    let hmac_tag = compute_hmac(hmac_key, &header_bytes, payload)?;

    let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
        PassVaultError::SerializationError(format!(
            "header length {} exceeds u32::MAX",
            header_bytes.len()
        ))
    })?;
    let total = PREFIX_LEN + header_bytes.len() + payload.len() + HMAC_LEN;
    let mut buf = Vec::with_capacity(total);

    buf.extend_from_slice(MAGIC); // 4 bytes
    buf.push(CURRENT_VERSION); // 1 byte
    buf.extend_from_slice(&header_len.to_le_bytes()); // 4 bytes LE
    buf.extend_from_slice(&header_bytes); // header JSON
    buf.extend_from_slice(payload); // encrypted blob
    buf.extend_from_slice(&hmac_tag); // 32 bytes

    // Atomic write: the temp file lives in the same directory so the
    // rename stays on one filesystem.
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &buf)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Raw data read from a vault file on disk.
///
/// Keeps the original bytes so the HMAC can be verified over the
/// exact bytes that were written — no re-serialization needed.
pub struct RawVault {
    pub header: VaultHeader,
    /// The raw header JSON bytes exactly as stored on disk.
    pub header_bytes: Vec<u8>,
    /// The encrypted payload (nonce || ciphertext).
    pub payload: Vec<u8>,
    /// The HMAC tag stored at the end of the file.
    pub stored_hmac: Vec<u8>,
}

/// Read a vault file from disk and return its parts **with raw bytes**.
///
/// The caller must verify the HMAC over `header_bytes` and `payload`
/// before trusting anything, and only then decrypt the payload.
pub fn read_vault(path: &Path) -> Result<RawVault> {
    if !path.exists() {
        return Err(PassVaultError::VaultNotFound(
            path.file_stem().unwrap_or_default().to_string_lossy().into_owned(),
        ));
    }

    let data = fs::read(path)?;

    let min_size = PREFIX_LEN + HMAC_LEN;
    if data.len() < min_size {
        return Err(PassVaultError::InvalidVaultFormat(
            "file too small to be a valid vault".into(),
        ));
    }

    // --- Parse the fixed-size prefix ---

    if &data[0..4] != MAGIC {
        return Err(PassVaultError::InvalidVaultFormat(
            "missing PVLT magic bytes".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(PassVaultError::InvalidVaultFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let header_len_u32 = u32::from_le_bytes(
        data[5..9]
            .try_into()
            .map_err(|_| PassVaultError::InvalidVaultFormat("bad header length".into()))?,
    );
    let header_len = usize::try_from(header_len_u32).map_err(|_| {
        PassVaultError::InvalidVaultFormat(format!(
            "header length {header_len_u32} exceeds platform address space"
        ))
    })?;

    let header_end = PREFIX_LEN + header_len;
    if header_end + HMAC_LEN > data.len() {
        return Err(PassVaultError::InvalidVaultFormat(
            "header length exceeds file size".into(),
        ));
    }

    // --- Extract the three variable-length sections as raw bytes ---

    let header_bytes = data[PREFIX_LEN..header_end].to_vec();
    let payload_end = data.len() - HMAC_LEN;
    let payload = data[header_end..payload_end].to_vec();
    let stored_hmac = data[payload_end..].to_vec();

    let header: VaultHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| PassVaultError::InvalidVaultFormat(format!("header JSON: {e}")))?;

    Ok(RawVault {
        header,
        header_bytes,
        payload,
        stored_hmac,
    })
}

/// Compute HMAC-SHA256 over header + payload bytes.
pub fn compute_hmac(hmac_key: &[u8], header_bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid HMAC key: {e}")))?;

    mac.update(header_bytes);
    mac.update(payload);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify that the HMAC matches using constant-time comparison.
///
/// A mismatch means either the presented vault key is wrong or the
/// file was modified; both surface as `AuthenticationFailed`.
pub fn verify_hmac(
    hmac_key: &[u8],
    header_bytes: &[u8],
    payload: &[u8],
    expected_hmac: &[u8],
) -> Result<()> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid HMAC key: {e}")))?;

    mac.update(header_bytes);
    mac.update(payload);

    mac.verify_slice(expected_hmac)
        .map_err(|_| PassVaultError::AuthenticationFailed)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
