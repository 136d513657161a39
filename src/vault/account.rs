//! Account records and their binary codec.
//!
//! An account is serialized as four length-delimited fields:
//!
//! ```text
//! [tag_len: u32 LE][tag][un_len: u32 LE][username][pw_len: u32 LE][password][note_len: u32 LE][note]
//! ```
//!
//! Length prefixes rather than separators, so a note can contain any
//! byte sequence — embedded newlines included — and still round-trip
//! exactly.  The encoded stream is always encrypted before it touches
//! disk; this layer never sees ciphertext.

use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// A single credential record, keyed by its tag within a vault.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct Account {
    /// Unique label within the vault (non-empty).
    pub tag: String,
    pub username: String,
    pub password: String,
    pub note: String,
}

/// Which detail field of an account an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Username,
    Password,
    Note,
}

impl Account {
    /// Create an account with the given tag and empty details.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            username: String::new(),
            password: String::new(),
            note: String::new(),
        }
    }

    /// Create an account with the given tag, username, and password.
    pub fn with_credentials(tag: &str, username: &str, password: &str) -> Self {
        Self {
            tag: tag.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            note: String::new(),
        }
    }

    /// Append this account's binary encoding to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        for field in [&self.tag, &self.username, &self.password, &self.note] {
            let len = field.len() as u32;
            buf.extend_from_slice(&len.to_le_bytes());
            buf.extend_from_slice(field.as_bytes());
        }
    }

    /// Decode one account from the front of `input`.
    ///
    /// Returns the account and the number of bytes consumed.  Fails
    /// with `InvalidVaultFormat` on truncation or non-UTF-8 content.
    pub fn decode(input: &[u8]) -> Result<(Self, usize)> {
        let mut offset = 0usize;
        let mut fields: [String; 4] = Default::default();

        for slot in fields.iter_mut() {
            let len_bytes: [u8; 4] = input
                .get(offset..offset + 4)
                .and_then(|b| b.try_into().ok())
                .ok_or_else(|| {
                    PassVaultError::InvalidVaultFormat("truncated field length".into())
                })?;
            offset += 4;

            let len = u32::from_le_bytes(len_bytes) as usize;
            let bytes = input.get(offset..offset + len).ok_or_else(|| {
                PassVaultError::InvalidVaultFormat("field length exceeds record data".into())
            })?;
            offset += len;

            *slot = String::from_utf8(bytes.to_vec()).map_err(|_| {
                PassVaultError::InvalidVaultFormat("account field is not valid UTF-8".into())
            })?;
        }

        let [tag, username, password, note] = fields;
        Ok((
            Self {
                tag,
                username,
                password,
                note,
            },
            offset,
        ))
    }
}

/// Encode a whole account collection into one plaintext buffer.
///
/// The caller is responsible for encrypting the result and zeroizing
/// it afterwards.
pub fn encode_all(accounts: &[Account]) -> Vec<u8> {
    let mut buf = Vec::new();
    for account in accounts {
        account.encode(&mut buf);
    }
    buf
}

/// Decode a full plaintext buffer back into accounts, in stored order.
pub fn decode_all(mut input: &[u8]) -> Result<Vec<Account>> {
    let mut accounts = Vec::new();
    while !input.is_empty() {
        let (account, consumed) = Account::decode(input)?;
        accounts.push(account);
        input = &input[consumed..];
    }
    Ok(accounts)
}
