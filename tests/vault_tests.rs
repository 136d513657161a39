//! Integration tests for the PassVault vault store.

use std::collections::HashSet;
use std::fs;

use passvault::crypto::Argon2Params;
use passvault::vault::{AccountField, VaultStore};
use tempfile::TempDir;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.vault");
    (dir, path)
}

// Smallest parameters the KDF floor allows, to keep tests quick.
fn fast_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

fn create(path: &std::path::Path, key: &[u8]) -> VaultStore {
    VaultStore::create(path, key, Some(&fast_params())).expect("create vault")
}

// ---------------------------------------------------------------------------
// Create and re-open round-trip
// ---------------------------------------------------------------------------

#[test]
fn create_vault_and_reopen() {
    let (_dir, path) = vault_path();
    let key = b"test-key";

    let mut store = create(&path, key);
    store
        .add_account("gmail", "alice", "hunter2", Some("personal mail"))
        .unwrap();
    store.save().unwrap();

    // Re-open with the same key — should succeed.
    let store2 = VaultStore::open(&path, key).expect("open vault");
    assert_eq!(store2.account_count(), 1);

    let account = store2.get("gmail").unwrap();
    assert_eq!(account.username, "alice");
    assert_eq!(account.password, "hunter2");
    assert_eq!(account.note, "personal mail");
}

#[test]
fn multiline_note_survives_persistence() {
    let (_dir, path) = vault_path();
    let key = b"note-key";

    let mut store = create(&path, key);
    store
        .add_account("bank", "bob", "pw", Some("line one\nline two\n\nline four"))
        .unwrap();
    store.save().unwrap();

    let store2 = VaultStore::open(&path, key).unwrap();
    assert_eq!(store2.get("bank").unwrap().note, "line one\nline two\n\nline four");
}

// ---------------------------------------------------------------------------
// Tag uniqueness
// ---------------------------------------------------------------------------

#[test]
fn duplicate_tag_rejected_and_original_untouched() {
    let (_dir, path) = vault_path();
    let mut store = create(&path, b"dup-key");

    store.add_account("site", "first-user", "first-pw", None).unwrap();

    let result = store.add_account("site", "second-user", "second-pw", None);
    assert!(result.is_err(), "duplicate tag must be rejected");

    // The original account is untouched.
    let account = store.get("site").unwrap();
    assert_eq!(account.username, "first-user");
    assert_eq!(account.password, "first-pw");
    assert_eq!(store.account_count(), 1);
}

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

#[test]
fn update_field_changes_only_that_field() {
    let (_dir, path) = vault_path();
    let mut store = create(&path, b"upd-key");
    store.add_account("a1", "u1", "p1", Some("n1")).unwrap();

    store.update_field("a1", AccountField::Note, "n2").unwrap();

    let account = store.get("a1").unwrap();
    assert_eq!(account.username, "u1");
    assert_eq!(account.password, "p1");
    assert_eq!(account.note, "n2");
}

#[test]
fn update_missing_tag_fails() {
    let (_dir, path) = vault_path();
    let mut store = create(&path, b"upd-key");

    let result = store.update_field("ghost", AccountField::Username, "u");
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Source-file operations are all-or-nothing
// ---------------------------------------------------------------------------

#[test]
fn add_from_source_reads_file() {
    let (dir, path) = vault_path();
    let source = dir.path().join("account.txt");
    fs::write(&source, "carol\ns3cret\nnote line 1\nnote line 2\n").unwrap();

    let mut store = create(&path, b"src-key");
    store.add_from_source("imported", &source).unwrap();

    let account = store.get("imported").unwrap();
    assert_eq!(account.username, "carol");
    assert_eq!(account.password, "s3cret");
    assert_eq!(account.note, "note line 1\nnote line 2");
}

#[test]
fn failed_add_from_source_leaves_vault_unmodified() {
    let (dir, path) = vault_path();
    let mut store = create(&path, b"src-key");
    store.add_account("existing", "u", "p", None).unwrap();

    let before = store.list_tags();
    let result = store.add_from_source("new", &dir.path().join("missing.txt"));

    assert!(result.is_err());
    assert_eq!(store.list_tags(), before, "a failed add must not touch the vault");
    assert!(!store.exists("new"));
}

#[test]
fn failed_update_from_source_leaves_account_unmodified() {
    let (dir, path) = vault_path();
    let mut store = create(&path, b"src-key");
    store.add_account("acct", "u", "p", Some("n")).unwrap();

    let result = store.update_from_source("acct", &dir.path().join("missing.txt"));
    assert!(result.is_err());

    let account = store.get("acct").unwrap();
    assert_eq!(account.username, "u");
    assert_eq!(account.password, "p");
    assert_eq!(account.note, "n");
}

#[test]
fn update_from_source_replaces_all_details() {
    let (dir, path) = vault_path();
    let source = dir.path().join("new.txt");
    fs::write(&source, "new-user\nnew-pw\nnew note\n").unwrap();

    let mut store = create(&path, b"src-key");
    store.add_account("acct", "old-user", "old-pw", Some("old note")).unwrap();
    store.update_from_source("acct", &source).unwrap();

    let account = store.get("acct").unwrap();
    assert_eq!(account.username, "new-user");
    assert_eq!(account.password, "new-pw");
    assert_eq!(account.note, "new note");
}

// ---------------------------------------------------------------------------
// Delete and list
// ---------------------------------------------------------------------------

#[test]
fn delete_account_removes_it() {
    let (_dir, path) = vault_path();
    let mut store = create(&path, b"del-key");
    store.add_account("gone", "u", "p", None).unwrap();
    store.add_account("kept", "u", "p", None).unwrap();

    store.delete_account("gone").unwrap();
    assert_eq!(store.account_count(), 1);
    assert!(store.get("gone").is_err());
    assert!(store.delete_account("gone").is_err());
    assert!(store.get("kept").is_ok());
}

#[test]
fn list_tags_is_newest_first() {
    let (_dir, path) = vault_path();
    let mut store = create(&path, b"list-key");
    store.add_account("first", "u", "p", None).unwrap();
    store.add_account("second", "u", "p", None).unwrap();
    store.add_account("third", "u", "p", None).unwrap();

    assert_eq!(store.list_tags(), vec!["third", "second", "first"]);
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[test]
fn wrong_key_fails_to_open() {
    let (_dir, path) = vault_path();

    let mut store = create(&path, b"correct-key");
    store.add_account("a", "u", "p", None).unwrap();
    store.save().unwrap();

    let result = VaultStore::open(&path, b"wrong-key");
    assert!(result.is_err(), "wrong key must fail to open vault");
}

#[test]
fn tampered_file_detected() {
    let (_dir, path) = vault_path();

    let mut store = create(&path, b"tamper-key");
    store.add_account("a", "u", "p", None).unwrap();
    store.save().unwrap();

    // Flip a byte in the middle of the file (payload region).
    let mut data = fs::read(&path).expect("read vault file");
    let mid = data.len() / 2;
    data[mid] ^= 0xFF;
    fs::write(&path, &data).expect("write tampered file");

    let result = VaultStore::open(&path, b"tamper-key");
    assert!(result.is_err(), "tampered vault must be rejected");
}

#[test]
fn create_vault_twice_fails() {
    let (_dir, path) = vault_path();
    create(&path, b"dup-key");

    let result = VaultStore::create(&path, b"dup-key", Some(&fast_params()));
    assert!(result.is_err(), "creating vault twice must fail");
}

#[test]
fn open_nonexistent_vault_fails() {
    let (_dir, path) = vault_path();
    let result = VaultStore::open(&path, b"any-key");
    assert!(result.is_err(), "opening nonexistent vault must fail");
}

// ---------------------------------------------------------------------------
// Key rotation
// ---------------------------------------------------------------------------

#[test]
fn rotate_key_reencrypts_under_new_key() {
    let (_dir, path) = vault_path();

    let mut store = create(&path, b"old-key");
    store.add_account("a1", "u1", "p1", None).unwrap();
    store.save().unwrap();

    store.rotate_key(b"new-key", Some(&fast_params())).unwrap();

    // Old key no longer works; new key sees the same accounts.
    assert!(VaultStore::open(&path, b"old-key").is_err());
    let reopened = VaultStore::open(&path, b"new-key").unwrap();
    assert_eq!(reopened.list_tags(), vec!["a1"]);
    assert_eq!(reopened.get("a1").unwrap().username, "u1");
}

// ---------------------------------------------------------------------------
// Semantic security of the persisted blob
// ---------------------------------------------------------------------------

/// True if `haystack` contains `needle` as a contiguous byte substring.
fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn repeated_reencryption_never_repeats_or_leaks() {
    let (_dir, path) = vault_path();
    let key = b"crypto-key";

    let tag = "fixed-tag";
    let username = "fixed-username";
    let password = "fixed-password";
    let note = "fixed multi\nline note";

    let mut store = create(&path, key);
    store.add_account(tag, username, password, Some(note)).unwrap();
    store.save().unwrap();

    // Delete/re-add the identical account 100 times, capturing the
    // persisted file after every cycle.
    let mut snapshots: Vec<Vec<u8>> = Vec::with_capacity(100);
    for _ in 0..100 {
        store.delete_account(tag).unwrap();
        store.save().unwrap();
        store.add_account(tag, username, password, Some(note)).unwrap();
        store.save().unwrap();
        snapshots.push(fs::read(&path).unwrap());
    }

    // All 100 ciphertexts are pairwise distinct.
    let distinct: HashSet<&Vec<u8>> = snapshots.iter().collect();
    assert_eq!(distinct.len(), 100, "ciphertexts must be pairwise distinct");

    // None of them contains any plaintext field as a substring.
    for snapshot in &snapshots {
        for plaintext in [tag.as_bytes(), username.as_bytes(), password.as_bytes(), note.as_bytes()]
        {
            assert!(
                !contains_subslice(snapshot, plaintext),
                "persisted vault must never contain plaintext field bytes"
            );
        }
    }
}
