//! Integration tests for the PassVault crypto module.

use passvault::crypto::keys::{derive_cipher_key, derive_hmac_key, VaultKey};
use passvault::crypto::{decrypt, derive_master_key, encrypt, generate_salt, Argon2Params};

// Smallest parameters the KDF floor allows, to keep tests quick.
fn fast_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"gmail\x00alice\x00hunter2";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"identical account data";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(
        ct1, ct2,
        "two encryptions of the same plaintext must differ"
    );
}

#[test]
fn ciphertext_never_contains_plaintext_substring() {
    let key = [0x42u8; 32];
    let plaintext = b"super-secret-password";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt");
    assert!(
        !ciphertext
            .windows(plaintext.len())
            .any(|w| w == plaintext.as_slice()),
        "ciphertext must not contain the plaintext as a substring"
    );
}

#[test]
fn encrypt_empty_plaintext_roundtrips() {
    // A freshly created vault has zero accounts; its payload is the
    // encryption of an empty buffer.
    let key = [0x10u8; 32];
    let ciphertext = encrypt(&key, b"").expect("encrypt empty");
    let recovered = decrypt(&key, &ciphertext).expect("decrypt empty");
    assert!(recovered.is_empty());
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];
    let plaintext = b"vault contents";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt");
    let result = decrypt(&wrong_key, &ciphertext);

    assert!(result.is_err(), "decryption with the wrong key must fail");
}

#[test]
fn decrypt_with_truncated_data_fails() {
    // Anything shorter than 12 bytes (nonce length) should fail.
    let key = [0xAAu8; 32];
    let result = decrypt(&key, &[0u8; 5]);
    assert!(result.is_err(), "truncated ciphertext must fail");
}

#[test]
fn decrypt_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; 32];
    let plaintext = b"account blob";

    let mut ciphertext = encrypt(&key, plaintext).expect("encrypt");
    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = ciphertext.get_mut(15) {
        *byte ^= 0xFF;
    }

    let result = decrypt(&key, &ciphertext);
    assert!(result.is_err(), "corrupted ciphertext must fail auth check");
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_master_key_same_inputs_same_output() {
    let vault_key = b"my-secure-passphrase";
    let salt = generate_salt();

    let key1 = derive_master_key(vault_key, &salt, &fast_params()).expect("derive 1");
    let key2 = derive_master_key(vault_key, &salt, &fast_params()).expect("derive 2");

    assert_eq!(key1, key2, "same key string + salt must produce the same key");
}

#[test]
fn derive_master_key_different_salts_different_keys() {
    let vault_key = b"same-key-string";
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_master_key(vault_key, &salt1, &fast_params()).expect("derive 1");
    let key2 = derive_master_key(vault_key, &salt2, &fast_params()).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_master_key_different_key_strings_different_keys() {
    let salt = generate_salt();

    let key1 = derive_master_key(b"key-one", &salt, &fast_params()).expect("derive 1");
    let key2 = derive_master_key(b"key-two", &salt, &fast_params()).expect("derive 2");

    assert_ne!(
        key1, key2,
        "different key strings must produce different keys"
    );
}

#[test]
fn derive_master_key_rejects_weak_params() {
    let salt = generate_salt();
    let weak = Argon2Params {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };

    assert!(derive_master_key(b"pw", &salt, &weak).is_err());
}

// ---------------------------------------------------------------------------
// HKDF sub-key derivation
// ---------------------------------------------------------------------------

#[test]
fn cipher_and_hmac_keys_differ() {
    let master = [0x55u8; 32];

    let cipher_key = derive_cipher_key(&master).expect("cipher key");
    let hmac_key = derive_hmac_key(&master).expect("hmac key");

    assert_ne!(
        cipher_key, hmac_key,
        "cipher key and HMAC key must be independent"
    );
}

#[test]
fn sub_key_derivation_is_deterministic() {
    let master = [0x77u8; 32];

    assert_eq!(
        derive_cipher_key(&master).unwrap(),
        derive_cipher_key(&master).unwrap()
    );
    assert_eq!(
        derive_hmac_key(&master).unwrap(),
        derive_hmac_key(&master).unwrap()
    );
}

// ---------------------------------------------------------------------------
// VaultKey wrapper
// ---------------------------------------------------------------------------

#[test]
fn vault_key_wrapper_derives_keys() {
    let raw = [0x44u8; 32];
    let vk = VaultKey::new(raw);

    // Derive through the wrapper and through the free functions — must match.
    let cipher_wrapper = vk.derive_cipher_key().expect("wrapper cipher");
    let cipher_fn = derive_cipher_key(&raw).expect("fn cipher");
    assert_eq!(cipher_wrapper, cipher_fn);

    let hmac_wrapper = vk.derive_hmac_key().expect("wrapper hmac");
    let hmac_fn = derive_hmac_key(&raw).expect("fn hmac");
    assert_eq!(hmac_wrapper, hmac_fn);
}

// ---------------------------------------------------------------------------
// End-to-end: key string -> master key -> cipher key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let vault_key = b"hunter2";
    let salt = generate_salt();

    let master_bytes = derive_master_key(vault_key, &salt, &fast_params()).expect("derive master");
    let master = VaultKey::new(master_bytes);

    let cipher_key = master.derive_cipher_key().expect("derive cipher key");

    let plaintext = b"encoded account collection";
    let ciphertext = encrypt(&cipher_key, plaintext).expect("encrypt");

    let recovered = decrypt(&cipher_key, &ciphertext).expect("decrypt");
    assert_eq!(recovered, plaintext.to_vec());
}
