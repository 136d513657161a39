//! Bounded clipboard writes.
//!
//! OS clipboard integration has been observed to hang indefinitely on
//! some desktops (a blocked selection owner, a dead clipboard manager).
//! The write therefore runs on a worker thread while the caller waits
//! on a channel with a deadline: a stuck clipboard surfaces as
//! `ClipboardTimeout` instead of a hung process.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::errors::{PassVaultError, Result};

/// Default deadline for a clipboard write, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Copy `text` to the OS clipboard, waiting at most `timeout_ms`.
pub fn copy_to_clipboard(text: &str, timeout_ms: u64) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let payload = text.to_string();

    // The worker is detached on timeout; it holds no vault state
    // beyond the copied string.
    thread::spawn(move || {
        let outcome = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(payload))
            .map_err(|e| e.to_string());
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(Duration::from_millis(timeout_ms)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(PassVaultError::ClipboardError(e)),
        Err(_) => Err(PassVaultError::ClipboardTimeout(timeout_ms)),
    }
}
