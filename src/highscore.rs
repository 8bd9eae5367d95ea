//! Best-score persistence
//!
//! Persisted to LocalStorage as a small JSON envelope. Strictly best-effort:
//! absent or corrupt storage reads as 0 and write failures are swallowed.
//! The simulation never calls this module; the host loads once at startup
//! and saves on a `GameOver` event that reports a new high score.

use serde::{Deserialize, Serialize};

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "logo_runner_hiscore";

/// Stored envelope; a malformed or negative value fails the parse
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredScore {
    best: u64,
}

/// Load the persisted best score, 0 if absent or unreadable (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u64 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage
        && let Ok(Some(json)) = storage.get_item(STORAGE_KEY)
        && let Ok(stored) = serde_json::from_str::<StoredScore>(&json)
    {
        log::info!("loaded best score {}", stored.best);
        return stored.best;
    }

    log::info!("no stored best score, starting at 0");
    0
}

/// Persist the best score; failures are ignored (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(best: u64) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage
        && let Ok(json) = serde_json::to_string(&StoredScore { best })
    {
        let _ = storage.set_item(STORAGE_KEY, &json);
        log::info!("saved best score {best}");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_best: u64) {
    // No-op for native
}
