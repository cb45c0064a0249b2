use std::path::Path;
use std::sync::Arc;

use tracing::warn;

pub mod client_rate;
pub mod store;

pub use client_rate::ClientRateStore;
#[cfg(test)]
pub use store::MemoryStore;
pub use store::{JsonFileStore, KeyValueStore, StoreError};

/// Open the durable settings store backing the screen
///
/// An unreadable or corrupt file is logged and replaced by an empty store at
/// the same path; the next successful write overwrites it.
pub fn init_store(path: impl AsRef<Path>) -> Arc<dyn KeyValueStore> {
    let path = path.as_ref();
    match JsonFileStore::open(path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Ignoring unreadable settings store {}: {}", path.display(), e);
            Arc::new(JsonFileStore::empty(path))
        }
    }
}
