use std::sync::Arc;

use super::store::{KeyValueStore, StoreError};

/// Storage key of the user's target rate
pub const CLIENT_RATE_KEY: &str = "clientRate";

/// The user's target rate, stored as entered (decimal comma)
#[derive(Clone)]
pub struct ClientRateStore {
    store: Arc<dyn KeyValueStore>,
}

impl ClientRateStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<Option<String>, StoreError> {
        self.store.get(CLIENT_RATE_KEY)
    }

    /// Store `rate`; `None` removes the stored value
    pub fn set(&self, rate: Option<&str>) -> Result<(), StoreError> {
        match rate {
            Some(rate) => self.store.set(CLIENT_RATE_KEY, rate),
            None => self.clear(),
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(CLIENT_RATE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{JsonFileStore, MemoryStore};

    #[test]
    fn test_set_get_clear() {
        let rates = ClientRateStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(rates.get().expect("get"), None);

        rates.set(Some("80,0000")).expect("set");
        assert_eq!(rates.get().expect("get").as_deref(), Some("80,0000"));

        rates.set(None).expect("unset");
        assert_eq!(rates.get().expect("get"), None);

        rates.set(Some("71,2345")).expect("set");
        rates.clear().expect("clear");
        assert_eq!(rates.get().expect("get"), None);
    }

    #[test]
    fn test_uses_client_rate_key() {
        let store = Arc::new(MemoryStore::new());
        let rates = ClientRateStore::new(store.clone());

        rates.set(Some("75,1234")).expect("set");

        assert_eq!(store.get(CLIENT_RATE_KEY).expect("get").as_deref(), Some("75,1234"));
    }

    #[test]
    fn test_persists_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dollar_rate.json");

        let store = JsonFileStore::open(&path).expect("open");
        ClientRateStore::new(Arc::new(store)).set(Some("80,0000")).expect("set");

        let reopened = JsonFileStore::open(&path).expect("reopen");
        let rates = ClientRateStore::new(Arc::new(reopened));
        assert_eq!(rates.get().expect("get").as_deref(), Some("80,0000"));
    }
}
