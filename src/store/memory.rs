//! プロセス内のメッセージストア

use std::collections::HashMap;
use std::sync::{
    PoisonError,
    RwLock,
};

use super::{
    MessageReader,
    MessageWriter,
    Messages,
    StoreError,
    catalog_key,
};

/// Thread-safe in-memory message store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Catalog key → messages.
    catalogs: RwLock<HashMap<String, Messages>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one message.
    #[must_use]
    pub fn with_message(self, locale: &str, category: &str, id: &str, text: &str) -> Self {
        self.insert(locale, category, id, text);
        self
    }

    pub fn insert(&self, locale: &str, category: &str, id: &str, text: &str) {
        self.catalogs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(catalog_key(locale, category))
            .or_default()
            .insert(id.to_string(), text.to_string());
    }
}

impl MessageReader for InMemoryStore {
    fn fetch_all(&self, key: &str) -> Result<Messages, StoreError> {
        let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(catalogs.get(key).cloned().unwrap_or_default())
    }
}

impl MessageWriter for InMemoryStore {
    fn write(&self, key: &str, messages: &Messages) -> Result<(), StoreError> {
        super::split_key(key)?;
        self.catalogs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), messages.clone());
        Ok(())
    }
}
