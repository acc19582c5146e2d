//! ロケールとカテゴリごとのメッセージテーブルのキャッシュ

use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
    RwLock,
};

use crate::locale::LocaleTag;
use crate::store::{
    MessageReader,
    Messages,
    StoreError,
    catalog_key,
};

/// Lazily populated cache of whole message tables.
///
/// Each `(locale, category)` pair is fetched from the store at most once;
/// empty tables are cached too, so a locale without messages is not queried
/// again. Failed fetches are not cached.
///
/// A fetch holds only the lock of its own key, so callers racing on the same
/// key wait for one fetch while lookups of other keys proceed.
pub struct TranslationCache {
    /// Backing store.
    store: Arc<dyn MessageReader>,
    /// Catalog key → table.
    entries: RwLock<HashMap<String, Arc<Messages>>>,
    /// Catalog key → lock held while that key is being fetched.
    fetching: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TranslationCache {
    #[must_use]
    pub fn new(store: Arc<dyn MessageReader>) -> Self {
        Self {
            store,
            entries: RwLock::new(HashMap::new()),
            fetching: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the table for `locale` and `category`, fetching it on first use.
    pub fn lookup(&self, locale: &LocaleTag, category: &str) -> Result<Arc<Messages>, StoreError> {
        let key = catalog_key(&locale.as_string(), category);

        if let Some(messages) = self.cached(&key) {
            return Ok(messages);
        }

        let slot = Arc::clone(
            self.fetching
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key.clone())
                .or_default(),
        );
        let _fetch_guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(messages) = self.cached(&key) {
            return Ok(messages);
        }

        tracing::debug!("Fetching messages for {}", key);
        let fetched = self.store.fetch_all(&key);
        let result = fetched.map(|messages| {
            let messages = Arc::new(messages);
            tracing::debug!("Cached {} messages for {}", messages.len(), key);
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.clone(), Arc::clone(&messages));
            messages
        });

        self.fetching.lock().unwrap_or_else(PoisonError::into_inner).remove(&key);
        result
    }

    /// Cached table for `key`, if any.
    fn cached(&self, key: &str) -> Option<Arc<Messages>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).get(key).map(Arc::clone)
    }

    /// Drops one entry so the next lookup refetches it.
    pub fn invalidate(&self, locale: &LocaleTag, category: &str) -> bool {
        let key = catalog_key(&locale.as_string(), category);
        self.entries.write().unwrap_or_else(PoisonError::into_inner).remove(&key).is_some()
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("store", &"<dyn MessageReader>")
            .field("entries", &self.len())
            .finish()
    }
}
