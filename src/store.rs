//! メッセージストア
//!
//! リゾルバは [`MessageReader`] 経由でのみ読み込む。[`MessageWriter`] はカタログを
//! 管理するツール向け。

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

/// JSON files on disk
mod json;
/// Process-local map
mod memory;

pub use json::{
    JsonCatalogStore,
    flatten_json,
};
pub use memory::InMemoryStore;

/// Message id to text, for one locale and category.
pub type Messages = HashMap<String, String>;

/// Separator between locale and category in a catalog key.
pub const KEY_SEPARATOR: char = '/';

/// Builds the composite `<locale>/<category>` key passed to stores.
#[must_use]
pub fn catalog_key(locale: &str, category: &str) -> String {
    format!("{locale}{KEY_SEPARATOR}{category}")
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access message file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse message file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },
}

/// Read side of a message store.
pub trait MessageReader: Send + Sync {
    /// Returns every message stored under `key` (see [`catalog_key`]).
    ///
    /// An empty map is a valid answer meaning "no messages here".
    fn fetch_all(&self, key: &str) -> Result<Messages, StoreError>;
}

/// Write side of a message store.
pub trait MessageWriter: Send + Sync {
    /// Replaces every message stored under `key`.
    fn write(&self, key: &str, messages: &Messages) -> Result<(), StoreError>;
}

/// Splits a catalog key into locale and category.
///
/// Canonical locale tags never contain [`KEY_SEPARATOR`], so the first one
/// ends the locale and the category may hold further separators.
pub(crate) fn split_key(key: &str) -> Result<(&str, &str), StoreError> {
    match key.split_once(KEY_SEPARATOR) {
        Some((locale, category)) if !locale.is_empty() && !category.is_empty() => {
            Ok((locale, category))
        }
        _ => Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "expected '<locale>/<category>'",
        }),
    }
}
