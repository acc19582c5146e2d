//! JSON ファイルに保存されたメッセージカタログ

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use serde_json::Value;

use super::{
    MessageReader,
    MessageWriter,
    Messages,
    StoreError,
    split_key,
};

/// Reads `<root>/<locale>/<category>.json`.
///
/// Nested objects are flattened into `separator`-joined ids, so
/// `{"errors": {"notFound": "Not found"}}` yields the id `errors.notFound`.
/// A missing file is an empty catalog.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    /// Directory holding one sub-directory per locale.
    root: PathBuf,
    /// Joins nested keys into message ids.
    separator: String,
}

impl JsonCatalogStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, separator: impl Into<String>) -> Self {
        Self { root: root.into(), separator: separator.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a catalog key to its file, refusing paths that leave `root`.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let (locale, category) = split_key(key)?;
        let invalid = |reason| StoreError::InvalidKey { key: key.to_string(), reason };

        if locale.contains(['/', '\\']) || locale == "." || locale == ".." {
            return Err(invalid("locale must be a single path component"));
        }
        let category_path = Path::new(category);
        let escapes = category_path
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if escapes {
            return Err(invalid("category must be a relative path without '..'"));
        }

        let mut path = self.root.join(locale).join(category_path);
        path.set_extension("json");
        Ok(path)
    }
}

impl MessageReader for JsonCatalogStore {
    fn fetch_all(&self, key: &str) -> Result<Messages, StoreError> {
        let path = self.path_for(key)?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!("Message file not found: {:?}", path);
                return Ok(Messages::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let json: Value = match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(source) => return Err(StoreError::Parse { path, source }),
        };

        let messages = flatten_json(&json, &self.separator, None);
        tracing::debug!("Loaded {} messages from {:?}", messages.len(), path);
        Ok(messages)
    }
}

impl MessageWriter for JsonCatalogStore {
    /// Writes a flat JSON object with ids in sorted order.
    fn write(&self, key: &str, messages: &Messages) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }

        let sorted: BTreeMap<&String, &String> = messages.iter().collect();
        let content = match serde_json::to_string_pretty(&sorted) {
            Ok(content) => content,
            Err(source) => return Err(StoreError::Parse { path, source }),
        };

        std::fs::write(&path, content).map_err(|source| StoreError::Io { path, source })
    }
}

/// Flatten nested JSON object into separator-joined message ids.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_resolver::store::flatten_json;
///
/// let json = json!({
///     "common": {
///         "hello": "Hello",
///         "goodbye": "Goodbye"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
/// assert_eq!(flattened.get("common.goodbye"), Some(&"Goodbye".to_string()));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str, prefix: Option<&str>) -> Messages {
    let mut result = Messages::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

/// `flatten_json` の再帰本体
fn flatten_json_value(json: &Value, separator: &str, prefix: Option<&str>, result: &mut Messages) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        Value::Null => {}
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
