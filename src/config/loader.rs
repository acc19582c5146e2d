//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    ResolverSettings,
};

/// Settings file name looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".i18n-resolver.json";

/// Loads `.i18n-resolver.json` from `project_root`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no settings file
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_project(
    project_root: &Path,
) -> Result<Option<ResolverSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: ResolverSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
