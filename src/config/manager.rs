//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ResolverSettings,
    loader,
};

/// 設定の読み込みと保持を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ResolverSettings,

    /// Directory the settings were loaded from.
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定で作成する
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ResolverSettings::default(), project_root: None }
    }

    /// Loads and validates the settings of `project_root`.
    ///
    /// Without a root, or without a settings file, the defaults apply.
    /// The current settings are kept if loading fails.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(root) = &project_root {
            loader::load_from_project(root)?.map_or_else(ResolverSettings::default, |loaded| {
                tracing::debug!("Loaded project settings: {:?}", loaded);
                loaded
            })
        } else {
            ResolverSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings after validating them.
    ///
    /// # Errors
    /// - Validation error
    pub fn update_settings(&mut self, new_settings: ResolverSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ResolverSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Catalog directory resolved against the project root.
    #[must_use]
    pub fn catalog_directory(&self) -> PathBuf {
        let directory = Path::new(&self.current_settings.catalog.directory);
        self.project_root.as_ref().map_or_else(|| directory.to_path_buf(), |root| root.join(directory))
    }
}
