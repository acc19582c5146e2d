use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::LocaleTag;
use crate::translator::DEFAULT_CATEGORY;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "catalog.directory")
    pub field_path: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを番号付きの一覧に整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.i18n-resolver.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverSettings {
    /// Locale used when none is set, and the target of the fallback detour.
    pub default_locale: String,

    /// Category searched when a lookup names none.
    pub default_category: String,

    pub catalog: CatalogConfig,
}

/// Layout of the JSON catalogs on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// Root of the `<locale>/<category>.json` tree, relative to the project root.
    pub directory: String,

    /// Joins nested JSON keys into message ids.
    pub key_separator: String,
}

impl ResolverSettings {
    /// # Errors
    /// - Default locale is not a valid tag
    /// - Required field is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.default_locale.parse::<LocaleTag>() {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!("Invalid locale tag '{}': {e}. Example: \"en-US\"", self.default_locale),
            ));
        }

        if self.default_category.is_empty() {
            errors.push(ValidationError::new(
                "defaultCategory",
                "The category cannot be empty. Example: \"default\"",
            ));
        }

        if self.catalog.directory.is_empty() {
            errors.push(ValidationError::new(
                "catalog.directory",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.catalog.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "catalog.keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { directory: "locales".to_string(), key_separator: ".".to_string() }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            catalog: CatalogConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = ResolverSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"defaultLocale": "de-AT", "catalog": {"directory": "i18n"}}"#;

        let settings: ResolverSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.default_locale, eq("de-AT"));
        assert_that!(settings.default_category, eq("default"));
        assert_that!(settings.catalog.directory, eq("i18n"));
        assert_that!(settings.catalog.key_separator, eq("."));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: ResolverSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings, ResolverSettings::default());
    }

    #[rstest]
    fn validate_invalid_default_locale() {
        let settings = ResolverSettings {
            default_locale: "invalid-locale_zz-123".to_string(),
            ..ResolverSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLocale")),
                field!(ValidationError.message, contains_substring("Invalid locale tag")),
                field!(ValidationError.message, contains_substring("invalid-locale_zz-123"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_default_category_empty() {
        let settings =
            ResolverSettings { default_category: String::new(), ..ResolverSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultCategory")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case(CatalogConfig { directory: String::new(), key_separator: ".".to_string() }, "catalog.directory")]
    #[case(CatalogConfig { directory: "locales".to_string(), key_separator: String::new() }, "catalog.keySeparator")]
    fn validate_invalid_catalog(#[case] catalog: CatalogConfig, #[case] field_path: &str) {
        let settings = ResolverSettings { catalog, ..ResolverSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = ResolverSettings {
            default_locale: "en_US".to_string(),
            default_category: String::new(),
            ..ResolverSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. defaultLocale"));
        assert_that!(error_message, contains_substring("2. defaultCategory"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
