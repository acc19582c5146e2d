//! 解決済みメッセージへのパラメータ埋め込み

use std::collections::HashMap;

use thiserror::Error;

/// The formatter rejected a message/parameter combination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to format message '{message}': {reason}")]
pub struct FormattingFailed {
    pub message: String,
    pub reason: String,
}

impl FormattingFailed {
    #[must_use]
    pub fn new(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { message: message.into(), reason: reason.into() }
    }
}

/// Renders a resolved message with its parameters.
pub trait MessageFormatter: Send + Sync {
    /// `locale` is the canonical string of the locale the caller asked for.
    fn format(
        &self,
        message: &str,
        parameters: &HashMap<String, String>,
        locale: &str,
    ) -> Result<String, FormattingFailed>;
}

/// Replaces `{name}` with the parameter `name`.
///
/// Placeholders without a matching parameter are kept verbatim. An opening
/// brace without a closing one is an error.
///
/// ```
/// use std::collections::HashMap;
/// use i18n_resolver::formatter::{MessageFormatter, PlaceholderFormatter};
///
/// let parameters = HashMap::from([("param".to_string(), "param-value".to_string())]);
/// let text = PlaceholderFormatter.format("translated {param}", &parameters, "en")?;
/// assert_eq!(text, "translated param-value");
/// # Ok::<(), i18n_resolver::formatter::FormattingFailed>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderFormatter;

impl MessageFormatter for PlaceholderFormatter {
    fn format(
        &self,
        message: &str,
        parameters: &HashMap<String, String>,
        _locale: &str,
    ) -> Result<String, FormattingFailed> {
        let mut result = String::with_capacity(message.len());
        let mut rest = message;

        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            result.push_str(literal);

            let Some(close) = tail.find('}') else {
                return Err(FormattingFailed::new(message, "unterminated placeholder"));
            };
            let (placeholder, after) = tail.split_at(close + 1);
            let name = placeholder.trim_start_matches('{').trim_end_matches('}');
            match parameters.get(name.trim()) {
                Some(value) => result.push_str(value),
                None => result.push_str(placeholder),
            }
            rest = after;
        }

        result.push_str(rest);
        Ok(result)
    }
}
