//! 未翻訳の通知

use std::sync::mpsc::Sender;

use thiserror::Error;

/// A message id had no translation for `locale` in `category`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingTranslation {
    pub category: String,
    /// Canonical string of the locale that was tried.
    pub locale: String,
    pub id: String,
}

impl MissingTranslation {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        locale: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self { category: category.into(), locale: locale.into(), id: id.into() }
    }
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Missing-translation receiver has been dropped")]
    Disconnected,

    #[error("Failed to report missing translation: {0}")]
    Other(String),
}

/// Receives one notification per locale tried without finding the id.
///
/// Errors are logged by the caller and never abort resolution.
pub trait MissingTranslationSink: Send + Sync {
    fn notify_missing(&self, event: &MissingTranslation) -> Result<(), SinkError>;
}

/// Reports misses as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MissingTranslationSink for TracingSink {
    fn notify_missing(&self, event: &MissingTranslation) -> Result<(), SinkError> {
        tracing::warn!(
            category = %event.category,
            locale = %event.locale,
            id = %event.id,
            "Missing translation"
        );
        Ok(())
    }
}

/// Forwards misses over a channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    /// Sending half; the receiver is owned by the consumer.
    sender: Sender<MissingTranslation>,
}

impl ChannelSink {
    #[must_use]
    pub const fn new(sender: Sender<MissingTranslation>) -> Self {
        Self { sender }
    }
}

impl MissingTranslationSink for ChannelSink {
    fn notify_missing(&self, event: &MissingTranslation) -> Result<(), SinkError> {
        self.sender.send(event.clone()).map_err(|_| SinkError::Disconnected)
    }
}
