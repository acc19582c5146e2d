//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される共通のテストダブルを提供します。
#![cfg(test)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{
    Mutex,
    PoisonError,
};

use crate::event::{
    MissingTranslation,
    MissingTranslationSink,
    SinkError,
};
use crate::formatter::{
    FormattingFailed,
    MessageFormatter,
};
use crate::store::{
    InMemoryStore,
    MessageReader,
    Messages,
    StoreError,
};

/// Wraps an [`InMemoryStore`] and counts fetches per catalog key.
#[derive(Debug, Default)]
pub(crate) struct CountingStore {
    /// 実際のメッセージ
    inner: InMemoryStore,
    /// カタログキーごとの取得回数
    fetches: Mutex<HashMap<String, usize>>,
}

impl CountingStore {
    /// `inner` をラップする
    pub(crate) fn new(inner: InMemoryStore) -> Self {
        Self { inner, fetches: Mutex::new(HashMap::new()) }
    }

    /// `key` の取得回数
    pub(crate) fn fetches_of(&self, key: &str) -> usize {
        self.fetches.lock().unwrap_or_else(PoisonError::into_inner).get(key).copied().unwrap_or(0)
    }

    /// 全キーの取得回数の合計
    pub(crate) fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap_or_else(PoisonError::into_inner).values().sum()
    }
}

impl MessageReader for CountingStore {
    fn fetch_all(&self, key: &str) -> Result<Messages, StoreError> {
        *self
            .fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default() += 1;
        self.inner.fetch_all(key)
    }
}

/// Store whose every fetch fails with an I/O error.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FailingStore;

impl MessageReader for FailingStore {
    fn fetch_all(&self, key: &str) -> Result<Messages, StoreError> {
        Err(StoreError::Io {
            path: PathBuf::from(key),
            source: std::io::Error::other("store unavailable"),
        })
    }
}

/// Sink that keeps every event in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    /// 受け取ったイベント
    events: Mutex<Vec<MissingTranslation>>,
}

impl RecordingSink {
    /// 受け取ったイベントを順に返す
    pub(crate) fn events(&self) -> Vec<MissingTranslation> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl MissingTranslationSink for RecordingSink {
    fn notify_missing(&self, event: &MissingTranslation) -> Result<(), SinkError> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
        Ok(())
    }
}

/// Sink that rejects every event.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FailingSink;

impl MissingTranslationSink for FailingSink {
    fn notify_missing(&self, _event: &MissingTranslation) -> Result<(), SinkError> {
        Err(SinkError::Other("sink offline".to_string()))
    }
}

/// Formatter that records the locale it was called with and always fails.
#[derive(Debug, Default)]
pub(crate) struct RejectingFormatter {
    /// 呼び出し時のロケール
    calls: Mutex<Vec<String>>,
}

impl RejectingFormatter {
    /// 呼び出し時のロケールを順に返す
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl MessageFormatter for RejectingFormatter {
    fn format(
        &self,
        message: &str,
        _parameters: &HashMap<String, String>,
        locale: &str,
    ) -> Result<String, FormattingFailed> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(locale.to_string());
        Err(FormattingFailed::new(message, "rejected"))
    }
}
