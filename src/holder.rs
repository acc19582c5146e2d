//! 呼び出しでロケールが指定されないときに使う「現在」と「デフォルト」のロケール

use std::sync::{
    PoisonError,
    RwLock,
};

use crate::locale::LocaleTag;

/// Current locale with a default to fall back on.
///
/// Share it behind an `Arc`; `set` swaps the value under a lock.
#[derive(Debug)]
pub struct CurrentLocaleHolder {
    /// Used when no current locale is set, and as the resolution detour.
    default: LocaleTag,
    /// Explicitly selected locale.
    current: RwLock<Option<LocaleTag>>,
}

impl CurrentLocaleHolder {
    #[must_use]
    pub fn new(default: LocaleTag) -> Self {
        Self { default, current: RwLock::new(None) }
    }

    /// The current locale, or the default when none was set.
    #[must_use]
    pub fn get(&self) -> LocaleTag {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| self.default.clone())
    }

    pub fn set(&self, locale: LocaleTag) {
        tracing::debug!("Current locale set to {}", locale);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(locale);
    }

    /// Forgets the current locale so [`get`](Self::get) returns the default.
    pub fn reset(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub const fn get_default(&self) -> &LocaleTag {
        &self.default
    }

    /// True when no current locale is set or it equals the default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_none_or(|current| *current == self.default)
    }
}
