//! i18n-resolver
//!
//! BCP 47 ロケールタグによるメッセージ解決、フォールバック、未翻訳の通知

pub mod cache;
pub mod config;
pub mod error;
pub mod event;
pub mod formatter;
pub mod holder;
pub mod locale;
pub mod store;
pub mod translator;

mod test_utils;

pub use cache::TranslationCache;
pub use error::TranslateError;
pub use holder::CurrentLocaleHolder;
pub use locale::{
    LocaleError,
    LocaleTag,
};
pub use translator::{
    ResolveOptions,
    Translator,
};
