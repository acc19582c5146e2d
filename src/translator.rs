//! ロケールのフォールバックを伴うメッセージ解決
//!
//! 要求されたロケールから不動点まで順に簡略化し (see [`LocaleTag::fallback_locale`])、
//! その後デフォルトロケールの系列を 1 度だけ辿る。見つからなかったロケールは毎回
//! [`MissingTranslationSink`] に通知され、全ての候補で見つからなければ ID をそのまま返す。

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::Arc;

use crate::cache::TranslationCache;
use crate::config::ResolverSettings;
use crate::error::TranslateError;
use crate::event::{
    MissingTranslation,
    MissingTranslationSink,
};
use crate::formatter::MessageFormatter;
use crate::holder::CurrentLocaleHolder;
use crate::locale::{
    LocaleError,
    LocaleTag,
};
use crate::store::{
    MessageReader,
    StoreError,
};

/// Category used when neither the caller nor the settings name one.
pub const DEFAULT_CATEGORY: &str = "default";

/// Per-call options for [`Translator::resolve`].
///
/// Every field is optional: no parameters, the translator's default
/// category, and the locale currently held by the [`CurrentLocaleHolder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Values handed to the formatter.
    pub parameters: HashMap<String, String>,
    /// Catalog to search. `None` uses the translator's default category.
    pub category: Option<String>,
    /// Raw locale tag. `None` uses the current locale.
    pub locale: Option<String>,
}

impl ResolveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Position in the fallback walk.
enum Walk {
    /// Reducing the requested tag.
    Reducing(LocaleTag),
    /// Reducing the default locale after the requested chain ran out.
    DefaultDetour(LocaleTag),
    /// 候補が尽きた
    Terminal,
}

/// Resolves message ids to translated text.
pub struct Translator {
    /// (locale, category) ごとのメッセージテーブル
    cache: TranslationCache,
    /// 未翻訳の通知先
    sink: Arc<dyn MissingTranslationSink>,
    /// Applied only when the caller passes parameters.
    formatter: Option<Arc<dyn MessageFormatter>>,
    /// 現在のロケールとデフォルトロケール
    locales: Arc<CurrentLocaleHolder>,
    /// カテゴリ未指定時に使うカテゴリ
    default_category: String,
}

impl Translator {
    #[must_use]
    pub fn new(
        store: Arc<dyn MessageReader>,
        sink: Arc<dyn MissingTranslationSink>,
        locales: Arc<CurrentLocaleHolder>,
    ) -> Self {
        Self {
            cache: TranslationCache::new(store),
            sink,
            formatter: None,
            locales,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Builds a translator whose default locale and category come from `settings`.
    pub fn from_settings(
        settings: &ResolverSettings,
        store: Arc<dyn MessageReader>,
        sink: Arc<dyn MissingTranslationSink>,
    ) -> Result<Self, LocaleError> {
        let default_locale = settings.default_locale.parse::<LocaleTag>()?;
        let locales = Arc::new(CurrentLocaleHolder::new(default_locale));
        Ok(Self::new(store, sink, locales).with_default_category(&settings.default_category))
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    #[must_use]
    pub const fn locales(&self) -> &Arc<CurrentLocaleHolder> {
        &self.locales
    }

    #[must_use]
    pub const fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    #[must_use]
    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Shorthand for [`resolve`](Self::resolve) with default options.
    pub fn translate(&self, id: &str) -> Result<String, TranslateError> {
        self.resolve(id, &ResolveOptions::default())
    }

    /// Resolves `id` to its translation.
    ///
    /// Returns the id unchanged when no candidate locale has it. The
    /// formatter runs only on a found message with non-empty parameters,
    /// and receives the requested locale rather than the one that matched.
    ///
    /// # Errors
    /// - [`TranslateError::Locale`] if `options.locale` is not a valid tag
    /// - [`TranslateError::Store`] if the store fails while fetching a table
    /// - [`TranslateError::Formatting`] if the formatter rejects the message
    pub fn resolve(&self, id: &str, options: &ResolveOptions) -> Result<String, TranslateError> {
        let requested = match &options.locale {
            Some(raw) => raw.parse::<LocaleTag>()?,
            None => self.locales.get(),
        };
        let category = options.category.as_deref().unwrap_or(&self.default_category);

        let Some(text) = self.find_message(id, category, requested.clone())? else {
            tracing::debug!("No translation for '{}' in {}, returning id", id, category);
            return Ok(id.to_string());
        };

        match &self.formatter {
            Some(formatter) if !options.parameters.is_empty() => {
                Ok(formatter.format(&text, &options.parameters, &requested.as_string())?)
            }
            _ => Ok(text),
        }
    }

    /// Walks the fallback chain of `requested`, then of the default locale.
    ///
    /// Each canonical tag is tried at most once, so a chain that reaches an
    /// already tried tag ends there.
    fn find_message(
        &self,
        id: &str,
        category: &str,
        requested: LocaleTag,
    ) -> Result<Option<String>, StoreError> {
        let default = self.locales.get_default();
        let mut tried: HashSet<String> = HashSet::new();
        let mut walk = Walk::Reducing(requested);

        loop {
            let (tag, detoured) = match walk {
                Walk::Reducing(tag) => (tag, false),
                Walk::DefaultDetour(tag) => (tag, true),
                Walk::Terminal => return Ok(None),
            };

            let locale = tag.as_string();
            if !tried.insert(locale.clone()) {
                tracing::trace!("Locale {} already tried for '{}'", locale, id);
                return Ok(None);
            }

            let messages = self.cache.lookup(&tag, category)?;
            if let Some(text) = messages.get(id) {
                tracing::trace!("Resolved '{}' in {}/{}", id, locale, category);
                return Ok(Some(text.clone()));
            }

            self.report_missing(MissingTranslation::new(category, locale, id));

            let fallback = tag.fallback_locale();
            walk = if fallback != tag {
                tracing::trace!("Falling back from {} to {}", tag, fallback);
                if detoured { Walk::DefaultDetour(fallback) } else { Walk::Reducing(fallback) }
            } else if !detoured && default.fallback_locale() != tag {
                tracing::trace!("Falling back from {} to default locale {}", tag, default);
                Walk::DefaultDetour(default.clone())
            } else {
                Walk::Terminal
            };
        }
    }

    /// 未翻訳を通知する。通知の失敗は warn ログのみ
    fn report_missing(&self, event: MissingTranslation) {
        if let Err(error) = self.sink.notify_missing(&event) {
            tracing::warn!(
                "Failed to report missing translation '{}' ({}/{}): {}",
                event.id,
                event.locale,
                event.category,
                error
            );
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("cache", &self.cache)
            .field("has_formatter", &self.formatter.is_some())
            .field("locales", &self.locales)
            .field("default_category", &self.default_category)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::formatter::PlaceholderFormatter;
    use crate::locale::parse;
    use crate::store::InMemoryStore;
    use crate::test_utils::{
        CountingStore,
        FailingSink,
        FailingStore,
        RecordingSink,
        RejectingFormatter,
    };

    struct Fixture {
        store: Arc<CountingStore>,
        sink: Arc<RecordingSink>,
        translator: Translator,
    }

    fn fixture(store: InMemoryStore, default_locale: &str) -> Fixture {
        let store = Arc::new(CountingStore::new(store));
        let sink = Arc::new(RecordingSink::default());
        let locales = Arc::new(CurrentLocaleHolder::new(parse(default_locale).unwrap()));
        let translator = Translator::new(store.clone(), sink.clone(), locales);
        Fixture { store, sink, translator }
    }

    fn missing(category: &str, locale: &str, id: &str) -> MissingTranslation {
        MissingTranslation::new(category, locale, id)
    }

    #[googletest::test]
    fn resolve_returns_stored_message() {
        let f = fixture(InMemoryStore::new().with_message("en", "Message", "test", "test"), "en");

        let text = f
            .translator
            .resolve("test", &ResolveOptions::new().with_category("Message").with_locale("en"))
            .unwrap();

        expect_that!(text, eq("test"));
        expect_that!(f.sink.events().is_empty(), eq(true));
    }

    #[googletest::test]
    fn resolve_formats_with_parameters() {
        let f = fixture(
            InMemoryStore::new().with_message("en", "Message", "test", "translated {param}"),
            "en",
        );
        let translator = f.translator.with_formatter(Arc::new(PlaceholderFormatter));

        let text = translator
            .resolve(
                "test",
                &ResolveOptions::new()
                    .with_category("Message")
                    .with_locale("en")
                    .with_parameter("param", "param-value"),
            )
            .unwrap();

        expect_that!(text, eq("translated param-value"));
    }

    #[googletest::test]
    fn resolve_skips_formatter_without_parameters() {
        let f = fixture(InMemoryStore::new().with_message("en", "default", "a", "{raw}"), "en");
        let formatter = Arc::new(RejectingFormatter::default());
        let translator = f.translator.with_formatter(formatter.clone());

        let text = translator.translate("a").unwrap();

        expect_that!(text, eq("{raw}"));
        expect_that!(formatter.calls().is_empty(), eq(true));
    }

    #[googletest::test]
    fn resolve_falls_back_to_default_locale() {
        let f =
            fixture(InMemoryStore::new().with_message("de", "Message", "test", "übersetzt"), "de");

        let text = f
            .translator
            .resolve("test", &ResolveOptions::new().with_category("Message").with_locale("en"))
            .unwrap();

        expect_that!(text, eq("übersetzt"));
        assert_eq!(f.sink.events(), vec![missing("Message", "en", "test")]);
    }

    #[googletest::test]
    fn resolve_walks_requested_chain_before_default() {
        let f = fixture(
            InMemoryStore::new()
                .with_message("en", "app", "greeting", "Hello")
                .with_message("de", "app", "greeting", "Hallo"),
            "de",
        );

        let text = f
            .translator
            .resolve("greeting", &ResolveOptions::new().with_category("app").with_locale("en-GB"))
            .unwrap();

        expect_that!(text, eq("Hello"));
        assert_eq!(f.sink.events(), vec![missing("app", "en-GB", "greeting")]);
    }

    #[googletest::test]
    fn resolve_returns_id_when_every_candidate_misses() {
        let f = fixture(InMemoryStore::new(), "en-GB");

        let text = f
            .translator
            .resolve("unknown.id", &ResolveOptions::new().with_category("app").with_locale("fr-CA"))
            .unwrap();

        expect_that!(text, eq("unknown.id"));
        assert_eq!(
            f.sink.events(),
            vec![
                missing("app", "fr-CA", "unknown.id"),
                missing("app", "fr", "unknown.id"),
                missing("app", "en-GB", "unknown.id"),
                missing("app", "en", "unknown.id"),
            ]
        );
    }

    #[rstest]
    #[case("en-US", "en", &["en-US", "en"])]
    #[case("en", "en-US", &["en"])]
    #[case("en-GB", "en-US", &["en-GB", "en"])]
    #[case("fr", "en-US", &["fr", "en-US", "en"])]
    #[case("en", "en", &["en"])]
    #[case("de-x-private", "de", &["de-x-private", "de"])]
    #[case("x-private", "en", &["x-private", "en"])]
    fn terminal_miss_reports_each_locale_once(
        #[case] requested: &str,
        #[case] default_locale: &str,
        #[case] expected: &[&str],
    ) {
        let f = fixture(InMemoryStore::new(), default_locale);

        f.translator.resolve("id", &ResolveOptions::new().with_locale(requested)).unwrap();

        let locales: Vec<String> = f.sink.events().into_iter().map(|e| e.locale).collect();
        assert_eq!(locales, expected);
    }

    #[googletest::test]
    fn resolve_uses_current_locale_when_none_given() {
        let f = fixture(
            InMemoryStore::new()
                .with_message("en", "default", "hello", "Hello")
                .with_message("fr", "default", "hello", "Bonjour"),
            "en",
        );
        f.translator.locales().set(parse("fr-CA").unwrap());

        let text = f.translator.translate("hello").unwrap();

        expect_that!(text, eq("Bonjour"));
    }

    #[googletest::test]
    fn resolve_uses_default_category() {
        let f = fixture(InMemoryStore::new().with_message("en", "ui", "ok", "OK"), "en");
        let translator = f.translator.with_default_category("ui");

        expect_that!(translator.translate("ok").unwrap(), eq("OK"));
        expect_that!(f.store.fetches_of("en/ui"), eq(1));
    }

    #[googletest::test]
    fn repeated_resolves_fetch_each_table_once() {
        let f = fixture(InMemoryStore::new().with_message("en", "app", "a", "A"), "en");
        let options = ResolveOptions::new().with_category("app").with_locale("en");

        f.translator.resolve("a", &options).unwrap();
        f.translator.resolve("a", &options).unwrap();
        f.translator.resolve("b", &options).unwrap();

        expect_that!(f.store.fetches_of("en/app"), eq(1));
        expect_that!(f.store.total_fetches(), eq(1));
    }

    #[googletest::test]
    fn resolve_rejects_malformed_locale() {
        let f = fixture(InMemoryStore::new(), "en");

        let result =
            f.translator.resolve("id", &ResolveOptions::new().with_locale("invalid-locale_zz-123"));

        expect_that!(
            matches!(result, Err(TranslateError::Locale(LocaleError::Malformed { position: 8, .. }))),
            eq(true)
        );
        expect_that!(f.store.total_fetches(), eq(0));
    }

    #[googletest::test]
    fn keyword_value_cannot_reach_another_catalog() {
        let f = fixture(
            InMemoryStore::new().with_message("en@calendar=a", "b/default", "id", "WRONG"),
            "en",
        );

        let text = f
            .translator
            .resolve("id", &ResolveOptions::new().with_category("default").with_locale("en@calendar=a/b"))
            .unwrap();

        expect_that!(text, eq("id"));
        expect_that!(f.store.fetches_of("en/default"), eq(1));
        expect_that!(f.store.total_fetches(), eq(1));
    }

    #[googletest::test]
    fn sink_failure_does_not_abort_resolution() {
        let store = Arc::new(InMemoryStore::new().with_message("en", "default", "a", "A"));
        let locales = Arc::new(CurrentLocaleHolder::new(parse("en").unwrap()));
        let translator = Translator::new(store, Arc::new(FailingSink), locales);

        let text = translator.resolve("a", &ResolveOptions::new().with_locale("en-GB")).unwrap();

        expect_that!(text, eq("A"));
    }

    #[googletest::test]
    fn store_failure_is_propagated() {
        let locales = Arc::new(CurrentLocaleHolder::new(parse("en").unwrap()));
        let translator =
            Translator::new(Arc::new(FailingStore), Arc::new(RecordingSink::default()), locales);

        let result = translator.translate("a");

        expect_that!(matches!(result, Err(TranslateError::Store(_))), eq(true));
        expect_that!(translator.cache().is_empty(), eq(true));
    }

    #[googletest::test]
    fn formatter_failure_is_propagated_with_requested_locale() {
        let f = fixture(InMemoryStore::new().with_message("en", "default", "a", "A {x}"), "en");
        let formatter = Arc::new(RejectingFormatter::default());
        let translator = f.translator.with_formatter(formatter.clone());

        let result =
            translator.resolve("a", &ResolveOptions::new().with_locale("en-gb").with_parameter("x", "1"));

        expect_that!(matches!(result, Err(TranslateError::Formatting(_))), eq(true));
        expect_that!(formatter.calls(), elements_are![eq("en-GB")]);
    }

    #[googletest::test]
    fn from_settings_applies_defaults() {
        let settings = ResolverSettings {
            default_locale: "de-AT".to_string(),
            default_category: "ui".to_string(),
            ..ResolverSettings::default()
        };

        let translator = Translator::from_settings(
            &settings,
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingSink::default()),
        )
        .unwrap();

        expect_that!(translator.default_category(), eq("ui"));
        expect_that!(translator.locales().get_default().as_string(), eq("de-AT"));
    }
}
