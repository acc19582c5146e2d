//! ロケールタグの値型とフォールバック

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::str::FromStr;

use super::LocaleError;
use super::parser;

/// ICU keyword recognized after the `@` of a locale tag.
///
/// Declaration order is the serialization order of [`LocaleTag::as_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Keyword {
    /// `currency`
    Currency,
    /// `colcasefirst`: case-first collation.
    ColCaseFirst,
    /// `collation`
    Collation,
    /// `colnumeric`: numeric collation.
    ColNumeric,
    /// `calendar`
    Calendar,
    /// `numbers`: numbering system.
    Numbers,
    /// `hours`: hour cycle.
    Hours,
}

impl Keyword {
    pub const ALL: [Self; 7] = [
        Self::Currency,
        Self::ColCaseFirst,
        Self::Collation,
        Self::ColNumeric,
        Self::Calendar,
        Self::Numbers,
        Self::Hours,
    ];

    /// Key as written in the keyword block.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::ColCaseFirst => "colcasefirst",
            Self::Collation => "collation",
            Self::ColNumeric => "colnumeric",
            Self::Calendar => "calendar",
            Self::Numbers => "numbers",
            Self::Hours => "hours",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.name() == name)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured fields of a non-grandfathered tag, already normalized.
#[derive(Debug, Clone, Default)]
pub(super) struct Subtags {
    /// Lowercased primary language.
    pub(super) language: Option<String>,
    /// Extended language subtags, `-`-joined.
    pub(super) extended_language: Option<String>,
    /// Titlecased script.
    pub(super) script: Option<String>,
    /// Uppercased region.
    pub(super) region: Option<String>,
    /// Variant subtags, `-`-joined.
    pub(super) variant: Option<String>,
    /// Extension sequences including their singletons, `-`-joined.
    pub(super) extension: Option<String>,
    /// Private-use subtags without the leading `x-`.
    pub(super) private: Option<String>,
    /// ICU keywords.
    pub(super) keywords: BTreeMap<Keyword, String>,
}

/// Internal representation; grandfathered and structured tags never mix.
#[derive(Debug, Clone)]
enum Repr {
    /// A legacy tag from the fixed registry list.
    Grandfathered(&'static str),
    /// Any other tag.
    Structured(Subtags),
}

/// A parsed, normalized BCP 47 locale tag with ICU keywords.
///
/// Equality and hashing follow [`as_string`](Self::as_string).
///
/// ```
/// use i18n_resolver::locale::LocaleTag;
///
/// let tag: LocaleTag = "zh-hans-cn@calendar=chinese".parse()?;
/// assert_eq!(tag.as_string(), "zh-Hans-CN@calendar=chinese");
/// assert_eq!(tag.fallback_locale().as_string(), "zh-Hans");
/// # Ok::<(), i18n_resolver::locale::LocaleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocaleTag {
    /// Tag contents.
    repr: Repr,
}

impl LocaleTag {
    /// 登録済みの grandfathered タグから作成する
    pub(super) const fn grandfathered_tag(tag: &'static str) -> Self {
        Self { repr: Repr::Grandfathered(tag) }
    }

    /// 正規化済みのフィールドから作成する
    pub(super) const fn structured(subtags: Subtags) -> Self {
        Self { repr: Repr::Structured(subtags) }
    }

    /// Structured fields, or `None` for grandfathered tags.
    const fn subtags(&self) -> Option<&Subtags> {
        match &self.repr {
            Repr::Structured(subtags) => Some(subtags),
            Repr::Grandfathered(_) => None,
        }
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.subtags()?.language.as_deref()
    }

    #[must_use]
    pub fn extended_language(&self) -> Option<&str> {
        self.subtags()?.extended_language.as_deref()
    }

    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.subtags()?.script.as_deref()
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.subtags()?.region.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.subtags()?.variant.as_deref()
    }

    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.subtags()?.extension.as_deref()
    }

    /// Private-use subtags, without the `x-` prefix.
    #[must_use]
    pub fn private(&self) -> Option<&str> {
        self.subtags()?.private.as_deref()
    }

    #[must_use]
    pub const fn grandfathered(&self) -> Option<&'static str> {
        match self.repr {
            Repr::Grandfathered(tag) => Some(tag),
            Repr::Structured(_) => None,
        }
    }

    #[must_use]
    pub const fn is_grandfathered(&self) -> bool {
        matches!(self.repr, Repr::Grandfathered(_))
    }

    #[must_use]
    pub fn keyword(&self, keyword: Keyword) -> Option<&str> {
        self.subtags()?.keywords.get(&keyword).map(String::as_str)
    }

    #[must_use]
    pub fn has_keywords(&self) -> bool {
        self.subtags().is_some_and(|subtags| !subtags.keywords.is_empty())
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.keyword(Keyword::Currency)
    }

    #[must_use]
    pub fn colcasefirst(&self) -> Option<&str> {
        self.keyword(Keyword::ColCaseFirst)
    }

    #[must_use]
    pub fn collation(&self) -> Option<&str> {
        self.keyword(Keyword::Collation)
    }

    #[must_use]
    pub fn colnumeric(&self) -> Option<&str> {
        self.keyword(Keyword::ColNumeric)
    }

    #[must_use]
    pub fn calendar(&self) -> Option<&str> {
        self.keyword(Keyword::Calendar)
    }

    #[must_use]
    pub fn numbers(&self) -> Option<&str> {
        self.keyword(Keyword::Numbers)
    }

    #[must_use]
    pub fn hours(&self) -> Option<&str> {
        self.keyword(Keyword::Hours)
    }

    /// Copies the structured fields, applies `update` and wraps the result.
    ///
    /// Clearing a field of a grandfathered tag is a no-op; setting one fails.
    fn derive(
        &self,
        field: &'static str,
        setting: bool,
        update: impl FnOnce(&mut Subtags) -> Result<(), LocaleError>,
    ) -> Result<Self, LocaleError> {
        match &self.repr {
            Repr::Grandfathered(tag) if setting => {
                Err(LocaleError::Grandfathered { tag: *tag, field })
            }
            Repr::Grandfathered(_) => Ok(self.clone()),
            Repr::Structured(subtags) => {
                let mut subtags = subtags.clone();
                update(&mut subtags)?;
                Ok(Self::structured(subtags))
            }
        }
    }

    /// Replaces the primary language subtag.
    pub fn with_language(&self, language: &str) -> Result<Self, LocaleError> {
        self.derive("language", true, |subtags| {
            let extlang_allowed = language.len() <= 3 || subtags.extended_language.is_none();
            if !parser::is_language(language) || !extlang_allowed {
                return Err(LocaleError::invalid_subtag("language", language));
            }
            subtags.language = Some(language.to_ascii_lowercase());
            Ok(())
        })
    }

    pub fn with_extended_language(&self, extended_language: Option<&str>) -> Result<Self, LocaleError> {
        const FIELD: &str = "extended language";
        self.derive(FIELD, extended_language.is_some(), |subtags| {
            if let Some(value) = extended_language {
                let language = require_language(subtags, FIELD)?;
                if language.len() > 3 || !parser::is_extended_language_sequence(value) {
                    return Err(LocaleError::invalid_subtag(FIELD, value));
                }
            }
            subtags.extended_language = extended_language.map(str::to_string);
            Ok(())
        })
    }

    pub fn with_script(&self, script: Option<&str>) -> Result<Self, LocaleError> {
        self.derive("script", script.is_some(), |subtags| {
            subtags.script = checked(subtags, "script", script, parser::is_script)?
                .map(parser::normalize_script);
            Ok(())
        })
    }

    pub fn with_region(&self, region: Option<&str>) -> Result<Self, LocaleError> {
        self.derive("region", region.is_some(), |subtags| {
            subtags.region = checked(subtags, "region", region, parser::is_region)?
                .map(str::to_ascii_uppercase);
            Ok(())
        })
    }

    pub fn with_variant(&self, variant: Option<&str>) -> Result<Self, LocaleError> {
        self.derive("variant", variant.is_some(), |subtags| {
            subtags.variant = checked(subtags, "variant", variant, parser::is_variant_sequence)?
                .map(str::to_string);
            Ok(())
        })
    }

    pub fn with_extension(&self, extension: Option<&str>) -> Result<Self, LocaleError> {
        self.derive("extension", extension.is_some(), |subtags| {
            subtags.extension =
                checked(subtags, "extension", extension, parser::is_extension_sequence)?
                    .map(str::to_string);
            Ok(())
        })
    }

    /// Replaces the private-use subtags. `private` excludes the `x-` prefix.
    ///
    /// A private-use-only tag keeps its private part: clearing it would leave
    /// an empty tag.
    pub fn with_private(&self, private: Option<&str>) -> Result<Self, LocaleError> {
        const FIELD: &str = "private use";
        self.derive(FIELD, private.is_some(), |subtags| {
            match private {
                Some(value) if !parser::is_private_sequence(value) => {
                    return Err(LocaleError::invalid_subtag(FIELD, value));
                }
                None if subtags.language.is_none() && subtags.private.is_some() => {
                    return Err(LocaleError::MissingLanguage { field: FIELD });
                }
                _ => {}
            }
            subtags.private = private.map(str::to_string);
            Ok(())
        })
    }

    /// Sets or clears one ICU keyword.
    pub fn with_keyword(&self, keyword: Keyword, value: Option<&str>) -> Result<Self, LocaleError> {
        self.derive(keyword.name(), value.is_some(), |subtags| {
            match value {
                Some(value) if !parser::is_keyword_value(value) => {
                    return Err(LocaleError::invalid_subtag(keyword.name(), value));
                }
                Some(value) => {
                    subtags.keywords.insert(keyword, value.to_string());
                }
                None => {
                    subtags.keywords.remove(&keyword);
                }
            }
            Ok(())
        })
    }

    pub fn with_currency(&self, currency: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::Currency, currency)
    }

    pub fn with_colcasefirst(&self, colcasefirst: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::ColCaseFirst, colcasefirst)
    }

    pub fn with_collation(&self, collation: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::Collation, collation)
    }

    pub fn with_colnumeric(&self, colnumeric: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::ColNumeric, colnumeric)
    }

    pub fn with_calendar(&self, calendar: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::Calendar, calendar)
    }

    pub fn with_numbers(&self, numbers: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::Numbers, numbers)
    }

    pub fn with_hours(&self, hours: Option<&str>) -> Result<Self, LocaleError> {
        self.with_keyword(Keyword::Hours, hours)
    }

    /// Canonical string form.
    ///
    /// Grandfathered tags serialize to their literal. Otherwise subtags are
    /// written in grammar order, then `@` and the keywords in [`Keyword`]
    /// order.
    #[must_use]
    pub fn as_string(&self) -> String {
        let subtags = match &self.repr {
            Repr::Grandfathered(tag) => return (*tag).to_string(),
            Repr::Structured(subtags) => subtags,
        };

        let mut parts: Vec<&str> = Vec::new();
        if let Some(language) = &subtags.language {
            parts.push(language);
            parts.extend(
                [
                    &subtags.extended_language,
                    &subtags.script,
                    &subtags.region,
                    &subtags.variant,
                    &subtags.extension,
                ]
                .into_iter()
                .flatten()
                .map(String::as_str),
            );
        }
        if let Some(private) = &subtags.private {
            parts.push("x");
            parts.push(private);
        }

        let mut result = parts.join("-");
        if !subtags.keywords.is_empty() {
            let keywords: Vec<String> = subtags
                .keywords
                .iter()
                .map(|(keyword, value)| format!("{keyword}={value}"))
                .collect();
            result.push('@');
            result.push_str(&keywords.join(";"));
        }
        result
    }

    /// One step less specific.
    ///
    /// Keywords, extended language, extensions and private use are always
    /// dropped; then the first set field of variant, region and script is
    /// cleared. Grandfathered and private-use-only tags are returned as is.
    #[must_use]
    pub fn fallback_locale(&self) -> Self {
        let Some(subtags) = self.subtags() else {
            return self.clone();
        };
        if subtags.language.is_none() {
            return self.clone();
        }

        let mut fallback = Subtags {
            language: subtags.language.clone(),
            script: subtags.script.clone(),
            region: subtags.region.clone(),
            variant: subtags.variant.clone(),
            ..Subtags::default()
        };
        if fallback.variant.is_some() {
            fallback.variant = None;
        } else if fallback.region.is_some() {
            fallback.region = None;
        } else {
            fallback.script = None;
        }
        Self::structured(fallback)
    }

    /// The tag itself followed by each successive fallback, ending with the
    /// first fixed point.
    ///
    /// ```
    /// use i18n_resolver::locale::parse;
    ///
    /// let chain: Vec<String> = parse("en-GB-boont-x-private")?
    ///     .fallback_chain()
    ///     .map(|tag| tag.as_string())
    ///     .collect();
    /// assert_eq!(chain, ["en-GB-boont-x-private", "en-GB", "en"]);
    /// # Ok::<(), i18n_resolver::locale::LocaleError>(())
    /// ```
    #[must_use]
    pub fn fallback_chain(&self) -> FallbackChain {
        FallbackChain { pending: Some(self.clone()) }
    }
}

/// Validates an optional structured value that requires a language subtag.
fn checked<'v>(
    subtags: &Subtags,
    field: &'static str,
    value: Option<&'v str>,
    is_valid: fn(&str) -> bool,
) -> Result<Option<&'v str>, LocaleError> {
    let Some(value) = value else {
        return Ok(None);
    };
    require_language(subtags, field)?;
    if is_valid(value) { Ok(Some(value)) } else { Err(LocaleError::invalid_subtag(field, value)) }
}

/// 言語サブタグを要求するフィールドのための検査
fn require_language<'s>(subtags: &'s Subtags, field: &'static str) -> Result<&'s str, LocaleError> {
    subtags.language.as_deref().ok_or(LocaleError::MissingLanguage { field })
}

/// Iterator returned by [`LocaleTag::fallback_chain`].
#[derive(Debug, Clone)]
pub struct FallbackChain {
    /// Next tag to yield.
    pending: Option<LocaleTag>,
}

impl Iterator for FallbackChain {
    type Item = LocaleTag;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.pending.take()?;
        let fallback = current.fallback_locale();
        if fallback != current {
            self.pending = Some(fallback);
        }
        Some(current)
    }
}

impl PartialEq for LocaleTag {
    fn eq(&self, other: &Self) -> bool {
        self.as_string() == other.as_string()
    }
}

impl Eq for LocaleTag {}

impl Hash for LocaleTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_string().hash(state);
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for LocaleTag {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::locale::parse;

    const FULL_TAG: &str = "zh-cmn-Hans-CN-boont-r-extended-sequence-x-private@\
        currency=USD;colcasefirst=lower;collation=traditional;colnumeric=no;\
        calendar=buddhist;numbers=latn;hours=h24";

    #[rstest]
    fn as_string_keeps_every_field() {
        let tag = parse(FULL_TAG).unwrap();

        assert_eq!(tag.as_string(), FULL_TAG);
        assert_eq!(tag.to_string(), FULL_TAG);
    }

    #[rstest]
    fn as_string_of_grandfathered_tag_is_the_literal() {
        let tag = parse("zh-xiang").unwrap();

        assert_that!(tag.as_string(), eq("zh-xiang"));
        assert_eq!(tag.grandfathered(), Some("zh-xiang"));
        assert_eq!(tag.language(), None);
    }

    #[rstest]
    fn keywords_serialize_in_fixed_order() {
        let tag = parse("ru-RU@hours=h23;calendar=buddhist;currency=USD").unwrap();

        assert_eq!(tag.as_string(), "ru-RU@currency=USD;calendar=buddhist;hours=h23");
    }

    #[rstest]
    #[case::language("ru-RU", |t: &LocaleTag| t.with_language("en"), "en-RU")]
    #[case::extended_language("zh-CN", |t: &LocaleTag| t.with_extended_language(Some("cmn")), "zh-cmn-CN")]
    #[case::script("zh", |t: &LocaleTag| t.with_script(Some("hANS")), "zh-Hans")]
    #[case::region("fr", |t: &LocaleTag| t.with_region(Some("ca")), "fr-CA")]
    #[case::variant("de-DE", |t: &LocaleTag| t.with_variant(Some("1901")), "de-DE-1901")]
    #[case::extension("en", |t: &LocaleTag| t.with_extension(Some("u-ca-gregory")), "en-u-ca-gregory")]
    #[case::private("en-GB-boont-x-private", |t: &LocaleTag| t.with_private(Some("newprivate")), "en-GB-boont-x-newprivate")]
    #[case::currency("uk-UA", |t: &LocaleTag| t.with_currency(Some("USD")), "uk-UA@currency=USD")]
    #[case::calendar("ru-RU", |t: &LocaleTag| t.with_calendar(Some("buddhist")), "ru-RU@calendar=buddhist")]
    #[case::colcasefirst("fr", |t: &LocaleTag| t.with_colcasefirst(Some("false")), "fr@colcasefirst=false")]
    #[case::collation("fr", |t: &LocaleTag| t.with_collation(Some("traditional")), "fr@collation=traditional")]
    #[case::colnumeric("fr", |t: &LocaleTag| t.with_colnumeric(Some("no")), "fr@colnumeric=no")]
    #[case::numbers("fr", |t: &LocaleTag| t.with_numbers(Some("latn")), "fr@numbers=latn")]
    #[case::hours("fr", |t: &LocaleTag| t.with_hours(Some("h12")), "fr@hours=h12")]
    #[case::clear_region("fr-CA", |t: &LocaleTag| t.with_region(None), "fr")]
    #[case::clear_keyword("fr@hours=h12", |t: &LocaleTag| t.with_hours(None), "fr")]
    fn with_derivation_leaves_original_untouched(
        #[case] input: &str,
        #[case] derive: fn(&LocaleTag) -> std::result::Result<LocaleTag, LocaleError>,
        #[case] expected: &str,
    ) {
        let original = parse(input).unwrap();

        let derived = derive(&original).unwrap();

        assert_eq!(derived.as_string(), expected);
        assert_eq!(original.as_string(), input);
    }

    #[rstest]
    #[case::script_too_short(|t: &LocaleTag| t.with_script(Some("Han")))]
    #[case::region_mixed(|t: &LocaleTag| t.with_region(Some("C1")))]
    #[case::variant_short(|t: &LocaleTag| t.with_variant(Some("abc")))]
    #[case::extension_x(|t: &LocaleTag| t.with_extension(Some("x-foo")))]
    #[case::extension_without_subtags(|t: &LocaleTag| t.with_extension(Some("u")))]
    #[case::private_too_long(|t: &LocaleTag| t.with_private(Some("abcdefghi")))]
    #[case::language_digits(|t: &LocaleTag| t.with_language("e1"))]
    #[case::keyword_separator(|t: &LocaleTag| t.with_calendar(Some("a;b")))]
    #[case::keyword_empty(|t: &LocaleTag| t.with_calendar(Some("")))]
    #[case::keyword_slash(|t: &LocaleTag| t.with_calendar(Some("a/b")))]
    #[case::keyword_space(|t: &LocaleTag| t.with_currency(Some("US D")))]
    fn with_derivation_rejects_invalid_values(
        #[case] derive: fn(&LocaleTag) -> std::result::Result<LocaleTag, LocaleError>,
    ) {
        let original = parse("en-US").unwrap();

        let result = derive(&original);

        assert!(matches!(result, Err(LocaleError::InvalidSubtag { .. })), "{result:?}");
    }

    #[rstest]
    fn with_region_on_grandfathered_tag_fails() {
        let tag = parse("i-klingon").unwrap();

        assert_eq!(
            tag.with_region(Some("US")),
            Err(LocaleError::Grandfathered { tag: "i-klingon", field: "region" })
        );
        assert_eq!(tag.with_region(None).unwrap().as_string(), "i-klingon");
    }

    #[rstest]
    fn with_region_on_private_use_tag_needs_language() {
        let tag = parse("x-fr-CH").unwrap();

        assert_eq!(tag.with_region(Some("US")), Err(LocaleError::MissingLanguage { field: "region" }));
        assert_eq!(tag.with_language("de").unwrap().as_string(), "de-x-fr-CH");
    }

    #[rstest]
    fn clearing_private_use_of_private_only_tag_fails() {
        let tag = parse("x-foo").unwrap();

        assert_eq!(tag.with_private(None), Err(LocaleError::MissingLanguage { field: "private use" }));
        assert_eq!(tag.with_private(Some("bar")).unwrap().as_string(), "x-bar");
        assert_eq!(tag.as_string(), "x-foo");
    }

    #[rstest]
    fn clearing_private_use_keeps_language() {
        let tag = parse("de-x-foo").unwrap().with_private(None).unwrap();

        assert_eq!(tag.as_string(), "de");
        assert_eq!(parse(&tag.as_string()).unwrap(), tag);
    }

    #[rstest]
    fn fallback_strips_one_level_at_a_time() {
        let tag = parse("en-GB-boont-x-private").unwrap();

        let first = tag.fallback_locale();
        assert_eq!(first.as_string(), "en-GB");

        let second = first.fallback_locale();
        assert_eq!(second.as_string(), "en");

        let third = second.fallback_locale();
        assert_eq!(third.as_string(), "en");
    }

    #[rstest]
    #[case("zh-Hans", "zh")]
    #[case("zh-Hans-CN", "zh-Hans")]
    #[case("de-DE-1901", "de-DE")]
    #[case("sl-rozaj-biske", "sl")]
    #[case("es-419", "es")]
    #[case("en@currency=USD", "en")]
    #[case("en-US@currency=USD", "en")]
    #[case("en-u-ca-gregory", "en")]
    #[case("zh-cmn", "zh")]
    #[case(FULL_TAG, "zh-Hans-CN")]
    #[case("zh-xiang", "zh-xiang")]
    #[case("x-fr-CH", "x-fr-CH")]
    fn fallback_locale_cases(#[case] input: &str, #[case] expected: &str) {
        let tag = parse(input).unwrap();

        assert_that!(tag.fallback_locale().as_string(), eq(expected));
    }

    #[rstest]
    #[case("en-Latn-GB-boont-u-co-phonebk-x-priv@calendar=buddhist")]
    #[case("zh-cmn-Hans-CN-1901")]
    #[case("sr-Cyrl")]
    #[case("en")]
    #[case("i-default")]
    fn fallback_reaches_fixed_point_within_four_steps(#[case] input: &str) {
        let chain: Vec<LocaleTag> = parse(input).unwrap().fallback_chain().collect();

        assert!(chain.len() <= 5, "{chain:?}");
        let last = chain.last().unwrap();
        assert_eq!(last.fallback_locale(), *last);
        for pair in chain.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[rstest]
    fn fallback_chain_lists_every_step() {
        let chain: Vec<String> =
            parse("en-Latn-GB-boont").unwrap().fallback_chain().map(|t| t.as_string()).collect();

        assert_that!(chain, elements_are![eq("en-Latn-GB-boont"), eq("en-Latn-GB"), eq("en-Latn"), eq("en")]);
    }

    #[rstest]
    fn equality_follows_canonical_string() {
        let lower = parse("zh-hans-cn").unwrap();
        let mixed = parse("ZH-Hans-cn").unwrap();

        assert_eq!(lower, mixed);
        assert_ne!(lower, parse("zh-Hans").unwrap());
    }

    #[rstest]
    #[case("currency", Some(Keyword::Currency))]
    #[case("colcasefirst", Some(Keyword::ColCaseFirst))]
    #[case("hours", Some(Keyword::Hours))]
    #[case("hour", None)]
    #[case("Currency", None)]
    fn keyword_from_name(#[case] name: &str, #[case] expected: Option<Keyword>) {
        assert_eq!(Keyword::from_name(name), expected);
    }
}
