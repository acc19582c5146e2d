//! ロケールタグの構文解析

use std::collections::BTreeMap;

use super::grandfathered;
use super::tag::{
    Keyword,
    Subtags,
};
use super::{
    LocaleError,
    LocaleTag,
};

/// Upper bound on extended language subtags after a 2-3 letter language.
const MAX_EXTENDED_LANGUAGES: usize = 2;

/// Parses a BCP 47 tag optionally followed by `@key=value(;key=value)*`.
///
/// Grandfathered tags are matched against the registry list first, then the
/// `langtag` and `privateuse` productions are tried. Unknown keyword keys are
/// ignored.
///
/// # Errors
/// [`LocaleError::Malformed`] when the input matches none of the alternatives.
///
/// # Examples
/// ```
/// use i18n_resolver::locale::parse;
///
/// let tag = parse("fr-latn-ca@collation=traditional;foo=bar")?;
/// assert_eq!(tag.script(), Some("Latn"));
/// assert_eq!(tag.region(), Some("CA"));
/// assert_eq!(tag.as_string(), "fr-Latn-CA@collation=traditional");
///
/// assert!(parse("invalid-locale_zz-123").is_err());
/// # Ok::<(), i18n_resolver::locale::LocaleError>(())
/// ```
pub fn parse(raw: &str) -> Result<LocaleTag, LocaleError> {
    let (body, keyword_block) = match raw.split_once('@') {
        Some((body, keywords)) => (body, Some(keywords)),
        None => (raw, None),
    };

    if let Some(tag) = grandfathered::lookup(body) {
        return Ok(LocaleTag::grandfathered_tag(tag));
    }

    let mut cursor = Cursor::new(body);
    let mut subtags = if cursor.peek().is_some_and(is_private_prefix) {
        parse_private_use_tag(&mut cursor)
    } else {
        parse_langtag(&mut cursor)
    }
    .ok_or_else(|| LocaleError::malformed(raw, cursor.position()))?;

    if let Some(block) = keyword_block {
        subtags.keywords = parse_keywords(block);
    }

    Ok(LocaleTag::structured(subtags))
}

/// `langtag = language ["-" extlang] ["-" script] ["-" region] *("-" variant)
/// *("-" extension) ["-" privateuse]`
fn parse_langtag(cursor: &mut Cursor<'_>) -> Option<Subtags> {
    let language = cursor.next_if(is_language)?;
    let extended_language = if language.len() <= 3 {
        cursor.take_joined(is_extended_language, MAX_EXTENDED_LANGUAGES)
    } else {
        None
    };
    let script = cursor.next_if(is_script).map(normalize_script);
    let region = cursor.next_if(is_region).map(str::to_ascii_uppercase);
    let variant = cursor.take_joined(is_variant, usize::MAX);
    let extension = parse_extensions(cursor)?;
    let private = if cursor.next_if(is_private_prefix).is_some() {
        Some(cursor.take_joined(is_private_subtag, usize::MAX)?)
    } else {
        None
    };

    cursor.is_finished().then(|| Subtags {
        language: Some(language.to_ascii_lowercase()),
        extended_language,
        script,
        region,
        variant,
        extension,
        private,
        keywords: BTreeMap::new(),
    })
}

/// `privateuse = "x" 1*("-" (1*8alphanum))`
fn parse_private_use_tag(cursor: &mut Cursor<'_>) -> Option<Subtags> {
    cursor.next_if(is_private_prefix)?;
    let private = cursor.take_joined(is_private_subtag, usize::MAX)?;
    cursor.is_finished().then(|| Subtags { private: Some(private), ..Subtags::default() })
}

/// Zero or more `singleton 1*("-" (2*8alphanum))` sequences.
///
/// Returns `None` when a singleton is not followed by any subtag, and
/// `Some(None)` when there is no extension at all.
fn parse_extensions(cursor: &mut Cursor<'_>) -> Option<Option<String>> {
    let mut sequences = Vec::new();
    while let Some(singleton) = cursor.next_if(is_singleton) {
        let subtags = cursor.take_joined(is_extension_subtag, usize::MAX)?;
        sequences.push(format!("{singleton}-{subtags}"));
    }
    Some((!sequences.is_empty()).then(|| sequences.join("-")))
}

/// Splits the keyword block on `;` and each pair on its first `=`.
fn parse_keywords(block: &str) -> BTreeMap<Keyword, String> {
    let mut keywords = BTreeMap::new();
    for pair in block.split(';').filter(|pair| !pair.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            tracing::trace!(pair, "ignoring keyword without value");
            continue;
        };
        match Keyword::from_name(key) {
            Some(keyword) if is_keyword_value(value) => {
                keywords.insert(keyword, value.to_string());
            }
            Some(_) => tracing::trace!(key, value, "ignoring invalid keyword value"),
            None => tracing::trace!(key, "ignoring unrecognized keyword"),
        }
    }
    keywords
}

/// Subtags of the input with their byte offsets.
struct Cursor<'a> {
    /// `(offset, subtag)` pairs in input order.
    subtags: Vec<(usize, &'a str)>,
    /// Index of the next unconsumed subtag.
    index: usize,
    /// Offset reported once every subtag is consumed.
    end: usize,
}

impl<'a> Cursor<'a> {
    /// `-` で分割し、各サブタグの開始位置を記録する
    fn new(input: &'a str) -> Self {
        let mut offset = 0;
        let subtags = input
            .split('-')
            .map(|subtag| {
                let start = offset;
                offset += subtag.len() + 1;
                (start, subtag)
            })
            .collect();
        Self { subtags, index: 0, end: input.len() }
    }

    /// 次のサブタグを消費せずに返す
    fn peek(&self) -> Option<&'a str> {
        self.subtags.get(self.index).map(|(_, subtag)| *subtag)
    }

    /// 次のサブタグが `predicate` を満たせば消費する
    fn next_if(&mut self, predicate: fn(&str) -> bool) -> Option<&'a str> {
        let subtag = self.peek().filter(|subtag| predicate(subtag))?;
        self.index += 1;
        Some(subtag)
    }

    /// Consumes up to `max` consecutive subtags matching `predicate`.
    fn take_joined(&mut self, predicate: fn(&str) -> bool, max: usize) -> Option<String> {
        let mut taken = Vec::new();
        while taken.len() < max {
            let Some(subtag) = self.next_if(predicate) else {
                break;
            };
            taken.push(subtag);
        }
        (!taken.is_empty()).then(|| taken.join("-"))
    }

    /// Byte offset of the next unconsumed subtag.
    fn position(&self) -> usize {
        self.subtags.get(self.index).map_or(self.end, |(offset, _)| *offset)
    }

    /// 全てのサブタグを消費したか
    fn is_finished(&self) -> bool {
        self.index >= self.subtags.len()
    }
}

/// ASCII 英字のみ
fn is_alpha(subtag: &str) -> bool {
    subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

/// ASCII 英数字のみ
fn is_alphanumeric(subtag: &str) -> bool {
    subtag.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// 2-3 letters, or the reserved/registered 4-8 letter forms.
pub(super) fn is_language(subtag: &str) -> bool {
    (2..=8).contains(&subtag.len()) && is_alpha(subtag)
}

/// `extlang`: 3 文字の英字
fn is_extended_language(subtag: &str) -> bool {
    subtag.len() == 3 && is_alpha(subtag)
}

/// `script`: 4 文字の英字
pub(super) fn is_script(subtag: &str) -> bool {
    subtag.len() == 4 && is_alpha(subtag)
}

/// `region`: 2 文字の英字、または 3 桁の数字
pub(super) fn is_region(subtag: &str) -> bool {
    match subtag.len() {
        2 => is_alpha(subtag),
        3 => subtag.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// `variant`: 5-8 文字の英数字、または数字で始まる 4 文字
fn is_variant(subtag: &str) -> bool {
    match subtag.len() {
        5..=8 => is_alphanumeric(subtag),
        4 => subtag.starts_with(|c: char| c.is_ascii_digit()) && is_alphanumeric(subtag),
        _ => false,
    }
}

/// 拡張を導く 1 文字 (`x` を除く)
fn is_singleton(subtag: &str) -> bool {
    subtag.len() == 1 && is_alphanumeric(subtag) && !is_private_prefix(subtag)
}

/// 拡張のサブタグ: 2-8 文字の英数字
fn is_extension_subtag(subtag: &str) -> bool {
    (2..=8).contains(&subtag.len()) && is_alphanumeric(subtag)
}

/// 私用タグの開始 (`x` / `X`)
fn is_private_prefix(subtag: &str) -> bool {
    subtag.eq_ignore_ascii_case("x")
}

/// 私用サブタグ: 1-8 文字の英数字
fn is_private_subtag(subtag: &str) -> bool {
    (1..=8).contains(&subtag.len()) && is_alphanumeric(subtag)
}

/// Runs `rule` over the whole of `value` and requires it to consume everything.
fn consumes_all(value: &str, rule: impl FnOnce(&mut Cursor<'_>) -> bool) -> bool {
    let mut cursor = Cursor::new(value);
    rule(&mut cursor) && cursor.is_finished()
}

/// `-` 区切りの `extlang` 列 (最大 2 個)
pub(super) fn is_extended_language_sequence(value: &str) -> bool {
    consumes_all(value, |c| c.take_joined(is_extended_language, MAX_EXTENDED_LANGUAGES).is_some())
}

/// `-` 区切りの `variant` 列
pub(super) fn is_variant_sequence(value: &str) -> bool {
    consumes_all(value, |c| c.take_joined(is_variant, usize::MAX).is_some())
}

/// シングルトンから始まる拡張列
pub(super) fn is_extension_sequence(value: &str) -> bool {
    consumes_all(value, |c| parse_extensions(c).is_some_and(|extension| extension.is_some()))
}

/// `x-` を除いた私用サブタグ列
pub(super) fn is_private_sequence(value: &str) -> bool {
    consumes_all(value, |c| c.take_joined(is_private_subtag, usize::MAX).is_some())
}

/// ICU keyword values: ASCII alphanumerics, `-` and `_`.
pub(super) fn is_keyword_value(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Lowercase, then uppercase the first letter.
pub(super) fn normalize_script(script: &str) -> String {
    let lower = script.to_ascii_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut normalized = first.to_ascii_uppercase().to_string();
        normalized.push_str(chars.as_str());
        normalized
    })
}
