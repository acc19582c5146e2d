//! ロケールタグのエラー型

use thiserror::Error;

/// Errors raised while parsing or deriving a [`LocaleTag`](super::LocaleTag).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input does not match the BCP 47 grammar, a grandfathered tag or a
    /// private-use tag.
    #[error("'{input}' is not a valid BCP 47 locale tag (unexpected input at byte {position})")]
    Malformed {
        /// The rejected input, verbatim.
        input: String,
        /// Byte offset of the first subtag that breaks the grammar.
        position: usize,
    },

    /// A `with_*` derivation received a value that does not match the
    /// production of that field.
    #[error("'{value}' is not a valid {field} subtag")]
    InvalidSubtag { field: &'static str, value: String },

    /// Grandfathered tags carry no structured fields.
    #[error("cannot set {field} on grandfathered tag '{tag}'")]
    Grandfathered { tag: &'static str, field: &'static str },

    /// Structured fields other than private use need a language subtag.
    #[error("cannot set {field} on a tag without a language subtag")]
    MissingLanguage { field: &'static str },
}

impl LocaleError {
    /// `input` の `position` バイト目で文法に合わなくなった
    pub(super) fn malformed(input: &str, position: usize) -> Self {
        Self::Malformed { input: input.to_string(), position }
    }

    /// `with_*` に渡された値が `field` の文法に合わない
    pub(super) fn invalid_subtag(field: &'static str, value: &str) -> Self {
        Self::InvalidSubtag { field, value: value.to_string() }
    }
}
