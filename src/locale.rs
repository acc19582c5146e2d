//! BCP 47 ロケールタグ
//!
//! [`LocaleTag`] は [`parse`] (または `str::parse`) でのみ作成され、未検証の文字列から
//! 組み立てられることはない。タグは不変で、`with_*` は常に新しい値を返す。

/// Locale tag errors
mod error;
/// Legacy tags exempted from the regular grammar
mod grandfathered;
/// Recursive-descent parser for the tag grammar
mod parser;
/// The tag value type
mod tag;

pub use error::LocaleError;
pub use parser::parse;
pub use tag::{
    FallbackChain,
    Keyword,
    LocaleTag,
};
