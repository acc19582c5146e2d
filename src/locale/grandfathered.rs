//! 登録済みの grandfathered タグ

/// Irregular grandfathered tags (RFC 5646 section 2.2.8).
const IRREGULAR: &[&str] = &[
    "en-GB-oed",
    "i-ami",
    "i-bnn",
    "i-default",
    "i-enochian",
    "i-hak",
    "i-klingon",
    "i-lux",
    "i-mingo",
    "i-navajo",
    "i-pwn",
    "i-tao",
    "i-tay",
    "i-tsu",
    "sgn-BE-FR",
    "sgn-BE-NL",
    "sgn-CH-DE",
];

/// Regular grandfathered tags. Some of them would also satisfy the
/// `langtag` production; the fixed set takes precedence.
const REGULAR: &[&str] = &[
    "art-lojban",
    "cel-gaulish",
    "no-bok",
    "no-nyn",
    "zh-guoyu",
    "zh-hakka",
    "zh-min",
    "zh-min-nan",
    "zh-xiang",
];

/// Returns the canonical static form of `tag` if it is grandfathered.
///
/// Matching is exact: the registry spelling is the only accepted one.
pub(super) fn lookup(tag: &str) -> Option<&'static str> {
    IRREGULAR.iter().chain(REGULAR).copied().find(|candidate| *candidate == tag)
}
