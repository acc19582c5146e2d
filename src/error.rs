use thiserror::Error;

use crate::formatter::FormattingFailed;
use crate::locale::LocaleError;
use crate::store::StoreError;

/// Errors returned by [`Translator::resolve`](crate::Translator::resolve).
///
/// A missing message is not an error: resolution degrades to the id.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// The requested locale is not a valid tag.
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// The formatter rejected the resolved message.
    #[error(transparent)]
    Formatting(#[from] FormattingFailed),

    /// The message store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}
