//! Rewriting of page references after a rename.
//!
//! Names appear inside `href`/`src` attributes in URL-encoded form, so both
//! the old and the new name are percent-encoded before substitution. The
//! substitution is a plain literal replace: characters such as `(`, `.` or
//! `$` in a name carry no pattern meaning.

use std::fs;
use std::path::Path;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{ConvertError, IoAction};

/// Characters left as-is when encoding names: A-Z a-z 0-9 - . _ ~ /
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a file or directory name the way exported links encode it.
///
/// # Examples
///
/// ```
/// use tidy_convert::encode_name;
///
/// assert_eq!(encode_name("Page a1b2"), "Page%20a1b2");
/// assert_eq!(encode_name("Q&A (draft)"), "Q%26A%20%28draft%29");
/// ```
#[must_use]
pub fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, NAME_ENCODE_SET).to_string()
}

/// Replace every literal occurrence of encoded `old` with encoded `new`.
#[must_use]
pub fn replace_literal(content: &str, old: &str, new: &str) -> String {
    let old = encode_name(old);
    if old.is_empty() {
        return content.to_owned();
    }
    content.replace(&old, &encode_name(new))
}

/// Rewrite references to `old` as `new` inside the page at `path`.
///
/// The page is read fully, rewritten and written back in place.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the page cannot be read or written.
pub fn rewrite_references(path: &Path, old: &str, new: &str) -> Result<(), ConvertError> {
    let content = fs::read_to_string(path).map_err(ConvertError::io(IoAction::Read, path))?;
    let updated = replace_literal(&content, old, new);
    if updated != content {
        tracing::debug!(path = %path.display(), old, new, "Rewrote references");
    }
    fs::write(path, updated).map_err(ConvertError::io(IoAction::Write, path))
}
