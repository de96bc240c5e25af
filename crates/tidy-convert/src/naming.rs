//! Trailing-identifier removal and rename records.

/// One completed rename of a page stem or asset directory.
///
/// Records are scoped to the directory where the rename happened and are
/// handed to the caller so the parent page can patch its links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Name before cleaning (identifier still attached).
    pub old: String,
    /// Name after cleaning.
    pub new: String,
}

impl Rename {
    /// Create a rename record.
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Whether old and new names are the same.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

/// Strip the trailing space-separated identifier from a stem.
///
/// Everything before the last space is kept, so titles containing spaces
/// survive. A stem without any space is returned unchanged.
///
/// # Examples
///
/// ```
/// use tidy_convert::clean_stem;
///
/// assert_eq!(clean_stem("Page a1b2c3"), "Page");
/// assert_eq!(clean_stem("Reading List 0f3e"), "Reading List");
/// assert_eq!(clean_stem("Page"), "Page");
/// ```
#[must_use]
pub fn clean_stem(stem: &str) -> &str {
    stem.rsplit_once(' ').map_or(stem, |(title, _)| title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_stem_cuts_at_last_space() {
        assert_eq!(clean_stem("Page a1b2"), "Page");
        assert_eq!(clean_stem("Chapter One 9c8d7e"), "Chapter One");
        assert_eq!(clean_stem("a b c d"), "a b c");
    }

    #[test]
    fn test_clean_stem_without_space_is_unchanged() {
        assert_eq!(clean_stem("Page"), "Page");
        assert_eq!(clean_stem(""), "");
    }

    #[test]
    fn test_clean_stem_on_clean_name_is_idempotent() {
        let once = clean_stem("Notes 1234abcd");
        assert_eq!(clean_stem(once), once);
    }

    #[test]
    fn test_clean_stem_unicode_title() {
        assert_eq!(clean_stem("Café Über d00d"), "Café Über");
    }

    #[test]
    fn test_clean_stem_trailing_space() {
        assert_eq!(clean_stem("Page "), "Page");
    }

    #[test]
    fn test_rename_is_noop() {
        assert!(Rename::new("Page", "Page").is_noop());
        assert!(!Rename::new("Page a1", "Page").is_noop());
    }
}
