//! Replacement of the inline `<style>` block with a stylesheet link.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::error::{ConvertError, IoAction};

/// First `<style>` up to the nearest `</style>`, spanning lines.
static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style>.*?</style>").unwrap());

/// Build the `<link>` tag pointing at `stylesheet`.
#[must_use]
pub fn stylesheet_link(stylesheet: &str) -> String {
    format!(r#"<link rel="stylesheet" type="text/css" href="{stylesheet}"/>"#)
}

/// Replace the first style block in `content` with a link to `stylesheet`.
///
/// Returns `None` when the document has no style block.
///
/// # Examples
///
/// ```
/// use tidy_convert::replace_style_block;
///
/// let html = "<html><style>body{color:red}</style></html>";
/// assert_eq!(
///     replace_style_block(html, "style.css").as_deref(),
///     Some(r#"<html><link rel="stylesheet" type="text/css" href="style.css"/></html>"#),
/// );
/// assert_eq!(replace_style_block("<html></html>", "style.css"), None);
/// ```
#[must_use]
pub fn replace_style_block(content: &str, stylesheet: &str) -> Option<String> {
    if !STYLE_BLOCK_RE.is_match(content) {
        return None;
    }
    let link = stylesheet_link(stylesheet);
    Some(
        STYLE_BLOCK_RE
            .replacen(content, 1, NoExpand(&link))
            .into_owned(),
    )
}

/// Swap the inline style block of the page at `path` for a stylesheet link.
///
/// Pages without a style block are left untouched.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the page cannot be read or written.
pub fn replace_style(path: &Path, stylesheet: &str) -> Result<(), ConvertError> {
    let content = fs::read_to_string(path).map_err(ConvertError::io(IoAction::Read, path))?;
    let Some(updated) = replace_style_block(&content, stylesheet) else {
        tracing::debug!(path = %path.display(), "No style block");
        return Ok(());
    };
    fs::write(path, updated).map_err(ConvertError::io(IoAction::Write, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_style_block_simple() {
        let out = replace_style_block("<html><style>body{color:red}</style></html>", "style.css");
        assert_eq!(
            out.unwrap(),
            r#"<html><link rel="stylesheet" type="text/css" href="style.css"/></html>"#
        );
    }

    #[test]
    fn test_replace_style_block_multiline() {
        let html = "<head>\n<style>\nbody {\n  margin: 0;\n}\n</style>\n</head>";
        let out = replace_style_block(html, "../notion.css").unwrap();
        assert_eq!(
            out,
            "<head>\n<link rel=\"stylesheet\" type=\"text/css\" href=\"../notion.css\"/>\n</head>"
        );
    }

    #[test]
    fn test_replace_style_block_only_first() {
        let html = "<style>a{}</style><p>x</p><style>b{}</style>";
        let out = replace_style_block(html, "s.css").unwrap();
        assert_eq!(
            out,
            r#"<link rel="stylesheet" type="text/css" href="s.css"/><p>x</p><style>b{}</style>"#
        );
    }

    #[test]
    fn test_replace_style_block_stops_at_first_close() {
        let html = "<style>a{}</style>keep</style>";
        let out = replace_style_block(html, "s.css").unwrap();
        assert!(out.ends_with("/>keep</style>"));
    }

    #[test]
    fn test_replace_style_block_dollar_in_href_is_verbatim() {
        let out = replace_style_block("<style></style>", "$1/style.css").unwrap();
        assert_eq!(
            out,
            r#"<link rel="stylesheet" type="text/css" href="$1/style.css"/>"#
        );
    }

    #[test]
    fn test_replace_style_block_none_without_style() {
        assert_eq!(replace_style_block("<html><body/></html>", "s.css"), None);
        // Attributes on the tag are not the exported shape.
        assert_eq!(replace_style_block(r#"<style media="x"></style>"#, "s.css"), None);
    }

    #[test]
    fn test_replace_style_without_block_is_byte_identical() {
        let temp_dir = tempfile::tempdir().unwrap();
        let page = temp_dir.path().join("page.html");
        let original = "<html>\r\n<body>no style</body>\r\n</html>";
        fs::write(&page, original).unwrap();

        replace_style(&page, "style.css").unwrap();

        assert_eq!(fs::read_to_string(&page).unwrap(), original);
    }

    #[test]
    fn test_replace_style_rewrites_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let page = temp_dir.path().join("page.html");
        fs::write(&page, "<html><style>p{}</style></html>").unwrap();

        replace_style(&page, "style.css").unwrap();

        assert_eq!(
            fs::read_to_string(&page).unwrap(),
            r#"<html><link rel="stylesheet" type="text/css" href="style.css"/></html>"#
        );
    }

    #[test]
    fn test_replace_style_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = replace_style(&temp_dir.path().join("nope.html"), "style.css");
        assert!(result.is_err());
    }
}
