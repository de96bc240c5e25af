//! Home directory and environment variable expansion for stylesheet paths.

use crate::ConfigError;

/// Expand a leading `~`, `$VAR`, `${VAR}` and `${VAR:-default}` in `value`.
///
/// An unset variable without a default is an error naming `field`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with_home(value, field, home_dir)
}

fn expand_with_home(
    value: &str,
    field: &str,
    home: impl FnOnce() -> Option<String>,
) -> Result<String, ConfigError> {
    let lookup = |var: &str| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    };
    match shellexpand::full_with_context(value, home, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        }),
    }
}

/// Home directory as UTF-8, if there is one.
fn home_dir() -> Option<String> {
    dirs::home_dir()?.into_os_string().into_string().ok()
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIELD: &str = "convert.stylesheet";

    fn home() -> Option<String> {
        Some("/home/reader".to_owned())
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let result = expand_with_home("~/styles/notion.css", FIELD, home).unwrap();
        assert_eq!(result, "/home/reader/styles/notion.css");
    }

    #[test]
    fn test_tilde_without_home_is_kept() {
        let result = expand_with_home("~/notion.css", FIELD, || None).unwrap();
        assert_eq!(result, "~/notion.css");
    }

    #[test]
    fn test_tilde_inside_path_is_kept() {
        let result = expand_with_home("../~old/style.css", FIELD, home).unwrap();
        assert_eq!(result, "../~old/style.css");
    }

    #[test]
    fn test_relative_href_unchanged() {
        assert_eq!(expand_path("../style.css", FIELD).unwrap(), "../style.css");
    }

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TIDY_TEST_CSS_DIR", "/shared");
        }
        assert_eq!(
            expand_path("${TIDY_TEST_CSS_DIR}/notion.css", FIELD).unwrap(),
            "/shared/notion.css"
        );
        assert_eq!(
            expand_path("$TIDY_TEST_CSS_DIR/notion.css", FIELD).unwrap(),
            "/shared/notion.css"
        );
        unsafe {
            std::env::remove_var("TIDY_TEST_CSS_DIR");
        }
    }

    #[test]
    fn test_tilde_and_var_together() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TIDY_TEST_THEME", "dark");
        }
        let result = expand_with_home("~/css/${TIDY_TEST_THEME}.css", FIELD, home).unwrap();
        assert_eq!(result, "/home/reader/css/dark.css");
        unsafe {
            std::env::remove_var("TIDY_TEST_THEME");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TIDY_TEST_UNSET");
        }
        let result = expand_path("${TIDY_TEST_UNSET:-../style.css}", FIELD).unwrap();
        assert_eq!(result, "../style.css");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TIDY_TEST_MISSING");
        }
        let err = expand_path("${TIDY_TEST_MISSING}", FIELD).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TIDY_TEST_MISSING"));
        assert!(err.to_string().contains(FIELD));
    }

    #[test]
    fn test_lone_dollar_kept() {
        assert_eq!(expand_path("price$.css", FIELD).unwrap(), "price$.css");
    }
}
