//! CLI error types.

use tidy_config::ConfigError;
use tidy_convert::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{failed} of {total} notes failed to convert")]
    Batch { failed: usize, total: usize },
}
