//! Conversion error types.

use std::fmt;
use std::path::{Path, PathBuf};

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    /// Reading a page.
    Read,
    /// Writing a page back in place.
    Write,
    /// Renaming a page or asset directory.
    Rename,
    /// Listing directory entries.
    List,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Rename => "rename",
            Self::List => "list",
        };
        f.write_str(verb)
    }
}

/// Error returned by the tree converter.
///
/// Any failure aborts the traversal immediately. Renames already applied
/// are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Underlying filesystem failure with the path involved.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        /// Operation that failed.
        action: IoAction,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Original I/O error.
        source: std::io::Error,
    },

    /// A tree or batch root is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Renaming would replace an existing entry.
    #[error("cannot rename {} to {}: destination already exists", .from.display(), .to.display())]
    Conflict {
        /// Entry being renamed.
        from: PathBuf,
        /// Occupied destination.
        to: PathBuf,
    },
}

impl ConvertError {
    /// Build a mapper attaching `action` and `path` to an I/O error.
    pub(crate) fn io(action: IoAction, path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
