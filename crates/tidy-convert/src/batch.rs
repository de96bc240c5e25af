//! Conversion of a folder holding several independent exports.
//!
//! Every immediate sub-directory of the root is its own tree. Trees never
//! reference each other, so each one is converted on its own and a failure
//! in one tree does not stop the rest.

use std::fs;
use std::path::{Path, PathBuf};

use crate::converter::{ConvertEvent, TreeConverter};
use crate::error::{ConvertError, IoAction};
use crate::naming::Rename;

/// Outcome of converting one tree.
#[derive(Debug)]
pub struct TreeReport {
    /// Root directory of the tree.
    pub dir: PathBuf,
    /// Renames made directly in the tree root, or the error that stopped it.
    pub result: Result<Vec<Rename>, ConvertError>,
}

impl TreeReport {
    /// Whether the tree converted without error.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a batch conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One report per tree, in the order the trees were converted.
    pub trees: Vec<TreeReport>,
}

impl BatchReport {
    /// Reports of trees that failed.
    pub fn failed(&self) -> impl Iterator<Item = &TreeReport> {
        self.trees.iter().filter(|t| !t.is_ok())
    }

    /// Number of trees that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}

/// Tree roots directly inside `root`, sorted by name.
///
/// Hidden directories are skipped.
///
/// # Errors
///
/// Returns [`ConvertError::NotADirectory`] if `root` is not a directory, or
/// [`ConvertError::Io`] if it cannot be listed.
pub fn list_trees(root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !root.is_dir() {
        return Err(ConvertError::NotADirectory(root.to_path_buf()));
    }

    let mut trees = Vec::new();
    for entry in fs::read_dir(root).map_err(ConvertError::io(IoAction::List, root))? {
        let entry = entry.map_err(ConvertError::io(IoAction::List, root))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            trees.push(path);
        }
    }
    trees.sort();
    Ok(trees)
}

/// Convert every tree directly inside `root`.
///
/// # Errors
///
/// Only fails if `root` itself cannot be listed. Per-tree failures are
/// recorded in the returned [`BatchReport`].
pub fn convert_many(converter: &TreeConverter, root: &Path) -> Result<BatchReport, ConvertError> {
    convert_many_with(converter, root, |_| {})
}

/// Convert every tree directly inside `root`, reporting progress.
///
/// `on_event` gets a [`ConvertEvent::Tree`] before each tree, followed by
/// that tree's events from [`TreeConverter::convert_with`].
///
/// # Errors
///
/// Same as [`convert_many`].
pub fn convert_many_with(
    converter: &TreeConverter,
    root: &Path,
    mut on_event: impl FnMut(ConvertEvent<'_>),
) -> Result<BatchReport, ConvertError> {
    let trees = list_trees(root)?;
    let total = trees.len();

    let mut report = BatchReport::default();
    for (index, dir) in trees.into_iter().enumerate() {
        tracing::info!(note = index + 1, total, dir = %dir.display(), "Converting note");
        on_event(ConvertEvent::Tree {
            index: index + 1,
            total,
            dir: &dir,
        });
        let result = converter.convert_with(&dir, &mut on_event);
        if let Err(e) = &result {
            tracing::warn!(dir = %dir.display(), error = %e, "Note conversion failed");
        }
        report.trees.push(TreeReport { dir, result });
    }
    Ok(report)
}
