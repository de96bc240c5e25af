//! Recursive rename-and-relink conversion of one exported tree.
//!
//! Each directory is processed page by page. For every page the converter:
//!
//! 1. swaps the inline style block for the shared stylesheet link,
//! 2. renames the page and its asset directory to the cleaned name,
//! 3. rewrites the page's references to its own old name,
//! 4. recurses into the asset directory,
//! 5. applies every rename reported by the recursion to the page.
//!
//! Children are fully renamed before their parent page is patched, so a
//! page never ends up pointing at a name that is about to change.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, IoAction};
use crate::naming::{Rename, clean_stem};
use crate::references::rewrite_references;
use crate::style::replace_style;

/// Default extension of exported pages.
pub const DEFAULT_PAGE_EXTENSION: &str = "html";

/// Options shared by every directory of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// `href` of the stylesheet link, inserted verbatim in every page.
    pub stylesheet: String,
    /// Extension of page files, without the leading dot.
    pub page_extension: String,
    /// Report renames without touching the filesystem.
    pub dry_run: bool,
}

impl ConvertOptions {
    /// Options for a real run with the default page extension.
    pub fn new(stylesheet: impl Into<String>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
            page_extension: DEFAULT_PAGE_EXTENSION.to_owned(),
            dry_run: false,
        }
    }
}

/// Progress reported while converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertEvent<'a> {
    /// A batch is starting on tree `index` (1-based) of `total`.
    Tree {
        index: usize,
        total: usize,
        dir: &'a Path,
    },
    /// The converter is starting on a directory.
    Directory(&'a Path),
    /// A page of `dir` and its asset directory now carry the cleaned name.
    /// In dry-run mode the rename passed the destination checks.
    Renamed { dir: &'a Path, rename: &'a Rename },
}

/// Renames made while converting one directory.
#[derive(Debug, Default)]
struct DirRenames {
    /// Pages and asset directories renamed in the directory itself.
    direct: Vec<Rename>,
    /// Renames from nested directories, deepest last.
    below: Vec<Rename>,
}

impl DirRenames {
    /// Direct renames followed by nested ones.
    fn into_all(mut self) -> Vec<Rename> {
        self.direct.append(&mut self.below);
        self.direct
    }
}

/// Moves a dry run has planned in one directory.
///
/// Nothing is renamed during a dry run, so destinations are checked against
/// the disk as it would look after the earlier planned moves.
#[derive(Debug, Default)]
struct PlannedMoves {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl PlannedMoves {
    /// Record a planned move, failing like [`move_entry`] would.
    fn claim(&mut self, from: &Path, to: &Path) -> Result<(), ConvertError> {
        if from == to {
            return Ok(());
        }
        let on_disk = fs::symlink_metadata(to).is_ok() && !self.vacated.contains(to);
        if on_disk || self.claimed.contains(to) {
            return Err(conflict(from, to));
        }
        self.vacated.insert(from.to_path_buf());
        self.claimed.insert(to.to_path_buf());
        Ok(())
    }
}

/// Converts an exported tree in place.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use tidy_convert::{ConvertOptions, TreeConverter};
///
/// let converter = TreeConverter::new(ConvertOptions::new("../style.css"));
/// let renames = converter.convert(Path::new("export/Notes 1a2b"))?;
/// for rename in &renames {
///     println!("{} -> {}", rename.old, rename.new);
/// }
/// # Ok::<(), tidy_convert::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeConverter {
    options: ConvertOptions,
    /// `.{page_extension}`
    suffix: String,
}

impl TreeConverter {
    /// Create a converter.
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        let suffix = format!(".{}", options.page_extension);
        Self { options, suffix }
    }

    /// Options this converter was built with.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the tree rooted at `dir`.
    ///
    /// Returns the renames performed directly in `dir`. Renames in nested
    /// directories are applied to their parent pages and not returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NotADirectory`] if `dir` is not a directory,
    /// [`ConvertError::Conflict`] if a cleaned name is already taken, and
    /// aborts on the first filesystem failure. Renames performed before the
    /// failure are kept.
    pub fn convert(&self, dir: &Path) -> Result<Vec<Rename>, ConvertError> {
        self.convert_with(dir, |_| {})
    }

    /// Convert the tree rooted at `dir`, reporting progress.
    ///
    /// `on_event` gets a [`ConvertEvent::Directory`] as each directory is
    /// entered and a [`ConvertEvent::Renamed`] once each rename at any depth
    /// has happened, in that order. In dry-run mode this is the only record
    /// of nested renames.
    ///
    /// # Errors
    ///
    /// Same as [`TreeConverter::convert`]. A dry run reports the same
    /// conflicts a real run would hit.
    pub fn convert_with(
        &self,
        dir: &Path,
        mut on_event: impl FnMut(ConvertEvent<'_>),
    ) -> Result<Vec<Rename>, ConvertError> {
        if !dir.is_dir() {
            return Err(ConvertError::NotADirectory(dir.to_path_buf()));
        }
        Ok(self.convert_dir(dir, &mut on_event)?.direct)
    }

    fn convert_dir(
        &self,
        dir: &Path,
        on_event: &mut dyn FnMut(ConvertEvent<'_>),
    ) -> Result<DirRenames, ConvertError> {
        tracing::info!(dir = %dir.display(), "Cleaning directory");
        on_event(ConvertEvent::Directory(dir));

        let pages = self.list_pages(dir)?;
        let mut renames = DirRenames::default();
        let mut planned = PlannedMoves::default();
        for file_name in &pages {
            if let Some((rename, below)) =
                self.convert_page(dir, file_name, &mut planned, on_event)?
            {
                renames.direct.push(rename);
                renames.below.extend(below);
            }
        }
        Ok(renames)
    }

    /// Convert one page and its asset directory.
    ///
    /// Returns the page's own rename and every rename made beneath it, or
    /// `None` if the page vanished since the directory was listed.
    fn convert_page(
        &self,
        dir: &Path,
        file_name: &str,
        planned: &mut PlannedMoves,
        on_event: &mut dyn FnMut(ConvertEvent<'_>),
    ) -> Result<Option<(Rename, Vec<Rename>)>, ConvertError> {
        let stem = &file_name[..file_name.len() - self.suffix.len()];
        let cleaned = clean_stem(stem);

        let page_path = dir.join(file_name);
        if !page_path.is_file() {
            tracing::debug!(path = %page_path.display(), "Page no longer exists, skipping");
            return Ok(None);
        }

        let asset_dir = dir.join(stem);
        let has_subpages = asset_dir.is_dir();
        let rename = Rename::new(stem, cleaned);
        let new_page_path = dir.join(format!("{cleaned}{}", self.suffix));
        let new_asset_dir = dir.join(cleaned);

        if self.options.dry_run {
            planned.claim(&page_path, &new_page_path)?;
            if has_subpages {
                planned.claim(&asset_dir, &new_asset_dir)?;
            }
            on_event(ConvertEvent::Renamed { dir, rename: &rename });
            let below = if has_subpages {
                self.convert_dir(&asset_dir, on_event)?.into_all()
            } else {
                Vec::new()
            };
            return Ok(Some((rename, below)));
        }

        // Style first: the page is still at its original path.
        replace_style(&page_path, &self.options.stylesheet)?;
        move_entry(&page_path, &new_page_path)?;
        if has_subpages {
            move_entry(&asset_dir, &new_asset_dir)?;
        }
        on_event(ConvertEvent::Renamed { dir, rename: &rename });

        rewrite_references(&new_page_path, stem, cleaned)?;

        if !has_subpages {
            return Ok(Some((rename, Vec::new())));
        }

        // Pages may link straight into any depth of their subtree.
        let below = self.convert_dir(&new_asset_dir, on_event)?.into_all();
        for nested in &below {
            rewrite_references(&new_page_path, &nested.old, &nested.new)?;
        }
        Ok(Some((rename, below)))
    }

    /// File names of the pages directly inside `dir`, sorted by name.
    fn list_pages(&self, dir: &Path) -> Result<Vec<String>, ConvertError> {
        let entries = fs::read_dir(dir).map_err(ConvertError::io(IoAction::List, dir))?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(ConvertError::io(IoAction::List, dir))?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if name.len() > self.suffix.len()
                && name.ends_with(&self.suffix)
                && entry.path().is_file()
            {
                pages.push(name);
            }
        }
        pages.sort();
        Ok(pages)
    }
}

fn conflict(from: &Path, to: &Path) -> ConvertError {
    ConvertError::Conflict {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
    }
}

/// Rename `from` to `to`, refusing to replace an existing entry.
///
/// Renaming an entry to its own name does nothing.
fn move_entry(from: &Path, to: &Path) -> Result<(), ConvertError> {
    if from == to {
        return Ok(());
    }
    if fs::symlink_metadata(to).is_ok() {
        return Err(conflict(from, to));
    }
    tracing::debug!(from = %from.display(), to = %to.display(), "Renaming");
    fs::rename(from, to).map_err(ConvertError::io(IoAction::Rename, from))
}
