//! Colored terminal output for conversion results.

use std::cell::RefCell;
use std::path::Path;

use console::{Style, Term};
use tidy_convert::{ConvertError, Rename};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
    /// Lines kept in memory instead of written, for tests.
    captured: Option<RefCell<Vec<String>>>,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
            captured: None,
        }
    }

    /// Formatter that records lines instead of printing them.
    #[cfg(test)]
    pub(crate) fn capture() -> Self {
        Self {
            captured: Some(RefCell::new(Vec::new())),
            ..Self::new()
        }
    }

    /// Lines recorded by a [`Output::capture`] formatter.
    #[cfg(test)]
    pub(crate) fn lines(&self) -> Vec<String> {
        self.captured
            .as_ref()
            .map(|lines| lines.borrow().clone())
            .unwrap_or_default()
    }

    fn write_line(&self, line: &str) {
        match &self.captured {
            Some(lines) => lines.borrow_mut().push(line.to_owned()),
            None => {
                self.write_line(line);
            }
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        self.write_line(msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Announce the start of a tree in a batch.
    pub(crate) fn tree(&self, index: usize, total: usize, dir: &Path) {
        let msg = format!("Note {index}/{total}: {}", dir.display());
        self.write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Report a directory as the converter enters it.
    pub(crate) fn cleaning(&self, dir: &Path) {
        self.write_line(&format!("Cleaning {}", dir.display()));
    }

    /// Announce that nothing will be written.
    pub(crate) fn dry_run_banner(&self) {
        self.write_line(
            &self
                .cyan_bold
                .apply_to("[DRY RUN] No files will be changed.")
                .to_string(),
        );
    }

    /// Print one rename a dry run would perform.
    pub(crate) fn planned_rename(&self, dir: &Path, rename: &Rename) {
        let line = if rename.is_noop() {
            self.dim
                .apply_to(format!("  {}/{} (unchanged)", dir.display(), rename.old))
                .to_string()
        } else {
            format!("  {}/{} -> {}", dir.display(), rename.old, rename.new)
        };
        self.write_line(&line);
    }

    /// Report a converted tree (green).
    pub(crate) fn converted(&self, dir: &Path, renames: &[Rename]) {
        let renamed = renames.iter().filter(|r| !r.is_noop()).count();
        let msg = format!(
            "Converted {}: {renamed} of {} top-level pages renamed",
            dir.display(),
            renames.len()
        );
        self.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Report a tree that failed part-way (red), with a reminder that it is
    /// left partially converted.
    pub(crate) fn failed(&self, dir: &Path, err: &ConvertError) {
        self.error(&format!("Failed {}: {err}", dir.display()));
        self.write_line(
            &self
                .yellow
                .apply_to("  Renames made before the failure were kept.")
                .to_string(),
        );
    }
}
