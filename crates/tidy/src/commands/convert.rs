//! `tidy` conversion command implementation.

use std::path::PathBuf;

use clap::Args;
use tidy_config::{CliSettings, Config};
use tidy_convert::{ConvertEvent, ConvertOptions, TreeConverter, convert_many_with};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for a conversion run.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Exported tree to convert (with -m: folder of exported trees).
    dir: PathBuf,

    /// Stylesheet href written in place of each page's <style> block
    /// (overrides config).
    stylesheet: Option<String>,

    /// Convert every sub-directory of DIR as an independent export.
    #[arg(short, long)]
    multiple: bool,

    /// Report renames without changing any file.
    #[arg(long)]
    dry_run: bool,

    /// Extension of page files, without the dot (overrides config).
    #[arg(long)]
    page_extension: Option<String>,

    /// Path to configuration file (default: auto-discover tidy.toml).
    #[arg(short, long, env = "TIDY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, a single tree fails to
    /// convert, or any tree of a batch fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        self.run(&Output::new())
    }

    fn run(&self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            stylesheet: self.stylesheet.clone(),
            page_extension: self.page_extension.clone(),
            dry_run: self.dry_run.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let options = ConvertOptions {
            stylesheet: config.require_stylesheet()?.to_owned(),
            page_extension: config.convert.page_extension.clone(),
            dry_run: config.convert.dry_run,
        };
        let converter = TreeConverter::new(options);

        if converter.options().dry_run {
            output.dry_run_banner();
        }

        if self.multiple {
            self.convert_batch(&converter, output)
        } else {
            self.convert_tree(&converter, output)
        }
    }

    fn convert_tree(&self, converter: &TreeConverter, output: &Output) -> Result<(), CliError> {
        output.info(&format!("Converting {}...", self.dir.display()));
        let on_event = progress(converter.options().dry_run, output);
        let renames = converter.convert_with(&self.dir, on_event)?;
        output.converted(&self.dir, &renames);
        Ok(())
    }

    fn convert_batch(&self, converter: &TreeConverter, output: &Output) -> Result<(), CliError> {
        let on_event = progress(converter.options().dry_run, output);
        let report = convert_many_with(converter, &self.dir, on_event)?;
        let total = report.trees.len();
        if total == 0 {
            output.info(&format!("No notes found in {}", self.dir.display()));
            return Ok(());
        }

        for tree in &report.trees {
            match &tree.result {
                Ok(renames) => output.converted(&tree.dir, renames),
                Err(e) => output.failed(&tree.dir, e),
            }
        }

        match report.failure_count() {
            0 => Ok(()),
            failed => Err(CliError::Batch { failed, total }),
        }
    }
}

/// Print progress events; renames are listed only in dry-run mode.
fn progress(dry_run: bool, output: &Output) -> impl FnMut(ConvertEvent<'_>) + '_ {
    move |event| match event {
        ConvertEvent::Tree { index, total, dir } => output.tree(index, total, dir),
        ConvertEvent::Directory(dir) => output.cleaning(dir),
        ConvertEvent::Renamed { dir, rename } => {
            if dry_run {
                output.planned_rename(dir, rename);
            }
        }
    }
}
