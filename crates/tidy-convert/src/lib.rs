//! Cleanup of exported HTML note trees.
//!
//! Note-taking exports name every page `Title <id>.html` next to an asset
//! directory `Title <id>/` holding its images and nested sub-pages. This
//! crate provides:
//!
//! - [`TreeConverter`]: strips the trailing identifier from every page and
//!   asset directory, rewrites links to match and swaps each page's inline
//!   `<style>` block for a shared stylesheet link
//! - [`convert_many`]: runs the converter over a folder of independent exports
//! - The two text primitives behind it: [`replace_literal`] for names and
//!   [`replace_style_block`] for the style span
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), tidy_convert::ConvertError> {
//! use std::path::Path;
//! use tidy_convert::{ConvertOptions, TreeConverter};
//!
//! let converter = TreeConverter::new(ConvertOptions::new("../style.css"));
//! converter.convert(Path::new("export/Notes 1a2b"))?;
//! # Ok(())
//! # }
//! ```

mod batch;
mod converter;
mod error;
mod naming;
mod references;
mod style;

pub use batch::{BatchReport, TreeReport, convert_many, convert_many_with, list_trees};
pub use converter::{ConvertEvent, ConvertOptions, DEFAULT_PAGE_EXTENSION, TreeConverter};
pub use error::{ConvertError, IoAction};
pub use naming::{Rename, clean_stem};
pub use references::{encode_name, replace_literal, rewrite_references};
pub use style::{replace_style, replace_style_block, stylesheet_link};
