//! tidy CLI - cleans up exported HTML note trees.
//!
//! Strips the trailing identifier from every page and asset directory name,
//! fixes the links between pages and replaces each page's inline style block
//! with a link to one shared stylesheet.
//!
//! ```text
//! tidy "Export/Notes 1a2b" ../style.css
//! tidy -m Export ../style.css
//! ```

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::ConvertArgs;
use output::Output;

/// tidy - strip export identifiers from HTML note trees.
#[derive(Parser)]
#[command(name = "tidy", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.convert.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.convert.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_single_tree() {
        let cli = Cli::try_parse_from(["tidy", "Export/Notes 1a", "../style.css"]).unwrap();
        assert!(!cli.convert.verbose);
    }

    #[test]
    fn test_parse_batch_flags() {
        let cli =
            Cli::try_parse_from(["tidy", "Export", "style.css", "-m", "--dry-run", "-v"]).unwrap();
        assert!(cli.convert.verbose);
    }

    #[test]
    fn test_parse_requires_dir() {
        assert!(Cli::try_parse_from(["tidy"]).is_err());
    }
}
