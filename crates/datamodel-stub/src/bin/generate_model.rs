//! Generate a data model stub for one or more FITS files.
//!
//! Each stub is written to `<model>.rst` in the current directory and still
//! needs hand editing to add descriptions.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use datamodel_stub::{reader, Config, StubGenerator};

/// Generate a data model stub for a given FITS file.
///
/// The template is read from $DESIDATAMODEL/etc/template.rst, or the
/// built-in template if DESIDATAMODEL is not set.
#[derive(Parser, Debug)]
#[command(name = "generate_model", version)]
struct Args {
    /// A FITS file.
    #[arg(value_name = "FILE", required = true)]
    filename: Vec<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn run(args: &Args) -> Result<()> {
    let generator =
        StubGenerator::new(Config::from_env()).context("failed to load the stub template")?;
    log::debug!("writing stubs to {}", generator.config().output_dir().display());

    for path in &args.filename {
        let output = generator
            .generate(path)
            .with_context(|| format!("processing '{}'", path.display()))?;
        log::debug!("{} -> {}", path.display(), output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if !reader::is_available() {
        eprintln!(
            "This program requires FITS support; rebuild datamodel-stub with the `fits` feature."
        );
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_multiple_files() {
        let args = Args::try_parse_from(["generate_model", "a-1.fits", "b.fits"]).unwrap();
        assert_eq!(
            args.filename,
            vec![PathBuf::from("a-1.fits"), PathBuf::from("b.fits")]
        );
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn parse_requires_a_file() {
        assert!(Args::try_parse_from(["generate_model"]).is_err());
    }

    #[test]
    fn parse_verbosity() {
        let args = Args::try_parse_from(["generate_model", "-vv", "x.fits"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
