// File: ./src/cli.rs
//! Command-line parsing and help text.
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub date: Option<NaiveDate>,
    pub override_root: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses the arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--date" | "-d" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("{} expects a date (YYYY-MM-DD)", arg))?;
                    parsed.date = Some(
                        NaiveDate::parse_from_str(value, "%Y-%m-%d")
                            .with_context(|| format!("Invalid date '{}'", value))?,
                    );
                }
                "--root" | "-r" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("{} expects a directory", arg))?;
                    parsed.override_root = Some(value.into());
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--dry-run" => parsed.dry_run = true,
                "--help" | "-h" | "help" => parsed.help = true,
                other => bail!("Unknown argument '{}' (see --help)", other),
            }
        }
        Ok(parsed)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Cheat Sheet v{} - Generates the weekly Shabbat cheat sheet",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--date YYYY-MM-DD] [--root <path>] [--verbose] [--dry-run]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -d, --date <date>     Build the sheet for this Shabbat (default: the coming one).");
    println!("    -r, --root <path>     Use a different directory for the configuration.");
    println!("    -v, --verbose         Print debug logs.");
    println!("    --dry-run             Print the flags and fields; create no document.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CONFIGURATION:");
    println!("    config.toml in the configuration directory holds the template and");
    println!("    spreadsheet ids, the shamashim and the Google access token.");
    println!(
        "    {} overrides the token from the file.",
        crate::config::ACCESS_TOKEN_ENV
    );
}
