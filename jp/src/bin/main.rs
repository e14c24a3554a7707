// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};

use jp::{ParseError, ParserConfig};

#[derive(Parser)]
#[command(name = "jp", version, about = "Simple JSON Parser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a JSON file and log its canonical form
    File {
        /// file path
        filename: PathBuf,
        /// Reject tokens after the top-level value
        #[arg(long)]
        strict: bool,
        /// Accept a comma right before a closing bracket
        #[arg(long)]
        allow_trailing_commas: bool,
        /// Deepest allowed nesting of objects and arrays
        #[arg(
            long,
            default_value_t = jp::DEFAULT_MAX_DEPTH,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=jp::MAX_DEPTH_LIMIT as u64)
        )]
        max_depth: usize,
    },
}

enum CliError {
    Read(PathBuf, std::io::Error),
    Parse(ParseError),
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CliError::Read(path, e) => {
                write!(f, "Unable to read file '{}': {}", path.display(), e)
            }
            CliError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Parse(err)
    }
}

fn run(path: &Path, config: ParserConfig) -> Result<String, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::Read(path.to_path_buf(), e))?;
    // duplicate keys are reported through log::warn! by the parser
    let doc = jp::parse_with_config(&text, config)?;
    Ok(doc.value.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::File {
            filename,
            strict,
            allow_trailing_commas,
            max_depth,
        } => {
            let config = ParserConfig::new()
                .max_depth(max_depth)
                .reject_trailing_tokens(strict)
                .allow_trailing_commas(allow_trailing_commas);
            match run(&filename, config) {
                Ok(canonical) => {
                    info!("{canonical}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
