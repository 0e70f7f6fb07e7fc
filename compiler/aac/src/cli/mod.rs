//! Argument parsing.

use std::path::PathBuf;

use auto_analytics_codegen::PassError;

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the pass and write artifacts to `out_dir`.
    Generate {
        source_dir: PathBuf,
        out_dir: PathBuf,
        runtime_crate: Option<String>,
        verbose: bool,
    },
    /// List the event groups of a source tree.
    Discover { source_dir: PathBuf, verbose: bool },
    Help,
    Version,
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Generate { verbose, .. } | Command::Discover { verbose, .. } => *verbose,
            Command::Help | Command::Version => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no command given")]
    NoCommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("unknown option `{option}` for `{command}`")]
    UnknownOption {
        command: &'static str,
        option: String,
    },

    #[error("missing {what} for `{command}`")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Pass(#[from] PassError),
}

/// Parse the arguments following the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::NoCommand);
    };

    match command.as_str() {
        "generate" | "gen" => parse_generate(rest),
        "discover" => parse_discover(rest),
        "help" | "--help" | "-h" => Ok(Command::Help),
        "version" | "--version" | "-V" => Ok(Command::Version),
        other => Err(CliError::UnknownCommand(other.to_owned())),
    }
}

fn parse_generate(args: &[String]) -> Result<Command, CliError> {
    const COMMAND: &str = "generate";

    let mut source_dir = None;
    let mut out_dir = None;
    let mut runtime_crate = None;
    let mut verbose = false;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--out=") {
            out_dir = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--runtime=") {
            runtime_crate = Some(value.to_owned());
        } else if arg == "--out" || arg == "-o" {
            let value = args.next().ok_or(CliError::MissingArgument {
                command: COMMAND,
                what: "value for --out",
            })?;
            out_dir = Some(PathBuf::from(value));
        } else if arg == "--runtime" {
            let value = args.next().ok_or(CliError::MissingArgument {
                command: COMMAND,
                what: "value for --runtime",
            })?;
            runtime_crate = Some(value.clone());
        } else if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else {
            positional(COMMAND, arg, &mut source_dir)?;
        }
    }

    Ok(Command::Generate {
        source_dir: source_dir.ok_or(CliError::MissingArgument {
            command: COMMAND,
            what: "source directory",
        })?,
        out_dir: out_dir.ok_or(CliError::MissingArgument {
            command: COMMAND,
            what: "--out <dir>",
        })?,
        runtime_crate,
        verbose,
    })
}

fn parse_discover(args: &[String]) -> Result<Command, CliError> {
    const COMMAND: &str = "discover";

    let mut source_dir = None;
    let mut verbose = false;
    for arg in args {
        if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else {
            positional(COMMAND, arg, &mut source_dir)?;
        }
    }

    Ok(Command::Discover {
        source_dir: source_dir.ok_or(CliError::MissingArgument {
            command: COMMAND,
            what: "source directory",
        })?,
        verbose,
    })
}

/// Accept `arg` as the single positional source directory.
fn positional(
    command: &'static str,
    arg: &str,
    slot: &mut Option<PathBuf>,
) -> Result<(), CliError> {
    if arg.starts_with('-') {
        return Err(CliError::UnknownOption {
            command,
            option: arg.to_owned(),
        });
    }
    if slot.is_some() {
        return Err(CliError::UnexpectedArgument(arg.to_owned()));
    }
    *slot = Some(PathBuf::from(arg));
    Ok(())
}

pub fn print_usage() {
    println!("auto-analytics: generate tracking functions for #[auto_analytics_event] enums");
    println!();
    println!("Usage: auto-analytics <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <src> --out <dir>   Write one tracking function per event group");
    println!("  discover <src>               List event groups and their variants");
    println!("  help                         Show this help message");
    println!("  version                      Show version information");
    println!();
    println!("Generate options:");
    println!("  -o, --out <dir>       Output directory (must exist)");
    println!("  --runtime <path>      Runtime crate path used by generated code");
    println!("                        (default: auto_analytics)");
    println!();
    println!("Common options:");
    println!("  -v, --verbose         Log excluded variants and pass progress");
    println!();
    println!("Environment:");
    println!("  AUTO_ANALYTICS_LOG    Log filter (default: warn)");
    println!();
    println!("Examples:");
    println!("  auto-analytics discover src");
    println!("  auto-analytics generate src --out target/analytics");
    println!("  auto-analytics generate src -o gen --runtime crate::analytics");
}

#[cfg(test)]
mod tests;
