#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

#[test]
fn test_generate_with_all_options() {
    let command =
        parse_args(&args("generate src --out gen --runtime crate::analytics -v")).unwrap();
    assert_eq!(
        command,
        Command::Generate {
            source_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("gen"),
            runtime_crate: Some("crate::analytics".to_owned()),
            verbose: true,
        }
    );
    assert!(command.verbose());
}

#[test]
fn test_generate_equals_forms_and_order() {
    let command = parse_args(&args("gen --out=target/out --runtime=rt app/src")).unwrap();
    assert_eq!(
        command,
        Command::Generate {
            source_dir: PathBuf::from("app/src"),
            out_dir: PathBuf::from("target/out"),
            runtime_crate: Some("rt".to_owned()),
            verbose: false,
        }
    );
}

#[test]
fn test_generate_requires_out_dir() {
    let err = parse_args(&args("generate src")).unwrap_err();
    assert!(matches!(
        err,
        CliError::MissingArgument {
            command: "generate",
            what: "--out <dir>"
        }
    ));

    let err = parse_args(&args("generate src -o")).unwrap_err();
    assert!(matches!(err, CliError::MissingArgument { .. }));
}

#[test]
fn test_discover() {
    assert_eq!(
        parse_args(&args("discover src --verbose")).unwrap(),
        Command::Discover {
            source_dir: PathBuf::from("src"),
            verbose: true,
        }
    );
    assert!(matches!(
        parse_args(&args("discover")).unwrap_err(),
        CliError::MissingArgument { what: "source directory", .. }
    ));
}

#[test]
fn test_rejects_unknown_input() {
    assert!(matches!(parse_args(&[]).unwrap_err(), CliError::NoCommand));
    assert!(matches!(
        parse_args(&args("build src")).unwrap_err(),
        CliError::UnknownCommand(c) if c == "build"
    ));
    assert!(matches!(
        parse_args(&args("discover src --release")).unwrap_err(),
        CliError::UnknownOption { option, .. } if option == "--release"
    ));
    assert!(matches!(
        parse_args(&args("discover src other")).unwrap_err(),
        CliError::UnexpectedArgument(a) if a == "other"
    ));
}

#[test]
fn test_help_and_version() {
    assert_eq!(parse_args(&args("help")).unwrap(), Command::Help);
    assert_eq!(parse_args(&args("--help")).unwrap(), Command::Help);
    assert_eq!(parse_args(&args("--version")).unwrap(), Command::Version);
    assert!(!Command::Help.verbose());
}
