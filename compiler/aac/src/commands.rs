//! Command implementations.

use std::fmt::Write as _;
use std::path::Path;

use auto_analytics_codegen::casing::{to_screaming_snake_case, to_snake_case};
use auto_analytics_codegen::generate::{artifact_file_name, function_name};
use auto_analytics_codegen::{
    discover_tree, run_pass, ClosedEventGroup, Diagnostic, DiagnosticSink, GeneratorConfig,
    Severity, SourceTree, TracingSink,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

use crate::cli::{print_usage, CliError, Command};

/// Log filter variable, `warn` when unset.
pub const LOG_ENV: &str = "AUTO_ANALYTICS_LOG";

/// Install the stderr subscriber. `verbose` forces the `debug` level.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(HierarchicalLayer::new(2).with_targets(true))
        .with(filter)
        .try_init();
}

/// Prints warnings and errors to stderr; notes go to `tracing` only.
struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error | Severity::Warning => {
                eprintln!("{}: {diagnostic}", diagnostic.severity);
            }
            Severity::Note => TracingSink.emit(diagnostic),
        }
    }
}

pub fn run(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Generate {
            source_dir,
            out_dir,
            runtime_crate,
            ..
        } => {
            let mut config = GeneratorConfig::new(source_dir, out_dir);
            if let Some(runtime_crate) = runtime_crate {
                config = config.with_runtime_crate(runtime_crate.as_str());
            }
            generate(&config)
        }
        Command::Discover { source_dir, .. } => {
            print!("{}", discover(source_dir, &mut ConsoleSink));
            Ok(())
        }
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Version => {
            println!("auto-analytics {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn generate(config: &GeneratorConfig) -> Result<(), CliError> {
    let report = run_pass(config, &mut ConsoleSink)?;
    for path in &report.written {
        println!("wrote {}", path.display());
    }
    println!(
        "{} written, {} unchanged, {} skipped",
        report.written.len(),
        report.unchanged.len(),
        report.skipped.len()
    );
    Ok(())
}

/// Describe every event group under `source_dir`.
pub fn discover(source_dir: &Path, sink: &mut dyn DiagnosticSink) -> String {
    let tree = SourceTree::load(source_dir, sink);
    let groups = discover_tree(&tree, sink);
    if groups.is_empty() {
        return "no event groups found\n".to_owned();
    }
    groups.iter().map(describe_group).collect::<Vec<_>>().join("\n")
}

/// ```text
/// crate::events::Interactive (src/events.rs:10)
///   track_interactive -> auto_analytics_interactive.rs
///   BUTTON_CLICKED { label }
/// ```
pub fn describe_group(group: &ClosedEventGroup) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}:{})",
        group.name,
        group.location.file.display(),
        group.location.line
    );
    let _ = writeln!(
        out,
        "  {} -> {}",
        function_name(&group.name),
        artifact_file_name(&group.name)
    );
    for variant in group.registry.iter() {
        let name = to_screaming_snake_case(variant.simple_name());
        if variant.fields.is_empty() {
            let _ = writeln!(out, "  {name}");
        } else {
            let keys: Vec<_> = variant.fields.iter().map(|f| to_snake_case(f)).collect();
            let _ = writeln!(out, "  {name} {{ {} }}", keys.join(", "));
        }
    }
    out
}
