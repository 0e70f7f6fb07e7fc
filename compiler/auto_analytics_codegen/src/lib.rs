//! Discovery and code generation for auto-analytics event groups.
//!
//! An event group is an `enum` marked with `#[auto_analytics_event]`. For
//! every group found in a crate's sources the pass writes one file holding a
//! `track_<group>` function, which maps each variant to an event name and a
//! payload built from the variant's fields and hands both to
//! `AutoAnalytics::track`.
//!
//! # Pipeline
//!
//! ```text
//! source tree ─▶ SourceTree ─▶ Declaration ─▶ ClosedEventGroup ─▶ GeneratedArtifact
//!   (walkdir)      (syn)        (lowering)      (discovery)          (generate)
//! ```
//!
//! # Build scripts
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     if auto_analytics_codegen::build().is_err() {
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! The generated files land in `OUT_DIR` and are pulled in with
//! `include!(concat!(env!("OUT_DIR"), "/auto_analytics_<group>.rs"))`.

pub mod casing;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod generate;
pub mod model;
pub mod pass;
pub mod source;

pub use config::{GeneratorConfig, RUNTIME_ENV};
pub use diagnostic::{
    CargoSink, Diagnostic, DiagnosticBuffer, DiagnosticSink, Severity, Step, TracingSink,
};
pub use discovery::{discover, ClosedEventGroup, EventVariant, Skip, VariantRegistry};
pub use generate::{generate, CodegenOptions, GeneratedArtifact};
pub use pass::{discover_tree, process_tree, run_pass, PassError, PassReport};
pub use source::SourceTree;

/// Run the pass from a build script.
///
/// Reads `$CARGO_MANIFEST_DIR/src`, writes to `$OUT_DIR`, and reports
/// diagnostics as `cargo:warning=` lines.
pub fn build() -> Result<PassReport, PassError> {
    let config = GeneratorConfig::from_env();
    println!("cargo:rerun-if-changed={}", config.source_dir.display());
    println!("cargo:rerun-if-env-changed={RUNTIME_ENV}");
    run_pass(&config, &mut CargoSink::default())
}
