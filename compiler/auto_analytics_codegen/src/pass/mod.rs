//! The discovery and generation pass.
//!
//! One pass loads the source tree, then handles each marked declaration to
//! completion (discover, generate, write) before moving to the next one.
//! Skipped declarations never stop the pass; only an unusable output
//! directory or a failed write does.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::config::GeneratorConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink, Step};
use crate::discovery::{discover, ClosedEventGroup, Skip};
use crate::generate::{generate, CodegenOptions, GeneratedArtifact};
use crate::model::QualifiedName;
use crate::source::SourceTree;

/// Fatal pass errors. Nothing else aborts a pass.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("no output directory configured")]
    OutputDirUnset,

    #[error("output directory `{}` does not exist", .path.display())]
    MissingOutputDir { path: PathBuf },

    #[error("cannot write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a pass did.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Artifacts written because they were new or changed.
    pub written: Vec<PathBuf>,
    /// Artifacts already up to date on disk.
    pub unchanged: Vec<PathBuf>,
    /// Marked declarations that produced no artifact.
    pub skipped: Vec<(QualifiedName, Skip)>,
}

impl PassReport {
    /// Number of groups that produced an artifact.
    pub fn artifact_count(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }

    /// Drop the entry for `path` when a later group takes the file over.
    fn release(&mut self, path: &Path) {
        self.written.retain(|p| p != path);
        self.unchanged.retain(|p| p != path);
    }
}

/// Run a full pass as configured.
pub fn run_pass(
    config: &GeneratorConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<PassReport, PassError> {
    let out_dir = output_dir(config.out_dir.as_deref(), sink)?;
    let tree = SourceTree::load(&config.source_dir, sink);
    process_tree(&tree, out_dir, &config.codegen_options(), sink)
}

/// Run discovery and generation over an already loaded tree.
pub fn process_tree(
    tree: &SourceTree,
    out_dir: &Path,
    options: &CodegenOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<PassReport, PassError> {
    let out_dir = output_dir(Some(out_dir), sink)?;
    let mut report = PassReport::default();
    let mut claimed: FxHashMap<String, QualifiedName> = FxHashMap::default();

    for decl in tree.candidates() {
        let _span = tracing::debug_span!("candidate", name = %decl.name).entered();

        let group = match discover(&decl, sink) {
            Ok(group) => group,
            Err(skip) => {
                report.skipped.push((decl.name, skip));
                continue;
            }
        };

        let artifact = generate(&group, options);
        if let Some(previous) = claimed.insert(artifact.file_name.clone(), group.name.clone()) {
            sink.emit(
                Diagnostic::warning(
                    Step::Generate,
                    format!(
                        "`{}` and `{previous}` both generate `{}`, keeping `{}`",
                        group.name, artifact.file_name, group.name
                    ),
                )
                .at(&group.location.file, group.location.line),
            );
            report.release(&out_dir.join(&artifact.file_name));
        }
        write_artifact(out_dir, &artifact, &mut report, sink)?;
    }

    tracing::debug!(
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        skipped = report.skipped.len(),
        "pass finished"
    );
    Ok(report)
}

/// Discovery only: every group the tree declares, nothing generated.
pub fn discover_tree(tree: &SourceTree, sink: &mut dyn DiagnosticSink) -> Vec<ClosedEventGroup> {
    tree.candidates()
        .iter()
        .filter_map(|decl| discover(decl, sink).ok())
        .collect()
}

fn output_dir<'a>(
    out_dir: Option<&'a Path>,
    sink: &mut dyn DiagnosticSink,
) -> Result<&'a Path, PassError> {
    let result = match out_dir {
        None => Err(PassError::OutputDirUnset),
        Some(path) if !path.is_dir() => Err(PassError::MissingOutputDir {
            path: path.to_path_buf(),
        }),
        Some(path) => Ok(path),
    };
    result.inspect_err(|err| sink.emit(Diagnostic::error(Step::Process, err.to_string())))
}

/// Write `artifact` unless the file already holds the same contents.
fn write_artifact(
    out_dir: &Path,
    artifact: &GeneratedArtifact,
    report: &mut PassReport,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), PassError> {
    let path = out_dir.join(&artifact.file_name);
    if fs::read_to_string(&path).is_ok_and(|existing| existing == artifact.contents) {
        tracing::debug!(path = %path.display(), "up to date");
        report.unchanged.push(path);
        return Ok(());
    }

    if let Err(source) = fs::write(&path, &artifact.contents) {
        let err = PassError::Write { path, source };
        sink.emit(Diagnostic::error(Step::Generate, err.to_string()));
        return Err(err);
    }
    tracing::info!(group = %artifact.group, path = %path.display(), "wrote artifact");
    report.written.push(path);
    Ok(())
}
