//! Source front end.
//!
//! Loads every `.rs` file under a source directory, maps each file to its
//! module path, and lowers items carrying the marker attribute into the
//! declaration model.
//!
//! ```text
//! src/lib.rs          → crate
//! src/events.rs       → crate::events
//! src/ui/mod.rs       → crate::ui
//! src/ui/screens.rs   → crate::ui::screens
//! mod inner { .. }    → <parent>::inner
//! ```

mod lower;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::diagnostic::{Diagnostic, DiagnosticSink, Step};
use crate::model::{Declaration, QualifiedName};

pub use lower::MARKER;

/// A parsed source file and the module it defines.
pub struct SourceFile {
    pub path: PathBuf,
    pub module: QualifiedName,
    pub syntax: syn::File,
}

impl SourceFile {
    /// Parse `source` as the contents of `module`.
    pub fn parse(
        path: impl Into<PathBuf>,
        module: QualifiedName,
        source: &str,
    ) -> syn::Result<Self> {
        Ok(SourceFile {
            path: path.into(),
            module,
            syntax: syn::parse_file(source)?,
        })
    }
}

/// All parsed files of one source directory, in sorted path order.
#[derive(Default)]
pub struct SourceTree {
    files: Vec<SourceFile>,
}

impl SourceTree {
    pub fn from_files(files: Vec<SourceFile>) -> Self {
        SourceTree { files }
    }

    /// Load and parse every `.rs` file below `root`.
    ///
    /// Files that cannot be read or parsed are reported as warnings and left
    /// out; a missing `root` yields an empty tree.
    pub fn load(root: &Path, sink: &mut dyn DiagnosticSink) -> Self {
        if !root.is_dir() {
            sink.emit(Diagnostic::warning(
                Step::LoadSources,
                format!(
                    "source directory `{}` does not exist, nothing to process",
                    root.display()
                ),
            ));
            return Self::default();
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    sink.emit(Diagnostic::warning(
                        Step::LoadSources,
                        format!("cannot walk `{}`: {err}", root.display()),
                    ));
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(OsStr::new("rs")) {
                continue;
            }

            let source = match fs::read_to_string(path) {
                Ok(source) => source,
                Err(err) => {
                    sink.emit(Diagnostic::warning(
                        Step::LoadSources,
                        format!("cannot read `{}`: {err}, skipping", path.display()),
                    ));
                    continue;
                }
            };

            match SourceFile::parse(path, module_path(root, path), &source) {
                Ok(file) => files.push(file),
                Err(err) => sink.emit(
                    Diagnostic::warning(
                        Step::LoadSources,
                        format!("cannot parse `{}`: {err}, skipping", path.display()),
                    )
                    .at(path, err.span().start().line),
                ),
            }
        }

        tracing::debug!(root = %root.display(), files = files.len(), "loaded sources");
        SourceTree { files }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Every marked item, lowered, in file order then source order.
    pub fn candidates(&self) -> Vec<Declaration> {
        let index = lower::TypeIndex::build(&self.files);
        let mut candidates = Vec::new();
        for file in &self.files {
            lower::collect_marked(file, &index, &mut candidates);
        }
        candidates
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}

/// Module path of `file` relative to the crate source root `root`.
pub fn module_path(root: &Path, file: &Path) -> QualifiedName {
    let mut module = QualifiedName::crate_root();
    let Ok(relative) = file.strip_prefix(root) else {
        return module;
    };

    let components: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let Some((file_name, dirs)) = components.split_last() else {
        return module;
    };

    for dir in dirs {
        module = module.child(dir.as_str());
    }
    let stem = file_name.strip_suffix(".rs").unwrap_or(file_name);
    let crate_root_file = dirs.is_empty() && (stem == "lib" || stem == "main");
    if stem != "mod" && !crate_root_file {
        module = module.child(stem);
    }
    module
}
