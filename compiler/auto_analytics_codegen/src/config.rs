//! Pass configuration.
//!
//! Build scripts use [`GeneratorConfig::from_env`], which reads the variables
//! cargo sets for them. The CLI builds a config from its flags.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::generate::CodegenOptions;

/// Overrides the runtime crate path used by generated code, for crates that
/// re-export the runtime instead of depending on it directly.
pub const RUNTIME_ENV: &str = "AUTO_ANALYTICS_RUNTIME";

/// Where to read sources, where to write artifacts, and how to name the
/// runtime crate in generated code.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratorConfig {
    pub source_dir: PathBuf,
    /// `None` aborts the pass with an error.
    pub out_dir: Option<PathBuf>,
    pub runtime_crate: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            source_dir: PathBuf::from("src"),
            out_dir: None,
            runtime_crate: CodegenOptions::default().runtime_crate,
        }
    }
}

impl GeneratorConfig {
    pub fn new(source_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        GeneratorConfig {
            source_dir: source_dir.into(),
            out_dir: Some(out_dir.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }

    /// Configuration for a build script: `$CARGO_MANIFEST_DIR/src` in,
    /// `$OUT_DIR` out.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var_os(key))
    }

    /// Like [`from_env`](Self::from_env), reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
        let non_empty = |key: &str| var(key).filter(|value| !value.is_empty());

        let mut config = Self::default();
        if let Some(manifest_dir) = non_empty("CARGO_MANIFEST_DIR") {
            config.source_dir = PathBuf::from(manifest_dir).join("src");
        }
        config.out_dir = non_empty("OUT_DIR").map(PathBuf::from);
        if let Some(runtime) = non_empty(RUNTIME_ENV).and_then(|v| v.into_string().ok()) {
            config.runtime_crate = runtime;
        }
        config
    }

    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            runtime_crate: self.runtime_crate.clone(),
        }
    }
}
