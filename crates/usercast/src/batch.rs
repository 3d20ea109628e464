//! Batch compilation of userstyle files.
//!
//! Inputs are processed in parallel; writes happen afterwards, in input
//! order, so the aggregate import file is deterministic. Each input may
//! carry a sibling `<stem>.meta.json` with its metadata block, unless an
//! override metadata file was given for the whole batch.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};
use usercast_core::{process, Metadata, PipelineError, PipelineOptions};

/// The name of the aggregate file importing every compiled style.
pub const AGGREGATE_FILE: &str = "userstyles.css";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("invalid metadata in {path}")]
    Metadata {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Pipeline {
        path: PathBuf,
        source: PipelineError,
    },
    #[error("input {path} has no file stem")]
    BadInputName { path: PathBuf },
}

/// Batch-wide settings.
#[derive(Default)]
pub struct BuildOptions {
    pub pipeline: PipelineOptions,
    /// Record failures and keep going instead of stopping at the first one.
    pub keep_going: bool,
    /// Metadata applied to every input instead of sibling files.
    pub metadata_override: Option<Metadata>,
}

/// What a batch run produced.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    /// Output files written, in input order (aggregate file excluded).
    pub written: Vec<PathBuf>,
    /// Per-input informational diagnostics.
    pub warnings: Vec<(PathBuf, String)>,
    /// Inputs that failed; only populated when `keep_going` is set.
    pub failures: Vec<(PathBuf, BuildError)>,
}

/// Compiles `inputs` into `output` and writes the aggregate import file.
///
/// Without `keep_going` the first failure aborts the run before anything is
/// written. With it, failing inputs are recorded in the outcome and the rest
/// of the batch still lands on disk.
pub fn build(
    inputs: &[PathBuf],
    output: &Path,
    options: &BuildOptions,
) -> Result<BuildOutcome, BuildError> {
    let results: Vec<Result<Compiled, BuildError>> = inputs
        .par_iter()
        .map(|input| compile_one(input, options))
        .collect();

    let mut outcome = BuildOutcome::default();
    let mut compiled = Vec::new();
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(one) => compiled.push(one),
            Err(error) if options.keep_going => {
                warn!(input = %input.display(), %error, "input failed");
                outcome.failures.push((input.clone(), error));
            }
            Err(error) => return Err(error),
        }
    }

    fs::create_dir_all(output).map_err(|source| BuildError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    let mut imports = String::new();
    for one in compiled {
        let target = output.join(format!("{}.css", one.stem));
        fs::write(&target, &one.css).map_err(|source| BuildError::Write {
            path: target.clone(),
            source,
        })?;
        debug!(output = %target.display(), bytes = one.css.len(), "wrote style");
        imports.push_str(&format!("@import url(\"{}.css\");\n", one.stem));
        for warning in one.warnings {
            outcome.warnings.push((one.input.clone(), warning));
        }
        outcome.written.push(target);
    }

    let aggregate = output.join(AGGREGATE_FILE);
    fs::write(&aggregate, imports).map_err(|source| BuildError::Write {
        path: aggregate,
        source,
    })?;

    Ok(outcome)
}

struct Compiled {
    input: PathBuf,
    stem: String,
    css: String,
    warnings: Vec<String>,
}

fn compile_one(input: &Path, options: &BuildOptions) -> Result<Compiled, BuildError> {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| BuildError::BadInputName {
            path: input.to_path_buf(),
        })?
        .to_string();

    let raw = fs::read_to_string(input).map_err(|source| BuildError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let metadata = match &options.metadata_override {
        Some(metadata) => metadata.clone(),
        None => load_sibling_metadata(input)?,
    };

    let processed =
        process(&raw, &metadata, &options.pipeline).map_err(|source| BuildError::Pipeline {
            path: input.to_path_buf(),
            source,
        })?;

    Ok(Compiled {
        input: input.to_path_buf(),
        stem,
        css: processed.css,
        warnings: processed.warnings,
    })
}

/// Loads `<stem>.meta.json` next to `input`, or an empty metadata block when
/// the file does not exist.
fn load_sibling_metadata(input: &Path) -> Result<Metadata, BuildError> {
    let path = input.with_extension("meta.json");
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Metadata::default()),
        Err(source) => return Err(BuildError::Read { path, source }),
    };
    serde_json::from_str(&text).map_err(|source| BuildError::Metadata { path, source })
}

pub fn load_metadata_file(path: &Path) -> Result<Metadata, BuildError> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| BuildError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}
