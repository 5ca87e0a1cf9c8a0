//! Error types for DeadResources
//!
//! Errors fall into three groups:
//! - [`SetupError`]: fatal, raised before any file is scanned
//! - [`FileReadError`]: recoverable, one file contributes no matches
//! - [`WriteError`]: fatal, raised after the scan when the report cannot be saved

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Unrecoverable failures while preparing a run
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    #[error("Source root not found: {}", .path.display())]
    #[diagnostic(
        code(deadresources::setup::source_root),
        help("Pass an existing project directory as the first argument")
    )]
    SourceRootMissing { path: PathBuf },

    #[error("Failed to read resource catalog: {}", .path.display())]
    #[diagnostic(
        code(deadresources::setup::catalog_read),
        help("Pass the resource file with --resources or set `resources` in the config file")
    )]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed resource catalog: {}", .path.display())]
    #[diagnostic(
        code(deadresources::setup::catalog_parse),
        help("Expected a JSON array of objects with `type` and `name` string fields")
    )]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No resource catalog configured")]
    #[diagnostic(
        code(deadresources::setup::catalog_missing),
        help("Pass the resource file with --resources or set `resources` in the config file")
    )]
    CatalogNotConfigured,

    #[error("Failed to read config file: {}", .path.display())]
    #[diagnostic(code(deadresources::setup::config_read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {reason}", .path.display())]
    #[diagnostic(
        code(deadresources::setup::config_parse),
        help("Config files may be written in YAML (.yml, .yaml) or TOML (.toml)")
    )]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Worker count must be at least 1 (got {count})")]
    #[diagnostic(code(deadresources::setup::workers))]
    InvalidWorkerCount { count: usize },

    #[error("Failed to load ignore file {}: {reason}", .path.display())]
    #[diagnostic(
        code(deadresources::setup::ignore_file),
        help("The ignore file uses .gitignore syntax")
    )]
    IgnoreFile { path: PathBuf, reason: String },

    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    #[diagnostic(code(deadresources::setup::pattern))]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to read repository snapshot at {}: {reason}", .path.display())]
    #[diagnostic(
        code(deadresources::setup::repository),
        help("--git requires the source root to be a git repository with at least one commit")
    )]
    Repository { path: PathBuf, reason: String },

    #[error("Failed to start scan workers: {reason}")]
    #[diagnostic(code(deadresources::setup::thread_pool))]
    ThreadPool { reason: String },
}

/// A single source file could not be read or decoded
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Failed to read {}: {reason}", .path.display())]
#[diagnostic(code(deadresources::scan::file_read))]
pub struct FileReadError {
    pub path: PathBuf,
    pub reason: String,
}

impl FileReadError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// The report could not be persisted
#[derive(Error, Diagnostic, Debug)]
#[error("Failed to write report to {}", .path.display())]
#[diagnostic(
    code(deadresources::report::write),
    help("Check that the output directory exists and is writable")
)]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
