//! Source file discovery
//!
//! Two providers enumerate the project tree: [`FileFinder`] walks the working
//! directory and [`GitTreeReader`] reads the HEAD snapshot of a repository.
//! Both classify each path with the same [`FileClassifier`].

mod file_finder;
mod git_tree;

pub use file_finder::{FileClass, FileClassifier, FileFinder, FileStats, SourceFile};
pub use git_tree::GitTreeReader;

use crate::config::Config;
use crate::error::SetupError;
use std::path::Path;

/// A provider of classified source files
pub trait SourceTree {
    fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>, SetupError>;
}

impl SourceTree for FileFinder<'_> {
    fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>, SetupError> {
        FileFinder::find_files(self, root)
    }
}

impl SourceTree for GitTreeReader<'_> {
    fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>, SetupError> {
        GitTreeReader::find_files(self, root)
    }
}

/// Discover source files with the provider selected by the config
pub fn discover(config: &Config, root: &Path) -> Result<Vec<SourceFile>, SetupError> {
    let provider: Box<dyn SourceTree + '_> = if config.git {
        Box::new(GitTreeReader::new(config))
    } else {
        Box::new(FileFinder::new(config))
    };
    provider.find_files(root)
}
