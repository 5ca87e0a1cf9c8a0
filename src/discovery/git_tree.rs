//! Snapshot reader for git repositories
//!
//! Enumerates the files of the HEAD commit instead of the working directory,
//! so uncommitted or untracked files never influence the result.

use super::file_finder::{build_exclusions, build_ignore, is_hidden, FileClassifier, SourceFile};
use crate::config::Config;
use crate::error::SetupError;
use git2::{ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use ignore::gitignore::Gitignore;
use ignore::overrides::Override;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reads classified source files from the HEAD tree of a repository
pub struct GitTreeReader<'a> {
    config: &'a Config,
    classifier: FileClassifier,
}

impl<'a> GitTreeReader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            classifier: FileClassifier::new(&config.classifier),
        }
    }

    /// Collect every classified blob in HEAD, sorted by path
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>, SetupError> {
        if !root.is_dir() {
            return Err(SetupError::SourceRootMissing {
                path: root.to_path_buf(),
            });
        }

        let repo_error = |e: git2::Error| SetupError::Repository {
            path: root.to_path_buf(),
            reason: e.message().to_string(),
        };

        let repo = Repository::open(root).map_err(repo_error)?;
        let tree = repo
            .head()
            .and_then(|head| head.peel_to_tree())
            .map_err(repo_error)?;

        debug!("Reading snapshot tree {} in {}", tree.id(), root.display());

        let exclusions = build_exclusions(root, &self.config.exclude)?;
        let ignored = build_ignore(root, self.config.ignore_file.as_deref())?;

        let mut files = Vec::new();
        let mut failure: Option<git2::Error> = None;

        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            let Some(name) = entry.name() else {
                return TreeWalkResult::Skip;
            };
            if is_hidden(name) {
                return match entry.kind() {
                    Some(ObjectType::Tree) => TreeWalkResult::Skip,
                    _ => TreeWalkResult::Ok,
                };
            }
            let relative = PathBuf::from(dir).join(name);

            match entry.kind() {
                Some(ObjectType::Tree) => {
                    if is_excluded(&exclusions, ignored.as_ref(), &relative, true) {
                        trace!("Excluding directory: {}", relative.display());
                        TreeWalkResult::Skip
                    } else {
                        TreeWalkResult::Ok
                    }
                }
                Some(ObjectType::Blob) => {
                    if is_excluded(&exclusions, ignored.as_ref(), &relative, false) {
                        trace!("Excluding: {}", relative.display());
                        return TreeWalkResult::Ok;
                    }
                    let Some(class) = self.classifier.classify(&relative) else {
                        return TreeWalkResult::Ok;
                    };

                    match repo.find_blob(entry.id()) {
                        Ok(blob) => {
                            trace!("Found {:?}: {}", class, relative.display());
                            files.push(SourceFile::from_bytes(
                                root.join(&relative),
                                class,
                                blob.content().to_vec(),
                            ));
                            TreeWalkResult::Ok
                        }
                        Err(e) => {
                            failure = Some(e);
                            TreeWalkResult::Abort
                        }
                    }
                }
                // Submodule commits and other objects carry no text
                _ => TreeWalkResult::Ok,
            }
        })
        .or_else(|e| match failure.take() {
            Some(inner) => Err(inner),
            None => Err(e),
        })
        .map_err(repo_error)?;

        files.sort_by(|a, b| a.path.cmp(&b.path));

        debug!("Found {} files in snapshot", files.len());
        Ok(files)
    }
}

fn is_excluded(exclusions: &Override, ignored: Option<&Gitignore>, relative: &Path, is_dir: bool) -> bool {
    if exclusions.matched(relative, is_dir).is_ignore() {
        return true;
    }
    ignored
        .map(|gi| gi.matched_path_or_any_parents(relative, is_dir).is_ignore())
        .unwrap_or(false)
}
