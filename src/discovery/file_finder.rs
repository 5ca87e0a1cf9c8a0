use crate::config::{ClassifierConfig, Config};
use crate::error::{FileReadError, SetupError};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reference syntax used by a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    /// Server-side templates and compiled sources (`FooResourceDictionary.Bar`)
    Generic,
    /// Client-side scripts (`"Foo", "Bar"`)
    Script,
}

impl FileClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileClass::Generic => "generic",
            FileClass::Script => "script",
        }
    }
}

/// Maps paths to a [`FileClass`], or excludes them
#[derive(Debug, Clone)]
pub struct FileClassifier {
    generic_extensions: Vec<String>,
    script_extensions: Vec<String>,
    generated_markers: Vec<String>,
}

impl FileClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim_start_matches('.').to_lowercase())
                .collect()
        };

        Self {
            generic_extensions: lower(&config.generic_extensions),
            script_extensions: lower(&config.script_extensions),
            generated_markers: config
                .generated_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }

    /// Classify a path. `None` means the file is excluded.
    pub fn classify(&self, path: &Path) -> Option<FileClass> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        let path_str = path.to_string_lossy().to_lowercase();
        if self.generated_markers.iter().any(|m| path_str.contains(m.as_str())) {
            return None;
        }

        if self.generic_extensions.contains(&extension) {
            Some(FileClass::Generic)
        } else if self.script_extensions.contains(&extension) {
            Some(FileClass::Script)
        } else {
            None
        }
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// Where a file's text comes from
#[derive(Debug, Clone)]
enum Contents {
    /// Read from disk when the scanning worker reaches the file
    OnDisk,
    /// Bytes captured from a repository snapshot
    Snapshot(Vec<u8>),
}

/// A classified source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file (joined onto the source root)
    pub path: PathBuf,

    /// Reference syntax of the file
    pub class: FileClass,

    contents: Contents,
}

impl SourceFile {
    /// A file whose contents are read from disk on demand
    pub fn new(path: PathBuf, class: FileClass) -> Self {
        Self {
            path,
            class,
            contents: Contents::OnDisk,
        }
    }

    /// A file whose contents were captured up front
    pub fn from_bytes(path: PathBuf, class: FileClass, bytes: Vec<u8>) -> Self {
        Self {
            path,
            class,
            contents: Contents::Snapshot(bytes),
        }
    }

    /// Read the file's text
    pub fn read_contents(&self) -> Result<Cow<'_, str>, FileReadError> {
        match &self.contents {
            Contents::OnDisk => std::fs::read_to_string(&self.path)
                .map(Cow::Owned)
                .map_err(|e| FileReadError::new(&self.path, e)),
            Contents::Snapshot(bytes) => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| FileReadError::new(&self.path, e)),
        }
    }
}

/// Build the exclusion matcher from glob patterns
pub(crate) fn build_exclusions(root: &Path, patterns: &[String]) -> Result<Override, SetupError> {
    let mut builder = OverrideBuilder::new(root);
    for pattern in patterns {
        // Overrides whitelist by default; a leading '!' turns the glob into an ignore
        builder
            .add(&format!("!{}", pattern))
            .map_err(|e| SetupError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
    }
    builder.build().map_err(|e| SetupError::InvalidPattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// Load the ignore file with its patterns anchored at the source root
pub(crate) fn build_ignore(root: &Path, ignore_file: Option<&Path>) -> Result<Option<Gitignore>, SetupError> {
    let Some(ignore_file) = ignore_file else {
        return Ok(None);
    };

    let ignore_error = |reason: String| SetupError::IgnoreFile {
        path: ignore_file.to_path_buf(),
        reason,
    };

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(ignore_file) {
        return Err(ignore_error(err.to_string()));
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| ignore_error(e.to_string()))
}

/// Dotfiles and dot-directories are never scanned
pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// File finder for discovering source files in a working directory
pub struct FileFinder<'a> {
    config: &'a Config,
    classifier: FileClassifier,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            classifier: FileClassifier::new(&config.classifier),
        }
    }

    /// Find all classified source files under the given root, sorted by path
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>, SetupError> {
        if !root.is_dir() {
            return Err(SetupError::SourceRootMissing {
                path: root.to_path_buf(),
            });
        }

        debug!("Scanning for files in: {}", root.display());

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .overrides(build_exclusions(root, &self.config.exclude)?);

        if let Some(ignored) = build_ignore(root, self.config.ignore_file.as_deref())? {
            let base = root.to_path_buf();
            builder.filter_entry(move |entry| {
                let Ok(relative) = entry.path().strip_prefix(&base) else {
                    return true;
                };
                if relative.as_os_str().is_empty() {
                    return true;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !ignored.matched_path_or_any_parents(relative, is_dir).is_ignore()
            });
        }

        let mut files: Vec<SourceFile> = builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();
                // Markers apply below the root only
                let relative = path.strip_prefix(root).unwrap_or(path);
                let class = self.classifier.classify(relative)?;

                trace!("Found {:?}: {}", class, path.display());
                Some(SourceFile::new(path.to_path_buf(), class))
            })
            .collect();

        files.sort_by(|a, b| a.path.cmp(&b.path));

        debug!("Found {} files", files.len());
        Ok(files)
    }
}

/// Statistics about discovered files
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub generic_files: usize,
    pub script_files: usize,
}

impl FileStats {
    pub fn from_files(files: &[SourceFile]) -> Self {
        let mut stats = Self::default();
        for file in files {
            match file.class {
                FileClass::Generic => stats.generic_files += 1,
                FileClass::Script => stats.script_files += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.generic_files + self.script_files
    }
}
