use crate::error::SetupError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of scan workers
pub const DEFAULT_WORKERS: usize = 4;

/// Default report file name
pub const DEFAULT_OUTPUT: &str = "results.csv";

/// Configuration for a DeadResources run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resource catalog (JSON array of `{ type, name }` objects)
    pub resources: Option<PathBuf>,

    /// Report output path
    pub output: PathBuf,

    /// Number of parallel scan workers
    pub workers: usize,

    /// Optional ignore file in .gitignore syntax, applied while walking the tree
    pub ignore_file: Option<PathBuf>,

    /// Glob patterns excluded from the walk
    pub exclude: Vec<String>,

    /// Read the HEAD snapshot of the git repository instead of the working directory
    pub git: bool,

    /// File classification rules
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Extensions of server-side templates and compiled sources
    pub generic_extensions: Vec<String>,

    /// Extensions of client-side scripts
    pub script_extensions: Vec<String>,

    /// Path fragments marking machine- or designer-generated files
    pub generated_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: DEFAULT_WORKERS,
            ignore_file: None,
            exclude: vec![
                "**/bin/**".to_string(),
                "**/obj/**".to_string(),
                "**/node_modules/**".to_string(),
            ],
            git: false,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            generic_extensions: vec!["cs".to_string(), "cshtml".to_string()],
            script_extensions: vec!["js".to_string()],
            generated_markers: vec![".generated.".to_string(), ".designer.".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self, SetupError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_failed = |reason: String| SetupError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        };

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| parse_failed(e.to_string())),
            "toml" => toml::from_str(&contents).map_err(|e| parse_failed(e.to_string())),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents).map_err(|e| parse_failed(e.to_string()))
                }
            }
        }
    }

    /// Try to load configuration from default locations in the project root
    pub fn from_default_locations(project_root: &Path) -> Result<Self, SetupError> {
        let default_names = [
            ".deadresources.yml",
            ".deadresources.yaml",
            ".deadresources.toml",
            "deadresources.yml",
            "deadresources.yaml",
            "deadresources.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                let config = Self::from_file(&path)?;
                return Ok(config.relative_to(project_root));
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Resolve relative input paths from a project config file against the project root.
    ///
    /// The output path is left alone so reports land in the working directory.
    pub fn relative_to(mut self, project_root: &Path) -> Self {
        let anchor = |p: PathBuf| if p.is_relative() { project_root.join(p) } else { p };
        self.resources = self.resources.map(anchor);
        self.ignore_file = self.ignore_file.map(anchor);
        self
    }

    /// Check values that cannot be expressed in the type
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.workers == 0 {
            return Err(SetupError::InvalidWorkerCount { count: self.workers });
        }
        Ok(())
    }

    /// The configured catalog path
    pub fn resources_path(&self) -> Result<&Path, SetupError> {
        self.resources
            .as_deref()
            .ok_or(SetupError::CatalogNotConfigured)
    }
}
