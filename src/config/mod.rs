mod loader;

pub use loader::{ClassifierConfig, Config, DEFAULT_OUTPUT, DEFAULT_WORKERS};
