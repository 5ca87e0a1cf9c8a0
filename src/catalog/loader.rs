use super::{Catalog, ResourceEntry};
use crate::error::SetupError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// One object of the catalog file; other fields (values, comments) are ignored
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type", alias = "Type")]
    resource_type: String,
    #[serde(alias = "Name")]
    name: String,
}

/// Load the resource catalog from a JSON array of `{ "type", "name" }` objects
pub fn load_catalog(path: &Path) -> Result<Catalog, SetupError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SetupError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&contents).map_err(|source| SetupError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_catalog(contents: &str) -> Result<Catalog, serde_json::Error> {
    // Resource files saved by Visual Studio often start with a BOM
    let contents = contents.trim_start_matches('\u{feff}');
    let raw: Vec<RawEntry> = serde_json::from_str(contents)?;

    let duplicates = {
        let mut seen = HashSet::with_capacity(raw.len());
        raw.iter()
            .filter(|e| !seen.insert((e.resource_type.as_str(), e.name.as_str())))
            .count()
    };
    if duplicates > 0 {
        warn!("Catalog contains {} duplicate (type, name) entries", duplicates);
    }

    debug!("Loaded {} resource entries", raw.len());

    Ok(Catalog::new(
        raw.into_iter()
            .map(|e| ResourceEntry::new(e.resource_type, e.name))
            .collect(),
    ))
}
