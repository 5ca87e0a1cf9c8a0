use super::MatchRule;
use crate::catalog::{Catalog, ResourceEntry};
use crate::error::SetupError;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Quoted string pairs in client-side scripts: `"type", "name"` or
/// `'type', 'name'`.
///
/// Both literals must use the same quote style. Only spaces and tabs may
/// separate them, around an optional comma, so a pair never spans lines.
pub struct ScriptRule {
    patterns: Vec<Regex>,
}

impl ScriptRule {
    pub fn new(catalog: &Catalog) -> Result<Self, SetupError> {
        let patterns = catalog
            .entries()
            .iter()
            .map(Self::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    fn compile(entry: &ResourceEntry) -> Result<Regex, SetupError> {
        let resource_type = regex::escape(&entry.resource_type);
        let name = regex::escape(&entry.name);
        let pattern = format!(
            r#""{t}"[ \t]*,?[ \t]*"{n}"|'{t}'[ \t]*,?[ \t]*'{n}'"#,
            t = resource_type,
            n = name
        );

        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| SetupError::InvalidPattern {
                pattern: format!("{}, {}", entry.resource_type, entry.name),
                reason: e.to_string(),
            })
    }
}

impl MatchRule for ScriptRule {
    fn prepare<'a>(&self, content: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(content)
    }

    fn matches(&self, prepared: &str, index: usize) -> bool {
        self.patterns
            .get(index)
            .map(|re| re.is_match(prepared))
            .unwrap_or(false)
    }
}
