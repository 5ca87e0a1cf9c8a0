//! Reference matching rules
//!
//! Each [`FileClass`] has one rule deciding whether a file's text references a
//! resource entry. Rules are compiled once per catalog so that per-file work is
//! a case-folded substring search (generic files) or a prebuilt regex scan
//! (script files). Matching is existence-only.

mod generic;
mod script;

pub use generic::GenericRule;
pub use script::ScriptRule;

use crate::catalog::Catalog;
use crate::discovery::FileClass;
use crate::error::SetupError;
use std::borrow::Cow;

/// A compiled matching strategy for one file class
pub trait MatchRule: Send + Sync {
    /// Normalise file text once before it is tested against many entries
    fn prepare<'a>(&self, content: &'a str) -> Cow<'a, str>;

    /// Whether `prepared` references the catalog entry at `index`
    fn matches(&self, prepared: &str, index: usize) -> bool;
}

/// The rules for every file class, compiled for one catalog
pub struct RuleSet {
    generic: GenericRule,
    script: ScriptRule,
}

impl RuleSet {
    pub fn new(catalog: &Catalog) -> Result<Self, SetupError> {
        Ok(Self {
            generic: GenericRule::new(catalog),
            script: ScriptRule::new(catalog)?,
        })
    }

    pub fn for_class(&self, class: FileClass) -> &dyn MatchRule {
        match class {
            FileClass::Generic => &self.generic,
            FileClass::Script => &self.script,
        }
    }

    /// Test one file's text against one entry
    pub fn matches(&self, class: FileClass, content: &str, index: usize) -> bool {
        let rule = self.for_class(class);
        rule.matches(&rule.prepare(content), index)
    }
}
