use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, VeriscanError};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Glob-based include filter. No patterns means everything is included;
/// otherwise a path must match at least one pattern.
#[derive(Debug)]
pub struct IncludeFilter {
    patterns: Option<GlobSet>,
}

impl IncludeFilter {
    /// Compile the given include patterns.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self { patterns: None });
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| VeriscanError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| VeriscanError::InvalidPattern {
            pattern: "combined patterns".to_string(),
            source: e,
        })?;

        Ok(Self {
            patterns: Some(set),
        })
    }

    /// Filter that includes every file.
    #[must_use]
    pub const fn include_all() -> Self {
        Self { patterns: None }
    }
}

impl FileFilter for IncludeFilter {
    fn should_include(&self, path: &Path) -> bool {
        let Some(set) = &self.patterns else {
            return true;
        };

        if set.is_match(path) {
            return true;
        }
        // Patterns like "*.csv" should also match by bare file name when
        // the walked path carries leading directories.
        path.file_name().is_some_and(|name| set.is_match(name))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
