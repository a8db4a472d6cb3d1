use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeriscanError};

/// Default config file name, looked up in the first scan root.
pub const CONFIG_FILE_NAME: &str = ".veriscan.toml";

/// Scan settings loadable from `.veriscan.toml`. Command-line flags
/// override whatever is set here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Descend into subdirectories.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Glob include patterns; empty means every file.
    #[serde(default)]
    pub include: Vec<String>,

    /// Worker thread count; 0 lets the pool size itself.
    #[serde(default)]
    pub workers: usize,

    /// Per-file budget in seconds; 0 disables the watchdog.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Allow the spreadsheet analyzer to invoke the component installer
    /// when the advanced engine is absent.
    #[serde(default)]
    pub auto_install: bool,

    /// Report format: "text", "json" or "csv".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recursive: true,
            include: Vec::new(),
            workers: 0,
            timeout_secs: default_timeout_secs(),
            auto_install: false,
            format: default_format(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_format() -> String {
    "text".to_string()
}

impl Config {
    /// Loads and validates a config file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, is not valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            VeriscanError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Discovers `.veriscan.toml` in the given directory, if present.
    #[must_use]
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    /// # Errors
    /// Returns an error for settings no scan could honor.
    pub fn validate(&self) -> Result<()> {
        match self.format.parse::<crate::output::OutputFormat>() {
            Ok(_) => Ok(()),
            Err(e) => Err(VeriscanError::Config(e)),
        }
    }

    /// Annotated starter config written by `veriscan init`.
    #[must_use]
    pub fn template() -> String {
        concat!(
            "# veriscan configuration\n",
            "\n",
            "# Descend into subdirectories.\n",
            "recursive = true\n",
            "\n",
            "# Only check files matching these globs; empty means everything.\n",
            "# include = [\"*.csv\", \"*.xlsx\"]\n",
            "include = []\n",
            "\n",
            "# Worker threads; 0 sizes the pool from available CPUs.\n",
            "workers = 0\n",
            "\n",
            "# Per-file budget in seconds; 0 disables the watchdog.\n",
            "timeout_secs = 30\n",
            "\n",
            "# Invoke the component installer when the advanced spreadsheet\n",
            "# engine is absent.\n",
            "auto_install = false\n",
            "\n",
            "# Report format: \"text\", \"json\" or \"csv\".\n",
            "format = \"text\"\n",
        )
        .to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
