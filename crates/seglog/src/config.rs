//! Run configuration for seglog.
//!
//! A [`RunConfig`] is the single explicit description of one split: where
//! to read, where to write, and how strictly to treat the predicate. It is
//! built by the CLI from flags, an optional YAML [`ConfigFile`], and the
//! built-in defaults, in that order of precedence.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output file prefix.
pub const DEFAULT_PREFIX: &str = "flight";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "logs";

/// Extension of written segment files; also the extension cleaned up
/// before a run.
pub const SEGMENT_EXTENSION: &str = "txt";

/// Everything one split run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Tab-delimited log to read.
    pub input: PathBuf,
    /// Directory receiving the segment files.
    pub output_dir: PathBuf,
    /// File name prefix; segment `n` is written to `{prefix}-{n}.txt`.
    pub prefix: String,
    /// Treat a predicate with no parsable conditions as an error.
    pub strict: bool,
    /// Remove existing `.txt` files from the output directory first.
    pub clean: bool,
}

impl RunConfig {
    /// Creates a configuration with `strict` off and `clean` on.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            strict: false,
            clean: true,
        }
    }
}

/// Optional defaults loaded from a YAML file.
///
/// ```yaml
/// output-dir: logs
/// prefix: flight
/// strict: false
/// clean: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Output directory.
    pub output_dir: Option<PathBuf>,
    /// Output file prefix.
    pub prefix: Option<String>,
    /// Reject predicates with no conditions.
    pub strict: Option<bool>,
    /// Clean the output directory before writing.
    pub clean: Option<bool>,
}

impl ConfigFile {
    /// Loads a configuration file.
    ///
    /// Relative `output-dir` values are kept as written; they resolve
    /// against the working directory, not the file's location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::Config`] if it is not valid YAML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Parses configuration from YAML text. An empty document is all
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns the YAML error message if the text does not match the schema.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}
