//! CLI argument parsing and dispatch.
//!
//! Seglog has a single command: split one input log by one predicate.
//! Options are resolved from flags first, then an optional YAML file given
//! with `--config`, then built-in defaults.
//!
//! # Example
//!
//! ```bash
//! seglog -i log.txt -o flight -p "state >= 0 && acc_x > 20"
//! seglog -i ../Desktop/Log_file_201.txt -p "gps_status==2 || healthy != 0"
//! ```

mod validators;

use crate::commands::split::SplitPlan;
use crate::config::{ConfigFile, DEFAULT_OUTPUT_DIR, DEFAULT_PREFIX, RunConfig};
use crate::output::{self, OutputConfig, OutputMode};
use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

// Re-export validators for external use
pub use validators::validate_prefix;

const AFTER_HELP: &str = "\
Available operators: > / >= / < / <= / == / !=

Conditions are always combined with AND, whatever connective ('&&', '||')
separates them. The last row of the log never belongs to a segment.

Examples:
  seglog -i log.txt -o flight -p \"state >= 0 && acc_x > 20\"
  seglog -i ../Desktop/Log_file_201.txt -p \"gps_status==2 || healthy != 0\"

Segments are written to <OUTPUT_DIR>/<PREFIX>-<n>.txt, each starting with
the header row. Existing .txt files in the output directory are removed
first unless --no-clean is given.";

/// Seglog - split a tab-delimited log by a field predicate
///
/// Reads a log whose first line names the fields, and writes every maximal
/// run of consecutive rows satisfying the predicate to its own file.
#[derive(Parser, Debug)]
#[command(name = "seglog")]
#[command(author, version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Input log file (tab-delimited, header on the first line)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Predicate, e.g. "state >= 1 && acc_x > 20"
    #[arg(short, long)]
    pub predicate: String,

    /// Output file name prefix, without extension [default: flight]
    #[arg(short = 'o', long = "output", value_name = "PREFIX", value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Directory receiving the segment files [default: logs]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// YAML file with default options
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail when the predicate contains no conditions
    #[arg(long)]
    pub strict: bool,

    /// Keep existing .txt files in the output directory
    #[arg(long)]
    pub no_clean: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Returns the output mode selected by `--json` and `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Text
        }
    }

    /// Builds the run configuration, resolving relative paths against
    /// `working_dir`.
    pub fn run_config(&self, file: &ConfigFile, working_dir: &Path) -> RunConfig {
        let output_dir = self
            .output_dir
            .clone()
            .or_else(|| file.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let prefix = self
            .prefix
            .clone()
            .or_else(|| file.prefix.as_deref().map(|p| p.trim().to_string()))
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let mut config = RunConfig::new(
            working_dir.join(&self.input),
            working_dir.join(output_dir),
            prefix,
        );
        config.strict = self.strict || file.strict.unwrap_or(false);
        config.clean = !self.no_clean && file.clean.unwrap_or(true);
        config
    }

    /// Execute the split
    ///
    /// In text mode progress is printed as each stage completes, so a run
    /// that fails while scanning still shows the header and conditions.
    pub fn execute(&self) -> Result<()> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let config = self.run_config(&file, &std::env::current_dir()?);
        tracing::debug!(?config, "Resolved run configuration");

        let mode = self.output_mode();
        let colors = OutputConfig::from_env();
        let stdout = io::stdout();

        if mode == OutputMode::Text {
            output::write_reading(&mut stdout.lock(), &config.input, colors)?;
        }

        let plan = SplitPlan::prepare(config, &self.predicate)?;
        if mode == OutputMode::Text {
            output::write_plan(
                &mut stdout.lock(),
                plan.header().names(),
                &plan.condition_texts(),
                plan.conditions().or_connectives(),
                colors,
            )?;
        }

        let report = plan.execute()?;
        let mut out = stdout.lock();
        match mode {
            OutputMode::Text => output::write_result(&mut out, &report, colors)?,
            OutputMode::Json => output::write_json(&mut out, &report)?,
            OutputMode::Quiet => {}
        }
        Ok(())
    }
}
