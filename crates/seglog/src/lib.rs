//! Seglog - split tab-delimited telemetry logs by a field predicate.
//!
//! A log is read fully into memory, every row is tested against a predicate
//! such as `state >= 1 && acc_x > 20`, and each maximal run of consecutive
//! matching rows is written to its own numbered file with the header
//! prepended.
//!
//! # Example
//!
//! ```no_run
//! use seglog::commands::split::split;
//! use seglog::config::RunConfig;
//!
//! # fn main() -> seglog::error::Result<()> {
//! let config = RunConfig::new("log.txt", "logs", "flight");
//! let report = split(config, "state >= 1 && acc_x > 20")?;
//! println!("{} segments", report.segments.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod error;
pub mod predicate;
pub mod segment;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Console and JSON rendering
pub mod output;
