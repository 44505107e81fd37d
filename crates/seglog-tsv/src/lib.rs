//! Tab-delimited table I/O for seglog.
//!
//! This library reads a header-plus-rows tab-delimited log into memory and
//! writes header-prefixed row slices back out, one file at a time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod table;
pub mod writer;

pub use atomic::write_table_atomic;
pub use error::{Error, Result};
pub use reader::{TsvReader, read_table};
pub use table::{Header, Row, Table};
pub use writer::TsvWriter;
