//! Command implementations for seglog.

pub mod split;
