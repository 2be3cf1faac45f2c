//! Common utilities for the Trellis tree builder.
//!
//! This crate provides shared infrastructure used by all Trellis components:
//! - **Warning System** - deduplicated, colored terminal output for non-fatal conditions

pub mod warning;
