//! Common utilities for the Folio document builder.
//!
//! This crate provides shared infrastructure used by all document components:
//! - **Warning System** - colored, deduplicated terminal output for
//!   suspicious but accepted input

pub mod warning;
