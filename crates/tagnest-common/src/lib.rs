//! Common utilities for the tagnest validator.
//!
//! This crate provides shared infrastructure used by the front-ends:
//! - **Warning System** - colored, deduplicated terminal warnings
//! - **Source Loading** - reading markup from files, stdin or inline text

pub mod source;
pub mod warning;

pub use source::{Source, SourceError};
