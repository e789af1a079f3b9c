//! Markup source loading.
//!
//! The validator core only ever sees a `&str`; this module is where the
//! front-ends turn a file path, standard input or an inline string into
//! that text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use thiserror::Error;

/// Where the markup to validate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk.
    File(PathBuf),
    /// Markup passed directly (e.g. `--html '<p></p>'`).
    Inline(String),
    /// Standard input, read to the end.
    Stdin,
}

/// Failure to obtain the source text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Standard input could not be read.
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),
}

impl Source {
    /// Build a source from an optional path argument, where `-` or no path
    /// means standard input.
    #[must_use]
    pub fn from_path_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => Self::File(p),
            _ => Self::Stdin,
        }
    }

    /// Short human-readable name for messages (`<inline>`, `<stdin>` or the path).
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline(_) => "<inline>".to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read the full source text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file or standard input cannot be read
    /// as UTF-8 text.
    pub fn load(&self) -> Result<String, SourceError> {
        match self {
            Self::File(path) => fs::read_to_string(path).map_err(|source| SourceError::Read {
                path: path.clone(),
                source,
            }),
            Self::Inline(text) => Ok(text.clone()),
            Self::Stdin => {
                let mut text = String::new();
                let _ = io::stdin()
                    .read_to_string(&mut text)
                    .map_err(SourceError::Stdin)?;
                Ok(text)
            }
        }
    }
}
