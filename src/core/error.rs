//! Error taxonomy for the core operations
//!
//! Only two things can go wrong inside the core: the underlying stream
//! fails while being scanned, or a pattern does not compile. Short
//! windows, empty input and wrapped byte ranges are not errors.

use std::io;
use thiserror::Error;

/// Stream I/O failure during a head/tail scan or a search.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to seek to byte {offset}: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

/// A pattern that could not be compiled into a regular expression.
#[derive(Error, Debug)]
#[error("invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

impl PatternError {
    pub fn new(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self {
            pattern: pattern.into(),
            source,
        }
    }
}

pub type ReadResult<T> = std::result::Result<T, ReadError>;
