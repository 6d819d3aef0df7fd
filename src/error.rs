//! Error types shared by the compressor, the decompressor and the command line tool.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Debug, Error)]
pub enum HuffError {
    /// A store could not be opened or created.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an open store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compressed data does not describe a valid tree or payload.
    #[error("invalid file format: {0}")]
    CorruptFormat(String),

    /// A byte has no codeword in the encoding table.
    #[error("byte 0x{0:02x} doesn't exist in the table")]
    UnknownSymbol(u8),

    /// There is nothing to build a tree from.
    #[error("cannot compress an empty input")]
    EmptyInput,

    /// The interactive mode selector was not recognized.
    #[error("invalid mode: {0:?}")]
    InvalidMode(String),
}

impl HuffError {
    /// Build a `CorruptFormat` error from a description of what is wrong.
    pub fn corrupt(message: impl Into<String>) -> Self {
        HuffError::CorruptFormat(message.into())
    }

    /// Wrap an open/create failure with the path that caused it.
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HuffError::Open {
            path: path.into(),
            source,
        }
    }

    /// True for the I/O category (open, read or write failures).
    pub fn is_io(&self) -> bool {
        matches!(self, HuffError::Open { .. } | HuffError::Io(_))
    }
}
