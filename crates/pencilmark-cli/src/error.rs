use std::{io, path::PathBuf};

use pencilmark_core::{DocumentError, ParsePositionError, Position};

/// Errors reported by the command-line tool.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    /// A file could not be read or written.
    #[display("{}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The puzzle document is malformed.
    #[display("{_0}")]
    Document(#[from] DocumentError),
    /// The settings file is malformed.
    #[display("invalid settings: {_0}")]
    Settings(#[from] serde_json::Error),
    /// A cell argument could not be parsed.
    #[display("invalid cell: {_0}")]
    InvalidCell(#[from] ParsePositionError),
    /// A cell lies outside the playable area.
    #[display("cell {pos} is outside the playable area")]
    OutOfBounds {
        /// The offending cell.
        pos: Position,
    },
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
