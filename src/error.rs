use std::{io, path::PathBuf};

use thiserror::Error;

use crate::graphs::VertexId;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unable to access {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: unable to read input: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: data line before the first graph header")]
    Format { line: usize },
    #[error("line {line}: edge references unknown vertex {vertex}")]
    Reference { line: usize, vertex: VertexId },
    #[error("header announces {expected} but file contains {found}")]
    Header { expected: String, found: String },
    #[error("vertex {vertex} is written with degree {found} but has {expected} edges")]
    Degree {
        vertex: VertexId,
        expected: u32,
        found: u32,
    },
    #[error("unable to write manifest: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> ConvertError {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> ConvertError {
        ConvertError::Parse {
            line,
            message: message.into(),
        }
    }
}
