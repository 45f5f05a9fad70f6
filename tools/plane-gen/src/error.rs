//! Error types for plane generation and OBJ I/O

use std::path::PathBuf;

/// Errors produced while building, writing, or reading a plane mesh
#[derive(Debug, thiserror::Error)]
pub enum PlaneError {
    /// Grid has no vertices along at least one axis
    #[error("grid resolution {n_x}x{n_y} is empty (both axes need at least 1 vertex)")]
    EmptyGrid { n_x: u32, n_y: u32 },

    /// Vertex count does not fit the u32 index space
    #[error("grid resolution {n_x}x{n_y} exceeds the u32 vertex index range")]
    TooManyVertices { n_x: u32, n_y: u32 },

    /// Destination or source file could not be opened, written, or read
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line while reading an OBJ file back
    #[error("OBJ parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl PlaneError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
