use super::config::{ParseShellModeError, ShellMode};
use crate::core::geometry::distance::GeometryError;
use crate::core::models::distances::TensorError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidMode(#[from] ParseShellModeError),

    #[error("At least 2 waters are required to extract neighbour distances, found {waters}")]
    InsufficientData { waters: usize },

    #[error("Mode '{mode}' needs at least {required} waters for a full first shell, found {waters}")]
    InsufficientShellSize {
        mode: ShellMode,
        waters: usize,
        required: usize,
    },

    #[error("Distance computation failed: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Invalid distance array: {source}")]
    Tensor {
        #[from]
        source: TensorError,
    },
}
