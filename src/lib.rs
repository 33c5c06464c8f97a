pub mod cli;
pub mod config;
pub mod discovery;
pub mod emitter;
pub mod generator;
pub mod naming;
pub mod store;

pub use config::GeneratorConfig;
pub use generator::{CategorySelection, GenerationContext, GenerationReport};

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GeneratorError {
    #[error("Incorrect input directory: {0}")]
    InvalidInputDir(PathBuf),
    #[error("Incorrect output directory {path}: {reason}")]
    InvalidOutputDir { path: PathBuf, reason: String },
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Shader file is empty: {0}")]
    EmptyShader(PathBuf),
    #[error("Duplicate {category} identifier '{identifier}' derived from {first} and {second}")]
    DuplicateIdentifier {
        category: String,
        identifier: String,
        first: String,
        second: String,
    },
    #[error("File name is not valid UTF-8: {0}")]
    InvalidFileName(PathBuf),
    #[error("Failed to parse configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl GeneratorError {
    /// Wraps an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors caused by bad command line input rather than by the run itself
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputDir(_) | Self::InvalidOutputDir { .. }
        )
    }
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
