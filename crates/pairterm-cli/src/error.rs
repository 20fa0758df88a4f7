use pairterm::core::polynomial::PolynomialError;
use pairterm::engine::error::EngineError;
use pairterm::species::ParamLoadError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Params(#[from] ParamLoadError),

    #[error(transparent)]
    Polynomial(#[from] PolynomialError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Gradient check failed: largest deviation {max_error:.3e} exceeds tolerance {tolerance:.3e}")]
    GradientCheck { max_error: f64, tolerance: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
