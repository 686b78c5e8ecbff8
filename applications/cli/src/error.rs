/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output directory error: {0}")]
    OutputDir(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
