use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("File error for {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    #[error("Bad sample at index {index} in {path}: {token:?}")]
    Parse {
        path: String,
        index: usize,
        token: String,
    },

    #[error("WAV write failed: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, SigError>;
