use thiserror::Error;

/// Errors returned by extractor operations.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extract: invalid image: {0}")]
    InvalidImage(String),

    #[error("extract: model error: {0}")]
    Model(String),
}
