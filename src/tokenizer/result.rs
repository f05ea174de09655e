// src/tokenizer/result.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The configured maximum cannot hold the reserved markers.
    #[error("vocabulary too small: max size {max_size} cannot hold the {required} reserved markers")]
    VocabularyTooSmall { max_size: usize, required: usize },

    #[error("unknown token id: {0}")]
    UnknownId(u32),

    #[error("vocabulary has not been built")]
    NotBuilt,

    #[error("vocabulary is already built")]
    AlreadyBuilt,

    #[error("no stop-word list for language `{0}`")]
    UnsupportedLanguage(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
