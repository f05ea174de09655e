//! Text preparation for word-level language modeling: sentence cleaning, a
//! bounded word vocabulary with reserved markers, sentence encode/decode, and
//! fixed-length id vectors.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod tokenizer;

pub use config::{CleanerConfig, PreprocessConfig};
pub use dataset::{DataEntry, LanguageModelingDataset};
pub use tokenizer::{
    Cleaner, Error, MarkerPlacement, PorterStemmer, Result, Stemmer, StopWordProvider, StopWords,
    TokenId, Tokenizer, Vectorizer, Vocabulary,
};
