// src/tokenizer/mod.rs

pub mod cleaner;
pub mod progress; // no-op stand-in when the "progressbar" feature is off
pub mod result;
pub mod stemmer;
pub mod stop_words;
pub mod vectorizer;
pub mod vocabulary;
pub mod word_level;

// Re-export the types callers actually touch, so they are reachable as
// `tokenizer::SomeType`.
pub use cleaner::Cleaner;
pub use result::{Error, Result};
pub use stemmer::{IdentityStemmer, PorterStemmer, Stemmer};
pub use stop_words::{StopWordProvider, StopWords};
pub use vectorizer::Vectorizer;
pub use vocabulary::{
    MarkerPlacement, PAD_TOKEN, RESERVED_TOKENS, START_TOKEN, STOP_TOKEN, TokenId, UNK_TOKEN,
    Vocabulary,
};
pub use word_level::Tokenizer;
