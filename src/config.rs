//! Preprocessing configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tokenizer::vocabulary::{MarkerPlacement, RESERVED_TOKENS};
use crate::tokenizer::{Error, Result};

/// Which cleaning steps run. The order is fixed: case folding, punctuation,
/// stop words, stemming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub lowercase: bool,
    pub strip_punctuation: bool,
    pub remove_stop_words: bool,
    pub stem_words: bool,
    /// Stop-word language.
    pub language: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_punctuation: true,
            remove_stop_words: true,
            stem_words: false,
            language: "english".to_string(),
        }
    }
}

impl CleanerConfig {
    /// Every step off.
    pub fn none() -> Self {
        Self {
            lowercase: false,
            strip_punctuation: false,
            remove_stop_words: false,
            stem_words: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_lowercase(mut self, enabled: bool) -> Self {
        self.lowercase = enabled;
        self
    }

    #[must_use]
    pub fn with_strip_punctuation(mut self, enabled: bool) -> Self {
        self.strip_punctuation = enabled;
        self
    }

    #[must_use]
    pub fn with_remove_stop_words(mut self, enabled: bool) -> Self {
        self.remove_stop_words = enabled;
        self
    }

    #[must_use]
    pub fn with_stem_words(mut self, enabled: bool) -> Self {
        self.stem_words = enabled;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Settings for the full clean -> encode -> vectorize pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Upper bound on vocabulary entries, reserved markers included.
    pub vocab_size: usize,
    /// Length of every output vector.
    pub max_tokens: usize,
    pub marker_placement: MarkerPlacement,
    /// Clean and vectorize samples on the rayon pool.
    pub parallel: bool,
    pub cleaner: CleanerConfig,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            vocab_size: 10_000,
            max_tokens: 20,
            marker_placement: MarkerPlacement::Trailing,
            parallel: true,
            cleaner: CleanerConfig::default(),
        }
    }
}

impl PreprocessConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(Error::InvalidConfig("max_tokens must be at least 1".into()));
        }
        if self.vocab_size < RESERVED_TOKENS.len() {
            return Err(Error::VocabularyTooSmall {
                max_size: self.vocab_size,
                required: RESERVED_TOKENS.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_vocab_size(mut self, size: usize) -> Self {
        self.vocab_size = size;
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_marker_placement(mut self, placement: MarkerPlacement) -> Self {
        self.marker_placement = placement;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_cleaner(mut self, cleaner: CleanerConfig) -> Self {
        self.cleaner = cleaner;
        self
    }
}
