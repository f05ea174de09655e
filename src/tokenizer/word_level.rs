// src/tokenizer/word_level.rs

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::tokenizer::vocabulary::{MarkerPlacement, TokenId, Vocabulary};
use crate::tokenizer::{Error, Result};

enum State {
    Unbuilt { sentences: Vec<String> },
    Built(Arc<Vocabulary>),
}

/// Word-level tokenizer over a vocabulary built once from a corpus of
/// cleaned sentences.
///
/// Starts unbuilt; [`Tokenizer::create_vocabulary`] moves it to built, after
/// which the vocabulary is frozen and encode/decode become available.
pub struct Tokenizer {
    max_vocab_size: usize,
    placement: MarkerPlacement,
    state: State,
}

impl Tokenizer {
    pub fn new(sentences: Vec<String>, max_vocab_size: usize) -> Self {
        Self {
            max_vocab_size,
            placement: MarkerPlacement::default(),
            state: State::Unbuilt { sentences },
        }
    }

    #[must_use]
    pub fn with_marker_placement(mut self, placement: MarkerPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Convenience for `new` followed by `create_vocabulary`.
    pub fn from_corpus(
        sentences: Vec<String>,
        max_vocab_size: usize,
        placement: MarkerPlacement,
    ) -> Result<Self> {
        let mut tokenizer = Self::new(sentences, max_vocab_size).with_marker_placement(placement);
        tokenizer.create_vocabulary()?;
        Ok(tokenizer)
    }

    /// Builds the vocabulary from the corpus given at construction.
    ///
    /// Fails with [`Error::AlreadyBuilt`] on a second call, and with
    /// [`Error::VocabularyTooSmall`] when the size cap cannot hold the
    /// reserved markers; the tokenizer then stays unbuilt.
    pub fn create_vocabulary(&mut self) -> Result<()> {
        let State::Unbuilt { sentences } = &self.state else {
            return Err(Error::AlreadyBuilt);
        };
        let vocabulary = Vocabulary::build(sentences, self.max_vocab_size, self.placement)?;
        // The corpus is no longer needed once the vocabulary exists.
        self.state = State::Built(Arc::new(vocabulary));
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, State::Built(_))
    }

    pub fn max_vocab_size(&self) -> usize {
        self.max_vocab_size
    }

    pub fn vocabulary(&self) -> Result<&Vocabulary> {
        match &self.state {
            State::Built(vocabulary) => Ok(vocabulary.as_ref()),
            State::Unbuilt { .. } => Err(Error::NotBuilt),
        }
    }

    /// Read-only handle to the built vocabulary; clones share one allocation.
    pub fn shared_vocabulary(&self) -> Result<Arc<Vocabulary>> {
        match &self.state {
            State::Built(vocabulary) => Ok(Arc::clone(vocabulary)),
            State::Unbuilt { .. } => Err(Error::NotBuilt),
        }
    }

    pub fn padding_id(&self) -> Result<TokenId> {
        Ok(self.vocabulary()?.padding_id())
    }

    pub fn start_id(&self) -> Result<TokenId> {
        Ok(self.vocabulary()?.start_id())
    }

    pub fn stop_id(&self) -> Result<TokenId> {
        Ok(self.vocabulary()?.stop_id())
    }

    pub fn unk_id(&self) -> Result<TokenId> {
        Ok(self.vocabulary()?.unk_id())
    }

    /// word -> id view of the built vocabulary.
    pub fn get_vocab(&self) -> Result<&HashMap<String, TokenId>> {
        Ok(self.vocabulary()?.get_vocab())
    }

    /// id -> word view; index `i` holds the word with id `i`.
    pub fn get_vocab_r(&self) -> Result<&[String]> {
        Ok(self.vocabulary()?.get_vocab_r())
    }

    pub fn vocab_size(&self) -> usize {
        self.vocabulary().map_or(0, Vocabulary::len)
    }

    pub fn token_to_id(&self, word: &str) -> Option<TokenId> {
        self.vocabulary().ok()?.token_to_id(word)
    }

    pub fn id_to_token(&self, id: TokenId) -> Option<&str> {
        self.vocabulary().ok()?.id_to_token(id)
    }

    /// `<start> sentence <stop>`, one id per space-separated word. Never fails
    /// on unseen words once built.
    pub fn encode(&self, sentence: &str) -> Result<Vec<TokenId>> {
        Ok(self.vocabulary()?.encode(sentence))
    }

    pub fn decode(&self, ids: &[TokenId]) -> Result<Vec<String>> {
        self.vocabulary()?.decode(ids)
    }

    pub fn decode_to_string(&self, ids: &[TokenId]) -> Result<String> {
        Ok(self.decode(ids)?.join(" "))
    }
}
