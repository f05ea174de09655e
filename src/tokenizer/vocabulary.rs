// src/tokenizer/vocabulary.rs

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::tokenizer::{Error, Result};

pub type TokenId = u32;

pub const START_TOKEN: &str = "<start>";
pub const PAD_TOKEN: &str = "<pad>";
pub const STOP_TOKEN: &str = "<stop>";
pub const UNK_TOKEN: &str = "<unk>";

/// Reserved markers, in the order they are given ids.
pub const RESERVED_TOKENS: [&str; 4] = [START_TOKEN, PAD_TOKEN, STOP_TOKEN, UNK_TOKEN];

/// Where the reserved markers land in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPlacement {
    /// Markers take ids `0..4`, corpus words follow.
    Leading,
    /// Corpus words first, markers after them. Room for the markers is held
    /// back while corpus words are admitted, so a full corpus cannot push
    /// them out.
    #[default]
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReservedIds {
    start: TokenId,
    pad: TokenId,
    stop: TokenId,
    unk: TokenId,
}

/// Bounded, frozen mapping between words and dense ids.
///
/// `id_to_word[i]` is the word with id `i`, and `word_to_id` is its exact
/// inverse. There is no way to insert once built.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    word_to_id: HashMap<String, TokenId>,
    id_to_word: Vec<String>,
    reserved: ReservedIds,
}

/// Append-only insertion state used while the vocabulary is being built.
struct Builder {
    word_to_id: HashMap<String, TokenId>,
    id_to_word: Vec<String>,
}

impl Builder {
    fn new() -> Self {
        Self {
            word_to_id: HashMap::default(),
            id_to_word: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.id_to_word.len()
    }

    fn contains(&self, word: &str) -> bool {
        self.word_to_id.contains_key(word)
    }

    fn insert(&mut self, word: &str) {
        let id = self.id_to_word.len() as TokenId;
        self.word_to_id.insert(word.to_string(), id);
        self.id_to_word.push(word.to_string());
    }
}

impl Vocabulary {
    /// Builds the vocabulary from cleaned sentences in one pass.
    ///
    /// Sentences are joined with single spaces and split on single spaces.
    /// Words get the next free id in first-seen order until `max_size` is
    /// reached; words already present are never re-added. The four reserved
    /// markers are always present, so `max_size` must be at least 4.
    pub fn build<S: AsRef<str>>(
        sentences: &[S],
        max_size: usize,
        placement: MarkerPlacement,
    ) -> Result<Self> {
        if max_size < RESERVED_TOKENS.len() {
            return Err(Error::VocabularyTooSmall {
                max_size,
                required: RESERVED_TOKENS.len(),
            });
        }

        let joined = sentences
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        debug!(sentences = sentences.len(), max_size, ?placement, "building vocabulary");
        debug!(words = joined.split(' ').count(), "word stream ready");

        let mut builder = Builder::new();
        let mut dropped: HashSet<&str> = HashSet::default();

        match placement {
            MarkerPlacement::Leading => {
                for marker in RESERVED_TOKENS {
                    builder.insert(marker);
                }
                for word in joined.split(' ') {
                    if builder.contains(word) {
                        continue;
                    }
                    if builder.len() < max_size {
                        builder.insert(word);
                    } else {
                        dropped.insert(word);
                    }
                }
            }
            MarkerPlacement::Trailing => {
                // Markers not inserted yet; `len + missing <= max_size` holds throughout.
                let mut missing = RESERVED_TOKENS.len();
                for word in joined.split(' ') {
                    if builder.contains(word) {
                        continue;
                    }
                    if RESERVED_TOKENS.contains(&word) {
                        builder.insert(word);
                        missing -= 1;
                    } else if builder.len() + missing < max_size {
                        builder.insert(word);
                    } else {
                        dropped.insert(word);
                    }
                }
                for marker in RESERVED_TOKENS {
                    if !builder.contains(marker) {
                        builder.insert(marker);
                    }
                }
            }
        }

        if !dropped.is_empty() {
            warn!(
                dropped = dropped.len(),
                max_size,
                "vocabulary size cap reached, remaining words map to {}",
                UNK_TOKEN
            );
        }

        let lookup = |marker: &str| {
            builder
                .word_to_id
                .get(marker)
                .copied()
                .ok_or(Error::VocabularyTooSmall {
                    max_size,
                    required: RESERVED_TOKENS.len(),
                })
        };
        let reserved = ReservedIds {
            start: lookup(START_TOKEN)?,
            pad: lookup(PAD_TOKEN)?,
            stop: lookup(STOP_TOKEN)?,
            unk: lookup(UNK_TOKEN)?,
        };

        debug!(
            start = reserved.start,
            pad = reserved.pad,
            stop = reserved.stop,
            unk = reserved.unk,
            "reserved markers placed"
        );
        info!(size = builder.len(), padding_id = reserved.pad, "vocabulary built");

        Ok(Self {
            word_to_id: builder.word_to_id,
            id_to_word: builder.id_to_word,
            reserved,
        })
    }

    pub fn len(&self) -> usize {
        self.id_to_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_word.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_to_id.contains_key(word)
    }

    pub fn token_to_id(&self, word: &str) -> Option<TokenId> {
        self.word_to_id.get(word).copied()
    }

    pub fn id_to_token(&self, id: TokenId) -> Option<&str> {
        self.id_to_word.get(id as usize).map(String::as_str)
    }

    /// word -> id view.
    pub fn get_vocab(&self) -> &HashMap<String, TokenId> {
        &self.word_to_id
    }

    /// id -> word view; the index is the id.
    pub fn get_vocab_r(&self) -> &[String] {
        &self.id_to_word
    }

    pub fn padding_id(&self) -> TokenId {
        self.reserved.pad
    }

    pub fn start_id(&self) -> TokenId {
        self.reserved.start
    }

    pub fn stop_id(&self) -> TokenId {
        self.reserved.stop
    }

    pub fn unk_id(&self) -> TokenId {
        self.reserved.unk
    }

    /// Wraps the sentence in start/stop markers and maps every space-separated
    /// word to its id. Words outside the vocabulary map to the unknown marker.
    pub fn encode(&self, sentence: &str) -> Vec<TokenId> {
        let wrapped = format!("{START_TOKEN} {sentence} {STOP_TOKEN}");
        wrapped
            .split(' ')
            .map(|word| self.token_to_id(word).unwrap_or(self.reserved.unk))
            .collect()
    }

    /// Maps each id back to its word, keeping length and order.
    pub fn decode(&self, ids: &[TokenId]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| {
                self.id_to_token(id)
                    .map(str::to_string)
                    .ok_or(Error::UnknownId(id))
            })
            .collect()
    }
}
