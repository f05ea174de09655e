//! Wires cleaning, tokenizing and vectorizing together over a corpus of text
//! samples, plus JSONL helpers for reading samples and writing vectors.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use rayon_cond::CondIterator;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PreprocessConfig;
use crate::tokenizer::{Cleaner, Result, TokenId, Tokenizer, Vectorizer, Vocabulary};

/// One JSONL record: `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub text: String,
}

/// Reads `{"text": ...}` records, one per line. Blank lines are skipped, and
/// lines that do not parse are skipped with a warning.
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<DataEntry>> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<DataEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(line = line_no + 1, error = %e, "skipping unparseable record"),
        }
    }
    Ok(entries)
}

/// Writes each vector as a JSON array on its own line.
pub fn write_vectors<W, I>(writer: W, vectors: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Vec<TokenId>>,
{
    let mut writer = BufWriter::new(writer);
    let mut written = 0;
    for vector in vectors {
        serde_json::to_writer(&mut writer, &vector)?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Raw samples together with the cleaner, built tokenizer and vectorizer
/// needed to turn any of them into a fixed-length id vector.
pub struct LanguageModelingDataset {
    sentences: Vec<String>,
    cleaner: Cleaner,
    tokenizer: Tokenizer,
    vocabulary: Arc<Vocabulary>,
    vectorizer: Vectorizer,
    parallel: bool,
}

impl LanguageModelingDataset {
    pub fn new(sentences: Vec<String>, config: &PreprocessConfig) -> Result<Self> {
        config.validate()?;
        let cleaner = Cleaner::from_config(config.cleaner.clone())?;
        Self::with_cleaner(sentences, config, cleaner)
    }

    pub fn from_entries(entries: Vec<DataEntry>, config: &PreprocessConfig) -> Result<Self> {
        Self::new(entries.into_iter().map(|e| e.text).collect(), config)
    }

    /// Same as [`LanguageModelingDataset::new`] with a caller-supplied cleaner,
    /// e.g. one using custom stop words.
    pub fn with_cleaner(
        sentences: Vec<String>,
        config: &PreprocessConfig,
        cleaner: Cleaner,
    ) -> Result<Self> {
        config.validate()?;
        let cleaned = cleaner.apply_all(&sentences, config.parallel);

        let mut tokenizer = Tokenizer::new(cleaned, config.vocab_size)
            .with_marker_placement(config.marker_placement);
        tokenizer.create_vocabulary()?;
        let vocabulary = tokenizer.shared_vocabulary()?;
        let vectorizer = Vectorizer::new(config.max_tokens, vocabulary.padding_id());

        info!(
            samples = sentences.len(),
            vocab_size = vocabulary.len(),
            max_tokens = config.max_tokens,
            "dataset ready"
        );

        Ok(Self {
            sentences,
            cleaner,
            tokenizer,
            vocabulary,
            vectorizer,
            parallel: config.parallel,
        })
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Clean, encode and vectorize sample `idx`.
    pub fn get(&self, idx: usize) -> Option<Vec<TokenId>> {
        self.sentences.get(idx).map(|s| self.process(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec<TokenId>> + '_ {
        self.sentences.iter().map(|s| self.process(s))
    }

    /// Every sample, in order.
    pub fn vectorize_all(&self) -> Vec<Vec<TokenId>> {
        CondIterator::new(&self.sentences, self.parallel)
            .map(|s| self.process(s))
            .collect()
    }

    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    fn process(&self, sentence: &str) -> Vec<TokenId> {
        let cleaned = self.cleaner.apply(sentence);
        self.vectorizer.vectorize(&self.vocabulary.encode(&cleaned))
    }
}
