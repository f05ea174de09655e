// main.rs
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
#[cfg(feature = "progressbar")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(not(feature = "progressbar"))]
use lm_text_prep::tokenizer::progress::{ProgressBar, ProgressStyle};
use lm_text_prep::dataset::{self, LanguageModelingDataset};
use lm_text_prep::{Cleaner, CleanerConfig, MarkerPlacement, PreprocessConfig, Result};
use lm_text_prep::{PorterStemmer, StopWords, logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "lm-text-prep", about = "Clean, tokenize and vectorize text for language modeling")]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Turn a JSONL corpus of {"text": ...} records into fixed-length id vectors
    Vectorize {
        /// Input JSONL file
        #[arg(long)]
        input: PathBuf,

        /// Output file, one JSON array per line (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        prep: PrepArgs,
    },
    /// Build the vocabulary from a corpus, then encode and decode one sentence
    Encode {
        /// Corpus JSONL file used to build the vocabulary
        #[arg(long)]
        corpus: PathBuf,

        /// Sentence to encode
        sentence: String,

        #[command(flatten)]
        prep: PrepArgs,
    },
    /// Print the vocabulary built from a corpus, in id order
    Vocab {
        /// Corpus JSONL file
        #[arg(long)]
        corpus: PathBuf,

        /// Print at most this many entries
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        prep: PrepArgs,
    },
}

#[derive(Args)]
struct PrepArgs {
    /// JSON config file; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum vocabulary size, reserved markers included
    #[arg(long)]
    vocab_size: Option<usize>,

    /// Length of every output vector
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Give the reserved markers ids 0..4 instead of placing them after corpus words
    #[arg(long)]
    leading_markers: bool,

    #[arg(long)]
    no_lowercase: bool,

    #[arg(long)]
    keep_punctuation: bool,

    #[arg(long)]
    keep_stop_words: bool,

    /// Apply Porter stemming
    #[arg(long)]
    stem: bool,

    /// Stop-word language
    #[arg(long)]
    language: Option<String>,

    /// Custom stop-word list, one word per line (replaces the bundled list)
    #[arg(long)]
    stop_words_file: Option<PathBuf>,

    /// Clean and vectorize on a single thread
    #[arg(long)]
    sequential: bool,
}

impl PrepArgs {
    fn config(&self) -> Result<PreprocessConfig> {
        let mut config = match &self.config {
            Some(path) => PreprocessConfig::from_file(path)?,
            None => PreprocessConfig::default(),
        };
        if let Some(size) = self.vocab_size {
            config.vocab_size = size;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if self.leading_markers {
            config.marker_placement = MarkerPlacement::Leading;
        }
        if self.sequential {
            config.parallel = false;
        }
        let cleaner: &mut CleanerConfig = &mut config.cleaner;
        cleaner.lowercase &= !self.no_lowercase;
        cleaner.strip_punctuation &= !self.keep_punctuation;
        cleaner.remove_stop_words &= !self.keep_stop_words;
        cleaner.stem_words |= self.stem;
        if let Some(language) = &self.language {
            cleaner.language = language.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn dataset(&self, sentences: Vec<String>) -> Result<LanguageModelingDataset> {
        let config = self.config()?;
        match &self.stop_words_file {
            Some(path) => {
                let cleaner = Cleaner::with_components(
                    config.cleaner.clone(),
                    Box::new(StopWords::from_file(path)?),
                    Box::new(PorterStemmer),
                );
                LanguageModelingDataset::with_cleaner(sentences, &config, cleaner)
            }
            None => LanguageModelingDataset::new(sentences, &config),
        }
    }
}

fn load_corpus(path: &Path) -> Result<Vec<String>> {
    let entries = dataset::read_jsonl(path)?;
    info!(path = %path.display(), samples = entries.len(), "loaded corpus");
    Ok(entries.into_iter().map(|e| e.text).collect())
}

fn vectorize(input: PathBuf, output: Option<PathBuf>, prep: PrepArgs) -> Result<()> {
    let ds = prep.dataset(load_corpus(&input)?)?;

    let pb = ProgressBar::new(ds.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len}") {
        pb.set_style(style);
    }
    pb.set_message("vectorizing");

    let vectors = ds.iter().inspect(|_| pb.inc(1));
    let written = match output {
        Some(path) => dataset::write_vectors(File::create(&path)?, vectors)?,
        None => dataset::write_vectors(io::stdout().lock(), vectors)?,
    };
    pb.finish();
    info!(written, "vectors written");
    Ok(())
}

fn encode(corpus: PathBuf, sentence: String, prep: PrepArgs) -> Result<()> {
    let ds = prep.dataset(load_corpus(&corpus)?)?;
    let cleaned = ds.cleaner().apply(&sentence);
    let ids = ds.tokenizer().encode(&cleaned)?;
    let vector = ds.vectorizer().vectorize(&ids);
    let decoded = ds.tokenizer().decode(&vector)?;

    let mut out = io::stdout().lock();
    writeln!(out, "cleaned: {cleaned}")?;
    writeln!(out, "ids:     {}", serde_json::to_string(&ids)?)?;
    writeln!(out, "vector:  {}", serde_json::to_string(&vector)?)?;
    writeln!(out, "decoded: {}", decoded.join(" "))?;
    Ok(())
}

fn vocab(corpus: PathBuf, limit: Option<usize>, prep: PrepArgs) -> Result<()> {
    let ds = prep.dataset(load_corpus(&corpus)?)?;
    let words = ds.vocabulary().get_vocab_r();
    let mut out = io::stdout().lock();
    for (id, word) in words.iter().enumerate().take(limit.unwrap_or(words.len())) {
        writeln!(out, "{id}\t{word}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Some(cli.log_level.as_str()));

    match cli.command {
        Command::Vectorize {
            input,
            output,
            prep,
        } => vectorize(input, output, prep),
        Command::Encode {
            corpus,
            sentence,
            prep,
        } => encode(corpus, sentence, prep),
        Command::Vocab {
            corpus,
            limit,
            prep,
        } => vocab(corpus, limit, prep),
    }
}
