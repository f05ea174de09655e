// src/tokenizer/cleaner.rs

use std::sync::LazyLock;

use rayon_cond::CondIterator;
use regex::Regex;

use crate::config::CleanerConfig;
use crate::tokenizer::Result;
use crate::tokenizer::stemmer::{PorterStemmer, Stemmer};
use crate::tokenizer::stop_words::{StopWordProvider, StopWords};

// Same character set as Python's `string.punctuation`.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[[:punct:]]").unwrap());

/// Normalizes one sentence at a time with the steps enabled in its config.
pub struct Cleaner {
    config: CleanerConfig,
    stop_words: Box<dyn StopWordProvider>,
    stemmer: Box<dyn Stemmer>,
}

impl Cleaner {
    /// Uses the bundled stop-word list for `config.language` and the Porter
    /// stemmer. The list is only loaded when stop-word removal is enabled.
    pub fn from_config(config: CleanerConfig) -> Result<Self> {
        let stop_words = if config.remove_stop_words {
            StopWords::for_language(&config.language)?
        } else {
            StopWords::default()
        };
        Ok(Self::with_components(
            config,
            Box::new(stop_words),
            Box::new(PorterStemmer),
        ))
    }

    pub fn with_components(
        config: CleanerConfig,
        stop_words: Box<dyn StopWordProvider>,
        stemmer: Box<dyn Stemmer>,
    ) -> Self {
        Self {
            config,
            stop_words,
            stemmer,
        }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn lowercase(&self, sentence: &str) -> String {
        sentence.to_lowercase()
    }

    /// Drops ASCII punctuation, then collapses whitespace runs to single spaces.
    pub fn strip_punctuation(&self, sentence: &str) -> String {
        let stripped = PUNCTUATION.replace_all(sentence, "");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn remove_stop_words(&self, sentence: &str) -> String {
        sentence
            .split(' ')
            .filter(|word| !self.stop_words.is_stop_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stem_words(&self, sentence: &str) -> String {
        sentence
            .split(' ')
            .map(|word| self.stemmer.stem(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn apply(&self, sentence: &str) -> String {
        let mut sentence = sentence.to_string();
        if self.config.lowercase {
            sentence = self.lowercase(&sentence);
        }
        if self.config.strip_punctuation {
            sentence = self.strip_punctuation(&sentence);
        }
        if self.config.remove_stop_words {
            sentence = self.remove_stop_words(&sentence);
        }
        if self.config.stem_words {
            sentence = self.stem_words(&sentence);
        }
        sentence
    }

    /// Cleans every sentence, keeping input order.
    pub fn apply_all<S: AsRef<str> + Sync>(&self, sentences: &[S], parallel: bool) -> Vec<String> {
        CondIterator::new(sentences, parallel)
            .map(|s| self.apply(s.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::stemmer::IdentityStemmer;

    fn cleaner(config: CleanerConfig) -> Cleaner {
        Cleaner::from_config(config).unwrap()
    }

    #[test]
    fn lowercases_only_when_enabled() {
        let on = cleaner(CleanerConfig::none().with_lowercase(true));
        let off = cleaner(CleanerConfig::none());
        assert_eq!(on.apply("Hi THERE"), "hi there");
        assert_eq!(off.apply("Hi THERE"), "Hi THERE");
    }

    #[test]
    fn punctuation_is_removed_and_spaces_collapsed() {
        let c = cleaner(CleanerConfig::none().with_strip_punctuation(true));
        assert_eq!(c.apply("Hello , world!!  (yes)"), "Hello world yes");
        assert_eq!(c.apply("don't-stop"), "dontstop");
        assert_eq!(c.apply(" ... "), "");
    }

    #[test]
    fn stop_words_match_exact_tokens() {
        let c = cleaner(CleanerConfig::none().with_remove_stop_words(true));
        assert_eq!(c.apply("the cat is on the mat"), "cat mat");
        // No case folding here, so capitalized stop words survive.
        assert_eq!(c.apply("The cat"), "The cat");
    }

    #[test]
    fn steps_run_in_fixed_order() {
        let c = cleaner(CleanerConfig::default().with_stem_words(true));
        assert_eq!(c.apply("The Cats were RUNNING, happily!"), "cat run happili");
    }

    #[test]
    fn stemming_folds_case_without_lowercase_step() {
        let c = cleaner(CleanerConfig::none().with_stem_words(true));
        assert_eq!(c.apply("CATS Running"), "cat run");
    }

    #[test]
    fn injected_components_are_used() {
        let config = CleanerConfig::none()
            .with_remove_stop_words(true)
            .with_stem_words(true);
        let c = Cleaner::with_components(
            config,
            Box::new(StopWords::from_words(["foo"])),
            Box::new(IdentityStemmer),
        );
        assert_eq!(c.apply("foo running bar"), "running bar");
    }

    #[test]
    fn unsupported_language_only_matters_when_stop_words_enabled() {
        let config = CleanerConfig::none().with_language("klingon");
        assert!(Cleaner::from_config(config.clone()).is_ok());
        assert!(Cleaner::from_config(config.with_remove_stop_words(true)).is_err());
    }

    #[test]
    fn apply_all_preserves_order_in_both_modes() {
        let c = cleaner(CleanerConfig::default());
        let input = vec!["Hello World!", "The end.", "A B C"];
        let expected = vec!["hello world", "end", "b c"];
        assert_eq!(c.apply_all(&input, true), expected);
        assert_eq!(c.apply_all(&input, false), expected);
    }
}
