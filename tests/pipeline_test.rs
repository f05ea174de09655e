//! End-to-end pipeline tests: clean -> encode -> vectorize.

use lm_text_prep::dataset::{read_jsonl, write_vectors};
use lm_text_prep::tokenizer::{PAD_TOKEN, START_TOKEN, STOP_TOKEN, UNK_TOKEN};
use lm_text_prep::{
    Cleaner, CleanerConfig, Error, LanguageModelingDataset, MarkerPlacement, PreprocessConfig,
    Tokenizer, Vectorizer,
};

fn corpus() -> Vec<String> {
    vec!["Hi there".to_string(), "Hi world".to_string()]
}

#[test]
fn scenario_hi_there_hi_world() {
    let cleaner = Cleaner::from_config(CleanerConfig::none().with_lowercase(true)).unwrap();
    let cleaned = cleaner.apply_all(&corpus(), false);
    let tokenizer = Tokenizer::from_corpus(cleaned, 100, MarkerPlacement::Trailing).unwrap();

    let expected = ["hi", "there", "world", START_TOKEN, PAD_TOKEN, STOP_TOKEN, UNK_TOKEN];
    assert_eq!(tokenizer.vocab_size(), expected.len());
    for (id, word) in expected.iter().enumerate() {
        assert_eq!(tokenizer.token_to_id(word), Some(id as u32), "{word}");
    }

    let id = |w: &str| tokenizer.token_to_id(w).unwrap();
    assert_eq!(
        tokenizer.encode("hi there").unwrap(),
        vec![id(START_TOKEN), id("hi"), id("there"), id(STOP_TOKEN)]
    );
}

#[test]
fn unseen_word_is_not_an_error() {
    let tokenizer = Tokenizer::from_corpus(
        vec!["hi there".into(), "hi world".into()],
        100,
        MarkerPlacement::Trailing,
    )
    .unwrap();
    let ids = tokenizer.encode("goodbye world").unwrap();
    assert_eq!(ids[1], tokenizer.token_to_id(UNK_TOKEN).unwrap());
    assert_eq!(ids[2], tokenizer.token_to_id("world").unwrap());
}

#[test]
fn vectorize_scenarios() {
    assert_eq!(Vectorizer::new(5, 1).vectorize(&[5, 9, 2]), vec![5, 9, 2, 1, 1]);
    assert_eq!(
        Vectorizer::new(4, 1).vectorize(&[5, 9, 2, 8, 7, 6]),
        vec![5, 9, 2, 8]
    );
}

#[test]
fn decode_rejects_out_of_range_ids() {
    let tokenizer =
        Tokenizer::from_corpus(vec!["hi".into()], 100, MarkerPlacement::Trailing).unwrap();
    let size = tokenizer.vocab_size() as u32;
    match tokenizer.decode(&[0, size]) {
        Err(Error::UnknownId(id)) => assert_eq!(id, size),
        other => panic!("expected UnknownId, got {other:?}"),
    }
}

#[test]
fn saturated_corpus_still_pads() {
    let words: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
    let config = PreprocessConfig::default()
        .with_vocab_size(10)
        .with_max_tokens(8)
        .with_cleaner(CleanerConfig::none());
    let ds = LanguageModelingDataset::new(vec![words.join(" ")], &config).unwrap();

    assert_eq!(ds.vocabulary().len(), 10);
    let vector = ds.get(0).unwrap();
    assert_eq!(vector.len(), 8);
    let unk = ds.vocabulary().unk_id();
    // First six corpus words fit; the rest fall back to <unk>.
    assert_eq!(vector[0], ds.vocabulary().start_id());
    assert_eq!(&vector[1..7], &[0, 1, 2, 3, 4, 5]);
    assert_eq!(vector[7], unk);
}

#[test]
fn short_samples_are_padded_with_padding_id() {
    let config = PreprocessConfig::default()
        .with_max_tokens(10)
        .with_marker_placement(MarkerPlacement::Leading)
        .with_parallel(false);
    let ds = LanguageModelingDataset::new(
        vec!["The quick brown fox!".into(), "A lazy dog.".into()],
        &config,
    )
    .unwrap();

    let pad = ds.vocabulary().padding_id();
    assert_eq!(pad, 1);
    let v = ds.get(1).unwrap();
    let decoded = ds.tokenizer().decode(&v).unwrap();
    assert_eq!(
        decoded,
        ["<start>", "lazy", "dog", "<stop>", "<pad>", "<pad>", "<pad>", "<pad>", "<pad>", "<pad>"]
    );
}

#[test]
fn jsonl_in_vectors_out() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("corpus.jsonl");
    std::fs::write(
        &input,
        "{\"text\": \"Stemming helps: running runners run.\"}\n{\"text\": \"Nothing here\"}\n",
    )
    .unwrap();

    let config = PreprocessConfig::default()
        .with_max_tokens(5)
        .with_cleaner(CleanerConfig::default().with_stem_words(true));
    let ds = LanguageModelingDataset::from_entries(read_jsonl(&input).unwrap(), &config).unwrap();

    let stemmed = ds.cleaner().apply("Stemming helps: running runners run.");
    assert_eq!(stemmed, "stem help run runner run");

    let mut out = Vec::new();
    assert_eq!(write_vectors(&mut out, ds.vectorize_all()).unwrap(), 2);
    let lines: Vec<Vec<u32>> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(lines.iter().all(|v| v.len() == 5));
    assert_eq!(ds.tokenizer().decode(&lines[0]).unwrap()[1], "stem");
}
