// src/tokenizer/vectorizer.rs

use rayon::prelude::*;

use crate::tokenizer::vocabulary::TokenId;

/// Fixes encoded sentences to exactly `max_tokens` ids: longer ones keep
/// their prefix, shorter ones are right-padded with `padding_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vectorizer {
    max_tokens: usize,
    padding_token: TokenId,
}

impl Vectorizer {
    pub fn new(max_tokens: usize, padding_token: TokenId) -> Self {
        Self {
            max_tokens,
            padding_token,
        }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn padding_token(&self) -> TokenId {
        self.padding_token
    }

    pub fn vectorize(&self, tokens: &[TokenId]) -> Vec<TokenId> {
        let mut vector = Vec::with_capacity(self.max_tokens);
        vector.extend_from_slice(&tokens[..tokens.len().min(self.max_tokens)]);
        vector.resize(self.max_tokens, self.padding_token);
        vector
    }

    pub fn vectorize_batch(&self, batch: &[Vec<TokenId>]) -> Vec<Vec<TokenId>> {
        batch.par_iter().map(|tokens| self.vectorize(tokens)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_input() {
        let v = Vectorizer::new(5, 1);
        assert_eq!(v.vectorize(&[5, 9, 2]), vec![5, 9, 2, 1, 1]);
    }

    #[test]
    fn truncates_long_input_without_padding() {
        let v = Vectorizer::new(4, 1);
        assert_eq!(v.vectorize(&[5, 9, 2, 8, 7, 6]), vec![5, 9, 2, 8]);
    }

    #[test]
    fn exact_length_is_unchanged() {
        let v = Vectorizer::new(3, 0);
        assert_eq!(v.vectorize(&[4, 5, 6]), vec![4, 5, 6]);
    }

    #[test]
    fn empty_input_becomes_all_padding() {
        let v = Vectorizer::new(3, 7);
        assert_eq!(v.vectorize(&[]), vec![7, 7, 7]);
    }

    #[test]
    fn batch_keeps_order() {
        let v = Vectorizer::new(2, 0);
        let out = v.vectorize_batch(&[vec![1], vec![2, 3, 4], vec![]]);
        assert_eq!(out, vec![vec![1, 0], vec![2, 3], vec![0, 0]]);
    }
}
