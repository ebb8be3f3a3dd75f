// Shared vocabulary across the documents of one topic-inference run.
//
// Indices are assigned in order of first appearance, walking the documents in
// input order. Topic-word weights are indexed by this ordering, so identical
// inputs must always produce identical indices.

use std::collections::HashMap;

use crate::preprocess::TokenSequence;

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn build(sequences: &[TokenSequence]) -> Self {
        let mut vocab = Self::default();
        for sequence in sequences {
            for token in sequence {
                if !vocab.index.contains_key(token) {
                    vocab.index.insert(token.clone(), vocab.terms.len());
                    vocab.terms.push(token.clone());
                }
            }
        }
        vocab
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn id(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, id: usize) -> &str {
        &self.terms[id]
    }

    /// Map a token sequence to word ids. Tokens outside the vocabulary are dropped.
    pub fn encode(&self, sequence: &[String]) -> Vec<usize> {
        sequence.iter().filter_map(|t| self.id(t)).collect()
    }
}
