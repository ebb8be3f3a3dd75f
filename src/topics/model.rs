// Topic model results: the latent topics and each document's mixture over them.
//
// A topic is a ranked list of terms with their weight in the topic-word
// distribution. A document's distribution holds one weight per topic and
// always sums to 1.0.

use serde::{Deserialize, Serialize};

/// A term's weight within a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTerm {
    pub term: String,
    pub weight: f64,
}

/// One latent topic, terms sorted by weight descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    /// Top three terms joined with " / "
    pub label: String,
    pub terms: Vec<TopicTerm>,
}

impl Topic {
    pub fn new(id: usize, terms: Vec<TopicTerm>) -> Self {
        let label = terms
            .iter()
            .take(3)
            .map(|t| t.term.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        Self { id, label, terms }
    }

    /// The first `n` term strings.
    pub fn top_words(&self, n: usize) -> Vec<&str> {
        self.terms.iter().take(n).map(|t| t.term.as_str()).collect()
    }
}

/// The inferred topics plus the parameters that reproduce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicModel {
    pub topics: Vec<Topic>,
    pub vocabulary_size: usize,
    pub iterations: usize,
    pub seed: u64,
}

/// A single (topic, weight) pair of a document mixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopicWeight {
    pub topic: usize,
    pub weight: f64,
}

/// One document's weights over every topic, in topic order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopicDistribution {
    pub weights: Vec<TopicWeight>,
}

impl DocumentTopicDistribution {
    pub fn sum(&self) -> f64 {
        self.weights.iter().map(|w| w.weight).sum()
    }

    /// Highest-weight topic; the lowest index wins a tie.
    pub fn dominant(&self) -> Option<TopicWeight> {
        self.weights.iter().copied().fold(None, |best, w| match best {
            Some(b) if b.weight >= w.weight => Some(b),
            _ => Some(w),
        })
    }
}

/// Output of one topic-inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicAnalysis {
    pub model: TopicModel,
    /// One entry per input document, in input order.
    pub distributions: Vec<DocumentTopicDistribution>,
}
