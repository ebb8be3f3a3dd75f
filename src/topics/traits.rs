// Topic inference trait.
//
// The pipeline only needs "token sequences in, topics and per-document mixtures
// out". Gibbs-sampled LDA is the implementation today; a variational or NMF
// solver can slot in behind the same signature.

use crate::error::Result;
use crate::preprocess::TokenSequence;

use super::model::TopicAnalysis;

pub trait TopicInference {
    /// Infer topics over `sequences`, one sequence per document.
    fn infer(&self, sequences: &[TokenSequence]) -> Result<TopicAnalysis>;
}
