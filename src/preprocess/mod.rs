// Text preprocessing: cleanup, tokenization, stopwords, and lemmatization,
// composed by the normalizer into a single ordered pipeline.

pub mod cleaner;
pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::{normalize, NormalizationConfig, Normalizer, TokenSequence};
