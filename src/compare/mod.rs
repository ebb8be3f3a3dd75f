// Document comparison: ranked frequency differences between two documents
// and corpus-wide similarity measures.

pub mod difference;
pub mod similarity;

pub use difference::{compare, ComparisonResult, ComparisonRow};
pub use similarity::{rank_correlation, similarity_matrix, unique_words, RankCorrelation, SimilarityMethod};
