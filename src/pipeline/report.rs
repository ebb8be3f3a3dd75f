// The serializable result bundle handed to the presentation layer.
//
// Everything here is plain data: no rendering, no file paths. Optional
// sections are omitted from JSON when the corresponding option was off.

use serde::{Deserialize, Serialize};

use crate::compare::SimilarityMethod;
use crate::frequency::{DocumentStatistics, HistogramBin, Readability, WordCount, WordScore};
use crate::topics::{Topic, TopicWeight};

use super::options::AnalysisOptions;

/// Number of topic words shown next to a document's dominant topic.
pub const DOMINANT_TOPIC_WORDS: usize = 5;
/// Number of TF-IDF terms listed per book in the summary.
pub const DISTINCTIVE_WORDS: usize = 10;
/// Maximum number of terms in the word-cloud weights.
pub const WORDCLOUD_MAX_WORDS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub total_words: u64,
    pub unique_words: usize,
    pub statistics: DocumentStatistics,
    pub readability: Readability,
    /// Highest TF-IDF terms; empty for a single-document corpus.
    pub distinctive_words: Vec<WordScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub books: Vec<BookSummary>,
    pub total_unique_words: usize,
    pub total_words: u64,
    /// RFC 3339, captured once when the run was assembled.
    pub analysis_time: String,
    pub options: AnalysisOptions,
}

/// One document's full topic mixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopics {
    pub document: String,
    pub topics: Vec<TopicWeight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantTopic {
    pub document: String,
    pub topic: usize,
    pub probability: f64,
    /// Top words of the topic joined with ", "
    pub topic_words: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub top_words: Vec<WordCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_topics: Option<Vec<DocumentTopics>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_topics: Option<Vec<DominantTopic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Vec<HistogramBin>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordcloud: Option<Vec<WordScore>>,
}

/// Pairwise document similarity; rows and columns follow `documents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    pub method: SimilarityMethod,
    pub documents: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Similarity between two documents by id.
    pub fn get(&self, first: &str, second: &str) -> Option<f64> {
        let i = self.documents.iter().position(|d| d == first)?;
        let j = self.documents.iter().position(|d| d == second)?;
        Some(self.values[i][j])
    }
}
