// Analysis options and boundary validation.
//
// Options arrive from the presentation layer as plain values (form fields,
// CLI flags, JSON). Counts are kept signed here so that a negative value from
// the caller becomes a validation error naming the field rather than a parse
// failure somewhere upstream.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Field, Result, ValidationError};
use crate::preprocess::NormalizationConfig;
use crate::topics::lda::{DEFAULT_SEED, MAX_NUM_TOPICS};

use super::Document;

/// The single configuration object threaded through one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub remove_stopwords: bool,
    pub lemmatize: bool,
    #[serde(default)]
    pub stem: bool,
    pub top_words: i64,
    pub generate_wordcloud: bool,
    pub generate_charts: bool,
    pub analyze_themes: bool,
    pub num_topics: i64,
    /// Seed for topic inference; identical seeds reproduce identical topics.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            lemmatize: true,
            stem: false,
            top_words: 50,
            generate_wordcloud: false,
            generate_charts: false,
            analyze_themes: false,
            num_topics: 5,
            seed: DEFAULT_SEED,
        }
    }
}

impl AnalysisOptions {
    pub fn normalization(&self) -> NormalizationConfig {
        NormalizationConfig {
            remove_stopwords: self.remove_stopwords,
            lemmatize: self.lemmatize,
            stem: self.stem,
        }
    }

    /// Check the options against the documents they will run on.
    ///
    /// Every violation is collected before returning, so the caller can
    /// report all bad fields at once.
    pub fn validate(&self, documents: &[Document]) -> Result<()> {
        let mut errors = ValidationError::default();

        if documents.is_empty() {
            errors.push(Field::Documents, "at least one document is required");
        }
        let mut seen = HashSet::new();
        for doc in documents {
            if doc.id.trim().is_empty() {
                errors.push(Field::Documents, "document ids must not be empty");
            } else if !seen.insert(doc.id.as_str()) {
                errors.push(Field::Documents, format!("duplicate document id '{}'", doc.id));
            }
        }

        if self.top_words <= 0 {
            errors.push(
                Field::TopWords,
                format!("must be a positive integer, got {}", self.top_words),
            );
        }
        if self.num_topics <= 0 {
            errors.push(
                Field::NumTopics,
                format!("must be a positive integer, got {}", self.num_topics),
            );
        } else if self.num_topics > MAX_NUM_TOPICS as i64 {
            errors.push(
                Field::NumTopics,
                format!("must be at most {MAX_NUM_TOPICS}, got {}", self.num_topics),
            );
        }
        if self.analyze_themes && documents.len() < 2 {
            errors.push(
                Field::AnalyzeThemes,
                format!(
                    "not enough documents: theme analysis needs at least 2, got {}",
                    documents.len()
                ),
            );
        }

        errors.into_result()
    }

    /// `top_words` as a count. Only meaningful after `validate`.
    pub fn top_words_count(&self) -> usize {
        usize::try_from(self.top_words).unwrap_or(0)
    }

    /// `num_topics` as a count. Only meaningful after `validate`.
    pub fn num_topics_count(&self) -> usize {
        usize::try_from(self.num_topics).unwrap_or(0)
    }
}
