// One analysis run: normalize every document, build the frequency tables,
// optionally infer topics, and keep the results around for comparisons.
//
// Per-document work runs on the rayon pool with no shared mutable state. The
// corpus table and topic inference wait for every document to finish.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::compare::{self, ComparisonResult, RankCorrelation, SimilarityMethod};
use crate::error::{AnalysisError, Field, Result, Stage, ValidationError};
use crate::frequency::stats::{self, frequency_histogram, wordcloud_weights};
use crate::frequency::{DocumentStatistics, Readability, TermFrequencyTable, WordCount};
use crate::preprocess::cleaner::clean_text;
use crate::preprocess::stopwords::Stopwords;
use crate::preprocess::{Normalizer, TokenSequence};
use crate::topics::lda::{DEFAULT_ITERATIONS, DEFAULT_WORDS_PER_TOPIC};
use crate::topics::{GibbsLda, TopicAnalysis, TopicConfig, TopicInference};

use super::options::AnalysisOptions;
use super::report::{
    AnalysisReport, BookSummary, DocumentTopics, DominantTopic, SimilarityMatrix, Summary,
    DISTINCTIVE_WORDS, DOMINANT_TOPIC_WORDS, WORDCLOUD_MAX_WORDS,
};

/// A raw input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Everything computed for a single document.
#[derive(Debug, Clone)]
pub struct AnalyzedDocument {
    pub id: String,
    pub title: String,
    pub tokens: TokenSequence,
    pub table: TermFrequencyTable,
    pub statistics: DocumentStatistics,
    pub readability: Readability,
}

/// Runs analyses with a fixed stopword set and topic sampler settings.
#[derive(Debug, Clone)]
pub struct Analyzer {
    stopwords: Stopwords,
    iterations: usize,
    words_per_topic: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            stopwords: Stopwords::english(),
            iterations: DEFAULT_ITERATIONS,
            words_per_topic: DEFAULT_WORDS_PER_TOPIC,
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Gibbs sweeps per topic inference.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_words_per_topic(mut self, words_per_topic: usize) -> Self {
        self.words_per_topic = words_per_topic;
        self
    }

    /// Validate `options`, then run every enabled stage over `documents`.
    ///
    /// Nothing is computed when validation fails.
    pub fn analyze(&self, documents: &[Document], options: &AnalysisOptions) -> Result<AnalysisRun> {
        options.validate(documents)?;
        let start = Instant::now();

        let normalizer = Normalizer::with_stopwords(options.normalization(), self.stopwords.clone());
        info!(
            documents = documents.len(),
            stages = ?normalizer.stages(),
            "Normalizing documents"
        );

        let analyzed: Vec<AnalyzedDocument> = documents
            .par_iter()
            .map(|doc| analyze_document(&normalizer, doc))
            .collect();

        for doc in analyzed.iter().filter(|d| d.tokens.is_empty()) {
            warn!(document = %doc.id, "Document has no tokens after normalization");
        }

        let mut corpus = TermFrequencyTable::new();
        for doc in &analyzed {
            corpus.merge(&doc.table);
        }
        if corpus.total() == 0 {
            return Err(AnalysisError::InsufficientData {
                stage: Stage::Frequency,
                document: match analyzed.as_slice() {
                    [only] => Some(only.id.clone()),
                    _ => None,
                },
                reason: "no tokens remain after normalization".to_string(),
            });
        }
        let top_words = corpus.top_n(options.top_words_count());
        info!(
            tokens = corpus.total(),
            vocabulary = corpus.len(),
            "Corpus frequency table built"
        );

        let topics = if options.analyze_themes {
            let config = TopicConfig {
                words_per_topic: self.words_per_topic,
                iterations: self.iterations,
                ..TopicConfig::new(options.num_topics_count(), options.seed)
            };
            let sequences: Vec<TokenSequence> =
                analyzed.iter().map(|d| d.tokens.clone()).collect();
            Some(GibbsLda::new(config).infer(&sequences)?)
        } else {
            None
        };

        let summary = build_summary(
            &analyzed,
            &corpus,
            options,
            chrono::Local::now().to_rfc3339(),
        );
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Analysis complete");

        Ok(AnalysisRun {
            options: options.clone(),
            documents: analyzed,
            corpus,
            top_words,
            topics,
            summary,
        })
    }
}

fn analyze_document(normalizer: &Normalizer, doc: &Document) -> AnalyzedDocument {
    let cleaned = clean_text(&doc.text);
    let readability = Readability::compute(&cleaned);
    let tokens = normalizer.normalize_cleaned(&cleaned);
    let table = TermFrequencyTable::from_tokens(&tokens);
    let statistics = DocumentStatistics::compute(&tokens, &table);
    debug!(document = %doc.id, tokens = tokens.len(), unique = table.len(), "Document normalized");

    AnalyzedDocument {
        id: doc.id.clone(),
        title: doc.title.clone(),
        tokens,
        table,
        statistics,
        readability,
    }
}

/// Per-book summary with TF-IDF distinctive words, built once per run.
fn build_summary(
    documents: &[AnalyzedDocument],
    corpus: &TermFrequencyTable,
    options: &AnalysisOptions,
    analysis_time: String,
) -> Summary {
    let distinctive: Vec<Vec<_>> = if documents.len() >= 2 {
        let tables: Vec<&TermFrequencyTable> = documents.iter().map(|d| &d.table).collect();
        stats::tfidf(&tables)
            .iter()
            .map(|scores| stats::top_scores(scores, DISTINCTIVE_WORDS))
            .collect()
    } else {
        vec![Vec::new(); documents.len()]
    };

    let books = documents
        .iter()
        .zip(distinctive)
        .map(|(doc, distinctive_words)| BookSummary {
            id: doc.id.clone(),
            title: doc.title.clone(),
            total_words: doc.table.total(),
            unique_words: doc.table.len(),
            statistics: doc.statistics.clone(),
            readability: doc.readability,
            distinctive_words,
        })
        .collect();

    Summary {
        books,
        total_unique_words: corpus.len(),
        total_words: corpus.total(),
        analysis_time,
        options: options.clone(),
    }
}

/// Analyze with the default English stopwords and sampler settings.
pub fn analyze(documents: &[Document], options: &AnalysisOptions) -> Result<AnalysisRun> {
    Analyzer::default().analyze(documents, options)
}

/// The retained state of a finished run. Serves the comparison entry points.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    options: AnalysisOptions,
    documents: Vec<AnalyzedDocument>,
    corpus: TermFrequencyTable,
    top_words: Vec<WordCount>,
    topics: Option<TopicAnalysis>,
    summary: Summary,
}

impl AnalysisRun {
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Documents in input order.
    pub fn documents(&self) -> &[AnalyzedDocument] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Result<&AnalyzedDocument> {
        self.position(id).map(|i| &self.documents[i])
    }

    /// Term counts summed over every document.
    pub fn corpus(&self) -> &TermFrequencyTable {
        &self.corpus
    }

    pub fn top_words(&self) -> &[WordCount] {
        &self.top_words
    }

    /// `None` unless theme analysis was requested.
    pub fn topics(&self) -> Option<&TopicAnalysis> {
        self.topics.as_ref()
    }

    pub fn analysis_time(&self) -> &str {
        &self.summary.analysis_time
    }

    /// Ranked normalized frequency differences between two documents of this run.
    pub fn compare(&self, first: &str, second: &str) -> Result<ComparisonResult> {
        let a = self.document(first)?;
        let b = self.document(second)?;
        info!(first, second, "Comparing documents");
        Ok(compare::compare(&a.table, &b.table))
    }

    pub fn similarity_matrix(&self, method: SimilarityMethod) -> SimilarityMatrix {
        SimilarityMatrix {
            method,
            documents: self.documents.iter().map(|d| d.id.clone()).collect(),
            values: compare::similarity_matrix(&self.tables(), method),
        }
    }

    /// Words that occur in `id` and in no other document of the run.
    pub fn unique_words(&self, id: &str) -> Result<Vec<WordCount>> {
        let target = self.position(id)?;
        Ok(compare::unique_words(&self.tables(), target))
    }

    pub fn rank_correlation(&self, first: &str, second: &str) -> Result<RankCorrelation> {
        let a = self.document(first)?;
        let b = self.document(second)?;
        Ok(compare::rank_correlation(&a.table, &b.table))
    }

    /// The summary assembled when the run finished.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// The full serializable bundle for the presentation layer.
    pub fn report(&self) -> AnalysisReport {
        let (topics, document_topics, dominant_topics) = match &self.topics {
            Some(analysis) => (
                Some(analysis.model.topics.clone()),
                Some(self.document_topics(analysis)),
                Some(self.dominant_topics(analysis)),
            ),
            None => (None, None, None),
        };

        AnalysisReport {
            summary: self.summary.clone(),
            top_words: self.top_words.clone(),
            topics,
            document_topics,
            dominant_topics,
            histogram: self
                .options
                .generate_charts
                .then(|| frequency_histogram(&self.corpus)),
            wordcloud: self
                .options
                .generate_wordcloud
                .then(|| wordcloud_weights(&self.corpus, WORDCLOUD_MAX_WORDS)),
        }
    }

    fn document_topics(&self, analysis: &TopicAnalysis) -> Vec<DocumentTopics> {
        self.documents
            .iter()
            .zip(&analysis.distributions)
            .map(|(doc, dist)| DocumentTopics {
                document: doc.id.clone(),
                topics: dist.weights.clone(),
            })
            .collect()
    }

    fn dominant_topics(&self, analysis: &TopicAnalysis) -> Vec<DominantTopic> {
        self.documents
            .iter()
            .zip(&analysis.distributions)
            .filter_map(|(doc, dist)| {
                let best = dist.dominant()?;
                let topic_words = analysis
                    .model
                    .topics
                    .get(best.topic)
                    .map(|t| t.top_words(DOMINANT_TOPIC_WORDS).join(", "))
                    .unwrap_or_default();
                Some(DominantTopic {
                    document: doc.id.clone(),
                    topic: best.topic,
                    probability: best.weight,
                    topic_words,
                })
            })
            .collect()
    }

    fn tables(&self) -> Vec<&TermFrequencyTable> {
        self.documents.iter().map(|d| &d.table).collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.documents.iter().position(|d| d.id == id).ok_or_else(|| {
            ValidationError::single(Field::Document, format!("unknown document id '{id}'")).into()
        })
    }
}
