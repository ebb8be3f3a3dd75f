// Pipeline orchestration: validate options, run the stages in order, and
// assemble the result bundle.

pub mod analysis;
pub mod options;
pub mod report;

pub use analysis::{analyze, AnalysisRun, AnalyzedDocument, Analyzer, Document};
pub use options::AnalysisOptions;
pub use report::{
    AnalysisReport, BookSummary, DocumentTopics, DominantTopic, SimilarityMatrix, Summary,
};
