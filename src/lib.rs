// Folio: word frequency, theme, and comparison analysis for classic novels
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline, plus the configuration and output layers the CLI uses.

pub mod compare;
pub mod config;
pub mod error;
pub mod frequency;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod preprocess;
pub mod topics;

pub use error::{AnalysisError, Result};
pub use pipeline::{analyze, AnalysisOptions, AnalysisRun, Document};
