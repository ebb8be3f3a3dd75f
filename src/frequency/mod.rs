// Frequency analysis: term counting, ranking, and per-document statistics.

pub mod stats;
pub mod table;

pub use stats::{DocumentStatistics, HistogramBin, Readability, WordScore};
pub use table::{build_frequency_table, top_n, TermFrequencyTable, WordCount};
