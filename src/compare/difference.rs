// Length-normalized frequency differences between two documents.
//
// Raw count deltas favour the longer book, so every count is first divided by
// its own document's token total. The signed difference then says which
// document leans on a term more, independent of length.

use serde::{Deserialize, Serialize};

use crate::frequency::TermFrequencyTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub term: String,
    pub count_in_doc1: u64,
    pub count_in_doc2: u64,
    /// count / total tokens in document 1
    pub freq_in_doc1: f64,
    /// count / total tokens in document 2
    pub freq_in_doc2: f64,
    /// freq_in_doc1 - freq_in_doc2; positive means document 1 favours the term
    pub difference: f64,
}

/// Every term of either document, ranked by |difference| descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonResult {
    /// The first `n` rows; the engine itself never truncates.
    pub fn top(&self, n: usize) -> &[ComparisonRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, term: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.term == term)
    }
}

/// Compare two frequency tables over the union of their terms.
///
/// A term missing from one table counts as 0 there. Ties in |difference| keep
/// first-occurrence order: table1's terms, then terms only table2 has.
pub fn compare(table1: &TermFrequencyTable, table2: &TermFrequencyTable) -> ComparisonResult {
    let total1 = table1.total();
    let total2 = table2.total();

    let terms = table1
        .iter()
        .map(|w| w.word.as_str())
        .chain(table2.iter().map(|w| w.word.as_str()).filter(|t| !table1.contains(t)));

    let mut rows: Vec<ComparisonRow> = terms
        .map(|term| {
            let count1 = table1.count(term);
            let count2 = table2.count(term);
            let freq1 = normalized(count1, total1);
            let freq2 = normalized(count2, total2);
            ComparisonRow {
                term: term.to_string(),
                count_in_doc1: count1,
                count_in_doc2: count2,
                freq_in_doc1: freq1,
                freq_in_doc2: freq2,
                difference: freq1 - freq2,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.difference.abs().total_cmp(&a.difference.abs()));

    ComparisonResult { rows }
}

fn normalized(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
