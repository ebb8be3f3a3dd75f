// Term-frequency tables.
//
// A table remembers the order in which terms first appeared. Ranking sorts by
// count with a stable sort, so equal counts keep first-occurrence order and
// results never depend on hash iteration order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::preprocess::TokenSequence;

/// A term and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Mapping from term to count, iterated in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<WordCount>", into = "Vec<WordCount>")]
pub struct TermFrequencyTable {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
    total: u64,
}

impl TermFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one token sequence.
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut table = Self::new();
        for token in tokens {
            table.add(token, 1);
        }
        table
    }

    /// Add `count` occurrences of `term`, registering it on first sight.
    pub fn add(&mut self, term: &str, count: u64) {
        match self.index.get(term) {
            Some(&i) => self.entries[i].count += count,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push(WordCount {
                    word: term.to_string(),
                    count,
                });
            }
        }
        self.total += count;
    }

    /// Fold another table in; its new terms are appended in its own order.
    pub fn merge(&mut self, other: &Self) {
        for entry in &other.entries {
            self.add(&entry.word, entry.count);
        }
    }

    /// Count of `term`, zero when absent.
    pub fn count(&self, term: &str) -> u64 {
        self.index
            .get(term)
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Sum of all counts, equal to the length of the counted token stream(s).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    /// The `n` most frequent terms; ties keep first-occurrence order.
    pub fn top_n(&self, n: usize) -> Vec<WordCount> {
        let mut ranked: Vec<&WordCount> = self.entries.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.into_iter().take(n).cloned().collect()
    }
}

impl From<Vec<WordCount>> for TermFrequencyTable {
    fn from(entries: Vec<WordCount>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.add(&entry.word, entry.count);
        }
        table
    }
}

impl From<TermFrequencyTable> for Vec<WordCount> {
    fn from(table: TermFrequencyTable) -> Self {
        table.entries
    }
}

/// Count one or many token sequences into a single table, summing per term.
pub fn build_frequency_table(sequences: &[TokenSequence]) -> TermFrequencyTable {
    let mut table = TermFrequencyTable::new();
    for sequence in sequences {
        for token in sequence {
            table.add(token, 1);
        }
    }
    table
}

/// Free-function form of [`TermFrequencyTable::top_n`].
pub fn top_n(table: &TermFrequencyTable, n: usize) -> Vec<WordCount> {
    table.top_n(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> TokenSequence {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn counts_single_document() {
        let table = build_frequency_table(&[tokens("the cat sat on the mat")]);
        assert_eq!(table.count("the"), 2);
        assert_eq!(table.count("cat"), 1);
        assert_eq!(table.count("dog"), 0);
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn corpus_table_sums_across_documents() {
        let table = build_frequency_table(&[
            tokens("the cat sat on the mat"),
            tokens("the dog sat on the log"),
        ]);
        assert_eq!(table.count("the"), 4);
        assert_eq!(table.count("sat"), 2);
        assert_eq!(table.count("dog"), 1);
        assert_eq!(table.total(), 12);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let table = TermFrequencyTable::from_tokens(&tokens("b a c a b c d"));
        let words: Vec<String> = table.top_n(10).into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn top_n_truncates() {
        let table = TermFrequencyTable::from_tokens(&tokens("x y y z z z"));
        let top = table.top_n(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].word, "z");
        assert_eq!(top[1].word, "y");
        assert!(table.top_n(0).is_empty());
    }

    #[test]
    fn merge_appends_new_terms_in_order() {
        let mut a = TermFrequencyTable::from_tokens(&tokens("one two"));
        let b = TermFrequencyTable::from_tokens(&tokens("three two"));
        a.merge(&b);
        let words: Vec<&str> = a.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["one", "two", "three"]);
        assert_eq!(a.count("two"), 2);
        assert_eq!(a.total(), 4);
    }

    #[test]
    fn serializes_as_ordered_list() {
        let table = TermFrequencyTable::from_tokens(&tokens("b a b"));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"word":"b","count":2},{"word":"a","count":1}]"#);
        let back: TermFrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
