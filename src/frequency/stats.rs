// Per-document statistics derived from token streams and frequency tables.
//
// Vocabulary measures (diversity, hapax legomena), TF-IDF for surfacing the
// words that set one document apart from the rest of the corpus, and a rough
// Flesch readability estimate computed on cleaned text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::table::{TermFrequencyTable, WordCount};

/// Vocabulary statistics for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    pub total_words: u64,
    pub unique_words: u64,
    /// unique / total, 0.0 for an empty document
    pub lexical_diversity: f64,
    /// Words that occur exactly once.
    pub hapax_legomena: u64,
    pub average_word_length: f64,
}

impl DocumentStatistics {
    pub fn compute(tokens: &[String], table: &TermFrequencyTable) -> Self {
        let total_words = tokens.len() as u64;
        let unique_words = table.len() as u64;

        let (lexical_diversity, average_word_length) = if tokens.is_empty() {
            (0.0, 0.0)
        } else {
            let chars: usize = tokens.iter().map(|t| t.chars().count()).sum();
            (
                unique_words as f64 / total_words as f64,
                chars as f64 / total_words as f64,
            )
        };

        Self {
            total_words,
            unique_words,
            lexical_diversity,
            hapax_legomena: table.iter().filter(|w| w.count == 1).count() as u64,
            average_word_length,
        }
    }
}

/// Terms that occur at most `threshold` times, in first-occurrence order.
pub fn rare_words(table: &TermFrequencyTable, threshold: u64) -> Vec<WordCount> {
    table
        .iter()
        .filter(|w| w.count <= threshold)
        .cloned()
        .collect()
}

/// A term with a real-valued score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: f64,
}

/// TF-IDF per document: `(count / doc_total) * ln(n_docs / doc_freq)`.
///
/// Each inner vector follows its table's first-occurrence order. Terms found
/// in every document score 0.
pub fn tfidf(tables: &[&TermFrequencyTable]) -> Vec<Vec<WordScore>> {
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for table in tables {
        for entry in table.iter() {
            *doc_freq.entry(entry.word.as_str()).or_insert(0) += 1;
        }
    }

    let n_docs = tables.len() as f64;
    tables
        .iter()
        .map(|table| {
            let total = table.total() as f64;
            table
                .iter()
                .map(|entry| {
                    let df = doc_freq[entry.word.as_str()] as f64;
                    let tf = if total > 0.0 {
                        entry.count as f64 / total
                    } else {
                        0.0
                    };
                    WordScore {
                        word: entry.word.clone(),
                        score: tf * (n_docs / df).ln(),
                    }
                })
                .collect()
        })
        .collect()
}

/// The `n` highest-scoring entries; ties keep their input order.
pub fn top_scores(scores: &[WordScore], n: usize) -> Vec<WordScore> {
    let mut ranked: Vec<&WordScore> = scores.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.into_iter().take(n).cloned().collect()
}

/// Flesch readability estimates. Every field is `None` when the text has no
/// sentences or no words.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Readability {
    pub flesch_reading_ease: Option<f64>,
    pub flesch_kincaid_grade: Option<f64>,
    pub average_words_per_sentence: Option<f64>,
}

impl Readability {
    /// Sentences are '.'-separated; words are whitespace-separated.
    pub fn compute(text: &str) -> Self {
        let sentences = text.split('.').filter(|s| !s.trim().is_empty()).count();
        let words: Vec<&str> = text.split_whitespace().collect();
        if sentences == 0 || words.is_empty() {
            return Self::default();
        }

        let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
        let words_per_sentence = words.len() as f64 / sentences as f64;
        let syllables_per_word = syllables as f64 / words.len() as f64;

        Self {
            flesch_reading_ease: Some(
                206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            ),
            flesch_kincaid_grade: Some(
                0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
            ),
            average_words_per_sentence: Some(words_per_sentence),
        }
    }
}

/// Vowel-group syllable estimate; every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word: Vec<char> = word.to_lowercase().chars().collect();
    if word.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| "aeiouy".contains(c);
    let mut count: isize = 0;
    if is_vowel(word[0]) {
        count += 1;
    }
    for i in 1..word.len() {
        if is_vowel(word[i]) && !is_vowel(word[i - 1]) {
            count += 1;
        }
    }
    let n = word.len();
    if word[n - 1] == 'e' {
        count -= 1;
    }
    if word[n - 2] == 'l' && word[n - 1] == 'e' && !is_vowel(word[n - 3]) {
        count += 1;
    }

    count.max(1) as usize
}

/// How many distinct terms occur exactly `occurrences` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub occurrences: u64,
    pub terms: u64,
}

/// Count-of-counts for a frequency-distribution chart, ascending by occurrences.
pub fn frequency_histogram(table: &TermFrequencyTable) -> Vec<HistogramBin> {
    let mut bins: HashMap<u64, u64> = HashMap::new();
    for entry in table.iter() {
        *bins.entry(entry.count).or_insert(0) += 1;
    }
    let mut bins: Vec<HistogramBin> = bins
        .into_iter()
        .map(|(occurrences, terms)| HistogramBin { occurrences, terms })
        .collect();
    bins.sort_by_key(|b| b.occurrences);
    bins
}

/// Word-cloud input: the `max_words` most frequent terms scaled so the most
/// frequent has weight 1.0.
pub fn wordcloud_weights(table: &TermFrequencyTable, max_words: usize) -> Vec<WordScore> {
    let top = table.top_n(max_words);
    let Some(max) = top.first().map(|w| w.count as f64) else {
        return Vec::new();
    };
    top.into_iter()
        .map(|w| WordScore {
            score: w.count as f64 / max,
            word: w.word,
        })
        .collect()
}
