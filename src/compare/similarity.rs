// Whole-document similarity measures across a corpus.
//
// Cosine similarity over raw count vectors, Jaccard over vocabularies, the
// words only one document uses, and Spearman correlation of the counts of the
// words two documents share.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::frequency::{TermFrequencyTable, WordCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMethod {
    #[default]
    Cosine,
    Jaccard,
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cosine => write!(f, "cosine"),
            Self::Jaccard => write!(f, "jaccard"),
        }
    }
}

/// Square matrix of pairwise similarities, rows and columns in input order.
pub fn similarity_matrix(tables: &[&TermFrequencyTable], method: SimilarityMethod) -> Vec<Vec<f64>> {
    let n = tables.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i..n {
            let score = match method {
                SimilarityMethod::Cosine => cosine(tables[i], tables[j]),
                SimilarityMethod::Jaccard if i == j => 1.0,
                SimilarityMethod::Jaccard => jaccard(tables[i], tables[j]),
            };
            matrix[i][j] = score;
            matrix[j][i] = score;
        }
    }

    matrix
}

/// Cosine of the two count vectors; 0.0 if either document is empty.
pub fn cosine(a: &TermFrequencyTable, b: &TermFrequencyTable) -> f64 {
    let dot: f64 = a
        .iter()
        .map(|w| w.count as f64 * b.count(&w.word) as f64)
        .sum();
    let norm = |t: &TermFrequencyTable| t.iter().map(|w| (w.count as f64).powi(2)).sum::<f64>().sqrt();
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Shared vocabulary over combined vocabulary.
pub fn jaccard(a: &TermFrequencyTable, b: &TermFrequencyTable) -> f64 {
    let union = a.len() + b.iter().filter(|w| !a.contains(&w.word)).count();
    if union == 0 {
        return 0.0;
    }
    let shared = a.iter().filter(|w| b.contains(&w.word)).count();
    shared as f64 / union as f64
}

/// Words of `tables[target]` that no other table contains, with their counts.
pub fn unique_words(tables: &[&TermFrequencyTable], target: usize) -> Vec<WordCount> {
    let others: HashSet<&str> = tables
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target)
        .flat_map(|(_, t)| t.iter().map(|w| w.word.as_str()))
        .collect();

    tables[target]
        .iter()
        .filter(|w| !others.contains(w.word.as_str()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankCorrelation {
    /// Spearman's rho in [-1, 1]; 0.0 when undefined.
    pub correlation: f64,
    /// Two-sided p-value from the t approximation with n - 2 degrees of
    /// freedom. `None` with fewer than three common words or when rho is undefined.
    pub p_value: Option<f64>,
    pub common_words: usize,
}

/// Spearman rank correlation of counts over the words both tables contain.
///
/// Fewer than two common words, or a side where every count is equal, gives
/// a correlation of 0.0 and no p-value.
pub fn rank_correlation(a: &TermFrequencyTable, b: &TermFrequencyTable) -> RankCorrelation {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .filter(|w| b.contains(&w.word))
        .map(|w| (w.count as f64, b.count(&w.word) as f64))
        .unzip();

    let common_words = xs.len();
    let rho = if common_words < 2 {
        None
    } else {
        pearson(&average_ranks(&xs), &average_ranks(&ys))
    };

    match rho {
        Some(correlation) => RankCorrelation {
            correlation,
            p_value: t_test_p_value(correlation, common_words),
            common_words,
        },
        None => RankCorrelation {
            correlation: 0.0,
            p_value: None,
            common_words,
        },
    }
}

/// t = r * sqrt((n - 2) / (1 - r^2)), two-sided against Student's t.
fn t_test_p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Some(0.0);
    }
    let t = r * (df / denom).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    p.is_finite().then(|| p.clamp(0.0, 1.0))
}

/// 1-based ranks; tied values share the mean of the ranks they span.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}

/// `None` when either side has zero variance.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }

    let denom = (var_x * var_y).sqrt();
    (denom > 0.0).then(|| cov / denom)
}
