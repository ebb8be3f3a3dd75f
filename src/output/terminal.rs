// Colored terminal output for analysis reports and comparisons.
//
// This module handles all terminal-specific formatting: colors, tables,
// bar charts. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::compare::{ComparisonResult, RankCorrelation};
use crate::frequency::{HistogramBin, WordCount, WordScore};
use crate::pipeline::{AnalysisReport, DominantTopic, SimilarityMatrix, Summary};
use crate::topics::Topic;

use super::truncate_chars;

const BAR_WIDTH: usize = 20;

/// Display a full analysis report: summary, top words, and any optional sections.
pub fn display_report(report: &AnalysisReport) {
    display_summary(&report.summary);
    display_top_words(&report.top_words);

    if let Some(topics) = &report.topics {
        display_topics(topics);
    }
    if let Some(dominant) = &report.dominant_topics {
        display_dominant_topics(dominant);
    }
    if let Some(histogram) = &report.histogram {
        display_histogram(histogram);
    }
    if let Some(cloud) = &report.wordcloud {
        display_wordcloud(cloud);
    }
}

pub fn display_summary(summary: &Summary) {
    println!(
        "\n{}",
        format!("=== Corpus Summary ({} books) ===", summary.books.len()).bold()
    );
    println!();

    println!(
        "  {:<32} {:>9} {:>8} {:>7} {:>8}",
        "Title".dimmed(),
        "Words".dimmed(),
        "Unique".dimmed(),
        "Lexdiv".dimmed(),
        "Flesch".dimmed(),
    );
    println!("  {}", "-".repeat(68).dimmed());

    for book in &summary.books {
        let flesch = book
            .readability
            .flesch_reading_ease
            .map(|f| format!("{f:.1}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<32} {:>9} {:>8} {:>7.3} {:>8}",
            truncate_chars(&book.title, 29),
            book.total_words,
            book.unique_words,
            book.statistics.lexical_diversity,
            flesch,
        );
        if !book.distinctive_words.is_empty() {
            let words: Vec<&str> = book
                .distinctive_words
                .iter()
                .map(|w| w.word.as_str())
                .collect();
            println!("      Distinctive: {}", words.join(", ").dimmed());
        }
    }

    println!();
    println!(
        "  {} words total, {} unique across the corpus",
        summary.total_words.to_string().bold(),
        summary.total_unique_words.to_string().bold()
    );
    println!("  Analyzed at {}", summary.analysis_time.dimmed());
}

pub fn display_top_words(words: &[WordCount]) {
    if words.is_empty() {
        return;
    }
    println!("\n{}", format!("=== Top {} Words ===", words.len()).bold());
    println!();

    let max = words.first().map(|w| w.count).unwrap_or(1).max(1);
    for (i, word) in words.iter().enumerate() {
        println!(
            "  {:>4}. {:<20} {} {}",
            i + 1,
            word.word,
            bar(word.count as f64 / max as f64).bright_blue(),
            word.count
        );
    }
}

/// Display inferred topics as weight bars with their keywords.
pub fn display_topics(topics: &[Topic]) {
    println!("\n{}", format!("=== Themes ({} topics) ===", topics.len()).bold());
    println!();

    for topic in topics {
        let top_weight = topic.terms.first().map(|t| t.weight).unwrap_or(0.0);
        let colored_bar = if top_weight >= 0.05 {
            bar(top_weight.min(1.0)).bright_green()
        } else if top_weight >= 0.02 {
            bar(top_weight.min(1.0)).bright_yellow()
        } else {
            bar(top_weight.min(1.0)).bright_blue()
        };

        println!(
            "  {:>2}. {:<40} {} {:.3}",
            topic.id + 1,
            topic.label.bold(),
            colored_bar,
            top_weight
        );
        println!("      Keywords: {}", topic.top_words(topic.terms.len()).join(", ").dimmed());
        println!();
    }
}

pub fn display_dominant_topics(dominant: &[DominantTopic]) {
    println!("{}", "=== Dominant Theme per Book ===".bold());
    println!();
    for entry in dominant {
        println!(
            "  {:<32} topic {:>2} ({:.2})  {}",
            truncate_chars(&entry.document, 29),
            entry.topic + 1,
            entry.probability,
            entry.topic_words.dimmed()
        );
    }
}

pub fn display_histogram(histogram: &[HistogramBin]) {
    println!("\n{}", "=== Frequency Distribution ===".bold());
    println!();
    let max = histogram.iter().map(|b| b.terms).max().unwrap_or(1).max(1);
    for bin in histogram.iter().take(15) {
        println!(
            "  {:>6}x  {} {}",
            bin.occurrences,
            bar(bin.terms as f64 / max as f64).cyan(),
            bin.terms
        );
    }
    if histogram.len() > 15 {
        println!("  {}", format!("... {} more bins", histogram.len() - 15).dimmed());
    }
}

pub fn display_wordcloud(cloud: &[WordScore]) {
    println!("\n{}", format!("=== Word Cloud ({} words) ===", cloud.len()).bold());
    println!();
    let line: Vec<String> = cloud
        .iter()
        .take(40)
        .map(|w| {
            if w.score >= 0.5 {
                w.word.bold().to_string()
            } else if w.score >= 0.2 {
                w.word.normal().to_string()
            } else {
                w.word.dimmed().to_string()
            }
        })
        .collect();
    println!("  {}", line.join(" "));
}

/// Display the top `limit` rows of a two-document comparison.
pub fn display_comparison(
    result: &ComparisonResult,
    first: &str,
    second: &str,
    correlation: Option<&RankCorrelation>,
    limit: usize,
) {
    println!(
        "\n{}",
        format!("=== {first} vs {second} ({} terms) ===", result.len()).bold()
    );
    println!();

    if result.is_empty() {
        println!("No terms to compare.");
        return;
    }

    println!(
        "  {:<20} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "Term".dimmed(),
        "Count 1".dimmed(),
        "Count 2".dimmed(),
        "Freq 1".dimmed(),
        "Freq 2".dimmed(),
        "Diff".dimmed(),
    );
    println!("  {}", "-".repeat(72).dimmed());

    for row in result.top(limit) {
        let diff = format!("{:+.5}", row.difference);
        let diff = if row.difference > 0.0 {
            diff.green()
        } else if row.difference < 0.0 {
            diff.red()
        } else {
            diff.normal()
        };
        println!(
            "  {:<20} {:>8} {:>8} {:>10.5} {:>10.5} {:>10}",
            truncate_chars(&row.term, 17),
            row.count_in_doc1,
            row.count_in_doc2,
            row.freq_in_doc1,
            row.freq_in_doc2,
            diff
        );
    }

    if let Some(rc) = correlation {
        println!();
        let p = rc
            .p_value
            .map(|p| format!(", p = {p:.4}"))
            .unwrap_or_default();
        println!(
            "  Rank correlation: {:.3} over {} shared words{p}",
            rc.correlation, rc.common_words
        );
    }
}

pub fn display_similarity(matrix: &SimilarityMatrix) {
    println!(
        "\n{}",
        format!("=== Similarity ({}) ===", matrix.method).bold()
    );
    println!();

    print!("  {:<16}", "");
    for id in &matrix.documents {
        print!(" {:>10}", truncate_chars(id, 7).dimmed());
    }
    println!();

    for (id, row) in matrix.documents.iter().zip(&matrix.values) {
        print!("  {:<16}", truncate_chars(id, 13));
        for value in row {
            let cell = format!("{value:.3}");
            let cell = if *value >= 0.75 {
                cell.bright_green()
            } else if *value >= 0.4 {
                cell.bright_yellow()
            } else {
                cell.normal()
            };
            print!(" {cell:>10}");
        }
        println!();
    }
}

/// A fixed-width bar for a fraction in [0, 1].
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(bar(0.0), format!("[{}]", " ".repeat(BAR_WIDTH)));
        assert_eq!(bar(1.0), format!("[{}]", "=".repeat(BAR_WIDTH)));
        assert_eq!(bar(2.0).len(), BAR_WIDTH + 2);
    }
}
