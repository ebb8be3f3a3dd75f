// Unit tests for the pipeline orchestrator.
//
// Tests boundary validation of AnalysisOptions, the error taxonomy surfaced
// by analyze(), and the comparison entry points on a finished run.

use folio::compare::SimilarityMethod;
use folio::error::{AnalysisError, Field, Stage};
use folio::pipeline::{analyze, AnalysisOptions, Analyzer, Document};
use folio::preprocess::stopwords::Stopwords;

fn raw_options() -> AnalysisOptions {
    AnalysisOptions {
        remove_stopwords: false,
        lemmatize: false,
        ..Default::default()
    }
}

fn cat_and_dog() -> Vec<Document> {
    vec![
        Document::new("a", "Doc A", "the cat sat on the mat"),
        Document::new("b", "Doc B", "the dog sat on the log"),
    ]
}

fn validation_fields(err: &AnalysisError) -> Vec<Field> {
    err.as_validation()
        .map(|v| v.errors.iter().map(|e| e.field).collect())
        .unwrap_or_default()
}

// ============================================================
// Validation at the boundary
// ============================================================

#[test]
fn themes_with_one_document_is_validation_not_insufficient_data() {
    let options = AnalysisOptions {
        analyze_themes: true,
        ..raw_options()
    };
    let err = analyze(&cat_and_dog()[..1], &options).unwrap_err();
    assert!(matches!(err, AnalysisError::Validation(_)), "{err:?}");
    assert_eq!(validation_fields(&err), vec![Field::AnalyzeThemes]);
    assert!(err.to_string().contains("not enough documents"), "{err}");
}

#[test]
fn zero_top_words_is_validation_error() {
    let options = AnalysisOptions {
        top_words: 0,
        ..raw_options()
    };
    let err = analyze(&cat_and_dog(), &options).unwrap_err();
    assert_eq!(validation_fields(&err), vec![Field::TopWords]);
}

#[test]
fn enormous_topic_count_is_validation_error() {
    let options = AnalysisOptions {
        analyze_themes: true,
        num_topics: i64::MAX,
        ..raw_options()
    };
    let err = analyze(&cat_and_dog(), &options).unwrap_err();
    assert_eq!(validation_fields(&err), vec![Field::NumTopics]);
}

#[test]
fn validation_precedes_empty_corpus_check() {
    // The corpus is empty after normalization, but the bad option wins.
    let docs = vec![Document::new("a", "A", "")];
    let options = AnalysisOptions {
        num_topics: -1,
        ..raw_options()
    };
    let err = analyze(&docs, &options).unwrap_err();
    assert_eq!(validation_fields(&err), vec![Field::NumTopics]);
}

#[test]
fn no_documents_is_validation_error() {
    let err = analyze(&[], &raw_options()).unwrap_err();
    assert_eq!(validation_fields(&err), vec![Field::Documents]);
}

#[test]
fn blank_document_id_is_rejected() {
    let docs = vec![Document::new("  ", "Untitled", "whale")];
    let err = analyze(&docs, &raw_options()).unwrap_err();
    assert_eq!(validation_fields(&err), vec![Field::Documents]);
}

// ============================================================
// Insufficient data
// ============================================================

#[test]
fn stopword_only_corpus_is_insufficient_data() {
    let docs = vec![
        Document::new("a", "A", "The and of"),
        Document::new("b", "B", "it was the"),
    ];
    let options = AnalysisOptions {
        remove_stopwords: true,
        ..raw_options()
    };
    let err = analyze(&docs, &options).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData {
            stage: Stage::Frequency,
            ..
        }
    ));
}

#[test]
fn one_empty_document_among_others_still_analyzes() {
    let docs = vec![
        Document::new("a", "A", "whale ship"),
        Document::new("b", "B", "<html></html>"),
    ];
    let run = analyze(&docs, &raw_options()).unwrap();
    assert_eq!(run.document("b").unwrap().table.total(), 0);
    assert_eq!(run.corpus().total(), 2);
}

// ============================================================
// Comparison entry points
// ============================================================

#[test]
fn compare_uses_run_documents() {
    let run = analyze(&cat_and_dog(), &raw_options()).unwrap();
    let result = run.compare("a", "b").unwrap();
    assert_eq!(result.len(), 7);
    assert!(result.get("cat").unwrap().difference > 0.0);
    assert!(result.get("dog").unwrap().difference < 0.0);
}

#[test]
fn compare_with_unknown_id_names_document_field() {
    let run = analyze(&cat_and_dog(), &raw_options()).unwrap();
    let err = run.compare("missing", "b").unwrap_err();
    assert_eq!(validation_fields(&err), vec![Field::Document]);
    assert!(run.unique_words("missing").is_err());
    assert!(run.rank_correlation("a", "missing").is_err());
}

#[test]
fn similarity_matrix_follows_document_order() {
    let run = analyze(&cat_and_dog(), &raw_options()).unwrap();
    let matrix = run.similarity_matrix(SimilarityMethod::Jaccard);
    assert_eq!(matrix.documents, vec!["a", "b"]);
    // {the, sat, on} shared out of 7 distinct terms.
    assert!((matrix.get("a", "b").unwrap() - 3.0 / 7.0).abs() < 1e-12);
    assert_eq!(matrix.get("a", "a"), Some(1.0));
}

#[test]
fn unique_words_per_document() {
    let run = analyze(&cat_and_dog(), &raw_options()).unwrap();
    let words: Vec<String> = run.unique_words("b").unwrap().into_iter().map(|w| w.word).collect();
    assert_eq!(words, vec!["dog", "log"]);
}

// ============================================================
// Analyzer settings
// ============================================================

#[test]
fn analyzer_custom_stopwords_apply() {
    let analyzer = Analyzer::new().with_stopwords(Stopwords::with_extra(["whale"]));
    let options = AnalysisOptions {
        remove_stopwords: true,
        ..raw_options()
    };
    let docs = vec![Document::new("md", "Moby Dick", "the whale and the harpoon")];
    let run = analyzer.analyze(&docs, &options).unwrap();
    assert_eq!(run.corpus().count("whale"), 0);
    assert_eq!(run.corpus().count("harpoon"), 1);
}

#[test]
fn top_words_respects_requested_count() {
    let options = AnalysisOptions {
        top_words: 2,
        ..raw_options()
    };
    let run = analyze(&cat_and_dog(), &options).unwrap();
    let words: Vec<&str> = run.top_words().iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["the", "sat"]);
}
