// Property tests for the analysis invariants.
//
// Token-count conservation, stopword idempotence, ranking order, zero
// self-difference, and topic mixtures summing to one, over generated input.

use proptest::prelude::*;

use folio::compare::compare;
use folio::frequency::{build_frequency_table, top_n, TermFrequencyTable};
use folio::preprocess::{normalize, NormalizationConfig, TokenSequence};
use folio::topics::{GibbsLda, TopicConfig, TopicInference};

fn stopwords_only() -> NormalizationConfig {
    NormalizationConfig {
        remove_stopwords: true,
        ..Default::default()
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn sequence() -> impl Strategy<Value = TokenSequence> {
    prop::collection::vec(word(), 0..60)
}

// ============================================================
// Normalizer
// ============================================================

proptest! {
    #[test]
    fn stopword_removal_is_idempotent(text in "[a-zA-ZİIÉÖÆßΣéøçαλ ,.;!?'\n]{0,200}") {
        let once = normalize(&text, stopwords_only());
        let twice = normalize(&once.join(" "), stopwords_only());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_tokens_are_lowercase_alphabetic(text in "[a-zA-Z0-9 ,.<>&*\n]{0,200}") {
        let config = NormalizationConfig { remove_stopwords: true, lemmatize: true, stem: false };
        for token in normalize(&text, config) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_ascii_lowercase()), "token {:?}", token);
        }
    }
}

// ============================================================
// Frequency engine
// ============================================================

proptest! {
    #[test]
    fn counts_sum_to_sequence_length(seq in sequence()) {
        let table = build_frequency_table(std::slice::from_ref(&seq));
        let sum: u64 = table.iter().map(|w| w.count).sum();
        prop_assert_eq!(sum, seq.len() as u64);
        prop_assert_eq!(table.total(), seq.len() as u64);
    }

    #[test]
    fn top_n_over_whole_table_is_sorted_and_stable(seq in sequence(), extra in 0usize..10) {
        let table = TermFrequencyTable::from_tokens(&seq);
        let ranked = top_n(&table, table.len() + extra);
        prop_assert_eq!(ranked.len(), table.len());

        let first_seen: Vec<&str> = table.iter().map(|w| w.word.as_str()).collect();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                let i = first_seen.iter().position(|w| *w == pair[0].word).unwrap();
                let j = first_seen.iter().position(|w| *w == pair[1].word).unwrap();
                prop_assert!(i < j);
            }
        }
    }
}

// ============================================================
// Comparison engine
// ============================================================

proptest! {
    #[test]
    fn self_comparison_has_zero_differences(seq in sequence()) {
        let table = TermFrequencyTable::from_tokens(&seq);
        let result = compare(&table, &table);
        prop_assert_eq!(result.len(), table.len());
        prop_assert!(result.rows.iter().all(|r| r.difference == 0.0));
    }

    #[test]
    fn comparison_covers_union_of_terms(a in sequence(), b in sequence()) {
        let ta = TermFrequencyTable::from_tokens(&a);
        let tb = TermFrequencyTable::from_tokens(&b);
        let result = compare(&ta, &tb);
        let union = ta.len() + tb.iter().filter(|w| !ta.contains(&w.word)).count();
        prop_assert_eq!(result.len(), union);
    }
}

// ============================================================
// Topic model
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    })]
    #[test]
    fn topic_mixtures_sum_to_one(
        docs in prop::collection::vec(prop::collection::vec("[a-f]{1,2}", 1..30), 2..5),
        k in 1usize..6,
        seed in any::<u64>(),
    ) {
        let lda = GibbsLda::new(TopicConfig { iterations: 20, ..TopicConfig::new(k, seed) });
        let analysis = lda.infer(&docs).unwrap();
        prop_assert_eq!(analysis.model.topics.len(), k);
        prop_assert_eq!(analysis.distributions.len(), docs.len());
        for dist in &analysis.distributions {
            prop_assert!((dist.sum() - 1.0).abs() < 1e-6);
        }

        let again = lda.infer(&docs).unwrap();
        prop_assert_eq!(analysis, again);
    }
}
