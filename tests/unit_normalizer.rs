// Unit tests for text normalization.
//
// Tests the public normalization surface: raw-text cleanup ahead of
// tokenization, stage selection from NormalizationConfig, and custom
// stopword sets.

use folio::preprocess::cleaner::clean_text;
use folio::preprocess::normalizer::Stage;
use folio::preprocess::stopwords::Stopwords;
use folio::preprocess::{normalize, NormalizationConfig, Normalizer};

fn config(remove_stopwords: bool, lemmatize: bool, stem: bool) -> NormalizationConfig {
    NormalizationConfig {
        remove_stopwords,
        lemmatize,
        stem,
    }
}

// ============================================================
// Cleanup before tokenization
// ============================================================

#[test]
fn gutenberg_header_and_footer_are_dropped() {
    let raw = "The Project Gutenberg eBook of Moby Dick, license text\n\
               *** START OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***\n\
               Call me Ishmael.\n\
               *** END OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***\n\
               Donations and trademark text";
    assert_eq!(clean_text(raw), "Call me Ishmael.");
}

#[test]
fn html_markup_and_entities_are_removed() {
    let raw = "<p>Whale&nbsp;&amp; <b>harpoon</b></p>";
    let tokens = normalize(raw, config(false, false, false));
    assert_eq!(tokens, vec!["whale", "harpoon"]);
}

#[test]
fn plain_prose_is_untouched_by_cleanup() {
    assert_eq!(clean_text("It was the best of times."), "It was the best of times.");
}

// ============================================================
// Tokenization and lower-casing
// ============================================================

#[test]
fn punctuation_and_digits_split_tokens() {
    let tokens = normalize("Chapter 1: CAPTAIN Ahab's harpoon-line!", config(false, false, false));
    assert_eq!(tokens, vec!["chapter", "captain", "ahab", "s", "harpoon", "line"]);
}

#[test]
fn unicode_letters_stay_in_tokens() {
    let tokens = normalize("Les Misérables", config(false, false, false));
    assert_eq!(tokens, vec!["les", "misérables"]);
}

#[test]
fn dotted_capital_i_lowercases_to_plain_letters() {
    let config = config(true, false, false);
    let once = normalize("İSTANBUL and İzmir", config);
    assert_eq!(once, vec!["istanbul", "izmir"]);
    assert_eq!(normalize(&once.join(" "), config), once);
}

#[test]
fn empty_text_gives_empty_sequence() {
    assert!(normalize("", config(true, true, false)).is_empty());
    assert!(normalize("  \n\t ", config(false, false, false)).is_empty());
}

// ============================================================
// Stage selection
// ============================================================

#[test]
fn lemmatize_takes_precedence_over_stem() {
    let n = Normalizer::new(config(true, true, true));
    assert_eq!(n.stages(), &[Stage::Lowercase, Stage::RemoveStopwords, Stage::Lemmatize]);
}

#[test]
fn stemming_applies_without_lemmatize() {
    let tokens = normalize("harpooning whales", config(false, false, true));
    assert_eq!(tokens, vec!["harpoon", "whale"]);
}

#[test]
fn lemmatize_reduces_plural_nouns() {
    let tokens = normalize("The whales and the harpoons", config(true, true, false));
    assert_eq!(tokens, vec!["whale", "harpoon"]);
}

#[test]
fn stopwords_removed_case_insensitively() {
    let tokens = normalize("THE whale AND The harpoon", config(true, false, false));
    assert_eq!(tokens, vec!["whale", "harpoon"]);
}

// ============================================================
// Custom stopwords
// ============================================================

#[test]
fn custom_stopwords_extend_english_list() {
    let stopwords = Stopwords::with_extra(["Whale", " "]);
    let n = Normalizer::with_stopwords(config(true, false, false), stopwords);
    assert_eq!(n.normalize("the whale and the harpoon"), vec!["harpoon"]);
}

#[test]
fn custom_stopwords_ignored_when_removal_off() {
    let stopwords = Stopwords::with_extra(["whale"]);
    let n = Normalizer::with_stopwords(config(false, false, false), stopwords);
    assert_eq!(n.normalize("whale"), vec!["whale"]);
}
