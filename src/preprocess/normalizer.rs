// Text normalization: raw document text in, comparable token stream out.
//
// The work is an explicit, ordered list of stages chosen from the config and
// applied left to right: clean and tokenize, lower-case, drop stopwords, then
// reduce to base forms. Reordering stages changes results (a lemmatized token
// can become a stopword, a stopword can stop being one), so the order lives in
// one place: `Normalizer::new`.

use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use super::cleaner::clean_text;
use super::lemmatizer;
use super::stopwords::Stopwords;
use super::tokenizer::tokenize;

/// Ordered sequence of normalized tokens for one document.
pub type TokenSequence = Vec<String>;

static ENGLISH_STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Which optional normalization stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    pub remove_stopwords: bool,
    pub lemmatize: bool,
    /// Snowball stemming; ignored when `lemmatize` is set.
    #[serde(default)]
    pub stem: bool,
}

/// One token-stream transform. Tokenization itself always runs first and is
/// not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Lowercase,
    RemoveStopwords,
    Lemmatize,
    Stem,
}

/// A configured normalization pipeline. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stages: Vec<Stage>,
    stopwords: Stopwords,
}

impl Normalizer {
    pub fn new(config: NormalizationConfig) -> Self {
        Self::with_stopwords(config, Stopwords::english())
    }

    /// Same stage plan as `new`, filtering against a custom stopword set.
    pub fn with_stopwords(config: NormalizationConfig, stopwords: Stopwords) -> Self {
        let mut stages = vec![Stage::Lowercase];
        if config.remove_stopwords {
            stages.push(Stage::RemoveStopwords);
        }
        if config.lemmatize {
            stages.push(Stage::Lemmatize);
        } else if config.stem {
            stages.push(Stage::Stem);
        }
        Self { stages, stopwords }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn normalize(&self, raw_text: &str) -> TokenSequence {
        self.normalize_cleaned(&clean_text(raw_text))
    }

    /// Normalize text that has already been through [`clean_text`].
    pub fn normalize_cleaned(&self, cleaned: &str) -> TokenSequence {
        let tokens = tokenize(cleaned);
        self.stages
            .iter()
            .fold(tokens, |tokens, stage| self.apply(*stage, tokens))
    }

    fn apply(&self, stage: Stage, tokens: TokenSequence) -> TokenSequence {
        match stage {
            Stage::Lowercase => tokens.iter().filter_map(|t| lowercase(t)).collect(),
            Stage::RemoveStopwords => tokens
                .into_iter()
                .filter(|t| !self.stopwords.contains(t))
                .collect(),
            Stage::Lemmatize => tokens.iter().map(|t| lemmatizer::lemmatize(t)).collect(),
            Stage::Stem => tokens
                .iter()
                .map(|t| ENGLISH_STEMMER.stem(t).into_owned())
                .collect(),
        }
    }
}

/// Full Unicode lower-casing, keeping the token an alphabetic run.
///
/// Some capitals lower-case to a letter plus a combining mark ("İ" becomes
/// "i\u{307}"); the mark is dropped so the token re-tokenizes to itself.
fn lowercase(token: &str) -> Option<String> {
    let lowered: String = token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    (!lowered.is_empty()).then_some(lowered)
}

/// Normalize `raw_text` with the pinned English stopword list.
pub fn normalize(raw_text: &str, config: NormalizationConfig) -> TokenSequence {
    Normalizer::new(config).normalize(raw_text)
}
