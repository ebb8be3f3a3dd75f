use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::pipeline::Analyzer;
use crate::preprocess::stopwords::Stopwords;
use crate::topics::lda::{DEFAULT_ITERATIONS, DEFAULT_SEED, DEFAULT_WORDS_PER_TOPIC};

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment is valid. The .env
/// file is loaded automatically at startup via dotenvy. CLI flags override
/// whatever is set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of corpus-wide top words to report (FOLIO_TOP_WORDS)
    pub top_words: i64,
    /// Topics to infer when theme analysis is on (FOLIO_NUM_TOPICS)
    pub num_topics: i64,
    pub words_per_topic: usize,
    pub seed: u64,
    /// Gibbs sweeps per topic inference (FOLIO_LDA_ITERATIONS)
    pub lda_iterations: usize,
    /// Maximum number of input files read at once
    pub concurrency: usize,
    /// Extra stopwords on top of the English list (FOLIO_CUSTOM_STOPWORDS, comma-separated)
    pub custom_stopwords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_words: 50,
            num_topics: 5,
            words_per_topic: DEFAULT_WORDS_PER_TOPIC,
            seed: DEFAULT_SEED,
            lda_iterations: DEFAULT_ITERATIONS,
            concurrency: 8,
            custom_stopwords: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let custom_stopwords: Vec<String> = lookup("FOLIO_CUSTOM_STOPWORDS")
            .map(|raw| {
                raw.split(',')
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let concurrency: usize = parse_var(&lookup, "FOLIO_CONCURRENCY", defaults.concurrency)?;
        if concurrency == 0 {
            anyhow::bail!("FOLIO_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            top_words: parse_var(&lookup, "FOLIO_TOP_WORDS", defaults.top_words)?,
            num_topics: parse_var(&lookup, "FOLIO_NUM_TOPICS", defaults.num_topics)?,
            words_per_topic: parse_var(&lookup, "FOLIO_WORDS_PER_TOPIC", defaults.words_per_topic)?,
            seed: parse_var(&lookup, "FOLIO_SEED", defaults.seed)?,
            lda_iterations: parse_var(&lookup, "FOLIO_LDA_ITERATIONS", defaults.lda_iterations)?,
            concurrency,
            custom_stopwords,
        })
    }

    /// An analyzer carrying this config's stopwords and sampler settings.
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new()
            .with_stopwords(Stopwords::with_extra(&self.custom_stopwords))
            .with_iterations(self.lda_iterations)
            .with_words_per_topic(self.words_per_topic)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} is not a valid number: '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.top_words, 50);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn reads_numbers_and_stopwords() {
        let config = Config::from_lookup(lookup(&[
            ("FOLIO_NUM_TOPICS", "7"),
            ("FOLIO_SEED", " 1234 "),
            ("FOLIO_CUSTOM_STOPWORDS", "Said, would,,could "),
        ]))
        .unwrap();
        assert_eq!(config.num_topics, 7);
        assert_eq!(config.seed, 1234);
        assert_eq!(config.custom_stopwords, vec!["said", "would", "could"]);
    }

    #[test]
    fn malformed_number_names_variable() {
        let err = Config::from_lookup(lookup(&[("FOLIO_TOP_WORDS", "many")])).unwrap_err();
        assert!(err.to_string().contains("FOLIO_TOP_WORDS"), "{err}");
    }

    #[test]
    fn zero_concurrency_rejected() {
        assert!(Config::from_lookup(lookup(&[("FOLIO_CONCURRENCY", "0")])).is_err());
    }
}
