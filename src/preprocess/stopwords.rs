// Stopword filtering.
//
// The base list is the English list shipped with the `stop-words` crate, pinned
// by the crate version so results reproduce across machines. It is loaded once
// per process and never mutated. Callers may layer extra words on top (the
// novel-specific "said", "would", ...) without touching the shared list.

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{get, LANGUAGE};

static ENGLISH: LazyLock<HashSet<String>> = LazyLock::new(|| {
    get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
});

/// The shared English stopword set.
pub fn english() -> &'static HashSet<String> {
    &ENGLISH
}

/// The English stopwords plus an optional caller-supplied extension.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    extra: HashSet<String>,
}

impl Stopwords {
    /// Only the pinned English list.
    pub fn english() -> Self {
        Self::default()
    }

    /// The English list extended with `words` (lower-cased, blanks ignored).
    pub fn with_extra<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { extra }
    }

    /// Expects an already lower-cased token.
    pub fn contains(&self, token: &str) -> bool {
        ENGLISH.contains(token) || self.extra.contains(token)
    }

    pub fn len(&self) -> usize {
        ENGLISH.len() + self.extra.difference(&ENGLISH).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
