// Rule-based lemmatization.
//
// Mirrors the shape of WordNet's morphological processor: each part of speech
// has an exception table of irregular forms and an ordered list of suffix
// substitutions. Without a full dictionary to confirm candidates, the suffix
// rules are guarded (minimum stem length, protected endings) so that a word
// the rules don't clearly cover comes back unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Part of speech selecting which exception table and suffix rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    #[default]
    Noun,
    Verb,
    Adjective,
    Adverb,
}

static NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("calves", "calf"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("sheaves", "sheaf"),
    ("gentlemen", "gentleman"),
    ("gentlewomen", "gentlewoman"),
    ("brethren", "brother"),
    ("dice", "die"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("crises", "crisis"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
];

static VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("saw", "see"),
    ("seen", "see"),
    ("came", "come"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("told", "tell"),
    ("said", "say"),
    ("made", "make"),
    ("found", "find"),
    ("felt", "feel"),
    ("left", "leave"),
    ("brought", "bring"),
    ("began", "begin"),
    ("begun", "begin"),
    ("wrote", "write"),
    ("written", "write"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("stood", "stand"),
    ("sat", "sit"),
    ("ran", "run"),
    ("heard", "hear"),
    ("held", "hold"),
    ("kept", "keep"),
    ("met", "meet"),
    ("lay", "lie"),
    ("lain", "lie"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("wept", "weep"),
    ("slept", "sleep"),
    ("sought", "seek"),
    ("taught", "teach"),
    ("bought", "buy"),
    ("fought", "fight"),
    ("caught", "catch"),
    ("became", "become"),
];

static ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("further", "far"),
    ("farther", "far"),
    ("furthest", "far"),
    ("farthest", "far"),
    ("elder", "old"),
    ("eldest", "old"),
    ("less", "little"),
    ("least", "little"),
];

static ADVERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "well"),
    ("best", "well"),
    ("worse", "badly"),
    ("worst", "badly"),
];

/// (suffix, replacement), tried in order; the first applicable rule wins.
static NOUN_RULES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

static VERB_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("ied", "y"),
    ("eed", "eed"),
    ("ed", ""),
    ("ing", ""),
    ("s", ""),
];

static ADJECTIVE_RULES: &[(&str, &str)] = &[("iest", "y"), ("ier", "y"), ("est", ""), ("er", "")];

/// Endings that look plural but belong to singular words ("glass", "bus", "basis").
const NOUN_PROTECTED_ENDINGS: &[&str] = &["ss", "us", "is", "ous", "ics"];

/// A base form shorter than this is treated as a false match and the word passes through.
const MIN_BASE_LEN: usize = 3;

struct Exceptions {
    noun: HashMap<&'static str, &'static str>,
    verb: HashMap<&'static str, &'static str>,
    adjective: HashMap<&'static str, &'static str>,
    adverb: HashMap<&'static str, &'static str>,
}

static EXCEPTIONS: LazyLock<Exceptions> = LazyLock::new(|| Exceptions {
    noun: NOUN_EXCEPTIONS.iter().copied().collect(),
    verb: VERB_EXCEPTIONS.iter().copied().collect(),
    adjective: ADJECTIVE_EXCEPTIONS.iter().copied().collect(),
    adverb: ADVERB_EXCEPTIONS.iter().copied().collect(),
});

impl Exceptions {
    fn table(&self, pos: PartOfSpeech) -> &HashMap<&'static str, &'static str> {
        match pos {
            PartOfSpeech::Noun => &self.noun,
            PartOfSpeech::Verb => &self.verb,
            PartOfSpeech::Adjective => &self.adjective,
            PartOfSpeech::Adverb => &self.adverb,
        }
    }
}

/// Lemmatize as a noun, the default part of speech for untagged tokens.
pub fn lemmatize(word: &str) -> String {
    lemmatize_as(word, PartOfSpeech::Noun)
}

/// Reduce `word` (lower-case) to its base form for the given part of speech.
///
/// Returns the word unchanged when no exception or rule applies.
pub fn lemmatize_as(word: &str, pos: PartOfSpeech) -> String {
    if let Some(base) = EXCEPTIONS.table(pos).get(word) {
        return (*base).to_string();
    }

    let rules: &[(&str, &str)] = match pos {
        PartOfSpeech::Noun => {
            if NOUN_PROTECTED_ENDINGS.iter().any(|e| word.ends_with(e)) && !word.ends_with("sses") {
                return word.to_string();
            }
            NOUN_RULES
        }
        PartOfSpeech::Verb => VERB_RULES,
        PartOfSpeech::Adjective => ADJECTIVE_RULES,
        PartOfSpeech::Adverb => return word.to_string(),
    };

    for (suffix, replacement) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            let mut base = String::with_capacity(stem.len() + replacement.len());
            base.push_str(stem);
            base.push_str(replacement);
            if base.chars().count() < MIN_BASE_LEN {
                return word.to_string();
            }
            if matches!(pos, PartOfSpeech::Verb) && (*suffix == "ed" || *suffix == "ing") {
                return undouble_consonant(base);
            }
            return base;
        }
    }

    word.to_string()
}

/// "stopped" -> "stopp" -> "stop". Only collapses a doubled final consonant
/// that is not conventionally doubled in base forms (ll, ss, ff, zz).
fn undouble_consonant(mut base: String) -> String {
    let bytes = base.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] {
        let c = bytes[n - 1];
        let keep = matches!(c, b'l' | b's' | b'f' | b'z') || !c.is_ascii_alphabetic();
        let vowel = matches!(c, b'a' | b'e' | b'i' | b'o' | b'u');
        if !keep && !vowel {
            base.pop();
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals() {
        assert_eq!(lemmatize("cats"), "cat");
        assert_eq!(lemmatize("churches"), "church");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("ladies"), "lady");
        assert_eq!(lemmatize("glasses"), "glass");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("wolves"), "wolf");
        assert_eq!(lemmatize("women"), "woman");
    }

    #[test]
    fn singular_words_pass_through() {
        for w in ["glass", "bus", "basis", "famous", "mat", "was", "as"] {
            assert_eq!(lemmatize(w), w);
        }
    }

    #[test]
    fn noun_default_leaves_verb_forms() {
        assert_eq!(lemmatize("went"), "went");
        assert_eq!(lemmatize("walking"), "walking");
    }

    #[test]
    fn verb_rules() {
        assert_eq!(lemmatize_as("went", PartOfSpeech::Verb), "go");
        assert_eq!(lemmatize_as("walked", PartOfSpeech::Verb), "walk");
        assert_eq!(lemmatize_as("stopped", PartOfSpeech::Verb), "stop");
        assert_eq!(lemmatize_as("carried", PartOfSpeech::Verb), "carry");
        assert_eq!(lemmatize_as("falling", PartOfSpeech::Verb), "fall");
    }

    #[test]
    fn adjective_rules() {
        assert_eq!(lemmatize_as("better", PartOfSpeech::Adjective), "good");
        assert_eq!(lemmatize_as("happiest", PartOfSpeech::Adjective), "happy");
        assert_eq!(lemmatize_as("darker", PartOfSpeech::Adjective), "dark");
    }

    #[test]
    fn adverbs_only_use_exceptions() {
        assert_eq!(lemmatize_as("best", PartOfSpeech::Adverb), "well");
        assert_eq!(lemmatize_as("quickly", PartOfSpeech::Adverb), "quickly");
    }
}
