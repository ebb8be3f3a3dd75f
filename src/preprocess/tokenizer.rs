// Word tokenization.
//
// A token is a maximal run of alphabetic characters. Digits, punctuation, and
// whitespace all act as separators, so "don't" yields "don" and "t" and
// "chapter 12" yields only "chapter". This rule is locale-agnostic: accented
// and non-Latin letters count as alphabetic.

/// Split text into alphabetic runs, preserving their original case.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_alphabetic(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                tokens.push(text[s..i].to_string());
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(text[s..].to_string());
    }

    tokens
}
