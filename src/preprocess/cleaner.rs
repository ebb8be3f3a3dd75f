// Raw text cleanup before tokenization.
//
// Novels arrive as Project Gutenberg plain text or as HTML exports. Both carry
// material that is not part of the book: license headers and footers, markup,
// and entity escapes. This module strips that material so the tokenizer only
// sees prose.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").expect("valid tag pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});").expect("valid entity pattern")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static GUTENBERG_START: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\*\*\* ?START OF THIS PROJECT GUTENBERG EBOOK .+? ?\*\*\*",
        r"\*\*\* ?START OF THE PROJECT GUTENBERG EBOOK .+? ?\*\*\*",
        r"\*\*\* ?BEGIN OF THIS PROJECT GUTENBERG EBOOK .+? ?\*\*\*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid boilerplate pattern"))
    .collect()
});

static GUTENBERG_END: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\*\*\* ?END OF THIS PROJECT GUTENBERG EBOOK .+? ?\*\*\*",
        r"\*\*\* ?END OF THE PROJECT GUTENBERG EBOOK .+? ?\*\*\*",
        r"\*\*\* ?THE END OF THIS PROJECT GUTENBERG EBOOK .+? ?\*\*\*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid boilerplate pattern"))
    .collect()
});

/// Full cleanup: markup, boilerplate, entities, then whitespace.
pub fn clean_text(text: &str) -> String {
    let text = remove_html_tags(text);
    let text = remove_gutenberg_boilerplate(&text);
    let text = decode_entities(text);
    normalize_whitespace(&text)
}

pub fn remove_html_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, " ").into_owned()
}

/// Keep only the text between the Gutenberg START and END markers.
///
/// Each side is trimmed independently: a file with a header but no footer
/// keeps everything after the header. Text without markers is returned as is.
pub fn remove_gutenberg_boilerplate(text: &str) -> &str {
    let mut content = text;

    if let Some(m) = GUTENBERG_START.iter().find_map(|re| re.find(content)) {
        content = &content[m.end()..];
    }
    if let Some(m) = GUTENBERG_END.iter().find_map(|re| re.find(content)) {
        content = &content[..m.start()];
    }

    content.trim()
}

/// Decode named and numeric HTML entities. Unknown names are left untouched.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            decode_entity(body).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<String> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        _ => return None,
    };
    Some(decoded.to_string())
}

/// Collapse every whitespace run (newlines, tabs, repeated spaces) to one space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_gutenberg_header_and_footer() {
        let text = "Produced by volunteers\n\
                    *** START OF THE PROJECT GUTENBERG EBOOK FRANKENSTEIN ***\n\
                    You will rejoice to hear\n\
                    *** END OF THE PROJECT GUTENBERG EBOOK FRANKENSTEIN ***\n\
                    License text";
        assert_eq!(remove_gutenberg_boilerplate(text), "You will rejoice to hear");
    }

    #[test]
    fn header_without_footer_keeps_tail() {
        let text = "*** START OF THIS PROJECT GUTENBERG EBOOK EMMA ***\nEmma Woodhouse";
        assert_eq!(remove_gutenberg_boilerplate(text), "Emma Woodhouse");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(clean_text("the cat sat on the mat"), "the cat sat on the mat");
    }

    #[test]
    fn removes_tags_and_decodes_entities() {
        let html = "<p>Pride &amp; Prejudice</p>\n<br/>It is a truth&#44; universally";
        assert_eq!(clean_text(html), "Pride & Prejudice It is a truth, universally");
    }

    #[test]
    fn unknown_entity_left_alone() {
        assert_eq!(decode_entities("a &bogus; b"), "a &bogus; b");
    }

    #[test]
    fn hex_entity() {
        assert_eq!(decode_entities("caf&#xE9;"), "café");
    }

    #[test]
    fn comparison_operators_are_not_tags() {
        assert_eq!(remove_html_tags("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }
}
