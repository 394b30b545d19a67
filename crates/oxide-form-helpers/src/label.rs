//! Label text derived from field names.

use std::sync::LazyLock;

use regex::Regex;

static UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Z]").expect("Invalid uppercase regex"));

/// Turns a field name into human readable label text.
///
/// A space is inserted before every uppercase letter that follows a word
/// character, then the first letter of each whitespace separated word is
/// uppercased. Underscores are word characters and do not split words.
///
/// ```
/// use oxide_form_helpers::label::prettify;
///
/// assert_eq!(prettify("firstName"), "First Name");
/// assert_eq!(prettify("id"), "Id");
/// ```
pub fn prettify(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut last = 0;

    for m in UPPERCASE.find_iter(name) {
        let follows_word = name[..m.start()]
            .chars()
            .next_back()
            .is_some_and(is_word_char);
        spaced.push_str(&name[last..m.start()]);
        if follows_word {
            spaced.push(' ');
        }
        last = m.start();
    }
    spaced.push_str(&name[last..]);

    title_case(&spaced)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if at_word_start {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }

    out
}
