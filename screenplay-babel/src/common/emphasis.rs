//! Fountain inline emphasis to HTML tags.
//!
//! Fountain marks emphasis with `***bold italic***`, `**bold**`, `*italic*`
//! and `_underline_`. A span's content starts and ends with a non-whitespace
//! character and its closing delimiter must not be followed by whitespace.
//! `\*` and `\_` produce literal characters.
//!
//! Delimiters are replaced strongest first, each pass over every line.

use fancy_regex::Regex;
use once_cell::sync::Lazy;

const ESCAPED_ASTERISK: &str = "\u{E000}";
const ESCAPED_UNDERSCORE: &str = "\u{E001}";

static BOLD_ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*\*(\S.*?\S|\S)\*\*\*(?!\s)").expect("valid bold italic regex")
});

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(\S.*?\S|\S)\*\*(?!\s)").expect("valid bold regex"));

static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(\S.*?\S|\S)\*(?!\s)").expect("valid italic regex"));

static UNDERLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(\S.*?\S|\S)_(?!\s)").expect("valid underline regex"));

/// Converts Fountain emphasis markup in `text` into `<b>`, `<i>` and `<u>`
/// tags. Everything else, including any HTML already in the text, is left
/// untouched.
pub fn fountain_to_html(text: &str) -> String {
    let passes: [(&Regex, &str); 4] = [
        (&BOLD_ITALIC, "<b><i>${1}</i></b>"),
        (&BOLD, "<b>${1}</b>"),
        (&ITALIC, "<i>${1}</i>"),
        (&UNDERLINE, "<u>${1}</u>"),
    ];

    let escaped = text
        .replace("\\*", ESCAPED_ASTERISK)
        .replace("\\_", ESCAPED_UNDERSCORE);

    let lines: Vec<String> = escaped
        .split('\n')
        .map(|line| {
            passes.iter().fold(line.to_string(), |line, (regex, tags)| {
                regex.replace_all(&line, *tags).into_owned()
            })
        })
        .collect();

    lines
        .join("\n")
        .replace(ESCAPED_ASTERISK, "*")
        .replace(ESCAPED_UNDERSCORE, "_")
}
