//! Text Normalizer: rewrites the typographic Unicode that generative models emit into stable
//! ASCII equivalents so the output can be embedded in machine-parsed formats and compared
//! across runs.

use unicode_normalization::UnicodeNormalization;

/// Character substitutions, grouped by category. No replacement produces a character that is
/// itself a key in this table.
const SUBSTITUTIONS: &[(char, &str)] = &[
    // Quotes
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{00AB}', "\""),
    ('\u{00BB}', "\""),
    ('\u{2039}', "'"),
    ('\u{203A}', "'"),
    // Apostrophes
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('`', "'"),
    ('\u{00B4}', "'"),
    // Dashes
    ('\u{2014}', "-"),
    ('\u{2013}', "-"),
    ('\u{2212}', "-"),
    // Spaces; zero-width forms are dropped
    ('\u{00A0}', " "),
    ('\u{2007}', " "),
    ('\u{202F}', " "),
    ('\u{2009}', " "),
    ('\u{200B}', ""),
    ('\u{200C}', ""),
    ('\u{200D}', ""),
    ('\u{FEFF}', ""),
    // Ellipsis
    ('\u{2026}', "..."),
    // Math and comparison
    ('\u{00D7}', "x"),
    ('\u{00F7}', "/"),
    ('\u{2264}', "<="),
    ('\u{2265}', ">="),
    ('\u{2260}', "!="),
    ('\u{221E}', "infinity"),
    ('\u{2248}', "~="),
    ('\u{00B1}', "+/-"),
    // Currency
    ('\u{20AC}', "EUR"),
    ('\u{00A3}', "GBP"),
    ('\u{00A5}', "JPY"),
    // Fractions
    ('\u{00BC}', "1/4"),
    ('\u{00BD}', "1/2"),
    ('\u{00BE}', "3/4"),
    ('\u{2153}', "1/3"),
    ('\u{2154}', "2/3"),
    // Superscripts
    ('\u{00B2}', "^2"),
    ('\u{00B3}', "^3"),
    ('\u{00B9}', "^1"),
    // Bullets
    ('\u{2022}', "*"),
    ('\u{2023}', "*"),
    ('\u{25E6}', "*"),
    ('\u{2043}', "*"),
    ('\u{2219}', "*"),
    // Legal marks
    ('\u{00A9}', "(c)"),
    ('\u{00AE}', "(R)"),
    ('\u{2122}', "(TM)"),
    // Arrows
    ('\u{2190}', "<-"),
    ('\u{2192}', "->"),
    ('\u{2191}', "^"),
    ('\u{2193}', "v"),
    ('\u{21D2}', "=>"),
    ('\u{21D0}', "<="),
    // Check and cross marks
    ('\u{2713}', "v"),
    ('\u{2714}', "v"),
    ('\u{2717}', "x"),
    ('\u{2718}', "x"),
    // Decorative brackets
    ('\u{2768}', "("),
    ('\u{2769}', ")"),
    ('\u{276A}', "("),
    ('\u{276B}', ")"),
    ('\u{3008}', "<"),
    ('\u{3009}', ">"),
];

fn substitution_for(c: char) -> Option<&'static str> {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

fn substitute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match substitution_for(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Normalizes model-generated text. Empty input is returned as-is.
///
/// Accented letters survive (NFC only canonicalizes their representation); everything in
/// `SUBSTITUTIONS` is rewritten, whitespace runs collapse to one space and the ends are trimmed.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Composition can yield a mapped character (`=` + U+0338 is `≠`) whose replacement exposes
    // a new base for the next combining mark, so passes repeat until nothing changes.
    let mut current = normalize_pass(text);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One round of table, NFC, table and whitespace collapse.
///
/// Each round that changes a composed string either composes characters or replaces a
/// non-ASCII character with ASCII, so repeating it reaches a fixpoint.
fn normalize_pass(text: &str) -> String {
    let composed: String = substitute(text).nfc().collect();
    substitute(&composed)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `normalize_text` over an optional field. `None` stays `None`.
pub fn normalize_opt(text: Option<&str>) -> Option<String> {
    text.map(normalize_text)
}
