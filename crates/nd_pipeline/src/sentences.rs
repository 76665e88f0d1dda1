//! Rule-based sentence boundary detection.
//!
//! A deliberate stand-in for a statistical sentence model: terminators
//! (`.`, `!`, `?`) end a sentence when followed by whitespace and an
//! upper-case or digit start, with guards for common abbreviations,
//! initials and dotted acronyms. Boundaries may differ slightly from a
//! trained segmenter, but the output is deterministic.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    static ref ABBREVIATIONS: HashSet<&'static str> = [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc",
        "inc", "ltd", "co", "corp", "dept", "univ", "est", "fig", "al",
        "gen", "sen", "rep", "gov", "jan", "feb", "mar", "apr", "jun",
        "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect();
}

/// Split `text` into sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        // Absorb terminator runs ("?!", "...") and trailing closers.
        let mut j = i;
        while j + 1 < chars.len() && matches!(chars[j + 1].1, '.' | '!' | '?') {
            j += 1;
        }
        let mut k = j;
        while k + 1 < chars.len() && matches!(chars[k + 1].1, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}') {
            k += 1;
        }

        let single_period = c == '.' && j == i;
        let boundary = continues_with_new_sentence(&chars, k)
            && !(single_period && ends_in_abbreviation(&text[start..pos]));

        if boundary {
            let end = chars[k].0 + chars[k].1.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            let mut n = k + 1;
            while n < chars.len() && chars[n].1.is_whitespace() {
                n += 1;
            }
            start = chars.get(n).map_or(text.len(), |&(p, _)| p);
            i = n;
        } else {
            i = k + 1;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// After the terminator at `chars[k]`, does the text look like a new
/// sentence? Requires whitespace (so decimals and `file.txt` never
/// split) and then an upper-case, digit or quote opener.
fn continues_with_new_sentence(chars: &[(usize, char)], k: usize) -> bool {
    let mut n = k + 1;
    if n >= chars.len() {
        return true;
    }
    if !chars[n].1.is_whitespace() {
        return false;
    }
    while n < chars.len() && chars[n].1.is_whitespace() {
        n += 1;
    }
    if n >= chars.len() {
        return true;
    }
    let next = chars[n].1;
    next.is_uppercase()
        || next.is_ascii_digit()
        || matches!(next, '"' | '\'' | '(' | '\u{201c}' | '\u{2018}')
}

/// Does the text before a period end in something that should not close
/// a sentence: a known abbreviation, a single-letter initial, or a
/// dotted acronym like `U.S`?
fn ends_in_abbreviation(prefix: &str) -> bool {
    let word = prefix
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("");
    if word.is_empty() {
        return false;
    }
    let mut cs = word.chars();
    if let (Some(first), None) = (cs.next(), cs.next()) {
        if first.is_uppercase() {
            return true;
        }
    }
    if word.contains('.') {
        return true;
    }
    ABBREVIATIONS.contains(word.to_ascii_lowercase().as_str())
}
