//! Locale-style title comparison.
//!
//! Approximates a browser's default collation for Latin titles. The first
//! pass ignores case, common diacritics and combining marks, and orders
//! whitespace, then punctuation and symbols, then digits, then letters.
//! Lower case then sorts before upper case, and the raw text breaks
//! remaining ties.

use std::cmp::Ordering;

/// Compare two titles the way a catalog reader expects them ordered.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let (primary_a, case_a) = sort_keys(a);
    let (primary_b, case_b) = sort_keys(b);
    primary_a
        .cmp(&primary_b)
        .then_with(|| case_a.cmp(&case_b))
        .then_with(|| a.cmp(b))
}

/// Primary weights and per-position case flags, built from the same
/// folded characters so the two stay aligned.
fn sort_keys(s: &str) -> (Vec<(u8, char)>, Vec<bool>) {
    let mut primary = Vec::with_capacity(s.len());
    let mut case = Vec::with_capacity(s.len());
    for c in s.chars() {
        let upper = c.is_uppercase();
        for lower in c.to_lowercase() {
            if is_combining_mark(lower) {
                continue;
            }
            let folded = fold(lower);
            primary.push((class(folded), folded));
            case.push(upper);
        }
    }
    (primary, case)
}

fn class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ś' | 'š' => 's',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
