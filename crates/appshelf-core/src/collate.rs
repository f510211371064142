//! Name ordering for the catalog's display language (Arabic).
//!
//! Follows the shape of the Arabic tailoring used by browsers: spaces and
//! punctuation sort first, then digits, then Arabic letters, then every other
//! script. Case and accents only matter at the tie-break level: Latin text is
//! decomposed (NFD) and its combining marks dropped, Arabic diacritics and
//! tatweel are ignored, and the hamza-carrying alef forms fold to a bare alef.
//! When two names are equal under those rules the raw text decides, so the
//! order is total.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Punct,
    Digit,
    Arabic,
    Other,
}

fn is_arabic_block(c: char) -> bool {
    matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}')
}

fn is_arabic_mark(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}')
}

fn fold_arabic(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        other => other,
    }
}

fn classify(c: char) -> Class {
    if c.is_whitespace() {
        Class::Space
    } else if c.is_numeric() {
        Class::Digit
    } else if c.is_alphabetic() && is_arabic_block(c) {
        Class::Arabic
    } else if c.is_alphabetic() {
        Class::Other
    } else {
        Class::Punct
    }
}

fn primary_key(name: &str) -> Vec<(Class, char)> {
    let mut base = Vec::with_capacity(name.len());
    for c in name.chars() {
        if is_arabic_block(c) {
            if !is_arabic_mark(c) {
                base.push(fold_arabic(c));
            }
        } else {
            base.extend(std::iter::once(c).nfd().filter(|d| !is_combining_mark(*d)));
        }
    }
    base.into_iter()
        .flat_map(char::to_lowercase)
        .map(|c| (classify(c), c))
        .collect()
}

/// Compare two display names in catalog order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.cmp(b))
}
