//! Locale-style string collation for catalog ordering
//!
//! Names are compared the way a browser's default `localeCompare` orders
//! them: letters compare case-insensitively first, punctuation sorts before
//! digits and digits before letters, and only then does case decide with
//! lowercase ahead of uppercase. A final code point comparison keeps the
//! order total so repeated runs produce identical output.

use std::cmp::Ordering;

/// Compare two names using locale-style, case-sensitive collation
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    let tertiary = a.chars().map(case_weight).cmp(b.chars().map(case_weight));
    if tertiary != Ordering::Equal {
        return tertiary;
    }

    a.cmp(b)
}

/// Sort items in place by the name returned from `name`
///
/// The sort is stable, so entries with identical names keep their
/// discovery order.
pub fn sort_by_name<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| locale_cmp(name(a), name(b)));
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else if c.is_numeric() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        3
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn case_weight(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
