//! Maven version ordering.
//!
//! Follows the rules of Maven's `ComparableVersion`: versions split into
//! numeric and qualifier items at `.`, `-` and digit/letter boundaries,
//! numbers compare numerically, known qualifiers rank
//! `alpha < beta < milestone < rc < snapshot < release < sp`, and trailing
//! zeros or release qualifiers are insignificant (`1.0 == 1`). A `-` (or a
//! letter followed by digits) opens a sub-list, which sorts below a plain
//! number at the same position (`1-1 < 1.1`).

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Decimal digits without leading zeros, so length orders magnitude.
    Number(String),
    Qualifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    item: Item,
    opens_sublist: bool,
}

const RELEASE_RANK: usize = 5;
const UNKNOWN_RANK: usize = 7;

fn qualifier_rank(q: &str) -> usize {
    match q {
        "alpha" | "a" => 0,
        "beta" | "b" => 1,
        "milestone" | "m" => 2,
        "rc" | "cr" => 3,
        "snapshot" => 4,
        "" | "ga" | "final" | "release" => RELEASE_RANK,
        "sp" => 6,
        _ => UNKNOWN_RANK,
    }
}

fn tokens(version: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut digits = false;
    let mut sublist_start = 0;
    let mut opens_sublist = false;

    for c in version.trim().to_ascii_lowercase().chars() {
        match c {
            '.' | '_' => {
                flush(&mut current, digits, &mut opens_sublist, &mut out);
                continue;
            }
            '-' => {
                flush(&mut current, digits, &mut opens_sublist, &mut out);
                strip_nulls(&mut out, sublist_start);
                sublist_start = out.len();
                opens_sublist = true;
                continue;
            }
            _ => {}
        }
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != digits {
            flush(&mut current, digits, &mut opens_sublist, &mut out);
            if is_digit {
                sublist_start = out.len();
                opens_sublist = true;
            }
        }
        digits = is_digit;
        current.push(c);
    }
    flush(&mut current, digits, &mut opens_sublist, &mut out);

    strip_nulls(&mut out, 0);
    out
}

fn flush(current: &mut String, digits: bool, opens_sublist: &mut bool, out: &mut Vec<Token>) {
    if current.is_empty() {
        return;
    }
    let text = std::mem::take(current);
    let item = if digits {
        Item::Number(text.trim_start_matches('0').to_string())
    } else {
        Item::Qualifier(text)
    };
    out.push(Token {
        item,
        opens_sublist: std::mem::take(opens_sublist),
    });
}

/// Drops trailing null items, never reaching below `floor`.
fn strip_nulls(out: &mut Vec<Token>, floor: usize) {
    while out.len() > floor && out.last().is_some_and(|t| is_null(&t.item)) {
        out.pop();
    }
}

fn is_null(item: &Item) -> bool {
    match item {
        Item::Number(n) => n.is_empty(),
        Item::Qualifier(q) => qualifier_rank(q) == RELEASE_RANK,
    }
}

fn compare_items(a: &Item, b: &Item) -> Ordering {
    match (a, b) {
        (Item::Number(x), Item::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Item::Number(_), Item::Qualifier(_)) => Ordering::Greater,
        (Item::Qualifier(_), Item::Number(_)) => Ordering::Less,
        (Item::Qualifier(x), Item::Qualifier(y)) => qualifier_rank(x)
            .cmp(&qualifier_rank(y))
            .then_with(|| x.cmp(y)),
    }
}

fn compare_tokens(a: &Token, b: &Token) -> Ordering {
    match (a.opens_sublist, b.opens_sublist) {
        (true, false) => sublist_against(&b.item).reverse(),
        (false, true) => sublist_against(&a.item),
        _ => compare_items(&a.item, &b.item),
    }
}

/// Ordering of a plain item against a sub-list at the same position.
fn sublist_against(plain: &Item) -> Ordering {
    match plain {
        Item::Number(_) => Ordering::Greater,
        Item::Qualifier(_) => Ordering::Less,
    }
}

/// Ordering of a missing item against a present one, seen from the present side.
fn compare_to_null(item: &Item) -> Ordering {
    match item {
        Item::Number(n) if n.is_empty() => Ordering::Equal,
        Item::Number(_) => Ordering::Greater,
        Item::Qualifier(q) => qualifier_rank(q).cmp(&RELEASE_RANK),
    }
}

pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = tokens(a);
    let right = tokens(b);

    for i in 0..left.len().max(right.len()) {
        let ord = match (left.get(i), right.get(i)) {
            (Some(x), Some(y)) => compare_tokens(x, y),
            (Some(x), None) => compare_to_null(&x.item),
            (None, Some(y)) => compare_to_null(&y.item).reverse(),
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
