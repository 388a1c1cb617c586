//! Closed, compile-time vocabularies used by the lexical layer of the
//! recognizer: rank tokens, author-name prefixes, two-letter genera,
//! hybrid/approximation/comparison markers.
//!
//! Grounded on `spec.md` §4.1 "Lexical policy" and on
//! `examples/original_source/grammar/grammar.peg.go` (`TwoLetterGenus`,
//! `Rank*`, `AuthorPrefix*` productions), expressed as `match`/static-slice
//! tables rather than loaded from files, per `spec.md` §9. Lookup maps use
//! `rustc_hash::FxHashMap` for the fast, allocation-light hashing the teacher
//! already depends on.

use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Whitelisted two-letter genera (`spec.md` §4.1).
pub const TWO_LETTER_GENERA: &[&str] = &[
    "Ca", "Ea", "Ge", "Ia", "Io", "Ix", "Lo", "Oa", "Ra", "Ty", "Ua", "Aa", "Ja", "Zu", "La", "Qu",
    "As", "Ba",
];

/// Extended upper-case letters allowed to start a genus/uninomial.
pub const UPPER_EXTENDED: &[char] = &['Æ', 'Œ', 'Ö'];

pub fn is_two_letter_genus(s: &str) -> bool {
    TWO_LETTER_GENERA.contains(&s)
}

/// Rank tokens, without their `notho-` prefixed variants (handled
/// separately since any rank token may carry one).
pub const RANK_TOKENS: &[&str] = &[
    "var", "subvar", "f", "fo", "forma", "fma", "subf", "ssp", "subsp", "sect", "subsect", "tribe",
    "subtribe", "ser", "subser", "subg", "subgen", "fam", "subfam", "morph", "convar",
    "pseudovar", "race", "pv", "pathovar", "ab", "st", "agamosp", "agamossp", "agamovar", "mut.",
    "natio",
];

pub const RANK_NOTHO_PREFIX: &str = "notho";

static RANK_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| RANK_TOKENS.iter().copied().collect());

/// Recognize a rank token, returning the bare (non-notho) token text and
/// whether a `notho-` prefix was present.
pub fn match_rank(word: &str) -> Option<(&'static str, bool)> {
    let trimmed = word.strip_suffix('.').unwrap_or(word);
    if let Some(bare) = trimmed.strip_prefix(RANK_NOTHO_PREFIX) {
        if let Some(&tok) = RANK_SET.get(bare) {
            return Some((tok, true));
        }
    }
    if let Some(&tok) = RANK_SET.get(trimmed) {
        return Some((tok, false));
    }
    None
}

/// Author name prefixes requiring a trailing-whitespace lookahead
/// (`van `, `de `, ...).
pub const AUTHOR_PREFIX_SPACED: &[&str] = &[
    "van", "der", "den", "de", "della", "du", "le", "zur", "von", "von d.", "ter",
];

/// Glued author prefixes that attach directly to the following capitalized
/// word with no whitespace (`d'Orbigny`, `O'Brien`, `L'Heritier`).
pub const AUTHOR_PREFIX_GLUED: &[&str] = &["d'", "O'", "L'"];

pub fn match_spaced_prefix(word: &str) -> bool {
    AUTHOR_PREFIX_SPACED.contains(&word)
}

pub fn match_glued_prefix(s: &str) -> Option<&'static str> {
    AUTHOR_PREFIX_GLUED.iter().copied().find(|p| s.starts_with(p))
}

/// Approximation markers (`spec.md` §4.1); longest-match order matters.
pub const APPROX_MARKERS: &[&str] = &[
    "sp. nr.", "sp. aff.", "spp.", "spp", "sp.", "sp", "nr.", "nr", "aff.", "aff", "monst.", "?",
];

/// Comparison markers.
pub const COMP_MARKERS: &[&str] = &["cf.", "cf"];

/// The Unicode multiplication sign used as the hybrid operator/marker.
pub const HYBRID_CHAR: char = '\u{00D7}';

/// Unknown-author markers.
pub const UNKNOWN_AUTHOR_MARKERS: &[&str] = &["auct.", "auct", "anon.", "anon"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_two_letter_genera() {
        assert!(is_two_letter_genus("Aa"));
        assert!(is_two_letter_genus("Ba"));
        assert!(!is_two_letter_genus("Bb"));
    }

    #[test]
    fn recognizes_ranks_with_notho_prefix() {
        assert_eq!(match_rank("subsp"), Some(("subsp", false)));
        assert_eq!(match_rank("nothosubsp"), Some(("subsp", true)));
        assert_eq!(match_rank("var."), Some(("var", false)));
        assert_eq!(match_rank("xyz"), None);
    }

    #[test]
    fn recognizes_glued_prefix() {
        assert_eq!(match_glued_prefix("d'Orbigny"), Some("d'"));
        assert_eq!(match_glued_prefix("Smith"), None);
    }
}
