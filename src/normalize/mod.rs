//! C3: pure, stateless word normalization and Latin stemming, per
//! `spec.md` §4.3. No function here depends on configuration except the
//! diaeresis-preservation switch, which is threaded through explicitly
//! rather than read from shared state.

mod diacritics;
mod html;
mod stem;

pub use diacritics::{normalize_apostrophe, normalize_char, normalize_str};
pub use html::strip_html_if_enabled;
pub use stem::stem_epithet;

use crate::semantic::model::WordType;

/// `normalize_word(verbatim, type) -> string`, per `spec.md` §4.3.
pub fn normalize_word(verbatim: &str, word_type: WordType, preserve_diaereses: bool) -> String {
    match word_type {
        WordType::Genus => normalize_genus(verbatim, preserve_diaereses),
        WordType::SubGenus => normalize_genus(verbatim, preserve_diaereses),
        WordType::SpEpithet | WordType::InfraspEpithet | WordType::Cultivar => {
            normalize_lower(verbatim, preserve_diaereses)
        }
        WordType::AuthorWord => normalize_author_word(verbatim),
        WordType::Year => normalize_year_text(verbatim),
        WordType::HybridChar | WordType::Comparison | WordType::ApproxMarker | WordType::Rank => {
            verbatim.to_string()
        }
    }
}

/// `Genus`/`SubGenus`: preserve the case of the first letter, transliterate
/// the rest per the diacritic policy.
fn normalize_genus(verbatim: &str, preserve_diaereses: bool) -> String {
    let mut chars = verbatim.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    let first_norm = normalize_apostrophe(diacritics::normalize_char(first, preserve_diaereses));
    let rest: String = chars
        .map(|c| normalize_apostrophe(diacritics::normalize_char(c, preserve_diaereses)))
        .collect();
    format!("{first_norm}{rest}")
}

/// `SpEpithet`/`InfraspEpithet`: force lower-case, same diacritic policy.
fn normalize_lower(verbatim: &str, preserve_diaereses: bool) -> String {
    verbatim
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .map(|c| normalize_apostrophe(diacritics::normalize_char(c, preserve_diaereses)))
        .collect()
}

/// `AuthorWord`: preserve internal case and dots; only the stemmed
/// (canonical) form strips a trailing dot, which callers handle themselves
/// since it depends on which rendering is being built.
fn normalize_author_word(verbatim: &str) -> String {
    verbatim.chars().map(normalize_apostrophe).collect()
}

/// `Year`: strip enclosing brackets; preserve a trailing lower-case letter
/// and any embedded page reference verbatim (the lifter decides whether to
/// surface `YearCharWarn`).
fn normalize_year_text(verbatim: &str) -> String {
    verbatim
        .trim_matches(|c| c == '[' || c == ']' || c == '(' || c == ')')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_genus_preserving_leading_case() {
        assert_eq!(normalize_word("Hieracium", WordType::Genus, false), "Hieracium");
    }

    #[test]
    fn normalizes_epithet_to_lowercase() {
        assert_eq!(
            normalize_word("Samoënsicum", WordType::SpEpithet, false),
            "samoensicum"
        );
        assert_eq!(
            normalize_word("samoënsicum", WordType::SpEpithet, true),
            "samoënsicum"
        );
    }

    #[test]
    fn strips_year_brackets() {
        assert_eq!(normalize_word("[1892]", WordType::Year, false), "1892");
    }
}
