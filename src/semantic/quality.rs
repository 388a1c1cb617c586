//! Quality scoring, per `spec.md` §4.2 step 8.

use super::model::Warning;
use indexmap::IndexSet;

/// `quality` is 0 only for an unparsed input; otherwise 4 if capitalization
/// was applied to a lowercase genus, else derived from the warning count.
pub fn score(warnings: &IndexSet<Warning>, capitalized_genus: bool) -> u8 {
    if capitalized_genus {
        return 4;
    }
    match warnings.len() {
        0 => 1,
        1 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_parse_is_quality_one() {
        assert_eq!(score(&IndexSet::new(), false), 1);
    }

    #[test]
    fn single_warning_is_quality_two() {
        let mut w = IndexSet::new();
        w.insert(Warning::HtmlTagsRemoved);
        assert_eq!(score(&w, false), 2);
    }

    #[test]
    fn capitalization_forces_quality_four() {
        let mut w = IndexSet::new();
        w.insert(Warning::CapitalizationWarn);
        assert_eq!(score(&w, true), 4);
    }
}
