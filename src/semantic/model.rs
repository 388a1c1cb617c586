//! The output data model: `ParsedName` and everything it is built from,
//! per `spec.md` §3.

use indexmap::IndexSet;
use uuid::Uuid;

/// Three progressively-normalized renderings of the name proper
/// (`spec.md` §3, §4.2 step 4).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Canonical {
    pub simple: String,
    pub full: String,
    pub stemmed: String,
}

/// One word span recorded in `ParsedName::words` (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    pub verbatim: String,
    pub normalized: String,
    pub word_type: WordType,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum WordType {
    Genus,
    SubGenus,
    SpEpithet,
    InfraspEpithet,
    Rank,
    AuthorWord,
    Year,
    HybridChar,
    Comparison,
    ApproxMarker,
    Cultivar,
}

/// A publication year with its optional modifiers (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Year {
    pub value: String,
    pub approximate: bool,
    pub range_end: Option<String>,
    pub page: Option<String>,
}

/// A single author name, after prefix/suffix normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Author {
    pub verbatim: String,
    pub normalized: String,
    pub is_unknown: bool,
}

/// Separator style observed between authors in a team's verbatim text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum AuthorSepStyle {
    Comma,
    Ampersand,
    Et,
    And,
}

/// An ordered sequence of authors plus an optional year (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub authors: Vec<Author>,
    pub sep_style: Option<AuthorSepStyle>,
    pub year: Option<Year>,
    pub et_al: bool,
}

impl Team {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

/// Full authorship: original team (with optional *ex*/*emend* teams) and an
/// optional combination team (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Authorship {
    pub normalized: String,
    pub verbatim: String,
    pub original: Team,
    pub original_ex: Option<Team>,
    pub original_emend: Option<Team>,
    pub combination: Option<Team>,
}

/// The deepest name shape matched by the recognizer (`spec.md` §3, §4.2
/// step 2).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum Details {
    Uninomial { uninomial: String },
    Species { genus: String, species: String },
    Infraspecies { genus: String, species: String, infraspecific: Vec<String> },
    Comparison { genus: String, species: Option<String> },
    Approximation { genus: String, species: Option<String> },
    HybridFormula { parts: Vec<String> },
    NamedHybrid { name: String },
}

/// Recoverable anomalies accumulated during lifting (`spec.md` §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    YearCharWarn,
    CapitalizationWarn,
    HtmlTagsRemoved,
    MisformedParens,
    MiscodedCharacter,
    UnknownRank,
    DoubleParensAuthorship,
    BasionymYearOutsideParens,
    SpaceNonStandard,
}

/// The top-level output entity (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedName {
    pub verbatim: String,
    pub normalized: String,
    pub canonical: Option<Canonical>,
    pub cardinality: u32,
    pub authorship: Option<Authorship>,
    pub year: Option<String>,
    pub quality: u8,
    pub warnings: IndexSet<Warning>,
    pub details: Option<Details>,
    pub words: Vec<Word>,
    pub id: Uuid,
}

impl ParsedName {
    /// The single allowed post-construction mutation (`spec.md` §4.2,
    /// "Ambiguous restore"): a species/infraspecific epithet word whose
    /// normalized spelling (`from`) silently corrected an intentional
    /// spelling (e.g. `zapiens` normalized to `sapiens`) has its verbatim
    /// text swapped back to `to`. `normalized` and any canonical string
    /// built from it are left untouched.
    pub fn restore_ambiguous(&mut self, from: &str, to: &str) {
        for w in self.words.iter_mut() {
            if matches!(w.word_type, WordType::SpEpithet | WordType::InfraspEpithet) && w.normalized == from {
                w.verbatim = to.to_string();
            }
        }
    }

    /// The minimal result for input the grammar could not match at all
    /// (`spec.md` §4.2 step 1).
    pub fn unparsed(verbatim: String, id: Uuid) -> Self {
        Self {
            verbatim,
            normalized: String::new(),
            canonical: None,
            cardinality: 0,
            authorship: None,
            year: None,
            quality: 0,
            warnings: IndexSet::new(),
            details: None,
            words: Vec::new(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp_word(verbatim: &str, normalized: &str) -> Word {
        Word {
            verbatim: verbatim.to_string(),
            normalized: normalized.to_string(),
            word_type: WordType::SpEpithet,
            start: 0,
            end: verbatim.len() as u32,
        }
    }

    #[test]
    fn restore_ambiguous_swaps_only_the_matching_epithet() {
        let mut name = ParsedName::unparsed("Homo zapiens".to_string(), Uuid::nil());
        name.words = vec![sp_word("zapiens", "sapiens")];
        name.restore_ambiguous("sapiens", "zapiens");
        assert_eq!(name.words[0].verbatim, "zapiens");
        assert_eq!(name.words[0].normalized, "sapiens");
    }

    #[test]
    fn restore_ambiguous_ignores_non_matching_words() {
        let mut name = ParsedName::unparsed("Homo sapiens".to_string(), Uuid::nil());
        name.words = vec![sp_word("sapiens", "sapiens")];
        name.restore_ambiguous("vulgaris", "vulgaris-typo");
        assert_eq!(name.words[0].verbatim, "sapiens");
    }
}
