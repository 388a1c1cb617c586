//! C2: walk the parse tree produced by the recognizer and build a
//! `ParsedName`, per `spec.md` §4.2.

use indexmap::IndexSet;

use crate::config::ParserConfig;
use crate::grammar::{NodeId, RecognizedName, RuleTag, Tree};
use crate::normalize::{normalize_apostrophe, normalize_char, normalize_word, stem_epithet};

use super::model::{
    Author, AuthorSepStyle, Authorship, Canonical, Details, ParsedName, Team, Warning, Word,
    WordType, Year,
};
use super::quality;
use super::uuid_gen;

fn text(chars: &[char], tree: &Tree, node: NodeId) -> String {
    tree.node(node).text(chars)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn word(chars: &[char], tree: &Tree, node: NodeId, word_type: WordType, preserve_diaereses: bool) -> Word {
    let span = tree.node(node).span;
    let verbatim = span.to_string(chars);
    let normalized = normalize_word(&verbatim, word_type, preserve_diaereses);
    Word {
        verbatim,
        normalized,
        word_type,
        start: span.start,
        end: span.end,
    }
}

/// Separator style inferred from the verbatim text joining two authors.
fn infer_sep_style(between: &str) -> AuthorSepStyle {
    if between.contains('&') {
        AuthorSepStyle::Ampersand
    } else if between.contains(" et ") {
        AuthorSepStyle::Et
    } else if between.contains(" and ") {
        AuthorSepStyle::And
    } else {
        AuthorSepStyle::Comma
    }
}

struct LiftCtx<'a> {
    chars: &'a [char],
    tree: &'a Tree,
    cfg: &'a ParserConfig,
    warnings: IndexSet<Warning>,
    words: Vec<Word>,
    capitalized_genus: bool,
}

impl<'a> LiftCtx<'a> {
    fn warn(&mut self, w: Warning) {
        tracing::warn!("lift: {w:?}");
        self.warnings.insert(w);
    }

    fn push_word(&mut self, node: NodeId, word_type: WordType) {
        let w = word(self.chars, self.tree, node, word_type, self.cfg.with_preserve_diaereses);
        if w.verbatim.contains(crate::grammar::MISCODED_CHAR) {
            self.warn(Warning::MiscodedCharacter);
        }
        self.words.push(w);
    }

    fn authors_team(&mut self, team_node: NodeId) -> Team {
        let authors: Vec<Author> = self
            .tree
            .children(team_node)
            .filter(|c| {
                matches!(
                    self.tree.node(*c).rule,
                    RuleTag::Author | RuleTag::UnknownAuthor
                )
            })
            .map(|c| {
                let is_unknown = self.tree.node(c).rule == RuleTag::UnknownAuthor;
                self.push_word(c, WordType::AuthorWord);
                let verbatim = text(self.chars, self.tree, c);
                let normalized = normalize_word(&verbatim, WordType::AuthorWord, false);
                Author { verbatim, normalized, is_unknown }
            })
            .collect();

        let et_al = self
            .tree
            .children(team_node)
            .any(|c| self.tree.node(c).rule == RuleTag::AuthorSuffix);

        let sep_style = if authors.len() > 1 {
            let span = self.tree.node(team_node).span;
            Some(infer_sep_style(&span.to_string(self.chars)))
        } else {
            None
        };

        Team { authors, sep_style, year: None, et_al }
    }

    fn year(&mut self, year_node: NodeId) -> Year {
        self.push_word(year_node, WordType::Year);
        let verbatim = text(self.chars, self.tree, year_node);
        if verbatim.chars().last().is_some_and(|c| c.is_ascii_lowercase()) {
            self.warn(Warning::YearCharWarn);
        }
        let approximate = verbatim.contains('?');
        let range_end = verbatim.split_once('-').map(|(_, end)| end.trim_end_matches([')', ']']).to_string());
        let value = normalize_word(&verbatim, WordType::Year, false)
            .split(['-', '?'])
            .next()
            .unwrap_or_default()
            .to_string();
        Year { value, approximate, range_end, page: None }
    }

    /// Build one `Team` from an `AuthorsGroup` node's main authors, folding
    /// in the enclosing `OriginalAuthorship`/`CombinationAuthorship`'s
    /// sibling `Year`, if any.
    fn team_with_year(&mut self, group_node: NodeId, year_node: Option<NodeId>) -> Team {
        let team_node = self
            .tree
            .child_of(group_node, RuleTag::AuthorsTeam)
            .expect("AuthorsGroup always has a main AuthorsTeam");
        let mut team = self.authors_team(team_node);
        team.year = year_node.map(|y| self.year(y));
        team
    }

    fn sub_team(&mut self, group_node: NodeId, wrapper: RuleTag) -> Option<Team> {
        let wrapper_node = self.tree.child_of(group_node, wrapper)?;
        let team_node = self.tree.child_of(wrapper_node, RuleTag::AuthorsTeam)?;
        Some(self.authors_team(team_node))
    }

    /// Lift an `Authorship` or `AuthorshipCombo` node into the `Authorship`
    /// model, per `spec.md` §4.2 step 5.
    fn authorship(&mut self, node: NodeId) -> Authorship {
        let verbatim = text(self.chars, self.tree, node);
        let is_combo = self.tree.node(node).rule == RuleTag::AuthorshipCombo;

        let original_authorship_node = self
            .tree
            .child_of(node, RuleTag::OriginalAuthorship)
            .expect("Authorship/AuthorshipCombo always wraps an OriginalAuthorship");
        let orig_group = self
            .tree
            .child_of(original_authorship_node, RuleTag::AuthorsGroup)
            .expect("OriginalAuthorship always wraps an AuthorsGroup");
        let orig_year = self.tree.child_of(original_authorship_node, RuleTag::Year);

        // A bare Year sitting directly under AuthorshipCombo (not nested in
        // either team) means the source wrote the year outside the parens.
        let outside_year = if is_combo {
            self.tree.child_of(node, RuleTag::Year)
        } else {
            None
        };
        if outside_year.is_some() {
            self.warn(Warning::BasionymYearOutsideParens);
        }

        let original = self.team_with_year(orig_group, orig_year.or(outside_year));
        let original_ex = self.sub_team(orig_group, RuleTag::AuthorEx);
        let original_emend = self.sub_team(orig_group, RuleTag::AuthorEmend);

        let combination = if is_combo {
            self.tree.child_of(node, RuleTag::CombinationAuthorship).map(|comb_node| {
                let comb_group = self
                    .tree
                    .child_of(comb_node, RuleTag::AuthorsGroup)
                    .expect("CombinationAuthorship always wraps an AuthorsGroup");
                let comb_year = self.tree.child_of(comb_node, RuleTag::Year);
                self.team_with_year(comb_group, comb_year)
            })
        } else {
            None
        };

        if is_combo {
            let open_count = verbatim.matches('(').count();
            let close_count = verbatim.matches(')').count();
            if open_count != close_count {
                self.warn(Warning::MisformedParens);
            }
            if verbatim.contains("))") {
                self.warn(Warning::DoubleParensAuthorship);
            }
        }

        let normalized = render_authorship(&original, combination.as_ref());

        Authorship { normalized, verbatim, original, original_ex, original_emend, combination }
    }
}

fn render_team(team: &Team) -> String {
    if team.authors.is_empty() {
        return String::new();
    }
    let mut parts = Vec::new();
    for (i, a) in team.authors.iter().enumerate() {
        if i == 0 {
            parts.push(a.normalized.clone());
        } else if i == team.authors.len() - 1 {
            parts.push(format!("& {}", a.normalized));
        } else {
            parts.push(format!(", {}", a.normalized));
        }
    }
    let mut rendered = parts.join(" ");
    if team.et_al {
        rendered.push_str(" et al.");
    }
    if let Some(y) = &team.year {
        rendered.push(' ');
        rendered.push_str(&y.value);
    }
    rendered
}

fn render_authorship(original: &Team, combination: Option<&Team>) -> String {
    match combination {
        Some(comb) => format!("({}) {}", render_team(original), render_team(comb)),
        None => render_team(original),
    }
}

/// Genus/species/infraspecific text extraction for `NameSpecies`, shared by
/// canonical-form assembly and `Details::Species`/`Infraspecies`.
struct SpeciesParts {
    genus: String,
    species: String,
    infraspecific: Vec<(Option<String>, String)>,
    authorship: Option<Authorship>,
    cultivar: Option<String>,
}

impl LiftCtx<'_> {
    fn genus_word_text(&mut self, genus_node: NodeId) -> String {
        let cap_or_two = self
            .tree
            .children(genus_node)
            .next()
            .expect("GenusWord always wraps a CapWord or TwoLetterGenus");
        self.push_word(cap_or_two, WordType::Genus);
        let verbatim = text(self.chars, self.tree, cap_or_two);
        let normalized = normalize_word(&verbatim, WordType::Genus, self.cfg.with_preserve_diaereses);
        if self.cfg.with_capitalize && verbatim.chars().next().is_some_and(|c| c.is_lowercase()) {
            self.capitalized_genus = true;
            self.warn(Warning::CapitalizationWarn);
            return capitalize_first(&normalized);
        }
        normalized
    }

    fn infrasp_epithet_parts(&mut self, node: NodeId) -> (Option<String>, String, Option<Authorship>) {
        let rank = self
            .tree
            .child_of(node, RuleTag::Rank)
            .map(|r| {
                self.push_word(r, WordType::Rank);
                text(self.chars, self.tree, r)
            })
            .or_else(|| {
                self.tree.child_of(node, RuleTag::UnknownRank).map(|r| {
                    self.push_word(r, WordType::Rank);
                    self.warn(Warning::UnknownRank);
                    text(self.chars, self.tree, r)
                })
            });
        let epithet_node = self
            .tree
            .child_of(node, RuleTag::SpeciesEpithet)
            .expect("InfraspEpithet always wraps a SpeciesEpithet");
        self.push_word(epithet_node, WordType::InfraspEpithet);
        let verbatim = text(self.chars, self.tree, epithet_node);
        let normalized = normalize_word(&verbatim, WordType::InfraspEpithet, self.cfg.with_preserve_diaereses);
        let authorship = self
            .tree
            .children(node)
            .find(|c| matches!(self.tree.node(*c).rule, RuleTag::Authorship | RuleTag::AuthorshipCombo))
            .map(|a| self.authorship(a));
        (rank, normalized, authorship)
    }

    fn species_parts(&mut self, species_node: NodeId) -> SpeciesParts {
        let genus_node = self
            .tree
            .child_of(species_node, RuleTag::GenusWord)
            .expect("NameSpecies always wraps a GenusWord");
        let genus = self.genus_word_text(genus_node);

        if let Some(sg) = self.tree.child_of(species_node, RuleTag::SubGenus) {
            if let Some(inner) = self.tree.children(sg).next() {
                self.push_word(inner, WordType::SubGenus);
            }
        }

        let epithet_node = self
            .tree
            .child_of(species_node, RuleTag::SpeciesEpithet)
            .expect("NameSpecies always wraps a direct SpeciesEpithet");
        self.push_word(epithet_node, WordType::SpEpithet);
        let sp_verbatim = text(self.chars, self.tree, epithet_node);
        let species = normalize_word(&sp_verbatim, WordType::SpEpithet, self.cfg.with_preserve_diaereses);

        let authorship = self
            .tree
            .children(species_node)
            .find(|c| matches!(self.tree.node(*c).rule, RuleTag::Authorship | RuleTag::AuthorshipCombo))
            .map(|a| self.authorship(a));

        let mut infraspecific = Vec::new();
        if let Some(group) = self.tree.child_of(species_node, RuleTag::InfraspGroup) {
            for epithet_node in self.tree.children_of(group, RuleTag::InfraspEpithet) {
                let (rank, normalized, infra_authorship) = self.infrasp_epithet_parts(epithet_node);
                infraspecific.push((rank, normalized));
                // An infraspecific epithet's own authorship, if any, is
                // recorded on the last one only at the species level: the
                // grammar allows each epithet its own authorship, but the
                // output model carries a single `authorship` field, so the
                // deepest one wins.
                if infra_authorship.is_some() {
                    return SpeciesParts {
                        genus,
                        species,
                        infraspecific,
                        authorship: infra_authorship,
                        cultivar: self.cultivar_text(species_node),
                    };
                }
            }
        }

        SpeciesParts {
            genus,
            species,
            infraspecific,
            authorship,
            cultivar: self.cultivar_text(species_node),
        }
    }

    fn cultivar_text(&mut self, species_node: NodeId) -> Option<String> {
        let cv = self.tree.child_of(species_node, RuleTag::Cultivar)?;
        self.push_word(cv, WordType::Cultivar);
        Some(text(self.chars, self.tree, cv))
    }
}

fn build_full_simple(genus: &str, species: &str, infraspecific: &[(Option<String>, String)]) -> (String, String) {
    let mut full = format!("{genus} {species}");
    let mut simple = full.clone();
    for (rank, epithet) in infraspecific {
        if let Some(r) = rank {
            full.push(' ');
            full.push_str(r);
        }
        full.push(' ');
        full.push_str(epithet);
        simple.push(' ');
        simple.push_str(epithet);
    }
    (full, simple)
}

fn build_stemmed(simple: &str) -> String {
    simple
        .split(' ')
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_string() } else { stem_epithet(w) })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace runs and apply the diacritic/apostrophe policy over
/// an already HTML-cleaned string, per `spec.md` §3's definition of
/// `normalized` ("input with spacing/punctuation/diacritic normalization
/// applied").
fn build_normalized(clean: &str, preserve_diaereses: bool) -> String {
    clean
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(|c| normalize_apostrophe(normalize_char(c, preserve_diaereses)))
        .collect()
}

/// The single public entry point for C2: lift a completed recognizer pass
/// into the output model. `verbatim` is the exact, untouched string the
/// caller passed to `parse`; `clean` is the HTML-stripped string that was
/// actually fed to `grammar::recognize` (identical to `verbatim` unless
/// `keep_html_tags` is off and the input carried tags/entities).
pub fn lift(
    verbatim: &str,
    clean: &str,
    html_stripped: bool,
    recognized: RecognizedName,
    cfg: &ParserConfig,
) -> ParsedName {
    let chars: Vec<char> = clean.chars().collect();
    let id = uuid_gen::derive(verbatim);

    let root = match recognized.root {
        Some(r) => r,
        None => {
            tracing::debug!("lift: grammar produced no root, returning unparsed result");
            return ParsedName::unparsed(verbatim.to_string(), id);
        }
    };

    let mut ctx = LiftCtx {
        chars: &chars,
        tree: &recognized.tree,
        cfg,
        warnings: IndexSet::new(),
        words: Vec::new(),
        capitalized_genus: false,
    };

    if html_stripped {
        ctx.warn(Warning::HtmlTagsRemoved);
    }

    let name_node = ctx
        .tree
        .child_of(root, RuleTag::Name)
        .expect("SciName always wraps a Name");
    let name_child = ctx
        .tree
        .children(name_node)
        .next()
        .expect("Name always wraps exactly one alternative");

    let (details, canonical, authorship): (Details, Option<Canonical>, Option<Authorship>) =
        match ctx.tree.node(name_child).rule {
            RuleTag::SingleName => {
                let inner = ctx
                    .tree
                    .children(name_child)
                    .next()
                    .expect("SingleName always wraps exactly one alternative");
                match ctx.tree.node(inner).rule {
                    RuleTag::NameUninomial => {
                        let word_wrap = ctx
                            .tree
                            .child_of(inner, RuleTag::UninomialWord)
                            .expect("NameUninomial always wraps a UninomialWord");
                        let cap_or_two = ctx.tree.children(word_wrap).next().unwrap();
                        let verbatim_word = text(&chars, &recognized.tree, cap_or_two);
                        ctx.push_word(cap_or_two, WordType::Genus);
                        let mut uninomial =
                            normalize_word(&verbatim_word, WordType::Genus, cfg.with_preserve_diaereses);
                        if ctx.cfg.with_capitalize
                            && verbatim_word.chars().next().is_some_and(|c| c.is_lowercase())
                        {
                            ctx.capitalized_genus = true;
                            ctx.warn(Warning::CapitalizationWarn);
                            uninomial = capitalize_first(&uninomial);
                        }

                        let auth = ctx
                            .tree
                            .children(inner)
                            .find(|c| {
                                matches!(
                                    ctx.tree.node(*c).rule,
                                    RuleTag::Authorship | RuleTag::AuthorshipCombo
                                )
                            })
                            .map(|a| ctx.authorship(a));

                        let full = uninomial.clone();
                        let stemmed = build_stemmed(&full);
                        (
                            Details::Uninomial { uninomial: uninomial.clone() },
                            Some(Canonical { simple: full.clone(), full, stemmed }),
                            auth,
                        )
                    }
                    RuleTag::NameSpecies => {
                        let parts = ctx.species_parts(inner);
                        let (full, simple) = build_full_simple(&parts.genus, &parts.species, &parts.infraspecific);
                        let stemmed = build_stemmed(&simple);
                        let details = if parts.infraspecific.is_empty() {
                            Details::Species { genus: parts.genus.clone(), species: parts.species.clone() }
                        } else {
                            Details::Infraspecies {
                                genus: parts.genus.clone(),
                                species: parts.species.clone(),
                                infraspecific: parts
                                    .infraspecific
                                    .iter()
                                    .map(|(_, e)| e.clone())
                                    .collect(),
                            }
                        };
                        let _ = parts.cultivar;
                        (details, Some(Canonical { simple, full, stemmed }), parts.authorship)
                    }
                    RuleTag::NameComp => {
                        let genus_node = ctx.tree.child_of(inner, RuleTag::GenusWord).unwrap();
                        let genus = ctx.genus_word_text(genus_node);
                        if let Some(c) = ctx.tree.child_of(inner, RuleTag::Comparison) {
                            ctx.push_word(c, WordType::Comparison);
                        }
                        let species = ctx.tree.child_of(inner, RuleTag::SpeciesEpithet).map(|e| {
                            ctx.push_word(e, WordType::SpEpithet);
                            let v = text(&chars, &recognized.tree, e);
                            normalize_word(&v, WordType::SpEpithet, cfg.with_preserve_diaereses)
                        });
                        let simple = match &species {
                            Some(s) => format!("{genus} {s}"),
                            None => genus.clone(),
                        };
                        let stemmed = build_stemmed(&simple);
                        (
                            Details::Comparison { genus: genus.clone(), species: species.clone() },
                            Some(Canonical { simple: simple.clone(), full: simple, stemmed }),
                            None,
                        )
                    }
                    RuleTag::NameApprox => {
                        let genus_node = ctx.tree.child_of(inner, RuleTag::GenusWord).unwrap();
                        let genus = ctx.genus_word_text(genus_node);
                        let species = ctx.tree.child_of(inner, RuleTag::SpeciesEpithet).map(|e| {
                            ctx.push_word(e, WordType::SpEpithet);
                            let v = text(&chars, &recognized.tree, e);
                            normalize_word(&v, WordType::SpEpithet, cfg.with_preserve_diaereses)
                        });
                        if let Some(m) = ctx.tree.child_of(inner, RuleTag::ApproxMarker) {
                            ctx.push_word(m, WordType::ApproxMarker);
                        }
                        (
                            Details::Approximation { genus, species },
                            None,
                            None,
                        )
                    }
                    other => unreachable!("SingleName alternative not handled: {other:?}"),
                }
            }
            RuleTag::NamedGenusHybrid => {
                let marker = ctx.tree.child_of(name_child, RuleTag::HybridChar).unwrap();
                ctx.push_word(marker, WordType::HybridChar);
                let uninomial_name = ctx.tree.child_of(name_child, RuleTag::NameUninomial).unwrap();
                let word_wrap = ctx.tree.child_of(uninomial_name, RuleTag::UninomialWord).unwrap();
                let cap_or_two = ctx.tree.children(word_wrap).next().unwrap();
                ctx.push_word(cap_or_two, WordType::Genus);
                let verbatim_word = text(&chars, &recognized.tree, cap_or_two);
                let uninomial = normalize_word(&verbatim_word, WordType::Genus, cfg.with_preserve_diaereses);
                let full = format!("\u{00D7}{uninomial}");
                let stemmed = build_stemmed(&uninomial);
                (
                    Details::NamedHybrid { name: full.clone() },
                    Some(Canonical { simple: uninomial, full, stemmed }),
                    None,
                )
            }
            RuleTag::NamedSpeciesHybrid => {
                let genus_node = ctx.tree.child_of(name_child, RuleTag::GenusWord).unwrap();
                let genus = ctx.genus_word_text(genus_node);
                let marker = ctx.tree.child_of(name_child, RuleTag::HybridChar).unwrap();
                ctx.push_word(marker, WordType::HybridChar);
                let epithet_node = ctx.tree.child_of(name_child, RuleTag::SpeciesEpithet).unwrap();
                ctx.push_word(epithet_node, WordType::SpEpithet);
                let sp_verbatim = text(&chars, &recognized.tree, epithet_node);
                let species = normalize_word(&sp_verbatim, WordType::SpEpithet, cfg.with_preserve_diaereses);
                let full = format!("{genus} \u{00D7} {species}");
                let simple = format!("{genus} {species}");
                let stemmed = build_stemmed(&simple);
                (
                    Details::NamedHybrid { name: full.clone() },
                    Some(Canonical { simple, full, stemmed }),
                    None,
                )
            }
            RuleTag::HybridFormula => {
                let mut part_texts = Vec::new();
                for single in ctx.tree.children_of(name_child, RuleTag::SingleName) {
                    let inner = ctx.tree.children(single).next().unwrap();
                    let t = text(&chars, &recognized.tree, inner);
                    part_texts.push(t);
                }
                for marker in ctx.tree.children_of(name_child, RuleTag::HybridChar) {
                    ctx.push_word(marker, WordType::HybridChar);
                }
                let full = part_texts.join(" \u{00D7} ");
                let simple = full.clone();
                let stemmed = build_stemmed(&simple);
                (
                    Details::HybridFormula { parts: part_texts },
                    Some(Canonical { simple, full, stemmed }),
                    None,
                )
            }
            other => unreachable!("Name alternative not handled: {other:?}"),
        };

    let tail_node = ctx.tree.child_of(root, RuleTag::Tail);
    if let Some(t) = tail_node {
        if !ctx.tree.node(t).span.is_empty() {
            ctx.warn(Warning::SpaceNonStandard);
        }
    }

    let cardinality = match &details {
        Details::Uninomial { .. } => 1,
        Details::Species { .. } | Details::Comparison { .. } | Details::Approximation { .. } => 2,
        Details::Infraspecies { infraspecific, .. } => 2 + infraspecific.len() as u32,
        Details::HybridFormula { parts } => parts.len() as u32,
        Details::NamedHybrid { .. } => 1,
    };

    let year = authorship.as_ref().and_then(|a| {
        a.original
            .year
            .as_ref()
            .or_else(|| a.combination.as_ref().and_then(|c| c.year.as_ref()))
            .map(|y| y.value.clone())
    });

    let quality = quality::score(&ctx.warnings, ctx.capitalized_genus);
    if !ctx.warnings.is_empty() {
        tracing::debug!("lift: {} warning(s), quality={quality}", ctx.warnings.len());
    }

    ParsedName {
        verbatim: verbatim.to_string(),
        normalized: build_normalized(clean, cfg.with_preserve_diaereses),
        canonical,
        cardinality,
        authorship,
        year,
        quality,
        warnings: ctx.warnings,
        details: if cfg.with_details { Some(details) } else { None },
        words: ctx.words,
        id,
    }
}
