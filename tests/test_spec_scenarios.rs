//! End-to-end scenarios over the full C1+C2+C3 pipeline.

use sciname_parser::{parse, render, ConfigBuilder, Details, ParserConfig};

#[test]
fn plain_binomial_with_authorship_and_year() {
    let cfg = ParserConfig::default();
    let name = parse("Pardosa moesta Banks, 1892", &cfg);
    let canonical = name.canonical.as_ref().unwrap();
    assert_eq!(canonical.simple, "Pardosa moesta");
    assert_eq!(name.authorship.as_ref().unwrap().normalized, "Banks 1892");
    assert_eq!(name.year.as_deref(), Some("1892"));
    assert_eq!(name.cardinality, 2);
    assert_eq!(name.quality, 1);
}

#[test]
fn plain_binomial_without_authorship() {
    let cfg = ParserConfig::default();
    let name = parse("Bubo bubo", &cfg);
    let canonical = name.canonical.as_ref().unwrap();
    assert_eq!(canonical.simple, "Bubo bubo");
    assert!(name.authorship.is_none());
    assert_eq!(name.cardinality, 2);
    assert_eq!(name.quality, 1);
}

#[test]
fn with_details_populates_species_breakdown() {
    let cfg = ConfigBuilder::new().with_details(true).build().unwrap();
    let name = parse("Homo sapiens Linnaeus 1758", &cfg);
    match name.details.as_ref().unwrap() {
        Details::Species { genus, species } => {
            assert_eq!(genus, "Homo");
            assert_eq!(species, "sapiens");
        }
        other => panic!("expected Details::Species, got {other:?}"),
    }
    assert_eq!(name.authorship.as_ref().unwrap().normalized, "Linnaeus 1758");
}

#[test]
fn lowercase_genus_with_capitalize_reaches_top_quality() {
    let cfg = ConfigBuilder::new().with_capitalize(true).build().unwrap();
    let name = parse("pardosa moesta", &cfg);
    assert_eq!(name.canonical.as_ref().unwrap().simple, "Pardosa moesta");
    assert_eq!(name.quality, 4);
}

#[test]
fn diacritic_initial_still_fails_even_with_capitalize() {
    let cfg = ConfigBuilder::new().with_capitalize(true).build().unwrap();
    let name = parse("\u{fc}berweisen", &cfg);
    assert!(name.canonical.is_none());
    assert_eq!(name.quality, 0);
}

#[test]
fn preserve_diaereses_keeps_the_umlaut_in_canonical_simple() {
    let cfg = ConfigBuilder::new().with_preserve_diaereses(true).build().unwrap();
    let name = parse("Hieracium macilentum subsp. samo\u{eb}nsicum", &cfg);
    assert_eq!(
        name.canonical.as_ref().unwrap().simple,
        "Hieracium macilentum samo\u{eb}nsicum"
    );
    assert_eq!(name.quality, 1);
}

#[test]
fn basionym_combination_with_trailing_tail() {
    let cfg = ParserConfig::default();
    let name = parse("Abarema clypearia (Jack) Kosterm., p.p.", &cfg);
    assert_eq!(name.canonical.as_ref().unwrap().simple, "Abarema clypearia");
    let authorship = name.authorship.as_ref().unwrap();
    assert_eq!(authorship.original.authors.len(), 1);
    assert_eq!(authorship.original.authors[0].verbatim, "Jack");
    let combo = authorship.combination.as_ref().unwrap();
    assert_eq!(combo.authors[0].verbatim, "Kosterm.");
    assert!(!name.warnings.is_empty());
}

#[test]
fn csv_row_matches_the_literal_spec_fixture() {
    let cfg = ParserConfig::default();
    let name = parse("Pardosa moesta Banks, 1892", &cfg);
    let row = render::to_csv_row(&name);
    let expected_tail = ",\"Pardosa moesta Banks, 1892\",2,Pardosa moest,Pardosa moesta,Pardosa moesta,Banks 1892,1892,1";
    assert!(row.ends_with(expected_tail), "row was: {row}");
}

#[test]
fn verbatim_always_round_trips() {
    let cfg = ParserConfig::default();
    for input in [
        "Pardosa moesta Banks, 1892",
        "Bubo bubo",
        "   not a name at all   ",
        "\u{00D7}Aa",
    ] {
        assert_eq!(parse(input, &cfg).verbatim, input);
    }
}

#[test]
fn word_spans_are_monotonic_and_in_bounds() {
    let cfg = ParserConfig::default();
    let input = "Pardosa moesta Banks, 1892";
    let name = parse(input, &cfg);
    let len = input.chars().count() as u32;
    let mut last_end = 0u32;
    for w in &name.words {
        assert!(w.start < w.end);
        assert!(w.end <= len);
        assert!(w.start >= last_end);
        last_end = w.end;
    }
}

#[test]
fn stemmed_canonical_matches_the_stemming_function() {
    let cfg = ParserConfig::default();
    let name = parse("Pardosa moesta", &cfg);
    let canonical = name.canonical.as_ref().unwrap();
    let mut words: Vec<&str> = canonical.simple.split(' ').collect();
    for w in words.iter_mut().skip(1) {
        *w = Box::leak(sciname_parser::normalize::stem_epithet(w).into_boxed_str());
    }
    assert_eq!(words.join(" "), canonical.stemmed);
}

#[test]
fn id_is_stable_across_repeated_calls() {
    let cfg = ParserConfig::default();
    let first = parse("Canis lupus Linnaeus, 1758", &cfg);
    let second = parse("Canis lupus Linnaeus, 1758", &cfg);
    assert_eq!(first.id, second.id);
}

#[test]
fn html_wrapped_name_parses_after_preprocessing() {
    let cfg = ParserConfig::default();
    let raw = "<i>Pardosa moesta</i>";
    let name = parse(raw, &cfg);
    assert_eq!(name.verbatim, raw);
    assert_eq!(name.canonical.as_ref().unwrap().simple, "Pardosa moesta");
    assert_eq!(name.normalized, "Pardosa moesta");
    assert!(name.warnings.contains(&sciname_parser::semantic::Warning::HtmlTagsRemoved));
}

#[test]
fn keep_html_tags_leaves_input_unparsed() {
    let cfg = ConfigBuilder::new().keep_html_tags(true).build().unwrap();
    let name = parse("<i>Pardosa moesta</i>", &cfg);
    assert!(name.canonical.is_none());
    assert_eq!(name.quality, 0);
}

#[test]
fn normalized_applies_diacritic_policy_over_the_whole_string() {
    let cfg = ParserConfig::default();
    let name = parse("Hieracium samo\u{eb}nsicum", &cfg);
    assert_eq!(name.normalized, "Hieracium samoensicum");
}

#[test]
fn restore_ambiguous_preserves_normalized_but_fixes_verbatim() {
    let cfg = ConfigBuilder::new().with_details(true).build().unwrap();
    let mut name = parse("Homo sapiens", &cfg);
    let normalized_epithet = name
        .words
        .iter()
        .find(|w| w.word_type == sciname_parser::semantic::WordType::SpEpithet)
        .unwrap()
        .normalized
        .clone();
    name.restore_ambiguous(&normalized_epithet, "zapiens");
    let restored = name
        .words
        .iter()
        .find(|w| w.word_type == sciname_parser::semantic::WordType::SpEpithet)
        .unwrap();
    assert_eq!(restored.verbatim, "zapiens");
    assert_eq!(restored.normalized, normalized_epithet);
    assert_eq!(name.canonical.as_ref().unwrap().simple, "Homo sapiens");
}
