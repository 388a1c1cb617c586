//! Batch pipeline (C4) invariants: ordered output matches the sequential
//! baseline, unordered output matches it as a multiset.

use sciname_parser::batch::{run, CancelToken};
use sciname_parser::{parse, ConfigBuilder, ParserConfig};

fn lines(items: &[&str]) -> Vec<std::io::Result<String>> {
    items.iter().map(|s| Ok(s.to_string())).collect()
}

const INPUTS: &[&str] = &[
    "Pardosa moesta Banks, 1892",
    "Bubo bubo",
    "Homo sapiens Linnaeus, 1758",
    "Canis lupus",
    "Abarema clypearia (Jack) Kosterm.",
];

#[test]
fn ordered_mode_equals_sequential_parse() {
    let cfg = ConfigBuilder::new().jobs_num(3).batch_size(2).build().unwrap();
    let baseline: Vec<_> = INPUTS.iter().map(|s| parse(s, &cfg).canonical).collect();

    let rx = run(lines(INPUTS), &cfg, CancelToken::new());
    let out: Vec<_> = rx
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
        .into_iter()
        .map(|n| n.canonical)
        .collect();

    assert_eq!(out, baseline);
}

#[test]
fn unordered_mode_is_the_same_multiset() {
    let cfg = ConfigBuilder::new()
        .jobs_num(4)
        .batch_size(2)
        .with_no_order(true)
        .build()
        .unwrap();
    let mut baseline: Vec<_> = INPUTS
        .iter()
        .map(|s| parse(s, &ParserConfig::default()).verbatim)
        .collect();
    baseline.sort();

    let rx = run(lines(INPUTS), &cfg, CancelToken::new());
    let mut out: Vec<_> = rx
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
        .into_iter()
        .map(|n| n.verbatim)
        .collect();
    out.sort();

    assert_eq!(out, baseline);
}

#[test]
fn streaming_mode_processes_every_input() {
    let cfg = ConfigBuilder::new().with_stream(true).build().unwrap();
    let rx = run(lines(INPUTS), &cfg, CancelToken::new());
    let out: Vec<_> = rx.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(out.len(), INPUTS.len());
}

#[test]
fn io_error_from_the_reader_is_surfaced() {
    let cfg = ParserConfig::default();
    let mut input = lines(&["Bubo bubo"]);
    input.push(Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "bad line")));
    let rx = run(input, &cfg, CancelToken::new());
    let results: Vec<_> = rx.into_iter().collect();
    assert!(results.iter().any(|r| r.is_err()));
}
