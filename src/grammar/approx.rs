//! `NameApprox = GenusWord (_ SpeciesEpithet)? _ Approximation ...` and
//! `NameComp = GenusWord _ Comparison (_ SpeciesEpithet)?`, the two
//! "incomplete identification" name shapes, per `spec.md` §4.1.
//!
//! Grounded on `examples/original_source/grammar/grammar.peg.go`'s
//! `NameApprox`, `NameComp`, `Approximation` and `Comparison` productions.

use super::cursor::Cursor;
use super::tree::{NodeId, RuleTag, Tree};
use super::vocab::{APPROX_MARKERS, COMP_MARKERS};
use super::words::{cap_word, lower_word, push_word, two_letter_genus};
use crate::base::CharSpan;
use crate::config::ParserConfig;

fn genus_word(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    let (s, e) = if let Some((s, e, _)) = cap_word(cur, cfg) {
        (s, e)
    } else if let Some((s, e)) = two_letter_genus(cur) {
        (s, e)
    } else {
        return None;
    };
    let word = push_word(tree, RuleTag::CapWord, s, e);
    Some(tree.push(RuleTag::GenusWord, CharSpan::new(start as u32, e as u32), vec![word]))
}

/// Longest-match lookup against a closed marker vocabulary, anchored at the
/// cursor's current position.
fn match_marker(cur: &mut Cursor, markers: &[&str]) -> Option<(usize, usize, &'static str)> {
    let start = cur.pos();
    let mut best: Option<&'static str> = None;
    for m in markers {
        if cur.starts_with(m) {
            if best.map_or(true, |b| m.len() > b.len()) {
                best = Some(m);
            }
        }
    }
    let m = best?;
    for _ in 0..m.chars().count() {
        cur.bump();
    }
    Some((start, cur.pos(), m))
}

/// `NameApprox`: a genus, optional species epithet, an approximation
/// marker (`sp.`, `cf.` family excluded — see `NameComp`), then the rest of
/// the input is consumed verbatim as `ApproxNameIgnored`.
pub fn name_approx(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    let genus = genus_word(cur, tree, cfg)?;
    let mut children = vec![genus];

    let save = cur.pos();
    if cur.eat_space() {
        if let Some((es, ee)) = lower_word(cur) {
            children.push(push_word(tree, RuleTag::SpeciesEpithet, es, ee));
        } else {
            cur.restore(save);
        }
    }

    if !cur.eat_space() {
        cur.restore(start);
        return None;
    }

    let (ms, me, _marker) = match match_marker(cur, APPROX_MARKERS) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    children.push(tree.push(RuleTag::ApproxMarker, CharSpan::new(ms as u32, me as u32), vec![]));

    // ApproxNameIgnored: the remainder of the input is not re-parsed.
    let tail_start = cur.pos();
    while cur.peek().is_some() {
        cur.bump();
    }
    if cur.pos() > tail_start {
        children.push(tree.push(
            RuleTag::Word,
            CharSpan::new(tail_start as u32, cur.pos() as u32),
            vec![],
        ));
    }

    Some(tree.push(
        RuleTag::NameApprox,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}

/// `NameComp`: a genus, a `cf.`-family comparison marker, then an optional
/// species epithet (no authorship — a comparison name is inherently
/// tentative).
pub fn name_comp(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    let genus = genus_word(cur, tree, cfg)?;
    let mut children = vec![genus];

    if !cur.eat_space() {
        cur.restore(start);
        return None;
    }

    let (ms, me, _marker) = match match_marker(cur, COMP_MARKERS) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    children.push(tree.push(RuleTag::Comparison, CharSpan::new(ms as u32, me as u32), vec![]));

    let save = cur.pos();
    if cur.eat_space() {
        if let Some((es, ee)) = lower_word(cur) {
            children.push(push_word(tree, RuleTag::SpeciesEpithet, es, ee));
        } else {
            cur.restore(save);
        }
    }

    Some(tree.push(
        RuleTag::NameComp,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_approx_with_species() {
        let chars: Vec<char> = "Bubo sp. nr. virginianus".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut tree = Tree::new();
        let cfg = ParserConfig::default();
        let node = name_approx(&mut cur, &mut tree, &cfg);
        assert!(node.is_some());
        assert_eq!(tree.node(node.unwrap()).rule, RuleTag::NameApprox);
    }

    #[test]
    fn recognizes_comp_without_species() {
        let chars: Vec<char> = "Bubo cf.".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut tree = Tree::new();
        let cfg = ParserConfig::default();
        let node = name_comp(&mut cur, &mut tree, &cfg);
        assert!(node.is_some());
        assert_eq!(tree.node(node.unwrap()).rule, RuleTag::NameComp);
    }

    #[test]
    fn rejects_comp_without_marker() {
        let chars: Vec<char> = "Bubo virginianus".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut tree = Tree::new();
        let cfg = ParserConfig::default();
        assert!(name_comp(&mut cur, &mut tree, &cfg).is_none());
    }
}
