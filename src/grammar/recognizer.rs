//! Top-level recognizer entry point: `SciName = _? Name Tail !.`
//!
//! Grounded on `examples/original_source/grammar/grammar.peg.go`'s
//! `SciName`, `Tail`, `Name` and `SingleName` productions, and `spec.md`
//! §4.1's statement of the same ordered choices.

use super::approx::{name_approx, name_comp};
use super::cursor::Cursor;
use super::hybrid::{hybrid_formula, named_hybrid};
use super::species::name_species;
use super::tree::{NodeId, RuleTag, Tree};
use super::uninomial::name_uninomial;
use crate::base::CharSpan;
use crate::config::ParserConfig;

/// `SingleName = NameComp | NameApprox | NameSpecies | NameUninomial`,
/// tried in exactly this order (spec.md §4.1).
fn single_name(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    tracing::trace!("single_name: enter at {start}");

    if let Some(n) = name_comp(cur, tree, cfg) {
        tracing::trace!("single_name: matched NameComp, exit at {}", cur.pos());
        return Some(wrap(tree, n, start, cur.pos()));
    }
    cur.restore(start);

    if let Some(n) = name_approx(cur, tree, cfg) {
        tracing::trace!("single_name: matched NameApprox, exit at {}", cur.pos());
        return Some(wrap(tree, n, start, cur.pos()));
    }
    cur.restore(start);

    if let Some(n) = name_species(cur, tree, cfg) {
        tracing::trace!("single_name: matched NameSpecies, exit at {}", cur.pos());
        return Some(wrap(tree, n, start, cur.pos()));
    }
    cur.restore(start);

    if let Some(n) = name_uninomial(cur, tree, cfg) {
        tracing::trace!("single_name: matched NameUninomial, exit at {}", cur.pos());
        return Some(wrap(tree, n, start, cur.pos()));
    }
    cur.restore(start);
    tracing::trace!("single_name: no alternative matched at {start}");
    None
}

fn wrap(tree: &mut Tree, inner: NodeId, start: usize, end: usize) -> NodeId {
    tree.push(
        RuleTag::SingleName,
        CharSpan::new(start as u32, end as u32),
        vec![inner],
    )
}

/// `Name = NamedHybrid | HybridFormula | SingleName`, tried in exactly this
/// order: hybrid forms before the plain single form.
fn name(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();

    if let Some(n) = named_hybrid(cur, tree, cfg) {
        return Some(tree.push(RuleTag::Name, CharSpan::new(start as u32, cur.pos() as u32), vec![n]));
    }
    cur.restore(start);

    if let Some(n) = hybrid_formula(cur, tree, cfg, single_name) {
        return Some(tree.push(RuleTag::Name, CharSpan::new(start as u32, cur.pos() as u32), vec![n]));
    }
    cur.restore(start);

    if let Some(n) = single_name(cur, tree, cfg) {
        return Some(tree.push(RuleTag::Name, CharSpan::new(start as u32, cur.pos() as u32), vec![n]));
    }
    cur.restore(start);
    None
}

/// `Tail = ((_ | ';' | ',') .*)?` — trailing noise after the recognized
/// name is kept as a span, not re-parsed, and surfaced as a quality signal
/// by the semantic lifter (a non-empty tail means the input was not fully
/// consumed by the grammar).
fn tail(cur: &mut Cursor, tree: &mut Tree) -> NodeId {
    let start = cur.pos();
    let had_sep = cur.eat_space() || cur.peek() == Some(';') || cur.peek() == Some(',');
    if had_sep && !cur.at_end() {
        if matches!(cur.peek(), Some(';') | Some(',')) {
            cur.bump();
        }
        let (s, e) = cur.rest();
        let _ = s;
        return tree.push(RuleTag::Tail, CharSpan::new(start as u32, e as u32), vec![]);
    }
    tree.push(RuleTag::Tail, CharSpan::new(start as u32, start as u32), vec![])
}

/// Result of a single recognizer pass over one input.
pub struct RecognizedName {
    pub tree: Tree,
    /// The root `SciName` node, present only when the grammar fully
    /// matched a name (a `Name` was found; `Tail` may still carry
    /// unconsumed trailing text).
    pub root: Option<NodeId>,
    pub farthest: usize,
    pub farthest_rule: Option<RuleTag>,
}

/// `SciName = _? Name Tail !.`: the single public recognizer entry point.
/// Leading space is skipped; a `Name` must match; everything after it is
/// captured as `Tail` rather than required to be empty, since real-world
/// input routinely carries trailing punctuation or garbage the grammar
/// tolerates rather than rejects outright.
pub fn recognize(input: &str, cfg: &ParserConfig) -> RecognizedName {
    let chars: Vec<char> = input.chars().collect();
    let mut cur = Cursor::new(&chars);
    let mut tree = Tree::new();

    cur.eat_space();
    let name_node = name(&mut cur, &mut tree, cfg);

    let root = name_node.map(|n| {
        let tail_node = tail(&mut cur, &mut tree);
        tree.push(
            RuleTag::SciName,
            CharSpan::new(0, cur.pos() as u32),
            vec![n, tail_node],
        )
    });

    if root.is_none() {
        tracing::debug!(
            "recognize: no match, farthest={}, farthest_rule={:?}",
            cur.farthest(),
            cur.farthest_rule()
        );
    }

    RecognizedName {
        tree,
        root,
        farthest: cur.farthest(),
        farthest_rule: cur.farthest_rule(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_plain_binomial() {
        let cfg = ParserConfig::default();
        let r = recognize("Bubo bubo", &cfg);
        assert!(r.root.is_some());
        assert_eq!(r.tree.node(r.root.unwrap()).rule, RuleTag::SciName);
    }

    #[test]
    fn recognizes_uninomial_with_authorship() {
        let cfg = ParserConfig::default();
        let r = recognize("Bubo Linnaeus, 1758", &cfg);
        assert!(r.root.is_some());
    }

    #[test]
    fn captures_trailing_tail() {
        let cfg = ParserConfig::default();
        let r = recognize("Bubo bubo; some junk", &cfg);
        assert!(r.root.is_some());
        let root = r.root.unwrap();
        let tail_node = r.tree.child_of(root, RuleTag::Tail).unwrap();
        assert!(!r.tree.node(tail_node).span.is_empty());
    }

    #[test]
    fn ordered_choice_prefers_comp_over_species() {
        let cfg = ParserConfig::default();
        let r = recognize("Bubo cf. bubo", &cfg);
        assert!(r.root.is_some());
        let name_node = r.tree.child_of(r.root.unwrap(), RuleTag::Name).unwrap();
        let single = r.tree.child_of(name_node, RuleTag::SingleName).unwrap();
        let inner = r.tree.children(single).next().unwrap();
        assert_eq!(r.tree.node(inner).rule, RuleTag::NameComp);
    }
}
