//! `Name = NamedHybrid | HybridFormula | SingleName`: the hybrid-marker
//! alternatives tried before the plain name, per `spec.md` §4.1.
//!
//! Grounded on `examples/original_source/grammar/grammar.peg.go`'s
//! `NamedHybrid`, `NamedGenusHybrid`, `NamedSpeciesHybrid`, `HybridFormula`
//! and `HybridChar` productions.

use super::cursor::Cursor;
use super::species::name_species;
use super::tree::{NodeId, RuleTag, Tree};
use super::uninomial::name_uninomial;
use super::vocab::HYBRID_CHAR;
use crate::base::CharSpan;
use crate::config::ParserConfig;

fn hybrid_char(cur: &mut Cursor) -> Option<(usize, usize)> {
    let start = cur.pos();
    if cur.peek() == Some(HYBRID_CHAR) {
        cur.bump();
        Some((start, cur.pos()))
    } else {
        None
    }
}

/// `NamedGenusHybrid = HybridChar _? NameUninomial`: the `×` stands alone as
/// a marker in front of a single genus-rank name.
fn named_genus_hybrid(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    let (hs, he) = hybrid_char(cur)?;
    cur.eat_space();
    let uninomial = match name_uninomial(cur, tree, cfg) {
        Some(n) => n,
        None => {
            cur.restore(start);
            return None;
        }
    };
    let marker = tree.push(RuleTag::HybridChar, CharSpan::new(hs as u32, he as u32), vec![]);
    Some(tree.push(
        RuleTag::NamedGenusHybrid,
        CharSpan::new(start as u32, cur.pos() as u32),
        vec![marker, uninomial],
    ))
}

/// `NamedSpeciesHybrid = GenusWord _ HybridChar _? SpeciesEpithet...`: the
/// `×` sits between genus and species epithet of an otherwise ordinary
/// species name. Implemented by parsing the plain species production first,
/// then requiring the marker was already consumed as part of it — instead
/// we special-case the marker position directly, mirroring the source
/// grammar's own structure rather than reusing `name_species` wholesale.
fn named_species_hybrid(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    use super::words::{cap_word, push_word, two_letter_genus};

    let start = cur.pos();
    let genus_start = cur.pos();
    let (gs, ge) = if let Some((s, e, _)) = cap_word(cur, cfg) {
        (s, e)
    } else if let Some((s, e)) = two_letter_genus(cur) {
        (s, e)
    } else {
        return None;
    };
    let genus_word_node = push_word(tree, RuleTag::CapWord, gs, ge);
    let genus = tree.push(
        RuleTag::GenusWord,
        CharSpan::new(genus_start as u32, ge as u32),
        vec![genus_word_node],
    );

    if !cur.eat_space() {
        cur.restore(start);
        return None;
    }
    let (hs, he) = match hybrid_char(cur) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    cur.eat_space();
    let marker = tree.push(RuleTag::HybridChar, CharSpan::new(hs as u32, he as u32), vec![]);

    let (es, ee) = match super::words::lower_word(cur) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    let epithet = push_word(tree, RuleTag::SpeciesEpithet, es, ee);

    Some(tree.push(
        RuleTag::NamedSpeciesHybrid,
        CharSpan::new(start as u32, cur.pos() as u32),
        vec![genus, marker, epithet],
    ))
}

/// `NamedHybrid = NamedGenusHybrid | NamedSpeciesHybrid`.
pub fn named_hybrid(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    if let Some(n) = named_genus_hybrid(cur, tree, cfg) {
        return Some(n);
    }
    cur.restore(start);
    named_species_hybrid(cur, tree, cfg)
}

/// `HybridFormula = SingleName (_ (HybridChar _? SingleName))+`: two or more
/// full names joined by standalone `×` tokens, e.g. `Salix alba × Salix
/// fragilis`.
pub fn hybrid_formula(
    cur: &mut Cursor,
    tree: &mut Tree,
    cfg: &ParserConfig,
    single_name: impl Fn(&mut Cursor, &mut Tree, &ParserConfig) -> Option<NodeId>,
) -> Option<NodeId> {
    let start = cur.pos();
    let first = single_name(cur, tree, cfg)?;
    let mut children = vec![first];
    let mut parts = 0;

    loop {
        let save = cur.pos();
        if !cur.eat_space() {
            break;
        }
        let (hs, he) = match hybrid_char(cur) {
            Some(v) => v,
            None => {
                cur.restore(save);
                break;
            }
        };
        cur.eat_space();
        let part_start = cur.pos();
        match single_name(cur, tree, cfg) {
            Some(next) => {
                let marker =
                    tree.push(RuleTag::HybridChar, CharSpan::new(hs as u32, he as u32), vec![]);
                children.push(marker);
                children.push(next);
                parts += 1;
                let _ = part_start;
            }
            None => {
                cur.restore(save);
                break;
            }
        }
    }

    if parts == 0 {
        cur.restore(start);
        return None;
    }

    Some(tree.push(
        RuleTag::HybridFormula,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tree::Tree;

    #[test]
    fn recognizes_named_genus_hybrid() {
        let chars: Vec<char> = "×Triticosecale".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut tree = Tree::new();
        let cfg = ParserConfig::default();
        let node = named_hybrid(&mut cur, &mut tree, &cfg);
        assert!(node.is_some());
        assert_eq!(tree.node(node.unwrap()).rule, RuleTag::NamedGenusHybrid);
    }

    #[test]
    fn recognizes_named_species_hybrid() {
        let chars: Vec<char> = "Polypodium × vulgare".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut tree = Tree::new();
        let cfg = ParserConfig::default();
        let node = named_hybrid(&mut cur, &mut tree, &cfg);
        assert!(node.is_some());
        assert_eq!(tree.node(node.unwrap()).rule, RuleTag::NamedSpeciesHybrid);
    }

    #[test]
    fn recognizes_hybrid_formula() {
        let chars: Vec<char> = "Salix alba × Salix fragilis".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut tree = Tree::new();
        let cfg = ParserConfig::default();
        let node = hybrid_formula(&mut cur, &mut tree, &cfg, |c, t, cfg| name_species(c, t, cfg));
        assert!(node.is_some());
        assert_eq!(tree.node(node.unwrap()).rule, RuleTag::HybridFormula);
    }
}
