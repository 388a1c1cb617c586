//! `NameSpecies = GenusWord (_ SubGenus)? _ SpeciesEpithet (_ InfraspGroup)?`
//! and the infraspecific chain, per `spec.md` §4.1.

use super::authorship::authorship;
use super::cursor::Cursor;
use super::tree::{NodeId, RuleTag, Tree};
use super::vocab::match_rank;
use super::words::{cap_word, lower_word, push_word, two_letter_genus};
use crate::base::CharSpan;
use crate::config::ParserConfig;

fn genus_word(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    let (s, e) = if let Some((s, e, _cap)) = cap_word(cur, cfg) {
        (s, e)
    } else if let Some((s, e)) = two_letter_genus(cur) {
        (s, e)
    } else {
        return None;
    };
    let _ = start;
    let word = push_word(tree, RuleTag::CapWord, s, e);
    Some(tree.push(RuleTag::GenusWord, CharSpan::new(s as u32, e as u32), vec![word]))
}

/// `SubGenus = '(' CapWord ')'` — appears between genus and species epithet.
fn subgenus(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    if cur.peek() != Some('(') {
        return None;
    }
    cur.bump();
    let (s, e, _cap) = match cap_word(cur, cfg) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    if cur.peek() != Some(')') {
        cur.restore(start);
        return None;
    }
    cur.bump();
    let word = push_word(tree, RuleTag::CapWord, s, e);
    Some(tree.push(RuleTag::SubGenus, CharSpan::new(start as u32, cur.pos() as u32), vec![word]))
}

fn bare_rank_word(cur: &mut Cursor) -> Option<(usize, usize, &'static str, bool)> {
    let start = cur.pos();
    let mut len = 0;
    while matches!(cur.peek(), Some(c) if c.is_ascii_alphabetic()) {
        cur.bump();
        len += 1;
    }
    if cur.peek() == Some('.') {
        cur.bump();
        len += 1;
    }
    if len == 0 {
        return None;
    }
    let text: String = cur.chars()[start..start + len].iter().collect();
    match match_rank(&text) {
        Some((tok, notho)) => Some((start, cur.pos(), tok, notho)),
        None => {
            cur.restore(start);
            None
        }
    }
}

/// A rank-shaped token (alpha run + optional trailing `.`) regardless of
/// whether it is in the closed rank vocabulary. Used only as a lookahead
/// candidate when `bare_rank_word` fails to match a known token.
fn any_rank_shaped_word(cur: &mut Cursor) -> Option<(usize, usize)> {
    let start = cur.pos();
    let mut len = 0;
    while matches!(cur.peek(), Some(c) if c.is_ascii_alphabetic()) {
        cur.bump();
        len += 1;
    }
    if cur.peek() == Some('.') {
        cur.bump();
        len += 1;
    }
    if len == 0 {
        cur.restore(start);
        return None;
    }
    Some((start, cur.pos()))
}

/// Non-consuming lookahead: does a lower-case epithet word follow here?
fn peek_lower_word(cur: &mut Cursor) -> bool {
    let save = cur.pos();
    let found = lower_word(cur).is_some();
    cur.restore(save);
    found
}

/// One infraspecific epithet: optional rank token, the epithet itself, and
/// an optional authorship of its own.
fn infrasp_epithet(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();
    let mut children = vec![];

    let save = cur.pos();
    if let Some((rs, re, _tok, _notho)) = bare_rank_word(cur) {
        if cur.eat_space() {
            children.push(push_word(tree, RuleTag::Rank, rs, re));
        } else {
            cur.restore(save);
        }
    } else if let Some((rs, re)) = any_rank_shaped_word(cur) {
        // Occupies rank position (followed by an epithet word) but is not
        // in the closed rank vocabulary: keep it, flagged for the lifter
        // to raise `Warning::UnknownRank`, rather than misreading it as
        // the epithet itself.
        if cur.eat_space() && peek_lower_word(cur) {
            children.push(push_word(tree, RuleTag::UnknownRank, rs, re));
        } else {
            cur.restore(save);
        }
    }

    let (es, ee) = match lower_word(cur) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    children.push(push_word(tree, RuleTag::SpeciesEpithet, es, ee));

    let save = cur.pos();
    if cur.eat_space() {
        if let Some(a) = authorship(cur, tree) {
            children.push(a);
        } else {
            cur.restore(save);
        }
    }

    Some(tree.push(
        RuleTag::InfraspEpithet,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}

/// `InfraspGroup`: one to three successive infraspecific epithets.
fn infrasp_group(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();
    let mut children = vec![infrasp_epithet(cur, tree)?];

    for _ in 0..2 {
        let save = cur.pos();
        if !cur.eat_space() {
            break;
        }
        match infrasp_epithet(cur, tree) {
            Some(n) => children.push(n),
            None => {
                cur.restore(save);
                break;
            }
        }
    }

    Some(tree.push(
        RuleTag::InfraspGroup,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}

/// `Cultivar`: a single-quoted cultivar epithet, recognized only when
/// `with_cultivars` is enabled (`spec.md` §6).
fn cultivar(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    if !cfg.with_cultivars {
        return None;
    }
    let start = cur.pos();
    if cur.peek() != Some('\'') {
        return None;
    }
    cur.bump();
    let inner_start = cur.pos();
    while matches!(cur.peek(), Some(c) if c != '\'') {
        cur.bump();
    }
    if cur.peek() != Some('\'') {
        cur.restore(start);
        return None;
    }
    let inner_end = cur.pos();
    cur.bump();
    if inner_end == inner_start {
        cur.restore(start);
        return None;
    }
    Some(tree.push(
        RuleTag::Cultivar,
        CharSpan::new(start as u32, cur.pos() as u32),
        vec![],
    ))
}

pub fn name_species(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();
    let genus = genus_word(cur, tree, cfg)?;
    let mut children = vec![genus];

    let save = cur.pos();
    if cur.eat_space() {
        if let Some(sg) = subgenus(cur, tree, cfg) {
            children.push(sg);
        } else {
            cur.restore(save);
        }
    }

    if !cur.eat_space() {
        cur.restore(start);
        return None;
    }

    let (es, ee) = match lower_word(cur) {
        Some(v) => v,
        None => {
            cur.restore(start);
            return None;
        }
    };
    children.push(push_word(tree, RuleTag::SpeciesEpithet, es, ee));

    let save = cur.pos();
    if cur.eat_space() {
        if let Some(a) = authorship(cur, tree) {
            children.push(a);
        } else {
            cur.restore(save);
        }
    }

    let save = cur.pos();
    if cur.eat_space() {
        if let Some(ig) = infrasp_group(cur, tree) {
            children.push(ig);
        } else {
            cur.restore(save);
        }
    }

    let save = cur.pos();
    if cur.eat_space() {
        if let Some(cv) = cultivar(cur, tree, cfg) {
            children.push(cv);
        } else {
            cur.restore(save);
        }
    } else if let Some(cv) = cultivar(cur, tree, cfg) {
        children.push(cv);
    }
    let _ = save;

    Some(tree.push(
        RuleTag::NameSpecies,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}
