//! Authorship grammar: `Authorship = AuthorshipCombo | OriginalAuthorship`,
//! author teams, `ex`/`emend` qualifiers, years, and the recoverable
//! mis-formed-basionym variants `spec.md` §4.1 calls out.
//!
//! Grounded on `examples/original_source/grammar/grammar.peg.go`'s
//! `Authorship*`, `Author*`, `Year*` productions.

use super::charclass::{is_apostrophe, is_lower_char, is_upper_char};
use super::cursor::Cursor;
use super::tree::{NodeId, RuleTag, Tree};
use super::vocab::{match_glued_prefix, match_spaced_prefix, UNKNOWN_AUTHOR_MARKERS};
use crate::base::CharSpan;

fn push(tree: &mut Tree, rule: RuleTag, start: usize, end: usize, children: Vec<NodeId>) -> NodeId {
    tree.push(rule, CharSpan::new(start as u32, end as u32), children)
}

/// `Year`: optional enclosing bracket, 4 digits, optional trailing letter,
/// optional `?`, optional `-` range, optional closing bracket.
pub fn year(cur: &mut Cursor) -> Option<(usize, usize)> {
    let start = cur.pos();
    let opened = matches!(cur.peek(), Some('[') | Some('('));
    if opened {
        cur.bump();
    }
    for _ in 0..4 {
        match cur.peek() {
            Some(c) if c.is_ascii_digit() => {
                cur.bump();
            }
            _ => {
                cur.restore(start);
                return None;
            }
        }
    }
    if matches!(cur.peek(), Some(c) if c.is_ascii_lowercase()) {
        cur.bump();
    }
    if cur.peek() == Some('?') {
        cur.bump();
    }
    if cur.peek() == Some('-') {
        let save = cur.pos();
        cur.bump();
        let mut n = 0;
        while matches!(cur.peek(), Some(c) if c.is_ascii_digit()) && n < 4 {
            cur.bump();
            n += 1;
        }
        if n == 0 {
            cur.restore(save);
        }
    }
    if opened {
        if matches!(cur.peek(), Some(']') | Some(')')) {
            cur.bump();
        }
    }
    Some((start, cur.pos()))
}

fn year_node(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let (s, e) = year(cur)?;
    Some(push(tree, RuleTag::Year, s, e, vec![]))
}

/// A single author name: optional prefix (spaced or glued), a capitalized
/// core, optional trailing `f.` (filius) suffix; or an unknown-author
/// marker (`auct.`, `anon.`).
fn author(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();

    for marker in UNKNOWN_AUTHOR_MARKERS {
        if cur.eat_literal(marker) {
            return Some(push(tree, RuleTag::UnknownAuthor, start, cur.pos(), vec![]));
        }
    }

    // Spaced prefix: a lower-case word followed by mandatory whitespace,
    // drawn from the closed AUTHOR_PREFIX_SPACED vocabulary.
    let pre_save = cur.pos();
    let word_start = cur.pos();
    let mut len = 0;
    while matches!(cur.peek(), Some(c) if is_lower_char(c) || c == '.') {
        cur.bump();
        len += 1;
    }
    let prefix_word: String = cur.chars()[word_start..word_start + len].iter().collect();
    let had_prefix = len > 0 && match_spaced_prefix(&prefix_word) && cur.peek() == Some(' ');
    if !had_prefix {
        cur.restore(pre_save);
    } else {
        cur.eat_space();
    }

    // Glued prefix: d' O' L' directly attached to the capitalized core.
    let remaining: String = cur.chars()[cur.pos()..].iter().collect();
    if let Some(glued) = match_glued_prefix(&remaining) {
        cur.restore(cur.pos() + glued.chars().count());
    }

    let core_start = cur.pos();
    match cur.peek() {
        Some(c) if is_upper_char(c) => {
            cur.bump();
        }
        _ => {
            cur.restore(start);
            return None;
        }
    }
    loop {
        match cur.peek() {
            Some(c) if is_lower_char(c) || is_upper_char(c) || c == '.' || is_apostrophe(c) => {
                cur.bump();
            }
            Some('-') => {
                cur.bump();
            }
            _ => break,
        }
    }
    if cur.pos() == core_start {
        cur.restore(start);
        return None;
    }

    // Optional filius suffix: " f." right after the core word.
    let before_suffix = cur.pos();
    let has_suffix = {
        let save = cur.pos();
        cur.eat_space();
        let ok = cur.eat_literal("f.");
        if !ok {
            cur.restore(save);
        }
        ok
    };
    if !has_suffix {
        cur.restore(before_suffix);
    }

    Some(push(tree, RuleTag::Author, start, cur.pos(), vec![]))
}

/// `AuthorsTeam`: `author ((", " | " & " | " et " | " and ") author)*`,
/// optionally terminated by `et al.`.
fn authors_team(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();
    let mut authors = vec![author(cur, tree)?];

    loop {
        let save = cur.pos();
        let sep_matched = cur.eat_literal(", ")
            || cur.eat_literal(" & ")
            || cur.eat_literal(" et ")
            || cur.eat_literal(" and ")
            || cur.eat_literal(" in ");
        if !sep_matched {
            break;
        }
        if cur.eat_literal("al.") {
            let et_al_start = save;
            authors.push(push(tree, RuleTag::AuthorSuffix, et_al_start, cur.pos(), vec![]));
            break;
        }
        match author(cur, tree) {
            Some(a) => authors.push(a),
            None => {
                cur.restore(save);
                break;
            }
        }
    }

    Some(push(tree, RuleTag::AuthorsTeam, start, cur.pos(), authors))
}

/// `AuthorsGroup`: a team, plus optional ` ex ` and ` emend ` teams.
fn authors_group(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();
    let main = authors_team(cur, tree)?;
    let mut children = vec![main];

    let save = cur.pos();
    if cur.eat_literal(" ex ") {
        if let Some(ex_team) = authors_team(cur, tree) {
            children.push(push(tree, RuleTag::AuthorEx, save, cur.pos(), vec![ex_team]));
        } else {
            cur.restore(save);
        }
    }

    let save = cur.pos();
    if cur.eat_literal(" emend. ") || cur.eat_literal(" emend ") {
        if let Some(emend_team) = authors_team(cur, tree) {
            children.push(push(tree, RuleTag::AuthorEmend, save, cur.pos(), vec![emend_team]));
        } else {
            cur.restore(save);
        }
    }

    Some(push(tree, RuleTag::AuthorsGroup, start, cur.pos(), children))
}

/// `OriginalAuthorship = AuthorsGroup (_ Year)?`.
fn original_authorship(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();
    let group = authors_group(cur, tree)?;
    let mut children = vec![group];

    let save = cur.pos();
    cur.eat_space();
    if cur.peek() == Some(',') {
        cur.bump();
        cur.eat_space();
    }
    if let Some(y) = year_node(cur, tree) {
        children.push(y);
    } else {
        cur.restore(save);
    }

    Some(push(tree, RuleTag::OriginalAuthorship, start, cur.pos(), children))
}

/// `Authorship = AuthorshipCombo | OriginalAuthorship`.
///
/// `AuthorshipCombo` tolerates the recoverable mis-formed variants named in
/// `spec.md` §4.1: an opening paren with no matching close, a close paren
/// with no matching open, and a doubled close paren. These are not flagged
/// here — the structural shape (an unbalanced paren count, or a bare `Year`
/// node sitting directly under `AuthorshipCombo` rather than nested in one
/// of its teams) is enough for the semantic lifter to recognize them and
/// attach the right warning.
pub fn authorship(cur: &mut Cursor, tree: &mut Tree) -> Option<NodeId> {
    let start = cur.pos();

    if cur.peek() == Some('(') {
        cur.bump();
        cur.eat_space();
        if let Some(orig) = original_authorship(cur, tree) {
            cur.eat_space();
            let mut children = vec![orig];
            if cur.peek() == Some(')') {
                cur.bump();
                if cur.peek() == Some(')') {
                    cur.bump(); // doubled close paren, tolerated
                }
            }
            cur.eat_space();

            // A bare year directly after the parens belongs to the
            // original authorship but was written outside it.
            if let Some(y) = year_node(cur, tree) {
                children.push(y);
                cur.eat_space();
            }

            if let Some(comb_group) = authors_group(cur, tree) {
                let comb_start = tree.node(comb_group).span.start as usize;
                let mut comb_children = vec![comb_group];
                let save = cur.pos();
                cur.eat_space();
                if cur.peek() == Some(',') {
                    cur.bump();
                    cur.eat_space();
                }
                if let Some(y) = year_node(cur, tree) {
                    comb_children.push(y);
                } else {
                    cur.restore(save);
                }
                children.push(push(
                    tree,
                    RuleTag::CombinationAuthorship,
                    comb_start,
                    cur.pos(),
                    comb_children,
                ));
            }

            return Some(push(tree, RuleTag::AuthorshipCombo, start, cur.pos(), children));
        }
        cur.restore(start);
    }

    // Lenient: missing opening paren, e.g. `Jack) Kosterm.`
    if let Some(orig) = original_authorship(cur, tree) {
        let save = cur.pos();
        cur.eat_space();
        if cur.peek() == Some(')') {
            cur.bump();
            cur.eat_space();
            let mut children = vec![orig];
            if let Some(comb_group) = authors_group(cur, tree) {
                let comb_start = tree.node(comb_group).span.start as usize;
                children.push(push(
                    tree,
                    RuleTag::CombinationAuthorship,
                    comb_start,
                    cur.pos(),
                    vec![comb_group],
                ));
            }
            return Some(push(tree, RuleTag::AuthorshipCombo, start, cur.pos(), children));
        }
        cur.restore(save);
        // plain original authorship, no combination
        return Some(push(
            tree,
            RuleTag::Authorship,
            start,
            cur.pos(),
            vec![orig],
        ));
    }

    cur.restore(start);
    None
}
