//! `NameUninomial`: a single capitalized word (optionally followed by
//! authorship), the fallback alternative tried last in `SingleName`.

use super::authorship::authorship;
use super::cursor::Cursor;
use super::tree::{NodeId, RuleTag, Tree};
use super::words::{cap_word, push_word, two_letter_genus};
use crate::base::CharSpan;
use crate::config::ParserConfig;

pub fn name_uninomial(cur: &mut Cursor, tree: &mut Tree, cfg: &ParserConfig) -> Option<NodeId> {
    let start = cur.pos();

    let word_node = if let Some((s, e, _capitalized)) = cap_word(cur, cfg) {
        push_word(tree, RuleTag::CapWord, s, e)
    } else if let Some((s, e)) = two_letter_genus(cur) {
        push_word(tree, RuleTag::TwoLetterGenus, s, e)
    } else {
        return None;
    };

    let uninomial_word = tree.push(
        RuleTag::UninomialWord,
        tree.node(word_node).span,
        vec![word_node],
    );
    let mut children = vec![uninomial_word];

    let save = cur.pos();
    if cur.eat_space() {
        if let Some(auth) = authorship(cur, tree) {
            children.push(auth);
        } else {
            cur.restore(save);
        }
    }

    Some(tree.push(
        RuleTag::NameUninomial,
        CharSpan::new(start as u32, cur.pos() as u32),
        children,
    ))
}
