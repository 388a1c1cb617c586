//! Low-level word productions shared by uninomials, epithets and author
//! names: `CapWord`, `TwoLetterGenus`, lower-case epithet words, and
//! apostrophe handling.

use super::charclass::{is_apostrophe, is_dash, is_lower_char, is_upper_char};
use super::cursor::Cursor;
use super::tree::RuleTag;
use super::vocab::is_two_letter_genus;
use crate::base::CharSpan;
use crate::config::ParserConfig;

/// A capitalized word of at least 3 characters: `UpperChar LowerChar{2,}`,
/// with an internal dash allowed (`Smith-Jones`).
///
/// When `cfg.with_capitalize` is set, a lower-case first letter is also
/// accepted here; the caller (the genus production) is responsible for
/// noting that capitalization was applied.
pub fn cap_word(cur: &mut Cursor, cfg: &ParserConfig) -> Option<(usize, usize, bool)> {
    let start = cur.pos();
    let first = cur.peek()?;
    let capitalized_by_us;
    if is_upper_char(first) {
        capitalized_by_us = false;
        cur.bump();
    } else if cfg.with_capitalize && first.is_ascii_lowercase() {
        // Capitalization only applies to a plain ASCII first letter: a
        // word whose apparent "genus" starts with a diacritic is far more
        // likely to be ordinary lower-case prose than a mis-cased genus.
        capitalized_by_us = true;
        cur.bump();
    } else {
        return None;
    }

    let mut count = 1;
    loop {
        match cur.peek() {
            Some(c) if is_lower_char(c) => {
                cur.bump();
                count += 1;
            }
            Some(c) if is_dash(c) => {
                // A dash must be followed by another letter to belong to the word.
                let save = cur.pos();
                cur.bump();
                match cur.peek() {
                    Some(c2) if is_lower_char(c2) || is_upper_char(c2) => continue,
                    _ => {
                        cur.restore(save);
                        break;
                    }
                }
            }
            _ => break,
        }
    }

    if count < 3 {
        cur.restore(start);
        return None;
    }
    Some((start, cur.pos(), capitalized_by_us))
}

/// `TwoLetterGenus`: one of the 18 whitelisted two-character genera.
pub fn two_letter_genus(cur: &mut Cursor) -> Option<(usize, usize)> {
    let start = cur.pos();
    let c1 = cur.peek()?;
    if !is_upper_char(c1) {
        return None;
    }
    let save = cur.pos();
    cur.bump();
    let c2 = match cur.peek() {
        Some(c) => c,
        None => {
            cur.restore(save);
            return None;
        }
    };
    let candidate: String = [c1, c2].iter().collect();
    if is_two_letter_genus(&candidate) {
        cur.bump();
        Some((start, cur.pos()))
    } else {
        cur.restore(start);
        None
    }
}

/// A lower-case word (species/infraspecific epithet): `LowerChar{2,}`, with
/// apostrophes and internal dashes allowed (`grandi-folia`, `o'donnelli`).
pub fn lower_word(cur: &mut Cursor) -> Option<(usize, usize)> {
    let start = cur.pos();
    let mut count = 0;
    loop {
        match cur.peek() {
            Some(c) if is_lower_char(c) => {
                cur.bump();
                count += 1;
            }
            Some(c) if is_apostrophe(c) => {
                cur.bump();
            }
            Some(c) if is_dash(c) => {
                let save = cur.pos();
                cur.bump();
                match cur.peek() {
                    Some(c2) if is_lower_char(c2) => continue,
                    _ => {
                        cur.restore(save);
                        break;
                    }
                }
            }
            _ => break,
        }
    }
    if count < 2 {
        cur.restore(start);
        return None;
    }
    Some((start, cur.pos()))
}

pub fn push_word(tree: &mut super::tree::Tree, rule: RuleTag, start: usize, end: usize) -> super::tree::NodeId {
    tree.push(rule, CharSpan::new(start as u32, end as u32), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_word_requires_three_chars() {
        let chars: Vec<char> = "Bubo".chars().collect();
        let mut cur = Cursor::new(&chars);
        let cfg = ParserConfig::default();
        assert_eq!(cap_word(&mut cur, &cfg), Some((0, 4, false)));
    }

    #[test]
    fn two_letter_genus_whitelist() {
        let chars: Vec<char> = "Aa".chars().collect();
        let mut cur = Cursor::new(&chars);
        assert_eq!(two_letter_genus(&mut cur), Some((0, 2)));

        let chars: Vec<char> = "Bb".chars().collect();
        let mut cur = Cursor::new(&chars);
        assert_eq!(two_letter_genus(&mut cur), None);
    }

    #[test]
    fn lowercase_genus_only_with_capitalize() {
        let chars: Vec<char> = "bubo".chars().collect();
        let mut cur = Cursor::new(&chars);
        let mut cfg = ParserConfig::default();
        assert_eq!(cap_word(&mut cur, &cfg), None);
        cfg.with_capitalize = true;
        cur.restore(0);
        assert_eq!(cap_word(&mut cur, &cfg), Some((0, 4, true)));
    }
}
