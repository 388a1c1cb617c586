//! The parse tree produced by the recognizer (C1): a flat arena of
//! `{rule_tag, begin, end}` triples addressed by integer index, per
//! `spec.md` §9 and grounded on
//! `examples/original_source/grammar/grammar.peg.go`'s `token32 { pegRule,
//! begin, end, index }` representation (the generated-PEG convention this
//! spec's grammar was distilled from).
//!
//! Unlike the Go source's flat token list (which must reconstruct nesting
//! from span containment at AST-build time), each [`Node`] here also
//! records its direct children as a range into a second flat array
//! (`Tree::child_pool`). This keeps the "array/arena addressed by index,
//! not linked pointers" property the design note asks for, while making the
//! semantic lifter's tree walk (`semantic::lift`) a plain index lookup
//! instead of a span-nesting reconstruction pass.

use crate::base::CharSpan;

/// Grammar rule tags, named after the productions in
/// `grammar.peg.go` where a corresponding production exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum RuleTag {
    SciName,
    Tail,
    Name,
    HybridFormula,
    HybridFormulaPart,
    NamedHybrid,
    NamedGenusHybrid,
    NamedSpeciesHybrid,
    SingleName,
    NameUninomial,
    NameApprox,
    NameComp,
    NameSpecies,
    GenusWord,
    SubGenus,
    InfraspGroup,
    InfraspEpithet,
    SpeciesEpithet,
    Rank,
    UnknownRank,
    Comparison,
    ApproxMarker,
    HybridChar,
    UninomialWord,
    CapWord,
    TwoLetterGenus,
    Word,
    Cultivar,
    GraftChimera,
    Authorship,
    AuthorshipCombo,
    OriginalAuthorship,
    CombinationAuthorship,
    BasionymAuthorship,
    AuthorsGroup,
    AuthorsTeam,
    AuthorSep,
    AuthorEx,
    AuthorEmend,
    Author,
    AuthorWord,
    AuthorPrefix,
    UnknownAuthor,
    AuthorSuffix,
    Year,
    YearChar,
    YearApprox,
    YearRange,
    YearPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
pub struct Node {
    pub rule: RuleTag,
    pub span: CharSpan,
    /// Half-open range into [`Tree::child_pool`] of this node's direct children.
    children: (u32, u32),
}

impl Node {
    pub fn text(&self, chars: &[char]) -> String {
        self.span.to_string(chars)
    }
}

/// The flat parse-tree arena. One instance is produced per parse call and
/// consumed once by the semantic lifter.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    child_pool: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a completed node with the given already-built children.
    pub fn push(&mut self, rule: RuleTag, span: CharSpan, children: Vec<NodeId>) -> NodeId {
        let start = self.child_pool.len() as u32;
        self.child_pool.extend(children);
        let end = self.child_pool.len() as u32;
        self.nodes.push(Node {
            rule,
            span,
            children: (start, end),
        });
        NodeId((self.nodes.len() - 1) as u32)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let (s, e) = self.node(id).children;
        self.child_pool[s as usize..e as usize].iter().copied()
    }

    /// First direct child with the given rule tag, if any.
    pub fn child_of(&self, id: NodeId, rule: RuleTag) -> Option<NodeId> {
        self.children(id).find(|c| self.node(*c).rule == rule)
    }

    /// All direct children with the given rule tag, in order.
    pub fn children_of(&self, id: NodeId, rule: RuleTag) -> Vec<NodeId> {
        self.children(id).filter(|c| self.node(*c).rule == rule).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read_back() {
        let mut tree = Tree::new();
        let leaf = tree.push(RuleTag::CapWord, CharSpan::new(0, 5), vec![]);
        let parent = tree.push(RuleTag::GenusWord, CharSpan::new(0, 5), vec![leaf]);
        assert_eq!(tree.node(parent).rule, RuleTag::GenusWord);
        assert_eq!(tree.child_of(parent, RuleTag::CapWord), Some(leaf));
        assert_eq!(tree.children_of(parent, RuleTag::CapWord), vec![leaf]);
    }
}
