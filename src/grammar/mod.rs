//! C1: the grammar recognizer. A hand-rolled recursive-descent PEG-style
//! parser producing a flat parse tree, ported in shape from
//! `examples/original_source/grammar/grammar.peg.go`'s generated-PEG
//! productions but restructured as plain Rust functions operating on
//! [`Cursor`](cursor::Cursor) and [`Tree`](tree::Tree).

mod approx;
mod authorship;
mod charclass;
mod cursor;
mod hybrid;
mod recognizer;
mod species;
mod tree;
mod uninomial;
mod vocab;
mod words;

pub use charclass::MISCODED_CHAR;
pub use cursor::Cursor;
pub use recognizer::{recognize, RecognizedName};
pub use tree::{Node, NodeId, RuleTag, Tree};
