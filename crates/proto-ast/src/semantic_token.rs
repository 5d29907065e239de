//! The flat semantic-token array consumed by the narrowest-token finder
//! (§4.1). Computing this array (syntax highlighting) is out of scope; the
//! core only consumes it as a position query input.

use crate::node::NodeId;

/// One entry of a sorted, flat semantic-token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticToken {
    pub line: u32,
    pub start_column: u32,
    pub length: u32,
    /// The AST node this token corresponds to, if any. Bare
    /// runes/punctuation carry `None` here even when they otherwise satisfy
    /// the other predicates.
    pub node: Option<NodeId>,
    /// The embedded-language tag (§4.1 requires `language == "proto"`); a
    /// string in preference to a bool to mirror multi-language host
    /// documents (e.g. proto embedded in a markdown code fence) the same
    /// way the source tags tokens.
    pub language: &'static str,
    /// Whether this token's node is bare punctuation and therefore
    /// excluded from resolution, per §4.1 ("node is not a bare
    /// rune/punctuation").
    pub is_punctuation: bool,
}

impl SemanticToken {
    pub fn end_column(&self) -> u32 {
        self.start_column + self.length
    }
}
