//! The concrete-syntax-tree arena.

use crate::node::{NamedChild, Node, NodeId, NodeKind};
use proto_position_tracking::ByteSpan;

/// An arena-allocated concrete syntax tree for one `.proto` file.
///
/// The parser that populates an `Ast` is out of scope for this crate (§1);
/// `Ast` and [`AstBuilder`] only define the shape a parser's output (or a
/// hand-authored test fixture) takes.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> ByteSpan {
        self.node(id).span
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The end-exclusive range used by the path-intersecting-location finder
    /// (§4.2): up to but not including the node's terminator token, unless
    /// that terminator is virtual or absent, in which case the node's own
    /// inclusive span end is used instead.
    pub fn end_exclusive(&self, id: NodeId) -> usize {
        let node = self.node(id);
        match node.terminator() {
            Some((_, term_id)) => {
                let term = self.node(term_id);
                if term.virtual_rune { node.span.end } else { term.span.start }
            }
            None => node.span.end,
        }
    }
}

/// Builds an [`Ast`] node by node.
///
/// Used directly by hand-authored test fixtures (the parser itself is out
/// of scope) and is the shape a real parser would populate incrementally
/// while descending the grammar.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with no named children and returns its id.
    pub fn push(&mut self, kind: NodeKind, span: ByteSpan, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, span, children, named: Vec::new(), virtual_rune: false, text: None });
        id
    }

    /// Adds a leaf node carrying lexeme text (`Ident`, `StringLiteral`, …).
    pub fn push_leaf(&mut self, kind: NodeKind, span: ByteSpan, text: impl Into<String>) -> NodeId {
        let id = self.push(kind, span, Vec::new());
        self.nodes[id.0 as usize].text = Some(text.into());
        id
    }

    /// Adds a `Rune` node for a punctuation token, optionally marking it as
    /// inserted by error recovery.
    pub fn push_rune(&mut self, span: ByteSpan, virtual_rune: bool) -> NodeId {
        let id = self.push(NodeKind::Rune, span, Vec::new());
        self.nodes[id.0 as usize].virtual_rune = virtual_rune;
        id
    }

    pub fn set_named_child(&mut self, parent: NodeId, which: NamedChild, child: NodeId) {
        self.nodes[parent.0 as usize].set_named_child(which, child);
    }

    /// Finalizes the arena, designating `root` (which must be a `File`
    /// node) as the tree's root.
    pub fn build(self, root: NodeId) -> Ast {
        debug_assert_eq!(self.nodes[root.0 as usize].kind, NodeKind::File);
        Ast { nodes: self.nodes, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_exclusive_trims_real_terminator() {
        let mut b = AstBuilder::new();
        let semi = b.push_rune(ByteSpan::new(9, 10), false);
        let field = b.push(NodeKind::Field, ByteSpan::new(0, 10), vec![semi]);
        b.set_named_child(field, NamedChild::Semicolon, semi);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 10), vec![field]);
        let ast = b.build(file);
        assert_eq!(ast.end_exclusive(field), 9);
    }

    #[test]
    fn end_exclusive_falls_back_when_terminator_virtual() {
        let mut b = AstBuilder::new();
        let semi = b.push_rune(ByteSpan::new(9, 9), true);
        let field = b.push(NodeKind::Field, ByteSpan::new(0, 10), vec![semi]);
        b.set_named_child(field, NamedChild::Semicolon, semi);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 10), vec![field]);
        let ast = b.build(file);
        assert_eq!(ast.end_exclusive(field), 10);
    }

    #[test]
    fn end_exclusive_falls_back_when_no_terminator() {
        let mut b = AstBuilder::new();
        let field = b.push(NodeKind::Field, ByteSpan::new(0, 5), vec![]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 5), vec![field]);
        let ast = b.build(file);
        assert_eq!(ast.end_exclusive(field), 5);
    }
}
