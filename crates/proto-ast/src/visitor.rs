//! C2: AST Ancestor Tracker.
//!
//! Maintains the ordered path from the root to the node currently being
//! visited during a top-down walk, without requiring nodes to carry parent
//! pointers.

use crate::ast::Ast;
use crate::node::NodeId;

/// An ordered sequence `[root, child, grandchild, …, leaf]` of node ids.
///
/// The root is always the tree's `File` node (§3 invariant: "The AST path
/// is a prefix of the actual parent chain in the tree").
pub type AncestorPath = Vec<NodeId>;

/// Walks `ast` top-down from its root, invoking `visit` with the current
/// ancestor path (including the node itself as the last element) at every
/// node.
///
/// `visit` returning `false` skips descending into that node's children
/// (used by callers that only care about recognized scope kinds and want to
/// avoid needless recursion into leaves).
pub fn walk(ast: &Ast, mut visit: impl FnMut(&AncestorPath) -> bool) {
    let mut path = Vec::new();
    walk_from(ast, ast.root(), &mut path, &mut visit);
}

fn walk_from(
    ast: &Ast,
    id: NodeId,
    path: &mut AncestorPath,
    visit: &mut impl FnMut(&AncestorPath) -> bool,
) {
    path.push(id);
    let descend = visit(path);
    if descend {
        for &child in ast.children(id) {
            walk_from(ast, child, path, visit);
        }
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstBuilder;
    use crate::node::NodeKind;
    use proto_position_tracking::ByteSpan;

    #[test]
    fn visits_in_preorder_with_full_ancestor_path() {
        let mut b = AstBuilder::new();
        let name = b.push_leaf(NodeKind::Ident, ByteSpan::new(8, 11), "Foo");
        let message = b.push(NodeKind::Message, ByteSpan::new(0, 14), vec![name]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 14), vec![message]);
        let ast = b.build(file);

        let mut seen = Vec::new();
        walk(&ast, |path| {
            seen.push(path.clone());
            true
        });

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], vec![file]);
        assert_eq!(seen[1], vec![file, message]);
        assert_eq!(seen[2], vec![file, message, name]);
    }

    #[test]
    fn skipping_descent_prunes_subtree() {
        let mut b = AstBuilder::new();
        let name = b.push_leaf(NodeKind::Ident, ByteSpan::new(8, 11), "Foo");
        let message = b.push(NodeKind::Message, ByteSpan::new(0, 14), vec![name]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 14), vec![message]);
        let ast = b.build(file);

        let mut count = 0;
        walk(&ast, |path| {
            count += 1;
            path.last() != Some(&message)
        });
        assert_eq!(count, 2); // file, message — name pruned
    }
}
