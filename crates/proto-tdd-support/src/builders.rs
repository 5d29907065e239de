//! A thin convenience layer over [`proto_ast::AstBuilder`] for fixtures that
//! need "a node with a named `Name` child" without repeating the
//! push-then-`set_named_child` pair at every call site.

use proto_ast::{AstBuilder, NamedChild, NodeId, NodeKind};
use proto_position_tracking::ByteSpan;

/// Builds a node of `kind` whose [`NamedChild::Name`] is a fresh `Ident`
/// leaf carrying `name`, with `extra_children` appended after it.
pub fn named_node(
    builder: &mut AstBuilder,
    kind: NodeKind,
    span: ByteSpan,
    name: &str,
    name_span: ByteSpan,
    extra_children: Vec<NodeId>,
) -> NodeId {
    let ident = builder.push_leaf(NodeKind::Ident, name_span, name);
    let mut children = vec![ident];
    children.extend(extra_children);
    let node = builder.push(kind, span, children);
    builder.set_named_child(node, NamedChild::Name, ident);
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_node_exposes_its_ident_as_the_name_child() {
        let mut b = AstBuilder::new();
        let message = named_node(&mut b, NodeKind::Message, ByteSpan::new(0, 10), "Widget", ByteSpan::new(8, 14), vec![]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 10), vec![message]);
        let ast = b.build(file);
        let name = ast.node(message).named_child(NamedChild::Name);
        assert_eq!(name.and_then(|id| ast.node(id).text.clone()), Some("Widget".to_string()));
    }
}
