//! Path-Intersecting-Location Finder (C4, §4.2).

use proto_ast::{walk, Ast, AncestorPath, NamedChild, NodeKind};
use proto_position_tracking::ByteSpan;

/// Walks `ast` top-down and returns the longest ancestor path whose
/// innermost node is a recognized scope kind containing `offset` in its
/// half-open `[start, endExclusive)` range. Ties are broken by the last
/// (deepest) path encountered.
///
/// Message-literal fields get one extra special case: a caret sitting
/// exactly on the `:` separator falls between the field-reference child's
/// span and the value's span, so neither naturally contains it; when the
/// longest match lands on the enclosing `MessageField` for this reason, the
/// path is extended one level to the `FieldReference` child so completions
/// and hovers on the key still resolve (§4.2).
pub fn path_intersecting_location(ast: &Ast, offset: usize) -> Option<AncestorPath> {
    let mut best: Option<AncestorPath> = None;
    walk(ast, |path| {
        let Some(&id) = path.last() else {
            return true;
        };
        if ast.kind(id).is_scope_kind() {
            let span = ast.span(id);
            let end_exclusive = ast.end_exclusive(id).max(span.start);
            let range = ByteSpan::new(span.start, end_exclusive);
            if range.contains(offset) && best.as_ref().is_none_or(|b| path.len() >= b.len()) {
                best = Some(path.clone());
            }
        }
        true
    });

    let best = best?;
    let Some(&leaf) = best.last() else {
        return Some(best);
    };
    if ast.kind(leaf) == NodeKind::MessageField
        && let Some(field_ref) = ast.node(leaf).named_child(NamedChild::Name).filter(|&c| ast.kind(c) == NodeKind::FieldReference)
            .or_else(|| ast.children(leaf).iter().copied().find(|&c| ast.kind(c) == NodeKind::FieldReference))
        && offset >= ast.span(field_ref).end
    {
        let mut amended = best.clone();
        amended.push(field_ref);
        return Some(amended);
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_ast::AstBuilder;

    #[test]
    fn finds_deepest_covering_scope_kind() {
        let mut b = AstBuilder::new();
        let name = b.push_leaf(NodeKind::Ident, ByteSpan::new(8, 11), "Bar");
        let field = b.push(NodeKind::Field, ByteSpan::new(8, 15), vec![name]);
        let msg = b.push(NodeKind::Message, ByteSpan::new(0, 20), vec![field]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 20), vec![msg]);
        let ast = b.build(file);

        let path = path_intersecting_location(&ast, 9).unwrap();
        assert_eq!(ast.kind(*path.last().unwrap()), NodeKind::Field);
        assert_eq!(path, vec![file, msg, field]);
    }

    #[test]
    fn colon_on_message_field_resolves_to_field_reference() {
        let mut b = AstBuilder::new();
        let field_ref = b.push(NodeKind::FieldReference, ByteSpan::new(1, 4), vec![]);
        // the ':' sits at offset 4, between field_ref's end and the value's start
        let value = b.push(NodeKind::IntLiteral, ByteSpan::new(6, 7), vec![]);
        let msg_field = b.push(NodeKind::MessageField, ByteSpan::new(1, 7), vec![field_ref, value]);
        let literal = b.push(NodeKind::MessageLiteral, ByteSpan::new(0, 8), vec![msg_field]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 8), vec![literal]);
        let ast = b.build(file);

        let path = path_intersecting_location(&ast, 4).unwrap();
        assert_eq!(ast.kind(*path.last().unwrap()), NodeKind::FieldReference);
    }

    #[test]
    fn no_scope_kind_containing_offset_returns_none() {
        let mut b = AstBuilder::new();
        let file = b.push(NodeKind::File, ByteSpan::new(0, 0), vec![]);
        let ast = b.build(file);
        assert!(path_intersecting_location(&ast, 100).is_none());
    }
}
