//! Enclosing-Range Visitor (C5, §4.4/§4.5's notion of "the token range").

use proto_ast::{walk, AncestorPath, Ast};
use proto_position_tracking::ByteSpan;

/// Returns every ancestor path whose innermost node is a recognized scope
/// kind that fully covers `range`, trimmed to the deepest covering per
/// branch — a path that is a strict prefix of another covering path in the
/// result is dropped. Non-scope leaves (bare `Ident`s and the like) never
/// become candidates, matching [`crate::path_intersecting_location`]'s
/// notion of which nodes are meaningful stopping points.
pub fn enclosing_ranges(ast: &Ast, range: ByteSpan) -> Vec<AncestorPath> {
    let mut candidates: Vec<AncestorPath> = Vec::new();
    walk(ast, |path| {
        let Some(&id) = path.last() else {
            return true;
        };
        if ast.kind(id).is_scope_kind() {
            let span = ast.span(id);
            let end_exclusive = ast.end_exclusive(id).max(span.start);
            if span.start <= range.start && range.end <= end_exclusive {
                candidates.push(path.clone());
            }
        }
        true
    });

    candidates
        .iter()
        .filter(|candidate| {
            !candidates.iter().any(|other| other.len() > candidate.len() && other.starts_with(candidate.as_slice()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_ast::{AstBuilder, NodeKind};

    #[test]
    fn keeps_only_the_deepest_covering_path() {
        let mut b = AstBuilder::new();
        let name = b.push_leaf(NodeKind::Ident, ByteSpan::new(8, 11), "Bar");
        let field = b.push(NodeKind::Field, ByteSpan::new(8, 15), vec![name]);
        let msg = b.push(NodeKind::Message, ByteSpan::new(0, 20), vec![field]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 20), vec![msg]);
        let ast = b.build(file);

        let result = enclosing_ranges(&ast, ByteSpan::new(9, 10));
        assert_eq!(result, vec![vec![file, msg, field]]);
    }

    #[test]
    fn range_not_covered_by_anything_returns_empty() {
        let mut b = AstBuilder::new();
        let file = b.push(NodeKind::File, ByteSpan::new(0, 5), vec![]);
        let ast = b.build(file);
        assert!(enclosing_ranges(&ast, ByteSpan::new(10, 12)).is_empty());
    }
}
