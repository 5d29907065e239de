//! Definition Locator (C7, §4.4).

use proto_ast::{Ast, NamedChild, NodeId};
use proto_descriptor::{Descriptor, LinkResult};
use proto_diagnostics::ResolveError;

/// Resolves `descriptor` to the AST node a goto-definition request should
/// land the cursor on: the declaration's `Name` child where one exists, the
/// file's root node for [`Descriptor::File`].
///
/// Fails with [`ResolveError::NoSource`] when `link` is a placeholder (§4.4
/// "navigation calls on a placeholder always fail closed") or when
/// `descriptor` has no declaration in this file at all — a descriptor
/// resolved only through a binary-imported pool entry has no source to jump
/// to.
pub fn find_definition(
    ast: &Ast,
    link: &dyn LinkResult,
    descriptor: &Descriptor,
) -> Result<NodeId, ResolveError> {
    if link.is_placeholder() {
        return Err(ResolveError::NoSource);
    }

    let declaration = link.find_declaration_node(descriptor).ok_or(ResolveError::NoSource)?;

    if matches!(descriptor, Descriptor::File(_)) {
        return Ok(declaration);
    }

    Ok(ast.node(declaration).named_child(NamedChild::Name).unwrap_or(declaration))
}
