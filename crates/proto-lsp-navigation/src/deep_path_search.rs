//! Deep Path Search (C6, §4.3) — the resolver core.
//!
//! Translates an AST ancestor path into a linked descriptor plus the source
//! range to highlight, by scanning backward for an anchor (Phase A) and
//! then refining forward from that anchor to the leaf (Phase B).

use proto_ast::{AncestorPath, Ast, NodeId, NodeKind};
use proto_descriptor::{Descriptor, DescriptorProtoRef, LinkResult};
use proto_diagnostics::ResolveError;
use proto_position_tracking::ByteSpan;
use prost_reflect::Kind;

/// One entry in the resolution stack: a node and, once resolved, the
/// descriptor it anchors to.
///
/// Entries are kept in a plain `Vec` rather than as a linked list with a
/// `prev` pointer; [`nearest_resolved`] walks backward over the vector to
/// find the nearest already-resolved ancestor instead of following a
/// stored link (§9 "Stack with lazy parent resolution").
#[derive(Debug, Clone)]
pub struct StackEntry {
    pub node: NodeId,
    pub desc: Option<Descriptor>,
}

fn nearest_resolved(stack: &[StackEntry], before: usize) -> Option<&StackEntry> {
    stack[..before].iter().rev().find(|e| e.desc.is_some())
}

/// Runs the deep path search over `path`, returning the resolved descriptor
/// and the source range to highlight for it.
///
/// `offset` is the caret's byte offset within the source — needed to tell a
/// map type's key half from its value half (§3, §4.3, §8): a caret on the
/// key sub-token of a `map<K, V>` type never resolves to a descriptor, even
/// though the node itself anchors to the synthetic map-entry message.
pub fn deep_path_search(
    ast: &Ast,
    link: &dyn LinkResult,
    path: &AncestorPath,
    offset: usize,
) -> Result<(Descriptor, ByteSpan), ResolveError> {
    let filtered: Vec<NodeId> = path.iter().copied().filter(|&id| ast.kind(id) != NodeKind::WrapperNode).collect();
    if filtered.is_empty() {
        return Err(ResolveError::NoDescriptor);
    }

    let mut stack = phase_a(ast, link, &filtered, offset)?;

    if let [only] = stack.as_slice()
        && let Some(desc) = &only.desc
    {
        return Ok((desc.clone(), leaf_range(ast, path)));
    }

    phase_b(ast, link, &filtered, &mut stack)?;

    let Some(leaf_entry) = stack.last() else {
        return Err(ResolveError::NoDescriptor);
    };
    let desc = leaf_entry.desc.clone().ok_or_else(|| ResolveError::UnresolvedDescriptor {
        have: nearest_resolved(&stack, stack.len() - 1).and_then(|e| e.desc.as_ref()).map(Descriptor::kind_tag).unwrap_or("none").to_string(),
        want: format!("{:?}", ast.kind(leaf_entry.node)),
    })?;
    Ok((desc, leaf_range(ast, path)))
}

/// Phase A: scan backward from the leaf for an anchor, per §4.3.
///
/// Returns the resolution stack in root-to-leaf order, with every entry
/// from the anchor to the root resolved and everything between the anchor
/// and the original leaf left unresolved for Phase B to fill in.
fn phase_a(ast: &Ast, link: &dyn LinkResult, filtered: &[NodeId], offset: usize) -> Result<Vec<StackEntry>, ResolveError> {
    // Collected deepest-first; reversed into root-to-leaf order at the end.
    let mut reverse_stack: Vec<StackEntry> = Vec::new();

    for (i, &node) in filtered.iter().enumerate().rev() {
        let kind = ast.kind(node);

        if kind == NodeKind::StringLiteral {
            let parent_is_import = i > 0 && ast.kind(filtered[i - 1]) == NodeKind::Import;
            if parent_is_import {
                reverse_stack.push(StackEntry { node, desc: None });
                continue;
            }
            return Err(ResolveError::NoDescriptor);
        }

        if kind.never_binds() {
            return Err(ResolveError::NoDescriptor);
        }

        match link.descriptor_proto(node) {
            Some(DescriptorProtoRef::File(_)) => {
                reverse_stack.push(StackEntry { node, desc: Some(Descriptor::File(link.parent_file())) });
                break;
            }
            Some(DescriptorProtoRef::Message(msg)) => {
                let is_map_entry = msg.options.as_ref().and_then(|o| o.map_entry).unwrap_or(false);
                if is_map_entry {
                    // `map<K, V>` is parsed as a single `MapType` node with
                    // the key type as its first child and the value type as
                    // the rest; a caret in the key half never denotes a
                    // descriptor (§3, §4.3, §8).
                    if let Some(&key_node) = ast.children(node).first() {
                        let key_span = ast.span(key_node);
                        if offset >= key_span.start && offset < ast.end_exclusive(key_node).max(key_span.start) {
                            return Err(ResolveError::NoDescriptor);
                        }
                    }
                    let value_type = msg.field.iter().find(|f| f.name() == "value").and_then(|f| f.type_name.as_deref());
                    let Some(type_name) = value_type else {
                        return Err(ResolveError::NoDescriptor);
                    };
                    let desc = link.find_descriptor_by_name(type_name.trim_start_matches('.'));
                    reverse_stack.push(StackEntry { node, desc });
                    break;
                }
                let nested = i > 0 && ast.kind(filtered[i - 1]) == NodeKind::Message;
                if nested {
                    reverse_stack.push(StackEntry { node, desc: None });
                    continue;
                }
                let desc = link.messages().into_iter().find(|m| m.name() == msg.name()).map(Descriptor::Message);
                reverse_stack.push(StackEntry { node, desc });
                break;
            }
            Some(DescriptorProtoRef::Enum(enum_proto)) => {
                let nested = i > 0 && ast.kind(filtered[i - 1]) == NodeKind::Message;
                if nested {
                    reverse_stack.push(StackEntry { node, desc: None });
                    continue;
                }
                let desc = link.enums().into_iter().find(|e| e.name() == enum_proto.name()).map(Descriptor::Enum);
                reverse_stack.push(StackEntry { node, desc });
                break;
            }
            Some(DescriptorProtoRef::Service(service_proto)) => {
                let desc = link.services().into_iter().find(|s| s.name() == service_proto.name()).map(Descriptor::Service);
                reverse_stack.push(StackEntry { node, desc });
                break;
            }
            Some(DescriptorProtoRef::UninterpretedOptionNamePart(_)) => {
                let field = link.find_option_name_field_descriptor(node)?;
                reverse_stack.push(StackEntry { node, desc: Some(Descriptor::Field(field)) });
                break;
            }
            Some(DescriptorProtoRef::UninterpretedOption(_)) => match link.find_option_field_descriptor(node) {
                None => {
                    reverse_stack.push(StackEntry { node, desc: None });
                    continue;
                }
                Some(field) => {
                    let desc = match field.kind() {
                        Kind::Message(m) => Descriptor::Message(m),
                        Kind::Enum(e) => Descriptor::Enum(e),
                        _ => return Err(ResolveError::ScalarOption),
                    };
                    reverse_stack.push(StackEntry { node, desc: Some(desc) });
                    break;
                }
            },
            _ => {
                reverse_stack.push(StackEntry { node, desc: None });
            }
        }

        // Reached the root without anchoring on anything more specific:
        // the root `File` becomes the anchor (§4.3, "Once an anchor is
        // found (or the root is reached), stop").
        if i == 0 {
            if let Some(last) = reverse_stack.last_mut() {
                last.desc = Some(Descriptor::File(link.parent_file()));
            }
        }
    }

    reverse_stack.reverse();
    Ok(reverse_stack)
}

/// Phase B: walk forward from the anchor, refining each unresolved entry
/// against the nearest resolved ancestor's descriptor (§4.3 refinement
/// table).
fn phase_b(
    ast: &Ast,
    link: &dyn LinkResult,
    filtered: &[NodeId],
    stack: &mut [StackEntry],
) -> Result<(), ResolveError> {
    for i in 0..stack.len() {
        if stack[i].desc.is_some() {
            continue;
        }
        let Some(have) = nearest_resolved(stack, i).and_then(|e| e.desc.clone()) else {
            continue;
        };
        let node = stack[i].node;
        let refined = refine(ast, link, &have, node, filtered)?;
        stack[i].desc = refined;
    }
    Ok(())
}

fn simple_name(ast: &Ast, node: NodeId) -> Option<&str> {
    ast.node(node).text.as_deref()
}

/// The §4.3 refinement table, condensed to the rules this implementation
/// covers. Combinations with no rule below fall through to
/// `Ok(None)`, which `deep_path_search` turns into an `UnresolvedDescriptor`
/// once the leaf is reached — matching the open question that some
/// `(have, want)` pairs (e.g. `ExtensionRange`/`Reserved` inside a message)
/// are deliberate gaps rather than bugs (§9).
fn refine(
    ast: &Ast,
    link: &dyn LinkResult,
    have: &Descriptor,
    node: NodeId,
    filtered: &[NodeId],
) -> Result<Option<Descriptor>, ResolveError> {
    let kind = ast.kind(node);
    match have {
        Descriptor::File(file) => match kind {
            NodeKind::Message => {
                let name = simple_name(ast, node);
                Ok(file.messages().find(|m| name == Some(m.name())).map(Descriptor::Message))
            }
            NodeKind::Enum => {
                let name = simple_name(ast, node);
                Ok(file.enums().find(|e| name == Some(e.name())).map(Descriptor::Enum))
            }
            NodeKind::Service => {
                let name = simple_name(ast, node);
                Ok(file.services().find(|s| name == Some(s.name())).map(Descriptor::Service))
            }
            NodeKind::Import => Ok(link.imports().into_iter().next().map(Descriptor::File)),
            NodeKind::Extend => Ok(Some(Descriptor::File(file.clone()))),
            NodeKind::Ident | NodeKind::CompoundIdent => {
                let name = simple_name(ast, node).unwrap_or_default();
                link.find_extendee_descriptor_by_name(name).map(Descriptor::Message).map(Some).ok_or(ResolveError::InvalidExtend)
            }
            _ => Ok(None),
        },
        Descriptor::Message(message) => match kind {
            NodeKind::Field | NodeKind::MapField | NodeKind::Group => {
                let name = simple_name(ast, node);
                Ok(message.fields().find(|f| name == Some(f.name())).map(Descriptor::Field))
            }
            NodeKind::Oneof => {
                let name = simple_name(ast, node);
                Ok(message.oneofs().find(|o| name == Some(o.name())).map(Descriptor::Oneof))
            }
            NodeKind::Message => {
                let name = simple_name(ast, node);
                Ok(message.child_messages().find(|m| name == Some(m.name())).map(Descriptor::Message))
            }
            NodeKind::Enum => {
                let name = simple_name(ast, node);
                Ok(message.child_enums().find(|e| name == Some(e.name())).map(Descriptor::Enum))
            }
            NodeKind::Extend => Ok(Some(Descriptor::Message(message.clone()))),
            NodeKind::FieldReference | NodeKind::MessageField => {
                let name = simple_name(ast, node).unwrap_or_default();
                if let Some(field) = link.resolve_message_literal_extension_name(node) {
                    return Ok(Some(Descriptor::Field(field)));
                }
                Ok(message.fields().find(|f| f.name() == name).map(Descriptor::Field))
            }
            NodeKind::MessageLiteral => Ok(Some(Descriptor::Message(message.clone()))),
            _ => Ok(None),
        },
        Descriptor::Extension(ext) => match kind {
            NodeKind::Ident => {
                let name = simple_name(ast, node);
                if name == Some(ext.name()) {
                    return Ok(Some(Descriptor::Extension(ext.clone())));
                }
                match ext.kind() {
                    Kind::Message(m) => Ok(Some(Descriptor::Message(m))),
                    Kind::Enum(e) => Ok(Some(Descriptor::Enum(e))),
                    _ => Ok(Some(Descriptor::Extension(ext.clone()))),
                }
            }
            _ => Ok(None),
        },
        Descriptor::Field(field) => match kind {
            NodeKind::CompactOptions => Ok(Some(Descriptor::Field(field.clone()))),
            NodeKind::MapType => match field.kind() {
                Kind::Message(m) => Ok(Some(Descriptor::Message(m))),
                _ => Ok(None),
            },
            NodeKind::Ident => match field.kind() {
                Kind::Message(m) => Ok(Some(Descriptor::Message(m))),
                Kind::Enum(e) => {
                    let name = simple_name(ast, node);
                    let found = e.values().find(|v| name == Some(v.name())).map(Descriptor::EnumValue);
                    Ok(found.or(Some(Descriptor::Enum(e))))
                }
                _ => Ok(Some(Descriptor::Field(field.clone()))),
            },
            _ => Ok(None),
        },
        Descriptor::Enum(en) => match kind {
            NodeKind::EnumValue => {
                let name = simple_name(ast, node);
                Ok(en.values().find(|v| name == Some(v.name())).map(Descriptor::EnumValue))
            }
            NodeKind::Ident => {
                let name = simple_name(ast, node);
                if name == Some(en.name()) {
                    Ok(Some(Descriptor::Enum(en.clone())))
                } else {
                    Ok(en.values().find(|v| name == Some(v.name())).map(Descriptor::EnumValue))
                }
            }
            _ => Ok(None),
        },
        Descriptor::EnumValue(value) => match kind {
            NodeKind::CompactOptions => Ok(Some(Descriptor::EnumValue(value.clone()))),
            _ => Ok(None),
        },
        Descriptor::Service(service) => match kind {
            NodeKind::Rpc => {
                let name = simple_name(ast, node);
                Ok(service.methods().find(|m| name == Some(m.name())).map(Descriptor::Method))
            }
            _ => Ok(None),
        },
        Descriptor::Method(method) => match kind {
            NodeKind::RpcType => {
                let position_is_first_rpc_type =
                    filtered.iter().position(|&n| n == node).map(|idx| idx > 0 && is_first_rpc_type(ast, filtered[idx - 1], node)).unwrap_or(false);
                let target = if position_is_first_rpc_type { method.input() } else { method.output() };
                Ok(Some(Descriptor::Message(target)))
            }
            NodeKind::CompactOptions => Ok(Some(Descriptor::Method(method.clone()))),
            _ => Ok(None),
        },
        Descriptor::Oneof(oneof) => match kind {
            NodeKind::Field => {
                let name = simple_name(ast, node);
                Ok(oneof.fields().find(|f| name == Some(f.name())).map(Descriptor::Field))
            }
            _ => Ok(None),
        },
    }
}

fn is_first_rpc_type(ast: &Ast, rpc: NodeId, rpc_type: NodeId) -> bool {
    ast.children(rpc).iter().position(|&c| c == rpc_type).map(|pos| pos == 0).unwrap_or(true)
}

fn leaf_range(ast: &Ast, path: &AncestorPath) -> ByteSpan {
    let Some(&leaf) = path.last() else {
        return ByteSpan::new(0, 0);
    };
    if ast.kind(leaf) == NodeKind::Ident
        && path.len() >= 2
        && ast.kind(path[path.len() - 2]) == NodeKind::CompoundIdent
    {
        return ast.span(path[path.len() - 2]);
    }
    ast.span(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_ast::AstBuilder;
    use proto_descriptor::TableLinkResult;
    use prost_types::{DescriptorProto, FieldDescriptorProto, MessageOptions};

    fn map_entry_proto() -> DescriptorProto {
        DescriptorProto {
            name: Some("MapFieldEntry".to_string()),
            field: vec![
                FieldDescriptorProto { name: Some("key".to_string()), number: Some(1), ..Default::default() },
                FieldDescriptorProto {
                    name: Some("value".to_string()),
                    number: Some(2),
                    type_name: Some(".pkg.Foo".to_string()),
                    ..Default::default()
                },
            ],
            options: Some(MessageOptions { map_entry: Some(true), ..Default::default() }),
            ..Default::default()
        }
    }

    /// Builds `message Outer { map<string, Foo> entries = 1; }`'s AST shape:
    /// a `MapType` node whose first child is the key type and whose second
    /// child is the value type, under a `MapField` under `Message`.
    fn map_field_ast() -> (proto_ast::Ast, NodeId, NodeId) {
        let mut b = AstBuilder::new();
        let key = b.push_leaf(NodeKind::Ident, ByteSpan::new(10, 16), "string");
        let value = b.push_leaf(NodeKind::Ident, ByteSpan::new(18, 21), "Foo");
        let map_type = b.push(NodeKind::MapType, ByteSpan::new(10, 22), vec![key, value]);
        let map_field = b.push(NodeKind::MapField, ByteSpan::new(0, 30), vec![map_type]);
        let message = b.push(NodeKind::Message, ByteSpan::new(0, 40), vec![map_field]);
        let file = b.push(NodeKind::File, ByteSpan::new(0, 40), vec![message]);
        let ast = b.build(file);
        (ast, file, map_type)
    }

    #[test]
    fn caret_on_map_key_yields_no_descriptor() {
        let (ast, file, map_type) = map_field_ast();
        let (pool_file, _foo) = proto_tdd_support::fixtures::single_message_pool("pkg", "Foo");
        let message = ast.children(file)[0];
        let map_field = ast.children(message)[0];
        let path = vec![file, message, map_field, map_type];

        let link = TableLinkResult::builder(ast.clone(), pool_file).descriptor_proto(map_type, DescriptorProtoRef::Message(map_entry_proto())).build();

        let err = deep_path_search(&ast, &link, &path, 12).unwrap_err();
        assert_eq!(err, ResolveError::NoDescriptor);
    }

    #[test]
    fn caret_on_map_value_resolves_to_value_type() {
        let (ast, file, map_type) = map_field_ast();
        let (pool_file, foo) = proto_tdd_support::fixtures::single_message_pool("pkg", "Foo");
        let message = ast.children(file)[0];
        let map_field = ast.children(message)[0];
        let path = vec![file, message, map_field, map_type];

        let link = TableLinkResult::builder(ast.clone(), pool_file).descriptor_proto(map_type, DescriptorProtoRef::Message(map_entry_proto())).build();

        let (desc, _) = deep_path_search(&ast, &link, &path, 19).unwrap();
        assert_eq!(desc.full_name(), foo.full_name());
    }
}
