//! [`TableLinkResult`] — a [`LinkResult`] backed by explicit node-keyed
//! lookup tables rather than a live linker.
//!
//! A real linker would populate these tables incrementally while resolving
//! names against the `prost_reflect::DescriptorPool`; test fixtures
//! (`proto-tdd-support`) build them directly. Either way the navigation
//! code downstream (C3-C7) only ever sees the trait.

use std::collections::HashMap;

use crate::descriptor::{Descriptor, DescriptorProtoRef};
use crate::traits::{LinkResult, ParseResult};
use proto_ast::{Ast, NodeId};
use proto_diagnostics::ResolveError;
use prost_reflect::{
    EnumDescriptor, ExtensionDescriptor, FieldDescriptor, FileDescriptor, MessageDescriptor,
    ServiceDescriptor,
};

/// A `LinkResult` whose every navigation query is answered from a table
/// built up front, in the style of `grpcurl-rs`'s pool-backed
/// `find_symbol_in_pool` lookup rather than a tree walk at query time.
///
/// `ast` and `file` are mandatory constructor parameters rather than
/// optional builder setters — a `TableLinkResult` with no AST or no backing
/// file descriptor isn't a partially-built value, it's not a `LinkResult`
/// at all, so the type never allows constructing one.
#[derive(Debug, Clone)]
pub struct TableLinkResult {
    ast: Ast,
    file: FileDescriptor,
    imports: Vec<FileDescriptor>,
    descriptor_protos: HashMap<NodeId, DescriptorProtoRef>,
    option_field_descriptors: HashMap<NodeId, FieldDescriptor>,
    option_name_field_descriptors: HashMap<NodeId, Result<FieldDescriptor, ResolveError>>,
    extendees_by_name: HashMap<String, MessageDescriptor>,
    type_reference_url_nodes: HashMap<NodeId, MessageDescriptor>,
    message_literal_extension_names: HashMap<NodeId, FieldDescriptor>,
    references: HashMap<String, Vec<NodeId>>,
    declarations: HashMap<String, NodeId>,
    placeholder: bool,
}

impl TableLinkResult {
    pub fn builder(ast: Ast, file: FileDescriptor) -> TableLinkResultBuilder {
        TableLinkResultBuilder {
            inner: TableLinkResult {
                ast,
                file,
                imports: Vec::new(),
                descriptor_protos: HashMap::new(),
                option_field_descriptors: HashMap::new(),
                option_name_field_descriptors: HashMap::new(),
                extendees_by_name: HashMap::new(),
                type_reference_url_nodes: HashMap::new(),
                message_literal_extension_names: HashMap::new(),
                references: HashMap::new(),
                declarations: HashMap::new(),
                placeholder: false,
            },
        }
    }

    /// Top-level names declared in [`Self::file`]'s package, looked up
    /// through the file's parent pool the same way `grpcurl-rs`'s
    /// `find_symbol_in_pool` walks a `DescriptorPool` by full name.
    fn lookup_in_pool(&self, name: &str) -> Option<Descriptor> {
        let pool = self.file.parent_pool();
        if let Some(d) = pool.get_message_by_name(name) {
            return Some(Descriptor::Message(d));
        }
        if let Some(d) = pool.get_enum_by_name(name) {
            return Some(Descriptor::Enum(d));
        }
        if let Some(d) = pool.get_service_by_name(name) {
            return Some(Descriptor::Service(d));
        }
        if let Some(d) = pool.get_extension_by_name(name) {
            return Some(Descriptor::Extension(d));
        }
        if let Some(d) = pool.get_file_by_name(name) {
            return Some(Descriptor::File(d));
        }
        None
    }
}

impl ParseResult for TableLinkResult {
    fn ast(&self) -> &Ast {
        &self.ast
    }

    fn descriptor_proto(&self, node: NodeId) -> Option<DescriptorProtoRef> {
        self.descriptor_protos.get(&node).cloned()
    }
}

impl LinkResult for TableLinkResult {
    fn parent_file(&self) -> FileDescriptor {
        self.file.clone()
    }

    fn messages(&self) -> Vec<MessageDescriptor> {
        self.parent_file().messages().collect()
    }

    fn enums(&self) -> Vec<EnumDescriptor> {
        self.parent_file().enums().collect()
    }

    fn services(&self) -> Vec<ServiceDescriptor> {
        self.parent_file().services().collect()
    }

    fn extensions(&self) -> Vec<ExtensionDescriptor> {
        self.parent_file().extensions().collect()
    }

    fn imports(&self) -> Vec<FileDescriptor> {
        self.imports.clone()
    }

    fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    fn find_option_field_descriptor(&self, option_node: NodeId) -> Option<FieldDescriptor> {
        self.option_field_descriptors.get(&option_node).cloned()
    }

    fn find_option_name_field_descriptor(
        &self,
        name_part_node: NodeId,
    ) -> Result<FieldDescriptor, ResolveError> {
        self.option_name_field_descriptors
            .get(&name_part_node)
            .cloned()
            .unwrap_or(Err(ResolveError::NoDescriptor))
    }

    fn find_extendee_descriptor_by_name(&self, name: &str) -> Option<MessageDescriptor> {
        self.extendees_by_name.get(name).cloned()
    }

    fn find_message_descriptor_by_type_reference_url_node(
        &self,
        node: NodeId,
    ) -> Option<MessageDescriptor> {
        self.type_reference_url_nodes.get(&node).cloned()
    }

    fn resolve_message_literal_extension_name(&self, node: NodeId) -> Option<FieldDescriptor> {
        self.message_literal_extension_names.get(&node).cloned()
    }

    fn find_descriptor_by_name(&self, name: &str) -> Option<Descriptor> {
        self.lookup_in_pool(name)
    }

    fn find_references(&self, descriptor: &Descriptor) -> Vec<NodeId> {
        self.references.get(&descriptor.full_name()).cloned().unwrap_or_default()
    }

    fn find_declaration_node(&self, descriptor: &Descriptor) -> Option<NodeId> {
        self.declarations.get(&descriptor.full_name()).copied()
    }
}

/// Builds a [`TableLinkResult`] one table entry at a time, once
/// [`TableLinkResult::builder`] has supplied the mandatory AST and file
/// descriptor.
#[derive(Debug)]
pub struct TableLinkResultBuilder {
    inner: TableLinkResult,
}

impl TableLinkResultBuilder {
    pub fn imports(mut self, imports: Vec<FileDescriptor>) -> Self {
        self.inner.imports = imports;
        self
    }

    pub fn placeholder(mut self, placeholder: bool) -> Self {
        self.inner.placeholder = placeholder;
        self
    }

    pub fn descriptor_proto(mut self, node: NodeId, proto: DescriptorProtoRef) -> Self {
        self.inner.descriptor_protos.insert(node, proto);
        self
    }

    pub fn option_field_descriptor(mut self, node: NodeId, field: FieldDescriptor) -> Self {
        self.inner.option_field_descriptors.insert(node, field);
        self
    }

    pub fn option_name_field_descriptor(
        mut self,
        node: NodeId,
        result: Result<FieldDescriptor, ResolveError>,
    ) -> Self {
        self.inner.option_name_field_descriptors.insert(node, result);
        self
    }

    pub fn extendee(mut self, name: impl Into<String>, message: MessageDescriptor) -> Self {
        self.inner.extendees_by_name.insert(name.into(), message);
        self
    }

    pub fn type_reference_url_node(mut self, node: NodeId, message: MessageDescriptor) -> Self {
        self.inner.type_reference_url_nodes.insert(node, message);
        self
    }

    pub fn message_literal_extension_name(mut self, node: NodeId, field: FieldDescriptor) -> Self {
        self.inner.message_literal_extension_names.insert(node, field);
        self
    }

    pub fn reference(mut self, full_name: impl Into<String>, node: NodeId) -> Self {
        self.inner.references.entry(full_name.into()).or_default().push(node);
        self
    }

    /// Records that `descriptor_name`'s declaration lives at `node`, for
    /// [`LinkResult::find_declaration_node`] (§4.4).
    pub fn declaration(mut self, descriptor_name: impl Into<String>, node: NodeId) -> Self {
        self.inner.declarations.insert(descriptor_name.into(), node);
        self
    }

    pub fn build(self) -> TableLinkResult {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_ast::{AstBuilder, NodeKind};
    use proto_position_tracking::ByteSpan;
    use proto_tdd_support::fixtures::single_message_pool;

    fn empty_ast() -> Ast {
        let mut b = AstBuilder::new();
        let file = b.push(NodeKind::File, ByteSpan::new(0, 0), vec![]);
        b.build(file)
    }

    #[test]
    fn unset_option_name_lookup_fails_closed() {
        let (file, _message) = single_message_pool("pkg", "Foo");
        let table = TableLinkResult::builder(empty_ast(), file).build();
        let node = proto_ast::AstBuilder::new().push(NodeKind::Ident, ByteSpan::new(0, 1), vec![]);
        assert_eq!(table.find_option_name_field_descriptor(node), Err(ResolveError::NoDescriptor));
    }

    #[test]
    fn references_default_to_empty() {
        let (file, _message) = single_message_pool("pkg", "Foo");
        let table = TableLinkResult::builder(empty_ast(), file).build();
        assert!(table.references.get("pkg.Foo").is_none());
    }

    #[test]
    fn declaration_lookup_round_trips() {
        let (file, message) = single_message_pool("pkg", "Foo");
        let node = proto_ast::AstBuilder::new().push(NodeKind::Ident, ByteSpan::new(0, 1), vec![]);
        let table = TableLinkResult::builder(empty_ast(), file).declaration(message.full_name(), node).build();
        assert_eq!(table.find_declaration_node(&Descriptor::Message(message)), Some(node));
    }

    #[test]
    fn declaration_lookup_misses_unknown_descriptor() {
        let (file, message) = single_message_pool("pkg", "Foo");
        let table = TableLinkResult::builder(empty_ast(), file).build();
        assert_eq!(table.find_declaration_node(&Descriptor::Message(message)), None);
    }
}
