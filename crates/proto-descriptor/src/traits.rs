//! The `ParseResult`/`LinkResult` navigation traits (§6).
//!
//! These are the seam between the out-of-scope parser/linker and everything
//! C3-C7 build on top of: a parse front-end implements them once, and the
//! navigation code never needs to know whether it is looking at a freshly
//! parsed buffer or a cached, fully linked file.

use crate::descriptor::{Descriptor, DescriptorProtoRef};
use proto_ast::{Ast, NodeId};
use proto_diagnostics::ResolveError;
use prost_reflect::{
    EnumDescriptor, ExtensionDescriptor, FieldDescriptor, FileDescriptor, MessageDescriptor,
    ServiceDescriptor,
};

/// A parsed (but not necessarily linked) `.proto` file.
pub trait ParseResult {
    /// The concrete syntax tree produced for this file.
    fn ast(&self) -> &Ast;

    /// The unlinked descriptor-proto fragment a node was turned into while
    /// building the descriptor-proto tree, if any (§4.3 Phase A).
    fn descriptor_proto(&self, node: NodeId) -> Option<DescriptorProtoRef>;
}

/// A parsed and linked `.proto` file, with a live `prost_reflect` pool
/// behind it.
pub trait LinkResult: ParseResult {
    /// The linked descriptor for this file.
    fn parent_file(&self) -> FileDescriptor;

    /// Top-level message types declared directly in this file.
    fn messages(&self) -> Vec<MessageDescriptor>;

    /// Top-level enum types declared directly in this file.
    fn enums(&self) -> Vec<EnumDescriptor>;

    /// Services declared in this file.
    fn services(&self) -> Vec<ServiceDescriptor>;

    /// Extensions declared in this file, including ones nested in a message.
    fn extensions(&self) -> Vec<ExtensionDescriptor>;

    /// The files this one imports, in declaration order.
    fn imports(&self) -> Vec<FileDescriptor>;

    /// Whether this result stands in for a file that failed to parse or
    /// link — navigation calls on a placeholder always fail closed rather
    /// than guess (§4.4).
    fn is_placeholder(&self) -> bool {
        false
    }

    /// The option field an `Option`/`OptionName` node's final path segment
    /// refers to.
    fn find_option_field_descriptor(&self, option_node: NodeId) -> Option<FieldDescriptor>;

    /// The field a single `OptionName` path segment refers to, distinguishing
    /// a genuine unresolved reference from a language builtin like `default`
    /// or `json_name` (§4.3).
    fn find_option_name_field_descriptor(
        &self,
        name_part_node: NodeId,
    ) -> Result<FieldDescriptor, ResolveError>;

    /// The message type named by a bodyless `extend NAME { ... }`
    /// statement's `NAME`.
    fn find_extendee_descriptor_by_name(&self, name: &str) -> Option<MessageDescriptor>;

    /// The message type an `Any` message-literal's `[type.googleapis.com/pkg.Type]`
    /// type-reference URL node refers to.
    fn find_message_descriptor_by_type_reference_url_node(
        &self,
        node: NodeId,
    ) -> Option<MessageDescriptor>;

    /// The extension field a message-literal field name like
    /// `[pkg.my_extension]` refers to.
    fn resolve_message_literal_extension_name(&self, node: NodeId) -> Option<FieldDescriptor>;

    /// Looks up any top-level or nested descriptor in this file's pool by
    /// fully-qualified name.
    fn find_descriptor_by_name(&self, name: &str) -> Option<Descriptor>;

    /// Every AST node across the workspace that references `descriptor`,
    /// for find-references (C7). Definition sites are included.
    fn find_references(&self, descriptor: &Descriptor) -> Vec<NodeId>;

    /// The AST node that declares `descriptor` in this file, if this file
    /// is the one that declares it (§4.4). The definition locator narrows
    /// this down to the declaration's `Name` child; `None` here means "not
    /// declared in this file", not "has no source" — a descriptor backed
    /// only by a binary import has no declaring file at all.
    fn find_declaration_node(&self, descriptor: &Descriptor) -> Option<NodeId>;
}
