//! The [`Descriptor`] sum type and the unlinked-descriptor-proto shadow type
//! used during Phase A of the deep path search (§4.3).

use prost_reflect::{
    EnumDescriptor, EnumValueDescriptor, ExtensionDescriptor, FieldDescriptor, FileDescriptor,
    MessageDescriptor, MethodDescriptor, OneofDescriptor, ServiceDescriptor,
};

/// A resolved, linked descriptor of any kind.
///
/// `prost_reflect`'s descriptor types already satisfy the navigation surface
/// the distilled spec asks `LinkResult` to provide (`Messages()`, `Enums()`,
/// `parent_file()`, …), so this wraps them directly rather than re-deriving
/// a parallel descriptor hierarchy.
#[derive(Debug, Clone)]
pub enum Descriptor {
    File(FileDescriptor),
    Message(MessageDescriptor),
    Enum(EnumDescriptor),
    EnumValue(EnumValueDescriptor),
    Service(ServiceDescriptor),
    Method(MethodDescriptor),
    Field(FieldDescriptor),
    Extension(ExtensionDescriptor),
    Oneof(OneofDescriptor),
}

impl Descriptor {
    /// A short debug tag for this descriptor's kind, used only in
    /// [`proto_diagnostics::ResolveError::UnresolvedDescriptor`]'s
    /// `have`/`want` fields — never shown to the end user.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            Descriptor::File(_) => "File",
            Descriptor::Message(_) => "Message",
            Descriptor::Enum(_) => "Enum",
            Descriptor::EnumValue(_) => "EnumValue",
            Descriptor::Service(_) => "Service",
            Descriptor::Method(_) => "Method",
            Descriptor::Field(_) => "Field",
            Descriptor::Extension(_) => "Extension",
            Descriptor::Oneof(_) => "Oneof",
        }
    }

    /// The descriptor's fully-qualified name, or its file path for
    /// [`Descriptor::File`].
    pub fn full_name(&self) -> String {
        match self {
            Descriptor::File(d) => d.name().to_string(),
            Descriptor::Message(d) => d.full_name().to_string(),
            Descriptor::Enum(d) => d.full_name().to_string(),
            Descriptor::EnumValue(d) => d.full_name().to_string(),
            Descriptor::Service(d) => d.full_name().to_string(),
            Descriptor::Method(d) => d.full_name().to_string(),
            Descriptor::Field(d) => d.full_name().to_string(),
            Descriptor::Extension(d) => d.full_name().to_string(),
            Descriptor::Oneof(d) => d.full_name().to_string(),
        }
    }

    /// The file this descriptor is declared in.
    pub fn parent_file(&self) -> FileDescriptor {
        match self {
            Descriptor::File(d) => d.clone(),
            Descriptor::Message(d) => d.parent_file(),
            Descriptor::Enum(d) => d.parent_file(),
            Descriptor::EnumValue(d) => d.parent_enum().parent_file(),
            Descriptor::Service(d) => d.parent_file(),
            Descriptor::Method(d) => d.parent_service().parent_file(),
            Descriptor::Field(d) => d.parent_file(),
            Descriptor::Extension(d) => d.parent_file(),
            Descriptor::Oneof(d) => d.parent_file(),
        }
    }
}

impl From<FileDescriptor> for Descriptor {
    fn from(d: FileDescriptor) -> Self {
        Descriptor::File(d)
    }
}
impl From<MessageDescriptor> for Descriptor {
    fn from(d: MessageDescriptor) -> Self {
        Descriptor::Message(d)
    }
}
impl From<EnumDescriptor> for Descriptor {
    fn from(d: EnumDescriptor) -> Self {
        Descriptor::Enum(d)
    }
}
impl From<EnumValueDescriptor> for Descriptor {
    fn from(d: EnumValueDescriptor) -> Self {
        Descriptor::EnumValue(d)
    }
}
impl From<ServiceDescriptor> for Descriptor {
    fn from(d: ServiceDescriptor) -> Self {
        Descriptor::Service(d)
    }
}
impl From<MethodDescriptor> for Descriptor {
    fn from(d: MethodDescriptor) -> Self {
        Descriptor::Method(d)
    }
}
impl From<FieldDescriptor> for Descriptor {
    fn from(d: FieldDescriptor) -> Self {
        Descriptor::Field(d)
    }
}
impl From<ExtensionDescriptor> for Descriptor {
    fn from(d: ExtensionDescriptor) -> Self {
        Descriptor::Extension(d)
    }
}
impl From<OneofDescriptor> for Descriptor {
    fn from(d: OneofDescriptor) -> Self {
        Descriptor::Oneof(d)
    }
}

/// An *unlinked* descriptor-proto fragment attached to an AST node before
/// linking has run (§4.3 Phase A walks these, not [`Descriptor`]s).
///
/// This mirrors `protox`'s internal `ast::*` -> `prost_types::*DescriptorProto`
/// construction step, except here the mapping is keyed by [`proto_ast::NodeId`]
/// rather than produced inline during a single parse pass, since the AST and
/// the (possibly stale) descriptor-proto tree are kept as separate artifacts.
#[derive(Debug, Clone)]
pub enum DescriptorProtoRef {
    File(prost_types::FileDescriptorProto),
    Message(prost_types::DescriptorProto),
    Enum(prost_types::EnumDescriptorProto),
    Service(prost_types::ServiceDescriptorProto),
    Method(prost_types::MethodDescriptorProto),
    Field(prost_types::FieldDescriptorProto),
    UninterpretedOption(prost_types::UninterpretedOption),
    UninterpretedOptionNamePart(prost_types::uninterpreted_option::NamePart),
}

impl DescriptorProtoRef {
    /// The same debug tag convention as [`Descriptor::kind_tag`], so Phase A
    /// and Phase B failures can be logged uniformly.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            DescriptorProtoRef::File(_) => "File",
            DescriptorProtoRef::Message(_) => "Message",
            DescriptorProtoRef::Enum(_) => "Enum",
            DescriptorProtoRef::Service(_) => "Service",
            DescriptorProtoRef::Method(_) => "Method",
            DescriptorProtoRef::Field(_) => "Field",
            DescriptorProtoRef::UninterpretedOption(_) => "UninterpretedOption",
            DescriptorProtoRef::UninterpretedOptionNamePart(_) => "UninterpretedOptionNamePart",
        }
    }
}
