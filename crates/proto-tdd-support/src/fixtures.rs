//! Canned descriptor pools for exercising navigation code without a real
//! parser or linker in the loop, in the style of `grpcurl-rs`'s
//! `make_test_pool`.

use crate::must::must_ok;
use prost_reflect::{DescriptorPool, FileDescriptor, MessageDescriptor};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};

/// Builds a one-file, one-message pool and returns both the file and the
/// message descriptor, for tests that only need a single navigable symbol.
pub fn single_message_pool(package: &str, message_name: &str) -> (FileDescriptor, MessageDescriptor) {
    let proto = FileDescriptorProto {
        name: Some(format!("{package}.proto")),
        package: Some(package.to_string()),
        message_type: vec![DescriptorProto {
            name: Some(message_name.to_string()),
            field: vec![FieldDescriptorProto {
                name: Some("id".to_string()),
                number: Some(1),
                r#type: Some(prost_types::field_descriptor_proto::Type::Int64 as i32),
                label: Some(prost_types::field_descriptor_proto::Label::Optional as i32),
                ..Default::default()
            }],
            ..Default::default()
        }],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    };

    let file = file_descriptor(proto);
    let message = must_ok(file.parent_pool().get_message_by_name(&format!("{package}.{message_name}")).ok_or(()));
    (file, message)
}

/// Registers a single hand-built `FileDescriptorProto` in a fresh pool and
/// returns the resulting `FileDescriptor`.
pub fn file_descriptor(proto: FileDescriptorProto) -> FileDescriptor {
    let name = proto.name.clone().unwrap_or_default();
    let set = FileDescriptorSet { file: vec![proto] };
    let pool = must_ok(DescriptorPool::from_file_descriptor_set(set));
    must_ok(pool.get_file_by_name(&name).ok_or(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_message_pool_resolves_its_own_field() {
        let (_, message) = single_message_pool("pkg", "Widget");
        assert_eq!(message.full_name(), "pkg.Widget");
        assert!(message.fields().any(|f| f.name() == "id"));
    }
}
