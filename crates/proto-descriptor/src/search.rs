//! [`SearchResult`] — what the import resolver (C8) hands back to a parse
//! request for one resolved import path (§3, §4.6).

use prost_reflect::FileDescriptor;

/// Where a resolved import's content came from. The resolver never blocks
/// on re-parsing a file it already linked; [`ResolvedSource::Descriptor`]
/// lets it hand back the cached linked result directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSource {
    /// Raw `.proto` source text that still needs parsing and linking.
    Bytes(Vec<u8>),
    /// An already-linked file, served from the global registry, a native
    /// module's precompiled descriptor set, or the resolver's own cache.
    Descriptor(FileDescriptor),
}

/// The outcome of resolving one import path through the strategy chain
/// (§4.6).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The canonical import path this result answers for, e.g.
    /// `google/protobuf/descriptor.proto` — not necessarily the filesystem
    /// path the content was read from.
    pub resolved_path: String,
    /// Monotonic version of the content at `resolved_path`, bumped on every
    /// filesystem or in-editor change (§4.6b). Sources with no versioning
    /// concept (the well-known allowlist, the global registry) report `0`.
    pub version: i64,
    /// The resolved content itself.
    pub source: ResolvedSource,
}
