//! Resolver configuration (§4.9).

use std::time::Duration;

/// The well-known import paths the resolver serves from the linked-in
/// descriptor registry without ever touching disk (§4.6 strategy 1).
const DEFAULT_WELL_KNOWN_PATHS: &[&str] = &[
    "google/protobuf/any.proto",
    "google/protobuf/api.proto",
    "google/protobuf/descriptor.proto",
    "google/protobuf/duration.proto",
    "google/protobuf/empty.proto",
    "google/protobuf/field_mask.proto",
    "google/protobuf/source_context.proto",
    "google/protobuf/struct.proto",
    "google/protobuf/timestamp.proto",
    "google/protobuf/type.proto",
    "google/protobuf/wrappers.proto",
    "google/protobuf/compiler/plugin.proto",
];

/// Tunables for the import resolver, in the small `Copy` struct + `Default`
/// shape used elsewhere in the workspace (e.g. a parse budget) rather than a
/// builder.
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    /// Files larger than this are rejected by the filesystem strategy
    /// (§4.6 strategy 2) with [`proto_diagnostics::ResolveError::FileTooLarge`].
    pub max_file_bytes: u64,
    /// Logs a warning if the writer lock is held longer than this (§5).
    pub lock_warn_threshold: Duration,
    /// The well-known allow-list consulted by strategy 1.
    pub well_known_paths: &'static [&'static str],
}

impl ResolverConfig {
    /// One mebibyte, matching §4.6's fixed threshold.
    pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

    /// A config with a much shorter lock-warn threshold, for deterministic
    /// contention tests.
    pub fn for_tests() -> Self {
        Self { lock_warn_threshold: Duration::from_micros(1), ..Self::default() }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: Self::DEFAULT_MAX_FILE_BYTES,
            lock_warn_threshold: Duration::from_millis(10),
            well_known_paths: DEFAULT_WELL_KNOWN_PATHS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.max_file_bytes, 1024 * 1024);
        assert_eq!(cfg.lock_warn_threshold, Duration::from_millis(10));
        assert!(cfg.well_known_paths.contains(&"google/protobuf/descriptor.proto"));
    }

    #[test]
    fn for_tests_shrinks_the_warn_threshold() {
        assert!(ResolverConfig::for_tests().lock_warn_threshold < Duration::from_millis(1));
    }
}
