//! URI↔path maps, import-source tags, and the synthetic-file store (§3, §5),
//! guarded by a single `parking_lot::RwLock` the way `perl-workspace-index`'s
//! `DocumentStore` guards its document map — reads clone out from under the
//! guard rather than holding it across any later work.

use std::collections::HashMap;

use parking_lot::RwLock;
use proto_diagnostics::with_contention_warning;

use crate::config::ResolverConfig;

/// How a canonical import path's content was ultimately obtained — needed so
/// a later `Save`/`Change` event (§4.6b) knows whether to re-infer the path
/// from a native module or leave it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    /// Served from the linked-in well-known registry; never re-inferred.
    WellKnown,
    /// Read from an on-disk `.proto` file already under the editor's view.
    Disk,
    /// Resolved through the local native module (source found on disk).
    LocalNativeModule,
    /// Resolved through a cached native module (outside the workspace).
    ModuleCache,
    /// Resolved via the path-translation repair against a sibling/parent of
    /// the importer.
    Relative,
    /// Served from the global proto registry with no native module backing.
    GlobalRegistry,
    /// Synthesized from discovered generated-native-code text.
    Synthetic,
}

#[derive(Debug, Default)]
struct Inner {
    uri_to_path: HashMap<String, String>,
    path_to_uri: HashMap<String, String>,
    sources: HashMap<String, ImportSource>,
    synthetic_text: HashMap<String, String>,
    versions: HashMap<String, i64>,
}

/// The resolver's mutable workspace-wide state.
#[derive(Debug)]
pub struct WorkspaceState {
    inner: RwLock<Inner>,
    config: ResolverConfig,
}

impl WorkspaceState {
    pub fn new(config: ResolverConfig) -> Self {
        Self { inner: RwLock::new(Inner::default()), config }
    }

    /// Looks up the canonical import path mapped to `uri`.
    pub fn path_for_uri(&self, uri: &str) -> Option<String> {
        let key = proto_uri::uri_key(uri);
        self.inner.read().uri_to_path.get(&key).cloned()
    }

    /// Looks up the document URI mapped to a canonical import path.
    pub fn uri_for_path(&self, path: &str) -> Option<String> {
        self.inner.read().path_to_uri.get(path).cloned()
    }

    /// The import source tag recorded for `path`, if known.
    pub fn source_for_path(&self, path: &str) -> Option<ImportSource> {
        self.inner.read().sources.get(path).copied()
    }

    /// Whether `path` is backed by in-memory synthesized text rather than a
    /// real document.
    pub fn is_synthetic(&self, path: &str) -> bool {
        self.inner.read().synthetic_text.contains_key(path)
    }

    /// The synthesized text for a virtual document, if one was ever written
    /// for `path`.
    pub fn synthetic_text(&self, path: &str) -> Option<String> {
        self.inner.read().synthetic_text.get(path).cloned()
    }

    /// Current version recorded for `path`, defaulting to 0 for sources with
    /// no versioning concept.
    pub fn version_for_path(&self, path: &str) -> i64 {
        self.inner.read().versions.get(path).copied().unwrap_or(0)
    }

    /// Records (or overwrites) the mapping for `path`, bumping its version.
    /// Takes the single write lock for the whole update, per §5.
    pub fn insert_mapping(&self, uri: &str, path: &str, source: ImportSource) {
        with_contention_warning("workspace_state.insert_mapping", self.config.lock_warn_threshold, || {
            let key = proto_uri::uri_key(uri);
            let mut inner = self.inner.write();
            inner.uri_to_path.insert(key, path.to_string());
            inner.path_to_uri.insert(path.to_string(), uri.to_string());
            inner.sources.insert(path.to_string(), source);
            *inner.versions.entry(path.to_string()).or_insert(0) += 1;
        });
    }

    /// Records synthesized text for a virtual document at `path` and marks
    /// it `Synthetic` (§4.6 strategy 3/4, §9 "Synthetic documents").
    pub fn insert_synthetic(&self, uri: &str, path: &str, text: String) {
        with_contention_warning("workspace_state.insert_synthetic", self.config.lock_warn_threshold, || {
            let key = proto_uri::uri_key(uri);
            let mut inner = self.inner.write();
            inner.uri_to_path.insert(key, path.to_string());
            inner.path_to_uri.insert(path.to_string(), uri.to_string());
            inner.sources.insert(path.to_string(), ImportSource::Synthetic);
            inner.synthetic_text.insert(path.to_string(), text);
        });
    }

    /// Purges every entry for `path` (the `Delete` event, §4.6b).
    pub fn remove_path(&self, path: &str) {
        with_contention_warning("workspace_state.remove_path", self.config.lock_warn_threshold, || {
            let mut inner = self.inner.write();
            if let Some(uri) = inner.path_to_uri.remove(path) {
                let key = proto_uri::uri_key(&uri);
                inner.uri_to_path.remove(&key);
            }
            inner.sources.remove(path);
            inner.synthetic_text.remove(path);
            inner.versions.remove(path);
        });
    }

    /// Re-points `old_path`'s mapping at `new_path`, preserving its source
    /// and version (the `Save`/`Change` "rewrite if changed" case, §4.6b).
    pub fn rename_path(&self, uri: &str, old_path: &str, new_path: &str) {
        with_contention_warning("workspace_state.rename_path", self.config.lock_warn_threshold, || {
            let mut inner = self.inner.write();
            let source = inner.sources.remove(old_path);
            let version = inner.versions.remove(old_path).unwrap_or(0);
            inner.path_to_uri.remove(old_path);
            let key = proto_uri::uri_key(uri);
            inner.uri_to_path.insert(key, new_path.to_string());
            inner.path_to_uri.insert(new_path.to_string(), uri.to_string());
            if let Some(source) = source {
                inner.sources.insert(new_path.to_string(), source);
            }
            inner.versions.insert(new_path.to_string(), version);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_round_trips_both_directions() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_mapping("file:///a/b.proto", "pkg/b.proto", ImportSource::Disk);
        assert_eq!(state.path_for_uri("file:///a/b.proto"), Some("pkg/b.proto".to_string()));
        assert_eq!(state.uri_for_path("pkg/b.proto"), Some("file:///a/b.proto".to_string()));
        assert_eq!(state.source_for_path("pkg/b.proto"), Some(ImportSource::Disk));
    }

    #[test]
    fn delete_purges_both_maps() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_mapping("file:///a/b.proto", "pkg/b.proto", ImportSource::Disk);
        state.remove_path("pkg/b.proto");
        assert_eq!(state.path_for_uri("file:///a/b.proto"), None);
        assert_eq!(state.uri_for_path("pkg/b.proto"), None);
    }

    #[test]
    fn synthetic_entries_are_flagged() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_synthetic("proto://pkg/b.proto#ws", "pkg/b.proto", "// synthesized".to_string());
        assert!(state.is_synthetic("pkg/b.proto"));
        assert_eq!(state.synthetic_text("pkg/b.proto"), Some("// synthesized".to_string()));
    }

    #[test]
    fn rename_preserves_source_and_version() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_mapping("file:///a/old.proto", "pkg/old.proto", ImportSource::LocalNativeModule);
        let version_before = state.version_for_path("pkg/old.proto");
        state.rename_path("file:///a/old.proto", "pkg/old.proto", "pkg/new.proto");
        assert_eq!(state.uri_for_path("pkg/old.proto"), None);
        assert_eq!(state.uri_for_path("pkg/new.proto"), Some("file:///a/old.proto".to_string()));
        assert_eq!(state.source_for_path("pkg/new.proto"), Some(ImportSource::LocalNativeModule));
        assert_eq!(state.version_for_path("pkg/new.proto"), version_before);
    }
}
