//! Filesystem/editor modification handling (§4.6b). `Create`, `Save`, and
//! `Change` keep the URI↔path maps in step with the native package system;
//! `Open`/`Close` intentionally touch nothing.

use crate::go_package::scan_go_package;
use crate::language_driver::LanguageDriver;
use crate::state::{ImportSource, WorkspaceState};

/// A new file appeared. Infers its canonical import path either from the
/// native package system or from a `go_package` option, falling back to a
/// workspace-relative key when neither is available.
pub fn handle_create(
    state: &WorkspaceState,
    driver: &impl LanguageDriver,
    uri: &str,
    text: &str,
    workspace_relative_fallback: &str,
) {
    let inferred = driver.implicit_package_path(uri).or_else(|| scan_go_package(text));
    let (path, source) = match inferred {
        Some(path) if driver.has_module() => (path, ImportSource::LocalNativeModule),
        Some(path) => (path, ImportSource::Disk),
        None => (workspace_relative_fallback.to_string(), ImportSource::Disk),
    };
    state.insert_mapping(uri, &path, source);
}

/// An open file was saved, or its buffer changed. Files resolved through a
/// native module re-infer their canonical path and the mapping is rewritten
/// if it moved; anything else is left alone.
pub fn handle_save_or_change(
    state: &WorkspaceState,
    driver: &impl LanguageDriver,
    uri: &str,
    text: &str,
) {
    let Some(old_path) = state.path_for_uri(uri) else {
        return;
    };
    match state.source_for_path(&old_path) {
        Some(ImportSource::LocalNativeModule) | Some(ImportSource::ModuleCache) => {}
        _ => return,
    }
    let Some(new_path) = driver.implicit_package_path(uri).or_else(|| scan_go_package(text)) else {
        return;
    };
    if new_path != old_path {
        state.rename_path(uri, &old_path, &new_path);
    }
}

/// A file was deleted. Purges every map entry for its canonical path.
pub fn handle_delete(state: &WorkspaceState, uri: &str) {
    if let Some(path) = state.path_for_uri(uri) {
        state.remove_path(&path);
    }
}

/// `Open`/`Close` are no-ops for path state (§4.6b) — documents opening or
/// closing in the editor doesn't change where their canonical import path
/// points.
pub fn handle_open_or_close() {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::language_driver::ModuleDiscovery;

    struct NoModuleDriver;
    impl LanguageDriver for NoModuleDriver {
        fn has_module(&self) -> bool {
            false
        }
        fn implicit_package_path(&self, _filename: &str) -> Option<String> {
            None
        }
        fn import_from_module(&self, _path: &str) -> Option<ModuleDiscovery> {
            None
        }
        fn synthesize_from_source(&self, _path: &str, _discovery: &str) -> Option<Vec<u8>> {
            None
        }
        fn find_generated_files(&self, _importer_uri: &str) -> Vec<String> {
            Vec::new()
        }
    }

    struct ModuleDriver(&'static str);
    impl LanguageDriver for ModuleDriver {
        fn has_module(&self) -> bool {
            true
        }
        fn implicit_package_path(&self, _filename: &str) -> Option<String> {
            Some(self.0.to_string())
        }
        fn import_from_module(&self, _path: &str) -> Option<ModuleDiscovery> {
            None
        }
        fn synthesize_from_source(&self, _path: &str, _discovery: &str) -> Option<Vec<u8>> {
            None
        }
        fn find_generated_files(&self, _importer_uri: &str) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn create_falls_back_to_workspace_relative_key_with_no_module() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        handle_create(&state, &NoModuleDriver, "file:///a/b.proto", "syntax = \"proto3\";", "a/b.proto");
        assert_eq!(state.path_for_uri("file:///a/b.proto"), Some("a/b.proto".to_string()));
        assert_eq!(state.source_for_path("a/b.proto"), Some(ImportSource::Disk));
    }

    #[test]
    fn create_uses_implicit_package_path_when_module_present() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        let driver = ModuleDriver("pkg/b.proto");
        handle_create(&state, &driver, "file:///a/b.proto", "syntax = \"proto3\";", "a/b.proto");
        assert_eq!(state.path_for_uri("file:///a/b.proto"), Some("pkg/b.proto".to_string()));
        assert_eq!(state.source_for_path("pkg/b.proto"), Some(ImportSource::LocalNativeModule));
    }

    #[test]
    fn save_rewrites_mapping_when_canonical_path_moves() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_mapping("file:///a/b.proto", "old/b.proto", ImportSource::LocalNativeModule);
        let driver = ModuleDriver("new/b.proto");
        handle_save_or_change(&state, &driver, "file:///a/b.proto", "syntax = \"proto3\";");
        assert_eq!(state.path_for_uri("file:///a/b.proto"), Some("new/b.proto".to_string()));
    }

    #[test]
    fn save_leaves_disk_sourced_files_untouched() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_mapping("file:///a/b.proto", "a/b.proto", ImportSource::Disk);
        let driver = ModuleDriver("should/not/apply.proto");
        handle_save_or_change(&state, &driver, "file:///a/b.proto", "syntax = \"proto3\";");
        assert_eq!(state.path_for_uri("file:///a/b.proto"), Some("a/b.proto".to_string()));
    }

    #[test]
    fn delete_purges_the_mapping() {
        let state = WorkspaceState::new(ResolverConfig::for_tests());
        state.insert_mapping("file:///a/b.proto", "a/b.proto", ImportSource::Disk);
        handle_delete(&state, "file:///a/b.proto");
        assert_eq!(state.path_for_uri("file:///a/b.proto"), None);
    }
}
