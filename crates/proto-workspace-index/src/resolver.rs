//! The import resolver's ordered strategy chain (§4.6) and its two repair
//! passes.

use std::path::Path;

use proto_descriptor::{ResolvedSource, SearchResult};
use proto_diagnostics::ResolveError;
use prost_reflect::DescriptorPool;

use crate::config::ResolverConfig;
use crate::fs::OverlayFileSystem;
use crate::go_package::scan_go_package;
use crate::language_driver::{LanguageDriver, ModuleDiscovery};
use crate::state::{ImportSource, WorkspaceState};
use crate::suffix_match::suffix_matched_path;

/// `gogo.proto`'s special-case redirect target (§4.6 strategy 5).
const GOGO_PROTO_REDIRECT: &str = "github.com/gogo/protobuf/gogoproto/gogo.proto";

/// The importer whose import statement triggered a resolution, carried so
/// the two repair passes (§4.6 "Path translation"/"Reverse lookup") have
/// somewhere to search relative to.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// Canonical path of the file containing the unresolved import.
    pub importer_path: String,
    /// Document URI of the importer, used by the reverse-lookup repair.
    pub importer_uri: String,
    /// How the importer's own path was resolved — repairs tag the newly
    /// translated path the same way.
    pub importer_source: ImportSource,
}

/// Resolves unresolved import strings through the ordered strategy chain,
/// and mutates [`WorkspaceState`] as a side effect of every successful
/// resolution.
pub struct ImportResolver<D: LanguageDriver, F: OverlayFileSystem> {
    state: WorkspaceState,
    config: ResolverConfig,
    driver: D,
    fs: F,
    /// The linked-in well-known/global registry (§4.6 strategies 1 and 4).
    registry: DescriptorPool,
}

impl<D: LanguageDriver, F: OverlayFileSystem> ImportResolver<D, F> {
    pub fn new(config: ResolverConfig, driver: D, fs: F, registry: DescriptorPool) -> Self {
        Self { state: WorkspaceState::new(config), config, driver, fs, registry }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// `FindFileByPath` (§4.6): the resolver's single public operation.
    pub fn find_file_by_path(
        &self,
        unresolved: &str,
        import_context: Option<&ImportContext>,
    ) -> Result<SearchResult, ResolveError> {
        if let Some(result) = self.try_well_known(unresolved) {
            tracing::debug!(unresolved, strategy = "well_known", "resolved");
            return Ok(result);
        }

        if let Some(result) = self.try_file_system(unresolved)? {
            tracing::debug!(unresolved, strategy = "file_system", "resolved");
            return Ok(result);
        }

        if let Some(result) = self.try_native_module(unresolved) {
            tracing::debug!(unresolved, strategy = "native_module", "resolved");
            return Ok(result);
        }

        if let Some(result) = self.try_global_registry(unresolved) {
            tracing::debug!(unresolved, strategy = "global_registry", "resolved");
            return Ok(result);
        }

        if unresolved == "gogo.proto"
            && let Some(result) = self.try_native_module(GOGO_PROTO_REDIRECT)
        {
            tracing::debug!(unresolved, strategy = "gogo_redirect", "resolved");
            return Ok(result);
        }

        let Some(ctx) = import_context else {
            tracing::debug!(unresolved, "not found, no import context for repairs");
            return Err(ResolveError::NotFound(unresolved.to_string()));
        };

        if let Some(result) = self.try_path_translation(unresolved, ctx)? {
            tracing::debug!(unresolved, strategy = "path_translation", "resolved");
            return Ok(result);
        }

        if let Some(result) = self.try_reverse_lookup(unresolved, ctx) {
            tracing::debug!(unresolved, strategy = "reverse_lookup", "resolved");
            return Ok(result);
        }

        tracing::debug!(unresolved, "exhausted every strategy and both repairs");
        Err(ResolveError::NotFound(unresolved.to_string()))
    }

    fn try_well_known(&self, unresolved: &str) -> Option<SearchResult> {
        if !self.config.well_known_paths.contains(&unresolved) {
            return None;
        }
        let file = self.registry.get_file_by_name(unresolved)?;
        Some(SearchResult {
            resolved_path: unresolved.to_string(),
            version: 0,
            source: ResolvedSource::Descriptor(file),
        })
    }

    fn try_file_system(&self, unresolved: &str) -> Result<Option<SearchResult>, ResolveError> {
        if self.state.is_synthetic(unresolved) {
            return Ok(None);
        }
        let Some(uri) = self.state.uri_for_path(unresolved) else {
            return Ok(None);
        };
        let Some(path) = proto_uri::uri_to_fs_path(&uri) else {
            return Ok(None);
        };
        let path = path.to_string_lossy().into_owned();
        let size = self.fs.len(&path).ok_or_else(|| ResolveError::NotFound(unresolved.to_string()))?;
        if size > self.config.max_file_bytes {
            return Err(ResolveError::FileTooLarge {
                path: unresolved.to_string(),
                size,
                limit: self.config.max_file_bytes,
            });
        }
        let bytes = self.fs.read(&path).ok_or_else(|| ResolveError::NotFound(unresolved.to_string()))?;
        Ok(Some(SearchResult {
            resolved_path: unresolved.to_string(),
            version: self.state.version_for_path(unresolved),
            source: ResolvedSource::Bytes(bytes),
        }))
    }

    fn try_native_module(&self, unresolved: &str) -> Option<SearchResult> {
        if !self.driver.has_module() {
            return None;
        }
        match self.driver.import_from_module(unresolved)? {
            ModuleDiscovery::ProtoSource(disk_path) => {
                let bytes = self.fs.read(&disk_path)?;
                let uri = proto_uri::fs_path_to_uri(&disk_path).ok()?;
                self.state.insert_mapping(&uri, unresolved, ImportSource::LocalNativeModule);
                Some(SearchResult {
                    resolved_path: unresolved.to_string(),
                    version: self.state.version_for_path(unresolved),
                    source: ResolvedSource::Bytes(bytes),
                })
            }
            ModuleDiscovery::GeneratedOnly(generated_text) => {
                if let Some(text) = self.state.synthetic_text(unresolved) {
                    return Some(SearchResult {
                        resolved_path: unresolved.to_string(),
                        version: self.state.version_for_path(unresolved),
                        source: ResolvedSource::Bytes(text.into_bytes()),
                    });
                }
                let stub = self.driver.synthesize_from_source(unresolved, &generated_text)?;
                let text = String::from_utf8_lossy(&stub).into_owned();
                let uri = proto_uri::make_virtual_uri(unresolved, "workspace");
                self.state.insert_synthetic(&uri, unresolved, text.clone());
                Some(SearchResult {
                    resolved_path: unresolved.to_string(),
                    version: 0,
                    source: ResolvedSource::Bytes(text.into_bytes()),
                })
            }
        }
    }

    fn try_global_registry(&self, unresolved: &str) -> Option<SearchResult> {
        if !self.config.well_known_paths.contains(&unresolved) {
            return None;
        }
        let file = self.registry.get_file_by_name(unresolved)?;
        let text = format_file_descriptor_as_text(&file);
        let uri = proto_uri::make_virtual_uri(unresolved, "workspace");
        self.state.insert_synthetic(&uri, unresolved, text.clone());
        Some(SearchResult { resolved_path: unresolved.to_string(), version: 0, source: ResolvedSource::Bytes(text.into_bytes()) })
    }

    fn try_path_translation(
        &self,
        unresolved: &str,
        ctx: &ImportContext,
    ) -> Result<Option<SearchResult>, ResolveError> {
        if unresolved.starts_with('/') || unresolved.split('/').any(|seg| seg == "..") {
            return Ok(None);
        }
        let importer = Path::new(&ctx.importer_path);
        let importer_dir = importer.parent().unwrap_or_else(|| Path::new(""));
        let file_name = Path::new(unresolved).file_name().and_then(|n| n.to_str()).unwrap_or(unresolved);

        let mut candidates = Vec::new();
        candidates.push(importer_dir.join(file_name));
        if let Some(parent) = importer_dir.parent() {
            candidates.push(parent.join(unresolved));
            if let Some(grandparent) = parent.parent() {
                candidates.push(grandparent.join(unresolved));
            }
        }
        if let Some(suffix_path) = suffix_matched_path(unresolved, &ctx.importer_path) {
            candidates.push(Path::new(&suffix_path).to_path_buf());
        }

        for candidate in candidates {
            let candidate_str = candidate.to_string_lossy().replace('\\', "/");
            if self.fs.is_file(&candidate_str) {
                let uri = proto_uri::fs_path_to_uri(&candidate_str)
                    .map_err(|_| ResolveError::NotFound(unresolved.to_string()))?;
                self.state.insert_mapping(&uri, unresolved, ctx.importer_source);
                let bytes = self.fs.read(&candidate_str).unwrap_or_default();
                return Ok(Some(SearchResult {
                    resolved_path: unresolved.to_string(),
                    version: self.state.version_for_path(unresolved),
                    source: ResolvedSource::Bytes(bytes),
                }));
            }
        }
        Ok(None)
    }

    fn try_reverse_lookup(&self, unresolved: &str, ctx: &ImportContext) -> Option<SearchResult> {
        for generated in self.driver.find_generated_files(&ctx.importer_uri) {
            if let Some(path) = find_import_line(&generated, unresolved) {
                let uri = proto_uri::make_virtual_uri(&path, "workspace");
                self.state.insert_mapping(&uri, &path, ctx.importer_source);
                return Some(SearchResult { resolved_path: path, version: 0, source: ResolvedSource::Bytes(generated.into_bytes()) });
            }
        }
        None
    }
}

/// Scans `generated_source` for protoc-gen-go's `// source: <path>.proto`
/// header comment and returns the proto path it names, when that path
/// matches `unresolved` (exactly, or as a path suffix — the importer may
/// have written a shorter relative import than the canonical path the
/// generator recorded).
fn find_import_line(generated_source: &str, unresolved: &str) -> Option<String> {
    for line in generated_source.lines() {
        let comment = line.trim().trim_start_matches("//").trim();
        let Some(proto_path) = comment.strip_prefix("source:").map(str::trim) else {
            continue;
        };
        if proto_path == unresolved || proto_path.ends_with(unresolved) {
            return Some(proto_path.to_string());
        }
    }
    None
}

fn format_file_descriptor_as_text(file: &prost_reflect::FileDescriptor) -> String {
    format!("// synthesized from the global registry: {}\n", file.name())
}
