//! The `LanguageDriver` collaborator (§6): native-package discovery is out
//! of scope for this crate, but the resolver's strategy chain (§4.6
//! strategies 3 and the reverse-lookup repair) needs a seam to call into it.

/// What the language driver found when asked to locate an import inside a
/// native module.
#[derive(Debug, Clone)]
pub enum ModuleDiscovery {
    /// The module has a `.proto` source file at this path; open it
    /// directly.
    ProtoSource(String),
    /// Only generated native code exists; its text is handed back so the
    /// resolver can synthesize a virtual document from it.
    GeneratedOnly(String),
}

/// Native-language package discovery, format pretty-printing, and
/// module-cache lookup — the out-of-scope collaborator named in §1/§6.
/// An implementation wraps whatever package manager the host language
/// uses (e.g. a Go module cache, a Cargo registry).
pub trait LanguageDriver {
    /// Whether this workspace has a native module at all (§7 `NoModule`).
    fn has_module(&self) -> bool;

    /// The canonical import path a given workspace-relative filename would
    /// have if published as part of the current module (used to invert a
    /// `go_package`-style declaration into an import path).
    fn implicit_package_path(&self, filename: &str) -> Option<String>;

    /// Looks up `path` inside the local or cached native module.
    fn import_from_module(&self, path: &str) -> Option<ModuleDiscovery>;

    /// Synthesizes a proto stub from a discovered generated-source file,
    /// producing a reconstructed descriptor proto (§4.6 strategy 3).
    fn synthesize_from_source(&self, path: &str, discovery: &str) -> Option<Vec<u8>>;

    /// Finds the native-language files generated from `importer_uri`, for
    /// the reverse-lookup repair (§4.6 "Reverse lookup").
    fn find_generated_files(&self, importer_uri: &str) -> Vec<String>;
}
