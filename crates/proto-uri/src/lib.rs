//! URI ↔ filesystem path conversion, plus the `proto://` virtual document
//! scheme (§6, §9 "Synthetic documents").
//!
//! Virtual URIs let the editor open a read-only, formatted rendition of a
//! descriptor that has no on-disk `.proto` source (an import resolved
//! through the native-module or global-registry strategies, §4.6). Their
//! content is never written to disk; only the resolver (`proto-workspace-index`)
//! keeps it in memory.

use url::Url;

const VIRTUAL_SCHEME: &str = "proto";

/// Converts a `file://` URI to a filesystem path.
///
/// Returns `None` for non-`file` schemes (including the virtual `proto://`
/// scheme — callers must check [`is_virtual_uri`] first).
pub fn uri_to_fs_path(uri: &str) -> Option<std::path::PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Converts a filesystem path to a `file://` URI.
pub fn fs_path_to_uri<P: AsRef<std::path::Path>>(path: P) -> Result<String, String> {
    let path = path.as_ref();
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| format!("failed to get current directory: {e}"))?
            .join(path)
    };
    Url::from_file_path(&abs_path)
        .map(|url| url.to_string())
        .map_err(|()| format!("failed to convert path to URI: {}", abs_path.display()))
}

/// Builds a virtual document URI of the form `proto://<canonicalPath>#<workspaceName>`.
///
/// `canonical_path` is an import path such as `google/protobuf/descriptor.proto`,
/// never a filesystem path.
pub fn make_virtual_uri(canonical_path: &str, workspace_name: &str) -> String {
    format!("{VIRTUAL_SCHEME}://{canonical_path}#{workspace_name}")
}

/// The parsed form of a `proto://` virtual URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualUri {
    pub canonical_path: String,
    pub workspace_name: String,
}

/// Parses a `proto://` virtual URI back into its canonical import path and
/// workspace name. Returns `None` if `uri` does not use the virtual scheme.
pub fn parse_virtual_uri(uri: &str) -> Option<VirtualUri> {
    let rest = uri.strip_prefix("proto://")?;
    let (path, workspace) = rest.split_once('#')?;
    Some(VirtualUri { canonical_path: path.to_string(), workspace_name: workspace.to_string() })
}

/// Returns `true` if `uri` uses the virtual `proto://` scheme.
pub fn is_virtual_uri(uri: &str) -> bool {
    uri.starts_with("proto://")
}

/// Normalizes a URI to a consistent key for lookups, lower-casing a
/// Windows drive letter if present so `file:///C:/x` and `file:///c:/x`
/// compare equal (mirrors the editor-side normalization every LSP server
/// ends up needing).
pub fn uri_key(uri: &str) -> String {
    if is_virtual_uri(uri) {
        return uri.to_string();
    }
    if let Ok(u) = Url::parse(uri) {
        let s = u.as_str().to_string();
        if let Some(rest) = s.strip_prefix("file:///")
            && rest.len() > 1
            && rest.as_bytes()[1] == b':'
            && rest.as_bytes()[0].is_ascii_alphabetic()
        {
            return format!("file:///{}{}", rest[0..1].to_ascii_lowercase(), &rest[1..]);
        }
        s
    } else {
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_uri_round_trips() {
        let uri = make_virtual_uri("google/protobuf/descriptor.proto", "myworkspace");
        assert_eq!(uri, "proto://google/protobuf/descriptor.proto#myworkspace");
        assert!(is_virtual_uri(&uri));
        let parsed = parse_virtual_uri(&uri).unwrap();
        assert_eq!(parsed.canonical_path, "google/protobuf/descriptor.proto");
        assert_eq!(parsed.workspace_name, "myworkspace");
    }

    #[test]
    fn non_virtual_uri_parses_to_none() {
        assert_eq!(parse_virtual_uri("file:///tmp/foo.proto"), None);
        assert!(!is_virtual_uri("file:///tmp/foo.proto"));
    }

    #[test]
    fn uri_key_normalizes_drive_letter_case() {
        assert_eq!(uri_key("file:///C:/Users/a.proto"), uri_key("file:///c:/Users/a.proto"));
    }

    #[test]
    fn uri_key_leaves_virtual_uris_untouched() {
        let uri = make_virtual_uri("a/b.proto", "ws");
        assert_eq!(uri_key(&uri), uri);
    }

    #[test]
    fn fs_path_round_trip() {
        let uri = fs_path_to_uri("/tmp/test.proto").unwrap();
        let path = uri_to_fs_path(&uri).unwrap();
        assert!(path.ends_with("test.proto"));
    }

    #[test]
    fn uri_to_fs_path_rejects_virtual_scheme() {
        let uri = make_virtual_uri("a/b.proto", "ws");
        assert_eq!(uri_to_fs_path(&uri), None);
    }
}
