//! The overlay filesystem seam the resolver reads through (§4.6 strategy 2).
//!
//! Kept as a trait rather than hard-coding `std::fs` so tests can substitute
//! an in-memory fixture without touching disk.

/// Minimal read access the resolver needs from the editor's overlay
/// filesystem (open-buffer content layered over real files).
pub trait OverlayFileSystem {
    /// Reads the full contents of `path`, if it exists.
    fn read(&self, path: &str) -> Option<Vec<u8>>;

    /// The byte length of `path`, if it exists — checked before [`Self::read`]
    /// so the 1 MiB cap (§4.6) never requires reading an oversized file.
    fn len(&self, path: &str) -> Option<u64>;

    /// Whether `path` denotes an existing regular file (used by the path
    /// translation repair's "stat's as a regular file" check).
    fn is_file(&self, path: &str) -> bool;
}

/// An [`OverlayFileSystem`] backed directly by `std::fs`, for production use
/// with no open-buffer overlay.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl OverlayFileSystem for StdFileSystem {
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        std::fs::read(path).ok()
    }

    fn len(&self, path: &str) -> Option<u64> {
        std::fs::metadata(path).ok().map(|m| m.len())
    }

    fn is_file(&self, path: &str) -> bool {
        std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}
