//! Import resolution (C8) and workspace-wide URI/path state for the proto
//! language server.
//!
//! [`ImportResolver`] implements the ordered strategy chain from §4.6; the
//! bidirectional URI↔path bookkeeping it mutates lives in [`WorkspaceState`],
//! guarded by a single `parking_lot::RwLock` per the §5 concurrency model.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod fs;
mod fs_events;
mod go_package;
mod language_driver;
mod resolver;
mod state;
mod suffix_match;

pub use config::ResolverConfig;
pub use fs::{OverlayFileSystem, StdFileSystem};
pub use fs_events::{handle_create, handle_delete, handle_open_or_close, handle_save_or_change};
pub use go_package::scan_go_package;
pub use language_driver::{LanguageDriver, ModuleDiscovery};
pub use resolver::{ImportContext, ImportResolver};
pub use state::{ImportSource, WorkspaceState};
pub use suffix_match::suffix_matched_path;
