//! Byte-based span tracking and UTF-16 position conversion.
//!
//! The resolver and locator components work in byte offsets end to end;
//! conversion to editor `(line, character)` positions only happens at the
//! boundary with the (out of scope) LSP transport layer.

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::ByteSpan;

#[cfg(feature = "lsp-compat")]
mod wire;
#[cfg(feature = "lsp-compat")]
pub use wire::{position_to_lsp, range_to_lsp};
