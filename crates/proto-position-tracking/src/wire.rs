//! Conversion helpers to `lsp_types` wire positions, gated behind
//! `lsp-compat` so the core crates do not pull in `lsp-types` by default.

use crate::{ByteSpan, LineIndex};
use lsp_types::{Position, Range};

/// Converts a byte offset to an LSP `Position`.
pub fn position_to_lsp(index: &LineIndex, text: &str, offset: usize) -> Position {
    let (line, character) = index.offset_to_position(text, offset);
    Position { line, character }
}

/// Converts a [`ByteSpan`] to an LSP `Range`.
pub fn range_to_lsp(index: &LineIndex, text: &str, span: ByteSpan) -> Range {
    Range {
        start: position_to_lsp(index, text, span.start),
        end: position_to_lsp(index, text, span.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_span_to_range() {
        let text = "message Foo {}";
        let index = LineIndex::new(text);
        let range = range_to_lsp(&index, text, ByteSpan::new(0, 7));
        assert_eq!(range.start, Position { line: 0, character: 0 });
        assert_eq!(range.end, Position { line: 0, character: 7 });
    }
}
