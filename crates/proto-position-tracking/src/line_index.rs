//! Line index for byte offset ↔ UTF-16 `(line, character)` conversion.

/// Precomputed line-start byte offsets for a piece of source text.
///
/// Editor clients speak UTF-16 code units for the `character` component of
/// a position (the LSP wire format), while the rest of the core works in
/// byte offsets; this type is the single place that bridges the two.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Builds an index over `text`.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset into a 0-based `(line, utf16_column)` pair.
    pub fn offset_to_position(&self, text: &str, offset: usize) -> (u32, u32) {
        let offset = offset.min(text.len());
        let line = self.line_starts.binary_search(&offset).unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column =
            text[line_start..offset].chars().map(char::len_utf16).sum::<usize>() as u32;
        (line as u32, column)
    }

    /// Converts a 0-based `(line, utf16_column)` pair back to a byte offset.
    ///
    /// Returns `text.len()` if `line` is past the end of the document.
    pub fn position_to_offset(&self, text: &str, line: u32, character: u32) -> usize {
        let line = line as usize;
        let Some(&line_start) = self.line_starts.get(line) else {
            return text.len();
        };
        let line_end = self.line_starts.get(line + 1).copied().unwrap_or(text.len());
        let line_text = &text[line_start..line_end];

        let mut utf16_count = 0usize;
        let mut byte_offset = 0usize;
        for ch in line_text.chars() {
            if utf16_count >= character as usize {
                break;
            }
            utf16_count += ch.len_utf16();
            byte_offset += ch.len_utf8();
        }
        line_start + byte_offset.min(line_text.len())
    }

    /// Number of lines recorded (always at least 1).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let text = "message Foo {}";
        let idx = LineIndex::new(text);
        assert_eq!(idx.offset_to_position(text, 8), (0, 8));
    }

    #[test]
    fn multi_line_round_trip() {
        let text = "message Foo {\n  int32 x = 1;\n}\n";
        let idx = LineIndex::new(text);
        let offset = text.find("x = 1").unwrap();
        let pos = idx.offset_to_position(text, offset);
        assert_eq!(pos.0, 1);
        let back = idx.position_to_offset(text, pos.0, pos.1);
        assert_eq!(back, offset);
    }

    #[test]
    fn position_past_end_of_document_clamps() {
        let text = "a\nb\n";
        let idx = LineIndex::new(text);
        assert_eq!(idx.position_to_offset(text, 50, 0), text.len());
    }

    #[test]
    fn non_ascii_column_counts_utf16_units() {
        // "mötley" — 'ö' is a single UTF-16 code unit but 2 UTF-8 bytes.
        let text = "mötley crüe";
        let idx = LineIndex::new(text);
        let offset = text.find("crüe").unwrap();
        let (_, col) = idx.offset_to_position(text, offset);
        // "mötley " has 7 UTF-16 units (m,ö,t,l,e,y,space)
        assert_eq!(col, 7);
        assert_eq!(idx.position_to_offset(text, 0, col), offset);
    }
}
