//! Line offset table for offset ↔ line/column conversion.
//!
//! Both the parser (node `loc`) and the editor model (row/column for
//! markers) go through this table so the two always agree on where a line
//! starts and how columns are counted.
//!
//! Lines are 1-based, columns are 0-based and count characters, not bytes.

/// A line/column pair as attached to syntax nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinePosition {
    /// 1-based line number.
    pub line: u32,
    /// 0-based character column.
    pub column: u32,
}

impl LinePosition {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        LinePosition { line, column }
    }
}

/// Pre-computed line start offsets.
///
/// Built once per source text; lookups are a binary search over the line
/// starts followed by a character count within one line.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start. `offsets[0] == 0`.
    offsets: Vec<u32>,
    /// Total source length in bytes.
    len: u32,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineOffsetTable {
            offsets,
            len: source.len() as u32,
        }
    }

    /// Number of lines in the source (an empty source has one line).
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// 1-based line containing `offset`. Offsets past the end map to the last line.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let offset = offset.min(self.len);
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// Byte offset where the 1-based `line` starts, `None` if out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Convert a byte offset into a line/column pair.
    ///
    /// Offsets past the end clamp to the end of the source. An offset that
    /// falls inside a multi-byte character counts that character as started.
    pub fn position(&self, source: &str, offset: u32) -> LinePosition {
        let offset = offset.min(self.len);
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let column = source.as_bytes()[line_start.min(end)..end]
            .iter()
            .filter(|b| (**b & 0xC0) != 0x80)
            .count();
        LinePosition {
            line,
            column: column as u32,
        }
    }

    /// Convert a 1-based line and 0-based character column back into a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end (before the
    /// newline); lines past the end clamp to the end of the source.
    pub fn offset_of(&self, source: &str, pos: LinePosition) -> u32 {
        let Some(line_start) = self.line_start_offset(pos.line.max(1)) else {
            return self.len;
        };
        let line_end = self
            .line_start_offset(pos.line.max(1) + 1)
            .map_or(self.len, |next| next.saturating_sub(1));
        let line_text = source
            .get(line_start as usize..line_end as usize)
            .unwrap_or_default();
        let within = line_text
            .char_indices()
            .nth(pos.column as usize)
            .map_or(line_text.len(), |(i, _)| i);
        line_start + within as u32
    }
}

#[cfg(test)]
mod tests;
