//! Line and column lookup.

/// Byte offsets of every line start, for `O(log L)` position lookups.
///
/// ```
/// use decaf_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "a = 1\nb = 2";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.line_text(source, 2), "b = 2");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `starts[i]` is the offset of line `i + 1`.
    starts: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut starts = vec![0u32];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        LineOffsetTable { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let index = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        index as u32 + 1
    }

    /// 1-based `(line, column)`; the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(start);
        let column = source.get(start..end).map_or(0, |s| s.chars().count());
        (line, column as u32 + 1)
    }

    /// Offset of the first byte of a 1-based line.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        line.checked_sub(1)
            .and_then(|i| self.starts.get(i as usize))
            .copied()
    }

    /// Text of a 1-based line without its newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> &'s str {
        let Some(start) = self.line_start_offset(line) else {
            return "";
        };
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize - 1);
        source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests;
