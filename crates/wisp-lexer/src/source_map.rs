//! Byte-offset to line/column mapping.

/// Line-start offset table for one source buffer.
///
/// Built once per tokenization; maps byte offsets to 1-based (line, column)
/// pairs for token positions and error reporting.
#[derive(Debug, Clone)]
pub struct SourceMap {
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Map a byte offset to a 1-based (line, column) pair.
    ///
    /// Offsets past the end of the source map to the last line.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        (line as u32, (offset - line_start + 1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_offsets_to_lines_and_columns() {
        let map = SourceMap::new("ab\ncd\n");
        assert_eq!(map.line_col(0), (1, 1));
        assert_eq!(map.line_col(1), (1, 2));
        assert_eq!(map.line_col(2), (1, 3)); // the '\n' itself
        assert_eq!(map.line_col(3), (2, 1));
        assert_eq!(map.line_col(5), (2, 3));
        assert_eq!(map.line_col(6), (3, 1)); // just past the end
    }

    #[test]
    fn empty_source_is_line_one() {
        let map = SourceMap::new("");
        assert_eq!(map.line_col(0), (1, 1));
    }
}
