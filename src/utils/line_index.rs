/// Pre-computed line start offsets for byte position to line/column conversion.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { content, line_starts }
    }

    /// 1-based (line, column) for a byte offset. Columns count characters.
    ///
    /// Offsets past the end clamp to the end of the content.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.content[line_start..offset].chars().count() + 1;
        (line + 1, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_first_line() {
        let index = LineIndex::new("<a>\n</b>\n");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(2), (1, 3));
    }

    #[test]
    fn test_line_col_after_newline() {
        let index = LineIndex::new("<a>\n  </b>\n");
        assert_eq!(index.line_col(4), (2, 1));
        assert_eq!(index.line_col(6), (2, 3));
    }

    #[test]
    fn test_line_col_counts_characters() {
        let content = "é<x>";
        let index = LineIndex::new(content);
        assert_eq!(index.line_col(content.find('<').unwrap()), (1, 2));
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(100), (1, 3));
    }
}
