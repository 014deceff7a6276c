use crate::Position;

/// The table of line start offsets of one input text.
///
/// It is built once per tokenization session. The first entry is always 0, followed by the offset
/// right after every line terminator (`\r\n`, `\r` or `\n`) and a trailing sentinel that is larger
/// than any valid offset. Position lookups are binary searches on this table, so rewinding the
/// stepping cursor never needs to scan the text again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineTable {
    starts: Vec<usize>,
}

const SENTINEL: usize = usize::MAX;

impl LineTable {
    pub(crate) fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    starts.push(i);
                }
                b'\r' | b'\n' => {
                    i += 1;
                    starts.push(i);
                }
                _ => i += 1,
            }
        }
        starts.push(SENTINEL);
        Self { starts }
    }

    /// The number of lines of the text. A text that ends with a line terminator has an empty last
    /// line.
    #[inline]
    pub(crate) fn line_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// The start offset of the given 1-based line.
    #[inline]
    pub(crate) fn line_start(&self, line_number: usize) -> Option<usize> {
        if line_number == 0 || line_number > self.line_count() {
            return None;
        }
        Some(self.starts[line_number - 1])
    }

    /// The start offset of the line following the given 1-based line, or the sentinel.
    #[inline]
    pub(crate) fn next_line_start(&self, line_number: usize) -> usize {
        self.starts.get(line_number).copied().unwrap_or(SENTINEL)
    }

    /// The line and column of the given byte offset.
    pub(crate) fn position(&self, offset: usize) -> Position {
        // The first entry is 0 and the sentinel is never <= offset, so `line` is in 1..=line_count.
        let line = self.starts.partition_point(|&start| start <= offset);
        Position::new(line, offset - self.starts[line - 1])
    }

    /// The text of the given 1-based line without its line terminator.
    /// Returns an empty string for lines out of range.
    pub(crate) fn line_text<'h>(&self, text: &'h str, line_number: usize) -> &'h str {
        let Some(start) = self.line_start(line_number) else {
            return "";
        };
        let Some(rest) = text.get(start..) else {
            return "";
        };
        match rest.find(['\r', '\n']) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }
}
