//! Block segmenter: splits normalized README text into text and table blocks.
//!
//! Markdown renderers without GFM table support show pipe tables as a wall of
//! `|` characters. Instead of relying on the renderer, this module cuts the
//! document into typed blocks: prose goes to the Markdown renderer, pipe
//! tables go to a dedicated table renderer.
//!
//! The segmenter is a line-based state machine with one line of lookahead. A
//! table starts at a row whose *next* line is a separator row (`|---|:-:|`)
//! and continues for as long as lines look like table rows. A lone line that
//! merely contains pipes stays in the surrounding prose.
//!
//! # Example
//! ```
//! use lensmark::{Block, segment};
//!
//! let blocks = segment("Intro\n| a | b |\n|---|---|\n| 1 | 2 |\nOutro");
//! assert_eq!(blocks, vec![
//!     Block::Text("Intro"),
//!     Block::Table(vec!["| a | b |", "|---|---|", "| 1 | 2 |"]),
//!     Block::Text("Outro"),
//! ]);
//! ```

use memchr::memchr;

/// A typed block of a README.
///
/// Both variants borrow from the segmented input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// Prose: one or more consecutive lines, joined by `\n`, untrimmed.
    Text(&'a str),
    /// Pipe table rows, trimmed, starting with the header row.
    ///
    /// Usually the separator and data rows follow. A separator line that is
    /// not itself a candidate row (`|-`) opens the table but ends it at once,
    /// leaving a header-only block.
    Table(Vec<&'a str>),
}

impl<'a> Block<'a> {
    /// Whether this is a table block.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// The source lines this block covers, in order.
    ///
    /// Text blocks yield their lines untrimmed; table blocks yield their
    /// trimmed rows.
    pub fn lines(&self) -> Box<dyn Iterator<Item = &'a str> + '_> {
        match self {
            Block::Text(text) => {
                let text: &'a str = *text;
                Box::new(text.split('\n'))
            }
            Block::Table(rows) => Box::new(rows.iter().copied()),
        }
    }
}

/// A line of the input, without its terminating `\n`.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

/// Split `input` on `\n` with byte offsets. An input ending in `\n` yields a
/// final empty line, and the empty input yields one empty line.
fn split_lines(input: &str) -> Vec<Line<'_>> {
    let bytes = input.as_bytes();
    let mut lines = Vec::with_capacity(input.len() / 40 + 1);
    let mut start = 0;
    while let Some(offset) = memchr(b'\n', &bytes[start..]) {
        let end = start + offset;
        lines.push(Line {
            start,
            end,
            text: &input[start..end],
        });
        start = end + 1;
    }
    lines.push(Line {
        start,
        end: input.len(),
        text: &input[start..],
    });
    lines
}

/// A trimmed line that starts and ends with `|`.
#[inline]
pub fn is_candidate_row(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// A trimmed line made only of `|`, `-`, `:` and whitespace, starting with
/// `|` and containing at least one `-`.
pub fn is_separator_line(trimmed: &str) -> bool {
    trimmed.starts_with('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

/// Pending prose lines, tracked as a byte range of the input.
#[derive(Default)]
struct TextRun {
    range: Option<(usize, usize)>,
}

impl TextRun {
    fn extend(&mut self, line: &Line<'_>) {
        self.range = Some(match self.range {
            Some((start, _)) => (start, line.end),
            None => (line.start, line.end),
        });
    }

    fn flush<'a>(&mut self, input: &'a str, blocks: &mut Vec<Block<'a>>) {
        if let Some((start, end)) = self.range.take() {
            blocks.push(Block::Text(&input[start..end]));
        }
    }
}

/// Segment normalized README text into text and table blocks.
///
/// Blocks come out in document order and together cover every line of the
/// input. The one exception is the empty line after a final `\n`, which is
/// not emitted as a block of its own.
pub fn segment(input: &str) -> Vec<Block<'_>> {
    let lines = split_lines(input);
    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut text = TextRun::default();
    let mut table: Vec<&str> = Vec::new();
    let mut in_table = false;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        let trimmed = line.text.trim();

        if in_table {
            if is_candidate_row(trimmed) {
                table.push(trimmed);
                i += 1;
                continue;
            }
            // The line that ends a table is classified again from scratch
            // without advancing.
            blocks.push(Block::Table(std::mem::take(&mut table)));
            in_table = false;
            continue;
        }

        let opens_table = is_candidate_row(trimmed)
            && lines
                .get(i + 1)
                .is_some_and(|next| is_separator_line(next.text.trim()));

        if opens_table {
            text.flush(input, &mut blocks);
            table.push(trimmed);
            in_table = true;
        } else {
            text.extend(line);
        }
        i += 1;
    }

    if in_table {
        blocks.push(Block::Table(table));
    } else if text.range.is_some_and(|(start, end)| start < end) {
        // An empty final run is the line after a trailing `\n`.
        text.flush(input, &mut blocks);
    }

    log::debug!(
        "segmented {} lines into {} blocks ({} tables)",
        lines.len(),
        blocks.len(),
        blocks.iter().filter(|b| b.is_table()).count()
    );
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_offsets() {
        let lines = split_lines("ab\n\ncd\n");
        let texts: Vec<_> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["ab", "", "cd", ""]);
        assert_eq!((lines[2].start, lines[2].end), (4, 6));
    }

    #[test]
    fn candidate_rows() {
        assert!(is_candidate_row("|a|"));
        assert!(is_candidate_row("|"));
        assert!(!is_candidate_row("a|b|c"));
        assert!(!is_candidate_row("|a"));
    }

    #[test]
    fn separator_lines() {
        assert!(is_separator_line("|---|---|"));
        assert!(is_separator_line("| :-- | --: |"));
        assert!(is_separator_line("|-"));
        assert!(!is_separator_line("|:::|"));
        assert!(!is_separator_line("---|---"));
        assert!(!is_separator_line("|-a-|"));
    }

    #[test]
    fn block_lines() {
        assert_eq!(Block::Text("a\n b").lines().collect::<Vec<_>>(), vec!["a", " b"]);
        assert_eq!(
            Block::Table(vec!["|a|", "|-|"]).lines().collect::<Vec<_>>(),
            vec!["|a|", "|-|"]
        );
    }
}
