//! Pipe table rows and cells.
//!
//! The segmenter hands table blocks over as raw rows. This module turns those
//! rows into cells for rendering: the first row is the header, the second is
//! the separator and is skipped, every other row is a data row.

use memchr::memchr_iter;
use smallvec::SmallVec;

/// Cells of one table row. Most README tables have only a handful of columns.
pub type Cells<'a> = SmallVec<[&'a str; 8]>;

/// Split a pipe-delimited row into trimmed cells.
///
/// The empty pieces produced by a leading and a trailing `|` are dropped;
/// empty cells in between are kept.
///
/// # Example
/// ```
/// use lensmark::parse_row;
///
/// assert_eq!(parse_row("| a | b |").as_slice(), ["a", "b"]);
/// assert_eq!(parse_row("|a||b|").as_slice(), ["a", "", "b"]);
/// ```
pub fn parse_row(row: &str) -> Cells<'_> {
    let mut pieces: Cells<'_> = SmallVec::new();
    let mut start = 0;
    for pipe in memchr_iter(b'|', row.as_bytes()) {
        pieces.push(&row[start..pipe]);
        start = pipe + 1;
    }
    pieces.push(&row[start..]);

    if pieces.last().is_some_and(|last| last.trim().is_empty()) {
        pieces.pop();
    }
    if pieces.first().is_some_and(|first| first.trim().is_empty()) {
        pieces.remove(0);
    }
    pieces.iter_mut().for_each(|cell| *cell = cell.trim());
    pieces
}

/// A table block split into header and data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    /// Header cells.
    pub header: Cells<'a>,
    /// Data rows, in order. Their widths are not checked against the header.
    pub body: Vec<Cells<'a>>,
}

impl<'a> Table<'a> {
    /// Build a table from the rows of a table block.
    ///
    /// Returns `None` for fewer than two rows (header plus separator); the
    /// renderer shows such a block as prose.
    pub fn from_rows(rows: &[&'a str]) -> Option<Self> {
        let &[header, _separator, ref body @ ..] = rows else {
            return None;
        };
        Some(Self {
            header: parse_row(header),
            body: body.iter().map(|&row| parse_row(row)).collect(),
        })
    }

    /// Number of header columns.
    pub fn columns(&self) -> usize {
        self.header.len()
    }

    /// Whether any data row differs in width from the header.
    pub fn is_ragged(&self) -> bool {
        self.body.iter().any(|row| row.len() != self.columns())
    }
}
