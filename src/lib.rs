//! lensmark: README normalizer and table-aware block segmenter
//!
//! Package registries hand out long descriptions that mix Markdown with raw
//! HTML and GFM pipe tables. This crate prepares such a description for
//! display in three steps:
//!
//! 1. [`normalize`] rewrites the common HTML constructs (images, links,
//!    headings, breaks, wrapper tags) into Markdown.
//! 2. [`segment`] cuts the normalized text into [`Block`]s: prose runs and
//!    pipe tables, in document order.
//! 3. [`render`] turns the blocks into HTML, prose through a CommonMark
//!    renderer and tables through a dedicated table renderer.
//!
//! # Design Principles
//! - Total functions: malformed HTML or tables degrade to plain text
//! - No regex: byte-level scanning with memchr
//! - O(n) per pass, no shared state between calls
//! - Blocks borrow from the normalized text
//!
//! # Example
//! ```
//! let html = lensmark::to_html("<h1>Demo</h1>\n| a | b |\n|---|---|\n| 1 | 2 |\n");
//! assert!(html.contains("<h1>Demo</h1>"));
//! assert!(html.contains("<th>a</th>"));
//! assert!(html.contains("<td>2</td>"));
//! ```

pub mod normalize;
pub mod registry;
pub mod render;
pub mod segment;
pub mod table;

mod error;

// Re-export primary types
pub use error::{Error, Result};
pub use normalize::normalize;
pub use registry::{ContentType, PackageDocument, ReleaseView};
pub use render::{HtmlWriter, render_raw};
pub use segment::{Block, segment};
pub use table::{Cells, Table, parse_row};

/// Colour scheme of rendered tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Class-name suffix for this theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Rendering options.
///
/// UI context such as the active theme is passed in explicitly; the renderer
/// keeps no state between calls.
#[derive(Debug, Clone)]
pub struct Options {
    /// Theme modifier added to the table wrapper class.
    pub theme: Theme,
    /// Pad data rows shorter than the header with empty cells.
    pub pad_rows: bool,
    /// Base CSS class of the `<div>` wrapping each table.
    pub table_class: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            pad_rows: false,
            table_class: "lensmark-table".to_string(),
        }
    }
}

/// A normalized README, ready to be segmented or rendered.
///
/// Owns the normalized Markdown so that [`Block`]s can borrow from it.
///
/// # Example
/// ```
/// use lensmark::{Block, Readme};
///
/// let readme = Readme::new("<p>Intro</p>\n|a|b|\n|-|-|\n|1|2|");
/// let blocks = readme.blocks();
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[1], Block::Table(ref rows) if rows.len() == 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Readme {
    markdown: String,
}

impl Readme {
    /// Normalize a raw description.
    pub fn new(raw: &str) -> Self {
        Self {
            markdown: normalize(raw),
        }
    }

    /// The normalized Markdown.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Segment the normalized Markdown into blocks.
    pub fn blocks(&self) -> Vec<Block<'_>> {
        segment(&self.markdown)
    }

    /// Render to HTML.
    pub fn to_html(&self, options: &Options) -> String {
        let blocks = self.blocks();
        let mut writer = HtmlWriter::with_capacity_for(self.markdown.len());
        render::render_blocks(&blocks, &mut writer, options);
        writer.into_string()
    }
}

/// Convert a raw README description to HTML.
///
/// This is the primary API for simple use cases.
pub fn to_html(description: &str) -> String {
    to_html_with_options(description, &Options::default())
}

/// Convert a raw README description to HTML with options.
pub fn to_html_with_options(description: &str, options: &Options) -> String {
    Readme::new(description).to_html(options)
}
