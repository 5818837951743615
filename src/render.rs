//! HTML rendering of segmented README blocks.
//!
//! Text blocks go through pulldown-cmark with plain CommonMark settings; table
//! blocks are rendered here, so README tables display even though the Markdown
//! renderer has no table extension enabled.
//!
//! Raw HTML that survives normalization is escaped and shown as text, never
//! passed through to the page.

use pulldown_cmark::{Event, Options as MarkdownOptions, Parser, html};

use crate::segment::Block;
use crate::table::Table;
use crate::{Options, Theme};

/// HTML output writer with a pre-allocated buffer.
///
/// # Example
/// ```
/// use lensmark::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(100);
/// writer.write_str("<td>");
/// writer.write_escaped_text("a < b");
/// writer.write_str("</td>");
///
/// assert_eq!(writer.into_string(), "<td>a &lt; b</td>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
        }
    }

    /// Create with capacity based on the expected input size.
    ///
    /// Rendered README HTML is typically ~1.5x its Markdown.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: String::with_capacity(input_len + input_len / 2),
        }
    }

    /// Write a string as-is.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Write text content, escaping `<`, `>` and `&`.
    #[inline]
    pub fn write_escaped_text(&mut self, s: &str) {
        html_escape::encode_text_to_string(s, &mut self.out);
    }

    /// Write a double-quoted attribute value, escaping quotes as well.
    #[inline]
    pub fn write_escaped_attr(&mut self, s: &str) {
        html_escape::encode_double_quoted_attribute_to_string(s, &mut self.out);
    }

    /// Render a Markdown fragment as block-level HTML.
    pub fn write_markdown(&mut self, markdown: &str) {
        html::push_html(&mut self.out, markdown_events(markdown));
    }

    /// Render a Markdown fragment as inline HTML.
    ///
    /// The paragraph wrapper pulldown-cmark puts around a single line of text
    /// is removed, so the result can sit inside a table cell.
    pub fn write_inline_markdown(&mut self, markdown: &str) {
        if markdown.is_empty() {
            return;
        }
        let mut rendered = String::with_capacity(markdown.len() + 8);
        html::push_html(&mut rendered, markdown_events(markdown));
        let inline = rendered
            .strip_prefix("<p>")
            .and_then(|rest| rest.strip_suffix("</p>\n"))
            .unwrap_or_else(|| rendered.trim_end_matches('\n'));
        self.out.push_str(inline);
    }

    /// Whether nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Borrow the output written so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the writer and return the HTML.
    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }
}

/// CommonMark with no extensions: tables are handled by the segmenter.
fn markdown_options() -> MarkdownOptions {
    MarkdownOptions::empty()
}

/// Parse `markdown`, turning raw HTML into text so the writer escapes it.
fn markdown_events(markdown: &str) -> impl Iterator<Item = Event<'_>> {
    Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    })
}

/// Render blocks in order into `writer`.
pub fn render_blocks(blocks: &[Block<'_>], writer: &mut HtmlWriter, options: &Options) {
    for block in blocks {
        match block {
            Block::Text(text) => writer.write_markdown(text),
            Block::Table(rows) => render_table(rows, writer, options),
        }
    }
}

/// Render one table block.
///
/// A block with a header but no separator row (the separator failed the row
/// test, as in `|a|b|` followed by `|-`) is rendered as prose.
pub fn render_table(rows: &[&str], writer: &mut HtmlWriter, options: &Options) {
    let Some(table) = Table::from_rows(rows) else {
        log::debug!("rendering {}-row table block as text", rows.len());
        for row in rows {
            writer.write_markdown(row);
        }
        return;
    };
    if table.is_ragged() {
        log::debug!(
            "table has {} columns but ragged data rows (pad_rows = {})",
            table.columns(),
            options.pad_rows
        );
    }

    writer.write_str("<div class=\"");
    write_table_classes(writer, &options.table_class, options.theme);
    writer.write_str("\">\n<table>\n<thead>\n<tr>\n");
    for cell in &table.header {
        writer.write_str("<th>");
        writer.write_escaped_text(cell);
        writer.write_str("</th>");
        writer.newline();
    }
    writer.write_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.body {
        writer.write_str("<tr>\n");
        for cell in row {
            writer.write_str("<td>");
            writer.write_inline_markdown(cell);
            writer.write_str("</td>\n");
        }
        if options.pad_rows {
            for _ in row.len()..table.columns() {
                writer.write_str("<td></td>\n");
            }
        }
        writer.write_str("</tr>\n");
    }
    writer.write_str("</tbody>\n</table>\n</div>\n");
}

fn write_table_classes(writer: &mut HtmlWriter, base: &str, theme: Theme) {
    writer.write_escaped_attr(base);
    writer.write_str(" ");
    writer.write_escaped_attr(base);
    writer.write_str("--");
    writer.write_str(theme.as_str());
}

/// Render a description verbatim inside an escaped `<pre>` block.
///
/// Used for reStructuredText and plain-text descriptions, which must not go
/// through the Markdown path.
pub fn render_raw(description: &str) -> String {
    let mut writer = HtmlWriter::with_capacity_for(description.len());
    writer.write_str("<pre class=\"lensmark-raw\">");
    writer.write_escaped_text(description);
    writer.write_str("</pre>\n");
    writer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_markdown_drops_paragraph() {
        let mut writer = HtmlWriter::new();
        writer.write_inline_markdown("**bold** and `code`");
        assert_eq!(writer.as_str(), "<strong>bold</strong> and <code>code</code>");
    }

    #[test]
    fn inline_markdown_empty_cell() {
        let mut writer = HtmlWriter::new();
        writer.write_inline_markdown("");
        assert!(writer.is_empty());
    }

    #[test]
    fn escaped_attr() {
        let mut writer = HtmlWriter::new();
        writer.write_escaped_attr("a\"b");
        assert_eq!(writer.as_str(), "a&quot;b");
    }

    #[test]
    fn header_only_block_renders_as_text() {
        let mut writer = HtmlWriter::new();
        render_table(&["|a|"], &mut writer, &Options::default());
        assert_eq!(writer.as_str(), "<p>|a|</p>\n");
    }

    #[test]
    fn empty_block_renders_nothing() {
        let mut writer = HtmlWriter::new();
        render_table(&[], &mut writer, &Options::default());
        assert!(writer.is_empty());
    }

    #[test]
    fn block_html_is_escaped() {
        let mut writer = HtmlWriter::new();
        writer.write_markdown("<script>alert(1)</script>");
        assert!(!writer.as_str().contains("<script>"), "{}", writer.as_str());
        assert!(writer.as_str().contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn inline_html_in_cell_is_escaped() {
        let mut writer = HtmlWriter::new();
        writer.write_inline_markdown("a <b>bold</b>");
        assert_eq!(writer.as_str(), "a &lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn raw_is_escaped() {
        assert_eq!(
            render_raw("Title\n=====\n<tag>"),
            "<pre class=\"lensmark-raw\">Title\n=====\n&lt;tag&gt;</pre>\n"
        );
    }
}
